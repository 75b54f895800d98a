//! # ISO 286 Limits and Fits
//!
//! Hole and shaft limit deviations, limit sizes and clearance for nominal
//! sizes up to 500 mm.
//!
//! ## Supported Designations
//!
//! - Tolerance grades IT5 to IT11
//! - Shafts: d e f g h js k m n p
//! - Holes: D E F G H JS (general rule, EI = -es of the same letter)
//!
//! ## Size Steps
//!
//! A nominal size belongs to the step "above X up to and including Y", so
//! 3.0 mm is in the 0-3 step and 3.01 mm in the 3-6 step.
//!
//! ## Reference
//!
//! ISO 286-1:2010, Tables 1 and 2; ISO 286-2:2010.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::subst::fmt_num;

/// Upper bounds of the 13 nominal size steps (mm)
pub const SIZE_STEP_UPPER_MM: [f64; 13] = [
    3.0, 6.0, 10.0, 18.0, 30.0, 50.0, 80.0, 120.0, 180.0, 250.0, 315.0, 400.0, 500.0,
];

/// Standard tolerance values (µm), grades IT5 to IT11
const IT_TABLE: [(u8, [f64; 13]); 7] = [
    (5, [4.0, 5.0, 6.0, 8.0, 9.0, 11.0, 13.0, 15.0, 18.0, 20.0, 23.0, 25.0, 27.0]),
    (6, [6.0, 8.0, 9.0, 11.0, 13.0, 16.0, 19.0, 22.0, 25.0, 29.0, 32.0, 36.0, 40.0]),
    (7, [10.0, 12.0, 15.0, 18.0, 21.0, 25.0, 30.0, 35.0, 40.0, 46.0, 52.0, 57.0, 63.0]),
    (8, [14.0, 18.0, 22.0, 27.0, 33.0, 39.0, 46.0, 54.0, 63.0, 72.0, 81.0, 89.0, 97.0]),
    (9, [25.0, 30.0, 36.0, 43.0, 52.0, 62.0, 74.0, 87.0, 100.0, 115.0, 130.0, 140.0, 155.0]),
    (10, [40.0, 48.0, 58.0, 70.0, 84.0, 100.0, 120.0, 140.0, 160.0, 185.0, 210.0, 230.0, 250.0]),
    (11, [60.0, 75.0, 90.0, 110.0, 130.0, 160.0, 190.0, 220.0, 250.0, 290.0, 320.0, 360.0, 400.0]),
];

/// Shaft upper deviations es (µm) for letters below h
const SHAFT_ES: [(&str, [f64; 13]); 5] = [
    ("d", [-20.0, -30.0, -40.0, -50.0, -65.0, -80.0, -100.0, -120.0, -145.0, -170.0, -190.0, -210.0, -230.0]),
    ("e", [-14.0, -20.0, -25.0, -32.0, -40.0, -50.0, -60.0, -72.0, -85.0, -100.0, -110.0, -125.0, -135.0]),
    ("f", [-6.0, -10.0, -13.0, -16.0, -20.0, -25.0, -30.0, -36.0, -43.0, -50.0, -56.0, -62.0, -68.0]),
    ("g", [-2.0, -4.0, -5.0, -6.0, -7.0, -9.0, -10.0, -12.0, -14.0, -15.0, -17.0, -18.0, -20.0]),
    ("h", [0.0; 13]),
];

/// Shaft lower deviations ei (µm) for letters above h
const SHAFT_EI: [(&str, [f64; 13]); 4] = [
    ("k", [0.0, 1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 3.0, 3.0, 4.0, 4.0, 4.0, 5.0]),
    ("m", [2.0, 4.0, 6.0, 7.0, 8.0, 9.0, 11.0, 13.0, 15.0, 17.0, 20.0, 21.0, 23.0]),
    ("n", [4.0, 8.0, 10.0, 12.0, 15.0, 17.0, 20.0, 23.0, 27.0, 31.0, 34.0, 37.0, 40.0]),
    ("p", [6.0, 12.0, 15.0, 18.0, 22.0, 26.0, 32.0, 37.0, 43.0, 50.0, 56.0, 62.0, 68.0]),
];

const SHAFT_LETTERS: [&str; 10] = ["d", "e", "f", "g", "h", "js", "k", "m", "n", "p"];
const HOLE_LETTERS: [&str; 6] = ["D", "E", "F", "G", "H", "JS"];

/// Index of the size step containing `nominal_mm`.
pub fn size_step(nominal_mm: f64) -> CalcResult<usize> {
    if !nominal_mm.is_finite() || nominal_mm <= 0.0 || nominal_mm > 500.0 {
        return Err(CalcError::invalid_input(
            "nominal_diameter_mm",
            nominal_mm.to_string(),
            "must be in (0, 500] mm",
        ));
    }
    SIZE_STEP_UPPER_MM
        .iter()
        .position(|&upper| nominal_mm <= upper)
        .ok_or_else(|| CalcError::Internal {
            message: format!("no size step for {} mm", nominal_mm),
        })
}

/// Human-readable range of a size step, e.g. "18-30"
pub fn size_step_label(step: usize) -> String {
    let lower = if step == 0 { 0.0 } else { SIZE_STEP_UPPER_MM[step - 1] };
    format!("{}-{}", lower, SIZE_STEP_UPPER_MM[step])
}

/// Standard tolerance IT`grade` (µm) in a size step
pub fn standard_tolerance_um(grade: u8, step: usize) -> Option<f64> {
    IT_TABLE
        .iter()
        .find(|(g, _)| *g == grade)
        .and_then(|(_, values)| values.get(step).copied())
}

/// Which member a tolerance class applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Member {
    Hole,
    Shaft,
}

/// Parsed tolerance class such as "H7" or "js6"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToleranceClass {
    pub letter: String,
    pub grade: u8,
}

impl ToleranceClass {
    /// Parse a designation for `member`. Letter case selects hole (upper) or shaft (lower).
    pub fn parse(field: &str, text: &str, member: Member) -> CalcResult<Self> {
        let text = text.trim();
        let split = text.find(|c: char| c.is_ascii_digit()).unwrap_or(text.len());
        let (letter, grade_text) = text.split_at(split);

        let known: &[&str] = match member {
            Member::Hole => &HOLE_LETTERS,
            Member::Shaft => &SHAFT_LETTERS,
        };
        if !known.contains(&letter) {
            return Err(CalcError::unknown_option(field, text, known));
        }

        let grade: u8 = grade_text.parse().map_err(|_| {
            CalcError::invalid_input(field, text, "expected a tolerance grade number, e.g. H7")
        })?;
        if standard_tolerance_um(grade, 0).is_none() {
            return Err(CalcError::invalid_input(field, text, "tolerance grade must be IT5 to IT11"));
        }

        Ok(Self {
            letter: letter.to_string(),
            grade,
        })
    }
}

/// Upper and lower deviation of a tolerance class (µm)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Deviations {
    pub upper_um: f64,
    pub lower_um: f64,
}

impl Deviations {
    pub fn tolerance_um(&self) -> f64 {
        self.upper_um - self.lower_um
    }
}

fn table_value(table: &[(&str, [f64; 13])], letter: &str, step: usize) -> Option<f64> {
    table.iter().find(|(l, _)| *l == letter).map(|(_, v)| v[step])
}

/// Limit deviations of a shaft class in a size step
pub fn shaft_deviations(class: &ToleranceClass, step: usize) -> CalcResult<Deviations> {
    let it = it_for(class, step)?;
    let letter = class.letter.as_str();
    if letter == "js" {
        return Ok(Deviations { upper_um: it / 2.0, lower_um: -it / 2.0 });
    }
    if let Some(es) = table_value(&SHAFT_ES, letter, step) {
        return Ok(Deviations { upper_um: es, lower_um: es - it });
    }
    if let Some(ei) = table_value(&SHAFT_EI, letter, step) {
        // k has a non-zero deviation only for grades 4 to 7
        let ei = if letter == "k" && !(4..=7).contains(&class.grade) { 0.0 } else { ei };
        return Ok(Deviations { upper_um: ei + it, lower_um: ei });
    }
    Err(CalcError::unknown_option("shaft", letter, &SHAFT_LETTERS))
}

/// Limit deviations of a hole class in a size step (general rule EI = -es)
pub fn hole_deviations(class: &ToleranceClass, step: usize) -> CalcResult<Deviations> {
    let it = it_for(class, step)?;
    let letter = class.letter.to_lowercase();
    if letter == "js" {
        return Ok(Deviations { upper_um: it / 2.0, lower_um: -it / 2.0 });
    }
    match table_value(&SHAFT_ES, &letter, step) {
        Some(es) => Ok(Deviations { upper_um: -es + it, lower_um: -es }),
        None => Err(CalcError::unknown_option("hole", class.letter.as_str(), &HOLE_LETTERS)),
    }
}

fn it_for(class: &ToleranceClass, step: usize) -> CalcResult<f64> {
    standard_tolerance_um(class.grade, step).ok_or_else(|| {
        CalcError::invalid_input(
            "grade",
            class.grade.to_string(),
            "tolerance grade must be IT5 to IT11",
        )
    })
}

/// Kind of fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitType {
    Clearance,
    Transition,
    Interference,
}

/// Input parameters for a hole/shaft fit.
///
/// ## JSON Example
///
/// ```json
/// { "label": "Bearing seat", "nominal_diameter_mm": 25.0, "hole": "H7", "shaft": "k6" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitInput {
    pub label: String,

    /// Nominal diameter (mm), (0, 500]
    pub nominal_diameter_mm: f64,

    /// Hole tolerance class, e.g. "H7"
    pub hole: String,

    /// Shaft tolerance class, e.g. "g6"
    pub shaft: String,
}

impl FitInput {
    /// Validate and parse both tolerance classes.
    pub fn validate(&self) -> CalcResult<(usize, ToleranceClass, ToleranceClass)> {
        let step = size_step(self.nominal_diameter_mm)?;
        let hole = ToleranceClass::parse("hole", &self.hole, Member::Hole)?;
        let shaft = ToleranceClass::parse("shaft", &self.shaft, Member::Shaft)?;
        Ok((step, hole, shaft))
    }
}

/// Results of a fit calculation. Deviations in µm, sizes in mm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    /// Size step, e.g. "18-30"
    pub size_step: String,
    pub hole: Deviations,
    pub shaft: Deviations,
    pub hole_tolerance_um: f64,
    pub shaft_tolerance_um: f64,
    pub hole_max_mm: f64,
    pub hole_min_mm: f64,
    pub shaft_max_mm: f64,
    pub shaft_min_mm: f64,
    /// ES - ei (negative is interference)
    pub max_clearance_um: f64,
    /// EI - es (negative is interference)
    pub min_clearance_um: f64,
    pub fit_type: FitType,
    pub subst_max_clearance: String,
    pub subst_min_clearance: String,
}

/// Calculate hole and shaft limits and the resulting fit.
pub fn calculate(input: &FitInput) -> CalcResult<FitResult> {
    let (step, hole_class, shaft_class) = input.validate()?;
    let hole = hole_deviations(&hole_class, step)?;
    let shaft = shaft_deviations(&shaft_class, step)?;
    let d = input.nominal_diameter_mm;

    let max_clearance = hole.upper_um - shaft.lower_um;
    let min_clearance = hole.lower_um - shaft.upper_um;
    let fit_type = if min_clearance >= 0.0 {
        FitType::Clearance
    } else if max_clearance <= 0.0 {
        FitType::Interference
    } else {
        FitType::Transition
    };

    Ok(FitResult {
        size_step: size_step_label(step),
        hole,
        shaft,
        hole_tolerance_um: hole.tolerance_um(),
        shaft_tolerance_um: shaft.tolerance_um(),
        hole_max_mm: d + hole.upper_um / 1000.0,
        hole_min_mm: d + hole.lower_um / 1000.0,
        shaft_max_mm: d + shaft.upper_um / 1000.0,
        shaft_min_mm: d + shaft.lower_um / 1000.0,
        max_clearance_um: max_clearance,
        min_clearance_um: min_clearance,
        fit_type,
        subst_max_clearance: format!(
            r"C_{{max}} = ES - ei = {} - ({}) = {}\,\mu\text{{m}}",
            fmt_num(hole.upper_um),
            fmt_num(shaft.lower_um),
            fmt_num(max_clearance)
        ),
        subst_min_clearance: format!(
            r"C_{{min}} = EI - es = {} - ({}) = {}\,\mu\text{{m}}",
            fmt_num(hole.lower_um),
            fmt_num(shaft.upper_um),
            fmt_num(min_clearance)
        ),
    })
}
