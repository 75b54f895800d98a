//! # Ashby Performance Index
//!
//! Material index `M = P^(1/n) / ρ` for minimum-mass design, where `P` is
//! Young's modulus (stiffness objectives) or strength (strength objectives)
//! and `n` depends on the loading:
//!
//! | Objective | Index |
//! |-----------|-------|
//! | tie_stiffness | E/ρ |
//! | beam_stiffness | E^(1/2)/ρ |
//! | panel_stiffness | E^(1/3)/ρ |
//! | tie_strength | σ/ρ |
//! | beam_strength | σ^(2/3)/ρ |
//! | panel_strength | σ^(1/2)/ρ |
//!
//! E is taken in GPa, σ in MPa and ρ in Mg/m³, the units of the usual
//! selection charts. Larger is better.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::parse_option;
use crate::errors::{require_positive, CalcError, CalcResult};
use crate::subst::{fmt_num, substitute};

/// Design objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    TieStiffness,
    #[default]
    BeamStiffness,
    PanelStiffness,
    TieStrength,
    BeamStrength,
    PanelStrength,
}

impl Objective {
    pub const ALL: [Objective; 6] = [
        Objective::TieStiffness,
        Objective::BeamStiffness,
        Objective::PanelStiffness,
        Objective::TieStrength,
        Objective::BeamStrength,
        Objective::PanelStrength,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Objective::TieStiffness => "tie_stiffness",
            Objective::BeamStiffness => "beam_stiffness",
            Objective::PanelStiffness => "panel_stiffness",
            Objective::TieStrength => "tie_strength",
            Objective::BeamStrength => "beam_strength",
            Objective::PanelStrength => "panel_strength",
        }
    }

    /// Exponent applied to the governing property
    pub fn exponent(&self) -> f64 {
        match self {
            Objective::TieStiffness | Objective::TieStrength => 1.0,
            Objective::BeamStiffness | Objective::PanelStrength => 0.5,
            Objective::PanelStiffness => 1.0 / 3.0,
            Objective::BeamStrength => 2.0 / 3.0,
        }
    }

    pub fn is_stiffness(&self) -> bool {
        matches!(
            self,
            Objective::TieStiffness | Objective::BeamStiffness | Objective::PanelStiffness
        )
    }

    fn latex(&self) -> &'static str {
        match self {
            Objective::TieStiffness => r"\frac{E}{\rho}",
            Objective::BeamStiffness => r"\frac{E^{1/2}}{\rho}",
            Objective::PanelStiffness => r"\frac{E^{1/3}}{\rho}",
            Objective::TieStrength => r"\frac{\sigma_f}{\rho}",
            Objective::BeamStrength => r"\frac{\sigma_f^{2/3}}{\rho}",
            Objective::PanelStrength => r"\frac{\sigma_f^{1/2}}{\rho}",
        }
    }

    fn exponent_latex(&self) -> &'static str {
        match self {
            Objective::TieStiffness | Objective::TieStrength => "1",
            Objective::BeamStiffness | Objective::PanelStrength => "1/2",
            Objective::PanelStiffness => "1/3",
            Objective::BeamStrength => "2/3",
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Objective {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_option("objective", s, &Self::ALL, Self::as_str)
    }
}

/// Input parameters for a performance index.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "6061-T6",
///   "youngs_modulus_gpa": 69.0,
///   "strength_mpa": 276.0,
///   "density_kg_m3": 2700.0,
///   "objective": "beam_stiffness"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AshbyInput {
    pub label: String,
    /// Young's modulus E (GPa)
    pub youngs_modulus_gpa: f64,
    /// Failure strength σ_f (MPa)
    pub strength_mpa: f64,
    /// Density ρ (kg/m³)
    pub density_kg_m3: f64,
    #[serde(default)]
    pub objective: Objective,
}

impl AshbyInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("youngs_modulus_gpa", self.youngs_modulus_gpa)?;
        require_positive("strength_mpa", self.strength_mpa)?;
        require_positive("density_kg_m3", self.density_kg_m3)?;
        Ok(())
    }
}

/// Results for a performance index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AshbyResult {
    pub objective: Objective,
    /// Property the index is built on, "E" or "sigma_f"
    pub property: String,
    pub property_value: f64,
    pub exponent: f64,
    /// ρ (Mg/m³)
    pub density_mg_m3: f64,
    pub index: f64,
    /// Index of every objective for the same material
    pub all_indices: Vec<(Objective, f64)>,
    pub subst_index: String,
}

fn index_for(input: &AshbyInput, objective: Objective) -> f64 {
    let property = if objective.is_stiffness() {
        input.youngs_modulus_gpa
    } else {
        input.strength_mpa
    };
    property.powf(objective.exponent()) / (input.density_kg_m3 / 1000.0)
}

/// Calculate the performance index.
pub fn calculate(input: &AshbyInput) -> CalcResult<AshbyResult> {
    input.validate()?;

    let objective = input.objective;
    let (property, value, symbol) = if objective.is_stiffness() {
        ("E", input.youngs_modulus_gpa, "E")
    } else {
        ("sigma_f", input.strength_mpa, r"\sigma_f")
    };
    let rho = input.density_kg_m3 / 1000.0;
    let index = index_for(input, objective);

    log::debug!("{} index for '{}' = {}", objective, input.label, index);

    Ok(AshbyResult {
        objective,
        property: property.to_string(),
        property_value: value,
        exponent: objective.exponent(),
        density_mg_m3: rho,
        index,
        all_indices: Objective::ALL.iter().map(|&o| (o, index_for(input, o))).collect(),
        subst_index: substitute(
            &format!("M_{{{}}}", symbol),
            objective.latex(),
            &format!(
                r"\frac{{{}^{{{}}}}}{{{}}}",
                fmt_num(value),
                objective.exponent_latex(),
                fmt_num(rho)
            ),
            index,
            "",
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steel(objective: Objective) -> AshbyInput {
        AshbyInput {
            label: "Steel".to_string(),
            youngs_modulus_gpa: 200.0,
            strength_mpa: 250.0,
            density_kg_m3: 8000.0,
            objective,
        }
    }

    #[test]
    fn test_tie_stiffness() {
        let result = calculate(&steel(Objective::TieStiffness)).unwrap();
        assert!((result.index - 25.0).abs() < 1e-12);
        assert_eq!(result.property, "E");
    }

    #[test]
    fn test_beam_strength_exponent() {
        let result = calculate(&steel(Objective::BeamStrength)).unwrap();
        let expected = 250f64.powf(2.0 / 3.0) / 8.0;
        assert!((result.index - expected).abs() < 1e-12);
        assert_eq!(result.property, "sigma_f");
    }

    #[test]
    fn test_panel_stiffness_favours_light_material() {
        let aluminium = AshbyInput {
            label: "Al".to_string(),
            youngs_modulus_gpa: 70.0,
            strength_mpa: 270.0,
            density_kg_m3: 2700.0,
            objective: Objective::PanelStiffness,
        };
        let al = calculate(&aluminium).unwrap().index;
        let st = calculate(&steel(Objective::PanelStiffness)).unwrap().index;
        assert!(al > st);
    }

    #[test]
    fn test_all_indices_listed() {
        let result = calculate(&steel(Objective::TieStrength)).unwrap();
        assert_eq!(result.all_indices.len(), 6);
        let tie = result
            .all_indices
            .iter()
            .find(|(o, _)| *o == Objective::TieStrength)
            .map(|(_, v)| *v)
            .unwrap();
        assert_eq!(tie, result.index);
    }

    #[test]
    fn test_objective_parsing() {
        assert_eq!("PANEL_STRENGTH".parse::<Objective>().unwrap(), Objective::PanelStrength);
        let err = "shell_buckling".parse::<Objective>().unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_OPTION");
    }

    #[test]
    fn test_rejects_zero_density() {
        let mut input = steel(Objective::TieStiffness);
        input.density_kg_m3 = 0.0;
        assert!(calculate(&input).is_err());
    }
}
