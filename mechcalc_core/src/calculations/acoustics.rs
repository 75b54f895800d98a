//! # Flow Acoustics
//!
//! Aeolian tones from vortex shedding behind a cylinder and incoherent
//! summation of sound pressure levels.
//!
//! Both calculators take delimited number lists (e.g. `"0.2, 0.21"`) as
//! text, matching how they are entered in a form. Errors from these
//! calculators are reported as an `{"error": "..."}` result by
//! [`CalculationItem::evaluate`](super::CalculationItem::evaluate) rather
//! than propagated.

use serde::{Deserialize, Serialize};

use crate::errors::{require_positive, CalcError, CalcResult};
use crate::subst::{fmt_num, substitute};

fn default_strouhal() -> String {
    "0.2".to_string()
}

/// Kinematic viscosity of air at 20 °C (m²/s)
fn default_air_viscosity() -> f64 {
    1.516e-5
}

/// Speed of sound in air at 20 °C (m/s)
fn default_sound_speed() -> f64 {
    343.0
}

/// Parse a comma or whitespace separated list of finite numbers.
pub fn parse_number_list(field: &str, text: &str) -> CalcResult<Vec<f64>> {
    let values = text
        .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| CalcError::invalid_input(field, s, "not a number"))
        })
        .collect::<CalcResult<Vec<f64>>>()?;
    if values.is_empty() {
        return Err(CalcError::invalid_input(field, text, "expected at least one value"));
    }
    Ok(values)
}

// ============================================================================
// Vortex Shedding
// ============================================================================

/// Input parameters for vortex shedding tones.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Antenna mast",
///   "flow_velocity_m_s": 15.0,
///   "diameter_m": 0.05,
///   "strouhal_numbers": "0.2, 0.21"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VortexSheddingInput {
    pub label: String,
    /// Free-stream velocity U (m/s)
    pub flow_velocity_m_s: f64,
    /// Cylinder diameter D (m)
    pub diameter_m: f64,
    /// Strouhal numbers to evaluate, comma separated
    #[serde(default = "default_strouhal")]
    pub strouhal_numbers: String,
    /// Kinematic viscosity ν (m²/s)
    #[serde(default = "default_air_viscosity")]
    pub kinematic_viscosity_m2_s: f64,
    /// Speed of sound c (m/s)
    #[serde(default = "default_sound_speed")]
    pub sound_speed_m_s: f64,
}

impl VortexSheddingInput {
    /// Validate and parse the Strouhal list.
    pub fn validate(&self) -> CalcResult<Vec<f64>> {
        require_positive("flow_velocity_m_s", self.flow_velocity_m_s)?;
        require_positive("diameter_m", self.diameter_m)?;
        require_positive("kinematic_viscosity_m2_s", self.kinematic_viscosity_m2_s)?;
        require_positive("sound_speed_m_s", self.sound_speed_m_s)?;
        let strouhal = parse_number_list("strouhal_numbers", &self.strouhal_numbers)?;
        for st in &strouhal {
            require_positive("strouhal_numbers", *st)?;
        }
        Ok(strouhal)
    }
}

/// Tone at one Strouhal number
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SheddingTone {
    pub strouhal: f64,
    pub frequency_hz: f64,
    pub wavelength_m: f64,
}

/// Results for vortex shedding tones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VortexSheddingResult {
    /// Re = U D / ν
    pub reynolds_number: f64,
    pub tones: Vec<SheddingTone>,
    pub subst_reynolds: String,
    /// Substitution for the first Strouhal number
    pub subst_frequency: String,
}

/// Calculate shedding frequencies.
pub fn vortex_shedding(input: &VortexSheddingInput) -> CalcResult<VortexSheddingResult> {
    let strouhal = input.validate()?;
    let u = input.flow_velocity_m_s;
    let d = input.diameter_m;
    let reynolds = u * d / input.kinematic_viscosity_m2_s;

    let tones: Vec<SheddingTone> = strouhal
        .iter()
        .map(|&st| {
            let f = st * u / d;
            SheddingTone {
                strouhal: st,
                frequency_hz: f,
                wavelength_m: input.sound_speed_m_s / f,
            }
        })
        .collect();

    let first = tones[0];
    Ok(VortexSheddingResult {
        reynolds_number: reynolds,
        subst_reynolds: substitute(
            "Re",
            r"\frac{U D}{\nu}",
            &format!(
                r"\frac{{{} \cdot {}}}{{{}}}",
                fmt_num(u),
                fmt_num(d),
                fmt_num(input.kinematic_viscosity_m2_s)
            ),
            reynolds,
            "",
        ),
        subst_frequency: substitute(
            "f",
            r"\frac{St\,U}{D}",
            &format!(
                r"\frac{{{} \cdot {}}}{{{}}}",
                fmt_num(first.strouhal),
                fmt_num(u),
                fmt_num(d)
            ),
            first.frequency_hz,
            "Hz",
        ),
        tones,
    })
}

// ============================================================================
// Level Summation
// ============================================================================

/// Input parameters for summing sound levels.
///
/// ## JSON Example
///
/// ```json
/// { "label": "Plant room", "levels_db": "85, 82, 79" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplSumInput {
    pub label: String,
    /// Source levels (dB), comma separated
    pub levels_db: String,
}

/// Results for a level summation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplSumResult {
    pub levels_db: Vec<f64>,
    /// L = 10 log10 Σ 10^(L_i/10)
    pub total_db: f64,
    /// Total minus the loudest source (dB)
    pub increase_over_loudest_db: f64,
    pub subst_total: String,
}

/// Sum uncorrelated sound levels.
pub fn spl_sum(input: &SplSumInput) -> CalcResult<SplSumResult> {
    let levels = parse_number_list("levels_db", &input.levels_db)?;
    let total = 10.0 * levels.iter().map(|l| 10f64.powf(l / 10.0)).sum::<f64>().log10();
    let loudest = levels.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let terms: Vec<String> = levels
        .iter()
        .map(|l| format!("10^{{{}/10}}", fmt_num(*l)))
        .collect();
    let subst_total = substitute(
        "L",
        r"10\log_{10}\sum_i 10^{L_i/10}",
        &format!(r"10\log_{{10}}({})", terms.join(" + ")),
        total,
        "dB",
    );

    Ok(SplSumResult {
        levels_db: levels,
        total_db: total,
        increase_over_loudest_db: total - loudest,
        subst_total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_list() {
        assert_eq!(parse_number_list("x", "0.2, 0.21;0.22  0.3").unwrap(), vec![0.2, 0.21, 0.22, 0.3]);
        assert!(parse_number_list("x", " , ").is_err());
        assert!(parse_number_list("x", "0.2, abc").is_err());
        assert!(parse_number_list("x", "inf").is_err());
    }

    #[test]
    fn test_vortex_shedding_frequency() {
        let input = VortexSheddingInput {
            label: "Test".to_string(),
            flow_velocity_m_s: 10.0,
            diameter_m: 0.02,
            strouhal_numbers: "0.2, 0.25".to_string(),
            kinematic_viscosity_m2_s: 1.5e-5,
            sound_speed_m_s: 343.0,
        };
        let result = vortex_shedding(&input).unwrap();
        assert_eq!(result.tones.len(), 2);
        assert!((result.tones[0].frequency_hz - 100.0).abs() < 1e-9);
        assert!((result.tones[1].frequency_hz - 125.0).abs() < 1e-9);
        assert!((result.tones[0].wavelength_m - 3.43).abs() < 1e-9);
        assert!((result.reynolds_number - 13_333.333).abs() < 1e-2);
    }

    #[test]
    fn test_vortex_defaults_from_json() {
        let input: VortexSheddingInput =
            serde_json::from_str(r#"{"label":"J","flow_velocity_m_s":5,"diameter_m":0.1}"#).unwrap();
        assert_eq!(input.strouhal_numbers, "0.2");
        assert_eq!(input.sound_speed_m_s, 343.0);
        assert!((vortex_shedding(&input).unwrap().tones[0].frequency_hz - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_strouhal_rejected() {
        let input = VortexSheddingInput {
            label: "Test".to_string(),
            flow_velocity_m_s: 10.0,
            diameter_m: 0.02,
            strouhal_numbers: "0.2, -0.1".to_string(),
            kinematic_viscosity_m2_s: 1.5e-5,
            sound_speed_m_s: 343.0,
        };
        assert!(vortex_shedding(&input).is_err());
    }

    #[test]
    fn test_two_equal_sources_add_three_db() {
        let result = spl_sum(&SplSumInput {
            label: "Test".to_string(),
            levels_db: "80, 80".to_string(),
        })
        .unwrap();
        assert!((result.total_db - 83.0103).abs() < 1e-4);
        assert!((result.increase_over_loudest_db - 3.0103).abs() < 1e-4);
    }

    #[test]
    fn test_single_source_unchanged() {
        let result = spl_sum(&SplSumInput {
            label: "Test".to_string(),
            levels_db: "72.5".to_string(),
        })
        .unwrap();
        assert!((result.total_db - 72.5).abs() < 1e-12);
    }
}
