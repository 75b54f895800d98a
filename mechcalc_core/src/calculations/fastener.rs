//! # Bolt Tightening Torque
//!
//! Preload and tightening torque for an ISO metric bolt using the short-form
//! nut factor relation `T = K F d`.
//!
//! Typical nut factors: 0.2 for dry steel, 0.15 to 0.18 lubricated,
//! 0.12 with anti-seize or MoS2 paste.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::errors::{require_positive, CalcError, CalcResult};
use crate::subst::{fmt_num, substitute};

/// Input parameters for a bolt torque calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "M10 flange bolt",
///   "nominal_diameter_mm": 10.0,
///   "pitch_mm": 1.5,
///   "proof_strength_mpa": 600.0,
///   "percent_proof": 75.0,
///   "nut_factor": 0.2
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FastenerInput {
    pub label: String,

    /// Nominal major diameter d (mm)
    pub nominal_diameter_mm: f64,

    /// Thread pitch P (mm)
    pub pitch_mm: f64,

    /// Proof strength S_p of the property class (MPa), e.g. 600 for 8.8
    pub proof_strength_mpa: f64,

    /// Target preload as a percentage of proof load, (0, 100]
    pub percent_proof: f64,

    /// Nut factor K, (0, 1]
    pub nut_factor: f64,
}

impl FastenerInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("nominal_diameter_mm", self.nominal_diameter_mm)?;
        require_positive("pitch_mm", self.pitch_mm)?;
        if self.pitch_mm >= self.nominal_diameter_mm {
            return Err(CalcError::invalid_input(
                "pitch_mm",
                self.pitch_mm.to_string(),
                "must be smaller than the nominal diameter",
            ));
        }
        require_positive("proof_strength_mpa", self.proof_strength_mpa)?;
        if !self.percent_proof.is_finite() || self.percent_proof <= 0.0 || self.percent_proof > 100.0 {
            return Err(CalcError::invalid_input(
                "percent_proof",
                self.percent_proof.to_string(),
                "must be in (0, 100]",
            ));
        }
        if !self.nut_factor.is_finite() || self.nut_factor <= 0.0 || self.nut_factor > 1.0 {
            return Err(CalcError::invalid_input(
                "nut_factor",
                self.nut_factor.to_string(),
                "must be in (0, 1]",
            ));
        }
        Ok(())
    }

    /// Tensile stress area A_t = π/4 (d - 0.9382P)² (mm²)
    pub fn tensile_stress_area_mm2(&self) -> f64 {
        PI / 4.0 * (self.nominal_diameter_mm - 0.9382 * self.pitch_mm).powi(2)
    }
}

/// Results from a bolt torque calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FastenerResult {
    /// Tensile stress area A_t (mm²)
    pub tensile_stress_area_mm2: f64,
    /// Proof load S_p·A_t (N)
    pub proof_load_n: f64,
    /// Target preload F_i (N)
    pub preload_n: f64,
    /// Tensile stress at preload (MPa)
    pub preload_stress_mpa: f64,
    /// Tightening torque (N·m)
    pub torque_nm: f64,
    pub subst_area: String,
    pub subst_preload: String,
    pub subst_torque: String,
}

/// Calculate preload and tightening torque.
pub fn calculate(input: &FastenerInput) -> CalcResult<FastenerResult> {
    input.validate()?;

    let d = input.nominal_diameter_mm;
    let p = input.pitch_mm;
    let area = input.tensile_stress_area_mm2();
    let proof_load = input.proof_strength_mpa * area;
    let preload = input.percent_proof / 100.0 * proof_load;
    // d in mm gives N·mm
    let torque = input.nut_factor * preload * d / 1000.0;

    Ok(FastenerResult {
        tensile_stress_area_mm2: area,
        proof_load_n: proof_load,
        preload_n: preload,
        preload_stress_mpa: preload / area,
        torque_nm: torque,
        subst_area: substitute(
            "A_t",
            r"\frac{\pi}{4}(d - 0.9382 P)^2",
            &format!(r"\frac{{\pi}}{{4}}({} - 0.9382 \cdot {})^2", fmt_num(d), fmt_num(p)),
            area,
            "mm^2",
        ),
        subst_preload: substitute(
            "F_i",
            r"\frac{p}{100} S_p A_t",
            &format!(
                r"\frac{{{}}}{{100}} \cdot {} \cdot {}",
                fmt_num(input.percent_proof),
                fmt_num(input.proof_strength_mpa),
                fmt_num(area)
            ),
            preload,
            "N",
        ),
        subst_torque: substitute(
            "T",
            r"K F_i d",
            &format!(
                r"{} \cdot {} \cdot {}\,\text{{mm}}",
                fmt_num(input.nut_factor),
                fmt_num(preload),
                fmt_num(d)
            ),
            torque,
            "N m",
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m10() -> FastenerInput {
        FastenerInput {
            label: "M10".to_string(),
            nominal_diameter_mm: 10.0,
            pitch_mm: 1.5,
            proof_strength_mpa: 600.0,
            percent_proof: 75.0,
            nut_factor: 0.2,
        }
    }

    #[test]
    fn test_m10_tensile_area() {
        let result = calculate(&m10()).unwrap();
        // Tabulated A_t for M10x1.5 is 58.0 mm²
        assert!((result.tensile_stress_area_mm2 - 58.0).abs() < 0.05);
    }

    #[test]
    fn test_preload_and_torque() {
        let result = calculate(&m10()).unwrap();
        let area = result.tensile_stress_area_mm2;
        assert!((result.preload_n - 450.0 * area).abs() < 1e-9);
        assert!((result.torque_nm - 0.2 * 450.0 * area * 0.01).abs() < 1e-9);
        assert!((result.preload_stress_mpa - 450.0).abs() < 1e-9);
        // About 52 N·m for a dry M10 8.8 bolt
        assert!((result.torque_nm - 52.2).abs() < 0.2);
    }

    #[test]
    fn test_torque_scales_with_nut_factor() {
        let mut input = m10();
        let dry = calculate(&input).unwrap().torque_nm;
        input.nut_factor = 0.1;
        let lubed = calculate(&input).unwrap().torque_nm;
        assert!((dry / lubed - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_validation() {
        let mut input = m10();
        input.pitch_mm = 12.0;
        assert!(calculate(&input).is_err());
        let mut input = m10();
        input.percent_proof = 120.0;
        assert!(calculate(&input).is_err());
        let mut input = m10();
        input.nut_factor = 0.0;
        assert!(calculate(&input).is_err());
    }
}
