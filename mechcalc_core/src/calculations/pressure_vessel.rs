//! # Pressure Vessel Shell Thickness
//!
//! Required shell thickness under internal pressure per ASME BPVC
//! Section VIII Division 1, UG-27.
//!
//! ## Formulas
//!
//! | Shell | Thickness | Validity |
//! |-------|-----------|----------|
//! | Cylinder, circumferential stress | t = PR/(SE - 0.6P) | P ≤ 0.385SE |
//! | Cylinder, longitudinal stress | t = PR/(2SE + 0.4P) | P ≤ 1.25SE |
//! | Sphere | t = PR/(2SE - 0.2P) | P ≤ 0.665SE |
//!
//! R is the inside radius in the corroded condition (D/2 + CA).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::parse_option;
use crate::errors::{require_fraction, require_non_negative, require_positive, CalcError, CalcResult};
use crate::subst::{fmt_num, substitute};

/// Shell geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShellShape {
    #[default]
    Cylinder,
    Sphere,
}

impl ShellShape {
    pub const ALL: [ShellShape; 2] = [ShellShape::Cylinder, ShellShape::Sphere];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShellShape::Cylinder => "cylinder",
            ShellShape::Sphere => "sphere",
        }
    }

    /// Largest P/(SE) for which the thin-shell formula applies
    pub fn pressure_limit_ratio(&self) -> f64 {
        match self {
            ShellShape::Cylinder => 0.385,
            ShellShape::Sphere => 0.665,
        }
    }
}

impl fmt::Display for ShellShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShellShape {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_option("shape", s, &Self::ALL, Self::as_str)
    }
}

/// Input parameters for a pressure vessel shell.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Air receiver",
///   "shape": "cylinder",
///   "pressure_mpa": 1.2,
///   "inside_diameter_mm": 600.0,
///   "allowable_stress_mpa": 138.0,
///   "joint_efficiency": 0.85,
///   "corrosion_allowance_mm": 1.5,
///   "nominal_thickness_mm": 6.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PressureVesselInput {
    pub label: String,

    #[serde(default)]
    pub shape: ShellShape,

    /// Internal design pressure P (MPa)
    pub pressure_mpa: f64,

    /// Inside diameter, uncorroded (mm)
    pub inside_diameter_mm: f64,

    /// Maximum allowable stress S at design temperature (MPa)
    pub allowable_stress_mpa: f64,

    /// Weld joint efficiency E, (0, 1]
    pub joint_efficiency: f64,

    /// Corrosion allowance CA (mm)
    #[serde(default)]
    pub corrosion_allowance_mm: f64,

    /// Nominal plate thickness for the MAWP check (mm)
    #[serde(default)]
    pub nominal_thickness_mm: Option<f64>,
}

impl PressureVesselInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("pressure_mpa", self.pressure_mpa)?;
        require_positive("inside_diameter_mm", self.inside_diameter_mm)?;
        require_positive("allowable_stress_mpa", self.allowable_stress_mpa)?;
        require_fraction("joint_efficiency", self.joint_efficiency)?;
        require_non_negative("corrosion_allowance_mm", self.corrosion_allowance_mm)?;
        if let Some(t) = self.nominal_thickness_mm {
            require_positive("nominal_thickness_mm", t)?;
            if t <= self.corrosion_allowance_mm {
                return Err(CalcError::inconsistent(
                    "nominal_thickness_mm, corrosion_allowance_mm",
                    "nominal thickness must exceed the corrosion allowance",
                ));
            }
        }
        Ok(())
    }

    /// Inside radius in the corroded condition (mm)
    pub fn corroded_radius_mm(&self) -> f64 {
        self.inside_diameter_mm / 2.0 + self.corrosion_allowance_mm
    }
}

/// Results from a pressure vessel shell check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PressureVesselResult {
    /// Corroded inside radius R (mm)
    pub corroded_radius_mm: f64,

    /// Cylinder: thickness for circumferential stress (mm)
    pub circumferential_thickness_mm: Option<f64>,

    /// Cylinder: thickness for longitudinal stress (mm)
    pub longitudinal_thickness_mm: Option<f64>,

    /// Governing pressure thickness, before corrosion allowance (mm)
    pub pressure_thickness_mm: f64,

    /// Pressure thickness plus corrosion allowance (mm)
    pub required_thickness_mm: f64,

    /// Membrane stress in the shell at the pressure thickness (MPa)
    pub hoop_stress_mpa: f64,

    /// Thin-shell geometry limit satisfied (t ≤ R/2 cylinder, t ≤ 0.356R sphere)
    pub thin_shell_valid: bool,

    /// Maximum allowable working pressure at the nominal thickness (MPa)
    pub mawp_mpa: Option<f64>,

    /// Design pressure / MAWP
    pub utilization: Option<f64>,

    /// Nominal thickness covers the required thickness
    pub adequate: Option<bool>,

    pub subst_thickness: String,
    pub subst_mawp: Option<String>,
}

/// Calculate required shell thickness.
///
/// # Errors
///
/// * `InvalidInput` for out-of-range parameters
/// * `Infeasible` when the pressure exceeds the thin-shell validity limit
pub fn calculate(input: &PressureVesselInput) -> CalcResult<PressureVesselResult> {
    input.validate()?;

    let p = input.pressure_mpa;
    let s = input.allowable_stress_mpa;
    let e = input.joint_efficiency;
    let r = input.corroded_radius_mm();
    let se = s * e;

    let limit = input.shape.pressure_limit_ratio() * se;
    if p > limit {
        return Err(CalcError::infeasible(
            "pressure_vessel",
            format!(
                "pressure {} MPa exceeds {} SE = {:.3} MPa for a {}; thick-shell rules apply",
                p,
                input.shape.pressure_limit_ratio(),
                limit,
                input.shape
            ),
        ));
    }

    let (circumferential, longitudinal, t, hoop, thin_valid, subst_thickness) = match input.shape {
        ShellShape::Cylinder => {
            let t_c = p * r / (se - 0.6 * p);
            let t_l = p * r / (2.0 * se + 0.4 * p);
            let subst = substitute(
                "t",
                r"\frac{P R}{S E - 0.6 P}",
                &format!(
                    r"\frac{{{} \cdot {}}}{{{} \cdot {} - 0.6 \cdot {}}}",
                    fmt_num(p),
                    fmt_num(r),
                    fmt_num(s),
                    fmt_num(e),
                    fmt_num(p)
                ),
                t_c,
                "mm",
            );
            let t = t_c.max(t_l);
            let hoop = p * (r + 0.6 * t) / t;
            (Some(t_c), Some(t_l), t, hoop, t <= r / 2.0, subst)
        }
        ShellShape::Sphere => {
            let t = p * r / (2.0 * se - 0.2 * p);
            let subst = substitute(
                "t",
                r"\frac{P R}{2 S E - 0.2 P}",
                &format!(
                    r"\frac{{{} \cdot {}}}{{2 \cdot {} \cdot {} - 0.2 \cdot {}}}",
                    fmt_num(p),
                    fmt_num(r),
                    fmt_num(s),
                    fmt_num(e),
                    fmt_num(p)
                ),
                t,
                "mm",
            );
            let hoop = p * (r + 0.2 * t) / (2.0 * t);
            (None, None, t, hoop, t <= 0.356 * r, subst)
        }
    };

    let required = t + input.corrosion_allowance_mm;

    let (mawp, utilization, adequate, subst_mawp) = match input.nominal_thickness_mm {
        Some(t_nom) => {
            let t_net = t_nom - input.corrosion_allowance_mm;
            let (mawp, subst) = match input.shape {
                ShellShape::Cylinder => {
                    let circ = se * t_net / (r + 0.6 * t_net);
                    let long = 2.0 * se * t_net / (r - 0.4 * t_net);
                    let mawp = if long > 0.0 { circ.min(long) } else { circ };
                    let subst = substitute(
                        "MAWP",
                        r"\frac{S E t}{R + 0.6 t}",
                        &format!(
                            r"\frac{{{} \cdot {}}}{{{} + 0.6 \cdot {}}}",
                            fmt_num(se),
                            fmt_num(t_net),
                            fmt_num(r),
                            fmt_num(t_net)
                        ),
                        mawp,
                        "MPa",
                    );
                    (mawp, subst)
                }
                ShellShape::Sphere => {
                    let mawp = 2.0 * se * t_net / (r + 0.2 * t_net);
                    let subst = substitute(
                        "MAWP",
                        r"\frac{2 S E t}{R + 0.2 t}",
                        &format!(
                            r"\frac{{2 \cdot {} \cdot {}}}{{{} + 0.2 \cdot {}}}",
                            fmt_num(se),
                            fmt_num(t_net),
                            fmt_num(r),
                            fmt_num(t_net)
                        ),
                        mawp,
                        "MPa",
                    );
                    (mawp, subst)
                }
            };
            (Some(mawp), Some(p / mawp), Some(t_nom >= required), Some(subst))
        }
        None => (None, None, None, None),
    };

    Ok(PressureVesselResult {
        corroded_radius_mm: r,
        circumferential_thickness_mm: circumferential,
        longitudinal_thickness_mm: longitudinal,
        pressure_thickness_mm: t,
        required_thickness_mm: required,
        hoop_stress_mpa: hoop,
        thin_shell_valid: thin_valid,
        mawp_mpa: mawp,
        utilization,
        adequate,
        subst_thickness,
        subst_mawp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() / b.abs().max(1e-12) < 1e-9
    }

    fn test_input() -> PressureVesselInput {
        PressureVesselInput {
            label: "Test".to_string(),
            shape: ShellShape::Cylinder,
            pressure_mpa: 1.0,
            inside_diameter_mm: 1000.0,
            allowable_stress_mpa: 100.0,
            joint_efficiency: 1.0,
            corrosion_allowance_mm: 0.0,
            nominal_thickness_mm: None,
        }
    }

    #[test]
    fn test_cylinder_thickness() {
        let result = calculate(&test_input()).unwrap();
        // 1 × 500 / (100 - 0.6)
        assert!(approx_eq(result.required_thickness_mm, 500.0 / 99.4));
        assert!(result.circumferential_thickness_mm > result.longitudinal_thickness_mm);
        assert!(result.thin_shell_valid);
    }

    #[test]
    fn test_sphere_thinner_than_cylinder() {
        let cylinder = calculate(&test_input()).unwrap();
        let mut input = test_input();
        input.shape = ShellShape::Sphere;
        let sphere = calculate(&input).unwrap();
        assert!(approx_eq(sphere.required_thickness_mm, 500.0 / 199.8));
        assert!(sphere.required_thickness_mm < cylinder.required_thickness_mm);
        assert_eq!(sphere.longitudinal_thickness_mm, None);
    }

    #[test]
    fn test_thickness_increases_with_pressure() {
        let mut input = test_input();
        let mut previous = 0.0;
        for p in [0.5, 1.0, 2.0, 5.0, 10.0, 20.0, 38.0] {
            input.pressure_mpa = p;
            let t = calculate(&input).unwrap().required_thickness_mm;
            assert!(t > previous, "t({}) = {} not above {}", p, t, previous);
            previous = t;
        }
    }

    #[test]
    fn test_thickness_decreases_with_allowable_stress() {
        let mut input = test_input();
        let mut previous = f64::INFINITY;
        for s in [50.0, 80.0, 120.0, 200.0, 400.0] {
            input.allowable_stress_mpa = s;
            let t = calculate(&input).unwrap().required_thickness_mm;
            assert!(t < previous);
            previous = t;
        }
    }

    #[test]
    fn test_corrosion_allowance_added() {
        let mut input = test_input();
        input.corrosion_allowance_mm = 3.0;
        let result = calculate(&input).unwrap();
        assert_eq!(result.corroded_radius_mm, 503.0);
        assert!(approx_eq(result.required_thickness_mm, 503.0 / 99.4 + 3.0));
    }

    #[test]
    fn test_pressure_above_limit_is_infeasible() {
        let mut input = test_input();
        input.pressure_mpa = 40.0;
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INFEASIBLE");
        input.shape = ShellShape::Sphere;
        assert!(calculate(&input).is_ok());
    }

    #[test]
    fn test_mawp_at_required_thickness_equals_design_pressure() {
        let mut input = test_input();
        input.corrosion_allowance_mm = 2.0;
        let required = calculate(&input).unwrap().required_thickness_mm;
        input.nominal_thickness_mm = Some(required);
        let result = calculate(&input).unwrap();
        assert!(approx_eq(result.mawp_mpa.unwrap(), 1.0));
        assert!(approx_eq(result.utilization.unwrap(), 1.0));
        assert!(result.subst_mawp.is_some());
    }

    #[test]
    fn test_thin_nominal_plate_is_inadequate() {
        let mut input = test_input();
        input.nominal_thickness_mm = Some(4.0);
        let result = calculate(&input).unwrap();
        assert_eq!(result.adequate, Some(false));
        assert!(result.utilization.unwrap() > 1.0);
    }

    #[test]
    fn test_joint_efficiency_range() {
        let mut input = test_input();
        input.joint_efficiency = 1.2;
        assert!(calculate(&input).is_err());
        input.joint_efficiency = 0.0;
        assert!(calculate(&input).is_err());
    }
}
