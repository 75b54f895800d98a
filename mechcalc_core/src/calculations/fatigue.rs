//! # Stress-Life Fatigue Calculation
//!
//! Estimates high-cycle fatigue life of a member under constant-amplitude
//! cyclic stress. The cycle is reduced to an equivalent fully-reversed stress
//! with a mean-stress correction, then the Basquin relation is inverted for
//! cycles to failure.
//!
//! ## Assumptions
//!
//! - Uniaxial, constant-amplitude loading
//! - Stresses already include notch and surface effects
//! - Infinite life at or below a finite endurance limit (steels)
//! - Uncertainty bounds scale both peak and valley stress by ±u%
//!
//! ## Example
//!
//! ```rust
//! use mechcalc_core::calculations::fatigue::{calculate, FatigueInput, MeanStressCorrection};
//!
//! let input = FatigueInput {
//!     label: "Shaft shoulder".to_string(),
//!     max_stress_mpa: 250.0,
//!     min_stress_mpa: -50.0,
//!     ultimate_strength_mpa: 600.0,
//!     yield_strength_mpa: 450.0,
//!     fatigue_strength_coefficient_mpa: 900.0,
//!     fatigue_strength_exponent: -0.09,
//!     endurance_limit_mpa: None,
//!     mean_stress_correction: MeanStressCorrection::Goodman,
//!     design_life_cycles: 1.0e6,
//!     stress_uncertainty_pct: Some(10.0),
//! };
//!
//! let result = calculate(&input).unwrap();
//! println!("Life: {:.3e} cycles", result.cycles_to_failure);
//! println!("Safety factor: {:.2}", result.safety_factor);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::parse_option;
use crate::equations::fatigue::{
    alternating_stress, basquin_reversals, basquin_strength, gerber_denominator,
    gerber_equivalent, goodman_equivalent, linear_correction_denominator, mean_stress,
    soderberg_equivalent, stress_ratio,
};
use crate::errors::{require_positive, CalcError, CalcResult};
use crate::subst::{fmt_num, substitute};

/// Cycles at the ends of the S-N curve samples
const SN_CURVE_MIN_CYCLES: f64 = 1.0e3;
const SN_CURVE_MAX_CYCLES: f64 = 1.0e8;
/// Samples per decade on the S-N curve
const SN_POINTS_PER_DECADE: u32 = 5;

fn default_design_life() -> f64 {
    1.0e6
}

// ============================================================================
// Mean-Stress Correction
// ============================================================================

/// Mean-stress correction method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MeanStressCorrection {
    /// Use the alternating stress directly
    None,
    /// Modified Goodman line to the ultimate strength
    #[default]
    Goodman,
    /// Soderberg line to the yield strength
    Soderberg,
    /// Gerber parabola through the ultimate strength
    Gerber,
}

impl MeanStressCorrection {
    pub const ALL: [MeanStressCorrection; 4] = [
        MeanStressCorrection::None,
        MeanStressCorrection::Goodman,
        MeanStressCorrection::Soderberg,
        MeanStressCorrection::Gerber,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MeanStressCorrection::None => "none",
            MeanStressCorrection::Goodman => "goodman",
            MeanStressCorrection::Soderberg => "soderberg",
            MeanStressCorrection::Gerber => "gerber",
        }
    }
}

impl fmt::Display for MeanStressCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeanStressCorrection {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_option("mean_stress_correction", s, &Self::ALL, Self::as_str)
    }
}

// ============================================================================
// Input
// ============================================================================

/// Input parameters for a stress-life fatigue check.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Shaft shoulder",
///   "max_stress_mpa": 250.0,
///   "min_stress_mpa": -50.0,
///   "ultimate_strength_mpa": 600.0,
///   "yield_strength_mpa": 450.0,
///   "fatigue_strength_coefficient_mpa": 900.0,
///   "fatigue_strength_exponent": -0.09,
///   "mean_stress_correction": "goodman"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FatigueInput {
    /// User label for this check (e.g., "Shaft shoulder")
    pub label: String,

    /// Peak stress of the cycle (MPa)
    pub max_stress_mpa: f64,

    /// Valley stress of the cycle (MPa), negative for compression
    pub min_stress_mpa: f64,

    /// Ultimate tensile strength S_u (MPa)
    pub ultimate_strength_mpa: f64,

    /// Yield strength S_y (MPa)
    pub yield_strength_mpa: f64,

    /// Fatigue strength coefficient σ_f' (MPa)
    pub fatigue_strength_coefficient_mpa: f64,

    /// Basquin exponent b (negative)
    pub fatigue_strength_exponent: f64,

    /// Endurance limit S_e (MPa); `None` for materials without a knee
    #[serde(default)]
    pub endurance_limit_mpa: Option<f64>,

    /// Mean-stress correction method
    #[serde(default)]
    pub mean_stress_correction: MeanStressCorrection,

    /// Design life used for the safety factor (cycles)
    #[serde(default = "default_design_life")]
    pub design_life_cycles: f64,

    /// Stress uncertainty for conservative/optimistic bounds (%)
    #[serde(default)]
    pub stress_uncertainty_pct: Option<f64>,
}

impl FatigueInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.max_stress_mpa.is_finite() {
            return Err(CalcError::invalid_input(
                "max_stress_mpa",
                self.max_stress_mpa.to_string(),
                "must be finite",
            ));
        }
        if !self.min_stress_mpa.is_finite() {
            return Err(CalcError::invalid_input(
                "min_stress_mpa",
                self.min_stress_mpa.to_string(),
                "must be finite",
            ));
        }
        if self.max_stress_mpa < self.min_stress_mpa {
            return Err(CalcError::invalid_input(
                "max_stress_mpa",
                self.max_stress_mpa.to_string(),
                "must be greater than or equal to min_stress_mpa",
            ));
        }
        require_positive("ultimate_strength_mpa", self.ultimate_strength_mpa)?;
        require_positive("yield_strength_mpa", self.yield_strength_mpa)?;
        if self.yield_strength_mpa > self.ultimate_strength_mpa {
            return Err(CalcError::invalid_input(
                "yield_strength_mpa",
                self.yield_strength_mpa.to_string(),
                "must not exceed ultimate_strength_mpa",
            ));
        }
        require_positive(
            "fatigue_strength_coefficient_mpa",
            self.fatigue_strength_coefficient_mpa,
        )?;
        if !self.fatigue_strength_exponent.is_finite() || self.fatigue_strength_exponent >= 0.0 {
            return Err(CalcError::invalid_input(
                "fatigue_strength_exponent",
                self.fatigue_strength_exponent.to_string(),
                "must be negative for stress-life usage",
            ));
        }
        if let Some(se) = self.endurance_limit_mpa {
            require_positive("endurance_limit_mpa", se)?;
        }
        if !self.design_life_cycles.is_finite() || self.design_life_cycles < 1.0 {
            return Err(CalcError::invalid_input(
                "design_life_cycles",
                self.design_life_cycles.to_string(),
                "must be at least 1 cycle",
            ));
        }
        if let Some(u) = self.stress_uncertainty_pct {
            if !u.is_finite() || !(0.0..100.0).contains(&u) {
                return Err(CalcError::invalid_input(
                    "stress_uncertainty_pct",
                    u.to_string(),
                    "must be in [0, 100)",
                ));
            }
        }
        Ok(())
    }

    /// Fully-reversed fatigue strength at `cycles`, floored at the endurance limit
    pub fn fatigue_strength_at(&self, cycles: f64) -> f64 {
        let basquin = basquin_strength(
            self.fatigue_strength_coefficient_mpa,
            self.fatigue_strength_exponent,
            2.0 * cycles,
        );
        match self.endurance_limit_mpa {
            Some(se) => basquin.max(se),
            None => basquin,
        }
    }
}

// ============================================================================
// Result
// ============================================================================

/// One point of the S-N curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnPoint {
    pub cycles: f64,
    pub stress_mpa: f64,
}

/// Life at the upper and lower stress bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FatigueBounds {
    /// Uncertainty applied (%)
    pub uncertainty_pct: f64,
    /// Life with stresses scaled by (1 + u)
    pub conservative_cycles: f64,
    /// Life with stresses scaled by (1 - u)
    pub optimistic_cycles: f64,
    /// Safety factor with stresses scaled by (1 + u)
    pub conservative_safety_factor: f64,
}

/// Results from a stress-life fatigue check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FatigueResult {
    /// Alternating stress amplitude σ_a (MPa)
    pub alternating_stress_mpa: f64,

    /// Mean stress σ_m (MPa)
    pub mean_stress_mpa: f64,

    /// Stress range Δσ (MPa)
    pub stress_range_mpa: f64,

    /// Stress ratio R; `None` when the peak stress is zero
    pub stress_ratio: Option<f64>,

    /// Equivalent fully-reversed stress σ_ar (MPa)
    pub equivalent_stress_mpa: f64,

    /// Reversals to failure 2N (∞ for infinite life)
    pub reversals_to_failure: f64,

    /// Cycles to failure N (∞ for infinite life)
    pub cycles_to_failure: f64,

    /// True when the equivalent stress is at or below the endurance limit
    pub infinite_life: bool,

    /// Fatigue strength at the design life (MPa)
    pub fatigue_strength_at_design_life_mpa: f64,

    /// Safety factor on stress at the design life (∞ when σ_ar = 0)
    pub safety_factor: f64,

    /// Conservative/optimistic scenarios when an uncertainty is given
    pub bounds: Option<FatigueBounds>,

    /// S-N curve samples from 10³ to 10⁸ cycles
    pub sn_curve: Vec<SnPoint>,

    pub subst_alternating_stress: String,
    pub subst_mean_stress: String,
    pub subst_equivalent_stress: String,
    pub subst_cycles_to_failure: String,
    pub subst_safety_factor: String,
}

impl FatigueResult {
    /// Check if the design life is met (safety factor ≥ 1.0)
    pub fn passes(&self) -> bool {
        self.safety_factor >= 1.0
    }
}

// ============================================================================
// Calculation
// ============================================================================

/// Life evaluation at one stress scale
#[derive(Debug, Clone, Copy)]
struct LifePoint {
    alternating: f64,
    mean: f64,
    equivalent: f64,
    reversals: f64,
    infinite: bool,
}

/// Evaluate the correction and Basquin pipeline with stresses multiplied by `scale`.
fn evaluate_life(input: &FatigueInput, scale: f64) -> CalcResult<LifePoint> {
    let max = input.max_stress_mpa * scale;
    let min = input.min_stress_mpa * scale;
    let alternating = alternating_stress(max, min);
    let mean = mean_stress(max, min);

    let denominator = match input.mean_stress_correction {
        MeanStressCorrection::None => 1.0,
        MeanStressCorrection::Goodman => {
            linear_correction_denominator(mean, input.ultimate_strength_mpa)
        }
        MeanStressCorrection::Soderberg => {
            linear_correction_denominator(mean, input.yield_strength_mpa)
        }
        MeanStressCorrection::Gerber => gerber_denominator(mean, input.ultimate_strength_mpa),
    };
    if denominator <= 0.0 {
        return Err(CalcError::infeasible(
            "fatigue",
            format!(
                "mean stress {:.1} MPa exceeds the {} strength basis (correction denominator {:.3} <= 0)",
                mean, input.mean_stress_correction, denominator
            ),
        ));
    }
    let equivalent = match input.mean_stress_correction {
        MeanStressCorrection::None => alternating,
        MeanStressCorrection::Goodman => {
            goodman_equivalent(alternating, mean, input.ultimate_strength_mpa)
        }
        MeanStressCorrection::Soderberg => {
            soderberg_equivalent(alternating, mean, input.yield_strength_mpa)
        }
        MeanStressCorrection::Gerber => {
            gerber_equivalent(alternating, mean, input.ultimate_strength_mpa)
        }
    };

    let below_endurance = input
        .endurance_limit_mpa
        .map(|se| equivalent <= se)
        .unwrap_or(false);
    let reversals = if below_endurance {
        f64::INFINITY
    } else {
        basquin_reversals(
            equivalent,
            input.fatigue_strength_coefficient_mpa,
            input.fatigue_strength_exponent,
        )
    };

    Ok(LifePoint {
        alternating,
        mean,
        equivalent,
        reversals,
        infinite: reversals.is_infinite(),
    })
}

fn safety_factor(strength: f64, equivalent: f64) -> f64 {
    if equivalent == 0.0 {
        f64::INFINITY
    } else {
        strength / equivalent
    }
}

fn sn_curve(input: &FatigueInput) -> Vec<SnPoint> {
    let decades = (SN_CURVE_MAX_CYCLES / SN_CURVE_MIN_CYCLES).log10().round() as u32;
    let count = decades * SN_POINTS_PER_DECADE;
    (0..=count)
        .map(|i| {
            let exponent = SN_CURVE_MIN_CYCLES.log10() + i as f64 / SN_POINTS_PER_DECADE as f64;
            let cycles = 10f64.powf(exponent);
            SnPoint {
                cycles,
                stress_mpa: input.fatigue_strength_at(cycles),
            }
        })
        .collect()
}

/// Calculate fatigue life for a constant-amplitude stress cycle.
///
/// # Errors
///
/// * `InvalidInput` for out-of-range parameters
/// * `Infeasible` when the mean stress reaches the correction's strength basis
pub fn calculate(input: &FatigueInput) -> CalcResult<FatigueResult> {
    input.validate()?;

    let nominal = evaluate_life(input, 1.0)?;
    let cycles = nominal.reversals / 2.0;
    let strength = input.fatigue_strength_at(input.design_life_cycles);
    let sf = safety_factor(strength, nominal.equivalent);

    let bounds = match input.stress_uncertainty_pct {
        Some(u) if u > 0.0 => {
            let frac = u / 100.0;
            // Stress pushed past the strength basis fails on the first cycle
            let (conservative_cycles, conservative_sf) = match evaluate_life(input, 1.0 + frac) {
                Ok(p) => (p.reversals / 2.0, safety_factor(strength, p.equivalent)),
                Err(e) => {
                    log::warn!("fatigue '{}': conservative bound infeasible: {}", input.label, e);
                    (0.0, 0.0)
                }
            };
            let optimistic = evaluate_life(input, 1.0 - frac)?;
            Some(FatigueBounds {
                uncertainty_pct: u,
                conservative_cycles,
                optimistic_cycles: optimistic.reversals / 2.0,
                conservative_safety_factor: conservative_sf,
            })
        }
        _ => None,
    };

    let (max, min) = (input.max_stress_mpa, input.min_stress_mpa);
    let subst_alternating_stress = substitute(
        r"\sigma_a",
        r"\frac{\sigma_{max} - \sigma_{min}}{2}",
        &format!(r"\frac{{{} - ({})}}{{2}}", fmt_num(max), fmt_num(min)),
        nominal.alternating,
        "MPa",
    );
    let subst_mean_stress = substitute(
        r"\sigma_m",
        r"\frac{\sigma_{max} + \sigma_{min}}{2}",
        &format!(r"\frac{{{} + ({})}}{{2}}", fmt_num(max), fmt_num(min)),
        nominal.mean,
        "MPa",
    );
    let subst_equivalent_stress = match input.mean_stress_correction {
        MeanStressCorrection::None => substitute(
            r"\sigma_{ar}",
            r"\sigma_a",
            &fmt_num(nominal.alternating),
            nominal.equivalent,
            "MPa",
        ),
        MeanStressCorrection::Goodman => substitute(
            r"\sigma_{ar}",
            r"\frac{\sigma_a}{1 - \sigma_m / S_u}",
            &format!(
                r"\frac{{{}}}{{1 - {} / {}}}",
                fmt_num(nominal.alternating),
                fmt_num(nominal.mean),
                fmt_num(input.ultimate_strength_mpa)
            ),
            nominal.equivalent,
            "MPa",
        ),
        MeanStressCorrection::Soderberg => substitute(
            r"\sigma_{ar}",
            r"\frac{\sigma_a}{1 - \sigma_m / S_y}",
            &format!(
                r"\frac{{{}}}{{1 - {} / {}}}",
                fmt_num(nominal.alternating),
                fmt_num(nominal.mean),
                fmt_num(input.yield_strength_mpa)
            ),
            nominal.equivalent,
            "MPa",
        ),
        MeanStressCorrection::Gerber => substitute(
            r"\sigma_{ar}",
            r"\frac{\sigma_a}{1 - (\sigma_m / S_u)^2}",
            &format!(
                r"\frac{{{}}}{{1 - ({} / {})^2}}",
                fmt_num(nominal.alternating),
                fmt_num(nominal.mean),
                fmt_num(input.ultimate_strength_mpa)
            ),
            nominal.equivalent,
            "MPa",
        ),
    };
    let subst_cycles_to_failure = if nominal.infinite {
        match input.endurance_limit_mpa {
            Some(se) if nominal.equivalent > 0.0 => format!(
                r"\sigma_{{ar}} = {} \le S_e = {} \Rightarrow N_f = \infty",
                fmt_num(nominal.equivalent),
                fmt_num(se)
            ),
            _ => format!(
                r"\sigma_{{ar}} = {} \Rightarrow N_f = \infty",
                fmt_num(nominal.equivalent)
            ),
        }
    } else {
        substitute(
            "N_f",
            r"\frac{1}{2}\left(\frac{\sigma_{ar}}{\sigma_f'}\right)^{1/b}",
            &format!(
                r"\frac{{1}}{{2}}\left(\frac{{{}}}{{{}}}\right)^{{1/({})}}",
                fmt_num(nominal.equivalent),
                fmt_num(input.fatigue_strength_coefficient_mpa),
                fmt_num(input.fatigue_strength_exponent)
            ),
            cycles,
            "cycles",
        )
    };
    let subst_safety_factor = substitute(
        "n_f",
        r"\frac{S_f(N_d)}{\sigma_{ar}}",
        &format!(
            r"\frac{{{}}}{{{}}}",
            fmt_num(strength),
            fmt_num(nominal.equivalent)
        ),
        sf,
        "",
    );

    Ok(FatigueResult {
        alternating_stress_mpa: nominal.alternating,
        mean_stress_mpa: nominal.mean,
        stress_range_mpa: max - min,
        stress_ratio: stress_ratio(max, min),
        equivalent_stress_mpa: nominal.equivalent,
        reversals_to_failure: nominal.reversals,
        cycles_to_failure: cycles,
        infinite_life: nominal.infinite,
        fatigue_strength_at_design_life_mpa: strength,
        safety_factor: sf,
        bounds,
        sn_curve: sn_curve(input),
        subst_alternating_stress,
        subst_mean_stress,
        subst_equivalent_stress,
        subst_cycles_to_failure,
        subst_safety_factor,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, rel: f64) -> bool {
        (a - b).abs() <= rel * b.abs().max(1e-12)
    }

    fn test_input() -> FatigueInput {
        FatigueInput {
            label: "Test".to_string(),
            max_stress_mpa: 200.0,
            min_stress_mpa: -200.0,
            ultimate_strength_mpa: 600.0,
            yield_strength_mpa: 450.0,
            fatigue_strength_coefficient_mpa: 1000.0,
            fatigue_strength_exponent: -0.1,
            endurance_limit_mpa: None,
            mean_stress_correction: MeanStressCorrection::Goodman,
            design_life_cycles: 1.0e6,
            stress_uncertainty_pct: None,
        }
    }

    #[test]
    fn test_fully_reversed_basquin_life() {
        let result = calculate(&test_input()).unwrap();
        assert_eq!(result.mean_stress_mpa, 0.0);
        assert_eq!(result.equivalent_stress_mpa, 200.0);
        // 2N = (200/1000)^(-10) = 5^10
        assert!(approx_eq(result.reversals_to_failure, 9_765_625.0, 1e-9));
        assert!(approx_eq(result.cycles_to_failure, 4_882_812.5, 1e-9));
        assert!(!result.infinite_life);
        assert_eq!(result.stress_ratio, Some(-1.0));
    }

    #[test]
    fn test_no_correction_equals_alternating() {
        let mut input = test_input();
        input.mean_stress_correction = MeanStressCorrection::None;
        for (max, min) in [(300.0, 100.0), (250.0, -50.0), (80.0, 79.0), (0.0, -120.0)] {
            input.max_stress_mpa = max;
            input.min_stress_mpa = min;
            let result = calculate(&input).unwrap();
            assert_eq!(result.equivalent_stress_mpa, result.alternating_stress_mpa);
        }
    }

    #[test]
    fn test_goodman_increases_with_mean_stress() {
        let mut input = test_input();
        let mut previous = 0.0;
        for mean in [0.0, 100.0, 200.0, 300.0, 400.0, 500.0] {
            input.max_stress_mpa = mean + 50.0;
            input.min_stress_mpa = mean - 50.0;
            let result = calculate(&input).unwrap();
            assert!(result.equivalent_stress_mpa > previous);
            previous = result.equivalent_stress_mpa;
        }
    }

    #[test]
    fn test_goodman_rejects_mean_at_ultimate() {
        let mut input = test_input();
        input.max_stress_mpa = 650.0;
        input.min_stress_mpa = 550.0;
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "INFEASIBLE");
    }

    #[test]
    fn test_equivalent_stress_matches_registered_formulas() {
        let mut input = test_input();
        input.max_stress_mpa = 300.0;
        input.min_stress_mpa = 100.0;
        let cases: [(MeanStressCorrection, f64); 3] = [
            (MeanStressCorrection::Goodman, goodman_equivalent(100.0, 200.0, 600.0)),
            (MeanStressCorrection::Soderberg, soderberg_equivalent(100.0, 200.0, 450.0)),
            (MeanStressCorrection::Gerber, gerber_equivalent(100.0, 200.0, 600.0)),
        ];
        for (correction, expected) in cases {
            input.mean_stress_correction = correction;
            let result = calculate(&input).unwrap();
            assert_eq!(result.equivalent_stress_mpa, expected, "{}", correction);
        }
    }

    #[test]
    fn test_soderberg_uses_yield() {
        let mut input = test_input();
        input.max_stress_mpa = 325.0;
        input.min_stress_mpa = 125.0;
        input.mean_stress_correction = MeanStressCorrection::Soderberg;
        let result = calculate(&input).unwrap();
        // 100 / (1 - 225/450) = 200
        assert!(approx_eq(result.equivalent_stress_mpa, 200.0, 1e-12));
    }

    #[test]
    fn test_gerber_symmetric_for_compressive_mean() {
        let mut input = test_input();
        input.mean_stress_correction = MeanStressCorrection::Gerber;
        input.max_stress_mpa = 250.0;
        input.min_stress_mpa = 50.0;
        let tension = calculate(&input).unwrap().equivalent_stress_mpa;
        input.max_stress_mpa = -50.0;
        input.min_stress_mpa = -250.0;
        let compression = calculate(&input).unwrap().equivalent_stress_mpa;
        assert!(approx_eq(tension, compression, 1e-12));
    }

    #[test]
    fn test_infinite_life_below_endurance_limit() {
        let mut input = test_input();
        input.endurance_limit_mpa = Some(250.0);
        let result = calculate(&input).unwrap();
        assert!(result.infinite_life);
        assert!(result.cycles_to_failure.is_infinite());
        assert!(result.subst_cycles_to_failure.contains(r"\infty"));
        // Strength at design life is floored at S_e
        assert!(result.fatigue_strength_at_design_life_mpa >= 250.0);
    }

    #[test]
    fn test_zero_stress_has_infinite_safety_factor() {
        let mut input = test_input();
        input.max_stress_mpa = 0.0;
        input.min_stress_mpa = 0.0;
        let result = calculate(&input).unwrap();
        assert!(result.safety_factor.is_infinite());
        assert_eq!(result.stress_ratio, None);
    }

    #[test]
    fn test_positive_exponent_rejected() {
        let mut input = test_input();
        input.fatigue_strength_exponent = 0.1;
        match calculate(&input).unwrap_err() {
            CalcError::InvalidInput { field, reason, .. } => {
                assert_eq!(field, "fatigue_strength_exponent");
                assert!(reason.contains("must be negative"));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_yield_above_ultimate_rejected() {
        let mut input = test_input();
        input.yield_strength_mpa = 700.0;
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn test_uncertainty_bounds_bracket_nominal() {
        let mut input = test_input();
        input.stress_uncertainty_pct = Some(10.0);
        let result = calculate(&input).unwrap();
        let bounds = result.bounds.unwrap();
        assert!(bounds.conservative_cycles < result.cycles_to_failure);
        assert!(bounds.optimistic_cycles > result.cycles_to_failure);
        assert!(bounds.conservative_safety_factor < result.safety_factor);
    }

    #[test]
    fn test_conservative_bound_past_ultimate_is_zero_life() {
        let mut input = test_input();
        input.max_stress_mpa = 580.0;
        input.min_stress_mpa = 540.0;
        input.stress_uncertainty_pct = Some(20.0);
        let result = calculate(&input).unwrap();
        assert_eq!(result.bounds.unwrap().conservative_cycles, 0.0);
    }

    #[test]
    fn test_sn_curve_spans_range() {
        let result = calculate(&test_input()).unwrap();
        assert_eq!(result.sn_curve.len(), 26);
        assert!(approx_eq(result.sn_curve[0].cycles, 1.0e3, 1e-9));
        assert!(approx_eq(result.sn_curve[25].cycles, 1.0e8, 1e-9));
        assert!(result.sn_curve[0].stress_mpa > result.sn_curve[25].stress_mpa);
    }

    #[test]
    fn test_calculation_is_deterministic() {
        let mut input = test_input();
        input.stress_uncertainty_pct = Some(5.0);
        let a = serde_json::to_string(&calculate(&input).unwrap()).unwrap();
        let b = serde_json::to_string(&calculate(&input).unwrap()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_correction_parsing() {
        assert_eq!(" Gerber ".parse::<MeanStressCorrection>().unwrap(), MeanStressCorrection::Gerber);
        assert!("walker".parse::<MeanStressCorrection>().is_err());
        let input: FatigueInput = serde_json::from_str(
            r#"{"label":"J","max_stress_mpa":100,"min_stress_mpa":0,
                "ultimate_strength_mpa":500,"yield_strength_mpa":300,
                "fatigue_strength_coefficient_mpa":800,"fatigue_strength_exponent":-0.08,
                "mean_stress_correction":"soderberg"}"#,
        )
        .unwrap();
        assert_eq!(input.mean_stress_correction, MeanStressCorrection::Soderberg);
        assert_eq!(input.design_life_cycles, 1.0e6);
    }
}
