//! # Stress-Life Fatigue Formulas
//!
//! Cyclic stress decomposition, mean-stress corrections and the Basquin
//! relation. All functions are unit-agnostic: pass stresses in one
//! consistent unit.
//!
//! ## Notation
//!
//! - `σ_max`, `σ_min` = Peak and valley stress of the cycle
//! - `σ_a` = Alternating stress amplitude
//! - `σ_m` = Mean stress
//! - `S_u`, `S_y` = Ultimate and yield strength
//! - `σ_f'` = Fatigue strength coefficient
//! - `b` = Fatigue strength (Basquin) exponent, negative
//! - `2N` = Reversals to failure
//!
//! ## References
//!
//! - Shigley's Mechanical Engineering Design, 10th Edition, Ch. 6
//! - Dowling, Mechanical Behavior of Materials, 4th Edition, Ch. 9-10

// =============================================================================
// CYCLE DECOMPOSITION
// =============================================================================

/// Alternating stress amplitude σ_a = (σ_max - σ_min) / 2
#[inline]
pub fn alternating_stress(max_stress: f64, min_stress: f64) -> f64 {
    (max_stress - min_stress) / 2.0
}

/// Mean stress σ_m = (σ_max + σ_min) / 2
#[inline]
pub fn mean_stress(max_stress: f64, min_stress: f64) -> f64 {
    (max_stress + min_stress) / 2.0
}

/// Stress ratio R = σ_min / σ_max
///
/// Returns `None` when σ_max is zero (ratio undefined).
#[inline]
pub fn stress_ratio(max_stress: f64, min_stress: f64) -> Option<f64> {
    if max_stress == 0.0 {
        None
    } else {
        Some(min_stress / max_stress)
    }
}

// =============================================================================
// MEAN-STRESS CORRECTIONS
// Each returns the denominator separately so callers can reject ≤ 0
// =============================================================================

/// Denominator of the Goodman/Soderberg line: 1 - σ_m / S
///
/// `strength` is S_u for Goodman and S_y for Soderberg.
#[inline]
pub fn linear_correction_denominator(mean: f64, strength: f64) -> f64 {
    1.0 - mean / strength
}

/// Denominator of the Gerber parabola: 1 - (σ_m / S_u)²
#[inline]
pub fn gerber_denominator(mean: f64, ultimate: f64) -> f64 {
    1.0 - (mean / ultimate).powi(2)
}

/// Equivalent fully-reversed stress for the modified Goodman line
///
/// ```text
/// σ_ar = σ_a / (1 - σ_m/S_u)
/// ```
#[inline]
pub fn goodman_equivalent(alternating: f64, mean: f64, ultimate: f64) -> f64 {
    alternating / linear_correction_denominator(mean, ultimate)
}

/// Equivalent fully-reversed stress for the Soderberg line
///
/// ```text
/// σ_ar = σ_a / (1 - σ_m/S_y)
/// ```
#[inline]
pub fn soderberg_equivalent(alternating: f64, mean: f64, yield_strength: f64) -> f64 {
    alternating / linear_correction_denominator(mean, yield_strength)
}

/// Equivalent fully-reversed stress for the Gerber parabola
///
/// ```text
/// σ_ar = σ_a / (1 - (σ_m/S_u)²)
/// ```
#[inline]
pub fn gerber_equivalent(alternating: f64, mean: f64, ultimate: f64) -> f64 {
    alternating / gerber_denominator(mean, ultimate)
}

// =============================================================================
// BASQUIN RELATION
// =============================================================================

/// Fully-reversed fatigue strength at a given number of reversals
///
/// ```text
/// σ = σ_f' (2N)^b
/// ```
#[inline]
pub fn basquin_strength(coefficient: f64, exponent: f64, reversals: f64) -> f64 {
    coefficient * reversals.powf(exponent)
}

/// Reversals to failure from the inverted Basquin relation
///
/// ```text
/// 2N = (σ_ar / σ_f')^(1/b)
/// ```
///
/// Direct algebraic inversion; `exponent` must be negative.
#[inline]
pub fn basquin_reversals(equivalent_stress: f64, coefficient: f64, exponent: f64) -> f64 {
    (equivalent_stress / coefficient).powf(1.0 / exponent)
}
