//! # Single-Degree-of-Freedom Vibration Isolation
//!
//! Natural frequency and force transmissibility of a mass on a viscously
//! damped spring mount under harmonic excitation.

use std::f64::consts::{PI, SQRT_2};

use serde::{Deserialize, Serialize};

use crate::errors::{require_positive, CalcError, CalcResult};
use crate::subst::{fmt_num, substitute};

const GRAVITY_M_S2: f64 = 9.80665;
const CURVE_MAX_RATIO: f64 = 5.0;
const CURVE_POINTS: usize = 101;

/// Transmissibility of a base-excited (or force-excited) SDOF system
///
/// ```text
/// T = √[(1 + (2ζr)²) / ((1 - r²)² + (2ζr)²)]
/// ```
pub fn transmissibility(frequency_ratio: f64, damping_ratio: f64) -> f64 {
    let r = frequency_ratio;
    let two_zeta_r = 2.0 * damping_ratio * r;
    ((1.0 + two_zeta_r.powi(2)) / ((1.0 - r * r).powi(2) + two_zeta_r.powi(2))).sqrt()
}

/// Input parameters for an isolation mount.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Pump skid",
///   "mass_kg": 120.0,
///   "stiffness_n_per_m": 250000.0,
///   "damping_ratio": 0.05,
///   "excitation_frequency_hz": 24.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VibrationInput {
    pub label: String,
    /// Supported mass (kg)
    pub mass_kg: f64,
    /// Total mount stiffness (N/m)
    pub stiffness_n_per_m: f64,
    /// Damping ratio ζ, [0, 1]
    #[serde(default)]
    pub damping_ratio: f64,
    /// Forcing frequency (Hz)
    pub excitation_frequency_hz: f64,
}

impl VibrationInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("mass_kg", self.mass_kg)?;
        require_positive("stiffness_n_per_m", self.stiffness_n_per_m)?;
        if !self.damping_ratio.is_finite() || !(0.0..=1.0).contains(&self.damping_ratio) {
            return Err(CalcError::invalid_input(
                "damping_ratio",
                self.damping_ratio.to_string(),
                "must be in [0, 1]",
            ));
        }
        require_positive("excitation_frequency_hz", self.excitation_frequency_hz)?;
        Ok(())
    }

    /// Undamped natural frequency (Hz)
    pub fn natural_frequency_hz(&self) -> f64 {
        (self.stiffness_n_per_m / self.mass_kg).sqrt() / (2.0 * PI)
    }
}

/// One point of the transmissibility curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransmissibilityPoint {
    pub frequency_ratio: f64,
    pub transmissibility: f64,
}

/// Results from an isolation check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VibrationResult {
    /// Undamped natural frequency f_n (Hz)
    pub natural_frequency_hz: f64,
    /// Damped natural frequency f_d (Hz)
    pub damped_frequency_hz: f64,
    /// Static deflection under gravity (mm)
    pub static_deflection_mm: f64,
    /// r = f / f_n
    pub frequency_ratio: f64,
    pub transmissibility: f64,
    /// Force reduction (%), 0 when the mount amplifies
    pub isolation_efficiency_pct: f64,
    /// True when r > √2
    pub isolating: bool,
    /// T over r ∈ [0, 5]
    pub curve: Vec<TransmissibilityPoint>,
    pub subst_natural_frequency: String,
    pub subst_frequency_ratio: String,
    pub subst_transmissibility: String,
}

/// Calculate natural frequency and transmissibility.
pub fn calculate(input: &VibrationInput) -> CalcResult<VibrationResult> {
    input.validate()?;

    let zeta = input.damping_ratio;
    let fn_hz = input.natural_frequency_hz();
    let r = input.excitation_frequency_hz / fn_hz;
    let t = transmissibility(r, zeta);
    let efficiency = if t < 1.0 { (1.0 - t) * 100.0 } else { 0.0 };

    let curve = (0..CURVE_POINTS)
        .map(|i| {
            let ratio = CURVE_MAX_RATIO * i as f64 / (CURVE_POINTS - 1) as f64;
            TransmissibilityPoint {
                frequency_ratio: ratio,
                transmissibility: transmissibility(ratio, zeta),
            }
        })
        .collect();

    Ok(VibrationResult {
        natural_frequency_hz: fn_hz,
        damped_frequency_hz: fn_hz * (1.0 - zeta * zeta).sqrt(),
        static_deflection_mm: input.mass_kg * GRAVITY_M_S2 / input.stiffness_n_per_m * 1000.0,
        frequency_ratio: r,
        transmissibility: t,
        isolation_efficiency_pct: efficiency,
        isolating: r > SQRT_2,
        curve,
        subst_natural_frequency: substitute(
            "f_n",
            r"\frac{1}{2\pi}\sqrt{\frac{k}{m}}",
            &format!(
                r"\frac{{1}}{{2\pi}}\sqrt{{\frac{{{}}}{{{}}}}}",
                fmt_num(input.stiffness_n_per_m),
                fmt_num(input.mass_kg)
            ),
            fn_hz,
            "Hz",
        ),
        subst_frequency_ratio: substitute(
            "r",
            r"\frac{f}{f_n}",
            &format!(
                r"\frac{{{}}}{{{}}}",
                fmt_num(input.excitation_frequency_hz),
                fmt_num(fn_hz)
            ),
            r,
            "",
        ),
        subst_transmissibility: substitute(
            "T",
            r"\sqrt{\frac{1 + (2\zeta r)^2}{(1 - r^2)^2 + (2\zeta r)^2}}",
            &format!(
                r"\sqrt{{\frac{{1 + (2 \cdot {} \cdot {})^2}}{{(1 - {}^2)^2 + (2 \cdot {} \cdot {})^2}}}}",
                fmt_num(zeta),
                fmt_num(r),
                fmt_num(r),
                fmt_num(zeta),
                fmt_num(r)
            ),
            t,
            "",
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 10 kg on a mount tuned to 10 Hz
    fn test_input(f: f64, zeta: f64) -> VibrationInput {
        VibrationInput {
            label: "Test".to_string(),
            mass_kg: 10.0,
            stiffness_n_per_m: 10.0 * (2.0 * PI * 10.0).powi(2),
            damping_ratio: zeta,
            excitation_frequency_hz: f,
        }
    }

    #[test]
    fn test_natural_frequency() {
        let result = calculate(&test_input(30.0, 0.0)).unwrap();
        assert!((result.natural_frequency_hz - 10.0).abs() < 1e-9);
        assert!((result.frequency_ratio - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_undamped_isolation() {
        let result = calculate(&test_input(30.0, 0.0)).unwrap();
        // T = 1 / |1 - 9|
        assert!((result.transmissibility - 0.125).abs() < 1e-9);
        assert!((result.isolation_efficiency_pct - 87.5).abs() < 1e-6);
        assert!(result.isolating);
    }

    #[test]
    fn test_crossover_at_root_two() {
        for zeta in [0.0, 0.1, 0.3, 0.7] {
            assert!((transmissibility(SQRT_2, zeta) - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_amplification_below_crossover() {
        let result = calculate(&test_input(9.0, 0.05)).unwrap();
        assert!(result.transmissibility > 1.0);
        assert_eq!(result.isolation_efficiency_pct, 0.0);
        assert!(!result.isolating);
    }

    #[test]
    fn test_damping_limits_resonance() {
        assert!((transmissibility(1.0, 0.5) - 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_curve() {
        let result = calculate(&test_input(30.0, 0.1)).unwrap();
        assert_eq!(result.curve.len(), CURVE_POINTS);
        assert_eq!(result.curve[0].transmissibility, 1.0);
        assert_eq!(result.curve[CURVE_POINTS - 1].frequency_ratio, 5.0);
    }

    #[test]
    fn test_damping_ratio_range() {
        assert!(calculate(&test_input(30.0, 1.5)).is_err());
        assert!(calculate(&test_input(30.0, -0.1)).is_err());
    }
}
