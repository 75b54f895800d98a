//! # Linear-Elastic Fracture Mechanics Formulas
//!
//! Stress-intensity factor, geometry (beta) factors and the Paris crack
//! growth law. Units must be consistent: with stress in MPa and crack size in
//! m, K is in MPa√m and the Paris constant C in m/cycle per (MPa√m)^m.
//!
//! ## Notation
//!
//! - `a` = Crack size (half length for a center crack, depth for edge/surface)
//! - `W` = Plate width
//! - `Y` = Geometry factor
//! - `K_I` = Mode I stress-intensity factor
//! - `ΔK` = Stress-intensity range over one cycle
//!
//! ## References
//!
//! - Anderson, Fracture Mechanics: Fundamentals and Applications, 4th Ed.
//! - Tada, Paris & Irwin, The Stress Analysis of Cracks Handbook, 3rd Ed.

use std::f64::consts::PI;

/// Geometry factor of a semi-circular surface crack at its deepest point
///
/// 1.12 · 2/π ≈ 0.713 for the Irwin solution; 0.728 is the common
/// handbook value including the free-surface correction.
pub const SURFACE_CRACK_FACTOR: f64 = 0.728;

/// Mode I stress-intensity factor
///
/// ```text
/// K_I = Y σ √(π a)
/// ```
#[inline]
pub fn stress_intensity(geometry_factor: f64, stress: f64, crack_size: f64) -> f64 {
    geometry_factor * stress * (PI * crack_size).sqrt()
}

/// Feddersen secant correction for a center crack in a finite-width plate
///
/// ```text
/// Y = √sec(π a / W)
/// ```
///
/// Diverges as a → W/2 (ligament fully consumed).
#[inline]
pub fn center_crack_factor(crack_size: f64, width: f64) -> f64 {
    (1.0 / (PI * crack_size / width).cos()).sqrt()
}

/// Single-edge crack in a finite-width plate under tension
///
/// ```text
/// Y = 1.12 - 0.231ξ + 10.55ξ² - 21.72ξ³ + 30.39ξ⁴,  ξ = a/W
/// ```
///
/// Polynomial fit valid for ξ ≤ 0.6 (Tada handbook, ±0.5%).
#[inline]
pub fn edge_crack_factor(crack_size: f64, width: f64) -> f64 {
    let xi = crack_size / width;
    1.12 - 0.231 * xi + 10.55 * xi.powi(2) - 21.72 * xi.powi(3) + 30.39 * xi.powi(4)
}

/// Paris law crack growth rate
///
/// ```text
/// da/dN = C (ΔK)^m
/// ```
#[inline]
pub fn paris_rate(paris_c: f64, paris_m: f64, delta_k: f64) -> f64 {
    paris_c * delta_k.powf(paris_m)
}

/// Closed-form critical crack size for a constant geometry factor
///
/// ```text
/// a_cr = (1/π) (K_IC / (Y σ))²
/// ```
#[inline]
pub fn critical_crack_constant_factor(fracture_toughness: f64, geometry_factor: f64, stress: f64) -> f64 {
    (fracture_toughness / (geometry_factor * stress)).powi(2) / PI
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9 || (a - b).abs() / b.abs().max(1.0) < 1e-6
    }

    #[test]
    fn test_stress_intensity_infinite_plate() {
        // Y = 1, σ = 100 MPa, a = 10 mm: K = 100 √(π·0.01) = 17.72 MPa√m
        let k = stress_intensity(1.0, 100.0, 0.01);
        assert!(approx_eq(k, 17.724_538_5), "K = {}", k);
    }

    #[test]
    fn test_center_crack_factor_limits() {
        // Short crack in a wide plate approaches the infinite-plate value
        assert!((center_crack_factor(0.001, 1.0) - 1.0).abs() < 1e-5);
        // a/W = 0.25: sec(π/4) = √2, Y = 2^(1/4)
        assert!(approx_eq(center_crack_factor(0.25, 1.0), 2f64.powf(0.25)));
    }

    #[test]
    fn test_edge_crack_factor_short_crack() {
        assert!(approx_eq(edge_crack_factor(0.0, 1.0), 1.12));
        // Monotonic over the valid range
        assert!(edge_crack_factor(0.5, 1.0) > edge_crack_factor(0.3, 1.0));
    }

    #[test]
    fn test_critical_crack_matches_stress_intensity() {
        let a_cr = critical_crack_constant_factor(50.0, SURFACE_CRACK_FACTOR, 200.0);
        let k = stress_intensity(SURFACE_CRACK_FACTOR, 200.0, a_cr);
        assert!(approx_eq(k, 50.0));
    }

    #[test]
    fn test_paris_rate() {
        // C = 1e-11, m = 3, ΔK = 10 → 1e-8 m/cycle
        assert!(approx_eq(paris_rate(1e-11, 3.0, 10.0) * 1e8, 1.0));
    }
}
