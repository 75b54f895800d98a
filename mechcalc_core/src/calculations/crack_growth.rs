//! # Fatigue Crack Growth Calculation
//!
//! Linear-elastic fracture mechanics life estimate: the critical crack size is
//! found by bisection on `K_I(a) = K_IC`, then the Paris law is integrated
//! from the initial crack to the critical size.
//!
//! ## Units
//!
//! Stress in MPa, crack size and width in m, K in MPa√m. The Paris constant
//! `C` must match: m/cycle per (MPa√m)^m.
//!
//! ## Integration Scheme
//!
//! Adaptive forward Euler. Each step grows the crack by
//! `min(1% of a, 2% of (a_cr - a))`, floored at `1e-6 · a_cr` so the
//! integration always advances, and the cycle increment is `da / (da/dN)`.
//!
//! ## Example
//!
//! ```rust
//! use mechcalc_core::calculations::crack_growth::{calculate, CrackGrowthInput, CrackType};
//!
//! let input = CrackGrowthInput {
//!     label: "Lug edge crack".to_string(),
//!     max_stress_mpa: 120.0,
//!     stress_ratio: 0.1,
//!     initial_crack_m: 0.001,
//!     width_m: 0.1,
//!     crack_type: CrackType::Edge,
//!     geometry_factor: None,
//!     fracture_toughness_mpa_sqrt_m: 60.0,
//!     paris_c: 1.0e-11,
//!     paris_m: 3.0,
//!     max_steps: None,
//!     stress_uncertainty_pct: None,
//! };
//!
//! let result = calculate(&input).unwrap();
//! println!("a_cr = {:.4} m, N = {:.3e}", result.critical_crack_m, result.cycles_to_failure);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::parse_option;
use crate::equations::fracture::{
    center_crack_factor, edge_crack_factor, paris_rate, stress_intensity, SURFACE_CRACK_FACTOR,
};
use crate::errors::{require_positive, CalcError, CalcResult};
use crate::subst::{fmt_num, substitute};

/// Relative tolerance on |K_mid - K_IC| / K_IC
pub const BISECTION_TOLERANCE: f64 = 1e-6;
/// Iteration cap for the critical crack search
pub const BISECTION_MAX_ITERATIONS: u32 = 200;
/// Default lower bound of the critical crack search (m)
pub const MIN_CRACK_SIZE_M: f64 = 1e-6;
/// Default step budget of the Paris integration
pub const DEFAULT_MAX_STEPS: u32 = 20_000;

/// Largest number of points kept on the output crack growth curve
const MAX_CURVE_POINTS: usize = 200;

// ============================================================================
// Crack Geometry
// ============================================================================

/// Crack configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CrackType {
    /// Through crack at the center of a finite plate (a = half length)
    #[default]
    Center,
    /// Single-edge crack in a finite plate
    Edge,
    /// Semi-circular surface crack (constant Y)
    Surface,
}

impl CrackType {
    pub const ALL: [CrackType; 3] = [CrackType::Center, CrackType::Edge, CrackType::Surface];

    pub fn as_str(&self) -> &'static str {
        match self {
            CrackType::Center => "center",
            CrackType::Edge => "edge",
            CrackType::Surface => "surface",
        }
    }

    /// Geometry factor Y at crack size `a` in a plate of width `w`
    pub fn geometry_factor(&self, a: f64, w: f64) -> f64 {
        match self {
            CrackType::Center => center_crack_factor(a, w),
            CrackType::Edge => edge_crack_factor(a, w),
            CrackType::Surface => SURFACE_CRACK_FACTOR,
        }
    }

    /// Upper bound of the crack search as a fraction of the width
    ///
    /// The edge polynomial is only fitted up to a/W = 0.6.
    pub fn max_size_fraction(&self) -> f64 {
        match self {
            CrackType::Center => 0.45,
            CrackType::Edge => 0.6,
            CrackType::Surface => 0.95,
        }
    }
}

impl fmt::Display for CrackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CrackType {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_option("crack_type", s, &Self::ALL, Self::as_str)
    }
}

/// Geometry factor Y(a) used by the solver and the integrator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeometryFactor {
    /// Constant Y, independent of crack size
    Constant(f64),
    /// Y(a/W) of a crack type in a plate of the given width
    Crack { crack_type: CrackType, width: f64 },
}

impl GeometryFactor {
    /// Evaluate Y at crack size `a`
    pub fn at(&self, a: f64) -> f64 {
        match *self {
            GeometryFactor::Constant(y) => y,
            GeometryFactor::Crack { crack_type, width } => crack_type.geometry_factor(a, width),
        }
    }

    /// Stress-intensity factor at crack size `a`
    pub fn stress_intensity(&self, stress: f64, a: f64) -> f64 {
        stress_intensity(self.at(a), stress, a)
    }
}

// ============================================================================
// Critical Crack Size (bisection)
// ============================================================================

/// Outcome of the critical crack search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriticalCrackStatus {
    /// Bisection converged inside the search interval
    Converged,
    /// K_I at the lower bound already meets K_IC
    AlreadyCritical,
    /// K_I never reaches K_IC inside the geometry (infinite life)
    NotReached,
    /// Iteration cap hit before the tolerance was met; size is the last midpoint
    MaxIterations,
}

/// Critical crack size and how it was found.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriticalCrack {
    /// Crack size (same unit as the bounds)
    pub size: f64,
    pub status: CriticalCrackStatus,
    /// Bisection iterations used
    pub iterations: u32,
}

/// Find the crack size at which `K_I(a) = K_IC` by bisection over `[a_min, a_max]`.
///
/// Boundary checks short-circuit the search: if K_I at `a_min` already
/// meets K_IC the lower bound is returned as `AlreadyCritical`; if K_I at
/// `a_max` stays below K_IC the upper bound is returned as `NotReached`.
pub fn critical_crack_size(
    stress: f64,
    fracture_toughness: f64,
    geometry: &GeometryFactor,
    a_min: f64,
    a_max: f64,
) -> CriticalCrack {
    bisect_critical_crack(
        stress,
        fracture_toughness,
        geometry,
        a_min,
        a_max,
        BISECTION_MAX_ITERATIONS,
    )
}

fn bisect_critical_crack(
    stress: f64,
    fracture_toughness: f64,
    geometry: &GeometryFactor,
    a_min: f64,
    a_max: f64,
    max_iterations: u32,
) -> CriticalCrack {
    let k_low = geometry.stress_intensity(stress, a_min);
    if k_low >= fracture_toughness {
        log::debug!("critical crack: K_I(a_min) = {:.4} >= K_IC, already critical", k_low);
        return CriticalCrack {
            size: a_min,
            status: CriticalCrackStatus::AlreadyCritical,
            iterations: 0,
        };
    }
    let k_high = geometry.stress_intensity(stress, a_max);
    if k_high < fracture_toughness {
        log::debug!("critical crack: K_I(a_max) = {:.4} < K_IC, not reached", k_high);
        return CriticalCrack {
            size: a_max,
            status: CriticalCrackStatus::NotReached,
            iterations: 0,
        };
    }

    let (mut lo, mut hi) = (a_min, a_max);
    let mut mid = 0.5 * (lo + hi);
    for iteration in 1..=max_iterations {
        mid = 0.5 * (lo + hi);
        let k_mid = geometry.stress_intensity(stress, mid);
        log::trace!("bisection {}: a = {:.6e}, K = {:.6}", iteration, mid, k_mid);
        if ((k_mid - fracture_toughness) / fracture_toughness).abs() < BISECTION_TOLERANCE {
            log::debug!("critical crack converged to {:.6e} in {} iterations", mid, iteration);
            return CriticalCrack {
                size: mid,
                status: CriticalCrackStatus::Converged,
                iterations: iteration,
            };
        }
        if k_mid < fracture_toughness {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    log::warn!(
        "critical crack search hit the {} iteration cap, using a = {:.6e}",
        max_iterations,
        mid
    );
    CriticalCrack {
        size: mid,
        status: CriticalCrackStatus::MaxIterations,
        iterations: max_iterations,
    }
}

// ============================================================================
// Paris Law Integration
// ============================================================================

/// One point of the cycles vs. crack size curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthPoint {
    pub cycles: f64,
    pub crack_m: f64,
}

/// Result of integrating the Paris law.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrackGrowthPath {
    /// Cycles elapsed
    pub cycles: f64,
    /// Crack size reached
    pub final_crack: f64,
    /// Integration steps taken
    pub steps: u32,
    /// True when the crack reached the target size within the step budget
    pub completed: bool,
    /// Cycles vs. crack size, thinned for plotting
    pub curve: Vec<GrowthPoint>,
}

/// Integrate `da/dN = C (ΔK)^m` from `initial` to `critical`.
///
/// `stress_range` is Δσ; ΔK is evaluated at the crack size at the start of
/// each step. A non-positive ΔK returns immediately with zero cycles.
pub fn integrate_paris(
    stress_range: f64,
    geometry: &GeometryFactor,
    initial: f64,
    critical: f64,
    paris_c: f64,
    paris_m: f64,
    max_steps: u32,
) -> CrackGrowthPath {
    let mut a = initial;
    let mut cycles = 0.0;
    let mut steps = 0u32;
    let mut curve = vec![GrowthPoint { cycles: 0.0, crack_m: a }];

    if geometry.stress_intensity(stress_range, a) <= 0.0 {
        log::debug!("paris: non-positive stress intensity range, no growth");
        return CrackGrowthPath {
            cycles: 0.0,
            final_crack: a,
            steps: 0,
            completed: false,
            curve,
        };
    }

    let min_increment = 1e-6 * critical;
    log::debug!(
        "paris: integrating from a = {:.4e} to a_cr = {:.4e} (budget {} steps)",
        initial,
        critical,
        max_steps
    );

    while a < critical && steps < max_steps {
        let delta_k = geometry.stress_intensity(stress_range, a);
        let rate = paris_rate(paris_c, paris_m, delta_k);
        if !(rate.is_finite() && rate > 0.0) {
            log::warn!("paris: growth rate {:e} at a = {:.4e}, stopping", rate, a);
            break;
        }

        let remaining = critical - a;
        let increment = (0.01 * a).min(0.02 * remaining).max(min_increment);
        let da = increment.min(remaining);
        cycles += da / rate;
        a = if da >= remaining { critical } else { a + da };
        steps += 1;
        curve.push(GrowthPoint { cycles, crack_m: a });
    }

    let completed = a >= critical;
    if !completed {
        log::warn!(
            "paris: stopped at a = {:.4e} after {} steps before reaching {:.4e}",
            a,
            steps,
            critical
        );
    }

    CrackGrowthPath {
        cycles,
        final_crack: a,
        steps,
        completed,
        curve: thin_curve(curve, MAX_CURVE_POINTS),
    }
}

/// Keep at most `max_points` evenly spaced samples, always including the last.
fn thin_curve(points: Vec<GrowthPoint>, max_points: usize) -> Vec<GrowthPoint> {
    if points.len() <= max_points || max_points < 2 {
        return points;
    }
    let last = points.len() - 1;
    (0..max_points)
        .map(|i| points[i * last / (max_points - 1)])
        .collect()
}

/// Stress range of the cycle; the compressive part is ignored for R < 0
pub fn stress_range(max_stress: f64, stress_ratio: f64) -> f64 {
    if stress_ratio >= 0.0 {
        max_stress * (1.0 - stress_ratio)
    } else {
        max_stress
    }
}

// ============================================================================
// Input
// ============================================================================

/// Input parameters for a crack growth life estimate.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Lug edge crack",
///   "max_stress_mpa": 120.0,
///   "stress_ratio": 0.1,
///   "initial_crack_m": 0.001,
///   "width_m": 0.1,
///   "crack_type": "edge",
///   "fracture_toughness_mpa_sqrt_m": 60.0,
///   "paris_c": 1e-11,
///   "paris_m": 3.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrackGrowthInput {
    /// User label (e.g., "Lug edge crack")
    pub label: String,

    /// Peak remote stress σ_max (MPa)
    pub max_stress_mpa: f64,

    /// Stress ratio R = σ_min/σ_max (< 1)
    #[serde(default)]
    pub stress_ratio: f64,

    /// Initial crack size a_0 (m)
    pub initial_crack_m: f64,

    /// Plate width W (m)
    pub width_m: f64,

    /// Crack configuration
    #[serde(default)]
    pub crack_type: CrackType,

    /// Constant geometry factor overriding the crack type's Y(a/W)
    #[serde(default)]
    pub geometry_factor: Option<f64>,

    /// Plane-strain fracture toughness K_IC (MPa√m)
    pub fracture_toughness_mpa_sqrt_m: f64,

    /// Paris coefficient C (m/cycle per (MPa√m)^m)
    pub paris_c: f64,

    /// Paris exponent m
    pub paris_m: f64,

    /// Integration step budget
    #[serde(default)]
    pub max_steps: Option<u32>,

    /// Stress uncertainty for conservative/optimistic lives (%)
    #[serde(default)]
    pub stress_uncertainty_pct: Option<f64>,
}

impl CrackGrowthInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("max_stress_mpa", self.max_stress_mpa)?;
        if !self.stress_ratio.is_finite() || self.stress_ratio >= 1.0 {
            return Err(CalcError::invalid_input(
                "stress_ratio",
                self.stress_ratio.to_string(),
                "must be less than 1",
            ));
        }
        require_positive("initial_crack_m", self.initial_crack_m)?;
        require_positive("width_m", self.width_m)?;
        if let Some(y) = self.geometry_factor {
            require_positive("geometry_factor", y)?;
        }
        require_positive("fracture_toughness_mpa_sqrt_m", self.fracture_toughness_mpa_sqrt_m)?;
        require_positive("paris_c", self.paris_c)?;
        require_positive("paris_m", self.paris_m)?;
        if self.max_steps == Some(0) {
            return Err(CalcError::invalid_input("max_steps", "0", "must be at least 1"));
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

        let limit = self.search_limit_m();
        if self.initial_crack_m >= limit {
            return Err(CalcError::inconsistent(
                "initial_crack_m, width_m",
                format!(
                    "initial crack {} m lies outside the {} crack validity range (a <= {} m)",
                    self.initial_crack_m, self.crack_type, limit
                ),
            ));
        }
        Ok(())
    }

    /// Geometry factor function for this input
    pub fn geometry(&self) -> GeometryFactor {
        match self.geometry_factor {
            Some(y) => GeometryFactor::Constant(y),
            None => GeometryFactor::Crack {
                crack_type: self.crack_type,
                width: self.width_m,
            },
        }
    }

    /// Upper bound of the critical crack search (m)
    pub fn search_limit_m(&self) -> f64 {
        self.crack_type.max_size_fraction() * self.width_m
    }

    /// Lower bound of the critical crack search (m)
    fn search_floor_m(&self) -> f64 {
        MIN_CRACK_SIZE_M.min(0.5 * self.initial_crack_m)
    }
}

// ============================================================================
// Result
// ============================================================================

/// Lives at the upper and lower stress bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrackLifeBounds {
    pub uncertainty_pct: f64,
    /// Life with σ_max scaled by (1 + u)
    pub conservative_cycles: f64,
    /// Life with σ_max scaled by (1 - u)
    pub optimistic_cycles: f64,
}

/// Results from a crack growth life estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrackGrowthResult {
    /// Stress range Δσ used for ΔK (MPa)
    pub stress_range_mpa: f64,

    /// Geometry factor at the initial crack
    pub initial_geometry_factor: f64,

    /// ΔK at the initial crack (MPa√m)
    pub initial_delta_k: f64,

    /// K_max at the initial crack (MPa√m)
    pub initial_k_max: f64,

    /// Critical crack size (m)
    pub critical_crack_m: f64,

    pub critical_status: CriticalCrackStatus,

    /// Cycles from a_0 to a_cr (∞ when a_cr is not reached)
    pub cycles_to_failure: f64,

    /// True when the integration reached its target within the step budget
    pub completed: bool,

    /// Integration steps taken
    pub steps: u32,

    /// Cycles vs. crack size
    pub curve: Vec<GrowthPoint>,

    pub bounds: Option<CrackLifeBounds>,

    pub subst_delta_k: String,
    pub subst_critical_crack: String,
    pub subst_growth_rate: String,
}

// ============================================================================
// Calculation
// ============================================================================

struct LifeEstimate {
    critical: CriticalCrack,
    path: CrackGrowthPath,
    cycles_to_failure: f64,
}

fn estimate_life(input: &CrackGrowthInput, stress_scale: f64) -> LifeEstimate {
    let geometry = input.geometry();
    let max_stress = input.max_stress_mpa * stress_scale;
    let critical = critical_crack_size(
        max_stress,
        input.fracture_toughness_mpa_sqrt_m,
        &geometry,
        input.search_floor_m(),
        input.search_limit_m(),
    );

    let range = stress_range(max_stress, input.stress_ratio);
    let path = if input.initial_crack_m >= critical.size {
        CrackGrowthPath {
            cycles: 0.0,
            final_crack: input.initial_crack_m,
            steps: 0,
            completed: true,
            curve: vec![GrowthPoint { cycles: 0.0, crack_m: input.initial_crack_m }],
        }
    } else {
        integrate_paris(
            range,
            &geometry,
            input.initial_crack_m,
            critical.size,
            input.paris_c,
            input.paris_m,
            input.max_steps.unwrap_or(DEFAULT_MAX_STEPS),
        )
    };

    let cycles_to_failure = if critical.status == CriticalCrackStatus::NotReached {
        f64::INFINITY
    } else {
        path.cycles
    };

    LifeEstimate {
        critical,
        path,
        cycles_to_failure,
    }
}

/// Estimate fatigue crack growth life.
///
/// # Errors
///
/// * `InvalidInput` for out-of-range parameters
/// * `Inconsistent` when the initial crack lies outside the geometry's validity range
pub fn calculate(input: &CrackGrowthInput) -> CalcResult<CrackGrowthResult> {
    input.validate()?;

    let nominal = estimate_life(input, 1.0);
    let geometry = input.geometry();
    let range = stress_range(input.max_stress_mpa, input.stress_ratio);
    let a0 = input.initial_crack_m;
    let y0 = geometry.at(a0);
    let initial_delta_k = stress_intensity(y0, range, a0);
    let initial_k_max = stress_intensity(y0, input.max_stress_mpa, a0);

    let bounds = match input.stress_uncertainty_pct {
        Some(u) if u > 0.0 => {
            let frac = u / 100.0;
            Some(CrackLifeBounds {
                uncertainty_pct: u,
                conservative_cycles: estimate_life(input, 1.0 + frac).cycles_to_failure,
                optimistic_cycles: estimate_life(input, 1.0 - frac).cycles_to_failure,
            })
        }
        _ => None,
    };

    let subst_delta_k = substitute(
        r"\Delta K",
        r"Y \Delta\sigma \sqrt{\pi a_0}",
        &format!(
            r"{} \cdot {} \sqrt{{\pi \cdot {}}}",
            fmt_num(y0),
            fmt_num(range),
            fmt_num(a0)
        ),
        initial_delta_k,
        r"MPa\sqrt{m}",
    );
    let y_cr = geometry.at(nominal.critical.size);
    let subst_critical_crack = match nominal.critical.status {
        CriticalCrackStatus::NotReached => format!(
            r"K_I(a = {}) = {} < K_{{IC}} = {} \Rightarrow N_f = \infty",
            fmt_num(nominal.critical.size),
            fmt_num(geometry.stress_intensity(input.max_stress_mpa, nominal.critical.size)),
            fmt_num(input.fracture_toughness_mpa_sqrt_m)
        ),
        CriticalCrackStatus::AlreadyCritical => format!(
            r"K_I(a_{{min}} = {}) = {} \ge K_{{IC}} = {} \Rightarrow a_{{cr}} \le a_{{min}}",
            fmt_num(nominal.critical.size),
            fmt_num(geometry.stress_intensity(input.max_stress_mpa, nominal.critical.size)),
            fmt_num(input.fracture_toughness_mpa_sqrt_m)
        ),
        CriticalCrackStatus::Converged | CriticalCrackStatus::MaxIterations => substitute(
            "a_{cr}",
            r"\frac{1}{\pi}\left(\frac{K_{IC}}{Y \sigma_{max}}\right)^2",
            &format!(
                r"\frac{{1}}{{\pi}}\left(\frac{{{}}}{{{} \cdot {}}}\right)^2",
                fmt_num(input.fracture_toughness_mpa_sqrt_m),
                fmt_num(y_cr),
                fmt_num(input.max_stress_mpa)
            ),
            nominal.critical.size,
            "m",
        ),
    };
    let subst_growth_rate = substitute(
        r"\frac{da}{dN}\Big|_{a_0}",
        r"C (\Delta K)^m",
        &format!(
            r"{} \cdot {}^{{{}}}",
            fmt_num(input.paris_c),
            fmt_num(initial_delta_k),
            fmt_num(input.paris_m)
        ),
        paris_rate(input.paris_c, input.paris_m, initial_delta_k),
        "m/cycle",
    );

    Ok(CrackGrowthResult {
        stress_range_mpa: range,
        initial_geometry_factor: y0,
        initial_delta_k,
        initial_k_max,
        critical_crack_m: nominal.critical.size,
        critical_status: nominal.critical.status,
        cycles_to_failure: nominal.cycles_to_failure,
        completed: nominal.path.completed,
        steps: nominal.path.steps,
        curve: nominal.path.curve,
        bounds,
        subst_delta_k,
        subst_critical_crack,
        subst_growth_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::fracture::critical_crack_constant_factor;

    fn test_input() -> CrackGrowthInput {
        CrackGrowthInput {
            label: "Test".to_string(),
            max_stress_mpa: 100.0,
            stress_ratio: 0.0,
            initial_crack_m: 0.001,
            width_m: 1.0,
            crack_type: CrackType::Surface,
            geometry_factor: None,
            fracture_toughness_mpa_sqrt_m: 50.0,
            paris_c: 1.0e-11,
            paris_m: 3.0,
            max_steps: None,
            stress_uncertainty_pct: None,
        }
    }

    #[test]
    fn test_critical_crack_constant_surface_factor() {
        // Y = 0.728, σ = 100 MPa (in Pa), K_IC = 7 MPa√m (in Pa√m)
        let geometry = GeometryFactor::Constant(SURFACE_CRACK_FACTOR);
        let result = critical_crack_size(100e6, 7e6, &geometry, MIN_CRACK_SIZE_M, 1.0);
        let expected = (7e6 / (SURFACE_CRACK_FACTOR * 100e6)).powi(2) / std::f64::consts::PI;
        assert_eq!(result.status, CriticalCrackStatus::Converged);
        assert!((result.size - expected).abs() / expected < 0.01);
        assert!(result.iterations <= BISECTION_MAX_ITERATIONS);
    }

    #[test]
    fn test_critical_crack_already_critical() {
        let geometry = GeometryFactor::Constant(1.0);
        let result = critical_crack_size(1000.0, 1.0, &geometry, 0.01, 0.5);
        assert_eq!(result.status, CriticalCrackStatus::AlreadyCritical);
        assert_eq!(result.size, 0.01);
    }

    #[test]
    fn test_critical_crack_iteration_cap_is_reported() {
        let geometry = GeometryFactor::Constant(SURFACE_CRACK_FACTOR);
        let result = bisect_critical_crack(100e6, 7e6, &geometry, MIN_CRACK_SIZE_M, 1.0, 3);
        assert_eq!(result.status, CriticalCrackStatus::MaxIterations);
        assert_eq!(result.iterations, 3);
        assert!(result.size > MIN_CRACK_SIZE_M && result.size < 1.0);
    }

    #[test]
    fn test_critical_crack_not_reached() {
        let geometry = GeometryFactor::Crack { crack_type: CrackType::Center, width: 0.01 };
        let result = critical_crack_size(1.0, 500.0, &geometry, MIN_CRACK_SIZE_M, 0.0045);
        assert_eq!(result.status, CriticalCrackStatus::NotReached);
        assert_eq!(result.size, 0.0045);
    }

    #[test]
    fn test_critical_crack_edge_within_polynomial_range() {
        let geometry = GeometryFactor::Crack { crack_type: CrackType::Edge, width: 0.1 };
        let result = critical_crack_size(200.0, 40.0, &geometry, MIN_CRACK_SIZE_M, 0.06);
        assert_eq!(result.status, CriticalCrackStatus::Converged);
        let k = geometry.stress_intensity(200.0, result.size);
        assert!((k - 40.0).abs() / 40.0 < 1e-5);
    }

    #[test]
    fn test_paris_matches_closed_form_for_constant_factor() {
        // Constant Y, m ≠ 2: N = (a0^(1-m/2) - af^(1-m/2)) / (C (YΔσ√π)^m (m/2 - 1))
        let geometry = GeometryFactor::Constant(1.0);
        let (c, m, ds, a0, af) = (1.0e-11, 3.0, 100.0, 0.001, 0.02);
        let path = integrate_paris(ds, &geometry, a0, af, c, m, DEFAULT_MAX_STEPS);
        let k_coef = ds * std::f64::consts::PI.sqrt();
        let exact = (a0.powf(1.0 - m / 2.0) - af.powf(1.0 - m / 2.0))
            / (c * k_coef.powf(m) * (m / 2.0 - 1.0));
        assert!(path.completed);
        assert_eq!(path.final_crack, af);
        // Forward Euler at the start of each step overestimates life slightly
        assert!(path.cycles >= exact);
        assert!((path.cycles - exact) / exact < 0.02);
    }

    #[test]
    fn test_paris_zero_stress_range_has_no_growth() {
        let geometry = GeometryFactor::Constant(1.0);
        let path = integrate_paris(0.0, &geometry, 0.001, 0.02, 1e-11, 3.0, 100);
        assert_eq!(path.cycles, 0.0);
        assert_eq!(path.steps, 0);
        assert_eq!(path.final_crack, 0.001);
        assert!(!path.completed);
    }

    #[test]
    fn test_paris_step_budget_exhausted() {
        let geometry = GeometryFactor::Constant(1.0);
        let path = integrate_paris(100.0, &geometry, 0.001, 0.02, 1e-11, 3.0, 10);
        assert_eq!(path.steps, 10);
        assert!(!path.completed);
        assert!(path.final_crack < 0.02);
    }

    #[test]
    fn test_curve_is_thinned_and_monotonic() {
        let geometry = GeometryFactor::Constant(1.0);
        let path = integrate_paris(100.0, &geometry, 1e-5, 0.5, 1e-11, 3.0, DEFAULT_MAX_STEPS);
        assert!(path.curve.len() <= MAX_CURVE_POINTS);
        assert_eq!(path.curve.last().map(|p| p.crack_m), Some(0.5));
        for pair in path.curve.windows(2) {
            assert!(pair[1].cycles >= pair[0].cycles);
            assert!(pair[1].crack_m >= pair[0].crack_m);
        }
    }

    #[test]
    fn test_stress_range_ignores_compression() {
        assert_eq!(stress_range(100.0, 0.5), 50.0);
        assert_eq!(stress_range(100.0, -1.0), 100.0);
    }

    #[test]
    fn test_calculate_surface_crack() {
        let result = calculate(&test_input()).unwrap();
        let expected = critical_crack_constant_factor(50.0, SURFACE_CRACK_FACTOR, 100.0);
        assert_eq!(result.critical_status, CriticalCrackStatus::Converged);
        assert!((result.critical_crack_m - expected).abs() / expected < 1e-3);
        assert!(result.completed);
        assert!(result.cycles_to_failure.is_finite() && result.cycles_to_failure > 0.0);
        assert!(result.subst_critical_crack.starts_with("a_{cr}"));
    }

    #[test]
    fn test_tough_material_never_fails() {
        let mut input = test_input();
        input.crack_type = CrackType::Center;
        input.width_m = 0.05;
        input.max_stress_mpa = 10.0;
        input.fracture_toughness_mpa_sqrt_m = 200.0;
        let result = calculate(&input).unwrap();
        assert_eq!(result.critical_status, CriticalCrackStatus::NotReached);
        assert!(result.cycles_to_failure.is_infinite());
        assert!(result.subst_critical_crack.contains(r"\infty"));
    }

    #[test]
    fn test_initial_crack_beyond_critical_has_zero_life() {
        let mut input = test_input();
        input.max_stress_mpa = 500.0;
        input.initial_crack_m = 0.1;
        let result = calculate(&input).unwrap();
        assert_eq!(result.cycles_to_failure, 0.0);
        assert_eq!(result.steps, 0);
    }

    #[test]
    fn test_already_critical_substitution_is_a_statement() {
        let mut input = test_input();
        input.max_stress_mpa = 1000.0;
        input.fracture_toughness_mpa_sqrt_m = 0.5;
        let result = calculate(&input).unwrap();
        assert_eq!(result.critical_status, CriticalCrackStatus::AlreadyCritical);
        assert_eq!(result.cycles_to_failure, 0.0);
        assert!(result.subst_critical_crack.contains(r"a_{cr} \le a_{min}"));
        assert!(!result.subst_critical_crack.contains(r"\frac{1}{\pi}"));
    }

    #[test]
    fn test_initial_crack_outside_geometry() {
        let mut input = test_input();
        input.crack_type = CrackType::Edge;
        input.width_m = 0.01;
        input.initial_crack_m = 0.008;
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "INCONSISTENT");
    }

    #[test]
    fn test_stress_ratio_must_be_below_one() {
        let mut input = test_input();
        input.stress_ratio = 1.0;
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_uncertainty_bounds() {
        let mut input = test_input();
        input.stress_uncertainty_pct = Some(10.0);
        let result = calculate(&input).unwrap();
        let bounds = result.bounds.unwrap();
        assert!(bounds.conservative_cycles < result.cycles_to_failure);
        assert!(bounds.optimistic_cycles > result.cycles_to_failure);
    }

    #[test]
    fn test_crack_type_parsing() {
        assert_eq!("EDGE".parse::<CrackType>().unwrap(), CrackType::Edge);
        match "corner".parse::<CrackType>().unwrap_err() {
            CalcError::UnknownOption { expected, .. } => assert_eq!(expected, "center, edge, surface"),
            other => panic!("unexpected error {:?}", other),
        }
    }
}
