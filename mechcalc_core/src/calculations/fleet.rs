//! # 3D-Printer Fleet Breakeven (Monte Carlo)
//!
//! Simulates independent years of operating an in-house printer fleet against
//! outsourcing the same parts. Each trial draws annual demand (normal) and
//! per-printer uptime (beta), applies random downtime and operator events,
//! and records the savings relative to outsourcing everything.
//!
//! ## Planning-Tool Semantics
//!
//! Distribution parameters that fall outside their valid range are clamped,
//! not rejected; every adjustment is reported in `adjustments`. Only
//! non-positive counts, costs and hours are hard errors.
//!
//! ## Determinism
//!
//! The master generator is `StdRng` seeded from `seed`. Every trial draws its
//! own sub-seed from the master, so the event log of any trial can be
//! regenerated exactly.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Beta, Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::errors::{require_non_negative, require_positive, CalcError, CalcResult};
use crate::subst::{fmt_num, substitute};

pub const DEFAULT_TRIALS: u32 = 500;
pub const DEFAULT_SEED: u64 = 42;
pub const MAX_TRIALS: u32 = 100_000;

const UPTIME_MEAN_MIN: f64 = 0.01;
const UPTIME_MEAN_MAX: f64 = 0.99;
/// Fraction of the Bernoulli bound √(μ(1-μ)) allowed for the uptime std
const UPTIME_STD_FRACTION: f64 = 0.99;
/// Rejection attempts for the truncated-normal uptime fallback
const TRUNCATED_NORMAL_ATTEMPTS: u32 = 100;
const HOURS_PER_YEAR: f64 = 8760.0;

// ============================================================================
// Input
// ============================================================================

/// Input parameters for the fleet breakeven simulation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Bracket production",
///   "printer_count": 4,
///   "printer_cost": 12000.0,
///   "annual_demand_mean": 2500.0,
///   "annual_demand_std": 400.0,
///   "print_hours_per_part": 3.5,
///   "available_hours_per_year": 4000.0,
///   "uptime_mean": 0.85,
///   "uptime_std": 0.05,
///   "downtime_probability": 0.2,
///   "downtime_hours": 120.0,
///   "operator_issue_probability": 0.1,
///   "operator_issue_hours": 40.0,
///   "material_cost_per_part": 4.0,
///   "operating_cost_per_hour": 1.5,
///   "outsource_cost_per_part": 18.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetInput {
    pub label: String,

    /// Number of printers in the fleet
    pub printer_count: u32,

    /// Capital cost per printer ($)
    pub printer_cost: f64,

    /// Mean annual part demand
    pub annual_demand_mean: f64,

    /// Standard deviation of annual demand (clamped to ≥ 0)
    pub annual_demand_std: f64,

    /// Machine hours per part
    pub print_hours_per_part: f64,

    /// Scheduled hours per printer per year
    pub available_hours_per_year: f64,

    /// Mean uptime fraction (clamped to [0.01, 0.99])
    pub uptime_mean: f64,

    /// Uptime standard deviation (clamped to [0, 0.99·√(μ(1-μ))])
    pub uptime_std: f64,

    /// Per-printer annual probability of a downtime event (clamped to [0, 1])
    pub downtime_probability: f64,

    /// Hours lost per downtime event
    pub downtime_hours: f64,

    /// Per-printer annual probability of an operator issue (clamped to [0, 1])
    pub operator_issue_probability: f64,

    /// Hours lost per operator issue
    pub operator_issue_hours: f64,

    /// Material cost per printed part ($)
    pub material_cost_per_part: f64,

    /// Energy and labor per machine hour ($/h)
    pub operating_cost_per_hour: f64,

    /// Vendor price per part ($)
    pub outsource_cost_per_part: f64,

    /// Number of simulated years (clamped to [1, 100000])
    #[serde(default)]
    pub trials: Option<u32>,

    /// Generator seed
    #[serde(default)]
    pub seed: Option<u64>,
}

impl FleetInput {
    /// Validate the hard limits. Distribution parameters are clamped later.
    pub fn validate(&self) -> CalcResult<()> {
        if self.printer_count == 0 {
            return Err(CalcError::invalid_input("printer_count", "0", "must be at least 1"));
        }
        require_positive("printer_cost", self.printer_cost)?;
        require_positive("annual_demand_mean", self.annual_demand_mean)?;
        require_positive("print_hours_per_part", self.print_hours_per_part)?;
        require_positive("available_hours_per_year", self.available_hours_per_year)?;
        if self.available_hours_per_year > HOURS_PER_YEAR {
            return Err(CalcError::invalid_input(
                "available_hours_per_year",
                self.available_hours_per_year.to_string(),
                "cannot exceed 8760 hours",
            ));
        }
        require_non_negative("downtime_hours", self.downtime_hours)?;
        require_non_negative("operator_issue_hours", self.operator_issue_hours)?;
        require_non_negative("material_cost_per_part", self.material_cost_per_part)?;
        require_non_negative("operating_cost_per_hour", self.operating_cost_per_hour)?;
        require_positive("outsource_cost_per_part", self.outsource_cost_per_part)?;
        for (field, value) in [
            ("annual_demand_std", self.annual_demand_std),
            ("uptime_mean", self.uptime_mean),
            ("uptime_std", self.uptime_std),
            ("downtime_probability", self.downtime_probability),
            ("operator_issue_probability", self.operator_issue_probability),
        ] {
            if !value.is_finite() {
                return Err(CalcError::invalid_input(field, value.to_string(), "must be finite"));
            }
        }
        Ok(())
    }

    /// Total capital cost of the fleet ($)
    pub fn capital_cost(&self) -> f64 {
        self.printer_count as f64 * self.printer_cost
    }
}

// ============================================================================
// Clamped Parameters
// ============================================================================

/// Distribution parameters after clamping.
#[derive(Debug, Clone, PartialEq)]
struct Parameters {
    demand_std: f64,
    uptime_mean: f64,
    uptime_std: f64,
    downtime_probability: f64,
    operator_issue_probability: f64,
    trials: u32,
}

fn clamp_reported(field: &str, value: f64, lo: f64, hi: f64, adjustments: &mut Vec<String>) -> f64 {
    let clamped = value.clamp(lo, hi);
    if clamped != value {
        log::warn!("fleet: {} clamped from {} to {}", field, value, clamped);
        adjustments.push(format!("{} clamped from {} to {}", field, value, clamped));
    }
    clamped
}

impl Parameters {
    fn from_input(input: &FleetInput, adjustments: &mut Vec<String>) -> Self {
        let demand_std = clamp_reported("annual_demand_std", input.annual_demand_std, 0.0, f64::MAX, adjustments);
        let uptime_mean = clamp_reported("uptime_mean", input.uptime_mean, UPTIME_MEAN_MIN, UPTIME_MEAN_MAX, adjustments);
        let std_max = UPTIME_STD_FRACTION * (uptime_mean * (1.0 - uptime_mean)).sqrt();
        let uptime_std = clamp_reported("uptime_std", input.uptime_std, 0.0, std_max, adjustments);
        let downtime_probability =
            clamp_reported("downtime_probability", input.downtime_probability, 0.0, 1.0, adjustments);
        let operator_issue_probability = clamp_reported(
            "operator_issue_probability",
            input.operator_issue_probability,
            0.0,
            1.0,
            adjustments,
        );

        let requested = input.trials.unwrap_or(DEFAULT_TRIALS);
        let trials = requested.clamp(1, MAX_TRIALS);
        if trials != requested {
            log::warn!("fleet: trials clamped from {} to {}", requested, trials);
            adjustments.push(format!("trials clamped from {} to {}", requested, trials));
        }

        Self {
            demand_std,
            uptime_mean,
            uptime_std,
            downtime_probability,
            operator_issue_probability,
            trials,
        }
    }
}

/// Per-printer uptime distribution
enum UptimeModel {
    Constant(f64),
    Beta(Beta<f64>),
    TruncatedNormal(Normal<f64>),
}

impl UptimeModel {
    /// Beta by the method of moments, truncated normal when the beta cannot be formed
    fn new(mean: f64, std: f64) -> Self {
        if std == 0.0 {
            return UptimeModel::Constant(mean);
        }
        let k = mean * (1.0 - mean) / (std * std) - 1.0;
        let alpha = mean * k;
        let beta = (1.0 - mean) * k;
        match Beta::new(alpha, beta) {
            Ok(dist) => UptimeModel::Beta(dist),
            Err(e) => {
                log::warn!("fleet: beta({}, {}) unavailable ({}), using truncated normal", alpha, beta, e);
                match Normal::new(mean, std) {
                    Ok(dist) => UptimeModel::TruncatedNormal(dist),
                    Err(_) => UptimeModel::Constant(mean),
                }
            }
        }
    }

    fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        match self {
            UptimeModel::Constant(mean) => *mean,
            UptimeModel::Beta(dist) => dist.sample(rng),
            UptimeModel::TruncatedNormal(dist) => {
                for _ in 0..TRUNCATED_NORMAL_ATTEMPTS {
                    let x = dist.sample(rng);
                    if (0.0..=1.0).contains(&x) {
                        return x;
                    }
                }
                dist.mean().clamp(0.0, 1.0)
            }
        }
    }
}

// ============================================================================
// Result
// ============================================================================

/// Kind of random event in a trial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FleetEventKind {
    Downtime,
    OperatorIssue,
}

/// One event that removed hours from a printer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FleetEvent {
    /// Printer index (0-based)
    pub printer: u32,
    pub kind: FleetEventKind,
    pub hours_lost: f64,
}

/// 10th, 50th and 90th percentiles of a trial statistic
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Percentiles {
    pub p10: f64,
    pub p50: f64,
    pub p90: f64,
}

/// Trial closest to one savings percentile, with its event log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepresentativeTrial {
    /// Percentile it represents (10, 50 or 90)
    pub percentile: u8,
    /// Trial index (0-based)
    pub trial: u32,
    pub demand: f64,
    pub parts_printed: f64,
    pub parts_outsourced: f64,
    pub savings: f64,
    pub events: Vec<FleetEvent>,
}

/// Results of the fleet simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetResult {
    /// Seed actually used
    pub seed: u64,
    /// Trials actually run
    pub trials: u32,
    /// Fleet capital cost ($)
    pub capital_cost: f64,
    /// Annual savings vs. outsourcing everything ($)
    pub savings: Percentiles,
    pub mean_savings: f64,
    /// Fraction of trials with positive savings
    pub probability_positive_savings: f64,
    pub parts_printed: Percentiles,
    /// Printed hours over scheduled hours
    pub utilization: Percentiles,
    /// Capital / savings (∞ when savings ≤ 0)
    pub payback_years: Percentiles,
    pub representative_trials: Vec<RepresentativeTrial>,
    /// Parameters that were clamped
    pub adjustments: Vec<String>,
    pub subst_payback: String,
}

// ============================================================================
// Simulation
// ============================================================================

struct TrialOutcome {
    demand: f64,
    parts_printed: f64,
    savings: f64,
    utilization: f64,
    events: Vec<FleetEvent>,
}

fn simulate_trial<R: Rng>(
    input: &FleetInput,
    params: &Parameters,
    demand_dist: &Normal<f64>,
    uptime: &UptimeModel,
    rng: &mut R,
) -> TrialOutcome {
    let demand = demand_dist.sample(rng).max(0.0).round();
    let mut events = Vec::new();
    let mut capacity_hours = 0.0;

    for printer in 0..input.printer_count {
        let mut hours = input.available_hours_per_year * uptime.sample(rng);
        if rng.gen_bool(params.downtime_probability) {
            hours -= input.downtime_hours;
            events.push(FleetEvent {
                printer,
                kind: FleetEventKind::Downtime,
                hours_lost: input.downtime_hours,
            });
        }
        if rng.gen_bool(params.operator_issue_probability) {
            hours -= input.operator_issue_hours;
            events.push(FleetEvent {
                printer,
                kind: FleetEventKind::OperatorIssue,
                hours_lost: input.operator_issue_hours,
            });
        }
        capacity_hours += hours.max(0.0);
    }

    let capacity_parts = (capacity_hours / input.print_hours_per_part).floor();
    let parts_printed = demand.min(capacity_parts);
    let in_house_cost = parts_printed
        * (input.material_cost_per_part + input.print_hours_per_part * input.operating_cost_per_hour);
    let savings = parts_printed * input.outsource_cost_per_part - in_house_cost;
    let scheduled = input.printer_count as f64 * input.available_hours_per_year;

    TrialOutcome {
        demand,
        parts_printed,
        savings,
        utilization: parts_printed * input.print_hours_per_part / scheduled,
        events,
    }
}

/// Linear-interpolated percentile of sorted data (`p` in 0..=100)
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let rank = (p / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let (a, b) = (sorted[lo], sorted[hi]);
    if lo == hi || a == b {
        a
    } else {
        a + (b - a) * (rank - lo as f64)
    }
}

fn percentiles(values: &[f64]) -> Percentiles {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    Percentiles {
        p10: percentile(&sorted, 10.0),
        p50: percentile(&sorted, 50.0),
        p90: percentile(&sorted, 90.0),
    }
}

fn payback_years(capital: f64, savings: f64) -> f64 {
    if savings > 0.0 {
        capital / savings
    } else {
        f64::INFINITY
    }
}

/// Run the fleet breakeven simulation.
///
/// # Errors
///
/// * `InvalidInput` for non-positive counts, costs or hours
pub fn calculate(input: &FleetInput) -> CalcResult<FleetResult> {
    input.validate()?;

    let mut adjustments = Vec::new();
    let params = Parameters::from_input(input, &mut adjustments);
    let seed = input.seed.unwrap_or(DEFAULT_SEED);
    let demand_dist = Normal::new(input.annual_demand_mean, params.demand_std).map_err(|e| {
        CalcError::invalid_input("annual_demand_std", params.demand_std.to_string(), e.to_string())
    })?;
    let uptime = UptimeModel::new(params.uptime_mean, params.uptime_std);
    let capital = input.capital_cost();

    log::debug!("fleet '{}': {} trials, seed {}", input.label, params.trials, seed);

    let mut master = StdRng::seed_from_u64(seed);
    let n = params.trials as usize;
    let mut trial_seeds = Vec::with_capacity(n);
    let mut savings = Vec::with_capacity(n);
    let mut parts = Vec::with_capacity(n);
    let mut utilization = Vec::with_capacity(n);
    let mut payback = Vec::with_capacity(n);

    for _ in 0..n {
        let trial_seed: u64 = master.gen();
        let mut rng = StdRng::seed_from_u64(trial_seed);
        let outcome = simulate_trial(input, &params, &demand_dist, &uptime, &mut rng);
        trial_seeds.push(trial_seed);
        savings.push(outcome.savings);
        parts.push(outcome.parts_printed);
        utilization.push(outcome.utilization);
        payback.push(payback_years(capital, outcome.savings));
    }

    let savings_pct = percentiles(&savings);
    let mean_savings = savings.iter().sum::<f64>() / n as f64;
    let positive = savings.iter().filter(|s| **s > 0.0).count();

    let representative_trials = [(10u8, savings_pct.p10), (50, savings_pct.p50), (90, savings_pct.p90)]
        .iter()
        .filter_map(|&(pct, target)| {
            let index = savings
                .iter()
                .enumerate()
                .min_by(|a, b| (a.1 - target).abs().total_cmp(&(b.1 - target).abs()))
                .map(|(i, _)| i)?;
            let mut rng = StdRng::seed_from_u64(trial_seeds[index]);
            let outcome = simulate_trial(input, &params, &demand_dist, &uptime, &mut rng);
            Some(RepresentativeTrial {
                percentile: pct,
                trial: index as u32,
                demand: outcome.demand,
                parts_printed: outcome.parts_printed,
                parts_outsourced: outcome.demand - outcome.parts_printed,
                savings: outcome.savings,
                events: outcome.events,
            })
        })
        .collect();

    let median_payback = payback_years(capital, savings_pct.p50);
    let subst_payback = substitute(
        "t_{pb}",
        r"\frac{n\,C_{printer}}{S_{50}}",
        &format!(
            r"\frac{{{} \cdot {}}}{{{}}}",
            input.printer_count,
            fmt_num(input.printer_cost),
            fmt_num(savings_pct.p50)
        ),
        median_payback,
        "yr",
    );

    log::debug!(
        "fleet '{}': median savings {:.2}, P(savings > 0) = {:.3}",
        input.label,
        savings_pct.p50,
        positive as f64 / n as f64
    );

    Ok(FleetResult {
        seed,
        trials: params.trials,
        capital_cost: capital,
        savings: savings_pct,
        mean_savings,
        probability_positive_savings: positive as f64 / n as f64,
        parts_printed: percentiles(&parts),
        utilization: percentiles(&utilization),
        payback_years: percentiles(&payback),
        representative_trials,
        adjustments,
        subst_payback,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_input() -> FleetInput {
        FleetInput {
            label: "Test".to_string(),
            printer_count: 4,
            printer_cost: 12_000.0,
            annual_demand_mean: 2500.0,
            annual_demand_std: 400.0,
            print_hours_per_part: 3.5,
            available_hours_per_year: 4000.0,
            uptime_mean: 0.85,
            uptime_std: 0.05,
            downtime_probability: 0.2,
            downtime_hours: 120.0,
            operator_issue_probability: 0.1,
            operator_issue_hours: 40.0,
            material_cost_per_part: 4.0,
            operating_cost_per_hour: 1.5,
            outsource_cost_per_part: 18.0,
            trials: Some(200),
            seed: Some(7),
        }
    }

    #[test]
    fn test_truncated_normal_uptime_stays_in_unit_interval() {
        let model = UptimeModel::TruncatedNormal(Normal::new(0.95, 0.3).unwrap());
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..2000 {
            let x = model.sample(&mut rng);
            assert!((0.0..=1.0).contains(&x), "uptime {} outside [0, 1]", x);
        }
    }

    #[test]
    fn test_truncated_normal_falls_back_to_clamped_mean() {
        let model = UptimeModel::TruncatedNormal(Normal::new(5.0, 0.01).unwrap());
        let mut rng = StdRng::seed_from_u64(11);
        assert_eq!(model.sample(&mut rng), 1.0);

        let model = UptimeModel::TruncatedNormal(Normal::new(-5.0, 0.01).unwrap());
        assert_eq!(model.sample(&mut rng), 0.0);
    }

    #[test]
    fn test_uptime_model_selection() {
        assert!(matches!(UptimeModel::new(0.85, 0.0), UptimeModel::Constant(m) if m == 0.85));
        assert!(matches!(UptimeModel::new(0.85, 0.05), UptimeModel::Beta(_)));
        // std above the Bernoulli bound gives a non-positive beta shape
        assert!(matches!(UptimeModel::new(0.5, 0.6), UptimeModel::TruncatedNormal(_)));
    }

    /// No randomness left: zero spreads and zero event probabilities
    fn deterministic_input() -> FleetInput {
        FleetInput {
            label: "Deterministic".to_string(),
            printer_count: 2,
            printer_cost: 9000.0,
            annual_demand_mean: 150.0,
            annual_demand_std: 0.0,
            print_hours_per_part: 10.0,
            available_hours_per_year: 2000.0,
            uptime_mean: 0.5,
            uptime_std: 0.0,
            downtime_probability: 0.0,
            downtime_hours: 100.0,
            operator_issue_probability: 0.0,
            operator_issue_hours: 10.0,
            material_cost_per_part: 20.0,
            operating_cost_per_hour: 2.0,
            outsource_cost_per_part: 100.0,
            trials: Some(50),
            seed: None,
        }
    }

    #[test]
    fn test_deterministic_fleet() {
        let result = calculate(&deterministic_input()).unwrap();
        // Capacity 2 × 2000 × 0.5 / 10 = 200 parts, demand 150
        assert_eq!(result.parts_printed.p50, 150.0);
        // 150 × (100 - 20 - 10 × 2) = 9000
        assert_eq!(result.savings.p10, 9000.0);
        assert_eq!(result.savings.p90, 9000.0);
        assert_eq!(result.mean_savings, 9000.0);
        assert_eq!(result.payback_years.p50, 2.0);
        assert_eq!(result.utilization.p50, 0.375);
        assert_eq!(result.probability_positive_savings, 1.0);
        assert_eq!(result.seed, DEFAULT_SEED);
        assert!(result.adjustments.is_empty());
    }

    #[test]
    fn test_capacity_limits_parts() {
        let mut input = deterministic_input();
        input.annual_demand_mean = 1000.0;
        let result = calculate(&input).unwrap();
        assert_eq!(result.parts_printed.p50, 200.0);
        let trial = &result.representative_trials[1];
        assert_eq!(trial.parts_outsourced, 800.0);
    }

    #[test]
    fn test_same_seed_same_result() {
        let a = serde_json::to_string(&calculate(&test_input()).unwrap()).unwrap();
        let b = serde_json::to_string(&calculate(&test_input()).unwrap()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seed_changes_result() {
        let mut other = test_input();
        other.seed = Some(8);
        let a = calculate(&test_input()).unwrap();
        let b = calculate(&other).unwrap();
        assert_ne!(a.mean_savings, b.mean_savings);
    }

    #[test]
    fn test_percentiles_ordered() {
        let result = calculate(&test_input()).unwrap();
        assert!(result.savings.p10 <= result.savings.p50);
        assert!(result.savings.p50 <= result.savings.p90);
        assert!(result.utilization.p90 <= 1.0);
        assert_eq!(result.representative_trials.len(), 3);
        assert_eq!(result.representative_trials[0].percentile, 10);
    }

    #[test]
    fn test_out_of_range_parameters_are_clamped() {
        let mut input = test_input();
        input.uptime_mean = 1.4;
        input.uptime_std = 0.8;
        input.downtime_probability = 1.7;
        input.annual_demand_std = -5.0;
        input.trials = Some(0);
        let result = calculate(&input).unwrap();
        assert_eq!(result.trials, 1);
        assert_eq!(result.adjustments.len(), 5);
        assert!(result.adjustments[1].starts_with("uptime_mean"));
        // Every printer hits a downtime event
        let events = &result.representative_trials[0].events;
        let downtime = events.iter().filter(|e| e.kind == FleetEventKind::Downtime).count();
        assert_eq!(downtime, 4);
    }

    #[test]
    fn test_unprofitable_fleet_has_infinite_payback() {
        let mut input = deterministic_input();
        input.outsource_cost_per_part = 30.0;
        let result = calculate(&input).unwrap();
        assert!(result.savings.p50 < 0.0);
        assert!(result.payback_years.p50.is_infinite());
        assert!(result.subst_payback.contains(r"\infty"));
        assert_eq!(result.probability_positive_savings, 0.0);
    }

    #[test]
    fn test_hard_validation() {
        let mut input = test_input();
        input.printer_count = 0;
        assert!(calculate(&input).is_err());
        let mut input = test_input();
        input.print_hours_per_part = 0.0;
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_percentile_interpolation() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(percentile(&data, 50.0), 3.0);
        assert!((percentile(&data, 10.0) - 1.4).abs() < 1e-12);
        assert_eq!(percentile(&[f64::INFINITY, f64::INFINITY], 50.0), f64::INFINITY);
    }

    #[test]
    fn test_uptime_beta_stays_in_unit_interval() {
        let model = UptimeModel::new(0.9, 0.2);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            let x = model.sample(&mut rng);
            assert!((0.0..=1.0).contains(&x));
        }
    }
}
