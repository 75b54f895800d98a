//! # Reliability Block Diagrams
//!
//! System reliability of blocks with constant failure rates (exponential
//! life) arranged in series or in active-redundant parallel.
//!
//! ## Series
//!
//! ```text
//! λ_s = Σ λ_i,  MTBF_s = 1/λ_s,  R_s(t) = e^(-λ_s t)
//! ```
//!
//! ## Parallel
//!
//! ```text
//! R_s(t) = 1 - Π (1 - e^(-λ_i t))
//! MTBF_s = Σ over non-empty subsets S of (-1)^(|S|+1) / Σ_{i∈S} λ_i
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::parse_option;
use crate::errors::{require_positive, CalcError, CalcResult};
use crate::subst::{fmt_num, substitute};

/// Subset enumeration is 2^n; keep it bounded.
pub const MAX_PARALLEL_BLOCKS: usize = 16;

/// Block arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Configuration {
    #[default]
    Series,
    Parallel,
}

impl Configuration {
    pub const ALL: [Configuration; 2] = [Configuration::Series, Configuration::Parallel];

    pub fn as_str(&self) -> &'static str {
        match self {
            Configuration::Series => "series",
            Configuration::Parallel => "parallel",
        }
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Configuration {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_option("configuration", s, &Self::ALL, Self::as_str)
    }
}

/// Input parameters for a block diagram.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Redundant pumps",
///   "names": ["Pump A", "Pump B"],
///   "mtbf_hours": [8000.0, 8000.0],
///   "configuration": "parallel",
///   "mission_hours": 1000.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityInput {
    pub label: String,
    /// Block names, same length as `mtbf_hours`
    pub names: Vec<String>,
    /// Block MTBF (h)
    pub mtbf_hours: Vec<f64>,
    #[serde(default)]
    pub configuration: Configuration,
    /// Mission time t (h)
    pub mission_hours: f64,
}

impl ReliabilityInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.names.len() != self.mtbf_hours.len() {
            return Err(CalcError::inconsistent(
                "names, mtbf_hours",
                format!(
                    "{} names but {} MTBF values",
                    self.names.len(),
                    self.mtbf_hours.len()
                ),
            ));
        }
        if self.mtbf_hours.is_empty() {
            return Err(CalcError::invalid_input("mtbf_hours", "[]", "at least one block is required"));
        }
        if self.configuration == Configuration::Parallel && self.mtbf_hours.len() > MAX_PARALLEL_BLOCKS {
            return Err(CalcError::invalid_input(
                "mtbf_hours",
                self.mtbf_hours.len().to_string(),
                format!("at most {} parallel blocks", MAX_PARALLEL_BLOCKS),
            ));
        }
        for mtbf in &self.mtbf_hours {
            require_positive("mtbf_hours", *mtbf)?;
        }
        require_positive("mission_hours", self.mission_hours)?;
        Ok(())
    }
}

/// Per-block figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockResult {
    pub name: String,
    pub mtbf_hours: f64,
    /// λ = 1/MTBF (1/h)
    pub failure_rate_per_hour: f64,
    /// R(t) = e^(-λt)
    pub reliability: f64,
}

/// Results for a block diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityResult {
    pub configuration: Configuration,
    pub blocks: Vec<BlockResult>,
    /// Σλ, only meaningful for series
    pub system_failure_rate_per_hour: Option<f64>,
    pub system_mtbf_hours: f64,
    pub system_reliability: f64,
    /// 1 - R
    pub system_unreliability: f64,
    pub subst_reliability: String,
    pub subst_mtbf: String,
}

/// MTBF of active-redundant blocks by inclusion-exclusion.
pub fn parallel_mtbf(failure_rates: &[f64]) -> f64 {
    let n = failure_rates.len();
    let mut mtbf = 0.0;
    for mask in 1u32..(1u32 << n) {
        let rate: f64 = failure_rates
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, l)| l)
            .sum();
        let sign = if mask.count_ones() % 2 == 1 { 1.0 } else { -1.0 };
        mtbf += sign / rate;
    }
    mtbf
}

/// Calculate system reliability.
pub fn calculate(input: &ReliabilityInput) -> CalcResult<ReliabilityResult> {
    input.validate()?;
    let t = input.mission_hours;

    let blocks: Vec<BlockResult> = input
        .names
        .iter()
        .zip(&input.mtbf_hours)
        .map(|(name, &mtbf)| {
            let rate = 1.0 / mtbf;
            BlockResult {
                name: name.clone(),
                mtbf_hours: mtbf,
                failure_rate_per_hour: rate,
                reliability: (-rate * t).exp(),
            }
        })
        .collect();
    let rates: Vec<f64> = blocks.iter().map(|b| b.failure_rate_per_hour).collect();

    let (system_rate, mtbf, reliability, subst_reliability, subst_mtbf) = match input.configuration {
        Configuration::Series => {
            let rate: f64 = rates.iter().sum();
            let reliability = (-rate * t).exp();
            (
                Some(rate),
                1.0 / rate,
                reliability,
                substitute(
                    "R_s",
                    r"e^{-\lambda_s t}",
                    &format!(r"e^{{-{} \cdot {}}}", fmt_num(rate), fmt_num(t)),
                    reliability,
                    "",
                ),
                substitute(
                    "MTBF_s",
                    r"\frac{1}{\lambda_s}",
                    &format!(r"\frac{{1}}{{{}}}", fmt_num(rate)),
                    1.0 / rate,
                    "h",
                ),
            )
        }
        Configuration::Parallel => {
            let unreliability: f64 = blocks.iter().map(|b| 1.0 - b.reliability).product();
            let reliability = 1.0 - unreliability;
            let mtbf = parallel_mtbf(&rates);
            let factors: Vec<String> = blocks
                .iter()
                .map(|b| format!("(1 - {})", fmt_num(b.reliability)))
                .collect();
            (
                None,
                mtbf,
                reliability,
                substitute(
                    "R_s",
                    r"1 - \prod_i (1 - R_i)",
                    &format!("1 - {}", factors.join(r" \cdot ")),
                    reliability,
                    "",
                ),
                substitute(
                    "MTBF_s",
                    r"\sum_{S} \frac{(-1)^{|S|+1}}{\lambda_S}",
                    &format!(r"\text{{{} subsets}}", (1u32 << rates.len()) - 1),
                    mtbf,
                    "h",
                ),
            )
        }
    };

    Ok(ReliabilityResult {
        configuration: input.configuration,
        blocks,
        system_failure_rate_per_hour: system_rate,
        system_mtbf_hours: mtbf,
        system_reliability: reliability,
        system_unreliability: 1.0 - reliability,
        subst_reliability,
        subst_mtbf,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol * b.abs().max(1.0)
    }

    fn input(mtbf: Vec<f64>, configuration: Configuration) -> ReliabilityInput {
        ReliabilityInput {
            label: "Test".to_string(),
            names: (0..mtbf.len()).map(|i| format!("B{}", i)).collect(),
            mtbf_hours: mtbf,
            configuration,
            mission_hours: 1000.0,
        }
    }

    #[test]
    fn test_series_two_blocks() {
        let result = calculate(&input(vec![2000.0, 2000.0], Configuration::Series)).unwrap();
        assert!(approx_eq(result.system_mtbf_hours, 1000.0, 1e-12));
        assert!(approx_eq(result.system_failure_rate_per_hour.unwrap(), 1e-3, 1e-12));
        assert!(approx_eq(result.system_reliability, (-1.0f64).exp(), 1e-12));
    }

    #[test]
    fn test_parallel_identical_blocks() {
        let result = calculate(&input(vec![1000.0, 1000.0], Configuration::Parallel)).unwrap();
        // 1/λ + 1/λ - 1/(2λ)
        assert!(approx_eq(result.system_mtbf_hours, 1500.0, 1e-12));
        let r = (-1.0f64).exp();
        assert!(approx_eq(result.system_reliability, 1.0 - (1.0 - r).powi(2), 1e-12));
        assert!(result.system_failure_rate_per_hour.is_none());
    }

    #[test]
    fn test_parallel_three_identical_blocks() {
        // (1 + 1/2 + 1/3) / λ
        assert!(approx_eq(parallel_mtbf(&[1.0, 1.0, 1.0]), 11.0 / 6.0, 1e-12));
    }

    #[test]
    fn test_single_block_same_either_way() {
        let series = calculate(&input(vec![500.0], Configuration::Series)).unwrap();
        let parallel = calculate(&input(vec![500.0], Configuration::Parallel)).unwrap();
        assert!(approx_eq(series.system_mtbf_hours, parallel.system_mtbf_hours, 1e-12));
        assert!(approx_eq(series.system_reliability, parallel.system_reliability, 1e-12));
    }

    #[test]
    fn test_length_mismatch_is_inconsistent() {
        let mut bad = input(vec![1000.0, 2000.0], Configuration::Series);
        bad.names.pop();
        let err = calculate(&bad).unwrap_err();
        assert_eq!(err.error_code(), "INCONSISTENT");
    }

    #[test]
    fn test_parallel_block_limit() {
        assert!(calculate(&input(vec![1000.0; 17], Configuration::Parallel)).is_err());
        assert!(calculate(&input(vec![1000.0; 17], Configuration::Series)).is_ok());
    }

    #[test]
    fn test_configuration_from_str() {
        assert_eq!(" Parallel ".parse::<Configuration>().unwrap(), Configuration::Parallel);
        assert!("mixed".parse::<Configuration>().is_err());
    }
}
