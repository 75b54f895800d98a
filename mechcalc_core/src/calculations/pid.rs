//! # PID Tuning from the Ultimate Cycle
//!
//! Controller gains from the ultimate gain K_u and ultimate period P_u found
//! by a closed-loop oscillation test.
//!
//! | Rule | Controller | K_p | T_i | T_d |
//! |------|------------|-----|-----|-----|
//! | Ziegler-Nichols | P | 0.5 K_u | - | - |
//! | Ziegler-Nichols | PI | 0.45 K_u | P_u/1.2 | - |
//! | Ziegler-Nichols | PD | 0.8 K_u | - | P_u/8 |
//! | Ziegler-Nichols | PID | 0.6 K_u | P_u/2 | P_u/8 |
//! | Tyreus-Luyben | PI | K_u/3.2 | 2.2 P_u | - |
//! | Tyreus-Luyben | PID | K_u/2.2 | 2.2 P_u | P_u/6.3 |
//! | Pessen integral | PID | 0.7 K_u | 0.4 P_u | 0.15 P_u |
//! | Some overshoot | PID | K_u/3 | P_u/2 | P_u/3 |
//! | No overshoot | PID | 0.2 K_u | P_u/2 | P_u/3 |
//!
//! Gains are for the parallel form `u = K_p e + K_i ∫e dt + K_d de/dt`
//! with `K_i = K_p/T_i` and `K_d = K_p T_d`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::parse_option;
use crate::errors::{require_positive, CalcError, CalcResult};
use crate::subst::{fmt_num, substitute};

/// Tuning rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TuningRule {
    #[default]
    ZieglerNichols,
    TyreusLuyben,
    PessenIntegral,
    SomeOvershoot,
    NoOvershoot,
}

impl TuningRule {
    pub const ALL: [TuningRule; 5] = [
        TuningRule::ZieglerNichols,
        TuningRule::TyreusLuyben,
        TuningRule::PessenIntegral,
        TuningRule::SomeOvershoot,
        TuningRule::NoOvershoot,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TuningRule::ZieglerNichols => "ziegler_nichols",
            TuningRule::TyreusLuyben => "tyreus_luyben",
            TuningRule::PessenIntegral => "pessen_integral",
            TuningRule::SomeOvershoot => "some_overshoot",
            TuningRule::NoOvershoot => "no_overshoot",
        }
    }

    /// Controller types this rule defines
    pub fn supported_controllers(&self) -> &'static [ControllerType] {
        match self {
            TuningRule::ZieglerNichols => &[
                ControllerType::P,
                ControllerType::Pi,
                ControllerType::Pd,
                ControllerType::Pid,
            ],
            TuningRule::TyreusLuyben => &[ControllerType::Pi, ControllerType::Pid],
            TuningRule::PessenIntegral | TuningRule::SomeOvershoot | TuningRule::NoOvershoot => {
                &[ControllerType::Pid]
            }
        }
    }
}

impl fmt::Display for TuningRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TuningRule {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_option("rule", s, &Self::ALL, Self::as_str)
    }
}

/// Controller structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ControllerType {
    P,
    Pi,
    Pd,
    #[default]
    Pid,
}

impl ControllerType {
    pub const ALL: [ControllerType; 4] = [
        ControllerType::P,
        ControllerType::Pi,
        ControllerType::Pd,
        ControllerType::Pid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ControllerType::P => "p",
            ControllerType::Pi => "pi",
            ControllerType::Pd => "pd",
            ControllerType::Pid => "pid",
        }
    }
}

impl fmt::Display for ControllerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ControllerType {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_option("controller", s, &Self::ALL, Self::as_str)
    }
}

/// Multiplier kept as a ratio so table values like 3/5 stay exact
#[derive(Debug, Clone, Copy)]
struct Ratio(f64, f64);

impl Ratio {
    fn of(&self, x: f64) -> f64 {
        x * self.0 / self.1
    }
}

/// Table row: K_p / K_u, T_i / P_u, T_d / P_u
#[derive(Debug, Clone, Copy)]
struct Coefficients {
    kp: Ratio,
    ti: Option<Ratio>,
    td: Option<Ratio>,
}

fn coefficients(rule: TuningRule, controller: ControllerType) -> Option<Coefficients> {
    use ControllerType::*;
    use TuningRule::*;

    let row = |kp: Ratio, ti: Option<Ratio>, td: Option<Ratio>| Some(Coefficients { kp, ti, td });
    match (rule, controller) {
        (ZieglerNichols, P) => row(Ratio(1.0, 2.0), None, None),
        (ZieglerNichols, Pi) => row(Ratio(9.0, 20.0), Some(Ratio(1.0, 1.2)), None),
        (ZieglerNichols, Pd) => row(Ratio(4.0, 5.0), None, Some(Ratio(1.0, 8.0))),
        (ZieglerNichols, Pid) => row(Ratio(3.0, 5.0), Some(Ratio(1.0, 2.0)), Some(Ratio(1.0, 8.0))),
        (TyreusLuyben, Pi) => row(Ratio(1.0, 3.2), Some(Ratio(2.2, 1.0)), None),
        (TyreusLuyben, Pid) => row(Ratio(1.0, 2.2), Some(Ratio(2.2, 1.0)), Some(Ratio(1.0, 6.3))),
        (PessenIntegral, Pid) => row(Ratio(7.0, 10.0), Some(Ratio(2.0, 5.0)), Some(Ratio(3.0, 20.0))),
        (SomeOvershoot, Pid) => row(Ratio(1.0, 3.0), Some(Ratio(1.0, 2.0)), Some(Ratio(1.0, 3.0))),
        (NoOvershoot, Pid) => row(Ratio(1.0, 5.0), Some(Ratio(1.0, 2.0)), Some(Ratio(1.0, 3.0))),
        _ => None,
    }
}

/// Input parameters for ultimate-cycle tuning.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Oven loop",
///   "ultimate_gain": 5.0,
///   "ultimate_period_s": 8.0,
///   "rule": "ziegler_nichols",
///   "controller": "pid"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PidInput {
    pub label: String,

    /// Ultimate gain K_u at sustained oscillation
    pub ultimate_gain: f64,

    /// Ultimate period P_u (s)
    pub ultimate_period_s: f64,

    #[serde(default)]
    pub rule: TuningRule,

    #[serde(default)]
    pub controller: ControllerType,
}

impl PidInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("ultimate_gain", self.ultimate_gain)?;
        require_positive("ultimate_period_s", self.ultimate_period_s)?;
        Ok(())
    }
}

/// Tuned controller gains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PidResult {
    /// Proportional gain K_p
    pub kp: f64,
    /// Integral time T_i (s), ∞ without integral action
    pub ti_s: f64,
    /// Derivative time T_d (s), 0 without derivative action
    pub td_s: f64,
    /// Integral gain K_i = K_p/T_i (1/s)
    pub ki: f64,
    /// Derivative gain K_d = K_p·T_d (s)
    pub kd: f64,
    pub subst_kp: String,
    pub subst_ki: String,
    pub subst_kd: String,
}

/// Calculate controller gains.
///
/// # Errors
///
/// * `InvalidInput` for non-positive K_u or P_u
/// * `UnknownOption` when the rule does not define the requested controller
pub fn calculate(input: &PidInput) -> CalcResult<PidResult> {
    input.validate()?;

    let row = coefficients(input.rule, input.controller).ok_or_else(|| {
        let expected: Vec<&str> = input
            .rule
            .supported_controllers()
            .iter()
            .map(|c| c.as_str())
            .collect();
        CalcError::unknown_option("controller", input.controller.as_str(), &expected)
    })?;

    let ku = input.ultimate_gain;
    let pu = input.ultimate_period_s;
    let kp = row.kp.of(ku);
    let ti = row.ti.map(|r| r.of(pu)).unwrap_or(f64::INFINITY);
    let td = row.td.map(|r| r.of(pu)).unwrap_or(0.0);
    let ki = if ti.is_finite() { kp / ti } else { 0.0 };
    let kd = kp * td;

    let subst_kp = substitute(
        "K_p",
        &format!(r"\frac{{{}}}{{{}}} K_u", fmt_num(row.kp.0), fmt_num(row.kp.1)),
        &format!(r"\frac{{{}}}{{{}}} \cdot {}", fmt_num(row.kp.0), fmt_num(row.kp.1), fmt_num(ku)),
        kp,
        "",
    );
    let subst_ki = if ti.is_finite() {
        substitute(
            "K_i",
            r"\frac{K_p}{T_i}",
            &format!(r"\frac{{{}}}{{{}}}", fmt_num(kp), fmt_num(ti)),
            ki,
            "1/s",
        )
    } else {
        "K_i = 0".to_string()
    };
    let subst_kd = if td > 0.0 {
        substitute(
            "K_d",
            r"K_p T_d",
            &format!(r"{} \cdot {}", fmt_num(kp), fmt_num(td)),
            kd,
            "s",
        )
    } else {
        "K_d = 0".to_string()
    };

    Ok(PidResult {
        kp,
        ti_s: ti,
        td_s: td,
        ki,
        kd,
        subst_kp,
        subst_ki,
        subst_kd,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(rule: TuningRule, controller: ControllerType) -> PidInput {
        PidInput {
            label: "Test".to_string(),
            ultimate_gain: 5.0,
            ultimate_period_s: 8.0,
            rule,
            controller,
        }
    }

    #[test]
    fn test_ziegler_nichols_pid_exact() {
        let result = calculate(&input(TuningRule::ZieglerNichols, ControllerType::Pid)).unwrap();
        assert_eq!(result.kp, 3.0);
        assert_eq!(result.ti_s, 4.0);
        assert_eq!(result.td_s, 1.0);
        assert_eq!(result.ki, 0.75);
        assert_eq!(result.kd, 3.0);
    }

    #[test]
    fn test_proportional_only() {
        let result = calculate(&input(TuningRule::ZieglerNichols, ControllerType::P)).unwrap();
        assert_eq!(result.kp, 2.5);
        assert!(result.ti_s.is_infinite());
        assert_eq!(result.ki, 0.0);
        assert_eq!(result.kd, 0.0);
        assert_eq!(result.subst_ki, "K_i = 0");
    }

    #[test]
    fn test_tyreus_luyben_is_less_aggressive() {
        let zn = calculate(&input(TuningRule::ZieglerNichols, ControllerType::Pi)).unwrap();
        let tl = calculate(&input(TuningRule::TyreusLuyben, ControllerType::Pi)).unwrap();
        assert!(tl.kp < zn.kp);
        assert!(tl.ti_s > zn.ti_s);
    }

    #[test]
    fn test_overshoot_rules_share_timing() {
        let some = calculate(&input(TuningRule::SomeOvershoot, ControllerType::Pid)).unwrap();
        let none = calculate(&input(TuningRule::NoOvershoot, ControllerType::Pid)).unwrap();
        assert_eq!(some.ti_s, none.ti_s);
        assert_eq!(some.td_s, none.td_s);
        assert!(none.kp < some.kp);
        assert_eq!(none.kp, 1.0);
    }

    #[test]
    fn test_unsupported_pair() {
        let err = calculate(&input(TuningRule::PessenIntegral, ControllerType::Pi)).unwrap_err();
        match err {
            CalcError::UnknownOption { field, expected, .. } => {
                assert_eq!(field, "controller");
                assert_eq!(expected, "pid");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_parse_spellings() {
        assert_eq!("Ziegler_Nichols".parse::<TuningRule>().unwrap(), TuningRule::ZieglerNichols);
        assert_eq!("PID".parse::<ControllerType>().unwrap(), ControllerType::Pid);
        assert!("cohen_coon".parse::<TuningRule>().is_err());
    }
}
