//! # Battery Runtime Calculation
//!
//! Estimates pack runtime for a constant-current, constant-power or
//! constant-resistance load with Peukert rate correction.
//!
//! ## Assumptions
//!
//! - Nominal pack voltage throughout the discharge
//! - Conversion efficiency η applies between the pack and the load
//! - Duty cycle scales the average current linearly
//! - Peukert exponent k = 1 is an ideal cell (runtime = C / I)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::parse_option;
use crate::errors::{require_fraction, require_non_negative, require_positive, CalcError, CalcResult};
use crate::subst::{fmt_num, substitute};

fn default_one() -> f64 {
    1.0
}

fn default_rated_hours() -> f64 {
    20.0
}

/// Electrical behaviour of the load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LoadType {
    #[default]
    ConstantCurrent,
    ConstantPower,
    ConstantResistance,
}

impl LoadType {
    pub const ALL: [LoadType; 3] = [
        LoadType::ConstantCurrent,
        LoadType::ConstantPower,
        LoadType::ConstantResistance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LoadType::ConstantCurrent => "constant_current",
            LoadType::ConstantPower => "constant_power",
            LoadType::ConstantResistance => "constant_resistance",
        }
    }
}

impl fmt::Display for LoadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoadType {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_option("load_type", s, &Self::ALL, Self::as_str)
    }
}

/// Input parameters for a battery runtime estimate.
///
/// Only the load field matching `load_type` is read.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Logger pack",
///   "pack_nominal_voltage_v": 12.0,
///   "pack_capacity_ah": 10.0,
///   "load_type": "constant_current",
///   "load_current_a": 2.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatteryInput {
    pub label: String,

    /// Nominal pack voltage (V)
    pub pack_nominal_voltage_v: f64,

    /// Rated pack capacity (Ah)
    pub pack_capacity_ah: f64,

    #[serde(default)]
    pub load_type: LoadType,

    /// Load current for `constant_current` (A)
    #[serde(default)]
    pub load_current_a: f64,

    /// Load power for `constant_power` (W)
    #[serde(default)]
    pub load_power_w: f64,

    /// Load resistance for `constant_resistance` (Ω)
    #[serde(default)]
    pub load_resistance_ohm: f64,

    /// Conversion efficiency η, (0, 1]
    #[serde(default = "default_one")]
    pub efficiency: f64,

    /// Fraction of time the load is on, (0, 1]
    #[serde(default = "default_one")]
    pub duty_cycle: f64,

    /// Peukert exponent k (≥ 1)
    #[serde(default = "default_one")]
    pub peukert: f64,

    /// Discharge time at which the capacity is rated (h)
    #[serde(default = "default_rated_hours")]
    pub rated_hours: f64,

    /// Usable fraction of the capacity, (0, 1]
    #[serde(default = "default_one")]
    pub depth_of_discharge: f64,

    /// Pack internal resistance (Ω)
    #[serde(default)]
    pub internal_resistance_ohm: f64,
}

impl BatteryInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("pack_nominal_voltage_v", self.pack_nominal_voltage_v)?;
        require_positive("pack_capacity_ah", self.pack_capacity_ah)?;
        match self.load_type {
            LoadType::ConstantCurrent => require_positive("load_current_a", self.load_current_a)?,
            LoadType::ConstantPower => require_positive("load_power_w", self.load_power_w)?,
            LoadType::ConstantResistance => {
                require_positive("load_resistance_ohm", self.load_resistance_ohm)?
            }
        }
        require_fraction("efficiency", self.efficiency)?;
        require_fraction("duty_cycle", self.duty_cycle)?;
        if !self.peukert.is_finite() || self.peukert < 1.0 {
            return Err(CalcError::invalid_input(
                "peukert",
                self.peukert.to_string(),
                "must be at least 1",
            ));
        }
        require_positive("rated_hours", self.rated_hours)?;
        require_fraction("depth_of_discharge", self.depth_of_discharge)?;
        require_non_negative("internal_resistance_ohm", self.internal_resistance_ohm)?;
        Ok(())
    }

    /// Usable capacity C·DoD (Ah)
    pub fn usable_capacity_ah(&self) -> f64 {
        self.pack_capacity_ah * self.depth_of_discharge
    }
}

/// Results from a battery runtime estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatteryResult {
    /// Pack current while the load is on (A)
    pub load_current_a: f64,

    /// Duty-cycle averaged pack current (A)
    pub average_current_a: f64,

    /// Pack terminal voltage under load (V)
    pub terminal_voltage_v: f64,

    /// Power drawn from the pack while on (W)
    pub pack_power_w: f64,

    /// Usable capacity (Ah)
    pub usable_capacity_ah: f64,

    /// Nominal stored energy at the usable capacity (Wh)
    pub usable_energy_wh: f64,

    /// Discharge rate as a multiple of capacity (1/h)
    pub c_rate: f64,

    /// Peukert-corrected runtime (h)
    pub runtime_hours: f64,

    pub runtime_minutes: f64,

    pub subst_current: String,
    pub subst_runtime: String,
}

/// Pack current drawn while the load is on, before duty cycle and efficiency.
///
/// Returns the current and its substituted equation.
fn load_current(input: &BatteryInput) -> CalcResult<(f64, String)> {
    let v = input.pack_nominal_voltage_v;
    let r = input.internal_resistance_ohm;
    let eta = input.efficiency;

    match input.load_type {
        LoadType::ConstantCurrent => {
            let i = input.load_current_a;
            Ok((i, format!("I = {}\\,\\text{{A}}", fmt_num(i))))
        }
        LoadType::ConstantResistance => {
            let i = v / (input.load_resistance_ohm + r);
            let subst = substitute(
                "I",
                r"\frac{V}{R_L + R_i}",
                &format!(
                    r"\frac{{{}}}{{{} + {}}}",
                    fmt_num(v),
                    fmt_num(input.load_resistance_ohm),
                    fmt_num(r)
                ),
                i,
                "A",
            );
            Ok((i, subst))
        }
        LoadType::ConstantPower => {
            let p = input.load_power_w / eta;
            if r == 0.0 {
                let i = p / v;
                let subst = substitute(
                    "I",
                    r"\frac{P}{\eta V}",
                    &format!(
                        r"\frac{{{}}}{{{} \cdot {}}}",
                        fmt_num(input.load_power_w),
                        fmt_num(eta),
                        fmt_num(v)
                    ),
                    i,
                    "A",
                );
                return Ok((i, subst));
            }
            // R I^2 - V I + P/η = 0, lower root is the stable operating point
            let discriminant = v * v - 4.0 * r * p;
            if discriminant < 0.0 {
                return Err(CalcError::infeasible(
                    "battery",
                    format!(
                        "load of {} W exceeds the {:.1} W the pack can deliver through {} ohm",
                        input.load_power_w,
                        v * v / (4.0 * r) * eta,
                        r
                    ),
                ));
            }
            let i = (v - discriminant.sqrt()) / (2.0 * r);
            let subst = substitute(
                "I",
                r"\frac{V - \sqrt{V^2 - 4 R_i P / \eta}}{2 R_i}",
                &format!(
                    r"\frac{{{} - \sqrt{{{}^2 - 4 \cdot {} \cdot {} / {}}}}}{{2 \cdot {}}}",
                    fmt_num(v),
                    fmt_num(v),
                    fmt_num(r),
                    fmt_num(input.load_power_w),
                    fmt_num(eta),
                    fmt_num(r)
                ),
                i,
                "A",
            );
            Ok((i, subst))
        }
    }
}

/// Calculate battery runtime.
///
/// # Errors
///
/// * `InvalidInput` for out-of-range parameters or a missing load value
/// * `Infeasible` when a constant-power load exceeds the pack's deliverable power
pub fn calculate(input: &BatteryInput) -> CalcResult<BatteryResult> {
    input.validate()?;

    let (current, subst_current) = load_current(input)?;
    let average_current = match input.load_type {
        LoadType::ConstantPower => current * input.duty_cycle,
        _ => current * input.duty_cycle / input.efficiency,
    };
    let capacity = input.usable_capacity_ah();
    let h = input.rated_hours;
    let k = input.peukert;

    let (runtime_hours, subst_runtime) = if k == 1.0 {
        let t = capacity / average_current;
        let subst = substitute(
            "t",
            r"\frac{C_{use}}{I_{avg}}",
            &format!(r"\frac{{{}}}{{{}}}", fmt_num(capacity), fmt_num(average_current)),
            t,
            "h",
        );
        (t, subst)
    } else {
        let t = h * (capacity / (average_current * h)).powf(k);
        let subst = substitute(
            "t",
            r"H\left(\frac{C_{use}}{I_{avg} H}\right)^k",
            &format!(
                r"{}\left(\frac{{{}}}{{{} \cdot {}}}\right)^{{{}}}",
                fmt_num(h),
                fmt_num(capacity),
                fmt_num(average_current),
                fmt_num(h),
                fmt_num(k)
            ),
            t,
            "h",
        );
        (t, subst)
    };

    let terminal_voltage = input.pack_nominal_voltage_v - current * input.internal_resistance_ohm;

    Ok(BatteryResult {
        load_current_a: current,
        average_current_a: average_current,
        terminal_voltage_v: terminal_voltage,
        pack_power_w: terminal_voltage * current,
        usable_capacity_ah: capacity,
        usable_energy_wh: capacity * input.pack_nominal_voltage_v,
        c_rate: current / input.pack_capacity_ah,
        runtime_hours,
        runtime_minutes: runtime_hours * 60.0,
        subst_current,
        subst_runtime,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_input() -> BatteryInput {
        BatteryInput {
            label: "Test".to_string(),
            pack_nominal_voltage_v: 12.0,
            pack_capacity_ah: 10.0,
            load_type: LoadType::ConstantCurrent,
            load_current_a: 2.0,
            load_power_w: 0.0,
            load_resistance_ohm: 0.0,
            efficiency: 1.0,
            duty_cycle: 1.0,
            peukert: 1.0,
            rated_hours: 20.0,
            depth_of_discharge: 1.0,
            internal_resistance_ohm: 0.0,
        }
    }

    #[test]
    fn test_constant_current_runtime_exact() {
        let result = calculate(&test_input()).unwrap();
        assert_eq!(result.runtime_hours, 5.0);
        assert_eq!(result.runtime_minutes, 300.0);
        assert_eq!(result.c_rate, 0.2);
        assert!(result.subst_runtime.ends_with(r"5\,\text{h}"));
    }

    #[test]
    fn test_duty_cycle_extends_runtime() {
        let mut input = test_input();
        input.duty_cycle = 0.5;
        assert_eq!(calculate(&input).unwrap().runtime_hours, 10.0);
    }

    #[test]
    fn test_peukert_at_rated_current_is_rated_time() {
        let mut input = test_input();
        input.load_current_a = 0.5;
        input.peukert = 1.25;
        let result = calculate(&input).unwrap();
        assert!((result.runtime_hours - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_peukert_penalizes_high_current() {
        let mut input = test_input();
        input.load_current_a = 5.0;
        let ideal = calculate(&input).unwrap().runtime_hours;
        input.peukert = 1.2;
        let corrected = calculate(&input).unwrap().runtime_hours;
        assert!(corrected < ideal);
    }

    #[test]
    fn test_constant_power_without_internal_resistance() {
        let mut input = test_input();
        input.load_type = LoadType::ConstantPower;
        input.load_power_w = 24.0;
        let result = calculate(&input).unwrap();
        assert_eq!(result.load_current_a, 2.0);
        assert_eq!(result.runtime_hours, 5.0);
    }

    #[test]
    fn test_constant_power_quadratic() {
        let mut input = test_input();
        input.load_type = LoadType::ConstantPower;
        input.load_power_w = 24.0;
        input.internal_resistance_ohm = 0.1;
        let result = calculate(&input).unwrap();
        // Current rises above P/V to cover the I²R loss
        assert!(result.load_current_a > 2.0);
        let delivered = result.terminal_voltage_v * result.load_current_a;
        assert!((delivered - 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_constant_power_infeasible() {
        let mut input = test_input();
        input.load_type = LoadType::ConstantPower;
        input.load_power_w = 100.0;
        input.internal_resistance_ohm = 1.0;
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INFEASIBLE");
    }

    #[test]
    fn test_constant_resistance() {
        let mut input = test_input();
        input.load_type = LoadType::ConstantResistance;
        input.load_resistance_ohm = 6.0;
        let result = calculate(&input).unwrap();
        assert_eq!(result.load_current_a, 2.0);
        assert_eq!(result.runtime_hours, 5.0);
    }

    #[test]
    fn test_missing_load_value() {
        let mut input = test_input();
        input.load_type = LoadType::ConstantPower;
        match calculate(&input).unwrap_err() {
            CalcError::InvalidInput { field, .. } => assert_eq!(field, "load_power_w"),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_json_defaults() {
        let input: BatteryInput = serde_json::from_str(
            r#"{"label":"J","pack_nominal_voltage_v":12,"pack_capacity_ah":10,
                "load_type":"constant_current","load_current_a":2}"#,
        )
        .unwrap();
        assert_eq!(input.rated_hours, 20.0);
        assert_eq!(input.peukert, 1.0);
        assert_eq!(calculate(&input).unwrap().runtime_hours, 5.0);
    }
}
