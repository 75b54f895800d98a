//! # Engineering Calculations
//!
//! Every calculator follows the same pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable), with a `label`
//! - `*Result` - Calculation results (JSON-serializable), with `subst_*`
//!   LaTeX substitution strings
//! - `calculate(input) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`fatigue`] - Stress-life fatigue with mean-stress correction
//! - [`crack_growth`] - Paris-law crack growth and critical crack size
//! - [`fleet`] - 3D-printer fleet breakeven Monte Carlo
//! - [`battery`] - Battery pack runtime
//! - [`pressure_vessel`] - ASME VIII-1 shell thickness and MAWP
//! - [`pid`] - Ultimate-cycle PID tuning
//! - [`fits`] - ISO 286 limits and fits
//! - [`fastener`] - Bolt preload and tightening torque
//! - [`vibration`] - Single-DOF isolation
//! - [`acoustics`] - Vortex shedding tones and level summation
//! - [`reliability`] - Series/parallel block diagrams
//! - [`ashby`] - Material performance indices
//!
//! [`CalculationItem`] wraps every input so a worksheet can hold a mix of
//! calculations, and [`CalculatorKind::info`] describes each calculator for
//! form generators and the CLI.

pub mod acoustics;
pub mod ashby;
pub mod battery;
pub mod crack_growth;
pub mod fastener;
pub mod fatigue;
pub mod fits;
pub mod fleet;
pub mod pid;
pub mod pressure_vessel;
pub mod reliability;
pub mod vibration;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::equations::{Equation, Variable};
use crate::errors::{CalcError, CalcResult};
use crate::worksheet::WorksheetSettings;

// Re-export commonly used types
pub use acoustics::{SplSumInput, SplSumResult, VortexSheddingInput, VortexSheddingResult};
pub use ashby::{AshbyInput, AshbyResult, Objective};
pub use battery::{BatteryInput, BatteryResult, LoadType};
pub use crack_growth::{CrackGrowthInput, CrackGrowthResult, CrackType};
pub use fastener::{FastenerInput, FastenerResult};
pub use fatigue::{FatigueInput, FatigueResult, MeanStressCorrection};
pub use fits::{FitInput, FitResult, FitType};
pub use fleet::{FleetInput, FleetResult};
pub use pid::{ControllerType, PidInput, PidResult, TuningRule};
pub use pressure_vessel::{PressureVesselInput, PressureVesselResult, ShellShape};
pub use reliability::{Configuration, ReliabilityInput, ReliabilityResult};
pub use vibration::{VibrationInput, VibrationResult};

/// Match `text` against the spellings of an option enum.
///
/// Matching is case-insensitive and ignores surrounding whitespace. On
/// failure the error lists every accepted spelling.
pub(crate) fn parse_option<T: Copy>(
    field: &str,
    text: &str,
    all: &[T],
    name: fn(&T) -> &'static str,
) -> CalcResult<T> {
    let wanted = text.trim().to_lowercase();
    all.iter()
        .find(|option| name(option) == wanted)
        .copied()
        .ok_or_else(|| {
            let expected: Vec<&str> = all.iter().map(name).collect();
            CalcError::unknown_option(field, text, &expected)
        })
}

fn to_json<T: Serialize>(result: &T) -> CalcResult<Value> {
    serde_json::to_value(result).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })
}

/// Enum wrapper for all calculation types.
///
/// This allows storing heterogeneous calculations in a single collection
/// while maintaining type safety and clean serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    Fatigue(FatigueInput),
    CrackGrowth(CrackGrowthInput),
    Fleet(FleetInput),
    Battery(BatteryInput),
    PressureVessel(PressureVesselInput),
    Pid(PidInput),
    Fit(FitInput),
    Fastener(FastenerInput),
    Vibration(VibrationInput),
    VortexShedding(VortexSheddingInput),
    SplSum(SplSumInput),
    Reliability(ReliabilityInput),
    Ashby(AshbyInput),
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::Fatigue(i) => &i.label,
            CalculationItem::CrackGrowth(i) => &i.label,
            CalculationItem::Fleet(i) => &i.label,
            CalculationItem::Battery(i) => &i.label,
            CalculationItem::PressureVessel(i) => &i.label,
            CalculationItem::Pid(i) => &i.label,
            CalculationItem::Fit(i) => &i.label,
            CalculationItem::Fastener(i) => &i.label,
            CalculationItem::Vibration(i) => &i.label,
            CalculationItem::VortexShedding(i) => &i.label,
            CalculationItem::SplSum(i) => &i.label,
            CalculationItem::Reliability(i) => &i.label,
            CalculationItem::Ashby(i) => &i.label,
        }
    }

    /// Calculator this item runs
    pub fn kind(&self) -> CalculatorKind {
        match self {
            CalculationItem::Fatigue(_) => CalculatorKind::Fatigue,
            CalculationItem::CrackGrowth(_) => CalculatorKind::CrackGrowth,
            CalculationItem::Fleet(_) => CalculatorKind::Fleet,
            CalculationItem::Battery(_) => CalculatorKind::Battery,
            CalculationItem::PressureVessel(_) => CalculatorKind::PressureVessel,
            CalculationItem::Pid(_) => CalculatorKind::Pid,
            CalculationItem::Fit(_) => CalculatorKind::Fit,
            CalculationItem::Fastener(_) => CalculatorKind::Fastener,
            CalculationItem::Vibration(_) => CalculatorKind::Vibration,
            CalculationItem::VortexShedding(_) => CalculatorKind::VortexShedding,
            CalculationItem::SplSum(_) => CalculatorKind::SplSum,
            CalculationItem::Reliability(_) => CalculatorKind::Reliability,
            CalculationItem::Ashby(_) => CalculatorKind::Ashby,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::Fatigue(_) => "Fatigue",
            CalculationItem::CrackGrowth(_) => "CrackGrowth",
            CalculationItem::Fleet(_) => "Fleet",
            CalculationItem::Battery(_) => "Battery",
            CalculationItem::PressureVessel(_) => "PressureVessel",
            CalculationItem::Pid(_) => "Pid",
            CalculationItem::Fit(_) => "Fit",
            CalculationItem::Fastener(_) => "Fastener",
            CalculationItem::Vibration(_) => "Vibration",
            CalculationItem::VortexShedding(_) => "VortexShedding",
            CalculationItem::SplSum(_) => "SplSum",
            CalculationItem::Reliability(_) => "Reliability",
            CalculationItem::Ashby(_) => "Ashby",
        }
    }

    /// Run the calculation and return its result as JSON.
    ///
    /// Optional inputs left unset (Monte Carlo seed and trial count, stress
    /// uncertainty) are filled from `settings`. Acoustics calculators report
    /// failures as `{"error": "<message>"}` instead of an `Err`.
    pub fn evaluate(&self, settings: &WorksheetSettings) -> CalcResult<Value> {
        log::debug!("Evaluating {} '{}'", self.calc_type(), self.label());
        match self {
            CalculationItem::Fatigue(input) => {
                let mut input = input.clone();
                input.stress_uncertainty_pct =
                    input.stress_uncertainty_pct.or(Some(settings.stress_uncertainty_pct));
                to_json(&fatigue::calculate(&input)?)
            }
            CalculationItem::CrackGrowth(input) => {
                let mut input = input.clone();
                input.stress_uncertainty_pct =
                    input.stress_uncertainty_pct.or(Some(settings.stress_uncertainty_pct));
                to_json(&crack_growth::calculate(&input)?)
            }
            CalculationItem::Fleet(input) => {
                let mut input = input.clone();
                input.seed = input.seed.or(Some(settings.default_seed));
                input.trials = input.trials.or(Some(settings.default_trials));
                to_json(&fleet::calculate(&input)?)
            }
            CalculationItem::Battery(input) => to_json(&battery::calculate(input)?),
            CalculationItem::PressureVessel(input) => to_json(&pressure_vessel::calculate(input)?),
            CalculationItem::Pid(input) => to_json(&pid::calculate(input)?),
            CalculationItem::Fit(input) => to_json(&fits::calculate(input)?),
            CalculationItem::Fastener(input) => to_json(&fastener::calculate(input)?),
            CalculationItem::Vibration(input) => to_json(&vibration::calculate(input)?),
            CalculationItem::VortexShedding(input) => match acoustics::vortex_shedding(input) {
                Ok(result) => to_json(&result),
                Err(e) => Ok(error_sentinel(&e)),
            },
            CalculationItem::SplSum(input) => match acoustics::spl_sum(input) {
                Ok(result) => to_json(&result),
                Err(e) => Ok(error_sentinel(&e)),
            },
            CalculationItem::Reliability(input) => to_json(&reliability::calculate(input)?),
            CalculationItem::Ashby(input) => to_json(&ashby::calculate(input)?),
        }
    }
}

fn error_sentinel(error: &CalcError) -> Value {
    log::debug!("Reporting error as result: {}", error);
    serde_json::json!({ "error": error.to_string() })
}

/// How a calculator reports bad input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorConvention {
    /// Returns `Err(CalcError)`
    Error,
    /// Returns `{"error": "<message>"}` as its result
    Sentinel,
}

/// Calculator identifiers, one per [`CalculationItem`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculatorKind {
    Fatigue,
    CrackGrowth,
    Fleet,
    Battery,
    PressureVessel,
    Pid,
    Fit,
    Fastener,
    Vibration,
    VortexShedding,
    SplSum,
    Reliability,
    Ashby,
}

/// Self-description of a calculator.
#[derive(Debug, Clone, Serialize)]
pub struct CalculatorInfo {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// Input fields (symbol is the JSON field name)
    pub parameters: Vec<Variable>,
    /// Principal result fields
    pub returns: Vec<Variable>,
    pub equations: Vec<Equation>,
    pub error_convention: ErrorConvention,
}

const LABEL: Variable = Variable::new("label", "User label for the calculation", "-");

impl CalculatorKind {
    pub const ALL: [CalculatorKind; 13] = [
        CalculatorKind::Fatigue,
        CalculatorKind::CrackGrowth,
        CalculatorKind::Fleet,
        CalculatorKind::Battery,
        CalculatorKind::PressureVessel,
        CalculatorKind::Pid,
        CalculatorKind::Fit,
        CalculatorKind::Fastener,
        CalculatorKind::Vibration,
        CalculatorKind::VortexShedding,
        CalculatorKind::SplSum,
        CalculatorKind::Reliability,
        CalculatorKind::Ashby,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CalculatorKind::Fatigue => "fatigue",
            CalculatorKind::CrackGrowth => "crack_growth",
            CalculatorKind::Fleet => "fleet",
            CalculatorKind::Battery => "battery",
            CalculatorKind::PressureVessel => "pressure_vessel",
            CalculatorKind::Pid => "pid",
            CalculatorKind::Fit => "fit",
            CalculatorKind::Fastener => "fastener",
            CalculatorKind::Vibration => "vibration",
            CalculatorKind::VortexShedding => "vortex_shedding",
            CalculatorKind::SplSum => "spl_sum",
            CalculatorKind::Reliability => "reliability",
            CalculatorKind::Ashby => "ashby",
        }
    }

    /// Parse a JSON input record for this calculator into a [`CalculationItem`].
    pub fn parse_input(&self, json: &str) -> CalcResult<CalculationItem> {
        fn parse<T: serde::de::DeserializeOwned>(json: &str) -> CalcResult<T> {
            serde_json::from_str(json).map_err(|e| CalcError::SerializationError {
                reason: e.to_string(),
            })
        }

        Ok(match self {
            CalculatorKind::Fatigue => CalculationItem::Fatigue(parse(json)?),
            CalculatorKind::CrackGrowth => CalculationItem::CrackGrowth(parse(json)?),
            CalculatorKind::Fleet => CalculationItem::Fleet(parse(json)?),
            CalculatorKind::Battery => CalculationItem::Battery(parse(json)?),
            CalculatorKind::PressureVessel => CalculationItem::PressureVessel(parse(json)?),
            CalculatorKind::Pid => CalculationItem::Pid(parse(json)?),
            CalculatorKind::Fit => CalculationItem::Fit(parse(json)?),
            CalculatorKind::Fastener => CalculationItem::Fastener(parse(json)?),
            CalculatorKind::Vibration => CalculationItem::Vibration(parse(json)?),
            CalculatorKind::VortexShedding => CalculationItem::VortexShedding(parse(json)?),
            CalculatorKind::SplSum => CalculationItem::SplSum(parse(json)?),
            CalculatorKind::Reliability => CalculationItem::Reliability(parse(json)?),
            CalculatorKind::Ashby => CalculationItem::Ashby(parse(json)?),
        })
    }

    /// Describe the calculator's inputs, outputs and equations.
    pub fn info(&self) -> CalculatorInfo {
        let name = self.as_str();
        let error = ErrorConvention::Error;
        match self {
            CalculatorKind::Fatigue => CalculatorInfo {
                name,
                title: "Stress-Life Fatigue",
                description: "Mean-stress corrected equivalent stress, Basquin life and safety factor at design life",
                parameters: vec![
                    LABEL,
                    Variable::new("max_stress_mpa", "Peak stress of the cycle", "MPa"),
                    Variable::new("min_stress_mpa", "Valley stress of the cycle", "MPa"),
                    Variable::new("ultimate_strength_mpa", "Ultimate tensile strength", "MPa"),
                    Variable::new("yield_strength_mpa", "Yield strength", "MPa"),
                    Variable::new("fatigue_strength_coefficient_mpa", "Fatigue strength coefficient", "MPa"),
                    Variable::new("fatigue_strength_exponent", "Basquin exponent (negative)", "-"),
                    Variable::new("endurance_limit_mpa", "Endurance limit (optional)", "MPa"),
                    Variable::new("mean_stress_correction", "none | goodman | soderberg | gerber", "-"),
                    Variable::new("design_life_cycles", "Design life (default 1e6)", "cycles"),
                    Variable::new("stress_uncertainty_pct", "Stress uncertainty for bounds (optional)", "%"),
                ],
                returns: vec![
                    Variable::new("equivalent_stress_mpa", "Fully-reversed equivalent stress", "MPa"),
                    Variable::new("cycles_to_failure", "Predicted life, null for infinite", "cycles"),
                    Variable::new("safety_factor", "Fatigue strength over equivalent stress", "-"),
                    Variable::new("sn_curve", "S-N curve points", "-"),
                ],
                equations: vec![
                    Equation::CycleDecomposition,
                    Equation::GoodmanCorrection,
                    Equation::SoderbergCorrection,
                    Equation::GerberCorrection,
                    Equation::BasquinRelation,
                    Equation::FatigueSafetyFactor,
                ],
                error_convention: error,
            },
            CalculatorKind::CrackGrowth => CalculatorInfo {
                name,
                title: "Fatigue Crack Growth",
                description: "Critical crack size by bisection and Paris-law life from the initial crack",
                parameters: vec![
                    LABEL,
                    Variable::new("max_stress_mpa", "Peak remote stress", "MPa"),
                    Variable::new("stress_ratio", "R = min/max stress (default 0)", "-"),
                    Variable::new("initial_crack_m", "Initial crack size", "m"),
                    Variable::new("width_m", "Plate width", "m"),
                    Variable::new("crack_type", "center | edge | surface", "-"),
                    Variable::new("geometry_factor", "Constant Y override (optional)", "-"),
                    Variable::new("fracture_toughness_mpa_sqrt_m", "Plane-strain fracture toughness", "MPa m^0.5"),
                    Variable::new("paris_c", "Paris coefficient", "m/cycle"),
                    Variable::new("paris_m", "Paris exponent", "-"),
                    Variable::new("max_steps", "Integration step budget (optional)", "-"),
                    Variable::new("stress_uncertainty_pct", "Stress uncertainty for bounds (optional)", "%"),
                ],
                returns: vec![
                    Variable::new("critical_crack_m", "Critical crack size", "m"),
                    Variable::new("cycles_to_failure", "Cycles to grow to critical, null if never critical", "cycles"),
                    Variable::new("curve", "Crack size vs cycles", "-"),
                ],
                equations: vec![
                    Equation::StressIntensityFactor,
                    Equation::CenterCrackGeometry,
                    Equation::EdgeCrackGeometry,
                    Equation::ParisLaw,
                    Equation::CriticalCrackSize,
                ],
                error_convention: error,
            },
            CalculatorKind::Fleet => CalculatorInfo {
                name,
                title: "Printer Fleet Breakeven",
                description: "Monte Carlo of annual savings and payback of an in-house printer fleet against outsourcing",
                parameters: vec![
                    LABEL,
                    Variable::new("printer_count", "Number of printers", "-"),
                    Variable::new("printer_cost", "Capital cost per printer", "$"),
                    Variable::new("annual_demand_mean", "Mean annual demand", "parts"),
                    Variable::new("annual_demand_std", "Demand standard deviation", "parts"),
                    Variable::new("print_hours_per_part", "Machine hours per part", "h"),
                    Variable::new("available_hours_per_year", "Scheduled hours per printer", "h"),
                    Variable::new("uptime_mean", "Mean uptime fraction", "-"),
                    Variable::new("uptime_std", "Uptime standard deviation", "-"),
                    Variable::new("downtime_probability", "Annual downtime event probability", "-"),
                    Variable::new("downtime_hours", "Hours lost per downtime event", "h"),
                    Variable::new("operator_issue_probability", "Annual operator issue probability", "-"),
                    Variable::new("operator_issue_hours", "Hours lost per operator issue", "h"),
                    Variable::new("material_cost_per_part", "Material cost per part", "$"),
                    Variable::new("operating_cost_per_hour", "Operating cost per machine hour", "$/h"),
                    Variable::new("outsource_cost_per_part", "Vendor price per part", "$"),
                    Variable::new("trials", "Simulated years (optional)", "-"),
                    Variable::new("seed", "Generator seed (optional)", "-"),
                ],
                returns: vec![
                    Variable::new("savings", "P10/P50/P90 annual savings", "$"),
                    Variable::new("payback_years", "P10/P50/P90 payback", "yr"),
                    Variable::new("probability_positive_savings", "Share of trials with savings > 0", "-"),
                    Variable::new("representative_trials", "Event logs near P10/P50/P90", "-"),
                ],
                equations: vec![Equation::PaybackPeriod],
                error_convention: error,
            },
            CalculatorKind::Battery => CalculatorInfo {
                name,
                title: "Battery Runtime",
                description: "Runtime of a battery pack under constant current, power or resistance load",
                parameters: vec![
                    LABEL,
                    Variable::new("pack_nominal_voltage_v", "Nominal pack voltage", "V"),
                    Variable::new("pack_capacity_ah", "Rated capacity", "Ah"),
                    Variable::new("load_type", "constant_current | constant_power | constant_resistance", "-"),
                    Variable::new("load_current_a", "Load current", "A"),
                    Variable::new("load_power_w", "Load power", "W"),
                    Variable::new("load_resistance_ohm", "Load resistance", "ohm"),
                    Variable::new("efficiency", "Conversion efficiency", "-"),
                    Variable::new("duty_cycle", "Load on-time fraction", "-"),
                    Variable::new("peukert", "Peukert exponent (default 1)", "-"),
                    Variable::new("rated_hours", "Capacity rating time (default 20)", "h"),
                    Variable::new("depth_of_discharge", "Usable capacity fraction (default 1)", "-"),
                    Variable::new("internal_resistance_ohm", "Pack internal resistance (default 0)", "ohm"),
                ],
                returns: vec![
                    Variable::new("average_current_a", "Average battery current", "A"),
                    Variable::new("runtime_hours", "Runtime", "h"),
                    Variable::new("usable_energy_wh", "Usable energy", "Wh"),
                ],
                equations: vec![Equation::PeukertRuntime, Equation::ConstantPowerCurrent],
                error_convention: error,
            },
            CalculatorKind::PressureVessel => CalculatorInfo {
                name,
                title: "Pressure Vessel Shell",
                description: "ASME VIII-1 UG-27 required thickness and MAWP of a cylindrical or spherical shell",
                parameters: vec![
                    LABEL,
                    Variable::new("shape", "cylinder | sphere", "-"),
                    Variable::new("pressure_mpa", "Internal design pressure", "MPa"),
                    Variable::new("inside_diameter_mm", "Inside diameter", "mm"),
                    Variable::new("allowable_stress_mpa", "Maximum allowable stress", "MPa"),
                    Variable::new("joint_efficiency", "Weld joint efficiency", "-"),
                    Variable::new("corrosion_allowance_mm", "Corrosion allowance", "mm"),
                    Variable::new("nominal_thickness_mm", "Nominal thickness for MAWP (optional)", "mm"),
                ],
                returns: vec![
                    Variable::new("required_thickness_mm", "Required thickness including corrosion", "mm"),
                    Variable::new("mawp_mpa", "Maximum allowable working pressure", "MPa"),
                    Variable::new("thin_shell_valid", "Pressure within the UG-27 limit", "-"),
                ],
                equations: vec![
                    Equation::CylinderCircumferentialThickness,
                    Equation::CylinderLongitudinalThickness,
                    Equation::SphereThickness,
                ],
                error_convention: error,
            },
            CalculatorKind::Pid => CalculatorInfo {
                name,
                title: "PID Tuning",
                description: "Controller gains from the ultimate gain and period",
                parameters: vec![
                    LABEL,
                    Variable::new("ultimate_gain", "Ultimate gain", "-"),
                    Variable::new("ultimate_period_s", "Ultimate period", "s"),
                    Variable::new(
                        "rule",
                        "ziegler_nichols | tyreus_luyben | pessen_integral | some_overshoot | no_overshoot",
                        "-",
                    ),
                    Variable::new("controller", "p | pi | pd | pid", "-"),
                ],
                returns: vec![
                    Variable::new("kp", "Proportional gain", "-"),
                    Variable::new("ti_s", "Integral time, null if none", "s"),
                    Variable::new("td_s", "Derivative time", "s"),
                    Variable::new("ki", "Integral gain", "1/s"),
                    Variable::new("kd", "Derivative gain", "s"),
                ],
                equations: vec![Equation::UltimateCycleTuning],
                error_convention: error,
            },
            CalculatorKind::Fit => CalculatorInfo {
                name,
                title: "ISO 286 Fit",
                description: "Limit deviations, clearances and fit type of a hole/shaft pair",
                parameters: vec![
                    LABEL,
                    Variable::new("nominal_diameter_mm", "Nominal diameter", "mm"),
                    Variable::new("hole", "Hole tolerance class, e.g. H7", "-"),
                    Variable::new("shaft", "Shaft tolerance class, e.g. g6", "-"),
                ],
                returns: vec![
                    Variable::new("max_clearance_um", "Maximum clearance", "um"),
                    Variable::new("min_clearance_um", "Minimum clearance (negative is interference)", "um"),
                    Variable::new("fit_type", "clearance | transition | interference", "-"),
                ],
                equations: vec![Equation::FitClearance],
                error_convention: error,
            },
            CalculatorKind::Fastener => CalculatorInfo {
                name,
                title: "Bolt Tightening Torque",
                description: "Preload and tightening torque of a metric bolt by the nut factor method",
                parameters: vec![
                    LABEL,
                    Variable::new("nominal_diameter_mm", "Nominal diameter", "mm"),
                    Variable::new("pitch_mm", "Thread pitch", "mm"),
                    Variable::new("proof_strength_mpa", "Proof strength", "MPa"),
                    Variable::new("percent_proof", "Preload as percent of proof load", "%"),
                    Variable::new("nut_factor", "Nut factor K", "-"),
                ],
                returns: vec![
                    Variable::new("preload_n", "Preload", "N"),
                    Variable::new("torque_nm", "Tightening torque", "N m"),
                ],
                equations: vec![
                    Equation::TensileStressArea,
                    Equation::BoltPreload,
                    Equation::NutFactorTorque,
                ],
                error_convention: error,
            },
            CalculatorKind::Vibration => CalculatorInfo {
                name,
                title: "Vibration Isolation",
                description: "Natural frequency and transmissibility of a damped spring mount",
                parameters: vec![
                    LABEL,
                    Variable::new("mass_kg", "Supported mass", "kg"),
                    Variable::new("stiffness_n_per_m", "Mount stiffness", "N/m"),
                    Variable::new("damping_ratio", "Damping ratio (default 0)", "-"),
                    Variable::new("excitation_frequency_hz", "Forcing frequency", "Hz"),
                ],
                returns: vec![
                    Variable::new("natural_frequency_hz", "Undamped natural frequency", "Hz"),
                    Variable::new("transmissibility", "Force transmissibility", "-"),
                    Variable::new("isolation_efficiency_pct", "Force reduction", "%"),
                ],
                equations: vec![Equation::NaturalFrequency, Equation::Transmissibility],
                error_convention: error,
            },
            CalculatorKind::VortexShedding => CalculatorInfo {
                name,
                title: "Vortex Shedding",
                description: "Aeolian tone frequencies behind a cylinder in cross flow",
                parameters: vec![
                    LABEL,
                    Variable::new("flow_velocity_m_s", "Free-stream velocity", "m/s"),
                    Variable::new("diameter_m", "Cylinder diameter", "m"),
                    Variable::new("strouhal_numbers", "Comma separated Strouhal numbers (default 0.2)", "-"),
                    Variable::new("kinematic_viscosity_m2_s", "Kinematic viscosity", "m^2/s"),
                    Variable::new("sound_speed_m_s", "Speed of sound", "m/s"),
                ],
                returns: vec![
                    Variable::new("reynolds_number", "Reynolds number", "-"),
                    Variable::new("tones", "Frequency and wavelength per Strouhal number", "-"),
                ],
                equations: vec![Equation::VortexShedding],
                error_convention: ErrorConvention::Sentinel,
            },
            CalculatorKind::SplSum => CalculatorInfo {
                name,
                title: "Sound Level Sum",
                description: "Total level of uncorrelated sources",
                parameters: vec![
                    LABEL,
                    Variable::new("levels_db", "Comma separated source levels", "dB"),
                ],
                returns: vec![Variable::new("total_db", "Combined level", "dB")],
                equations: vec![Equation::DecibelSum],
                error_convention: ErrorConvention::Sentinel,
            },
            CalculatorKind::Reliability => CalculatorInfo {
                name,
                title: "Reliability Block Diagram",
                description: "System MTBF and mission reliability of series or parallel blocks",
                parameters: vec![
                    LABEL,
                    Variable::new("names", "Block names", "-"),
                    Variable::new("mtbf_hours", "Block MTBF values", "h"),
                    Variable::new("configuration", "series | parallel", "-"),
                    Variable::new("mission_hours", "Mission time", "h"),
                ],
                returns: vec![
                    Variable::new("system_mtbf_hours", "System MTBF", "h"),
                    Variable::new("system_reliability", "Probability of surviving the mission", "-"),
                    Variable::new("blocks", "Per-block failure rate and reliability", "-"),
                ],
                equations: vec![Equation::SeriesFailureRate, Equation::ParallelReliability],
                error_convention: error,
            },
            CalculatorKind::Ashby => CalculatorInfo {
                name,
                title: "Ashby Performance Index",
                description: "Minimum-mass material index for a structural objective",
                parameters: vec![
                    LABEL,
                    Variable::new("youngs_modulus_gpa", "Young's modulus", "GPa"),
                    Variable::new("strength_mpa", "Failure strength", "MPa"),
                    Variable::new("density_kg_m3", "Density", "kg/m^3"),
                    Variable::new(
                        "objective",
                        "tie_stiffness | beam_stiffness | panel_stiffness | tie_strength | beam_strength | panel_strength",
                        "-",
                    ),
                ],
                returns: vec![
                    Variable::new("index", "Performance index, larger is better", "-"),
                    Variable::new("all_indices", "Index for every objective", "-"),
                ],
                equations: vec![Equation::AshbyIndex],
                error_convention: error,
            },
        }
    }
}

impl fmt::Display for CalculatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalculatorKind {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_option("calculator", s, &Self::ALL, Self::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::ALL_EQUATIONS;

    fn pid_item() -> CalculationItem {
        CalculationItem::Pid(PidInput {
            label: "Loop 1".to_string(),
            ultimate_gain: 5.0,
            ultimate_period_s: 8.0,
            rule: TuningRule::ZieglerNichols,
            controller: ControllerType::Pid,
        })
    }

    #[test]
    fn test_parse_option_lists_spellings() {
        let err = "corner".parse::<CrackType>().unwrap_err();
        match err {
            CalcError::UnknownOption { field, expected, .. } => {
                assert_eq!(field, "crack_type");
                assert_eq!(expected, "center, edge, surface");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_item_serialization_tagged() {
        let json = serde_json::to_string(&pid_item()).unwrap();
        assert!(json.contains("\"type\":\"Pid\""));
        assert!(json.contains("\"rule\":\"ziegler_nichols\""));
        let back: CalculationItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pid_item());
        assert_eq!(back.label(), "Loop 1");
        assert_eq!(back.kind(), CalculatorKind::Pid);
    }

    #[test]
    fn test_evaluate_returns_json() {
        let value = pid_item().evaluate(&WorksheetSettings::default()).unwrap();
        assert_eq!(value["kp"].as_f64(), Some(3.0));
        assert_eq!(value["ki"].as_f64(), Some(0.75));
    }

    #[test]
    fn test_evaluate_propagates_errors() {
        let item = CalculationItem::Ashby(AshbyInput {
            label: "Bad".to_string(),
            youngs_modulus_gpa: -1.0,
            strength_mpa: 100.0,
            density_kg_m3: 1000.0,
            objective: Objective::TieStiffness,
        });
        assert!(item.evaluate(&WorksheetSettings::default()).is_err());
    }

    #[test]
    fn test_acoustics_error_sentinel() {
        let item = CalculationItem::SplSum(SplSumInput {
            label: "Bad".to_string(),
            levels_db: "80, loud".to_string(),
        });
        let value = item.evaluate(&WorksheetSettings::default()).unwrap();
        let message = value["error"].as_str().unwrap();
        assert!(message.contains("levels_db"));
    }

    #[test]
    fn test_kind_round_trip_names() {
        for kind in CalculatorKind::ALL {
            assert_eq!(kind.as_str().parse::<CalculatorKind>().unwrap(), kind);
            assert_eq!(kind.info().name, kind.as_str());
        }
        assert_eq!(" Crack_Growth ".parse::<CalculatorKind>().unwrap(), CalculatorKind::CrackGrowth);
        assert!("beam".parse::<CalculatorKind>().is_err());
    }

    #[test]
    fn test_every_equation_used_by_a_calculator() {
        let used: Vec<Equation> = CalculatorKind::ALL
            .iter()
            .flat_map(|k| k.info().equations)
            .collect();
        for eq in ALL_EQUATIONS.iter() {
            assert!(used.contains(eq), "{:?} not referenced", eq);
        }
    }

    #[test]
    fn test_info_parameters_start_with_label() {
        for kind in CalculatorKind::ALL {
            let info = kind.info();
            assert_eq!(info.parameters[0].symbol, "label");
            assert!(!info.returns.is_empty());
        }
    }

    #[test]
    fn test_parse_input() {
        let item = CalculatorKind::SplSum
            .parse_input(r#"{"label": "Room", "levels_db": "70, 70"}"#)
            .unwrap();
        assert_eq!(item.calc_type(), "SplSum");
        assert!(CalculatorKind::SplSum.parse_input("{}").is_err());
    }
}
