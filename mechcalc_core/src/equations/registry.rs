//! # Equation Registry
//!
//! Central registry of every formula the calculators apply. Each equation has
//! metadata including its source reference, LaTeX and plain-text forms, and
//! variable definitions.
//!
//! ## Architecture
//!
//! The registry provides:
//! - Type-safe equation identification via the `Equation` enum
//! - Full metadata for the equations reference and calculator descriptions
//! - Serialization support for JSON export
//!
//! ## Usage
//!
//! ```rust
//! use mechcalc_core::equations::registry::Equation;
//!
//! let meta = Equation::BasquinRelation.metadata();
//! println!("Formula: {}", meta.formula_latex);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// References
// ============================================================================

/// Textbook or standard an equation is taken from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reference {
    /// Shigley's Mechanical Engineering Design
    Shigley { edition: u8, section: &'static str },
    /// Anderson, Fracture Mechanics: Fundamentals and Applications
    Anderson { edition: u8, chapter: u8 },
    /// ASME Boiler and Pressure Vessel Code
    AsmeBpvc { section: &'static str, paragraph: &'static str },
    /// ISO standard
    Iso { standard: &'static str, part: u8 },
    /// Ziegler & Nichols, "Optimum Settings for Automatic Controllers" (and derived rules)
    ZieglerNichols { year: u16 },
    /// Peukert's law for lead-acid and lithium discharge
    Peukert,
    /// Blevins, Flow-Induced Vibration
    Blevins { edition: u8 },
    /// Ashby, Materials Selection in Mechanical Design
    Ashby { edition: u8 },
    /// MIL-HDBK-338 Electronic Reliability Design Handbook
    MilHdbk { number: u16 },
    /// VDI guideline
    Vdi { guideline: u16 },
    /// Fundamental physics (no specific reference needed)
    Fundamental,
}

impl Reference {
    /// Format the reference for display
    pub fn citation(&self) -> String {
        match self {
            Reference::Shigley { edition, section } => {
                format!("Shigley {}ed, Section {}", edition, section)
            }
            Reference::Anderson { edition, chapter } => {
                format!("Anderson {}ed, Ch. {}", edition, chapter)
            }
            Reference::AsmeBpvc { section, paragraph } => {
                format!("ASME BPVC Section {}, {}", section, paragraph)
            }
            Reference::Iso { standard, part } => format!("ISO {}-{}", standard, part),
            Reference::ZieglerNichols { year } => format!("Ziegler & Nichols ({})", year),
            Reference::Peukert => "Peukert (1897)".to_string(),
            Reference::Blevins { edition } => format!("Blevins {}ed", edition),
            Reference::Ashby { edition } => format!("Ashby {}ed", edition),
            Reference::MilHdbk { number } => format!("MIL-HDBK-{}", number),
            Reference::Vdi { guideline } => format!("VDI {}", guideline),
            Reference::Fundamental => "Fundamental Physics".to_string(),
        }
    }

    /// Short form for inline references
    pub fn short_form(&self) -> &'static str {
        match self {
            Reference::Shigley { .. } => "Shigley",
            Reference::Anderson { .. } => "Anderson",
            Reference::AsmeBpvc { .. } => "ASME BPVC",
            Reference::Iso { .. } => "ISO",
            Reference::ZieglerNichols { .. } => "Ziegler-Nichols",
            Reference::Peukert => "Peukert",
            Reference::Blevins { .. } => "Blevins",
            Reference::Ashby { .. } => "Ashby",
            Reference::MilHdbk { .. } => "MIL-HDBK",
            Reference::Vdi { .. } => "VDI",
            Reference::Fundamental => "Physics",
        }
    }
}

// ============================================================================
// Equation Categories
// ============================================================================

/// Categories for organizing equations in the reference document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// Mean-stress correction and S-N curves
    StressLife,
    /// Stress intensity and crack growth
    FractureMechanics,
    /// Battery and load electrical relations
    Electrical,
    /// Pressure vessel wall sizing
    PressureEquipment,
    /// Controller tuning
    Controls,
    /// Limits and fits
    Tolerancing,
    /// Threaded fasteners
    Fasteners,
    /// Vibration and isolation
    Dynamics,
    /// Flow noise and sound levels
    Acoustics,
    /// System reliability
    Reliability,
    /// Material selection
    Materials,
    /// Cost and payback
    Economics,
}

impl EquationCategory {
    /// Display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::StressLife => "Stress-Life Fatigue",
            EquationCategory::FractureMechanics => "Fracture Mechanics",
            EquationCategory::Electrical => "Electrical",
            EquationCategory::PressureEquipment => "Pressure Equipment",
            EquationCategory::Controls => "Controls",
            EquationCategory::Tolerancing => "Tolerancing",
            EquationCategory::Fasteners => "Fasteners",
            EquationCategory::Dynamics => "Dynamics",
            EquationCategory::Acoustics => "Acoustics",
            EquationCategory::Reliability => "Reliability",
            EquationCategory::Materials => "Materials",
            EquationCategory::Economics => "Economics",
        }
    }

    /// Sort order for the reference document (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::StressLife => 1,
            EquationCategory::FractureMechanics => 2,
            EquationCategory::Fasteners => 3,
            EquationCategory::PressureEquipment => 4,
            EquationCategory::Tolerancing => 5,
            EquationCategory::Dynamics => 6,
            EquationCategory::Acoustics => 7,
            EquationCategory::Materials => 8,
            EquationCategory::Electrical => 9,
            EquationCategory::Controls => 10,
            EquationCategory::Reliability => 11,
            EquationCategory::Economics => 12,
        }
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in an equation or calculator signature.
#[derive(Debug, Clone, Serialize)]
pub struct Variable {
    /// Symbol or field name (e.g., "sigma_a", "pressure_mpa")
    pub symbol: &'static str,
    /// Description
    pub description: &'static str,
    /// Units (e.g., "MPa", "m", "-")
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Complete metadata for one equation.
#[derive(Debug, Clone, Serialize)]
pub struct EquationMetadata {
    /// Human-readable name (e.g., "Basquin Relation")
    pub name: &'static str,
    /// Brief description of what this equation calculates
    pub description: &'static str,
    /// The formula in LaTeX for UI rendering
    pub formula_latex: &'static str,
    /// The formula in plain text for markdown
    pub formula_plain: &'static str,
    /// Source reference
    pub reference: Reference,
    /// Variable definitions
    pub variables: Vec<Variable>,
    /// Assumptions or limitations
    pub assumptions: Vec<&'static str>,
    /// Category for grouping
    pub category: EquationCategory,
    /// Source module where the equation implementation lives
    pub source_module: &'static str,
    /// Function name implementing the equation
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// All equations used by the calculators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Equation {
    // -------------------------------------------------------------------------
    // Stress-Life
    // -------------------------------------------------------------------------
    /// σ_a = (σ_max - σ_min)/2, σ_m = (σ_max + σ_min)/2
    CycleDecomposition,
    /// σ_ar = σ_a / (1 - σ_m/S_u)
    GoodmanCorrection,
    /// σ_ar = σ_a / (1 - σ_m/S_y)
    SoderbergCorrection,
    /// σ_ar = σ_a / (1 - (σ_m/S_u)^2)
    GerberCorrection,
    /// σ = σ_f' (2N)^b
    BasquinRelation,
    /// n = S_f / σ_ar
    FatigueSafetyFactor,

    // -------------------------------------------------------------------------
    // Fracture Mechanics
    // -------------------------------------------------------------------------
    /// K_I = Y σ √(πa)
    StressIntensityFactor,
    /// Y = √sec(πa/W)
    CenterCrackGeometry,
    /// Edge crack polynomial
    EdgeCrackGeometry,
    /// da/dN = C ΔK^m
    ParisLaw,
    /// K_I(a_cr) = K_IC
    CriticalCrackSize,

    // -------------------------------------------------------------------------
    // Fasteners
    // -------------------------------------------------------------------------
    /// A_t = π/4 (d - 0.9382P)^2
    TensileStressArea,
    /// F_i = (pct/100) S_p A_t
    BoltPreload,
    /// T = K F_i d
    NutFactorTorque,

    // -------------------------------------------------------------------------
    // Pressure Equipment
    // -------------------------------------------------------------------------
    /// t = PR/(SE - 0.6P)
    CylinderCircumferentialThickness,
    /// t = PR/(2SE + 0.4P)
    CylinderLongitudinalThickness,
    /// t = PR/(2SE - 0.2P)
    SphereThickness,

    // -------------------------------------------------------------------------
    // Tolerancing
    // -------------------------------------------------------------------------
    /// Clearance limits from hole and shaft deviations
    FitClearance,

    // -------------------------------------------------------------------------
    // Dynamics
    // -------------------------------------------------------------------------
    /// f_n = (1/2π) √(k/m)
    NaturalFrequency,
    /// Base-excitation transmissibility
    Transmissibility,

    // -------------------------------------------------------------------------
    // Acoustics
    // -------------------------------------------------------------------------
    /// f = St U / D
    VortexShedding,
    /// L = 10 log10 Σ 10^(L_i/10)
    DecibelSum,

    // -------------------------------------------------------------------------
    // Materials
    // -------------------------------------------------------------------------
    /// M = P^(1/n) / ρ
    AshbyIndex,

    // -------------------------------------------------------------------------
    // Electrical
    // -------------------------------------------------------------------------
    /// t = H (C/(I H))^k
    PeukertRuntime,
    /// R I^2 - V I + P/η = 0
    ConstantPowerCurrent,

    // -------------------------------------------------------------------------
    // Controls
    // -------------------------------------------------------------------------
    /// Ultimate-cycle PID rules
    UltimateCycleTuning,

    // -------------------------------------------------------------------------
    // Reliability
    // -------------------------------------------------------------------------
    /// λ_s = Σ λ_i
    SeriesFailureRate,
    /// R_s = 1 - Π (1 - R_i)
    ParallelReliability,

    // -------------------------------------------------------------------------
    // Economics
    // -------------------------------------------------------------------------
    /// Payback = capital / annual savings
    PaybackPeriod,
}

impl Equation {
    /// Get the full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            // Stress-Life
            Equation::CycleDecomposition => EquationMetadata {
                name: "Cycle Decomposition",
                description: "Alternating and mean components of a constant-amplitude stress cycle",
                formula_latex: r"\sigma_a = \frac{\sigma_{max} - \sigma_{min}}{2},\ \sigma_m = \frac{\sigma_{max} + \sigma_{min}}{2}",
                formula_plain: "sigma_a = (sigma_max - sigma_min)/2, sigma_m = (sigma_max + sigma_min)/2",
                reference: Reference::Shigley { edition: 10, section: "6-11" },
                variables: vec![
                    Variable::new("sigma_max", "Maximum cycle stress", "MPa"),
                    Variable::new("sigma_min", "Minimum cycle stress", "MPa"),
                    Variable::new("sigma_a", "Alternating stress amplitude", "MPa"),
                    Variable::new("sigma_m", "Mean stress", "MPa"),
                ],
                assumptions: vec!["Constant-amplitude loading", "Uniaxial stress"],
                category: EquationCategory::StressLife,
                source_module: "equations/fatigue.rs",
                source_function: "alternating_stress",
            },

            Equation::GoodmanCorrection => EquationMetadata {
                name: "Modified Goodman Correction",
                description: "Equivalent fully-reversed stress using a straight line to the ultimate strength",
                formula_latex: r"\sigma_{ar} = \frac{\sigma_a}{1 - \sigma_m / S_u}",
                formula_plain: "sigma_ar = sigma_a / (1 - sigma_m/S_u)",
                reference: Reference::Shigley { edition: 10, section: "6-12" },
                variables: vec![
                    Variable::new("sigma_ar", "Equivalent fully-reversed stress", "MPa"),
                    Variable::new("S_u", "Ultimate tensile strength", "MPa"),
                ],
                assumptions: vec!["Mean stress below ultimate strength", "Ductile material"],
                category: EquationCategory::StressLife,
                source_module: "equations/fatigue.rs",
                source_function: "goodman_equivalent",
            },

            Equation::SoderbergCorrection => EquationMetadata {
                name: "Soderberg Correction",
                description: "Equivalent fully-reversed stress using a straight line to the yield strength",
                formula_latex: r"\sigma_{ar} = \frac{\sigma_a}{1 - \sigma_m / S_y}",
                formula_plain: "sigma_ar = sigma_a / (1 - sigma_m/S_y)",
                reference: Reference::Shigley { edition: 10, section: "6-12" },
                variables: vec![
                    Variable::new("sigma_ar", "Equivalent fully-reversed stress", "MPa"),
                    Variable::new("S_y", "Yield strength", "MPa"),
                ],
                assumptions: vec!["Mean stress below yield strength", "Guards against first-cycle yield"],
                category: EquationCategory::StressLife,
                source_module: "equations/fatigue.rs",
                source_function: "soderberg_equivalent",
            },

            Equation::GerberCorrection => EquationMetadata {
                name: "Gerber Correction",
                description: "Equivalent fully-reversed stress using a parabola through the ultimate strength",
                formula_latex: r"\sigma_{ar} = \frac{\sigma_a}{1 - (\sigma_m / S_u)^2}",
                formula_plain: "sigma_ar = sigma_a / (1 - (sigma_m/S_u)^2)",
                reference: Reference::Shigley { edition: 10, section: "6-12" },
                variables: vec![
                    Variable::new("sigma_ar", "Equivalent fully-reversed stress", "MPa"),
                    Variable::new("S_u", "Ultimate tensile strength", "MPa"),
                ],
                assumptions: vec!["|sigma_m| below ultimate strength", "Symmetric for compressive mean"],
                category: EquationCategory::StressLife,
                source_module: "equations/fatigue.rs",
                source_function: "gerber_equivalent",
            },

            Equation::BasquinRelation => EquationMetadata {
                name: "Basquin Relation",
                description: "High-cycle S-N power law, inverted for reversals to failure",
                formula_latex: r"\sigma_{ar} = \sigma_f' (2N_f)^b \Rightarrow N_f = \frac{1}{2}\left(\frac{\sigma_{ar}}{\sigma_f'}\right)^{1/b}",
                formula_plain: "sigma_ar = sigma_f' (2N)^b, N = 0.5 (sigma_ar/sigma_f')^(1/b)",
                reference: Reference::Shigley { edition: 10, section: "6-7" },
                variables: vec![
                    Variable::new("sigma_f'", "Fatigue strength coefficient", "MPa"),
                    Variable::new("b", "Fatigue strength exponent", "-"),
                    Variable::new("N_f", "Cycles to failure", "cycles"),
                ],
                assumptions: vec!["High-cycle regime", "Infinite life below a finite endurance limit"],
                category: EquationCategory::StressLife,
                source_module: "equations/fatigue.rs",
                source_function: "basquin_reversals",
            },

            Equation::FatigueSafetyFactor => EquationMetadata {
                name: "Fatigue Safety Factor",
                description: "Ratio of fatigue strength at the design life to the equivalent stress",
                formula_latex: r"n_f = \frac{S_f(N_d)}{\sigma_{ar}}",
                formula_plain: "n_f = S_f(N_d) / sigma_ar",
                reference: Reference::Shigley { edition: 10, section: "6-12" },
                variables: vec![
                    Variable::new("S_f", "Fatigue strength at design life", "MPa"),
                    Variable::new("N_d", "Design life", "cycles"),
                    Variable::new("n_f", "Safety factor", "-"),
                ],
                assumptions: vec!["Infinite when sigma_ar is zero"],
                category: EquationCategory::StressLife,
                source_module: "calculations/fatigue.rs",
                source_function: "calculate",
            },

            // Fracture Mechanics
            Equation::StressIntensityFactor => EquationMetadata {
                name: "Stress-Intensity Factor",
                description: "Mode I stress-intensity factor at the crack tip",
                formula_latex: r"K_I = Y \sigma \sqrt{\pi a}",
                formula_plain: "K_I = Y sigma sqrt(pi a)",
                reference: Reference::Anderson { edition: 4, chapter: 2 },
                variables: vec![
                    Variable::new("K_I", "Stress-intensity factor", "MPa*m^0.5"),
                    Variable::new("Y", "Geometry factor", "-"),
                    Variable::new("sigma", "Remote stress", "MPa"),
                    Variable::new("a", "Crack size", "m"),
                ],
                assumptions: vec!["Linear-elastic material", "Small-scale yielding"],
                category: EquationCategory::FractureMechanics,
                source_module: "equations/fracture.rs",
                source_function: "stress_intensity",
            },

            Equation::CenterCrackGeometry => EquationMetadata {
                name: "Center Crack Geometry Factor",
                description: "Feddersen secant finite-width correction for a through center crack",
                formula_latex: r"Y = \sqrt{\sec\left(\frac{\pi a}{W}\right)}",
                formula_plain: "Y = sqrt(sec(pi a / W))",
                reference: Reference::Anderson { edition: 4, chapter: 2 },
                variables: vec![
                    Variable::new("a", "Half crack length", "m"),
                    Variable::new("W", "Plate width", "m"),
                ],
                assumptions: vec!["a/W < 0.5", "Remote uniform tension"],
                category: EquationCategory::FractureMechanics,
                source_module: "equations/fracture.rs",
                source_function: "center_crack_factor",
            },

            Equation::EdgeCrackGeometry => EquationMetadata {
                name: "Edge Crack Geometry Factor",
                description: "Polynomial geometry factor for a single-edge crack in tension",
                formula_latex: r"Y = 1.12 - 0.231\xi + 10.55\xi^2 - 21.72\xi^3 + 30.39\xi^4,\ \xi = a/W",
                formula_plain: "Y = 1.12 - 0.231x + 10.55x^2 - 21.72x^3 + 30.39x^4, x = a/W",
                reference: Reference::Anderson { edition: 4, chapter: 2 },
                variables: vec![
                    Variable::new("a", "Crack depth", "m"),
                    Variable::new("W", "Plate width", "m"),
                ],
                assumptions: vec!["a/W <= 0.6", "Bending restrained"],
                category: EquationCategory::FractureMechanics,
                source_module: "equations/fracture.rs",
                source_function: "edge_crack_factor",
            },

            Equation::ParisLaw => EquationMetadata {
                name: "Paris Law",
                description: "Fatigue crack growth rate as a power law of the stress-intensity range",
                formula_latex: r"\frac{da}{dN} = C (\Delta K)^m",
                formula_plain: "da/dN = C (dK)^m",
                reference: Reference::Anderson { edition: 4, chapter: 10 },
                variables: vec![
                    Variable::new("C", "Paris coefficient", "m/cycle/(MPa*m^0.5)^m"),
                    Variable::new("m", "Paris exponent", "-"),
                    Variable::new("dK", "Stress-intensity range", "MPa*m^0.5"),
                ],
                assumptions: vec!["Region II growth", "Compressive part of the cycle ignored (R < 0)"],
                category: EquationCategory::FractureMechanics,
                source_module: "calculations/crack_growth.rs",
                source_function: "integrate_paris",
            },

            Equation::CriticalCrackSize => EquationMetadata {
                name: "Critical Crack Size",
                description: "Crack size at which K_I reaches the fracture toughness, found by bisection",
                formula_latex: r"Y(a_{cr})\,\sigma_{max}\sqrt{\pi a_{cr}} = K_{IC}",
                formula_plain: "Y(a_cr) sigma_max sqrt(pi a_cr) = K_IC",
                reference: Reference::Anderson { edition: 4, chapter: 2 },
                variables: vec![
                    Variable::new("a_cr", "Critical crack size", "m"),
                    Variable::new("K_IC", "Plane-strain fracture toughness", "MPa*m^0.5"),
                ],
                assumptions: vec!["Search bounded by the geometry's validity range"],
                category: EquationCategory::FractureMechanics,
                source_module: "calculations/crack_growth.rs",
                source_function: "critical_crack_size",
            },

            // Fasteners
            Equation::TensileStressArea => EquationMetadata {
                name: "Tensile Stress Area",
                description: "Effective area of an ISO metric thread",
                formula_latex: r"A_t = \frac{\pi}{4}(d - 0.9382P)^2",
                formula_plain: "A_t = pi/4 (d - 0.9382P)^2",
                reference: Reference::Iso { standard: "898", part: 1 },
                variables: vec![
                    Variable::new("d", "Nominal diameter", "mm"),
                    Variable::new("P", "Thread pitch", "mm"),
                ],
                assumptions: vec!["ISO metric coarse or fine thread"],
                category: EquationCategory::Fasteners,
                source_module: "calculations/fastener.rs",
                source_function: "calculate",
            },

            Equation::BoltPreload => EquationMetadata {
                name: "Bolt Preload",
                description: "Target preload as a percentage of proof load",
                formula_latex: r"F_i = \frac{p}{100} S_p A_t",
                formula_plain: "F_i = (p/100) S_p A_t",
                reference: Reference::Shigley { edition: 10, section: "8-8" },
                variables: vec![
                    Variable::new("p", "Percent of proof load", "%"),
                    Variable::new("S_p", "Proof strength", "MPa"),
                ],
                assumptions: vec!["Elastic tightening"],
                category: EquationCategory::Fasteners,
                source_module: "calculations/fastener.rs",
                source_function: "calculate",
            },

            Equation::NutFactorTorque => EquationMetadata {
                name: "Nut Factor Torque",
                description: "Tightening torque from the short-form nut factor relation",
                formula_latex: r"T = K F_i d",
                formula_plain: "T = K F_i d",
                reference: Reference::Vdi { guideline: 2230 },
                variables: vec![
                    Variable::new("T", "Tightening torque", "N*m"),
                    Variable::new("K", "Nut factor", "-"),
                ],
                assumptions: vec!["K lumps thread and bearing friction"],
                category: EquationCategory::Fasteners,
                source_module: "calculations/fastener.rs",
                source_function: "calculate",
            },

            // Pressure Equipment
            Equation::CylinderCircumferentialThickness => EquationMetadata {
                name: "Cylinder Circumferential Thickness",
                description: "Shell thickness for hoop stress under internal pressure",
                formula_latex: r"t = \frac{P R}{S E - 0.6 P}",
                formula_plain: "t = PR / (SE - 0.6P)",
                reference: Reference::AsmeBpvc { section: "VIII-1", paragraph: "UG-27(c)(1)" },
                variables: vec![
                    Variable::new("P", "Internal design pressure", "MPa"),
                    Variable::new("R", "Inside radius (corroded)", "mm"),
                    Variable::new("S", "Allowable stress", "MPa"),
                    Variable::new("E", "Joint efficiency", "-"),
                ],
                assumptions: vec!["P <= 0.385 SE", "t <= R/2"],
                category: EquationCategory::PressureEquipment,
                source_module: "calculations/pressure_vessel.rs",
                source_function: "calculate",
            },

            Equation::CylinderLongitudinalThickness => EquationMetadata {
                name: "Cylinder Longitudinal Thickness",
                description: "Shell thickness for axial stress under internal pressure",
                formula_latex: r"t = \frac{P R}{2 S E + 0.4 P}",
                formula_plain: "t = PR / (2SE + 0.4P)",
                reference: Reference::AsmeBpvc { section: "VIII-1", paragraph: "UG-27(c)(2)" },
                variables: vec![
                    Variable::new("P", "Internal design pressure", "MPa"),
                    Variable::new("R", "Inside radius (corroded)", "mm"),
                ],
                assumptions: vec!["P <= 1.25 SE"],
                category: EquationCategory::PressureEquipment,
                source_module: "calculations/pressure_vessel.rs",
                source_function: "calculate",
            },

            Equation::SphereThickness => EquationMetadata {
                name: "Sphere Thickness",
                description: "Spherical shell thickness under internal pressure",
                formula_latex: r"t = \frac{P R}{2 S E - 0.2 P}",
                formula_plain: "t = PR / (2SE - 0.2P)",
                reference: Reference::AsmeBpvc { section: "VIII-1", paragraph: "UG-27(d)" },
                variables: vec![
                    Variable::new("P", "Internal design pressure", "MPa"),
                    Variable::new("R", "Inside radius (corroded)", "mm"),
                ],
                assumptions: vec!["P <= 0.665 SE", "t <= 0.356R"],
                category: EquationCategory::PressureEquipment,
                source_module: "calculations/pressure_vessel.rs",
                source_function: "calculate",
            },

            // Tolerancing
            Equation::FitClearance => EquationMetadata {
                name: "Fit Clearance Limits",
                description: "Maximum and minimum clearance from hole and shaft limit deviations",
                formula_latex: r"C_{max} = ES - ei,\ C_{min} = EI - es",
                formula_plain: "C_max = ES - ei, C_min = EI - es",
                reference: Reference::Iso { standard: "286", part: 1 },
                variables: vec![
                    Variable::new("ES, EI", "Hole upper/lower deviation", "um"),
                    Variable::new("es, ei", "Shaft upper/lower deviation", "um"),
                ],
                assumptions: vec!["Nominal size up to 500 mm", "Negative clearance is interference"],
                category: EquationCategory::Tolerancing,
                source_module: "calculations/fits.rs",
                source_function: "calculate",
            },

            // Dynamics
            Equation::NaturalFrequency => EquationMetadata {
                name: "Undamped Natural Frequency",
                description: "Natural frequency of a single-degree-of-freedom mass-spring system",
                formula_latex: r"f_n = \frac{1}{2\pi}\sqrt{\frac{k}{m}}",
                formula_plain: "f_n = (1/2pi) sqrt(k/m)",
                reference: Reference::Fundamental,
                variables: vec![
                    Variable::new("k", "Stiffness", "N/m"),
                    Variable::new("m", "Mass", "kg"),
                ],
                assumptions: vec!["Linear spring"],
                category: EquationCategory::Dynamics,
                source_module: "calculations/vibration.rs",
                source_function: "calculate",
            },

            Equation::Transmissibility => EquationMetadata {
                name: "Transmissibility",
                description: "Ratio of transmitted to applied force amplitude for viscous damping",
                formula_latex: r"T = \sqrt{\frac{1 + (2\zeta r)^2}{(1 - r^2)^2 + (2\zeta r)^2}}",
                formula_plain: "T = sqrt((1 + (2 zeta r)^2) / ((1 - r^2)^2 + (2 zeta r)^2))",
                reference: Reference::Fundamental,
                variables: vec![
                    Variable::new("r", "Frequency ratio f/f_n", "-"),
                    Variable::new("zeta", "Damping ratio", "-"),
                ],
                assumptions: vec!["Harmonic excitation", "Isolation only for r > sqrt(2)"],
                category: EquationCategory::Dynamics,
                source_module: "calculations/vibration.rs",
                source_function: "transmissibility",
            },

            // Acoustics
            Equation::VortexShedding => EquationMetadata {
                name: "Vortex Shedding Frequency",
                description: "Aeolian tone frequency behind a bluff body",
                formula_latex: r"f = \frac{St\,U}{D}",
                formula_plain: "f = St U / D",
                reference: Reference::Blevins { edition: 2 },
                variables: vec![
                    Variable::new("St", "Strouhal number", "-"),
                    Variable::new("U", "Flow velocity", "m/s"),
                    Variable::new("D", "Body diameter", "m"),
                ],
                assumptions: vec!["Subcritical Reynolds number for St = 0.2"],
                category: EquationCategory::Acoustics,
                source_module: "calculations/acoustics.rs",
                source_function: "vortex_shedding",
            },

            Equation::DecibelSum => EquationMetadata {
                name: "Incoherent Decibel Sum",
                description: "Total sound level of uncorrelated sources",
                formula_latex: r"L = 10\log_{10}\sum_i 10^{L_i/10}",
                formula_plain: "L = 10 log10(sum 10^(L_i/10))",
                reference: Reference::Fundamental,
                variables: vec![Variable::new("L_i", "Source level", "dB")],
                assumptions: vec!["Uncorrelated sources"],
                category: EquationCategory::Acoustics,
                source_module: "calculations/acoustics.rs",
                source_function: "spl_sum",
            },

            // Materials
            Equation::AshbyIndex => EquationMetadata {
                name: "Ashby Performance Index",
                description: "Mass-efficiency figure of merit for a structural objective",
                formula_latex: r"M = \frac{P^{1/n}}{\rho}",
                formula_plain: "M = P^(1/n) / rho",
                reference: Reference::Ashby { edition: 5 },
                variables: vec![
                    Variable::new("P", "Modulus or strength", "GPa or MPa"),
                    Variable::new("n", "Shape exponent (1 tie, 2 or 3/2 beam, 3 or 2 panel)", "-"),
                    Variable::new("rho", "Density", "kg/m^3"),
                ],
                assumptions: vec!["Minimum mass objective"],
                category: EquationCategory::Materials,
                source_module: "calculations/ashby.rs",
                source_function: "calculate",
            },

            // Electrical
            Equation::PeukertRuntime => EquationMetadata {
                name: "Peukert Runtime",
                description: "Battery runtime corrected for discharge-rate capacity loss",
                formula_latex: r"t = H\left(\frac{C}{I H}\right)^k",
                formula_plain: "t = H (C/(I H))^k",
                reference: Reference::Peukert,
                variables: vec![
                    Variable::new("H", "Rated discharge time", "h"),
                    Variable::new("C", "Usable capacity", "Ah"),
                    Variable::new("I", "Average current", "A"),
                    Variable::new("k", "Peukert exponent", "-"),
                ],
                assumptions: vec!["Constant average current", "k = 1 for an ideal cell"],
                category: EquationCategory::Electrical,
                source_module: "calculations/battery.rs",
                source_function: "calculate",
            },

            Equation::ConstantPowerCurrent => EquationMetadata {
                name: "Constant Power Current",
                description: "Battery current for a constant-power load behind internal resistance",
                formula_latex: r"I = \frac{V - \sqrt{V^2 - 4 R P/\eta}}{2R}",
                formula_plain: "I = (V - sqrt(V^2 - 4RP/eta)) / (2R)",
                reference: Reference::Fundamental,
                variables: vec![
                    Variable::new("V", "Pack voltage", "V"),
                    Variable::new("R", "Internal resistance", "ohm"),
                    Variable::new("P", "Load power", "W"),
                ],
                assumptions: vec!["Discriminant must be non-negative"],
                category: EquationCategory::Electrical,
                source_module: "calculations/battery.rs",
                source_function: "load_current",
            },

            // Controls
            Equation::UltimateCycleTuning => EquationMetadata {
                name: "Ultimate-Cycle Tuning",
                description: "Controller gains from the ultimate gain and period",
                formula_latex: r"K_p = \alpha K_u,\ T_i = \beta P_u,\ T_d = \gamma P_u,\ K_i = K_p/T_i,\ K_d = K_p T_d",
                formula_plain: "Kp = a Ku, Ti = b Pu, Td = c Pu, Ki = Kp/Ti, Kd = Kp Td",
                reference: Reference::ZieglerNichols { year: 1942 },
                variables: vec![
                    Variable::new("K_u", "Ultimate gain", "-"),
                    Variable::new("P_u", "Ultimate period", "s"),
                ],
                assumptions: vec!["Parallel (ideal) PID form"],
                category: EquationCategory::Controls,
                source_module: "calculations/pid.rs",
                source_function: "calculate",
            },

            // Reliability
            Equation::SeriesFailureRate => EquationMetadata {
                name: "Series Failure Rate",
                description: "System failure rate of independent blocks in series",
                formula_latex: r"\lambda_s = \sum_i \frac{1}{MTBF_i},\ R_s(t) = e^{-\lambda_s t}",
                formula_plain: "lambda_s = sum(1/MTBF_i), R_s = exp(-lambda_s t)",
                reference: Reference::MilHdbk { number: 338 },
                variables: vec![
                    Variable::new("MTBF_i", "Block mean time between failures", "h"),
                    Variable::new("t", "Mission time", "h"),
                ],
                assumptions: vec!["Constant failure rates", "Independent failures"],
                category: EquationCategory::Reliability,
                source_module: "calculations/reliability.rs",
                source_function: "calculate",
            },

            Equation::ParallelReliability => EquationMetadata {
                name: "Parallel Reliability",
                description: "Active-redundant blocks: the system fails only when all blocks fail",
                formula_latex: r"R_s(t) = 1 - \prod_i \left(1 - e^{-\lambda_i t}\right)",
                formula_plain: "R_s = 1 - prod(1 - exp(-lambda_i t))",
                reference: Reference::MilHdbk { number: 338 },
                variables: vec![Variable::new("lambda_i", "Block failure rate", "1/h")],
                assumptions: vec!["Active redundancy", "MTBF by inclusion-exclusion"],
                category: EquationCategory::Reliability,
                source_module: "calculations/reliability.rs",
                source_function: "calculate",
            },

            // Economics
            Equation::PaybackPeriod => EquationMetadata {
                name: "Payback Period",
                description: "Years of savings needed to recover the fleet capital cost",
                formula_latex: r"t_{pb} = \frac{n\,C_{printer}}{S_{annual}}",
                formula_plain: "t_pb = n C_printer / S_annual",
                reference: Reference::Fundamental,
                variables: vec![
                    Variable::new("C_printer", "Printer capital cost", "$"),
                    Variable::new("S_annual", "Annual savings vs outsourcing", "$/yr"),
                ],
                assumptions: vec!["Infinite when savings are not positive", "No discounting"],
                category: EquationCategory::Economics,
                source_module: "calculations/fleet.rs",
                source_function: "calculate",
            },
        }
    }

    /// Get all equations in a given category
    pub fn in_category(category: EquationCategory) -> Vec<Equation> {
        ALL_EQUATIONS
            .iter()
            .filter(|eq| eq.metadata().category == category)
            .copied()
            .collect()
    }

    /// Get all categories in document order
    pub fn all_categories() -> Vec<EquationCategory> {
        use EquationCategory::*;
        let mut cats = vec![
            StressLife,
            FractureMechanics,
            Electrical,
            PressureEquipment,
            Controls,
            Tolerancing,
            Fasteners,
            Dynamics,
            Acoustics,
            Reliability,
            Materials,
            Economics,
        ];
        cats.sort_by_key(|c| c.sort_order());
        cats
    }
}

/// All equations in the registry (for iteration)
pub static ALL_EQUATIONS: &[Equation] = &[
    // Stress-life
    Equation::CycleDecomposition,
    Equation::GoodmanCorrection,
    Equation::SoderbergCorrection,
    Equation::GerberCorrection,
    Equation::BasquinRelation,
    Equation::FatigueSafetyFactor,
    // Fracture mechanics
    Equation::StressIntensityFactor,
    Equation::CenterCrackGeometry,
    Equation::EdgeCrackGeometry,
    Equation::ParisLaw,
    Equation::CriticalCrackSize,
    // Fasteners
    Equation::TensileStressArea,
    Equation::BoltPreload,
    Equation::NutFactorTorque,
    // Pressure equipment
    Equation::CylinderCircumferentialThickness,
    Equation::CylinderLongitudinalThickness,
    Equation::SphereThickness,
    // Tolerancing
    Equation::FitClearance,
    // Dynamics
    Equation::NaturalFrequency,
    Equation::Transmissibility,
    // Acoustics
    Equation::VortexShedding,
    Equation::DecibelSum,
    // Materials
    Equation::AshbyIndex,
    // Electrical
    Equation::PeukertRuntime,
    Equation::ConstantPowerCurrent,
    // Controls
    Equation::UltimateCycleTuning,
    // Reliability
    Equation::SeriesFailureRate,
    Equation::ParallelReliability,
    // Economics
    Equation::PaybackPeriod,
];

// ============================================================================
// Markdown Generation for EQUATIONS.md
// ============================================================================

/// Generate a complete EQUATIONS.md file for documentation.
///
/// Lists every equation in the registry, organized by category, with
/// formulas, references, and source locations.
///
/// # Example
///
/// ```rust
/// use mechcalc_core::equations::registry::generate_equations_markdown;
///
/// let markdown = generate_equations_markdown();
/// assert!(markdown.contains("Mechcalc Equations Reference"));
/// assert!(markdown.contains("Fracture Mechanics"));
/// ```
pub fn generate_equations_markdown() -> String {
    let mut output = String::with_capacity(24_000);

    output.push_str(
        r#"# Mechcalc Equations Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-equations`

This document lists every formula applied by the Mechcalc calculators.
Each equation includes its formula, reference, source location, and assumptions.

---

"#,
    );

    let categories = Equation::all_categories();

    for category in &categories {
        let equations = Equation::in_category(*category);
        if equations.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", category.display_name()));

        for equation in equations {
            let meta = equation.metadata();

            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));
            output.push_str(&format!("$$\n{}\n$$\n\n", meta.formula_latex));

            if !meta.variables.is_empty() {
                output.push_str("**Variables:**\n\n");
                output.push_str("| Symbol | Description | Units |\n");
                output.push_str("|--------|-------------|-------|\n");
                for var in &meta.variables {
                    output.push_str(&format!(
                        "| {} | {} | {} |\n",
                        var.symbol, var.description, var.units
                    ));
                }
                output.push('\n');
            }

            output.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation()));
            output.push_str(&format!(
                "**Source:** [`{}`]({})\n\n",
                meta.source_function, meta.source_module
            ));

            if !meta.assumptions.is_empty() {
                output.push_str("**Assumptions:**\n");
                for assumption in &meta.assumptions {
                    output.push_str(&format!("- {}\n", assumption));
                }
                output.push('\n');
            }

            output.push_str("---\n\n");
        }
    }

    output.push_str(&format!(
        "## Statistics\n\n- **Total Equations:** {}\n- **Categories:** {}\n",
        ALL_EQUATIONS.len(),
        categories.len()
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_equations_have_metadata() {
        assert_eq!(ALL_EQUATIONS.len(), 29);

        for eq in ALL_EQUATIONS {
            let meta = eq.metadata();
            assert!(!meta.name.is_empty(), "Equation {:?} has no name", eq);
            assert!(!meta.formula_latex.is_empty(), "Equation {:?} has no formula", eq);
            assert!(!meta.variables.is_empty(), "Equation {:?} has no variables", eq);
            assert!(!meta.source_module.is_empty(), "Equation {:?} has no source", eq);
        }

        let paris = Equation::ParisLaw.metadata();
        assert!(paris.formula_plain.contains("C (dK)^m"));
    }

    #[test]
    fn test_reference_citation() {
        let shigley = Reference::Shigley { edition: 10, section: "6-12" };
        assert_eq!(shigley.citation(), "Shigley 10ed, Section 6-12");

        let asme = Reference::AsmeBpvc { section: "VIII-1", paragraph: "UG-27(d)" };
        assert_eq!(asme.citation(), "ASME BPVC Section VIII-1, UG-27(d)");
        assert_eq!(asme.short_form(), "ASME BPVC");
    }

    #[test]
    fn test_every_category_is_populated() {
        for category in Equation::all_categories() {
            assert!(
                !Equation::in_category(category).is_empty(),
                "{} has no equations",
                category.display_name()
            );
        }
    }

    #[test]
    fn test_categories_sorted() {
        let cats = Equation::all_categories();
        for pair in cats.windows(2) {
            assert!(pair[0].sort_order() < pair[1].sort_order());
        }
    }

    #[test]
    fn test_generate_equations_markdown() {
        let md = generate_equations_markdown();
        assert!(md.contains("## Stress-Life Fatigue"));
        assert!(md.contains("### Paris Law"));
        assert!(md.contains("**Total Equations:** 29"));
    }
}
