//! # Engineering Equations
//!
//! Pure formula functions shared by the calculators. Keeping the equations in
//! one place makes them easy to check against the textbook and keeps the
//! calculators focused on validation and formatting.
//!
//! ## Modules
//!
//! - [`fatigue`] - Cycle decomposition, mean-stress corrections, Basquin relation
//! - [`fracture`] - Stress intensity, geometry factors, Paris law
//! - [`registry`] - Equation metadata for the generated equations reference
//!
//! ## References
//!
//! - Shigley's Mechanical Engineering Design, 10th Edition
//! - Anderson, Fracture Mechanics: Fundamentals and Applications, 4th Edition
//! - ASME BPVC Section VIII Division 1
//! - ISO 286-1:2010

pub mod fatigue;
pub mod fracture;
pub mod registry;

pub use fatigue::{
    alternating_stress,
    basquin_reversals,
    basquin_strength,
    gerber_equivalent,
    goodman_equivalent,
    mean_stress,
    soderberg_equivalent,
    stress_ratio,
};

pub use fracture::{
    center_crack_factor,
    critical_crack_constant_factor,
    edge_crack_factor,
    paris_rate,
    stress_intensity,
    SURFACE_CRACK_FACTOR,
};

pub use registry::{
    Equation,
    EquationCategory,
    EquationMetadata,
    Reference,
    Variable,
    ALL_EQUATIONS,
    generate_equations_markdown,
};
