//! # mechcalc_core - Engineering Calculation Engine
//!
//! `mechcalc_core` is a library of mechanical, electrical and reliability
//! calculators with a clean, JSON-friendly API. Every calculator is a pure
//! function from an input record to a result record, and every result
//! carries LaTeX substitution strings showing how the numbers were reached.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All inputs and results implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types naming the offending field
//! - **Reproducible**: Monte Carlo calculators are seeded
//!
//! ## Quick Start
//!
//! ```rust
//! use mechcalc_core::calculations::pid::{calculate, ControllerType, PidInput, TuningRule};
//!
//! let input = PidInput {
//!     label: "Oven loop".to_string(),
//!     ultimate_gain: 5.0,
//!     ultimate_period_s: 8.0,
//!     rule: TuningRule::ZieglerNichols,
//!     controller: ControllerType::Pid,
//! };
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.kp, 3.0);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - All calculators and the [`CalculationItem`] wrapper
//! - [`equations`] - Formula functions and the equation registry
//! - [`worksheet`] - Worksheet container, metadata and settings
//! - [`file_io`] - Atomic worksheet save and versioned load
//! - [`units`] - Unit conversion registry
//! - [`subst`] - LaTeX substitution formatting
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod subst;
pub mod units;
pub mod worksheet;

// Re-export commonly used types at crate root for convenience
pub use calculations::{CalculationItem, CalculatorInfo, CalculatorKind};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_worksheet, save_worksheet};
pub use worksheet::{ItemReport, Outcome, Worksheet, WorksheetMetadata, WorksheetSettings};
