//! # Error Types
//!
//! Structured error types for mechcalc_core. Every calculator rejects bad
//! input with one of these variants so the caller can show the message
//! verbatim or branch on [`CalcError::error_code`].
//!
//! ## Error kinds
//!
//! - **Range violation** ([`CalcError::InvalidInput`]): a scalar outside its
//!   physical domain (non-positive pressure, Poisson ratio ≥ 0.5, ...)
//! - **Enum violation** ([`CalcError::UnknownOption`]): an identifier that is
//!   not one of the accepted spellings
//! - **Physical infeasibility** ([`CalcError::Infeasible`]): valid-looking
//!   inputs that combine into a nonphysical result
//! - **Consistency violation** ([`CalcError::Inconsistent`]): related inputs
//!   that disagree (array lengths, locations outside a body)
//!
//! ## Example
//!
//! ```rust
//! use mechcalc_core::errors::{CalcError, CalcResult};
//!
//! fn validate_pressure(pressure_mpa: f64) -> CalcResult<()> {
//!     if pressure_mpa <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "pressure_mpa",
//!             pressure_mpa.to_string(),
//!             "Pressure must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_pressure(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for mechcalc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is outside its allowed range
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// An identifier does not match any known category
    #[error("Unknown option for '{field}': '{value}' (expected one of: {expected})")]
    UnknownOption {
        field: String,
        value: String,
        expected: String,
    },

    /// The combination of inputs implies a nonphysical result
    #[error("Infeasible {calculation}: {reason}")]
    Infeasible { calculation: String, reason: String },

    /// Related inputs disagree with each other
    #[error("Inconsistent inputs ({fields}): {reason}")]
    Inconsistent { fields: String, reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownOption error from the accepted spellings
    pub fn unknown_option(field: impl Into<String>, value: impl Into<String>, expected: &[&str]) -> Self {
        CalcError::UnknownOption {
            field: field.into(),
            value: value.into(),
            expected: expected.join(", "),
        }
    }

    /// Create an Infeasible error
    pub fn infeasible(calculation: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::Infeasible {
            calculation: calculation.into(),
            reason: reason.into(),
        }
    }

    /// Create an Inconsistent error
    pub fn inconsistent(fields: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::Inconsistent {
            fields: fields.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True for errors caused by the caller's input rather than the environment
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidInput { .. }
                | CalcError::UnknownOption { .. }
                | CalcError::Infeasible { .. }
                | CalcError::Inconsistent { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::UnknownOption { .. } => "UNKNOWN_OPTION",
            CalcError::Infeasible { .. } => "INFEASIBLE",
            CalcError::Inconsistent { .. } => "INCONSISTENT",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

/// Reject a value that is not strictly positive (or not finite).
pub(crate) fn require_positive(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "must be positive"));
    }
    Ok(())
}

/// Reject a negative (or non-finite) value.
pub(crate) fn require_non_negative(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "must not be negative"));
    }
    Ok(())
}

/// Reject a value outside the half-open fraction interval (0, 1].
pub(crate) fn require_fraction(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() || value <= 0.0 || value > 1.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "must be in (0, 1]"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("pressure_mpa", "-5", "Pressure must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::infeasible("fatigue", "overstressed").error_code(), "INFEASIBLE");
        assert_eq!(CalcError::inconsistent("names, mtbf_hours", "lengths differ").error_code(), "INCONSISTENT");
        assert_eq!(
            CalcError::unknown_option("load_type", "foo", &["a", "b"]).error_code(),
            "UNKNOWN_OPTION"
        );
    }

    #[test]
    fn test_unknown_option_lists_spellings() {
        let err = CalcError::unknown_option("crack_type", "corner", &["center", "edge", "surface"]);
        let msg = err.to_string();
        assert!(msg.contains("corner"));
        assert!(msg.contains("center, edge, surface"));
    }

    #[test]
    fn test_message_names_field() {
        let err = require_positive("pressure_mpa", 0.0).unwrap_err();
        assert!(err.to_string().contains("pressure_mpa"));
        assert!(err.is_input_error());
    }

    #[test]
    fn test_fraction_bounds() {
        assert!(require_fraction("efficiency", 1.0).is_ok());
        assert!(require_fraction("efficiency", 0.0).is_err());
        assert!(require_fraction("efficiency", 1.01).is_err());
        assert!(require_non_negative("corrosion_allowance_mm", 0.0).is_ok());
        assert!(require_non_negative("corrosion_allowance_mm", f64::NAN).is_err());
    }
}
