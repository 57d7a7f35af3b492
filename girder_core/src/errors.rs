//! # Error Types
//!
//! Structured error types for girder_core. Every engine call returns a
//! [`CalcResult`], so a caller driving a large search can tell a fatal
//! input mistake apart from a geometry point that should simply be skipped.
//!
//! ## Example
//!
//! ```rust
//! use girder_core::errors::{CalcError, CalcResult};
//!
//! fn validate_span(span_m: f64) -> CalcResult<()> {
//!     if span_m <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "span_m",
//!             span_m.to_string(),
//!             "Span must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_span(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for girder_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A load set must carry exactly two support reactions
    #[error("Invalid reaction count: expected 2 reactions, found {found}")]
    InvalidReactionCount { found: usize },

    /// A width, height or section property is zero or negative and would
    /// lead to a division by zero in a stress or buckling formula
    #[error("Degenerate geometry: {quantity} = {value} - {reason}")]
    DegenerateGeometry {
        quantity: String,
        value: String,
        reason: String,
    },

    /// An input value is invalid (out of range, non-finite, unordered, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Two sequences that must line up have different lengths
    #[error("Length mismatch for '{field}': expected {expected}, found {found}")]
    MismatchedLengths {
        field: String,
        expected: usize,
        found: usize,
    },

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
}

impl CalcError {
    /// Create an InvalidReactionCount error
    pub fn invalid_reaction_count(found: usize) -> Self {
        CalcError::InvalidReactionCount { found }
    }

    /// Create a DegenerateGeometry error
    pub fn degenerate_geometry(
        quantity: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::DegenerateGeometry {
            quantity: quantity.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MismatchedLengths error
    pub fn mismatched_lengths(field: impl Into<String>, expected: usize, found: usize) -> Self {
        CalcError::MismatchedLengths {
            field: field.into(),
            expected,
            found,
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

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Whether a geometry search can skip the offending point and carry on.
    ///
    /// Only degenerate geometry qualifies; every other variant signals a
    /// programming or input error that should abort the run.
    pub fn is_skippable(&self) -> bool {
        matches!(self, CalcError::DegenerateGeometry { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidReactionCount { .. } => "INVALID_REACTION_COUNT",
            CalcError::DegenerateGeometry { .. } => "DEGENERATE_GEOMETRY",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MismatchedLengths { .. } => "MISMATCHED_LENGTHS",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::degenerate_geometry("width", "-5", "Width must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("DegenerateGeometry"));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::invalid_reaction_count(3).error_code(), "INVALID_REACTION_COUNT");
        assert_eq!(CalcError::mismatched_lengths("x", 2, 3).error_code(), "MISMATCHED_LENGTHS");
        assert_eq!(CalcError::serialization("bad").error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_only_geometry_is_skippable() {
        assert!(CalcError::degenerate_geometry("I", "0", "zero").is_skippable());
        assert!(!CalcError::invalid_reaction_count(1).is_skippable());
        assert!(!CalcError::invalid_input("n", "0", "empty").is_skippable());
    }

    #[test]
    fn test_display_mentions_count() {
        let message = CalcError::invalid_reaction_count(1).to_string();
        assert!(message.contains("found 1"));
    }
}
