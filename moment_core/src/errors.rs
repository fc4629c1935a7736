//! # Error Types
//!
//! Structured error types for moment_core. Every failure carries enough
//! context (field, offending value, reason) to be reported to a user or
//! serialized for a tool consuming the JSON output.
//!
//! ## Example
//!
//! ```rust
//! use moment_core::errors::{CalcError, CalcResult};
//!
//! fn validate_length(beam_length: f64) -> CalcResult<()> {
//!     if beam_length <= 0.0 {
//!         return Err(CalcError::invalid_domain(
//!             "beam_length",
//!             beam_length.to_string(),
//!             "Beam length must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for moment_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for diagram operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (negative magnitude, unparseable label, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// The diagram domain is degenerate (beam length or sample count)
    #[error("Invalid domain for '{field}': {value} - {reason}")]
    InvalidDomain {
        field: String,
        value: String,
        reason: String,
    },

    /// A position or magnitude is NaN or infinite
    #[error("Non-finite input for '{field}': {value}")]
    NonFiniteInput { field: String, value: String },

    /// A load lies outside [0, beam_length]
    #[error("Position {position} of '{field}' is outside the beam [0, {beam_length}]")]
    PositionOutOfRange {
        field: String,
        position: f64,
        beam_length: f64,
    },

    /// A session row could not be found
    #[error("Load not found: {reference}")]
    LoadNotFound { reference: String },

    /// Configuration could not be parsed or written
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },
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

    /// Create an InvalidDomain error
    pub fn invalid_domain(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidDomain {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a NonFiniteInput error
    pub fn non_finite(field: impl Into<String>, value: f64) -> Self {
        CalcError::NonFiniteInput {
            field: field.into(),
            value: value.to_string(),
        }
    }

    /// Create a PositionOutOfRange error
    pub fn position_out_of_range(field: impl Into<String>, position: f64, beam_length: f64) -> Self {
        CalcError::PositionOutOfRange {
            field: field.into(),
            position,
            beam_length,
        }
    }

    /// Create a LoadNotFound error
    pub fn load_not_found(reference: impl Into<String>) -> Self {
        CalcError::LoadNotFound {
            reference: reference.into(),
        }
    }

    /// Create a ConfigError
    pub fn config_error(reason: impl Into<String>) -> Self {
        CalcError::ConfigError {
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

    /// True for errors caused by the values the user entered
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidInput { .. }
                | CalcError::InvalidDomain { .. }
                | CalcError::NonFiniteInput { .. }
                | CalcError::PositionOutOfRange { .. }
                | CalcError::LoadNotFound { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::InvalidDomain { .. } => "INVALID_DOMAIN",
            CalcError::NonFiniteInput { .. } => "NON_FINITE_INPUT",
            CalcError::PositionOutOfRange { .. } => "POSITION_OUT_OF_RANGE",
            CalcError::LoadNotFound { .. } => "LOAD_NOT_FOUND",
            CalcError::ConfigError { .. } => "CONFIG_ERROR",
            CalcError::FileError { .. } => "FILE_ERROR",
        }
    }
}

impl From<toml::de::Error> for CalcError {
    fn from(err: toml::de::Error) -> Self {
        CalcError::config_error(err.to_string())
    }
}

impl From<toml::ser::Error> for CalcError {
    fn from(err: toml::ser::Error) -> Self {
        CalcError::config_error(err.to_string())
    }
}
