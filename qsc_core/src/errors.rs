//! # Error Types
//!
//! Structured error types for qsc_core. The calculation variants mirror the
//! validation taxonomy of the estimators (dimensions, waste factor, mix
//! ratio); the remaining variants cover the project store and report
//! rendering.
//!
//! ## Example
//!
//! ```rust
//! use qsc_core::errors::{CalcError, CalcResult};
//!
//! fn validate_length(length_m: f64) -> CalcResult<()> {
//!     if length_m <= 0.0 {
//!         return Err(CalcError::invalid_dimension(
//!             "length_m",
//!             length_m.to_string(),
//!             "Length must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for qsc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation and store operations.
///
/// Each variant provides specific context about what went wrong. Calculators
/// validate eagerly and return the first violation found; they never panic
/// and never produce a partial result.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A required length/width/height/thickness field is non-positive
    /// (or, for a mortar joint, negative)
    #[error("Invalid dimension '{field}': {value} - {reason}")]
    InvalidDimension {
        field: String,
        value: String,
        reason: String,
    },

    /// Waste factor is outside [0, 100]
    #[error("Invalid waste factor: {value} - {reason}")]
    InvalidWasteFactor { value: String, reason: String },

    /// Mix-ratio string has wrong arity, non-numeric parts, or a
    /// non-positive part
    #[error("Invalid mix ratio '{input}': {reason}")]
    InvalidMixRatio { input: String, reason: String },

    /// A project with this name already exists in the store
    #[error("Project already exists: '{name}'")]
    ProjectExists { name: String },

    /// No project with this name exists in the store
    #[error("Project not found: '{name}'")]
    ProjectNotFound { name: String },

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
    /// Create an InvalidDimension error
    pub fn invalid_dimension(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidDimension {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidWasteFactor error
    pub fn invalid_waste_factor(value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidWasteFactor {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidMixRatio error
    pub fn invalid_mix_ratio(input: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidMixRatio {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create a ProjectExists error
    pub fn project_exists(name: impl Into<String>) -> Self {
        CalcError::ProjectExists { name: name.into() }
    }

    /// Create a ProjectNotFound error
    pub fn project_not_found(name: impl Into<String>) -> Self {
        CalcError::ProjectNotFound { name: name.into() }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True if this is one of the input-validation failures produced by
    /// the calculators (as opposed to a store or rendering failure).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidDimension { .. }
                | CalcError::InvalidWasteFactor { .. }
                | CalcError::InvalidMixRatio { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidDimension { .. } => "INVALID_DIMENSION",
            CalcError::InvalidWasteFactor { .. } => "INVALID_WASTE_FACTOR",
            CalcError::InvalidMixRatio { .. } => "INVALID_MIX_RATIO",
            CalcError::ProjectExists { .. } => "PROJECT_EXISTS",
            CalcError::ProjectNotFound { .. } => "PROJECT_NOT_FOUND",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}
