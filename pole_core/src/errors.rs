//! # Error Types
//!
//! Structured error types for pole_core. Calculation errors carry enough
//! context to be handled programmatically; validation failures are reported
//! field-by-field in a serializable record, never thrown across the API.
//!
//! ## Example
//!
//! ```rust
//! use pole_core::errors::{CalcError, CalcResult};
//!
//! fn validate_span(span_ft: f64) -> CalcResult<()> {
//!     if span_ft <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "span_ft".to_string(),
//!             value: span_ft.to_string(),
//!             reason: "Span must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for pole_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
///
/// Each variant provides specific context about what went wrong,
/// enabling programmatic error handling by callers.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Cable specification not found in the reference table
    #[error("Cable not found: {cable_name}")]
    CableNotFound { cable_name: String },

    /// Calculation failed (degenerate geometry, unstable solution, etc.)
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a CableNotFound error
    pub fn cable_not_found(cable_name: impl Into<String>) -> Self {
        CalcError::CableNotFound {
            cable_name: cable_name.into(),
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(
        calculation_type: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::CableNotFound { .. } => "CABLE_NOT_FOUND",
            CalcError::CalculationFailed { .. } => "CALCULATION_FAILED",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

/// Field-keyed validation failures from the analysis orchestrator.
///
/// The orchestrator never throws for missing or unparseable required inputs;
/// it returns one of these naming every offending field. A `BTreeMap` keeps
/// the serialized order deterministic.
///
/// ## Example
///
/// ```rust
/// use pole_core::errors::ValidationErrors;
///
/// let mut errors = ValidationErrors::new();
/// errors.add("pole_height", "Pole height is required");
/// assert!(!errors.is_empty());
/// assert!(errors.fields.contains_key("pole_height"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationErrors {
    /// Error message per offending input field
    pub fields: BTreeMap<String, String>,
}

impl ValidationErrors {
    /// Create an empty error set
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for a field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields.insert(field.into(), message.into());
    }

    /// True when no field failed validation
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Convert to a result: `Ok(())` when empty, `Err(self)` otherwise
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in &self.fields {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("span_ft", "-5.0", "Span must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_field("test").error_code(), "MISSING_FIELD");
        assert_eq!(
            CalcError::cable_not_found("6M strand").error_code(),
            "CABLE_NOT_FOUND"
        );
    }

    #[test]
    fn test_validation_errors_collect() {
        let mut errors = ValidationErrors::new();
        assert!(errors.clone().into_result().is_ok());

        errors.add("pole_height", "Pole height is required");
        errors.add("existing_power_height", "Could not parse measurement");
        let err = errors.into_result().unwrap_err();
        assert_eq!(err.fields.len(), 2);
        assert!(err.to_string().contains("pole_height"));
    }

    #[test]
    fn test_validation_errors_serialization() {
        let mut errors = ValidationErrors::new();
        errors.add("pole_height", "Pole height is required");
        let json = serde_json::to_string(&errors).unwrap();
        assert!(json.contains("pole_height"));
        let roundtrip: ValidationErrors = serde_json::from_str(&json).unwrap();
        assert_eq!(errors, roundtrip);
    }
}
