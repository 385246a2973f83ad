//! # Error Types
//!
//! Domain-specific error types for rewards-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  rewards-core errors (this file)                                       │
//! │  ├── CoreError         - Everything the engine can report              │
//! │  ├── ValidationError   - Receipt shape/format rejections (→ 400)       │
//! │  └── ParseMoneyError   - Decimal amount parsing                        │
//! │                                                                         │
//! │  rewards-store errors (separate crate)                                 │
//! │  └── StoreError        - NotFound, poisoned locks                      │
//! │                                                                         │
//! │  rewards-api errors (in app)                                           │
//! │  └── ApiError          - Status code + JSON body                       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → ApiError → Client    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors produced by the validation and scoring engine.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The submitted receipt was rejected by the validator.
    ///
    /// Always attributable to the client.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// An amount matched the decimal pattern but does not fit in 64-bit cents.
    ///
    /// ## When This Occurs
    /// - `total` or an item `price` with more than ~17 integer digits
    ///
    /// The input is well-formed, so this is an engine fault rather than a
    /// client validation failure.
    #[error("{field} is too large to represent in cents")]
    AmountOverflow { field: String },
}

impl CoreError {
    /// Returns true if this error is a client-side validation failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, CoreError::Validation(_))
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Receipt validation errors.
///
/// Callers treat every variant as the same kind of rejection; the variants
/// only exist so the message names the offending field.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The receipt is absent or not a JSON object.
    #[error("The receipt is invalid: expected a JSON object")]
    NotAnObject,

    /// A required field is missing or falsy.
    #[error("The receipt is invalid: {field} is required")]
    Required { field: String },

    /// A field has the wrong JSON type.
    #[error("The receipt is invalid: {field} must be {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },

    /// A field does not match its format pattern.
    #[error("The receipt is invalid: {field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Money Parse Error
// =============================================================================

/// Failure to parse a two-decimal amount string into cents.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseMoneyError {
    /// Not of the form `digits.dd`.
    #[error("'{0}' is not a two-decimal amount")]
    Malformed(String),

    /// Well-formed but outside the i64 cent range.
    #[error("'{0}' overflows the cent range")]
    Overflow(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "userId".to_string(),
        };
        assert_eq!(err.to_string(), "The receipt is invalid: userId is required");

        let err = ValidationError::WrongType {
            field: "items".to_string(),
            expected: "an array",
        };
        assert_eq!(err.to_string(), "The receipt is invalid: items must be an array");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::NotAnObject.into();
        assert!(core_err.is_validation());
        assert_eq!(
            core_err.to_string(),
            "The receipt is invalid: expected a JSON object"
        );
    }

    #[test]
    fn test_overflow_is_not_validation() {
        let err = CoreError::AmountOverflow {
            field: "total".to_string(),
        };
        assert!(!err.is_validation());
        assert_eq!(err.to_string(), "total is too large to represent in cents");
    }
}
