//! # Store Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  CoreError (validation / overflow)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds NotFound and lock failures            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in rewards-api) ← Status code + JSON body                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rewards_core::CoreError;
use thiserror::Error;

/// Receipt store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Validation or scoring rejected the receipt.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// No receipt with this identifier.
    #[error("No receipt found for id {0}")]
    NotFound(String),

    /// A previous holder of the lock panicked.
    ///
    /// ## When This Occurs
    /// - A bug panicked while the history or receipt map was locked
    ///
    /// The state may be half-updated, so the store refuses to continue.
    #[error("{0} lock poisoned")]
    LockPoisoned(&'static str),
}

impl StoreError {
    /// Creates a NotFound error for a given identifier.
    pub fn not_found(id: impl Into<String>) -> Self {
        StoreError::NotFound(id.into())
    }

    /// Returns true if the receipt was rejected by the validator.
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Core(e) if e.is_validation())
    }

    /// Returns true if the identifier was unknown.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rewards_core::ValidationError;

    #[test]
    fn test_classification() {
        let validation: StoreError = CoreError::from(ValidationError::NotAnObject).into();
        assert!(validation.is_validation());
        assert!(!validation.is_not_found());

        let overflow: StoreError = CoreError::AmountOverflow {
            field: "total".to_string(),
        }
        .into();
        assert!(!overflow.is_validation());

        let missing = StoreError::not_found("abc");
        assert!(missing.is_not_found());
        assert_eq!(missing.to_string(), "No receipt found for id abc");
    }
}
