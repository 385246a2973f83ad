//! # API Error Type
//!
//! The only place where engine errors become HTTP responses.
//!
//! ## Status Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Source                           Status   Body                         │
//! │  ───────────────────────────────  ──────   ──────────────────────────── │
//! │  ValidationError                  400      {"message": "<description>"} │
//! │  Malformed JSON body              400      {"error": "JSON Syntax Error"}│
//! │  StoreError::NotFound             404      {"Messages": "No receipt ..."}│
//! │  No matching route                404      {"Error": "Not found"}       │
//! │  AmountOverflow / LockPoisoned    500      {"error": "Internal ..."}    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rewards_core::CoreError;
use rewards_store::StoreError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

pub const RECEIPT_NOT_FOUND_MESSAGE: &str = "No receipt found for that ID.";
pub const JSON_SYNTAX_MESSAGE: &str = "JSON Syntax Error";
pub const ROUTE_NOT_FOUND_MESSAGE: &str = "Not found";
pub const INTERNAL_MESSAGE: &str = "Internal Server Error";

/// API errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The receipt failed validation.
    #[error("{0}")]
    InvalidReceipt(String),

    /// The request body is not valid JSON.
    #[error("JSON Syntax Error: {0}")]
    JsonSyntax(String),

    /// No receipt with the requested identifier.
    #[error("Receipt not found")]
    ReceiptNotFound,

    /// No route matches the request.
    #[error("Route not found")]
    RouteNotFound,

    /// Anything the client cannot fix.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// API result type.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidReceipt(_) | ApiError::JsonSyntax(_) => StatusCode::BAD_REQUEST,
            ApiError::ReceiptNotFound | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Converts store errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Core(CoreError::Validation(e)) => ApiError::InvalidReceipt(e.to_string()),
            StoreError::NotFound(_) => ApiError::ReceiptNotFound,
            other @ (StoreError::Core(_) | StoreError::LockPoisoned(_)) => {
                ApiError::Internal(other.to_string())
            }
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::JsonSyntax(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match &self {
            ApiError::InvalidReceipt(message) => json!({ "message": message }),
            ApiError::JsonSyntax(detail) => {
                error!(error = %detail, "JSON Syntax Error");
                json!({ "error": JSON_SYNTAX_MESSAGE })
            }
            ApiError::ReceiptNotFound => json!({ "Messages": RECEIPT_NOT_FOUND_MESSAGE }),
            ApiError::RouteNotFound => json!({ "Error": ROUTE_NOT_FOUND_MESSAGE }),
            ApiError::Internal(detail) => {
                error!(error = %detail, "Request failed");
                json!({ "error": INTERNAL_MESSAGE })
            }
        };

        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rewards_core::ValidationError;

    #[test]
    fn test_store_error_mapping() {
        let validation: ApiError = StoreError::from(CoreError::from(ValidationError::NotAnObject)).into();
        assert!(matches!(validation, ApiError::InvalidReceipt(_)));
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);

        let missing: ApiError = StoreError::not_found("abc").into();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let overflow: ApiError = StoreError::from(CoreError::AmountOverflow {
            field: "total".to_string(),
        })
        .into();
        assert_eq!(overflow.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let poisoned: ApiError = StoreError::LockPoisoned("receipts").into();
        assert_eq!(poisoned.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
