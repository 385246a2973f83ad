//! # Request Handlers
//!
//! ```text
//! POST /receipts/process       body: receipt JSON  →  {"id": "..."}
//! GET  /receipts/{id}/points                       →  {"points": n}
//! *                                                →  404 {"Error": "Not found"}
//! ```

use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Successful `POST /receipts/process` body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub id: String,
}

/// Successful `GET /receipts/{id}/points` body.
#[derive(Debug, Serialize, Deserialize)]
pub struct PointsResponse {
    pub points: u64,
}

/// Scores and stores a receipt.
///
/// The body is parsed here rather than through the `Json` extractor so that
/// syntax errors get their own response regardless of content type. An empty
/// body is an absent receipt, which the validator rejects.
pub async fn process_receipt(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<ProcessResponse>> {
    let raw: Value = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        serde_json::from_slice(&body)?
    };

    let scored = state.store.submit(&raw)?;

    Ok(Json(ProcessResponse {
        id: scored.id.into(),
    }))
}

/// Returns the points for a stored receipt. The id is not validated; unknown
/// ids are simply not found.
pub async fn get_points(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<PointsResponse>> {
    let points = state.store.lookup(&id)?;
    Ok(Json(PointsResponse { points }))
}

/// Fallback for unmatched paths and methods.
pub async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}
