//! # Receipt Store
//!
//! Accepts raw receipts, scores them and keeps the results for the life of
//! the process.
//!
//! ## Submission Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       submit(raw)                                       │
//! │                                                                         │
//! │  1. VALIDATE                                                           │
//! │     └── validate_receipt(raw) → ValidReceipt  (no lock held)            │
//! │                                                                         │
//! │  2. LOCK history, then receipts  (always in this order)                │
//! │     └── score_receipt() → read-increment-classify for the user         │
//! │     └── ReceiptId::generate() until unused                             │
//! │     └── insert ScoredReceipt                                           │
//! │                                                                         │
//! │  3. UNLOCK, return the stored record                                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! Both maps sit behind `std::sync::Mutex`. Nothing here awaits, so the
//! guards are never held across a suspension point.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use rewards_core::{score_receipt, validate_receipt, PointsBreakdown, ReceiptId, UserHistory};

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Scored Receipt
// =============================================================================

/// A receipt that was accepted and scored.
///
/// Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredReceipt {
    pub id: ReceiptId,
    pub user_id: String,
    pub points: u64,
    pub breakdown: PointsBreakdown,
    pub processed_at: DateTime<Utc>,
}

// =============================================================================
// Receipt Store
// =============================================================================

/// In-memory store of scored receipts and per-user history.
///
/// Construct one per process and share it (e.g. in an `Arc`).
#[derive(Debug, Default)]
pub struct ReceiptStore {
    history: Mutex<UserHistory>,
    receipts: Mutex<HashMap<ReceiptId, ScoredReceipt>>,
}

impl ReceiptStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose user history is already populated.
    pub fn with_history(history: UserHistory) -> Self {
        ReceiptStore {
            history: Mutex::new(history),
            receipts: Mutex::new(HashMap::new()),
        }
    }

    /// Validates, scores and stores a raw receipt.
    ///
    /// ## Errors
    /// - [`StoreError::Core`] with the validator's error, unchanged
    /// - [`StoreError::LockPoisoned`] if shared state is unusable
    ///
    /// On error nothing is recorded, including the user's history.
    pub fn submit(&self, raw: &Value) -> StoreResult<ScoredReceipt> {
        let receipt = validate_receipt(raw).map_err(|e| {
            warn!(error = %e, "Receipt rejected");
            StoreError::from(e)
        })?;

        let mut history = lock(&self.history, "history")?;
        let mut receipts = lock(&self.receipts, "receipts")?;

        let breakdown = score_receipt(&receipt, &mut history);

        let mut id = ReceiptId::generate();
        while receipts.contains_key(&id) {
            id = ReceiptId::generate();
        }

        let scored = ScoredReceipt {
            id: id.clone(),
            user_id: receipt.user_id,
            points: breakdown.total(),
            breakdown,
            processed_at: Utc::now(),
        };
        receipts.insert(id, scored.clone());

        info!(
            id = %scored.id,
            user_id = %scored.user_id,
            points = scored.points,
            "Receipt processed"
        );
        debug!(id = %scored.id, breakdown = ?scored.breakdown, "Points breakdown");

        Ok(scored)
    }

    /// Returns the points stored for `id`.
    ///
    /// A zero-point receipt is `Ok(0)`, never `NotFound`.
    pub fn lookup(&self, id: &str) -> StoreResult<u64> {
        self.get(id).map(|scored| scored.points)
    }

    /// Returns the full stored record for `id`.
    pub fn get(&self, id: &str) -> StoreResult<ScoredReceipt> {
        let receipts = lock(&self.receipts, "receipts")?;
        receipts
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(id))
    }

    /// Returns true if a receipt with `id` was stored.
    pub fn exists(&self, id: &str) -> StoreResult<bool> {
        match self.get(id) {
            Ok(_) => Ok(true),
            Err(StoreError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Number of stored receipts.
    pub fn len(&self) -> StoreResult<usize> {
        Ok(lock(&self.receipts, "receipts")?.len())
    }

    /// Returns true if no receipts are stored.
    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Number of receipts accepted for `user_id`.
    pub fn submissions(&self, user_id: &str) -> StoreResult<u32> {
        Ok(lock(&self.history, "history")?.submissions(user_id))
    }
}

fn lock<'a, T>(mutex: &'a Mutex<T>, name: &'static str) -> StoreResult<MutexGuard<'a, T>> {
    mutex.lock().map_err(|_| StoreError::LockPoisoned(name))
}

// =============================================================================
// Unit Tests
// =============================================================================
