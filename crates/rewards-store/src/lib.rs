//! # rewards-store: Receipt Store for Receipt Rewards
//!
//! Holds every scored receipt and the per-user submission history for the
//! life of the process. Nothing is persisted.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Receipt Rewards Data Flow                           │
//! │                                                                         │
//! │  POST /receipts/process                GET /receipts/{id}/points        │
//! │       │                                      │                          │
//! │       ▼                                      ▼                          │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  rewards-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   submit(raw) ──► validate ──► score ──► id ──► insert          │   │
//! │  │   lookup(id)  ──► points | NotFound                             │   │
//! │  │   exists(id)  ──► bool                                          │   │
//! │  │                                                                 │   │
//! │  │   Mutex<UserHistory>      Mutex<HashMap<ReceiptId, Scored>>     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  rewards-core (validation, scoring, history rules)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use rewards_store::ReceiptStore;
//! use serde_json::json;
//!
//! let store = ReceiptStore::new();
//! let scored = store
//!     .submit(&json!({
//!         "retailer": "Target",
//!         "purchaseDate": "2022-01-02",
//!         "purchaseTime": "13:13",
//!         "userId": "alice",
//!         "total": "1.25",
//!         "items": [{ "shortDescription": "Pepsi - 12-oz", "price": "1.25" }]
//!     }))
//!     .unwrap();
//!
//! assert_eq!(store.lookup(scored.id.as_str()).unwrap(), 31 + 1000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use store::{ReceiptStore, ScoredReceipt};
