//! # rewards-core: Pure Business Logic for Receipt Rewards
//!
//! This crate is the **heart** of Receipt Rewards. It validates submitted
//! receipts and scores them, as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Receipt Rewards Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    rewards-api (axum)                           │   │
//! │  │    POST /receipts/process        GET /receipts/{id}/points      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 rewards-store (ReceiptStore)                    │   │
//! │  │          Mutex<UserHistory> + Mutex<HashMap<id, points>>        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ rewards-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │validation │  │  scoring  │  │  history  │  │   money   │  │   │
//! │  │   │  Value →  │  │  8 rules  │  │ per-user  │  │  integer  │  │   │
//! │  │   │ValidRecpt │  │ breakdown │  │  counts   │  │   cents   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOCKS • NO LOGGING • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Validated receipt types and [`ReceiptId`]
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Raw JSON → [`ValidReceipt`]
//! - [`scoring`] - Points rules
//! - [`history`] - Onboarding tiers per user
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Same receipt and history in, same points out
//! 2. **No I/O**: Network, file system and locks live in other crates
//! 3. **Integer Money**: All amounts are cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod history;
pub mod money;
pub mod scoring;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use history::{OnboardingTier, UserHistory};
pub use money::Money;
pub use scoring::{score, score_receipt, PointsBreakdown};
pub use types::*;
pub use validation::validate_receipt;
