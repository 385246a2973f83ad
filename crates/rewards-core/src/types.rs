//! # Domain Types
//!
//! Typed receipt values produced by the validator and consumed by scoring.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  serde_json::Value ──► validate_receipt() ──► ValidReceipt              │
//! │  (untyped boundary)                           ─────────────             │
//! │                                               retailer: String          │
//! │                                               total: Money              │
//! │                                               purchase_date: PurchaseDate│
//! │                                               purchase_time: PurchaseTime│
//! │                                               user_id: String           │
//! │                                               items: Vec<ValidItem>     │
//! │                                                                         │
//! │  ReceiptId: UUID v4, assigned by the store on acceptance                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use uuid::Uuid;

use crate::money::Money;

// =============================================================================
// Receipt Identifier
// =============================================================================

/// Opaque identifier for a scored receipt.
///
/// Only uniqueness is part of the contract; the UUID text form is an
/// implementation detail that clients must not parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiptId(String);

impl ReceiptId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        ReceiptId(Uuid::new_v4().to_string())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Lets maps keyed by ReceiptId be queried with a plain &str
impl Borrow<str> for ReceiptId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<ReceiptId> for String {
    fn from(id: ReceiptId) -> Self {
        id.0
    }
}

// =============================================================================
// Purchase Date / Time
// =============================================================================

/// Calendar date as written on the receipt (`YYYY-MM-DD`).
///
/// Components are taken verbatim from the digits; no timezone is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl PurchaseDate {
    /// Returns true if the day of the month is odd.
    #[inline]
    pub const fn is_odd_day(&self) -> bool {
        self.day % 2 == 1
    }
}

/// Wall-clock time as written on the receipt (`HH:MM`, 24-hour).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseTime {
    pub hour: u8,
    pub minute: u8,
}

// =============================================================================
// Validated Receipt
// =============================================================================

/// A line item that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidItem {
    pub short_description: String,
    pub price: Money,
}

/// A receipt that passed validation.
///
/// Only [`crate::validation::validate_receipt`] builds these from client
/// input, so every downstream consumer can rely on the formats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidReceipt {
    pub retailer: String,
    pub total: Money,
    pub purchase_date: PurchaseDate,
    pub purchase_time: PurchaseTime,
    pub user_id: String,
    pub items: Vec<ValidItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_distinct() {
        let a = ReceiptId::generate();
        let b = ReceiptId::generate();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn test_odd_day() {
        let date = |day| PurchaseDate { year: 2024, month: 1, day };
        assert!(date(15).is_odd_day());
        assert!(!date(16).is_odd_day());
        assert!(date(1).is_odd_day());
    }
}
