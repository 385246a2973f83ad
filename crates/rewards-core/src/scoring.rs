//! # Scoring Engine
//!
//! Maps a [`ValidReceipt`] to reward points.
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  #  Rule                                           Points              │
//! │  ─  ─────────────────────────────────────────────  ──────────────────  │
//! │  1  Alphanumeric characters in retailer            +1 each             │
//! │  2  Total has no cents                             +50                 │
//! │  3  Total is a multiple of 0.25                    +25                 │
//! │  4  Every two items                                +5 per pair         │
//! │  5  Trimmed description length % 3 == 0            +ceil(price × 0.2)  │
//! │  6  Day of purchase is odd                         +6                  │
//! │  7  Purchase hour in [14, 16)                      +10                 │
//! │  8  Onboarding: 1st / 2nd / 3rd receipt of user    +1000 / +500 / +250 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rules 1-7 are pure functions of the receipt. Rule 8 reads and advances the
//! [`UserHistory`], exactly once per call to [`score_receipt`].
//!
//! ## Example
//! ```rust
//! use rewards_core::history::UserHistory;
//! use rewards_core::scoring::score;
//! use rewards_core::validation::validate_receipt;
//! use serde_json::json;
//!
//! let receipt = validate_receipt(&json!({
//!     "retailer": "M&M Corner Market",
//!     "purchaseDate": "2022-03-20",
//!     "purchaseTime": "14:33",
//!     "userId": "alice",
//!     "items": [
//!         { "shortDescription": "Gatorade", "price": "2.25" },
//!         { "shortDescription": "Gatorade", "price": "2.25" },
//!         { "shortDescription": "Gatorade", "price": "2.25" },
//!         { "shortDescription": "Gatorade", "price": "2.25" }
//!     ],
//!     "total": "9.00"
//! }))
//! .unwrap();
//!
//! let mut history = UserHistory::new();
//! assert_eq!(score(&receipt, &mut history), 109 + 1000);
//! assert_eq!(score(&receipt, &mut history), 109 + 500);
//! ```

use serde::{Deserialize, Serialize};

use crate::history::{OnboardingTier, UserHistory};
use crate::money::Money;
use crate::types::{PurchaseDate, PurchaseTime, ValidItem, ValidReceipt};

// =============================================================================
// Rule Constants
// =============================================================================

pub const ROUND_DOLLAR_POINTS: u64 = 50;
pub const QUARTER_MULTIPLE_POINTS: u64 = 25;
pub const ITEM_PAIR_POINTS: u64 = 5;
pub const ODD_DAY_POINTS: u64 = 6;
pub const AFTERNOON_POINTS: u64 = 10;

/// Description bonus rate: 20% of the item price, in basis points.
pub const DESCRIPTION_RATE_BPS: u32 = 2000;

/// Afternoon window, hours only: [start, end).
pub const AFTERNOON_START_HOUR: u8 = 14;
pub const AFTERNOON_END_HOUR: u8 = 16;

const QUARTER: Money = Money::from_cents(25);

// =============================================================================
// Breakdown
// =============================================================================

/// Points earned by each rule for one receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsBreakdown {
    pub retailer: u64,
    pub round_dollar: u64,
    pub quarter_multiple: u64,
    pub item_pairs: u64,
    pub descriptions: u64,
    pub odd_day: u64,
    pub afternoon: u64,
    pub onboarding: u64,
    pub tier: OnboardingTier,
}

impl PointsBreakdown {
    /// Sum of all contributions.
    pub fn total(&self) -> u64 {
        [
            self.retailer,
            self.round_dollar,
            self.quarter_multiple,
            self.item_pairs,
            self.descriptions,
            self.odd_day,
            self.afternoon,
            self.onboarding,
        ]
        .into_iter()
        .fold(0u64, u64::saturating_add)
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Scores a receipt and records it against the user's history.
pub fn score_receipt(receipt: &ValidReceipt, history: &mut UserHistory) -> PointsBreakdown {
    let tier = history.record_and_classify(&receipt.user_id);

    PointsBreakdown {
        retailer: retailer_points(&receipt.retailer),
        round_dollar: round_dollar_points(receipt.total),
        quarter_multiple: quarter_multiple_points(receipt.total),
        item_pairs: item_pair_points(receipt.items.len()),
        descriptions: receipt.items.iter().map(description_points).fold(0, u64::saturating_add),
        odd_day: odd_day_points(receipt.purchase_date),
        afternoon: afternoon_points(receipt.purchase_time),
        onboarding: tier.bonus_points(),
        tier,
    }
}

/// Scores a receipt and returns only the total.
pub fn score(receipt: &ValidReceipt, history: &mut UserHistory) -> u64 {
    score_receipt(receipt, history).total()
}

// =============================================================================
// Individual Rules
// =============================================================================

/// Rule 1: one point per ASCII letter or digit.
pub fn retailer_points(retailer: &str) -> u64 {
    retailer.chars().filter(char::is_ascii_alphanumeric).count() as u64
}

/// Rule 2: the total is a round dollar amount.
pub fn round_dollar_points(total: Money) -> u64 {
    if total.is_whole_dollars() {
        ROUND_DOLLAR_POINTS
    } else {
        0
    }
}

/// Rule 3: the total is a multiple of $0.25.
pub fn quarter_multiple_points(total: Money) -> u64 {
    if total.is_multiple_of(QUARTER) {
        QUARTER_MULTIPLE_POINTS
    } else {
        0
    }
}

/// Rule 4: five points for every complete pair of items.
pub fn item_pair_points(item_count: usize) -> u64 {
    (item_count / 2) as u64 * ITEM_PAIR_POINTS
}

/// Rule 5: `ceil(price × 0.2)` when the trimmed description length is a
/// multiple of three.
///
/// A zero-length description counts as a multiple of three. The validator
/// never lets one through.
pub fn description_points(item: &ValidItem) -> u64 {
    let length = item.short_description.trim().chars().count();
    if length % 3 != 0 {
        return 0;
    }
    item.price.scaled_dollars_ceil(DESCRIPTION_RATE_BPS).max(0) as u64
}

/// Rule 6: the day of the month is odd.
pub fn odd_day_points(date: PurchaseDate) -> u64 {
    if date.is_odd_day() {
        ODD_DAY_POINTS
    } else {
        0
    }
}

/// Rule 7: bought from 14:00 up to, not including, 16:00.
pub fn afternoon_points(time: PurchaseTime) -> u64 {
    if (AFTERNOON_START_HOUR..AFTERNOON_END_HOUR).contains(&time.hour) {
        AFTERNOON_POINTS
    } else {
        0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_receipt;
    use serde_json::json;

    fn money(s: &str) -> Money {
        s.parse().unwrap()
    }

    fn item(description: &str, price: &str) -> ValidItem {
        ValidItem {
            short_description: description.to_string(),
            price: money(price),
        }
    }

    fn time(hour: u8, minute: u8) -> PurchaseTime {
        PurchaseTime { hour, minute }
    }

    #[test]
    fn test_retailer_points() {
        assert_eq!(retailer_points("Target"), 6);
        assert_eq!(retailer_points("M&M Corner Market"), 14);
        assert_eq!(retailer_points("Walgreens - 7th Ave"), 15);
        assert_eq!(retailer_points("a_b"), 2);
    }

    #[test]
    fn test_total_rules() {
        let hundred = money("100.00");
        assert_eq!(round_dollar_points(hundred) + quarter_multiple_points(hundred), 75);

        let odd = money("10.35");
        assert_eq!(round_dollar_points(odd) + quarter_multiple_points(odd), 0);

        let quarter = money("9.75");
        assert_eq!(round_dollar_points(quarter), 0);
        assert_eq!(quarter_multiple_points(quarter), 25);

        let zero = money("0.00");
        assert_eq!(round_dollar_points(zero) + quarter_multiple_points(zero), 75);
    }

    #[test]
    fn test_item_pair_points() {
        assert_eq!(item_pair_points(0), 0);
        assert_eq!(item_pair_points(1), 0);
        assert_eq!(item_pair_points(4), 10);
        assert_eq!(item_pair_points(5), 10);
    }

    #[test]
    fn test_description_points() {
        assert_eq!(description_points(&item("Gatorade", "2.25")), 0);
        assert_eq!(description_points(&item("Doritos", "3.35")), 0);
        assert_eq!(description_points(&item("Pepsi 12P", "5.00")), 1);
        assert_eq!(description_points(&item("Emils Cheese Pizza", "12.25")), 3);
        assert_eq!(description_points(&item("   Klarbrunn 12-PK 12 FL OZ  ", "12.00")), 3);
        // Exact arithmetic: 15.00 * 0.2 is exactly 3
        assert_eq!(description_points(&item("abc", "15.00")), 3);
    }

    #[test]
    fn test_empty_description_counts_as_multiple_of_three() {
        assert_eq!(description_points(&item("", "5.00")), 1);
        assert_eq!(description_points(&item("   ", "5.01")), 2);
    }

    #[test]
    fn test_odd_day_points() {
        let date = |day| PurchaseDate { year: 2024, month: 1, day };
        assert_eq!(odd_day_points(date(15)), 6);
        assert_eq!(odd_day_points(date(16)), 0);
    }

    #[test]
    fn test_afternoon_points() {
        assert_eq!(afternoon_points(time(14, 0)), 10);
        assert_eq!(afternoon_points(time(14, 59)), 10);
        assert_eq!(afternoon_points(time(15, 59)), 10);
        assert_eq!(afternoon_points(time(16, 0)), 0);
        assert_eq!(afternoon_points(time(13, 59)), 0);
    }

    #[test]
    fn test_target_receipt() {
        let receipt = validate_receipt(&json!({
            "retailer": "Target",
            "purchaseDate": "2022-01-01",
            "purchaseTime": "13:01",
            "userId": "alice",
            "items": [
                { "shortDescription": "Mountain Dew 12PK", "price": "6.49" },
                { "shortDescription": "Emils Cheese Pizza", "price": "12.25" },
                { "shortDescription": "Knorr Creamy Chicken", "price": "1.26" },
                { "shortDescription": "Doritos Nacho Cheese", "price": "3.35" },
                { "shortDescription": "   Klarbrunn 12-PK 12 FL OZ  ", "price": "12.00" }
            ],
            "total": "35.35"
        }))
        .unwrap();

        let mut history = UserHistory::new();
        let breakdown = score_receipt(&receipt, &mut history);
        assert_eq!(breakdown.retailer, 6);
        assert_eq!(breakdown.item_pairs, 10);
        assert_eq!(breakdown.descriptions, 6);
        assert_eq!(breakdown.odd_day, 6);
        assert_eq!(breakdown.tier, OnboardingTier::First);
        assert_eq!(breakdown.total(), 28 + 1000);
    }

    #[test]
    fn test_onboarding_sequence() {
        let receipt = validate_receipt(&json!({
            "retailer": "Target",
            "purchaseDate": "2022-01-02",
            "purchaseTime": "13:01",
            "userId": "bob",
            "items": [{ "shortDescription": "Gatorade", "price": "2.25" }],
            "total": "2.26"
        }))
        .unwrap();

        let mut history = UserHistory::new();
        let totals: Vec<u64> = (0..4).map(|_| score(&receipt, &mut history)).collect();
        assert_eq!(totals, vec![1006, 506, 256, 6]);
        assert_eq!(history.submissions("bob"), 4);
    }

    #[test]
    fn test_breakdown_total_saturates() {
        let breakdown = PointsBreakdown {
            retailer: u64::MAX,
            round_dollar: 50,
            quarter_multiple: 0,
            item_pairs: 0,
            descriptions: 0,
            odd_day: 0,
            afternoon: 0,
            onboarding: 0,
            tier: OnboardingTier::Returning,
        };
        assert_eq!(breakdown.total(), u64::MAX);
    }
}
