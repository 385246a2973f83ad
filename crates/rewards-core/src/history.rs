//! # User History
//!
//! Counts accepted receipts per user to grant onboarding bonuses.
//!
//! ```text
//! submission #   pre-increment count   tier        bonus
//! ───────────    ───────────────────   ─────────   ─────
//!      1                  0            First        1000
//!      2                  1            Second        500
//!      3                  2            Third         250
//!     4+                 ≥3            Returning       0
//! ```
//!
//! The tracker is a plain value. Callers that share it across threads wrap
//! it in a lock so that read-increment-classify happens atomically.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Which onboarding bonus a submission earns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingTier {
    First,
    Second,
    Third,
    Returning,
}

impl OnboardingTier {
    /// Classifies a submission by how many receipts the user had before it.
    pub const fn from_prior_submissions(prior: u32) -> Self {
        match prior {
            0 => OnboardingTier::First,
            1 => OnboardingTier::Second,
            2 => OnboardingTier::Third,
            _ => OnboardingTier::Returning,
        }
    }

    /// Bonus points granted for this tier.
    pub const fn bonus_points(&self) -> u64 {
        match self {
            OnboardingTier::First => 1000,
            OnboardingTier::Second => 500,
            OnboardingTier::Third => 250,
            OnboardingTier::Returning => 0,
        }
    }
}

/// Accepted-receipt counts keyed by user id.
///
/// ## Invariants
/// - Counts never decrease
/// - Entries are never removed
#[derive(Debug, Clone, Default)]
pub struct UserHistory {
    submissions: HashMap<String, u32>,
}

impl UserHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one accepted receipt for `user_id` and returns the tier it
    /// earned, based on the count before this call.
    ///
    /// ## Example
    /// ```rust
    /// use rewards_core::history::{OnboardingTier, UserHistory};
    ///
    /// let mut history = UserHistory::new();
    /// assert_eq!(history.record_and_classify("alice"), OnboardingTier::First);
    /// assert_eq!(history.record_and_classify("alice"), OnboardingTier::Second);
    /// assert_eq!(history.record_and_classify("bob"), OnboardingTier::First);
    /// ```
    pub fn record_and_classify(&mut self, user_id: &str) -> OnboardingTier {
        let count = self.submissions.entry(user_id.to_string()).or_insert(0);
        let tier = OnboardingTier::from_prior_submissions(*count);
        *count = count.saturating_add(1);
        tier
    }

    /// Number of accepted receipts recorded for `user_id`.
    pub fn submissions(&self, user_id: &str) -> u32 {
        self.submissions.get(user_id).copied().unwrap_or(0)
    }

    /// Number of distinct users seen.
    pub fn user_count(&self) -> usize {
        self.submissions.len()
    }
}
