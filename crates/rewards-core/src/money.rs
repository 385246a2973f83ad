//! # Money Module
//!
//! Provides the `Money` type for handling receipt amounts exactly.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With floats:                                                           │
//! │    15.00 * 0.2 = 3.0000000000000004  → ceil = 4  ❌ WRONG!             │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    1500 cents * 2000 bps / 1_000_000 = 3 exactly → ceil = 3            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rewards_core::money::Money;
//!
//! let total: Money = "35.35".parse().unwrap();
//! assert_eq!(total.cents(), 3535);
//! assert!(!total.is_whole_dollars());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseMoneyError;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Matches the rest of the arithmetic, sign never appears
///   on receipts because the format patterns forbid it
/// - **Single field tuple struct**: Zero-cost abstraction over i64
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use rewards_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Parses a `digits.dd` amount string into exact cents.
    ///
    /// ## Rules
    /// - At least one integer digit
    /// - Exactly two fraction digits
    /// - No sign, no whitespace, no exponent
    ///
    /// ## Example
    /// ```rust
    /// use rewards_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("6.49").unwrap().cents(), 649);
    /// assert!(Money::parse_decimal("10.5").is_err());
    /// ```
    pub fn parse_decimal(s: &str) -> Result<Self, ParseMoneyError> {
        let malformed = || ParseMoneyError::Malformed(s.to_string());

        let (whole, fraction) = s.split_once('.').ok_or_else(malformed)?;
        let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(whole) || fraction.len() != 2 || !all_digits(fraction) {
            return Err(malformed());
        }

        // Digits are checked above, so a parse failure here can only be overflow
        let overflow = || ParseMoneyError::Overflow(s.to_string());
        let dollars: i64 = whole.parse().map_err(|_| overflow())?;
        let cents: i64 = fraction.parse().map_err(|_| malformed())?;

        dollars
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .map(Money)
            .ok_or_else(overflow)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the amount has no cents.
    ///
    /// ## Example
    /// ```rust
    /// use rewards_core::money::Money;
    ///
    /// assert!(Money::from_cents(10000).is_whole_dollars());
    /// assert!(!Money::from_cents(1035).is_whole_dollars());
    /// ```
    #[inline]
    pub const fn is_whole_dollars(&self) -> bool {
        self.0 % 100 == 0
    }

    /// Checks if the amount is an exact multiple of `step`.
    ///
    /// A zero step only divides zero.
    ///
    /// ## Example
    /// ```rust
    /// use rewards_core::money::Money;
    ///
    /// let quarter = Money::from_cents(25);
    /// assert!(Money::from_cents(975).is_multiple_of(quarter));
    /// assert!(!Money::from_cents(1035).is_multiple_of(quarter));
    /// ```
    #[inline]
    pub const fn is_multiple_of(&self, step: Money) -> bool {
        if step.0 == 0 {
            return self.0 == 0;
        }
        self.0 % step.0 == 0
    }

    /// Scales the amount by a rate in basis points and rounds the resulting
    /// dollar figure up to a whole number.
    ///
    /// ## Implementation
    /// `ceil(cents * bps / (100 * 10000))` in i128, so no float ever appears.
    ///
    /// ## Example
    /// ```rust
    /// use rewards_core::money::Money;
    ///
    /// // 20% of $12.25 = 2.45 → 3
    /// assert_eq!(Money::from_cents(1225).scaled_dollars_ceil(2000), 3);
    /// // 20% of $15.00 = 3.00 → 3 (floats would say 4)
    /// assert_eq!(Money::from_cents(1500).scaled_dollars_ceil(2000), 3);
    /// ```
    pub fn scaled_dollars_ceil(&self, rate_bps: u32) -> i64 {
        const DENOMINATOR: i128 = 100 * 10_000;
        let scaled = self.0 as i128 * rate_bps as i128;
        // ceil(n / d) == -floor(-n / d) for positive d
        let ceil = -((-scaled).div_euclid(DENOMINATOR));
        ceil as i64
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl FromStr for Money {
    type Err = ParseMoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::parse_decimal(s)
    }
}

/// Display implementation shows money in a human-readable format.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
