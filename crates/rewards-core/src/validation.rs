//! # Validation Module
//!
//! Turns an untyped JSON receipt into a [`ValidReceipt`].
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP body (rewards-api)                                      │
//! │  └── JSON syntax only → 400 "JSON Syntax Error"                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Object shape, required fields, falsy values                       │
//! │  ├── JSON types (string / array / object)                              │
//! │  └── Format patterns (retailer, amounts, date, time, descriptions)     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  ValidReceipt: typed, parsed, safe for scoring                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rewards_core::validation::validate_receipt;
//! use serde_json::json;
//!
//! let receipt = validate_receipt(&json!({
//!     "retailer": "Target",
//!     "purchaseDate": "2022-01-01",
//!     "purchaseTime": "13:01",
//!     "userId": "user-1",
//!     "items": [{ "shortDescription": "Mountain Dew 12PK", "price": "6.49" }],
//!     "total": "6.49"
//! }))
//! .unwrap();
//! assert_eq!(receipt.total.cents(), 649);
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::{CoreError, CoreResult, ParseMoneyError, ValidationError};
use crate::money::Money;
use crate::types::{PurchaseDate, PurchaseTime, ValidItem, ValidReceipt};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Names & Patterns
// =============================================================================

pub const FIELD_RETAILER: &str = "retailer";
pub const FIELD_TOTAL: &str = "total";
pub const FIELD_ITEMS: &str = "items";
pub const FIELD_PURCHASE_DATE: &str = "purchaseDate";
pub const FIELD_PURCHASE_TIME: &str = "purchaseTime";
pub const FIELD_USER_ID: &str = "userId";
pub const FIELD_SHORT_DESCRIPTION: &str = "shortDescription";
pub const FIELD_PRICE: &str = "price";

// Word characters are ASCII-only ([A-Za-z0-9_]); digits are ASCII-only.
static RETAILER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_\s&-]+$").expect("retailer pattern"));
static AMOUNT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.[0-9]{2}$").expect("amount pattern"));
static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<year>[0-9]{4})-(?P<month>[0-9]{2})-(?P<day>[0-9]{2})$").expect("date pattern")
});
static TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<hour>[0-9]{2}):(?P<minute>[0-9]{2})$").expect("time pattern")
});
static DESCRIPTION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_\s-]+$").expect("description pattern"));

// =============================================================================
// Receipt Validation
// =============================================================================

/// Validates a raw receipt and produces its typed form.
///
/// ## Rules
/// - Input must be a JSON object
/// - `retailer`, `total`, `items`, `purchaseDate`, `purchaseTime`, `userId`
///   must be present and not falsy (`null`, `false`, `0`, `""`)
/// - All of them must be strings, except `items` which must be an array
/// - Every item must be an object whose `shortDescription` and `price` are
///   strings
/// - Every string must match its format pattern
///
/// An empty `items` array is accepted.
///
/// ## Errors
/// - [`CoreError::Validation`] for any rule above
/// - [`CoreError::AmountOverflow`] when an amount matches its pattern but
///   does not fit in i64 cents
pub fn validate_receipt(input: &Value) -> CoreResult<ValidReceipt> {
    let object = input.as_object().ok_or(ValidationError::NotAnObject)?;

    // Presence/truthiness first, for every field, then types
    for field in [
        FIELD_RETAILER,
        FIELD_TOTAL,
        FIELD_ITEMS,
        FIELD_PURCHASE_DATE,
        FIELD_PURCHASE_TIME,
        FIELD_USER_ID,
    ] {
        require_truthy(object, field)?;
    }

    let retailer = string_field(object, FIELD_RETAILER)?;
    let total = string_field(object, FIELD_TOTAL)?;
    let raw_items = array_field(object, FIELD_ITEMS)?;
    let purchase_date = string_field(object, FIELD_PURCHASE_DATE)?;
    let purchase_time = string_field(object, FIELD_PURCHASE_TIME)?;
    let user_id = string_field(object, FIELD_USER_ID)?;

    let item_fields = raw_items
        .iter()
        .enumerate()
        .map(|(index, item)| item_strings(index, item))
        .collect::<ValidationResult<Vec<_>>>()?;

    validate_retailer(retailer)?;
    check_pattern(&AMOUNT_PATTERN, total, FIELD_TOTAL, "must be digits with exactly two decimal places")?;
    let purchase_date = parse_purchase_date(purchase_date)?;
    let purchase_time = parse_purchase_time(purchase_time)?;

    for (index, (description, price)) in item_fields.iter().enumerate() {
        validate_short_description(description, index)?;
        check_pattern(
            &AMOUNT_PATTERN,
            price,
            &item_field_name(index, FIELD_PRICE),
            "must be digits with exactly two decimal places",
        )?;
    }

    let items = item_fields
        .into_iter()
        .enumerate()
        .map(|(index, (description, price))| {
            Ok(ValidItem {
                short_description: description.to_string(),
                price: parse_amount(price, &item_field_name(index, FIELD_PRICE))?,
            })
        })
        .collect::<CoreResult<Vec<_>>>()?;

    Ok(ValidReceipt {
        retailer: retailer.to_string(),
        total: parse_amount(total, FIELD_TOTAL)?,
        purchase_date,
        purchase_time,
        user_id: user_id.to_string(),
        items,
    })
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a retailer name: word characters, whitespace, `-` and `&`.
///
/// ## Example
/// ```rust
/// use rewards_core::validation::validate_retailer;
///
/// assert!(validate_retailer("M&M Corner Market").is_ok());
/// assert!(validate_retailer("Target!").is_err());
/// ```
pub fn validate_retailer(retailer: &str) -> ValidationResult<()> {
    check_pattern(
        &RETAILER_PATTERN,
        retailer,
        FIELD_RETAILER,
        "must contain only letters, numbers, underscores, spaces, hyphens, and ampersands",
    )
}

/// Validates an item description: word characters, whitespace and `-`.
pub fn validate_short_description(description: &str, index: usize) -> ValidationResult<()> {
    check_pattern(
        &DESCRIPTION_PATTERN,
        description,
        &item_field_name(index, FIELD_SHORT_DESCRIPTION),
        "must contain only letters, numbers, underscores, spaces, and hyphens",
    )
}

/// Parses a `YYYY-MM-DD` purchase date.
///
/// Only the shape is checked; `2024-02-30` is accepted as written.
pub fn parse_purchase_date(value: &str) -> ValidationResult<PurchaseDate> {
    let invalid = || ValidationError::InvalidFormat {
        field: FIELD_PURCHASE_DATE.to_string(),
        reason: "must be YYYY-MM-DD".to_string(),
    };
    let caps = DATE_PATTERN.captures(value).ok_or_else(invalid)?;

    Ok(PurchaseDate {
        year: caps["year"].parse().map_err(|_| invalid())?,
        month: caps["month"].parse().map_err(|_| invalid())?,
        day: caps["day"].parse().map_err(|_| invalid())?,
    })
}

/// Parses an `HH:MM` purchase time.
///
/// Only the shape is checked; `25:99` is accepted as written.
pub fn parse_purchase_time(value: &str) -> ValidationResult<PurchaseTime> {
    let invalid = || ValidationError::InvalidFormat {
        field: FIELD_PURCHASE_TIME.to_string(),
        reason: "must be HH:MM".to_string(),
    };
    let caps = TIME_PATTERN.captures(value).ok_or_else(invalid)?;

    Ok(PurchaseTime {
        hour: caps["hour"].parse().map_err(|_| invalid())?,
        minute: caps["minute"].parse().map_err(|_| invalid())?,
    })
}

// =============================================================================
// Helpers
// =============================================================================

/// Mirrors JSON truthiness: absent, `null`, `false`, `0` and `""` are falsy.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn require_truthy(object: &Map<String, Value>, field: &str) -> ValidationResult<()> {
    match object.get(field) {
        Some(value) if !is_falsy(value) => Ok(()),
        _ => Err(ValidationError::Required {
            field: field.to_string(),
        }),
    }
}

fn string_field<'a>(object: &'a Map<String, Value>, field: &str) -> ValidationResult<&'a str> {
    object
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| ValidationError::WrongType {
            field: field.to_string(),
            expected: "a string",
        })
}

fn array_field<'a>(object: &'a Map<String, Value>, field: &str) -> ValidationResult<&'a [Value]> {
    object
        .get(field)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .ok_or_else(|| ValidationError::WrongType {
            field: field.to_string(),
            expected: "an array",
        })
}

/// Extracts `(shortDescription, price)` from one item, type checks only.
fn item_strings(index: usize, item: &Value) -> ValidationResult<(&str, &str)> {
    let object = item.as_object().ok_or_else(|| ValidationError::WrongType {
        field: format!("{}[{}]", FIELD_ITEMS, index),
        expected: "an object",
    })?;

    let text = |field: &str| {
        object
            .get(field)
            .and_then(Value::as_str)
            .ok_or_else(|| ValidationError::WrongType {
                field: item_field_name(index, field),
                expected: "a string",
            })
    };

    Ok((text(FIELD_SHORT_DESCRIPTION)?, text(FIELD_PRICE)?))
}

fn item_field_name(index: usize, field: &str) -> String {
    format!("{}[{}].{}", FIELD_ITEMS, index, field)
}

fn check_pattern(pattern: &Regex, value: &str, field: &str, reason: &str) -> ValidationResult<()> {
    if pattern.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: reason.to_string(),
        })
    }
}

fn parse_amount(value: &str, field: &str) -> CoreResult<Money> {
    Money::parse_decimal(value).map_err(|e| match e {
        ParseMoneyError::Overflow(_) => CoreError::AmountOverflow {
            field: field.to_string(),
        },
        ParseMoneyError::Malformed(_) => ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be digits with exactly two decimal places".to_string(),
        }
        .into(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_receipt() -> Value {
        json!({
            "retailer": "M&M Corner Market",
            "purchaseDate": "2022-03-20",
            "purchaseTime": "14:33",
            "userId": "user-42",
            "items": [
                { "shortDescription": "Gatorade", "price": "2.25" },
                { "shortDescription": "Gatorade", "price": "2.25" }
            ],
            "total": "4.50"
        })
    }

    fn with(field: &str, value: Value) -> Value {
        let mut receipt = valid_receipt();
        receipt[field] = value;
        receipt
    }

    fn without(field: &str) -> Value {
        let mut receipt = valid_receipt();
        receipt.as_object_mut().unwrap().remove(field);
        receipt
    }

    fn rejection(input: &Value) -> ValidationError {
        match validate_receipt(input) {
            Err(CoreError::Validation(e)) => e,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_accepts_valid_receipt() {
        let receipt = validate_receipt(&valid_receipt()).unwrap();
        assert_eq!(receipt.retailer, "M&M Corner Market");
        assert_eq!(receipt.total.cents(), 450);
        assert_eq!(receipt.purchase_date, PurchaseDate { year: 2022, month: 3, day: 20 });
        assert_eq!(receipt.purchase_time, PurchaseTime { hour: 14, minute: 33 });
        assert_eq!(receipt.user_id, "user-42");
        assert_eq!(receipt.items.len(), 2);
        assert_eq!(receipt.items[0].price.cents(), 225);
    }

    #[test]
    fn test_rejects_non_objects() {
        for input in [json!(null), json!("receipt"), json!([1, 2]), json!(42)] {
            assert_eq!(rejection(&input), ValidationError::NotAnObject);
        }
    }

    #[test]
    fn test_rejects_missing_fields() {
        for field in ["retailer", "total", "items", "purchaseDate", "purchaseTime", "userId"] {
            assert_eq!(
                rejection(&without(field)),
                ValidationError::Required { field: field.to_string() },
                "missing {field}"
            );
        }
    }

    #[test]
    fn test_rejects_falsy_fields() {
        for value in [json!(null), json!(""), json!(false), json!(0)] {
            assert!(matches!(
                rejection(&with("userId", value)),
                ValidationError::Required { .. }
            ));
        }
    }

    #[test]
    fn test_rejects_wrong_types() {
        assert!(matches!(
            rejection(&with("total", json!(4.5))),
            ValidationError::WrongType { expected: "a string", .. }
        ));
        assert!(matches!(
            rejection(&with("items", json!({ "shortDescription": "x", "price": "1.00" }))),
            ValidationError::WrongType { expected: "an array", .. }
        ));
        assert!(matches!(
            rejection(&with("userId", json!(7))),
            ValidationError::WrongType { .. }
        ));
    }

    #[test]
    fn test_rejects_bad_items() {
        let err = rejection(&with("items", json!([null])));
        assert_eq!(
            err,
            ValidationError::WrongType { field: "items[0]".to_string(), expected: "an object" }
        );

        let err = rejection(&with("items", json!([{ "shortDescription": "Pepsi", "price": 1.25 }])));
        assert_eq!(
            err,
            ValidationError::WrongType { field: "items[0].price".to_string(), expected: "a string" }
        );

        let err = rejection(&with("items", json!([{ "shortDescription": "Pepsi", "price": "free" }])));
        assert!(matches!(err, ValidationError::InvalidFormat { ref field, .. } if field == "items[0].price"));
    }

    #[test]
    fn test_rejects_bad_formats() {
        let cases = [
            ("retailer", "Target!"),
            ("total", "10.5"),
            ("total", "$10.50"),
            ("purchaseDate", "2022/01/01"),
            ("purchaseDate", "22-01-01"),
            ("purchaseTime", "1:01"),
            ("purchaseTime", "13:01:00"),
        ];
        for (field, value) in cases {
            assert!(
                matches!(
                    rejection(&with(field, json!(value))),
                    ValidationError::InvalidFormat { field: ref f, .. } if f == field
                ),
                "{field}={value}"
            );
        }
    }

    #[test]
    fn test_retailer_pattern_is_ascii_word() {
        assert!(validate_retailer("Walgreens_2 - East & West").is_ok());
        assert!(validate_retailer("Café").is_err());
        assert!(validate_retailer("Target.com").is_err());
    }

    #[test]
    fn test_empty_description_is_rejected() {
        // An empty description would satisfy the length-multiple-of-3 rule,
        // but the format pattern stops it before scoring.
        let err = rejection(&with("items", json!([{ "shortDescription": "", "price": "5.00" }])));
        assert!(matches!(err, ValidationError::InvalidFormat { ref field, .. } if field == "items[0].shortDescription"));
    }

    #[test]
    fn test_empty_items_are_accepted() {
        let receipt = validate_receipt(&with("items", json!([]))).unwrap();
        assert!(receipt.items.is_empty());
    }

    #[test]
    fn test_date_and_time_are_shape_checked_only() {
        assert_eq!(
            parse_purchase_date("2024-02-30").unwrap(),
            PurchaseDate { year: 2024, month: 2, day: 30 }
        );
        assert_eq!(
            parse_purchase_time("25:99").unwrap(),
            PurchaseTime { hour: 25, minute: 99 }
        );
    }

    #[test]
    fn test_oversized_amount_is_internal() {
        let err = validate_receipt(&with("total", json!("99999999999999999999.00"))).unwrap_err();
        assert!(matches!(err, CoreError::AmountOverflow { ref field } if field == "total"));
        assert!(!err.is_validation());
    }

    #[test]
    fn test_is_deterministic() {
        let input = with("total", json!("10.5"));
        assert_eq!(rejection(&input), rejection(&input));
    }
}
