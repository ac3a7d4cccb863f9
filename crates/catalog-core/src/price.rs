//! # Price Module
//!
//! Provides the `Price` type for exact monetary values.
//!
//! ## Why Not Floats?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ never equal to "0.30"            │
//! │                                                                         │
//! │  OUR SOLUTION: fixed two-place decimal, held as integer cents           │
//! │                                                                         │
//! │    "12.5"  ──┐                                                          │
//! │    "12.50" ──┼──► Price(1250) ──► "12.50" / Decimal 12.50 / 1250 cents  │
//! │    12.50   ──┘                                                          │
//! │                                                                         │
//! │  Every representation of the same amount compares equal.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use catalog_core::price::Price;
//! use rust_decimal::Decimal;
//!
//! let price: Price = "12.5".parse().unwrap();
//! assert_eq!(price.cents(), 1250);
//! assert_eq!(price.to_string(), "12.50");
//! assert_eq!(price, Decimal::new(1250, 2));
//! ```

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DataValidationError, ValidationResult};

/// Number of fractional digits a price carries.
pub const PRICE_SCALE: u32 = 2;

// =============================================================================
// Price Type
// =============================================================================

/// A monetary value with exactly two fractional digits.
///
/// ## Design Decisions
/// - **i64 cents**: the database column and comparisons work on integers
/// - **Decimal at the edges**: callers hand in and get back `rust_decimal::Decimal`
/// - **Rejects, never rounds**: `1.234` is an error, not `1.23`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(i64);

impl Price {
    /// Creates a price from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use catalog_core::price::Price;
    ///
    /// let price = Price::from_cents(1099);
    /// assert_eq!(price.to_string(), "10.99");
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Price(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Zero price.
    #[inline]
    pub const fn zero() -> Self {
        Price(0)
    }

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Converts an exact decimal into a price.
    ///
    /// ## Rules
    /// - Trailing zeros are irrelevant: `12.5` and `12.500` are both `12.50`
    /// - More than two significant fractional digits is an error
    /// - Values beyond the i64 cent range are an error
    pub fn from_decimal(value: Decimal) -> ValidationResult<Self> {
        let cents = value
            .checked_mul(Decimal::ONE_HUNDRED)
            .ok_or_else(|| DataValidationError::invalid_price(value.to_string(), "out of range"))?;

        if !cents.fract().is_zero() {
            return Err(DataValidationError::invalid_price(
                value.to_string(),
                format!("more than {} decimal places", PRICE_SCALE),
            ));
        }

        cents
            .to_i64()
            .map(Price)
            .ok_or_else(|| DataValidationError::invalid_price(value.to_string(), "out of range"))
    }

    /// Returns the price as a decimal with scale 2.
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, PRICE_SCALE)
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl FromStr for Price {
    type Err = DataValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value = Decimal::from_str_exact(trimmed)
            .map_err(|e| DataValidationError::invalid_price(trimmed, e.to_string()))?;
        Price::from_decimal(value)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = DataValidationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Price::from_decimal(value)
    }
}

impl TryFrom<&str> for Price {
    type Error = DataValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for Price {
    type Error = DataValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.to_decimal()
    }
}

impl PartialEq<Decimal> for Price {
    fn eq(&self, other: &Decimal) -> bool {
        self.to_decimal() == *other
    }
}

impl PartialEq<Price> for Decimal {
    fn eq(&self, other: &Price) -> bool {
        *self == other.to_decimal()
    }
}

/// Canonical form: always two fractional digits, no currency symbol.
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

// =============================================================================
// Serde
// =============================================================================

/// Serialized as the canonical string so no consumer ever sees a float.
impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Accepts either a numeric string or a JSON number.
impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PriceVisitor)
    }
}

struct PriceVisitor;

impl<'de> Visitor<'de> for PriceVisitor {
    type Value = Price;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal price as a string or number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Price, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Price, E> {
        Price::from_decimal(Decimal::from(v)).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Price, E> {
        Price::from_decimal(Decimal::from(v)).map_err(E::custom)
    }

    // f64 Display is the shortest string that reads back to the same float,
    // so 12.5 arrives here as "12.5", not 12.4999...
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Price, E> {
        v.to_string().parse().map_err(E::custom)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let price = Price::from_cents(1099);
        assert_eq!(price.cents(), 1099);
        assert_eq!(price.to_decimal(), Decimal::new(1099, 2));
    }

    #[test]
    fn test_parse_equivalent_forms() {
        let a: Price = "12.5".parse().unwrap();
        let b: Price = "12.50".parse().unwrap();
        let c: Price = " 12.500 ".parse().unwrap();
        let d = Price::try_from(Decimal::new(125, 1)).unwrap();

        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(c, d);
        assert_eq!(a.cents(), 1250);
    }

    #[test]
    fn test_rejects_extra_precision() {
        let err = "1.234".parse::<Price>().unwrap_err();
        assert!(matches!(err, DataValidationError::InvalidPrice { .. }));

        assert!(Price::try_from(Decimal::new(1001, 3)).is_err());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!("".parse::<Price>().is_err());
        assert!("twelve".parse::<Price>().is_err());
        assert!("12.5.0".parse::<Price>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::from_cents(1250).to_string(), "12.50");
        assert_eq!(Price::from_cents(5).to_string(), "0.05");
        assert_eq!(Price::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Price::zero().to_string(), "0.00");
    }

    #[test]
    fn test_string_form_reparses_exactly() {
        let price = Price::from_cents(199_999);
        let reparsed: Price = price.to_string().parse().unwrap();
        assert_eq!(reparsed, price);
        assert_eq!(Decimal::from(reparsed), Decimal::new(199_999, 2));
    }

    #[test]
    fn test_decimal_equality() {
        let price = Price::from_cents(1250);
        assert_eq!(price, Decimal::new(125, 1));
        assert_eq!(Decimal::new(12500, 3), price);
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&Price::from_cents(1250)).unwrap();
        assert_eq!(json, "\"12.50\"");

        let from_string: Price = serde_json::from_str("\"12.5\"").unwrap();
        let from_float: Price = serde_json::from_str("12.5").unwrap();
        let from_int: Price = serde_json::from_str("12").unwrap();
        assert_eq!(from_string, from_float);
        assert_eq!(from_int.cents(), 1200);

        assert!(serde_json::from_str::<Price>("true").is_err());
        assert!(serde_json::from_str::<Price>("0.001").is_err());
    }
}
