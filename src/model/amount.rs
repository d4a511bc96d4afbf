//! Amount type for monetary values extracted from budget tables.
//!
//! This module provides the `Amount` type which wraps `Decimal`, and the
//! lenient parsing functions that turn the locale-ambiguous numeric strings
//! found in government CSV extracts into canonical decimal values.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

/// Factor applied to year-columns cells, which are expressed in millions of
/// euros while the rest of the model works in euros.
const MILLIONS: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Represents a euro amount.
///
/// This type wraps `Decimal`. Equality and ordering are by numeric value.
///
/// # Examples
///
/// ```
/// # use fisco::model::parse_amount;
/// let amount = parse_amount("1.234,56");
/// assert_eq!(amount.to_string(), "1,234.56");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    /// Creates a new Amount from a Decimal value.
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.value().is_zero()
    }

    /// Returns true if the amount is strictly positive.
    pub fn is_positive(&self) -> bool {
        !self.is_zero() && self.value().is_sign_positive()
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount::new(self.0 + rhs.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::default(), Add::add)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            format_num::format_num!(",.2", self.0.to_f64().unwrap_or_default())
        )
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Serialized as a plain JSON number so summary documents read
        // `"total": 1234.56` rather than a formatted string.
        Serialize::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Amount::new(Deserialize::deserialize(deserializer)?))
    }
}

impl FromStr for Amount {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Amount::new(Decimal::from_str(s)?))
    }
}

/// Parses a locale-ambiguous numeric string into an `Amount`.
///
/// Traditional-layout tables mix Spanish (`1.234,56`) and English
/// (`1,234.56`) formatting, sometimes with currency symbols. The rules:
///
/// - When both comma and period appear, whichever occurs LAST is the decimal
///   separator and the other is a thousands separator.
/// - A lone comma followed by one or two digits is a decimal separator;
///   otherwise commas are thousands separators.
/// - Lone periods are thousands separators and removed.
///
/// Anything that does not survive as a decimal yields zero, which the
/// pipeline discards via the strictly-positive invariant.
pub fn parse_amount(raw: &str) -> Amount {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '€' | '$' | '£') && !c.is_whitespace())
        .collect();

    let last_comma = cleaned.rfind(',');
    let last_period = cleaned.rfind('.');

    let normalized = match (last_comma, last_period) {
        (Some(comma), Some(period)) => {
            if comma > period {
                // Spanish style: period groups thousands, comma is decimal.
                cleaned.replace('.', "").replace(',', ".")
            } else {
                // English style: comma groups thousands.
                cleaned.replace(',', "")
            }
        }
        (Some(comma), None) => {
            let digits_after = cleaned.len() - comma - 1;
            if (1..=2).contains(&digits_after) {
                cleaned.replace(',', ".")
            } else {
                cleaned.replace(',', "")
            }
        }
        // Lone periods group thousands in the source tables.
        (None, Some(_)) => cleaned.replace('.', ""),
        (None, None) => cleaned,
    };

    Decimal::from_str(&normalized)
        .map(Amount::new)
        .unwrap_or_default()
}

/// Parses a year-columns cell: a plain period-decimal value expressed in
/// millions of euros, scaled to euros. Returns `None` when the cell does not
/// hold a number.
pub fn parse_millions(raw: &str) -> Option<Amount> {
    let value = Decimal::from_str(raw.trim()).ok()?;
    Some(Amount::new(value * MILLIONS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_spanish_thousands_and_decimal() {
        assert_eq!(parse_amount("1.234,56").value(), dec!(1234.56));
    }

    #[test]
    fn test_parse_english_thousands_and_decimal() {
        assert_eq!(parse_amount("1,234.56").value(), dec!(1234.56));
    }

    #[test]
    fn test_parse_plain_integer() {
        assert_eq!(parse_amount("1234").value(), dec!(1234));
    }

    #[test]
    fn test_parse_non_numeric_is_zero() {
        assert!(parse_amount("abc").is_zero());
    }

    #[test]
    fn test_parse_lone_comma_decimal() {
        assert_eq!(parse_amount("123,4").value(), dec!(123.4));
        assert_eq!(parse_amount("123,45").value(), dec!(123.45));
    }

    #[test]
    fn test_parse_lone_comma_thousands() {
        assert_eq!(parse_amount("1,234").value(), dec!(1234));
    }

    #[test]
    fn test_parse_lone_period_is_thousands() {
        assert_eq!(parse_amount("1.234").value(), dec!(1234));
    }

    #[test]
    fn test_parse_currency_symbol_and_whitespace() {
        assert_eq!(parse_amount("  1.234,56 €").value(), dec!(1234.56));
    }

    #[test]
    fn test_parse_negative_survives() {
        assert_eq!(parse_amount("-12,50").value(), dec!(-12.50));
    }

    #[test]
    fn test_parse_millions_scales() {
        assert_eq!(
            parse_millions("50000.00").unwrap().value(),
            dec!(50000000000)
        );
    }

    #[test]
    fn test_parse_millions_rejects_text() {
        assert!(parse_millions("Total").is_none());
        assert!(parse_millions("").is_none());
    }

    #[test]
    fn test_display_groups_thousands() {
        let amount = Amount::new(dec!(1234567.89));
        assert_eq!(amount.to_string(), "1,234,567.89");
    }

    #[test]
    fn test_zero_is_not_positive() {
        assert!(!Amount::default().is_positive());
        assert!(Amount::new(dec!(0.01)).is_positive());
        assert!(!Amount::new(dec!(-1)).is_positive());
    }

    #[test]
    fn test_sum() {
        let total: Amount = [dec!(1.5), dec!(2.5)].into_iter().map(Amount::new).sum();
        assert_eq!(total.value(), dec!(4));
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&Amount::new(dec!(1234.5))).unwrap();
        assert_eq!(json, "1234.5");
    }
}
