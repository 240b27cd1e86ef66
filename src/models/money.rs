//! Money type for representing expense amounts
//!
//! Amounts are exact decimals. On disk an amount is a plain JSON number
//! (`4.5`, `2`, `0.125`), the same shape the mobile app wrote, and it is
//! written back with the digits it was read with.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{ExpenseError, ExpenseResult};

/// A monetary amount with no fixed number of decimal places
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(Decimal);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use expense_tracker::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.to_string(), "10.50");
    /// ```
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    pub fn from_decimal(value: Decimal) -> Self {
        Self(value)
    }

    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Approximate value, for proportions and bar widths only
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Add two amounts, failing instead of wrapping when the result does not fit
    pub fn checked_add(self, other: Money) -> ExpenseResult<Money> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or_else(|| ExpenseError::Overflow(format!("{} + {}", self.0, other.0)))
    }

    /// Parse a money amount from user input
    ///
    /// Accepts formats: "10.50", "-10.50", "Rs.10.50", "$10.50", "10", ".5".
    /// Every decimal place given is kept.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let original = s;
        let s = s.trim();

        let (negative, s) = if let Some(stripped) = s.strip_prefix('-') {
            (true, stripped)
        } else {
            (false, s)
        };

        let s = s
            .strip_prefix("Rs.")
            .or_else(|| s.strip_prefix('$'))
            .unwrap_or(s)
            .trim();

        let invalid = || MoneyParseError::InvalidFormat(original.to_string());

        let (units, fraction) = s.split_once('.').unwrap_or((s, ""));
        if units.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if !all_digits(units) || !all_digits(fraction) {
            return Err(invalid());
        }

        let units = if units.is_empty() { "0" } else { units };
        let normalized = if fraction.is_empty() {
            units.to_string()
        } else {
            format!("{}.{}", units, fraction)
        };

        let value = Decimal::from_str(&normalized).map_err(|_| invalid())?;
        Ok(Self(if negative { -value } else { value }))
    }

    /// Format with a currency symbol, rounded to two decimal places
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let mut shown = self.0.abs().round_dp(2);
        shown.rescale(2);
        if self.is_negative() && !shown.is_zero() {
            format!("-{}{}", symbol, shown)
        } else {
            format!("{}{}", symbol, shown)
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.format_with_symbol(""))
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = self.0.normalize();
        // Whole amounts stay integers so `2` doesn't turn into `2.0`
        if value.scale() == 0 {
            if let Some(whole) = value.to_i64() {
                return serializer.serialize_i64(whole);
            }
        }
        // A float parsed from the shortest decimal text prints back as that text
        let float = f64::from_str(&value.to_string()).map_err(serde::ser::Error::custom)?;
        serializer.serialize_f64(float)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let number = serde_json::Number::deserialize(deserializer)?;
        let text = number.to_string();
        Decimal::from_str(&text)
            .or_else(|_| Decimal::from_scientific(&text))
            .map(Self)
            .map_err(|_| serde::de::Error::custom(format!("amount out of range: {}", text)))
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid amount: '{}'", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_cents() {
        assert_eq!(Money::from_cents(1050), Money::from_decimal(dec!(10.50)));
        assert_eq!(Money::from_cents(1050), Money::from_decimal(dec!(10.5)));
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1050).to_string(), "10.50");
        assert_eq!(Money::from_cents(0).to_string(), "0.00");
        assert_eq!(Money::from_cents(-1050).to_string(), "-10.50");
        assert_eq!(Money::from_cents(5).format_with_symbol("Rs."), "Rs.0.05");
        assert_eq!(Money::from_cents(-5).format_with_symbol("$"), "-$0.05");
        assert_eq!(Money::from_decimal(dec!(0.125)).to_string(), "0.12");
        assert_eq!(Money::from_decimal(dec!(1234.5)).to_string(), "1234.50");
    }

    #[test]
    fn test_checked_add() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);
        assert_eq!(a.checked_add(b).unwrap(), Money::from_cents(1500));

        let big = Money::from_decimal(dec!(50000000000000000));
        assert_eq!(
            big.checked_add(big).unwrap(),
            Money::from_decimal(dec!(100000000000000000))
        );
    }

    #[test]
    fn test_checked_add_reports_overflow() {
        let max = Money::from_decimal(Decimal::MAX);
        let err = max.checked_add(Money::from_cents(100)).unwrap_err();
        assert!(matches!(err, ExpenseError::Overflow(_)));
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap(), Money::from_cents(1050));
        assert_eq!(Money::parse("Rs.10.50").unwrap(), Money::from_cents(1050));
        assert_eq!(Money::parse("$10.50").unwrap(), Money::from_cents(1050));
        assert_eq!(Money::parse("-10.50").unwrap(), Money::from_cents(-1050));
        assert_eq!(Money::parse("10").unwrap(), Money::from_cents(1000));
        assert_eq!(Money::parse("10.5").unwrap(), Money::from_cents(1050));
        assert_eq!(Money::parse(".5").unwrap(), Money::from_cents(50));
        assert_eq!(Money::parse("3.").unwrap(), Money::from_cents(300));
        assert_eq!(Money::parse(" 4.5 ").unwrap(), Money::from_cents(450));
    }

    #[test]
    fn test_parse_keeps_every_decimal_place() {
        assert_eq!(
            Money::parse("10.999").unwrap(),
            Money::from_decimal(dec!(10.999))
        );
        assert_eq!(
            Money::parse("0.125").unwrap(),
            Money::from_decimal(dec!(0.125))
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in ["", "abc", "1.2.3", "1.x", ".", "Rs.", "12abc", "1e5", "--1"] {
            assert!(Money::parse(input).is_err(), "{:?} should not parse", input);
        }
        // Too many digits for an exact decimal
        assert!(Money::parse("123456789012345678901234567890123").is_err());
    }

    #[test]
    fn test_serialization_as_plain_number() {
        assert_eq!(serde_json::to_string(&Money::from_cents(450)).unwrap(), "4.5");
        assert_eq!(serde_json::to_string(&Money::from_cents(200)).unwrap(), "2");

        let m: Money = serde_json::from_str("15.5").unwrap();
        assert_eq!(m, Money::from_cents(1550));
        let m: Money = serde_json::from_str("7").unwrap();
        assert_eq!(m, Money::from_cents(700));
    }

    #[test]
    fn test_stored_digits_survive_a_rewrite() {
        for text in ["0.125", "0.1", "49.99", "2", "50000000000000000", "100000000000000000"] {
            let m: Money = serde_json::from_str(text).unwrap();
            assert_eq!(serde_json::to_string(&m).unwrap(), text);
        }
    }

    #[test]
    fn test_deserialize_reads_exponent_form() {
        let m: Money = serde_json::from_str("1e17").unwrap();
        assert_eq!(m, Money::from_decimal(dec!(100000000000000000)));
    }

    #[test]
    fn test_deserialize_rejects_non_numbers() {
        assert!(serde_json::from_str::<Money>("\"12\"").is_err());
    }
}
