//! Fixed-point money amounts.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned when a decimal amount cannot be represented as money.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid money amount: {0}")]
pub struct InvalidAmount(pub f64);

/// Money amount represented in cents to avoid floating point drift.
///
/// Specialist payloads carry prices as JSON decimals (`29.99`), so the
/// serde representation is a plain number that is rounded to the nearest
/// cent on the way in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Money {
    cents: i64,
}

impl Money {
    /// Creates a new Money amount from cents.
    pub const fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Returns zero money.
    pub const fn zero() -> Self {
        Self { cents: 0 }
    }

    /// Returns the amount in cents.
    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Returns the dollar portion (whole number).
    pub fn dollars(&self) -> i64 {
        self.cents / 100
    }

    /// Returns the cents portion (remainder after dollars).
    pub fn cents_part(&self) -> i64 {
        self.cents.abs() % 100
    }

    /// Returns the amount as a decimal number.
    pub fn as_decimal(&self) -> f64 {
        self.cents as f64 / 100.0
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl TryFrom<f64> for Money {
    type Error = InvalidAmount;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        let cents = (value * 100.0).round();
        if !cents.is_finite() || cents.abs() > i64::MAX as f64 {
            return Err(InvalidAmount(value));
        }
        Ok(Self {
            cents: cents as i64,
        })
    }
}

impl From<Money> for f64 {
    fn from(money: Money) -> Self {
        money.as_decimal()
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.cents < 0 {
            write!(f, "-${}.{:02}", self.dollars().abs(), self.cents_part())
        } else {
            write!(f, "${}.{:02}", self.dollars(), self.cents_part())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_decimal_rounds_to_nearest_cent() {
        assert_eq!(Money::try_from(29.99).unwrap().cents(), 2999);
        assert_eq!(Money::try_from(0.005).unwrap().cents(), 1);
        assert_eq!(Money::try_from(-4.5).unwrap().cents(), -450);
    }

    #[test]
    fn non_finite_amounts_are_rejected() {
        assert!(Money::try_from(f64::NAN).is_err());
        assert!(Money::try_from(f64::INFINITY).is_err());
    }

    #[test]
    fn display_formats_dollars_and_cents() {
        assert_eq!(Money::from_cents(18999).to_string(), "$189.99");
        assert_eq!(Money::from_cents(-5).to_string(), "-$0.05");
    }

    #[test]
    fn serializes_as_json_decimal() {
        let json = serde_json::to_string(&Money::from_cents(2499)).unwrap();
        assert_eq!(json, "24.99");

        let parsed: Money = serde_json::from_str("19.99").unwrap();
        assert_eq!(parsed, Money::from_cents(1999));
    }

    #[test]
    fn integer_json_numbers_are_accepted() {
        let parsed: Money = serde_json::from_str("5").unwrap();
        assert_eq!(parsed.cents(), 500);
    }
}
