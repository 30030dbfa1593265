//! Fixed-point decimal types for prices and amounts
//!
//! Uses rust_decimal for deterministic arithmetic (no floating-point errors).
//! `Price` is strictly positive; `Amount` is non-negative because resting
//! book entries decay toward zero while being matched.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;
use thiserror::Error;

/// Errors constructing numeric domain values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumericError {
    #[error("price must be positive, got {0}")]
    NonPositivePrice(Decimal),

    #[error("amount must not be negative, got {0}")]
    NegativeAmount(Decimal),

    #[error("not a valid decimal: {0}")]
    Unparseable(String),
}

/// Limit/execution price. Always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Construct a price, rejecting zero and negative values
    pub fn try_new(value: Decimal) -> Result<Self, NumericError> {
        if value <= Decimal::ZERO {
            return Err(NumericError::NonPositivePrice(value));
        }
        Ok(Self(value))
    }

    /// Parse from a decimal string (mainly for tests and fixtures)
    pub fn from_str(s: &str) -> Result<Self, NumericError> {
        let value: Decimal = s
            .parse()
            .map_err(|_| NumericError::Unparseable(s.to_string()))?;
        Self::try_new(value)
    }

    /// Construct from an integer price
    pub fn from_u64(value: u64) -> Self {
        Self(Decimal::from(value))
    }

    /// Get the inner decimal value
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Order/fill amount. Non-negative.
///
/// Zero is representable (an order fully consumed mid-match) but the order
/// book never retains a zero-amount entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    /// Construct an amount, rejecting negative values
    pub fn try_new(value: Decimal) -> Result<Self, NumericError> {
        if value < Decimal::ZERO {
            return Err(NumericError::NegativeAmount(value));
        }
        Ok(Self(value))
    }

    /// Parse from a decimal string (mainly for tests and fixtures)
    pub fn from_str(s: &str) -> Result<Self, NumericError> {
        let value: Decimal = s
            .parse()
            .map_err(|_| NumericError::Unparseable(s.to_string()))?;
        Self::try_new(value)
    }

    /// The zero amount
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Get the inner decimal value
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Subtract, clamping at zero rather than going negative
    pub fn saturating_sub(self, other: Amount) -> Amount {
        if other.0 >= self.0 {
            Amount::zero()
        } else {
            Amount(self.0 - other.0)
        }
    }

    /// The smaller of two amounts
    pub fn min(self, other: Amount) -> Amount {
        if self.0 <= other.0 {
            self
        } else {
            other
        }
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, other: Amount) -> Amount {
        Amount(self.0 + other.0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_price_rejects_non_positive() {
        assert!(Price::try_new(Decimal::ZERO).is_err());
        assert!(Price::try_new(Decimal::from(-1)).is_err());
        assert!(Price::try_new(Decimal::from(1)).is_ok());
    }

    #[test]
    fn test_price_from_str() {
        let price = Price::from_str("10.50").unwrap();
        assert_eq!(price.as_decimal(), Decimal::new(1050, 2));
        assert!(Price::from_str("abc").is_err());
        assert!(Price::from_str("-10.50").is_err());
    }

    #[test]
    fn test_price_ordering() {
        let low = Price::from_str("10.00").unwrap();
        let high = Price::from_str("10.50").unwrap();
        assert!(low < high);
    }

    #[test]
    fn test_amount_rejects_negative() {
        assert!(Amount::try_new(Decimal::from(-1)).is_err());
        assert!(Amount::try_new(Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_amount_saturating_sub() {
        let a = Amount::from_str("5.0").unwrap();
        let b = Amount::from_str("3.0").unwrap();
        assert_eq!(a.saturating_sub(b), Amount::from_str("2.0").unwrap());
        assert_eq!(b.saturating_sub(a), Amount::zero());
    }

    #[test]
    fn test_amount_serialization() {
        let amount = Amount::from_str("60").unwrap();
        let json = serde_json::to_string(&amount).unwrap();
        let deserialized: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(amount, deserialized);
    }

    #[test]
    fn test_amount_deserializes_from_json_number() {
        // Wire clients send plain JSON numbers
        let amount: Amount = serde_json::from_str("10.5").unwrap();
        assert_eq!(amount, Amount::from_str("10.5").unwrap());
    }

    proptest! {
        #[test]
        fn prop_amount_add_then_sub_roundtrips(a in 0u64..1_000_000, b in 0u64..1_000_000) {
            let a = Amount::try_new(Decimal::from(a)).unwrap();
            let b = Amount::try_new(Decimal::from(b)).unwrap();
            prop_assert_eq!((a + b).saturating_sub(b), a);
        }

        #[test]
        fn prop_min_is_lower_bound(a in 0u64..1_000_000, b in 0u64..1_000_000) {
            let a = Amount::try_new(Decimal::from(a)).unwrap();
            let b = Amount::try_new(Decimal::from(b)).unwrap();
            let m = a.min(b);
            prop_assert!(m <= a && m <= b);
        }
    }
}
