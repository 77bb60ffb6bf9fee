//! Type-safe price representation using decimal arithmetic.
//!
//! Prices travel over the wire and through durable storage as plain JSON
//! numbers (`12`, `10.5`), but are held as [`Decimal`] in memory so that line
//! totals and cart totals never accumulate floating point error.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
    /// The amount is not a finite number.
    #[error("price must be a finite number")]
    NotFinite,
}

/// A non-negative unit price.
///
/// Single-currency: the storefront displays every amount in dollars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest representable price. Arithmetic saturates here.
    pub const MAX: Self = Self(Decimal::MAX);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Create a price from a floating point amount.
    ///
    /// # Errors
    ///
    /// Returns an error if `amount` is NaN, infinite, or negative.
    pub fn from_f64(amount: f64) -> Result<Self, PriceError> {
        let amount = Decimal::from_f64(amount).ok_or(PriceError::NotFinite)?;
        Self::new(amount)
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `count` units, saturating at [`Price::MAX`].
    #[must_use]
    pub fn times(self, count: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(count)))
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!("${:.2}", self.0.round_dp(2))
    }
}

impl From<u32> for Price {
    fn from(amount: u32) -> Self {
        Self(Decimal::from(amount))
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Whole amounts stay integers so stored carts read `"price":12`
        if self.0.fract().is_zero()
            && let Some(whole) = self.0.to_u64()
        {
            return serializer.serialize_u64(whole);
        }
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = rust_decimal::serde::float::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_negative() {
        assert!(matches!(
            Price::new(Decimal::new(-1, 0)),
            Err(PriceError::Negative(_))
        ));
        assert!(Price::new(Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_from_f64_rejects_nan() {
        assert!(matches!(Price::from_f64(f64::NAN), Err(PriceError::NotFinite)));
        assert_eq!(Price::from_f64(10.5).unwrap().amount(), Decimal::new(105, 1));
    }

    #[test]
    fn test_times_and_sum() {
        let total: Price = [Price::from(12).times(2), Price::from(11)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from(35));
    }

    #[test]
    fn test_arithmetic_saturates_instead_of_overflowing() {
        let huge = Price::from_f64(7e28).unwrap();
        assert_eq!(huge.times(2), Price::MAX);
        assert_eq!(huge + huge, Price::MAX);
        assert_eq!([huge, huge, Price::from(1)].into_iter().sum::<Price>(), Price::MAX);
        assert_eq!(Price::MAX.times(0), Price::ZERO);
    }

    #[test]
    fn test_display_formats_dollars() {
        assert_eq!(Price::from(12).display(), "$12.00");
        assert_eq!(Price::from_f64(19.999).unwrap().display(), "$20.00");
        assert_eq!(Price::from(12).to_string(), "12");
    }

    #[test]
    fn test_serializes_whole_amounts_as_integers() {
        assert_eq!(serde_json::to_string(&Price::from(12)).unwrap(), "12");
        assert_eq!(
            serde_json::to_string(&Price::from_f64(10.5).unwrap()).unwrap(),
            "10.5"
        );
    }

    #[test]
    fn test_deserializes_integer_and_float() {
        let p: Price = serde_json::from_str("12").unwrap();
        assert_eq!(p, Price::from(12));
        let p: Price = serde_json::from_str("10.25").unwrap();
        assert_eq!(p.amount(), Decimal::new(1025, 2));
    }

    #[test]
    fn test_deserialize_rejects_negative() {
        assert!(serde_json::from_str::<Price>("-3").is_err());
    }
}
