//! Type-safe unit price using decimal arithmetic.
//!
//! Prices are stored as [`Decimal`] so totals like `14.99 * 3` stay exact.
//! On the wire (persisted carts and the remote catalog) a price is a plain
//! JSON number, so serialization goes through `rust_decimal::serde::float`.
//! Amounts are rounded to cents and capped at [`Price::MAX`] on construction,
//! which keeps every price exact as an `f64` and every cart total in range.

use core::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
    /// The amount is above [`Price::MAX`].
    #[error("price cannot exceed 1000000 (got {0})")]
    TooLarge(Decimal),
    /// The input string is not a decimal number.
    #[error("invalid price: {0}")]
    Invalid(String),
}

/// A non-negative unit price in the store's currency.
///
/// ## Examples
///
/// ```
/// use foodie_core::Price;
///
/// let price: Price = "14.99".parse().unwrap();
/// assert_eq!(price.to_string(), "$14.99");
///
/// assert!("-1".parse::<Price>().is_err());
/// assert!("free".parse::<Price>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// The highest accepted unit price, `1,000,000.00`.
    pub const MAX: Self = Self(Decimal::from_parts(1_000_000, 0, 0, false, 0));

    /// Create a price from a decimal amount, rounded half away from zero to
    /// two decimal places.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if the amount is below zero and
    /// [`PriceError::TooLarge`] if it is above [`Price::MAX`].
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        if amount > Self::MAX.0 {
            return Err(PriceError::TooLarge(amount));
        }
        let cents = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        Ok(Self(cents.abs()))
    }

    /// Create a price from a whole number of currency units.
    #[must_use]
    pub fn from_units(units: u32) -> Self {
        Self(Decimal::from(units))
    }

    /// Create a price from cents, e.g. `from_cents(1499)` is `14.99`.
    #[must_use]
    pub fn from_cents(cents: u32) -> Self {
        Self(Decimal::new(i64::from(cents), 2))
    }

    /// Returns the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns the price of `quantity` units.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Decimal {
        self.0.saturating_mul(Decimal::from(quantity))
    }
}

/// Format an amount for display, e.g. `$20.00`.
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    format!("${:.2}", amount.round_dp(2))
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_money(self.0))
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount =
            Decimal::from_str(s.trim()).map_err(|_| PriceError::Invalid(s.to_string()))?;
        Self::new(amount)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = rust_decimal::serde::float::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}
