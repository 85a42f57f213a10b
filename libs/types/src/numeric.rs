//! Fixed-point decimal types for prices and stakes
//!
//! Uses rust_decimal for deterministic arithmetic (no floating-point errors).
//! Equal values compare equal regardless of scale, so `2.0` and `2.00`
//! address the same price level.

use crate::errors::ValidationError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;
use std::str::FromStr;

/// Minimum tradable price in decimal odds. Valid prices are strictly above it.
pub const MIN_PRICE: Decimal = Decimal::ONE;

/// Decimal odds at which an order is willing to trade.
///
/// Always strictly greater than [`MIN_PRICE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a price, returning None unless `value > MIN_PRICE`
    pub fn try_new(value: Decimal) -> Option<Self> {
        if value > MIN_PRICE {
            Some(Self(value))
        } else {
            None
        }
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Price {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s).map_err(|_| ValidationError::Malformed {
            field: "price",
            value: s.to_string(),
        })?;
        Self::try_new(value).ok_or(ValidationError::InvalidPrice(value))
    }
}

/// Amount of money committed to an order, or what is left of it.
///
/// Never negative. Zero only appears as the remaining stake of a
/// fully matched order; accepted orders always start positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stake(Decimal);

impl Stake {
    /// Create a stake, returning None if the value is negative
    pub fn try_new(value: Decimal) -> Option<Self> {
        if value.is_sign_negative() && !value.is_zero() {
            None
        } else {
            Some(Self(value))
        }
    }

    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Add, returning None if the sum exceeds the decimal range
    pub fn checked_add(self, other: Stake) -> Option<Stake> {
        self.0.checked_add(other.0).map(Stake)
    }

    /// Subtract, clamping at zero
    pub fn saturating_sub(self, other: Stake) -> Stake {
        if other.0 >= self.0 {
            Stake::zero()
        } else {
            Stake(self.0 - other.0)
        }
    }
}

impl Add for Stake {
    type Output = Stake;

    fn add(self, rhs: Stake) -> Stake {
        Stake(self.0 + rhs.0)
    }
}

impl std::iter::Sum for Stake {
    fn sum<I: Iterator<Item = Stake>>(iter: I) -> Stake {
        iter.fold(Stake::zero(), |acc, s| acc + s)
    }
}

impl fmt::Display for Stake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Stake {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s).map_err(|_| ValidationError::Malformed {
            field: "stake",
            value: s.to_string(),
        })?;
        Self::try_new(value).ok_or(ValidationError::InvalidStake(value))
    }
}
