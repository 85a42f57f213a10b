//! Order lifecycle types
//!
//! An order moves `Pending → {Resting, PartiallyFilled, Filled, Canceled}`.
//! `Filled` and `Canceled` are terminal; nothing ever moves backwards.

use crate::errors::ValidationError;
use crate::ids::OrderId;
use crate::numeric::{Price, Stake};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Backs the outcome to happen (bid)
    Back,
    /// Lays the outcome, taking the bookmaker role (ask)
    Lay,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::Back => Side::Lay,
            Side::Lay => Side::Back,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Back => f.write_str("Back"),
            Side::Lay => f.write_str("Lay"),
        }
    }
}

/// Order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Accepted, not yet matched or placed
    Pending,
    /// In the book with its full stake
    Resting,
    /// Matched in part; may still be in the book
    PartiallyFilled,
    /// Completely matched (terminal)
    Filled,
    /// Removed on request (terminal)
    Canceled,
}

impl OrderStatus {
    /// Check if status is terminal (no further transitions possible)
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Filled | OrderStatus::Canceled)
    }
}

/// A limit order on one side of the market
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub side: Side,
    pub price: Price,
    /// Stake as submitted
    pub stake: Stake,
    /// Stake not yet matched
    pub remaining_stake: Stake,
    pub status: OrderStatus,
    pub created_at: i64, // Unix nanos
}

impl Order {
    /// Validate raw inputs and create a pending order
    ///
    /// Stake is checked before price; the first failing field is reported.
    pub fn new(
        order_id: OrderId,
        side: Side,
        price: Decimal,
        stake: Decimal,
        created_at: i64,
    ) -> Result<Self, ValidationError> {
        if stake <= Decimal::ZERO {
            return Err(ValidationError::InvalidStake(stake));
        }
        let stake = Stake::try_new(stake).ok_or(ValidationError::InvalidStake(stake))?;
        let price = Price::try_new(price).ok_or(ValidationError::InvalidPrice(price))?;

        Ok(Self {
            order_id,
            side,
            price,
            stake,
            remaining_stake: stake,
            status: OrderStatus::Pending,
            created_at,
        })
    }

    /// Stake already matched
    pub fn matched_stake(&self) -> Stake {
        self.stake.saturating_sub(self.remaining_stake)
    }

    /// Check stake invariant: matched + remaining = stake
    pub fn check_invariant(&self) -> bool {
        self.matched_stake() + self.remaining_stake == self.stake
    }

    pub fn is_filled(&self) -> bool {
        self.remaining_stake.is_zero()
    }

    pub fn has_fills(&self) -> bool {
        self.remaining_stake != self.stake
    }

    /// Record a match against this order and adjust status
    ///
    /// # Panics
    /// Panics if the fill exceeds the remaining stake
    pub fn add_fill(&mut self, fill: Stake) {
        assert!(fill <= self.remaining_stake, "Fill would exceed remaining stake");

        self.remaining_stake = self.remaining_stake.saturating_sub(fill);
        if self.is_filled() {
            self.status = OrderStatus::Filled;
        } else if self.has_fills() {
            self.status = OrderStatus::PartiallyFilled;
        }
    }

    /// Mark the order as placed in the book
    pub fn rest(&mut self) {
        if !self.has_fills() {
            self.status = OrderStatus::Resting;
        }
    }

    /// Cancel the order
    ///
    /// # Panics
    /// Panics if order is already in terminal state
    pub fn cancel(&mut self) {
        assert!(!self.status.is_terminal(), "Cannot cancel terminal order");
        self.status = OrderStatus::Canceled;
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Id: {}, Side: {}, Stake: {}, Price: {}]",
            self.order_id, self.side, self.remaining_stake, self.price
        )
    }
}
