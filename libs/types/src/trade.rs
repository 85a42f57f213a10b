//! Trade execution types

use crate::ids::{OrderId, TradeId};
use crate::numeric::{Price, Stake};
use crate::order::Side;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single match between a resting (maker) order and an incoming (taker) order
///
/// Always priced at the maker's price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub trade_id: TradeId,
    pub sequence: u64, // Monotonic per engine

    // Order references
    pub maker_order_id: OrderId,
    pub taker_order_id: OrderId,

    /// Side of the taker
    pub taker_side: Side,
    pub price: Price,
    pub quantity: Stake,

    pub executed_at: i64, // Unix nanos
}

impl Trade {
    /// Create a new trade
    pub fn new(
        sequence: u64,
        maker_order_id: OrderId,
        taker_order_id: OrderId,
        taker_side: Side,
        price: Price,
        quantity: Stake,
        executed_at: i64,
    ) -> Self {
        Self {
            trade_id: TradeId::new(),
            sequence,
            maker_order_id,
            taker_order_id,
            taker_side,
            price,
            quantity,
            executed_at,
        }
    }

    /// Side of the maker
    pub fn maker_side(&self) -> Side {
        self.taker_side.opposite()
    }

    /// Exposure of the laying party: quantity × (price − 1)
    ///
    /// None if the product exceeds the decimal range
    pub fn liability(&self) -> Option<Decimal> {
        let odds = self.price.as_decimal().checked_sub(Decimal::ONE)?;
        self.quantity.as_decimal().checked_mul(odds)
    }
}
