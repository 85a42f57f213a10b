//! Trade execution logic
//!
//! Stamps each match with a sequence number and builds the trade record

use types::ids::OrderId;
use types::numeric::{Price, Stake};
use types::order::Side;
use types::trade::Trade;

/// Match executor for handling trade generation
#[derive(Debug, Clone)]
pub struct TradeExecutor {
    sequence_counter: u64,
}

impl TradeExecutor {
    /// Create a new trade executor with starting sequence number
    pub fn new(starting_sequence: u64) -> Self {
        Self {
            sequence_counter: starting_sequence,
        }
    }

    /// Get next sequence number (monotonically increasing)
    fn next_sequence(&mut self) -> u64 {
        let seq = self.sequence_counter;
        self.sequence_counter += 1;
        seq
    }

    /// Sequence number the next trade will carry
    pub fn peek_sequence(&self) -> u64 {
        self.sequence_counter
    }

    /// Execute a trade between a resting maker and an incoming taker
    ///
    /// `price` is the maker's price; trades never execute at the taker's price.
    pub fn execute_trade(
        &mut self,
        maker_order_id: OrderId,
        taker_order_id: OrderId,
        taker_side: Side,
        price: Price,
        quantity: Stake,
        timestamp: i64,
    ) -> Trade {
        let sequence = self.next_sequence();

        Trade::new(
            sequence,
            maker_order_id,
            taker_order_id,
            taker_side,
            price,
            quantity,
            timestamp,
        )
    }
}
