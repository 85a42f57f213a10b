//! Matching engine core
//!
//! One [`Orderbook`] owns both sides of a single market, the index from order
//! id to resting position, and the price-time priority matching loop that
//! couples the two sides.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info, warn};
use types::errors::BookError;
use types::ids::OrderId;
use types::numeric::{Price, Stake};
use types::order::{Order, Side};
use types::trade::Trade;

use crate::book::{BackBook, BookSide, LayBook, OrderHandle, SidePriority};
use crate::clock::MonotonicClock;
use crate::config::EngineConfig;
use crate::matching::{crossing, TradeExecutor};

/// Raw order input as received from the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub side: Side,
    pub price: Decimal,
    pub stake: Decimal,
    /// Caller-assigned identity; the engine generates one when absent
    pub order_id: Option<OrderId>,
}

impl OrderRequest {
    pub fn new(side: Side, price: Decimal, stake: Decimal) -> Self {
        Self {
            side,
            price,
            stake,
            order_id: None,
        }
    }

    pub fn back(price: Decimal, stake: Decimal) -> Self {
        Self::new(Side::Back, price, stake)
    }

    pub fn lay(price: Decimal, stake: Decimal) -> Self {
        Self::new(Side::Lay, price, stake)
    }

    pub fn with_id(mut self, order_id: OrderId) -> Self {
        self.order_id = Some(order_id);
        self
    }
}

/// What happened to a submitted order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmitStatus {
    /// Nothing matched; the whole stake rests in the book
    Resting,
    /// Some stake matched and the remainder rests in the book
    PartiallyFilled,
    /// Completely matched; nothing rests
    Filled,
}

/// Result of submitting an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitOutcome {
    pub order_id: OrderId,
    pub status: SubmitStatus,
    /// Trades in execution order
    pub trades: Vec<Trade>,
    /// Stake left resting at the submitted price (zero when filled)
    pub resting_remainder: Stake,
}

impl SubmitOutcome {
    /// Total stake matched across all trades
    pub fn matched_stake(&self) -> Stake {
        self.trades.iter().map(|t| t.quantity).sum()
    }

    pub fn is_filled(&self) -> bool {
        self.status == SubmitStatus::Filled
    }
}

/// Depth view of both sides, best levels first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSnapshot {
    pub back: Vec<(Price, Stake)>,
    pub lay: Vec<(Price, Stake)>,
}

/// Where a resting order lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OrderLocation {
    side: Side,
    price: Price,
    handle: OrderHandle,
}

/// Two-sided limit order book for a single market
///
/// All state is owned here and mutated only through `submit` and `cancel`.
/// Callers sharing an instance across threads must serialize those calls.
#[derive(Debug, Clone)]
pub struct Orderbook {
    back: BackBook,
    lay: LayBook,
    /// Every resting order, and only resting orders
    index: HashMap<OrderId, OrderLocation>,
    executor: TradeExecutor,
    clock: MonotonicClock,
    config: EngineConfig,
}

impl Orderbook {
    /// Create an empty book with default configuration
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        info!(
            starting_sequence = config.starting_sequence,
            verify_invariants = config.verify_invariants,
            max_depth = config.max_depth,
            "Orderbook initialized"
        );

        Self {
            back: BackBook::new(),
            lay: LayBook::new(),
            index: HashMap::new(),
            executor: TradeExecutor::new(config.starting_sequence),
            clock: MonotonicClock::new(),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Submit an order
    ///
    /// Validates it, matches it against the opposite side while it crosses,
    /// and rests any remainder at the submitted price. A rejected submission
    /// leaves the book untouched.
    pub fn submit(&mut self, request: OrderRequest) -> Result<SubmitOutcome, BookError> {
        let order_id = request.order_id.unwrap_or_default();

        let mut order = Order::new(order_id, request.side, request.price, request.stake, 0)
            .map_err(|err| {
                warn!(%order_id, field = err.field(), error = %err, "Rejected invalid order");
                BookError::from(err)
            })?;

        if self.index.contains_key(&order_id) {
            warn!(%order_id, "Rejected duplicate order id");
            return Err(BookError::DuplicateOrder { order_id });
        }

        // Matching never touches the taker's own side and the remainder is at
        // most the full stake, so this is the only point resting can fail.
        let can_rest = match order.side {
            Side::Back => self.back.can_rest(order.price, order.stake),
            Side::Lay => self.lay.can_rest(order.price, order.stake),
        };
        if !can_rest {
            warn!(
                %order_id,
                price = %order.price,
                stake = %order.stake,
                "Rejected order overflowing level volume"
            );
            return Err(BookError::VolumeOverflow { price: order.price });
        }

        let timestamp = self.clock.now();
        order.created_at = timestamp;

        let trades = match order.side {
            Side::Back => Self::match_against(
                &mut self.lay,
                &mut self.index,
                &mut self.executor,
                &mut order,
                timestamp,
            ),
            Side::Lay => Self::match_against(
                &mut self.back,
                &mut self.index,
                &mut self.executor,
                &mut order,
                timestamp,
            ),
        };

        let resting_remainder = order.remaining_stake;
        let status = if resting_remainder.is_zero() {
            SubmitStatus::Filled
        } else if trades.is_empty() {
            SubmitStatus::Resting
        } else {
            SubmitStatus::PartiallyFilled
        };

        if !resting_remainder.is_zero() {
            let rested = self.rest(order);
            debug_assert!(rested.is_ok(), "resting was checked before matching");
            rested?;
        }

        self.verify();

        Ok(SubmitOutcome {
            order_id,
            status,
            trades,
            resting_remainder,
        })
    }

    /// Consume opposite-side liquidity while the taker crosses it
    ///
    /// Best level first, FIFO within a level. Each trade executes at the
    /// maker's price for the lesser of the two remaining stakes.
    fn match_against<P: SidePriority>(
        book: &mut BookSide<P>,
        index: &mut HashMap<OrderId, OrderLocation>,
        executor: &mut TradeExecutor,
        taker: &mut Order,
        timestamp: i64,
    ) -> Vec<Trade> {
        let mut trades = Vec::new();

        while !taker.is_filled() {
            let Some(best) = book.best_price() else {
                break;
            };
            if !crossing::crosses(taker.side, taker.price, Some(best)) {
                break;
            }
            let Some(level) = book.level_mut(best) else {
                break;
            };
            let Some((handle, maker)) = level.front() else {
                break;
            };
            let maker_id = maker.order_id;
            let maker_remaining = maker.remaining_stake;

            let quantity = if maker_remaining <= taker.remaining_stake {
                let removed = level.remove_order(handle);
                debug_assert!(removed.is_some(), "front handle must address a queued order");
                index.remove(&maker_id);
                book.remove_level_if_empty(best);
                maker_remaining
            } else {
                let quantity = taker.remaining_stake;
                let filled = level.fill_front(quantity);
                debug_assert!(filled, "partial fill must leave the maker resting");
                quantity
            };

            taker.add_fill(quantity);
            let trade = executor.execute_trade(
                maker_id,
                taker.order_id,
                taker.side,
                best, // Maker's price
                quantity,
                timestamp,
            );
            debug!(
                sequence = trade.sequence,
                maker = %maker_id,
                taker = %taker.order_id,
                price = %best,
                quantity = %quantity,
                "Trade executed"
            );
            trades.push(trade);
        }

        trades
    }

    /// Place an order with remaining stake on its own side and index it
    fn rest(&mut self, mut order: Order) -> Result<(), BookError> {
        order.rest();
        let order_id = order.order_id;
        let side = order.side;
        let price = order.price;
        let remaining = order.remaining_stake;

        let handle = match side {
            Side::Back => self.back.insert(order)?,
            Side::Lay => self.lay.insert(order)?,
        };
        self.index.insert(order_id, OrderLocation { side, price, handle });

        debug!(%order_id, %side, %price, remaining = %remaining, "Order resting");
        Ok(())
    }

    /// Cancel a resting order
    ///
    /// Returns the canceled order. Unknown ids and ids of orders that have
    /// already been fully matched both fail with `NotFound`.
    pub fn cancel(&mut self, order_id: &OrderId) -> Result<Order, BookError> {
        let Some(location) = self.index.get(order_id).copied() else {
            warn!(%order_id, "Cancel of unknown order");
            return Err(BookError::NotFound { order_id: *order_id });
        };

        let removed = match location.side {
            Side::Back => Self::unlink(&mut self.back, location),
            Side::Lay => Self::unlink(&mut self.lay, location),
        };
        debug_assert!(removed.is_some(), "indexed order {order_id} missing from its level");
        let mut order = removed.ok_or(BookError::NotFound { order_id: *order_id })?;

        self.index.remove(order_id);
        order.cancel();

        debug!(
            %order_id,
            side = %location.side,
            price = %location.price,
            unmatched = %order.remaining_stake,
            "Order canceled"
        );
        self.verify();

        Ok(order)
    }

    fn unlink<P: SidePriority>(book: &mut BookSide<P>, location: OrderLocation) -> Option<Order> {
        let order = book.level_mut(location.price)?.remove_order(location.handle)?;
        book.remove_level_if_empty(location.price);
        Some(order)
    }

    /// Best (highest) back price
    pub fn best_back(&self) -> Option<Price> {
        self.back.best_price()
    }

    /// Best (lowest) lay price
    pub fn best_lay(&self) -> Option<Price> {
        self.lay.best_price()
    }

    pub fn best_back_level(&self) -> Option<(Price, Stake)> {
        self.back.best_level()
    }

    pub fn best_lay_level(&self) -> Option<(Price, Stake)> {
        self.lay.best_level()
    }

    /// Top `depth` levels of one side, capped by `max_depth`
    pub fn depth(&self, side: Side, depth: usize) -> Vec<(Price, Stake)> {
        let depth = depth.min(self.config.max_depth);
        match side {
            Side::Back => self.back.depth_snapshot(depth),
            Side::Lay => self.lay.depth_snapshot(depth),
        }
    }

    /// Top `depth` levels of both sides
    pub fn snapshot(&self, depth: usize) -> BookSnapshot {
        BookSnapshot {
            back: self.depth(Side::Back, depth),
            lay: self.depth(Side::Lay, depth),
        }
    }

    /// Look up a resting order
    pub fn order(&self, order_id: &OrderId) -> Option<&Order> {
        let location = self.index.get(order_id)?;
        match location.side {
            Side::Back => self.back.level(location.price)?.get(location.handle),
            Side::Lay => self.lay.level(location.price)?.get(location.handle),
        }
    }

    pub fn contains(&self, order_id: &OrderId) -> bool {
        self.index.contains_key(order_id)
    }

    /// Number of resting orders
    pub fn order_count(&self) -> usize {
        self.index.len()
    }

    pub fn level_count(&self, side: Side) -> usize {
        match side {
            Side::Back => self.back.level_count(),
            Side::Lay => self.lay.level_count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Full audit of the book
    ///
    /// Level volumes match their orders, cached bests match the level maps,
    /// the index and the levels describe the same set of orders, and the two
    /// sides do not cross.
    pub fn check_invariants(&self) -> bool {
        if !self.back.is_consistent() || !self.lay.is_consistent() {
            return false;
        }

        if self.index.len() != self.back.order_count() + self.lay.order_count() {
            return false;
        }

        let indexed = self.index.iter().all(|(order_id, location)| {
            self.order(order_id)
                .is_some_and(|o| o.order_id == *order_id && o.side == location.side && o.price == location.price)
        });
        if !indexed {
            return false;
        }

        match (self.best_back(), self.best_lay()) {
            (Some(back), Some(lay)) => !crossing::can_match(back, lay),
            _ => true,
        }
    }

    fn verify(&self) {
        if self.config.verify_invariants {
            debug_assert!(self.check_invariants(), "order book invariants violated");
        }
    }
}

impl Default for Orderbook {
    fn default() -> Self {
        Self::new()
    }
}
