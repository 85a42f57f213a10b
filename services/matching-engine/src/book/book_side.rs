//! One side of the order book
//!
//! Levels are kept in a BTreeMap keyed by price, which gives deterministic
//! iteration and logarithmic best-price recomputation when a level goes away.
//! The best price is cached and refreshed on every structural change.

use std::collections::BTreeMap;
use std::marker::PhantomData;
use types::errors::BookError;
use types::numeric::{Price, Stake};
use types::order::{Order, Side};

use super::price_level::{OrderHandle, PriceLevel};
use super::SidePriority;

/// Price levels for a single side, ordered by that side's priority
#[derive(Debug, Clone)]
pub struct BookSide<P> {
    levels: BTreeMap<Price, PriceLevel>,
    best: Option<Price>,
    _priority: PhantomData<P>,
}

impl<P: SidePriority> BookSide<P> {
    /// Create a new empty book side
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
            best: None,
            _priority: PhantomData,
        }
    }

    pub fn side(&self) -> Side {
        P::SIDE
    }

    /// Current best price, or None if the side is empty
    pub fn best_price(&self) -> Option<Price> {
        self.best
    }

    /// Best price with its total volume
    pub fn best_level(&self) -> Option<(Price, Stake)> {
        let price = self.best?;
        self.levels.get(&price).map(|level| (price, level.total_volume()))
    }

    /// Fetch the level at `price`, creating it if needed
    ///
    /// A newly created level that beats the cached best becomes the best.
    pub fn level_at(&mut self, price: Price) -> &mut PriceLevel {
        let improves = self.best.map_or(true, |best| P::improves(price, best));
        if improves {
            self.best = Some(price);
        }
        self.levels.entry(price).or_insert_with(|| PriceLevel::new(price))
    }

    pub fn level(&self, price: Price) -> Option<&PriceLevel> {
        self.levels.get(&price)
    }

    pub(crate) fn level_mut(&mut self, price: Price) -> Option<&mut PriceLevel> {
        self.levels.get_mut(&price)
    }

    /// Append an order to the level at its price
    pub fn insert(&mut self, order: Order) -> Result<OrderHandle, BookError> {
        let price = order.price;
        let result = self.level_at(price).add_order(order);
        if result.is_err() {
            self.remove_level_if_empty(price);
        }
        result
    }

    /// Whether an order of `stake` at `price` could rest without a volume overflow
    pub fn can_rest(&self, price: Price, stake: Stake) -> bool {
        self.levels.get(&price).map_or(true, |level| level.can_accept(stake))
    }

    /// Drop the level at `price` if it has no orders left
    ///
    /// Must follow every removal that could have emptied a level. Returns true
    /// if a level was removed.
    pub fn remove_level_if_empty(&mut self, price: Price) -> bool {
        let empty = self.levels.get(&price).is_some_and(PriceLevel::is_empty);
        if !empty {
            return false;
        }

        self.levels.remove(&price);
        if self.best == Some(price) {
            self.best = P::best(&self.levels);
        }
        true
    }

    /// Top `depth` levels as (price, total volume), best first
    pub fn depth_snapshot(&self, depth: usize) -> Vec<(Price, Stake)> {
        P::in_priority(&self.levels)
            .take(depth)
            .map(|(price, level)| (*price, level.total_volume()))
            .collect()
    }

    /// Levels from best to worst
    pub fn levels(&self) -> impl Iterator<Item = &PriceLevel> {
        P::in_priority(&self.levels).map(|(_, level)| level)
    }

    /// Check if the book side is empty
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Get the total number of price levels
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Get the total number of resting orders
    pub fn order_count(&self) -> usize {
        self.levels.values().map(PriceLevel::order_count).sum()
    }

    /// Cached best agrees with the ordered map and no empty level lingers
    pub(crate) fn is_consistent(&self) -> bool {
        self.best == P::best(&self.levels)
            && self.levels.iter().all(|(price, level)| {
                !level.is_empty()
                    && level.price() == *price
                    && level.iter().map(|o| o.remaining_stake).sum::<Stake>() == level.total_volume()
                    && level.iter().all(|o| o.price == *price && o.side == P::SIDE)
            })
    }
}

impl<P: SidePriority> Default for BookSide<P> {
    fn default() -> Self {
        Self::new()
    }
}
