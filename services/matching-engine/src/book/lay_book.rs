//! Lay side of the order book
//!
//! Lay orders offer odds up to a maximum price, so the lowest price is best.

use std::collections::BTreeMap;
use types::numeric::Price;
use types::order::Side;

use super::book_side::BookSide;
use super::price_level::PriceLevel;
use super::SidePriority;

/// Lowest price first
#[derive(Debug, Clone, Copy, Default)]
pub struct LayPriority;

impl SidePriority for LayPriority {
    const SIDE: Side = Side::Lay;

    fn best(levels: &BTreeMap<Price, PriceLevel>) -> Option<Price> {
        levels.keys().next().copied()
    }

    fn improves(candidate: Price, current: Price) -> bool {
        candidate < current
    }

    fn in_priority<'a>(
        levels: &'a BTreeMap<Price, PriceLevel>,
    ) -> Box<dyn Iterator<Item = (&'a Price, &'a PriceLevel)> + 'a> {
        Box::new(levels.iter())
    }
}

/// Lay side order book
pub type LayBook = BookSide<LayPriority>;
