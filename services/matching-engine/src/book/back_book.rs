//! Back side of the order book
//!
//! Back orders commit to a minimum price, so the highest price is best.

use std::collections::BTreeMap;
use types::numeric::Price;
use types::order::Side;

use super::book_side::BookSide;
use super::price_level::PriceLevel;
use super::SidePriority;

/// Highest price first
#[derive(Debug, Clone, Copy, Default)]
pub struct BackPriority;

impl SidePriority for BackPriority {
    const SIDE: Side = Side::Back;

    fn best(levels: &BTreeMap<Price, PriceLevel>) -> Option<Price> {
        // BTreeMap iter is ascending, so we need last()
        levels.keys().next_back().copied()
    }

    fn improves(candidate: Price, current: Price) -> bool {
        candidate > current
    }

    fn in_priority<'a>(
        levels: &'a BTreeMap<Price, PriceLevel>,
    ) -> Box<dyn Iterator<Item = (&'a Price, &'a PriceLevel)> + 'a> {
        Box::new(levels.iter().rev())
    }
}

/// Back side order book
pub type BackBook = BookSide<BackPriority>;
