//! Order book infrastructure module
//!
//! Contains price levels and the two book sides. Both sides share one
//! implementation, [`BookSide`], and differ only in their [`SidePriority`]:
//! Back prefers the highest price, Lay the lowest.

use std::collections::BTreeMap;
use types::numeric::Price;
use types::order::Side;

pub mod price_level;
pub mod book_side;
pub mod back_book;
pub mod lay_book;

pub use price_level::{OrderHandle, PriceLevel};
pub use book_side::BookSide;
pub use back_book::{BackBook, BackPriority};
pub use lay_book::{LayBook, LayPriority};

/// Price ordering of one side of the book
pub trait SidePriority {
    const SIDE: Side;

    /// Best price among the live levels, None when there are none
    fn best(levels: &BTreeMap<Price, PriceLevel>) -> Option<Price>;

    /// True if `candidate` is strictly better than `current` for this side
    fn improves(candidate: Price, current: Price) -> bool;

    /// Levels from best to worst
    fn in_priority<'a>(
        levels: &'a BTreeMap<Price, PriceLevel>,
    ) -> Box<dyn Iterator<Item = (&'a Price, &'a PriceLevel)> + 'a>;
}
