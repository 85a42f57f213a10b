//! Crossing detection logic
//!
//! Determines when a back and a lay price can match

use types::numeric::Price;
use types::order::Side;

/// Check if a back price and a lay price can match
///
/// A back at `back_price` and a lay at `lay_price` trade when
/// `back_price >= lay_price`.
pub fn can_match(back_price: Price, lay_price: Price) -> bool {
    back_price >= lay_price
}

/// Check if an incoming order crosses the opposite side's best price
///
/// An empty opposite side (`None`) never crosses.
pub fn crosses(incoming_side: Side, incoming_price: Price, opposite_best: Option<Price>) -> bool {
    match (incoming_side, opposite_best) {
        (_, None) => false,
        (Side::Back, Some(lay_best)) => can_match(incoming_price, lay_best),
        (Side::Lay, Some(back_best)) => can_match(back_best, incoming_price),
    }
}
