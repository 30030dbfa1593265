//! Crossing detection logic
//!
//! Determines when a bid and ask can match based on price compatibility.

use types::numeric::Price;
use types::order::Side;

/// Check if a bid and ask can match at given prices
///
/// A buy matches a sell when the buy price is at or above the sell price.
pub fn can_match(bid_price: Price, ask_price: Price) -> bool {
    bid_price >= ask_price
}

/// Check if an incoming order crosses a resting order's price
pub fn incoming_can_match(incoming_side: Side, incoming_price: Price, resting_price: Price) -> bool {
    match incoming_side {
        Side::Buy => incoming_price >= resting_price,
        Side::Sell => incoming_price <= resting_price,
    }
}
