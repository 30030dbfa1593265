//! Fill (executed match) types
//!
//! A fill pairs a resting order with an incoming order. Immutable once
//! created.

use crate::ids::{Asset, FillId, OrderId, UserId};
use crate::numeric::{Amount, Price};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An executed match between a buy and a sell order
///
/// Execution price is always the resting order's price (price-time
/// priority: the resting order sets the price).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub fill_id: FillId,
    /// Per-asset monotonic sequence
    pub sequence: u64,
    pub asset: Asset,

    // Order references
    pub buy_order_id: OrderId,
    pub sell_order_id: OrderId,

    // Participants
    pub buy_user_id: UserId,
    pub sell_user_id: UserId,

    // Execution details
    pub price: Price,
    pub amount: Amount,
    pub executed_at: i64, // Unix nanos
}

impl Fill {
    /// Create a new fill
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        sequence: u64,
        asset: Asset,
        buy_order_id: OrderId,
        sell_order_id: OrderId,
        buy_user_id: UserId,
        sell_user_id: UserId,
        price: Price,
        amount: Amount,
        executed_at: i64,
    ) -> Self {
        Self {
            fill_id: FillId::new(),
            sequence,
            asset,
            buy_order_id,
            sell_order_id,
            buy_user_id,
            sell_user_id,
            price,
            amount,
            executed_at,
        }
    }

    /// Notional value of the fill (price × amount)
    pub fn notional(&self) -> Decimal {
        self.price.as_decimal() * self.amount.as_decimal()
    }

    /// Whether the given order participated in this fill
    pub fn involves(&self, order_id: &OrderId) -> bool {
        &self.buy_order_id == order_id || &self.sell_order_id == order_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fill() -> Fill {
        Fill::new(
            7,
            Asset::new("Asset1"),
            OrderId::new(),
            OrderId::new(),
            UserId::new("user1"),
            UserId::new("user2"),
            Price::from_str("10.50").unwrap(),
            Amount::from_str("60").unwrap(),
            1708123456789000000,
        )
    }

    #[test]
    fn test_fill_notional() {
        let fill = sample_fill();
        assert_eq!(fill.notional(), Decimal::new(63000, 2)); // 10.50 * 60
    }

    #[test]
    fn test_fill_involves() {
        let fill = sample_fill();
        assert!(fill.involves(&fill.buy_order_id));
        assert!(fill.involves(&fill.sell_order_id));
        assert!(!fill.involves(&OrderId::new()));
    }

    #[test]
    fn test_fill_serialization_roundtrip() {
        let fill = sample_fill();
        let json = serde_json::to_string(&fill).unwrap();
        let deserialized: Fill = serde_json::from_str(&json).unwrap();
        assert_eq!(fill, deserialized);
    }
}
