//! Ask (sell-side) order book
//!
//! Maintains sell orders sorted by price ascending (best ask first).
//! Uses BTreeMap for deterministic iteration order.

use std::collections::BTreeMap;
use types::ids::OrderId;
use types::numeric::{Amount, Price};
use types::order::Order;

use super::price_level::PriceLevel;

/// Ask (sell) side order book
///
/// Price levels are sorted so the lowest ask is best. At each price level
/// orders are maintained in FIFO order.
#[derive(Debug, Clone, Default)]
pub struct AskBook {
    /// Price levels; BTreeMap iterates ascending so best ask is first
    levels: BTreeMap<Price, PriceLevel>,
}

impl AskBook {
    /// Create a new empty ask book
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
        }
    }

    /// Insert an order's remaining amount into the ask book
    pub fn insert(&mut self, order: &Order) {
        let level = self.levels.entry(order.price).or_default();
        level.insert(order.id, order.user_id.clone(), order.remaining_amount);
    }

    /// Remove an order, returning its remaining amount if found
    ///
    /// Empty price levels are dropped to keep the book clean.
    pub fn remove(&mut self, order_id: &OrderId, price: Price) -> Option<Amount> {
        let level = self.levels.get_mut(&price)?;
        let removed = level.remove(order_id)?;
        if level.is_empty() {
            self.levels.remove(&price);
        }
        Some(removed)
    }

    /// Get the best ask price (lowest)
    pub fn best_price(&self) -> Option<Price> {
        self.levels.keys().next().copied()
    }

    /// Get the best ask price and total amount at that level
    pub fn best_ask(&self) -> Option<(Price, Amount)> {
        self.levels
            .iter()
            .next()
            .map(|(price, level)| (*price, level.total_amount()))
    }

    /// Get mutable access to the best ask level
    pub(crate) fn best_level_mut(&mut self) -> Option<(Price, &mut PriceLevel)> {
        self.levels
            .iter_mut()
            .next()
            .map(|(price, level)| (*price, level))
    }

    /// Drop a price level entirely (used once a level empties mid-match)
    pub(crate) fn remove_level(&mut self, price: Price) {
        self.levels.remove(&price);
    }

    /// Get depth snapshot (top N price levels, best first)
    pub fn depth_snapshot(&self, depth: usize) -> Vec<(Price, Amount)> {
        self.levels
            .iter()
            .take(depth)
            .map(|(price, level)| (*price, level.total_amount()))
            .collect()
    }

    /// Iterate over all levels, best (lowest) price first
    pub fn levels(&self) -> impl Iterator<Item = (&Price, &PriceLevel)> {
        self.levels.iter()
    }

    /// Check if the ask book is empty
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Get the total number of price levels
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::ids::{Asset, UserId};
    use types::order::Side;

    fn ask(price: &str, amount: &str) -> Order {
        Order::new(
            UserId::new("user2"),
            Asset::new("Asset1"),
            Side::Sell,
            Price::from_str(price).unwrap(),
            Amount::from_str(amount).unwrap(),
            1708123456789000000,
        )
    }

    #[test]
    fn test_ask_book_best_is_lowest_price() {
        let mut book = AskBook::new();
        book.insert(&ask("10.50", "1.0"));
        book.insert(&ask("10.00", "2.0"));
        book.insert(&ask("11.00", "1.5"));

        let (best_price, best_amount) = book.best_ask().unwrap();
        assert_eq!(best_price, Price::from_str("10.00").unwrap());
        assert_eq!(best_amount, Amount::from_str("2.0").unwrap());
    }

    #[test]
    fn test_ask_book_remove_drops_empty_level() {
        let mut book = AskBook::new();
        let order = ask("10.50", "60");
        let order_id = order.id;

        book.insert(&order);
        let removed = book.remove(&order_id, order.price);

        assert_eq!(removed, Some(Amount::from_str("60").unwrap()));
        assert!(book.is_empty());
    }

    #[test]
    fn test_ask_book_depth_snapshot_best_first() {
        let mut book = AskBook::new();
        book.insert(&ask("10.50", "1.0"));
        book.insert(&ask("10.00", "2.0"));
        book.insert(&ask("11.00", "1.5"));

        let depth = book.depth_snapshot(2);
        assert_eq!(depth.len(), 2);
        assert_eq!(depth[0].0, Price::from_str("10.00").unwrap());
        assert_eq!(depth[1].0, Price::from_str("10.50").unwrap());
    }
}
