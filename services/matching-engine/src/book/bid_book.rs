//! Bid (buy-side) order book
//!
//! Maintains buy orders sorted by price descending (best bid first).
//! Uses BTreeMap for deterministic iteration order.

use std::collections::BTreeMap;
use types::ids::OrderId;
use types::numeric::{Amount, Price};
use types::order::Order;

use super::price_level::PriceLevel;

/// Bid (buy) side order book
///
/// Price levels are sorted so the highest bid is best. At each price level
/// orders are maintained in FIFO order.
#[derive(Debug, Clone, Default)]
pub struct BidBook {
    /// Price levels; BTreeMap iterates ascending so best bid is last
    levels: BTreeMap<Price, PriceLevel>,
}

impl BidBook {
    /// Create a new empty bid book
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
        }
    }

    /// Insert an order's remaining amount into the bid book
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

    /// Get the best bid price (highest)
    pub fn best_price(&self) -> Option<Price> {
        self.levels.keys().next_back().copied()
    }

    /// Get the best bid price and total amount at that level
    pub fn best_bid(&self) -> Option<(Price, Amount)> {
        self.levels
            .iter()
            .next_back()
            .map(|(price, level)| (*price, level.total_amount()))
    }

    /// Get mutable access to the best bid level
    pub(crate) fn best_level_mut(&mut self) -> Option<(Price, &mut PriceLevel)> {
        self.levels
            .iter_mut()
            .next_back()
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
            .rev()
            .take(depth)
            .map(|(price, level)| (*price, level.total_amount()))
            .collect()
    }

    /// Iterate over all levels, best (highest) price first
    pub fn levels(&self) -> impl Iterator<Item = (&Price, &PriceLevel)> {
        self.levels.iter().rev()
    }

    /// Check if the bid book is empty
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

    fn bid(price: &str, amount: &str) -> Order {
        Order::new(
            UserId::new("user1"),
            Asset::new("Asset1"),
            Side::Buy,
            Price::from_str(price).unwrap(),
            Amount::from_str(amount).unwrap(),
            1708123456789000000,
        )
    }

    #[test]
    fn test_bid_book_insert() {
        let mut book = BidBook::new();
        book.insert(&bid("10.50", "60"));

        assert_eq!(book.level_count(), 1);
        assert!(!book.is_empty());
    }

    #[test]
    fn test_bid_book_best_is_highest_price() {
        let mut book = BidBook::new();
        book.insert(&bid("10.00", "1.0"));
        book.insert(&bid("10.50", "2.0"));
        book.insert(&bid("9.75", "1.5"));

        let (best_price, best_amount) = book.best_bid().unwrap();
        assert_eq!(best_price, Price::from_str("10.50").unwrap());
        assert_eq!(best_amount, Amount::from_str("2.0").unwrap());
    }

    #[test]
    fn test_bid_book_remove_drops_empty_level() {
        let mut book = BidBook::new();
        let order = bid("10.50", "60");
        let order_id = order.id;
        let price = order.price;

        book.insert(&order);
        let removed = book.remove(&order_id, price);

        assert_eq!(removed, Some(Amount::from_str("60").unwrap()));
        assert!(book.is_empty());
    }

    #[test]
    fn test_bid_book_remove_missing() {
        let mut book = BidBook::new();
        book.insert(&bid("10.50", "60"));

        let missing = OrderId::new();
        assert_eq!(book.remove(&missing, Price::from_str("10.50").unwrap()), None);
        assert_eq!(book.level_count(), 1);
    }

    #[test]
    fn test_bid_book_depth_snapshot_best_first() {
        let mut book = BidBook::new();
        book.insert(&bid("10.00", "1.0"));
        book.insert(&bid("10.50", "2.0"));
        book.insert(&bid("9.75", "1.5"));
        book.insert(&bid("11.00", "0.5"));

        let depth = book.depth_snapshot(2);
        assert_eq!(depth.len(), 2);
        assert_eq!(depth[0].0, Price::from_str("11.00").unwrap());
        assert_eq!(depth[1].0, Price::from_str("10.50").unwrap());
    }

    #[test]
    fn test_bid_book_same_price_shares_level() {
        let mut book = BidBook::new();
        book.insert(&bid("10.50", "1.0"));
        book.insert(&bid("10.50", "2.0"));

        assert_eq!(book.level_count(), 1);

        let (price, total) = book.best_bid().unwrap();
        assert_eq!(price, Price::from_str("10.50").unwrap());
        assert_eq!(total, Amount::from_str("3.0").unwrap());
    }
}
