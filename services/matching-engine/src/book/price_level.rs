//! Price level implementation with FIFO queue
//!
//! A price level contains all resting orders at a specific price point.
//! Orders are maintained in FIFO order to enforce time priority.

use std::collections::VecDeque;
use types::ids::{OrderId, UserId};
use types::numeric::Amount;

/// A price level containing orders at a specific price
///
/// Maintains strict FIFO ordering for time-priority matching.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    /// Queue of orders at this price level (FIFO order)
    orders: VecDeque<LevelEntry>,
    /// Total amount resting at this level
    total_amount: Amount,
}

/// Entry in the price level queue
#[derive(Debug, Clone)]
struct LevelEntry {
    order_id: OrderId,
    user_id: UserId,
    remaining_amount: Amount,
}

impl PriceLevel {
    /// Create a new empty price level
    pub fn new() -> Self {
        Self {
            orders: VecDeque::new(),
            total_amount: Amount::zero(),
        }
    }

    /// Insert an order at the back of the queue (time priority)
    pub fn insert(&mut self, order_id: OrderId, user_id: UserId, amount: Amount) {
        self.orders.push_back(LevelEntry {
            order_id,
            user_id,
            remaining_amount: amount,
        });
        self.total_amount = self.total_amount + amount;
    }

    /// Remove an order from the queue by OrderId
    ///
    /// Returns the remaining amount of the removed order, or None if not found
    pub fn remove(&mut self, order_id: &OrderId) -> Option<Amount> {
        let position = self
            .orders
            .iter()
            .position(|entry| &entry.order_id == order_id)?;
        let entry = self.orders.remove(position)?;

        self.total_amount = self.total_amount.saturating_sub(entry.remaining_amount);

        Some(entry.remaining_amount)
    }

    /// Peek at the front order without removing it
    ///
    /// Returns (order_id, user_id, remaining_amount)
    pub fn peek_front(&self) -> Option<(OrderId, UserId, Amount)> {
        self.orders.front().map(|entry| {
            (
                entry.order_id,
                entry.user_id.clone(),
                entry.remaining_amount,
            )
        })
    }

    /// Update the remaining amount of the front order
    ///
    /// Used when the front order is partially consumed by a match. A zero
    /// amount removes the order from the queue.
    pub fn update_front_amount(&mut self, new_amount: Amount) -> bool {
        if let Some(entry) = self.orders.front_mut() {
            let old_amount = entry.remaining_amount;

            if new_amount.is_zero() {
                self.orders.pop_front();
            } else {
                entry.remaining_amount = new_amount;
            }

            self.total_amount = self.total_amount.saturating_sub(old_amount) + new_amount;

            true
        } else {
            false
        }
    }

    /// Check if the price level is empty
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Get the total amount resting at this price level
    pub fn total_amount(&self) -> Amount {
        self.total_amount
    }

    /// Get the number of orders at this level
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Iterate over resting order ids in time priority order
    pub fn order_ids(&self) -> impl Iterator<Item = &OrderId> {
        self.orders.iter().map(|entry| &entry.order_id)
    }
}

impl Default for PriceLevel {
    fn default() -> Self {
        Self::new()
    }
}
