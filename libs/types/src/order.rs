//! Order lifecycle types
//!
//! An order is created `Open` by intake, accumulates fills while matching,
//! and ends `Filled` or `Cancelled`.

use crate::ids::{Asset, OrderId, UserId};
use crate::numeric::{Amount, Price};
use serde::{Deserialize, Serialize};

/// Order side (buyer or seller)
///
/// Serialized as `"buy"` / `"sell"` to match the wire protocol's
/// `order_type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Buy order (bid)
    Buy,
    /// Sell order (ask)
    Sell,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// Order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Accepted and awaiting matching
    Open,
    /// Partially matched, remainder resting
    PartiallyFilled,
    /// Completely matched (terminal)
    Filled,
    /// Cancelled with remainder unmatched (terminal)
    Cancelled,
}

impl OrderStatus {
    /// Check if status is terminal (no further transitions possible)
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Filled | OrderStatus::Cancelled)
    }
}

/// Complete order record
///
/// The `side` field serializes as `order_type` to match the wire protocol
/// (`"buy"` / `"sell"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub asset: Asset,
    #[serde(rename = "order_type")]
    pub side: Side,
    pub price: Price,
    pub amount: Amount,
    pub filled_amount: Amount,
    pub remaining_amount: Amount,
    pub status: OrderStatus,
    pub created_at: i64, // Unix nanos
    pub updated_at: i64, // Unix nanos
}

impl Order {
    /// Create a new open order
    pub fn new(
        user_id: UserId,
        asset: Asset,
        side: Side,
        price: Price,
        amount: Amount,
        timestamp: i64,
    ) -> Self {
        Self {
            id: OrderId::new(),
            user_id,
            asset,
            side,
            price,
            amount,
            filled_amount: Amount::zero(),
            remaining_amount: amount,
            status: OrderStatus::Open,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Check quantity invariant: filled + remaining = total
    pub fn check_invariant(&self) -> bool {
        self.filled_amount.as_decimal() + self.remaining_amount.as_decimal()
            == self.amount.as_decimal()
    }

    /// Check if order is completely filled
    pub fn is_filled(&self) -> bool {
        self.filled_amount == self.amount
    }

    /// Check if order has any fills
    pub fn has_fills(&self) -> bool {
        !self.filled_amount.is_zero()
    }

    /// Record a fill and adjust status
    ///
    /// # Panics
    /// Panics if the fill would exceed total amount or violate invariants
    pub fn add_fill(&mut self, fill_amount: Amount, timestamp: i64) {
        let new_filled = self.filled_amount + fill_amount;

        assert!(
            new_filled.as_decimal() <= self.amount.as_decimal(),
            "Fill would exceed order amount"
        );

        self.filled_amount = new_filled;
        self.remaining_amount = self.amount.saturating_sub(new_filled);

        if self.is_filled() {
            self.status = OrderStatus::Filled;
        } else if self.has_fills() {
            self.status = OrderStatus::PartiallyFilled;
        }

        self.updated_at = timestamp;

        assert!(self.check_invariant(), "Invariant violated after fill");
    }

    /// Cancel the order
    ///
    /// # Panics
    /// Panics if order is already in terminal state
    pub fn cancel(&mut self, timestamp: i64) {
        assert!(!self.status.is_terminal(), "Cannot cancel terminal order");

        self.status = OrderStatus::Cancelled;
        self.updated_at = timestamp;
    }
}
