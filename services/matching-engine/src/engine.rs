//! Matching engine core
//!
//! One `MatchingEngine` owns the bid/ask books for a single asset. The
//! caller (one worker task per asset in the gateway) is the single logical
//! owner, which is what serializes concurrent intake for the same asset.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;
use types::fill::Fill;
use types::ids::{Asset, OrderId};
use types::numeric::{Amount, Price};
use types::order::{Order, Side};

use crate::book::{AskBook, BidBook};
use crate::matching::{crossing, FillExecutor};

/// Location of a resting order, kept so cancellation needs only the id
#[derive(Debug, Clone, Copy)]
struct RestingRef {
    side: Side,
    price: Price,
}

/// Price-time priority matching engine for one asset
#[derive(Debug)]
pub struct MatchingEngine {
    asset: Asset,
    bids: BidBook,
    asks: AskBook,
    executor: FillExecutor,
    /// Index of resting orders for O(1) cancel lookup
    resting: HashMap<OrderId, RestingRef>,
}

/// Result of submitting an order
#[derive(Debug)]
pub enum SubmitOutcome {
    /// No match; the order rests on the book
    Resting { order: Order },
    /// Partially matched; the remainder rests on the book
    PartiallyFilled { fills: Vec<Fill>, order: Order },
    /// Completely matched
    Filled { fills: Vec<Fill>, order: Order },
}

impl SubmitOutcome {
    /// Fills produced by this submission, in execution order
    pub fn fills(&self) -> &[Fill] {
        match self {
            SubmitOutcome::Resting { .. } => &[],
            SubmitOutcome::PartiallyFilled { fills, .. } => fills,
            SubmitOutcome::Filled { fills, .. } => fills,
        }
    }

    /// The submitted order in its post-matching state
    pub fn order(&self) -> &Order {
        match self {
            SubmitOutcome::Resting { order } => order,
            SubmitOutcome::PartiallyFilled { order, .. } => order,
            SubmitOutcome::Filled { order, .. } => order,
        }
    }
}

/// Order book depth snapshot, best price first on both sides
#[derive(Debug, Clone, Serialize)]
pub struct BookSnapshot {
    pub asset: Asset,
    pub bids: Vec<(Price, Amount)>,
    pub asks: Vec<(Price, Amount)>,
}

impl MatchingEngine {
    /// Create an engine for one asset with a starting fill sequence
    pub fn new(asset: Asset, starting_sequence: u64) -> Self {
        Self {
            asset,
            bids: BidBook::new(),
            asks: AskBook::new(),
            executor: FillExecutor::new(starting_sequence),
            resting: HashMap::new(),
        }
    }

    /// The asset this engine trades
    pub fn asset(&self) -> &Asset {
        &self.asset
    }

    /// Submit an order: match against the opposite side, then rest any
    /// remainder on the book.
    pub fn submit_order(&mut self, mut order: Order, timestamp: i64) -> SubmitOutcome {
        debug_assert_eq!(order.asset, self.asset, "order routed to wrong book");

        let fills = match order.side {
            Side::Buy => self.match_buy(&mut order, timestamp),
            Side::Sell => self.match_sell(&mut order, timestamp),
        };

        if order.is_filled() {
            return SubmitOutcome::Filled { fills, order };
        }

        // Unmatched remainder rests on the book
        match order.side {
            Side::Buy => self.bids.insert(&order),
            Side::Sell => self.asks.insert(&order),
        }
        self.resting.insert(
            order.id,
            RestingRef {
                side: order.side,
                price: order.price,
            },
        );

        if fills.is_empty() {
            SubmitOutcome::Resting { order }
        } else {
            SubmitOutcome::PartiallyFilled { fills, order }
        }
    }

    /// Match an incoming buy against the asks
    fn match_buy(&mut self, order: &mut Order, timestamp: i64) -> Vec<Fill> {
        let mut fills = Vec::new();

        while !order.is_filled() {
            let Some(ask_price) = self.asks.best_price() else {
                break;
            };
            if !crossing::can_match(order.price, ask_price) {
                break;
            }

            let Some((maker_id, maker_user, maker_remaining)) = self
                .asks
                .best_level_mut()
                .and_then(|(_, level)| level.peek_front())
            else {
                break;
            };

            let match_amount = order.remaining_amount.min(maker_remaining);

            // Resting order sets the price
            let fill = self.executor.execute(
                self.asset.clone(),
                order.id,
                maker_id,
                order.user_id.clone(),
                maker_user,
                ask_price,
                match_amount,
                timestamp,
            );
            debug!(
                asset = %self.asset,
                amount = %match_amount,
                price = %ask_price,
                buy = %order.id,
                sell = %maker_id,
                "matched"
            );
            fills.push(fill);

            order.add_fill(match_amount, timestamp);

            let maker_left = maker_remaining.saturating_sub(match_amount);
            if let Some((_, level)) = self.asks.best_level_mut() {
                level.update_front_amount(maker_left);
                if level.is_empty() {
                    self.asks.remove_level(ask_price);
                }
            }
            if maker_left.is_zero() {
                self.resting.remove(&maker_id);
            }
        }

        fills
    }

    /// Match an incoming sell against the bids
    fn match_sell(&mut self, order: &mut Order, timestamp: i64) -> Vec<Fill> {
        let mut fills = Vec::new();

        while !order.is_filled() {
            let Some(bid_price) = self.bids.best_price() else {
                break;
            };
            if !crossing::can_match(bid_price, order.price) {
                break;
            }

            let Some((maker_id, maker_user, maker_remaining)) = self
                .bids
                .best_level_mut()
                .and_then(|(_, level)| level.peek_front())
            else {
                break;
            };

            let match_amount = order.remaining_amount.min(maker_remaining);

            let fill = self.executor.execute(
                self.asset.clone(),
                maker_id,
                order.id,
                maker_user,
                order.user_id.clone(),
                bid_price,
                match_amount,
                timestamp,
            );
            debug!(
                asset = %self.asset,
                amount = %match_amount,
                price = %bid_price,
                buy = %maker_id,
                sell = %order.id,
                "matched"
            );
            fills.push(fill);

            order.add_fill(match_amount, timestamp);

            let maker_left = maker_remaining.saturating_sub(match_amount);
            if let Some((_, level)) = self.bids.best_level_mut() {
                level.update_front_amount(maker_left);
                if level.is_empty() {
                    self.bids.remove_level(bid_price);
                }
            }
            if maker_left.is_zero() {
                self.resting.remove(&maker_id);
            }
        }

        fills
    }

    /// Cancel a resting order by id
    ///
    /// Returns the remaining amount removed from the book, or None if the
    /// order is not resting (already filled, cancelled, or never existed).
    pub fn cancel_order(&mut self, order_id: &OrderId) -> Option<Amount> {
        let reference = self.resting.remove(order_id)?;
        let removed = match reference.side {
            Side::Buy => self.bids.remove(order_id, reference.price),
            Side::Sell => self.asks.remove(order_id, reference.price),
        };
        debug_assert!(removed.is_some(), "resting index out of sync with book");
        removed
    }

    /// Depth snapshot of both sides (top N levels, best first)
    pub fn snapshot(&self, depth: usize) -> BookSnapshot {
        BookSnapshot {
            asset: self.asset.clone(),
            bids: self.bids.depth_snapshot(depth),
            asks: self.asks.depth_snapshot(depth),
        }
    }

    /// Bid side (read-only)
    pub fn bids(&self) -> &BidBook {
        &self.bids
    }

    /// Ask side (read-only)
    pub fn asks(&self) -> &AskBook {
        &self.asks
    }

    /// Whether both sides of the book are empty
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    /// Number of resting orders across both sides
    pub fn resting_count(&self) -> usize {
        self.resting.len()
    }
}
