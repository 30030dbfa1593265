//! Fill generation
//!
//! Builds `Fill` records for executed matches and hands out the per-asset
//! monotonic sequence numbers that order them.

use types::fill::Fill;
use types::ids::{Asset, OrderId, UserId};
use types::numeric::{Amount, Price};

/// Fill executor with per-asset sequence generation
#[derive(Debug)]
pub struct FillExecutor {
    sequence_counter: u64,
}

impl FillExecutor {
    /// Create a new executor with a starting sequence number
    pub fn new(starting_sequence: u64) -> Self {
        Self {
            sequence_counter: starting_sequence,
        }
    }

    /// Get next sequence number (monotonically increasing)
    fn next_sequence(&mut self) -> u64 {
        let seq = self.sequence_counter;
        self.sequence_counter += 1;
        seq
    }

    /// Execute a match between a buy and a sell order
    ///
    /// The execution price is the resting order's price; the caller resolves
    /// which side was resting before calling this.
    #[allow(clippy::too_many_arguments)]
    pub fn execute(
        &mut self,
        asset: Asset,
        buy_order_id: OrderId,
        sell_order_id: OrderId,
        buy_user_id: UserId,
        sell_user_id: UserId,
        price: Price,
        amount: Amount,
        timestamp: i64,
    ) -> Fill {
        debug_assert!(!amount.is_zero(), "zero-amount fill");

        let sequence = self.next_sequence();

        Fill::new(
            sequence,
            asset,
            buy_order_id,
            sell_order_id,
            buy_user_id,
            sell_user_id,
            price,
            amount,
            timestamp,
        )
    }
}
