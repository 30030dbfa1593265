//! Engine event definitions
//!
//! Events broadcast to connected clients. Framed on the wire as
//! `{"event": "<name>", "data": {...}}` to mirror the named-event protocol
//! the clients speak.

use serde::{Deserialize, Serialize};
use types::fill::Fill;
use types::ids::{Asset, OrderId};
use types::numeric::{Amount, Price};
use types::order::Order;

/// Server-to-client events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum EngineEvent {
    /// An order passed intake and entered the engine
    OrderReceived(Order),

    /// A buy and a sell order were matched
    OrderMatched {
        buy_order_id: OrderId,
        sell_order_id: OrderId,
        asset: Asset,
        price: Price,
        amount: Amount,
    },

    /// A resting order was cancelled
    OrderCancelled {
        order_id: OrderId,
        asset: Asset,
        remaining_amount: Amount,
    },
}

impl EngineEvent {
    /// Build an `order_received` event from an accepted order
    pub fn order_received(order: &Order) -> Self {
        EngineEvent::OrderReceived(order.clone())
    }

    /// Build an `order_matched` event from a fill
    pub fn order_matched(fill: &Fill) -> Self {
        EngineEvent::OrderMatched {
            buy_order_id: fill.buy_order_id,
            sell_order_id: fill.sell_order_id,
            asset: fill.asset.clone(),
            price: fill.price,
            amount: fill.amount,
        }
    }

    /// Build an `order_cancelled` event
    pub fn order_cancelled(order_id: OrderId, asset: Asset, remaining_amount: Amount) -> Self {
        EngineEvent::OrderCancelled {
            order_id,
            asset,
            remaining_amount,
        }
    }

    /// Event name as it appears on the wire
    pub fn label(&self) -> &'static str {
        match self {
            EngineEvent::OrderReceived(_) => "order_received",
            EngineEvent::OrderMatched { .. } => "order_matched",
            EngineEvent::OrderCancelled { .. } => "order_cancelled",
        }
    }

    /// The asset this event concerns
    pub fn asset(&self) -> &Asset {
        match self {
            EngineEvent::OrderReceived(order) => &order.asset,
            EngineEvent::OrderMatched { asset, .. } => asset,
            EngineEvent::OrderCancelled { asset, .. } => asset,
        }
    }
}
