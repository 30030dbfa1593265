//! Wire models for the WebSocket and REST surfaces

use matching_engine::OrderRequest;
use serde::{Deserialize, Serialize};
use serde_json::json;
use types::ids::OrderId;
use types::numeric::Amount;

/// Inbound WebSocket frames
///
/// Same envelope as outbound events: `{"event": ..., "data": {...}}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientMessage {
    NewOrder(OrderRequest),
    CancelOrder { asset: String, order_id: OrderId },
}

/// Response body for a successful REST cancel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelResponse {
    pub order_id: OrderId,
    pub cancelled_amount: Amount,
}

/// An `error` frame for a WebSocket client, in the event envelope
pub fn error_frame(code: &str, message: &str) -> String {
    json!({
        "event": "error",
        "data": {
            "code": code,
            "message": message,
        }
    })
    .to_string()
}
