//! WebSocket endpoint
//!
//! Clients submit `new_order` / `cancel_order` frames and receive the full
//! engine event stream (`order_received`, `order_matched`,
//! `order_cancelled`). Errors for a client's own frames come back as
//! `error` frames on the same connection; the broadcast stream is never
//! interrupted by them.

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};
use types::ids::Asset;

use crate::error::AppError;
use crate::models::{ClientMessage, error_frame};
use crate::state::AppState;

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut sink, mut stream) = socket.split();
    let mut events = state.exchange.subscribe();
    debug!("websocket client connected");

    loop {
        tokio::select! {
            event = events.recv() => {
                let event = match event {
                    Ok(event) => event,
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "websocket client lagged behind event stream");
                        continue;
                    }
                    Err(RecvError::Closed) => break,
                };

                let frame = match serde_json::to_string(&event) {
                    Ok(frame) => frame,
                    Err(error) => {
                        warn!(%error, "failed to serialize engine event");
                        continue;
                    }
                };
                if sink.send(Message::Text(frame.into())).await.is_err() {
                    break;
                }
            }
            frame = stream.next() => {
                let message = match frame {
                    Some(Ok(message)) => message,
                    Some(Err(_)) | None => break,
                };

                let text = match message {
                    Message::Text(text) => text,
                    Message::Close(_) => break,
                    // Pings are answered by axum; ignore the rest
                    _ => continue,
                };

                if let Some(reply) = handle_client_frame(&state, text.as_str()).await {
                    if sink.send(Message::Text(reply.into())).await.is_err() {
                        break;
                    }
                }
            }
        }
    }

    debug!("websocket client disconnected");
}

/// Process one inbound frame; returns an error frame to echo back, if any.
///
/// Successful submissions produce no direct reply; the client observes the
/// outcome through the broadcast stream like everyone else.
async fn handle_client_frame(state: &AppState, text: &str) -> Option<String> {
    let message: ClientMessage = match serde_json::from_str(text) {
        Ok(message) => message,
        Err(error) => {
            return Some(error_frame(
                "INVALID_ORDER",
                &format!("malformed frame: {error}"),
            ));
        }
    };

    match message {
        ClientMessage::NewOrder(request) => {
            let limit = state
                .rate_limiter
                .check_rate_limit(&format!("{}:new_order", request.user_id), 20, 20.0);
            if let Err(error) = limit {
                return Some(error_frame(error.code(), &error.to_string()));
            }

            match state.exchange.submit_order(request).await {
                Ok(_) => None,
                Err(error) => {
                    let error = AppError::from(error);
                    Some(error_frame(error.code(), &error.to_string()))
                }
            }
        }
        ClientMessage::CancelOrder { asset, order_id } => {
            let asset = Asset::new(asset);
            match state.exchange.cancel_order(&asset, order_id).await {
                Ok(Some(_)) => None,
                Ok(None) => Some(error_frame(
                    "NOT_FOUND",
                    &format!("order {order_id} is not resting on {asset}"),
                )),
                Err(error) => {
                    let error = AppError::from(error);
                    Some(error_frame(error.code(), &error.to_string()))
                }
            }
        }
    }
}
