//! Request handlers

pub mod book;
pub mod order;
pub mod ws;

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "assets": state.exchange.assets(),
    }))
}
