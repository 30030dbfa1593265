//! REST order endpoints

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use matching_engine::OrderRequest;
use types::ids::{Asset, OrderId};
use types::order::Order;

use crate::error::AppError;
use crate::models::CancelResponse;
use crate::state::AppState;

/// POST /v1/orders
///
/// Admits the order and returns it as accepted; matching runs
/// asynchronously and reports through the event stream.
pub async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<OrderRequest>,
) -> Result<(StatusCode, Json<Order>), AppError> {
    state
        .rate_limiter
        .check_rate_limit(&format!("{}:new_order", request.user_id), 20, 20.0)?;

    let order = state.exchange.submit_order(request).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// DELETE /v1/orders/{asset}/{order_id}
pub async fn cancel_order(
    State(state): State<AppState>,
    Path((asset, order_id)): Path<(String, OrderId)>,
) -> Result<Json<CancelResponse>, AppError> {
    let asset = Asset::new(asset);
    let cancelled = state.exchange.cancel_order(&asset, order_id).await?;

    match cancelled {
        Some(cancelled_amount) => Ok(Json(CancelResponse {
            order_id,
            cancelled_amount,
        })),
        None => Err(AppError::NotFound(format!(
            "order {order_id} is not resting on {asset}"
        ))),
    }
}
