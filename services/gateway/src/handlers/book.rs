//! Order book snapshot endpoint

use axum::Json;
use axum::extract::{Path, Query, State};
use matching_engine::BookSnapshot;
use serde::Deserialize;
use types::ids::Asset;

use crate::error::AppError;
use crate::state::AppState;

const DEFAULT_DEPTH: usize = 20;

#[derive(Debug, Deserialize)]
pub struct DepthParams {
    depth: Option<usize>,
}

/// GET /v1/book/{asset}?depth=N
pub async fn book_snapshot(
    State(state): State<AppState>,
    Path(asset): Path<String>,
    Query(params): Query<DepthParams>,
) -> Result<Json<BookSnapshot>, AppError> {
    let asset = Asset::new(asset);
    let depth = params.depth.unwrap_or(DEFAULT_DEPTH);

    let snapshot = state.exchange.snapshot(&asset, depth).await?;
    Ok(Json(snapshot))
}
