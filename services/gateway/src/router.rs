//! HTTP/WebSocket router

use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers;
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let v1 = Router::new()
        .route("/orders", post(handlers::order::create_order))
        .route(
            "/orders/{asset}/{order_id}",
            delete(handlers::order::cancel_order),
        )
        .route("/book/{asset}", get(handlers::book::book_snapshot))
        .route("/ws", get(handlers::ws::ws_handler));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/v1", v1)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
