//! Shared application state

use std::sync::Arc;

use crate::config::GatewayConfig;
use crate::exchange::Exchange;
use crate::rate_limit::RateLimiter;

/// State shared by every handler; cheap to clone
#[derive(Clone)]
pub struct AppState {
    pub exchange: Arc<Exchange>,
    pub rate_limiter: Arc<RateLimiter>,
}

impl AppState {
    /// Build the shared state, spawning the per-asset book workers.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(config: &GatewayConfig) -> Self {
        let exchange = Exchange::new(
            config.assets.clone(),
            config.event_capacity,
            config.order_queue_depth,
        );

        Self {
            exchange: Arc::new(exchange),
            rate_limiter: Arc::new(RateLimiter::new()),
        }
    }
}
