//! Gateway configuration
//!
//! Plain struct with defaults, overridable through the environment:
//! `GATEWAY_LISTEN_ADDR`, `GATEWAY_ASSETS` (comma separated),
//! `GATEWAY_EVENT_CAPACITY`, `GATEWAY_ORDER_QUEUE_DEPTH`.

use std::net::SocketAddr;
use thiserror::Error;
use types::ids::Asset;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    Invalid { key: String, value: String },

    #[error("no assets configured")]
    NoAssets,
}

/// Runtime configuration for the gateway
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Address the HTTP/WebSocket server binds to
    pub listen_addr: SocketAddr,
    /// Tradable asset symbols; one book worker is spawned per asset
    pub assets: Vec<Asset>,
    /// Broadcast channel capacity for the event notifier
    pub event_capacity: usize,
    /// Per-asset order queue depth
    pub order_queue_depth: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 5001)),
            assets: vec![Asset::new("Asset1"), Asset::new("Asset2")],
            event_capacity: 1024,
            order_queue_depth: 256,
        }
    }
}

impl GatewayConfig {
    /// Build the configuration from the environment, falling back to
    /// defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(value) = std::env::var("GATEWAY_LISTEN_ADDR") {
            config.listen_addr = value.parse().map_err(|_| ConfigError::Invalid {
                key: "GATEWAY_LISTEN_ADDR".to_string(),
                value,
            })?;
        }

        if let Ok(value) = std::env::var("GATEWAY_ASSETS") {
            config.assets = value
                .split(',')
                .map(str::trim)
                .filter(|symbol| !symbol.is_empty())
                .map(Asset::new)
                .collect();
        }
        if config.assets.is_empty() {
            return Err(ConfigError::NoAssets);
        }

        if let Ok(value) = std::env::var("GATEWAY_EVENT_CAPACITY") {
            config.event_capacity = value.parse().map_err(|_| ConfigError::Invalid {
                key: "GATEWAY_EVENT_CAPACITY".to_string(),
                value,
            })?;
        }

        if let Ok(value) = std::env::var("GATEWAY_ORDER_QUEUE_DEPTH") {
            config.order_queue_depth = value.parse().map_err(|_| ConfigError::Invalid {
                key: "GATEWAY_ORDER_QUEUE_DEPTH".to_string(),
                value,
            })?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GatewayConfig::default();
        assert_eq!(config.listen_addr.port(), 5001);
        assert!(!config.assets.is_empty());
    }
}
