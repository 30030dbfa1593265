//! Gateway service
//!
//! Terminates client WebSocket/HTTP connections, runs order intake, owns
//! the per-asset book workers, and fans engine events out to every
//! connected client.

pub mod config;
pub mod error;
pub mod exchange;
pub mod handlers;
pub mod models;
pub mod rate_limit;
pub mod router;
pub mod state;
