//! Matching logic module
//!
//! Implements price-time priority matching.

pub mod crossing;
pub mod executor;

pub use crossing::can_match;
pub use executor::FillExecutor;
