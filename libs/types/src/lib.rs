//! Types library for the matching engine
//!
//! Provides the core type definitions shared by the matching engine and the
//! gateway, ensuring type safety and deterministic behavior.
//!
//! # Modules
//! - `ids`: Unique identifiers (OrderId, FillId, UserId, Asset)
//! - `numeric`: Fixed-point decimal types (Price, Amount)
//! - `order`: Order lifecycle types
//! - `fill`: Fill (executed match) types

pub mod fill;
pub mod ids;
pub mod numeric;
pub mod order;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fill::*;
    pub use crate::ids::*;
    pub use crate::numeric::*;
    pub use crate::order::*;
}
