//! Matching engine
//!
//! Price-time priority order matching for a single-process exchange.
//!
//! **Key invariants:**
//! - Price-time priority strictly enforced (better price first, then
//!   earlier submission)
//! - Execution price is the resting order's price
//! - Conservation of amount: filled + resting + cancelled = submitted
//! - The book never holds an order with zero remaining amount

pub mod book;
pub mod engine;
pub mod events;
pub mod intake;
pub mod matching;

pub use engine::{BookSnapshot, MatchingEngine, SubmitOutcome};
pub use events::EngineEvent;
pub use intake::{Intake, IntakeError, OrderRequest};
