//! Complexity metrics.
//!
//! - `cyclomatic.rs` — ordered decision-point collection
//! - `cognitive.rs` — nesting-weighted increments

pub mod cognitive;
pub mod cyclomatic;

pub use cognitive::{CognitiveComplexity, Increment};
pub use cyclomatic::{cyclomatic_complexity, cyclomatic_nodes};
