//! Depth-bounded constant folding.
//!
//! String and integer expressions are resolved by walking literals,
//! concatenations / arithmetic, parentheses, and identifier indirections
//! through the symbol table's single-safe-value rule. Every identifier hop
//! consumes one unit of the resolution budget, which caps pathological
//! alias chains.
//!
//! - `strings.rs` — full and partial string resolution
//! - `arithmetic.rs` — integer evaluation with radix-aware parsing

pub mod arithmetic;
pub mod strings;

/// Identifier hops allowed while resolving a constant. Deliberately small:
/// real code rarely aliases a constant more than a handful of times, and
/// the bound keeps resolution linear in the expression size.
pub const MAX_IDENTIFIER_RESOLUTION: u32 = 20;

pub use arithmetic::evaluate_arithmetic_expression;
pub use strings::{
    is_constant_string, resolve_as_partial_string_constant, resolve_as_string_constant,
};
