//! Shared type definitions: collection aliases and newtype identifiers.

pub mod collections;
pub mod identifiers;
