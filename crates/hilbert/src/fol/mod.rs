//! Formula and term data structures
//!
//! This module provides the tree every other component works on, together
//! with free-variable analysis and capture-aware substitution.

pub mod substitution;
pub mod term;

// Re-export commonly used types
pub use substitution::Substitution;
pub use term::{Kind, Node, Quantifier};
