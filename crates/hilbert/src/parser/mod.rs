//! Formula parser and proof document reader

pub mod formula;
pub mod proof_file;

// Re-export main parsing functions and types
pub use formula::{parse_formula, parse_term};
pub use proof_file::{parse_proof, parse_proof_file, split_top_level, ProofFile};
