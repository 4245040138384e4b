//! Hilbert: a proof checker for a Hilbert-style calculus
//!
//! This library checks proofs in propositional logic with first-order
//! quantifiers and Peano arithmetic, one formula per line, and rewrites
//! proofs under a hypothesis into hypothesis-free ones via the deduction
//! theorem.

pub mod axioms;
pub mod config;
pub mod deduction;
pub mod error;
pub mod fol;
pub mod json;
pub mod parser;
pub mod report;
pub mod unification;
pub mod verifier;

// Re-export commonly used types
pub use axioms::AxiomSet;
pub use config::{Mode, OutputFormat, RunConfig};
pub use deduction::{Elaboration, Elaborator, TemplateKind, Templates};
pub use error::{HilbertError, ParseError, Result};
pub use fol::{Kind, Node, Quantifier, Substitution};
pub use parser::{parse_formula, parse_proof, parse_proof_file, parse_term, ProofFile};
pub use report::{check_proof, elaborate_proof, run, CheckReport, ElaborationReport, RunOutput};
pub use unification::{match_schema, match_substitution, MatchContext};
pub use verifier::{Justification, ProofSession, VerificationFailure};
