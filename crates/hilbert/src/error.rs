//! Error types for hilbert

use crate::verifier::VerificationFailure;
use std::io;
use thiserror::Error;

/// A formula that could not be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("expected {expected} at position {position} in `{input}`")]
pub struct ParseError {
    /// The construct the parser was looking for
    pub expected: String,
    /// Byte offset into the whitespace-free input
    pub position: usize,
    pub input: String,
}

#[derive(Error, Debug)]
pub enum HilbertError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),

    #[error("Malformed header: {0}")]
    MalformedHeader(String),

    #[error("Template `{name}` is invalid: {source}")]
    InvalidTemplate { name: String, source: ParseError },

    #[error("Proof is incorrect starting from formula {line}: {failure}")]
    IncorrectProof {
        /// 1-based number of the first failing proof line
        line: usize,
        failure: VerificationFailure,
    },

    #[error("No hypothesis to discharge")]
    NoHypothesis,

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HilbertError>;
