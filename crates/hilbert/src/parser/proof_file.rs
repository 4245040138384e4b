//! Proof documents: a header `Γ |- goal` followed by one formula per line

use crate::error::{HilbertError, Result};
use std::fs;
use std::path::Path;

/// A proof document with whitespace-free formula texts.
///
/// Formulas are kept as text here; the verifier parses each line on its own
/// so that one malformed line does not prevent checking the others.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofFile {
    pub hypotheses: Vec<String>,
    pub goal: String,
    pub lines: Vec<String>,
}

impl ProofFile {
    /// The header as it appears in the input, without whitespace
    pub fn header(&self) -> String {
        format!("{}|-{}", self.hypotheses.join(","), self.goal)
    }
}

/// Read and split a proof document
pub fn parse_proof_file<P: AsRef<Path>>(path: P) -> Result<ProofFile> {
    let content = fs::read_to_string(path)?;
    parse_proof(&content)
}

/// Split a proof document into header and proof lines
pub fn parse_proof(input: &str) -> Result<ProofFile> {
    let mut lines = input
        .lines()
        .map(strip_whitespace)
        .filter(|line| !line.is_empty());

    let header = lines
        .next()
        .ok_or_else(|| HilbertError::MalformedHeader("empty input".to_string()))?;
    let (hypotheses, goal) = header.split_once("|-").ok_or_else(|| {
        HilbertError::MalformedHeader(format!("missing `|-` in `{}`", header))
    })?;
    if goal.is_empty() {
        return Err(HilbertError::MalformedHeader(format!(
            "missing goal in `{}`",
            header
        )));
    }

    Ok(ProofFile {
        hypotheses: split_top_level(hypotheses, ','),
        goal: goal.to_string(),
        lines: lines.collect(),
    })
}

fn strip_whitespace(line: &str) -> String {
    line.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Split on `separator` outside of parentheses; empty pieces are dropped
pub fn split_top_level(text: &str, separator: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0i32;
    for c in text.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
        if c == separator && depth == 0 {
            parts.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    parts.push(current);
    parts.retain(|part| !part.is_empty());
    parts
}
