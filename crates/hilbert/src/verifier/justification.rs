//! Why a proof line holds, or why it does not

use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The rule that justified a proof line.
///
/// Line and hypothesis indices are 0-based; they are printed 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Justification {
    /// Propositional schemas 1-10 and the quantifier schemas 11 (`@`) and 12 (`?`)
    Axiom { schema: usize },
    /// Peano schemas A1-A8 and induction A9
    Arithmetic { schema: usize },
    ModusPonens { antecedent: usize, implication: usize },
    Hypothesis { index: usize },
    /// `A->@xB` from `A->B`; the premise is a hypothesis index when
    /// `from_hypothesis` is set
    ForAllRule {
        premise: usize,
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        from_hypothesis: bool,
    },
    /// `?xB->A` from `B->A`
    ExistsRule {
        premise: usize,
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        from_hypothesis: bool,
    },
}

/// Number of the universal instantiation schema `@xA->A[x:=t]`
pub const FORALL_AXIOM: usize = 11;
/// Number of the existential generalization schema `A[x:=t]->?xA`
pub const EXISTS_AXIOM: usize = 12;
/// Number of the induction schema among the arithmetic axioms
pub const INDUCTION_AXIOM: usize = 9;

impl fmt::Display for Justification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Justification::Axiom { schema } => write!(f, "Ax. sch. {}", schema),
            Justification::Arithmetic { schema } => write!(f, "Ax. sch. A{}", schema),
            Justification::ModusPonens {
                antecedent,
                implication,
            } => write!(f, "M.P. {}, {}", antecedent + 1, implication + 1),
            Justification::Hypothesis { index } => write!(f, "Hyp. {}", index + 1),
            Justification::ForAllRule {
                premise,
                from_hypothesis,
            } => write_rule(f, '@', *premise, *from_hypothesis),
            Justification::ExistsRule {
                premise,
                from_hypothesis,
            } => write_rule(f, '?', *premise, *from_hypothesis),
        }
    }
}

fn write_rule(f: &mut fmt::Formatter<'_>, symbol: char, premise: usize, from_hypothesis: bool) -> fmt::Result {
    let source = if from_hypothesis { "hypothesis " } else { "" };
    write!(f, "Inf. rule {} from {}{}", symbol, source, premise + 1)
}

/// Why a proof line could not be justified
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationFailure {
    #[error("{0}")]
    Parse(ParseError),

    /// `line` is the 1-based number of the premise
    #[error("variable {variable} occurs free in formula {line}")]
    VariableFree { variable: String, line: usize },

    /// `hypothesis` is the 1-based number of the assumption being discharged
    #[error("a rule quantifies over variable {variable}, which occurs free in assumption {hypothesis}")]
    HypothesisVariable { variable: String, hypothesis: usize },

    #[error("term {term} is not free for substitution into formula {formula} in place of variable {variable}")]
    NotFreeForSubstitution {
        term: String,
        formula: String,
        variable: String,
    },

    #[error("formula is not an instance of the induction schema over variable {variable}")]
    InductionMismatch { variable: String },

    #[error("not proved")]
    Unproved,
}
