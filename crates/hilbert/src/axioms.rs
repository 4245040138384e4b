//! The fixed axiom schemas
//!
//! Propositional schemas use single uppercase letters as pattern variables,
//! arithmetic schemas single lowercase letters. Both tables are parsed once
//! and shared read-only by every session.

use crate::error::Result;
use crate::fol::Node;
use crate::parser::parse_formula;
use crate::unification::match_schema;
use indexmap::IndexMap;

/// Propositional schemas 1-10
pub const LOGIC_SCHEMAS: [&str; 10] = [
    "A->B->A",
    "(A->B)->(A->B->C)->(A->C)",
    "A->B->A&B",
    "A&B->A",
    "A&B->B",
    "A->A|B",
    "B->A|B",
    "(A->C)->(B->C)->(A|B->C)",
    "(A->B)->(A->!B)->!A",
    "!!A->A",
];

/// Peano schemas A1-A8; induction (A9) is checked structurally
pub const ARITHMETIC_SCHEMAS: [&str; 8] = [
    "a=b->a'=b'",
    "(a=b)->(a=c)->(b=c)",
    "a'=b'->a=b",
    "!a'=0",
    "a+b'=(a+b)'",
    "a+0=a",
    "a*0=0",
    "a*b'=a*b+a",
];

/// Which table a schema belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxiomKind {
    Logic,
    Arithmetic,
}

/// Parsed axiom tables, addressed by label (`"1"`..`"10"`, `"A1"`..`"A8"`)
#[derive(Debug, Clone)]
pub struct AxiomSet {
    logic: IndexMap<String, Node>,
    arithmetic: IndexMap<String, Node>,
}

impl AxiomSet {
    /// Parse the standard schemas
    pub fn standard() -> Result<Self> {
        let logic = LOGIC_SCHEMAS
            .iter()
            .enumerate()
            .map(|(i, text)| Ok(((i + 1).to_string(), parse_formula(text)?)))
            .collect::<Result<IndexMap<_, _>>>()?;
        let arithmetic = ARITHMETIC_SCHEMAS
            .iter()
            .enumerate()
            .map(|(i, text)| Ok((format!("A{}", i + 1), parse_formula(text)?)))
            .collect::<Result<IndexMap<_, _>>>()?;
        Ok(AxiomSet { logic, arithmetic })
    }

    /// 1-based number of the first propositional schema `formula` instantiates
    pub fn match_logic(&self, formula: &Node) -> Option<usize> {
        first_match(&self.logic, formula)
    }

    /// 1-based number of the first arithmetic schema `formula` instantiates
    pub fn match_arithmetic(&self, formula: &Node) -> Option<usize> {
        first_match(&self.arithmetic, formula)
    }

    /// Look up a schema by label
    pub fn get(&self, label: &str) -> Option<&Node> {
        self.logic.get(label).or_else(|| self.arithmetic.get(label))
    }

    pub fn schemas(&self, kind: AxiomKind) -> impl Iterator<Item = (&str, &Node)> {
        let table = match kind {
            AxiomKind::Logic => &self.logic,
            AxiomKind::Arithmetic => &self.arithmetic,
        };
        table.iter().map(|(label, node)| (label.as_str(), node))
    }

    pub fn len(&self) -> usize {
        self.logic.len() + self.arithmetic.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn first_match(table: &IndexMap<String, Node>, formula: &Node) -> Option<usize> {
    table
        .values()
        .position(|schema| match_schema(schema, formula).is_some())
        .map(|i| i + 1)
}
