//! Proof skeletons used by the deduction theorem
//!
//! Each skeleton is a hypothesis-free proof over the slots `H` (the
//! discharged hypothesis), `A`, `B` (formulas) and `x` (a variable). They are
//! shipped with the crate and may be replaced from a directory holding files
//! with the same names.

use crate::error::{HilbertError, Result};
use crate::fol::{Node, Substitution};
use crate::parser::parse_formula;
use std::fs;
use std::path::Path;

/// Which skeleton
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    /// `H->H`
    SelfImplication,
    /// `H->A` for an axiom or hypothesis `A`
    AxiomLifting,
    /// `H->B` from `H->A` and `H->A->B`
    ModusPonens,
    /// `H->A->@xB` from `H->A->B`
    ForAllRule,
    /// `H->?xB->A` from `H->B->A`
    ExistsRule,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 5] = [
        TemplateKind::SelfImplication,
        TemplateKind::AxiomLifting,
        TemplateKind::ModusPonens,
        TemplateKind::ForAllRule,
        TemplateKind::ExistsRule,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            TemplateKind::SelfImplication => "self_implication.proof",
            TemplateKind::AxiomLifting => "axiom_lifting.proof",
            TemplateKind::ModusPonens => "modus_ponens.proof",
            TemplateKind::ForAllRule => "forall_rule.proof",
            TemplateKind::ExistsRule => "exists_rule.proof",
        }
    }

    fn builtin_source(self) -> &'static str {
        match self {
            TemplateKind::SelfImplication => include_str!("../../templates/self_implication.proof"),
            TemplateKind::AxiomLifting => include_str!("../../templates/axiom_lifting.proof"),
            TemplateKind::ModusPonens => include_str!("../../templates/modus_ponens.proof"),
            TemplateKind::ForAllRule => include_str!("../../templates/forall_rule.proof"),
            TemplateKind::ExistsRule => include_str!("../../templates/exists_rule.proof"),
        }
    }
}

/// The five parsed skeletons
#[derive(Debug, Clone)]
pub struct Templates {
    self_implication: Vec<Node>,
    axiom_lifting: Vec<Node>,
    modus_ponens: Vec<Node>,
    forall_rule: Vec<Node>,
    exists_rule: Vec<Node>,
}

impl Templates {
    /// The skeletons compiled into the crate
    pub fn builtin() -> Result<Self> {
        Templates::load(|kind| Ok(kind.builtin_source().to_string()))
    }

    /// Read every skeleton from `dir`
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        log::info!("Loading proof templates from {}", dir.display());
        Templates::load(|kind| Ok(fs::read_to_string(dir.join(kind.file_name()))?))
    }

    fn load<F>(mut source: F) -> Result<Self>
    where
        F: FnMut(TemplateKind) -> Result<String>,
    {
        let mut parse = |kind: TemplateKind| -> Result<Vec<Node>> {
            let text = source(kind)?;
            parse_template(kind.file_name(), &text)
        };
        Ok(Templates {
            self_implication: parse(TemplateKind::SelfImplication)?,
            axiom_lifting: parse(TemplateKind::AxiomLifting)?,
            modus_ponens: parse(TemplateKind::ModusPonens)?,
            forall_rule: parse(TemplateKind::ForAllRule)?,
            exists_rule: parse(TemplateKind::ExistsRule)?,
        })
    }

    pub fn get(&self, kind: TemplateKind) -> &[Node] {
        match kind {
            TemplateKind::SelfImplication => &self.self_implication,
            TemplateKind::AxiomLifting => &self.axiom_lifting,
            TemplateKind::ModusPonens => &self.modus_ponens,
            TemplateKind::ForAllRule => &self.forall_rule,
            TemplateKind::ExistsRule => &self.exists_rule,
        }
    }

    /// Fill the slots of a skeleton
    pub fn instantiate(&self, kind: TemplateKind, slots: &Substitution) -> Vec<Node> {
        self.get(kind)
            .iter()
            .map(|line| line.apply_substitution(slots))
            .collect()
    }
}

fn parse_template(name: &str, text: &str) -> Result<Vec<Node>> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            parse_formula(line).map_err(|source| HilbertError::InvalidTemplate {
                name: name.to_string(),
                source,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_templates_parse() {
        let templates = Templates::builtin().unwrap();
        let lengths: Vec<usize> = TemplateKind::ALL
            .iter()
            .map(|&kind| templates.get(kind).len())
            .collect();
        assert_eq!(lengths, vec![5, 3, 3, 29, 25]);
    }

    #[test]
    fn test_templates_end_with_their_conclusion() {
        let templates = Templates::builtin().unwrap();
        let last = |kind| templates.get(kind).last().map(Node::to_string);
        assert_eq!(last(TemplateKind::SelfImplication).as_deref(), Some("H->H"));
        assert_eq!(last(TemplateKind::AxiomLifting).as_deref(), Some("H->A"));
        assert_eq!(last(TemplateKind::ModusPonens).as_deref(), Some("H->B"));
        assert_eq!(last(TemplateKind::ForAllRule).as_deref(), Some("H->A->@xB"));
        assert_eq!(last(TemplateKind::ExistsRule).as_deref(), Some("H->?xB->A"));
    }

    #[test]
    fn test_instantiate_fills_slots() {
        let templates = Templates::builtin().unwrap();
        let slots = Substitution::new()
            .with("H", parse_formula("P|Q").unwrap())
            .with("A", parse_formula("R").unwrap());
        let lines = templates.instantiate(TemplateKind::AxiomLifting, &slots);
        let texts: Vec<String> = lines.iter().map(Node::to_string).collect();
        assert_eq!(texts, vec!["R", "R->P|Q->R", "P|Q->R"]);
    }

    #[test]
    fn test_instantiate_renames_bound_variable() {
        let templates = Templates::builtin().unwrap();
        let slots = Substitution::new()
            .with("H", parse_formula("Q").unwrap())
            .with("A", parse_formula("R").unwrap())
            .with("B", parse_formula("P(y)").unwrap())
            .with("x", Node::variable("y"));
        let lines = templates.instantiate(TemplateKind::ForAllRule, &slots);
        assert_eq!(lines.last().map(Node::to_string).as_deref(), Some("Q->R->@yP(y)"));
    }

    #[test]
    fn test_invalid_template_reports_name() {
        let err = parse_template("broken.proof", "A->\n").unwrap_err();
        assert!(matches!(err, HilbertError::InvalidTemplate { ref name, .. } if name == "broken.proof"));
    }
}
