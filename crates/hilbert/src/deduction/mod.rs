//! Deduction theorem: discharging the last hypothesis of a proof
//!
//! Every line `E` of a proof of `Γ, H |- goal` is replaced by a derivation of
//! `H->E` from `Γ` alone, chosen by the rule that justified `E`. The result is
//! a proof of `Γ |- H->goal`.

mod templates;

pub use templates::{TemplateKind, Templates};

use crate::axioms::AxiomSet;
use crate::error::{HilbertError, Result};
use crate::fol::{Node, Substitution};
use crate::parser::{parse_formula, ProofFile};
use crate::verifier::{Justification, ProofSession, VerificationFailure};

/// A proof with its last hypothesis discharged
#[derive(Debug, Clone)]
pub struct Elaboration {
    /// Remaining hypotheses
    pub hypotheses: Vec<Node>,
    pub discharged: Node,
    pub goal: Node,
    pub lines: Vec<Node>,
}

impl Elaboration {
    /// The conclusion `H->goal`
    pub fn conclusion(&self) -> Node {
        Node::implication(self.discharged.clone(), self.goal.clone())
    }

    /// `Γ|-H->goal`
    pub fn header(&self) -> String {
        let hypotheses: Vec<&str> = self.hypotheses.iter().map(Node::canonical).collect();
        format!("{}|-{}", hypotheses.join(","), self.conclusion())
    }

    /// True if the last emitted line is the conclusion
    pub fn concludes_goal(&self) -> bool {
        self.lines.last() == Some(&self.conclusion())
    }
}

/// Rewrites proofs under a hypothesis into hypothesis-free ones
pub struct Elaborator<'a> {
    axioms: &'a AxiomSet,
    templates: &'a Templates,
}

impl<'a> Elaborator<'a> {
    pub fn new(axioms: &'a AxiomSet, templates: &'a Templates) -> Self {
        Elaborator { axioms, templates }
    }

    /// Discharge the last hypothesis of `proof`.
    ///
    /// The first line that does not verify aborts the run with
    /// [`HilbertError::IncorrectProof`].
    pub fn elaborate(&self, proof: &ProofFile) -> Result<Elaboration> {
        let mut hypotheses = proof
            .hypotheses
            .iter()
            .map(|text| parse_formula(text))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let goal = parse_formula(&proof.goal)?;

        let mut session = ProofSession::new(self.axioms, hypotheses.clone());
        let discharged = session
            .track_last_hypothesis()
            .cloned()
            .ok_or(HilbertError::NoHypothesis)?;

        let mut lines = Vec::new();
        for (i, text) in proof.lines.iter().enumerate() {
            let incorrect = |failure: VerificationFailure| HilbertError::IncorrectProof {
                line: i + 1,
                failure,
            };
            let formula =
                parse_formula(text).map_err(|e| incorrect(VerificationFailure::Parse(e)))?;
            let justification = session.check_formula(formula.clone()).map_err(incorrect)?;
            let step = self
                .discharge(&session, &discharged, &formula, justification)
                .ok_or_else(|| incorrect(VerificationFailure::Unproved))?;
            log::debug!(
                "line {}: {} expands to {} lines",
                i + 1,
                formula,
                step.len()
            );
            lines.extend(step);
        }

        hypotheses.pop();
        Ok(Elaboration {
            hypotheses,
            discharged,
            goal,
            lines,
        })
    }

    /// Derivation of `hypothesis->formula`, given how `formula` was justified
    fn discharge(
        &self,
        session: &ProofSession<'_>,
        hypothesis: &Node,
        formula: &Node,
        justification: Justification,
    ) -> Option<Vec<Node>> {
        let slots = Substitution::new().with("H", hypothesis.clone());
        if formula == hypothesis {
            return Some(
                self.templates
                    .instantiate(TemplateKind::SelfImplication, &slots),
            );
        }

        let (kind, slots) = match justification {
            Justification::Axiom { .. }
            | Justification::Arithmetic { .. }
            | Justification::Hypothesis { .. } => {
                (TemplateKind::AxiomLifting, slots.with("A", formula.clone()))
            }
            Justification::ModusPonens { antecedent, .. } => {
                let antecedent = session.formula_at(antecedent)?;
                let slots = slots
                    .with("A", antecedent.clone())
                    .with("B", formula.clone());
                (TemplateKind::ModusPonens, slots)
            }
            Justification::ForAllRule { .. } => {
                let (left, quantified) = formula.as_implication()?;
                let (_, variable, body) = quantified.as_quantified()?;
                (
                    TemplateKind::ForAllRule,
                    quantifier_slots(slots, left, body, variable),
                )
            }
            Justification::ExistsRule { .. } => {
                let (quantified, right) = formula.as_implication()?;
                let (_, variable, body) = quantified.as_quantified()?;
                (
                    TemplateKind::ExistsRule,
                    quantifier_slots(slots, right, body, variable),
                )
            }
        };
        Some(self.templates.instantiate(kind, &slots))
    }
}

/// `A` is the unquantified side, `B` the body of the quantifier
fn quantifier_slots(slots: Substitution, side: &Node, body: &Node, variable: &str) -> Substitution {
    slots
        .with("A", side.clone())
        .with("B", body.clone())
        .with("x", Node::variable(variable))
}
