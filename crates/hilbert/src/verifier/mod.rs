//! Line-by-line proof checking
//!
//! A [`ProofSession`] makes one forward pass over a proof. Each line is
//! justified only from lines before it; a verified line enters the session's
//! indices after its own justification is settled, and a failed line never
//! does.
//!
//! Rules are tried in a fixed order:
//!
//! 1. quantifier inference rules,
//! 2. quantifier axiom schemas 11 and 12,
//! 3. the induction schema A9,
//! 4. modus ponens,
//! 5. propositional schemas 1-10,
//! 6. arithmetic schemas A1-A8,
//! 7. the declared hypotheses.
//!
//! When a rule fits the shape of a line but its side condition fails, the
//! failure is kept and the remaining rules are still tried. It is reported
//! only if nothing else justifies the line.

mod justification;

pub use justification::{
    Justification, VerificationFailure, EXISTS_AXIOM, FORALL_AXIOM, INDUCTION_AXIOM,
};

use crate::axioms::AxiomSet;
use crate::fol::{Node, Quantifier};
use crate::parser::parse_formula;
use crate::unification::match_substitution;
use std::collections::HashMap;

/// A verified proof line
#[derive(Debug, Clone)]
pub struct LoggedLine {
    /// 0-based position in the input
    pub line: usize,
    pub formula: Node,
    pub justification: Justification,
}

/// Outcome of a single rule: `None` when the rule does not apply at all
type RuleResult = Option<Result<Justification, VerificationFailure>>;

/// State of one verification run
pub struct ProofSession<'a> {
    axioms: &'a AxiomSet,
    hypotheses: Vec<Node>,
    /// Canonical text -> first hypothesis with that text
    hypothesis_index: HashMap<String, usize>,
    /// Assumption being discharged; quantifier rules may not generalize over
    /// its free variables
    tracked: Option<usize>,
    log: Vec<LoggedLine>,
    /// Canonical text -> first verified line asserting it
    line_index: HashMap<String, usize>,
    /// Consequent -> (antecedent, implication line) for every verified implication
    modus_ponens: HashMap<String, Vec<(String, usize)>>,
    next_line: usize,
}

impl<'a> ProofSession<'a> {
    pub fn new(axioms: &'a AxiomSet, hypotheses: Vec<Node>) -> Self {
        let mut hypothesis_index = HashMap::new();
        for (i, hypothesis) in hypotheses.iter().enumerate() {
            hypothesis_index
                .entry(hypothesis.canonical().to_string())
                .or_insert(i);
        }
        ProofSession {
            axioms,
            hypotheses,
            hypothesis_index,
            tracked: None,
            log: Vec::new(),
            line_index: HashMap::new(),
            modus_ponens: HashMap::new(),
            next_line: 0,
        }
    }

    /// Treat the last hypothesis as the one being discharged
    pub fn track_last_hypothesis(&mut self) -> Option<&Node> {
        self.tracked = self.hypotheses.len().checked_sub(1);
        self.tracked_hypothesis()
    }

    pub fn tracked_hypothesis(&self) -> Option<&Node> {
        self.tracked.and_then(|i| self.hypotheses.get(i))
    }

    /// Verified lines in input order
    pub fn log(&self) -> &[LoggedLine] {
        &self.log
    }

    /// Number of lines checked so far, verified or not
    pub fn lines_checked(&self) -> usize {
        self.next_line
    }

    /// Formula of a verified line
    pub fn formula_at(&self, line: usize) -> Option<&Node> {
        self.log
            .binary_search_by_key(&line, |entry| entry.line)
            .ok()
            .map(|i| &self.log[i].formula)
    }

    pub fn last_verified(&self) -> Option<&LoggedLine> {
        self.log.last()
    }

    /// Parse and check the next proof line
    pub fn check_line(&mut self, text: &str) -> Result<Justification, VerificationFailure> {
        match parse_formula(text) {
            Ok(formula) => self.check_formula(formula),
            Err(e) => {
                log::debug!("line {}: {}", self.next_line + 1, e);
                self.next_line += 1;
                Err(VerificationFailure::Parse(e))
            }
        }
    }

    /// Check the next proof line, recording it if it is justified
    pub fn check_formula(&mut self, formula: Node) -> Result<Justification, VerificationFailure> {
        let line = self.next_line;
        self.next_line += 1;

        let result = self.justify(&formula);
        match &result {
            Ok(justification) => {
                log::debug!("line {}: {} ({})", line + 1, formula, justification);
                self.commit(line, formula, *justification);
            }
            Err(failure) => log::debug!("line {}: {} rejected: {}", line + 1, formula, failure),
        }
        result
    }

    fn commit(&mut self, line: usize, formula: Node, justification: Justification) {
        let first = !self.line_index.contains_key(formula.canonical());
        if first {
            self.line_index.insert(formula.canonical().to_string(), line);
            if let Some((antecedent, consequent)) = formula.as_implication() {
                self.modus_ponens
                    .entry(consequent.canonical().to_string())
                    .or_default()
                    .push((antecedent.canonical().to_string(), line));
            }
        }
        self.log.push(LoggedLine {
            line,
            formula,
            justification,
        });
    }

    fn justify(&self, formula: &Node) -> Result<Justification, VerificationFailure> {
        let mut near_miss = None;

        if let Some((left, right)) = formula.as_implication() {
            let rules = [
                self.quantifier_rule(left, right),
                self.quantifier_axiom(left, right),
                self.induction(left, right),
            ];
            for result in rules.into_iter().flatten() {
                match result {
                    Ok(justification) => return Ok(justification),
                    Err(failure) => {
                        near_miss.get_or_insert(failure);
                    }
                }
            }
        }

        if let Some(justification) = self.modus_ponens(formula) {
            return Ok(justification);
        }
        if let Some(schema) = self.axioms.match_logic(formula) {
            return Ok(Justification::Axiom { schema });
        }
        if let Some(schema) = self.axioms.match_arithmetic(formula) {
            return Ok(Justification::Arithmetic { schema });
        }
        if let Some(&index) = self.hypothesis_index.get(formula.canonical()) {
            return Ok(Justification::Hypothesis { index });
        }

        Err(near_miss.unwrap_or(VerificationFailure::Unproved))
    }

    /// `?xB->A` from `B->A` and `A->@xB` from `A->B`, `x` not free in `A`
    fn quantifier_rule(&self, left: &Node, right: &Node) -> RuleResult {
        let mut candidates = Vec::new();
        if let Some((Quantifier::Exists, variable, body)) = left.as_quantified() {
            let premise = Node::implication(body.clone(), right.clone());
            if let Some((premise, from_hypothesis)) = self.premise(&premise) {
                let justification = Justification::ExistsRule {
                    premise,
                    from_hypothesis,
                };
                candidates.push(self.generalize(variable, right, premise, justification));
            }
        }
        if let Some((Quantifier::ForAll, variable, body)) = right.as_quantified() {
            let premise = Node::implication(left.clone(), body.clone());
            if let Some((premise, from_hypothesis)) = self.premise(&premise) {
                let justification = Justification::ForAllRule {
                    premise,
                    from_hypothesis,
                };
                candidates.push(self.generalize(variable, left, premise, justification));
            }
        }
        first_success(candidates)
    }

    /// A verified line asserting `premise`, else a hypothesis. While a
    /// hypothesis is being discharged only lines count, since the rewritten
    /// proof needs the premise as an emitted line.
    fn premise(&self, premise: &Node) -> Option<(usize, bool)> {
        if let Some(&line) = self.line_index.get(premise.canonical()) {
            return Some((line, false));
        }
        if self.tracked.is_some() {
            return None;
        }
        let &index = self.hypothesis_index.get(premise.canonical())?;
        Some((index, true))
    }

    fn generalize(
        &self,
        variable: &str,
        side: &Node,
        premise: usize,
        justification: Justification,
    ) -> Result<Justification, VerificationFailure> {
        if side.has_free(variable) {
            return Err(VerificationFailure::VariableFree {
                variable: variable.to_string(),
                line: premise + 1,
            });
        }
        if let Some(index) = self.tracked {
            if self.hypotheses[index].has_free(variable) {
                return Err(VerificationFailure::HypothesisVariable {
                    variable: variable.to_string(),
                    hypothesis: index + 1,
                });
            }
        }
        Ok(justification)
    }

    /// `@xA->A[x:=t]` (11) and `A[x:=t]->?xA` (12), `t` free for `x` in `A`
    fn quantifier_axiom(&self, left: &Node, right: &Node) -> RuleResult {
        let mut candidates = Vec::new();
        if let Some((Quantifier::ForAll, variable, body)) = left.as_quantified() {
            if let Some(result) = instantiation(body, right, variable, FORALL_AXIOM) {
                candidates.push(result);
            }
        }
        if let Some((Quantifier::Exists, variable, body)) = right.as_quantified() {
            if let Some(result) = instantiation(body, left, variable, EXISTS_AXIOM) {
                candidates.push(result);
            }
        }
        first_success(candidates)
    }

    /// `φ[x:=0] & @x(φ->φ[x:=x']) -> φ` with `x` free in `φ`
    fn induction(&self, left: &Node, right: &Node) -> RuleResult {
        let (base, step) = left.as_conjunction()?;
        let Some((Quantifier::ForAll, variable, body)) = step.as_quantified() else {
            return None;
        };
        let (hypothesis, conclusion) = body.as_implication()?;
        if hypothesis != right {
            return None;
        }

        let zero = right.substitute(variable, &Node::zero());
        let next = right.substitute(variable, &Node::successor(Node::variable(variable), 1));
        if right.has_free(variable) && *base == zero && *conclusion == next {
            Some(Ok(Justification::Arithmetic {
                schema: INDUCTION_AXIOM,
            }))
        } else {
            Some(Err(VerificationFailure::InductionMismatch {
                variable: variable.to_string(),
            }))
        }
    }

    /// Earlier `A` and `A->E`: lowest antecedent line, then lowest implication line
    fn modus_ponens(&self, formula: &Node) -> Option<Justification> {
        self.modus_ponens
            .get(formula.canonical())?
            .iter()
            .filter_map(|(antecedent, implication)| {
                let antecedent = *self.line_index.get(antecedent)?;
                Some((antecedent, *implication))
            })
            .min()
            .map(|(antecedent, implication)| Justification::ModusPonens {
                antecedent,
                implication,
            })
    }
}

/// Match `instance` against `body[variable:=t]` for a quantifier schema
fn instantiation(
    body: &Node,
    instance: &Node,
    variable: &str,
    schema: usize,
) -> RuleResult {
    let ctx = match_substitution(body, instance, variable)?;
    match ctx.capture() {
        Some(capture) => Some(Err(VerificationFailure::NotFreeForSubstitution {
            term: capture.term.to_string(),
            formula: body.to_string(),
            variable: variable.to_string(),
        })),
        None => Some(Ok(Justification::Axiom { schema })),
    }
}

/// The first successful candidate, else the first failure
fn first_success(candidates: Vec<Result<Justification, VerificationFailure>>) -> RuleResult {
    let mut failure = None;
    for candidate in candidates {
        match candidate {
            Ok(justification) => return Some(Ok(justification)),
            Err(e) => {
                failure.get_or_insert(e);
            }
        }
    }
    failure.map(Err)
}
