//! One-way matching of schemas against formulas

use crate::fol::{Kind, Node, Substitution};
use im::OrdMap;

/// Which leaves of a schema act as pattern variables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode<'a> {
    /// Every single-letter leaf: uppercase nullary predicates stand for
    /// formulas, lowercase variables for terms
    Schema,
    /// Only the free occurrences of the named variable
    Substitution(&'a str),
}

/// A substituted term whose free variable ends up under a quantifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    /// The pattern variable being replaced
    pub variable: String,
    pub term: Node,
    /// The quantified variable that would capture part of `term`
    pub binder: String,
}

/// State threaded through a match.
///
/// Maps are persistent, so handing a context to a recursive call never
/// disturbs the caller's copy.
#[derive(Debug, Clone, Default)]
pub struct MatchContext {
    bindings: OrdMap<String, Node>,
    /// Schema-side bound variable -> candidate-side bound variable, for the
    /// quantifiers enclosing the current position
    bound: OrdMap<String, String>,
    capture: Option<Capture>,
}

impl MatchContext {
    pub fn new() -> Self {
        MatchContext::default()
    }

    pub fn binding(&self, name: &str) -> Option<&Node> {
        self.bindings.get(name)
    }

    /// The pattern bindings as a substitution over the schema's leaves
    pub fn substitution(&self) -> Substitution {
        let mut subst = Substitution::new();
        for (name, node) in self.bindings.iter() {
            subst.insert(name, node.clone());
        }
        subst
    }

    /// First capture seen in substitution mode, if any
    pub fn capture(&self) -> Option<&Capture> {
        self.capture.as_ref()
    }
}

/// Match an axiom schema against a formula
pub fn match_schema(schema: &Node, candidate: &Node) -> Option<MatchContext> {
    match_node(schema, candidate, MatchMode::Schema, MatchContext::new())
}

/// Check whether `candidate` is `formula[variable := t]` for some term `t`.
///
/// A successful match may still carry a [`Capture`] when `t` is not free
/// for substitution; the caller decides how to report it.
pub fn match_substitution(formula: &Node, candidate: &Node, variable: &str) -> Option<MatchContext> {
    match_node(
        formula,
        candidate,
        MatchMode::Substitution(variable),
        MatchContext::new(),
    )
}

/// Match `schema` against `candidate`, extending `ctx`
pub fn match_node(
    schema: &Node,
    candidate: &Node,
    mode: MatchMode<'_>,
    mut ctx: MatchContext,
) -> Option<MatchContext> {
    if schema.is_zero() {
        return candidate.is_zero().then_some(ctx);
    }

    // Occurrences bound by an enclosing quantifier follow the candidate's binder
    if let Some(name) = schema.variable_name() {
        if let Some(local) = ctx.bound.get(name) {
            let same = candidate.variable_name() == Some(local.as_str());
            return same.then_some(ctx);
        }
    }

    if let Some(name) = pattern_variable(schema, mode) {
        return bind(name, candidate, mode, ctx);
    }

    // a' against b''' peels the common successors: a against b''
    if let (Kind::Successor(n), Kind::Successor(m)) = (schema.kind(), candidate.kind()) {
        if n < m {
            let rest = Node::successor(candidate.children()[0].clone(), m - n);
            return match_node(&schema.children()[0], &rest, mode, ctx);
        }
    }

    if schema.kind() != candidate.kind() || schema.children().len() != candidate.children().len() {
        return None;
    }

    if let (Some((_, schema_var, schema_body)), Some((_, cand_var, cand_body))) =
        (schema.as_quantified(), candidate.as_quantified())
    {
        ctx = match pattern_variable(&schema.children()[0], mode) {
            Some(name) if mode == MatchMode::Schema => {
                bind(name, &candidate.children()[0], mode, ctx)?
            }
            _ if schema_var == cand_var => ctx,
            _ => return None,
        };

        let shadowed = ctx.bound.get(schema_var).cloned();
        ctx.bound.insert(schema_var.to_string(), cand_var.to_string());
        let mut ctx = match_node(schema_body, cand_body, mode, ctx)?;
        match shadowed {
            Some(previous) => ctx.bound.insert(schema_var.to_string(), previous),
            None => ctx.bound.remove(schema_var),
        };
        return Some(ctx);
    }

    schema
        .children()
        .iter()
        .zip(candidate.children())
        .try_fold(ctx, |ctx, (s, c)| match_node(s, c, mode, ctx))
}

fn pattern_variable<'n>(node: &'n Node, mode: MatchMode<'_>) -> Option<&'n str> {
    match (mode, node.kind()) {
        (MatchMode::Schema, Kind::Apply(name)) if node.is_leaf() && is_single_letter(name) => {
            Some(name.as_str())
        }
        (MatchMode::Schema, Kind::Variable(name)) if is_single_letter(name) => Some(name.as_str()),
        (MatchMode::Substitution(variable), Kind::Variable(name)) if name == variable => {
            Some(name.as_str())
        }
        _ => None,
    }
}

fn is_single_letter(name: &str) -> bool {
    name.len() == 1 && name.chars().all(|c| c.is_ascii_alphabetic())
}

fn bind(name: &str, candidate: &Node, mode: MatchMode<'_>, mut ctx: MatchContext) -> Option<MatchContext> {
    match ctx.bindings.get(name) {
        Some(bound) if bound != candidate => return None,
        Some(_) => {}
        None => {
            ctx.bindings.insert(name.to_string(), candidate.clone());
        }
    }

    // every occurrence is checked, each sits under its own quantifiers
    if let MatchMode::Substitution(_) = mode {
        if ctx.capture.is_none() {
            let free = candidate.free_variables();
            if let Some(binder) = ctx.bound.values().find(|b| free.contains(b.as_str())) {
                ctx.capture = Some(Capture {
                    variable: name.to_string(),
                    term: candidate.clone(),
                    binder: binder.clone(),
                });
            }
        }
    }
    Some(ctx)
}
