//! Free variables, substitution and capture

use super::term::{Kind, Node};
use std::collections::{BTreeMap, BTreeSet};

/// A mapping from leaf names to nodes.
///
/// Applied to a tree it replaces every leaf whose name is mapped: nullary
/// predicates, variables, and the bound variable of a quantifier when the
/// replacement is itself a variable. This is how schema bindings are read back
/// and how proof skeletons are filled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution {
    pub map: BTreeMap<String, Node>,
}

impl Substitution {
    /// Create a new empty substitution
    pub fn new() -> Self {
        Substitution {
            map: BTreeMap::new(),
        }
    }

    /// Add a name -> node mapping
    pub fn insert(&mut self, name: &str, node: Node) {
        self.map.insert(name.to_string(), node);
    }

    /// Builder form of [`Substitution::insert`]
    pub fn with(mut self, name: &str, node: Node) -> Self {
        self.insert(name, node);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Node> {
        self.map.get(name)
    }
}

impl Node {
    /// Names of the variables with a free occurrence in this node
    pub fn free_variables(&self) -> BTreeSet<String> {
        let mut vars = BTreeSet::new();
        self.collect_free_variables(&mut Vec::new(), &mut vars);
        vars
    }

    fn collect_free_variables<'a>(&'a self, bound: &mut Vec<&'a str>, vars: &mut BTreeSet<String>) {
        match self.kind() {
            Kind::Variable(name) => {
                if !bound.contains(&name.as_str()) {
                    vars.insert(name.clone());
                }
            }
            Kind::ForAll | Kind::Exists => {
                if let Some((_, variable, body)) = self.as_quantified() {
                    bound.push(variable);
                    body.collect_free_variables(bound, vars);
                    bound.pop();
                }
            }
            _ => {
                for child in self.children() {
                    child.collect_free_variables(bound, vars);
                }
            }
        }
    }

    /// True if `variable` has a free occurrence in this node
    pub fn has_free(&self, variable: &str) -> bool {
        match self.kind() {
            Kind::Variable(name) => name == variable,
            Kind::ForAll | Kind::Exists => match self.as_quantified() {
                Some((_, bound, body)) => bound != variable && body.has_free(variable),
                None => false,
            },
            _ => self.children().iter().any(|child| child.has_free(variable)),
        }
    }

    /// Replace the free occurrences of `variable` with `term`.
    ///
    /// No capture check is made here; see [`Node::is_free_for`].
    pub fn substitute(&self, variable: &str, term: &Node) -> Node {
        match self.kind() {
            Kind::Variable(name) if name == variable => term.clone(),
            Kind::ForAll | Kind::Exists => match self.as_quantified() {
                Some((_, bound, _)) if bound == variable => self.clone(),
                Some((_, _, body)) => {
                    let binder = self.children()[0].clone();
                    self.with_children(vec![binder, body.substitute(variable, term)])
                }
                None => self.clone(),
            },
            _ if self.is_leaf() => self.clone(),
            _ => self.with_children(
                self.children()
                    .iter()
                    .map(|child| child.substitute(variable, term))
                    .collect(),
            ),
        }
    }

    /// True if `term` is free for substitution in place of `variable`: no
    /// free occurrence of `variable` lies under a quantifier binding one of
    /// the free variables of `term`.
    pub fn is_free_for(&self, variable: &str, term: &Node) -> bool {
        let term_vars = term.free_variables();
        self.free_for_under(variable, &term_vars, &mut Vec::new())
    }

    fn free_for_under<'a>(
        &'a self,
        variable: &str,
        term_vars: &BTreeSet<String>,
        bound: &mut Vec<&'a str>,
    ) -> bool {
        match self.kind() {
            Kind::Variable(name) if name == variable => {
                !bound.iter().any(|b| term_vars.contains(*b))
            }
            Kind::ForAll | Kind::Exists => match self.as_quantified() {
                Some((_, binder, _)) if binder == variable => true,
                Some((_, binder, body)) => {
                    bound.push(binder);
                    let ok = body.free_for_under(variable, term_vars, bound);
                    bound.pop();
                    ok
                }
                None => true,
            },
            _ => self
                .children()
                .iter()
                .all(|child| child.free_for_under(variable, term_vars, bound)),
        }
    }

    /// Apply a substitution to the leaves of this node
    pub fn apply_substitution(&self, subst: &Substitution) -> Node {
        match self.kind() {
            Kind::Variable(name) | Kind::Apply(name) if self.is_leaf() => {
                subst.get(name).cloned().unwrap_or_else(|| self.clone())
            }
            _ if self.is_leaf() => self.clone(),
            Kind::ForAll | Kind::Exists => {
                let binder = &self.children()[0];
                let binder = match binder.variable_name().and_then(|name| subst.get(name)) {
                    Some(replacement) if replacement.variable_name().is_some() => {
                        replacement.clone()
                    }
                    _ => binder.clone(),
                };
                let body = self.children()[1].apply_substitution(subst);
                self.with_children(vec![binder, body])
            }
            _ => self.with_children(
                self.children()
                    .iter()
                    .map(|child| child.apply_substitution(subst))
                    .collect(),
            ),
        }
    }
}
