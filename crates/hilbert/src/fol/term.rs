//! Formula and term trees
//!
//! Formulas and arithmetic terms share one node type. Every node carries its
//! canonical text, computed once when the node is built. The canonical text is
//! the only notion of identity: two nodes are equal iff their canonical strings
//! are equal, so bound variables are never renamed for comparison.

use serde::{Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Node tag
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Kind {
    Implication,
    Disjunction,
    Conjunction,
    Negation,
    /// Children: `[bound variable, body]`
    ForAll,
    /// Children: `[bound variable, body]`
    Exists,
    Equality,
    /// Predicate (uppercase name) or function (lowercase name) application.
    /// Nullary predicates have no children.
    Apply(String),
    Variable(String),
    Add,
    Multiply,
    /// The successor applied `n >= 1` times to the single child
    Successor(u32),
    Zero,
}

impl Kind {
    /// Number of children a node of this kind has; `None` for applications
    pub fn arity(&self) -> Option<usize> {
        match self {
            Kind::Implication
            | Kind::Disjunction
            | Kind::Conjunction
            | Kind::ForAll
            | Kind::Exists
            | Kind::Equality
            | Kind::Add
            | Kind::Multiply => Some(2),
            Kind::Negation | Kind::Successor(_) => Some(1),
            Kind::Variable(_) | Kind::Zero => Some(0),
            Kind::Apply(_) => None,
        }
    }
}

/// Quantifier of a quantified formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Quantifier {
    ForAll,
    Exists,
}

impl Quantifier {
    pub fn symbol(self) -> char {
        match self {
            Quantifier::ForAll => '@',
            Quantifier::Exists => '?',
        }
    }
}

struct NodeData {
    kind: Kind,
    children: Vec<Node>,
    canonical: String,
}

/// An immutable formula or term
#[derive(Clone)]
pub struct Node(Arc<NodeData>);

impl Node {
    /// Build a node from its tag and children.
    ///
    /// Successor chains are flattened, so `(a')'` and `a''` build the same node,
    /// and a zero-count successor is just its base. Callers pass exactly
    /// [`Kind::arity`] children.
    pub(crate) fn build(kind: Kind, children: Vec<Node>) -> Node {
        if let Kind::Successor(count) = kind {
            let base = children
                .into_iter()
                .next()
                .unwrap_or_else(Node::zero);
            return Node::successor(base, count);
        }
        debug_assert!(
            kind.arity().map_or(true, |arity| arity == children.len()),
            "{:?} built with {} children",
            kind,
            children.len()
        );
        let canonical = render(&kind, &children);
        Node(Arc::new(NodeData {
            kind,
            children,
            canonical,
        }))
    }

    pub fn implication(antecedent: Node, consequent: Node) -> Node {
        Node::build(Kind::Implication, vec![antecedent, consequent])
    }

    pub fn disjunction(left: Node, right: Node) -> Node {
        Node::build(Kind::Disjunction, vec![left, right])
    }

    pub fn conjunction(left: Node, right: Node) -> Node {
        Node::build(Kind::Conjunction, vec![left, right])
    }

    pub fn negation(operand: Node) -> Node {
        Node::build(Kind::Negation, vec![operand])
    }

    pub fn quantified(quantifier: Quantifier, variable: &str, body: Node) -> Node {
        let kind = match quantifier {
            Quantifier::ForAll => Kind::ForAll,
            Quantifier::Exists => Kind::Exists,
        };
        Node::build(kind, vec![Node::variable(variable), body])
    }

    pub fn forall(variable: &str, body: Node) -> Node {
        Node::quantified(Quantifier::ForAll, variable, body)
    }

    pub fn exists(variable: &str, body: Node) -> Node {
        Node::quantified(Quantifier::Exists, variable, body)
    }

    pub fn equality(left: Node, right: Node) -> Node {
        Node::build(Kind::Equality, vec![left, right])
    }

    pub fn apply(name: &str, args: Vec<Node>) -> Node {
        Node::build(Kind::Apply(name.to_string()), args)
    }

    pub fn variable(name: &str) -> Node {
        Node::build(Kind::Variable(name.to_string()), vec![])
    }

    pub fn add(left: Node, right: Node) -> Node {
        Node::build(Kind::Add, vec![left, right])
    }

    pub fn multiply(left: Node, right: Node) -> Node {
        Node::build(Kind::Multiply, vec![left, right])
    }

    pub fn successor(base: Node, count: u32) -> Node {
        if count == 0 {
            return base;
        }
        let (base, count) = match base.kind() {
            Kind::Successor(inner) => (base.children()[0].clone(), inner + count),
            _ => (base, count),
        };
        let kind = Kind::Successor(count);
        let children = vec![base];
        let canonical = render(&kind, &children);
        Node(Arc::new(NodeData {
            kind,
            children,
            canonical,
        }))
    }

    pub fn zero() -> Node {
        Node::build(Kind::Zero, vec![])
    }

    pub fn kind(&self) -> &Kind {
        &self.0.kind
    }

    pub fn children(&self) -> &[Node] {
        &self.0.children
    }

    /// The canonical text of this node
    pub fn canonical(&self) -> &str {
        &self.0.canonical
    }

    /// Rebuild a node with the same tag over new children
    pub(crate) fn with_children(&self, children: Vec<Node>) -> Node {
        Node::build(self.kind().clone(), children)
    }

    pub fn is_zero(&self) -> bool {
        matches!(self.kind(), Kind::Zero)
    }

    pub fn is_leaf(&self) -> bool {
        self.children().is_empty()
    }

    /// `(antecedent, consequent)` of an implication
    pub fn as_implication(&self) -> Option<(&Node, &Node)> {
        match self.kind() {
            Kind::Implication => Some((&self.children()[0], &self.children()[1])),
            _ => None,
        }
    }

    pub fn as_conjunction(&self) -> Option<(&Node, &Node)> {
        match self.kind() {
            Kind::Conjunction => Some((&self.children()[0], &self.children()[1])),
            _ => None,
        }
    }

    /// `(quantifier, bound variable, body)` of a quantified formula
    pub fn as_quantified(&self) -> Option<(Quantifier, &str, &Node)> {
        let quantifier = match self.kind() {
            Kind::ForAll => Quantifier::ForAll,
            Kind::Exists => Quantifier::Exists,
            _ => return None,
        };
        let variable = self.children()[0].variable_name()?;
        Some((quantifier, variable, &self.children()[1]))
    }

    pub fn variable_name(&self) -> Option<&str> {
        match self.kind() {
            Kind::Variable(name) => Some(name),
            _ => None,
        }
    }

    /// Binding strength used when printing; higher binds tighter.
    fn precedence(&self) -> u8 {
        match self.kind() {
            Kind::Implication | Kind::Add => 0,
            Kind::Disjunction | Kind::Multiply => 1,
            Kind::Conjunction | Kind::Successor(_) => 2,
            _ => 3,
        }
    }
}

/// Child text, parenthesized when it binds looser than `min`
fn wrap(node: &Node, min: u8) -> String {
    if node.precedence() >= min {
        node.canonical().to_string()
    } else {
        format!("({})", node.canonical())
    }
}

fn render(kind: &Kind, children: &[Node]) -> String {
    match kind {
        Kind::Implication => format!("{}->{}", wrap(&children[0], 1), wrap(&children[1], 0)),
        Kind::Disjunction => format!("{}|{}", wrap(&children[0], 1), wrap(&children[1], 2)),
        Kind::Conjunction => format!("{}&{}", wrap(&children[0], 2), wrap(&children[1], 3)),
        Kind::Negation => format!("!{}", wrap(&children[0], 3)),
        Kind::ForAll | Kind::Exists => {
            let symbol = match kind {
                Kind::ForAll => Quantifier::ForAll.symbol(),
                _ => Quantifier::Exists.symbol(),
            };
            let body = wrap(&children[1], 3);
            // a leading digit would be read as part of the variable name
            if body.starts_with(|c: char| c.is_ascii_digit()) {
                format!("{}{}({})", symbol, children[0].canonical(), body)
            } else {
                format!("{}{}{}", symbol, children[0].canonical(), body)
            }
        }
        Kind::Equality => format!("{}={}", children[0].canonical(), children[1].canonical()),
        Kind::Apply(name) if children.is_empty() => name.clone(),
        Kind::Apply(name) => {
            let args: Vec<&str> = children.iter().map(Node::canonical).collect();
            format!("{}({})", name, args.join(","))
        }
        Kind::Variable(name) => name.clone(),
        Kind::Add => format!("{}+{}", wrap(&children[0], 0), wrap(&children[1], 1)),
        Kind::Multiply => format!("{}*{}", wrap(&children[0], 1), wrap(&children[1], 2)),
        Kind::Successor(count) => {
            format!("{}{}", wrap(&children[0], 3), "'".repeat(*count as usize))
        }
        Kind::Zero => "0".to_string(),
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.canonical() == other.canonical()
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical())
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.canonical())
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.canonical())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(name: &str) -> Node {
        Node::apply(name, vec![])
    }

    #[test]
    fn test_implication_is_right_associative() {
        let right = Node::implication(p("A"), Node::implication(p("B"), p("A")));
        let left = Node::implication(Node::implication(p("A"), p("B")), p("A"));
        assert_eq!(right.canonical(), "A->B->A");
        assert_eq!(left.canonical(), "(A->B)->A");
    }

    #[test]
    fn test_connective_precedence() {
        let f = Node::disjunction(
            Node::conjunction(p("A"), p("B")),
            Node::conjunction(p("C"), Node::disjunction(p("D"), p("E"))),
        );
        assert_eq!(f.canonical(), "A&B|C&(D|E)");
        assert_eq!(Node::negation(f.clone()).canonical(), "!(A&B|C&(D|E))");
    }

    #[test]
    fn test_successor_chains_are_flattened() {
        let a = Node::variable("a");
        let nested = Node::successor(Node::successor(a.clone(), 1), 2);
        assert_eq!(nested, Node::successor(a, 3));
        assert_eq!(nested.canonical(), "a'''");
        assert_eq!(*nested.kind(), Kind::Successor(3));
    }

    #[test]
    fn test_arithmetic_rendering() {
        let a = Node::variable("a");
        let b = Node::variable("b");
        let sum = Node::add(a.clone(), b.clone());
        assert_eq!(Node::successor(sum.clone(), 1).canonical(), "(a+b)'");
        assert_eq!(Node::multiply(sum.clone(), b.clone()).canonical(), "(a+b)*b");
        assert_eq!(Node::add(a.clone(), Node::multiply(a, b)).canonical(), "a+a*b");
        assert_eq!(Node::equality(sum, Node::zero()).canonical(), "a+b=0");
    }

    #[test]
    fn test_quantifier_body_starting_with_digit() {
        let body = Node::equality(Node::zero(), Node::variable("x"));
        assert_eq!(Node::forall("x", body).canonical(), "@x(0=x)");
        let guarded = Node::forall("x", p("A"));
        assert_eq!(guarded.canonical(), "@xA");
        assert_eq!(guarded.as_quantified().map(|(q, v, _)| (q, v)), Some((Quantifier::ForAll, "x")));
    }

    #[test]
    fn test_equality_is_textual() {
        let f1 = Node::forall("x", Node::apply("P", vec![Node::variable("x")]));
        let f2 = Node::forall("y", Node::apply("P", vec![Node::variable("y")]));
        assert_ne!(f1, f2);
        assert_eq!(f1, Node::forall("x", Node::apply("P", vec![Node::variable("x")])));
    }

    #[test]
    fn test_kind_arity() {
        assert_eq!(Kind::Implication.arity(), Some(2));
        assert_eq!(Kind::ForAll.arity(), Some(2));
        assert_eq!(Kind::Negation.arity(), Some(1));
        assert_eq!(Kind::Successor(2).arity(), Some(1));
        assert_eq!(Kind::Zero.arity(), Some(0));
        assert_eq!(Kind::Apply("P".to_string()).arity(), None);
        assert_eq!(Node::exists("y", p("A")).canonical(), "?yA");
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "Implication built with 0 children")]
    fn test_build_rejects_wrong_arity() {
        Node::build(Kind::Implication, vec![]);
    }
}
