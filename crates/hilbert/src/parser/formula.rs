//! Formula parser implementation using nom
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! Implication ::= Disjunction ['->' Implication]
//! Disjunction ::= Disjunction '|' Conjunction | Conjunction
//! Conjunction ::= Conjunction '&' Unary | Unary
//!       Unary ::= '!' Unary | ('@'|'?') Variable Unary | '(' Implication ')' | Predicate
//!   Predicate ::= [A-Z][0-9]* ['(' Term {',' Term} ')'] | Term '=' Term
//!        Term ::= Term '+' Product | Product
//!     Product ::= Product '*' Successor | Successor
//!   Successor ::= Atom {'\''}
//!        Atom ::= [a-z][0-9]* ['(' Term {',' Term} ')'] | '(' Term ')' | '0'
//! ```
//!
//! Whitespace is stripped before parsing.

use crate::error::ParseError;
use crate::fol::{Node, Quantifier};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit0, satisfy},
    combinator::{cut, map, opt, recognize, value},
    error::{context, ErrorKind, ParseError as _, VerboseError, VerboseErrorKind},
    multi::{fold_many0, many0_count, separated_list1},
    sequence::{delimited, pair, preceded},
    IResult,
};

type PResult<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

/// Parse a formula
pub fn parse_formula(input: &str) -> Result<Node, ParseError> {
    parse_complete(input, implication)
}

/// Parse an arithmetic term
pub fn parse_term(input: &str) -> Result<Node, ParseError> {
    parse_complete(input, term)
}

fn parse_complete(
    input: &str,
    parser: fn(&str) -> PResult<'_, Node>,
) -> Result<Node, ParseError> {
    let text: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    match parser(&text) {
        Ok(("", node)) => Ok(node),
        Ok((rest, _)) => Err(ParseError {
            expected: "end of formula".to_string(),
            position: text.len() - rest.len(),
            input: text.clone(),
        }),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(convert_error(&text, e)),
        Err(nom::Err::Incomplete(_)) => Err(ParseError {
            expected: "more input".to_string(),
            position: text.len(),
            input: text.clone(),
        }),
    }
}

/// Report the innermost failure position with the closest named construct
fn convert_error(text: &str, error: VerboseError<&str>) -> ParseError {
    let position = error
        .errors
        .first()
        .map(|(rest, _)| text.len() - rest.len())
        .unwrap_or(0);
    let expected = error
        .errors
        .iter()
        .find_map(|(_, kind)| match kind {
            VerboseErrorKind::Context(name) => Some(name.to_string()),
            _ => None,
        })
        .or_else(|| {
            error.errors.first().map(|(_, kind)| match kind {
                VerboseErrorKind::Char(c) => format!("'{}'", c),
                VerboseErrorKind::Nom(kind) => kind.description().to_lowercase(),
                VerboseErrorKind::Context(name) => name.to_string(),
            })
        })
        .unwrap_or_else(|| "formula".to_string());
    ParseError {
        expected,
        position,
        input: text.to_string(),
    }
}

/// Right-associative implication
fn implication(input: &str) -> PResult<'_, Node> {
    let (input, antecedent) = disjunction(input)?;
    let (input, consequent) =
        opt(preceded(tag("->"), cut(context("formula after '->'", implication))))(input)?;
    let node = match consequent {
        Some(consequent) => Node::implication(antecedent, consequent),
        None => antecedent,
    };
    Ok((input, node))
}

fn disjunction(input: &str) -> PResult<'_, Node> {
    let (input, first) = conjunction(input)?;
    fold_many0(
        preceded(char('|'), cut(context("formula after '|'", conjunction))),
        move || first.clone(),
        Node::disjunction,
    )(input)
}

fn conjunction(input: &str) -> PResult<'_, Node> {
    let (input, first) = unary(input)?;
    fold_many0(
        preceded(char('&'), cut(context("formula after '&'", unary))),
        move || first.clone(),
        Node::conjunction,
    )(input)
}

fn unary(input: &str) -> PResult<'_, Node> {
    context(
        "formula",
        alt((negation, quantified, parenthesized, predicate)),
    )(input)
}

fn negation(input: &str) -> PResult<'_, Node> {
    map(preceded(char('!'), cut(unary)), Node::negation)(input)
}

/// `@x A` / `?x A`: one variable, then a unary formula
fn quantified(input: &str) -> PResult<'_, Node> {
    let (input, quantifier) = alt((
        value(Quantifier::ForAll, char('@')),
        value(Quantifier::Exists, char('?')),
    ))(input)?;
    let (input, (variable, body)) =
        cut(pair(context("quantified variable", variable_name), unary))(input)?;
    Ok((input, Node::quantified(quantifier, variable, body)))
}

/// A parenthesized formula, unless the group continues as a term
fn parenthesized(input: &str) -> PResult<'_, Node> {
    if group_continues_as_term(input) {
        return Err(nom::Err::Error(VerboseError::from_error_kind(
            input,
            ErrorKind::Char,
        )));
    }
    delimited(
        char('('),
        cut(implication),
        cut(context("closing parenthesis", char(')'))),
    )(input)
}

/// Look past the group opened at the start of `input`: if the matching close
/// parenthesis is followed by an arithmetic symbol, the group is a term.
fn group_continues_as_term(input: &str) -> bool {
    if !input.starts_with('(') {
        return false;
    }
    let mut depth = 0usize;
    for (i, c) in input.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    let next = input[i + 1..].chars().next();
                    return matches!(next, Some('=' | '+' | '*' | '\'' | '’'));
                }
            }
            _ => {}
        }
    }
    false
}

fn predicate(input: &str) -> PResult<'_, Node> {
    alt((application, equality))(input)
}

/// `P`, `P1(t, ...)`
fn application(input: &str) -> PResult<'_, Node> {
    let (input, name) = recognize(pair(satisfy(|c| c.is_ascii_uppercase()), digit0))(input)?;
    let (input, args) = opt(argument_list)(input)?;
    Ok((input, Node::apply(name, args.unwrap_or_default())))
}

fn equality(input: &str) -> PResult<'_, Node> {
    let (input, left) = term(input)?;
    let (input, _) = cut(context("'='", char('=')))(input)?;
    let (input, right) = cut(context("term after '='", term))(input)?;
    Ok((input, Node::equality(left, right)))
}

fn argument_list(input: &str) -> PResult<'_, Vec<Node>> {
    delimited(
        char('('),
        cut(separated_list1(char(','), context("argument", term))),
        cut(context("closing parenthesis", char(')'))),
    )(input)
}

fn variable_name(input: &str) -> PResult<'_, &str> {
    recognize(pair(satisfy(|c| c.is_ascii_lowercase()), digit0))(input)
}

fn term(input: &str) -> PResult<'_, Node> {
    let (input, first) = product(input)?;
    fold_many0(
        preceded(char('+'), cut(context("term after '+'", product))),
        move || first.clone(),
        Node::add,
    )(input)
}

fn product(input: &str) -> PResult<'_, Node> {
    let (input, first) = successor(input)?;
    fold_many0(
        preceded(char('*'), cut(context("term after '*'", successor))),
        move || first.clone(),
        Node::multiply,
    )(input)
}

fn successor(input: &str) -> PResult<'_, Node> {
    let (input, base) = atom(input)?;
    let (input, primes) = many0_count(alt((char('\''), char('’'))))(input)?;
    Ok((input, Node::successor(base, primes as u32)))
}

fn atom(input: &str) -> PResult<'_, Node> {
    context(
        "term",
        alt((
            function_or_variable,
            value(Node::zero(), char('0')),
            delimited(
                char('('),
                cut(term),
                cut(context("closing parenthesis", char(')'))),
            ),
        )),
    )(input)
}

fn function_or_variable(input: &str) -> PResult<'_, Node> {
    let (input, name) = variable_name(input)?;
    let (input, args) = opt(argument_list)(input)?;
    let node = match args {
        Some(args) => Node::apply(name, args),
        None => Node::variable(name),
    };
    Ok((input, node))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fol::Kind;

    #[test]
    fn test_parse_implication_chain() {
        let f = parse_formula("A->B->A").unwrap();
        assert_eq!(*f.kind(), Kind::Implication);
        let (a, rest) = f.as_implication().unwrap();
        assert_eq!(a.canonical(), "A");
        assert_eq!(rest.canonical(), "B->A");
    }

    #[test]
    fn test_parse_left_associative_connectives() {
        let f = parse_formula("A|B|C").unwrap();
        assert_eq!(f.children()[0].canonical(), "A|B");
        let g = parse_formula("A&B&C").unwrap();
        assert_eq!(g.children()[0].canonical(), "A&B");
        assert_eq!(parse_formula("A|(B|C)").unwrap().canonical(), "A|(B|C)");
    }

    #[test]
    fn test_parse_ignores_whitespace() {
        let f = parse_formula(" ( A -> B ) -> C ").unwrap();
        assert_eq!(f.canonical(), "(A->B)->C");
    }

    #[test]
    fn test_parse_quantifiers_take_unary_body() {
        let f = parse_formula("@xP(x)->Q").unwrap();
        let (antecedent, _) = f.as_implication().unwrap();
        assert_eq!(antecedent.canonical(), "@xP(x)");
        let g = parse_formula("?y1(P(y1)&Q)").unwrap();
        assert_eq!(g.as_quantified().map(|(_, v, _)| v), Some("y1"));
    }

    #[test]
    fn test_parse_arithmetic() {
        let f = parse_formula("a*b'=a*b+a").unwrap();
        assert_eq!(*f.kind(), Kind::Equality);
        assert_eq!(*f.children()[1].kind(), Kind::Add);
        assert_eq!(f.canonical(), "a*b'=a*b+a");
        let g = parse_formula("f(x,0)’’=0").unwrap();
        assert_eq!(g.canonical(), "f(x,0)''=0");
    }

    #[test]
    fn test_parenthesized_group_followed_by_term_symbol() {
        assert_eq!(parse_formula("(a+b)'=c").unwrap().canonical(), "(a+b)'=c");
        assert_eq!(parse_formula("(a)=(b)").unwrap().canonical(), "a=b");
        assert_eq!(parse_formula("(a+b)*c=0").unwrap().canonical(), "(a+b)*c=0");
        assert_eq!(parse_formula("(a=b)->(a=c)->(b=c)").unwrap().canonical(), "a=b->a=c->b=c");
        assert_eq!(parse_formula("!((a)+b=c)").unwrap().canonical(), "!a+b=c");
    }

    #[test]
    fn test_predicate_arguments() {
        let f = parse_formula("P1(a,f(b),0')").unwrap();
        assert_eq!(*f.kind(), Kind::Apply("P1".to_string()));
        assert_eq!(f.children().len(), 3);
        assert_eq!(parse_term("g(a+b)").unwrap().canonical(), "g(a+b)");
    }

    #[test]
    fn test_parse_errors() {
        let unclosed = parse_formula("(A->B").unwrap_err();
        assert_eq!(unclosed.expected, "closing parenthesis");
        assert_eq!(unclosed.position, 5);

        let missing_eq = parse_formula("a+b").unwrap_err();
        assert_eq!(missing_eq.expected, "'='");
        assert_eq!(missing_eq.position, 3);

        let trailing = parse_formula("A)").unwrap_err();
        assert_eq!(trailing.expected, "end of formula");
        assert_eq!(trailing.position, 1);

        assert!(parse_formula("A->").is_err());
        assert!(parse_formula("#").is_err());
        assert!(parse_formula("").is_err());
    }
}
