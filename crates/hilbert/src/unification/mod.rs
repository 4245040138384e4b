//! Schema matching for axiom and substitution checks

mod r#match;


pub use r#match::{match_node, match_schema, match_substitution, Capture, MatchContext, MatchMode};
