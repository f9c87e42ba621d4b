/*!
The error type returned by [`parse_xpath`](crate::parse_xpath) and the other
`parse_*` entry points.

# Example

*/

use crate::xpath31::parser::Rule;
use std::fmt;

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

#[derive(Clone, Debug, thiserror::Error)]
pub enum ParseError {
    /// The input did not match the expected grammar production at `offset`.
    #[error("syntax error at offset {offset}: expected one of {} near {context:?}", expected.join(", "))]
    Syntax {
        offset: usize,
        expected: Vec<String>,
        context: String,
    },
    /// The input parsed a complete expression but characters remained after it.
    #[error("trailing input at offset {offset} near {context:?}")]
    TrailingInput { offset: usize, context: String },
}

// ------------------------------------------------------------------------------------------------
// Implementations
// ------------------------------------------------------------------------------------------------

impl From<pest::error::Error<Rule>> for ParseError {
    fn from(err: pest::error::Error<Rule>) -> Self {
        let offset = match &err.location {
            pest::error::InputLocation::Pos(p) => *p,
            pest::error::InputLocation::Span((s, _)) => *s,
        };
        let expected = match &err.variant {
            pest::error::ErrorVariant::ParsingError { positives, .. } => {
                positives.iter().map(rule_label).collect()
            }
            pest::error::ErrorVariant::CustomError { .. } => Vec::new(),
        };
        ParseError::Syntax {
            offset,
            expected,
            context: context_snippet(&err),
        }
    }
}

fn context_snippet(err: &pest::error::Error<Rule>) -> String {
    let line = err.line();
    let snippet: String = line.chars().take(48).collect();
    snippet
}

fn rule_label(rule: &Rule) -> String {
    // Debug formatting of a pest-generated enum is its variant name, which
    // already matches the grammar nonterminal it stands for.
    format!("{:?}", rule)
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_display() {
        let err = ParseError::Syntax {
            offset: 3,
            expected: vec!["Expr".to_string()],
            context: "1 + ".to_string(),
        };
        assert!(err.to_string().contains("offset 3"));
    }
}
