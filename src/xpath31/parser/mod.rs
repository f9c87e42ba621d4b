/*!
The PEG grammar driver: the pest-derived `XPathParser`/`Rule` pair, the
top-level [`parse_xpath`] entry point, and one `parse_<nonterminal>` wrapper
per publicly useful grammar nonterminal.

Each `parse_<nonterminal>` function parses only as much of its input as the
named production matches and does not itself flag trailing input as an
error — per xgc this lets a caller locate the byte span of a sub-expression
within a larger string. `parse_xpath` is the one entry point that requires
the whole input to be consumed: it parses `Rule::Expr` directly rather than
the grammar's `XPath`/`EOI` production, so that a non-empty remainder can be
reported as [`ParseError::TrailingInput`](crate::ParseError::TrailingInput)
instead of folding into the same opaque `Syntax` failure pest would raise
from a fused `EOI` mismatch.

*/

pub(crate) mod build;

use crate::xpath31::ast;
use crate::xpath31::error::ParseError;
use pest::iterators::Pair;
use pest::Parser;

#[derive(Parser)]
#[grammar = "xpath31/grammar.pest"]
pub struct XPathParser;

// ------------------------------------------------------------------------------------------------
// Top-level entry point
// ------------------------------------------------------------------------------------------------

pub fn parse_xpath(input: &str) -> Result<ast::XPathExpr, ParseError> {
    let after_leading_ws = strip_ws(input);
    let leading_ws_len = input.len() - after_leading_ws.len();

    let expr_pair = parse_rule(Rule::Expr, after_leading_ws)?;
    let consumed = expr_pair.as_str().len();

    let tail = &after_leading_ws[consumed..];
    let trailing = strip_ws(tail);
    if !trailing.is_empty() {
        let offset = leading_ws_len + consumed + (tail.len() - trailing.len());
        return Err(ParseError::TrailingInput {
            offset,
            context: trailing.chars().take(48).collect(),
        });
    }

    Ok(build::expr::build_expr(expr_pair))
}

/// Strips the leading whitespace characters the grammar's `WS` rule matches
/// (`" " | "\t" | "\r" | "\n"`); there is no implicit `WHITESPACE` rule, so
/// this mirrors what the grammar itself would skip at this position.
fn strip_ws(s: &str) -> &str {
    s.trim_start_matches(|c: char| matches!(c, ' ' | '\t' | '\r' | '\n'))
}

// ------------------------------------------------------------------------------------------------
// Per-nonterminal entry points
// ------------------------------------------------------------------------------------------------

pub fn parse_expr(input: &str) -> Result<ast::Expr, ParseError> {
    Ok(build::expr::build_expr(parse_rule(Rule::Expr, input)?))
}

pub fn parse_expr_single(input: &str) -> Result<ast::ExprSingle, ParseError> {
    Ok(build::expr::build_expr_single(parse_rule(
        Rule::ExprSingle,
        input,
    )?))
}

pub fn parse_path_expr(input: &str) -> Result<ast::PathExpr, ParseError> {
    Ok(build::path::build_path_expr(parse_rule(
        Rule::PathExpr,
        input,
    )?))
}

pub fn parse_step_expr(input: &str) -> Result<ast::StepExpr, ParseError> {
    Ok(build::path::build_step_expr(parse_rule(
        Rule::StepExpr,
        input,
    )?))
}

pub fn parse_axis_step(input: &str) -> Result<ast::AxisStep, ParseError> {
    Ok(build::path::build_axis_step(parse_rule(
        Rule::AxisStep,
        input,
    )?))
}

pub fn parse_primary_expr(input: &str) -> Result<ast::PrimaryExpr, ParseError> {
    Ok(build::primary::build_primary_expr(parse_rule(
        Rule::PrimaryExpr,
        input,
    )?))
}

pub fn parse_eqname(input: &str) -> Result<ast::EQName, ParseError> {
    Ok(build::names::build_eqname(parse_rule(Rule::EQName, input)?))
}

pub fn parse_node_test(input: &str) -> Result<ast::NodeTest, ParseError> {
    Ok(build::names::build_node_test(parse_rule(
        Rule::NodeTest,
        input,
    )?))
}

pub fn parse_sequence_type(input: &str) -> Result<ast::types::SequenceType, ParseError> {
    Ok(build::types::build_sequence_type(parse_rule(
        Rule::SequenceType,
        input,
    )?))
}

pub fn parse_single_type(input: &str) -> Result<ast::types::SingleType, ParseError> {
    Ok(build::types::build_single_type(parse_rule(
        Rule::SingleType,
        input,
    )?))
}

// ------------------------------------------------------------------------------------------------
// Shared helper
// ------------------------------------------------------------------------------------------------

fn parse_rule(rule: Rule, input: &str) -> Result<Pair<Rule>, ParseError> {
    let mut pairs = XPathParser::parse(rule, input)?;
    Ok(pairs
        .next()
        .expect("a successful pest parse always produces at least one pair"))
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_xpath_lone_slash() {
        let ast = parse_xpath("/").expect("lone slash is a valid XPath expression");
        assert_eq!(ast.exprs.len(), 1);
    }

    #[test]
    fn test_parse_xpath_rejects_empty_input() {
        assert!(parse_xpath("").is_err());
    }

    #[test]
    fn test_parse_xpath_rejects_whitespace_only_input() {
        assert!(parse_xpath("   ").is_err());
    }

    #[test]
    fn test_parse_xpath_rejects_double_slash_alone() {
        assert!(parse_xpath("//").is_err());
    }

    #[test]
    fn test_parse_xpath_rejects_trailing_input() {
        assert!(parse_xpath("1 +").is_err());
        assert!(parse_xpath("1 1").is_err());
    }

    #[test]
    fn test_parse_xpath_reports_trailing_input_kind_and_offset() {
        match parse_xpath("1 1") {
            Err(ParseError::TrailingInput { offset, context }) => {
                assert_eq!(offset, 2);
                assert_eq!(context, "1");
            }
            other => panic!("expected TrailingInput, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_path_expr_leaves_trailing_tail() {
        // parse_<nonterminal> does not require consuming the whole input.
        let pair = parse_rule(Rule::PathExpr, "a/b extra").unwrap();
        assert_eq!(pair.as_str(), "a/b");
    }

    #[test]
    fn test_parse_eqname_forms() {
        assert_eq!(
            parse_eqname("local").unwrap(),
            ast::EQName::Unprefixed("local".to_string())
        );
    }
}
