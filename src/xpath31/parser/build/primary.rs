/*!
Builders for primary expressions: literals, variable references, the
context item, function calls and function items, map/array constructors,
and lookups.

*/

use crate::xpath31::ast::{
    ArrayConstructor, Expr, ExprSingle, FunctionCall, InlineFunctionExpr, KeySpecifier, Literal,
    MapConstructor, NamedFunctionRef, NumericLiteral, Param, PrimaryExpr,
};
use crate::xpath31::parser::build::{expr, names, types, unescape_string_literal};
use crate::xpath31::parser::Rule;
use pest::iterators::Pair;

// ------------------------------------------------------------------------------------------------
// Public Functions
// ------------------------------------------------------------------------------------------------

pub(crate) fn build_primary_expr(pair: Pair<Rule>) -> PrimaryExpr {
    let inner = pair
        .into_inner()
        .next()
        .expect("PrimaryExpr always contains a sub-production");
    match inner.as_rule() {
        Rule::Literal => PrimaryExpr::Literal(build_literal(inner)),
        Rule::VarRef => {
            let name_pair = inner
                .into_inner()
                .next()
                .expect("VarRef always names an EQName");
            PrimaryExpr::VarRef(names::build_eqname(name_pair))
        }
        Rule::ParenthesizedExpr => PrimaryExpr::Parenthesized(build_parenthesized_expr_opt(inner)),
        Rule::ContextItemExpr => PrimaryExpr::ContextItem,
        Rule::FunctionItemExpr => {
            let item = inner
                .into_inner()
                .next()
                .expect("FunctionItemExpr always contains a sub-production");
            match item.as_rule() {
                Rule::NamedFunctionRef => {
                    PrimaryExpr::NamedFunctionRef(build_named_function_ref(item))
                }
                Rule::InlineFunctionExpr => {
                    PrimaryExpr::InlineFunction(build_inline_function_expr(item))
                }
                r => unreachable!("FunctionItemExpr inner rule was {:?}", r),
            }
        }
        Rule::FunctionCall => PrimaryExpr::FunctionCall(build_function_call(inner)),
        Rule::MapConstructor => PrimaryExpr::MapConstructor(build_map_constructor(inner)),
        Rule::ArrayConstructor => PrimaryExpr::ArrayConstructor(build_array_constructor(inner)),
        Rule::UnaryLookup => {
            let ks_pair = inner
                .into_inner()
                .next()
                .expect("UnaryLookup always contains a KeySpecifier");
            PrimaryExpr::UnaryLookup(build_key_specifier(ks_pair))
        }
        r => unreachable!("PrimaryExpr inner rule was {:?}", r),
    }
}

pub(crate) fn build_argument_list(pair: Pair<Rule>) -> Vec<ExprSingle> {
    pair.into_inner().map(expr::build_expr_single).collect()
}

pub(crate) fn build_key_specifier(pair: Pair<Rule>) -> KeySpecifier {
    match pair.into_inner().next() {
        None => KeySpecifier::Wildcard,
        Some(inner) => match inner.as_rule() {
            Rule::NCName => KeySpecifier::Name(inner.as_str().to_string()),
            Rule::IntegerLiteral => KeySpecifier::Integer(inner.as_str().to_string()),
            Rule::ParenthesizedExpr => {
                let contents = build_parenthesized_expr_opt(inner)
                    .unwrap_or_else(|| Box::new(Expr { exprs: Vec::new() }));
                KeySpecifier::Parenthesized(contents)
            }
            r => unreachable!("KeySpecifier inner rule was {:?}", r),
        },
    }
}

// ------------------------------------------------------------------------------------------------
// Private Functions
// ------------------------------------------------------------------------------------------------

fn build_literal(pair: Pair<Rule>) -> Literal {
    let inner = pair
        .into_inner()
        .next()
        .expect("Literal always contains a NumericLiteral or StringLiteral");
    match inner.as_rule() {
        Rule::NumericLiteral => Literal::Numeric(build_numeric_literal(inner)),
        Rule::StringLiteral => Literal::String(unescape_string_literal(inner.as_str())),
        r => unreachable!("Literal inner rule was {:?}", r),
    }
}

fn build_numeric_literal(pair: Pair<Rule>) -> NumericLiteral {
    let inner = pair
        .into_inner()
        .next()
        .expect("NumericLiteral always contains a concrete literal");
    let text = inner.as_str().to_string();
    match inner.as_rule() {
        Rule::IntegerLiteral => NumericLiteral::Integer(text),
        Rule::DecimalLiteral => NumericLiteral::Decimal(text),
        Rule::DoubleLiteral => NumericLiteral::Double(text),
        r => unreachable!("NumericLiteral inner rule was {:?}", r),
    }
}

fn build_parenthesized_expr_opt(pair: Pair<Rule>) -> Option<Box<Expr>> {
    pair.into_inner()
        .next()
        .map(|e| Box::new(expr::build_expr(e)))
}

fn build_function_call(pair: Pair<Rule>) -> FunctionCall {
    let mut inner = pair.into_inner();
    let name = names::build_eqname(
        inner
            .next()
            .expect("FunctionCall always names an EQName"),
    );
    let args = build_argument_list(
        inner
            .next()
            .expect("FunctionCall always has an ArgumentList"),
    );
    FunctionCall { name, args }
}

fn build_named_function_ref(pair: Pair<Rule>) -> NamedFunctionRef {
    let mut inner = pair.into_inner();
    let name = names::build_eqname(
        inner
            .next()
            .expect("NamedFunctionRef always names an EQName"),
    );
    let arity_pair = inner
        .next()
        .expect("NamedFunctionRef always has an Arity");
    let arity: u32 = arity_pair
        .as_str()
        .parse()
        .expect("Arity always matches ASCII_DIGIT+");
    NamedFunctionRef { name, arity }
}

fn build_inline_function_expr(pair: Pair<Rule>) -> InlineFunctionExpr {
    let mut inner = pair.into_inner().peekable();
    let params = if matches!(inner.peek().map(|p| p.as_rule()), Some(Rule::ParamList)) {
        build_param_list(inner.next().unwrap())
    } else {
        Vec::new()
    };
    let return_type = if matches!(inner.peek().map(|p| p.as_rule()), Some(Rule::SequenceType)) {
        Some(types::build_sequence_type(inner.next().unwrap()))
    } else {
        None
    };
    let body_pair = inner
        .next()
        .expect("InlineFunctionExpr always ends with a FunctionBody");
    InlineFunctionExpr {
        params,
        return_type,
        body: build_function_body(body_pair),
    }
}

fn build_param_list(pair: Pair<Rule>) -> Vec<Param> {
    pair.into_inner().map(build_param).collect()
}

fn build_param(pair: Pair<Rule>) -> Param {
    let mut inner = pair.into_inner();
    let name = names::build_eqname(inner.next().expect("Param always names an EQName"));
    let declared_type = inner.next().map(types::build_sequence_type);
    Param { name, declared_type }
}

fn build_function_body(pair: Pair<Rule>) -> Option<Box<Expr>> {
    pair.into_inner()
        .next()
        .map(|e| Box::new(expr::build_expr(e)))
}

fn build_map_constructor(pair: Pair<Rule>) -> MapConstructor {
    let entries = pair.into_inner().map(build_map_entry).collect();
    MapConstructor { entries }
}

fn build_map_entry(pair: Pair<Rule>) -> (ExprSingle, ExprSingle) {
    let mut inner = pair.into_inner();
    let key = expr::build_expr_single(
        inner
            .next()
            .expect("MapConstructorEntry always has a key expression"),
    );
    let value = expr::build_expr_single(
        inner
            .next()
            .expect("MapConstructorEntry always has a value expression"),
    );
    (key, value)
}

fn build_array_constructor(pair: Pair<Rule>) -> ArrayConstructor {
    let inner = pair
        .into_inner()
        .next()
        .expect("ArrayConstructor always contains a sub-production");
    match inner.as_rule() {
        Rule::SquareArrayConstructor => {
            let items = inner.into_inner().map(expr::build_expr_single).collect();
            ArrayConstructor::Square(items)
        }
        Rule::CurlyArrayConstructor => {
            let body_pair = inner
                .into_inner()
                .next()
                .expect("CurlyArrayConstructor always contains a FunctionBody");
            ArrayConstructor::Curly(build_function_body(body_pair))
        }
        r => unreachable!("ArrayConstructor inner rule was {:?}", r),
    }
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xpath31::parser::XPathParser;
    use pest::Parser;

    fn primary(s: &str) -> PrimaryExpr {
        let pair = XPathParser::parse(Rule::PrimaryExpr, s)
            .unwrap()
            .next()
            .unwrap();
        build_primary_expr(pair)
    }

    #[test]
    fn test_numeric_literal_kinds() {
        assert_eq!(
            primary("1"),
            PrimaryExpr::Literal(Literal::Numeric(NumericLiteral::Integer("1".to_string())))
        );
        assert_eq!(
            primary("1."),
            PrimaryExpr::Literal(Literal::Numeric(NumericLiteral::Decimal("1.".to_string())))
        );
        assert_eq!(
            primary("1.2e-3"),
            PrimaryExpr::Literal(Literal::Numeric(NumericLiteral::Double(
                "1.2e-3".to_string()
            )))
        );
    }

    #[test]
    fn test_string_literal_unescapes_doubled_quote() {
        assert_eq!(
            primary("\"a\"\"b\""),
            PrimaryExpr::Literal(Literal::String("a\"b".to_string()))
        );
    }
}
