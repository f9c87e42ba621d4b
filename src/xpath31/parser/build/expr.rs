/*!
Builders for the top-level `Expr`, the FLWOR-ish binding expressions
(`for`/`let`/quantified/`if`), and the full operator precedence chain down
through `SimpleMapExpr`, where it hands off to [`crate::xpath31::parser::build::path`].

*/

use crate::xpath31::ast::{
    AdditiveExpr, AdditiveOp, AndExpr, ArrowCall, ArrowExpr, ArrowFunctionSpecifier,
    CastExpr, CastableExpr, ComparisonExpr, ComparisonOp, Expr, ExprSingle, ForExpr,
    GeneralCompOp, IfExpr, InstanceOfExpr, IntersectExceptExpr, IntersectExceptOp, LetExpr,
    MultiplicativeExpr, MultiplicativeOp, NodeCompOp, OrExpr, Quantifier, QuantifiedExpr,
    RangeExpr, SimpleBinding, SimpleMapExpr, StringConcatExpr, TreatExpr, UnaryExpr, UnaryOp,
    UnionExpr, ValueCompOp,
};
use crate::xpath31::parser::build::{names, path, primary, types};
use crate::xpath31::parser::Rule;
use pest::iterators::Pair;

// ------------------------------------------------------------------------------------------------
// Public Functions
// ------------------------------------------------------------------------------------------------

pub(crate) fn build_expr(pair: Pair<Rule>) -> Expr {
    let exprs = pair.into_inner().map(build_expr_single).collect();
    Expr { exprs }
}

pub(crate) fn build_expr_single(pair: Pair<Rule>) -> ExprSingle {
    let inner = pair
        .into_inner()
        .next()
        .expect("ExprSingle always contains a sub-production");
    match inner.as_rule() {
        Rule::ForExpr => ExprSingle::For(build_for_expr(inner)),
        Rule::LetExpr => ExprSingle::Let(build_let_expr(inner)),
        Rule::QuantifiedExpr => ExprSingle::Quantified(build_quantified_expr(inner)),
        Rule::IfExpr => ExprSingle::If(build_if_expr(inner)),
        Rule::OrExpr => ExprSingle::Or(build_or_expr(inner)),
        r => unreachable!("ExprSingle inner rule was {:?}", r),
    }
}

// ------------------------------------------------------------------------------------------------
// Private Functions — binding expressions
// ------------------------------------------------------------------------------------------------

fn build_for_expr(pair: Pair<Rule>) -> ForExpr {
    let mut inner = pair.into_inner();
    let clause = inner
        .next()
        .expect("ForExpr always starts with a SimpleForClause");
    let bindings = clause.into_inner().map(build_simple_for_binding).collect();
    let return_expr = Box::new(build_expr_single(
        inner.next().expect("ForExpr always ends with a return ExprSingle"),
    ));
    ForExpr {
        bindings,
        return_expr,
    }
}

fn build_simple_for_binding(pair: Pair<Rule>) -> SimpleBinding {
    let mut inner = pair.into_inner();
    let var = names::build_eqname(
        inner
            .next()
            .expect("SimpleForBinding always names an EQName"),
    );
    let expr = Box::new(build_expr_single(
        inner
            .next()
            .expect("SimpleForBinding always has an 'in' ExprSingle"),
    ));
    SimpleBinding { var, expr }
}

fn build_let_expr(pair: Pair<Rule>) -> LetExpr {
    let mut inner = pair.into_inner();
    let clause = inner
        .next()
        .expect("LetExpr always starts with a SimpleLetClause");
    let bindings = clause.into_inner().map(build_simple_let_binding).collect();
    let return_expr = Box::new(build_expr_single(
        inner.next().expect("LetExpr always ends with a return ExprSingle"),
    ));
    LetExpr {
        bindings,
        return_expr,
    }
}

fn build_simple_let_binding(pair: Pair<Rule>) -> SimpleBinding {
    let mut inner = pair.into_inner();
    let var = names::build_eqname(
        inner
            .next()
            .expect("SimpleLetBinding always names an EQName"),
    );
    let expr = Box::new(build_expr_single(
        inner
            .next()
            .expect("SimpleLetBinding always has an ':=' ExprSingle"),
    ));
    SimpleBinding { var, expr }
}

fn build_quantified_expr(pair: Pair<Rule>) -> QuantifiedExpr {
    let mut inner = pair.into_inner().peekable();
    let quantifier_pair = inner
        .next()
        .expect("QuantifiedExpr always starts with a Quantifier");
    let quantifier = match quantifier_pair.as_str() {
        "some" => Quantifier::Some,
        "every" => Quantifier::Every,
        s => unreachable!("unexpected Quantifier text {:?}", s),
    };
    let mut bindings = Vec::new();
    while matches!(
        inner.peek().map(|p| p.as_rule()),
        Some(Rule::SimpleForBinding)
    ) {
        bindings.push(build_simple_for_binding(inner.next().unwrap()));
    }
    let satisfies = Box::new(build_expr_single(
        inner
            .next()
            .expect("QuantifiedExpr always ends with a 'satisfies' ExprSingle"),
    ));
    QuantifiedExpr {
        quantifier,
        bindings,
        satisfies,
    }
}

fn build_if_expr(pair: Pair<Rule>) -> IfExpr {
    let mut inner = pair.into_inner();
    let condition = Box::new(build_expr(
        inner.next().expect("IfExpr always has a condition Expr"),
    ));
    let then_branch = Box::new(build_expr_single(
        inner.next().expect("IfExpr always has a 'then' ExprSingle"),
    ));
    let else_branch = Box::new(build_expr_single(
        inner.next().expect("IfExpr always has an 'else' ExprSingle"),
    ));
    IfExpr {
        condition,
        then_branch,
        else_branch,
    }
}

// ------------------------------------------------------------------------------------------------
// Private Functions — operator precedence chain
// ------------------------------------------------------------------------------------------------

fn build_or_expr(pair: Pair<Rule>) -> OrExpr {
    let mut operands = pair.into_inner().map(build_and_expr);
    let head = operands.next().expect("OrExpr always has at least one AndExpr");
    OrExpr::new(head, operands.collect())
}

fn build_and_expr(pair: Pair<Rule>) -> AndExpr {
    let mut operands = pair.into_inner().map(build_comparison_expr);
    let head = operands
        .next()
        .expect("AndExpr always has at least one ComparisonExpr");
    AndExpr::new(head, operands.collect())
}

fn build_comparison_expr(pair: Pair<Rule>) -> ComparisonExpr {
    let mut inner = pair.into_inner();
    let left = Box::new(build_string_concat_expr(
        inner
            .next()
            .expect("ComparisonExpr always has a left StringConcatExpr"),
    ));
    let op = inner.next().map(|op_pair| {
        let op = build_comparison_operator(op_pair);
        let right = Box::new(build_string_concat_expr(
            inner
                .next()
                .expect("a ComparisonOperator is always followed by a right StringConcatExpr"),
        ));
        (op, right)
    });
    ComparisonExpr { left, op }
}

fn build_comparison_operator(pair: Pair<Rule>) -> ComparisonOp {
    let inner = pair
        .into_inner()
        .next()
        .expect("ComparisonOperator always contains a sub-production");
    match inner.as_rule() {
        Rule::ValueCompOp => ComparisonOp::Value(match inner.as_str() {
            "eq" => ValueCompOp::Eq,
            "ne" => ValueCompOp::Ne,
            "lt" => ValueCompOp::Lt,
            "le" => ValueCompOp::Le,
            "gt" => ValueCompOp::Gt,
            "ge" => ValueCompOp::Ge,
            s => unreachable!("unexpected ValueCompOp text {:?}", s),
        }),
        Rule::GeneralCompOp => ComparisonOp::General(match inner.as_str() {
            "=" => GeneralCompOp::Eq,
            "!=" => GeneralCompOp::Ne,
            "<=" => GeneralCompOp::Le,
            "<" => GeneralCompOp::Lt,
            ">=" => GeneralCompOp::Ge,
            ">" => GeneralCompOp::Gt,
            s => unreachable!("unexpected GeneralCompOp text {:?}", s),
        }),
        Rule::NodeCompOp => ComparisonOp::Node(match inner.as_str() {
            "is" => NodeCompOp::Is,
            "<<" => NodeCompOp::Precedes,
            ">>" => NodeCompOp::Follows,
            s => unreachable!("unexpected NodeCompOp text {:?}", s),
        }),
        r => unreachable!("ComparisonOperator inner rule was {:?}", r),
    }
}

fn build_string_concat_expr(pair: Pair<Rule>) -> StringConcatExpr {
    let mut operands = pair.into_inner().map(build_range_expr);
    let head = operands
        .next()
        .expect("StringConcatExpr always has at least one RangeExpr");
    StringConcatExpr::new(head, operands.collect())
}

fn build_range_expr(pair: Pair<Rule>) -> RangeExpr {
    let mut inner = pair.into_inner();
    let from = Box::new(build_additive_expr(
        inner.next().expect("RangeExpr always has a 'from' AdditiveExpr"),
    ));
    let to = inner.next().map(|p| Box::new(build_additive_expr(p)));
    RangeExpr { from, to }
}

fn build_additive_expr(pair: Pair<Rule>) -> AdditiveExpr {
    let mut inner = pair.into_inner();
    let head = build_multiplicative_expr(
        inner
            .next()
            .expect("AdditiveExpr always has at least one MultiplicativeExpr"),
    );
    let mut tail = Vec::new();
    while let Some(op_pair) = inner.next() {
        let op = match op_pair.as_str() {
            "+" => AdditiveOp::Add,
            "-" => AdditiveOp::Subtract,
            s => unreachable!("unexpected AdditiveOperator text {:?}", s),
        };
        let operand = build_multiplicative_expr(
            inner
                .next()
                .expect("an AdditiveOperator is always followed by a MultiplicativeExpr"),
        );
        tail.push((op, operand));
    }
    AdditiveExpr::new(head, tail)
}

fn build_multiplicative_expr(pair: Pair<Rule>) -> MultiplicativeExpr {
    let mut inner = pair.into_inner();
    let head = build_union_expr(
        inner
            .next()
            .expect("MultiplicativeExpr always has at least one UnionExpr"),
    );
    let mut tail = Vec::new();
    while let Some(op_pair) = inner.next() {
        let op = match op_pair.as_str() {
            "*" => MultiplicativeOp::Multiply,
            "div" => MultiplicativeOp::Divide,
            "idiv" => MultiplicativeOp::IntegerDivide,
            "mod" => MultiplicativeOp::Modulus,
            s => unreachable!("unexpected MultiplicativeOperator text {:?}", s),
        };
        let operand = build_union_expr(
            inner
                .next()
                .expect("a MultiplicativeOperator is always followed by a UnionExpr"),
        );
        tail.push((op, operand));
    }
    MultiplicativeExpr::new(head, tail)
}

fn build_union_expr(pair: Pair<Rule>) -> UnionExpr {
    let mut operands = pair.into_inner().map(build_intersect_except_expr);
    let head = operands
        .next()
        .expect("UnionExpr always has at least one IntersectExceptExpr");
    UnionExpr::new(head, operands.collect())
}

fn build_intersect_except_expr(pair: Pair<Rule>) -> IntersectExceptExpr {
    let mut inner = pair.into_inner();
    let head = build_instance_of_expr(
        inner
            .next()
            .expect("IntersectExceptExpr always has at least one InstanceOfExpr"),
    );
    let mut tail = Vec::new();
    while let Some(op_pair) = inner.next() {
        let op = match op_pair.as_str() {
            "intersect" => IntersectExceptOp::Intersect,
            "except" => IntersectExceptOp::Except,
            s => unreachable!("unexpected IntersectExceptOperator text {:?}", s),
        };
        let operand = build_instance_of_expr(
            inner
                .next()
                .expect("an IntersectExceptOperator is always followed by an InstanceOfExpr"),
        );
        tail.push((op, operand));
    }
    IntersectExceptExpr::new(head, tail)
}

fn build_instance_of_expr(pair: Pair<Rule>) -> InstanceOfExpr {
    let mut inner = pair.into_inner();
    let operand = Box::new(build_treat_expr(
        inner.next().expect("InstanceOfExpr always has a TreatExpr"),
    ));
    let sequence_type = inner.next().map(types::build_sequence_type);
    InstanceOfExpr {
        operand,
        sequence_type,
    }
}

fn build_treat_expr(pair: Pair<Rule>) -> TreatExpr {
    let mut inner = pair.into_inner();
    let operand = Box::new(build_castable_expr(
        inner.next().expect("TreatExpr always has a CastableExpr"),
    ));
    let sequence_type = inner.next().map(types::build_sequence_type);
    TreatExpr {
        operand,
        sequence_type,
    }
}

fn build_castable_expr(pair: Pair<Rule>) -> CastableExpr {
    let mut inner = pair.into_inner();
    let operand = Box::new(build_cast_expr(
        inner.next().expect("CastableExpr always has a CastExpr"),
    ));
    let single_type = inner.next().map(types::build_single_type);
    CastableExpr {
        operand,
        single_type,
    }
}

fn build_cast_expr(pair: Pair<Rule>) -> CastExpr {
    let mut inner = pair.into_inner();
    let operand = Box::new(build_arrow_expr(
        inner.next().expect("CastExpr always has an ArrowExpr"),
    ));
    let single_type = inner.next().map(types::build_single_type);
    CastExpr {
        operand,
        single_type,
    }
}

fn build_arrow_expr(pair: Pair<Rule>) -> ArrowExpr {
    let mut inner = pair.into_inner();
    let operand = Box::new(build_unary_expr(
        inner.next().expect("ArrowExpr always has a UnaryExpr"),
    ));
    let mut calls = Vec::new();
    while let Some(specifier_pair) = inner.next() {
        let specifier = build_arrow_function_specifier(specifier_pair);
        let args = primary::build_argument_list(
            inner
                .next()
                .expect("an ArrowFunctionSpecifier is always followed by an ArgumentList"),
        );
        calls.push(ArrowCall { specifier, args });
    }
    ArrowExpr { operand, calls }
}

fn build_arrow_function_specifier(pair: Pair<Rule>) -> ArrowFunctionSpecifier {
    match pair.as_rule() {
        Rule::EQName => ArrowFunctionSpecifier::Name(names::build_eqname(pair)),
        Rule::VarRef => {
            let name_pair = pair
                .into_inner()
                .next()
                .expect("VarRef always names an EQName");
            ArrowFunctionSpecifier::Var(names::build_eqname(name_pair))
        }
        Rule::ParenthesizedExpr => {
            let contents = pair
                .into_inner()
                .next()
                .map(build_expr)
                .unwrap_or_else(|| Expr { exprs: Vec::new() });
            ArrowFunctionSpecifier::Parenthesized(Box::new(contents))
        }
        r => unreachable!("ArrowFunctionSpecifier inner rule was {:?}", r),
    }
}

fn build_unary_expr(pair: Pair<Rule>) -> UnaryExpr {
    let mut inner = pair.into_inner().peekable();
    let mut ops = Vec::new();
    while matches!(inner.peek().map(|p| p.as_rule()), Some(Rule::UnaryOperator)) {
        let op_pair = inner.next().unwrap();
        ops.push(match op_pair.as_str().trim() {
            "-" => UnaryOp::Minus,
            "+" => UnaryOp::Plus,
            s => unreachable!("unexpected UnaryOperator text {:?}", s),
        });
    }
    let value_expr_pair = inner
        .next()
        .expect("UnaryExpr always ends with a ValueExpr");
    let simple_map_pair = value_expr_pair
        .into_inner()
        .next()
        .expect("ValueExpr always contains a SimpleMapExpr");
    UnaryExpr {
        ops,
        operand: Box::new(build_simple_map_expr(simple_map_pair)),
    }
}

fn build_simple_map_expr(pair: Pair<Rule>) -> SimpleMapExpr {
    let mut operands = pair.into_inner().map(path::build_path_expr);
    let head = operands
        .next()
        .expect("SimpleMapExpr always has at least one PathExpr");
    SimpleMapExpr::new(head, operands.collect())
}
