/*!
Builders for path expressions: the `/`/`//`/bare relative forms, their step
chains, and the axis/postfix steps a chain is built from.

*/

use crate::xpath31::ast::{
    Axis, AxisStep, Expr, KindTest, NodeTest, PathExpr, Postfix, PostfixExpr, RelativePathExpr,
    StepExpr, StepOperator,
};
use crate::xpath31::parser::build::{expr, names, primary};
use crate::xpath31::parser::Rule;
use pest::iterators::Pair;

// ------------------------------------------------------------------------------------------------
// Public Functions
// ------------------------------------------------------------------------------------------------

pub(crate) fn build_path_expr(pair: Pair<Rule>) -> PathExpr {
    let inner = pair
        .into_inner()
        .next()
        .expect("PathExpr always contains a sub-production");
    match inner.as_rule() {
        Rule::DoubleSlashPathExpr => {
            let rel = inner
                .into_inner()
                .next()
                .expect("DoubleSlashPathExpr always contains a RelativePathExpr");
            PathExpr::RootDoubleSlash(build_relative_path_expr(rel))
        }
        Rule::SingleSlashWithRelativePathExpr => {
            let rel = inner
                .into_inner()
                .next()
                .expect("SingleSlashWithRelativePathExpr always contains a RelativePathExpr");
            PathExpr::RootSlash(build_relative_path_expr(rel))
        }
        Rule::LoneSlashPathExpr => PathExpr::Root,
        Rule::RelativePathExpr => PathExpr::Relative(build_relative_path_expr(inner)),
        r => unreachable!("PathExpr inner rule was {:?}", r),
    }
}

pub(crate) fn build_step_expr(pair: Pair<Rule>) -> StepExpr {
    let inner = pair
        .into_inner()
        .next()
        .expect("StepExpr always contains a sub-production");
    match inner.as_rule() {
        Rule::PostfixExpr => StepExpr::Postfix(build_postfix_expr(inner)),
        Rule::AxisStep => StepExpr::Axis(build_axis_step(inner)),
        r => unreachable!("StepExpr inner rule was {:?}", r),
    }
}

pub(crate) fn build_axis_step(pair: Pair<Rule>) -> AxisStep {
    let mut inner = pair.into_inner();
    let step_pair = inner
        .next()
        .expect("AxisStep always contains a ForwardStep or ReverseStep");
    let (axis, node_test) = match step_pair.as_rule() {
        Rule::ForwardStep => build_forward_step(step_pair),
        Rule::ReverseStep => build_reverse_step(step_pair),
        r => unreachable!("AxisStep inner rule was {:?}", r),
    };
    let predicates = inner
        .next()
        .map(|list| list.into_inner().map(build_predicate_expr).collect())
        .unwrap_or_default();
    AxisStep {
        axis,
        node_test,
        predicates,
    }
}

pub(crate) fn build_postfix_expr(pair: Pair<Rule>) -> PostfixExpr {
    let mut inner = pair.into_inner();
    let primary = primary::build_primary_expr(
        inner
            .next()
            .expect("PostfixExpr always contains a PrimaryExpr"),
    );
    let postfixes = inner.map(build_postfix).collect();
    PostfixExpr { primary, postfixes }
}

// ------------------------------------------------------------------------------------------------
// Private Functions
// ------------------------------------------------------------------------------------------------

fn build_relative_path_expr(pair: Pair<Rule>) -> RelativePathExpr {
    let mut inner = pair.into_inner();
    let head = build_step_expr(
        inner
            .next()
            .expect("RelativePathExpr always contains at least one StepExpr"),
    );
    let mut tail = Vec::new();
    while let Some(op_pair) = inner.next() {
        let op = build_step_operator(op_pair);
        let step_pair = inner
            .next()
            .expect("a StepOperator is always followed by a StepExpr");
        tail.push((op, build_step_expr(step_pair)));
    }
    RelativePathExpr { head, tail }
}

fn build_step_operator(pair: Pair<Rule>) -> StepOperator {
    match pair.as_str() {
        "//" => StepOperator::DoubleSlash,
        "/" => StepOperator::Slash,
        s => unreachable!("unexpected StepOperator text {:?}", s),
    }
}

fn build_forward_step(pair: Pair<Rule>) -> (Axis, NodeTest) {
    let mut inner = pair.into_inner();
    let first = inner.next().expect("ForwardStep is never empty");
    match first.as_rule() {
        Rule::ForwardAxis => {
            let axis = names::build_forward_axis(first);
            let node_test_pair = inner
                .next()
                .expect("an explicit ForwardAxis is always followed by a NodeTest");
            (axis, names::build_node_test(node_test_pair))
        }
        Rule::AbbrevForwardStep => build_abbrev_forward_step(first),
        r => unreachable!("ForwardStep inner rule was {:?}", r),
    }
}

fn build_abbrev_forward_step(pair: Pair<Rule>) -> (Axis, NodeTest) {
    let mut inner = pair.into_inner();
    let first = inner
        .next()
        .expect("AbbrevForwardStep always contains at least a NodeTest");
    match first.as_rule() {
        Rule::AttributeMarker => {
            let node_test_pair = inner
                .next()
                .expect("AttributeMarker is always followed by a NodeTest");
            (Axis::Attribute, names::build_node_test(node_test_pair))
        }
        Rule::NodeTest => (Axis::Child, names::build_node_test(first)),
        r => unreachable!("AbbrevForwardStep inner rule was {:?}", r),
    }
}

fn build_reverse_step(pair: Pair<Rule>) -> (Axis, NodeTest) {
    let mut inner = pair.into_inner();
    let first = inner.next().expect("ReverseStep is never empty");
    match first.as_rule() {
        Rule::ReverseAxis => {
            let axis = names::build_reverse_axis(first);
            let node_test_pair = inner
                .next()
                .expect("an explicit ReverseAxis is always followed by a NodeTest");
            (axis, names::build_node_test(node_test_pair))
        }
        Rule::AbbrevReverseStep => (Axis::Parent, NodeTest::Kind(KindTest::AnyKind)),
        r => unreachable!("ReverseStep inner rule was {:?}", r),
    }
}

fn build_predicate_expr(pair: Pair<Rule>) -> Expr {
    let expr_pair = pair
        .into_inner()
        .next()
        .expect("Predicate always contains an Expr");
    expr::build_expr(expr_pair)
}

fn build_postfix(pair: Pair<Rule>) -> Postfix {
    let inner = pair
        .into_inner()
        .next()
        .expect("Postfix always contains a sub-production");
    match inner.as_rule() {
        Rule::Predicate => Postfix::Predicate(build_predicate_expr(inner)),
        Rule::ArgumentList => Postfix::ArgumentList(primary::build_argument_list(inner)),
        Rule::PostfixLookup => {
            let ks = inner
                .into_inner()
                .next()
                .expect("PostfixLookup always contains a KeySpecifier");
            Postfix::Lookup(primary::build_key_specifier(ks))
        }
        r => unreachable!("Postfix inner rule was {:?}", r),
    }
}
