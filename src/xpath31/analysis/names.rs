/*!
Used-`EQName` and used-prefix analysis.

Most `EQName`-bearing fields hang off nodes the generic `Node::children`
walk already visits (a step's node test, a function call's name, a type
annotation on `instance of`/`treat as`/`castable as`/`cast as`), but a few
of them — node tests, type annotations — are deliberately left out of
`children()` since they aren't themselves expressions to recurse into.
This module walks the tree via `Node::children` for structure and
downcasts to the concrete types that carry these extra names via
[`Node::as_any`] at each node, exactly as [`crate::xpath31::analysis::vars`]
does for scope tracking.

*/

use std::collections::BTreeSet;

use crate::xpath31::ast::{
    AdditiveExpr, AndExpr, ArrowExpr, ArrowFunctionSpecifier, AxisStep, CastExpr, CastableExpr,
    ComparisonExpr, EQName, ExprSingle, InstanceOfExpr, IntersectExceptExpr, KindTest,
    MultiplicativeExpr, NameOrWildcard, NameTest, Node, NodeTest, OrExpr, PathExpr, PrimaryExpr,
    SimpleMapExpr, StepExpr, StringConcatExpr, TreatExpr, UnionExpr,
};
use crate::xpath31::ast::types::{ArrayTest, FunctionTest, ItemType, MapTest, SequenceType};

// ------------------------------------------------------------------------------------------------
// Public Functions
// ------------------------------------------------------------------------------------------------

pub fn find_used_eqnames(node: &dyn Node) -> BTreeSet<EQName> {
    let mut names = BTreeSet::new();
    collect_eqnames(node, &mut names);
    names
}

/// `extra_extractor`, when given, is invoked with `(function_local_name,
/// string_literal_argument)` for every string-literal argument of every
/// function call in the tree; whatever prefixes it returns are folded into
/// the result alongside the lexical prefixes of every used `EQName`.
pub fn find_used_prefixes(
    node: &dyn Node,
    include_wildcard_prefixes: bool,
    extra_extractor: Option<&dyn Fn(&str, &str) -> Vec<String>>,
) -> BTreeSet<String> {
    let names = find_used_eqnames(node);
    let mut prefixes: BTreeSet<String> = names
        .iter()
        .filter_map(EQName::prefix)
        .map(str::to_string)
        .collect();
    if include_wildcard_prefixes {
        collect_prefix_wildcards(node, &mut prefixes);
    }
    if let Some(extractor) = extra_extractor {
        collect_extractor_prefixes(node, extractor, &mut prefixes);
    }
    prefixes
}

// ------------------------------------------------------------------------------------------------
// Private Functions — EQName collection
// ------------------------------------------------------------------------------------------------

fn collect_eqnames(node: &dyn Node, names: &mut BTreeSet<EQName>) {
    if let Some(step) = node.as_any().downcast_ref::<AxisStep>() {
        collect_node_test_eqnames(&step.node_test, names);
    }
    if let Some(primary) = node.as_any().downcast_ref::<PrimaryExpr>() {
        match primary {
            PrimaryExpr::VarRef(name) => {
                names.insert(name.clone());
            }
            PrimaryExpr::FunctionCall(call) => {
                names.insert(call.name.clone());
            }
            PrimaryExpr::NamedFunctionRef(nfr) => {
                names.insert(nfr.name.clone());
            }
            PrimaryExpr::InlineFunction(f) => {
                if let Some(rt) = &f.return_type {
                    collect_sequence_type_eqnames(rt, names);
                }
                for param in &f.params {
                    if let Some(dt) = &param.declared_type {
                        collect_sequence_type_eqnames(dt, names);
                    }
                }
            }
            _ => {}
        }
    }
    if let Some(arrow) = node.as_any().downcast_ref::<ArrowExpr>() {
        for call in &arrow.calls {
            match &call.specifier {
                ArrowFunctionSpecifier::Name(n) | ArrowFunctionSpecifier::Var(n) => {
                    names.insert(n.clone());
                }
                ArrowFunctionSpecifier::Parenthesized(_) => {}
            }
        }
    }
    if let Some(io) = node.as_any().downcast_ref::<InstanceOfExpr>() {
        if let Some(st) = &io.sequence_type {
            collect_sequence_type_eqnames(st, names);
        }
    }
    if let Some(t) = node.as_any().downcast_ref::<TreatExpr>() {
        if let Some(st) = &t.sequence_type {
            collect_sequence_type_eqnames(st, names);
        }
    }
    if let Some(c) = node.as_any().downcast_ref::<CastableExpr>() {
        if let Some(st) = &c.single_type {
            names.insert(st.name.clone());
        }
    }
    if let Some(c) = node.as_any().downcast_ref::<CastExpr>() {
        if let Some(st) = &c.single_type {
            names.insert(st.name.clone());
        }
    }
    for child in node.children() {
        collect_eqnames(child.node(), names);
    }
}

fn collect_node_test_eqnames(node_test: &NodeTest, names: &mut BTreeSet<EQName>) {
    match node_test {
        NodeTest::Name(NameTest::Name(n)) => {
            names.insert(n.clone());
        }
        NodeTest::Name(_) => {}
        NodeTest::Kind(kt) => collect_kind_test_eqnames(kt, names),
    }
}

fn collect_kind_test_eqnames(kind_test: &KindTest, names: &mut BTreeSet<EQName>) {
    match kind_test {
        KindTest::AnyKind | KindTest::Text | KindTest::Comment | KindTest::NamespaceNode => {}
        // The one-argument `processing-instruction(Name)` form takes a bare
        // NCName, never a prefixed QName, but it is still a used name.
        KindTest::ProcessingInstruction(Some(local)) => {
            names.insert(EQName::Unprefixed(local.clone()));
        }
        KindTest::ProcessingInstruction(None) => {}
        KindTest::Document(inner) => {
            if let Some(kt) = inner {
                collect_kind_test_eqnames(kt, names);
            }
        }
        KindTest::Attribute { name, type_name } => {
            if let Some(NameOrWildcard::Name(n)) = name {
                names.insert(n.clone());
            }
            if let Some(t) = type_name {
                names.insert(t.clone());
            }
        }
        KindTest::SchemaAttribute(n) => {
            names.insert(n.clone());
        }
        KindTest::Element {
            name, type_name, ..
        } => {
            if let Some(NameOrWildcard::Name(n)) = name {
                names.insert(n.clone());
            }
            if let Some(t) = type_name {
                names.insert(t.clone());
            }
        }
        KindTest::SchemaElement(n) => {
            names.insert(n.clone());
        }
    }
}

fn collect_sequence_type_eqnames(sequence_type: &SequenceType, names: &mut BTreeSet<EQName>) {
    if let SequenceType::Item { item_type, .. } = sequence_type {
        collect_item_type_eqnames(item_type, names);
    }
}

fn collect_item_type_eqnames(item_type: &ItemType, names: &mut BTreeSet<EQName>) {
    match item_type {
        ItemType::AnyItem => {}
        ItemType::Kind(kt) => collect_kind_test_eqnames(kt, names),
        ItemType::Function(ft) => match ft {
            FunctionTest::Any => {}
            FunctionTest::Typed {
                params,
                return_type,
            } => {
                for p in params {
                    collect_sequence_type_eqnames(p, names);
                }
                collect_sequence_type_eqnames(return_type, names);
            }
        },
        ItemType::Map(mt) => match mt {
            MapTest::Any => {}
            MapTest::Typed {
                key_type,
                value_type,
            } => {
                names.insert(key_type.clone());
                collect_sequence_type_eqnames(value_type, names);
            }
        },
        ItemType::Array(at) => match at {
            ArrayTest::Any => {}
            ArrayTest::Typed(st) => collect_sequence_type_eqnames(st, names),
        },
        ItemType::AtomicOrUnion(n) => {
            names.insert(n.clone());
        }
        ItemType::Parenthesized(inner) => collect_item_type_eqnames(inner, names),
    }
}

// ------------------------------------------------------------------------------------------------
// Private Functions — prefix wildcards and the extractor hook
// ------------------------------------------------------------------------------------------------

fn collect_prefix_wildcards(node: &dyn Node, prefixes: &mut BTreeSet<String>) {
    if let Some(step) = node.as_any().downcast_ref::<AxisStep>() {
        if let NodeTest::Name(NameTest::PrefixWildcard(p)) = &step.node_test {
            prefixes.insert(p.clone());
        }
    }
    for child in node.children() {
        collect_prefix_wildcards(child.node(), prefixes);
    }
}

fn collect_extractor_prefixes(
    node: &dyn Node,
    extractor: &dyn Fn(&str, &str) -> Vec<String>,
    prefixes: &mut BTreeSet<String>,
) {
    if let Some(primary) = node.as_any().downcast_ref::<PrimaryExpr>() {
        if let PrimaryExpr::FunctionCall(call) = primary {
            for arg in &call.args {
                if let Some(s) = as_string_literal(arg) {
                    for extra in extractor(call.name.local_name(), s) {
                        prefixes.insert(extra);
                    }
                }
            }
        }
    }
    for child in node.children() {
        collect_extractor_prefixes(child.node(), prefixes);
    }
}

/// Unwraps an `ExprSingle` down through every trivial pass-through level of
/// the precedence chain, returning the bare `PrimaryExpr` underneath only if
/// every level really is trivial (no operator, no type annotation, no
/// postfix). Anything else is a genuine compound expression, not a literal.
fn unwrap_to_primary(expr: &ExprSingle) -> Option<&PrimaryExpr> {
    let or_expr = match expr {
        ExprSingle::Or(o) => o,
        _ => return None,
    };
    let and_expr = match or_expr {
        OrExpr::Single(a) => a.as_ref(),
        _ => return None,
    };
    let comparison = match and_expr {
        AndExpr::Single(c) => c.as_ref(),
        _ => return None,
    };
    if comparison.op.is_some() {
        return None;
    }
    let string_concat = comparison.left.as_ref();
    let range = match string_concat {
        StringConcatExpr::Single(r) => r.as_ref(),
        _ => return None,
    };
    if range.to.is_some() {
        return None;
    }
    let additive = range.from.as_ref();
    let multiplicative = match additive {
        AdditiveExpr::Single(m) => m.as_ref(),
        _ => return None,
    };
    let union = match multiplicative {
        MultiplicativeExpr::Single(u) => u.as_ref(),
        _ => return None,
    };
    let intersect_except = match union {
        UnionExpr::Single(i) => i.as_ref(),
        _ => return None,
    };
    let instance_of = match intersect_except {
        IntersectExceptExpr::Single(i) => i.as_ref(),
        _ => return None,
    };
    if instance_of.sequence_type.is_some() {
        return None;
    }
    let treat = instance_of.operand.as_ref();
    if treat.sequence_type.is_some() {
        return None;
    }
    let castable = treat.operand.as_ref();
    if castable.single_type.is_some() {
        return None;
    }
    let cast = castable.operand.as_ref();
    if cast.single_type.is_some() {
        return None;
    }
    let arrow = cast.operand.as_ref();
    if !arrow.calls.is_empty() {
        return None;
    }
    let unary = arrow.operand.as_ref();
    if !unary.ops.is_empty() {
        return None;
    }
    let simple_map: &SimpleMapExpr = unary.operand.as_ref();
    let path = match simple_map {
        SimpleMapExpr::Single(p) => p.as_ref(),
        _ => return None,
    };
    let relative = match path {
        PathExpr::Relative(r) => r,
        _ => return None,
    };
    if !relative.tail.is_empty() {
        return None;
    }
    let postfix = match &relative.head {
        StepExpr::Postfix(p) => p,
        _ => return None,
    };
    if !postfix.postfixes.is_empty() {
        return None;
    }
    Some(&postfix.primary)
}

fn as_string_literal(expr: &ExprSingle) -> Option<&str> {
    match unwrap_to_primary(expr)? {
        PrimaryExpr::Literal(crate::xpath31::ast::Literal::String(s)) => Some(s.as_str()),
        _ => None,
    }
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xpath31::parser::parse_xpath;

    #[test]
    fn test_step_names_and_function_call_names_are_used() {
        let ast = parse_xpath("p:a//p:b/p:c").unwrap();
        let names = find_used_eqnames(&ast);
        assert_eq!(names.len(), 3);
        let prefixes = find_used_prefixes(&ast, false, None);
        assert_eq!(prefixes.len(), 1);
        assert!(prefixes.contains("p"));
    }

    #[test]
    fn test_uri_qualified_name_contributes_no_prefix() {
        let ast = parse_xpath("Q{http://example.com/ns}local * 2").unwrap();
        let names = find_used_eqnames(&ast);
        assert_eq!(names.len(), 1);
        let prefixes = find_used_prefixes(&ast, false, None);
        assert!(prefixes.is_empty());
    }

    #[test]
    fn test_wildcard_prefix_included_only_when_requested() {
        let ast = parse_xpath("p:a/q:*").unwrap();
        assert_eq!(find_used_prefixes(&ast, false, None), ["p".to_string()].into());
        let with_wildcards = find_used_prefixes(&ast, true, None);
        assert!(with_wildcards.contains("p"));
        assert!(with_wildcards.contains("q"));
    }

    #[test]
    fn test_extra_extractor_hook_on_string_literal_function_args() {
        let ast = parse_xpath(
            "xfi:fact-has-explicit-dimension-value($v, xs:QName('venj-bw2-dim:X'), xs:QName('venj-bw2-dm:Y'))",
        )
        .unwrap();
        let without_hook = find_used_prefixes(&ast, false, None);
        assert_eq!(without_hook, ["xfi".to_string(), "xs".to_string()].into());

        let extractor = |local: &str, arg: &str| -> Vec<String> {
            if local == "QName" {
                arg.split_once(':').map(|(p, _)| p.to_string()).into_iter().collect()
            } else {
                Vec::new()
            }
        };
        let with_hook = find_used_prefixes(&ast, false, Some(&extractor));
        assert!(with_hook.contains("xfi"));
        assert!(with_hook.contains("xs"));
        assert!(with_hook.contains("venj-bw2-dim"));
        assert!(with_hook.contains("venj-bw2-dm"));
    }

    #[test]
    fn test_processing_instruction_name_is_used_but_not_a_prefix() {
        let ast = parse_xpath("//processing-instruction(xml-stylesheet)").unwrap();
        let names = find_used_eqnames(&ast);
        assert!(names.contains(&EQName::Unprefixed("xml-stylesheet".to_string())));
        assert!(find_used_prefixes(&ast, false, None).is_empty());
    }

    #[test]
    fn test_type_annotation_names_are_collected() {
        let ast = parse_xpath("$v instance of xs:integer").unwrap();
        let names = find_used_eqnames(&ast);
        assert!(names.iter().any(|n| n.local_name() == "integer"));
    }
}
