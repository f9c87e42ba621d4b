/*!
Free and bound variable analysis.

A `VarRef` occurrence is bound if some enclosing `for`/`let`/quantified
binding or inline function parameter introduces its name at that point in
the tree, and free otherwise. Scope tracking needs to know exactly which
constructs introduce a binding and where its scope begins — a `for`
binding's own right-hand side must not see the variable it declares, but a
later binding in the same clause does — which the generic `Node::children`
walk doesn't express on its own. This module downcasts to the concrete
binding-bearing types via [`Node::as_any`] and threads an explicit scope
stack through its own recursion instead.

*/

use crate::xpath31::ast::{
    EQName, ForExpr, LetExpr, Node, PrimaryExpr, QuantifiedExpr, SimpleBinding,
};

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

/// A single `VarRef` occurrence, classified as free or bound by
/// [`find_free_variables`]/[`find_bound_variables`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VarRefOccurrence<'a> {
    pub name: &'a EQName,
}

// ------------------------------------------------------------------------------------------------
// Public Functions
// ------------------------------------------------------------------------------------------------

pub fn find_free_variables(node: &dyn Node) -> Vec<VarRefOccurrence<'_>> {
    let (free, _bound) = classify(node);
    free
}

pub fn find_bound_variables(node: &dyn Node) -> Vec<VarRefOccurrence<'_>> {
    let (_free, bound) = classify(node);
    bound
}

// ------------------------------------------------------------------------------------------------
// Private Functions
// ------------------------------------------------------------------------------------------------

fn classify(node: &dyn Node) -> (Vec<VarRefOccurrence<'_>>, Vec<VarRefOccurrence<'_>>) {
    let mut free = Vec::new();
    let mut bound = Vec::new();
    let mut scope = Vec::new();
    walk(node, &mut scope, &mut free, &mut bound);
    (free, bound)
}

fn walk<'a>(
    node: &'a dyn Node,
    scope: &mut Vec<&'a EQName>,
    free: &mut Vec<VarRefOccurrence<'a>>,
    bound: &mut Vec<VarRefOccurrence<'a>>,
) {
    if let Some(for_expr) = node.as_any().downcast_ref::<ForExpr>() {
        walk_bindings_then(&for_expr.bindings, for_expr.return_expr.as_ref(), scope, free, bound);
        return;
    }
    if let Some(let_expr) = node.as_any().downcast_ref::<LetExpr>() {
        walk_bindings_then(&let_expr.bindings, let_expr.return_expr.as_ref(), scope, free, bound);
        return;
    }
    if let Some(quantified) = node.as_any().downcast_ref::<QuantifiedExpr>() {
        walk_bindings_then(&quantified.bindings, quantified.satisfies.as_ref(), scope, free, bound);
        return;
    }
    if let Some(primary) = node.as_any().downcast_ref::<PrimaryExpr>() {
        match primary {
            PrimaryExpr::VarRef(name) => {
                if scope.contains(&name) {
                    bound.push(VarRefOccurrence { name });
                } else {
                    free.push(VarRefOccurrence { name });
                }
                return;
            }
            PrimaryExpr::InlineFunction(f) => {
                let mark = scope.len();
                scope.extend(f.params.iter().map(|p| &p.name));
                for child in node.children() {
                    walk(child.node(), scope, free, bound);
                }
                scope.truncate(mark);
                return;
            }
            _ => {}
        }
    }
    for child in node.children() {
        walk(child.node(), scope, free, bound);
    }
}

/// Shared by `for`/`let`/quantified binding clauses: each binding's own
/// right-hand side sees only the bindings before it, and the tail
/// (`return`/`satisfies` expression) sees all of them.
fn walk_bindings_then<'a>(
    bindings: &'a [SimpleBinding],
    tail: &'a dyn Node,
    scope: &mut Vec<&'a EQName>,
    free: &mut Vec<VarRefOccurrence<'a>>,
    bound: &mut Vec<VarRefOccurrence<'a>>,
) {
    let mark = scope.len();
    for binding in bindings {
        walk(binding.expr.as_ref(), scope, free, bound);
        scope.push(&binding.var);
    }
    walk(tail, scope, free, bound);
    scope.truncate(mark);
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xpath31::parser::parse_xpath;

    #[test]
    fn test_for_binding_rhs_does_not_see_its_own_variable() {
        let ast = parse_xpath("for $w in $w return $w").unwrap();
        let free = find_free_variables(&ast);
        let bound = find_bound_variables(&ast);
        assert_eq!(free.len(), 1);
        assert_eq!(bound.len(), 1);
    }

    #[test]
    fn test_inline_function_param_is_bound_only_in_body() {
        let ast = parse_xpath(
            "let $f := function($a) { starts-with($a, \"E\") } return local:filter((\"Ethel\"), $f)",
        )
        .unwrap();
        let free = find_free_variables(&ast);
        assert!(free.is_empty());
        let bound = find_bound_variables(&ast);
        let names: Vec<&str> = bound.iter().map(|o| o.name.local_name()).collect();
        assert!(names.contains(&"a"));
        assert!(names.contains(&"f"));
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn test_free_and_bound_partition_every_occurrence() {
        let ast = parse_xpath("for $w in //text() return ($w, $unbound)").unwrap();
        let free = find_free_variables(&ast);
        let bound = find_bound_variables(&ast);
        assert_eq!(free.len() + bound.len(), 2);
        assert_eq!(free.len(), 1);
        assert_eq!(bound.len(), 1);
    }
}
