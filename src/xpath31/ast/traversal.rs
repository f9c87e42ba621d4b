/*!
Generic tree traversal over the AST: a `Node::children` trait every
expression-bearing node implements, and the descendant-finding functions
built on top of it.

`Node` also exposes `as_any` so the scope-aware analyses in
[`crate::xpath31::analysis`] can recover the concrete node type behind a
trait object where generic child enumeration isn't enough (deciding which
constructs introduce a variable binding, or walking into a type annotation
that `children()` deliberately doesn't descend into).

Sequence/item/single types (`xpath31::ast::types`) are not part of this
traversal: XPath's type-annotation grammar never embeds an expression inside
a type, so there is nothing for `children()` to find there. The analysis
module walks into type annotations itself where it needs the names they
reference (`instance of xs:integer` still counts `xs:integer` as a used
name).

*/

use std::any::Any;
use std::fmt;

use crate::xpath31::ast::expr::*;
use crate::xpath31::ast::path::{AxisStep, PathExpr, Postfix, PostfixExpr, RelativePathExpr, StepExpr};
use crate::xpath31::ast::primary::{ArrayConstructor, KeySpecifier, PrimaryExpr};

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

pub trait Node: fmt::Debug {
    fn children(&self) -> Vec<AstNodeRef<'_>>;

    /// Recovers the concrete type behind this trait object, for analyses
    /// that need more than generic child enumeration.
    fn as_any(&self) -> &dyn Any;
}

/// A borrowed reference to some node in the tree, type-erased so that
/// traversal code can walk over the mix of concrete AST types uniformly.
#[derive(Copy, Clone)]
pub struct AstNodeRef<'a>(&'a dyn Node);

impl<'a> AstNodeRef<'a> {
    pub fn new(node: &'a dyn Node) -> Self {
        AstNodeRef(node)
    }

    pub fn node(&self) -> &'a dyn Node {
        self.0
    }
}

impl<'a> fmt::Debug for AstNodeRef<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<'a> std::ops::Deref for AstNodeRef<'a> {
    type Target = dyn Node + 'a;

    fn deref(&self) -> &Self::Target {
        self.0
    }
}

// ------------------------------------------------------------------------------------------------
// Public Functions
// ------------------------------------------------------------------------------------------------

pub fn children(node: &dyn Node) -> Vec<AstNodeRef<'_>> {
    node.children()
}

pub fn find_descendants<'a, P>(node: &'a dyn Node, pred: P) -> Vec<AstNodeRef<'a>>
where
    P: Fn(&dyn Node) -> bool,
{
    let mut out = Vec::new();
    collect_descendants(node, &pred, &mut out);
    out
}

pub fn find_first_descendant<'a, P>(node: &'a dyn Node, pred: P) -> Option<AstNodeRef<'a>>
where
    P: Fn(&dyn Node) -> bool,
{
    first_descendant(node, &pred)
}

pub fn find_descendants_or_self<'a, P>(node: &'a dyn Node, pred: P) -> Vec<AstNodeRef<'a>>
where
    P: Fn(&dyn Node) -> bool,
{
    let mut out = Vec::new();
    if pred(node) {
        out.push(AstNodeRef::new(node));
    }
    collect_descendants(node, &pred, &mut out);
    out
}

pub fn find_first_descendant_or_self<'a, P>(node: &'a dyn Node, pred: P) -> Option<AstNodeRef<'a>>
where
    P: Fn(&dyn Node) -> bool,
{
    if pred(node) {
        Some(AstNodeRef::new(node))
    } else {
        first_descendant(node, &pred)
    }
}

/// Like [`find_descendants`], but once a match is found its own descendants
/// are not searched — only the outermost matching nodes along each path are
/// reported.
pub fn find_topmost_descendants<'a, P>(node: &'a dyn Node, pred: P) -> Vec<AstNodeRef<'a>>
where
    P: Fn(&dyn Node) -> bool,
{
    let mut out = Vec::new();
    collect_topmost(node, &pred, &mut out);
    out
}

pub fn find_first_topmost_descendant<'a, P>(node: &'a dyn Node, pred: P) -> Option<AstNodeRef<'a>>
where
    P: Fn(&dyn Node) -> bool,
{
    first_topmost(node, &pred)
}

pub fn find_topmost_descendants_or_self<'a, P>(node: &'a dyn Node, pred: P) -> Vec<AstNodeRef<'a>>
where
    P: Fn(&dyn Node) -> bool,
{
    let mut out = Vec::new();
    if pred(node) {
        out.push(AstNodeRef::new(node));
    } else {
        collect_topmost(node, &pred, &mut out);
    }
    out
}

pub fn find_first_topmost_descendant_or_self<'a, P>(
    node: &'a dyn Node,
    pred: P,
) -> Option<AstNodeRef<'a>>
where
    P: Fn(&dyn Node) -> bool,
{
    if pred(node) {
        Some(AstNodeRef::new(node))
    } else {
        first_topmost(node, &pred)
    }
}

// ------------------------------------------------------------------------------------------------
// Private Functions
// ------------------------------------------------------------------------------------------------

fn collect_descendants<'a>(
    node: &'a dyn Node,
    pred: &dyn Fn(&dyn Node) -> bool,
    out: &mut Vec<AstNodeRef<'a>>,
) {
    for child in node.children() {
        let c = child.node();
        if pred(c) {
            out.push(AstNodeRef::new(c));
        }
        collect_descendants(c, pred, out);
    }
}

fn first_descendant<'a>(node: &'a dyn Node, pred: &dyn Fn(&dyn Node) -> bool) -> Option<AstNodeRef<'a>> {
    for child in node.children() {
        let c = child.node();
        if pred(c) {
            return Some(AstNodeRef::new(c));
        }
        if let Some(found) = first_descendant(c, pred) {
            return Some(found);
        }
    }
    None
}

fn collect_topmost<'a>(
    node: &'a dyn Node,
    pred: &dyn Fn(&dyn Node) -> bool,
    out: &mut Vec<AstNodeRef<'a>>,
) {
    for child in node.children() {
        let c = child.node();
        if pred(c) {
            out.push(AstNodeRef::new(c));
        } else {
            collect_topmost(c, pred, out);
        }
    }
}

fn first_topmost<'a>(node: &'a dyn Node, pred: &dyn Fn(&dyn Node) -> bool) -> Option<AstNodeRef<'a>> {
    for child in node.children() {
        let c = child.node();
        if pred(c) {
            return Some(AstNodeRef::new(c));
        }
        if let Some(found) = first_topmost(c, pred) {
            return Some(found);
        }
    }
    None
}

// ------------------------------------------------------------------------------------------------
// Implementations — top level & binding expressions
// ------------------------------------------------------------------------------------------------

impl Node for Expr {
    fn children(&self) -> Vec<AstNodeRef<'_>> {
        self.exprs.iter().map(|e| AstNodeRef::new(e)).collect()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Node for ExprSingle {
    fn children(&self) -> Vec<AstNodeRef<'_>> {
        match self {
            ExprSingle::For(e) => vec![AstNodeRef::new(e)],
            ExprSingle::Let(e) => vec![AstNodeRef::new(e)],
            ExprSingle::Quantified(e) => vec![AstNodeRef::new(e)],
            ExprSingle::If(e) => vec![AstNodeRef::new(e)],
            ExprSingle::Or(e) => vec![AstNodeRef::new(e)],
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Node for SimpleBinding {
    fn children(&self) -> Vec<AstNodeRef<'_>> {
        vec![AstNodeRef::new(self.expr.as_ref())]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Node for ForExpr {
    fn children(&self) -> Vec<AstNodeRef<'_>> {
        let mut out: Vec<AstNodeRef<'_>> = self.bindings.iter().map(AstNodeRef::new).collect();
        out.push(AstNodeRef::new(self.return_expr.as_ref()));
        out
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Node for LetExpr {
    fn children(&self) -> Vec<AstNodeRef<'_>> {
        let mut out: Vec<AstNodeRef<'_>> = self.bindings.iter().map(AstNodeRef::new).collect();
        out.push(AstNodeRef::new(self.return_expr.as_ref()));
        out
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Node for QuantifiedExpr {
    fn children(&self) -> Vec<AstNodeRef<'_>> {
        let mut out: Vec<AstNodeRef<'_>> = self.bindings.iter().map(AstNodeRef::new).collect();
        out.push(AstNodeRef::new(self.satisfies.as_ref()));
        out
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Node for IfExpr {
    fn children(&self) -> Vec<AstNodeRef<'_>> {
        vec![
            AstNodeRef::new(self.condition.as_ref()),
            AstNodeRef::new(self.then_branch.as_ref()),
            AstNodeRef::new(self.else_branch.as_ref()),
        ]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ------------------------------------------------------------------------------------------------
// Implementations — operator precedence chain
// ------------------------------------------------------------------------------------------------

impl Node for OrExpr {
    fn children(&self) -> Vec<AstNodeRef<'_>> {
        match self {
            OrExpr::Single(o) => vec![AstNodeRef::new(o.as_ref())],
            OrExpr::Compound { head, tail } => {
                let mut out = vec![AstNodeRef::new(head.as_ref())];
                out.extend(tail.iter().map(AstNodeRef::new));
                out
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Node for AndExpr {
    fn children(&self) -> Vec<AstNodeRef<'_>> {
        match self {
            AndExpr::Single(o) => vec![AstNodeRef::new(o.as_ref())],
            AndExpr::Compound { head, tail } => {
                let mut out = vec![AstNodeRef::new(head.as_ref())];
                out.extend(tail.iter().map(AstNodeRef::new));
                out
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Node for ComparisonExpr {
    fn children(&self) -> Vec<AstNodeRef<'_>> {
        let mut out = vec![AstNodeRef::new(self.left.as_ref())];
        if let Some((_, right)) = &self.op {
            out.push(AstNodeRef::new(right.as_ref()));
        }
        out
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Node for StringConcatExpr {
    fn children(&self) -> Vec<AstNodeRef<'_>> {
        match self {
            StringConcatExpr::Single(o) => vec![AstNodeRef::new(o.as_ref())],
            StringConcatExpr::Compound { head, tail } => {
                let mut out = vec![AstNodeRef::new(head.as_ref())];
                out.extend(tail.iter().map(AstNodeRef::new));
                out
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Node for RangeExpr {
    fn children(&self) -> Vec<AstNodeRef<'_>> {
        let mut out = vec![AstNodeRef::new(self.from.as_ref())];
        if let Some(to) = &self.to {
            out.push(AstNodeRef::new(to.as_ref()));
        }
        out
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Node for AdditiveExpr {
    fn children(&self) -> Vec<AstNodeRef<'_>> {
        match self {
            AdditiveExpr::Single(o) => vec![AstNodeRef::new(o.as_ref())],
            AdditiveExpr::Compound { head, tail } => {
                let mut out = vec![AstNodeRef::new(head.as_ref())];
                out.extend(tail.iter().map(|(_, o)| AstNodeRef::new(o)));
                out
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Node for MultiplicativeExpr {
    fn children(&self) -> Vec<AstNodeRef<'_>> {
        match self {
            MultiplicativeExpr::Single(o) => vec![AstNodeRef::new(o.as_ref())],
            MultiplicativeExpr::Compound { head, tail } => {
                let mut out = vec![AstNodeRef::new(head.as_ref())];
                out.extend(tail.iter().map(|(_, o)| AstNodeRef::new(o)));
                out
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Node for UnionExpr {
    fn children(&self) -> Vec<AstNodeRef<'_>> {
        match self {
            UnionExpr::Single(o) => vec![AstNodeRef::new(o.as_ref())],
            UnionExpr::Compound { head, tail } => {
                let mut out = vec![AstNodeRef::new(head.as_ref())];
                out.extend(tail.iter().map(AstNodeRef::new));
                out
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Node for IntersectExceptExpr {
    fn children(&self) -> Vec<AstNodeRef<'_>> {
        match self {
            IntersectExceptExpr::Single(o) => vec![AstNodeRef::new(o.as_ref())],
            IntersectExceptExpr::Compound { head, tail } => {
                let mut out = vec![AstNodeRef::new(head.as_ref())];
                out.extend(tail.iter().map(|(_, o)| AstNodeRef::new(o)));
                out
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Node for InstanceOfExpr {
    fn children(&self) -> Vec<AstNodeRef<'_>> {
        vec![AstNodeRef::new(self.operand.as_ref())]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Node for TreatExpr {
    fn children(&self) -> Vec<AstNodeRef<'_>> {
        vec![AstNodeRef::new(self.operand.as_ref())]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Node for CastableExpr {
    fn children(&self) -> Vec<AstNodeRef<'_>> {
        vec![AstNodeRef::new(self.operand.as_ref())]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Node for CastExpr {
    fn children(&self) -> Vec<AstNodeRef<'_>> {
        vec![AstNodeRef::new(self.operand.as_ref())]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Node for ArrowExpr {
    fn children(&self) -> Vec<AstNodeRef<'_>> {
        let mut out = vec![AstNodeRef::new(self.operand.as_ref())];
        for call in &self.calls {
            if let ArrowFunctionSpecifier::Parenthesized(e) = &call.specifier {
                out.push(AstNodeRef::new(e.as_ref()));
            }
            out.extend(call.args.iter().map(AstNodeRef::new));
        }
        out
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Node for UnaryExpr {
    fn children(&self) -> Vec<AstNodeRef<'_>> {
        vec![AstNodeRef::new(self.operand.as_ref())]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Node for SimpleMapExpr {
    fn children(&self) -> Vec<AstNodeRef<'_>> {
        match self {
            SimpleMapExpr::Single(o) => vec![AstNodeRef::new(o.as_ref())],
            SimpleMapExpr::Compound { head, tail } => {
                let mut out = vec![AstNodeRef::new(head.as_ref())];
                out.extend(tail.iter().map(AstNodeRef::new));
                out
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ------------------------------------------------------------------------------------------------
// Implementations — path & step expressions
// ------------------------------------------------------------------------------------------------

impl Node for PathExpr {
    fn children(&self) -> Vec<AstNodeRef<'_>> {
        match self {
            PathExpr::Root => Vec::new(),
            PathExpr::RootSlash(r) | PathExpr::RootDoubleSlash(r) | PathExpr::Relative(r) => {
                vec![AstNodeRef::new(r)]
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Node for RelativePathExpr {
    fn children(&self) -> Vec<AstNodeRef<'_>> {
        let mut out = vec![AstNodeRef::new(&self.head)];
        out.extend(self.tail.iter().map(|(_, s)| AstNodeRef::new(s)));
        out
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Node for StepExpr {
    fn children(&self) -> Vec<AstNodeRef<'_>> {
        match self {
            StepExpr::Postfix(p) => vec![AstNodeRef::new(p)],
            StepExpr::Axis(a) => vec![AstNodeRef::new(a)],
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Node for AxisStep {
    fn children(&self) -> Vec<AstNodeRef<'_>> {
        self.predicates.iter().map(AstNodeRef::new).collect()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Node for PostfixExpr {
    fn children(&self) -> Vec<AstNodeRef<'_>> {
        let mut out = vec![AstNodeRef::new(&self.primary)];
        for postfix in &self.postfixes {
            match postfix {
                Postfix::Predicate(e) => out.push(AstNodeRef::new(e)),
                Postfix::ArgumentList(args) => out.extend(args.iter().map(AstNodeRef::new)),
                Postfix::Lookup(ks) => out.push(AstNodeRef::new(ks)),
            }
        }
        out
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ------------------------------------------------------------------------------------------------
// Implementations — primary expressions
// ------------------------------------------------------------------------------------------------

impl Node for PrimaryExpr {
    fn children(&self) -> Vec<AstNodeRef<'_>> {
        match self {
            PrimaryExpr::Literal(_) | PrimaryExpr::VarRef(_) | PrimaryExpr::ContextItem => Vec::new(),
            PrimaryExpr::Parenthesized(inner) => {
                inner.iter().map(|e| AstNodeRef::new(e.as_ref())).collect()
            }
            PrimaryExpr::FunctionCall(call) => call.args.iter().map(AstNodeRef::new).collect(),
            PrimaryExpr::NamedFunctionRef(_) => Vec::new(),
            PrimaryExpr::InlineFunction(f) => {
                f.body.iter().map(|e| AstNodeRef::new(e.as_ref())).collect()
            }
            PrimaryExpr::MapConstructor(m) => m
                .entries
                .iter()
                .flat_map(|(k, v)| vec![AstNodeRef::new(k), AstNodeRef::new(v)])
                .collect(),
            PrimaryExpr::ArrayConstructor(a) => match a {
                ArrayConstructor::Square(items) => items.iter().map(AstNodeRef::new).collect(),
                ArrayConstructor::Curly(body) => {
                    body.iter().map(|e| AstNodeRef::new(e.as_ref())).collect()
                }
            },
            PrimaryExpr::UnaryLookup(ks) => vec![AstNodeRef::new(ks)],
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Node for KeySpecifier {
    fn children(&self) -> Vec<AstNodeRef<'_>> {
        match self {
            KeySpecifier::Parenthesized(e) => vec![AstNodeRef::new(e.as_ref())],
            _ => Vec::new(),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
