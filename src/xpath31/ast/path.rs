/*!
Path expressions: the `/`, `//`, and relative step chains, and the axis and
postfix steps they're built from.

Abbreviated forms are normalized away at construction time rather than kept
as a separate AST shape: `@name` becomes an explicit `Axis::Attribute` step
and `..` becomes an explicit `Axis::Parent` step over `KindTest::AnyKind`.
Since this crate never prints the AST back to text (an explicit non-goal),
nothing downstream needs to know which surface spelling produced a step —
only its semantics, which the explicit form already carries.

*/

use crate::xpath31::ast::names::{Axis, NodeTest};
use crate::xpath31::ast::primary::PrimaryExpr;
use crate::xpath31::ast::primary::KeySpecifier;
use crate::xpath31::ast::Expr;

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
pub enum PathExpr {
    /// A lone `/`.
    Root,
    /// `/` followed by a relative path.
    RootSlash(RelativePathExpr),
    /// `//` followed by a relative path (an implicit `descendant-or-self::node()` step).
    RootDoubleSlash(RelativePathExpr),
    /// No leading slash.
    Relative(RelativePathExpr),
}

#[derive(Clone, Debug, PartialEq)]
pub struct RelativePathExpr {
    pub head: StepExpr,
    pub tail: Vec<(StepOperator, StepExpr)>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepOperator {
    Slash,
    DoubleSlash,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StepExpr {
    Postfix(PostfixExpr),
    Axis(AxisStep),
}

#[derive(Clone, Debug, PartialEq)]
pub struct AxisStep {
    pub axis: Axis,
    pub node_test: NodeTest,
    pub predicates: Vec<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PostfixExpr {
    pub primary: PrimaryExpr,
    pub postfixes: Vec<Postfix>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Postfix {
    Predicate(Expr),
    ArgumentList(Vec<crate::xpath31::ast::ExprSingle>),
    Lookup(KeySpecifier),
}
