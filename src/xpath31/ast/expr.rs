/*!
The full expression precedence chain, from the top-level comma `Expr` down
through `OrExpr` to `PathExpr`, plus the `for`/`let`/quantified/`if`
binding expressions.

Each precedence level is a tagged union with a `Single` pass-through variant
(so a one-operand expression allocates no extra wrapper beyond the `Box` all
levels share) and a `Compound` variant carrying the left-to-right operand
chain. This mirrors the chain of operator levels in the grammar one rule at
a time, so a mistake that mixes levels (for example, handing an
`AdditiveExpr` where a `PathExpr` is expected) is a compile error rather
than a runtime one.

*/

use crate::xpath31::ast::names::EQName;
use crate::xpath31::ast::path::PathExpr;
use crate::xpath31::ast::types::{SequenceType, SingleType};

// ------------------------------------------------------------------------------------------------
// Macros
// ------------------------------------------------------------------------------------------------

/// A left-to-right chain of operands joined by an operator whose identity
/// doesn't matter (`or`, `and`, `||`, `union`/`|`): only the list of operands
/// is retained.
macro_rules! uniform_chain {
    ($name:ident, $operand:ty) => {
        #[derive(Clone, Debug, PartialEq)]
        pub enum $name {
            Single(Box<$operand>),
            Compound {
                head: Box<$operand>,
                tail: Vec<$operand>,
            },
        }

        impl $name {
            pub fn new(head: $operand, tail: Vec<$operand>) -> Self {
                if tail.is_empty() {
                    $name::Single(Box::new(head))
                } else {
                    $name::Compound {
                        head: Box::new(head),
                        tail,
                    }
                }
            }
        }
    };
}

/// A left-to-right chain of operands where each step's operator must be kept
/// (`+`/`-`, `*`/`div`/`idiv`/`mod`, `intersect`/`except`).
macro_rules! op_chain {
    ($name:ident, $operand:ty, $op:ty) => {
        #[derive(Clone, Debug, PartialEq)]
        pub enum $name {
            Single(Box<$operand>),
            Compound {
                head: Box<$operand>,
                tail: Vec<($op, $operand)>,
            },
        }

        impl $name {
            pub fn new(head: $operand, tail: Vec<($op, $operand)>) -> Self {
                if tail.is_empty() {
                    $name::Single(Box::new(head))
                } else {
                    $name::Compound {
                        head: Box::new(head),
                        tail,
                    }
                }
            }
        }
    };
}

// ------------------------------------------------------------------------------------------------
// Public Types — top level
// ------------------------------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub exprs: Vec<ExprSingle>,
}

/// The result type of [`crate::parse_xpath`]; an `Expr` is exactly the
/// top-level comma-separated expression sequence.
pub type XPathExpr = Expr;

#[derive(Clone, Debug, PartialEq)]
pub enum ExprSingle {
    For(ForExpr),
    Let(LetExpr),
    Quantified(QuantifiedExpr),
    If(IfExpr),
    Or(OrExpr),
}

// ------------------------------------------------------------------------------------------------
// Public Types — binding expressions
// ------------------------------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
pub struct SimpleBinding {
    pub var: EQName,
    pub expr: Box<ExprSingle>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ForExpr {
    pub bindings: Vec<SimpleBinding>,
    pub return_expr: Box<ExprSingle>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LetExpr {
    pub bindings: Vec<SimpleBinding>,
    pub return_expr: Box<ExprSingle>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Quantifier {
    Some,
    Every,
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuantifiedExpr {
    pub quantifier: Quantifier,
    pub bindings: Vec<SimpleBinding>,
    pub satisfies: Box<ExprSingle>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IfExpr {
    pub condition: Box<Expr>,
    pub then_branch: Box<ExprSingle>,
    pub else_branch: Box<ExprSingle>,
}

// ------------------------------------------------------------------------------------------------
// Public Types — operator precedence chain
// ------------------------------------------------------------------------------------------------

uniform_chain!(OrExpr, AndExpr);
uniform_chain!(AndExpr, ComparisonExpr);

#[derive(Clone, Debug, PartialEq)]
pub struct ComparisonExpr {
    pub left: Box<StringConcatExpr>,
    pub op: Option<(ComparisonOp, Box<StringConcatExpr>)>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GeneralCompOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ValueCompOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NodeCompOp {
    Is,
    Precedes,
    Follows,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ComparisonOp {
    General(GeneralCompOp),
    Value(ValueCompOp),
    Node(NodeCompOp),
}

uniform_chain!(StringConcatExpr, RangeExpr);

#[derive(Clone, Debug, PartialEq)]
pub struct RangeExpr {
    pub from: Box<AdditiveExpr>,
    pub to: Option<Box<AdditiveExpr>>,
}

op_chain!(AdditiveExpr, MultiplicativeExpr, AdditiveOp);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AdditiveOp {
    Add,
    Subtract,
}

op_chain!(MultiplicativeExpr, UnionExpr, MultiplicativeOp);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MultiplicativeOp {
    Multiply,
    Divide,
    IntegerDivide,
    Modulus,
}

uniform_chain!(UnionExpr, IntersectExceptExpr);

op_chain!(IntersectExceptExpr, InstanceOfExpr, IntersectExceptOp);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IntersectExceptOp {
    Intersect,
    Except,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InstanceOfExpr {
    pub operand: Box<TreatExpr>,
    pub sequence_type: Option<SequenceType>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TreatExpr {
    pub operand: Box<CastableExpr>,
    pub sequence_type: Option<SequenceType>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CastableExpr {
    pub operand: Box<CastExpr>,
    pub single_type: Option<SingleType>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CastExpr {
    pub operand: Box<ArrowExpr>,
    pub single_type: Option<SingleType>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArrowExpr {
    pub operand: Box<UnaryExpr>,
    pub calls: Vec<ArrowCall>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArrowCall {
    pub specifier: ArrowFunctionSpecifier,
    pub args: Vec<ExprSingle>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ArrowFunctionSpecifier {
    Name(EQName),
    Var(EQName),
    Parenthesized(Box<Expr>),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Minus,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UnaryExpr {
    pub ops: Vec<UnaryOp>,
    pub operand: Box<ValueExpr>,
}

/// `ValueExpr` is a pure pass-through of `SimpleMapExpr` in the grammar; no
/// wrapper type is introduced for it.
pub type ValueExpr = SimpleMapExpr;

uniform_chain!(SimpleMapExpr, PathExpr);
