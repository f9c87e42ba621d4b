/*!
Primary expressions: literals, variable references, parenthesized
expressions, the context item, function calls and function items, map and
array constructors, and lookups.

*/

use crate::xpath31::ast::names::EQName;
use crate::xpath31::ast::types::SequenceType;
use crate::xpath31::ast::{Expr, ExprSingle};

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
pub enum PrimaryExpr {
    Literal(Literal),
    VarRef(EQName),
    /// `()` is `Parenthesized(None)`; `(1, 2)` is `Parenthesized(Some(..))`.
    Parenthesized(Option<Box<Expr>>),
    ContextItem,
    FunctionCall(FunctionCall),
    NamedFunctionRef(NamedFunctionRef),
    InlineFunction(InlineFunctionExpr),
    MapConstructor(MapConstructor),
    ArrayConstructor(ArrayConstructor),
    UnaryLookup(KeySpecifier),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Numeric(NumericLiteral),
    String(String),
}

/// Numeric literals are kept in their original lexical form rather than
/// parsed to a Rust number type: this crate never evaluates an expression,
/// so there is no need to risk precision loss or overflow on a literal this
/// large only to never use the parsed value.
#[derive(Clone, Debug, PartialEq)]
pub enum NumericLiteral {
    Integer(String),
    Decimal(String),
    Double(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct FunctionCall {
    pub name: EQName,
    pub args: Vec<ExprSingle>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NamedFunctionRef {
    pub name: EQName,
    pub arity: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InlineFunctionExpr {
    pub params: Vec<Param>,
    pub return_type: Option<SequenceType>,
    pub body: Option<Box<Expr>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub name: EQName,
    pub declared_type: Option<SequenceType>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MapConstructor {
    pub entries: Vec<(ExprSingle, ExprSingle)>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ArrayConstructor {
    Square(Vec<ExprSingle>),
    Curly(Option<Box<Expr>>),
}

#[derive(Clone, Debug, PartialEq)]
pub enum KeySpecifier {
    Name(String),
    Integer(String),
    Parenthesized(Box<Expr>),
    Wildcard,
}
