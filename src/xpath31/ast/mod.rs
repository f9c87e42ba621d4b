/*!
The untyped XPath 3.1 abstract syntax tree and the generic traversal over it.

No `Display`/serialization is implemented for any node beyond derived
`Debug`: printing the AST back to XPath text is an explicit non-goal of this
crate, unlike the teacher crate (which implements `Display`/`ToAbbrString`
everywhere, since its crate is partly about reserializing XPath).

*/

// ------------------------------------------------------------------------------------------------
// Modules
// ------------------------------------------------------------------------------------------------

pub mod expr;
pub mod names;
pub mod path;
pub mod primary;
pub mod traversal;
pub mod types;

pub use expr::*;
pub use names::{Axis, EQName, KindTest, NameOrWildcard, NameTest, NodeTest};
pub use path::{AxisStep, PathExpr, Postfix, PostfixExpr, RelativePathExpr, StepExpr, StepOperator};
pub use primary::{
    ArrayConstructor, FunctionCall, InlineFunctionExpr, KeySpecifier, Literal, MapConstructor,
    NamedFunctionRef, NumericLiteral, Param, PrimaryExpr,
};
pub use traversal::{
    children, find_descendants, find_descendants_or_self, find_first_descendant,
    find_first_descendant_or_self, find_first_topmost_descendant,
    find_first_topmost_descendant_or_self, find_topmost_descendants,
    find_topmost_descendants_or_self, AstNodeRef, Node,
};
