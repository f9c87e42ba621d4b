/*!
Static analyses over a parsed `XPath 3.1` expression tree: free/bound
variable classification and used-name collection. Nothing here evaluates
an expression or needs a document — every analysis is a pure function of
the AST.

*/

// ------------------------------------------------------------------------------------------------
// Modules
// ------------------------------------------------------------------------------------------------

mod names;
mod vars;

pub use names::{find_used_eqnames, find_used_prefixes};
pub use vars::{find_bound_variables, find_free_variables, VarRefOccurrence};
