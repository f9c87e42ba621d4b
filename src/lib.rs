/*!
A static analyzer for XPath 3.1 expressions.

This crate parses an XPath 3.1 expression into an untyped abstract syntax
tree, offers generic traversal over that tree, and provides a handful of
scope-aware analyses over it: free and bound variable classification, and
used-name/used-prefix collection. It never evaluates an expression against
a document — there is no DOM, no node model, no function library, and no
facility to print an AST back out as XPath text.

# Example

```rust
use xpath31::{analysis, parse_xpath};

let ast = parse_xpath("for $w in //text() return $w").unwrap();
let free = analysis::find_free_variables(&ast);
assert!(free.is_empty());
```

*/

#[macro_use]
extern crate pest_derive;

// ------------------------------------------------------------------------------------------------
// Modules
// ------------------------------------------------------------------------------------------------

pub mod xpath31;

pub use xpath31::{analysis, ast, error::ParseError, parse_xpath};
