/*!
`Pairs -> AST` construction, one module per nonterminal family. Every
function here takes ownership of the `Pair` it was handed by its caller and
either returns the built node or panics with `expect`/`unreachable!` — never
a silent fallback — since a shape the grammar didn't produce is a bug in the
grammar or in this module, not a user-facing parse error.

*/

pub(crate) mod expr;
pub(crate) mod names;
pub(crate) mod path;
pub(crate) mod primary;
pub(crate) mod types;

// ------------------------------------------------------------------------------------------------
// Shared Functions
// ------------------------------------------------------------------------------------------------

/// Strips the surrounding quote characters from a `StringLiteral` token and
/// collapses its doubled-quote escape (`""` or `''`) to a single occurrence.
pub(crate) fn unescape_string_literal(raw: &str) -> String {
    let quote = raw.chars().next().expect("StringLiteral is never empty");
    let inner = &raw[1..raw.len() - 1];
    if quote == '"' {
        inner.replace("\"\"", "\"")
    } else {
        inner.replace("''", "'")
    }
}
