/*!
Sequence, item, and single types — the small type-annotation language used
in `instance of`, `treat as`, `castable as`, `cast as`, function signatures,
and typed parameters. None of this is resolved against a schema (an explicit
non-goal); these types are recorded as written.

*/

use crate::xpath31::ast::names::{EQName, KindTest};

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
pub enum SequenceType {
    EmptySequence,
    Item {
        item_type: ItemType,
        occurrence: Option<OccurrenceIndicator>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OccurrenceIndicator {
    ZeroOrOne,
    ZeroOrMore,
    OneOrMore,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ItemType {
    AnyItem,
    Kind(KindTest),
    Function(FunctionTest),
    Map(MapTest),
    Array(ArrayTest),
    AtomicOrUnion(EQName),
    Parenthesized(Box<ItemType>),
}

#[derive(Clone, Debug, PartialEq)]
pub enum FunctionTest {
    Any,
    Typed {
        params: Vec<SequenceType>,
        return_type: Box<SequenceType>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum MapTest {
    Any,
    Typed {
        key_type: EQName,
        value_type: Box<SequenceType>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum ArrayTest {
    Any,
    Typed(Box<SequenceType>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct SingleType {
    pub name: EQName,
    pub optional: bool,
}
