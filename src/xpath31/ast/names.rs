/*!
`EQName` and node-test types: the names module used across every other part
of the AST (mirrors the teacher's `model::select` holding `AxisSpecifier` and
`NodeTest` together, since both are needed everywhere a step appears).

*/

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

/// An expanded qualified name: unprefixed, lexically prefixed, or spelled
/// with a `Q{uri}local` URIQualifiedName.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EQName {
    Unprefixed(String),
    Prefixed { prefix: String, local: String },
    UriQualified { uri: String, local: String },
}

impl EQName {
    pub fn local_name(&self) -> &str {
        match self {
            EQName::Unprefixed(local) => local,
            EQName::Prefixed { local, .. } => local,
            EQName::UriQualified { local, .. } => local,
        }
    }

    /// The lexical prefix, if this name was written as a `QName` with one.
    /// `UriQualified` names carry a namespace URI, not a prefix, so this is
    /// `None` for them even though they are namespace-qualified.
    pub fn prefix(&self) -> Option<&str> {
        match self {
            EQName::Prefixed { prefix, .. } => Some(prefix),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    Child,
    Descendant,
    Attribute,
    Self_,
    DescendantOrSelf,
    FollowingSibling,
    Following,
    Namespace,
    Parent,
    Ancestor,
    PrecedingSibling,
    Preceding,
    AncestorOrSelf,
}

#[derive(Clone, Debug, PartialEq)]
pub enum NodeTest {
    Name(NameTest),
    Kind(KindTest),
}

#[derive(Clone, Debug, PartialEq)]
pub enum NameTest {
    Name(EQName),
    /// Bare `*`.
    Wildcard,
    /// `prefix:*`.
    PrefixWildcard(String),
    /// `*:local`.
    LocalWildcard(String),
    /// `Q{uri}*`.
    UriWildcard(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum NameOrWildcard {
    Wildcard,
    Name(EQName),
}

#[derive(Clone, Debug, PartialEq)]
pub enum KindTest {
    AnyKind,
    Text,
    Comment,
    NamespaceNode,
    /// `processing-instruction(Name?)`. Per this crate's documented quirk,
    /// `Name` is modeled as a bare `NCName` local part (never a full
    /// `EQName`), matching the one-argument-form production in the grammar.
    ProcessingInstruction(Option<String>),
    Document(Option<Box<KindTest>>),
    Attribute {
        name: Option<NameOrWildcard>,
        type_name: Option<EQName>,
    },
    SchemaAttribute(EQName),
    Element {
        name: Option<NameOrWildcard>,
        type_name: Option<EQName>,
        nillable: bool,
    },
    SchemaElement(EQName),
}
