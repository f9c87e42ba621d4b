/*!
Builders for `EQName`, node tests, and axes — the names module's types.

*/

use crate::xpath31::ast::{Axis, EQName, KindTest, NameOrWildcard, NameTest, NodeTest};
use crate::xpath31::parser::build::unescape_string_literal;
use crate::xpath31::parser::Rule;
use pest::iterators::Pair;

// ------------------------------------------------------------------------------------------------
// Public Functions
// ------------------------------------------------------------------------------------------------

pub(crate) fn build_eqname(pair: Pair<Rule>) -> EQName {
    let inner = pair
        .into_inner()
        .next()
        .expect("EQName always contains a URIQualifiedName or QName");
    match inner.as_rule() {
        Rule::URIQualifiedName => build_uri_qualified_name(inner.as_str()),
        Rule::QName => build_qname(inner.as_str()),
        r => unreachable!("EQName inner rule was {:?}", r),
    }
}

pub(crate) fn build_forward_axis(pair: Pair<Rule>) -> Axis {
    match axis_keyword(pair.as_str()) {
        "child" => Axis::Child,
        "descendant-or-self" => Axis::DescendantOrSelf,
        "descendant" => Axis::Descendant,
        "attribute" => Axis::Attribute,
        "self" => Axis::Self_,
        "following-sibling" => Axis::FollowingSibling,
        "following" => Axis::Following,
        "namespace" => Axis::Namespace,
        kw => unreachable!("unexpected forward axis keyword {:?}", kw),
    }
}

pub(crate) fn build_reverse_axis(pair: Pair<Rule>) -> Axis {
    match axis_keyword(pair.as_str()) {
        "ancestor-or-self" => Axis::AncestorOrSelf,
        "ancestor" => Axis::Ancestor,
        "preceding-sibling" => Axis::PrecedingSibling,
        "preceding" => Axis::Preceding,
        "parent" => Axis::Parent,
        kw => unreachable!("unexpected reverse axis keyword {:?}", kw),
    }
}

pub(crate) fn build_node_test(pair: Pair<Rule>) -> NodeTest {
    let inner = pair
        .into_inner()
        .next()
        .expect("NodeTest always contains a KindTest or NameTest");
    match inner.as_rule() {
        Rule::KindTest => NodeTest::Kind(build_kind_test(inner)),
        Rule::NameTest => NodeTest::Name(build_name_test(inner)),
        r => unreachable!("NodeTest inner rule was {:?}", r),
    }
}

pub(crate) fn build_name_test(pair: Pair<Rule>) -> NameTest {
    let inner = pair
        .into_inner()
        .next()
        .expect("NameTest always contains a sub-production");
    match inner.as_rule() {
        Rule::PrefixWildcard => {
            let (prefix, _) = inner
                .as_str()
                .split_once(':')
                .expect("PrefixWildcard always contains ':'");
            NameTest::PrefixWildcard(prefix.to_string())
        }
        Rule::LocalWildcard => {
            let (_, local) = inner
                .as_str()
                .split_once(':')
                .expect("LocalWildcard always contains ':'");
            NameTest::LocalWildcard(local.to_string())
        }
        Rule::UriWildcard => NameTest::UriWildcard(extract_braced_uri(inner.as_str()).to_string()),
        Rule::Wildcard => NameTest::Wildcard,
        Rule::EQName => NameTest::Name(build_eqname(inner)),
        r => unreachable!("NameTest inner rule was {:?}", r),
    }
}

pub(crate) fn build_kind_test(pair: Pair<Rule>) -> KindTest {
    let inner = pair
        .into_inner()
        .next()
        .expect("KindTest always contains a sub-production");
    match inner.as_rule() {
        Rule::AnyKindTest => KindTest::AnyKind,
        Rule::TextTest => KindTest::Text,
        Rule::CommentTest => KindTest::Comment,
        Rule::NamespaceNodeTest => KindTest::NamespaceNode,
        Rule::PITest => build_pi_test(inner),
        Rule::DocumentTest => build_document_test(inner),
        Rule::AttributeTest => build_attribute_test(inner),
        Rule::SchemaAttributeTest => {
            let eqname_pair = inner
                .into_inner()
                .next()
                .expect("SchemaAttributeTest always names an EQName");
            KindTest::SchemaAttribute(build_eqname(eqname_pair))
        }
        Rule::ElementTest => build_element_test(inner),
        Rule::SchemaElementTest => {
            let eqname_pair = inner
                .into_inner()
                .next()
                .expect("SchemaElementTest always names an EQName");
            KindTest::SchemaElement(build_eqname(eqname_pair))
        }
        r => unreachable!("KindTest inner rule was {:?}", r),
    }
}

// ------------------------------------------------------------------------------------------------
// Private Functions
// ------------------------------------------------------------------------------------------------

fn axis_keyword(text: &str) -> &str {
    text.split("::")
        .next()
        .expect("axis text always contains '::'")
        .trim()
}

fn build_uri_qualified_name(text: &str) -> EQName {
    let uri = extract_braced_uri(text).to_string();
    let close = text.find('}').expect("BracedUriLiteral always has a closing brace");
    let local = text[close + 1..].to_string();
    EQName::UriQualified { uri, local }
}

fn build_qname(text: &str) -> EQName {
    match text.split_once(':') {
        Some((prefix, local)) => EQName::Prefixed {
            prefix: prefix.to_string(),
            local: local.to_string(),
        },
        None => EQName::Unprefixed(text.to_string()),
    }
}

fn extract_braced_uri(text: &str) -> &str {
    let start = text.find('{').expect("BracedUriLiteral always has an opening brace") + 1;
    let end = text.find('}').expect("BracedUriLiteral always has a closing brace");
    &text[start..end]
}

fn build_pi_test(pair: Pair<Rule>) -> KindTest {
    let name = pair.into_inner().next().map(|inner| match inner.as_rule() {
        Rule::NCName => inner.as_str().to_string(),
        Rule::StringLiteral => unescape_string_literal(inner.as_str()),
        r => unreachable!("PITest inner rule was {:?}", r),
    });
    KindTest::ProcessingInstruction(name)
}

fn build_document_test(pair: Pair<Rule>) -> KindTest {
    let inner = pair.into_inner().next().map(|p| match p.as_rule() {
        Rule::ElementTest => build_element_test(p),
        Rule::SchemaElementTest => {
            let eqname_pair = p
                .into_inner()
                .next()
                .expect("SchemaElementTest always names an EQName");
            KindTest::SchemaElement(build_eqname(eqname_pair))
        }
        r => unreachable!("DocumentTest inner rule was {:?}", r),
    });
    KindTest::Document(inner.map(Box::new))
}

fn build_attribute_test(pair: Pair<Rule>) -> KindTest {
    let mut inner = pair.into_inner();
    let name = inner.next().map(build_name_or_wildcard);
    let type_name = inner.next().map(|p| {
        build_eqname(
            p.into_inner()
                .next()
                .expect("TypeName always names an EQName"),
        )
    });
    KindTest::Attribute { name, type_name }
}

fn build_element_test(pair: Pair<Rule>) -> KindTest {
    let mut inner = pair.into_inner();
    let name = inner.next().map(build_name_or_wildcard);
    let mut type_name = None;
    let mut nillable = false;
    if let Some(p) = inner.next() {
        type_name = Some(build_eqname(
            p.into_inner()
                .next()
                .expect("TypeName always names an EQName"),
        ));
        nillable = inner.next().is_some();
    }
    KindTest::Element {
        name,
        type_name,
        nillable,
    }
}

/// Shared by `AttribNameOrWildcard` and `ElementNameOrWildcard`: both are
/// `{ "*" | EQName }`, where the bare `"*"` literal leaves no child pair.
fn build_name_or_wildcard(pair: Pair<Rule>) -> NameOrWildcard {
    match pair.into_inner().next() {
        Some(eqname_pair) => NameOrWildcard::Name(build_eqname(eqname_pair)),
        None => NameOrWildcard::Wildcard,
    }
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xpath31::parser::XPathParser;
    use pest::Parser;

    fn eqname(s: &str) -> EQName {
        let pair = XPathParser::parse(Rule::EQName, s).unwrap().next().unwrap();
        build_eqname(pair)
    }

    #[test]
    fn test_eqname_forms() {
        assert_eq!(eqname("local"), EQName::Unprefixed("local".to_string()));
        assert_eq!(
            eqname("p:local"),
            EQName::Prefixed {
                prefix: "p".to_string(),
                local: "local".to_string()
            }
        );
        assert_eq!(
            eqname("Q{http://example.com/ns}local"),
            EQName::UriQualified {
                uri: "http://example.com/ns".to_string(),
                local: "local".to_string()
            }
        );
    }
}
