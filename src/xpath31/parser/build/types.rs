/*!
Builders for the sequence/item/single type-annotation language used by
`instance of`, `treat as`, `castable as`, `cast as`, function signatures, and
typed parameters.

*/

use crate::xpath31::ast::types::{
    ArrayTest, FunctionTest, ItemType, MapTest, OccurrenceIndicator, SequenceType, SingleType,
};
use crate::xpath31::parser::build::names;
use crate::xpath31::parser::Rule;
use pest::iterators::Pair;

// ------------------------------------------------------------------------------------------------
// Public Functions
// ------------------------------------------------------------------------------------------------

pub(crate) fn build_sequence_type(pair: Pair<Rule>) -> SequenceType {
    let mut inner = pair.into_inner();
    let first = inner
        .next()
        .expect("SequenceType always contains a sub-production");
    match first.as_rule() {
        Rule::EmptySequenceType => SequenceType::EmptySequence,
        Rule::ItemType => {
            let item_type = build_item_type(first);
            let occurrence = inner.next().map(build_occurrence_indicator);
            SequenceType::Item {
                item_type,
                occurrence,
            }
        }
        r => unreachable!("SequenceType inner rule was {:?}", r),
    }
}

pub(crate) fn build_single_type(pair: Pair<Rule>) -> SingleType {
    let mut inner = pair.into_inner();
    let atomic_pair = inner
        .next()
        .expect("SingleType always names an AtomicOrUnionType");
    let name = build_atomic_or_union_type(atomic_pair);
    let optional = inner.next().is_some();
    SingleType { name, optional }
}

// ------------------------------------------------------------------------------------------------
// Private Functions
// ------------------------------------------------------------------------------------------------

fn build_occurrence_indicator(pair: Pair<Rule>) -> OccurrenceIndicator {
    match pair.as_str() {
        "?" => OccurrenceIndicator::ZeroOrOne,
        "*" => OccurrenceIndicator::ZeroOrMore,
        "+" => OccurrenceIndicator::OneOrMore,
        s => unreachable!("unexpected OccurrenceIndicator text {:?}", s),
    }
}

fn build_atomic_or_union_type(pair: Pair<Rule>) -> crate::xpath31::ast::EQName {
    let eqname_pair = pair
        .into_inner()
        .next()
        .expect("AtomicOrUnionType always names an EQName");
    names::build_eqname(eqname_pair)
}

fn build_item_type(pair: Pair<Rule>) -> ItemType {
    let inner = pair
        .into_inner()
        .next()
        .expect("ItemType always contains a sub-production");
    match inner.as_rule() {
        Rule::KindTest => ItemType::Kind(names::build_kind_test(inner)),
        Rule::AnyItemTest => ItemType::AnyItem,
        Rule::FunctionTest => ItemType::Function(build_function_test(inner)),
        Rule::MapTest => ItemType::Map(build_map_test(inner)),
        Rule::ArrayTest => ItemType::Array(build_array_test(inner)),
        Rule::AtomicOrUnionType => ItemType::AtomicOrUnion(build_atomic_or_union_type(inner)),
        Rule::ParenthesizedItemType => {
            let item_pair = inner
                .into_inner()
                .next()
                .expect("ParenthesizedItemType always contains an ItemType");
            ItemType::Parenthesized(Box::new(build_item_type(item_pair)))
        }
        r => unreachable!("ItemType inner rule was {:?}", r),
    }
}

fn build_function_test(pair: Pair<Rule>) -> FunctionTest {
    let inner = pair
        .into_inner()
        .next()
        .expect("FunctionTest always contains a sub-production");
    match inner.as_rule() {
        Rule::AnyFunctionTest => FunctionTest::Any,
        Rule::TypedFunctionTest => {
            let mut sequence_types: Vec<SequenceType> =
                inner.into_inner().map(build_sequence_type).collect();
            let return_type = Box::new(
                sequence_types
                    .pop()
                    .expect("TypedFunctionTest always has a return SequenceType"),
            );
            FunctionTest::Typed {
                params: sequence_types,
                return_type,
            }
        }
        r => unreachable!("FunctionTest inner rule was {:?}", r),
    }
}

fn build_map_test(pair: Pair<Rule>) -> MapTest {
    let inner = pair
        .into_inner()
        .next()
        .expect("MapTest always contains a sub-production");
    match inner.as_rule() {
        Rule::AnyMapTest => MapTest::Any,
        Rule::TypedMapTest => {
            let mut inner = inner.into_inner();
            let key_type = build_atomic_or_union_type(
                inner
                    .next()
                    .expect("TypedMapTest always names a key AtomicOrUnionType"),
            );
            let value_type = Box::new(build_sequence_type(
                inner
                    .next()
                    .expect("TypedMapTest always has a value SequenceType"),
            ));
            MapTest::Typed {
                key_type,
                value_type,
            }
        }
        r => unreachable!("MapTest inner rule was {:?}", r),
    }
}

fn build_array_test(pair: Pair<Rule>) -> ArrayTest {
    let inner = pair
        .into_inner()
        .next()
        .expect("ArrayTest always contains a sub-production");
    match inner.as_rule() {
        Rule::AnyArrayTest => ArrayTest::Any,
        Rule::TypedArrayTest => {
            let seq_pair = inner
                .into_inner()
                .next()
                .expect("TypedArrayTest always contains a SequenceType");
            ArrayTest::Typed(Box::new(build_sequence_type(seq_pair)))
        }
        r => unreachable!("ArrayTest inner rule was {:?}", r),
    }
}
