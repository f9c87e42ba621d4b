use std::collections::BTreeSet;

use xpath31::analysis::{find_bound_variables, find_free_variables, find_used_eqnames, find_used_prefixes};
use xpath31::ast::{children, find_descendants, EQName, Node};
use xpath31::parse_xpath;

// ------------------------------------------------------------------------------------------------
// Scenario 1 — a lone "/"
// ------------------------------------------------------------------------------------------------

#[test]
fn test_lone_slash_parses_to_a_single_root_path_expression() {
    let ast = parse_xpath("/").unwrap();
    assert_eq!(ast.exprs.len(), 1);
    assert!(find_used_eqnames(&ast).is_empty());
    assert!(find_free_variables(&ast).is_empty());
}

// ------------------------------------------------------------------------------------------------
// Scenario 2 — a prefixed step chain
// ------------------------------------------------------------------------------------------------

#[test]
fn test_prefixed_step_chain_collects_every_step_name_and_prefix() {
    let ast = parse_xpath("/p:a//p:b/p:c").unwrap();
    let names = find_used_eqnames(&ast);
    assert_eq!(names.len(), 3);
    for n in &names {
        assert_eq!(n.prefix(), Some("p"));
    }
    let prefixes = find_used_prefixes(&ast, false, None);
    assert_eq!(prefixes, BTreeSet::from(["p".to_string()]));
}

// ------------------------------------------------------------------------------------------------
// Scenario 3 — let-bound inline function, free/bound partition
// ------------------------------------------------------------------------------------------------

#[test]
fn test_let_bound_inline_function_classifies_exactly_its_two_names_as_bound() {
    let ast = parse_xpath(
        "let $f := function($a) { starts-with($a, \"E\") } return local:filter((\"Ethel\", \"Lucy\"), $f)",
    )
    .unwrap();

    assert!(find_free_variables(&ast).is_empty());

    let bound = find_bound_variables(&ast);
    let mut bound_names: Vec<&str> = bound.iter().map(|o| o.name.local_name()).collect();
    bound_names.sort_unstable();
    assert_eq!(bound_names, vec!["a", "f"]);

    let prefixes = find_used_prefixes(&ast, false, None);
    assert_eq!(prefixes, BTreeSet::from(["local".to_string()]));
}

// ------------------------------------------------------------------------------------------------
// Scenario 4 — for-expression free variable
// ------------------------------------------------------------------------------------------------

#[test]
fn test_for_binding_excludes_its_own_variable_from_its_own_source_expression() {
    let ast = parse_xpath("for $w in //text()/tokenize(., ' ') return upper-case($w)").unwrap();

    let free = find_free_variables(&ast);
    assert!(free.is_empty());

    let bound = find_bound_variables(&ast);
    assert_eq!(bound.len(), 1);
    assert_eq!(bound[0].name.local_name(), "w");
}

// ------------------------------------------------------------------------------------------------
// Scenario 5 — Q{uri}local contributes no prefix
// ------------------------------------------------------------------------------------------------

#[test]
fn test_uri_qualified_name_is_a_used_name_with_no_prefix() {
    let ast = parse_xpath("Q{http://example.com/ns}local * 2").unwrap();
    let names = find_used_eqnames(&ast);
    assert_eq!(
        names,
        BTreeSet::from([EQName::UriQualified {
            uri: "http://example.com/ns".to_string(),
            local: "local".to_string(),
        }])
    );
    assert!(find_used_prefixes(&ast, false, None).is_empty());
}

// ------------------------------------------------------------------------------------------------
// Scenario 6 — a map constructor applied as a function
// ------------------------------------------------------------------------------------------------

#[test]
fn test_map_constructor_applied_as_a_function_has_no_free_variables() {
    let ast = parse_xpath("map { \"a\": 1, \"b\": 2 } (\"a\")").unwrap();
    assert!(find_free_variables(&ast).is_empty());
    assert!(find_used_eqnames(&ast).is_empty());
}

// ------------------------------------------------------------------------------------------------
// Scenario 7 — the extra_extractor hook over string-literal function arguments
// ------------------------------------------------------------------------------------------------

#[test]
fn test_extra_extractor_hook_folds_in_prefixes_from_string_literal_qnames() {
    let ast = parse_xpath(
        "xfi:fact-has-explicit-dimension-value($v, xs:QName('venj-bw2-dim:X'), xs:QName('venj-bw2-dm:Y'))",
    )
    .unwrap();

    let without_hook = find_used_prefixes(&ast, false, None);
    assert_eq!(
        without_hook,
        BTreeSet::from(["xfi".to_string(), "xs".to_string()])
    );

    let extractor = |local: &str, arg: &str| -> Vec<String> {
        if local == "QName" {
            arg.split_once(':')
                .map(|(prefix, _)| prefix.to_string())
                .into_iter()
                .collect()
        } else {
            Vec::new()
        }
    };
    let with_hook = find_used_prefixes(&ast, false, Some(&extractor));
    assert_eq!(
        with_hook,
        BTreeSet::from([
            "xfi".to_string(),
            "xs".to_string(),
            "venj-bw2-dim".to_string(),
            "venj-bw2-dm".to_string(),
        ])
    );
}

// ------------------------------------------------------------------------------------------------
// Boundary behaviors (spec.md §8)
// ------------------------------------------------------------------------------------------------

#[test]
fn test_empty_and_whitespace_only_input_are_rejected() {
    assert!(parse_xpath("").is_err());
    assert!(parse_xpath("   \t\n").is_err());
}

#[test]
fn test_double_slash_alone_is_rejected_but_dot_dot_succeeds() {
    assert!(parse_xpath("//").is_err());
    assert!(parse_xpath("..").is_ok());
}

#[test]
fn test_numeric_literal_boundary_forms() {
    assert!(parse_xpath("1.e2").is_ok());
    assert!(parse_xpath("1e2").is_ok());
    assert!(parse_xpath("1.2e-3").is_ok());
    assert!(parse_xpath(".1").is_ok());
    assert!(parse_xpath("1.").is_ok());
    // Two dots in a row is never a single decimal literal.
    assert!(parse_xpath("1..").is_err());
}

#[test]
fn test_trailing_input_is_rejected_even_when_a_prefix_would_parse() {
    assert!(parse_xpath("1 + 1 1").is_err());
    assert!(parse_xpath("/a/b extra").is_err());
}

#[test]
fn test_reserved_keywords_are_never_usable_as_unprefixed_function_names() {
    for name in ["if", "for", "let", "some", "every", "function", "map", "array"] {
        let input = format!("{}(1)", name);
        assert!(
            parse_xpath(&input).is_err(),
            "{:?} parsed as a function call but should have been rejected",
            input
        );
    }
}

// ------------------------------------------------------------------------------------------------
// Generic traversal (spec.md §4.3)
// ------------------------------------------------------------------------------------------------

#[test]
fn test_children_and_find_descendants_agree_on_function_call_arguments() {
    let ast = parse_xpath("concat('a', 'b', 'c')").unwrap();
    assert_eq!(children(&ast).len(), 1);

    let literals = find_descendants(&ast, |n: &dyn Node| {
        format!("{:?}", n).contains("Literal(String(")
    });
    assert_eq!(literals.len(), 3);
}
