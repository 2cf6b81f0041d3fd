//! Recursive-descent parser tests

use datamodel::parser::{Annotation, is_fragment};
use datamodel::{FailureKind, SymbolKind, parse};
use rstest::rstest;

use crate::helpers::model_helpers::parse_ok;
use crate::helpers::source_fixtures::SARIF_LIKE;

fn body_kind(body: &str) -> SymbolKind {
    let grammar = parse_ok(&format!("grammar g; t: {body};"));
    grammar.productions().next().unwrap().child(1).kind()
}

// =============================================================================
// SHAPES
// =============================================================================

#[rstest]
#[case("a", SymbolKind::Identifier)]
#[case("'a'", SymbolKind::String)]
#[case("'a'..'z'", SymbolKind::CharacterRange)]
#[case("a b", SymbolKind::Group)]
#[case("a | b", SymbolKind::Alternation)]
#[case("a*", SymbolKind::ZeroOrMoreQuantifier)]
#[case("a+", SymbolKind::OneOrMoreQuantifier)]
#[case("a?", SymbolKind::ZeroOrOneQuantifier)]
#[case("(a)", SymbolKind::Identifier)]
#[case("((a b))", SymbolKind::Group)]
#[case("(a | b)*", SymbolKind::ZeroOrMoreQuantifier)]
fn test_body_shapes(#[case] body: &str, #[case] expected: SymbolKind) {
    assert_eq!(body_kind(body), expected);
}

#[test]
fn test_grammar_structure() {
    let grammar = parse_ok(SARIF_LIKE);
    assert_eq!(grammar.name(), "SarifLog");
    assert_eq!(grammar.root().kind(), SymbolKind::Grammar);
    assert_eq!(grammar.declaration().kind(), SymbolKind::GrammarDecl);

    let names: Vec<_> = grammar
        .productions()
        .map(|p| grammar.text_of(p.child(0)))
        .collect();
    assert_eq!(names.first(), Some(&"sarifLog"));
    assert_eq!(names.last(), Some(&"digit"));
    assert!(grammar.productions().all(|p| p.kind() == SymbolKind::Production));
}

#[test]
fn test_alternation_of_groups() {
    let grammar = parse_ok("grammar g; t: a b | c | d e f;");
    let body = grammar.productions().next().unwrap().child(1);
    let sizes: Vec<_> = body.children().iter().map(|g| g.children().len()).collect();
    assert_eq!(sizes, vec![2, 0, 3]);
    assert_eq!(body.child(1).kind(), SymbolKind::Identifier);
}

#[test]
fn test_node_spans_cover_consumed_tokens() {
    let grammar = parse_ok("grammar g; t: x (',' x)* ;");
    let production = grammar.productions().next().unwrap();
    assert_eq!(grammar.text_of(production), "t: x (',' x)* ;");
    assert_eq!(grammar.text_of(production.child(1)), "x (',' x)*");
}

#[rstest]
#[case("(y)*", "(y)*")]
#[case("('x')?", "('x')?")]
#[case("((y))+", "((y))+")]
#[case("x (y)", "x (y)")]
#[case("(y) x", "(y) x")]
#[case("(y) | z", "(y) | z")]
#[case("x ('a')", "x ('a')")]
fn test_parenthesized_leaves_are_covered_by_parent(#[case] body: &str, #[case] expected: &str) {
    let grammar = parse_ok(&format!("grammar g; t: {body};"));
    let production = grammar.productions().next().unwrap();
    assert_eq!(grammar.text_of(production.child(1)), expected);
}

#[test]
fn test_parenthesized_leaf_keeps_its_own_text() {
    let grammar = parse_ok("grammar g; t: (y) @name{Inner};");
    let production = grammar.productions().next().unwrap();
    let body = production.child(1);
    assert_eq!(body.kind(), SymbolKind::Identifier);
    assert_eq!(grammar.text_of(body), "y");
    assert_eq!(body.annotation("name").unwrap().value, "Inner");
    assert_eq!(grammar.text_of(production), "t: (y) @name{Inner};");
}

#[test]
fn test_fragment_productions_are_marked() {
    let grammar = parse_ok(SARIF_LIKE);
    let fragments: Vec<_> = grammar
        .productions()
        .filter(|p| is_fragment(p))
        .map(|p| grammar.text_of(p.child(0)))
        .collect();
    assert_eq!(fragments, vec!["digit"]);
}

#[test]
fn test_missing_child_is_empty_sentinel() {
    let grammar = parse_ok("grammar g; t: a;");
    let body = grammar.productions().next().unwrap().child(1);
    assert!(body.child(0).is_empty());
    assert_eq!(grammar.text_of(body.child(3)), "");
}

// =============================================================================
// ANNOTATIONS
// =============================================================================

#[test]
fn test_grammar_annotations_attach_to_name() {
    let grammar = parse_ok("@summary{top} grammar g @namespace{ A.B } @generateLocations;");
    assert_eq!(
        grammar.name_symbol().annotations(),
        [
            Annotation::new("summary", "top"),
            Annotation::new("namespace", "A.B"),
            Annotation::flag("generateLocations"),
        ]
    );
}

#[test]
fn test_production_annotations_attach_to_declaration() {
    let grammar = parse_ok("grammar g; @rootObject t @className{T}: a @name{A};");
    let production = grammar.productions().next().unwrap();
    let declaration = production.child(0);
    assert_eq!(declaration.kind(), SymbolKind::ProductionDecl);
    assert_eq!(
        declaration.annotations(),
        [Annotation::flag("rootObject"), Annotation::new("className", "T")]
    );
    assert_eq!(production.child(1).annotation("name").unwrap().value, "A");
}

#[test]
fn test_quantifier_annotations_attach_to_quantifier() {
    let grammar = parse_ok("grammar g; t: a @name{Inner}* @minItems{1};");
    let quantifier = grammar.productions().next().unwrap().child(1);
    assert_eq!(quantifier.annotations(), [Annotation::new("minItems", "1")]);
    assert_eq!(quantifier.child(0).annotations(), [Annotation::new("name", "Inner")]);
}

#[test]
fn test_parenthesized_annotations_attach_to_group() {
    let grammar = parse_ok("grammar g; t: (a b) @summary{pair} c;");
    let body = grammar.productions().next().unwrap().child(1);
    assert_eq!(body.child(0).kind(), SymbolKind::Group);
    assert_eq!(body.child(0).annotation("summary").unwrap().value, "pair");
    assert!(body.child(1).annotations().is_empty());
}

#[test]
fn test_trailing_annotations_are_discarded() {
    let grammar = parse_ok("grammar g; t: a; @orphan");
    let production = grammar.productions().next().unwrap();
    assert!(production.child(0).annotations().is_empty());
}

// =============================================================================
// FAILURES
// =============================================================================

#[rstest]
#[case("", FailureKind::UnexpectedEndOfInput { expected: "'grammar'".into() })]
#[case("lexer grammar g;", FailureKind::UnexpectedToken {
    found: "identifier 'lexer'".into(),
    expected: "'grammar'".into(),
})]
#[case("grammar g", FailureKind::UnexpectedEndOfInput { expected: "';'".into() })]
#[case("grammar g; t a;", FailureKind::UnexpectedToken {
    found: "identifier 'a'".into(),
    expected: "':'".into(),
})]
#[case("grammar g; t: a", FailureKind::UnexpectedEndOfInput { expected: "';'".into() })]
#[case("grammar g; t: ;", FailureKind::EmptyGroup)]
#[case("grammar g; t: (a;", FailureKind::UnexpectedToken {
    found: "';'".into(),
    expected: "')'".into(),
})]
#[case("grammar g; t: ();", FailureKind::EmptyGroup)]
#[case("grammar g; t: 'ab'..'z';", FailureKind::InvalidRangeEndpoint("'ab'".into()))]
#[case("grammar g; t: 'z'..'a';", FailureKind::RangeOutOfOrder {
    first: "'z'".into(),
    last: "'a'".into(),
})]
fn test_syntax_failures(#[case] text: &str, #[case] expected: FailureKind) {
    let failure = parse(text, None).unwrap_err();
    assert_eq!(failure.kind, expected);
}

#[test]
fn test_first_failure_aborts() {
    let failure = parse("grammar g; t: ; u: ;", None).unwrap_err();
    assert_eq!(failure.kind, FailureKind::EmptyGroup);
    assert_eq!(failure.column, 14);
}
