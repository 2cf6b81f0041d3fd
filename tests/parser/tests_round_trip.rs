//! Printing syntax trees back to grammar text

use datamodel::parser::GrammarSymbol;
use datamodel::{GrammarSource, SymbolKind, TokenKind, tokenize};
use rstest::rstest;

use crate::helpers::model_helpers::parse_ok;
use crate::helpers::source_fixtures::{BASE_TYPE, LOCATIONS, SARIF_LIKE};

/// Kinds and nesting of a tree, ignoring token positions.
#[derive(Debug, PartialEq)]
struct Shape {
    kind: SymbolKind,
    annotations: Vec<(String, String)>,
    children: Vec<Shape>,
}

fn shape(symbol: &GrammarSymbol) -> Shape {
    Shape {
        kind: symbol.kind(),
        annotations: symbol
            .annotations()
            .iter()
            .map(|a| (a.name.to_string(), a.value.clone()))
            .collect(),
        children: symbol.children().iter().map(shape).collect(),
    }
}

fn token_kinds(text: &str) -> Vec<TokenKind> {
    tokenize(&GrammarSource::new(text))
        .unwrap()
        .iter()
        .map(|t| t.kind)
        .collect()
}

#[rstest]
#[case("a")]
#[case("a b c")]
#[case("a | b | c")]
#[case("a* b+ c?")]
#[case("(a b)*")]
#[case("(a | b) c")]
#[case("a | (b | c)")]
#[case("x (',' x)*")]
#[case("x? @name{X} (',' x)* @minItems{1}")]
#[case("'a'..'z' | '_'")]
#[case("(a*)+")]
#[case("(a b) @summary{pair}")]
fn test_body_round_trip(#[case] body: &str) {
    let original = parse_ok(&format!("grammar g; t: {body};"));
    let printed = original.print();
    let reparsed = parse_ok(&printed);
    assert_eq!(
        shape(original.root()),
        shape(reparsed.root()),
        "printed: {printed}"
    );
    assert_eq!(reparsed.print(), printed, "printing is stable");
}

#[rstest]
#[case(SARIF_LIKE)]
#[case(BASE_TYPE)]
#[case(LOCATIONS)]
fn test_fixture_round_trip(#[case] text: &str) {
    let original = parse_ok(text);
    let reparsed = parse_ok(&original.print());
    assert_eq!(shape(original.root()), shape(reparsed.root()));
}

#[test]
fn test_printed_production_tokens_match_span() {
    let grammar = parse_ok("grammar g; t:   a   ( ','a )*;");
    let production = grammar.productions().next().unwrap();
    let printed = production.print(grammar.source());
    assert_eq!(printed, "t: a (',' a)*;");
    assert_eq!(token_kinds(&printed), token_kinds(grammar.text_of(production)));
}

#[test]
fn test_fragment_keyword_is_printed() {
    let grammar = parse_ok("grammar g; fragment digit: '0'..'9';");
    assert_eq!(grammar.print(), "grammar g;\nfragment digit: '0'..'9';");
}
