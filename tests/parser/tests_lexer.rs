//! Tokenizer tests

use datamodel::{FailureKind, GrammarSource, TokenKind, tokenize};
use rstest::rstest;

fn kinds(text: &str) -> Vec<TokenKind> {
    tokenize(&GrammarSource::new(text))
        .unwrap()
        .iter()
        .map(|t| t.kind)
        .collect()
}

#[rstest]
#[case("|", TokenKind::Pipe)]
#[case(";", TokenKind::Semicolon)]
#[case(":", TokenKind::Colon)]
#[case("*", TokenKind::Star)]
#[case("+", TokenKind::Plus)]
#[case("?", TokenKind::Question)]
#[case("(", TokenKind::LParen)]
#[case(")", TokenKind::RParen)]
#[case("..", TokenKind::Dots)]
#[case("name_1", TokenKind::Identifier)]
#[case("'x'", TokenKind::String)]
#[case("'\\''", TokenKind::String)]
#[case("@summary", TokenKind::Annotation)]
fn test_single_token_kinds(#[case] text: &str, #[case] expected: TokenKind) {
    assert_eq!(kinds(text), vec![expected]);
}

#[test]
fn test_tokens_cover_delimiters() {
    let source = GrammarSource::new("a: 'xy' @name{ N };");
    let tokens = tokenize(&source).unwrap();
    let texts: Vec<_> = tokens.iter().map(|t| t.text(&source)).collect();
    assert_eq!(texts, vec!["a", ":", "'xy'", "@name", "{ N }", ";"]);
    let offsets: Vec<u32> = tokens.iter().map(|t| t.offset().into()).collect();
    assert_eq!(offsets, vec![0, 1, 3, 8, 13, 18]);
}

#[test]
fn test_comments_and_whitespace_are_discarded() {
    assert_eq!(
        kinds("// header\ngrammar /* inline */ g ;\n\t// trailing"),
        vec![
            TokenKind::Identifier,
            TokenKind::Identifier,
            TokenKind::Semicolon
        ]
    );
}

#[test]
fn test_range_is_tokenized_as_three_tokens() {
    assert_eq!(
        kinds("'a'..'z'"),
        vec![TokenKind::String, TokenKind::Dots, TokenKind::String]
    );
}

#[rstest]
#[case("a # b", FailureKind::UnrecognizedToken("#".into()), (1, 2))]
#[case("a\n'open", FailureKind::UnterminatedString, (2, 0))]
#[case("a /* never closed", FailureKind::UnterminatedComment, (1, 2))]
#[case("@name{ never closed", FailureKind::UnterminatedAnnotationValue, (1, 5))]
#[case("a {value}", FailureKind::OrphanAnnotationValue, (1, 2))]
fn test_lexical_failures(
    #[case] text: &str,
    #[case] expected: FailureKind,
    #[case] location: (u32, u32),
) {
    let failure = tokenize(&GrammarSource::new(text)).unwrap_err();
    assert_eq!(failure.kind, expected);
    assert_eq!((failure.line, failure.column), location);
}

#[test]
fn test_tokens_from_different_sources_are_distinct() {
    let alpha = GrammarSource::new("alpha");
    let omega = GrammarSource::new("omega");
    let from_alpha = tokenize(&alpha).unwrap()[0];
    let from_omega = tokenize(&omega).unwrap()[0];
    assert_eq!(from_alpha.range, from_omega.range);
    assert_eq!(from_alpha.kind, from_omega.kind);
    assert_ne!(from_alpha, from_omega);
}

#[test]
fn test_tokens_from_a_cloned_source_are_equal() {
    let source = GrammarSource::new("alpha");
    let clone = source.clone();
    assert!(source.same_source(&clone));
    assert_eq!(tokenize(&source).unwrap(), tokenize(&clone).unwrap());
}

#[test]
fn test_same_text_in_two_sources_is_not_the_same_source() {
    let first = GrammarSource::new("grammar g;");
    let second = GrammarSource::new("grammar g;");
    assert!(!first.same_source(&second));
    assert_ne!(tokenize(&first).unwrap(), tokenize(&second).unwrap());
}
