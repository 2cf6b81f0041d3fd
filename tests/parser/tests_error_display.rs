//! Tests for failure display, rendering and error codes

use datamodel::{ErrorCode, FailureKind, parse};
use rstest::rstest;

#[test]
fn test_display_is_line_column_message() {
    let failure = parse("grammar g;\nt: a\n  | ;", None).unwrap_err();
    assert_eq!(failure.to_string(), "3:4: group must contain at least one element");
}

#[test]
fn test_render_includes_path_and_code() {
    let failure = parse("grammar g;\nt: 'b'..'a';", Some("grammars/test.g4")).unwrap_err();
    assert_eq!(
        failure.render(),
        "grammars/test.g4(2:3): E0205: character range 'b'..'a' is out of order"
    );
}

#[test]
fn test_render_without_path() {
    let failure = parse("grammar", None).unwrap_err();
    assert_eq!(
        failure.render(),
        "1:7: E0202: unexpected end of input, expected identifier"
    );
}

#[rstest]
#[case(FailureKind::UnrecognizedToken("$".into()), ErrorCode::E0101, "lexical")]
#[case(FailureKind::SourceTooLarge, ErrorCode::E0106, "lexical")]
#[case(FailureKind::EmptyGroup, ErrorCode::E0203, "syntax")]
#[case(FailureKind::UnrecognizedDataModel("t".into()), ErrorCode::E0301, "data model")]
#[case(FailureKind::DuplicateTypeName("t".into()), ErrorCode::E0307, "data model")]
#[case(
    FailureKind::InvalidAnnotationValue {
        name: "minimum".into(),
        value: "x".into(),
        expected: "an integer",
    },
    ErrorCode::E0401,
    "annotation"
)]
fn test_codes_and_categories(
    #[case] kind: FailureKind,
    #[case] code: ErrorCode,
    #[case] category: &str,
) {
    assert_eq!(kind.code(), code);
    assert_eq!(code.category(), category);
}

#[test]
fn test_duplicate_name_message_identifies_the_name() {
    let failure = datamodel::compile_grammar(
        "grammar g; t: a @name{Same} b @name{Same}; a: STRING; b: STRING;",
        &Default::default(),
    )
    .unwrap_err();
    assert_eq!(
        failure.kind.to_string(),
        "type 't' has more than one member with generated name 'Same'"
    );
}
