//! Leaf member extraction

use datamodel::{FailureKind, ToStringEntry};
use rstest::rstest;

use crate::helpers::model_helpers::{failure_kind, get_member, get_type, linked, member_shape};
use crate::helpers::source_fixtures::SARIF_LIKE;

fn leaf_shape(body: &str) -> Vec<(String, u32, bool)> {
    let model = linked(&format!("grammar g; t: {body}; item: STRING; other: NUMBER;"));
    member_shape(get_type(&model, "t"))
}

#[rstest]
#[case("item", 0, true)]
#[case("item?", 0, false)]
#[case("item*", 1, false)]
#[case("item+", 1, true)]
#[case("(item*)*", 2, false)]
#[case("(item+)?", 1, false)]
#[case("item ('・' item)*", 1, true)]
#[case("item? (',' item)*", 1, false)]
fn test_rank_and_required(#[case] body: &str, #[case] rank: u32, #[case] required: bool) {
    assert_eq!(leaf_shape(body), vec![("item".to_string(), rank, required)]);
}

#[test]
fn test_delimiter_is_recorded() {
    let model = linked("grammar g; list: item ('・' item)*; item: STRING;");
    let list = get_type(&model, "list");
    assert_eq!(list.members.len(), 1);
    assert_eq!(
        list.to_string_entries,
        vec![ToStringEntry::Member {
            member: 0,
            delimiter: Some("・".into())
        }]
    );
}

#[test]
fn test_delimited_list_requires_matching_names() {
    assert_eq!(
        failure_kind("grammar g; t: item (',' other)*; item: STRING; other: STRING;"),
        FailureKind::UnrecognizedDataModel("t".into())
    );
}

#[test]
fn test_delimited_list_followed_by_more_members() {
    assert_eq!(
        leaf_shape("'[' item (';' item)* ']' other?"),
        vec![("item".to_string(), 1, true), ("other".to_string(), 0, false)]
    );
}

#[test]
fn test_rendering_plan_interleaves_text_and_members() {
    let model = linked(SARIF_LIKE);
    let region = get_type(&model, "region");
    assert_eq!(
        region.to_string_entries,
        vec![
            ToStringEntry::Member {
                member: 0,
                delimiter: None
            },
            ToStringEntry::Text(":".into()),
            ToStringEntry::Member {
                member: 1,
                delimiter: None
            },
        ]
    );
    let message = get_type(&model, "message");
    assert_eq!(message.to_string_entries.first(), Some(&ToStringEntry::Text("\"".into())));
}

#[test]
fn test_member_names_and_constraints() {
    let model = linked(SARIF_LIKE);

    let logical = get_type(&model, "logicalLocation");
    let index = get_member(logical, "Index");
    assert_eq!(index.declared_name, "NUMBER");
    assert_eq!(index.serialized_name, "index");
    assert_eq!(index.minimum, Some(-1));
    assert!(!index.required);

    let taxon = get_type(&model, "taxon");
    let guid = get_member(taxon, "Guid");
    assert_eq!(guid.pattern.as_deref(), Some("^[0-9a-f-]+$"));
    assert_eq!(guid.argument_name, "guid");

    let log = get_type(&model, "sarifLog");
    assert_eq!(get_member(log, "Runs").min_items, Some(0));
    assert_eq!(get_member(log, "Version").declared_name, "version");
}

#[test]
fn test_type_override() {
    let model = linked("grammar g; t: when @type{DATETIME}; when: STRING;");
    let member = get_member(get_type(&model, "t"), "When");
    assert_eq!(member.declared_name, "DATETIME");
    assert_eq!(member.serialized_name, "when");
}

#[rstest]
#[case(
    "a @name{Same} b @name{Same}",
    FailureKind::DuplicateGeneratedName { type_name: "t".into(), name: "Same".into() }
)]
#[case(
    "a @serializedName{same} b @serializedName{same}",
    FailureKind::DuplicateSerializedName { type_name: "t".into(), name: "same".into() }
)]
#[case(
    "a @argumentName{same} b @argumentName{same}",
    FailureKind::DuplicateArgumentName { type_name: "t".into(), name: "same".into() }
)]
fn test_duplicate_member_names(#[case] body: &str, #[case] expected: FailureKind) {
    assert_eq!(
        failure_kind(&format!("grammar g; t: {body}; a: STRING; b: STRING;")),
        expected
    );
}

#[rstest]
#[case("a @minimum{ten}", "minimum")]
#[case("a* @minItems{-1}", "minItems")]
#[case("a* @uniqueItems{maybe}", "uniqueItems")]
fn test_invalid_annotation_values(#[case] body: &str, #[case] annotation: &str) {
    match failure_kind(&format!("grammar g; t: {body}; a: STRING;")) {
        FailureKind::InvalidAnnotationValue { name, .. } => assert_eq!(name, annotation),
        other => panic!("expected an invalid annotation value, got {other:?}"),
    }
}
