//! tokenize → parse → compile → link → hoist

use datamodel::{
    CompileOptions, DataModelBuilder, DataModelMetadata, ErrorCode, GrammarSource,
    compile_and_hoist, compile_grammar, parse_grammar,
};

use crate::helpers::model_helpers::{get_type, parse_ok};
use crate::helpers::source_fixtures::SARIF_LIKE;

#[test]
fn test_compile_grammar_hoists_by_default() {
    let model = compile_grammar(SARIF_LIKE, &CompileOptions::default()).unwrap();
    assert!(!model.contains("runs"));

    let options = CompileOptions {
        hoist: false,
        ..Default::default()
    };
    let linked = compile_grammar(SARIF_LIKE, &options).unwrap();
    assert!(linked.contains("runs"));
}

#[test]
fn test_compile_and_hoist_returns_both_models() {
    let (linked, hoisted) = compile_and_hoist(SARIF_LIKE, Some("sarif.g4")).unwrap();
    assert!(linked.len() > hoisted.len());
    assert_eq!(linked.metadata(), hoisted.metadata());
}

#[test]
fn test_failures_carry_the_origin_path() {
    let failure = compile_and_hoist("grammar g;\nt: missing;", Some("broken.g4")).unwrap_err();
    assert_eq!(failure.code(), ErrorCode::E0308);
    assert_eq!(failure.path.as_deref(), Some("broken.g4"));
    assert_eq!(
        failure.render(),
        "broken.g4(2:3): E0308: member 'Missing' of type 't' references unknown type 'missing'"
    );
}

#[test]
fn test_builder_compiles_productions_one_at_a_time() {
    let grammar = parse_ok("grammar g; a: 'x'; b: a; c: b b;");
    let mut builder = DataModelBuilder::new(&grammar, DataModelMetadata::from_grammar(&grammar));
    for production in grammar.productions().take(2) {
        builder.compile_production(production).unwrap();
    }
    let model = builder.link().unwrap();
    assert!(model.contains("a") && model.contains("b"));
    assert!(!model.contains("c"));
}

#[test]
fn test_each_compilation_is_independent() {
    let source = GrammarSource::new("grammar g; t: STRING;").with_path("one.g4");
    let first = parse_grammar(source.clone()).unwrap();
    let second = parse_grammar(source).unwrap();
    assert_eq!(first, second);

    let options = CompileOptions::default();
    let a = datamodel::build_data_model(&first, &options).unwrap();
    let b = datamodel::build_data_model(&second, &options).unwrap();
    assert_eq!(a, b);
    assert_eq!(get_type(&a, "t").members.len(), 1);
}

#[cfg(feature = "serde")]
#[test]
fn test_model_serializes_to_json() {
    let model = compile_grammar(SARIF_LIKE, &CompileOptions::default()).unwrap();
    let json = serde_json::to_value(&model).unwrap();
    assert_eq!(json["metadata"]["name"], "SarifLog");
    assert_eq!(json["types"]["level"]["kind"], "Enum");

    let restored: datamodel::DataModel = serde_json::from_value(json).unwrap();
    assert_eq!(restored, model);
}
