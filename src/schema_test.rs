//! Tests for the parameter schema mapping, one per (kind, default) branch.

use crate::justfile::{DefaultValue, Parameter, ParameterKind, Recipe};
use crate::schema::{input_schema, parameter_schema};
use serde_json::json;

fn literal(value: &str) -> DefaultValue {
    DefaultValue::Literal(value.to_string())
}

fn sequence(values: &[&str]) -> DefaultValue {
    DefaultValue::LiteralSequence(values.iter().map(|v| v.to_string()).collect())
}

fn expression() -> DefaultValue {
    DefaultValue::Expression(r#"["call","arch"]"#.to_string())
}

#[test]
fn test_singular_without_default_is_required_string() {
    let schema = parameter_schema("deploy", &Parameter::new("target", ParameterKind::Singular));

    assert!(schema.required);
    assert_eq!(schema.node["type"], "string");
    assert!(schema.node.get("default").is_none());
    assert!(schema.description.contains("target"));
    assert!(schema.description.contains("deploy"));
}

#[test]
fn test_singular_with_literal_default_is_optional_string() {
    let parameter =
        Parameter::new("target", ParameterKind::Singular).with_default(literal("staging"));

    let schema = parameter_schema("deploy", &parameter);

    assert!(!schema.required);
    assert_eq!(schema.node["type"], "string");
    assert_eq!(schema.node["default"], "staging");
    assert!(schema.description.contains("Default: staging"));
}

#[test]
fn test_singular_with_expression_default_is_optional_string() {
    let parameter = Parameter::new("arch", ParameterKind::Singular).with_default(expression());

    let schema = parameter_schema("build", &parameter);

    assert!(!schema.required);
    assert_eq!(schema.node["type"], "string");
    assert!(schema.node.get("default").is_none());
    assert!(schema.description.contains("expression"));
    assert!(!schema.description.contains("call"));
}

#[test]
fn test_singular_with_sequence_default_falls_back_to_joined_string() {
    let parameter =
        Parameter::new("flags", ParameterKind::Singular).with_default(sequence(&["-a", "-b"]));

    let schema = parameter_schema("lint", &parameter);

    assert!(!schema.required);
    assert_eq!(schema.node["type"], "string");
    assert_eq!(schema.node["default"], "-a -b");
}

#[test]
fn test_plus_without_default_requires_non_empty_array() {
    let schema = parameter_schema(
        "test_minimum_variable",
        &Parameter::new("ARGS", ParameterKind::Plus),
    );

    assert!(schema.required);
    assert_eq!(schema.node["type"], "array");
    assert_eq!(schema.node["items"], json!({ "type": "string" }));
    assert_eq!(schema.node["minItems"], 1);
    assert!(schema.description.contains("one or more"));
}

#[test]
fn test_plus_with_literal_default_is_optional_array() {
    let parameter = Parameter::new("ARGS", ParameterKind::Plus).with_default(literal("--all"));

    let schema = parameter_schema("check", &parameter);

    assert!(!schema.required);
    assert_eq!(schema.node["type"], "array");
    assert!(schema.node.get("minItems").is_none());
    assert_eq!(schema.node["default"], json!(["--all"]));
    assert!(schema.description.contains("Default: --all"));
}

#[test]
fn test_plus_with_sequence_default_is_optional_array() {
    let parameter =
        Parameter::new("ARGS", ParameterKind::Plus).with_default(sequence(&["a", "b"]));

    let schema = parameter_schema("check", &parameter);

    assert!(!schema.required);
    assert_eq!(schema.node["default"], json!(["a", "b"]));
    assert!(schema.description.contains("Default: a b"));
}

#[test]
fn test_plus_with_expression_default_is_optional_array() {
    let parameter = Parameter::new("ARGS", ParameterKind::Plus).with_default(expression());

    let schema = parameter_schema("check", &parameter);

    assert!(!schema.required);
    assert_eq!(schema.node["type"], "array");
    assert!(schema.node.get("minItems").is_none());
    assert!(schema.description.contains("expression"));
}

#[test]
fn test_star_without_default_is_optional_array() {
    let schema = parameter_schema("test", &Parameter::new("test_files", ParameterKind::Star));

    assert!(!schema.required);
    assert_eq!(schema.node["type"], "array");
    assert_eq!(schema.node["items"]["type"], "string");
    assert!(schema.node.get("minItems").is_none());
    assert!(schema.description.contains("zero or more"));
}

#[test]
fn test_star_with_literal_default_is_optional_array() {
    let parameter = Parameter::new("FLAGS", ParameterKind::Star).with_default(literal("-v"));

    let schema = parameter_schema("lint", &parameter);

    assert!(!schema.required);
    assert_eq!(schema.node["default"], json!(["-v"]));
}

#[test]
fn test_star_with_expression_default_is_optional_array() {
    let parameter = Parameter::new("FLAGS", ParameterKind::Star).with_default(expression());

    let schema = parameter_schema("lint", &parameter);

    assert!(!schema.required);
    assert_eq!(schema.node["type"], "array");
}

#[test]
fn test_expression_default_is_never_required() {
    for kind in [
        ParameterKind::Singular,
        ParameterKind::Star,
        ParameterKind::Plus,
    ] {
        let parameter = Parameter::new("p", kind).with_default(expression());
        assert!(!parameter_schema("r", &parameter).required, "{kind:?}");
    }
}

#[test]
fn test_every_node_has_description() {
    let defaults = [
        DefaultValue::Absent,
        literal("x"),
        sequence(&["x", "y"]),
        expression(),
    ];
    for kind in [
        ParameterKind::Singular,
        ParameterKind::Star,
        ParameterKind::Plus,
    ] {
        for default in &defaults {
            let parameter = Parameter::new("p", kind).with_default(default.clone());
            let schema = parameter_schema("r", &parameter);
            assert!(!schema.description.is_empty());
            assert_eq!(schema.node["description"], schema.description.as_str());
        }
    }
}

#[test]
fn test_input_schema_preserves_declaration_order() {
    let recipe = Recipe::new("release")
        .with_parameter(Parameter::new("version", ParameterKind::Singular))
        .with_parameter(Parameter::new("arch", ParameterKind::Singular).with_default(expression()))
        .with_parameter(Parameter::new("ARGS", ParameterKind::Plus));

    let schema = input_schema(&recipe);

    assert_eq!(schema["type"], "object");
    let keys: Vec<&String> = schema["properties"].as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["version", "arch", "ARGS"]);
    assert_eq!(schema["required"], json!(["version", "ARGS"]));
}

#[test]
fn test_input_schema_omits_empty_required() {
    let recipe = Recipe::new("deploy").with_parameter(
        Parameter::new("target", ParameterKind::Singular).with_default(literal("staging")),
    );

    let schema = input_schema(&recipe);

    assert!(!schema.contains_key("required"));
    assert!(!schema.contains_key("additionalProperties"));
}

#[test]
fn test_input_schema_without_parameters() {
    let schema = input_schema(&Recipe::new("build"));

    assert_eq!(schema["properties"], json!({}));
}

#[test]
fn test_input_schema_is_deterministic() {
    let recipe = Recipe::new("test").with_parameter(Parameter::new("files", ParameterKind::Star));

    assert_eq!(input_schema(&recipe), input_schema(&recipe));
}
