//! Recipe parameter to JSON Schema mapping.
//!
//! Each parameter becomes one property of the tool's input object. The shape
//! depends on the parameter kind and on what kind of default it carries:
//!
//! | default      | singular          | star           | plus                        |
//! |--------------|-------------------|----------------|-----------------------------|
//! | absent       | required string   | optional array | required array, `minItems` 1 |
//! | literal      | optional string   | optional array | optional array              |
//! | expression   | optional string   | optional array | optional array              |
//!
//! Arrays always hold strings.

use serde_json::{Map, Value, json};

use crate::justfile::{DefaultValue, Parameter, ParameterKind, Recipe};

/// JSON object type used for tool schemas and arguments.
pub type JsonObject = Map<String, Value>;

/// Schema node synthesized for one parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSchema {
    /// JSON Schema for the property, including its `description`.
    pub node: Value,
    pub description: String,
    pub required: bool,
}

impl ParameterSchema {
    fn new(mut node: JsonObject, description: String, required: bool) -> Self {
        node.insert("description".into(), Value::String(description.clone()));
        Self {
            node: Value::Object(node),
            description,
            required,
        }
    }
}

/// Synthesize the schema node for `parameter` of recipe `recipe`.
pub fn parameter_schema(recipe: &str, parameter: &Parameter) -> ParameterSchema {
    let name = &parameter.name;

    match (&parameter.default, parameter.kind) {
        (DefaultValue::Expression(_), kind) => ParameterSchema::new(
            value_node(kind),
            format!(
                "{} Default: computed by just from an expression (not shown); omit to use it.",
                summary(recipe, name, kind)
            ),
            false,
        ),
        (DefaultValue::Absent, ParameterKind::Plus) => {
            let mut node = array_node();
            node.insert("minItems".into(), json!(1));
            ParameterSchema::new(node, summary(recipe, name, ParameterKind::Plus), true)
        }
        (DefaultValue::Absent, ParameterKind::Star) => ParameterSchema::new(
            array_node(),
            summary(recipe, name, ParameterKind::Star),
            false,
        ),
        (
            default @ (DefaultValue::Literal(_) | DefaultValue::LiteralSequence(_)),
            kind @ (ParameterKind::Plus | ParameterKind::Star),
        ) => {
            let values = default.literal_values().unwrap_or_default();
            let mut node = array_node();
            node.insert("default".into(), json!(values));
            ParameterSchema::new(
                node,
                format!("{} Default: {}.", summary(recipe, name, kind), values.join(" ")),
                false,
            )
        }
        (DefaultValue::Absent, ParameterKind::Singular) => ParameterSchema::new(
            string_node(),
            summary(recipe, name, ParameterKind::Singular),
            true,
        ),
        (DefaultValue::Literal(value), ParameterKind::Singular) => {
            let mut node = string_node();
            node.insert("default".into(), json!(value));
            ParameterSchema::new(
                node,
                format!(
                    "{} Default: {value}.",
                    summary(recipe, name, ParameterKind::Singular)
                ),
                false,
            )
        }
        // Sequence defaults are never produced for singular parameters; if one
        // slips through, expose it joined rather than inventing a shape.
        (DefaultValue::LiteralSequence(values), ParameterKind::Singular) => {
            let joined = values.join(" ");
            let mut node = string_node();
            node.insert("default".into(), json!(joined));
            ParameterSchema::new(
                node,
                format!(
                    "{} Default: {joined}.",
                    summary(recipe, name, ParameterKind::Singular)
                ),
                false,
            )
        }
    }
}

/// Build the tool input schema for a recipe. Properties follow declaration
/// order; `required` is omitted when nothing is required.
pub fn input_schema(recipe: &Recipe) -> JsonObject {
    let mut properties = JsonObject::new();
    let mut required = Vec::new();

    for parameter in &recipe.parameters {
        let schema = parameter_schema(&recipe.name, parameter);
        if schema.required {
            required.push(Value::String(parameter.name.clone()));
        }
        properties.insert(parameter.name.clone(), schema.node);
    }

    let mut schema = JsonObject::new();
    schema.insert("type".into(), json!("object"));
    schema.insert("properties".into(), Value::Object(properties));
    if !required.is_empty() {
        schema.insert("required".into(), Value::Array(required));
    }
    schema
}

fn summary(recipe: &str, parameter: &str, kind: ParameterKind) -> String {
    match kind {
        ParameterKind::Singular => format!("Parameter '{parameter}' of the {recipe} recipe."),
        ParameterKind::Star => {
            format!("Parameter '{parameter}' of the {recipe} recipe (zero or more values).")
        }
        ParameterKind::Plus => {
            format!("Parameter '{parameter}' of the {recipe} recipe (one or more values).")
        }
    }
}

fn value_node(kind: ParameterKind) -> JsonObject {
    if kind.is_variadic() {
        array_node()
    } else {
        string_node()
    }
}

fn string_node() -> JsonObject {
    let mut node = JsonObject::new();
    node.insert("type".into(), json!("string"));
    node
}

fn array_node() -> JsonObject {
    let mut node = JsonObject::new();
    node.insert("type".into(), json!("array"));
    node.insert("items".into(), json!({ "type": "string" }));
    node
}
