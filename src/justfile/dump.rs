//! Parsing of `just --dump --dump-format json`.
//!
//! Only the parts of the dump that describe recipe signatures are read.
//! Bodies, settings, aliases and modules are ignored.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use super::just::JustError;
use super::model::{DefaultValue, Parameter, ParameterKind, Recipe};

/// Shape of the leading tag just writes when it serializes a non-literal
/// expression (`variable`, `call`, `concatenate`, ...). Any bare lowercase
/// word in that position is taken as a tag, so a tag added by a newer just
/// is still classified as an expression rather than a literal.
static EXPRESSION_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z_]*$").expect("expression tag pattern"));

#[derive(Debug, Deserialize)]
struct Dump {
    #[serde(default)]
    recipes: IndexMap<String, DumpRecipe>,
}

#[derive(Debug, Deserialize)]
struct DumpRecipe {
    #[serde(default)]
    doc: Option<String>,
    #[serde(default)]
    parameters: Vec<DumpParameter>,
    #[serde(default)]
    private: bool,
}

#[derive(Debug, Deserialize)]
struct DumpParameter {
    name: String,
    #[serde(default)]
    kind: ParameterKind,
    #[serde(default)]
    default: Option<Value>,
    #[serde(default)]
    export: bool,
}

/// Parse a JSON recipe dump into recipes, keeping the dump's recipe order.
pub fn parse_dump(json: &str) -> Result<Vec<Recipe>, JustError> {
    let dump: Dump = serde_json::from_str(json)?;

    Ok(dump
        .recipes
        .into_iter()
        .map(|(name, recipe)| Recipe {
            name,
            doc: recipe.doc,
            private: recipe.private,
            parameters: recipe
                .parameters
                .into_iter()
                .map(|parameter| Parameter {
                    default: classify_default(parameter.kind, parameter.default),
                    name: parameter.name,
                    kind: parameter.kind,
                    export: parameter.export,
                })
                .collect(),
        })
        .collect())
}

/// Decide whether a dumped default is a literal or an opaque expression.
///
/// just writes string literals as plain JSON strings and every other
/// expression as a tagged array (`["variable", "x"]`, `["call", ...]`).
/// An array of strings is only a literal for variadic parameters, and only
/// when its first element cannot be a tag.
pub fn classify_default(kind: ParameterKind, default: Option<Value>) -> DefaultValue {
    match default {
        None | Some(Value::Null) => DefaultValue::Absent,
        Some(Value::String(value)) => DefaultValue::Literal(value),
        Some(Value::Array(items)) if kind.is_variadic() && is_literal_sequence(&items) => {
            DefaultValue::LiteralSequence(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(value) => Some(value),
                        _ => None,
                    })
                    .collect(),
            )
        }
        Some(other) => DefaultValue::Expression(other.to_string()),
    }
}

fn is_literal_sequence(items: &[Value]) -> bool {
    let all_strings = items.iter().all(Value::is_string);
    let tagged = items
        .first()
        .and_then(Value::as_str)
        .is_some_and(|tag| EXPRESSION_TAG.is_match(tag));
    all_strings && !tagged
}
