//! Caller arguments to `just` command-line arguments.

use serde_json::Value;

use crate::justfile::Parameter;
use crate::schema::JsonObject;

/// Flatten a tool call's argument map into positional recipe arguments.
///
/// Arguments are emitted in the map's own key order, not declaration order.
/// Keys that name no parameter, and values of an unexpected shape, are
/// dropped without error; arrays are only expanded for variadic parameters.
pub fn marshal_arguments(parameters: &[Parameter], values: &JsonObject) -> Vec<String> {
    let mut args = Vec::new();

    for (key, value) in values {
        let Some(parameter) = parameters.iter().find(|parameter| parameter.name == *key) else {
            tracing::debug!(key = %key, "dropping unknown argument");
            continue;
        };

        match value {
            Value::Array(items) if parameter.kind.is_variadic() => {
                args.extend(items.iter().filter_map(Value::as_str).map(str::to_string));
            }
            Value::String(value) => args.push(value.clone()),
            _ => tracing::debug!(key = %key, "dropping argument with unexpected shape"),
        }
    }

    args
}
