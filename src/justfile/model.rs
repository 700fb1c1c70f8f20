//! Recipe and parameter types shared by the readers, the schema synthesizer
//! and the argument marshaller.

use serde::{Deserialize, Serialize};

/// How many values a recipe parameter accepts.
///
/// Serialized with the same tags `just --dump --dump-format json` uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    /// Exactly one value.
    #[default]
    Singular,
    /// Zero or more values (`*ARGS`).
    Star,
    /// One or more values (`+ARGS`).
    Plus,
}

impl ParameterKind {
    /// Whether the parameter collects a sequence of values.
    pub fn is_variadic(self) -> bool {
        matches!(self, Self::Star | Self::Plus)
    }
}

/// Default value of a recipe parameter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DefaultValue {
    /// No default; the caller must supply a value unless the kind allows none.
    #[default]
    Absent,
    /// A plain string literal.
    Literal(String),
    /// A sequence of string literals (variadic parameters only).
    LiteralSequence(Vec<String>),
    /// A default written in just's expression syntax. The payload is the
    /// source form as reported by just and is never evaluated here.
    Expression(String),
}

impl DefaultValue {
    /// Literal values in argument form, or `None` when there is no literal.
    pub fn literal_values(&self) -> Option<Vec<String>> {
        match self {
            Self::Literal(value) => Some(vec![value.clone()]),
            Self::LiteralSequence(values) => Some(values.clone()),
            Self::Absent | Self::Expression(_) => None,
        }
    }
}

/// One declared recipe parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub kind: ParameterKind,
    pub default: DefaultValue,
    /// Exported to the recipe as an environment variable (`$NAME`).
    pub export: bool,
}

impl Parameter {
    pub fn new(name: impl Into<String>, kind: ParameterKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: DefaultValue::Absent,
            export: false,
        }
    }

    pub fn with_default(mut self, default: DefaultValue) -> Self {
        self.default = default;
        self
    }

    pub fn exported(mut self) -> Self {
        self.export = true;
        self
    }
}

/// A named, invocable recipe from the justfile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub name: String,
    /// Doc comment attached to the recipe, if any.
    pub doc: Option<String>,
    /// Parameters in declaration order, which is also call-argument order.
    pub parameters: Vec<Parameter>,
    pub private: bool,
}

impl Recipe {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            parameters: Vec::new(),
            private: false,
        }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Tool description: the doc comment, or a generated fallback.
    pub fn description(&self) -> String {
        match self.doc.as_deref().map(str::trim) {
            Some(doc) if !doc.is_empty() => doc.to_string(),
            _ => format!("Run the {} recipe", self.name),
        }
    }
}
