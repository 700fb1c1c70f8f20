//! Tool registry
//!
//! Maps tool names to their MCP definitions, compiled input validators and
//! handlers. Built once at startup and read-only afterwards.

use std::sync::Arc;

use indexmap::IndexMap;
use miette::Diagnostic;
use rmcp::model::Tool;
use serde_json::Value;
use thiserror::Error;

use crate::justfile::Recipe;
use crate::schema::{JsonObject, input_schema};

/// Name of the optional diagnostic tool.
pub const PWD_TOOL: &str = "pwd";

#[derive(Error, Diagnostic, Debug)]
pub enum ToolError {
    #[error("Invalid input schema for tool '{tool}': {message}")]
    #[diagnostic(code(just_mcp::registry::invalid_schema))]
    InvalidSchema { tool: String, message: String },
}

/// What a registered tool does when called.
#[derive(Debug, Clone)]
pub enum ToolHandler {
    /// Run a justfile recipe.
    Recipe(Recipe),
    /// Report the server's working directory.
    WorkingDirectory,
}

/// A tool definition together with its input validator.
#[derive(Clone)]
pub struct RegisteredTool {
    pub tool: Tool,
    pub handler: ToolHandler,
    validator: Arc<jsonschema::Validator>,
}

impl RegisteredTool {
    fn new(tool: Tool, handler: ToolHandler) -> Result<Self, ToolError> {
        let schema = Value::Object(tool.input_schema.as_ref().clone());
        let validator = jsonschema::validator_for(&schema).map_err(|e| ToolError::InvalidSchema {
            tool: tool.name.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            tool,
            handler,
            validator: Arc::new(validator),
        })
    }

    /// Check call arguments against the tool's input schema, returning every
    /// violation found.
    pub fn validate(&self, arguments: &JsonObject) -> Result<(), Vec<String>> {
        let instance = Value::Object(arguments.clone());
        let errors: Vec<String> = self
            .validator
            .iter_errors(&instance)
            .map(|error| error.to_string())
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// MCP tool definition for a recipe. Pure; no process is spawned.
pub fn recipe_tool(recipe: &Recipe) -> Tool {
    Tool::new(
        recipe.name.clone(),
        recipe.description(),
        Arc::new(input_schema(recipe)),
    )
}

/// MCP tool definition for the diagnostic working-directory tool.
pub fn pwd_tool() -> Tool {
    let mut schema = JsonObject::new();
    schema.insert("type".into(), Value::String("object".into()));
    schema.insert("properties".into(), Value::Object(JsonObject::new()));
    Tool::new(
        PWD_TOOL,
        "Show the server's current working directory and the justfile project directory",
        Arc::new(schema),
    )
}

/// Ordered, keyed set of tools.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: IndexMap<String, RegisteredTool>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the diagnostic tool (when enabled) followed by one tool per
    /// recipe.
    pub fn from_recipes(recipes: &[Recipe], enable_pwd_tool: bool) -> Result<Self, ToolError> {
        let mut registry = Self::new();
        if enable_pwd_tool {
            registry.register_pwd()?;
        }
        for recipe in recipes {
            registry.register_recipe(recipe)?;
        }
        Ok(registry)
    }

    pub fn register_recipe(&mut self, recipe: &Recipe) -> Result<(), ToolError> {
        let tool = RegisteredTool::new(recipe_tool(recipe), ToolHandler::Recipe(recipe.clone()))?;
        self.insert(tool);
        Ok(())
    }

    pub fn register_pwd(&mut self) -> Result<(), ToolError> {
        let tool = RegisteredTool::new(pwd_tool(), ToolHandler::WorkingDirectory)?;
        self.insert(tool);
        Ok(())
    }

    /// Later registrations replace earlier ones with the same name.
    fn insert(&mut self, tool: RegisteredTool) {
        let name = tool.tool.name.to_string();
        if self.tools.contains_key(&name) {
            tracing::warn!(tool = %name, "tool name registered twice, replacing earlier tool");
        }
        self.tools.insert(name, tool);
    }

    pub fn get(&self, name: &str) -> Option<&RegisteredTool> {
        self.tools.get(name)
    }

    /// Tool definitions in registration order.
    pub fn tools(&self) -> Vec<Tool> {
        self.tools.values().map(|entry| entry.tool.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
