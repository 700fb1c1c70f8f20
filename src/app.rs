//! Startup pipeline shared by the binary and tests.
//!
//! Reads recipes once, applies the allow-list, and builds the tool registry.

use miette::Diagnostic;
use thiserror::Error;

use crate::config::Config;
use crate::justfile::{JustError, JustOps, filter_recipes, read_recipes};
use crate::mcp::{ToolError, ToolRegistry};

#[derive(Error, Diagnostic, Debug)]
pub enum AppError {
    #[error("Failed to read recipes: {0}")]
    #[diagnostic(code(just_mcp::app::recipes))]
    Recipes(#[from] JustError),

    #[error("Failed to register tools: {0}")]
    #[diagnostic(code(just_mcp::app::tools))]
    Tools(#[from] ToolError),

    #[error("Failed to serialize tool schemas: {0}")]
    #[diagnostic(code(just_mcp::app::serialize))]
    Serialize(#[from] serde_json::Error),
}

/// Read the justfile's recipes and register the exposed ones as tools.
pub fn build_registry(config: &Config, just: &impl JustOps) -> Result<ToolRegistry, AppError> {
    let recipes = read_recipes(just, config.source, &config.project_dir)?;
    tracing::info!(count = recipes.len(), source = ?config.source, "read recipes");

    let recipes = filter_recipes(recipes, config.allow_list.as_ref());
    let registry = ToolRegistry::from_recipes(&recipes, config.enable_pwd_tool)?;
    tracing::info!(tools = registry.len(), "registered tools");
    Ok(registry)
}

/// Pretty JSON array of every registered tool definition.
pub fn render_schemas(registry: &ToolRegistry) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(&registry.tools())?)
}
