//! MCP server implementation
//!
//! Serves the tool registry: `list_tools` returns the registered definitions
//! and `call_tool` validates arguments, marshals them and runs the recipe.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    model::{
        CallToolRequestParams, CallToolResult, Content, ListToolsResult, PaginatedRequestParams,
        ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
};
use serde_json::json;

use crate::executor::RecipeExecutor;
use crate::justfile::Recipe;
use crate::marshal::marshal_arguments;
use crate::schema::JsonObject;

use super::registry::{ToolHandler, ToolRegistry};

/// MCP server exposing justfile recipes as tools.
#[derive(Clone)]
pub struct McpServer {
    registry: Arc<ToolRegistry>,
    executor: Arc<RecipeExecutor>,
}

impl McpServer {
    pub fn new(registry: ToolRegistry, executor: RecipeExecutor) -> Self {
        Self {
            registry: Arc::new(registry),
            executor: Arc::new(executor),
        }
    }

    /// Dispatch a tool call by name.
    ///
    /// Unknown tools and arguments that violate the input schema are
    /// `invalid_params` errors. Spawn failures are `internal_error`s.
    pub async fn execute_tool(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, McpError> {
        let Some(entry) = self.registry.get(name) else {
            tracing::warn!(tool = name, "unknown tool requested");
            return Err(McpError::invalid_params(
                format!("Unknown tool: {name}"),
                None,
            ));
        };

        let arguments = arguments.unwrap_or_default();
        if let Err(errors) = entry.validate(&arguments) {
            tracing::info!(tool = name, ?errors, "rejected tool arguments");
            return Err(McpError::invalid_params(
                format!("Invalid arguments for {name}: {}", errors.join("; ")),
                Some(json!({ "errors": errors })),
            ));
        }

        match &entry.handler {
            ToolHandler::Recipe(recipe) => self.run_recipe(recipe, &arguments).await,
            ToolHandler::WorkingDirectory => self.working_directory(),
        }
    }

    async fn run_recipe(
        &self,
        recipe: &Recipe,
        arguments: &JsonObject,
    ) -> Result<CallToolResult, McpError> {
        let args = marshal_arguments(&recipe.parameters, arguments);
        tracing::info!(recipe = %recipe.name, "running recipe");
        tracing::debug!(recipe = %recipe.name, ?args, "marshalled arguments");

        let output = self
            .executor
            .run(&recipe.name, &args)
            .await
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        Ok(CallToolResult::success(vec![Content::text(output)]))
    }

    fn working_directory(&self) -> Result<CallToolResult, McpError> {
        let cwd = std::env::current_dir()
            .map_err(|e| McpError::internal_error(format!("pwd: {e}"), None))?;
        let text = format!(
            "{}\nProject directory: {}",
            cwd.display(),
            self.executor.project_dir().display()
        );
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build()).with_instructions(
            "just-mcp - Run justfile recipes. Each tool is one recipe; arguments map to \
             recipe parameters and the result is the combined output plus the exit code."
                .to_string(),
        )
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.registry.tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(tool = %request.name, "call_tool");
        self.execute_tool(&request.name, request.arguments).await
    }
}
