//! Model Context Protocol (MCP) server implementation
//!
//! This module exposes justfile recipes as MCP tools served over stdio.
//!
//! # Architecture
//!
//! - **registry**: one tool per recipe (plus the optional `pwd` tool), each
//!   with its JSON Schema input definition and compiled validator
//! - **server**: `rmcp::ServerHandler` that lists the registry and dispatches
//!   calls to the recipe executor

pub mod registry;
pub mod server;

pub use registry::{PWD_TOOL, RegisteredTool, ToolError, ToolHandler, ToolRegistry, recipe_tool};
pub use server::McpServer;
