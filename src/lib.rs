//! just-mcp: expose justfile recipes as Model Context Protocol tools.
//!
//! Recipes are read from `just`, each parameter is mapped to a JSON Schema
//! property, and tool calls are turned back into positional arguments for
//! `just <recipe>`.

pub mod app;
#[cfg(test)]
mod app_test;
pub mod config;
pub mod executor;
pub mod justfile;
pub mod marshal;
pub mod mcp;
pub mod schema;
#[cfg(test)]
mod schema_test;
