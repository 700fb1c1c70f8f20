//! just-mcp server binary.
//!
//! Reads the justfile's recipes once at startup and serves them as MCP tools
//! over stdio. Logs go to stderr; stdout carries the protocol.
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "just": { "command": "just-mcp", "env": { "JUST_PROJECT_DIR": "/path/to/project" } }
//!   }
//! }
//! ```

use just_mcp::app::{build_registry, render_schemas};
use just_mcp::config::Config;
use just_mcp::executor::RecipeExecutor;
use just_mcp::justfile::RealJust;
use just_mcp::mcp::McpServer;
use miette::{IntoDiagnostic, Result, WrapErr};
use rmcp::service::ServiceExt;
use rmcp::transport::io::stdio;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing subscriber with env filter, writing to stderr
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "just_mcp=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = Config::load()?;
    tracing::info!(
        project_dir = %config.project_dir.display(),
        source = ?config.source,
        allow_list = ?config.allow_list,
        pwd_tool = config.enable_pwd_tool,
        "starting just-mcp"
    );

    let just = RealJust::new(config.just_binary.clone());
    let registry = build_registry(&config, &just)
        .inspect_err(|e| tracing::error!(error = %e, "cannot load recipes, exiting"))?;

    if config.dump_schemas {
        println!("{}", render_schemas(&registry)?);
        return Ok(());
    }

    let server = McpServer::new(registry, RecipeExecutor::from_config(&config));

    tracing::info!("Serving on stdio");
    let service = server
        .serve(stdio())
        .await
        .into_diagnostic()
        .wrap_err("Failed to start MCP service")?;

    service.waiting().await.into_diagnostic()?;
    tracing::info!("Server shutdown complete");

    Ok(())
}
