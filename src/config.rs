//! Process configuration.
//!
//! Every setting can be given as a flag or through its environment variable.
//! The result is collected once at startup into an immutable [`Config`].

use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::Parser;
use clap::builder::BoolishValueParser;
use miette::Diagnostic;
use thiserror::Error;

use crate::justfile::RecipeSource;

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("Failed to resolve current directory: {0}")]
    #[diagnostic(
        code(just_mcp::config::current_dir),
        help("Set JUST_PROJECT_DIR to the directory containing the justfile.")
    )]
    CurrentDir(#[source] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "just-mcp")]
#[command(author, version, about = "Expose justfile recipes as MCP tools over stdio", long_about = None)]
pub struct Cli {
    /// Directory containing the justfile (default: current directory)
    #[arg(long, env = "JUST_PROJECT_DIR")]
    pub project_dir: Option<PathBuf>,

    /// Comma-separated list of recipes to expose (default: all)
    #[arg(long, env = "JUST_RECIPES", value_delimiter = ',')]
    pub recipes: Vec<String>,

    /// Register the diagnostic `pwd` tool
    #[arg(long, env = "JUST_MCP_ENABLE_PWD", value_parser = BoolishValueParser::new())]
    pub enable_pwd_tool: bool,

    /// Print every tool schema as JSON and exit
    #[arg(long, env = "JUST_MCP_DUMP_SCHEMAS", value_parser = BoolishValueParser::new())]
    pub dump_schemas: bool,

    /// How recipes are read from just
    #[arg(long, env = "JUST_MCP_SOURCE", value_enum, default_value_t = RecipeSource::Dump)]
    pub source: RecipeSource,

    /// just executable to invoke
    #[arg(long, env = "JUST_BINARY", default_value = "just")]
    pub just_binary: String,

    /// POSIX shell used to run recipes (the user's `$SHELL` is not consulted)
    #[arg(long, env = "JUST_MCP_SHELL", default_value = "/bin/sh")]
    pub shell: String,

    /// Run the shell without `-l`
    #[arg(long, env = "JUST_MCP_NO_LOGIN_SHELL", value_parser = BoolishValueParser::new())]
    pub no_login_shell: bool,
}

impl Cli {
    /// Resolve defaults that depend on the process (current directory).
    pub fn into_config(self) -> Result<Config, ConfigError> {
        let project_dir = match self.project_dir {
            Some(dir) => dir,
            None => std::env::current_dir().map_err(ConfigError::CurrentDir)?,
        };

        Ok(Config {
            project_dir,
            allow_list: AllowList::from_names(self.recipes),
            enable_pwd_tool: self.enable_pwd_tool,
            dump_schemas: self.dump_schemas,
            source: self.source,
            just_binary: self.just_binary,
            shell: ShellConfig {
                program: self.shell,
                login: !self.no_login_shell,
            },
        })
    }
}

/// Shell used to launch `just` for recipe execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub program: String,
    /// Pass `-l` so the user's login profile (PATH etc.) is loaded.
    pub login: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            program: "/bin/sh".to_string(),
            login: true,
        }
    }
}

/// Set of recipe names to expose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowList(BTreeSet<String>);

impl AllowList {
    /// Build an allow-list from raw names. Blank entries are ignored and an
    /// empty result means no restriction.
    pub fn from_names<I, S>(names: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: BTreeSet<String> = names
            .into_iter()
            .map(|name| name.as_ref().trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
        (!names.is_empty()).then_some(Self(names))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Immutable process configuration, threaded explicitly into each component.
#[derive(Debug, Clone)]
pub struct Config {
    pub project_dir: PathBuf,
    pub allow_list: Option<AllowList>,
    pub enable_pwd_tool: bool,
    pub dump_schemas: bool,
    pub source: RecipeSource,
    pub just_binary: String,
    pub shell: ShellConfig,
}

impl Config {
    /// Parse flags and environment of the current process.
    pub fn load() -> Result<Self, ConfigError> {
        Cli::parse().into_config()
    }
}
