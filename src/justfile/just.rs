//! Access to the `just` executable.
//!
//! Recipe introspection goes through the [`JustOps`] trait so the readers can
//! be tested against canned output.

use miette::Diagnostic;
use std::path::Path;
use std::process::{Command, Output};
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

/// Errors that can occur while asking `just` for its recipes.
#[derive(Error, Diagnostic, Debug)]
pub enum JustError {
    #[error("just command failed: {0}")]
    #[diagnostic(code(just_mcp::just::command_failed))]
    CommandFailed(String),

    #[error("just returned non-zero exit code {code}: {output}")]
    #[diagnostic(
        code(just_mcp::just::non_zero_exit),
        help("Check that the project directory contains a valid justfile.")
    )]
    NonZeroExit { code: i32, output: String },

    #[error("just binary '{0}' not installed or not in PATH")]
    #[diagnostic(
        code(just_mcp::just::not_found),
        help("Install just or point JUST_BINARY at the executable.")
    )]
    JustNotFound(String),

    #[error("Invalid recipe dump: {0}")]
    #[diagnostic(code(just_mcp::just::invalid_dump))]
    InvalidDump(#[from] serde_json::Error),
}

/// Operations the recipe readers need from `just`. Can be mocked in tests.
#[cfg_attr(test, automock)]
pub trait JustOps {
    /// Full recipe model as JSON (`just --dump --dump-format json`).
    fn dump_json(&self, dir: &Path) -> Result<String, JustError>;

    /// Human-readable recipe listing (`just --list`).
    fn list(&self, dir: &Path) -> Result<String, JustError>;
}

/// Real implementation of [`JustOps`] using `std::process::Command`.
#[derive(Debug, Clone)]
pub struct RealJust {
    binary: String,
}

impl RealJust {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn run_just(&self, dir: &Path, args: &[&str]) -> Result<Output, JustError> {
        tracing::debug!(binary = %self.binary, ?args, dir = %dir.display(), "invoking just");
        Command::new(&self.binary)
            .args(args)
            .current_dir(dir)
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    JustError::JustNotFound(self.binary.clone())
                } else {
                    JustError::CommandFailed(e.to_string())
                }
            })
    }

    fn check_output(&self, output: Output) -> Result<String, JustError> {
        if output.status.success() {
            return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
        }

        let code = output.status.code().unwrap_or(-1);
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let combined = match (stdout.trim().is_empty(), stderr.trim().is_empty()) {
            (false, false) => format!("{}\n{}", stdout.trim_end(), stderr.trim_end()),
            (false, true) => stdout.trim_end().to_string(),
            _ => stderr.trim_end().to_string(),
        };
        Err(JustError::NonZeroExit {
            code,
            output: combined,
        })
    }
}

impl Default for RealJust {
    fn default() -> Self {
        Self::new("just")
    }
}

impl JustOps for RealJust {
    fn dump_json(&self, dir: &Path) -> Result<String, JustError> {
        let output = self.run_just(dir, &["--dump", "--dump-format", "json"])?;
        self.check_output(output)
    }

    fn list(&self, dir: &Path) -> Result<String, JustError> {
        let output = self.run_just(dir, &["--list"])?;
        self.check_output(output)
    }
}
