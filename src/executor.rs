//! Recipe execution.
//!
//! Recipes run as `<shell> [-l] -c '<just> <recipe> "$@"' -- <args...>` in the
//! project directory. Argument values are only ever passed positionally, never
//! spliced into the command string.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use miette::Diagnostic;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::sync::mpsc;

use crate::config::{Config, ShellConfig};

const READ_CHUNK: usize = 8 * 1024;

#[derive(Error, Diagnostic, Debug)]
pub enum ExecError {
    #[error("{recipe}: {source}")]
    #[diagnostic(code(just_mcp::executor::spawn))]
    Spawn {
        recipe: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{recipe}: failed to wait for process: {source}")]
    #[diagnostic(code(just_mcp::executor::wait))]
    Wait {
        recipe: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{recipe}: {stream} was not captured")]
    #[diagnostic(code(just_mcp::executor::pipe))]
    MissingPipe { recipe: String, stream: &'static str },
}

/// Runs recipes through the configured shell and `just` binary.
#[derive(Debug, Clone)]
pub struct RecipeExecutor {
    project_dir: PathBuf,
    just_binary: String,
    shell: ShellConfig,
}

impl RecipeExecutor {
    pub fn new(
        project_dir: impl Into<PathBuf>,
        just_binary: impl Into<String>,
        shell: ShellConfig,
    ) -> Self {
        Self {
            project_dir: project_dir.into(),
            just_binary: just_binary.into(),
            shell,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.project_dir.clone(),
            config.just_binary.clone(),
            config.shell.clone(),
        )
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Command string handed to `<shell> -c`. The recipe name comes from
    /// just's own recipe list and is embedded as is.
    pub fn command_string(&self, recipe: &str) -> String {
        format!("{} {} \"$@\"", self.just_binary, recipe)
    }

    /// Run `recipe` with `args` and return combined stdout/stderr followed by
    /// a `Process exited with code <N>` line.
    ///
    /// A non-zero exit is reported in the output, not as an error. A `just`
    /// binary the shell cannot find is a spawn error.
    pub async fn run(&self, recipe: &str, args: &[String]) -> Result<String, ExecError> {
        self.ensure_runner(recipe).await?;

        let mut command = self.shell_command();
        command
            .arg("-c")
            .arg(self.command_string(recipe))
            .arg("--")
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        tracing::debug!(recipe, args = args.len(), "spawning recipe");
        let mut child = command.spawn().map_err(|source| ExecError::Spawn {
            recipe: recipe.to_string(),
            source,
        })?;

        let stdout = child.stdout.take().ok_or_else(|| ExecError::MissingPipe {
            recipe: recipe.to_string(),
            stream: "stdout",
        })?;
        let stderr = child.stderr.take().ok_or_else(|| ExecError::MissingPipe {
            recipe: recipe.to_string(),
            stream: "stderr",
        })?;

        // Both readers feed one channel; it closes once both hit EOF.
        let (tx, rx) = mpsc::unbounded_channel();
        let (_, _, combined) = tokio::join!(
            forward(recipe, "stdout", stdout, tx.clone()),
            forward(recipe, "stderr", stderr, tx),
            collect(rx),
        );

        let status = child.wait().await.map_err(|source| ExecError::Wait {
            recipe: recipe.to_string(),
            source,
        })?;
        let code = status.code().unwrap_or(-1);
        tracing::info!(recipe, code, "recipe finished");

        Ok(format!(
            "{}\nProcess exited with code {}",
            String::from_utf8_lossy(&combined),
            code
        ))
    }

    /// Resolve the `just` binary with `command -v` through the same shell
    /// and PATH the recipe will run with.
    async fn ensure_runner(&self, recipe: &str) -> Result<(), ExecError> {
        let status = self
            .shell_command()
            .arg("-c")
            .arg("command -v \"$1\"")
            .arg("--")
            .arg(&self.just_binary)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|source| ExecError::Spawn {
                recipe: recipe.to_string(),
                source,
            })?;

        if status.success() {
            return Ok(());
        }

        tracing::warn!(recipe, just = %self.just_binary, "just binary not found by shell");
        Err(ExecError::Spawn {
            recipe: recipe.to_string(),
            source: std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("just binary '{}' not found", self.just_binary),
            ),
        })
    }

    fn shell_command(&self) -> Command {
        let mut command = Command::new(&self.shell.program);
        if self.shell.login {
            command.arg("-l");
        }
        command.current_dir(&self.project_dir).stdin(Stdio::null());
        command
    }
}

async fn forward<R>(recipe: &str, stream: &str, mut reader: R, tx: mpsc::UnboundedSender<Vec<u8>>)
where
    R: AsyncRead + Unpin,
{
    let mut buf = vec![0u8; READ_CHUNK];
    loop {
        match reader.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => {
                if tx.send(buf[..n].to_vec()).is_err() {
                    break;
                }
            }
            Err(e) => {
                tracing::warn!(recipe, stream, error = %e, "failed reading recipe output");
                break;
            }
        }
    }
}

async fn collect(mut rx: mpsc::UnboundedReceiver<Vec<u8>>) -> Vec<u8> {
    let mut combined = Vec::new();
    while let Some(chunk) = rx.recv().await {
        combined.extend_from_slice(&chunk);
    }
    combined
}
