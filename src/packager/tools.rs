//! External tool invocation.
//!
//! The icon patcher, the Android packager, and the web asset bundler are
//! opaque collaborators: the pipeline spawns them, blocks until they exit,
//! and treats any non-zero exit code as fatal. No timeout, no retries.

use super::error::{Error, Result};
use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};
use tokio::process::Command;

/// Builder for a single external tool run.
pub struct ToolCommand {
    program: PathBuf,
    command: Command,
}

impl ToolCommand {
    /// Prepares an invocation of `program`.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        let program = program.into();
        let command = Command::new(&program);
        Self { program, command }
    }

    /// Appends an argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.command.arg(arg);
        self
    }

    /// Sets an environment variable on the child only, leaving this process'
    /// environment untouched.
    pub fn env(mut self, key: impl AsRef<OsStr>, value: impl AsRef<OsStr>) -> Self {
        self.command.env(key, value);
        self
    }

    /// Sets the child's working directory.
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.command.current_dir(dir);
        self
    }

    /// Runs the tool and waits for it to exit.
    ///
    /// # Errors
    ///
    /// [`Error::CommandFailed`] if the process could not be spawned,
    /// [`Error::ToolFailed`] if it exited non-zero.
    pub async fn run(mut self) -> Result<()> {
        let tool = self.program.display().to_string();
        log::info!("Running {}...", tool);

        let status = self
            .command
            .status()
            .await
            .map_err(|error| Error::CommandFailed {
                command: tool.clone(),
                error,
            })?;

        if !status.success() {
            return Err(Error::ToolFailed { tool, status });
        }

        Ok(())
    }
}

/// Resolves an interpreter or tool on PATH.
pub fn find_on_path(name: &str) -> Result<PathBuf> {
    which::which(name).map_err(|e| Error::Generic(format!("{} not found on PATH: {}", name, e)))
}
