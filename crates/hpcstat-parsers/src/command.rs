//! Command execution utilities for scheduler queries.

use std::ffi::OsStr;
use std::future::Future;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::process::Command;

/// Error type for command execution.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("{command} not found in PATH")]
    NotFound { command: String },
    #[error("Failed to execute {command}: {error}")]
    Execution { command: String, error: String },
}

/// Captured result of one process invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    /// Exit code, if the process was not terminated by a signal.
    pub code: Option<i32>,
}

impl CommandOutput {
    /// Successful output with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            success: true,
            code: Some(0),
        }
    }

    /// Failed output with the given stderr and exit code 1.
    pub fn failed(stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            success: false,
            code: Some(1),
        }
    }
}

/// Runs external programs on behalf of scheduler queries.
///
/// Production code uses [`SystemRunner`]; tests substitute a scripted runner.
pub trait CommandRunner {
    /// Resolve `program` to an executable path.
    fn locate(&self, program: &str) -> Result<PathBuf, CommandError>;

    /// Run `program` to completion and capture its output.
    ///
    /// A non-zero exit status is reported through [`CommandOutput::success`],
    /// not as an error. Errors mean the process could not be started at all.
    fn run(
        &self,
        program: &Path,
        args: &[String],
    ) -> impl Future<Output = Result<CommandOutput, CommandError>> + Send;
}

/// Runner backed by the host `PATH` and `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn locate(&self, program: &str) -> Result<PathBuf, CommandError> {
        let path = std::env::var_os("PATH");
        find_executable(program, path.as_deref()).ok_or_else(|| CommandError::NotFound {
            command: program.to_string(),
        })
    }

    async fn run(&self, program: &Path, args: &[String]) -> Result<CommandOutput, CommandError> {
        tracing::debug!(program = %program.display(), ?args, "running command");
        let mut cmd = Command::new(program);
        cmd.args(args);
        capture_output(&mut cmd, &program.display().to_string()).await
    }
}

/// Search `path` (a `PATH`-style list) for an executable named `program`.
///
/// A name containing a path separator is checked as-is.
pub fn find_executable(program: &str, path: Option<&OsStr>) -> Option<PathBuf> {
    if program.contains(std::path::MAIN_SEPARATOR) {
        let candidate = PathBuf::from(program);
        return is_executable(&candidate).then_some(candidate);
    }

    std::env::split_paths(path?).find_map(|dir| {
        let candidate = dir.join(program);
        is_executable(&candidate).then_some(candidate)
    })
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Execute a command and capture stdout, stderr and exit status.
///
/// Output is decoded as lossy UTF-8. Only a failure to spawn is an error.
pub async fn capture_output(cmd: &mut Command, name: &str) -> Result<CommandOutput, CommandError> {
    let output = cmd.output().await.map_err(|e| CommandError::Execution {
        command: name.to_string(),
        error: e.to_string(),
    })?;

    Ok(CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        success: output.status.success(),
        code: output.status.code(),
    })
}
