//! Centralized command execution with consistent error handling.
//!
//! Every external tool (the bootstrap installer, `cygcheck`, 7-Zip,
//! `makensis`) is launched through [`Cmd`]. Output is always captured and
//! logged at debug level; a non-zero exit becomes
//! [`BuildError::CommandFailed`](crate::error::BuildError::CommandFailed).

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use crate::error::BuildError;

/// Result of a command execution.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit status of the command.
    pub status: ExitStatus,
    /// Captured stdout as a string.
    pub stdout: String,
    /// Captured stderr as a string.
    pub stderr: String,
}

impl CommandResult {
    /// Returns true if the command exited successfully.
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Get the exit code, or -1 if terminated by signal.
    pub fn code(&self) -> i32 {
        self.status.code().unwrap_or(-1)
    }
}

/// Builder for configuring command execution.
pub struct Cmd {
    program: String,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
}

impl Cmd {
    /// Create a new command builder.
    pub fn new(program: impl AsRef<str>) -> Self {
        Self {
            program: program.as_ref().to_string(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    /// Create a command builder for a program given as a path.
    pub fn path(program: &Path) -> Self {
        Self::new(program.to_string_lossy())
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<str>) -> Self {
        self.args.push(arg.as_ref().to_string());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for arg in args {
            self.args.push(arg.as_ref().to_string());
        }
        self
    }

    /// Add a path as an argument.
    pub fn arg_path(mut self, path: &Path) -> Self {
        self.args.push(path.to_string_lossy().into_owned());
        self
    }

    /// Set the working directory of the child process.
    pub fn dir(mut self, dir: &Path) -> Self {
        self.current_dir = Some(dir.to_path_buf());
        self
    }

    /// The command line as it is logged and reported.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run the command and capture output.
    ///
    /// Spawn failures are unexpected errors; a non-zero exit is a
    /// [`BuildError::CommandFailed`].
    pub fn run(self) -> Result<CommandResult> {
        let cmdline = self.display();
        tracing::debug!("executing command {}", cmdline);

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd.stdin(Stdio::null());

        if let Some(ref dir) = self.current_dir {
            cmd.current_dir(dir);
        }

        let output = cmd
            .output()
            .with_context(|| format!("Failed to execute '{}'", self.program))?;

        let result = CommandResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        tracing::debug!("{} stdout:\n{}", self.program, result.stdout);
        tracing::debug!("{} stderr:\n{}", self.program, result.stderr);

        if !result.success() {
            return Err(BuildError::CommandFailed {
                command: cmdline,
                code: result.code(),
                stdout: result.stdout,
                stderr: result.stderr,
            }
            .into());
        }

        Ok(result)
    }
}

// =============================================================================
// Tests
// =============================================================================
