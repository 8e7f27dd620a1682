//! Invocation of external programs (git, rsync, npm)
//!
//! Backends describe what to run with a [`CommandSpec`] and hand it to a
//! [`ProcessRunner`]. The environment of every command is part of its spec,
//! so nothing is read from or written to process-wide state.

use crate::core::error::{Result, VrepoError};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Arc;
use tracing::debug;

/// A single program invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    pub env: Vec<(String, String)>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, cwd: &Path) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.to_path_buf(),
            env: Vec::new(),
        }
    }

    /// `git` in `cwd`, never prompting for credentials
    pub fn git(cwd: &Path) -> Self {
        Self::new("git", cwd).env("GIT_TERMINAL_PROMPT", "0")
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// `program arg1 arg2` for messages
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Captured result of a finished program
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// stderr, or a generic exit message when the program wrote nothing to it
    pub fn error_text(&self) -> String {
        let stderr = self.stderr.trim_end();
        if !stderr.is_empty() {
            return stderr.to_string();
        }
        match self.code {
            Some(code) => format!("Child process exited with code {}.", code),
            None => "Child process was terminated by a signal.".to_string(),
        }
    }
}

/// Runs external programs; mocked in tests
#[cfg_attr(test, mockall::automock)]
pub trait ProcessRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput>;
}

/// Runner shared by the git, ssh and npm backends of one repository
pub type SharedRunner = Arc<dyn ProcessRunner + Send + Sync>;

/// Runner backed by `std::process::Command`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner {
    /// Forward captured output to the terminal after each command
    pub echo: bool,
}

impl SystemRunner {
    pub fn new(echo: bool) -> Self {
        Self { echo }
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        debug!(command = %spec.display(), cwd = %spec.cwd.display(), "executing");
        if self.echo {
            println!("Executing ($ {}).", spec.display());
        }

        let output = Command::new(&spec.program)
            .args(&spec.args)
            .current_dir(&spec.cwd)
            .envs(spec.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .output()
            .map_err(|source| VrepoError::CommandSpawn {
                program: spec.program.clone(),
                source,
            })?;

        let result = CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        debug!(command = %spec.display(), code = ?result.code, "finished");
        if self.echo {
            print!("{}", result.stdout);
            eprint!("{}", result.stderr);
            println!(
                "Command ($ {}) exited with code {}.",
                spec.display(),
                result.code.map_or_else(|| "none".to_string(), |c| c.to_string())
            );
        }

        Ok(result)
    }
}
