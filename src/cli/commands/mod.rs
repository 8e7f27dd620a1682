//! CLI command implementations

pub mod add_remote;
pub mod check_ignore;
pub mod completion;
pub mod list_large_files;
pub mod publish;
pub mod pull;
pub mod push;
pub mod remotes;
pub mod remove_commit_history;
pub mod remove_git_cache;

use crate::cli::context::CliContext;
use crate::process::{SharedRunner, SystemRunner};
use crate::repo::{Backends, Repo};
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

/// Process runner configured from the global flags
pub fn runner() -> SharedRunner {
    Arc::new(SystemRunner::new(CliContext::echo_commands()))
}

/// Open one source directory with the given backends
pub fn open_repo(source: &Path, backends: Backends) -> Result<Repo> {
    Repo::open(source, backends, runner())
        .with_context(|| format!("Failed to open repository \"{}\"", source.display()))
}
