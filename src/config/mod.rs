//! Per-repository configuration management
//!
//! Every synchronized repository carries a `.vrepo` JSON file listing its git
//! and ssh remotes, the git identity used for automatic commits, and where the
//! npm version export is written.

pub mod repo_config;

use crate::core::error::Result;
use serde::Serialize;

// Re-export commonly used items
pub use repo_config::{GitConfig, GitRemote, RepoConfig, SshConfig, SshRemote, CONFIG_FILE_NAME};

/// Serialize as pretty JSON with a 4-space indent
pub(crate) fn to_pretty_json<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    Ok(buffer)
}
