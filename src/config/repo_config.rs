//! Repository configuration stored in `<source>/.vrepo`

use crate::config::to_pretty_json;
use crate::core::error::{Result, VrepoError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name of the repository configuration
pub const CONFIG_FILE_NAME: &str = ".vrepo";

/// Default file the npm version is exported to
const DEFAULT_VERSION_FILE: &str = ".version.js";

fn default_enabled() -> bool {
    true
}

/// An rsync destination reachable through an ssh alias
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SshRemote {
    /// Host alias from the ssh configuration
    pub alias: String,
    /// Directory on the remote host
    pub destination: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl SshRemote {
    pub fn new(alias: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            destination: destination.into(),
            enabled: true,
        }
    }

    /// Parse `<alias>:<destination>`, splitting at the first colon
    pub fn parse(value: &str) -> Result<Self> {
        match value.split_once(':') {
            Some((alias, destination))
                if !alias.trim().is_empty() && !destination.trim().is_empty() =>
            {
                Ok(Self::new(alias.trim(), destination.trim()))
            },
            _ => Err(VrepoError::InvalidSshRemote {
                value: value.to_string(),
            }),
        }
    }
}

/// A git remote together with the branch that is synchronized
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GitRemote {
    /// Remote name, e.g. `origin`
    pub remote: String,
    pub branch: String,
    /// Remote url
    pub destination: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl GitRemote {
    pub fn new(
        remote: impl Into<String>,
        destination: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        Self {
            remote: remote.into(),
            branch: branch.into(),
            destination: destination.into(),
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SshConfig {
    #[serde(default)]
    pub remotes: Vec<SshRemote>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GitConfig {
    /// Name used for automatic commits
    #[serde(default)]
    pub username: Option<String>,
    /// Email used for automatic commits
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub remotes: Vec<GitRemote>,
}

/// Content of a `.vrepo` file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RepoConfig {
    #[serde(default)]
    pub ssh: SshConfig,
    #[serde(default)]
    pub git: GitConfig,
    /// Where `publish` writes the version export; `./` is relative to the source
    #[serde(default)]
    pub version_path: Option<String>,
}

impl RepoConfig {
    /// Default configuration for a source directory
    pub fn new(source: &Path) -> Self {
        Self {
            version_path: Some(source.join(DEFAULT_VERSION_FILE).display().to_string()),
            ..Self::default()
        }
    }

    /// Path of the configuration file inside a source directory
    pub fn config_path(source: &Path) -> PathBuf {
        source.join(CONFIG_FILE_NAME)
    }

    /// Load `.vrepo`, writing a default one first when it does not exist
    pub fn load_or_create(source: &Path) -> Result<Self> {
        let config_path = Self::config_path(source);

        if !config_path.exists() {
            let config = Self::new(source);
            config.save(source)?;
            info!(path = %config_path.display(), "created default repository configuration");
            return Ok(config);
        }

        Self::load(&config_path)
    }

    /// Load a configuration file
    pub fn load(config_path: &Path) -> Result<Self> {
        let content = fs::read_to_string(config_path)?;
        let config: RepoConfig = serde_json::from_str(&content)
            .map_err(|e| VrepoError::config_parse(config_path.to_path_buf(), e.to_string()))?;

        debug!(
            path = %config_path.display(),
            git_remotes = config.git.remotes.len(),
            ssh_remotes = config.ssh.remotes.len(),
            "loaded repository configuration"
        );

        Ok(config)
    }

    /// Save the configuration into a source directory
    pub fn save(&self, source: &Path) -> Result<()> {
        let config_path = Self::config_path(source);
        fs::write(&config_path, to_pretty_json(self)?)?;
        Ok(())
    }

    /// Resolve the version export path against the source directory
    pub fn resolved_version_path(&self, source: &Path) -> PathBuf {
        let value = self.version_path.as_deref().map(str::trim).unwrap_or("");

        if value.is_empty() {
            source.join(DEFAULT_VERSION_FILE)
        } else if let Some(relative) = value.strip_prefix("./") {
            source.join(relative)
        } else {
            let path = PathBuf::from(value);
            if path.is_absolute() {
                path
            } else {
                source.join(path)
            }
        }
    }

    /// Append a git remote unless an identical one exists
    pub fn add_git_remote(&mut self, remote: GitRemote) -> bool {
        let duplicate = self.git.remotes.iter().any(|item| {
            item.remote == remote.remote
                && item.destination == remote.destination
                && item.branch == remote.branch
        });
        if !duplicate {
            self.git.remotes.push(remote);
        }
        !duplicate
    }

    /// Append an ssh remote unless an identical one exists
    pub fn add_ssh_remote(&mut self, remote: SshRemote) -> bool {
        let duplicate = self
            .ssh
            .remotes
            .iter()
            .any(|item| item.alias == remote.alias && item.destination == remote.destination);
        if !duplicate {
            self.ssh.remotes.push(remote);
        }
        !duplicate
    }

    pub fn find_git_remote(&self, remote: &str) -> Option<&GitRemote> {
        self.git.remotes.iter().find(|item| item.remote == remote)
    }

    pub fn find_ssh_remote(&self, alias: &str) -> Option<&SshRemote> {
        self.ssh.remotes.iter().find(|item| item.alias == alias)
    }
}
