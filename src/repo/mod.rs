//! A source directory with its `.vrepo` configuration and backends

use crate::config::{GitRemote, RepoConfig, SshRemote};
use crate::core::error::{Result, VrepoError};
use crate::npm::Npm;
use crate::process::SharedRunner;
use crate::sync::{Git, Ssh};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Backends to construct when opening a repository
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backends {
    pub git: bool,
    pub ssh: bool,
    pub npm: bool,
}

impl Backends {
    /// git and ssh; npm requires a package.json and is opened on demand
    pub fn sync() -> Self {
        Self {
            git: true,
            ssh: true,
            npm: false,
        }
    }

    /// Only the `.vrepo` configuration
    pub fn none() -> Self {
        Self {
            git: false,
            ssh: false,
            npm: false,
        }
    }

    pub fn npm_only() -> Self {
        Self {
            git: false,
            ssh: false,
            npm: true,
        }
    }
}

pub struct Repo {
    source: PathBuf,
    name: String,
    config: RepoConfig,
    git: Option<Git>,
    ssh: Option<Ssh>,
    npm: Option<Npm>,
}

impl Repo {
    /// Open a source directory, creating `.vrepo` when it is missing
    pub fn open(source: &Path, backends: Backends, runner: SharedRunner) -> Result<Self> {
        if !source.is_dir() {
            return Err(VrepoError::SourceNotFound {
                path: source.to_path_buf(),
            });
        }
        let source = dunce::canonicalize(source)?;
        let name = source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| source.display().to_string());

        let config = RepoConfig::load_or_create(&source)?;

        let git = if backends.git {
            Some(Git::new(
                &source,
                config.git.username.clone(),
                config.git.email.clone(),
                runner.clone(),
            )?)
        } else {
            None
        };
        let ssh = backends.ssh.then(|| Ssh::new(&source, runner.clone()));
        let npm = if backends.npm {
            Some(Npm::new(
                &source,
                config.resolved_version_path(&source),
                runner,
            )?)
        } else {
            None
        };

        debug!(source = %source.display(), ?backends, "opened repository");

        Ok(Self {
            source,
            name,
            config,
            git,
            ssh,
            npm,
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Basename of the source directory
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &RepoConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut RepoConfig {
        &mut self.config
    }

    pub fn git(&self) -> Result<&Git> {
        self.git
            .as_ref()
            .ok_or(VrepoError::BackendDisabled { backend: "git" })
    }

    pub fn ssh(&self) -> Result<&Ssh> {
        self.ssh
            .as_ref()
            .ok_or(VrepoError::BackendDisabled { backend: "ssh" })
    }

    pub fn npm(&self) -> Result<&Npm> {
        self.npm
            .as_ref()
            .ok_or(VrepoError::BackendDisabled { backend: "npm" })
    }

    pub fn npm_mut(&mut self) -> Result<&mut Npm> {
        self.npm
            .as_mut()
            .ok_or(VrepoError::BackendDisabled { backend: "npm" })
    }

    /// Write `.vrepo` and, when npm is open, `package.json`
    pub fn save(&self) -> Result<()> {
        self.config.save(&self.source)?;
        if let Some(npm) = &self.npm {
            npm.package().save()?;
        }
        Ok(())
    }

    /// `None` selects nothing, an empty list every enabled remote,
    /// names select those remotes and must all exist.
    pub fn select_git_remotes(&self, names: Option<&[String]>) -> Result<Vec<GitRemote>> {
        match names {
            None => Ok(Vec::new()),
            Some([]) => Ok(self
                .config
                .git
                .remotes
                .iter()
                .filter(|remote| remote.enabled)
                .cloned()
                .collect()),
            Some(names) => names
                .iter()
                .map(|name| {
                    self.config
                        .find_git_remote(name)
                        .cloned()
                        .ok_or_else(|| VrepoError::git_remote_not_found(name.as_str()))
                })
                .collect(),
        }
    }

    /// Same selection rules as [`Repo::select_git_remotes`]
    pub fn select_ssh_remotes(&self, names: Option<&[String]>) -> Result<Vec<SshRemote>> {
        match names {
            None => Ok(Vec::new()),
            Some([]) => Ok(self
                .config
                .ssh
                .remotes
                .iter()
                .filter(|remote| remote.enabled)
                .cloned()
                .collect()),
            Some(names) => names
                .iter()
                .map(|alias| {
                    self.config
                        .find_ssh_remote(alias)
                        .cloned()
                        .ok_or_else(|| VrepoError::ssh_remote_not_found(alias.as_str()))
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::SystemRunner;
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn open(source: &Path, backends: Backends) -> Result<Repo> {
        Repo::open(source, backends, Arc::new(SystemRunner::default()))
    }

    fn configured_repo() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let mut config = RepoConfig::new(temp_dir.path());
        config.add_git_remote(GitRemote::new("origin", "git@a:x.git", "main"));
        let mut backup = GitRemote::new("backup", "git@b:x.git", "main");
        backup.enabled = false;
        config.add_git_remote(backup);
        config.add_ssh_remote(SshRemote::new("srv", "/var/www"));
        config.save(temp_dir.path()).unwrap();
        temp_dir
    }

    #[test]
    fn test_open_creates_config_and_names_repo() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let source = temp_dir.path().join("my-package");
        fs::create_dir(&source)?;

        let repo = open(&source, Backends::sync())?;

        assert_eq!(repo.name(), "my-package");
        assert!(source.join(".vrepo").exists());
        assert!(repo.git().is_ok());
        assert!(matches!(
            repo.npm(),
            Err(VrepoError::BackendDisabled { backend: "npm" })
        ));

        Ok(())
    }

    #[test]
    fn test_open_missing_source() {
        let temp_dir = TempDir::new().unwrap();
        let result = open(&temp_dir.path().join("missing"), Backends::sync());
        assert!(matches!(result, Err(VrepoError::SourceNotFound { .. })));
    }

    #[test]
    fn test_select_all_skips_disabled() -> anyhow::Result<()> {
        let temp_dir = configured_repo();
        let repo = open(temp_dir.path(), Backends::sync())?;

        let all = repo.select_git_remotes(Some(&[][..]))?;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].remote, "origin");

        assert!(repo.select_git_remotes(None)?.is_empty());
        assert_eq!(repo.select_ssh_remotes(Some(&[][..]))?.len(), 1);

        Ok(())
    }

    #[test]
    fn test_select_by_name() -> anyhow::Result<()> {
        let temp_dir = configured_repo();
        let repo = open(temp_dir.path(), Backends::sync())?;

        let named = repo.select_git_remotes(Some(&["backup".to_string()]))?;
        assert_eq!(named[0].destination, "git@b:x.git");

        let error = repo
            .select_ssh_remotes(Some(&["missing".to_string()]))
            .unwrap_err();
        assert_eq!(error.to_string(), "SSH remote \"missing\" does not exist.");

        Ok(())
    }

    #[test]
    fn test_npm_requires_package_json() {
        let temp_dir = TempDir::new().unwrap();
        let result = open(temp_dir.path(), Backends::npm_only());
        assert!(matches!(result, Err(VrepoError::PackageJsonMissing { .. })));
    }
}
