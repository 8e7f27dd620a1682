//! Synchronization through git remotes

use crate::config::GitRemote;
use crate::core::error::{Result, VrepoError};
use crate::ignore::{list_large_files, LargeFile, OutOfScopeError, RepoIgnore, ScanOptions};
use crate::process::{CommandOutput, CommandSpec, SharedRunner};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Message used for the automatic commit made by `push`
pub const AUTO_COMMIT_MESSAGE: &str = "Automatic updates";

/// README placeholder replaced with the published npm version
pub const VERSION_PLACEHOLDER: &str = "{{VERSION}}";

/// Flags for [`Git::push`]
#[derive(Debug, Clone, Copy, Default)]
pub struct PushOptions {
    /// Pass `-f` to `git push`
    pub forced: bool,
    /// Toggle a trailing space in .gitignore so there is always something to commit
    pub ensure_push: bool,
}

/// Git backend for one source directory
pub struct Git {
    source: PathBuf,
    username: Option<String>,
    email: Option<String>,
    ignore: RepoIgnore,
    runner: SharedRunner,
}

impl Git {
    /// Create the backend and load the source's .gitignore
    pub fn new(
        source: &Path,
        username: Option<String>,
        email: Option<String>,
        runner: SharedRunner,
    ) -> Result<Self> {
        Ok(Self {
            source: source.to_path_buf(),
            username,
            email,
            ignore: RepoIgnore::load(source)?,
            runner,
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    fn git(&self, args: &[&str]) -> Result<CommandOutput> {
        self.runner
            .run(&CommandSpec::git(&self.source).args(args.iter().copied()))
    }

    fn run_step(&self, step: &str, args: &[&str]) -> Result<CommandOutput> {
        let output = self.git(args)?;
        if !output.success() {
            return Err(VrepoError::git_step(step, output.error_text()));
        }
        Ok(output)
    }

    /// Make sure the repository, identity, remote and branch are in place
    pub fn prepare(&self, remote: &str, destination: &str, branch: &str) -> Result<()> {
        let (remote, destination, branch) = (remote.trim(), destination.trim(), branch.trim());

        let username = self
            .username
            .as_deref()
            .ok_or(VrepoError::MissingGitIdentity { field: "username" })?;
        let email = self
            .email
            .as_deref()
            .ok_or(VrepoError::MissingGitIdentity { field: "email" })?;

        if !self.source.join(".git").exists() {
            info!(source = %self.source.display(), "initializing git repository");
            self.run_step("Failed to create a git repository", &["init"])?;
        }

        self.run_step(
            "Failed to set the git username and email",
            &["config", "user.email", email],
        )?;
        self.run_step(
            "Failed to set the git username and email",
            &["config", "user.name", username],
        )?;

        let set_url = self.git(&["remote", "set-url", remote, destination])?;
        if !set_url.success() {
            if !set_url.stderr.contains("No such remote") {
                return Err(VrepoError::git_step(
                    "Failed to set the git origin",
                    set_url.error_text(),
                ));
            }
            self.run_step(
                "Failed to set the git origin",
                &["remote", "add", remote, destination],
            )?;
        }

        let checkout = self.git(&["checkout", branch])?;
        if !checkout.success() {
            if !checkout.stderr.contains("pathspec") {
                return Err(VrepoError::git_step(
                    "Failed to set the git branch",
                    checkout.error_text(),
                ));
            }
            self.run_step("Failed to set the git branch", &["checkout", "-b", branch])?;
        }

        Ok(())
    }

    /// Commit everything and push it to a remote
    pub fn push(&self, remote: &GitRemote, options: PushOptions) -> Result<()> {
        self.prepare(&remote.remote, &remote.destination, &remote.branch)?;

        self.fill_readme_version()?;

        if options.ensure_push {
            self.toggle_gitignore_padding()?;
        }

        self.run_step("Failed to add files to the git repository", &["add", "-A"])?;

        // Exit code 1 means there was nothing to commit
        let commit = self.git(&["commit", "-m", AUTO_COMMIT_MESSAGE])?;
        if !matches!(commit.code, Some(0) | Some(1)) {
            return Err(VrepoError::git_step(
                "Failed to commit to the git repository",
                commit.error_text(),
            ));
        }

        let mut args = vec!["push", "-u", remote.remote.trim(), remote.branch.trim()];
        if options.forced {
            args.push("-f");
        }
        self.run_step("Failed to push the git repository", &args)?;

        Ok(())
    }

    /// Pull a branch from a remote
    pub fn pull(&self, remote: &GitRemote, forced: bool) -> Result<()> {
        self.prepare(&remote.remote, &remote.destination, &remote.branch)?;

        let mut args = vec!["pull", remote.remote.trim(), remote.branch.trim()];
        if forced {
            args.push("-f");
        }
        self.run_step("Failed to pull the git repository", &args)?;

        Ok(())
    }

    /// Squash the whole history of `branch` into a single commit
    pub fn remove_commit_history(&self, branch: &str) -> Result<()> {
        let branch = branch.trim();
        let steps: [&[&str]; 5] = [
            &["checkout", "--orphan", "tmp-branch", "-q"],
            &["add", "-A"],
            &["commit", "-am", "Initial Commit", "-q"],
            &["branch", "-D", branch, "-q"],
            &["branch", "-m", branch],
        ];

        for args in steps {
            self.run_step("Failed to remove the commit history", args)?;
        }

        Ok(())
    }

    /// Untrack every file so the .gitignore rules apply again
    pub fn remove_cache(&self) -> Result<()> {
        self.run_step("Failed to remove the git cache", &["rm", "-r", "--cached", "."])?;
        Ok(())
    }

    /// Check a path against the source's .gitignore
    pub fn is_ignored(&self, path: impl AsRef<Path>) -> std::result::Result<bool, OutOfScopeError> {
        self.ignore.is_ignored(path)
    }

    /// List the largest entries of the source directory
    pub fn list_large_files(&self, options: &ScanOptions) -> Result<Vec<LargeFile>> {
        list_large_files(&self.source, options)
    }

    /// Replace the README placeholder with `live_version` from package.json
    fn fill_readme_version(&self) -> Result<()> {
        let package_path = self.source.join("package.json");
        let readme_path = self.source.join("README.md");
        if !package_path.exists() || !readme_path.exists() {
            return Ok(());
        }

        let package: serde_json::Value = serde_json::from_str(&fs::read_to_string(&package_path)?)?;
        let Some(version) = package.get("live_version").and_then(|v| v.as_str()) else {
            return Ok(());
        };

        let readme = fs::read_to_string(&readme_path)?;
        if readme.contains(VERSION_PLACEHOLDER) {
            debug!(version, "filling README version placeholder");
            fs::write(&readme_path, readme.replace(VERSION_PLACEHOLDER, version))?;
        }

        Ok(())
    }

    fn toggle_gitignore_padding(&self) -> Result<()> {
        let gitignore_path = self.source.join(".gitignore");
        if !gitignore_path.exists() {
            fs::write(&gitignore_path, "")?;
            return Ok(());
        }

        let mut content = fs::read_to_string(&gitignore_path)?;
        if content.ends_with(' ') {
            content.pop();
        } else {
            content.push(' ');
        }
        fs::write(&gitignore_path, content)?;

        Ok(())
    }
}
