//! Synchronization through rsync over ssh

use crate::core::error::{Result, VrepoError};
use crate::process::{CommandSpec, SharedRunner};
use std::path::{Path, PathBuf};
use tracing::debug;

/// rsync backend for one source directory
pub struct Ssh {
    source: PathBuf,
    runner: SharedRunner,
}

impl Ssh {
    pub fn new(source: &Path, runner: SharedRunner) -> Self {
        Self {
            source: source.to_path_buf(),
            runner,
        }
    }

    /// Mirror the source directory to `<alias>:<destination>`
    pub fn push(&self, alias: &str, destination: &str, delete: bool) -> Result<()> {
        let local = format!("{}/", self.source.display());
        let remote = format!("{}:{}/", alias.trim(), destination.trim());
        self.rsync(&local, &remote, delete, "Failed to push the repository over ssh")
    }

    /// Mirror `<alias>:<remote_dir>` into the source directory
    pub fn pull(&self, alias: &str, remote_dir: &str, delete: bool) -> Result<()> {
        let remote = format!("{}:{}/", alias.trim(), remote_dir.trim());
        let local = format!("{}/", self.source.display());
        self.rsync(&remote, &local, delete, "Failed to pull the repository over ssh")
    }

    fn rsync(&self, from: &str, to: &str, delete: bool, step: &str) -> Result<()> {
        let mut spec = CommandSpec::new("rsync", &self.source).args(["-azP", from, to]);
        if delete {
            spec = spec.arg("--delete");
        }
        debug!(from, to, delete, "rsync");

        let output = self.runner.run(&spec)?;
        if !output.success() {
            return Err(VrepoError::ssh_step(step, output.error_text()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{CommandOutput, MockProcessRunner};
    use std::sync::Arc;

    #[test]
    fn test_push_arguments() {
        let mut mock = MockProcessRunner::new();
        mock.expect_run()
            .withf(|spec| {
                spec.program == "rsync"
                    && spec.args == ["-azP", "/srv/site/", "web:/var/www/site/", "--delete"]
            })
            .times(1)
            .returning(|_| {
                Ok(CommandOutput {
                    code: Some(0),
                    ..CommandOutput::default()
                })
            });

        let ssh = Ssh::new(Path::new("/srv/site"), Arc::new(mock));
        ssh.push(" web ", "/var/www/site", true).unwrap();
    }

    #[test]
    fn test_pull_failure() {
        let mut mock = MockProcessRunner::new();
        mock.expect_run()
            .withf(|spec| spec.args == ["-azP", "web:/var/www/site/", "/srv/site/"])
            .times(1)
            .returning(|_| {
                Ok(CommandOutput {
                    code: Some(255),
                    stdout: String::new(),
                    stderr: "ssh: Could not resolve hostname web".to_string(),
                })
            });

        let ssh = Ssh::new(Path::new("/srv/site"), Arc::new(mock));
        let error = ssh.pull("web", "/var/www/site", false).unwrap_err();

        assert!(matches!(error, VrepoError::SshStep { .. }));
        assert_eq!(
            error.to_string(),
            "Failed to pull the repository over ssh:\nssh: Could not resolve hostname web"
        );
    }
}
