//! Error types for vrepo

use crate::ignore::OutOfScopeError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for vrepo operations
#[derive(Error, Debug)]
pub enum VrepoError {
    /// Configuration errors
    #[error("{}: {reason}", path.display())]
    ConfigParse { path: PathBuf, reason: String },

    #[error("Source directory does not exist: {}", path.display())]
    SourceNotFound { path: PathBuf },

    /// Remote lookup errors
    #[error("Git remote \"{remote}\" does not exist.")]
    GitRemoteNotFound { remote: String },

    #[error("SSH remote \"{alias}\" does not exist.")]
    SshRemoteNotFound { alias: String },

    #[error("Invalid ssh remote \"{value}\", the value must be formatted like \"<alias>:<destination>\".")]
    InvalidSshRemote { value: String },

    /// Backend was not enabled when the repository was opened
    #[error("The {backend} backend is not enabled for this repository")]
    BackendDisabled { backend: &'static str },

    /// External process errors
    #[error("Failed to execute \"{program}\": {source}")]
    CommandSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{step}:\n{message}")]
    GitStep { step: String, message: String },

    #[error("There is no git {field} defined.")]
    MissingGitIdentity { field: &'static str },

    #[error("{step}:\n{message}")]
    SshStep { step: String, message: String },

    /// npm errors
    #[error("NPM configuration file \"{}\" does not exist.", path.display())]
    PackageJsonMissing { path: PathBuf },

    #[error("No npm user is logged in, execute ($ npm login).")]
    NpmNotLoggedIn,

    #[error("Failed to publish package {name}.")]
    NpmPublishFailed { name: String },

    #[error("{step}:\n{message}")]
    NpmStep { step: String, message: String },

    #[error("Invalid version \"{version}\"")]
    InvalidVersion { version: String },

    /// Path errors
    #[error(transparent)]
    OutOfScope(#[from] OutOfScopeError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// Generic error for unexpected conditions
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl VrepoError {
    /// Create a new config parse error
    pub fn config_parse(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::ConfigParse {
            path,
            reason: reason.into(),
        }
    }

    /// Create a new git remote not found error
    pub fn git_remote_not_found(remote: impl Into<String>) -> Self {
        Self::GitRemoteNotFound {
            remote: remote.into(),
        }
    }

    /// Create a new ssh remote not found error
    pub fn ssh_remote_not_found(alias: impl Into<String>) -> Self {
        Self::SshRemoteNotFound {
            alias: alias.into(),
        }
    }

    /// Create a new git step error
    pub fn git_step(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::GitStep {
            step: step.into(),
            message: message.into(),
        }
    }

    /// Create a new ssh step error
    pub fn ssh_step(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SshStep {
            step: step.into(),
            message: message.into(),
        }
    }

    /// Create a new npm step error
    pub fn npm_step(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NpmStep {
            step: step.into(),
            message: message.into(),
        }
    }

    /// Create a new invalid version error
    pub fn invalid_version(version: impl Into<String>) -> Self {
        Self::InvalidVersion {
            version: version.into(),
        }
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Result type alias for vrepo operations
pub type Result<T> = std::result::Result<T, VrepoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            VrepoError::git_remote_not_found("upstream").to_string(),
            "Git remote \"upstream\" does not exist."
        );
        assert_eq!(
            VrepoError::git_step("Failed to push the git repository", "rejected").to_string(),
            "Failed to push the git repository:\nrejected"
        );
        assert_eq!(
            VrepoError::config_parse(PathBuf::from("/repo/.vrepo"), "EOF while parsing").to_string(),
            "/repo/.vrepo: EOF while parsing"
        );
    }

    #[test]
    fn test_out_of_scope_is_transparent() {
        let error: VrepoError = OutOfScopeError {
            path: PathBuf::from("/elsewhere"),
            root: PathBuf::from("/repo"),
        }
        .into();
        assert!(error.to_string().starts_with("Path \"/elsewhere\""));
    }
}
