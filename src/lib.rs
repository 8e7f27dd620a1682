//! vrepo - repository synchronization
//!
//! vrepo keeps a source directory synchronized with its remotes. Git remotes
//! receive automatic commits, ssh hosts are mirrored with rsync and npm
//! packages are published with an automatic version bump. Remotes are stored
//! per directory in a `.vrepo` JSON file.
//!
//! # Core Features
//!
//! - **Gitignore matching**: [`PatternMatcher`] evaluates `.gitignore` rules
//!   with negation, anchoring, directory-only patterns and `**`
//! - **Large-file listing**: [`list_large_files`] ranks files and directories
//!   by size, optionally skipping ignored entries
//! - **Sync backends**: git, rsync and npm behind a mockable [`ProcessRunner`]
//!
//! # Example Usage
//!
//! ```rust
//! use vrepo::PatternMatcher;
//!
//! let matcher = PatternMatcher::from_gitignore("*.log\n!keep.log\nbuild/\n");
//!
//! assert!(matcher.is_ignored("logs/debug.log"));
//! assert!(!matcher.is_ignored("keep.log"));
//! assert!(matcher.is_ignored("build/output.bin"));
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod ignore;
pub mod npm;
pub mod process;
pub mod repo;
pub mod sync;

// Re-export commonly used types
pub use core::error::{Result, VrepoError};

pub use config::{GitRemote, RepoConfig, SshRemote};

pub use ignore::{list_large_files, LargeFile, OutOfScopeError, PatternMatcher, RepoIgnore, ScanOptions};

pub use process::{CommandOutput, CommandSpec, ProcessRunner, SystemRunner};

pub use repo::{Backends, Repo};

/// Current version of vrepo
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
