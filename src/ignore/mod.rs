//! Gitignore-compatible path exclusion
//!
//! This module compiles `.gitignore` lines into an ordered [`PatternMatcher`],
//! binds it to a repository root through [`RepoIgnore`], and uses it to filter
//! the large-file listing. Supported syntax covers negation, anchoring,
//! directory-only patterns and `**`; an excluded directory cannot have its
//! contents re-included.

pub mod matcher;
pub mod pattern;
pub mod scanner;

// Re-export commonly used items
pub use matcher::{OutOfScopeError, PatternMatcher, RepoIgnore};
pub use pattern::{Pattern, PatternKind, Segment};
pub use scanner::{list_large_files, LargeFile, LargeFileScanner, ScanOptions, ScanPhase, ScanProgress};
