//! Ordered gitignore evaluation over repository-relative paths

use crate::core::error::Result;
use crate::ignore::pattern::Pattern;
use path_clean::PathClean;
use std::borrow::Cow;
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Raised when a path handed to [`RepoIgnore`] does not live under its root
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Path \"{}\" is outside of the repository root \"{}\"", path.display(), root.display())]
pub struct OutOfScopeError {
    pub path: PathBuf,
    pub root: PathBuf,
}

/// Compiled, immutable set of ignore patterns in file order
#[derive(Debug, Clone, Default)]
pub struct PatternMatcher {
    patterns: Vec<Pattern>,
}

impl PatternMatcher {
    /// Compile pattern lines. Invalid lines never fail the build.
    pub fn build<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = lines
            .into_iter()
            .filter_map(|line| Pattern::parse(line.as_ref()))
            .collect();

        Self { patterns }
    }

    /// Compile the content of a .gitignore file
    pub fn from_gitignore(content: &str) -> Self {
        Self::build(content.lines())
    }

    /// A matcher that ignores nothing
    pub fn empty() -> Self {
        Self::default()
    }

    /// Compiled patterns in file order
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Whether no pattern survived parsing
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Check a root-relative path. A trailing `/` marks the path as a directory.
    pub fn is_ignored(&self, path: &str) -> bool {
        let is_dir = path.ends_with('/') || path.ends_with('\\');
        self.is_ignored_entry(path, is_dir)
    }

    /// Check a root-relative path whose directory status is already known
    pub fn is_ignored_entry(&self, path: &str, is_dir: bool) -> bool {
        if self.patterns.is_empty() {
            return false;
        }

        let Some(segments) = normalize(path) else {
            return false;
        };
        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
        if segments.is_empty() {
            return false;
        }

        // An excluded ancestor directory cannot be re-included by later negations
        for depth in 1..segments.len() {
            if self.evaluate(&segments[..depth], true) {
                return true;
            }
        }

        self.evaluate(&segments, is_dir)
    }

    /// Replay every pattern in order; the last match wins
    fn evaluate(&self, segments: &[&str], is_dir: bool) -> bool {
        self.patterns.iter().fold(false, |ignored, pattern| {
            if pattern.matches(segments, is_dir) {
                !pattern.negated
            } else {
                ignored
            }
        })
    }
}

/// Split a path into segments, resolving `.` and `..`.
/// Returns `None` when the path climbs above the root.
fn normalize(path: &str) -> Option<Vec<String>> {
    let mut segments: Vec<String> = Vec::new();
    for part in path.split(['/', '\\']) {
        match part {
            "" | "." => {},
            ".." => {
                segments.pop()?;
            },
            other => segments.push(other.to_string()),
        }
    }
    Some(segments)
}

/// A [`PatternMatcher`] bound to the repository root it was loaded from
#[derive(Debug, Clone)]
pub struct RepoIgnore {
    root: PathBuf,
    matcher: PatternMatcher,
}

impl RepoIgnore {
    pub fn new(root: &Path, matcher: PatternMatcher) -> Self {
        Self {
            root: root.clean(),
            matcher,
        }
    }

    /// Load `<root>/.gitignore`. A missing file yields an empty matcher.
    pub fn load(root: &Path) -> Result<Self> {
        let root = dunce::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
        let gitignore_path = root.join(".gitignore");

        let matcher = if gitignore_path.is_file() {
            let bytes = fs::read(&gitignore_path)?;
            let content = String::from_utf8_lossy(&bytes);
            if matches!(content, Cow::Owned(_)) {
                warn!(
                    path = %gitignore_path.display(),
                    "gitignore is not valid UTF-8, replacing invalid bytes"
                );
            }
            PatternMatcher::from_gitignore(&content)
        } else {
            PatternMatcher::empty()
        };

        debug!(
            root = %root.display(),
            patterns = matcher.patterns().len(),
            "loaded gitignore patterns"
        );

        Ok(Self::new(&root, matcher))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn matcher(&self) -> &PatternMatcher {
        &self.matcher
    }

    /// Convert an absolute or root-relative path into a `/`-separated
    /// root-relative string.
    pub fn relative_path(&self, path: &Path) -> std::result::Result<String, OutOfScopeError> {
        let absolute = if path.is_absolute() {
            path.clean()
        } else {
            self.root.join(path).clean()
        };

        let relative = match absolute.strip_prefix(&self.root) {
            Ok(relative) => relative.to_path_buf(),
            // The root is canonical; the candidate may still go through a symlink
            Err(_) => dunce::canonicalize(&absolute)
                .ok()
                .and_then(|canonical| {
                    canonical
                        .strip_prefix(&self.root)
                        .ok()
                        .map(Path::to_path_buf)
                })
                .ok_or_else(|| OutOfScopeError {
                    path: path.to_path_buf(),
                    root: self.root.clone(),
                })?,
        };

        let segments: Vec<String> = relative
            .components()
            .filter_map(|component| match component {
                Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();

        Ok(segments.join("/"))
    }

    /// Check an absolute or root-relative path against the root's .gitignore
    pub fn is_ignored(&self, path: impl AsRef<Path>) -> std::result::Result<bool, OutOfScopeError> {
        let relative = self.relative_path(path.as_ref())?;
        if relative.is_empty() {
            return Ok(false);
        }

        let is_dir = self.root.join(&relative).is_dir();
        Ok(self.matcher.is_ignored_entry(&relative, is_dir))
    }
}
