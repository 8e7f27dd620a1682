//! Large-file listing with optional .gitignore filtering

use crate::core::error::Result;
use crate::ignore::matcher::RepoIgnore;
use path_clean::PathClean;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Options for [`list_large_files`]
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Paths to skip; relative entries are resolved against the root
    pub exclude: Vec<PathBuf>,
    /// Maximum number of entries returned
    pub limit: usize,
    /// Skip entries matched by the root .gitignore
    pub use_gitignore: bool,
    /// List directories next to files
    pub include_directories: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            exclude: Vec::new(),
            limit: 25,
            use_gitignore: false,
            include_directories: false,
        }
    }
}

/// One listed entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LargeFile {
    /// Absolute path
    pub path: PathBuf,
    /// `/`-separated path relative to the scanned root
    pub relative: String,
    /// Bytes; for directories, the sum of all files reached below them
    pub size: u64,
    pub is_dir: bool,
}

/// Phase of a large-file scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    Discovery,
    Sizing,
    Filtering,
    Complete,
}

/// Progress information during scanning
#[derive(Debug, Clone)]
pub struct ScanProgress {
    pub phase: ScanPhase,
    pub entries_discovered: usize,
    pub entries_listed: usize,
}

/// Scanner listing the largest entries under a root
pub struct LargeFileScanner {
    root: PathBuf,
    options: ScanOptions,
    progress_callback: Option<Box<dyn Fn(&ScanProgress) + Send + Sync>>,
}

impl LargeFileScanner {
    pub fn new(root: &Path, options: ScanOptions) -> Self {
        Self {
            root: root.to_path_buf(),
            options,
            progress_callback: None,
        }
    }

    /// Set progress callback for real-time updates
    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ScanProgress) + Send + Sync + 'static,
    {
        self.progress_callback = Some(Box::new(callback));
        self
    }

    /// Walk the root, size every entry, sort and truncate
    pub fn scan(&self) -> Result<Vec<LargeFile>> {
        let root = dunce::canonicalize(&self.root)?;
        let mut progress = ScanProgress {
            phase: ScanPhase::Discovery,
            entries_discovered: 0,
            entries_listed: 0,
        };
        self.report_progress(&progress);

        let entries = self.discover(&root, &mut progress);

        progress.phase = ScanPhase::Sizing;
        self.report_progress(&progress);

        let mut candidates = collect_sizes(&root, entries, self.options.include_directories);
        candidates.sort_by(|a, b| {
            b.size
                .cmp(&a.size)
                .then_with(|| a.relative.cmp(&b.relative))
        });

        progress.phase = ScanPhase::Filtering;
        self.report_progress(&progress);

        let ignore = if self.options.use_gitignore {
            Some(RepoIgnore::load(&root)?)
        } else {
            None
        };

        let listed: Vec<LargeFile> = candidates
            .into_iter()
            .filter(|entry| match &ignore {
                Some(ignore) => !ignore
                    .matcher()
                    .is_ignored_entry(&entry.relative, entry.is_dir),
                None => true,
            })
            .take(self.options.limit)
            .collect();

        progress.phase = ScanPhase::Complete;
        progress.entries_listed = listed.len();
        self.report_progress(&progress);

        debug!(
            root = %root.display(),
            discovered = progress.entries_discovered,
            listed = listed.len(),
            "large-file scan finished"
        );

        Ok(listed)
    }

    /// Enumerate every entry below the root except `.git` and excluded paths
    fn discover(&self, root: &Path, progress: &mut ScanProgress) -> Vec<(PathBuf, bool)> {
        let excluded: HashSet<PathBuf> = self
            .options
            .exclude
            .iter()
            .map(|path| resolve_exclude(root, path))
            .collect();

        let walker = WalkDir::new(root)
            .follow_links(false)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                !(entry.depth() == 1 && entry.file_type().is_dir() && entry.file_name() == ".git")
                    && !excluded.contains(entry.path())
            });

        let mut entries = Vec::new();
        for entry in walker {
            match entry {
                Ok(entry) => {
                    let is_dir = entry.file_type().is_dir();
                    entries.push((entry.into_path(), is_dir));
                    progress.entries_discovered += 1;

                    if progress.entries_discovered % 100 == 0 {
                        self.report_progress(progress);
                    }
                },
                Err(e) => {
                    warn!("Error accessing entry during scan: {}", e);
                },
            }
        }

        entries
    }

    fn report_progress(&self, progress: &ScanProgress) {
        if let Some(callback) = &self.progress_callback {
            callback(progress);
        }
    }
}

/// List the largest entries under `root`, see [`ScanOptions`]
pub fn list_large_files(root: &Path, options: &ScanOptions) -> Result<Vec<LargeFile>> {
    LargeFileScanner::new(root, options.clone()).scan()
}

fn resolve_exclude(root: &Path, path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.clean()
    } else {
        root.join(path).clean()
    };
    dunce::canonicalize(&absolute).unwrap_or(absolute)
}

fn relative_string(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn collect_sizes(
    root: &Path,
    entries: Vec<(PathBuf, bool)>,
    include_directories: bool,
) -> Vec<LargeFile> {
    let file_sizes: Vec<u64> = entries
        .par_iter()
        .map(|(path, is_dir)| {
            if *is_dir {
                0
            } else {
                fs::symlink_metadata(path).map(|meta| meta.len()).unwrap_or(0)
            }
        })
        .collect();

    let mut directory_sizes: HashMap<&Path, u64> = HashMap::new();
    if include_directories {
        for ((path, is_dir), size) in entries.iter().zip(&file_sizes) {
            if *is_dir {
                directory_sizes.entry(path.as_path()).or_insert(0);
                continue;
            }
            for ancestor in path.ancestors().skip(1) {
                if ancestor == root {
                    break;
                }
                *directory_sizes.entry(ancestor).or_insert(0) += size;
            }
        }
    }

    entries
        .iter()
        .zip(&file_sizes)
        .filter(|((_, is_dir), _)| include_directories || !*is_dir)
        .map(|((path, is_dir), size)| LargeFile {
            path: path.clone(),
            relative: relative_string(root, path),
            size: if *is_dir {
                directory_sizes.get(path.as_path()).copied().unwrap_or(0)
            } else {
                *size
            },
            is_dir: *is_dir,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    fn write_sized(path: &Path, size: usize) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, vec![b'x'; size]).unwrap();
    }

    #[test]
    fn test_sorted_by_size_then_path() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();
        write_sized(&root.join("c"), 100);
        write_sized(&root.join("b"), 50);
        write_sized(&root.join("a"), 100);

        let options = ScanOptions {
            limit: 2,
            ..ScanOptions::default()
        };
        let listed = list_large_files(root, &options)?;

        let names: Vec<_> = listed.iter().map(|e| (e.relative.as_str(), e.size)).collect();
        assert_eq!(names, vec![("a", 100), ("c", 100)]);

        Ok(())
    }

    #[test]
    fn test_directory_aggregate_size() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();
        write_sized(&root.join("assets/img/one.png"), 300);
        write_sized(&root.join("assets/two.png"), 200);
        write_sized(&root.join("main.js"), 10);

        let options = ScanOptions {
            include_directories: true,
            ..ScanOptions::default()
        };
        let listed = list_large_files(root, &options)?;

        let names: Vec<_> = listed.iter().map(|e| (e.relative.as_str(), e.size)).collect();
        assert_eq!(
            names,
            vec![
                ("assets", 500),
                ("assets/img", 300),
                ("assets/img/one.png", 300),
                ("assets/two.png", 200),
                ("main.js", 10),
            ]
        );
        assert!(listed[0].is_dir);

        Ok(())
    }

    #[test]
    fn test_skips_git_directory_and_excludes() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();
        write_sized(&root.join(".git/objects/pack"), 1000);
        write_sized(&root.join("vendor/big.bin"), 900);
        write_sized(&root.join("src/lib.rs"), 10);

        let options = ScanOptions {
            exclude: vec![PathBuf::from("vendor")],
            ..ScanOptions::default()
        };
        let listed = list_large_files(root, &options)?;

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].relative, "src/lib.rs");

        Ok(())
    }

    #[test]
    fn test_progress_phases() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        write_sized(&temp_dir.path().join("file"), 1);

        let phases = Arc::new(Mutex::new(Vec::new()));
        let phases_clone = Arc::clone(&phases);

        LargeFileScanner::new(temp_dir.path(), ScanOptions::default())
            .with_progress(move |progress| {
                phases_clone.lock().unwrap().push(progress.phase);
            })
            .scan()?;

        let phases = phases.lock().unwrap();
        assert_eq!(phases.first(), Some(&ScanPhase::Discovery));
        assert_eq!(phases.last(), Some(&ScanPhase::Complete));
        assert!(phases.contains(&ScanPhase::Filtering));

        Ok(())
    }
}
