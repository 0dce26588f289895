//! Depth-first directory walker
//!
//! Walks a local directory tree with an explicit stack of pending
//! directories. In every directory the data files are visited first, then
//! the subdirectories are descended into one after another, in the order
//! the filesystem enumerates them.
//!
//! Symbolic links are never followed, so the walk always terminates.

use crate::config::HandlerConfig;
use crate::error::{NumsiftError, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A directory waiting to be walked
#[derive(Debug, Clone)]
struct DirTask {
    path: PathBuf,
    /// Depth from root (0 = root)
    depth: usize,
}

/// Counts gathered during a walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Directories read, including the root
    pub dirs: u64,
    /// Data files handed to the visitor
    pub files: u64,
    /// Entries skipped (wrong extension, excluded, symlinks, too deep)
    pub skipped: u64,
}

/// Walker over the data files below a root directory
#[derive(Debug, Clone)]
pub struct DirWalker<'a> {
    config: &'a HandlerConfig,
    ignored: Vec<PathBuf>,
}

impl<'a> DirWalker<'a> {
    pub fn new(config: &'a HandlerConfig) -> Self {
        Self {
            config,
            ignored: Vec::new(),
        }
    }

    /// Never hand this exact path to the visitor
    pub fn ignore(mut self, path: impl Into<PathBuf>) -> Self {
        self.ignored.push(path.into());
        self
    }

    /// Fail with `DirectoryNotFound` unless `root` is an existing directory
    pub fn check_root(root: &Path) -> Result<()> {
        match fs::metadata(root) {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(NumsiftError::DirectoryNotFound {
                path: root.to_path_buf(),
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(NumsiftError::DirectoryNotFound {
                path: root.to_path_buf(),
            }),
            Err(e) => Err(NumsiftError::io(root, e)),
        }
    }

    /// Walk `root`, calling `visit` for every data file
    ///
    /// The first error, from the filesystem or from `visit`, stops the walk
    /// and is returned as-is.
    pub fn walk<F>(&self, root: &Path, mut visit: F) -> Result<WalkStats>
    where
        F: FnMut(&Path) -> Result<()>,
    {
        Self::check_root(root)?;

        let mut stats = WalkStats::default();
        let mut stack = vec![DirTask {
            path: root.to_path_buf(),
            depth: 0,
        }];

        while let Some(task) = stack.pop() {
            stats.dirs += 1;
            let (files, subdirs) = self.read_dir(root, &task, &mut stats)?;

            for file in &files {
                stats.files += 1;
                visit(file)?;
            }

            let child_depth = task.depth + 1;
            if self.config.max_depth.is_some_and(|max| child_depth > max) {
                if !subdirs.is_empty() {
                    debug!(
                        "Not descending into {} subdirectories of {} (max depth {})",
                        subdirs.len(),
                        task.path.display(),
                        task.depth
                    );
                }
                stats.skipped += subdirs.len() as u64;
                continue;
            }

            // Reversed so the first enumerated subdirectory is walked next
            stack.extend(subdirs.into_iter().rev().map(|path| DirTask {
                path,
                depth: child_depth,
            }));
        }

        Ok(stats)
    }

    /// Split a directory's entries into data files and subdirectories
    fn read_dir(
        &self,
        root: &Path,
        task: &DirTask,
        stats: &mut WalkStats,
    ) -> Result<(Vec<PathBuf>, Vec<PathBuf>)> {
        let entries = fs::read_dir(&task.path).map_err(|e| NumsiftError::io(&task.path, e))?;

        let mut files = Vec::new();
        let mut subdirs = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| NumsiftError::io(&task.path, e))?;
            let path = entry.path();
            // Does not follow symlinks
            let file_type = entry.file_type().map_err(|e| NumsiftError::io(&path, e))?;

            if self.config.is_excluded(root, &path) {
                debug!("Excluded {}", path.display());
                stats.skipped += 1;
            } else if file_type.is_dir() {
                subdirs.push(path);
            } else if file_type.is_file() && self.config.is_data_file(&path) {
                if self.ignored.iter().any(|ignored| ignored == &path) {
                    debug!("Ignoring {}", path.display());
                    stats.skipped += 1;
                } else {
                    files.push(path);
                }
            } else {
                debug!("Skipping {}", path.display());
                stats.skipped += 1;
            }
        }

        Ok((files, subdirs))
    }
}
