//! Mock content source for testing.
//!
//! Provides [`MockContentSource`] for unit testing without filesystem access.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::storage::{ContentSource, Depth, StorageError};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Mock content source for testing.
///
/// Stores files and directories in memory. Directories are created
/// implicitly for every ancestor of an added file, and the content root
/// (`""`) always exists.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use sidenav_storage::{ContentSource, Depth, MockContentSource};
///
/// let source = MockContentSource::new()
///     .with_file("build/README.md", "# Build")
///     .with_file("build/guides/.order", "0");
///
/// let dirs = source.subdirectories(Path::new("build")).unwrap();
/// ```
#[derive(Debug)]
pub struct MockContentSource {
    files: BTreeMap<PathBuf, String>,
    dirs: BTreeSet<PathBuf>,
}

impl Default for MockContentSource {
    fn default() -> Self {
        let mut dirs = BTreeSet::new();
        dirs.insert(PathBuf::new());
        Self {
            files: BTreeMap::new(),
            dirs,
        }
    }
}

impl MockContentSource {
    /// Create a new mock content source containing only the root directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with the given content, creating its ancestor directories.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let path: PathBuf = path.into();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.files.insert(path, content.into());
        self
    }

    /// Add an (empty) directory, creating its ancestors.
    #[must_use]
    pub fn with_dir(mut self, path: impl Into<PathBuf>) -> Self {
        let path: PathBuf = path.into();
        self.add_dir(&path);
        self
    }

    fn add_dir(&mut self, path: &Path) {
        for ancestor in path.ancestors() {
            self.dirs.insert(ancestor.to_path_buf());
        }
    }

    fn require_dir(&self, dir: &Path) -> Result<(), StorageError> {
        if self.dirs.contains(dir) {
            Ok(())
        } else {
            Err(StorageError::not_found(dir).with_backend(BACKEND))
        }
    }
}

impl ContentSource for MockContentSource {
    fn subdirectories(&self, dir: &Path) -> Result<Vec<String>, StorageError> {
        self.require_dir(dir)?;
        Ok(self
            .dirs
            .iter()
            .filter(|d| d.as_path() != dir && d.parent() == Some(dir))
            .filter_map(|d| d.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect())
    }

    fn markdown_files(&self, dir: &Path, depth: Depth) -> Result<Vec<PathBuf>, StorageError> {
        self.require_dir(dir)?;
        Ok(self
            .files
            .keys()
            .filter(|path| {
                let Ok(rel) = path.strip_prefix(dir) else {
                    return false;
                };
                let components: Vec<_> = rel
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect();
                let Some((name, parents)) = components.split_last() else {
                    return false;
                };
                if depth == Depth::Shallow && !parents.is_empty() {
                    return false;
                }
                name.ends_with(".md") && !components.iter().any(|c| is_hidden(c))
            })
            .cloned()
            .collect())
    }

    fn read(&self, path: &Path) -> Result<String, StorageError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::not_found(path).with_backend(BACKEND))
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }
}
