//! Filesystem content source.
//!
//! Provides [`FsContentSource`] for reading a documentation tree from the local
//! filesystem. Markdown discovery walks directories manually and matches file
//! names against a glob pattern, mirroring how the site generator globs
//! `dir/*.md` and `dir/**/*.md`.

use std::fs;
use std::path::{Component, Path, PathBuf};

use glob::Pattern;

use crate::storage::{ContentSource, Depth, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Default file name pattern for markdown pages.
const MARKDOWN_PATTERN: &str = "*.md";

/// Filesystem content source.
///
/// All paths passed to and returned from the [`ContentSource`] methods are
/// relative to `root`.
///
/// # Example
///
/// ```ignore
/// use std::path::{Path, PathBuf};
/// use sidenav_storage::{ContentSource, Depth, FsContentSource};
///
/// let source = FsContentSource::new(PathBuf::from("docs"));
/// let pages = source.markdown_files(Path::new("build"), Depth::Shallow)?;
/// ```
#[derive(Debug)]
pub struct FsContentSource {
    /// Content root directory.
    root: PathBuf,
    /// File name pattern for markdown pages.
    markdown_pattern: Pattern,
}

impl FsContentSource {
    /// Create a new filesystem content source rooted at `root`.
    ///
    /// # Panics
    ///
    /// Panics if the built-in markdown pattern fails to compile.
    /// This should never happen as the pattern is a compile-time constant.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        let root = if root.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            root
        };
        Self {
            root,
            markdown_pattern: Pattern::new(MARKDOWN_PATTERN).expect("invalid markdown pattern"),
        }
    }

    /// Content root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validate that a path doesn't escape the content root.
    ///
    /// Rejects absolute paths and paths containing parent directory
    /// components (`..`).
    fn validate_path(path: &Path) -> Result<(), StorageError> {
        let escapes = path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)));

        if escapes {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(path)
                .with_backend(BACKEND));
        }
        Ok(())
    }

    fn full_path(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }

    /// Walk `dir` collecting markdown files into `out`.
    fn collect_markdown(
        &self,
        dir: &Path,
        depth: Depth,
        out: &mut Vec<PathBuf>,
    ) -> Result<(), StorageError> {
        let full = self.full_path(dir);
        let entries = fs::read_dir(&full)
            .map_err(|e| StorageError::io(e, Some(full.clone())).with_backend(BACKEND))?;

        for entry in entries {
            let entry =
                entry.map_err(|e| StorageError::io(e, Some(full.clone())).with_backend(BACKEND))?;
            let name = entry.file_name().to_string_lossy().into_owned();

            // Globs never match hidden files or descend into hidden directories
            if name.starts_with('.') {
                continue;
            }

            let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
            let rel = dir.join(&name);
            if is_dir {
                if depth == Depth::Recursive {
                    self.collect_markdown(&rel, depth, out)?;
                }
            } else if self.markdown_pattern.matches(&name) {
                out.push(rel);
            }
        }

        Ok(())
    }
}

impl ContentSource for FsContentSource {
    fn subdirectories(&self, dir: &Path) -> Result<Vec<String>, StorageError> {
        Self::validate_path(dir)?;
        let full = self.full_path(dir);
        let entries = fs::read_dir(&full)
            .map_err(|e| StorageError::io(e, Some(full.clone())).with_backend(BACKEND))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry =
                entry.map_err(|e| StorageError::io(e, Some(full.clone())).with_backend(BACKEND))?;
            // lstat semantics: a symlink to a directory is not a section
            if entry.file_type().is_ok_and(|t| t.is_dir()) {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }

        names.sort();
        Ok(names)
    }

    fn markdown_files(&self, dir: &Path, depth: Depth) -> Result<Vec<PathBuf>, StorageError> {
        Self::validate_path(dir)?;
        let mut files = Vec::new();
        self.collect_markdown(dir, depth, &mut files)?;
        files.sort();
        Ok(files)
    }

    fn read(&self, path: &Path) -> Result<String, StorageError> {
        Self::validate_path(path)?;
        let full = self.full_path(path);
        fs::read_to_string(&full).map_err(|e| StorageError::io(e, Some(full)).with_backend(BACKEND))
    }

    fn exists(&self, path: &Path) -> bool {
        Self::validate_path(path).is_ok() && self.full_path(path).is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_fs_content_source_is_send_sync() {
        assert_send_sync::<FsContentSource>();
    }

    #[test]
    fn test_empty_root_is_current_dir() {
        assert_eq!(FsContentSource::new(PathBuf::new()).root(), Path::new("."));
        assert_eq!(
            FsContentSource::new(PathBuf::from("docs")).root(),
            Path::new("docs")
        );
    }

    fn create_test_dir() -> tempfile::TempDir {
        tempfile::tempdir().unwrap()
    }

    #[test]
    fn test_subdirectories_sorted_and_includes_hidden() {
        let temp_dir = create_test_dir();
        let build = temp_dir.path().join("build");
        fs::create_dir_all(build.join("zeta")).unwrap();
        fs::create_dir_all(build.join("alpha")).unwrap();
        fs::create_dir_all(build.join(".vuepress")).unwrap();
        fs::write(build.join("README.md"), "# Build").unwrap();

        let source = FsContentSource::new(temp_dir.path().to_path_buf());
        let dirs = source.subdirectories(Path::new("build")).unwrap();

        assert_eq!(dirs, vec![".vuepress", "alpha", "zeta"]);
    }

    #[test]
    fn test_subdirectories_missing_dir() {
        let temp_dir = create_test_dir();
        let source = FsContentSource::new(temp_dir.path().to_path_buf());

        let err = source.subdirectories(Path::new("missing")).unwrap_err();

        assert_eq!(err.kind(), StorageErrorKind::NotFound);
        assert_eq!(err.backend(), Some("Fs"));
    }

    #[test]
    fn test_markdown_files_shallow() {
        let temp_dir = create_test_dir();
        let build = temp_dir.path().join("build");
        fs::create_dir_all(build.join("guides")).unwrap();
        fs::write(build.join("b.md"), "").unwrap();
        fs::write(build.join("a.md"), "").unwrap();
        fs::write(build.join("notes.txt"), "").unwrap();
        fs::write(build.join("guides/setup.md"), "").unwrap();

        let source = FsContentSource::new(temp_dir.path().to_path_buf());
        let files = source
            .markdown_files(Path::new("build"), Depth::Shallow)
            .unwrap();

        assert_eq!(
            files,
            vec![PathBuf::from("build/a.md"), PathBuf::from("build/b.md")]
        );
    }

    #[test]
    fn test_markdown_files_recursive_skips_hidden() {
        let temp_dir = create_test_dir();
        let build = temp_dir.path().join("build");
        fs::create_dir_all(build.join("guides/deep")).unwrap();
        fs::create_dir_all(build.join(".vuepress")).unwrap();
        fs::write(build.join("a.md"), "").unwrap();
        fs::write(build.join(".draft.md"), "").unwrap();
        fs::write(build.join("guides/deep/z.md"), "").unwrap();
        fs::write(build.join(".vuepress/config.md"), "").unwrap();

        let source = FsContentSource::new(temp_dir.path().to_path_buf());
        let files = source
            .markdown_files(Path::new("build"), Depth::Recursive)
            .unwrap();

        assert_eq!(
            files,
            vec![
                PathBuf::from("build/a.md"),
                PathBuf::from("build/guides/deep/z.md"),
            ]
        );
    }

    #[test]
    fn test_markdown_extension_is_case_sensitive() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("upper.MD"), "").unwrap();
        fs::write(temp_dir.path().join("lower.md"), "").unwrap();

        let source = FsContentSource::new(temp_dir.path().to_path_buf());
        let files = source.markdown_files(Path::new(""), Depth::Shallow).unwrap();

        assert_eq!(files, vec![PathBuf::from("lower.md")]);
    }

    #[test]
    fn test_read_and_exists() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join(".order"), "2\n").unwrap();

        let source = FsContentSource::new(temp_dir.path().to_path_buf());

        assert!(source.exists(Path::new(".order")));
        assert!(!source.exists(Path::new("missing")));
        assert_eq!(source.read(Path::new(".order")).unwrap(), "2\n");
    }

    #[test]
    fn test_read_missing() {
        let temp_dir = create_test_dir();
        let source = FsContentSource::new(temp_dir.path().to_path_buf());

        let err = source.read(Path::new("missing.md")).unwrap_err();

        assert_eq!(err.kind(), StorageErrorKind::NotFound);
    }

    #[test]
    fn test_rejects_parent_dir_traversal() {
        let temp_dir = create_test_dir();
        let source = FsContentSource::new(temp_dir.path().to_path_buf());

        let err = source.read(Path::new("../etc/passwd")).unwrap_err();

        assert_eq!(err.kind(), StorageErrorKind::InvalidPath);
        assert!(!source.exists(Path::new("../etc/passwd")));
    }

    #[test]
    fn test_exists_is_false_for_directories() {
        let temp_dir = create_test_dir();
        fs::create_dir(temp_dir.path().join("guides")).unwrap();
        let source = FsContentSource::new(temp_dir.path().to_path_buf());

        assert!(!source.exists(Path::new("guides")));
    }
}
