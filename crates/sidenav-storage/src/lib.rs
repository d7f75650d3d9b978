//! Content storage abstraction for the sidenav navigation generator.
//!
//! This crate provides a [`ContentSource`] trait for abstracting directory listing
//! and file retrieval from the underlying storage backend. This enables:
//!
//! - **Unit testing** of the sidebar builder without touching the real filesystem
//! - **Clean separation** between navigation logic and I/O operations
//!
//! # Architecture
//!
//! The crate provides:
//! - [`ContentSource`] trait with `subdirectories()`, `markdown_files()`, `read()` and `exists()`
//! - [`FsContentSource`] implementation for the local filesystem
//! - [`MockContentSource`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::{Path, PathBuf};
//! use sidenav_storage::{ContentSource, Depth, FsContentSource};
//!
//! let source = FsContentSource::new(PathBuf::from("docs"));
//! for page in source.markdown_files(Path::new("build"), Depth::Shallow)? {
//!     println!("{}", page.display());
//! }
//! ```

mod fs;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod storage;

pub use fs::FsContentSource;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockContentSource;
pub use storage::{ContentSource, Depth, StorageError, StorageErrorKind};
