//! Sidebar generation errors.

use std::path::PathBuf;

use sidenav_storage::StorageError;

/// Error returned when sidebar generation fails.
///
/// Any error aborts generation for the whole section; there is no partial output.
#[derive(Debug, thiserror::Error)]
pub enum SidebarError {
    /// Directory listing or file read failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// A page's front-matter could not be parsed.
    #[error("Invalid front-matter in {}: {source}", .path.display())]
    FrontMatter {
        /// Page path relative to the content root.
        path: PathBuf,
        /// YAML error.
        source: serde_yaml::Error,
    },
    /// An order marker file does not contain an integer.
    #[error("Invalid order file {}: expected an integer, got '{content}'", .path.display())]
    InvalidOrderFile {
        /// Marker file path relative to the content root.
        path: PathBuf,
        /// Trimmed file content.
        content: String,
    },
}
