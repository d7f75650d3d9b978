//! Navigation data for the documentation site.
//!
//! This crate provides:
//! - [`SidebarBuilder`]: per-section sidebar trees built from the markdown hierarchy
//! - [`default_navbar`]: the top navigation bar
//! - [`partner_decision_tree`]: the partner product wizard and its validation
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::{Path, PathBuf};
//! use std::sync::Arc;
//! use sidenav_site::{SidebarBuilder, SidebarOptions};
//! use sidenav_storage::FsContentSource;
//!
//! let source = Arc::new(FsContentSource::new(PathBuf::from("docs")));
//! let builder = SidebarBuilder::new(source, SidebarOptions::default());
//!
//! let sidebars = builder.build_config([("/build", "build"), ("/concepts", "concepts")])?;
//! println!("{}", sidebars.len());
//! # Ok(())
//! # }
//! ```

mod decision_tree;
mod error;
mod front_matter;
mod navbar;
mod sidebar;
mod title;

pub use decision_tree::{
    Choice, DecisionTreeIssue, Step, partner_decision_tree, validate_decision_tree,
};
pub use error::SidebarError;
pub use front_matter::FrontMatter;
pub use navbar::{NavbarItem, default_navbar};
pub use sidebar::{
    MAX_SECTION_DEPTH, SidebarBuilder, SidebarConfig, SidebarNode, SidebarOptions, SidebarSection,
};
pub use title::SectionTitles;
