//! Sidebar tree builder.
//!
//! Builds the per-section sidebar from the markdown hierarchy of a
//! [`ContentSource`]. The tree mirrors the directory layout for the first two
//! levels below a section; anything deeper is flattened into its level-2
//! ancestor's group.
//!
//! # Ordering
//!
//! Pages inside one directory are sorted by their front-matter `order`
//! ascending, pages without an order after every page that has one, and ties
//! broken by link path. Subdirectories then become sections, processed in name
//! order. Each section gets a sort key: the integer in its order marker file,
//! or the current length of the list when it has none. Pages are keyed by their
//! index among the sorted pages, so a marker of `2` places a section before the
//! third page. The section is inserted before every sibling whose key is equal
//! or larger, which keeps the list sorted by key; a negative marker puts the
//! section ahead of every page.
//!
//! Pages stay in front of unmarked sections at every level, the top level
//! included. Groups only move ahead of pages through their order marker.
//!
//! # Example
//!
//! ```ignore
//! use std::path::{Path, PathBuf};
//! use std::sync::Arc;
//! use sidenav_site::{SidebarBuilder, SidebarOptions};
//! use sidenav_storage::FsContentSource;
//!
//! let source = Arc::new(FsContentSource::new(PathBuf::from("docs")));
//! let builder = SidebarBuilder::new(source, SidebarOptions::default());
//! let nodes = builder.build_section(Path::new("build"))?;
//! ```

use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use serde::ser::SerializeMap;
use sidenav_storage::{ContentSource, Depth};

use crate::error::SidebarError;
use crate::front_matter::FrontMatter;
use crate::title::SectionTitles;

/// Deepest level whose subdirectories are promoted to sections.
///
/// Levels are 1-based: the section directory itself is level 1. Directories
/// below this level are gathered with a recursive glob instead.
pub const MAX_SECTION_DEPTH: usize = 2;

/// Base name (case-insensitive, without extension) of a directory's index page.
const INDEX_PAGE: &str = "readme";

/// One node of a sidebar tree.
///
/// Serializes to the shape the site renderer consumes: a bare link string for
/// pages and `{ text, collapsible, children }` for groups.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SidebarNode {
    /// Site-relative page link (e.g., "/build/guides/setup").
    Page(String),
    /// Collapsible group built from a subdirectory.
    Section(SidebarSection),
}

/// Sidebar group built from a subdirectory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SidebarSection {
    /// Display title derived from the folder name.
    pub text: String,
    /// Whether the group starts collapsed.
    pub collapsible: bool,
    /// Ordered child nodes.
    pub children: Vec<SidebarNode>,
}

/// Generated sidebars keyed by URL prefix, in insertion order.
///
/// Serializes as a JSON object (e.g., `{"/build": [...], "/concepts": [...]}`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SidebarConfig {
    entries: Vec<(String, Vec<SidebarNode>)>,
}

impl SidebarConfig {
    /// Create an empty sidebar mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sidebar for a prefix, replacing any previous value.
    pub fn insert(&mut self, prefix: impl Into<String>, nodes: Vec<SidebarNode>) {
        let prefix = prefix.into();
        if let Some(entry) = self.entries.iter_mut().find(|(p, _)| *p == prefix) {
            entry.1 = nodes;
        } else {
            self.entries.push((prefix, nodes));
        }
    }

    /// Sidebar for a prefix.
    #[must_use]
    pub fn get(&self, prefix: &str) -> Option<&[SidebarNode]> {
        self.entries
            .iter()
            .find(|(p, _)| p == prefix)
            .map(|(_, nodes)| nodes.as_slice())
    }

    /// Iterate over `(prefix, nodes)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SidebarNode])> {
        self.entries
            .iter()
            .map(|(prefix, nodes)| (prefix.as_str(), nodes.as_slice()))
    }

    /// Number of prefixes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no prefix has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for SidebarConfig {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (prefix, nodes) in &self.entries {
            map.serialize_entry(prefix, nodes)?;
        }
        map.end()
    }
}

/// Conventions of the content tree.
#[derive(Clone, Debug)]
pub struct SidebarOptions {
    /// Directory name excluded from traversal at every depth.
    pub reserved_dir: String,
    /// Marker file name holding a directory's sort key among its siblings.
    pub order_file: String,
    /// Folder names used verbatim as section titles.
    pub title_exceptions: Vec<String>,
}

impl Default for SidebarOptions {
    fn default() -> Self {
        Self {
            reserved_dir: ".vuepress".to_owned(),
            order_file: ".order".to_owned(),
            title_exceptions: vec!["veBAL".to_owned()],
        }
    }
}

/// A page link with its sort key.
#[derive(Debug)]
struct PageEntry {
    path: String,
    order: Option<i64>,
}

/// Total order over page entries: declared orders ascending, undeclared last,
/// then link path.
fn compare_pages(a: &PageEntry, b: &PageEntry) -> Ordering {
    let by_order = match (a.order, b.order) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_order.then_with(|| a.path.cmp(&b.path))
}

/// Join path components with `/` into a site-absolute link.
fn site_link(path: &Path) -> String {
    let mut link = String::new();
    for component in path.components() {
        link.push('/');
        link.push_str(&component.as_os_str().to_string_lossy());
    }
    if link.is_empty() {
        link.push('/');
    }
    link
}

/// Sort key of the entry at `index`.
fn sort_key(index: usize) -> i64 {
    i64::try_from(index).unwrap_or(i64::MAX)
}

/// `base/rel` without a trailing separator when `rel` is empty.
fn join_dir(base: &Path, rel: &Path) -> PathBuf {
    if rel.as_os_str().is_empty() {
        base.to_path_buf()
    } else {
        base.join(rel)
    }
}

/// Builds sidebar trees from a content source.
///
/// Every call reads the content source afresh; nothing is cached.
pub struct SidebarBuilder {
    source: Arc<dyn ContentSource>,
    options: SidebarOptions,
    titles: SectionTitles,
}

impl SidebarBuilder {
    /// Create a builder over `source`.
    #[must_use]
    pub fn new(source: Arc<dyn ContentSource>, options: SidebarOptions) -> Self {
        let titles = SectionTitles::new(options.title_exceptions.iter().cloned());
        Self {
            source,
            options,
            titles,
        }
    }

    /// Build the sidebars for several sections.
    ///
    /// `sections` yields `(url prefix, section directory)` pairs; section
    /// directories are relative to the content root.
    ///
    /// # Errors
    ///
    /// Returns the first [`SidebarError`] encountered; no partial mapping is returned.
    pub fn build_config<I, P, D>(&self, sections: I) -> Result<SidebarConfig, SidebarError>
    where
        I: IntoIterator<Item = (P, D)>,
        P: Into<String>,
        D: AsRef<Path>,
    {
        let mut config = SidebarConfig::new();
        for (prefix, dir) in sections {
            let prefix = prefix.into();
            let nodes = self.build_section(dir.as_ref())?;
            tracing::info!(
                prefix = %prefix,
                dir = %dir.as_ref().display(),
                entries = nodes.len(),
                "Built sidebar section"
            );
            config.insert(prefix, nodes);
        }
        Ok(config)
    }

    /// Build the sidebar of one top-level section directory.
    ///
    /// # Errors
    ///
    /// Returns [`SidebarError`] if the directory is missing, a file can't be
    /// read, front-matter is malformed, or an order marker is not an integer.
    pub fn build_section(&self, section_dir: &Path) -> Result<Vec<SidebarNode>, SidebarError> {
        self.build_level(section_dir, Path::new(""), 1)
    }

    /// Build the nodes of `section_dir/relative_dir` at nesting `level`.
    fn build_level(
        &self,
        section_dir: &Path,
        relative_dir: &Path,
        level: usize,
    ) -> Result<Vec<SidebarNode>, SidebarError> {
        let dir = join_dir(section_dir, relative_dir);

        let candidates: Vec<String> = self
            .source
            .subdirectories(&dir)?
            .into_iter()
            .filter(|name| *name != self.options.reserved_dir)
            .collect();

        // A lone top-level group is always expanded
        let collapsible = !(level == 1 && candidates.len() == 1);

        let depth = if level > MAX_SECTION_DEPTH {
            Depth::Recursive
        } else {
            Depth::Shallow
        };
        let mut pages = self.collect_pages(&dir, relative_dir.as_os_str().is_empty(), depth)?;
        pages.sort_by(compare_pages);

        tracing::debug!(
            dir = %dir.display(),
            level,
            pages = pages.len(),
            subdirectories = candidates.len(),
            "Scanned sidebar directory"
        );

        // Sort keys: a page's index among the sorted pages, a section's marker
        // value or the list length when it was reached. The list stays ordered
        // by key, and a section lands before every sibling with an equal key.
        let mut entries: Vec<(i64, SidebarNode)> = pages
            .into_iter()
            .enumerate()
            .map(|(index, page)| (sort_key(index), SidebarNode::Page(page.path)))
            .collect();

        if level <= MAX_SECTION_DEPTH {
            for name in &candidates {
                let children = self.build_level(section_dir, &relative_dir.join(name), level + 1)?;
                if children.is_empty() {
                    continue;
                }

                let key = self
                    .explicit_position(&dir.join(name))?
                    .unwrap_or_else(|| sort_key(entries.len()));
                let position = entries.partition_point(|(existing, _)| *existing < key);
                entries.insert(
                    position,
                    (
                        key,
                        SidebarNode::Section(SidebarSection {
                            text: self.titles.title(name),
                            collapsible,
                            children,
                        }),
                    ),
                );
            }
        }

        let nodes: Vec<SidebarNode> = entries.into_iter().map(|(_, node)| node).collect();
        Ok(nodes)
    }

    /// Gather the page entries of `dir`.
    ///
    /// `section_root` is true when `dir` is the section directory itself, whose
    /// own index page is left to the site's landing page.
    fn collect_pages(
        &self,
        dir: &Path,
        section_root: bool,
        depth: Depth,
    ) -> Result<Vec<PageEntry>, SidebarError> {
        let mut pages = Vec::new();

        for file in self.source.markdown_files(dir, depth)? {
            if self.is_reserved(dir, &file) {
                continue;
            }

            let content = self.source.read(&file)?;
            let front_matter =
                FrontMatter::parse(&content).map_err(|source| SidebarError::FrontMatter {
                    path: file.clone(),
                    source,
                })?;

            let stem = file.with_extension("");
            let is_index = stem
                .file_name()
                .is_some_and(|name| name.to_string_lossy().eq_ignore_ascii_case(INDEX_PAGE));

            if !is_index {
                pages.push(PageEntry {
                    path: site_link(&stem),
                    order: front_matter.order,
                });
                continue;
            }

            if section_root {
                continue;
            }

            let index_dir = stem.parent().unwrap_or(Path::new(""));
            let mut path = site_link(index_dir);
            if !path.ends_with('/') {
                path.push('/');
            }

            // The scanned directory's own index leads its siblings unless told otherwise
            let order = if index_dir == dir {
                front_matter.order.or(Some(0))
            } else {
                front_matter.order
            };
            pages.push(PageEntry { path, order });
        }

        Ok(pages)
    }

    /// Whether `file` lies inside a reserved directory below `dir`.
    fn is_reserved(&self, dir: &Path, file: &Path) -> bool {
        file.strip_prefix(dir).is_ok_and(|rel| {
            rel.parent().is_some_and(|parents| {
                parents
                    .components()
                    .any(|c| c.as_os_str() == self.options.reserved_dir.as_str())
            })
        })
    }

    /// Read the sort key from `dir`'s order marker, if present.
    fn explicit_position(&self, dir: &Path) -> Result<Option<i64>, SidebarError> {
        let path = dir.join(&self.options.order_file);
        if !self.source.exists(&path) {
            return Ok(None);
        }

        let raw = self.source.read(&path)?;
        let content = raw.trim();
        content
            .parse::<i64>()
            .map(Some)
            .map_err(|_| SidebarError::InvalidOrderFile {
                path,
                content: content.to_owned(),
            })
    }
}
