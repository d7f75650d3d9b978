//! YAML front-matter parsing for markdown pages.
//!
//! Only the fields the sidebar needs are deserialized; every other key in the
//! header is ignored.

use serde::Deserialize;

/// Line that opens and closes a front-matter block.
const DELIMITER: &str = "---";

/// Sidebar-relevant fields from a page's front-matter.
#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
pub struct FrontMatter {
    /// Position among sibling pages. Lower sorts first.
    #[serde(default)]
    pub order: Option<i64>,
}

impl FrontMatter {
    /// Parse the front-matter of a markdown document.
    ///
    /// A document without a front-matter block (or with an empty one) yields
    /// the default, which has no `order`.
    ///
    /// # Errors
    ///
    /// Returns an error if the block is not valid YAML, is not a mapping, or
    /// `order` is not an integer.
    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        let Some(block) = front_matter_block(content) else {
            return Ok(Self::default());
        };
        if block.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(block)
    }
}

/// Return the YAML between a leading `---` line and the next `---` line.
///
/// The opening delimiter must be the very first line. An unterminated block
/// is not front-matter.
fn front_matter_block(content: &str) -> Option<&str> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.split_inclusive('\n');

    let first = lines.next()?;
    if first.trim_end() != DELIMITER {
        return None;
    }

    let start = first.len();
    let mut offset = start;
    for line in lines {
        if line.trim_end() == DELIMITER {
            return Some(&content[start..offset]);
        }
        offset += line.len();
    }
    None
}
