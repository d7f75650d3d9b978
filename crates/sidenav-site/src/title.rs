//! Section titles derived from folder names.

use std::collections::HashSet;

/// Converts folder names into sidebar section titles.
///
/// Folder names listed as exceptions (proper nouns such as `veBAL`) are used
/// verbatim; every other name has `-` replaced by spaces and is title-cased.
#[derive(Debug, Clone, Default)]
pub struct SectionTitles {
    exceptions: HashSet<String>,
}

impl SectionTitles {
    /// Create a converter with the given verbatim folder names.
    #[must_use]
    pub fn new<I, S>(exceptions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            exceptions: exceptions.into_iter().map(Into::into).collect(),
        }
    }

    /// Title for a section folder.
    #[must_use]
    pub fn title(&self, folder: &str) -> String {
        if self.exceptions.contains(folder) {
            return folder.to_owned();
        }
        titleize(&folder.replace('-', " "))
    }
}

/// Lower-case `text`, then capitalize the first letter of every word.
///
/// A word starts at the beginning of the string or after whitespace or `-`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(titleize("data and analytics"), "Data And Analytics");
/// assert_eq!(titleize("SDK"), "Sdk");
/// ```
fn titleize(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if at_word_start && !ch.is_whitespace() {
            result.extend(ch.to_uppercase());
        } else {
            result.extend(ch.to_lowercase());
        }
        at_word_start = ch.is_whitespace() || ch == '-';
    }
    result
}
