//! Top navigation bar.

use serde::Serialize;

/// One item of the navigation bar.
///
/// Serialized untagged: a bare string for [`NavbarItem::Link`], an object with
/// `link` for entries and with `children` for dropdown groups.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NavbarItem {
    /// Page link whose label comes from the page itself.
    Link(String),
    /// Labeled link.
    Entry {
        /// Display label.
        text: String,
        /// Target path.
        link: String,
    },
    /// Dropdown group.
    Group {
        /// Display label.
        text: String,
        /// Nested items.
        children: Vec<NavbarItem>,
    },
}

impl NavbarItem {
    /// Bare page link.
    #[must_use]
    pub fn link(path: impl Into<String>) -> Self {
        Self::Link(path.into())
    }

    /// Labeled link.
    #[must_use]
    pub fn entry(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self::Entry {
            text: text.into(),
            link: link.into(),
        }
    }

    /// Dropdown group.
    #[must_use]
    pub fn group(text: impl Into<String>, children: Vec<NavbarItem>) -> Self {
        Self::Group {
            text: text.into(),
            children,
        }
    }

    /// Every link target below this item, depth-first.
    #[must_use]
    pub fn links(&self) -> Vec<&str> {
        match self {
            Self::Link(link) | Self::Entry { link, .. } => vec![link.as_str()],
            Self::Group { children, .. } => children.iter().flat_map(Self::links).collect(),
        }
    }
}

/// The documentation site's navigation bar.
#[must_use]
pub fn default_navbar() -> Vec<NavbarItem> {
    vec![
        NavbarItem::entry("Build An AMM", "/build-a-custom-amm/build-a-custom-amm"),
        NavbarItem::entry("Integration Guides", "/integration-guides/overview"),
        NavbarItem::group(
            "Dev Ref",
            vec![
                NavbarItem::group(
                    "SDK",
                    vec![
                        NavbarItem::entry("Overview", "/developer-reference/sdk/"),
                        NavbarItem::link("/developer-reference/sdk/API"),
                    ],
                ),
                NavbarItem::group(
                    "Contracts",
                    vec![
                        NavbarItem::entry("ABIs", "/developer-reference/contracts/abi"),
                        NavbarItem::entry(
                            "Deployment Addresses",
                            "/developer-reference/contracts/deployment-addresses/mainnet.md",
                        ),
                        NavbarItem::link("/developer-reference/contracts/router-api"),
                        NavbarItem::link("/developer-reference/contracts/batch-router-api"),
                        NavbarItem::link("/developer-reference/contracts/vault-api"),
                        NavbarItem::link("/developer-reference/contracts/error-codes"),
                        NavbarItem::link("/developer-reference/contracts/security"),
                    ],
                ),
                NavbarItem::entry("Authorizer", "/developer-reference/authorizer"),
            ],
        ),
        NavbarItem::entry("Concepts", "/concepts/overview/basics"),
        NavbarItem::entry("Partner Onboarding", "/partner-onboarding/overview"),
        NavbarItem::entry("Data & Analytics", "/data-and-analytics/overview"),
        NavbarItem::entry("Tools", "/tools"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_serialized_variants() {
        let items = vec![
            NavbarItem::link("/tools"),
            NavbarItem::entry("Tools", "/tools"),
            NavbarItem::group("More", vec![NavbarItem::link("/more")]),
        ];

        assert_eq!(
            serde_json::to_value(&items).unwrap(),
            json!([
                "/tools",
                { "text": "Tools", "link": "/tools" },
                { "text": "More", "children": ["/more"] }
            ])
        );
    }

    #[test]
    fn test_default_navbar_top_level_labels() {
        let labels: Vec<_> = default_navbar()
            .iter()
            .map(|item| match item {
                NavbarItem::Entry { text, .. } | NavbarItem::Group { text, .. } => text.clone(),
                NavbarItem::Link(link) => link.clone(),
            })
            .collect();

        assert_eq!(
            labels,
            vec![
                "Build An AMM",
                "Integration Guides",
                "Dev Ref",
                "Concepts",
                "Partner Onboarding",
                "Data & Analytics",
                "Tools",
            ]
        );
    }

    #[test]
    fn test_default_navbar_dev_ref_submenu() {
        let navbar = default_navbar();
        let NavbarItem::Group { children, .. } = &navbar[2] else {
            panic!("expected Dev Ref group");
        };

        assert_eq!(children.len(), 3);
        assert_eq!(
            serde_json::to_value(&children[0]).unwrap(),
            json!({
                "text": "SDK",
                "children": [
                    { "text": "Overview", "link": "/developer-reference/sdk/" },
                    "/developer-reference/sdk/API"
                ]
            })
        );
        assert_eq!(children[1].links().len(), 7);
    }

    #[test]
    fn test_default_navbar_links_are_absolute() {
        for item in default_navbar() {
            for link in item.links() {
                assert!(link.starts_with('/'), "relative navbar link: {link}");
            }
        }
    }
}
