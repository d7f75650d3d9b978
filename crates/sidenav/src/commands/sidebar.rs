//! `sidenav sidebar` command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use sidenav_config::{CliSettings, Config, SectionConfig};
use sidenav_site::{SidebarBuilder, SidebarOptions};
use sidenav_storage::FsContentSource;

use super::JsonArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the sidebar command.
#[derive(Args)]
pub(crate) struct SidebarArgs {
    /// Path to configuration file (default: auto-discover sidenav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content root directory (overrides config).
    #[arg(long)]
    content_root: Option<PathBuf>,

    /// Only build the section with this URL prefix (repeatable).
    #[arg(short, long = "section", value_name = "PREFIX")]
    sections: Vec<String>,

    #[command(flatten)]
    json: JsonArgs,
}

impl SidebarArgs {
    /// Execute the sidebar command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or sidebar generation fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            content_root: self.content_root,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let sections = select_sections(&config.sidebar.sections, &self.sections)?;

        let content = &config.content_resolved;
        let source = Arc::new(FsContentSource::new(content.root.clone()));
        tracing::info!(root = %source.root().display(), sections = sections.len(), "Building sidebars");

        let options = SidebarOptions {
            reserved_dir: content.reserved_dir.clone(),
            order_file: content.order_file.clone(),
            title_exceptions: config.sidebar.title_exceptions.clone(),
        };
        let builder = SidebarBuilder::new(source, options);
        let sidebars = builder.build_config(
            sections
                .iter()
                .map(|section| (section.prefix.as_str(), section.dir.as_str())),
        )?;

        if let Some(path) = self.json.emit(&sidebars)? {
            Output::new().success(&format!(
                "Wrote {} sidebars to {}",
                sidebars.len(),
                path.display()
            ));
        }
        Ok(())
    }
}

/// Narrow configured sections to the requested prefixes, keeping config order.
///
/// An empty request selects every section.
fn select_sections<'a>(
    configured: &'a [SectionConfig],
    requested: &[String],
) -> Result<Vec<&'a SectionConfig>, CliError> {
    if requested.is_empty() {
        return Ok(configured.iter().collect());
    }

    if let Some(unknown) = requested
        .iter()
        .find(|prefix| !configured.iter().any(|s| s.prefix == **prefix))
    {
        return Err(CliError::Validation(format!(
            "unknown sidebar section '{unknown}'"
        )));
    }

    Ok(configured
        .iter()
        .filter(|section| requested.contains(&section.prefix))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sections() -> Vec<SectionConfig> {
        vec![
            SectionConfig {
                prefix: "/build".to_owned(),
                dir: "build".to_owned(),
            },
            SectionConfig {
                prefix: "/tools".to_owned(),
                dir: "tools".to_owned(),
            },
        ]
    }

    #[test]
    fn test_select_all_by_default() {
        let configured = sections();
        let selected = select_sections(&configured, &[]).unwrap();
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn test_select_keeps_config_order() {
        let configured = sections();
        let requested = vec!["/tools".to_owned(), "/build".to_owned()];

        let selected = select_sections(&configured, &requested).unwrap();

        let prefixes: Vec<_> = selected.iter().map(|s| s.prefix.as_str()).collect();
        assert_eq!(prefixes, vec!["/build", "/tools"]);
    }

    #[test]
    fn test_select_unknown_prefix() {
        let configured = sections();
        let requested = vec!["/concepts".to_owned()];

        let err = select_sections(&configured, &requested).unwrap_err();

        assert_eq!(err.to_string(), "unknown sidebar section '/concepts'");
    }

    #[test]
    fn test_execute_writes_sidebars() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        std::fs::create_dir_all(root.join("docs/build/guides")).unwrap();
        std::fs::write(root.join("docs/build/intro.md"), "# Intro").unwrap();
        std::fs::write(root.join("docs/build/guides/setup.md"), "# Setup").unwrap();
        std::fs::write(
            root.join("sidenav.toml"),
            "[sidebar]\nsections = [{ prefix = \"/build\", dir = \"build\" }]\n",
        )
        .unwrap();
        let out = root.join("sidebar.json");

        let args = SidebarArgs {
            config: Some(root.join("sidenav.toml")),
            content_root: None,
            sections: Vec::new(),
            json: JsonArgs {
                output: Some(out.clone()),
                pretty: false,
            },
        };
        args.execute().unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "/build": [
                    "/build/intro",
                    { "text": "Guides", "collapsible": false, "children": ["/build/guides/setup"] }
                ]
            })
        );
    }
}
