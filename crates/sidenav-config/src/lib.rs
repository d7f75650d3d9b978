//! Configuration management for sidenav.
//!
//! Parses `sidenav.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! `content.root` supports `~`, `$VAR` and `${VAR}` expansion. Referencing
//! an unset variable is an error.
//!
//! ## Defaults
//!
//! Without a config file the content root is `docs/` next to the current
//! directory and the sidebar covers the seven top-level sections of the
//! documentation site.

mod expand;

use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override content root directory.
    pub content_root: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "sidenav.toml";

/// Folder names that are used verbatim as section titles.
const DEFAULT_TITLE_EXCEPTIONS: &[&str] = &["veBAL"];

/// Sidebar sections of the documentation site: `(url prefix, directory)`.
const DEFAULT_SECTIONS: &[(&str, &str)] = &[
    ("/build", "build"),
    ("/concepts", "concepts"),
    ("/partner-onboarding", "partner-onboarding"),
    ("/data-and-analytics", "data-and-analytics"),
    ("/integration-guides", "integration-guides"),
    ("/tools", "tools"),
    ("/developer-reference/", "developer-reference"),
];

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Content tree configuration (paths are relative strings from TOML).
    content: ContentConfigRaw,
    /// Sidebar configuration.
    pub sidebar: SidebarConfig,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw content configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ContentConfigRaw {
    root: Option<String>,
    reserved_dir: Option<String>,
    order_file: Option<String>,
}

/// Resolved content tree configuration with absolute paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentConfig {
    /// Content root directory. Stripped from generated links.
    pub root: PathBuf,
    /// Directory name excluded from traversal at every depth.
    pub reserved_dir: String,
    /// Marker file name holding a directory's explicit sidebar position.
    pub order_file: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("docs"),
            reserved_dir: ".vuepress".to_owned(),
            order_file: ".order".to_owned(),
        }
    }
}

/// Sidebar configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SidebarConfig {
    /// Folder names used verbatim as section titles instead of being title-cased.
    pub title_exceptions: Vec<String>,
    /// Top-level sections, in output order.
    pub sections: Vec<SectionConfig>,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            title_exceptions: DEFAULT_TITLE_EXCEPTIONS
                .iter()
                .map(|&name| name.to_owned())
                .collect(),
            sections: DEFAULT_SECTIONS
                .iter()
                .map(|&(prefix, dir)| SectionConfig {
                    prefix: prefix.to_owned(),
                    dir: dir.to_owned(),
                })
                .collect(),
        }
    }
}

/// One top-level sidebar section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SectionConfig {
    /// URL prefix the site renderer matches against (e.g., "/build").
    pub prefix: String,
    /// Section directory relative to the content root (e.g., "build").
    pub dir: String,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`content.root`").
        field: String,
        /// Error message from the expander.
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a field to be a single, plain path component (a file or directory name).
fn require_file_name(value: &str, field: &str) -> Result<(), ConfigError> {
    require_non_empty(value, field)?;
    let mut components = Path::new(value).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(ConfigError::Validation(format!(
            "{field} must be a single file name, got '{value}'"
        ))),
    }
}

/// Require a field to be a relative path that stays inside the content root.
fn require_relative_dir(value: &str, field: &str) -> Result<(), ConfigError> {
    require_non_empty(value, field)?;
    if Path::new(value)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
    {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!(
            "{field} must be a relative path inside the content root, got '{value}'"
        )))
    }
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `sidenav.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(content_root) = &settings.content_root {
            self.content_resolved.root.clone_from(content_root);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        let defaults = ContentConfig::default();
        Self {
            content: ContentConfigRaw::default(),
            sidebar: SidebarConfig::default(),
            content_resolved: ContentConfig {
                root: base.join(&defaults.root),
                ..defaults
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        // Validate configuration after loading and resolution
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_content()?;
        self.validate_sidebar()?;
        Ok(())
    }

    /// Validate content configuration.
    fn validate_content(&self) -> Result<(), ConfigError> {
        require_file_name(&self.content_resolved.reserved_dir, "content.reserved_dir")?;
        require_file_name(&self.content_resolved.order_file, "content.order_file")?;
        Ok(())
    }

    /// Validate sidebar configuration.
    fn validate_sidebar(&self) -> Result<(), ConfigError> {
        for name in &self.sidebar.title_exceptions {
            require_non_empty(name, "sidebar.title_exceptions")?;
        }

        let mut seen = HashSet::new();
        for section in &self.sidebar.sections {
            require_non_empty(&section.prefix, "sidebar.sections.prefix")?;
            if !section.prefix.starts_with('/') {
                return Err(ConfigError::Validation(format!(
                    "sidebar.sections.prefix must start with '/', got '{}'",
                    section.prefix
                )));
            }
            require_relative_dir(&section.dir, "sidebar.sections.dir")?;
            if !seen.insert(section.prefix.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate sidebar section prefix '{}'",
                    section.prefix
                )));
            }
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref root) = self.content.root {
            self.content.root = Some(expand::expand_env(root, "content.root")?);
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let defaults = ContentConfig::default();
        let raw = &self.content;

        self.content_resolved = ContentConfig {
            root: raw
                .root
                .as_deref()
                .map_or_else(|| config_dir.join(&defaults.root), |r| config_dir.join(r)),
            reserved_dir: raw.reserved_dir.clone().unwrap_or(defaults.reserved_dir),
            order_file: raw.order_file.clone().unwrap_or(defaults.order_file),
        };
    }
}
