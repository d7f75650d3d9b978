//! CLI command implementations.

pub(crate) mod navbar;
pub(crate) mod sidebar;
pub(crate) mod wizard;

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::error::CliError;

pub(crate) use navbar::NavbarArgs;
pub(crate) use sidebar::SidebarArgs;
pub(crate) use wizard::WizardArgs;

/// Where and how generated JSON is written.
#[derive(Args, Debug, Default)]
pub(crate) struct JsonArgs {
    /// Write JSON to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON.
    #[arg(long)]
    pretty: bool,
}

impl JsonArgs {
    /// Serialize `value` to the output file, or stdout when none was given.
    ///
    /// Returns the file path that was written, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub(crate) fn emit<T: Serialize>(&self, value: &T) -> Result<Option<&PathBuf>, CliError> {
        let mut json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        json.push('\n');

        if let Some(path) = &self.output {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, json)?;
            return Ok(Some(path));
        }

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(json.as_bytes())?;
        stdout.flush()?;
        Ok(None)
    }
}
