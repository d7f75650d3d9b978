//! `sidenav wizard` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use sidenav_site::{Step, partner_decision_tree, validate_decision_tree};

use super::JsonArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the wizard command.
#[derive(Args)]
pub(crate) struct WizardArgs {
    /// Load the decision tree from a JSON file instead of the built-in one.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Only validate the decision tree; print nothing on success.
    #[arg(long)]
    check: bool,

    #[command(flatten)]
    json: JsonArgs,
}

impl WizardArgs {
    /// Execute the wizard command.
    ///
    /// # Errors
    ///
    /// Returns an error if the tree can't be loaded, is invalid, or the
    /// output can't be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let steps = match &self.input {
            Some(path) => load_steps(path)?,
            None => partner_decision_tree(),
        };

        if let Err(issues) = validate_decision_tree(&steps) {
            for issue in &issues {
                output.error(&format!("  {issue}"));
            }
            return Err(CliError::Validation(format!(
                "decision tree has {} issue(s)",
                issues.len()
            )));
        }

        if self.check {
            output.success(&format!("Decision tree is valid ({} steps)", steps.len()));
            return Ok(());
        }

        if let Some(path) = self.json.emit(&steps)? {
            output.success(&format!(
                "Wrote {} wizard steps to {}",
                steps.len(),
                path.display()
            ));
        }
        Ok(())
    }
}

fn load_steps(path: &Path) -> Result<Vec<Step>, CliError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
