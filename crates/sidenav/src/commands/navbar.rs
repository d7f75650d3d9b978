//! `sidenav navbar` command implementation.

use clap::Args;
use sidenav_site::default_navbar;

use super::JsonArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the navbar command.
#[derive(Args)]
pub(crate) struct NavbarArgs {
    #[command(flatten)]
    json: JsonArgs,
}

impl NavbarArgs {
    /// Execute the navbar command.
    ///
    /// # Errors
    ///
    /// Returns an error if the output can't be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let navbar = default_navbar();
        if let Some(path) = self.json.emit(&navbar)? {
            Output::new().success(&format!(
                "Wrote {} navbar items to {}",
                navbar.len(),
                path.display()
            ));
        }
        Ok(())
    }
}
