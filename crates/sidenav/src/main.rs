//! Sidenav CLI - Navigation generator for the documentation site.
//!
//! Provides commands for:
//! - `sidebar`: Build the per-section sidebars from the markdown tree
//! - `navbar`: Emit the top navigation bar
//! - `wizard`: Emit or validate the partner product wizard

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{NavbarArgs, SidebarArgs, WizardArgs};
use output::Output;

/// Sidenav - Navigation generator for the documentation site.
#[derive(Parser)]
#[command(name = "sidenav", version, about)]
struct Cli {
    /// Enable verbose output (info-level logging).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build sidebars from the content directory.
    Sidebar(SidebarArgs),
    /// Print the navigation bar.
    Navbar(NavbarArgs),
    /// Print or validate the partner product wizard.
    Wizard(WizardArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Sidebar(args) => args.execute(),
        Commands::Navbar(args) => args.execute(),
        Commands::Wizard(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
