//! CLI argument parsing via clap.

use clap::{Parser, Subcommand};
use pantry::build_info;

/// Pantry companion: themed terminal display with rotating background media,
/// food image lookup, and dish suggestions.
#[derive(Debug, Parser)]
#[command(
    name = "pantry",
    version = build_info::VERSION,
    long_version = build_info::LONG_VERSION,
    after_help = build_info::HELP_FOOTER
)]
pub struct Args {
    /// Path to config file (default: ./pantry.toml or ~/.config/pantry/pantry.toml).
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,

    /// Disable color output.
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Follow theme and background media changes interactively (default).
    Run,
    /// Look up a product image URL for a food name.
    Image {
        /// Food name, e.g. "greek yogurt".
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Ask for dishes that use the given ingredients.
    Suggest {
        #[arg(required = true, num_args = 1..)]
        ingredients: Vec<String>,
    },
    /// Write the default config to ~/.config/pantry/pantry.toml.
    Init {
        /// Replace an existing file (a timestamped backup is kept).
        #[arg(long)]
        force: bool,
    },
}

impl Args {
    /// Subcommand to execute; bare `pantry` means `pantry run`.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Run)
    }
}
