//! Command-line interface for termfile.
//!
//! Parses arguments using clap and provides the [`Cli`] struct containing
//! all user-specified options.

use crate::registry::DRY_RUN;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for termfile.
///
/// # Examples
///
/// ```bash
/// # Open the layout for a project in ~/.config/termfile/myapp.toml
/// termfile myapp
///
/// # Run a specific Termfile through tmux
/// termfile -f ./Termfile.toml --driver tmux
///
/// # Show what would happen without touching the terminal
/// termfile myapp --dry-run
/// ```
#[derive(Parser, Debug)]
#[command(name = "termfile")]
#[command(version)]
#[command(about = "Open terminal windows, tabs and split panes from a Termfile")]
#[command(long_about = "Termfile reproduces a terminal layout described in TOML.\n\n\
    Windows, tabs and split panes are opened in the running terminal\n\
    (iTerm2 or tmux) and each one is sent its commands.")]
pub struct Cli {
    /// Project name (looked up as <config dir>/termfile/<PROJECT>.toml).
    #[arg(value_name = "PROJECT")]
    pub project: Option<String>,

    /// Path to a Termfile. Overrides PROJECT.
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Run the Termfile's setup commands instead of opening the layout.
    #[arg(short, long)]
    pub setup: bool,

    /// Terminal driver to use (default: first one valid for this terminal).
    #[arg(short, long, value_name = "NAME")]
    pub driver: Option<String>,

    /// Print the actions instead of performing them.
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// List all projects in the config directory.
    #[arg(short, long)]
    pub list: bool,

    /// List the available terminal drivers.
    #[arg(long)]
    pub drivers: bool,

    /// Log each step.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// The driver name to select, if any was forced.
    ///
    /// `--dry-run` wins over `--driver`.
    pub fn driver_name(&self) -> Option<&str> {
        if self.dry_run {
            Some(DRY_RUN)
        } else {
            self.driver.as_deref()
        }
    }

    /// Default log filter for the verbosity level.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
