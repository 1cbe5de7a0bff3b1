//! # Termfile
//!
//! Opens terminal windows, tabs, and split panes from a TOML Termfile and
//! sends each of them its commands.
//!
//! A Termfile describes windows, their tabs, and up to two levels of split
//! panes. Termfile turns that tree into an ordered series of terminal
//! actions (open window, open tab, split, select pane, write) and performs
//! them against the terminal it runs in.
//!
//! ## Features
//!
//! - **Windows and tabs**: the `default` window and tab reuse what is already open
//! - **Panes**: top-level panes side by side, each optionally split top to bottom
//! - **Before commands**: shared commands prepended to every tab of a window
//! - **Drivers**: iTerm2 (macOS), tmux, and a dry-run driver that prints actions
//!
//! ## Quick Example
//!
//! ```toml
//! # ~/.config/termfile/myapp.toml
//!
//! [windows.default]
//! before = "cd ~/src/myapp"
//!
//! [windows.default.tabs.server]
//! name = "Server"
//! commands = "cargo run"
//!
//! [windows.default.tabs.shells]
//! panes = ["htop", { commands = "git status", panes = ["cargo test"] }]
//! ```
//!
//! ## Architecture
//!
//! The crate is organized into these modules:
//!
//! - [`layout`]: the window/tab/pane tree
//! - [`builder`]: construction protocol for the tree
//! - [`config`]: TOML Termfile parsing
//! - [`loader`]: Termfile discovery and loading
//! - [`executor`]: tree-to-terminal-actions translation
//! - [`driver`]: terminal drivers
//! - [`registry`]: driver registration and selection
//! - [`cli`]: Command-line argument parsing with clap
//! - [`error`]: Error types

pub mod builder;
pub mod cli;
pub mod config;
pub mod driver;
pub mod error;
pub mod executor;
pub mod layout;
pub mod loader;
pub mod registry;

pub use builder::ConfigBuilder;
pub use config::{Cmd, Termfile};
pub use driver::{Direction, TabHandle, TerminalDriver, TitleStrategy};
pub use error::{Result, TermfileError};
pub use executor::Executor;
pub use layout::{Config, Pane, PaneKey, Tab, TabKind, Window, WindowKind};
