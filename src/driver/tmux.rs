//! Tmux driver.
//!
//! Drives the tmux session termfile runs in through the `tmux` CLI. Tmux has
//! no tabs, so every tab is a tmux window; tab handles are pane ids (`%3`).
//!
//! Titles are set with a prompt escape rather than `rename-window`, so they
//! follow the pane and survive `automatic-rename`.

use super::{Direction, TabHandle, TerminalDriver, TitleStrategy, run_command};
use crate::error::{Result, TermfileError};
use crate::layout::{NAME_OPTION, Options};
use tracing::debug;

/// Window option naming the starting directory (`new-window -c`).
pub const DIR_OPTION: &str = "dir";

/// Check if we're running inside a tmux session.
///
/// Checks for the `TMUX` environment variable, which tmux sets when active.
pub fn in_tmux() -> bool {
    std::env::var("TMUX").is_ok()
}

/// Drives tmux through its CLI.
#[derive(Debug, Default)]
pub struct TmuxDriver;

impl TmuxDriver {
    /// # Errors
    ///
    /// [`TermfileError::DriverError`] if not running inside tmux.
    pub fn new() -> Result<Self> {
        if !in_tmux() {
            return Err(TermfileError::DriverError("not running inside tmux".into()));
        }
        Ok(TmuxDriver)
    }

    fn tmux(&self, args: &[&str]) -> Result<String> {
        debug!(?args, "tmux");
        run_command("tmux", args)
    }

    /// Create a new tmux window and return its pane id.
    fn new_window(&self, options: &Options) -> Result<TabHandle> {
        let mut args = vec!["new-window", "-P", "-F", "#{pane_id}"];
        if let Some(name) = options.get(NAME_OPTION) {
            args.push("-n");
            args.push(name);
        }
        if let Some(dir) = options.get(DIR_OPTION) {
            args.push("-c");
            args.push(dir);
        }
        self.tmux(&args).map(TabHandle)
    }
}

/// `select-pane` flag for a direction.
pub fn select_flag(direction: Direction) -> &'static str {
    match direction {
        Direction::Above => "-U",
        Direction::Below => "-D",
        Direction::Left => "-L",
        Direction::Right => "-R",
    }
}

impl TerminalDriver for TmuxDriver {
    fn open_window(&mut self, options: &Options) -> Result<TabHandle> {
        self.new_window(options)
    }

    fn open_tab(&mut self, options: &Options) -> Result<TabHandle> {
        self.new_window(options)
    }

    fn active_tab(&mut self) -> Result<TabHandle> {
        let pane = self.tmux(&["display-message", "-p", "#{pane_id}"])?;
        if pane.is_empty() {
            return Err(TermfileError::DriverError(
                "tmux returned an empty pane id".into(),
            ));
        }
        Ok(TabHandle(pane))
    }

    fn split_vertical(&mut self) -> Result<()> {
        self.tmux(&["split-window", "-h"]).map(drop)
    }

    fn split_horizontal(&mut self) -> Result<()> {
        self.tmux(&["split-window", "-v"]).map(drop)
    }

    fn select_pane(&mut self, direction: Direction) -> Result<()> {
        self.tmux(&["select-pane", select_flag(direction)]).map(drop)
    }

    fn set_title(&mut self, tab: &TabHandle, title: &str) -> Result<()> {
        self.tmux(&["rename-window", "-t", &tab.0, title]).map(drop)
    }

    fn write(&mut self, tab: &TabHandle, text: &str) -> Result<()> {
        self.tmux(&["send-keys", "-t", &tab.0, text, "Enter"]).map(drop)
    }

    fn title_strategy(&self) -> TitleStrategy {
        TitleStrategy::PromptEscape
    }
}
