//! Terminal drivers.
//!
//! The [`Executor`](crate::executor::Executor) only talks to a terminal
//! through [`TerminalDriver`]. Each call is a single blocking automation
//! step; a failed call returns [`TermfileError::DriverError`] and the run
//! stops there.
//!
//! Drivers:
//!
//! - [`iterm::ITermDriver`]: iTerm2 on macOS, scripted through `osascript`
//! - [`tmux::TmuxDriver`]: a running tmux session
//! - [`recording::RecordingDriver`]: records actions without touching a terminal

pub mod iterm;
pub mod recording;
pub mod tmux;

use crate::error::{Result, TermfileError};
use crate::layout::Options;
use std::fmt;
use std::process::Command;
use std::str::FromStr;

/// Opaque reference to a terminal tab/session returned by a driver.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TabHandle(pub String);

impl fmt::Display for TabHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Direction to move pane focus in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Above,
    Below,
    Left,
    Right,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Above => "Above",
            Direction::Below => "Below",
            Direction::Left => "Left",
            Direction::Right => "Right",
        }
    }
}

impl FromStr for Direction {
    type Err = TermfileError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Above" => Ok(Direction::Above),
            "Below" => Ok(Direction::Below),
            "Left" => Ok(Direction::Left),
            "Right" => Ok(Direction::Right),
            other => Err(TermfileError::InvalidDirection(other.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a driver shows tab titles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TitleStrategy {
    /// Call [`TerminalDriver::set_title`].
    #[default]
    Native,
    /// Prepend a shell command that sets the title through the prompt.
    PromptEscape,
}

/// The terminal automation primitives the executor needs.
///
/// Writes target a tab handle; pane commands are written to
/// [`active_tab`](TerminalDriver::active_tab), which follows pane focus.
pub trait TerminalDriver {
    /// Open a new window and return its initial tab.
    fn open_window(&mut self, options: &Options) -> Result<TabHandle>;

    /// Open a new tab in the current window.
    fn open_tab(&mut self, options: &Options) -> Result<TabHandle>;

    /// The focused tab/session.
    fn active_tab(&mut self) -> Result<TabHandle>;

    /// Split the focused pane side by side; focus moves to the new pane.
    fn split_vertical(&mut self) -> Result<()>;

    /// Split the focused pane top and bottom; focus moves to the new pane.
    fn split_horizontal(&mut self) -> Result<()>;

    fn select_pane(&mut self, direction: Direction) -> Result<()>;

    fn set_title(&mut self, tab: &TabHandle, title: &str) -> Result<()>;

    /// Type `text` followed by Enter into the given tab.
    fn write(&mut self, tab: &TabHandle, text: &str) -> Result<()>;

    fn title_strategy(&self) -> TitleStrategy {
        TitleStrategy::Native
    }
}

/// Run an external automation command and return its trimmed stdout.
pub(crate) fn run_command(program: &str, args: &[&str]) -> Result<String> {
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| TermfileError::DriverError(format!("failed to run {}: {}", program, e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(TermfileError::DriverError(format!(
            "{} {} failed: {}",
            program,
            args.first().copied().unwrap_or_default(),
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
