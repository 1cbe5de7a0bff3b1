//! Driver registry.
//!
//! Drivers are registered explicitly at startup. Each entry carries a
//! capability check, so the CLI can pick the right driver for the terminal
//! it was started from.

use crate::driver::TerminalDriver;
use crate::driver::iterm::{self, ITermDriver};
use crate::driver::recording::RecordingDriver;
use crate::driver::tmux::{self, TmuxDriver};
use crate::error::{Result, TermfileError};
use tracing::debug;

/// Name of the recording driver used by `--dry-run`.
pub const DRY_RUN: &str = "dry-run";

/// A registered driver.
#[derive(Debug, Clone, Copy)]
pub struct DriverEntry {
    /// Short name used on the command line.
    pub name: &'static str,
    /// Human-readable name shown in listings.
    pub display_name: &'static str,
    /// Whether this driver can run on the current system.
    pub valid_system: fn() -> bool,
    /// Construct the driver.
    pub build: fn() -> Result<Box<dyn TerminalDriver>>,
}

impl DriverEntry {
    pub fn is_available(&self) -> bool {
        (self.valid_system)()
    }
}

fn always() -> bool {
    true
}

fn build_iterm() -> Result<Box<dyn TerminalDriver>> {
    Ok(Box::new(ITermDriver::new()))
}

fn build_tmux() -> Result<Box<dyn TerminalDriver>> {
    Ok(Box::new(TmuxDriver::new()?))
}

fn build_dry_run() -> Result<Box<dyn TerminalDriver>> {
    Ok(Box::new(RecordingDriver::new()))
}

/// Ordered set of drivers. Earlier entries win automatic selection.
#[derive(Debug, Default)]
pub struct DriverRegistry {
    entries: Vec<DriverEntry>,
}

impl DriverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with iTerm2, tmux, and the dry-run driver, in that order.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry
            .register(DriverEntry {
                name: "iterm",
                display_name: "iTerm2 (macOS)",
                valid_system: iterm::valid_system,
                build: build_iterm,
            })
            .register(DriverEntry {
                name: "tmux",
                display_name: "tmux",
                valid_system: tmux::in_tmux,
                build: build_tmux,
            })
            .register(DriverEntry {
                name: DRY_RUN,
                display_name: "Dry run (print actions)",
                valid_system: always,
                build: build_dry_run,
            });
        registry
    }

    /// Add a driver. A driver with the same name is replaced in place.
    pub fn register(&mut self, entry: DriverEntry) -> &mut Self {
        match self.entries.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
        self
    }

    pub fn entries(&self) -> &[DriverEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&DriverEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Pick a driver by name, or the first one valid for this system.
    ///
    /// # Errors
    ///
    /// - [`TermfileError::UnknownDriver`] if `name` is not registered
    /// - [`TermfileError::NoDriverAvailable`] if no driver is valid here
    pub fn select(&self, name: Option<&str>) -> Result<&DriverEntry> {
        let entry = match name {
            Some(name) => self
                .get(name)
                .ok_or_else(|| TermfileError::UnknownDriver(name.to_string()))?,
            None => self
                .entries
                .iter()
                .find(|e| e.is_available())
                .ok_or(TermfileError::NoDriverAvailable)?,
        };
        debug!(driver = entry.name, "selected driver");
        Ok(entry)
    }
}
