//! Error types for termfile.
//!
//! All errors in termfile are represented by [`TermfileError`], which covers
//! Termfile loading, driver failures, and driver selection problems.

use std::path::PathBuf;
use thiserror::Error;

/// All possible errors that can occur in termfile.
#[derive(Error, Debug)]
pub enum TermfileError {
    /// Termfile does not exist at the expected path.
    #[error("Termfile not found: {0}")]
    ConfigNotFound(PathBuf),

    /// Could not determine the user's config directory.
    #[error("Could not determine config directory")]
    NoConfigDir,

    /// Failed to read a file from disk.
    #[error("Failed to read Termfile: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing failed.
    #[error("Failed to parse Termfile: {0}")]
    ParseError(#[from] toml::de::Error),

    /// A terminal driver call failed. The remaining run is aborted.
    #[error("Driver error: {0}")]
    DriverError(String),

    /// Pane selection was asked for a direction other than Above/Below/Left/Right.
    #[error(
        "{0} is not a valid direction to select a pane; only Above/Below/Left/Right are valid directions"
    )]
    InvalidDirection(String),

    /// No registered driver has the requested name.
    #[error("Unknown driver: {0}")]
    UnknownDriver(String),

    /// No registered driver reports the current system as supported.
    #[error("No terminal driver available for this system")]
    NoDriverAvailable,
}

/// Convenient Result type alias for termfile operations.
pub type Result<T> = std::result::Result<T, TermfileError>;
