//! Termfile discovery and loading.
//!
//! A Termfile is found, in order of preference, from:
//!
//! 1. an explicit path given on the command line
//! 2. a project name, resolved to `<config dir>/termfile/<name>.toml`
//! 3. `Termfile.toml` in the current directory
//!
//! The project directory search order is:
//!
//! 1. `$XDG_CONFIG_HOME/termfile`
//! 2. `~/.config/termfile`
//! 3. Platform default (e.g., `~/Library/Application Support` on macOS)

use crate::config::Termfile;
use crate::error::{Result, TermfileError};
use crate::layout::Config;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Termfile looked up in the current directory when nothing else is given.
pub const LOCAL_TERMFILE: &str = "Termfile.toml";

const APP_DIR: &str = "termfile";

/// Pick the project directory among the candidate config roots.
///
/// The first candidate whose `termfile` directory exists wins. If none
/// exists, `~/.config/termfile` is returned as the default location, falling
/// back to the platform directory when there is no home directory.
pub fn select_project_dir(
    xdg: Option<PathBuf>,
    home: Option<PathBuf>,
    platform: Option<PathBuf>,
) -> Option<PathBuf> {
    let home_config = home.map(|h| h.join(".config"));
    let candidates = [xdg, home_config.clone(), platform.clone()];

    for root in candidates.into_iter().flatten() {
        let dir = root.join(APP_DIR);
        if dir.is_dir() {
            return Some(dir);
        }
    }

    home_config.or(platform).map(|root| root.join(APP_DIR))
}

/// Directory holding per-project Termfiles.
///
/// # Errors
///
/// Returns [`TermfileError::NoConfigDir`] if no config directory can be determined.
pub fn project_dir() -> Result<PathBuf> {
    let xdg = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from);
    select_project_dir(xdg, dirs::home_dir(), dirs::config_dir()).ok_or(TermfileError::NoConfigDir)
}

/// Path of the Termfile for a project name.
pub fn project_path(name: &str) -> Result<PathBuf> {
    Ok(project_dir()?.join(format!("{}.toml", name)))
}

/// Resolve which Termfile to load.
pub fn resolve_path(file: Option<&Path>, project: Option<&str>) -> Result<PathBuf> {
    match (file, project) {
        (Some(file), _) => Ok(file.to_path_buf()),
        (None, Some(project)) => project_path(project),
        (None, None) => Ok(PathBuf::from(LOCAL_TERMFILE)),
    }
}

/// Load and parse a Termfile into a layout tree.
///
/// # Errors
///
/// - [`TermfileError::ConfigNotFound`] if the file doesn't exist
/// - [`TermfileError::IoError`] if reading fails
/// - [`TermfileError::ParseError`] if TOML parsing fails
pub fn load_termfile(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Err(TermfileError::ConfigNotFound(path.to_path_buf()));
    }
    debug!(path = %path.display(), "loading Termfile");
    let contents = std::fs::read_to_string(path)?;
    let termfile = Termfile::from_str(&contents)?;
    Ok(termfile.into_config())
}

/// Project names (file stems of `*.toml`) in a directory, sorted.
///
/// A missing directory has no projects.
pub fn list_projects_in(dir: &Path) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut result = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "toml")
            && let Some(stem) = path.file_stem()
        {
            result.push(stem.to_string_lossy().into_owned());
        }
    }
    result.sort();
    Ok(result)
}

/// Projects in the default project directory.
pub fn list_projects() -> Result<Vec<String>> {
    list_projects_in(&project_dir()?)
}
