//! Termfile format.
//!
//! This module defines the serde structures that map to the TOML Termfile
//! format, and converts them into the layout tree with
//! [`ConfigBuilder`](crate::builder::ConfigBuilder).
//!
//! # Termfile Format
//!
//! ```toml
//! setup = ["bundle install"]
//!
//! [windows.default]
//! before = "cd ~/src/app"
//!
//! [windows.default.tabs.server]
//! name = "Server"
//! commands = ["rails s"]
//!
//! [windows.editor]
//! name = "Editor"
//! panes = ["vim", { commands = "ls", panes = ["uptime"] }]
//!
//! [windows.editor.tabs.logs]
//! commands = "tail -f log/development.log"
//! options = { profile = "Logs" }
//! ```
//!
//! The window and tab named `default` mean "the currently active one".
//! Panes listed directly on a window belong to its `default` tab.

use crate::builder::{ConfigBuilder, PaneScope, TabScope, WindowScope};
use crate::layout::{Config, Options};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Command field that accepts either a single string or array of strings.
///
/// This allows flexible config syntax:
/// ```toml
/// commands = "single command"
/// # or
/// commands = ["command 1", "command 2"]
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Cmd {
    /// A single command string.
    Single(String),
    /// Multiple commands executed in sequence.
    Multiple(Vec<String>),
}

impl Cmd {
    /// Convert to a `Vec<String>`, normalizing both variants.
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Cmd::Single(s) => vec![s.clone()],
            Cmd::Multiple(v) => v.clone(),
        }
    }
}

fn commands_of(cmd: &Option<Cmd>) -> Vec<String> {
    cmd.as_ref().map(Cmd::to_vec).unwrap_or_default()
}

/// A pane entry: either just commands, or a container with sub-panes.
///
/// ```toml
/// panes = [
///     "htop",
///     ["cd api", "cargo run"],
///     { commands = "ls", panes = ["uptime", ["cd web", "npm start"]] },
/// ]
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PaneDef {
    /// Leaf pane.
    Leaf(Cmd),
    /// Top-level pane holding one level of sub-panes.
    Container(ContainerPaneDef),
}

/// Table form of a [`PaneDef`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContainerPaneDef {
    /// Commands for the pane itself.
    #[serde(default)]
    pub commands: Option<Cmd>,
    /// Sub-panes, stacked below the pane. Each entry is a command field.
    #[serde(default)]
    pub panes: Vec<Cmd>,
}

/// A tab definition.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TabDef {
    /// Tab title.
    #[serde(default)]
    pub name: Option<String>,
    /// Commands to run in the tab, or in every pane when `panes` is set.
    #[serde(default)]
    pub commands: Option<Cmd>,
    /// Extra options passed to the driver when the tab is opened.
    #[serde(default)]
    pub options: Options,
    /// Split panes. An empty list splits nothing and runs nothing.
    #[serde(default)]
    pub panes: Option<Vec<PaneDef>>,
}

/// A window definition.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WindowDef {
    /// Window title, shown on its first tab.
    #[serde(default)]
    pub name: Option<String>,
    /// Commands run before each tab's commands.
    #[serde(default)]
    pub before: Option<Cmd>,
    /// Extra options passed to the driver when the window is opened.
    #[serde(default)]
    pub options: Options,
    /// Panes for the window's `default` tab.
    #[serde(default)]
    pub panes: Vec<PaneDef>,
    #[serde(default)]
    pub tabs: BTreeMap<String, TabDef>,
}

/// Top-level Termfile structure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Termfile {
    /// Project setup commands, run with `--setup`.
    #[serde(default)]
    pub setup: Option<Cmd>,
    #[serde(default)]
    pub windows: BTreeMap<String, WindowDef>,
}

impl Termfile {
    /// Parse a Termfile from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `toml::de::Error` if the TOML is malformed or doesn't match
    /// the expected structure.
    pub fn from_str(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Build the layout tree.
    pub fn into_config(self) -> Config {
        let mut builder = ConfigBuilder::new();
        builder.setup(commands_of(&self.setup));

        for (name, window) in self.windows {
            builder.window(name, |w| declare_window(w, window));
        }

        builder.build()
    }
}

fn declare_window(w: &mut WindowScope<'_>, window: WindowDef) {
    for (key, value) in window.options {
        w.option(key, value);
    }
    if let Some(name) = window.name {
        w.name(name);
    }
    w.before(commands_of(&window.before));

    for pane in window.panes {
        match pane {
            PaneDef::Leaf(cmd) => {
                w.pane(cmd.to_vec());
            }
            PaneDef::Container(container) => {
                w.pane_block(|p| declare_container(p, container));
            }
        }
    }

    for (name, tab) in window.tabs {
        w.tab(name, |t| declare_tab(t, tab));
    }
}

fn declare_tab(t: &mut TabScope<'_>, tab: TabDef) {
    for (key, value) in tab.options {
        t.option(key, value);
    }
    if let Some(name) = tab.name {
        t.name(name);
    }
    t.run(commands_of(&tab.commands));

    if let Some(panes) = tab.panes {
        t.panes();
        for pane in panes {
            match pane {
                PaneDef::Leaf(cmd) => {
                    t.pane(cmd.to_vec());
                }
                PaneDef::Container(container) => {
                    t.pane_block(|p| declare_container(p, container));
                }
            }
        }
    }
}

fn declare_container(p: &mut PaneScope<'_>, container: ContainerPaneDef) {
    p.run(commands_of(&container.commands));
    for sub_pane in container.panes {
        p.pane(sub_pane.to_vec());
    }
}
