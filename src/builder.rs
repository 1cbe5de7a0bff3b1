//! Construction protocol for the layout tree.
//!
//! Windows, tabs, and panes are declared in nesting order through
//! closure scopes:
//!
//! ```
//! use termfile::builder::ConfigBuilder;
//!
//! let config = ConfigBuilder::new()
//!     .window("dev", |w| {
//!         w.name("Dev").before(["cd ~/src/app"]);
//!         w.tab("server", |t| {
//!             t.run(["cargo run"]);
//!         });
//!         w.tab("shells", |t| {
//!             t.pane(["htop"]);
//!             t.pane_block(|p| {
//!                 p.run(["ls"]);
//!                 p.pane(["uptime"]);
//!             });
//!         });
//!     })
//!     .build();
//!
//! let shells = config.window("dev").unwrap().tab("shells").unwrap();
//! assert_eq!(shells.pane("pane0").unwrap().commands, ["htop"]);
//! assert_eq!(shells.pane("pane1").unwrap().pane("pane0").unwrap().commands, ["uptime"]);
//! ```
//!
//! Pane nesting stops at two levels: a sub-pane scope has no way to
//! declare further panes.

use crate::layout::{
    Config, NAME_OPTION, Pane, PaneKey, PaneMap, Tab, TabKind, Window, WindowKind,
};

fn to_commands<I, S>(commands: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    commands.into_iter().map(Into::into).collect()
}

/// Builds a [`Config`]. The default window always exists.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append project setup commands.
    pub fn setup<I, S>(&mut self, commands: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.setup.extend(to_commands(commands));
        self
    }

    /// Declare a window, or extend it if already declared.
    ///
    /// The name `"default"` refers to the currently active window.
    pub fn window<K, F>(&mut self, name: K, f: F) -> &mut Self
    where
        K: Into<WindowKind>,
        F: FnOnce(&mut WindowScope<'_>),
    {
        let window = self.config.windows.entry(name.into()).or_default();
        f(&mut WindowScope { window });
        self
    }

    pub fn build(&self) -> Config {
        self.config.clone()
    }
}

/// Declarations inside a window.
pub struct WindowScope<'a> {
    window: &'a mut Window,
}

impl WindowScope<'_> {
    /// Append commands run before each tab's own commands.
    pub fn before<I, S>(&mut self, commands: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.window.before.extend(to_commands(commands));
        self
    }

    pub fn option(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.window.options.insert(key.into(), value.into());
        self
    }

    /// Window title, applied to the first tab of a newly opened window.
    pub fn name(&mut self, title: impl Into<String>) -> &mut Self {
        self.option(NAME_OPTION, title)
    }

    /// Declare a tab, or extend it if already declared.
    ///
    /// The name `"default"` refers to the currently active tab.
    pub fn tab<K, F>(&mut self, name: K, f: F) -> &mut Self
    where
        K: Into<TabKind>,
        F: FnOnce(&mut TabScope<'_>),
    {
        let tab = self.window.tabs.entry(name.into()).or_default();
        f(&mut TabScope { tab });
        self
    }

    /// Leaf pane on the window's default tab.
    pub fn pane<I, S>(&mut self, commands: I) -> PaneKey
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_tab().pane(commands)
    }

    /// Container pane on the window's default tab.
    pub fn pane_block<F>(&mut self, f: F) -> PaneKey
    where
        F: FnOnce(&mut PaneScope<'_>),
    {
        self.default_tab().pane_block(f)
    }

    fn default_tab(&mut self) -> TabScope<'_> {
        TabScope {
            tab: self.window.tabs.entry(TabKind::Default).or_default(),
        }
    }
}

/// Declarations inside a tab.
pub struct TabScope<'a> {
    tab: &'a mut Tab,
}

impl TabScope<'_> {
    /// Append commands to the tab.
    ///
    /// When the tab has panes these become a prefix written to every pane.
    pub fn run<I, S>(&mut self, commands: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tab.commands.extend(to_commands(commands));
        self
    }

    pub fn option(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.tab.options.insert(key.into(), value.into());
        self
    }

    /// Tab title.
    pub fn name(&mut self, title: impl Into<String>) -> &mut Self {
        self.option(NAME_OPTION, title)
    }

    /// Mark the tab as split without adding a pane yet.
    pub fn panes(&mut self) -> &mut Self {
        self.tab.panes.get_or_insert_with(PaneMap::new);
        self
    }

    /// Leaf top-level pane.
    pub fn pane<I, S>(&mut self, commands: I) -> PaneKey
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        insert_pane(
            &mut self.tab.panes,
            Pane {
                commands: to_commands(commands),
                ..Pane::default()
            },
        )
        .0
    }

    /// Container top-level pane; may hold one level of sub-panes.
    pub fn pane_block<F>(&mut self, f: F) -> PaneKey
    where
        F: FnOnce(&mut PaneScope<'_>),
    {
        let (key, pane) = insert_pane(
            &mut self.tab.panes,
            Pane {
                is_top_pane: true,
                ..Pane::default()
            },
        );
        f(&mut PaneScope { pane });
        key
    }
}

/// Declarations inside a top-level pane block.
pub struct PaneScope<'a> {
    pane: &'a mut Pane,
}

impl PaneScope<'_> {
    /// Append commands to this pane.
    pub fn run<I, S>(&mut self, commands: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pane.commands.extend(to_commands(commands));
        self
    }

    /// Leaf sub-pane.
    pub fn pane<I, S>(&mut self, commands: I) -> PaneKey
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        insert_pane(
            &mut self.pane.panes,
            Pane {
                commands: to_commands(commands),
                ..Pane::default()
            },
        )
        .0
    }

    /// Sub-pane declared as a block.
    pub fn pane_block<F>(&mut self, f: F) -> PaneKey
    where
        F: FnOnce(&mut SubPaneScope<'_>),
    {
        let (key, pane) = insert_pane(&mut self.pane.panes, Pane::default());
        f(&mut SubPaneScope { pane });
        key
    }
}

/// Declarations inside a sub-pane block. Only commands can be added here.
pub struct SubPaneScope<'a> {
    pane: &'a mut Pane,
}

impl SubPaneScope<'_> {
    pub fn run<I, S>(&mut self, commands: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pane.commands.extend(to_commands(commands));
        self
    }
}

fn insert_pane(panes: &mut Option<PaneMap>, pane: Pane) -> (PaneKey, &mut Pane) {
    let panes = panes.get_or_insert_with(PaneMap::new);
    let key = PaneKey::next_for(panes);
    (key, panes.entry(key).or_insert(pane))
}
