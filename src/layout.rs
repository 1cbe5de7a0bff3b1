//! The layout tree: windows, tabs, and split panes.
//!
//! A [`Config`] is built once (see [`crate::builder`]) and then consumed
//! read-only by the [`crate::executor::Executor`]. All maps are ordered, so
//! iterating them yields the execution order directly:
//!
//! - windows and tabs sort lexicographically by their key name, with the
//!   default entry spelled `"default"`
//! - panes sort by creation index (`pane0`, `pane1`, ...)

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Free-form string options (`name`, profile, ...).
pub type Options = BTreeMap<String, String>;

/// Ordered pane map keyed by auto-generated [`PaneKey`]s.
pub type PaneMap = BTreeMap<PaneKey, Pane>;

/// The option holding a window or tab title.
pub const NAME_OPTION: &str = "name";

const DEFAULT_KEY: &str = "default";

/// Key of a window in [`Config::windows`].
///
/// `Default` means "use the currently active window". Equality, hashing and
/// ordering go by the key name, so `Named("default")` is the same key as
/// `Default`.
#[derive(Debug, Clone)]
pub enum WindowKind {
    Default,
    Named(String),
}

/// Key of a tab in [`Window::tabs`].
///
/// `Default` means "use the currently active tab, don't open a new one".
/// Compared by key name, like [`WindowKind`].
#[derive(Debug, Clone)]
pub enum TabKind {
    Default,
    Named(String),
}

macro_rules! layout_kind {
    ($kind:ident) => {
        impl $kind {
            /// The key as written in a Termfile.
            pub fn as_str(&self) -> &str {
                match self {
                    $kind::Default => DEFAULT_KEY,
                    $kind::Named(name) => name,
                }
            }
        }

        impl From<&str> for $kind {
            fn from(name: &str) -> Self {
                if name == DEFAULT_KEY {
                    $kind::Default
                } else {
                    $kind::Named(name.to_string())
                }
            }
        }

        impl From<String> for $kind {
            fn from(name: String) -> Self {
                if name == DEFAULT_KEY {
                    $kind::Default
                } else {
                    $kind::Named(name)
                }
            }
        }

        impl PartialEq for $kind {
            fn eq(&self, other: &Self) -> bool {
                self.as_str() == other.as_str()
            }
        }

        impl Eq for $kind {}

        impl std::hash::Hash for $kind {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                self.as_str().hash(state);
            }
        }

        impl Ord for $kind {
            fn cmp(&self, other: &Self) -> Ordering {
                self.as_str().cmp(other.as_str())
            }
        }

        impl PartialOrd for $kind {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl fmt::Display for $kind {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

layout_kind!(WindowKind);
layout_kind!(TabKind);

/// Auto-generated pane key, displayed as `pane<N>`.
///
/// N is the size of the enclosing pane map when the pane was declared, so
/// keys order by creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PaneKey(pub usize);

impl PaneKey {
    /// The next key for a pane map of the given size.
    pub fn next_for(panes: &PaneMap) -> Self {
        PaneKey(panes.len())
    }

    /// Parse a `pane<N>` name.
    ///
    /// Only the canonical spelling is accepted: `pane01` and `pane+1` are not keys.
    pub fn parse(name: &str) -> Option<Self> {
        let key = PaneKey(name.strip_prefix("pane")?.parse().ok()?);
        (key.to_string() == name).then_some(key)
    }
}

impl fmt::Display for PaneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pane{}", self.0)
    }
}

/// A split pane and the commands to run in it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pane {
    pub commands: Vec<String>,
    /// Second-level panes. Only consulted on top-level panes.
    pub panes: Option<PaneMap>,
    /// Set on panes declared as a block directly inside a tab.
    pub is_top_pane: bool,
}

impl Pane {
    /// Look up a sub-pane by its `pane<N>` name.
    pub fn pane(&self, name: &str) -> Option<&Pane> {
        lookup(self.panes.as_ref(), name)
    }

    pub fn has_sub_panes(&self) -> bool {
        self.panes.as_ref().is_some_and(|p| !p.is_empty())
    }
}

/// A terminal tab.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tab {
    pub options: Options,
    pub commands: Vec<String>,
    /// `Some` when the tab was declared with panes, even if none were added.
    pub panes: Option<PaneMap>,
}

impl Tab {
    /// Title from the `name` option.
    pub fn name(&self) -> Option<&str> {
        self.options.get(NAME_OPTION).map(String::as_str)
    }

    /// Look up a top-level pane by its `pane<N>` name.
    pub fn pane(&self, name: &str) -> Option<&Pane> {
        lookup(self.panes.as_ref(), name)
    }
}

/// A terminal window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Window {
    pub options: Options,
    /// Commands prepended to every tab's commands.
    pub before: Vec<String>,
    pub tabs: BTreeMap<TabKind, Tab>,
}

impl Window {
    /// Title from the `name` option.
    pub fn name(&self) -> Option<&str> {
        self.options.get(NAME_OPTION).map(String::as_str)
    }

    pub fn tab(&self, name: &str) -> Option<&Tab> {
        self.tabs.get(&TabKind::from(name))
    }

    /// Panes declared directly on the window. They live on the default tab.
    pub fn panes(&self) -> Option<&PaneMap> {
        self.tabs.get(&TabKind::Default)?.panes.as_ref()
    }

    /// Look up a window-level pane by its `pane<N>` name.
    pub fn pane(&self, name: &str) -> Option<&Pane> {
        lookup(self.panes(), name)
    }
}

/// Root of the layout tree.
///
/// Always contains the [`WindowKind::Default`] window.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// One-off project setup commands, run by [`crate::executor::Executor::setup`].
    pub setup: Vec<String>,
    pub windows: BTreeMap<WindowKind, Window>,
}

impl Default for Config {
    fn default() -> Self {
        let mut windows = BTreeMap::new();
        windows.insert(WindowKind::Default, Window::default());
        Config {
            setup: Vec::new(),
            windows,
        }
    }
}

impl Config {
    pub fn window(&self, name: &str) -> Option<&Window> {
        self.windows.get(&WindowKind::from(name))
    }

    /// The default window; empty if nothing was declared on it.
    pub fn default_window(&self) -> Option<&Window> {
        self.windows.get(&WindowKind::Default)
    }

    /// Named windows in execution order.
    pub fn named_windows(&self) -> impl Iterator<Item = (&WindowKind, &Window)> {
        self.windows
            .iter()
            .filter(|(kind, _)| **kind != WindowKind::Default)
    }
}

fn lookup<'a>(panes: Option<&'a PaneMap>, name: &str) -> Option<&'a Pane> {
    panes?.get(&PaneKey::parse(name)?)
}
