//! A driver that records actions instead of performing them.
//!
//! Used for `--dry-run` and throughout the executor tests.

use super::{Direction, TabHandle, TerminalDriver, TitleStrategy};
use crate::error::Result;
use crate::layout::Options;
use std::fmt;

/// One recorded driver call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    OpenWindow { options: Options, tab: TabHandle },
    OpenTab { options: Options, tab: TabHandle },
    SplitVertical,
    SplitHorizontal,
    SelectPane(Direction),
    SetTitle { tab: TabHandle, title: String },
    Write { tab: TabHandle, text: String },
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::OpenWindow { tab, .. } => write!(f, "open window -> {}", tab),
            Action::OpenTab { tab, .. } => write!(f, "open tab -> {}", tab),
            Action::SplitVertical => f.write_str("split vertically"),
            Action::SplitHorizontal => f.write_str("split horizontally"),
            Action::SelectPane(direction) => write!(f, "select pane {}", direction),
            Action::SetTitle { tab, title } => write!(f, "[{}] title {:?}", tab, title),
            Action::Write { tab, text } => write!(f, "[{}] {}", tab, text),
        }
    }
}

/// Records every call. Tabs get synthetic handles `tab0`, `tab1`, ...;
/// every split creates a new focused pane handle `pane1`, `pane2`, ...
#[derive(Debug)]
pub struct RecordingDriver {
    actions: Vec<Action>,
    title_strategy: TitleStrategy,
    tabs: usize,
    panes: usize,
    active: TabHandle,
}

impl Default for RecordingDriver {
    fn default() -> Self {
        Self {
            actions: Vec::new(),
            title_strategy: TitleStrategy::Native,
            tabs: 0,
            panes: 0,
            active: TabHandle("active".to_string()),
        }
    }
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title_strategy(mut self, strategy: TitleStrategy) -> Self {
        self.title_strategy = strategy;
        self
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn into_actions(self) -> Vec<Action> {
        self.actions
    }

    fn next_tab(&mut self) -> TabHandle {
        let handle = TabHandle(format!("tab{}", self.tabs));
        self.tabs += 1;
        self.active = handle.clone();
        handle
    }

    fn next_pane(&mut self) {
        self.panes += 1;
        self.active = TabHandle(format!("pane{}", self.panes));
    }
}

impl TerminalDriver for RecordingDriver {
    fn open_window(&mut self, options: &Options) -> Result<TabHandle> {
        let tab = self.next_tab();
        self.actions.push(Action::OpenWindow {
            options: options.clone(),
            tab: tab.clone(),
        });
        Ok(tab)
    }

    fn open_tab(&mut self, options: &Options) -> Result<TabHandle> {
        let tab = self.next_tab();
        self.actions.push(Action::OpenTab {
            options: options.clone(),
            tab: tab.clone(),
        });
        Ok(tab)
    }

    fn active_tab(&mut self) -> Result<TabHandle> {
        Ok(self.active.clone())
    }

    fn split_vertical(&mut self) -> Result<()> {
        self.next_pane();
        self.actions.push(Action::SplitVertical);
        Ok(())
    }

    fn split_horizontal(&mut self) -> Result<()> {
        self.next_pane();
        self.actions.push(Action::SplitHorizontal);
        Ok(())
    }

    fn select_pane(&mut self, direction: Direction) -> Result<()> {
        self.actions.push(Action::SelectPane(direction));
        Ok(())
    }

    fn set_title(&mut self, tab: &TabHandle, title: &str) -> Result<()> {
        self.actions.push(Action::SetTitle {
            tab: tab.clone(),
            title: title.to_string(),
        });
        Ok(())
    }

    fn write(&mut self, tab: &TabHandle, text: &str) -> Result<()> {
        self.actions.push(Action::Write {
            tab: tab.clone(),
            text: text.to_string(),
        });
        Ok(())
    }

    fn title_strategy(&self) -> TitleStrategy {
        self.title_strategy
    }
}
