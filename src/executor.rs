//! Layout execution.
//!
//! Walks a [`Config`] in a fixed order and turns it into [`TerminalDriver`]
//! calls. The terminal has exactly one focus target, so every step is issued
//! in the order the UI needs it: split, then select, then write.
//!
//! # Order
//!
//! 1. The default window, if it has any tabs, runs in the active window.
//! 2. Named windows follow in ascending name order.
//! 3. Within a window, tabs run in ascending name order. The first tab of a
//!    named window opens the window; a tab keyed `default` reuses the active
//!    tab; any other tab opens a new tab.
//! 4. A tab with panes is split (see [`Executor::execute_panes`]) instead of
//!    receiving its commands directly.

use crate::driver::{Direction, TabHandle, TerminalDriver, TitleStrategy};
use crate::error::Result;
use crate::layout::{Config, Options, PaneMap, Tab, TabKind, Window};
use tracing::{debug, error, info};

/// Prepend a window's `before` commands to a tab's commands.
///
/// ```
/// use termfile::executor::prepend_befores;
///
/// assert_eq!(prepend_befores(vec!["ls".to_string()], &["ps".to_string()]), ["ps", "ls"]);
/// assert_eq!(prepend_befores(vec!["ls".to_string()], &[]), ["ls"]);
/// ```
pub fn prepend_befores(commands: Vec<String>, befores: &[String]) -> Vec<String> {
    if befores.is_empty() {
        return commands;
    }
    befores.iter().cloned().chain(commands).collect()
}

/// Shell command that sets the terminal title through the prompt.
pub fn title_command(title: &str) -> String {
    format!(r#"PS1="$PS1\[\e]2;{}\a\]""#, title)
}

/// Prepend a title-setting command when a title is given.
///
/// ```
/// use termfile::executor::prepend_title;
///
/// assert_eq!(
///     prepend_title(Some("hey"), vec!["ls".to_string()]),
///     [r#"PS1="$PS1\[\e]2;hey\a\]""#, "ls"]
/// );
/// assert_eq!(prepend_title(None, vec!["ls".to_string()]), ["ls"]);
/// ```
pub fn prepend_title(title: Option<&str>, commands: Vec<String>) -> Vec<String> {
    match title {
        Some(title) => std::iter::once(title_command(title))
            .chain(commands)
            .collect(),
        None => commands,
    }
}

/// Counts of what a run produced.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub windows: usize,
    pub tabs: usize,
    pub panes: usize,
    pub commands: usize,
}

/// Drives a terminal through a [`Config`].
pub struct Executor<'d> {
    driver: &'d mut dyn TerminalDriver,
    /// Tab the current tab's commands go to.
    current_tab: Option<TabHandle>,
    /// Title applied to the current tab.
    title: Option<String>,
    /// Vertical splits made for the current tab's panes.
    vertical_splits: usize,
    summary: RunSummary,
}

impl<'d> Executor<'d> {
    pub fn new(driver: &'d mut dyn TerminalDriver) -> Self {
        Self {
            driver,
            current_tab: None,
            title: None,
            vertical_splits: 0,
            summary: RunSummary::default(),
        }
    }

    /// Execute every window in the config.
    ///
    /// # Errors
    ///
    /// The first failing driver call aborts the run and is returned.
    pub fn run(&mut self, config: &Config) -> Result<RunSummary> {
        self.summary = RunSummary::default();
        if let Some(default) = config.default_window()
            && !default.tabs.is_empty()
        {
            self.execute_window(default, true)?;
        }

        for (kind, window) in config.named_windows() {
            if window.tabs.is_empty() {
                debug!(window = %kind, "skipping window without tabs");
                continue;
            }
            self.execute_window(window, false)?;
        }

        info!(
            windows = self.summary.windows,
            tabs = self.summary.tabs,
            panes = self.summary.panes,
            commands = self.summary.commands,
            "layout executed"
        );
        Ok(self.summary)
    }

    /// Write the project setup commands to the active tab.
    pub fn setup(&mut self, config: &Config) -> Result<RunSummary> {
        self.summary = RunSummary::default();
        let tab = self.driver.active_tab()?;
        for command in &config.setup {
            self.write(&tab, command)?;
        }
        Ok(self.summary)
    }

    /// Execute one window's tabs in name order.
    ///
    /// `is_default` windows run in the active window instead of opening one.
    pub fn execute_window(&mut self, window: &Window, is_default: bool) -> Result<()> {
        let mut first_tab = true;
        self.summary.windows += 1;

        for (key, tab) in &window.tabs {
            let (handle, title) = if first_tab && !is_default {
                let title = window.name().or(tab.name());
                let mut options: Options = tab.options.clone();
                options.extend(window.options.clone());
                debug!(tab = %key, "opening window");
                (self.driver.open_window(&options)?, title)
            } else {
                // Compared by name, so `Named("default")` reuses the active tab too.
                let handle = if *key == TabKind::Default {
                    self.driver.active_tab()?
                } else {
                    debug!(tab = %key, "opening tab");
                    self.driver.open_tab(&tab.options)?
                };
                (handle, tab.name())
            };
            first_tab = false;
            self.summary.tabs += 1;

            self.title = title.map(str::to_string);
            self.current_tab = Some(handle.clone());

            let mut commands = prepend_befores(tab.commands.clone(), &window.before);
            match self.driver.title_strategy() {
                TitleStrategy::Native => {
                    if let Some(title) = title {
                        self.driver.set_title(&handle, title)?;
                    }
                }
                TitleStrategy::PromptEscape => {
                    commands = prepend_title(title, commands);
                }
            }

            self.execute_tab(tab, &handle, &commands)?;
        }

        Ok(())
    }

    fn execute_tab(&mut self, tab: &Tab, handle: &TabHandle, commands: &[String]) -> Result<()> {
        match &tab.panes {
            Some(panes) => self.execute_panes(panes, commands),
            None => {
                for command in commands {
                    self.write(handle, command)?;
                }
                Ok(())
            }
        }
    }

    /// Split the current tab into `panes`.
    ///
    /// `tab_commands` is written to every pane before the pane's own
    /// commands.
    ///
    /// Top-level panes are laid out left to right with vertical splits, then
    /// focus walks back left to the first pane. A second pass splits each
    /// top-level pane that has sub-panes horizontally and moves right once
    /// it is done.
    pub fn execute_panes(&mut self, panes: &PaneMap, tab_commands: &[String]) -> Result<()> {
        self.vertical_splits = 0;

        for (i, pane) in panes.values().enumerate() {
            if i > 0 {
                self.driver.split_vertical()?;
                self.vertical_splits += 1;
            }
            self.write_pane(tab_commands, &pane.commands)?;
        }

        for _ in 0..self.vertical_splits {
            self.driver.select_pane(Direction::Left)?;
        }

        for (key, pane) in panes {
            let Some(sub_panes) = &pane.panes else {
                continue;
            };
            debug!(pane = %key, count = sub_panes.len(), "splitting sub-panes");
            for sub_pane in sub_panes.values() {
                self.driver.split_horizontal()?;
                self.write_pane(tab_commands, &sub_pane.commands)?;
            }
            self.driver.select_pane(Direction::Right)?;
        }

        Ok(())
    }

    /// Move pane focus by direction name.
    ///
    /// An unknown direction is reported and ignored; the run continues.
    pub fn select_pane_named(&mut self, direction: &str) -> Result<()> {
        match direction.parse::<Direction>() {
            Ok(direction) => self.driver.select_pane(direction),
            Err(e) => {
                error!(direction, "invalid pane direction");
                eprintln!("Error: {}", e);
                Ok(())
            }
        }
    }

    /// The tab the last tab's commands were sent to.
    pub fn current_tab(&self) -> Option<&TabHandle> {
        self.current_tab.as_ref()
    }

    /// Title of the last executed tab.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    fn write_pane(&mut self, tab_commands: &[String], pane_commands: &[String]) -> Result<()> {
        self.summary.panes += 1;
        let target = self.driver.active_tab()?;
        for command in tab_commands.iter().chain(pane_commands) {
            self.write(&target, command)?;
        }
        Ok(())
    }

    fn write(&mut self, tab: &TabHandle, command: &str) -> Result<()> {
        self.summary.commands += 1;
        self.driver.write(tab, command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ConfigBuilder;
    use crate::driver::recording::{Action, RecordingDriver};
    use crate::error::TermfileError;
    use crate::layout::NAME_OPTION;

    fn run(config: &Config) -> Vec<Action> {
        let mut driver = RecordingDriver::new();
        Executor::new(&mut driver).run(config).unwrap();
        driver.into_actions()
    }

    fn writes(actions: &[Action]) -> Vec<&str> {
        actions
            .iter()
            .filter_map(|a| match a {
                Action::Write { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn write(tab: &str, text: &str) -> Action {
        Action::Write {
            tab: TabHandle(tab.into()),
            text: text.into(),
        }
    }

    #[test]
    fn test_prepend_befores() {
        assert_eq!(
            prepend_befores(vec!["ls".to_string()], &["ps".to_string()]),
            ["ps", "ls"]
        );
        assert_eq!(prepend_befores(vec!["ls".to_string()], &[]), ["ls"]);
    }

    #[test]
    fn test_prepend_title() {
        assert_eq!(
            prepend_title(Some("hey"), vec!["ls".to_string()]),
            ["PS1=\"$PS1\\[\\e]2;hey\\a\\]\"", "ls"]
        );
        assert_eq!(prepend_title(None, vec!["ls".to_string()]), ["ls"]);
    }

    #[test]
    fn test_empty_config_does_nothing() {
        assert!(run(&Config::default()).is_empty());
    }

    #[test]
    fn test_default_window_runs_first_then_named_in_order() {
        let config = ConfigBuilder::new()
            .window("zeta", |w| {
                w.tab("t", |t| {
                    t.run(["zeta"]);
                });
            })
            .window("alpha", |w| {
                w.tab("t", |t| {
                    t.run(["alpha"]);
                });
            })
            .window("default", |w| {
                w.tab("default", |t| {
                    t.run(["here"]);
                });
            })
            .build();

        let actions = run(&config);
        assert_eq!(writes(&actions), ["here", "alpha", "zeta"]);
        assert_eq!(actions[0], write("active", "here"));
        assert!(matches!(actions[1], Action::OpenWindow { .. }));
    }

    #[test]
    fn test_tabs_run_in_name_order() {
        let config = ConfigBuilder::new()
            .window("default", |w| {
                w.tab("tab2", |t| {
                    t.run(["two"]);
                });
                w.tab("tab1", |t| {
                    t.run(["one"]);
                });
                w.tab("default", |t| {
                    t.run(["zero"]);
                });
            })
            .build();

        let actions = run(&config);
        assert_eq!(writes(&actions), ["zero", "one", "two"]);
        assert_eq!(actions[0], write("active", "zero"));
        assert!(matches!(actions[1], Action::OpenTab { .. }));
        assert_eq!(actions[2], write("tab0", "one"));
    }

    #[test]
    fn test_named_window_opens_window_then_tabs() {
        let config = ConfigBuilder::new()
            .window("work", |w| {
                w.name("Work").option("profile", "Dark");
                w.before(["cd ~/src"]);
                w.tab("a", |t| {
                    t.name("First").run(["vim"]);
                });
                w.tab("b", |t| {
                    t.name("Second").run(["cargo watch"]);
                });
            })
            .build();

        let actions = run(&config);
        let mut window_options = Options::new();
        window_options.insert(NAME_OPTION.into(), "Work".into());
        window_options.insert("profile".into(), "Dark".into());
        let mut tab_options = Options::new();
        tab_options.insert(NAME_OPTION.into(), "Second".into());

        assert_eq!(
            actions,
            [
                Action::OpenWindow {
                    options: window_options,
                    tab: TabHandle("tab0".into()),
                },
                Action::SetTitle {
                    tab: TabHandle("tab0".into()),
                    title: "Work".into(),
                },
                write("tab0", "cd ~/src"),
                write("tab0", "vim"),
                Action::OpenTab {
                    options: tab_options,
                    tab: TabHandle("tab1".into()),
                },
                Action::SetTitle {
                    tab: TabHandle("tab1".into()),
                    title: "Second".into(),
                },
                write("tab1", "cd ~/src"),
                write("tab1", "cargo watch"),
            ]
        );
    }

    #[test]
    fn test_first_tab_title_falls_back_to_tab_name() {
        let config = ConfigBuilder::new()
            .window("work", |w| {
                w.tab("a", |t| {
                    t.name("Editor");
                });
            })
            .build();

        let actions = run(&config);
        assert_eq!(
            actions[1],
            Action::SetTitle {
                tab: TabHandle("tab0".into()),
                title: "Editor".into(),
            }
        );
    }

    #[test]
    fn test_default_tab_of_named_window_after_first_reuses_active() {
        let config = ConfigBuilder::new()
            .window("w", |w| {
                w.tab("a", |t| {
                    t.run(["first"]);
                });
                w.tab("default", |t| {
                    t.run(["second"]);
                });
            })
            .build();

        let actions = run(&config);
        assert_eq!(actions.len(), 3);
        assert_eq!(actions[2], write("tab0", "second"));
    }

    #[test]
    fn test_named_default_tab_reuses_active() {
        let config = ConfigBuilder::new()
            .window("w", |w| {
                w.tab("a", |t| {
                    t.run(["first"]);
                });
                w.tab(TabKind::Named("default".into()), |t| {
                    t.run(["second"]);
                });
            })
            .build();

        let actions = run(&config);
        assert!(!actions.iter().any(|a| matches!(a, Action::OpenTab { .. })));
        assert_eq!(actions.len(), 3);
        assert_eq!(actions[2], write("tab0", "second"));
    }

    #[test]
    fn test_window_panes_prefixed_by_default_tab_commands() {
        let config = ConfigBuilder::new()
            .window("w", |w| {
                w.pane(["left"]);
                w.pane(["right"]);
                w.tab("default", |t| {
                    t.run(["cd app"]);
                });
            })
            .build();

        let actions = run(&config);
        assert_eq!(
            actions[1..],
            [
                write("tab0", "cd app"),
                write("tab0", "left"),
                Action::SplitVertical,
                write("pane1", "cd app"),
                write("pane1", "right"),
                Action::SelectPane(Direction::Left),
            ]
        );
    }

    #[test]
    fn test_summary_resets_between_runs() {
        let config = ConfigBuilder::new()
            .setup(["bundle install"])
            .window("default", |w| {
                w.tab("default", |t| {
                    t.run(["ls"]);
                });
            })
            .build();
        let mut driver = RecordingDriver::new();
        let mut executor = Executor::new(&mut driver);
        let first = executor.run(&config).unwrap();
        let second = executor.run(&config).unwrap();
        assert_eq!(first, second);
        assert_eq!(second.commands, 1);
        assert_eq!(executor.setup(&config).unwrap().commands, 1);
    }

    #[test]
    fn test_prompt_escape_titles() {
        let config = ConfigBuilder::new()
            .window("default", |w| {
                w.tab("logs", |t| {
                    t.name("Logs").run(["tail -f log"]);
                });
            })
            .build();

        let mut driver = RecordingDriver::new().with_title_strategy(TitleStrategy::PromptEscape);
        Executor::new(&mut driver).run(&config).unwrap();
        let actions = driver.into_actions();
        assert_eq!(writes(&actions), [title_command("Logs").as_str(), "tail -f log"]);
        assert!(!actions.iter().any(|a| matches!(a, Action::SetTitle { .. })));
    }

    #[test]
    fn test_window_without_tabs_is_skipped() {
        let config = ConfigBuilder::new()
            .window("empty", |w| {
                w.before(["ls"]);
            })
            .build();
        assert!(run(&config).is_empty());
    }

    #[test]
    fn test_pane_splits_and_selects_left() {
        let config = ConfigBuilder::new()
            .window("default", |w| {
                w.tab("default", |t| {
                    t.run(["cd app"]);
                    t.pane(["a"]);
                    t.pane(["b"]);
                    t.pane(["c"]);
                });
            })
            .build();

        let actions = run(&config);
        assert_eq!(
            actions,
            [
                write("active", "cd app"),
                write("active", "a"),
                Action::SplitVertical,
                write("pane1", "cd app"),
                write("pane1", "b"),
                Action::SplitVertical,
                write("pane2", "cd app"),
                write("pane2", "c"),
                Action::SelectPane(Direction::Left),
                Action::SelectPane(Direction::Left),
            ]
        );
    }

    #[test]
    fn test_split_counts_for_n_panes() {
        for n in 1..=5 {
            let config = ConfigBuilder::new()
                .window("default", |w| {
                    w.tab("default", |t| {
                        for i in 0..n {
                            t.pane([format!("cmd{}", i)]);
                        }
                    });
                })
                .build();

            let actions = run(&config);
            let splits = actions
                .iter()
                .filter(|a| **a == Action::SplitVertical)
                .count();
            let lefts: Vec<_> = actions
                .iter()
                .skip_while(|a| **a != Action::SelectPane(Direction::Left))
                .collect();
            assert_eq!(splits, n - 1);
            assert_eq!(lefts.len(), n - 1);
            assert!(lefts.iter().all(|a| **a == Action::SelectPane(Direction::Left)));
        }
    }

    #[test]
    fn test_sub_panes_split_horizontally_then_select_right() {
        let config = ConfigBuilder::new()
            .window("window1", |w| {
                w.pane_block(|p| {
                    p.run(["ls"]);
                    p.pane(["uptime"]);
                });
                w.pane(["ps"]);
                w.pane(["test"]);
            })
            .build();

        let actions = run(&config);
        assert_eq!(
            actions,
            [
                Action::OpenWindow {
                    options: Options::new(),
                    tab: TabHandle("tab0".into()),
                },
                write("tab0", "ls"),
                Action::SplitVertical,
                write("pane1", "ps"),
                Action::SplitVertical,
                write("pane2", "test"),
                Action::SelectPane(Direction::Left),
                Action::SelectPane(Direction::Left),
                Action::SplitHorizontal,
                write("pane3", "uptime"),
                Action::SelectPane(Direction::Right),
            ]
        );
    }

    #[test]
    fn test_one_right_per_pane_with_sub_panes() {
        let config = ConfigBuilder::new()
            .window("default", |w| {
                w.tab("default", |t| {
                    t.pane_block(|p| {
                        p.pane(["a1"]);
                        p.pane(["a2"]);
                    });
                    t.pane_block(|p| {
                        p.pane(["b1"]);
                    });
                });
            })
            .build();

        let actions = run(&config);
        let count = |wanted: &Action| actions.iter().filter(|a| *a == wanted).count();
        assert_eq!(count(&Action::SplitHorizontal), 3);
        assert_eq!(count(&Action::SelectPane(Direction::Right)), 2);
        assert_eq!(count(&Action::SplitVertical), 1);
        assert_eq!(writes(&actions), ["a1", "a2", "b1"]);
    }

    #[test]
    fn test_tab_commands_prefix_every_pane() {
        let config = ConfigBuilder::new()
            .window("default", |w| {
                w.before(["source env"]);
                w.tab("default", |t| {
                    t.run(["cd app"]);
                    t.pane_block(|p| {
                        p.run(["top"]);
                        p.pane(["bottom"]);
                    });
                });
            })
            .build();

        let actions = run(&config);
        assert_eq!(
            writes(&actions),
            ["source env", "cd app", "top", "source env", "cd app", "bottom"]
        );
    }

    #[test]
    fn test_empty_pane_map_does_nothing() {
        let config = ConfigBuilder::new()
            .window("default", |w| {
                w.tab("default", |t| {
                    t.run(["never"]).panes();
                });
            })
            .build();
        assert!(run(&config).is_empty());
    }

    #[test]
    fn test_select_pane_named() {
        let mut driver = RecordingDriver::new();
        let mut executor = Executor::new(&mut driver);
        executor.select_pane_named("Diagonal").unwrap();
        executor.select_pane_named("Below").unwrap();
        assert_eq!(driver.actions(), [Action::SelectPane(Direction::Below)]);
    }

    #[test]
    fn test_setup_writes_to_active_tab() {
        let config = ConfigBuilder::new()
            .setup(["bundle install", "rake db:setup"])
            .build();
        let mut driver = RecordingDriver::new();
        let summary = Executor::new(&mut driver).setup(&config).unwrap();
        assert_eq!(summary.commands, 2);
        assert_eq!(
            driver.actions(),
            [
                write("active", "bundle install"),
                write("active", "rake db:setup")
            ]
        );
    }

    #[test]
    fn test_summary_and_state() {
        let config = ConfigBuilder::new()
            .window("w", |w| {
                w.tab("t", |t| {
                    t.name("T");
                    t.pane(["a"]);
                    t.pane(["b"]);
                });
            })
            .build();
        let mut driver = RecordingDriver::new();
        let mut executor = Executor::new(&mut driver);
        let summary = executor.run(&config).unwrap();
        assert_eq!(
            summary,
            RunSummary {
                windows: 1,
                tabs: 1,
                panes: 2,
                commands: 2,
            }
        );
        assert_eq!(executor.title(), Some("T"));
        assert_eq!(executor.current_tab(), Some(&TabHandle("tab0".into())));
    }

    struct FailingDriver {
        inner: RecordingDriver,
    }

    impl TerminalDriver for FailingDriver {
        fn open_window(&mut self, options: &Options) -> Result<TabHandle> {
            self.inner.open_window(options)
        }
        fn open_tab(&mut self, _options: &Options) -> Result<TabHandle> {
            Err(TermfileError::DriverError("iTerm2 is not running".into()))
        }
        fn active_tab(&mut self) -> Result<TabHandle> {
            self.inner.active_tab()
        }
        fn split_vertical(&mut self) -> Result<()> {
            self.inner.split_vertical()
        }
        fn split_horizontal(&mut self) -> Result<()> {
            self.inner.split_horizontal()
        }
        fn select_pane(&mut self, direction: Direction) -> Result<()> {
            self.inner.select_pane(direction)
        }
        fn set_title(&mut self, tab: &TabHandle, title: &str) -> Result<()> {
            self.inner.set_title(tab, title)
        }
        fn write(&mut self, tab: &TabHandle, text: &str) -> Result<()> {
            self.inner.write(tab, text)
        }
    }

    #[test]
    fn test_driver_failure_aborts_run() {
        let config = ConfigBuilder::new()
            .window("default", |w| {
                w.tab("default", |t| {
                    t.run(["first"]);
                });
                w.tab("later", |t| {
                    t.run(["never"]);
                });
            })
            .window("other", |w| {
                w.tab("t", |t| {
                    t.run(["never either"]);
                });
            })
            .build();

        let mut driver = FailingDriver {
            inner: RecordingDriver::new(),
        };
        let err = Executor::new(&mut driver).run(&config).unwrap_err();
        assert!(matches!(err, TermfileError::DriverError(_)));
        assert_eq!(driver.inner.actions(), [write("active", "first")]);
    }
}
