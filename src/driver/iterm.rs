//! iTerm2 driver for macOS.
//!
//! Windows, tabs, titles, and text are scripted through iTerm2's AppleScript
//! dictionary. Splitting and pane selection have no working scripting
//! equivalent, so they click iTerm2's menu items through System Events
//! (this needs the Accessibility permission).
//!
//! Tab handles are iTerm2 session ids.

use super::{Direction, TabHandle, TerminalDriver, run_command};
use crate::error::Result;
use crate::layout::Options;
use tracing::debug;

/// Option naming the iTerm2 profile for new windows and tabs.
pub const PROFILE_OPTION: &str = "profile";

/// Checks that we are on macOS and running inside iTerm2.
pub fn valid_system() -> bool {
    cfg!(target_os = "macos")
        && std::env::var("TERM_PROGRAM").is_ok_and(|program| program == "iTerm.app")
}

/// Escape text for an AppleScript string literal.
///
/// ```
/// use termfile::driver::iterm::quote;
///
/// assert_eq!(quote(r#"echo "hi""#), r#""echo \"hi\"""#);
/// ```
pub fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}

/// AppleScript clicking `action` in iTerm2's `menu` (optionally via `submenu`).
pub fn menu_click_script(menu: &str, submenu: Option<&str>, action: &str) -> String {
    let mut target = format!("menu {0} of menu bar item {0} of menu bar 1", quote(menu));
    if let Some(submenu) = submenu {
        target = format!("menu {0} of menu item {0} of {1}", quote(submenu), target);
    }
    format!(
        "tell application \"System Events\" to tell process \"iTerm2\" to click menu item {} of {}",
        quote(action),
        target
    )
}

/// AppleScript running `body` inside the session with the given id.
pub fn session_script(session: &TabHandle, body: &str) -> String {
    format!(
        r#"tell application "iTerm2"
    repeat with w in windows
        repeat with t in tabs of w
            repeat with s in sessions of t
                if id of s is {id} then
                    tell s to {body}
                    return
                end if
            end repeat
        end repeat
    end repeat
end tell"#,
        id = quote(&session.0),
        body = body
    )
}

fn profile_clause(options: &Options) -> String {
    match options.get(PROFILE_OPTION) {
        Some(profile) => format!("profile {}", quote(profile)),
        None => "default profile".to_string(),
    }
}

/// Drives iTerm2 through `osascript`.
#[derive(Debug, Default)]
pub struct ITermDriver;

impl ITermDriver {
    pub fn new() -> Self {
        ITermDriver
    }

    fn osascript(&self, script: &str) -> Result<String> {
        debug!(script, "osascript");
        run_command("osascript", &["-e", script])
    }

    fn click(&self, menu: &str, submenu: Option<&str>, action: &str) -> Result<()> {
        self.osascript(&menu_click_script(menu, submenu, action))
            .map(drop)
    }
}

impl TerminalDriver for ITermDriver {
    fn open_window(&mut self, options: &Options) -> Result<TabHandle> {
        let script = format!(
            r#"tell application "iTerm2"
    set w to (create window with {})
    return id of current session of w
end tell"#,
            profile_clause(options)
        );
        self.osascript(&script).map(TabHandle)
    }

    fn open_tab(&mut self, options: &Options) -> Result<TabHandle> {
        let script = format!(
            r#"tell application "iTerm2"
    tell current window to set t to (create tab with {})
    return id of current session of t
end tell"#,
            profile_clause(options)
        );
        self.osascript(&script).map(TabHandle)
    }

    fn active_tab(&mut self) -> Result<TabHandle> {
        self.osascript(
            r#"tell application "iTerm2" to return id of current session of current window"#,
        )
        .map(TabHandle)
    }

    fn split_vertical(&mut self) -> Result<()> {
        self.click("Shell", None, "Split Vertically with Current Profile")
    }

    fn split_horizontal(&mut self) -> Result<()> {
        self.click("Shell", None, "Split Horizontally with Current Profile")
    }

    fn select_pane(&mut self, direction: Direction) -> Result<()> {
        self.click(
            "Window",
            Some("Select Split Pane"),
            &format!("Select Pane {}", direction),
        )
    }

    fn set_title(&mut self, tab: &TabHandle, title: &str) -> Result<()> {
        let body = format!("set name to {}", quote(title));
        self.osascript(&session_script(tab, &body)).map(drop)
    }

    fn write(&mut self, tab: &TabHandle, text: &str) -> Result<()> {
        let body = format!("write text {}", quote(text));
        self.osascript(&session_script(tab, &body)).map(drop)
    }
}
