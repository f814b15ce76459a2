//! Focus backends, one per activation mechanism.
//!
//! | Strategy                 | Transport                                 | Target       |
//! |--------------------------|-------------------------------------------|--------------|
//! | `ActivateWindowByTitle`  | busctl → GNOME extension D-Bus method     | search term  |
//! | `ShellEvalByTitle`       | gdbus → `org.gnome.Shell.Eval`            | search term  |
//! | `ShellEvalByApp`         | gdbus → `org.gnome.Shell.Eval`            | app id       |
//! | `ShellFocusApp`          | gdbus → `org.gnome.Shell.FocusApp` (45+)  | app id       |
//! | `Wlrctl`                 | `wlrctl toplevel focus` (wlroots)         | fixed id, title |
//! | `Kdotool`                | `kdotool search` + `windowactivate` (KDE) | fixed class  |
//!
//! Each strategy performs its own external calls through the shared
//! `CommandExecutor` and keeps no state between invocations.

use crate::defaults::{
    BUSCTL, GDBUS, GNOME_SHELL_DEST, GNOME_SHELL_EVAL, GNOME_SHELL_FOCUS_APP, GNOME_SHELL_PATH,
    KDOTOOL, KDOTOOL_CLASS, REPLY_APP_NOT_FOUND, REPLY_NO_MATCHING_WINDOW,
    WINDOW_BY_TITLE_INTERFACE, WINDOW_BY_TITLE_METHOD, WINDOW_BY_TITLE_PATH, WLRCTL, WLRCTL_APP_ID,
};
use crate::error::{FocusError, Result};
use crate::exec::CommandExecutor;
use crate::focus::reply::{self, EvalReply};
use crate::identity::TerminalIdentity;
use std::sync::Arc;
use tracing::debug;

/// One way of bringing a window to the foreground.
pub trait FocusStrategy: Send + Sync {
    /// Human-readable label, used in logs and failure records.
    fn name(&self) -> &'static str;

    /// Attempt to focus the window described by `identity`.
    fn focus(&self, identity: &TerminalIdentity) -> Result<()>;
}

/// The six backends in priority order.
///
/// Dedicated, side-effect-free D-Bus methods come first; spawning
/// compositor-specific tools comes last.
pub fn standard_strategies(executor: Arc<dyn CommandExecutor>) -> Vec<Box<dyn FocusStrategy>> {
    vec![
        Box::new(ActivateWindowByTitle::new(executor.clone())),
        Box::new(ShellEvalByTitle::new(executor.clone())),
        Box::new(ShellEvalByApp::new(executor.clone())),
        Box::new(ShellFocusApp::new(executor.clone())),
        Box::new(Wlrctl::new(executor.clone())),
        Box::new(Kdotool::new(executor)),
    ]
}

/// GNOME extension "Activate Window By Title".
///
/// <https://extensions.gnome.org/extension/5021/activate-window-by-title/>
/// Works without unsafe mode on GNOME 42+.
pub struct ActivateWindowByTitle {
    executor: Arc<dyn CommandExecutor>,
}

impl ActivateWindowByTitle {
    pub fn new(executor: Arc<dyn CommandExecutor>) -> Self {
        Self { executor }
    }
}

impl FocusStrategy for ActivateWindowByTitle {
    fn name(&self) -> &'static str {
        "activate-window-by-title extension"
    }

    fn focus(&self, identity: &TerminalIdentity) -> Result<()> {
        self.executor
            .execute(
                BUSCTL,
                &[
                    "--user",
                    "call",
                    GNOME_SHELL_DEST,
                    WINDOW_BY_TITLE_PATH,
                    WINDOW_BY_TITLE_INTERFACE,
                    WINDOW_BY_TITLE_METHOD,
                    "s",
                    &identity.search_term,
                ],
            )
            .map(|_| ())
            .map_err(|e| {
                with_context(
                    e,
                    &format!("{}({:?})", WINDOW_BY_TITLE_METHOD, identity.search_term),
                )
            })
    }
}

/// `Shell.Eval` script activating the first window whose title contains the term.
///
/// Requires unsafe mode (or development tools) on GNOME 41+.
pub struct ShellEvalByTitle {
    executor: Arc<dyn CommandExecutor>,
}

impl ShellEvalByTitle {
    pub fn new(executor: Arc<dyn CommandExecutor>) -> Self {
        Self { executor }
    }
}

impl FocusStrategy for ShellEvalByTitle {
    fn name(&self) -> &'static str {
        "GNOME Shell Eval (by window title)"
    }

    fn focus(&self, identity: &TerminalIdentity) -> Result<()> {
        let script = title_script(&identity.search_term);
        let reply = gnome_shell_call(self.executor.as_ref(), GNOME_SHELL_EVAL, &script)?;

        match reply::classify(&reply, REPLY_NO_MATCHING_WINDOW) {
            EvalReply::Activated => Ok(()),
            EvalReply::NotFound => Err(FocusError::NoMatchingWindow {
                search_term: identity.search_term.clone(),
            }),
            EvalReply::Blocked => Err(FocusError::SecurityBlocked {
                tool: "Shell.Eval".to_string(),
            }),
        }
    }
}

/// `Shell.Eval` script activating a running application by desktop id.
pub struct ShellEvalByApp {
    executor: Arc<dyn CommandExecutor>,
}

impl ShellEvalByApp {
    pub fn new(executor: Arc<dyn CommandExecutor>) -> Self {
        Self { executor }
    }
}

impl FocusStrategy for ShellEvalByApp {
    fn name(&self) -> &'static str {
        "GNOME Shell Eval (by app)"
    }

    fn focus(&self, identity: &TerminalIdentity) -> Result<()> {
        let script = app_script(&identity.app_id);
        let reply = gnome_shell_call(self.executor.as_ref(), GNOME_SHELL_EVAL, &script)?;

        match reply::classify(&reply, REPLY_APP_NOT_FOUND) {
            EvalReply::Activated => Ok(()),
            EvalReply::NotFound => Err(FocusError::AppNotFound {
                app_id: identity.app_id.clone(),
            }),
            EvalReply::Blocked => Err(FocusError::SecurityBlocked {
                tool: "Shell.Eval".to_string(),
            }),
        }
    }
}

/// `org.gnome.Shell.FocusApp`, available since GNOME 45.
pub struct ShellFocusApp {
    executor: Arc<dyn CommandExecutor>,
}

impl ShellFocusApp {
    pub fn new(executor: Arc<dyn CommandExecutor>) -> Self {
        Self { executor }
    }
}

impl FocusStrategy for ShellFocusApp {
    fn name(&self) -> &'static str {
        "GNOME Shell FocusApp"
    }

    fn focus(&self, identity: &TerminalIdentity) -> Result<()> {
        gnome_shell_call(
            self.executor.as_ref(),
            GNOME_SHELL_FOCUS_APP,
            &identity.app_id,
        )
        .map(|_| ())
    }
}

/// wlroots compositors (Sway, river, ...) via `wlrctl`.
pub struct Wlrctl {
    executor: Arc<dyn CommandExecutor>,
}

impl Wlrctl {
    pub fn new(executor: Arc<dyn CommandExecutor>) -> Self {
        Self { executor }
    }
}

impl FocusStrategy for Wlrctl {
    fn name(&self) -> &'static str {
        "wlrctl"
    }

    fn focus(&self, identity: &TerminalIdentity) -> Result<()> {
        require_tool(self.executor.as_ref(), WLRCTL)?;

        // app_id matching is more reliable than titles, try it first
        let by_app_id = format!("app_id:{}", WLRCTL_APP_ID);
        match self
            .executor
            .execute(WLRCTL, &["toplevel", "focus", &by_app_id])
        {
            Ok(_) => return Ok(()),
            Err(e) => debug!(token = %by_app_id, error = %e, "wlrctl: retrying by title"),
        }

        let by_title = format!("title:{}", identity.search_term);
        self.executor
            .execute(WLRCTL, &["toplevel", "focus", &by_title])
            .map(|_| ())
            .map_err(|e| with_context(e, &by_title))
    }
}

/// KDE Plasma via `kdotool`.
pub struct Kdotool {
    executor: Arc<dyn CommandExecutor>,
}

impl Kdotool {
    pub fn new(executor: Arc<dyn CommandExecutor>) -> Self {
        Self { executor }
    }
}

impl FocusStrategy for Kdotool {
    fn name(&self) -> &'static str {
        "kdotool"
    }

    fn focus(&self, _identity: &TerminalIdentity) -> Result<()> {
        require_tool(self.executor.as_ref(), KDOTOOL)?;

        let no_match = || FocusError::NoMatchingWindow {
            search_term: format!("class:{}", KDOTOOL_CLASS),
        };

        // kdotool exits non-zero when the search matches nothing
        let output = match self
            .executor
            .execute(KDOTOOL, &["search", "--class", KDOTOOL_CLASS])
        {
            Ok(output) => output,
            Err(FocusError::Transport { message, .. }) => {
                debug!(error = %message, "kdotool search failed, treating as no match");
                return Err(no_match());
            }
            Err(e) => return Err(e),
        };

        let Some(window_id) = first_window_id(&output) else {
            return Err(no_match());
        };

        self.executor
            .execute(KDOTOOL, &["windowactivate", window_id])
            .map(|_| ())
            .map_err(|e| with_context(e, &format!("windowactivate {}", window_id)))
    }
}

/// Call a single-string-argument method on GNOME Shell's session-bus object.
fn gnome_shell_call(executor: &dyn CommandExecutor, method: &str, arg: &str) -> Result<String> {
    executor
        .execute(
            GDBUS,
            &[
                "call",
                "--session",
                "--dest",
                GNOME_SHELL_DEST,
                "--object-path",
                GNOME_SHELL_PATH,
                "--method",
                method,
                arg,
            ],
        )
        .map_err(|e| with_context(e, method))
}

/// Fail fast with `ToolNotInstalled` before anything is spawned.
fn require_tool(executor: &dyn CommandExecutor, tool: &str) -> Result<()> {
    if executor.is_available(tool) {
        Ok(())
    } else {
        Err(FocusError::ToolNotInstalled {
            tool: tool.to_string(),
        })
    }
}

/// Prefix a transport failure with what was being attempted.
fn with_context(error: FocusError, what: &str) -> FocusError {
    match error {
        FocusError::Transport { tool, message } => FocusError::Transport {
            tool,
            message: format!("{}: {}", what, message),
        },
        other => other,
    }
}

/// First non-blank line of `kdotool search` output.
fn first_window_id(output: &str) -> Option<&str> {
    output.lines().map(str::trim).find(|line| !line.is_empty())
}

/// Quote `value` as a JavaScript string literal.
///
/// JSON string syntax is a subset of JS string syntax, so embedding the
/// serialized form keeps quotes and backslashes in window titles inert.
fn js_string(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

fn title_script(search_term: &str) -> String {
    format!(
        r#"(function() {{
    let needle = {needle};
    for (let actor of global.get_window_actors()) {{
        let win = actor.get_meta_window();
        let title = win.get_title() || '';
        if (title.indexOf(needle) !== -1) {{
            win.activate(global.get_current_time());
            return '{activated}';
        }}
    }}
    return '{not_found}';
}})()"#,
        needle = js_string(search_term),
        activated = crate::defaults::REPLY_ACTIVATED,
        not_found = REPLY_NO_MATCHING_WINDOW,
    )
}

fn app_script(app_id: &str) -> String {
    format!(
        r#"(function() {{
    let app = Shell.AppSystem.get_default().lookup_app({app_id});
    if (app) {{
        app.activate();
        return '{activated}';
    }}
    return '{not_found}';
}})()"#,
        app_id = js_string(app_id),
        activated = crate::defaults::REPLY_ACTIVATED,
        not_found = REPLY_APP_NOT_FOUND,
    )
}
