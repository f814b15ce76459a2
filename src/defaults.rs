//! Protocol constants and default configuration values for winfocus.
//!
//! Everything a backend needs to address a D-Bus endpoint or CLI tool lives
//! here so the strategies, the probe and the tests agree on one spelling.

use std::time::Duration;

/// Default bound on every external call (process spawn or D-Bus round trip).
///
/// A hung `gdbus` or compositor tool would otherwise stall the whole chain.
pub const COMMAND_TIMEOUT_SECS: u64 = 5;

/// `COMMAND_TIMEOUT_SECS` as a `Duration`.
pub const COMMAND_TIMEOUT: Duration = Duration::from_secs(COMMAND_TIMEOUT_SECS);

/// Shell used to run the user-supplied override command.
pub const OVERRIDE_SHELL: &str = "sh";

/// Terminal name used when nothing in the environment identifies one.
pub const FALLBACK_TERMINAL: &str = "Terminal";

/// Suffix appended to unrecognized names to form a desktop-file id.
pub const DESKTOP_SUFFIX: &str = ".desktop";

/// GNOME Shell session-bus name.
pub const GNOME_SHELL_DEST: &str = "org.gnome.Shell";

/// GNOME Shell's own object path.
pub const GNOME_SHELL_PATH: &str = "/org/gnome/Shell";

/// `org.gnome.Shell.Eval(script)`; disabled by default since GNOME 41.
pub const GNOME_SHELL_EVAL: &str = "org.gnome.Shell.Eval";

/// `org.gnome.Shell.FocusApp(app_id)`; GNOME 45+.
pub const GNOME_SHELL_FOCUS_APP: &str = "org.gnome.Shell.FocusApp";

/// Object path exported by the activate-window-by-title extension.
pub const WINDOW_BY_TITLE_PATH: &str = "/de/lucaswerkmeister/ActivateWindowByTitle";

/// Interface exported by the activate-window-by-title extension.
pub const WINDOW_BY_TITLE_INTERFACE: &str = "de.lucaswerkmeister.ActivateWindowByTitle";

/// Extension method that activates the first window whose title contains a substring.
pub const WINDOW_BY_TITLE_METHOD: &str = "activateBySubstring";

/// Reply sentinel: the `Eval` script activated something.
pub const REPLY_ACTIVATED: &str = "activated";

/// Reply sentinel: the by-title script found no window.
pub const REPLY_NO_MATCHING_WINDOW: &str = "no matching window";

/// Reply sentinel: the by-app script found no application.
pub const REPLY_APP_NOT_FOUND: &str = "app not found";

/// Falsy marker `gdbus` prints when `Eval` is refused: `(false, '')`.
pub const REPLY_FALSY: &str = "false";

/// wlroots foreign-toplevel CLI.
pub const WLRCTL: &str = "wlrctl";

/// KDE scripting CLI.
pub const KDOTOOL: &str = "kdotool";

/// D-Bus CLI used for GNOME Shell method calls.
pub const GDBUS: &str = "gdbus";

/// systemd D-Bus CLI used for the extension call and introspection.
pub const BUSCTL: &str = "busctl";

/// Fixed app id token tried first with `wlrctl toplevel focus app_id:<token>`.
pub const WLRCTL_APP_ID: &str = "code";

/// Fixed window class searched with `kdotool search --class <token>`.
pub const KDOTOOL_CLASS: &str = "code";
