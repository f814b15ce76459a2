//! Terminal identity resolution.
//!
//! Maps a raw terminal/editor name (usually `$TERM_PROGRAM`) to the two
//! identifiers the focus backends need:
//! - a desktop-file application id (`code.desktop`) for app-based backends
//! - a window-title substring (`Visual Studio Code`) for title-based backends
//!
//! Lookups are case-insensitive and total: unknown names fall back to a
//! derived value instead of failing.

use crate::defaults;

/// Identifiers derived from one raw terminal name.
///
/// Recomputed for every focus request; never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalIdentity {
    pub raw: String,
    pub app_id: String,
    pub search_term: String,
}

impl TerminalIdentity {
    pub fn resolve(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            app_id: app_id(raw),
            search_term: search_term(raw),
        }
    }
}

/// Desktop-file application id for a terminal name.
pub fn app_id(name: &str) -> String {
    let lower = name.to_lowercase();
    let known = match lower.as_str() {
        "code" | "vscode" | "visual studio code" => "code.desktop",
        "gnome-terminal" => "org.gnome.Terminal.desktop",
        "konsole" => "org.kde.konsole.desktop",
        "alacritty" => "Alacritty.desktop",
        "kitty" => "kitty.desktop",
        "wezterm" => "org.wezfurlong.wezterm.desktop",
        "tilix" => "com.gexperts.Tilix.desktop",
        "terminator" => "terminator.desktop",
        _ => return format!("{}{}", lower, defaults::DESKTOP_SUFFIX),
    };
    known.to_string()
}

/// Window-title substring for a terminal name.
///
/// Only names whose window title differs from the process name are mapped.
pub fn search_term(name: &str) -> String {
    match name.to_lowercase().as_str() {
        "code" | "vscode" => "Visual Studio Code".to_string(),
        "gnome-terminal" => "Terminal".to_string(),
        _ => name.to_string(),
    }
}

/// Detect the current terminal from the process environment.
pub fn detect_terminal_name() -> String {
    detect_terminal_name_from(|key| std::env::var(key).ok())
}

/// Environment-independent core of [`detect_terminal_name`].
///
/// `TERM_PROGRAM` wins; VS Code's integrated terminal is recognized by its
/// injection markers; anything else is a generic terminal.
pub fn detect_terminal_name_from<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let is_set = |key: &str| lookup(key).is_some_and(|v| !v.is_empty());

    if let Some(program) = lookup("TERM_PROGRAM")
        && !program.is_empty()
    {
        return program;
    }

    if is_set("VSCODE_INJECTION") || is_set("TERM_PROGRAM_VERSION") {
        return "Code".to_string();
    }

    defaults::FALLBACK_TERMINAL.to_string()
}
