//! Focus tool diagnostics for `winfocus check`.
//!
//! Detects the desktop environment and renders the capability probe with
//! install hints for whatever is missing.

use crate::exec::CommandExecutor;
use crate::probe::{EXTENSION_KEY, ToolAvailability, detect_focus_tools};
use owo_colors::OwoColorize;
use std::fmt::Write;

/// Desktop environments with distinct focus backends.
#[derive(Debug, Clone, PartialEq)]
pub enum DesktopEnvironment {
    Gnome,
    Kde,
    Wlroots,
    Unknown(String),
}

impl std::fmt::Display for DesktopEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gnome => write!(f, "GNOME"),
            Self::Kde => write!(f, "KDE Plasma"),
            Self::Wlroots => write!(f, "wlroots-based"),
            Self::Unknown(name) => {
                if name.is_empty() {
                    write!(f, "Unknown")
                } else {
                    write!(f, "{}", name)
                }
            }
        }
    }
}

/// Detect desktop environment from XDG_CURRENT_DESKTOP and XDG_SESSION_DESKTOP.
pub fn detect_desktop() -> DesktopEnvironment {
    let xdg_current = std::env::var("XDG_CURRENT_DESKTOP").unwrap_or_default();
    let xdg_session = std::env::var("XDG_SESSION_DESKTOP").unwrap_or_default();
    classify_desktop(&xdg_current, &xdg_session)
}

fn classify_desktop(xdg_current: &str, xdg_session: &str) -> DesktopEnvironment {
    let combined = format!("{} {}", xdg_current, xdg_session).to_lowercase();

    if combined.contains("gnome") || combined.contains("ubuntu") {
        DesktopEnvironment::Gnome
    } else if combined.contains("kde") || combined.contains("plasma") {
        DesktopEnvironment::Kde
    } else if ["sway", "river", "wayfire", "labwc", "wlroots"]
        .iter()
        .any(|name| combined.contains(name))
    {
        DesktopEnvironment::Wlroots
    } else {
        DesktopEnvironment::Unknown(xdg_current.to_string())
    }
}

/// Install hint for a probed tool, if there is a useful one.
fn install_hint(tool: &str) -> Option<&'static str> {
    match tool {
        "activate-window-by-title" => Some(
            "https://extensions.gnome.org/extension/5021/activate-window-by-title/ \
             (works without unsafe mode)",
        ),
        "wlrctl" => Some("sudo apt install wlrctl  (Sway and other wlroots compositors)"),
        "kdotool" => Some("cargo install kdotool  (KDE Plasma)"),
        "gdbus" => Some("sudo apt install libglib2.0-bin"),
        "busctl" => Some("provided by systemd"),
        _ => None,
    }
}

/// Render the probe result as the `check` report.
pub fn render_report(desktop: &DesktopEnvironment, tools: &ToolAvailability) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    writeln!(out, "Desktop: {}", desktop).ok();
    writeln!(out).ok();

    for (tool, present) in tools.iter() {
        if present {
            writeln!(out, "  {} {:<26} {}", "✓".green(), tool, "available".green()).ok();
        } else {
            writeln!(out, "  {} {:<26} {}", "✗".red(), tool, "not found".dimmed()).ok();
            if let Some(hint) = install_hint(tool) {
                writeln!(out, "      {}", hint.dimmed()).ok();
            }
        }
    }

    writeln!(out).ok();
    match desktop {
        DesktopEnvironment::Gnome if !tools.is_available(EXTENSION_KEY) => {
            writeln!(
                out,
                "{} Without the activate-window-by-title extension, GNOME focus depends on \
                 Shell.Eval (unsafe mode) or FocusApp (GNOME 45+).",
                "⚠".yellow()
            )
            .ok();
        }
        DesktopEnvironment::Kde if !tools.is_available("kdotool") => {
            writeln!(out, "{} Install kdotool to focus windows on KDE.", "⚠".yellow()).ok();
        }
        DesktopEnvironment::Wlroots if !tools.is_available("wlrctl") => {
            writeln!(
                out,
                "{} Install wlrctl to focus windows on wlroots compositors.",
                "⚠".yellow()
            )
            .ok();
        }
        _ => {
            writeln!(out, "{} Focus backends for this desktop look ready.", "✓".green()).ok();
        }
    }

    out
}

/// Probe the system and print the report to stdout.
pub fn check_focus_tools(executor: &dyn CommandExecutor, json: bool) -> anyhow::Result<()> {
    let tools = detect_focus_tools(executor);

    if json {
        println!("{}", serde_json::to_string_pretty(&tools)?);
    } else {
        print!("{}", render_report(&detect_desktop(), &tools));
    }
    Ok(())
}
