//! Focus tool detection for troubleshooting.
//!
//! Reports which focus backends could work on this system. Purely
//! diagnostic: the focus chain never consults it and always tries every
//! backend itself.

use crate::defaults::{
    BUSCTL, GDBUS, GNOME_SHELL_DEST, KDOTOOL, WINDOW_BY_TITLE_METHOD, WINDOW_BY_TITLE_PATH, WLRCTL,
};
use crate::exec::CommandExecutor;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Command-line tools checked on the search path.
pub const PROBED_TOOLS: &[&str] = &[WLRCTL, KDOTOOL, GDBUS, BUSCTL];

/// Key under which the GNOME extension's presence is reported.
pub const EXTENSION_KEY: &str = "activate-window-by-title";

/// Point-in-time snapshot of tool presence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ToolAvailability {
    tools: BTreeMap<String, bool>,
}

impl ToolAvailability {
    pub fn is_available(&self, tool: &str) -> bool {
        self.tools.get(tool).copied().unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.tools.iter().map(|(name, present)| (name.as_str(), *present))
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    fn insert(&mut self, tool: &str, present: bool) {
        self.tools.insert(tool.to_string(), present);
    }
}

/// Detect which focus tools and D-Bus endpoints are present.
pub fn detect_focus_tools(executor: &dyn CommandExecutor) -> ToolAvailability {
    let mut availability = ToolAvailability::default();

    for tool in PROBED_TOOLS {
        availability.insert(tool, executor.is_available(tool));
    }

    availability.insert(EXTENSION_KEY, extension_installed(executor));
    availability
}

/// Introspect the extension's object path; any failure means "absent".
fn extension_installed(executor: &dyn CommandExecutor) -> bool {
    match executor.execute(
        BUSCTL,
        &["--user", "introspect", GNOME_SHELL_DEST, WINDOW_BY_TITLE_PATH],
    ) {
        Ok(output) => output.contains(WINDOW_BY_TITLE_METHOD),
        Err(e) => {
            debug!(error = %e, "activate-window-by-title introspection failed");
            false
        }
    }
}
