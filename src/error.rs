//! Error types for winfocus.

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FocusError {
    // Backend reachability
    #[error("{tool} is not installed")]
    ToolNotInstalled { tool: String },

    #[error("{tool} failed: {message}")]
    Transport { tool: String, message: String },

    #[error("{tool} timed out after {}", humanize(.timeout))]
    Timeout { tool: String, timeout: Duration },

    // Backend reached, nothing to focus
    #[error("no window matching {search_term:?}")]
    NoMatchingWindow { search_term: String },

    #[error("application {app_id:?} not found")]
    AppNotFound { app_id: String },

    #[error(
        "{tool} blocked by GNOME Shell security policy - install the activate-window-by-title \
         extension or enable unsafe mode"
    )]
    SecurityBlocked { tool: String },

    // Chain aggregation
    #[error("all {attempted} focus methods failed, last error: {last}")]
    AllMethodsExhausted {
        attempted: usize,
        last: Box<FocusError>,
    },

    #[error("no focus methods configured")]
    NoStrategies,

    #[error("override command {command:?} failed: {message}")]
    OverrideFailed { command: String, message: String },
}

impl FocusError {
    /// Whether the backend was never reached (tool missing, call failed or hung).
    pub fn is_unreachable(&self) -> bool {
        matches!(
            self,
            Self::ToolNotInstalled { .. } | Self::Transport { .. } | Self::Timeout { .. }
        )
    }
}

fn humanize(timeout: &Duration) -> String {
    format!("{:.1}s", timeout.as_secs_f64())
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, FocusError>;
