//! winfocus - bring an application's window to the foreground on Linux desktops
//!
//! Walks a fixed chain of focus backends (GNOME Shell extension, Shell.Eval,
//! FocusApp, wlrctl, kdotool) until one succeeds.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod defaults;
#[cfg(feature = "cli")]
pub mod diagnostics;
pub mod error;
pub mod exec;
pub mod focus;
pub mod identity;
pub mod probe;
pub mod sys;

// Command execution seam
pub use exec::{CommandExecutor, SystemCommandExecutor};

// Focus chain
pub use focus::{ChainReport, FocusChain, FocusStrategy, FocusedBy, focus_terminal};
pub use identity::TerminalIdentity;
pub use probe::{ToolAvailability, detect_focus_tools};

// Error handling
pub use error::{FocusError, Result};

// Config
pub use config::{Config, FocusConfig};
