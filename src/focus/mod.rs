//! Window focus requests.
//!
//! A focus request either runs the user's override command verbatim or
//! walks the backend chain:
//!
//! ```text
//! focus_terminal(settings)
//!    │
//!    ├── override_command set? ──► sh -c <command>
//!    │
//!    ▼
//! FocusChain::try_focus(terminal name)
//!    │  extension → Eval(title) → Eval(app) → FocusApp → wlrctl → kdotool
//!    ▼
//! first success, or AllMethodsExhausted(last error)
//! ```

pub mod chain;
pub mod reply;
pub mod strategies;

pub use chain::{ChainReport, FailureRecord, FocusChain};
pub use strategies::{FocusStrategy, standard_strategies};

use crate::config::FocusConfig;
use crate::defaults;
use crate::error::{FocusError, Result};
use crate::exec::CommandExecutor;
use std::sync::Arc;
use tracing::{debug, info};

/// What satisfied a focus request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedBy {
    /// The user's override command ran successfully.
    Override,
    /// A chain strategy succeeded.
    Strategy(&'static str),
}

impl std::fmt::Display for FocusedBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Override => write!(f, "override command"),
            Self::Strategy(name) => write!(f, "{}", name),
        }
    }
}

/// Focus the configured (or detected) terminal using the standard chain.
pub fn focus_terminal(
    settings: &FocusConfig,
    executor: Arc<dyn CommandExecutor>,
) -> Result<FocusedBy> {
    let chain = FocusChain::standard(executor.clone());
    focus_with_chain(settings, executor.as_ref(), &chain)
}

/// Like [`focus_terminal`] with an explicit chain.
pub fn focus_with_chain(
    settings: &FocusConfig,
    executor: &dyn CommandExecutor,
    chain: &FocusChain,
) -> Result<FocusedBy> {
    if let Some(command) = settings.override_command() {
        debug!(command, "using override command, skipping focus chain");
        run_override(executor, command)?;
        info!(command, "window focused by override command");
        return Ok(FocusedBy::Override);
    }

    let terminal = settings.terminal_name();
    chain.try_focus(&terminal).map(FocusedBy::Strategy)
}

/// Run a user-supplied focus command through the shell.
pub fn run_override(executor: &dyn CommandExecutor, command: &str) -> Result<()> {
    executor
        .execute(defaults::OVERRIDE_SHELL, &["-c", command])
        .map(|_| ())
        .map_err(|e| FocusError::OverrideFailed {
            command: command.to_string(),
            message: e.to_string(),
        })
}
