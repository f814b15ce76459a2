//! External command execution with testable process spawning.
//!
//! Every focus backend talks to the desktop through a short-lived child
//! process (`gdbus`, `busctl`, `wlrctl`, `kdotool`). The `CommandExecutor`
//! trait is the single seam for that, so strategies and the chain can be
//! exercised without a desktop session.

use crate::defaults;
use crate::error::{FocusError, Result};
use crate::sys;
use crossbeam_channel::RecvTimeoutError;
use std::os::unix::process::CommandExt;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};
use std::thread;
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Trait for executing system commands.
///
/// Object-safe, Send + Sync so one executor can be shared by every strategy.
pub trait CommandExecutor: Send + Sync {
    /// Execute a command with arguments.
    ///
    /// Returns the stdout of the command on success.
    /// Returns an error if the command cannot be spawned, exits non-zero,
    /// or outlives the executor's timeout.
    fn execute(&self, command: &str, args: &[&str]) -> Result<String>;

    /// Check whether `program` is an executable on the search path.
    ///
    /// Must not spawn anything.
    fn is_available(&self, program: &str) -> bool {
        find_in_path(program).is_some()
    }
}

/// Production command executor using std::process::Command.
#[derive(Debug, Clone)]
pub struct SystemCommandExecutor {
    timeout: Option<Duration>,
}

impl Default for SystemCommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCommandExecutor {
    /// Executor with the default per-call timeout.
    pub fn new() -> Self {
        Self {
            timeout: Some(defaults::COMMAND_TIMEOUT),
        }
    }

    /// Executor with an explicit timeout; `None` waits indefinitely.
    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl CommandExecutor for SystemCommandExecutor {
    fn execute(&self, command: &str, args: &[&str]) -> Result<String> {
        trace!(command, ?args, "spawning");

        // Own process group, so a timeout can kill the whole tree
        let child = Command::new(command)
            .args(args)
            .process_group(0)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    FocusError::ToolNotInstalled {
                        tool: command.to_string(),
                    }
                } else {
                    FocusError::Transport {
                        tool: command.to_string(),
                        message: format!("failed to execute: {}", e),
                    }
                }
            })?;

        let output = match self.timeout {
            Some(timeout) => wait_with_timeout(child, command, timeout)?,
            None => child
                .wait_with_output()
                .map_err(|e| FocusError::Transport {
                    tool: command.to_string(),
                    message: format!("failed to wait: {}", e),
                })?,
        };

        if !output.status.success() {
            return Err(FocusError::Transport {
                tool: command.to_string(),
                message: describe_failure(&output),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Wait for `child` on a helper thread, killing its process group once `timeout` elapses.
fn wait_with_timeout(child: Child, command: &str, timeout: Duration) -> Result<Output> {
    let pid = child.id();
    let (tx, rx) = crossbeam_channel::bounded(1);

    thread::spawn(move || {
        // Receiver is gone if the deadline already passed.
        tx.send(child.wait_with_output()).ok();
    });

    match rx.recv_timeout(timeout) {
        Ok(result) => result.map_err(|e| FocusError::Transport {
            tool: command.to_string(),
            message: format!("failed to wait: {}", e),
        }),
        Err(RecvTimeoutError::Timeout) => {
            // The group id is the leader's pid and is not reused while any member lives
            if sys::kill_process_group(pid) {
                debug!(command, pid, "killed after timeout");
            } else {
                warn!(command, pid, "timed out and could not be killed");
            }
            Err(FocusError::Timeout {
                tool: command.to_string(),
                timeout,
            })
        }
        Err(RecvTimeoutError::Disconnected) => Err(FocusError::Transport {
            tool: command.to_string(),
            message: "wait thread exited without a result".to_string(),
        }),
    }
}

/// Exit status plus whatever the tool printed, stderr preferred.
fn describe_failure(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let detail = if stderr.trim().is_empty() {
        stdout.trim()
    } else {
        stderr.trim()
    };

    let status = match output.status.code() {
        Some(code) => format!("exit status {}", code),
        None => "terminated by signal".to_string(),
    };

    if detail.is_empty() {
        status
    } else {
        format!("{}: {}", status, detail)
    }
}

/// Locate `program` on `PATH` without executing it.
///
/// A name containing `/` is checked as a path directly.
pub fn find_in_path(program: &str) -> Option<PathBuf> {
    if program.is_empty() {
        return None;
    }
    if program.contains('/') {
        let path = PathBuf::from(program);
        return is_executable(&path).then_some(path);
    }

    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(program))
        .find(|candidate| is_executable(candidate))
}

fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}
