//! Safe wrappers for platform-specific unsafe operations.
//!
//! Every `unsafe` block in the codebase lives here. Call sites use the safe
//! public API and never touch `unsafe` directly.

/// Send `SIGKILL` to every process in the process group `pgid`.
///
/// Returns `true` if the signal was delivered. Used to stop external tools
/// that outlived their timeout, including anything they spawned (the
/// `sh -c` override runs its command as a grandchild).
///
/// The caller must have started the group leader with `process_group(0)`
/// and must not have reaped it yet, so the group id is still its own.
pub fn kill_process_group(pgid: u32) -> bool {
    // pgid 0 and 1 would address the caller's group or init
    let Ok(pgid) = libc::pid_t::try_from(pgid) else {
        return false;
    };
    if pgid <= 1 {
        return false;
    }
    // SAFETY: kill has no memory-safety preconditions; a stale group only yields ESRCH.
    unsafe { libc::kill(-pgid, libc::SIGKILL) == 0 }
}
