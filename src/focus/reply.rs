//! Classification of GNOME Shell `Eval` replies.
//!
//! `org.gnome.Shell.Eval` has no structured error channel for "the script
//! ran but found nothing" or "Eval is disabled by policy": `gdbus` prints a
//! `(success, 'json')` tuple either way. The outcome has to be read from the
//! literal text, so every sentinel check lives in [`classify`].
//!
//! Reply shapes seen in the wild:
//! - `(true, '"activated"')`: script ran and activated a target
//! - `(true, '"no matching window"')` / `(true, '"app not found"')`
//! - `(false, '')`: Eval refused (GNOME 41+ without unsafe mode)

use crate::defaults;

/// Outcome of one `Eval` focus script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalReply {
    Activated,
    NotFound,
    Blocked,
}

/// Classify an `Eval` reply.
///
/// `not_found` is the sentinel the script returns when it has no target.
/// A reply that is falsy and never says `activated` means Eval itself was
/// refused; anything else counts as activated.
pub fn classify(reply: &str, not_found: &str) -> EvalReply {
    if reply.contains(not_found) {
        return EvalReply::NotFound;
    }
    if reply.contains(defaults::REPLY_FALSY) && !reply.contains(defaults::REPLY_ACTIVATED) {
        return EvalReply::Blocked;
    }
    EvalReply::Activated
}
