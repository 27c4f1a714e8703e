//! Outcomes of process termination.

use serde::Serialize;

use super::ListeningProcess;

/// What happened when a process was signalled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "status", content = "reason")]
pub enum Termination {
    /// The kill signal was delivered.
    Killed,
    /// The process exited before it could be signalled.
    Vanished,
    /// The process belongs to another user and we lack privilege.
    PermissionDenied,
    /// Signalling failed for another reason.
    Failed(String),
    /// Process termination is not available on this platform.
    Unsupported,
}

impl Termination {
    pub fn is_killed(&self) -> bool {
        matches!(self, Termination::Killed)
    }
}

impl std::fmt::Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Termination::Killed => f.write_str("killed"),
            Termination::Vanished => f.write_str("already exited"),
            Termination::PermissionDenied => f.write_str("permission denied"),
            Termination::Failed(reason) => write!(f, "failed: {}", reason),
            Termination::Unsupported => f.write_str("unsupported platform"),
        }
    }
}

/// A targeted listener and what happened to its process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KillOutcome {
    pub process: ListeningProcess,
    pub termination: Termination,
}

/// Result of a kill-port or kill-all batch.
///
/// Counts are per `(port, pid)` listener. A pid listening on several
/// targeted ports is signalled once, and each of its listeners shares
/// that outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KillReport {
    /// Listeners targeted.
    pub requested: usize,
    /// Listeners whose process was confirmed killed.
    pub killed: usize,
    /// One entry per targeted listener, in port order.
    pub outcomes: Vec<KillOutcome>,
}

impl KillReport {
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

impl std::fmt::Display for KillReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "killed {} of {} requested", self.killed, self.requested)
    }
}
