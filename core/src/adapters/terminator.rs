//! Process termination with SIGKILL.

use tracing::{debug, warn};

use crate::domain::Termination;
use crate::ports::ProcessTerminator;

/// Kills processes immediately with SIGKILL.
///
/// There is no graceful SIGTERM phase: the goal is to free the port now.
/// A process that already exited maps to [`Termination::Vanished`] and one
/// owned by another user to [`Termination::PermissionDenied`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalTerminator;

impl SignalTerminator {
    pub fn new() -> Self {
        Self
    }

    #[cfg(unix)]
    fn send_kill(pid: u32) -> Termination {
        use nix::errno::Errno;
        use nix::sys::signal::{kill, Signal};
        use nix::unistd::Pid;

        // 0 and negative values address process groups, never a single pid.
        let raw = match i32::try_from(pid) {
            Ok(raw) if raw > 0 => raw,
            _ => return Termination::Failed(format!("invalid pid {}", pid)),
        };

        match kill(Pid::from_raw(raw), Signal::SIGKILL) {
            Ok(()) => Termination::Killed,
            Err(Errno::ESRCH) => Termination::Vanished,
            Err(Errno::EPERM) => Termination::PermissionDenied,
            Err(e) => Termination::Failed(e.desc().to_string()),
        }
    }

    #[cfg(not(unix))]
    fn send_kill(_pid: u32) -> Termination {
        Termination::Unsupported
    }
}

impl ProcessTerminator for SignalTerminator {
    async fn terminate(&self, pid: u32) -> Termination {
        debug!(pid = pid, "Sending SIGKILL");

        let termination = Self::send_kill(pid);
        match &termination {
            Termination::Killed => debug!(pid = pid, "Process killed"),
            Termination::Vanished => debug!(pid = pid, "Process already exited"),
            Termination::PermissionDenied => warn!(pid = pid, "Permission denied to kill process"),
            Termination::Failed(reason) => warn!(pid = pid, reason = %reason, "Failed to kill process"),
            Termination::Unsupported => warn!(pid = pid, "Killing processes is not supported here"),
        }
        termination
    }
}
