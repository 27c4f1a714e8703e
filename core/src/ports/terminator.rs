//! Process terminator port (interface).

use crate::domain::Termination;

/// Port for killing processes.
///
/// Termination is immediate (SIGKILL); there is no graceful phase. A
/// process that already exited or belongs to another user is reported
/// through [`Termination`], never as an error.
pub trait ProcessTerminator: Send + Sync {
    /// Kill a process by PID.
    fn terminate(&self, pid: u32) -> impl std::future::Future<Output = Termination> + Send;
}
