//! Socket lister port (interface).

use crate::domain::RawTable;

/// Port for reading the live table of listening TCP sockets.
///
/// Implementations pick the platform's utility (and any fallback) and
/// return its raw text. Failures are recovered inside the implementation:
/// an unavailable backend yields [`RawTable::empty`].
pub trait SocketLister: Send + Sync {
    /// Produce the current socket table.
    fn list(&self) -> impl std::future::Future<Output = RawTable> + Send;
}
