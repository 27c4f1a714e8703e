//! Process name resolver port (interface).

/// Port for looking up a short process name by PID.
pub trait NameResolver: Send + Sync {
    /// Resolve the name of `pid`, or `None` if the lookup failed or came
    /// back empty.
    fn resolve(&self, pid: u32) -> impl std::future::Future<Output = Option<String>> + Send;
}
