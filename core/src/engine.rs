//! PortManager - synchronous entry point for listing and killing.
//!
//! Wraps the async [`PortService`] in a private single-threaded runtime so
//! that callers without an executor can use it directly. Nothing is cached:
//! every call re-reads the OS socket table.
//!
//! Calling these methods from inside another tokio runtime panics, as with
//! any nested `block_on`. Async callers should use [`PortService`] instead.

use tokio::runtime::{Builder, Runtime};

use crate::adapters::{CommandSocketLister, PsNameResolver, SignalTerminator};
use crate::application::PortService;
use crate::config::Settings;
use crate::domain::{Inventory, KillReport, PortRange};
use crate::error::{Error, Result};
use crate::ports::{NameResolver, ProcessTerminator, SocketLister};

/// Synchronous façade over [`PortService`].
///
/// Safe to share between threads; concurrent calls each run their own
/// query and kill batch.
pub struct PortManager<L = CommandSocketLister, R = PsNameResolver, T = SignalTerminator> {
    service: PortService<L, R, T>,
    runtime: Runtime,
}

impl PortManager {
    /// Create a manager for the current platform with default settings.
    pub fn new() -> Result<Self> {
        Self::with_settings(&Settings::default())
    }

    /// Create a manager for the current platform using `settings` for
    /// command timeouts.
    pub fn with_settings(settings: &Settings) -> Result<Self> {
        Self::from_service(PortService::from_settings(settings))
    }
}

impl<L, R, T> PortManager<L, R, T>
where
    L: SocketLister,
    R: NameResolver,
    T: ProcessTerminator,
{
    /// Wrap an existing service.
    pub fn from_service(service: PortService<L, R, T>) -> Result<Self> {
        // Single-threaded runtime: each call is a short burst of subprocesses.
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Error::Runtime(format!("Failed to create runtime: {}", e)))?;

        Ok(Self { service, runtime })
    }

    /// List processes listening inside `range`.
    pub fn list(&self, range: PortRange) -> Inventory {
        self.runtime.block_on(self.service.list(range))
    }

    /// Kill every process listening on `port` inside `range`.
    pub fn kill_port(&self, range: PortRange, port: u16) -> KillReport {
        self.runtime.block_on(self.service.kill_port(range, port))
    }

    /// Kill every process listening inside `range`.
    pub fn kill_all(&self, range: PortRange) -> KillReport {
        self.runtime.block_on(self.service.kill_all(range))
    }
}
