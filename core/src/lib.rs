//! PortDestroyer Core Library
//!
//! Finds the processes listening on local TCP ports and kills them.
//! Provides functionality to:
//! - List listening processes inside a port range
//! - Kill every process on one port, or on every port in a range
//! - Read user settings for the default range and command timeouts
//!
//! # Architecture
//! This library follows hexagonal architecture (ports & adapters):
//! - `domain`: Pure data types and inventory building
//! - `ports`: Trait definitions (interfaces)
//! - `adapters`: System command, parser and signal implementations
//! - `application`: Async use case service
//! - `engine`: Synchronous façade
//!
//! # Platform Support
//! - macOS: Uses `lsof` and `ps` commands
//! - Linux: Uses `ss`, falling back to `netstat`
//! - Anything else: listings are empty and kills report nothing killed
//!
//! # Example
//! ```no_run
//! use portdestroyer_core::{PortManager, PortRange};
//!
//! let manager = PortManager::new()?;
//! for process in &manager.list(PortRange::default()) {
//!     println!("{}", process);
//! }
//! # Ok::<(), portdestroyer_core::Error>(())
//! ```

use std::sync::OnceLock;

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod ports;

pub use application::PortService;
pub use config::{Settings, SettingsStore};
pub use domain::{
    Inventory, InventoryBuilder, InventoryDiff, KillOutcome, KillReport, ListeningProcess,
    PortRange, Termination,
};
pub use engine::PortManager;
pub use error::{Error, Result};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The manager behind the free functions, created on first use.
///
/// Sharing one instance keeps per-lister state, such as the one-time
/// unsupported-platform warning, alive across calls.
fn shared_manager() -> Result<&'static PortManager> {
    static MANAGER: OnceLock<PortManager> = OnceLock::new();

    if let Some(manager) = MANAGER.get() {
        return Ok(manager);
    }
    let manager = PortManager::new()?;
    Ok(MANAGER.get_or_init(|| manager))
}

/// List processes listening on ports `start..=end`.
pub fn list_processes(start: u16, end: u16) -> Result<Inventory> {
    let range = PortRange::new(start, end)?;
    Ok(shared_manager()?.list(range))
}

/// Kill every process listening on `port`, returning how many listeners
/// were killed.
///
/// Returns 0 when `port` lies outside `start..=end`.
pub fn kill_port(start: u16, end: u16, port: u16) -> Result<usize> {
    let range = PortRange::new(start, end)?;
    Ok(shared_manager()?.kill_port(range, port).killed)
}

/// Kill every process listening on ports `start..=end`, returning how many
/// listeners were killed.
pub fn kill_all(start: u16, end: u16) -> Result<usize> {
    let range = PortRange::new(start, end)?;
    Ok(shared_manager()?.kill_all(range).killed)
}
