//! Listening process domain models.

use serde::{Deserialize, Serialize};

// ============================================================================
// ParsedRecord
// ============================================================================

/// One candidate row extracted from a backend's socket table.
///
/// The same process shows up once per address family or interface it is
/// bound on, so several records may share a `(port, pid)` key and differ
/// only in `address`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRecord {
    /// Local port the socket is bound to.
    pub port: u16,
    /// Owning process ID.
    pub pid: u32,
    /// Process name, if the table carried one.
    pub name: Option<String>,
    /// Owning user, if the table carried one.
    pub owner: Option<String>,
    /// Local address text without the port suffix (e.g. `*`, `[::1]`).
    pub address: String,
}

impl ParsedRecord {
    /// Create a record with no name or owner information.
    pub fn new(port: u16, pid: u32, address: impl Into<String>) -> Self {
        Self {
            port,
            pid,
            name: None,
            owner: None,
            address: address.into(),
        }
    }

    /// Attach the process name from the table.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach the owning user from the table.
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// The deduplication key.
    pub fn key(&self) -> (u16, u32) {
        (self.port, self.pid)
    }
}

// ============================================================================
// ListeningProcess
// ============================================================================

/// A process holding a listening TCP socket on a port.
///
/// Built fresh on every inventory query and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListeningProcess {
    port: u16,
    pid: u32,
    name: String,
    owner: Option<String>,
}

impl ListeningProcess {
    /// Create a listening process entry.
    pub fn new(port: u16, pid: u32, name: impl Into<String>, owner: Option<String>) -> Self {
        Self {
            port,
            pid,
            name: name.into(),
            owner: owner.filter(|o| !o.is_empty()),
        }
    }

    /// Build from a parsed record and a resolved name.
    pub fn from_record(record: ParsedRecord, name: impl Into<String>) -> Self {
        Self::new(record.port, record.pid, name, record.owner)
    }

    /// The label used when a process name cannot be resolved.
    pub fn placeholder_name(pid: u32) -> String {
        format!("PID-{}", pid)
    }

    /// The port number (e.g., 3000, 8080).
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Process ID of the process using this port.
    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Short process name, or `PID-<pid>` if it could not be resolved.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Username of the process owner, when the platform reports it.
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    /// The deduplication key.
    pub fn key(&self) -> (u16, u32) {
        (self.port, self.pid)
    }
}

impl std::fmt::Display for ListeningProcess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (PID: {}) on port {}", self.name, self.pid, self.port)
    }
}
