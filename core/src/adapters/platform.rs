//! Platform detection.

use crate::domain::Backend;

/// The operating system family the socket lister targets.
///
/// Resolved once and handed to the lister at construction instead of being
/// re-read from the environment on every call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Platform {
    /// macOS: `lsof` is always present.
    MacOs,
    /// Linux: `ss`, falling back to `netstat`.
    Linux,
    /// Anything else; listing and killing are no-ops.
    Unsupported(String),
}

impl Platform {
    /// Detect the platform this binary is running on.
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Map an OS name as reported by `std::env::consts::OS`.
    pub fn from_os(os: &str) -> Self {
        match os {
            "macos" => Platform::MacOs,
            "linux" => Platform::Linux,
            other => Platform::Unsupported(other.to_string()),
        }
    }

    /// Backends to try, in order.
    pub fn backends(&self) -> &'static [Backend] {
        match self {
            Platform::MacOs => &[Backend::Lsof],
            Platform::Linux => &[Backend::Ss, Backend::Netstat],
            Platform::Unsupported(_) => &[],
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::MacOs => f.write_str("macOS"),
            Platform::Linux => f.write_str("Linux"),
            Platform::Unsupported(os) => write!(f, "{} (unsupported)", os),
        }
    }
}
