//! Error types for the portdestroyer-core library.

use std::time::Duration;

use thiserror::Error;

/// Result type alias for portdestroyer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while querying sockets or signalling processes.
///
/// The public listing and killing operations never surface these for
/// runtime conditions; they are recovered where they originate and turned
/// into empty tables, placeholder names or "not killed" outcomes.
#[derive(Error, Debug)]
pub enum Error {
    /// A system command ran but reported failure.
    #[error("Command execution failed: {0}")]
    CommandFailed(String),

    /// A system command did not finish in time and was killed.
    #[error("Command `{command}` timed out after {after:?}")]
    Timeout { command: String, after: Duration },

    /// No socket-listing utility could be run.
    #[error("No socket listing backend available: {0}")]
    BackendUnavailable(String),

    /// Port range bounds are out of order or zero.
    #[error("Invalid port range {start}-{end}")]
    InvalidRange { start: u16, end: u16 },

    /// Platform not supported.
    #[error("Platform not supported: {0}")]
    UnsupportedPlatform(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The async runtime backing the synchronous API could not start.
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
