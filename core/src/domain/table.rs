//! Raw socket tables as produced by the listing backends.

use serde::{Deserialize, Serialize};

/// The OS utility a socket table came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// `lsof -iTCP -sTCP:LISTEN` (macOS).
    Lsof,
    /// `ss -tlnp` (Linux, preferred).
    Ss,
    /// `netstat -tlnp` (Linux, fallback).
    Netstat,
}

impl Backend {
    /// Executable name of the utility.
    pub fn program(&self) -> &'static str {
        match self {
            Backend::Lsof => "lsof",
            Backend::Ss => "ss",
            Backend::Netstat => "netstat",
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.program())
    }
}

/// Unparsed output of one socket-listing command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    /// Which backend produced the text; `None` when nothing could run.
    pub backend: Option<Backend>,
    /// The command's stdout.
    pub text: String,
}

impl RawTable {
    pub fn new(backend: Backend, text: impl Into<String>) -> Self {
        Self {
            backend: Some(backend),
            text: text.into(),
        }
    }

    /// The result when no backend was available.
    pub fn empty() -> Self {
        Self::default()
    }
}
