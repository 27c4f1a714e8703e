//! Inclusive port range.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default lower bound, matching common dev-server ports.
pub const DEFAULT_START_PORT: u16 = 3000;

/// Default upper bound.
pub const DEFAULT_END_PORT: u16 = 9000;

/// An inclusive `[start, end]` range of TCP ports.
///
/// `start == end` is a valid single-port range. Rejecting it for user
/// input is left to callers that want a strict `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortRange {
    start: u16,
    end: u16,
}

impl PortRange {
    /// Create a range, rejecting port 0 and reversed bounds.
    pub fn new(start: u16, end: u16) -> Result<Self> {
        if start == 0 || start > end {
            return Err(Error::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A range covering exactly one port.
    pub fn single(port: u16) -> Result<Self> {
        Self::new(port, port)
    }

    /// Lower bound (inclusive).
    pub fn start(&self) -> u16 {
        self.start
    }

    /// Upper bound (inclusive).
    pub fn end(&self) -> u16 {
        self.end
    }

    /// Check whether `port` falls inside the range.
    pub fn contains(&self, port: u16) -> bool {
        self.start <= port && port <= self.end
    }
}

impl Default for PortRange {
    fn default() -> Self {
        Self {
            start: DEFAULT_START_PORT,
            end: DEFAULT_END_PORT,
        }
    }
}

impl std::fmt::Display for PortRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
