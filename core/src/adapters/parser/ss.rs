//! Parser for `ss -tlnp` output (Linux).

use regex::Regex;

use crate::domain::{Backend, ParsedRecord};
use crate::ports::RawTableParser;

use super::utils::Utils;

/// Columns: State Recv-Q Send-Q Local Peer Process
const MIN_FIELDS: usize = 6;

/// Index of the `Local Address:Port` column.
const LOCAL_ADDRESS: usize = 3;

/// Parses ss tables, where the PID sits inside a composite
/// `users:(("name",pid=1234,fd=5))` token.
///
/// Expected ss output format:
/// ```text
/// State      Recv-Q     Send-Q              Local Address:Port          Peer Address:Port     Process
/// LISTEN     0          4096           [::ffff:127.0.0.1]:63342                    *:*         users:(("rustrover",pid=53561,fd=54))
/// ```
///
/// Sockets shared by several processes list them all; the first one is
/// taken. Rows without a process column (sockets owned by other users when
/// not running as root) are skipped.
#[derive(Debug, Clone)]
pub struct SsParser {
    users: Regex,
}

impl SsParser {
    pub fn new() -> Self {
        Self {
            users: Regex::new(r#"(?:"([^"]*)",)?pid=(\d+)"#).expect("valid ss users pattern"),
        }
    }
}

impl Default for SsParser {
    fn default() -> Self {
        Self::new()
    }
}

impl RawTableParser for SsParser {
    fn backend(&self) -> Backend {
        Backend::Ss
    }

    fn header_lines(&self) -> usize {
        1
    }

    fn parse_line(&self, line: &str) -> Option<ParsedRecord> {
        let components: Vec<&str> = line.split_whitespace().collect();
        if components.len() < MIN_FIELDS {
            return None;
        }

        let (address, port) = Utils::parse_address(components[LOCAL_ADDRESS])?;

        // Process names may contain spaces, so the token can span columns.
        let process = components[MIN_FIELDS - 1..].join(" ");
        let caps = self.users.captures(&process)?;
        let pid: u32 = caps[2].parse().ok().filter(|&p| p > 0)?;

        let record = ParsedRecord::new(port, pid, address);
        Some(match caps.get(1).map(|m| m.as_str()) {
            Some(name) if !name.is_empty() => record.with_name(name),
            _ => record,
        })
    }
}
