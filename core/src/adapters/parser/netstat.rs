//! Parser for `netstat -tlnp` output (Linux fallback).

use crate::domain::{Backend, ParsedRecord};
use crate::ports::RawTableParser;

use super::utils::Utils;

/// Columns: Proto Recv-Q Send-Q Local Foreign State PID/Program
const MIN_FIELDS: usize = 7;

/// Parses net-tools netstat tables.
///
/// Example output:
/// ```text
/// Active Internet connections (only servers)
/// Proto Recv-Q Send-Q Local Address           Foreign Address         State       PID/Program name
/// tcp        0      0 0.0.0.0:3000            0.0.0.0:*               LISTEN      1234/node
/// tcp6       0      0 :::8080                 :::*                    LISTEN      5678/java
/// tcp        0      0 127.0.0.1:631           0.0.0.0:*               LISTEN      -
/// ```
///
/// A `-` in the last column means the socket belongs to a process we may
/// not inspect; such rows are skipped.
#[derive(Debug, Default, Clone, Copy)]
pub struct NetstatParser;

impl RawTableParser for NetstatParser {
    fn backend(&self) -> Backend {
        Backend::Netstat
    }

    fn header_lines(&self) -> usize {
        2
    }

    fn parse_line(&self, line: &str) -> Option<ParsedRecord> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < MIN_FIELDS || !parts[0].starts_with("tcp") || parts[5] != "LISTEN" {
            return None;
        }

        let (address, port) = Utils::parse_address(parts[3])?;

        let owner = parts[MIN_FIELDS - 1..].join(" ");
        let (pid, program) = owner.split_once('/')?;
        let pid: u32 = pid.parse().ok().filter(|&p| p > 0)?;

        let record = ParsedRecord::new(port, pid, address);
        let program = program.trim();
        Some(if program.is_empty() {
            record
        } else {
            record.with_name(program)
        })
    }
}
