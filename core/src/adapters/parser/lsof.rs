//! Parser for `lsof -iTCP -sTCP:LISTEN -n -P` output (macOS).

use crate::domain::{Backend, ParsedRecord};
use crate::ports::RawTableParser;

use super::utils::Utils;

/// Minimum columns: COMMAND PID USER FD TYPE DEVICE SIZE/OFF NODE NAME
const MIN_FIELDS: usize = 9;

/// Parses lsof tables, where name, PID and user are plain columns.
///
/// Expected lsof output format:
/// ```text
/// COMMAND    PID  USER   FD   TYPE             DEVICE SIZE/OFF NODE NAME
/// node     34805  code   19u  IPv6 0x3d8015e195af1f3f      0t0  TCP [::1]:3000 (LISTEN)
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct LsofParser;

impl RawTableParser for LsofParser {
    fn backend(&self) -> Backend {
        Backend::Lsof
    }

    fn header_lines(&self) -> usize {
        1
    }

    fn parse_line(&self, line: &str) -> Option<ParsedRecord> {
        let components: Vec<&str> = line.split_whitespace().collect();
        if components.len() < MIN_FIELDS {
            return None;
        }

        let name = Utils::unescape_name(components[0]);
        let pid: u32 = components[1].parse().ok().filter(|&p| p > 0)?;
        let user = components[2];

        // NAME is the last column holding an address; DEVICE and SIZE/OFF
        // can also contain hex/offset tokens, so search backwards.
        let address_part = components[MIN_FIELDS - 1..]
            .iter()
            .rev()
            .find(|c| c.contains(':') && !c.starts_with("0x") && !c.starts_with("0t"))?;

        let (address, port) = Utils::parse_address(address_part)?;

        Some(
            ParsedRecord::new(port, pid, address)
                .with_name(name)
                .with_owner(user),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "COMMAND    PID  USER   FD   TYPE             DEVICE SIZE/OFF NODE NAME";

    #[test]
    fn test_parse_lsof_output() {
        let output = format!(
            "{HEADER}
node     34805  code   19u  IPv6 0x3d8015e195af1f3f      0t0  TCP [::1]:3000 (LISTEN)
nginx        1  root    6u  IPv4 0x1234567890abcdef      0t0  TCP *:80 (LISTEN)
"
        );

        let records = LsofParser.parse(&output);
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].port, 3000);
        assert_eq!(records[0].pid, 34805);
        assert_eq!(records[0].name.as_deref(), Some("node"));
        assert_eq!(records[0].owner.as_deref(), Some("code"));
        assert_eq!(records[0].address, "[::1]");

        assert_eq!(records[1].port, 80);
        assert_eq!(records[1].address, "*");
    }

    #[test]
    fn test_unescape_process_name() {
        let output = format!(
            "{HEADER}
Code\\x20Helper  1234  user   10u  IPv4 0x1234567890abcdef      0t0  TCP *:3000 (LISTEN)
"
        );

        let records = LsofParser.parse(&output);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name.as_deref(), Some("Code Helper"));
    }

    #[test]
    fn test_keeps_both_address_families() {
        // Dedup is the inventory builder's job, not the parser's.
        let output = format!(
            "{HEADER}
node     1234  code   19u  IPv4 0x1234567890abcdef      0t0  TCP 127.0.0.1:3000 (LISTEN)
node     1234  code   20u  IPv6 0xfedcba0987654321      0t0  TCP [::1]:3000 (LISTEN)
"
        );

        let records = LsofParser.parse(&output);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].key(), records[1].key());
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let output = format!(
            "{HEADER}
node     1234  code   19u  IPv4
node     abc   code   19u  IPv4 0x1234567890abcdef      0t0  TCP *:3000 (LISTEN)
node     1234  code   19u  IPv4 0x1234567890abcdef      0t0  TCP *:http (LISTEN)

python   4321  code   5u   IPv4 0x1234567890abcdef      0t0  TCP *:5000 (LISTEN)
"
        );

        let records = LsofParser.parse(&output);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].port, 5000);
    }

    #[test]
    fn test_header_only() {
        assert!(LsofParser.parse(HEADER).is_empty());
        assert!(LsofParser.parse("").is_empty());
    }
}
