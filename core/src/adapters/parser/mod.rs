//! Socket table parsers.
//!
//! One implementation of [`RawTableParser`] per backend format.

mod lsof;
mod netstat;
mod ss;
mod utils;

pub use lsof::LsofParser;
pub use netstat::NetstatParser;
pub use ss::SsParser;

use crate::domain::{Backend, ParsedRecord, RawTable};
use crate::ports::RawTableParser;

/// The parser for a backend's output format.
pub fn parser_for(backend: Backend) -> Box<dyn RawTableParser> {
    match backend {
        Backend::Lsof => Box::new(LsofParser),
        Backend::Ss => Box::new(SsParser::new()),
        Backend::Netstat => Box::new(NetstatParser),
    }
}

/// Parse a raw table with the parser matching its backend.
///
/// A table with no backend (nothing could be listed) parses to nothing.
pub fn parse_table(table: &RawTable) -> Vec<ParsedRecord> {
    match table.backend {
        Some(backend) => parser_for(backend).parse(&table.text),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_for_backend() {
        for backend in [Backend::Lsof, Backend::Ss, Backend::Netstat] {
            assert_eq!(parser_for(backend).backend(), backend);
        }
    }

    #[test]
    fn test_parse_table_dispatch() {
        let table = RawTable::new(
            Backend::Ss,
            "State Recv-Q Send-Q Local Address:Port Peer Address:Port Process\n\
             LISTEN 0 511 0.0.0.0:3000 0.0.0.0:* users:((\"node\",pid=111,fd=20))\n",
        );
        let records = parse_table(&table);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].key(), (3000, 111));

        assert!(parse_table(&RawTable::empty()).is_empty());
    }

    #[test]
    fn test_garbage_never_panics() {
        let garbage = "\u{0}\u{1}:::\n:\n::::::::\n[]:]\n users:((pid=\n pid=99999999999999999999";
        for backend in [Backend::Lsof, Backend::Ss, Backend::Netstat] {
            let table = RawTable::new(backend, format!("header\nheader\n{}", garbage));
            assert!(parse_table(&table).is_empty());
        }
    }
}
