//! Raw table parser port (interface).

use crate::domain::{Backend, ParsedRecord};

/// Converts one backend's textual socket table into records.
///
/// Parsing never fails as a whole: any line that cannot be fully parsed
/// is dropped and the rest of the table is still returned.
pub trait RawTableParser: Send + Sync {
    /// The backend whose format this parser understands.
    fn backend(&self) -> Backend;

    /// Number of title/header lines preceding the rows.
    fn header_lines(&self) -> usize;

    /// Parse a single data row, or `None` to skip it.
    fn parse_line(&self, line: &str) -> Option<ParsedRecord>;

    /// Parse a whole table.
    fn parse(&self, table: &str) -> Vec<ParsedRecord> {
        table
            .lines()
            .skip(self.header_lines())
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| self.parse_line(line))
            .collect()
    }
}
