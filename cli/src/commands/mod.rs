//! CLI subcommand implementations.

pub mod kill;
pub mod list;
pub mod watch;

/// Shorten `s` to at most `max` characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}
