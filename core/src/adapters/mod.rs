//! Adapters layer - Operating system implementations.
//!
//! This module contains implementations of the port traits defined in `ports`.
//! Each adapter talks to the OS through short-lived, time-bounded commands
//! or signals.

pub mod command;
pub mod lister;
pub mod names;
pub mod parser;
pub mod platform;
pub mod terminator;

// Re-export main types for convenience
pub use command::{CommandOutput, CommandRunner, DEFAULT_COMMAND_TIMEOUT};
pub use lister::CommandSocketLister;
pub use names::PsNameResolver;
pub use parser::{parse_table, parser_for, LsofParser, NetstatParser, SsParser};
pub use platform::Platform;
pub use terminator::SignalTerminator;
