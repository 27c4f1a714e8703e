//! Ports layer - Trait definitions (interfaces).
//!
//! This module defines the interfaces that the application layer uses
//! to interact with the operating system. Implementations live in `adapters`.

mod lister;
mod names;
mod parser;
mod terminator;

pub use lister::SocketLister;
pub use names::NameResolver;
pub use parser::RawTableParser;
pub use terminator::ProcessTerminator;
