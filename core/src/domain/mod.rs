//! Domain layer - Pure data models and inventory logic.
//!
//! This module contains the value types the rest of the crate exchanges.
//! These types have no I/O dependencies and can be tested in isolation.

mod inventory;
mod process;
mod range;
mod table;
mod termination;

// Re-export all domain types
pub use inventory::{Inventory, InventoryBuilder, InventoryDiff};
pub use process::{ListeningProcess, ParsedRecord};
pub use range::{PortRange, DEFAULT_END_PORT, DEFAULT_START_PORT};
pub use table::{Backend, RawTable};
pub use termination::{KillOutcome, KillReport, Termination};
