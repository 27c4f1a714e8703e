//! List command - show processes listening inside the range.

use anyhow::Result;
use portdestroyer_core::adapters::{CommandSocketLister, PsNameResolver, SignalTerminator};
use portdestroyer_core::{Inventory, PortRange, PortService};

use super::truncate;

pub async fn run(
    service: &PortService<CommandSocketLister, PsNameResolver, SignalTerminator>,
    range: PortRange,
    json: bool,
) -> Result<()> {
    let inventory = service.list(range).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&inventory)?);
        return Ok(());
    }

    print!("{}", render(&inventory, range));
    Ok(())
}

/// Format an inventory as a table.
pub(crate) fn render(inventory: &Inventory, range: PortRange) -> String {
    if inventory.is_empty() {
        return format!("No processes in range {}\n", range);
    }

    let mut out = format!("{:<6} {:<8} {:<20} {}\n", "PORT", "PID", "PROCESS", "USER");
    out.push_str(&"-".repeat(48));
    out.push('\n');

    for process in inventory {
        out.push_str(&format!(
            "{:<6} {:<8} {:<20} {}\n",
            process.port(),
            process.pid(),
            truncate(process.name(), 20),
            process.owner().unwrap_or("-")
        ));
    }

    out.push_str(&format!("\nTotal: {} processes\n", inventory.len()));
    out
}
