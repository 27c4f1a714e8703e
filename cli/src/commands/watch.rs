//! Watch command - report listeners as they start and stop.

use std::time::Duration;

use anyhow::Result;
use portdestroyer_core::adapters::{CommandSocketLister, PsNameResolver, SignalTerminator};
use portdestroyer_core::{Inventory, InventoryDiff, PortRange, PortService};
use tracing::debug;

pub async fn run(
    service: &PortService<CommandSocketLister, PsNameResolver, SignalTerminator>,
    range: PortRange,
    interval: Duration,
    json: bool,
) -> Result<()> {
    let mut previous = Inventory::default();
    let mut ticker = tokio::time::interval(interval);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    debug!(range = %range, interval = ?interval, "Watching");
    loop {
        tokio::select! {
            result = &mut shutdown => {
                result?;
                break;
            }
            _ = ticker.tick() => {
                let current = service.list(range).await;
                let diff = current.diff(&previous);
                if !diff.is_empty() {
                    if json {
                        println!("{}", serde_json::to_string(&diff)?);
                    } else {
                        print!("{}", render(&diff));
                    }
                }
                previous = current;
            }
        }
    }

    Ok(())
}

pub(crate) fn render(diff: &InventoryDiff) -> String {
    let mut out = String::new();
    for process in &diff.stopped {
        out.push_str(&format!("- {}\n", process));
    }
    for process in &diff.started {
        out.push_str(&format!("+ {}\n", process));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use portdestroyer_core::ListeningProcess;

    #[test]
    fn test_render_diff() {
        let diff = InventoryDiff {
            started: vec![ListeningProcess::new(8080, 2, "nginx", None)],
            stopped: vec![ListeningProcess::new(3000, 1, "node", None)],
        };
        assert_eq!(
            render(&diff),
            "- node (PID: 1) on port 3000\n+ nginx (PID: 2) on port 8080\n"
        );
    }
}
