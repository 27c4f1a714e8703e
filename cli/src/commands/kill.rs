//! Kill commands - free one port or every port in the range.

use anyhow::Result;
use portdestroyer_core::adapters::{CommandSocketLister, PsNameResolver, SignalTerminator};
use portdestroyer_core::{KillReport, PortRange, PortService};

type Service = PortService<CommandSocketLister, PsNameResolver, SignalTerminator>;

pub async fn port(service: &Service, range: PortRange, port: u16, json: bool) -> Result<()> {
    if !range.contains(port) {
        tracing::warn!(port = port, range = %range, "Port is outside the range");
    }
    let report = service.kill_port(range, port).await;
    print_report(&report, json)
}

pub async fn all(service: &Service, range: PortRange, json: bool) -> Result<()> {
    let report = service.kill_all(range).await;
    print_report(&report, json)
}

fn print_report(report: &KillReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", render(report));
    }
    Ok(())
}

pub(crate) fn render(report: &KillReport) -> String {
    if report.is_empty() {
        return "No matching processes found\n".to_string();
    }

    let mut out = String::new();
    for outcome in &report.outcomes {
        out.push_str(&format!("{}: {}\n", outcome.process, outcome.termination));
    }
    out.push_str(&format!("{}\n", report));
    out
}
