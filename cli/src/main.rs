//! PortDestroyer CLI - Kill processes listening on network ports
//!
//! A command-line tool for listing the processes that hold local TCP
//! ports and killing them, one port or a whole range at a time.

mod commands;

use std::time::Duration;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use portdestroyer_core::{PortRange, PortService, Settings, SettingsStore};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "portdestroyer")]
#[command(author, version, about = "Kill processes listening on network ports")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// First port of the range (default from config, else 3000)
    #[arg(long, global = true)]
    start: Option<u16>,

    /// Last port of the range (default from config, else 9000)
    #[arg(long, global = true)]
    end: Option<u16>,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List processes listening inside the range
    #[command(alias = "ls")]
    List,

    /// Kill every process listening on a port
    Kill {
        /// Port number to free
        port: u16,
    },

    /// Kill every process listening inside the range
    KillAll,

    /// Poll the range and print listeners as they start and stop
    Watch {
        /// Poll interval in milliseconds (default from config, else 1500)
        #[arg(long)]
        interval_ms: Option<u64>,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn load_settings() -> Settings {
    let loaded = match SettingsStore::new() {
        Ok(store) => store.load().await,
        Err(e) => Err(e),
    };

    loaded.unwrap_or_else(|e| {
        warn!(error = %e, "Ignoring settings file");
        Settings::default()
    })
}

/// Resolve the range from flags over settings.
fn resolve_range(start: Option<u16>, end: Option<u16>, settings: &Settings) -> Result<PortRange> {
    let start = start.unwrap_or(settings.start_port);
    let end = end.unwrap_or(settings.end_port);

    if start >= end {
        bail!("start port must be lower than end port");
    }
    Ok(PortRange::new(start, end)?)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = load_settings().await;
    let range = resolve_range(cli.start, cli.end, &settings)?;
    let service = PortService::from_settings(&settings);

    match cli.command.unwrap_or(Commands::List) {
        Commands::List => commands::list::run(&service, range, cli.json).await?,
        Commands::Kill { port } => commands::kill::port(&service, range, port, cli.json).await?,
        Commands::KillAll => commands::kill::all(&service, range, cli.json).await?,
        Commands::Watch { interval_ms } => {
            let interval = interval_ms
                .map(|ms| Duration::from_millis(ms.max(1)))
                .unwrap_or_else(|| settings.poll_interval());
            commands::watch::run(&service, range, interval, cli.json).await?
        }
    }

    Ok(())
}
