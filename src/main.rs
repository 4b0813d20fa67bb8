use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use newsdesk::app::AppContext;
use newsdesk::cli::{commands, Cli, Commands};
use newsdesk::config::Config;
use newsdesk::scheduler::interval::parse_duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command();

    init_tracing(cli.log.as_deref(), command == Commands::Tui)?;

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(interval) = &cli.interval {
        config.poll.interval = parse_duration(interval).map_err(anyhow::Error::msg)?;
    }

    let ctx = AppContext::new(config)?;

    match command {
        Commands::Tui => commands::run_tui(&ctx).await?,
        Commands::Watch => commands::run_watch(&ctx).await?,
        Commands::Once { json } => commands::run_once(&ctx, json).await?,
    }

    Ok(())
}

/// Logs go to `log` when given, otherwise stderr. The TUI owns the screen,
/// so it stays silent unless RUST_LOG asks otherwise.
fn init_tracing(log: Option<&Path>, tui: bool) -> anyhow::Result<()> {
    let default_directive = if tui && log.is_none() {
        "off"
    } else {
        "newsdesk=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    let registry = tracing_subscriber::registry().with(filter);

    match log {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            registry
                .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
                .init();
        }
        None => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
    }

    Ok(())
}
