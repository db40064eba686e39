//! CLI entry point for the terminal message daemon
//!
//! Usage:
//!   mspd
//!   mspd --config /etc/mspd.toml
//!   mspd -p 2018 --log-level debug

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Parser;
use tracing::info;

use msp_delivery::directory::UtmpSessionDirectory;
use msp_delivery::sinks::{DevConsoleSink, DevTerminalSink};
use msp_delivery::Dispatcher;
use mspd::{DaemonConfig, Listener};

#[derive(Parser, Debug)]
#[command(name = "mspd")]
#[command(about = "Terminal message daemon")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen port, overriding the configuration file
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Enable JSON logging format
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args)?;

    info!("Starting terminal message daemon");

    let mut config = match &args.config {
        Some(path) => {
            info!(config = %path.display(), "loading configuration");
            DaemonConfig::from_file(path)?
        }
        None => DaemonConfig::default(),
    };
    if let Some(port) = args.port {
        config.listen.port = port;
    }

    let dispatcher = Dispatcher::new(
        Arc::new(UtmpSessionDirectory::new()),
        Arc::new(DevTerminalSink::new(&config.delivery.dev_root)),
        Arc::new(DevConsoleSink::new(&config.delivery.console_device)),
        config.delivery.columns,
    );

    let listener = Listener::bind(&config, dispatcher).await?;
    info!(address = %listener.local_addr()?, "listening");

    tokio::select! {
        result = listener.run() => result?,
        _ = tokio::signal::ctrl_c() => info!("Received shutdown signal"),
    }

    Ok(())
}

fn init_logging(args: &Args) -> Result<()> {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        other => bail!("unknown log level: {other}"),
    };

    if args.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_max_level(level)
            .init();
    } else {
        tracing_subscriber::fmt().with_max_level(level).init();
    }

    Ok(())
}
