use anyhow::{Context, Result};
use clap::Parser;
use heartbeat_notify::config::{ConfigStore, DEFAULT_CONFIG_PATH};
use heartbeat_notify::logging;
use heartbeat_notify::monitor::{Monitor, MonitorConfig, SystemClock};
use heartbeat_notify::notifier::WebhookSink;
use std::path::PathBuf;
use std::sync::mpsc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "heartbeat-notify")]
#[command(about = "Watch heartbeat files and notify a chat webhook when they stall", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Seconds between checks (omit or 0 to check once and exit)
    #[arg(short, long)]
    interval: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = MonitorConfig::new(cli.config, cli.interval);

    let store = ConfigStore::open(&settings.config_path).context("Failed to load configuration")?;

    if let Err(e) = logging::init(cli.verbose, store.config().log_file.as_deref()) {
        warn!(error = %format!("{e:#}"), "continuing with stderr logging only");
    }
    info!(
        path = %settings.config_path.display(),
        files = store.config().files.len(),
        one_shot = settings.is_one_shot(),
        "loaded configuration"
    );

    let sink = WebhookSink::new()?;
    let (stop_tx, stop_rx) = mpsc::channel();
    ctrlc::set_handler(move || {
        let _ = stop_tx.send(());
    })
    .context("Failed to install signal handler")?;

    let mut monitor = Monitor::new(store, Box::new(SystemClock), Box::new(sink));
    monitor.run(settings.interval, &stop_rx);
    Ok(())
}
