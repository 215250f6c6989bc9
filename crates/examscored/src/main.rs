//! Examscore Daemon - exam score prediction form server
//!
//! Loads the fitted scaler and model once, then serves the prediction form.

use anyhow::{Context, Result};
use clap::Parser;
use examscored::config::Config;
use examscored::server;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "examscored", version, about = "Exam score prediction form server")]
struct Cli {
    /// Config file (default: /etc/examscore/config.toml, then ./examscore.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, overrides server.bind
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    info!("[BOOT] examscored v{} starting...", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }
    info!(
        "[BOOT] Artifacts: scaler={} model={}",
        config.artifacts.scaler_path.display(),
        config.artifacts.model_path.display()
    );

    server::run(config).await
}
