//! Weighpoint station daemon.
//!
//! Loads the station configuration, wires the scale and inventory
//! client to the orchestration loop, and runs until interrupted. Tags
//! are fed from standard input: each line typed is presented to the
//! loop as a tag carrying that batch id, which stands in for the
//! hardware reader driver during development.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use weighpoint_client::{InventoryClient, InventoryClientConfig};
use weighpoint_core::StationConfig;
use weighpoint_hardware::mock::{MockTagReader, MockTagReaderHandle};
use weighpoint_scale::SerialScale;
use weighpoint_station::Station;

#[derive(Parser, Debug)]
#[command(name = "weighpoint-station", version, about = "Check-in/check-out weighing station")]
struct Cli {
    /// Path to the station configuration file.
    #[arg(long, default_value = "weighpoint.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = StationConfig::load(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;
    info!(config = ?config, "configuration loaded");

    let scale = SerialScale::new(&config.scale);
    let client = InventoryClient::new(InventoryClientConfig::from_station(&config))
        .context("building inventory client")?;

    let (reader, handle) = MockTagReader::new();
    tokio::spawn(feed_tags_from_stdin(handle));

    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received, shutting down");
            signal_token.cancel();
        }
    });

    let mut station = Station::new(reader, scale, client, &config)?;
    station.run(cancel).await?;

    info!("station stopped");
    Ok(())
}

/// Present each non-empty stdin line as a tag carrying that batch id.
async fn feed_tags_from_stdin(handle: MockTagReaderHandle) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut sequence: u16 = 0;

    while let Ok(Some(line)) = lines.next_line().await {
        let payload = line.trim();
        if payload.is_empty() {
            continue;
        }

        sequence = sequence.wrapping_add(1);
        let uid = vec![0x57, 0x50, (sequence >> 8) as u8, sequence as u8];
        if let Err(error) = handle.present_tag(uid, payload) {
            warn!(%error, "could not present tag");
        }
    }
}
