//! One-shot tag provisioning utility.
//!
//! Validates a batch id and writes it to the next presented tag, then
//! releases the reader. Runs against the mock reader until the
//! hardware driver is wired in, with the tag presentation confirmed on
//! stdin so the write blocks the way it will on real hardware; the
//! provisioning flow itself is generic over any [`TagReader`].

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use weighpoint_core::BatchId;
use weighpoint_hardware::mock::{MockTagReader, MockTagReaderHandle};
use weighpoint_hardware::{TagData, TagReader};

#[derive(Parser, Debug)]
#[command(name = "weighpoint-write-tag", version, about = "Write a batch id to an RFID tag")]
struct Cli {
    /// Batch id to store on the tag.
    batch_id: String,
}

/// Write a validated batch id to the next presented tag.
async fn provision<R: TagReader>(reader: &mut R, batch: &BatchId) -> anyhow::Result<TagData> {
    let written = reader
        .write_tag(batch.as_str())
        .await
        .context("writing tag")?;
    reader.release().await.context("releasing reader")?;
    Ok(written)
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
    let batch: BatchId = cli.batch_id.parse().context("invalid batch id")?;

    let (mut reader, handle) = MockTagReader::new();
    tokio::spawn(present_blank_tag_on_enter(handle));

    info!(%batch, "hold a tag to the reader and press Enter");
    let written = provision(&mut reader, &batch).await?;

    println!("wrote '{}' to tag {}", written.payload, written.uid_hex());
    Ok(())
}

/// Present a blank tag once the operator confirms on stdin; the write
/// blocks until then, like it will against the hardware driver.
async fn present_blank_tag_on_enter(handle: MockTagReaderHandle) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    if lines.next_line().await.is_ok() {
        let _ = handle.present_tag(vec![0x57, 0x50, 0x00, 0x01], "");
    }
}
