//! Line-oriented JSON front end for the shape store.
//!
//! Reads one request per stdin line and writes one response per stdout line.

mod requests;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use sketchpad_core::{
    default_log_level, init_logging, LoggingConfig, ShapeStore, SnapshotDir, StoreConfig,
    ID_SPACE,
};
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "sketchpad", version, about = "Shape store with undo/redo over JSON lines")]
struct Args {
    /// Directory for saved snapshots.
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,
    /// Absolute directory for rolling log files; logging is off when unset.
    #[arg(long)]
    log_dir: Option<PathBuf>,
    /// trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,
    /// Seed for reproducible id allocation.
    #[arg(long)]
    seed: Option<u64>,
    /// Exclusive upper bound for shape ids.
    #[arg(long, default_value_t = ID_SPACE)]
    id_space: u32,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(log_dir) = &args.log_dir {
        let level = args.log_level.as_deref().unwrap_or(default_log_level());
        let config = LoggingConfig::new(level, log_dir).map_err(anyhow::Error::msg)?;
        init_logging(&config).map_err(anyhow::Error::msg)?;
    }

    let mut store = ShapeStore::with_config(StoreConfig {
        id_space: args.id_space,
        seed: args.seed,
    });
    let dir = SnapshotDir::new(args.data_dir);
    info!(
        "event=session_start module=cli status=ok version={} data_dir={}",
        sketchpad_core::core_version(),
        dir.root().display()
    );

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read request line")?;
        if line.trim().is_empty() {
            continue;
        }
        let response = requests::handle_line(&mut store, &dir, &line);
        serde_json::to_writer(&mut stdout, &response).context("failed to encode response")?;
        writeln!(stdout).context("failed to write response")?;
        stdout.flush().context("failed to flush response")?;
    }

    info!("event=session_end module=cli status=ok shapes={}", store.len());
    Ok(())
}
