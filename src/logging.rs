// ABOUTME: Tracing setup — routes log events to a file, since the terminal belongs to the TUI.
// ABOUTME: RUST_LOG wins when set; otherwise the configured level applies to this crate.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when RUST_LOG is absent.
pub fn default_filter(level: &str) -> String {
    format!("watchparty={level}")
}

/// Install the global subscriber, appending to `path`.
pub fn init(path: &Path, level: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .try_init()
        .context("installing tracing subscriber")?;
    Ok(())
}
