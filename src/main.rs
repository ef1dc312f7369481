// ABOUTME: Entry point for watchparty — a terminal client for the watch-party chat service.
// ABOUTME: Parses CLI args, loads config, sets up logging, and launches the app.

use std::path::PathBuf;

use clap::Parser;

use watchparty::app::{self, LaunchOptions};
use watchparty::config::Config;
use watchparty::logging;

#[derive(Debug, Parser)]
#[command(name = "watchparty", version, about = "Chat rooms in your terminal")]
struct Cli {
    /// Chat server base URL (overrides config and WATCHPARTY_SERVER).
    #[arg(long)]
    server: Option<String>,

    /// Config file to read instead of ~/.watchparty/config.toml.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Local storage file for the session.
    #[arg(long)]
    storage: Option<PathBuf>,

    /// Initial location, e.g. /room/3.
    #[arg(long)]
    path: Option<String>,

    /// Clear local storage before starting.
    #[arg(long)]
    fresh: bool,

    /// Run against a built-in demo server; nothing is persisted.
    #[arg(long)]
    demo: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(server) = cli.server {
        config.server.base_url = server;
    } else if let Ok(server) = std::env::var("WATCHPARTY_SERVER") {
        config.server.base_url = server;
    }
    if let Some(storage) = cli.storage {
        config.storage.path = Some(storage);
    }

    logging::init(&config.log_path(), &config.log.level)?;

    app::launch(LaunchOptions {
        config,
        initial_path: cli.path,
        demo: cli.demo,
        fresh: cli.fresh,
    })
    .await
}
