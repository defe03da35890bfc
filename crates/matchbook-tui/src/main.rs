//! Matchbook TUI entry point.

use clap::Parser;
use matchbook_tui::runtime::Runtime;
use tracing_subscriber::EnvFilter;

/// Matchbook terminal lobby client
#[derive(Parser, Debug)]
#[command(name = "matchbook-tui")]
#[command(about = "Terminal client for a Matchbook matchmaking lobby")]
#[command(version)]
struct Args {
    /// Lobby WebSocket URL to connect to (e.g. ws://localhost:8000/game/)
    ///
    /// If not provided, runs against an in-process simulated lobby.
    #[arg(short, long)]
    server: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Raw mode owns the terminal; logs go to stderr only when asked for
    // via RUST_LOG.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let runtime = match args.server {
        Some(url) => Runtime::with_server(url)?,
        None => Runtime::new()?,
    };

    Ok(runtime.run().await?)
}
