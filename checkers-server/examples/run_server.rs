//! Example to run the checkers server standalone
//!
//! Run with: cargo run -p checkers-server --example run_server

use checkers_server::{run_server, ServerConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::default();

    println!("Starting checkers server on port {}", config.port);
    println!("Lobby: http://localhost:{}/api/games", config.port);

    run_server(config).await
}
