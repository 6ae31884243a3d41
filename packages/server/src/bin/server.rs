//! Broadcast relay server.
//!
//! Relays login notices, chat messages and leave notices to every
//! connected client.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hubbub-server
//! cargo run --bin hubbub-server -- --host 127.0.0.1 --port 3000
//! ```

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use hubbub_server::{
    infrastructure::broadcaster::WebSocketBroadcaster,
    ui::{
        Server, ServerConfig,
        config::{DEFAULT_HOST, DEFAULT_PORT},
    },
    usecase::{RelayHub, spawn_hub},
};
use hubbub_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hubbub-server")]
#[command(about = "WebSocket broadcast relay with join/leave notices", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = DEFAULT_HOST)]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// HTML file to serve at `/` instead of the embedded page
    #[arg(long)]
    landing_page: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();
    let config = ServerConfig {
        host: args.host,
        port: args.port,
        landing_page: args.landing_page,
    };

    // 1. Broadcaster over the per-connection outboxes
    let broadcaster = Arc::new(WebSocketBroadcaster::new());

    // 2. Relay hub task
    let (hub, _hub_task) = spawn_hub(RelayHub::new(broadcaster));

    // 3. Server
    let server = Server::new(hub, config);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
