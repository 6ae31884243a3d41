//! Terminal chat client for the Hubbub relay.
//!
//! Connects to the relay, logs in with the given name and sends every
//! non-empty stdin line as a chat message. Join/leave notices and messages
//! from everyone, including yourself, are printed as they arrive.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hubbub-client -- --name Alice
//! cargo run --bin hubbub-client -- -n Bob -u ws://127.0.0.1:3000/ws
//! ```

use clap::Parser;

use hubbub_client::run_client_session;
use hubbub_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hubbub-client")]
#[command(about = "Terminal client for the Hubbub broadcast relay", long_about = None)]
struct Args {
    /// Display name announced at login
    #[arg(short = 'n', long)]
    name: String,

    /// WebSocket URL of the relay
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:666/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = run_client_session(&args.url, &args.name).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
