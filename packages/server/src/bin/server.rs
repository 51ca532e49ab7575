//! Huddle session-coordination server.
//!
//! Tracks room membership, relays WebRTC signaling between peers and
//! sequences whiteboard and chat traffic.
//!
//! Run with:
//! ```not_rust
//! JWT_SECRET=... cargo run --bin huddle-server
//! cargo run --bin huddle-server -- --host 0.0.0.0 --port 3000 --jwt-secret dev-secret
//! ```

use std::sync::Arc;

use clap::Parser;
use huddle_server::{
    infrastructure::{
        auth::JwtIdentityVerifier,
        repository::{InMemoryChatStore, InMemoryWhiteboardStore},
    },
    ui::{AppState, Server},
};
use huddle_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "huddle-server")]
#[command(about = "Room registry, WebRTC signaling relay and whiteboard sequencer", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Shared secret used to verify HS256 identity tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    jwt_secret: String,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    // Initialize dependencies in order:
    // 1. External adapters (identity verifier, stores, clock)
    // 2. AppState (registry, pusher, sequencer, usecases)
    // 3. Server
    let verifier = Arc::new(JwtIdentityVerifier::new(args.jwt_secret.as_bytes()));
    let whiteboard_store = Arc::new(InMemoryWhiteboardStore::new());
    let chat_store = Arc::new(InMemoryChatStore::new());
    let clock = Arc::new(SystemClock);

    let state = AppState::new(verifier, whiteboard_store, chat_store, clock);

    let server = Server::new(state);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
