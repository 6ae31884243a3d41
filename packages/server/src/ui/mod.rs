//! UI layer
//!
//! Transport surface: axum router, WebSocket and HTTP handlers, server
//! configuration and shutdown handling.

pub mod config;
pub mod handler;
pub mod server;
pub mod signal;
pub mod state;

pub use config::ServerConfig;
pub use server::{Server, build_router};
pub use state::AppState;
