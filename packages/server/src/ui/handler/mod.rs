//! HTTP and WebSocket handlers.

pub mod http;
pub mod websocket;

pub use http::{health_check, landing_page};
pub use websocket::websocket_handler;
