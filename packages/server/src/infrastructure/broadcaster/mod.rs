//! `Broadcaster` implementations
//!
//! - `websocket`: pushes encoded frames into each WebSocket connection's outbox

pub mod websocket;

pub use websocket::WebSocketBroadcaster;
