//! Infrastructure layer
//!
//! - `broadcaster`: `Broadcaster` implementation over per-connection channels
//! - `dto`: wire formats for WebSocket frames and HTTP responses

pub mod broadcaster;
pub mod dto;
