//! Broadcast relay library.
//!
//! Clients connect over WebSocket, announce a display name and exchange
//! short text messages that are fanned out to every connected client, with
//! join and leave notices.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
