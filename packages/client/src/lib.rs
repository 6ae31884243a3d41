//! Terminal client for the Hubbub relay.

pub mod error;
pub mod formatter;
pub mod input;
pub mod session;
pub mod ui;

pub use session::run_client_session;
