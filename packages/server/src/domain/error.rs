//! Domain errors

use thiserror::Error;

/// Errors raised while delivering hub events
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BroadcastError {
    /// The connection has no attached outbox
    #[error("connection '{0}' is not attached")]
    NotAttached(String),

    /// The connection's writer task is gone
    #[error("failed to deliver to connection '{0}'")]
    Closed(String),

    /// The event could not be encoded for the wire
    #[error("failed to encode event: {0}")]
    Encode(String),
}
