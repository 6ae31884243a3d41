//! UseCase errors

use thiserror::Error;

/// Errors returned by [`HubHandle`](super::HubHandle)
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HubError {
    /// The hub task has stopped and no longer accepts events
    #[error("relay hub is not running")]
    Closed,
}
