//! Server state shared by the handlers.

use crate::usecase::HubHandle;

/// Shared application state
pub struct AppState {
    /// Mailbox of the relay hub task
    pub hub: HubHandle,
}
