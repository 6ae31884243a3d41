//! Domain layer
//!
//! Registry of live connections, outbound hub events and the broadcaster
//! seam. Nothing here knows about sockets or JSON.

pub mod broadcaster;
pub mod error;
pub mod event;
pub mod registry;
pub mod value_object;

pub use broadcaster::{Broadcaster, Outbox};
pub use error::BroadcastError;
pub use event::HubEvent;
pub use registry::Registry;
pub use value_object::{ConnectionId, DisplayName};

#[cfg(test)]
pub use broadcaster::MockBroadcaster;
