//! Broadcaster trait 定義
//!
//! The hub needs a way to reach every open connection without owning any
//! socket. The infrastructure layer implements this trait on top of the
//! per-connection outbound channels.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{BroadcastError, ConnectionId, HubEvent};

/// Outbound channel feeding one connection's socket writer.
///
/// Carries already-encoded text frames.
pub type Outbox = mpsc::UnboundedSender<String>;

/// Delivery capability handed to the hub.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Broadcaster: Send + Sync {
    /// Start delivering broadcasts to `id` through `outbox`
    async fn attach(&self, id: ConnectionId, outbox: Outbox);

    /// Stop delivering to `id`. Returns `false` if it was not attached.
    async fn detach(&self, id: &ConnectionId) -> bool;

    /// Deliver `event` to a single connection
    async fn send_to(&self, id: &ConnectionId, event: &HubEvent) -> Result<(), BroadcastError>;

    /// Deliver `event` to every attached connection.
    ///
    /// A failed delivery to one connection never stops delivery to the
    /// others. Returns how many connections the event was handed to.
    async fn broadcast(&self, event: &HubEvent) -> Result<usize, BroadcastError>;
}
