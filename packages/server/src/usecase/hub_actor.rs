//! Single-owner task that runs the relay hub.
//!
//! Connection tasks never touch the registry. They send [`HubCommand`]s
//! through a [`HubHandle`], and the hub task applies them one at a time in
//! arrival order, so every client observes join, message and leave
//! broadcasts in the same global order.

use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};

use crate::domain::{ConnectionId, DisplayName, Outbox};

use super::{
    error::HubError,
    relay_hub::{HubCommand, HubStats, RelayHub},
};

/// Cloneable sender side of the hub task's mailbox
#[derive(Debug, Clone)]
pub struct HubHandle {
    commands: mpsc::UnboundedSender<HubCommand>,
}

/// Spawn the hub task.
///
/// The task stops once every [`HubHandle`] has been dropped and the
/// mailbox is drained.
pub fn spawn_hub(mut hub: RelayHub) -> (HubHandle, JoinHandle<()>) {
    let (commands, mut mailbox) = mpsc::unbounded_channel();

    let task = tokio::spawn(async move {
        while let Some(command) = mailbox.recv().await {
            hub.dispatch(command).await;
        }
        tracing::debug!("Relay hub stopped");
    });

    (HubHandle { commands }, task)
}

impl HubHandle {
    pub fn connect(&self, id: ConnectionId, outbox: Outbox) -> Result<(), HubError> {
        self.send(HubCommand::Connect { id, outbox })
    }

    pub fn login(&self, id: ConnectionId, name: DisplayName) -> Result<(), HubError> {
        self.send(HubCommand::Login { id, name })
    }

    pub fn message(&self, id: ConnectionId, text: String) -> Result<(), HubError> {
        self.send(HubCommand::Message { id, text })
    }

    pub fn disconnect(&self, id: ConnectionId) -> Result<(), HubError> {
        self.send(HubCommand::Disconnect { id })
    }

    /// Ask the hub for a snapshot.
    ///
    /// The reply is produced after every command sent before it has been
    /// fully applied.
    pub async fn stats(&self) -> Result<HubStats, HubError> {
        let (reply, rx) = oneshot::channel();
        self.send(HubCommand::Stats { reply })?;
        rx.await.map_err(|_| HubError::Closed)
    }

    fn send(&self, command: HubCommand) -> Result<(), HubError> {
        self.commands.send(command).map_err(|_| HubError::Closed)
    }
}
