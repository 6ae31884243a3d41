//! UseCase: relay hub
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RelayHub の on_connect / on_login / on_message / on_disconnect
//! - Registry の整合性とブロードキャスト内容
//!
//! ### どのような状況を想定しているか
//! - 正常系：ログイン、メッセージ送信、切断の通知
//! - エッジケース：ログイン前のメッセージ、重複した切断、再ログイン
//! - 異常系：切断済み接続からのログイン

use std::{collections::HashSet, sync::Arc};

use tokio::sync::oneshot;

use crate::domain::{
    BroadcastError, Broadcaster, ConnectionId, DisplayName, HubEvent, Outbox, Registry,
};

/// Snapshot of the hub's bookkeeping
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HubStats {
    /// Connections the transport has opened and not yet closed
    pub open_connections: usize,
    /// Open connections that have logged in
    pub named_connections: usize,
}

/// One inbound event from the transport, or a query.
#[derive(Debug)]
pub enum HubCommand {
    Connect {
        id: ConnectionId,
        outbox: Outbox,
    },
    Login {
        id: ConnectionId,
        name: DisplayName,
    },
    Message {
        id: ConnectionId,
        text: String,
    },
    Disconnect {
        id: ConnectionId,
    },
    Stats {
        reply: oneshot::Sender<HubStats>,
    },
}

/// Owns the registry and fans every connection event out to all open
/// connections.
///
/// Every operation runs to completion, registry update and fan-out
/// included, before the caller can issue the next one.
pub struct RelayHub {
    registry: Registry,
    open: HashSet<ConnectionId>,
    broadcaster: Arc<dyn Broadcaster>,
}

impl RelayHub {
    pub fn new(broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self {
            registry: Registry::new(),
            open: HashSet::new(),
            broadcaster,
        }
    }

    /// Apply one command
    pub async fn dispatch(&mut self, command: HubCommand) {
        let result = match command {
            HubCommand::Connect { id, outbox } => {
                self.on_connect(id, outbox).await;
                Ok(0)
            }
            HubCommand::Login { id, name } => self.on_login(id, name).await,
            HubCommand::Message { id, text } => self.on_message(id, text).await,
            HubCommand::Disconnect { id } => self.on_disconnect(id).await,
            HubCommand::Stats { reply } => {
                // The requester may have given up waiting
                let _ = reply.send(self.stats());
                Ok(0)
            }
        };

        if let Err(e) = result {
            tracing::warn!("Broadcast failed: {}", e);
        }
    }

    /// A connection was accepted. No registry entry is created until login.
    pub async fn on_connect(&mut self, id: ConnectionId, outbox: Outbox) {
        self.open.insert(id);
        self.broadcaster.attach(id, outbox).await;
        tracing::debug!("Connection '{}' opened", id);
    }

    /// Bind `name` to the connection and announce it to everyone, the
    /// newcomer included.
    ///
    /// A second login on the same connection replaces the name and is
    /// announced again. Logins from connections that are not open are
    /// dropped so the registry only ever holds live connections.
    pub async fn on_login(
        &mut self,
        id: ConnectionId,
        name: DisplayName,
    ) -> Result<usize, BroadcastError> {
        if !self.open.contains(&id) {
            tracing::warn!("Ignoring login '{}' from closed connection '{}'", name, id);
            return Ok(0);
        }

        tracing::info!("LOGIN: {}", name);
        let event = HubEvent::joined(&name);
        if let Some(previous) = self.registry.bind(id, name) {
            tracing::warn!("Connection '{}' logged in again (was '{}')", id, previous);
        }

        self.broadcaster.broadcast(&event).await
    }

    /// Relay `text` to everyone, the sender included, under the sender's
    /// registered name.
    ///
    /// Senders without a registry entry are relayed with no name.
    pub async fn on_message(
        &mut self,
        id: ConnectionId,
        text: String,
    ) -> Result<usize, BroadcastError> {
        let name = self.registry.lookup(&id).cloned();
        match &name {
            Some(name) => tracing::info!("{} {}", name, text),
            None => tracing::warn!("Message from connection '{}' without login", id),
        }

        self.broadcaster
            .broadcast(&HubEvent::chat(name, text))
            .await
    }

    /// The transport closed the connection: forget it and tell everyone
    /// still connected.
    ///
    /// Safe to call more than once for the same connection.
    pub async fn on_disconnect(&mut self, id: ConnectionId) -> Result<usize, BroadcastError> {
        self.open.remove(&id);
        if !self.broadcaster.detach(&id).await {
            tracing::debug!("Connection '{}' was not attached", id);
        }

        let name = self.registry.remove(&id);
        match &name {
            Some(name) => tracing::info!("disconnect: {}", name),
            None => tracing::info!("disconnect: connection '{}' without login", id),
        }

        self.broadcaster
            .broadcast(&HubEvent::left(name.as_ref()))
            .await
    }

    pub fn stats(&self) -> HubStats {
        HubStats {
            open_connections: self.open.len(),
            named_connections: self.registry.count(),
        }
    }

    #[cfg(test)]
    fn name_of(&self, id: &ConnectionId) -> Option<&DisplayName> {
        self.registry.lookup(id)
    }
}
