//! WebSocket を使った Broadcaster 実装
//!
//! ## 責務
//!
//! - 接続ごとの `Outbox`（`UnboundedSender`）を管理
//! - HubEvent を JSON に変換して送信（send_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は UI 層が作った `Outbox` を受け取り、フレームの配送だけを担当します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{BroadcastError, Broadcaster, ConnectionId, HubEvent, Outbox},
    infrastructure::dto::websocket::ServerEvent,
};

/// WebSocket を使った Broadcaster 実装
///
/// ## 使用例
///
/// ```ignore
/// let broadcaster = WebSocketBroadcaster::new();
/// broadcaster.attach(connection_id, tx).await;
/// broadcaster.broadcast(&HubEvent::joined(&name)).await?;
/// ```
#[derive(Default)]
pub struct WebSocketBroadcaster {
    /// Key: ConnectionId
    /// Value: 接続の Outbox
    outboxes: Mutex<HashMap<ConnectionId, Outbox>>,
}

impl WebSocketBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    fn encode(event: &HubEvent) -> Result<String, BroadcastError> {
        ServerEvent::from(event)
            .encode()
            .map_err(|e| BroadcastError::Encode(e.to_string()))
    }
}

#[async_trait]
impl Broadcaster for WebSocketBroadcaster {
    async fn attach(&self, id: ConnectionId, outbox: Outbox) {
        let mut outboxes = self.outboxes.lock().await;
        outboxes.insert(id, outbox);
        tracing::debug!("Connection '{}' attached to broadcaster", id);
    }

    async fn detach(&self, id: &ConnectionId) -> bool {
        let mut outboxes = self.outboxes.lock().await;
        let removed = outboxes.remove(id).is_some();
        tracing::debug!("Connection '{}' detached from broadcaster", id);
        removed
    }

    async fn send_to(&self, id: &ConnectionId, event: &HubEvent) -> Result<(), BroadcastError> {
        let frame = Self::encode(event)?;
        let outboxes = self.outboxes.lock().await;

        let outbox = outboxes
            .get(id)
            .ok_or_else(|| BroadcastError::NotAttached(id.to_string()))?;
        outbox
            .send(frame)
            .map_err(|_| BroadcastError::Closed(id.to_string()))?;
        tracing::debug!("Pushed event to connection '{}'", id);
        Ok(())
    }

    async fn broadcast(&self, event: &HubEvent) -> Result<usize, BroadcastError> {
        let frame = Self::encode(event)?;
        let outboxes = self.outboxes.lock().await;

        let mut delivered = 0;
        for (id, outbox) in outboxes.iter() {
            // ブロードキャストでは一部の送信失敗を許容
            if outbox.send(frame.clone()).is_err() {
                tracing::warn!("Failed to push event to connection '{}'", id);
            } else {
                delivered += 1;
            }
        }
        tracing::debug!("Broadcasted event to {} connection(s)", delivered);

        Ok(delivered)
    }
}
