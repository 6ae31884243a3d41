//! Integration tests for the relay, driving the real router over WebSocket.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use hubbub_server::{
    domain::{DisplayName, HubEvent},
    infrastructure::{
        broadcaster::WebSocketBroadcaster,
        dto::{
            http::HealthDto,
            websocket::{ClientEvent, ServerEvent},
        },
    },
    ui::{Server, ServerConfig},
    usecase::{HubHandle, HubStats, RelayHub, spawn_hub},
};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

const RECV_TIMEOUT: Duration = Duration::from_secs(2);

/// Helper struct to run a relay on an ephemeral port
struct TestServer {
    addr: SocketAddr,
    hub: HubHandle,
}

impl TestServer {
    async fn start() -> Self {
        Self::start_with_config(ServerConfig::default()).await
    }

    /// Start with `config`. Host and port are ignored in favour of an ephemeral port.
    async fn start_with_config(config: ServerConfig) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().unwrap();

        let (hub, _task) = spawn_hub(RelayHub::new(Arc::new(WebSocketBroadcaster::new())));
        let server = Server::new(hub.clone(), config);
        tokio::spawn(async move {
            server
                .serve(listener, std::future::pending())
                .await
                .expect("Server failed");
        });

        TestServer { addr, hub }
    }

    fn url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    fn http_url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Wait until the hub has processed `open` connects/disconnects
    async fn wait_for_stats(&self, expected: HubStats) {
        let deadline = tokio::time::Instant::now() + RECV_TIMEOUT;
        loop {
            let stats = self.hub.stats().await.unwrap();
            if stats == expected {
                return;
            }
            assert!(
                tokio::time::Instant::now() < deadline,
                "Timed out waiting for {:?}, last seen {:?}",
                expected,
                stats
            );
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    async fn wait_for_open(&self, open_connections: usize, named_connections: usize) {
        self.wait_for_stats(HubStats {
            open_connections,
            named_connections,
        })
        .await;
    }
}

/// Helper struct wrapping one WebSocket client
struct TestClient {
    socket: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    async fn connect(server: &TestServer) -> Self {
        let (socket, _response) = connect_async(server.url())
            .await
            .expect("Failed to connect");
        TestClient { socket }
    }

    async fn send(&mut self, event: ClientEvent) {
        let frame = event.encode().unwrap();
        self.send_raw(&frame).await;
    }

    async fn send_raw(&mut self, frame: &str) {
        self.socket
            .send(Message::Text(frame.to_string().into()))
            .await
            .expect("Failed to send frame");
    }

    async fn login(&mut self, name: &str) {
        self.send(ClientEvent::Login {
            name: name.to_string(),
        })
        .await;
    }

    async fn say(&mut self, text: &str) {
        self.send(ClientEvent::Message {
            text: text.to_string(),
        })
        .await;
    }

    async fn recv(&mut self) -> HubEvent {
        loop {
            let msg = tokio::time::timeout(RECV_TIMEOUT, self.socket.next())
                .await
                .expect("Timed out waiting for a frame")
                .expect("Connection closed")
                .expect("WebSocket error");
            if let Message::Text(text) = msg {
                return ServerEvent::decode(text.as_str())
                    .expect("Unexpected frame")
                    .into();
            }
        }
    }

    async fn recv_many(&mut self, count: usize) -> Vec<HubEvent> {
        let mut events = Vec::with_capacity(count);
        for _ in 0..count {
            events.push(self.recv().await);
        }
        events
    }

    async fn close(mut self) {
        self.socket.close(None).await.ok();
    }
}

fn admin(text: &str) -> HubEvent {
    HubEvent::AdminMessage {
        text: text.to_string(),
    }
}

fn chat(name: Option<&str>, text: &str) -> HubEvent {
    HubEvent::chat(name.map(DisplayName::from), text)
}

#[tokio::test]
async fn test_login_is_announced_to_everyone() {
    // テスト項目: ログインすると本人を含む全員に参加通知が届く
    // given (前提条件):
    let server = TestServer::start().await;
    let mut c1 = TestClient::connect(&server).await;
    let mut c2 = TestClient::connect(&server).await;
    server.wait_for_open(2, 0).await;

    // when (操作):
    c1.login("Alice").await;

    // then (期待する結果):
    assert_eq!(c1.recv().await, admin("Alice joined the conversation!"));
    assert_eq!(c2.recv().await, admin("Alice joined the conversation!"));
    server.wait_for_open(2, 1).await;
}

#[tokio::test]
async fn test_message_is_relayed_to_everyone_including_sender() {
    // テスト項目: メッセージは送信者の名前付きで送信者を含む全員に届く
    // given (前提条件):
    let server = TestServer::start().await;
    let mut c1 = TestClient::connect(&server).await;
    let mut c2 = TestClient::connect(&server).await;
    server.wait_for_open(2, 0).await;
    c1.login("Alice").await;
    server.wait_for_open(2, 1).await;
    c2.login("Bob").await;
    server.wait_for_open(2, 2).await;
    c1.recv_many(2).await;
    c2.recv_many(2).await;

    // when (操作):
    c1.say("hi").await;

    // then (期待する結果):
    assert_eq!(c1.recv().await, chat(Some("Alice"), "hi"));
    assert_eq!(c2.recv().await, chat(Some("Alice"), "hi"));
}

#[tokio::test]
async fn test_disconnect_is_announced_to_remaining_clients() {
    // テスト項目: 切断すると残りの接続に退出通知が届き、Registry から削除される
    // given (前提条件):
    let server = TestServer::start().await;
    let mut c1 = TestClient::connect(&server).await;
    let mut c2 = TestClient::connect(&server).await;
    server.wait_for_open(2, 0).await;
    c1.login("Alice").await;
    server.wait_for_open(2, 1).await;
    c2.login("Bob").await;
    server.wait_for_open(2, 2).await;
    c2.recv_many(2).await;

    // when (操作):
    c1.close().await;

    // then (期待する結果):
    assert_eq!(c2.recv().await, admin("Alice left the conversation!"));
    server.wait_for_open(1, 1).await;
}

#[tokio::test]
async fn test_message_before_login_has_no_name() {
    // テスト項目: ログイン前のメッセージも名前なしで全員に届く
    // given (前提条件):
    let server = TestServer::start().await;
    let mut c1 = TestClient::connect(&server).await;
    let mut c2 = TestClient::connect(&server).await;
    server.wait_for_open(2, 0).await;

    // when (操作):
    c1.say("hello").await;

    // then (期待する結果):
    assert_eq!(c1.recv().await, chat(None, "hello"));
    assert_eq!(c2.recv().await, chat(None, "hello"));
}

#[tokio::test]
async fn test_plain_text_frame_is_relayed_as_message() {
    // テスト項目: JSON でないテキストフレームもチャットメッセージとして中継される
    // given (前提条件):
    let server = TestServer::start().await;
    let mut c1 = TestClient::connect(&server).await;
    server.wait_for_open(1, 0).await;
    c1.login("Alice").await;
    c1.recv().await;

    // when (操作):
    c1.send_raw("just some words").await;

    // then (期待する結果):
    assert_eq!(c1.recv().await, chat(Some("Alice"), "just some words"));
}

#[tokio::test]
async fn test_all_clients_observe_the_same_order() {
    // テスト項目: 異なる接続から送られたメッセージも全員が同じ順序で受け取る
    // given (前提条件):
    let server = TestServer::start().await;
    let mut c1 = TestClient::connect(&server).await;
    let mut c2 = TestClient::connect(&server).await;
    let mut c3 = TestClient::connect(&server).await;
    server.wait_for_open(3, 0).await;
    c1.login("Alice").await;
    c2.login("Bob").await;
    c3.login("Carol").await;
    server.wait_for_open(3, 3).await;

    // when (操作):
    for i in 0..5 {
        c1.say(&format!("alice {}", i)).await;
        c2.say(&format!("bob {}", i)).await;
    }

    // then (期待する結果):
    let seen1 = c1.recv_many(13).await;
    let seen2 = c2.recv_many(13).await;
    let seen3 = c3.recv_many(13).await;
    assert_eq!(seen1, seen2);
    assert_eq!(seen1, seen3);

    // 同じ送信者のメッセージは送信順を保つ
    let alice_lines: Vec<&HubEvent> = seen1
        .iter()
        .filter(|e| matches!(e, HubEvent::Message { name: Some(n), .. } if n.as_str() == "Alice"))
        .collect();
    let expected: Vec<HubEvent> = (0..5)
        .map(|i| chat(Some("Alice"), &format!("alice {}", i)))
        .collect();
    assert_eq!(alice_lines, expected.iter().collect::<Vec<_>>());
}

#[tokio::test]
async fn test_health_endpoint_reports_connections() {
    // テスト項目: /api/health が接続数を返す
    // given (前提条件):
    let server = TestServer::start().await;
    let mut c1 = TestClient::connect(&server).await;
    let _c2 = TestClient::connect(&server).await;
    server.wait_for_open(2, 0).await;
    c1.login("Alice").await;
    server.wait_for_open(2, 1).await;

    // when (操作):
    let health: HealthDto = reqwest::get(server.http_url("/api/health"))
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    // then (期待する結果):
    assert_eq!(
        health,
        HealthDto {
            status: "ok".to_string(),
            open_connections: 2,
            named_connections: 1,
        }
    );
}

#[tokio::test]
async fn test_landing_page_is_served_at_root() {
    // テスト項目: ルートパスでランディングページが返される
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let response = reqwest::get(server.http_url("/"))
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("<title>Hubbub</title>"));
}

#[tokio::test]
async fn test_landing_page_file_replaces_embedded_page() {
    // テスト項目: --landing-page で指定したファイルがルートパスで返される
    // given (前提条件):
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("custom.html");
    let content = "<!doctype html><title>Custom lobby</title>";
    std::fs::write(&path, content).expect("Failed to write landing page");
    let server = TestServer::start_with_config(ServerConfig {
        landing_page: Some(path),
        ..ServerConfig::default()
    })
    .await;

    // when (操作):
    let response = reqwest::get(server.http_url("/"))
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body = response.text().await.expect("Failed to read body");
    assert_eq!(body, content);
    assert!(!body.contains("<title>Hubbub</title>"));
}

#[tokio::test]
async fn test_listen_failure_is_fatal() {
    // テスト項目: ポートが使用中の場合、サーバーは起動に失敗する
    // given (前提条件):
    let occupied = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = occupied.local_addr().unwrap().port();
    let (hub, _task) = spawn_hub(RelayHub::new(Arc::new(WebSocketBroadcaster::new())));
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port,
        landing_page: None,
    };

    // when (操作):
    let result = Server::new(hub, config).run().await;

    // then (期待する結果):
    assert!(result.is_err());
}
