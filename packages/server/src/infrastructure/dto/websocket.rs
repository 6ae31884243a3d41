//! WebSocket frame DTOs
//!
//! Every frame is a JSON object tagged by `type`.

use serde::{Deserialize, Serialize};

/// Frame sent by a client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientEvent {
    /// `{"type":"login","name":"Alice"}`
    Login { name: String },
    /// `{"type":"message","text":"hi"}`
    Message { text: String },
}

impl ClientEvent {
    /// Decode a text frame.
    ///
    /// Anything that is not a recognised JSON event is relayed as a plain
    /// chat message carrying the raw frame.
    pub fn from_frame(frame: &str) -> Self {
        match serde_json::from_str(frame) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!("Failed to parse frame as JSON event: {}", e);
                Self::Message {
                    text: frame.to_string(),
                }
            }
        }
    }

    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Frame sent by the server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerEvent {
    /// `{"type":"message","name":"Alice","text":"hi"}`, `name` is `null`
    /// for senders that never logged in
    Message { name: Option<String>, text: String },
    /// `{"type":"adminMessage","text":"Alice joined the conversation!"}`
    AdminMessage { text: String },
}

impl ServerEvent {
    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn decode(frame: &str) -> serde_json::Result<Self> {
        serde_json::from_str(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_event_wire_shape() {
        // テスト項目: クライアントイベントの JSON 形式
        // given (前提条件):
        let login = r#"{"type":"login","name":"Alice"}"#;
        let message = r#"{"type":"message","text":"hi"}"#;

        // when (操作):
        let login = ClientEvent::from_frame(login);
        let message = ClientEvent::from_frame(message);

        // then (期待する結果):
        assert_eq!(
            login,
            ClientEvent::Login {
                name: "Alice".to_string()
            }
        );
        assert_eq!(
            message,
            ClientEvent::Message {
                text: "hi".to_string()
            }
        );
    }

    #[test]
    fn test_client_event_falls_back_to_plain_text() {
        // テスト項目: JSON でないフレームはそのままチャットメッセージとして扱われる
        // given (前提条件):
        let frames = ["hello there", r#"{"type":"unknown"}"#, r#"{"type":"login"}"#];

        for frame in frames {
            // when (操作):
            let event = ClientEvent::from_frame(frame);

            // then (期待する結果):
            assert_eq!(
                event,
                ClientEvent::Message {
                    text: frame.to_string()
                }
            );
        }
    }

    #[test]
    fn test_server_event_wire_shape() {
        // テスト項目: サーバーイベントの JSON 形式
        // given (前提条件):
        let chat = ServerEvent::Message {
            name: Some("Alice".to_string()),
            text: "hi".to_string(),
        };
        let anonymous = ServerEvent::Message {
            name: None,
            text: "hello".to_string(),
        };
        let admin = ServerEvent::AdminMessage {
            text: "Alice joined the conversation!".to_string(),
        };

        // when (操作):
        let chat = chat.encode().unwrap();
        let anonymous = anonymous.encode().unwrap();
        let admin = admin.encode().unwrap();

        // then (期待する結果):
        assert_eq!(chat, r#"{"type":"message","name":"Alice","text":"hi"}"#);
        assert_eq!(anonymous, r#"{"type":"message","name":null,"text":"hello"}"#);
        assert_eq!(
            admin,
            r#"{"type":"adminMessage","text":"Alice joined the conversation!"}"#
        );
    }

    #[test]
    fn test_server_event_decode_without_name_field() {
        // テスト項目: name フィールドが無いメッセージも None として読める
        // given (前提条件):
        let frame = r#"{"type":"message","text":"hello"}"#;

        // when (操作):
        let event = ServerEvent::decode(frame).unwrap();

        // then (期待する結果):
        assert_eq!(
            event,
            ServerEvent::Message {
                name: None,
                text: "hello".to_string()
            }
        );
    }
}
