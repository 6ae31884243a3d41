//! Outbound events produced by the relay hub

use super::DisplayName;

/// An event fanned out to every open connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HubEvent {
    /// A relayed chat line. `name` is `None` when the sender never logged in.
    Message {
        name: Option<DisplayName>,
        text: String,
    },
    /// A system generated join/leave notice.
    AdminMessage { text: String },
}

impl HubEvent {
    /// Notice broadcast when a connection logs in
    pub fn joined(name: &DisplayName) -> Self {
        Self::AdminMessage {
            text: format!("{} joined the conversation!", name),
        }
    }

    /// Notice broadcast when a connection closes.
    ///
    /// A connection that never logged in renders with an empty name.
    pub fn left(name: Option<&DisplayName>) -> Self {
        Self::AdminMessage {
            text: format!(
                "{} left the conversation!",
                name.map(DisplayName::as_str).unwrap_or_default()
            ),
        }
    }

    pub fn chat(name: Option<DisplayName>, text: impl Into<String>) -> Self {
        Self::Message {
            name,
            text: text.into(),
        }
    }
}
