//! Conversion logic between DTOs and domain types.

use crate::domain::{DisplayName, HubEvent};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// Domain → DTO
// ========================================

impl From<&HubEvent> for dto::ServerEvent {
    fn from(event: &HubEvent) -> Self {
        match event {
            HubEvent::Message { name, text } => Self::Message {
                name: name.as_ref().map(|n| n.as_str().to_string()),
                text: text.clone(),
            },
            HubEvent::AdminMessage { text } => Self::AdminMessage { text: text.clone() },
        }
    }
}

// ========================================
// DTO → Domain
// ========================================

impl From<dto::ServerEvent> for HubEvent {
    fn from(event: dto::ServerEvent) -> Self {
        match event {
            dto::ServerEvent::Message { name, text } => Self::Message {
                name: name.map(DisplayName::from),
                text,
            },
            dto::ServerEvent::AdminMessage { text } => Self::AdminMessage { text },
        }
    }
}
