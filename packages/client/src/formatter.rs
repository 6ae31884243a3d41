//! Message formatting utilities for client display.

use chrono::FixedOffset;
use hubbub_server::infrastructure::dto::websocket::ServerEvent;
use hubbub_shared::time::{Clock, SystemClock, local_offset, timestamp_to_clock_time};

/// Placeholder shown for messages from connections that never logged in
const UNKNOWN_SENDER: &str = "(unknown)";

/// Formats incoming events, stamped with the time they were received
pub struct MessageFormatter<C: Clock = SystemClock> {
    clock: C,
    offset: FixedOffset,
}

impl MessageFormatter<SystemClock> {
    /// Formatter using the system clock and the local time zone
    pub fn system() -> Self {
        Self::new(SystemClock, local_offset())
    }
}

impl<C: Clock> MessageFormatter<C> {
    pub fn new(clock: C, offset: FixedOffset) -> Self {
        Self { clock, offset }
    }

    fn stamp(&self) -> String {
        timestamp_to_clock_time(self.clock.now_millis(), self.offset)
    }

    /// Format an event received from the relay
    ///
    /// # Returns
    ///
    /// A line such as `[12:00:00] Alice: hi` or `[12:00:00] * Alice joined the conversation!`
    pub fn format_event(&self, event: &ServerEvent) -> String {
        match event {
            ServerEvent::Message { name, text } => format!(
                "\n[{}] {}: {}\n",
                self.stamp(),
                name.as_deref().unwrap_or(UNKNOWN_SENDER),
                text
            ),
            ServerEvent::AdminMessage { text } => format!("\n[{}] * {}\n", self.stamp(), text),
        }
    }

    /// Format a text frame that is not a known event
    pub fn format_raw_frame(&self, text: &str) -> String {
        format!("\n[{}] (raw) {}\n", self.stamp(), text)
    }

    /// Format a binary frame notification
    pub fn format_binary_frame(&self, byte_count: usize) -> String {
        format!("\n[{}] (binary) {} bytes\n", self.stamp(), byte_count)
    }
}
