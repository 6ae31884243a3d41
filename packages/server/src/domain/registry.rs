//! Registry of logged-in connections

use std::collections::HashMap;

use super::{ConnectionId, DisplayName};

/// Mapping from connection identity to the name it logged in with.
///
/// Only connections that are open and have logged in have an entry.
/// The hub is the only writer.
#[derive(Debug, Default)]
pub struct Registry {
    names: HashMap<ConnectionId, DisplayName>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `id`, returning the name previously bound, if any.
    pub fn bind(&mut self, id: ConnectionId, name: DisplayName) -> Option<DisplayName> {
        self.names.insert(id, name)
    }

    pub fn lookup(&self, id: &ConnectionId) -> Option<&DisplayName> {
        self.names.get(id)
    }

    /// Remove the entry for `id`. Removing an absent id is a no-op.
    pub fn remove(&mut self, id: &ConnectionId) -> Option<DisplayName> {
        self.names.remove(id)
    }

    /// Number of logged-in connections
    pub fn count(&self) -> usize {
        self.names.len()
    }
}
