use std::collections::HashMap;

use arbor_protocol::ChatMessage;
use parking_lot::RwLock;

/// A concurrency-safe keyed archive of every authored message. Not on the
/// fan-out hot path, so a plain mutual-exclusion lock over the map is
/// sufficient — no owner task needed here.
#[derive(Default)]
pub struct MessageStore {
    messages: RwLock<HashMap<String, ChatMessage>>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `m` under `m.uuid`, replacing any existing entry for that
    /// identifier (last-writer-wins).
    pub fn add(&self, m: ChatMessage) {
        self.messages.write().insert(m.uuid.clone(), m);
    }

    /// Looks up a message by identifier. Absence is a first-class result,
    /// not an error.
    pub fn get(&self, id: &str) -> Option<ChatMessage> {
        self.messages.read().get(id).cloned()
    }
}
