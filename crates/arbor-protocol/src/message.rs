use serde::{Deserialize, Serialize};

/// A single authored message in the conversation tree.
///
/// `parent` is the empty string for the root message; every other message
/// names the identifier of the message it replies to. Immutable once it has
/// been handed to a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub parent: String,
    pub username: String,
    pub content: String,
}

impl ChatMessage {
    pub fn new(
        username: impl Into<String>,
        content: impl Into<String>,
        parent: impl Into<String>,
    ) -> Self {
        Self {
            uuid: String::new(),
            parent: parent.into(),
            username: username.into(),
            content: content.into(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_empty()
    }
}
