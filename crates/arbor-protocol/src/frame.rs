use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::message::ChatMessage;

/// The `type` tag on the wire. Any tag besides the three known ones
/// deserialises into `Unknown`, carrying the raw tag along so the session
/// layer can log which bogus tag actually arrived rather than failing to
/// decode the frame at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameKind {
    Welcome,
    Query,
    NewMessage,
    Unknown(String),
}

impl Serialize for FrameKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FrameKind::Welcome => "WELCOME".serialize(serializer),
            FrameKind::Query => "QUERY".serialize(serializer),
            FrameKind::NewMessage => "NEW_MESSAGE".serialize(serializer),
            FrameKind::Unknown(tag) => tag.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for FrameKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "WELCOME" => FrameKind::Welcome,
            "QUERY" => FrameKind::Query,
            "NEW_MESSAGE" => FrameKind::NewMessage,
            _ => FrameKind::Unknown(raw),
        })
    }
}

/// A single frame on the wire. Field presence depends on `kind`: `WELCOME`
/// frames populate `root`/`major`/`minor`/`recent` and leave `chat` absent;
/// `QUERY` and `NEW_MESSAGE` frames populate `chat` and leave the rest at
/// their defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtocolMessage {
    #[serde(rename = "type")]
    pub kind: FrameKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat: Option<ChatMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minor: Option<u32>,
    #[serde(default)]
    pub recent: Vec<String>,
}

impl ProtocolMessage {
    pub fn welcome(root: impl Into<String>, recent: Vec<String>) -> Self {
        Self {
            kind: FrameKind::Welcome,
            chat: None,
            root: Some(root.into()),
            major: Some(0),
            minor: Some(1),
            recent,
        }
    }

    pub fn query(chat: ChatMessage) -> Self {
        Self {
            kind: FrameKind::Query,
            chat: Some(chat),
            root: None,
            major: None,
            minor: None,
            recent: Vec::new(),
        }
    }

    pub fn new_message(chat: ChatMessage) -> Self {
        Self {
            kind: FrameKind::NewMessage,
            chat: Some(chat),
            root: None,
            major: None,
            minor: None,
            recent: Vec::new(),
        }
    }
}
