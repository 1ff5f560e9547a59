use thiserror::Error;

/// Failures from reading or writing a framed [`crate::ProtocolMessage`].
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("i/o error on framed connection")]
    Io(#[from] std::io::Error),

    #[error("malformed frame body")]
    Codec(#[from] serde_json::Error),

    #[error("frame length {len} exceeds the {limit} byte limit")]
    FrameTooLarge { len: u32, limit: u32 },
}

/// Failure assigning a fresh identifier to a new message.
#[derive(Debug, Error)]
#[error("identifier generation failed")]
pub struct IdGenerationError;
