use thiserror::Error;

/// Errors surfaced at the boundaries of the core: construction, boot, and
/// per-connection request handling that chooses to fail loudly instead of
/// just logging and continuing.
#[derive(Debug, Error)]
pub enum ArborError {
    #[error("invalid capacity {0}: must be at least 1")]
    InvalidCapacity(i64),

    #[error("failed to bind listener on {addr}")]
    BindFailure {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("identifier assignment failed")]
    IdAssignment(#[from] arbor_protocol::IdGenerationError),

    #[error(transparent)]
    Protocol(#[from] arbor_protocol::ProtocolError),
}
