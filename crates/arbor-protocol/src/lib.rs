//! Wire types and framing for the Arbor chat protocol.
//!
//! This crate is the "external collaborator" the core server depends on for
//! message shapes, identifier generation, and the length-prefixed JSON
//! framing used on the wire. None of it knows about the broadcaster, the
//! recent-leaves tracker, or the message store.

mod codec;
mod error;
mod frame;
mod id;
mod message;

pub use codec::{FrameReader, FrameWriter};
pub use error::{IdGenerationError, ProtocolError};
pub use frame::{FrameKind, ProtocolMessage};
pub use id::{IdGenerator, UuidGenerator};
pub use message::ChatMessage;
