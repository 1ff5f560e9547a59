use crate::error::IdGenerationError;

/// Produces fresh, unique message identifiers.
///
/// Kept as a trait so tests can supply a deterministic generator without
/// touching the real `uuid` crate.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> Result<String, IdGenerationError>;
}

/// The production generator: random UUID v4s in their textual form.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> Result<String, IdGenerationError> {
        Ok(uuid::Uuid::new_v4().to_string())
    }
}
