//! Identifier generation.

use std::fmt::Debug;

use uuid::Uuid;

use crate::error::IdGenerationError;

/// Produces fresh identifiers for new tenants and applications.
///
/// Failures are surfaced to the caller unchanged; the stores never retry.
pub trait IdGenerator: Send + Sync + Debug {
    /// Returns a new, collision-resistant identifier.
    fn generate_id(&self) -> Result<Uuid, IdGenerationError>;
}

/// Generates random (version 4) UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn generate_id(&self) -> Result<Uuid, IdGenerationError> {
        Ok(Uuid::new_v4())
    }
}
