//! Identifier sources used when the domain mints new identities.

use uuid::Uuid;

/// Source of fresh identifiers.
///
/// Injected wherever an entity is created so that tests can pin the id.
pub trait IdGenerator {
    fn next_uuid(&self) -> Uuid;
}

/// Random UUID v4 identifiers.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next_uuid(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Always hands out the same identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FixedIdGenerator(Uuid);

impl FixedIdGenerator {
    pub fn new(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl IdGenerator for FixedIdGenerator {
    fn next_uuid(&self) -> Uuid {
        self.0
    }
}
