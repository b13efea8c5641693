//! Repository contract and the in-memory store backing it.
//!
//! A repository reports an expected failure (the row vanished, the write was
//! refused) with `Ok(false)` and reserves `Err` for faults in the store itself.

use async_trait::async_trait;
use thiserror::Error;

mod memory;

pub use memory::InMemoryRepository;

/// Identifier assigned by a repository on create. Always positive once assigned.
pub type EntityId = i64;

/// A persisted record addressable by id.
pub trait Entity: Clone + Send + Sync + 'static {
    fn id(&self) -> EntityId;
    fn set_id(&mut self, id: EntityId);
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{entity} store is unavailable: {reason}")]
    Unavailable {
        entity: &'static str,
        reason: String,
    },

    #[error("{entity} id space exhausted")]
    IdSpaceExhausted { entity: &'static str },
}

/// Persistence access for one entity type.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    async fn find_all(&self) -> Result<Vec<T>, RepositoryError>;

    async fn find_by_id(&self, id: EntityId) -> Result<Option<T>, RepositoryError>;

    async fn exists(&self, id: EntityId) -> Result<bool, RepositoryError>;

    /// Persist a new record and write the assigned id back into `entity`.
    async fn create(&self, entity: &mut T) -> Result<bool, RepositoryError>;

    /// Replace the stored record carrying `entity.id()`.
    async fn update(&self, entity: &T) -> Result<bool, RepositoryError>;

    async fn delete(&self, entity: &T) -> Result<bool, RepositoryError>;
}
