use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{Entity, EntityId, Repository, RepositoryError};

struct Table<T> {
    rows: BTreeMap<EntityId, T>,
    next_id: EntityId,
}

/// Process-local repository; ids start at 1 and are never reused.
pub struct InMemoryRepository<T> {
    entity: &'static str,
    table: RwLock<Table<T>>,
}

impl<T: Entity> InMemoryRepository<T> {
    pub fn new(entity: &'static str) -> Self {
        Self {
            entity,
            table: RwLock::new(Table {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    pub fn shared(entity: &'static str) -> Arc<Self> {
        Arc::new(Self::new(entity))
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    async fn find_all(&self) -> Result<Vec<T>, RepositoryError> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<T>, RepositoryError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn exists(&self, id: EntityId) -> Result<bool, RepositoryError> {
        let table = self.table.read().await;
        Ok(table.rows.contains_key(&id))
    }

    async fn create(&self, entity: &mut T) -> Result<bool, RepositoryError> {
        let mut table = self.table.write().await;
        let id = table.next_id;
        table.next_id = id
            .checked_add(1)
            .ok_or(RepositoryError::IdSpaceExhausted {
                entity: self.entity,
            })?;

        entity.set_id(id);
        table.rows.insert(id, entity.clone());
        tracing::debug!(entity = self.entity, id, "row inserted");
        Ok(true)
    }

    async fn update(&self, entity: &T) -> Result<bool, RepositoryError> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&entity.id()) {
            Some(row) => {
                *row = entity.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, entity: &T) -> Result<bool, RepositoryError> {
        let mut table = self.table.write().await;
        Ok(table.rows.remove(&entity.id()).is_some())
    }
}
