//! Generic CRUD endpoints shared by every catalogue entity.
//!
//! An entity plugs in by implementing [`Resource`]; [`router`] then exposes
//! list/get/create/update/delete under the module's base path.

mod handlers;
mod openapi;

use std::marker::PhantomData;
use std::sync::Arc;

use axum::{routing::get, Router};
use bookstore_db::{Entity, EntityId, Repository};
use serde::{de::DeserializeOwned, Serialize};
use validator::Validate;

pub use handlers::{create, delete, get_by_id, list, update};
pub use openapi::openapi;

/// Binds an entity to its transfer shapes and its place in the HTTP surface.
pub trait Resource: Send + Sync + 'static {
    /// Path segment under `/api`, also the component in log labels.
    const COMPONENT: &'static str;
    /// Singular name used in log lines and OpenAPI schema names.
    const ENTITY: &'static str;

    type Entity: Entity;
    type ReadDto: Serialize + From<Self::Entity> + Send;
    type CreateDto: DeserializeOwned + Validate + Into<Self::Entity> + Send;
    type UpdateDto: DeserializeOwned + Validate + Into<Self::Entity> + Identified + Send;
}

/// Update payloads carry the id of the record they replace.
pub trait Identified {
    fn id(&self) -> EntityId;
}

/// Router state for one resource.
pub struct CrudState<R: Resource> {
    repository: Arc<dyn Repository<R::Entity>>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> CrudState<R> {
    pub fn new(repository: Arc<dyn Repository<R::Entity>>) -> Self {
        Self {
            repository,
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> Clone for CrudState<R> {
    fn clone(&self) -> Self {
        Self::new(self.repository.clone())
    }
}

/// Routes for one resource, relative to its mount point.
pub fn router<R: Resource>(repository: Arc<dyn Repository<R::Entity>>) -> Router {
    Router::new()
        .route("/", get(list::<R>).post(create::<R>))
        .route(
            "/{id}",
            get(get_by_id::<R>).put(update::<R>).delete(delete::<R>),
        )
        .with_state(CrudState::<R>::new(repository))
}
