pub mod mapping;
pub mod models;

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use axum::Router;
use bookstore_db::Repository;
use bookstore_kernel::{InitCtx, Module};
use serde_json::json;

use crate::crud::{self, Resource};
use models::{Author, AuthorDto, CreateAuthorDto, UpdateAuthorDto};

/// Authors as a CRUD resource under `/api/authors`.
///
/// Deleting an author leaves books that reference it untouched.
pub struct AuthorResource;

impl Resource for AuthorResource {
    const COMPONENT: &'static str = "authors";
    const ENTITY: &'static str = "Author";

    type Entity = Author;
    type ReadDto = AuthorDto;
    type CreateDto = CreateAuthorDto;
    type UpdateDto = UpdateAuthorDto;
}

pub struct AuthorsModule {
    repository: Arc<dyn Repository<Author>>,
}

impl AuthorsModule {
    pub fn new(repository: Arc<dyn Repository<Author>>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl Module for AuthorsModule {
    fn name(&self) -> &'static str {
        AuthorResource::COMPONENT
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let stored = self
            .repository
            .find_all()
            .await
            .context("authors store is not reachable")?
            .len();
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            stored,
            "authors module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        crud::router::<AuthorResource>(self.repository.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(crud::openapi::<AuthorResource>(json!({
            "Author": {
                "type": "object",
                "properties": {
                    "id": { "type": "integer", "format": "int64" },
                    "firstName": { "type": "string" },
                    "lastName": { "type": "string" }
                },
                "required": ["id", "firstName", "lastName"]
            },
            "CreateAuthor": {
                "type": "object",
                "properties": {
                    "firstName": { "type": "string", "minLength": 1, "maxLength": 50 },
                    "lastName": { "type": "string", "minLength": 1, "maxLength": 50 }
                },
                "required": ["firstName", "lastName"],
                "additionalProperties": false
            },
            "UpdateAuthor": {
                "type": "object",
                "properties": {
                    "id": { "type": "integer", "format": "int64", "minimum": 1 },
                    "firstName": { "type": "string", "minLength": 1, "maxLength": 50 },
                    "lastName": { "type": "string", "minLength": 1, "maxLength": 50 }
                },
                "required": ["id", "firstName", "lastName"],
                "additionalProperties": false
            }
        })))
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "authors module stopped");
        Ok(())
    }
}

pub fn create_module(repository: Arc<dyn Repository<Author>>) -> Arc<dyn Module> {
    Arc::new(AuthorsModule::new(repository))
}
