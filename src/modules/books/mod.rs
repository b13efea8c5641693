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
use models::{Book, BookDto, CreateBookDto, UpdateBookDto};

/// Books as a CRUD resource under `/api/books`.
pub struct BookResource;

impl Resource for BookResource {
    const COMPONENT: &'static str = "books";
    const ENTITY: &'static str = "Book";

    type Entity = Book;
    type ReadDto = BookDto;
    type CreateDto = CreateBookDto;
    type UpdateDto = UpdateBookDto;
}

/// Books module
pub struct BooksModule {
    repository: Arc<dyn Repository<Book>>,
}

impl BooksModule {
    pub fn new(repository: Arc<dyn Repository<Book>>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        BookResource::COMPONENT
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let stored = self
            .repository
            .find_all()
            .await
            .context("books store is not reachable")?
            .len();
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            stored,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        crud::router::<BookResource>(self.repository.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(crud::openapi::<BookResource>(json!({
            "Book": {
                "type": "object",
                "properties": {
                    "id": { "type": "integer", "format": "int64" },
                    "title": { "type": "string" },
                    "year": { "type": "integer", "format": "int32" },
                    "authorId": { "type": "integer", "format": "int64" }
                },
                "required": ["id", "title", "year", "authorId"]
            },
            "CreateBook": {
                "type": "object",
                "properties": {
                    "title": { "type": "string", "minLength": 1, "maxLength": 100 },
                    "year": { "type": "integer", "format": "int32", "minimum": 1, "maximum": 9999 },
                    "authorId": { "type": "integer", "format": "int64", "minimum": 1 }
                },
                "required": ["title", "year", "authorId"],
                "additionalProperties": false
            },
            "UpdateBook": {
                "type": "object",
                "properties": {
                    "id": { "type": "integer", "format": "int64", "minimum": 1 },
                    "title": { "type": "string", "minLength": 1, "maxLength": 100 },
                    "year": { "type": "integer", "format": "int32", "minimum": 1, "maximum": 9999 },
                    "authorId": { "type": "integer", "format": "int64", "minimum": 1 }
                },
                "required": ["id", "title", "year", "authorId"],
                "additionalProperties": false
            }
        })))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module(repository: Arc<dyn Repository<Book>>) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(repository))
}
