pub mod authors;
pub mod books;

use std::sync::Arc;

use bookstore_db::{InMemoryRepository, Repository};
use bookstore_kernel::ModuleRegistry;

use authors::models::Author;
use books::models::Book;

/// Stores backing each catalogue module.
#[derive(Clone)]
pub struct Repositories {
    pub books: Arc<dyn Repository<Book>>,
    pub authors: Arc<dyn Repository<Author>>,
}

impl Repositories {
    /// Fresh, empty process-local stores.
    pub fn in_memory() -> Self {
        Self {
            books: InMemoryRepository::<Book>::shared("book"),
            authors: InMemoryRepository::<Author>::shared("author"),
        }
    }
}

/// Register all project-specific modules with the registry
pub fn register_all(
    registry: &mut ModuleRegistry,
    repositories: &Repositories,
) -> anyhow::Result<()> {
    registry.register(books::create_module(repositories.books.clone()))?;
    registry.register(authors::create_module(repositories.authors.clone()))?;
    Ok(())
}
