use bookstore_db::EntityId;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Stored shape of a book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: EntityId,
    pub title: String,
    pub year: i32,
    /// Id of the author record; not checked against the authors store.
    pub author_id: EntityId,
}

/// Book as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
    pub id: EntityId,
    pub title: String,
    pub year: i32,
    pub author_id: EntityId,
}

/// Request body for creating a book. The id is assigned by the store.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateBookDto {
    #[validate(length(min = 1, max = 100, message = "title must be 1 to 100 characters"))]
    pub title: String,
    #[validate(range(min = 1, max = 9999, message = "year must be between 1 and 9999"))]
    pub year: i32,
    #[validate(range(min = 1, message = "authorId must be positive"))]
    pub author_id: EntityId,
}

/// Request body for replacing a book.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateBookDto {
    #[validate(range(min = 1, message = "id must be positive"))]
    pub id: EntityId,
    #[validate(length(min = 1, max = 100, message = "title must be 1 to 100 characters"))]
    pub title: String,
    #[validate(range(min = 1, max = 9999, message = "year must be between 1 and 9999"))]
    pub year: i32,
    #[validate(range(min = 1, message = "authorId must be positive"))]
    pub author_id: EntityId,
}
