use bookstore_db::EntityId;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorDto {
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateAuthorDto {
    #[validate(length(min = 1, max = 50, message = "firstName must be 1 to 50 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50, message = "lastName must be 1 to 50 characters"))]
    pub last_name: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateAuthorDto {
    #[validate(range(min = 1, message = "id must be positive"))]
    pub id: EntityId,
    #[validate(length(min = 1, max = 50, message = "firstName must be 1 to 50 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50, message = "lastName must be 1 to 50 characters"))]
    pub last_name: String,
}
