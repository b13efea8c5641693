use bookstore_db::{Entity, EntityId};

use super::models::{Author, AuthorDto, CreateAuthorDto, UpdateAuthorDto};
use crate::crud::Identified;

impl Entity for Author {
    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
}

impl From<Author> for AuthorDto {
    fn from(author: Author) -> Self {
        Self {
            id: author.id,
            first_name: author.first_name,
            last_name: author.last_name,
        }
    }
}

impl From<CreateAuthorDto> for Author {
    fn from(dto: CreateAuthorDto) -> Self {
        Self {
            id: 0,
            first_name: dto.first_name,
            last_name: dto.last_name,
        }
    }
}

impl From<UpdateAuthorDto> for Author {
    fn from(dto: UpdateAuthorDto) -> Self {
        Self {
            id: dto.id,
            first_name: dto.first_name,
            last_name: dto.last_name,
        }
    }
}

impl Identified for UpdateAuthorDto {
    fn id(&self) -> EntityId {
        self.id
    }
}
