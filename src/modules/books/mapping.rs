use bookstore_db::{Entity, EntityId};

use super::models::{Book, BookDto, CreateBookDto, UpdateBookDto};
use crate::crud::Identified;

impl Entity for Book {
    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
}

impl From<Book> for BookDto {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
            year: book.year,
            author_id: book.author_id,
        }
    }
}

impl From<CreateBookDto> for Book {
    fn from(dto: CreateBookDto) -> Self {
        Self {
            id: 0,
            title: dto.title,
            year: dto.year,
            author_id: dto.author_id,
        }
    }
}

impl From<UpdateBookDto> for Book {
    fn from(dto: UpdateBookDto) -> Self {
        Self {
            id: dto.id,
            title: dto.title,
            year: dto.year,
            author_id: dto.author_id,
        }
    }
}

impl Identified for UpdateBookDto {
    fn id(&self) -> EntityId {
        self.id
    }
}
