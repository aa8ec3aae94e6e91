//! Per-resource storage traits and their Postgres implementations.
//!
//! Handlers only ever see `dyn CatalogStore`, so tests can swap the database
//! for an in-memory store.

use async_trait::async_trait;

use super::manager::{Database, DatabaseError};
use super::models::{
    Author, AuthorPatch, Book, BookListing, BookPatch, BookView, Genre, Language,
};
use crate::filter::QueryParams;

pub mod authors;
pub mod books;
pub mod genres;
pub mod languages;

pub use authors::{author_assignments, AUTHORS};
pub use books::{book_assignments, BOOKS, BOOKS_EXTENDED};
pub use genres::GENRES;
pub use languages::LANGUAGES;

#[async_trait]
pub trait BookStore: Send + Sync {
    async fn list_books(&self, params: &QueryParams, view: BookView) -> Result<BookListing, DatabaseError>;
    async fn get_book(&self, id: i64) -> Result<Book, DatabaseError>;
    async fn insert_book(&self, book: &Book) -> Result<i64, DatabaseError>;
    async fn replace_book(&self, id: i64, book: &Book) -> Result<(), DatabaseError>;
    async fn patch_book(&self, id: i64, patch: &BookPatch) -> Result<(), DatabaseError>;
    async fn delete_book(&self, id: i64) -> Result<(), DatabaseError>;
}

#[async_trait]
pub trait AuthorStore: Send + Sync {
    async fn list_authors(&self, params: &QueryParams) -> Result<Vec<Author>, DatabaseError>;
    async fn get_author(&self, id: i64) -> Result<Author, DatabaseError>;
    async fn insert_author(&self, author: &Author) -> Result<i64, DatabaseError>;
    async fn replace_author(&self, id: i64, author: &Author) -> Result<(), DatabaseError>;
    async fn patch_author(&self, id: i64, patch: &AuthorPatch) -> Result<(), DatabaseError>;
    async fn delete_author(&self, id: i64) -> Result<(), DatabaseError>;
}

#[async_trait]
pub trait GenreStore: Send + Sync {
    async fn list_genres(&self, params: &QueryParams) -> Result<Vec<Genre>, DatabaseError>;
    async fn get_genre(&self, id: i64) -> Result<Genre, DatabaseError>;
    async fn insert_genre(&self, genre: &Genre) -> Result<i64, DatabaseError>;
    async fn replace_genre(&self, id: i64, genre: &Genre) -> Result<(), DatabaseError>;
    async fn delete_genre(&self, id: i64) -> Result<(), DatabaseError>;
}

#[async_trait]
pub trait LanguageStore: Send + Sync {
    async fn list_languages(&self, params: &QueryParams) -> Result<Vec<Language>, DatabaseError>;
    async fn get_language(&self, id: i64) -> Result<Language, DatabaseError>;
    async fn insert_language(&self, language: &Language) -> Result<i64, DatabaseError>;
    async fn replace_language(&self, id: i64, language: &Language) -> Result<(), DatabaseError>;
    async fn delete_language(&self, id: i64) -> Result<(), DatabaseError>;
}

/// Everything the HTTP layer needs from storage
#[async_trait]
pub trait CatalogStore: BookStore + AuthorStore + GenreStore + LanguageStore {
    async fn ping(&self) -> Result<(), DatabaseError>;
}

#[async_trait]
impl CatalogStore for Database {
    async fn ping(&self) -> Result<(), DatabaseError> {
        self.health_check().await
    }
}
