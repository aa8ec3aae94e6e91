use serde::{Deserialize, Serialize};

use super::author::Author;
use super::genre::Genre;
use super::language::Language;
use crate::filter::QueryParams;

/// A book as stored, with related records referenced by id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub year: i64,
    pub pages: i64,
    pub author: i64,
    pub genre: i64,
    pub language: i64,
}

impl Book {
    pub fn is_valid(&self) -> bool {
        !self.title.is_empty()
            && self.year != 0
            && self.pages > 0
            && self.author > 0
            && self.genre > 0
            && self.language > 0
    }
}

/// Fields for a partial book update; `None` leaves the column unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BookPatch {
    pub title: Option<String>,
    pub year: Option<i64>,
    pub pages: Option<i64>,
    pub author: Option<i64>,
    pub genre: Option<i64>,
    pub language: Option<i64>,
}

/// A book with its author, genre and language embedded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookExt {
    pub id: i64,
    pub title: String,
    pub year: i64,
    pub pages: i64,
    pub author: Author,
    pub genre: Genre,
    pub language: Language,
}

/// Which shape a book listing is produced in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookView {
    Plain,
    Extended,
}

impl BookView {
    pub const PARAM: &'static str = "extend";

    /// `extend=true` selects the extended view; any other value (or none) the plain one
    pub fn from_params(params: &QueryParams) -> Self {
        match params.first(Self::PARAM) {
            Some("true") => BookView::Extended,
            _ => BookView::Plain,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BookListing {
    Plain(Vec<Book>),
    Extended(Vec<BookExt>),
}

impl BookListing {
    pub fn len(&self) -> usize {
        match self {
            BookListing::Plain(books) => books.len(),
            BookListing::Extended(books) => books.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
