use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::Row;

use super::BookStore;
use crate::database::manager::{Database, DatabaseError};
use crate::database::models::{Author, Book, BookExt, BookListing, BookPatch, BookView, Genre, Language};
use crate::database::mutation::Assignments;
use crate::filter::{Field, QueryParams, ResourceDescriptor, SqlValue};

pub const BOOKS: ResourceDescriptor = ResourceDescriptor::new(
    "books",
    &[
        Field::integer("id", "id"),
        Field::text("title", "title"),
        Field::integer("year", "publication_year"),
        Field::integer("pages", "page_count"),
        Field::integer("author", "author_id"),
        Field::integer("genre", "genre_id"),
        Field::integer("language", "language_id"),
    ],
);

/// Filterable fields of the joined view. Related records are addressed with
/// dotted names such as `author.last_name`.
pub const BOOKS_EXTENDED: ResourceDescriptor = ResourceDescriptor::new(
    "books",
    &[
        Field::integer("id", "b.id"),
        Field::text("title", "b.title"),
        Field::integer("year", "b.publication_year"),
        Field::integer("pages", "b.page_count"),
        Field::integer("author.id", "a.id"),
        Field::text("author.first_name", "a.first_name"),
        Field::text("author.last_name", "a.last_name"),
        Field::integer("author.birth_year", "a.birth_year"),
        Field::integer("author.death_year", "a.death_year"),
        Field::integer("genre.id", "g.id"),
        Field::text("genre.name", "g.name"),
        Field::integer("language.id", "l.id"),
        Field::text("language.name", "l.name"),
    ],
);

const SELECT_BOOKS: &str =
    "SELECT id, title, publication_year, page_count, author_id, genre_id, language_id FROM books";

const SELECT_BOOKS_EXTENDED: &str = "\
    SELECT b.id, b.title, b.publication_year, b.page_count, \
           a.id AS author_id, a.first_name, a.last_name, a.birth_year, a.death_year, \
           g.id AS genre_id, g.name AS genre_name, \
           l.id AS language_id, l.name AS language_name \
    FROM books b \
    JOIN authors a ON a.id = b.author_id \
    JOIN genres g ON g.id = b.genre_id \
    JOIN languages l ON l.id = b.language_id";

const INSERT_BOOK: &str = "\
    INSERT INTO books (title, publication_year, page_count, author_id, genre_id, language_id) \
    VALUES ($1, $2, $3, $4, $5, $6) RETURNING id";

const UPDATE_BOOK: &str = "\
    UPDATE books SET title = $1, publication_year = $2, page_count = $3, \
    author_id = $4, genre_id = $5, language_id = $6 WHERE id = $7";

const DELETE_BOOK: &str = "DELETE FROM books WHERE id = $1";

fn scan_book(row: &PgRow) -> Result<Book, sqlx::Error> {
    Ok(Book {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        year: row.try_get("publication_year")?,
        pages: row.try_get("page_count")?,
        author: row.try_get("author_id")?,
        genre: row.try_get("genre_id")?,
        language: row.try_get("language_id")?,
    })
}

fn scan_book_ext(row: &PgRow) -> Result<BookExt, sqlx::Error> {
    Ok(BookExt {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        year: row.try_get("publication_year")?,
        pages: row.try_get("page_count")?,
        author: Author {
            id: row.try_get("author_id")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            birth_year: row.try_get("birth_year")?,
            death_year: row.try_get("death_year")?,
        },
        genre: Genre {
            id: row.try_get("genre_id")?,
            name: row.try_get("genre_name")?,
        },
        language: Language {
            id: row.try_get("language_id")?,
            name: row.try_get("language_name")?,
        },
    })
}

/// Values for `INSERT_BOOK` / `UPDATE_BOOK`, in column order
fn book_values(book: &Book) -> Vec<SqlValue> {
    vec![
        book.title.as_str().into(),
        book.year.into(),
        book.pages.into(),
        book.author.into(),
        book.genre.into(),
        book.language.into(),
    ]
}

pub fn book_assignments(patch: &BookPatch) -> Assignments {
    Assignments::new()
        .set("title", patch.title.clone())
        .set("publication_year", patch.year)
        .set("page_count", patch.pages)
        .set("author_id", patch.author)
        .set("genre_id", patch.genre)
        .set("language_id", patch.language)
}

#[async_trait]
impl BookStore for Database {
    async fn list_books(&self, params: &QueryParams, view: BookView) -> Result<BookListing, DatabaseError> {
        match view {
            BookView::Plain => self
                .list(SELECT_BOOKS, &BOOKS, params, scan_book)
                .await
                .map(BookListing::Plain),
            BookView::Extended => self
                .list(SELECT_BOOKS_EXTENDED, &BOOKS_EXTENDED, params, scan_book_ext)
                .await
                .map(BookListing::Extended),
        }
    }

    async fn get_book(&self, id: i64) -> Result<Book, DatabaseError> {
        let sql = format!("{SELECT_BOOKS} WHERE id = $1");
        self.lookup_by_id(&sql, id, scan_book).await
    }

    async fn insert_book(&self, book: &Book) -> Result<i64, DatabaseError> {
        self.insert(INSERT_BOOK, &book_values(book)).await
    }

    async fn replace_book(&self, id: i64, book: &Book) -> Result<(), DatabaseError> {
        self.update_whole(UPDATE_BOOK, &book_values(book), id).await
    }

    async fn patch_book(&self, id: i64, patch: &BookPatch) -> Result<(), DatabaseError> {
        self.update_partial(BOOKS.table, id, &book_assignments(patch)).await
    }

    async fn delete_book(&self, id: i64) -> Result<(), DatabaseError> {
        self.delete_by_id(DELETE_BOOK, id).await
    }
}
