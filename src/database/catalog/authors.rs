use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::Row;

use super::AuthorStore;
use crate::database::manager::{Database, DatabaseError};
use crate::database::models::{Author, AuthorPatch};
use crate::database::mutation::Assignments;
use crate::filter::{Field, QueryParams, ResourceDescriptor, SqlValue};

pub const AUTHORS: ResourceDescriptor = ResourceDescriptor::new(
    "authors",
    &[
        Field::integer("id", "id"),
        Field::text("first_name", "first_name"),
        Field::text("last_name", "last_name"),
        Field::integer("birth_year", "birth_year"),
        Field::integer("death_year", "death_year"),
    ],
);

const SELECT_AUTHORS: &str = "SELECT id, first_name, last_name, birth_year, death_year FROM authors";

const INSERT_AUTHOR: &str = "\
    INSERT INTO authors (first_name, last_name, birth_year, death_year) \
    VALUES ($1, $2, $3, $4) RETURNING id";

const UPDATE_AUTHOR: &str = "\
    UPDATE authors SET first_name = $1, last_name = $2, birth_year = $3, death_year = $4 \
    WHERE id = $5";

const DELETE_AUTHOR: &str = "DELETE FROM authors WHERE id = $1";

fn scan_author(row: &PgRow) -> Result<Author, sqlx::Error> {
    Ok(Author {
        id: row.try_get("id")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        birth_year: row.try_get("birth_year")?,
        death_year: row.try_get("death_year")?,
    })
}

fn author_values(author: &Author) -> Vec<SqlValue> {
    vec![
        author.first_name.as_str().into(),
        author.last_name.as_str().into(),
        author.birth_year.into(),
        author.death_year.into(),
    ]
}

pub fn author_assignments(patch: &AuthorPatch) -> Assignments {
    Assignments::new()
        .set("first_name", patch.first_name.clone())
        .set("last_name", patch.last_name.clone())
        .set("birth_year", patch.birth_year)
        .set("death_year", patch.death_year)
}

#[async_trait]
impl AuthorStore for Database {
    async fn list_authors(&self, params: &QueryParams) -> Result<Vec<Author>, DatabaseError> {
        self.list(SELECT_AUTHORS, &AUTHORS, params, scan_author).await
    }

    async fn get_author(&self, id: i64) -> Result<Author, DatabaseError> {
        let sql = format!("{SELECT_AUTHORS} WHERE id = $1");
        self.lookup_by_id(&sql, id, scan_author).await
    }

    async fn insert_author(&self, author: &Author) -> Result<i64, DatabaseError> {
        self.insert(INSERT_AUTHOR, &author_values(author)).await
    }

    async fn replace_author(&self, id: i64, author: &Author) -> Result<(), DatabaseError> {
        self.update_whole(UPDATE_AUTHOR, &author_values(author), id).await
    }

    async fn patch_author(&self, id: i64, patch: &AuthorPatch) -> Result<(), DatabaseError> {
        self.update_partial(AUTHORS.table, id, &author_assignments(patch)).await
    }

    async fn delete_author(&self, id: i64) -> Result<(), DatabaseError> {
        self.delete_by_id(DELETE_AUTHOR, id).await
    }
}
