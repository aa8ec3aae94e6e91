use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::Row;

use super::GenreStore;
use crate::database::manager::{Database, DatabaseError};
use crate::database::models::Genre;
use crate::filter::{Field, QueryParams, ResourceDescriptor};

pub const GENRES: ResourceDescriptor = ResourceDescriptor::new(
    "genres",
    &[Field::integer("id", "id"), Field::text("name", "name")],
);

const SELECT_GENRES: &str = "SELECT id, name FROM genres";
const INSERT_GENRE: &str = "INSERT INTO genres (name) VALUES ($1) RETURNING id";
const UPDATE_GENRE: &str = "UPDATE genres SET name = $1 WHERE id = $2";
const DELETE_GENRE: &str = "DELETE FROM genres WHERE id = $1";

fn scan_genre(row: &PgRow) -> Result<Genre, sqlx::Error> {
    Ok(Genre {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
    })
}

#[async_trait]
impl GenreStore for Database {
    async fn list_genres(&self, params: &QueryParams) -> Result<Vec<Genre>, DatabaseError> {
        self.list(SELECT_GENRES, &GENRES, params, scan_genre).await
    }

    async fn get_genre(&self, id: i64) -> Result<Genre, DatabaseError> {
        let sql = format!("{SELECT_GENRES} WHERE id = $1");
        self.lookup_by_id(&sql, id, scan_genre).await
    }

    async fn insert_genre(&self, genre: &Genre) -> Result<i64, DatabaseError> {
        self.insert(INSERT_GENRE, &[genre.name.as_str().into()]).await
    }

    async fn replace_genre(&self, id: i64, genre: &Genre) -> Result<(), DatabaseError> {
        self.update_whole(UPDATE_GENRE, &[genre.name.as_str().into()], id).await
    }

    async fn delete_genre(&self, id: i64) -> Result<(), DatabaseError> {
        self.delete_by_id(DELETE_GENRE, id).await
    }
}
