use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::Row;

use super::LanguageStore;
use crate::database::manager::{Database, DatabaseError};
use crate::database::models::Language;
use crate::filter::{Field, QueryParams, ResourceDescriptor};

pub const LANGUAGES: ResourceDescriptor = ResourceDescriptor::new(
    "languages",
    &[Field::integer("id", "id"), Field::text("name", "name")],
);

const SELECT_LANGUAGES: &str = "SELECT id, name FROM languages";
const INSERT_LANGUAGE: &str = "INSERT INTO languages (name) VALUES ($1) RETURNING id";
const UPDATE_LANGUAGE: &str = "UPDATE languages SET name = $1 WHERE id = $2";
const DELETE_LANGUAGE: &str = "DELETE FROM languages WHERE id = $1";

fn scan_language(row: &PgRow) -> Result<Language, sqlx::Error> {
    Ok(Language {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
    })
}

#[async_trait]
impl LanguageStore for Database {
    async fn list_languages(&self, params: &QueryParams) -> Result<Vec<Language>, DatabaseError> {
        self.list(SELECT_LANGUAGES, &LANGUAGES, params, scan_language).await
    }

    async fn get_language(&self, id: i64) -> Result<Language, DatabaseError> {
        let sql = format!("{SELECT_LANGUAGES} WHERE id = $1");
        self.lookup_by_id(&sql, id, scan_language).await
    }

    async fn insert_language(&self, language: &Language) -> Result<i64, DatabaseError> {
        self.insert(INSERT_LANGUAGE, &[language.name.as_str().into()]).await
    }

    async fn replace_language(&self, id: i64, language: &Language) -> Result<(), DatabaseError> {
        self.update_whole(UPDATE_LANGUAGE, &[language.name.as_str().into()], id).await
    }

    async fn delete_language(&self, id: i64) -> Result<(), DatabaseError> {
        self.delete_by_id(DELETE_LANGUAGE, id).await
    }
}
