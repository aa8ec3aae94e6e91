use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Author {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub birth_year: i64,
    /// `None` while the author is alive
    pub death_year: Option<i64>,
}

impl Author {
    pub fn is_valid(&self) -> bool {
        if self.first_name.is_empty() || self.last_name.is_empty() {
            return false;
        }
        match self.death_year {
            Some(death) => self.birth_year <= death,
            None => true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AuthorPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_year: Option<i64>,
    pub death_year: Option<i64>,
}
