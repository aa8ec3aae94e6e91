use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Language {
    pub id: i64,
    pub name: String,
}

impl Language {
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty()
    }
}
