use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

impl Genre {
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty()
    }
}
