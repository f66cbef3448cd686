//! Episode - Dataset Record

use serde::{Deserialize, Serialize};

use crate::domain::{CellValue, IdRef, Record};

/// An episode as returned by the `episodes` query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub air_date: String,
    /// Episode code, e.g. `S01E01`
    #[serde(default)]
    pub episode: String,
    #[serde(default)]
    pub characters: Vec<IdRef>,
}

impl Episode {
    pub fn character_count(&self) -> usize {
        self.characters.len()
    }
}

impl Record for Episode {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<CellValue> {
        let text = |s: &str| (!s.is_empty()).then(|| CellValue::text(s));
        match name {
            "id" => text(&self.id),
            "name" => text(&self.name),
            "air_date" => (!self.air_date.is_empty()).then(|| CellValue::long_date(&self.air_date)),
            "episode" => text(&self.episode),
            "characterCount" => Some(CellValue::count(self.character_count())),
            _ => None,
        }
    }
}
