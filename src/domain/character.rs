//! Character - Dataset Record

use serde::{Deserialize, Serialize};

use crate::domain::{CellValue, IdRef, Record};

/// Place of origin, only the name is queried
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Origin {
    #[serde(default)]
    pub name: String,
}

/// A character as returned by the `characters` query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub species: String,
    #[serde(default)]
    pub gender: String,
    /// Episodes the character appears in (ids only)
    #[serde(default)]
    pub episode: Vec<IdRef>,
    #[serde(default)]
    pub origin: Option<Origin>,
    #[serde(default)]
    pub image: Option<String>,
}

impl Character {
    /// Number of episodes the character appears in
    pub fn episode_count(&self) -> usize {
        self.episode.len()
    }
}

impl Record for Character {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<CellValue> {
        let text = |s: &str| (!s.is_empty()).then(|| CellValue::text(s));
        match name {
            "id" => text(&self.id),
            "name" => text(&self.name),
            "status" => text(&self.status),
            "species" => text(&self.species),
            "gender" => text(&self.gender),
            "origin.name" => self.origin.as_ref().and_then(|o| text(&o.name)),
            "episodeCount" => Some(CellValue::count(self.episode_count())),
            "image" => self.image.as_deref().and_then(text),
            _ => None,
        }
    }
}
