//! Query documents and their variable/result shapes.

use serde::{Deserialize, Serialize};

use crate::domain::{Character, Episode, NameFilter, Page, PageInfo, PageRequest};

pub const GET_CHARACTERS: &str = r#"query GetCharacters($page: Int!, $filter: FilterCharacter) {
  characters(page: $page, filter: $filter) {
    info {
      count
      pages
    }
    results {
      id
      name
      status
      species
      gender
      episode {
        id
      }
      origin {
        name
      }
      image
    }
  }
}"#;

pub const GET_EPISODES: &str = r#"query GetEpisodes($page: Int, $filter: FilterEpisode) {
  episodes(page: $page, filter: $filter) {
    info {
      count
      pages
      next
      prev
    }
    results {
      id
      name
      air_date
      episode
      characters {
        id
      }
    }
  }
}"#;

/// Variables shared by both paged queries; neither query takes a sort
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PageVariables {
    pub page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<NameFilter>,
}

impl From<&PageRequest> for PageVariables {
    fn from(request: &PageRequest) -> Self {
        Self {
            page: request.page,
            filter: request.filter.clone(),
        }
    }
}

/// `{ info, results }` connection returned by both queries
#[derive(Debug, Clone, Deserialize)]
pub struct Connection<T> {
    #[serde(default)]
    pub info: Option<PageInfo>,
    #[serde(default)]
    pub results: Option<Vec<T>>,
}

impl<T> Connection<T> {
    /// Missing info or results read as an empty page
    pub fn into_page(self) -> Page<T> {
        Page {
            items: self.results.unwrap_or_default(),
            total_count: self.info.map_or(0, |info| info.count),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CharactersData {
    pub characters: Option<Connection<Character>>,
}

#[derive(Debug, Deserialize)]
pub struct EpisodesData {
    pub episodes: Option<Connection<Episode>>,
}
