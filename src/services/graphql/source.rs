//! Paged sources backed by the GraphQL API.

use futures::future::BoxFuture;
use std::sync::Arc;

use super::client::GraphQlClient;
use super::queries::{CharactersData, EpisodesData, GET_CHARACTERS, GET_EPISODES, PageVariables};
use crate::domain::{Character, Episode, Page, PageRequest};
use crate::error::Result;
use crate::services::PageSource;

/// The `characters` collection; the API takes no sort argument, so every
/// sort runs over the fetched page
#[derive(Debug, Clone)]
pub struct CharacterSource {
    client: Arc<GraphQlClient>,
}

impl CharacterSource {
    pub fn new(client: Arc<GraphQlClient>) -> Self {
        Self { client }
    }
}

impl PageSource for CharacterSource {
    type Item = Character;

    fn fetch_page(&self, request: PageRequest) -> BoxFuture<'_, Result<Page<Character>>> {
        Box::pin(async move {
            let variables = PageVariables::from(&request);
            tracing::debug!(page = request.page, filter = ?request.filter, "Fetching characters page");
            let data: CharactersData = self.client.query(GET_CHARACTERS, &variables).await?;
            Ok(data.characters.map_or_else(Page::empty, |c| c.into_page()))
        })
    }

    fn collection(&self) -> &'static str {
        "characters"
    }
}

/// The `episodes` collection; the API cannot sort episodes
#[derive(Debug, Clone)]
pub struct EpisodeSource {
    client: Arc<GraphQlClient>,
}

impl EpisodeSource {
    pub fn new(client: Arc<GraphQlClient>) -> Self {
        Self { client }
    }
}

impl PageSource for EpisodeSource {
    type Item = Episode;

    fn fetch_page(&self, request: PageRequest) -> BoxFuture<'_, Result<Page<Episode>>> {
        Box::pin(async move {
            let variables = PageVariables::from(&request);
            tracing::debug!(page = request.page, filter = ?request.filter, "Fetching episodes page");
            let data: EpisodesData = self.client.query(GET_EPISODES, &variables).await?;
            Ok(data.episodes.map_or_else(Page::empty, |c| c.into_page()))
        })
    }

    fn collection(&self) -> &'static str {
        "episodes"
    }
}
