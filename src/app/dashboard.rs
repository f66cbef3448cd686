//! Dashboard Shell
//!
//! Owns the config, the session, the current route and the UI event bus,
//! and builds page controllers over the configured page sources.

use crossbeam_channel::{Receiver, Sender};
use std::sync::Arc;

use super::navigation::{NavItem, Resolution, Route, resolve, sidebar_items};
use crate::components::data_table::InfiniteSettings;
use crate::constants::{EPISODES_MAX_BLOCKS_IN_CACHE, INFINITE_INITIAL_ROW_COUNT, MAX_CONCURRENT_DATASOURCE_REQUESTS};
use crate::domain::{Character, Episode};
use crate::error::Result;
use crate::features::{SearchBox, notify};
use crate::features::characters::CharactersController;
use crate::features::characters_infinite::CharactersInfiniteController;
use crate::features::episodes::EpisodesController;
use crate::services::{CharacterSource, EpisodeSource, GraphQlClient, PageSource};
use crate::states::{AppConfig, SessionStore, ToastLog, UIEvent, User};

/// Dashboard shell over a characters and an episodes source
pub struct Dashboard<C = CharacterSource, E = EpisodeSource> {
    config: AppConfig,
    session: SessionStore,
    characters: Arc<C>,
    episodes: Arc<E>,
    route: Route,
    tx: Sender<UIEvent>,
    rx: Receiver<UIEvent>,
    toasts: ToastLog,
}

impl Dashboard {
    /// Dashboard talking to the configured GraphQL endpoint
    pub fn new(config: AppConfig, session: SessionStore) -> Result<Self> {
        let client = Arc::new(GraphQlClient::new(config.endpoint.clone(), config.request_timeout())?);
        tracing::info!(endpoint = %client.endpoint(), "Dashboard using GraphQL endpoint");
        Ok(Self::with_sources(
            config,
            session,
            Arc::new(CharacterSource::new(client.clone())),
            Arc::new(EpisodeSource::new(client)),
        ))
    }
}

impl<C, E> Dashboard<C, E>
where
    C: PageSource<Item = Character>,
    E: PageSource<Item = Episode>,
{
    pub fn with_sources(config: AppConfig, session: SessionStore, characters: Arc<C>, episodes: Arc<E>) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        let route = resolve(Route::Characters.path(), session.is_authenticated()).route;
        Self {
            config,
            session,
            characters,
            episodes,
            route,
            tx,
            rx,
            toasts: ToastLog::default(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn user(&self) -> Option<&User> {
        self.session.current()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn route(&self) -> Route {
        self.route
    }

    /// Go to `path` through the route guard
    pub fn navigate(&mut self, path: &str) -> Resolution {
        let resolution = resolve(path, self.session.is_authenticated());
        self.route = resolution.route;
        resolution
    }

    /// Sign in and land on the characters page
    pub fn login(&mut self, username: &str, password: &str) -> Result<User> {
        let user = self.session.login(username, password)?;
        self.navigate(Route::Characters.path());
        notify(&self.tx, UIEvent::info_toast(format!("Signed in as {}", user.username)));
        Ok(user)
    }

    /// Sign out and return to the login page
    pub fn logout(&mut self) -> Result<()> {
        self.session.logout()?;
        self.navigate(Route::Login.path());
        Ok(())
    }

    pub fn sidebar(&self) -> Vec<NavItem> {
        sidebar_items(self.route)
    }

    /// Sender handed to controllers
    pub fn events(&self) -> Sender<UIEvent> {
        self.tx.clone()
    }

    /// Take pending UI events, keeping toasts in the history
    pub fn drain_events(&mut self) -> Vec<UIEvent> {
        let events: Vec<UIEvent> = self.rx.try_iter().collect();
        for event in &events {
            self.toasts.record(event);
        }
        events
    }

    pub fn toasts(&self) -> &ToastLog {
        &self.toasts
    }

    /// Row model settings for the infinite pages; blocks follow the API page size
    pub fn infinite_settings(&self) -> InfiniteSettings {
        if self.config.cache_block_size != self.config.page_size {
            tracing::warn!(
                cache_block_size = self.config.cache_block_size,
                page_size = self.config.page_size,
                "Block size must match the page size; using the page size"
            );
        }
        InfiniteSettings {
            block_size: self.config.page_size,
            max_blocks_in_cache: self.config.max_blocks_in_cache,
            initial_row_count: INFINITE_INITIAL_ROW_COUNT,
            max_concurrent_requests: MAX_CONCURRENT_DATASOURCE_REQUESTS,
        }
    }

    pub fn characters(&self) -> CharactersController<C> {
        CharactersController::new(self.characters.clone(), self.config.page_size, self.events())
    }

    pub fn characters_infinite(&self) -> CharactersInfiniteController<C> {
        CharactersInfiniteController::new(self.characters.clone(), self.infinite_settings(), self.events())
    }

    pub fn episodes(&self) -> EpisodesController {
        let settings = InfiniteSettings {
            max_blocks_in_cache: EPISODES_MAX_BLOCKS_IN_CACHE,
            ..self.infinite_settings()
        };
        EpisodesController::new(self.episodes.clone(), settings, self.events())
    }

    pub fn search_box(&self) -> SearchBox {
        SearchBox::new(self.config.search_debounce())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mock::{MockPageSource, sample_characters, sample_episodes};

    type MockDashboard = Dashboard<MockPageSource<Character>, MockPageSource<Episode>>;

    fn dashboard(dir: &tempfile::TempDir) -> MockDashboard {
        let session = SessionStore::open(dir.path().join("session.json")).expect("session");
        Dashboard::with_sources(
            AppConfig::default(),
            session,
            Arc::new(MockPageSource::new(sample_characters(45))),
            Arc::new(MockPageSource::new(sample_episodes(51))),
        )
    }

    #[test]
    fn test_starts_on_login_when_signed_out() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut dashboard = dashboard(&dir);
        assert_eq!(dashboard.route(), Route::Login);

        let resolution = dashboard.navigate("/episodes");
        assert!(resolution.redirected);
        assert_eq!(dashboard.route(), Route::Login);
    }

    #[test]
    fn test_login_logout_flow() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut dashboard = dashboard(&dir);

        assert!(dashboard.login("rick", "").is_err());
        dashboard.login("rick", "portal").expect("login");
        assert_eq!(dashboard.route(), Route::Characters);
        assert!(dashboard.sidebar()[0].active);

        dashboard.drain_events();
        assert_eq!(dashboard.toasts().latest().map(|t| &*t.message), Some("Signed in as rick"));

        dashboard.logout().expect("logout");
        assert_eq!(dashboard.route(), Route::Login);
        assert!(dashboard.user().is_none());
    }

    #[tokio::test]
    async fn test_controller_toasts_reach_history() {
        let dir = tempfile::tempdir().expect("tempdir");
        let session = SessionStore::open(dir.path().join("session.json")).expect("session");
        let mut dashboard = Dashboard::with_sources(
            AppConfig::default(),
            session,
            Arc::new(MockPageSource::new(sample_characters(45)).fail_on_page(1)),
            Arc::new(MockPageSource::new(sample_episodes(5))),
        );

        let mut characters = dashboard.characters();
        characters.load().await;
        dashboard.drain_events();

        let toast = dashboard.toasts().latest().expect("toast");
        assert!(toast.is_error);
        assert_eq!(&*toast.message, "Could not load characters");
    }

    #[test]
    fn test_episodes_use_small_cache() {
        let dir = tempfile::tempdir().expect("tempdir");
        let dashboard = dashboard(&dir);
        assert_eq!(dashboard.episodes().model().settings().max_blocks_in_cache, 2);
        assert_eq!(dashboard.infinite_settings().block_size, 20);
    }
}
