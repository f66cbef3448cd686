//! End-to-end flows over the scripted page source: sign in, open each page,
//! search, sort, scroll, and recover from a failed page.

use std::sync::Arc;
use std::time::Duration;

use rm_dashboard::app::{Dashboard, Route};
use rm_dashboard::components::data_table::DataProvider;
use rm_dashboard::domain::{Character, Episode, SortSpec};
use rm_dashboard::loaders::LoadStatus;
use rm_dashboard::services::mock::{MockPageSource, sample_characters, sample_episodes};
use rm_dashboard::states::{AppConfig, SessionStore};

type MockDashboard = Dashboard<MockPageSource<Character>, MockPageSource<Episode>>;

fn signed_in(
    dir: &tempfile::TempDir,
    characters: &MockPageSource<Character>,
    episodes: &MockPageSource<Episode>,
) -> MockDashboard {
    let session = SessionStore::open(dir.path().join("session.json")).expect("session");
    let mut dashboard = Dashboard::with_sources(
        AppConfig::default(),
        session,
        Arc::new(characters.clone()),
        Arc::new(episodes.clone()),
    );
    dashboard.login("morty", "oh-geez").expect("login");
    dashboard
}

#[tokio::test]
async fn characters_page_loads_everything_once() {
    let dir = tempfile::tempdir().expect("tempdir");
    let characters = MockPageSource::new(sample_characters(45));
    let episodes = MockPageSource::new(sample_episodes(10));
    let mut dashboard = signed_in(&dir, &characters, &episodes);

    assert_eq!(dashboard.navigate("/").route, Route::Characters);
    let mut page = dashboard.characters();
    assert_eq!(page.load().await, LoadStatus::Complete);
    assert_eq!(characters.requested_pages(), vec![1, 2, 3]);

    page.set_search("female");
    page.set_sort(Some(SortSpec::desc("episodeCount"))).expect("sortable");
    let rows = page.model().rows(0..page.model().len());
    assert_eq!(rows.len(), 22);
    assert!(rows.iter().all(|c| c.gender == "Female"));
    assert!(rows.windows(2).all(|w| w[0].episode_count() >= w[1].episode_count()));

    // Search and sort never go back to the API
    assert_eq!(characters.request_count(), 3);
}

#[tokio::test]
async fn failed_page_keeps_earlier_rows_and_toasts() {
    let dir = tempfile::tempdir().expect("tempdir");
    let characters = MockPageSource::new(sample_characters(45)).fail_on_page(2);
    let episodes = MockPageSource::new(sample_episodes(10));
    let mut dashboard = signed_in(&dir, &characters, &episodes);

    let mut page = dashboard.characters();
    assert_eq!(page.load().await, LoadStatus::Partial);
    assert_eq!(page.model().len(), 20);

    dashboard.drain_events();
    let messages: Vec<String> = dashboard.toasts().iter().map(|t| t.message.to_string()).collect();
    assert_eq!(messages, vec!["Signed in as morty", "Could not load characters"]);

    // A later load after the API recovers completes
    characters.heal_page(2);
    assert_eq!(page.load().await, LoadStatus::Complete);
    assert_eq!(page.model().len(), 45);
}

#[tokio::test]
async fn infinite_characters_scroll_search_and_sort() {
    let dir = tempfile::tempdir().expect("tempdir");
    let characters = MockPageSource::new(sample_characters(60)).server_sort("name");
    let episodes = MockPageSource::new(sample_episodes(10));
    let dashboard = signed_in(&dir, &characters, &episodes);

    let mut page = dashboard.characters_infinite();
    assert_eq!(page.model().row_count(), 100);

    let rows = page.rows(40..60).await.expect("rows");
    assert_eq!(rows.len(), 20);
    assert_eq!(page.model().known_row_count(), Some(60));
    assert_eq!(characters.requested_pages(), vec![3]);

    page.set_sort(Some(SortSpec::desc("episodeCount"))).expect("sortable");
    let sorted = page.rows(20..40).await.expect("rows");
    let mut ids: Vec<u32> = sorted.iter().map(|c| c.id.parse().expect("id")).collect();
    ids.sort_unstable();
    assert_eq!(ids, (21..=40).collect::<Vec<u32>>());

    page.set_search("Character 5");
    let found = page.rows(0..20).await.expect("rows");
    assert_eq!(found.len(), 11);
    assert_eq!(page.model().known_row_count(), Some(11));
}

#[tokio::test]
async fn episodes_search_through_debounced_box() {
    let dir = tempfile::tempdir().expect("tempdir");
    let characters = MockPageSource::new(sample_characters(5));
    let episodes = MockPageSource::new(sample_episodes(51));
    let mut dashboard = signed_in(&dir, &characters, &episodes);
    assert_eq!(dashboard.navigate("/episodes").route, Route::Episodes);

    let page = dashboard.episodes();
    assert_eq!(page.rows(0..20).await.expect("rows").len(), 20);

    let search = dashboard.search_box();
    search.input("Epi");
    search.input("Episode 5");
    tokio::time::sleep(Duration::from_millis(700)).await;
    let term = search.take_applied().expect("settled");
    page.set_search(&term);

    let rows = page.rows(0..20).await.expect("rows");
    let names: Vec<&str> = rows.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Episode 5", "Episode 50", "Episode 51"]);
    assert_eq!(episodes.request_count(), 2);
}

#[test]
fn session_survives_restart_and_guards_routes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let characters = MockPageSource::new(sample_characters(5));
    let episodes = MockPageSource::new(sample_episodes(5));
    let mut dashboard = signed_in(&dir, &characters, &episodes);
    assert_eq!(dashboard.navigate("/login").route, Route::Characters);

    let session = SessionStore::open(dir.path().join("session.json")).expect("session");
    let mut restarted = Dashboard::with_sources(
        AppConfig::default(),
        session,
        Arc::new(characters.clone()),
        Arc::new(episodes.clone()),
    );
    assert_eq!(restarted.user().map(|u| u.username.as_str()), Some("morty"));
    assert_eq!(restarted.route(), Route::Characters);

    restarted.logout().expect("logout");
    assert_eq!(restarted.navigate("/episodes").route, Route::Login);
}
