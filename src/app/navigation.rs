//! Navigation - Routes and Route Guard
//!
//! Defines the pages available in the dashboard, how a requested path
//! resolves against the session, and the sidebar entries.

use serde::{Deserialize, Serialize};

/// Index path; always redirects
pub const INDEX_PATH: &str = "/";

/// Available pages in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Route {
    /// Sign-in form
    Login,
    /// Characters, loaded eagerly
    #[default]
    Characters,
    /// Characters, loaded block by block
    CharactersInfinite,
    /// Episodes, loaded block by block
    Episodes,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Characters => "/characters",
            Route::CharactersInfinite => "/characters/infinite",
            Route::Episodes => "/episodes",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::Characters => "Characters",
            Route::CharactersInfinite => "Characters (infinite scroll)",
            Route::Episodes => "Episodes",
        }
    }

    /// Exact path match, ignoring a trailing slash
    pub fn from_path(path: &str) -> Option<Route> {
        let path = normalize(path);
        Self::all().iter().copied().find(|r| r.path() == path)
    }

    /// Pages that need a signed-in user
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login)
    }

    pub fn all() -> &'static [Route] {
        &[
            Route::Login,
            Route::Characters,
            Route::CharactersInfinite,
            Route::Episodes,
        ]
    }
}

fn normalize(path: &str) -> &str {
    let trimmed = path.trim().trim_end_matches('/');
    if trimmed.is_empty() { INDEX_PATH } else { trimmed }
}

/// Where a requested path ends up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub route: Route,
    /// Whether the guard sent the user somewhere other than requested
    pub redirected: bool,
}

/// Resolve a requested path against the session.
///
/// - `/` goes to `/characters`
/// - unknown paths go to `/`
/// - protected pages go to `/login` when signed out
/// - `/login` goes to `/characters` when already signed in
pub fn resolve(path: &str, authenticated: bool) -> Resolution {
    let requested = Route::from_path(path);
    let target = requested.unwrap_or(Route::Characters);

    let route = match target {
        Route::Login if authenticated => Route::Characters,
        r if r.is_protected() && !authenticated => Route::Login,
        r => r,
    };

    let resolution = Resolution {
        route,
        redirected: requested != Some(route),
    };
    if resolution.redirected {
        tracing::debug!(path, to = route.path(), "Redirecting");
    }
    resolution
}

/// A sidebar entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub route: Route,
    pub active: bool,
}

/// Sidebar entries; an entry is active only on its exact page
pub fn sidebar_items(current: Route) -> Vec<NavItem> {
    [Route::Characters, Route::Episodes]
        .into_iter()
        .map(|route| NavItem {
            label: route.title(),
            route,
            active: route == current,
        })
        .collect()
}
