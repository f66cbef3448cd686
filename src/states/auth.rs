//! Session Store
//!
//! Mock authentication. Any non-empty username and password signs in; the
//! session is kept in `session.json` next to the config file so it survives
//! restarts.

use crate::error::{Error, Result};
use crate::helpers::{get_or_create_config_dir, read_optional};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const SESSION_FILE: &str = "session.json";

/// Signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    pub is_authenticated: bool,
    #[serde(default)]
    pub signed_in_at: Option<DateTime<Utc>>,
}

/// File-backed session
#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    user: Option<User>,
}

impl SessionStore {
    /// Open the session stored at `path`; a corrupt file means signed out
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = read_optional(&path)?;
        let user = if content.trim().is_empty() {
            None
        } else {
            match serde_json::from_str::<User>(&content) {
                Ok(user) if user.is_authenticated => Some(user),
                Ok(_) => None,
                Err(e) => {
                    warn!(error = %e, path = ?path, "Ignoring unreadable session file");
                    None
                }
            }
        };
        Ok(Self { path, user })
    }

    /// Open the session in the platform config directory
    pub fn open_default() -> Result<Self> {
        Self::open(get_or_create_config_dir()?.join(SESSION_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn current(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.is_authenticated)
    }

    /// Sign in; both fields must be non-blank
    pub fn login(&mut self, username: &str, password: &str) -> Result<User> {
        let username = username.trim();
        if username.is_empty() || password.trim().is_empty() {
            return Err(Error::Auth {
                message: "Please enter both username and password".to_string(),
            });
        }

        let user = User {
            username: username.to_string(),
            is_authenticated: true,
            signed_in_at: Some(Utc::now()),
        };
        std::fs::write(&self.path, serde_json::to_string_pretty(&user)?)?;
        info!(username = %user.username, "Signed in");
        self.user = Some(user.clone());
        Ok(user)
    }

    /// Sign out and forget the stored session
    pub fn logout(&mut self) -> Result<()> {
        if let Some(user) = self.user.take() {
            info!(username = %user.username, "Signed out");
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(dir: &tempfile::TempDir) -> SessionStore {
        SessionStore::open(dir.path().join(SESSION_FILE)).expect("open")
    }

    #[test]
    fn test_login_persists_across_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut session = store(&dir);
        assert!(!session.is_authenticated());

        let user = session.login("  rick ", "wubba").expect("login");
        assert_eq!(user.username, "rick");

        let reopened = store(&dir);
        assert!(reopened.is_authenticated());
        assert_eq!(reopened.current().map(|u| u.username.as_str()), Some("rick"));
    }

    #[test]
    fn test_login_requires_both_fields() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut session = store(&dir);

        let err = session.login("rick", "  ").expect_err("rejected");
        assert_eq!(err.to_string(), "Please enter both username and password");
        assert!(session.login("", "secret").is_err());
        assert!(!session.is_authenticated());
        assert!(!session.path().exists());
    }

    #[test]
    fn test_logout_clears_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut session = store(&dir);
        session.login("morty", "aw-jeez").expect("login");

        session.logout().expect("logout");
        assert!(!session.is_authenticated());
        assert!(!session.path().exists());

        // Second logout with no file is fine
        session.logout().expect("logout again");
    }

    #[test]
    fn test_corrupt_file_means_signed_out() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(SESSION_FILE), "{not json").expect("write");
        assert!(!store(&dir).is_authenticated());
    }

    #[test]
    fn test_reads_stored_shape() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join(SESSION_FILE),
            r#"{"username":"summer","isAuthenticated":true}"#,
        )
        .expect("write");
        let session = store(&dir);
        assert_eq!(session.current().map(|u| u.signed_in_at), Some(None));
        assert!(session.is_authenticated());
    }
}
