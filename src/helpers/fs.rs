//! File System Utilities
//!
//! Configuration and data directory management.

use crate::constants::{APP_NAME, APP_ORGANIZATION, APP_QUALIFIER};
use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME).ok_or_else(|| Error::Invalid {
        message: "Could not determine project directories".to_string(),
    })
}

/// Get or create the application's configuration directory
///
/// Platform-specific locations:
/// - **Linux**: `~/.config/rm-dashboard/` or `$XDG_CONFIG_HOME/rm-dashboard/`
/// - **macOS**: `~/Library/Application Support/com.rm-dashboard.rm-dashboard/`
/// - **Windows**: `C:\Users\<User>\AppData\Roaming\rm-dashboard\rm-dashboard\config\`
pub fn get_or_create_config_dir() -> Result<PathBuf> {
    ensure_dir(project_dirs()?.config_dir())
}

/// Get or create the data directory (log files)
///
/// - **Linux**: `~/.local/share/rm-dashboard/`
/// - **macOS**: `~/Library/Application Support/com.rm-dashboard.rm-dashboard/`
/// - **Windows**: `C:\Users\<User>\AppData\Roaming\rm-dashboard\rm-dashboard\data\`
pub fn get_or_create_data_dir() -> Result<PathBuf> {
    ensure_dir(project_dirs()?.data_dir())
}

/// Create `dir` and its parents if missing; existing content is left alone
fn ensure_dir(dir: &Path) -> Result<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(dir.to_path_buf())
}

/// Read a file that may not exist yet; missing files read as empty
pub fn read_optional(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_dir_creates_and_keeps_content() {
        let root = tempfile::tempdir().expect("tempdir");
        let dir = root.path().join("config").join("rm-dashboard");

        assert_eq!(ensure_dir(&dir).expect("create"), dir);
        assert!(dir.is_dir());

        fs::write(dir.join("session.json"), "{}").expect("write");
        fs::create_dir(root.path().join(".rm-dashboard")).expect("mkdir");
        ensure_dir(&dir).expect("existing");
        assert!(dir.join("session.json").exists());
        assert!(root.path().join(".rm-dashboard").is_dir());
    }

    #[test]
    fn test_read_optional_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let content = read_optional(&dir.path().join("absent.toml")).expect("read");
        assert!(content.is_empty());
    }
}
