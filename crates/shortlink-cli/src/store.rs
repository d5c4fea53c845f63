//! File-backed credential store.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use shortlink_core::{CredentialStore, TokenSet};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// On-disk form of the credential triple.
#[derive(Serialize, Deserialize)]
struct StoredCredentials {
    access_token: String,
    refresh_token: String,
    user_id: String,
    saved_at: DateTime<Utc>,
}

/// Keeps the credential triple in a JSON file, with an in-memory copy.
///
/// The file is replaced through a temporary sibling and a rename, so the
/// three fields are always written together. A file that cannot be read or
/// holds an incomplete triple counts as no session.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    cached: RwLock<Option<TokenSet>>,
}

impl FileStore {
    /// Open the store at `path`, or in the per-user data directory.
    pub fn open(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => default_path()?,
        };

        let cached = load(&path);
        debug!(path = %path.display(), authenticated = cached.is_some(), "credential store opened");

        Ok(Self {
            path,
            cached: RwLock::new(cached),
        })
    }

    fn persist(&self, tokens: &TokenSet) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let stored = StoredCredentials {
            access_token: tokens.access_token().as_str().to_string(),
            refresh_token: tokens.refresh_token().as_str().to_string(),
            user_id: tokens.user_id().as_str().to_string(),
            saved_at: Utc::now(),
        };
        let json = serde_json::to_string_pretty(&stored)?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;

        #[cfg(unix)]
        fs::set_permissions(&tmp, fs::Permissions::from_mode(0o600))?;

        fs::rename(&tmp, &self.path)
    }

    fn remove_file(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "credential file removed"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), error = %e, "failed to remove credential file"),
        }
    }
}

impl CredentialStore for FileStore {
    fn get(&self) -> Option<TokenSet> {
        self.cached
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set(&self, tokens: TokenSet) {
        let mut cached = self.cached.write().unwrap_or_else(PoisonError::into_inner);
        match self.persist(&tokens) {
            Ok(()) => *cached = Some(tokens),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to save credentials, signing out");
                *cached = None;
                self.remove_file();
            }
        }
    }

    fn clear(&self) {
        let mut cached = self.cached.write().unwrap_or_else(PoisonError::into_inner);
        *cached = None;
        self.remove_file();
    }
}

fn default_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "shortlink").context("Could not determine data directory")?;
    Ok(dirs.data_dir().join("credentials.json"))
}

fn load(path: &Path) -> Option<TokenSet> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read credential file");
            return None;
        }
    };

    let stored: StoredCredentials = match serde_json::from_str(&json) {
        Ok(stored) => stored,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unreadable credential file");
            return None;
        }
    };

    match TokenSet::new(stored.access_token, stored.refresh_token, stored.user_id) {
        Ok(tokens) => {
            debug!(saved_at = %stored.saved_at, "loaded stored credentials");
            Some(tokens)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring incomplete credential file");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tokens(access: &str) -> TokenSet {
        TokenSet::new(access, "R", "7").unwrap()
    }

    #[test]
    fn credentials_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("credentials.json");

        let store = FileStore::open(Some(path.clone())).unwrap();
        assert!(store.get().is_none());
        store.set(tokens("Bearer X"));

        let reopened = FileStore::open(Some(path)).unwrap();
        let loaded = reopened.get().unwrap();
        assert_eq!(loaded.access_token().as_str(), "Bearer X");
        assert_eq!(loaded.refresh_token().as_str(), "R");
        assert_eq!(loaded.user_id().as_str(), "7");
    }

    #[cfg(unix)]
    #[test]
    fn credential_file_is_private() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.json");

        FileStore::open(Some(path.clone()))
            .unwrap()
            .set(tokens("Bearer X"));

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn clear_removes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.json");

        let store = FileStore::open(Some(path.clone())).unwrap();
        store.set(tokens("Bearer X"));
        assert!(path.exists());

        store.clear();
        assert!(!path.exists());
        assert!(!store.is_authenticated());

        store.clear();
    }

    #[test]
    fn corrupt_file_is_no_session() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.json");
        fs::write(&path, "{not json").unwrap();

        assert!(FileStore::open(Some(path)).unwrap().get().is_none());
    }

    #[test]
    fn incomplete_file_is_no_session() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.json");
        fs::write(
            &path,
            r#"{"access_token":"Bearer X","refresh_token":"","user_id":"7","saved_at":"2026-01-01T00:00:00Z"}"#,
        )
        .unwrap();

        assert!(FileStore::open(Some(path)).unwrap().get().is_none());
    }

    #[test]
    fn failed_save_signs_out() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        // The parent "directory" is a regular file, so nothing can be written.
        let store = FileStore::open(Some(blocker.join("credentials.json"))).unwrap();
        store.set(tokens("Bearer X"));

        assert!(store.get().is_none());
    }
}
