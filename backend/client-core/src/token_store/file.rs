//! Durable token store backed by a small key/value JSON file.
//!
//! The file plays the role of browser local storage: one JSON object of
//! string keys to string values. Only the configured key is touched; other
//! entries are preserved across writes.

use crate::error::TokenStoreError;
use crate::token_store::TokenStore;
use crate::APP_DIR_NAME;

use common::{ErrorLocation, RedactedToken};

use std::collections::BTreeMap;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{debug, info};

const STORAGE_FILE_NAME: &str = "storage.json";

/// Owner read/write only; the file holds a bearer token.
#[cfg(unix)]
const STORAGE_FILE_MODE: u32 = 0o600;

pub struct FileTokenStore {
    path: PathBuf,
    key: String,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileTokenStore {
    /// Store the token under `key` in `{data_dir}/storage.json`.
    pub fn new(data_dir: impl AsRef<Path>, key: impl Into<String>) -> Self {
        Self {
            path: data_dir.as_ref().join(STORAGE_FILE_NAME),
            key: key.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Store in the platform data directory (e.g. `~/.local/share/taskmaster`).
    #[track_caller]
    pub fn in_default_dir(key: impl Into<String>) -> Result<Self, TokenStoreError> {
        let data_dir = dirs::data_dir().ok_or_else(|| TokenStoreError::DirectoryNotFound {
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(Self::new(data_dir.join(APP_DIR_NAME), key))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, TokenStoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let contents =
            std::fs::read_to_string(&self.path).map_err(|e| TokenStoreError::ReadError {
                location: ErrorLocation::from(Location::caller()),
                path: self.path.clone(),
                source: e,
            })?;

        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&contents).map_err(|e| TokenStoreError::ParseError {
            location: ErrorLocation::from(Location::caller()),
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    /// Temp file + rename so a crash never leaves a half-written store.
    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), TokenStoreError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| TokenStoreError::WriteError {
                location: ErrorLocation::from(Location::caller()),
                path: dir.to_path_buf(),
                source: e,
            })?;
        }

        let json =
            serde_json::to_string_pretty(entries).map_err(|e| TokenStoreError::SerializeError {
                location: ErrorLocation::from(Location::caller()),
                reason: e.to_string(),
            })?;

        let temp_path = self.path.with_extension("json.tmp");

        write_private(&temp_path, json.as_bytes()).map_err(|e| TokenStoreError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: temp_path.clone(),
            source: e,
        })?;

        std::fs::rename(&temp_path, &self.path).map_err(|e| TokenStoreError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: self.path.clone(),
            source: e,
        })?;

        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ()>, TokenStoreError> {
        self.write_lock
            .lock()
            .map_err(|_| TokenStoreError::Poisoned {
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

/// Write `contents` readable by the owner only. Permissions are reset after
/// writing because `mode` is ignored when a stale file already exists.
#[cfg(unix)]
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    use std::fs::{OpenOptions, Permissions};
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(STORAGE_FILE_MODE)
        .open(path)?;
    file.write_all(contents)?;
    file.set_permissions(Permissions::from_mode(STORAGE_FILE_MODE))
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    std::fs::write(path, contents)
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Result<Option<RedactedToken>, TokenStoreError> {
        let entries = self.read_entries()?;

        Ok(entries
            .get(&self.key)
            .filter(|value| !value.is_empty())
            .map(RedactedToken::new))
    }

    fn set(&self, token: &RedactedToken) -> Result<(), TokenStoreError> {
        let _guard = self.lock()?;

        let mut entries = self.read_entries()?;
        entries.insert(self.key.clone(), token.as_str().to_string());
        self.write_entries(&entries)?;

        info!(
            "Stored token under '{}' in {} ({} chars)",
            self.key,
            self.path.display(),
            token.len()
        );
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        let _guard = self.lock()?;

        let mut entries = self.read_entries()?;
        if entries.remove(&self.key).is_none() {
            debug!("No token under '{}', nothing to clear", self.key);
            return Ok(());
        }
        self.write_entries(&entries)?;

        info!("Cleared token '{}' from {}", self.key, self.path.display());
        Ok(())
    }
}
