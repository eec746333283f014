//! File-backed credential store.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use directories::ProjectDirs;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::debug;

use vibes_core::error::StoreError;
use vibes_core::{CredentialKey, CredentialStore, Result};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Stored session data.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredCredentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
}

impl StoredCredentials {
    fn slot(&mut self, key: CredentialKey) -> &mut Option<String> {
        match key {
            CredentialKey::AccessToken => &mut self.access_token,
            CredentialKey::RefreshToken => &mut self.refresh_token,
        }
    }
}

/// Credentials persisted as `session.json`.
///
/// Writers serialize on an exclusive lock on `session.json.lock` and replace
/// the file by rename, so readers never observe a half-written token.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store under the platform data directory.
    pub fn default_location() -> anyhow::Result<Self> {
        let dirs = ProjectDirs::from("", "", "vibes")
            .context("Could not determine data directory")?;
        Ok(Self::new(dirs.data_dir().join("session.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("json.lock")
    }

    fn load(&self) -> Result<StoredCredentials> {
        if !self.path.exists() {
            return Ok(StoredCredentials::default());
        }
        let json = fs::read_to_string(&self.path).map_err(map_io)?;
        serde_json::from_str(&json).map_err(|e| {
            StoreError::Corrupt {
                message: format!("{}: {}", self.path.display(), e),
            }
            .into()
        })
    }

    fn lock(&self) -> Result<File> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(map_io)?;
        }
        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path())
            .map_err(map_io)?;
        lock_file.lock_exclusive().map_err(map_io)?;
        Ok(lock_file)
    }

    /// Read-modify-write under the lock.
    fn update(&self, apply: impl FnOnce(&mut StoredCredentials)) -> Result<()> {
        let lock_file = self.lock()?;

        let mut stored = self.load()?;
        apply(&mut stored);

        let json = serde_json::to_string_pretty(&stored).map_err(|e| StoreError::Corrupt {
            message: e.to_string(),
        })?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &json).map_err(map_io)?;

        // Restrict before the rename makes it visible
        #[cfg(unix)]
        {
            let mut perms = fs::metadata(&tmp).map_err(map_io)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&tmp, perms).map_err(map_io)?;
        }

        fs::rename(&tmp, &self.path).map_err(map_io)?;
        lock_file.unlock().map_err(map_io)?;

        debug!(path = %self.path.display(), "credentials written");
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn get(&self, key: CredentialKey) -> Result<Option<String>> {
        let mut stored = self.load()?;
        Ok(stored.slot(key).take())
    }

    async fn set(&self, key: CredentialKey, value: &str) -> Result<()> {
        self.update(|stored| *stored.slot(key) = Some(value.to_string()))
    }

    async fn remove(&self, key: CredentialKey) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        self.update(|stored| *stored.slot(key) = None)
    }
}

fn map_io(e: std::io::Error) -> vibes_core::Error {
    StoreError::Io {
        message: e.to_string(),
    }
    .into()
}
