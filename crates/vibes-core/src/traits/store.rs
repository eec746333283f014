//! Persisted credential store trait.

use std::fmt;

use async_trait::async_trait;

use crate::Result;

/// Keys the client reads and writes in the credential store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialKey {
    AccessToken,
    RefreshToken,
}

impl CredentialKey {
    /// Every key, in the order they are cleared on logout.
    pub const ALL: [CredentialKey; 2] = [CredentialKey::AccessToken, CredentialKey::RefreshToken];

    /// Returns the storage key name.
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialKey::AccessToken => "accessToken",
            CredentialKey::RefreshToken => "refreshToken",
        }
    }
}

impl fmt::Display for CredentialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A key-value store holding the persisted session credentials.
///
/// Implementations must tolerate concurrent writers: when two refresh flows
/// race, the last `set` wins and no partially written value is observable.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Read a value, `None` if absent.
    async fn get(&self, key: CredentialKey) -> Result<Option<String>>;

    /// Write a value, replacing any previous one.
    async fn set(&self, key: CredentialKey, value: &str) -> Result<()>;

    /// Remove a value. Removing an absent key is not an error.
    async fn remove(&self, key: CredentialKey) -> Result<()>;

    /// Remove both tokens.
    async fn clear(&self) -> Result<()> {
        for key in CredentialKey::ALL {
            self.remove(key).await?;
        }
        Ok(())
    }
}
