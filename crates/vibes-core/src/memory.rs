//! In-memory credential store.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::Result;
use crate::traits::{CredentialKey, CredentialStore};

/// A credential store kept in process memory.
///
/// Useful for tests and for short-lived tools that never persist a session.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    values: RwLock<HashMap<CredentialKey, String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with a session.
    pub fn with_tokens(access_token: Option<&str>, refresh_token: Option<&str>) -> Self {
        let mut values = HashMap::new();
        if let Some(token) = access_token {
            values.insert(CredentialKey::AccessToken, token.to_string());
        }
        if let Some(token) = refresh_token {
            values.insert(CredentialKey::RefreshToken, token.to_string());
        }
        Self {
            values: RwLock::new(values),
        }
    }

    fn read(&self, key: CredentialKey) -> Option<String> {
        let values = self.values.read().unwrap_or_else(|e| e.into_inner());
        values.get(&key).cloned()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get(&self, key: CredentialKey) -> Result<Option<String>> {
        Ok(self.read(key))
    }

    async fn set(&self, key: CredentialKey, value: &str) -> Result<()> {
        let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());
        values.insert(key, value.to_string());
        Ok(())
    }

    async fn remove(&self, key: CredentialKey) -> Result<()> {
        let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());
        values.remove(&key);
        Ok(())
    }
}
