//! # Session Store
//!
//! Holds the single admin access token. The presence of a non-empty token is
//! the only authenticated signal; nothing about expiry is tracked locally.

use crate::errors::StorageError;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use tracing::warn;

/// Key the token is persisted under.
pub const TOKEN_STORAGE_KEY: &str = "admin_token";

/// Backend for persisting string values by key.
pub trait TokenStorage {
    /// Reads the value stored under `key`.
    fn read(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns [`StorageError`] when the backend refuses the write.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes the value under `key`. Removing a missing key succeeds.
    ///
    /// # Errors
    /// Returns [`StorageError`] when the backend refuses the removal.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-process storage, used by tests and as a fallback when no persistent
/// backend exists.
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .ok()
            .and_then(|values| values.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self
            .values
            .lock()
            .map_err(|err| StorageError::Write(err.to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut values = self
            .values
            .lock()
            .map_err(|err| StorageError::Write(err.to_string()))?;
        values.remove(key);
        Ok(())
    }
}

/// Process-wide owner of the access token.
///
/// Cloning shares the underlying storage.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn TokenStorage>,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    pub fn new(storage: Arc<dyn TokenStorage>) -> Self {
        Self { storage }
    }

    /// Session backed by [`MemoryTokenStorage`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTokenStorage::new()))
    }

    /// Persists `token`, overwriting any previous one.
    ///
    /// # Errors
    /// Returns [`StorageError`] when the backend refuses the write.
    pub fn set_token(&self, token: &str) -> Result<(), StorageError> {
        self.storage.write(TOKEN_STORAGE_KEY, token)
    }

    /// Current token, if any.
    pub fn token(&self) -> Option<String> {
        self.storage.read(TOKEN_STORAGE_KEY)
    }

    /// Removes the token. Never fails the caller; storage problems are logged.
    pub fn clear_token(&self) {
        if let Err(err) = self.storage.remove(TOKEN_STORAGE_KEY) {
            warn!(error = %err, "failed to clear admin token");
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some_and(|token| !token.is_empty())
    }
}
