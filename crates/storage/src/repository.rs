use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Keys of the persisted app-shell state.
///
/// The string forms are shared with the web client, so existing exports can
/// be imported as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKey {
    User,
    Progress,
    Bookmarks,
    Token,
}

impl StateKey {
    pub const ALL: [StateKey; 4] = [Self::User, Self::Progress, Self::Bookmarks, Self::Token];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "amazon_sde_user",
            Self::Progress => "amazon_sde_progress",
            Self::Bookmarks => "amazon_sde_bookmarks",
            Self::Token => "token",
        }
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key/value store for serialized app-shell state.
///
/// Values are opaque strings (JSON for maps and profiles, raw text for the
/// token); interpretation belongs to the services layer.
#[async_trait]
pub trait StateRepository: Send + Sync {
    /// Fetch the stored value for a key.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn load(&self, key: StateKey) -> Result<Option<String>, StorageError>;

    /// Insert or replace the value for a key.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be stored.
    async fn save(&self, key: StateKey, value: &str) -> Result<(), StorageError>;

    /// Remove a key. Missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn remove(&self, key: StateKey) -> Result<(), StorageError>;

    /// Remove every key.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn clear(&self) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    values: Arc<Mutex<HashMap<StateKey, String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<StateKey, String>>, StorageError> {
        self.values
            .lock()
            .map_err(|_| StorageError::Connection("poisoned lock".into()))
    }
}

#[async_trait]
impl StateRepository for InMemoryRepository {
    async fn load(&self, key: StateKey) -> Result<Option<String>, StorageError> {
        Ok(self.lock()?.get(&key).cloned())
    }

    async fn save(&self, key: StateKey, value: &str) -> Result<(), StorageError> {
        self.lock()?.insert(key, value.to_owned());
        Ok(())
    }

    async fn remove(&self, key: StateKey) -> Result<(), StorageError> {
        self.lock()?.remove(&key);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.lock()?.clear();
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub state: Arc<dyn StateRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let state: Arc<dyn StateRepository> = Arc::new(InMemoryRepository::new());
        Self { state }
    }
}
