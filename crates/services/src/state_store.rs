//! JSON helpers over the raw key/value state repository.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use prep_core::model::TopicMap;
use storage::repository::{StateKey, StateRepository, StorageError};

/// Loads and decodes a value. Missing keys yield `None`; undecodable values
/// are logged and also yield `None` so the caller falls back to defaults.
pub(crate) async fn load_json<T: DeserializeOwned>(
    repo: &dyn StateRepository,
    key: StateKey,
) -> Result<Option<T>, StorageError> {
    let Some(raw) = repo.load(key).await? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            tracing::warn!(%key, error = %err, "ignoring malformed persisted value");
            Ok(None)
        }
    }
}

/// Loads a topic-keyed map. Bad entries are dropped one by one; only a value
/// that is not a JSON object at all yields `None`.
pub(crate) async fn load_topic_map<T: TopicMap>(
    repo: &dyn StateRepository,
    key: StateKey,
) -> Result<Option<T>, StorageError> {
    let Some(raw) = repo.load(key).await? else {
        return Ok(None);
    };
    match serde_json::from_str::<Value>(&raw) {
        Ok(value) => Ok(decode_topic_map(key.as_str(), value)),
        Err(err) => {
            tracing::warn!(%key, error = %err, "ignoring malformed persisted value");
            Ok(None)
        }
    }
}

/// Decodes a topic map from a JSON value, logging each skipped entry.
pub(crate) fn decode_topic_map<T: TopicMap>(source: &str, value: Value) -> Option<T> {
    let Value::Object(object) = value else {
        tracing::warn!(source, "expected a JSON object of topic entries");
        return None;
    };
    let (map, skipped) = T::from_entries(object);
    for entry in &skipped {
        tracing::warn!(source, key = %entry.key, value = %entry.value, "dropping unreadable entry");
    }
    Some(map)
}

pub(crate) async fn save_json<T: Serialize + Sync>(
    repo: &dyn StateRepository,
    key: StateKey,
    value: &T,
) -> Result<(), StorageError> {
    let raw =
        serde_json::to_string(value).map_err(|err| StorageError::Serialization(err.to_string()))?;
    repo.save(key, &raw).await
}
