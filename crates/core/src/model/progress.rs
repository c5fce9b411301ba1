use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::model::TopicId;

/// Entry of a stored or remote topic map that could not be read.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedEntry {
    pub key: String,
    pub value: Value,
}

/// Topic-keyed map decoded one entry at a time.
///
/// A bad key or value drops that entry only; the rest of the map survives.
pub trait TopicMap: Sized {
    fn from_entries(object: Map<String, Value>) -> (Self, Vec<SkippedEntry>);
}

fn partition_entries<V>(
    object: Map<String, Value>,
    read: impl Fn(&Value) -> Option<V>,
) -> (BTreeMap<TopicId, V>, Vec<SkippedEntry>) {
    let mut kept = BTreeMap::new();
    let mut skipped = Vec::new();
    for (key, value) in object {
        match (TopicId::new(key.as_str()), read(&value)) {
            (Ok(topic), Some(parsed)) => {
                kept.insert(topic, parsed);
            }
            _ => skipped.push(SkippedEntry { key, value }),
        }
    }
    (kept, skipped)
}

/// Topic id → completion flag.
///
/// Serialized as a flat JSON object (`{"dsa-window": true}`), the same shape
/// the remote store uses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProgressMap(BTreeMap<TopicId, bool>);

impl ProgressMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_complete(&self, topic: &TopicId) -> bool {
        self.0.get(topic).copied().unwrap_or(false)
    }

    pub fn set(&mut self, topic: TopicId, completed: bool) {
        self.0.insert(topic, completed);
    }

    /// Flip the completion flag and return the new value.
    pub fn toggle(&mut self, topic: &TopicId) -> bool {
        let next = !self.is_complete(topic);
        self.0.insert(topic.clone(), next);
        next
    }

    /// Count of entries marked complete. Entries explicitly set to `false`
    /// are kept but not counted.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.0.values().filter(|done| **done).count()
    }

    /// Completed entries among the given topics.
    pub fn completed_among<'a>(&self, topics: impl IntoIterator<Item = &'a TopicId>) -> usize {
        topics
            .into_iter()
            .filter(|topic| self.is_complete(topic))
            .count()
    }

    /// Overwrites local entries with the given ones, key by key.
    pub fn merge(&mut self, other: &ProgressMap) {
        for (topic, done) in &other.0 {
            self.0.insert(topic.clone(), *done);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TopicId, bool)> {
        self.0.iter().map(|(topic, done)| (topic, *done))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TopicMap for ProgressMap {
    fn from_entries(object: Map<String, Value>) -> (Self, Vec<SkippedEntry>) {
        let (kept, skipped) = partition_entries(object, Value::as_bool);
        (Self(kept), skipped)
    }
}

impl FromIterator<(TopicId, bool)> for ProgressMap {
    fn from_iter<I: IntoIterator<Item = (TopicId, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Topic id → resume page index for multi-page guides.
///
/// Values are raw bookmarks as stored; `N` means "guide finished". Anything
/// outside `[0, N]`, negatives included, is clamped against a concrete page
/// count by [`crate::pagination::ResumePoint`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BookmarkMap(BTreeMap<TopicId, i64>);

impl BookmarkMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored bookmark, or `0` for guides never opened.
    #[must_use]
    pub fn get(&self, topic: &TopicId) -> i64 {
        self.0.get(topic).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn contains(&self, topic: &TopicId) -> bool {
        self.0.contains_key(topic)
    }

    pub fn set(&mut self, topic: TopicId, page_index: i64) {
        self.0.insert(topic, page_index);
    }

    pub fn merge(&mut self, other: &BookmarkMap) {
        for (topic, page) in &other.0 {
            self.0.insert(topic.clone(), *page);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TopicId, i64)> {
        self.0.iter().map(|(topic, page)| (topic, *page))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TopicMap for BookmarkMap {
    fn from_entries(object: Map<String, Value>) -> (Self, Vec<SkippedEntry>) {
        let (kept, skipped) = partition_entries(object, Value::as_i64);
        (Self(kept), skipped)
    }
}

impl FromIterator<(TopicId, i64)> for BookmarkMap {
    fn from_iter<I: IntoIterator<Item = (TopicId, i64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Rounded percentage, `0` when `total` is zero.
#[must_use]
pub fn percent(done: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let value = ((done as f64 / total as f64) * 100.0).round() as u32;
    value.min(100)
}
