use std::sync::{Arc, Mutex};

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use prep_core::model::{BookmarkMap, ProgressMap, TopicId};
use services::{ApiError, ProgressService, ProgressServiceError, RemoteSync};
use storage::repository::{InMemoryRepository, StateKey, StateRepository, StorageError};
use tokio::sync::Notify;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Progress { topic: String, completed: bool, token: Option<String> },
    Bookmark { topic: String, page_index: u32 },
}

#[derive(Default)]
struct RecordingRemote {
    calls: Mutex<Vec<Call>>,
    fail: bool,
}

impl RecordingRemote {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn outcome(&self) -> Result<(), ApiError> {
        if self.fail {
            Err(ApiError::Rejected("service unavailable".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RemoteSync for RecordingRemote {
    async fn sync_progress(
        &self,
        token: Option<&str>,
        topic: &TopicId,
        completed: bool,
    ) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(Call::Progress {
            topic: topic.to_string(),
            completed,
            token: token.map(str::to_string),
        });
        self.outcome()
    }

    async fn sync_bookmark(
        &self,
        _token: Option<&str>,
        topic: &TopicId,
        page_index: u32,
    ) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(Call::Bookmark {
            topic: topic.to_string(),
            page_index,
        });
        self.outcome()
    }
}

struct BrokenRepository;

#[async_trait]
impl StateRepository for BrokenRepository {
    async fn load(&self, _key: StateKey) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    async fn save(&self, _key: StateKey, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Connection("disk full".into()))
    }

    async fn remove(&self, _key: StateKey) -> Result<(), StorageError> {
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        Ok(())
    }
}

/// Holds the first save until released; later saves go straight through.
#[derive(Default)]
struct GatedRepository {
    inner: InMemoryRepository,
    first_seen: AtomicBool,
    entered: Notify,
    release: Notify,
}

#[async_trait]
impl StateRepository for GatedRepository {
    async fn load(&self, key: StateKey) -> Result<Option<String>, StorageError> {
        self.inner.load(key).await
    }

    async fn save(&self, key: StateKey, value: &str) -> Result<(), StorageError> {
        if !self.first_seen.swap(true, Ordering::SeqCst) {
            self.entered.notify_one();
            self.release.notified().await;
        }
        self.inner.save(key, value).await
    }

    async fn remove(&self, key: StateKey) -> Result<(), StorageError> {
        self.inner.remove(key).await
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.inner.clear().await
    }
}

fn topic(id: &str) -> TopicId {
    id.parse().unwrap()
}

#[tokio::test]
async fn toggle_persists_locally_then_syncs() {
    let repo = Arc::new(InMemoryRepository::new());
    let remote = Arc::new(RecordingRemote::default());
    let service = ProgressService::new(repo.clone(), remote.clone());

    let (completed, sync) = service.toggle_complete(&topic("dsa-window")).await.unwrap();
    assert!(completed);
    assert!(sync.is_dispatched());
    sync.finished().await;

    let stored = repo.load(StateKey::Progress).await.unwrap().unwrap();
    assert_eq!(stored, r#"{"dsa-window":true}"#);
    assert_eq!(
        remote.calls(),
        vec![Call::Progress {
            topic: "dsa-window".into(),
            completed: true,
            token: None,
        }]
    );
}

#[tokio::test]
async fn remote_failure_keeps_local_state() {
    let repo = Arc::new(InMemoryRepository::new());
    let remote = Arc::new(RecordingRemote::failing());
    let service = ProgressService::new(repo.clone(), remote.clone());

    let sync = service
        .update_bookmark(&topic("lld-solid"), 3)
        .await
        .unwrap();
    sync.finished().await;

    assert_eq!(remote.calls().len(), 1);
    assert_eq!(service.bookmark(&topic("lld-solid")), 3);

    let reloaded = ProgressService::new(repo, Arc::new(RecordingRemote::default()));
    reloaded.hydrate().await.unwrap();
    assert_eq!(reloaded.bookmark(&topic("lld-solid")), 3);
}

#[tokio::test]
async fn local_write_failure_is_reported_without_sync() {
    let remote = Arc::new(RecordingRemote::default());
    let service = ProgressService::new(Arc::new(BrokenRepository), remote.clone());

    let err = service
        .toggle_complete(&topic("dsa-arrays"))
        .await
        .unwrap_err();
    assert!(matches!(err, ProgressServiceError::Storage(_)));
    assert!(service.is_complete(&topic("dsa-arrays")));
    assert!(remote.calls().is_empty());
}

#[tokio::test]
async fn malformed_storage_hydrates_as_empty() {
    let repo = Arc::new(InMemoryRepository::new());
    repo.save(StateKey::Progress, "[1, 2").await.unwrap();
    repo.save(StateKey::Bookmarks, r#"{"dsa-window":"two"}"#)
        .await
        .unwrap();
    repo.save(StateKey::Token, "tok-1").await.unwrap();

    let service = ProgressService::new(repo, Arc::new(RecordingRemote::default()));
    service.hydrate().await.unwrap();

    assert!(service.progress().is_empty());
    assert!(service.bookmarks().is_empty());
    assert_eq!(service.token().as_deref(), Some("tok-1"));
}

#[tokio::test]
async fn sync_carries_bearer_token() {
    let remote = Arc::new(RecordingRemote::default());
    let service = ProgressService::new(Arc::new(InMemoryRepository::new()), remote.clone());
    service.set_token(Some("tok-2".into()));

    service
        .set_completed(&topic("dsa-dp"), true)
        .await
        .unwrap()
        .finished()
        .await;

    assert_eq!(
        remote.calls(),
        vec![Call::Progress {
            topic: "dsa-dp".into(),
            completed: true,
            token: Some("tok-2".into()),
        }]
    );
}

#[tokio::test]
async fn merge_remote_overwrites_and_clear_forgets() {
    let repo = Arc::new(InMemoryRepository::new());
    let service = ProgressService::new(repo.clone(), Arc::new(RecordingRemote::default()));
    service.update_bookmark(&topic("dsa-window"), 1).await.unwrap();
    service.set_completed(&topic("dsa-arrays"), true).await.unwrap();

    let progress: ProgressMap = [(topic("dsa-arrays"), false), (topic("dsa-heaps"), true)]
        .into_iter()
        .collect();
    let bookmarks: BookmarkMap = [(topic("dsa-window"), 4)].into_iter().collect();
    service
        .merge_remote(Some(&progress), Some(&bookmarks))
        .await
        .unwrap();

    assert!(!service.is_complete(&topic("dsa-arrays")));
    assert!(service.is_complete(&topic("dsa-heaps")));
    assert_eq!(service.bookmark(&topic("dsa-window")), 4);

    service.clear().await.unwrap();
    assert!(service.progress().is_empty());
    assert_eq!(repo.load(StateKey::Progress).await.unwrap(), None);
    assert_eq!(repo.load(StateKey::Bookmarks).await.unwrap(), None);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn overlapping_bookmarks_persist_in_call_order() {
    let repo = Arc::new(GatedRepository::default());
    let service = Arc::new(ProgressService::new(
        repo.clone(),
        Arc::new(RecordingRemote::default()),
    ));

    let first = tokio::spawn({
        let service = Arc::clone(&service);
        async move { service.update_bookmark(&topic("dsa-window"), 1).await }
    });
    repo.entered.notified().await;

    let second = tokio::spawn({
        let service = Arc::clone(&service);
        async move { service.update_bookmark(&topic("dsa-window"), 2).await }
    });
    tokio::time::sleep(Duration::from_millis(50)).await;
    repo.release.notify_one();

    first.await.unwrap().unwrap();
    second.await.unwrap().unwrap();

    assert_eq!(service.bookmark(&topic("dsa-window")), 2);
    assert_eq!(
        repo.load(StateKey::Bookmarks).await.unwrap().as_deref(),
        Some(r#"{"dsa-window":2}"#)
    );
}

#[tokio::test]
async fn hydrate_keeps_valid_bookmarks_next_to_bad_ones() {
    let repo = Arc::new(InMemoryRepository::new());
    repo.save(
        StateKey::Bookmarks,
        r#"{"dsa-arrays":3,"dsa-window":-1,"dsa-heaps":"two"}"#,
    )
    .await
    .unwrap();
    repo.save(StateKey::Progress, r#"{"dsa-arrays":true,"dsa-window":"yes"}"#)
        .await
        .unwrap();

    let service = ProgressService::new(repo, Arc::new(RecordingRemote::default()));
    service.hydrate().await.unwrap();

    assert_eq!(service.bookmark(&topic("dsa-arrays")), 3);
    assert_eq!(service.bookmark(&topic("dsa-window")), -1);
    assert_eq!(service.bookmarks().len(), 2);
    assert!(service.is_complete(&topic("dsa-arrays")));
    assert_eq!(service.progress().completed_count(), 1);
}
