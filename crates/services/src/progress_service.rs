use std::sync::{Arc, Mutex, MutexGuard};

use tokio::runtime::Handle;
use tokio::sync::Mutex as AsyncMutex;
use tokio::task::JoinHandle;

use prep_core::model::{BookmarkMap, ProgressMap, TopicId};
use storage::repository::{StateKey, StateRepository};

use crate::api_client::RemoteSync;
use crate::error::ProgressServiceError;
use crate::state_store::{load_topic_map, save_json};

/// Handle to a fire-and-forget sync request.
///
/// Dropping it leaves the request running; tests await it to observe the
/// remote call deterministically.
#[derive(Debug)]
pub struct SyncTask(Option<JoinHandle<()>>);

impl SyncTask {
    #[must_use]
    pub fn is_dispatched(&self) -> bool {
        self.0.is_some()
    }

    /// Waits for the remote call to settle. Failures were already logged.
    pub async fn finished(self) {
        if let Some(handle) = self.0 {
            let _ = handle.await;
        }
    }
}

#[derive(Default)]
struct Snapshot {
    progress: ProgressMap,
    bookmarks: BookmarkMap,
    token: Option<String>,
}

/// Owns completion flags and guide bookmarks.
///
/// Every mutation is written to the local repository first and then mirrored
/// to the backend without waiting for it. A failed mirror never rolls back
/// local state.
///
/// Mutations hold `writes` from the in-memory change until the local save
/// returns, so saves land in the order the changes were made.
pub struct ProgressService {
    state: Arc<dyn StateRepository>,
    remote: Arc<dyn RemoteSync>,
    snapshot: Mutex<Snapshot>,
    writes: AsyncMutex<()>,
}

impl ProgressService {
    #[must_use]
    pub fn new(state: Arc<dyn StateRepository>, remote: Arc<dyn RemoteSync>) -> Self {
        Self {
            state,
            remote,
            snapshot: Mutex::new(Snapshot::default()),
            writes: AsyncMutex::new(()),
        }
    }

    fn snapshot(&self) -> MutexGuard<'_, Snapshot> {
        self.snapshot
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Loads persisted progress, bookmarks and the bearer token.
    ///
    /// Missing or malformed values start empty. Unreadable entries inside an
    /// otherwise valid map are dropped one by one.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the repository cannot be read.
    pub async fn hydrate(&self) -> Result<(), ProgressServiceError> {
        let _writes = self.writes.lock().await;
        let progress: ProgressMap = load_topic_map(self.state.as_ref(), StateKey::Progress)
            .await?
            .unwrap_or_default();
        let bookmarks: BookmarkMap = load_topic_map(self.state.as_ref(), StateKey::Bookmarks)
            .await?
            .unwrap_or_default();
        let token = self
            .state
            .load(StateKey::Token)
            .await?
            .filter(|token| !token.trim().is_empty());

        tracing::info!(
            completed = progress.completed_count(),
            bookmarks = bookmarks.len(),
            signed_in = token.is_some(),
            "hydrated progress"
        );

        let mut snapshot = self.snapshot();
        snapshot.progress = progress;
        snapshot.bookmarks = bookmarks;
        snapshot.token = token;
        Ok(())
    }

    #[must_use]
    pub fn progress(&self) -> ProgressMap {
        self.snapshot().progress.clone()
    }

    #[must_use]
    pub fn bookmarks(&self) -> BookmarkMap {
        self.snapshot().bookmarks.clone()
    }

    #[must_use]
    pub fn bookmark(&self, topic: &TopicId) -> i64 {
        self.snapshot().bookmarks.get(topic)
    }

    #[must_use]
    pub fn is_complete(&self, topic: &TopicId) -> bool {
        self.snapshot().progress.is_complete(topic)
    }

    /// Token attached to sync calls.
    pub fn set_token(&self, token: Option<String>) {
        self.snapshot().token = token;
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.snapshot().token.clone()
    }

    /// Flips completion for a topic and returns the new flag.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the local write fails. The
    /// in-memory flag keeps its new value and no sync is sent.
    pub async fn toggle_complete(
        &self,
        topic: &TopicId,
    ) -> Result<(bool, SyncTask), ProgressServiceError> {
        let _writes = self.writes.lock().await;
        let (completed, progress) = {
            let mut snapshot = self.snapshot();
            let completed = snapshot.progress.toggle(topic);
            (completed, snapshot.progress.clone())
        };
        save_json(self.state.as_ref(), StateKey::Progress, &progress).await?;
        tracing::debug!(topic = %topic, completed, "progress toggled");
        Ok((completed, self.dispatch_progress(topic.clone(), completed)))
    }

    /// Sets completion explicitly.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the local write fails.
    pub async fn set_completed(
        &self,
        topic: &TopicId,
        completed: bool,
    ) -> Result<SyncTask, ProgressServiceError> {
        let _writes = self.writes.lock().await;
        let progress = {
            let mut snapshot = self.snapshot();
            snapshot.progress.set(topic.clone(), completed);
            snapshot.progress.clone()
        };
        save_json(self.state.as_ref(), StateKey::Progress, &progress).await?;
        Ok(self.dispatch_progress(topic.clone(), completed))
    }

    /// Stores the resume page for a guide.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the local write fails.
    pub async fn update_bookmark(
        &self,
        topic: &TopicId,
        page_index: u32,
    ) -> Result<SyncTask, ProgressServiceError> {
        let _writes = self.writes.lock().await;
        let bookmarks = {
            let mut snapshot = self.snapshot();
            snapshot.bookmarks.set(topic.clone(), i64::from(page_index));
            snapshot.bookmarks.clone()
        };
        save_json(self.state.as_ref(), StateKey::Bookmarks, &bookmarks).await?;
        tracing::debug!(topic = %topic, page_index, "bookmark updated");
        Ok(self.dispatch_bookmark(topic.clone(), page_index))
    }

    /// Applies server state on sign-in; server entries win key by key.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the local write fails.
    pub async fn merge_remote(
        &self,
        progress: Option<&ProgressMap>,
        bookmarks: Option<&BookmarkMap>,
    ) -> Result<(), ProgressServiceError> {
        let _writes = self.writes.lock().await;
        let (merged_progress, merged_bookmarks) = {
            let mut snapshot = self.snapshot();
            if let Some(progress) = progress {
                snapshot.progress.merge(progress);
            }
            if let Some(bookmarks) = bookmarks {
                snapshot.bookmarks.merge(bookmarks);
            }
            (snapshot.progress.clone(), snapshot.bookmarks.clone())
        };
        if progress.is_some() {
            save_json(self.state.as_ref(), StateKey::Progress, &merged_progress).await?;
        }
        if bookmarks.is_some() {
            save_json(self.state.as_ref(), StateKey::Bookmarks, &merged_bookmarks).await?;
        }
        Ok(())
    }

    /// Forgets progress and bookmarks locally and in the repository.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the keys cannot be removed.
    pub async fn clear(&self) -> Result<(), ProgressServiceError> {
        let _writes = self.writes.lock().await;
        {
            let mut snapshot = self.snapshot();
            snapshot.progress = ProgressMap::new();
            snapshot.bookmarks = BookmarkMap::new();
        }
        self.state.remove(StateKey::Progress).await?;
        self.state.remove(StateKey::Bookmarks).await?;
        Ok(())
    }

    fn dispatch_progress(&self, topic: TopicId, completed: bool) -> SyncTask {
        let remote = Arc::clone(&self.remote);
        let token = self.token();
        spawn_sync(async move {
            if let Err(err) = remote
                .sync_progress(token.as_deref(), &topic, completed)
                .await
            {
                tracing::warn!(topic = %topic, error = %err, "progress sync failed");
            }
        })
    }

    fn dispatch_bookmark(&self, topic: TopicId, page_index: u32) -> SyncTask {
        let remote = Arc::clone(&self.remote);
        let token = self.token();
        spawn_sync(async move {
            if let Err(err) = remote
                .sync_bookmark(token.as_deref(), &topic, page_index)
                .await
            {
                tracing::warn!(topic = %topic, error = %err, "bookmark sync failed");
            }
        })
    }
}

fn spawn_sync<F>(future: F) -> SyncTask
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    match Handle::try_current() {
        Ok(handle) => SyncTask(Some(handle.spawn(future))),
        Err(_) => {
            tracing::warn!("no async runtime available; skipping remote sync");
            SyncTask(None)
        }
    }
}
