use dioxus::prelude::*;
use prep_core::model::{BookmarkMap, ProgressMap, TopicId, UserSettings};

use crate::context::AppContext;

/// Reactive mirror of the app shell: signed-in profile plus the progress and
/// bookmark snapshots held by `ProgressService`.
#[derive(Clone, Copy, PartialEq)]
pub struct ShellState {
    pub user: Signal<Option<UserSettings>>,
    pub progress: Signal<ProgressMap>,
    pub bookmarks: Signal<BookmarkMap>,
}

impl ShellState {
    /// Must run inside a component scope.
    #[must_use]
    pub fn new(ctx: &AppContext, user: Option<UserSettings>) -> Self {
        let service = ctx.progress();
        Self {
            user: Signal::new(user),
            progress: Signal::new(service.progress()),
            bookmarks: Signal::new(service.bookmarks()),
        }
    }

    /// Re-reads the service snapshots.
    pub fn refresh(mut self, ctx: &AppContext) {
        let service = ctx.progress();
        self.progress.set(service.progress());
        self.bookmarks.set(service.bookmarks());
    }

    pub fn sign_in(mut self, ctx: &AppContext, user: UserSettings) {
        self.user.set(Some(user));
        self.refresh(ctx);
    }

    pub fn toggle_complete(self, ctx: &AppContext, topic: TopicId) {
        let ctx = ctx.clone();
        spawn(async move {
            if let Err(err) = ctx.progress().toggle_complete(&topic).await {
                tracing::warn!(topic = %topic, error = %err, "progress not saved");
            }
            self.refresh(&ctx);
        });
    }

    pub fn mark_complete(self, ctx: &AppContext, topic: TopicId) {
        let ctx = ctx.clone();
        spawn(async move {
            if let Err(err) = ctx.progress().set_completed(&topic, true).await {
                tracing::warn!(topic = %topic, error = %err, "progress not saved");
            }
            self.refresh(&ctx);
        });
    }

    pub fn update_bookmark(self, ctx: &AppContext, topic: TopicId, page: usize) {
        let ctx = ctx.clone();
        let page_index = u32::try_from(page).unwrap_or(u32::MAX);
        spawn(async move {
            if let Err(err) = ctx.progress().update_bookmark(&topic, page_index).await {
                tracing::warn!(topic = %topic, error = %err, "bookmark not saved");
            }
            self.refresh(&ctx);
        });
    }

    pub fn sign_out(mut self, ctx: &AppContext) {
        let users = ctx.users();
        spawn(async move {
            if let Err(err) = users.logout().await {
                tracing::warn!(error = %err, "sign-out did not clear storage");
            }
            self.user.set(None);
        });
    }
}
