use std::sync::Arc;

use prep_core::Catalog;
use storage::repository::Storage;

use crate::api_client::ApiClient;
use crate::chat::ChatClient;
use crate::config::ApiConfig;
use crate::error::AppServicesError;
use crate::progress_service::ProgressService;
use crate::user_service::UserService;
use crate::Clock;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    catalog: Arc<Catalog>,
    progress: Arc<ProgressService>,
    users: Arc<UserService>,
    chat: ChatClient,
}

impl AppServices {
    /// Build services backed by `SQLite` storage and hydrate persisted state.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization, catalog
    /// validation or hydration fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        config: ApiConfig,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::from_storage(storage, clock, config).await
    }

    /// Build services over an existing storage aggregate.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if catalog validation or hydration fails.
    pub async fn from_storage(
        storage: Storage,
        clock: Clock,
        config: ApiConfig,
    ) -> Result<Self, AppServicesError> {
        let catalog = Arc::new(Catalog::embedded()?);
        let api = Arc::new(ApiClient::new(config.clone()));
        let progress = Arc::new(ProgressService::new(
            Arc::clone(&storage.state),
            api.clone(),
        ));
        progress.hydrate().await?;
        let users = Arc::new(UserService::new(
            Arc::clone(&storage.state),
            api,
            Arc::clone(&progress),
        )
        .with_clock(clock));

        Ok(Self {
            clock,
            catalog,
            progress,
            users,
            chat: ChatClient::new(config),
        })
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn users(&self) -> Arc<UserService> {
        Arc::clone(&self.users)
    }

    #[must_use]
    pub fn chat(&self) -> ChatClient {
        self.chat.clone()
    }
}
