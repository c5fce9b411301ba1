use std::sync::Arc;

use chrono::NaiveDate;
use prep_core::Catalog;
use services::chat::ChatClient;
use services::{AppServices, Clock, ProgressService, UserService};

/// Services the views need, provided by the composition root.
pub trait UiApp: Send + Sync {
    fn clock(&self) -> Clock;
    fn catalog(&self) -> Arc<Catalog>;
    fn progress(&self) -> Arc<ProgressService>;
    fn users(&self) -> Arc<UserService>;
    fn chat(&self) -> ChatClient;
}

impl UiApp for AppServices {
    fn clock(&self) -> Clock {
        AppServices::clock(self)
    }

    fn catalog(&self) -> Arc<Catalog> {
        AppServices::catalog(self)
    }

    fn progress(&self) -> Arc<ProgressService> {
        AppServices::progress(self)
    }

    fn users(&self) -> Arc<UserService> {
        AppServices::users(self)
    }

    fn chat(&self) -> ChatClient {
        AppServices::chat(self)
    }
}

#[derive(Clone)]
pub struct AppContext {
    clock: Clock,
    catalog: Arc<Catalog>,
    progress: Arc<ProgressService>,
    users: Arc<UserService>,
    chat: ChatClient,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            clock: app.clock(),
            catalog: app.catalog(),
            progress: app.progress(),
            users: app.users(),
            chat: app.chat(),
        }
    }

    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
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

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
