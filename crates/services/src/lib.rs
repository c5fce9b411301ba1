#![forbid(unsafe_code)]

pub mod api_client;
pub mod app_services;
pub mod chat;
pub mod config;
pub mod error;
pub mod progress_service;
mod state_store;
pub mod user_service;

pub use prep_core::Clock;

pub use api_client::{ApiClient, AuthApi, AuthResponse, RegisterRequest, RemoteSync, RemoteUser};
pub use app_services::AppServices;
pub use config::ApiConfig;
pub use error::{
    ApiError, AppServicesError, ChatError, ConfigError, ProgressServiceError, UserServiceError,
};
pub use progress_service::{ProgressService, SyncTask};
pub use user_service::{RegistrationDraft, UserService};
