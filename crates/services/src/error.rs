//! Shared error types for the services crate.

use thiserror::Error;

use prep_core::model::UserSettingsError;
use prep_core::CatalogError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `ApiClient`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("{0}")]
    Rejected(String),
    #[error("request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("server returned an unexpected payload: {0}")]
    InvalidPayload(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by the chat connection.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatError {
    #[error("chat url is invalid: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error(transparent)]
    Socket(#[from] tokio_tungstenite::tungstenite::Error),
    #[error(transparent)]
    Encode(#[from] serde_json::Error),
    #[error("chat connection is closed")]
    Closed,
}

/// Errors emitted by configuration loading.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid {name} url `{value}`: {source}")]
    InvalidUrl {
        name: &'static str,
        value: String,
        source: url::ParseError,
    },
}

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `UserService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum UserServiceError {
    #[error(transparent)]
    Settings(#[from] UserSettingsError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Progress(#[from] ProgressServiceError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Progress(#[from] ProgressServiceError),
}
