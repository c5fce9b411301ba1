use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};

use prep_core::model::TopicId;

use crate::config::ApiConfig;
use crate::error::ApiError;

/// Push side of the progress mirror.
///
/// Only success versus failure is observed; response bodies are ignored.
#[async_trait]
pub trait RemoteSync: Send + Sync {
    /// Report a completion flag change.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the server rejects it.
    async fn sync_progress(
        &self,
        token: Option<&str>,
        topic: &TopicId,
        completed: bool,
    ) -> Result<(), ApiError>;

    /// Report a guide bookmark change.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the server rejects it.
    async fn sync_bookmark(
        &self,
        token: Option<&str>,
        topic: &TopicId,
        page_index: u32,
    ) -> Result<(), ApiError>;
}

/// Login and registration endpoints.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// # Errors
    ///
    /// Returns `ApiError::Rejected` with the server's message on non-2xx.
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError::Rejected` with the server's message on non-2xx.
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError>;
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub target_date: String,
    pub experience_level: String,
}

#[derive(Debug, Serialize)]
struct ProgressSyncRequest<'a> {
    topic_id: &'a str,
    completed: bool,
}

#[derive(Debug, Serialize)]
struct BookmarkSyncRequest<'a> {
    topic_id: &'a str,
    page_index: u32,
}

/// Profile as returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteUser {
    pub email: String,
    pub name: String,
    pub target_date: String,
    pub experience_level: String,
}

/// Auth payload. The progress and bookmark maps stay raw JSON here so one
/// unreadable entry cannot fail the whole sign-in; `UserService` decodes them
/// entry by entry.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: RemoteUser,
    #[serde(default)]
    pub progress: Option<serde_json::Value>,
    #[serde(default)]
    pub bookmarks: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// REST client for the study backend.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
}

impl ApiClient {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn post(&self, path: &str, token: Option<&str>) -> RequestBuilder {
        let request = self.client.post(self.config.endpoint(path));
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send_auth<T: Serialize + Sync>(
        &self,
        path: &str,
        body: &T,
        fallback: &str,
    ) -> Result<AuthResponse, ApiError> {
        let response = self.post(path, None).json(body).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Rejected(rejection_message(response, fallback).await));
        }
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|err| ApiError::InvalidPayload(err.to_string()))
    }
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        self.send_auth("auth/login", &LoginRequest { email, password }, "Login failed")
            .await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.send_auth("auth/register", request, "Registration failed")
            .await
    }
}

#[async_trait]
impl RemoteSync for ApiClient {
    async fn sync_progress(
        &self,
        token: Option<&str>,
        topic: &TopicId,
        completed: bool,
    ) -> Result<(), ApiError> {
        let body = ProgressSyncRequest {
            topic_id: topic.as_str(),
            completed,
        };
        let response = self.post("progress/sync", token).json(&body).send().await?;
        ensure_success(&response)
    }

    async fn sync_bookmark(
        &self,
        token: Option<&str>,
        topic: &TopicId,
        page_index: u32,
    ) -> Result<(), ApiError> {
        let body = BookmarkSyncRequest {
            topic_id: topic.as_str(),
            page_index,
        };
        let response = self
            .post("progress/bookmark", token)
            .json(&body)
            .send()
            .await?;
        ensure_success(&response)
    }
}

fn ensure_success(response: &Response) -> Result<(), ApiError> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(ApiError::HttpStatus(response.status()))
    }
}

async fn rejection_message(response: Response, fallback: &str) -> String {
    let Ok(bytes) = response.bytes().await else {
        return fallback.to_string();
    };
    detail_message(&bytes).unwrap_or_else(|| fallback.to_string())
}

/// Extracts the `detail` field of an error body. Validation errors carry a
/// list instead of a string; those are returned as compact JSON.
fn detail_message(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    match parsed.detail? {
        serde_json::Value::String(text) if !text.trim().is_empty() => Some(text),
        serde_json::Value::String(_) | serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}
