use std::env;

use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";
pub const DEFAULT_CHAT_URL: &str = "ws://localhost:8000/api/v1/chat/ws";

/// Backend endpoints used for auth, progress sync and chat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    api_url: Url,
    chat_url: Url,
}

impl ApiConfig {
    /// Validates both base urls.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if either value does not parse.
    pub fn new(api_url: &str, chat_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: parse("api", api_url)?,
            chat_url: parse("chat", chat_url)?,
        })
    }

    /// Reads `PREP_API_URL` and `PREP_CHAT_URL`, falling back to the local
    /// development server.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if a variable holds an invalid url.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url = env::var("PREP_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());
        let chat_url = env::var("PREP_CHAT_URL").unwrap_or_else(|_| DEFAULT_CHAT_URL.into());
        Self::new(&api_url, &chat_url)
    }

    /// Replaces the REST base url.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if the value does not parse.
    pub fn with_api_url(mut self, value: &str) -> Result<Self, ConfigError> {
        self.api_url = parse("api", value)?;
        Ok(self)
    }

    /// Replaces the chat socket base url.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if the value does not parse.
    pub fn with_chat_url(mut self, value: &str) -> Result<Self, ConfigError> {
        self.chat_url = parse("chat", value)?;
        Ok(self)
    }

    #[must_use]
    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    #[must_use]
    pub fn chat_url(&self) -> &Url {
        &self.chat_url
    }

    /// REST endpoint below the api base, e.g. `endpoint("auth/login")`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Socket address for one chat session.
    #[must_use]
    pub fn chat_session_url(&self, session_id: &str) -> String {
        format!(
            "{}/{}",
            self.chat_url.as_str().trim_end_matches('/'),
            session_id
        )
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL, DEFAULT_CHAT_URL).expect("default urls should parse")
    }
}

fn parse(name: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value.trim()).map_err(|source| ConfigError::InvalidUrl {
        name,
        value: value.to_string(),
        source,
    })
}
