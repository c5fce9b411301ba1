use std::sync::Arc;

use chrono::NaiveDate;
use prep_core::Clock;
use prep_core::model::{
    BookmarkMap, ExperienceLevel, ProgressMap, UserSettings, UserSettingsDraft, parse_target_date,
};
use storage::repository::{StateKey, StateRepository};

use crate::api_client::{AuthApi, AuthResponse, RegisterRequest, RemoteUser};
use crate::error::UserServiceError;
use crate::progress_service::ProgressService;
use crate::state_store::{decode_topic_map, load_json, save_json};

/// Account form input for registration.
#[derive(Clone, Debug, Default)]
pub struct RegistrationDraft {
    pub email: String,
    pub password: String,
    pub profile: UserSettingsDraft,
}

/// Profile persistence and the sign-in session.
#[derive(Clone)]
pub struct UserService {
    state: Arc<dyn StateRepository>,
    auth: Arc<dyn AuthApi>,
    progress: Arc<ProgressService>,
    clock: Clock,
}

impl UserService {
    #[must_use]
    pub fn new(
        state: Arc<dyn StateRepository>,
        auth: Arc<dyn AuthApi>,
        progress: Arc<ProgressService>,
    ) -> Self {
        Self {
            state,
            auth,
            progress,
            clock: Clock::default(),
        }
    }

    /// Clock used when the server profile carries no usable target date.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Returns the stored profile, or `None` before onboarding.
    ///
    /// # Errors
    ///
    /// Returns `UserServiceError::Storage` if the repository cannot be read.
    pub async fn load_user(&self) -> Result<Option<UserSettings>, UserServiceError> {
        Ok(load_json(self.state.as_ref(), StateKey::User).await?)
    }

    /// Validates and stores an offline profile.
    ///
    /// # Errors
    ///
    /// Returns `UserServiceError::Settings` for invalid input and
    /// `UserServiceError::Storage` if the profile cannot be written.
    pub async fn save_local_user(
        &self,
        draft: UserSettingsDraft,
    ) -> Result<UserSettings, UserServiceError> {
        let user = draft.validate()?;
        save_json(self.state.as_ref(), StateKey::User, &user).await?;
        tracing::info!(name = user.name(), "saved local profile");
        Ok(user)
    }

    /// Signs in and adopts the server's profile and progress.
    ///
    /// # Errors
    ///
    /// Returns `UserServiceError::Api` when the backend rejects the request.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserSettings, UserServiceError> {
        let response = self.auth.login(email.trim(), password).await?;
        self.adopt_session(response).await
    }

    /// Creates an account and signs in.
    ///
    /// # Errors
    ///
    /// Returns `UserServiceError::Settings` when the profile is invalid and
    /// `UserServiceError::Api` when the backend rejects the request.
    pub async fn register(
        &self,
        draft: RegistrationDraft,
    ) -> Result<UserSettings, UserServiceError> {
        let profile = draft.profile.validate()?;
        let request = RegisterRequest {
            email: draft.email.trim().to_string(),
            password: draft.password,
            name: profile.name().to_string(),
            target_date: profile.target_date().format("%Y-%m-%d").to_string(),
            experience_level: profile.experience_level().label().to_string(),
        };
        let response = self.auth.register(&request).await?;
        self.adopt_session(response).await
    }

    /// Drops the token and profile. Progress stays on this device.
    ///
    /// # Errors
    ///
    /// Returns `UserServiceError::Storage` if the keys cannot be removed.
    pub async fn logout(&self) -> Result<(), UserServiceError> {
        self.state.remove(StateKey::Token).await?;
        self.state.remove(StateKey::User).await?;
        self.progress.set_token(None);
        tracing::info!("signed out");
        Ok(())
    }

    async fn adopt_session(&self, response: AuthResponse) -> Result<UserSettings, UserServiceError> {
        let user = user_from_remote(&response.user, self.clock.today())?;
        let progress = response
            .progress
            .and_then(|raw| decode_topic_map::<ProgressMap>("remote progress", raw));
        let bookmarks = response
            .bookmarks
            .and_then(|raw| decode_topic_map::<BookmarkMap>("remote bookmarks", raw));
        self.state
            .save(StateKey::Token, &response.access_token)
            .await?;
        save_json(self.state.as_ref(), StateKey::User, &user).await?;
        self.progress.set_token(Some(response.access_token));
        self.progress
            .merge_remote(progress.as_ref(), bookmarks.as_ref())
            .await?;
        tracing::info!(email = user.email().unwrap_or_default(), "signed in");
        Ok(user)
    }
}

/// Builds the local profile from the server's copy.
///
/// The server stores free-form strings, so unknown levels fall back to the
/// default level and unreadable dates fall back to `today`. A blank name
/// falls back to the email address.
fn user_from_remote(remote: &RemoteUser, today: NaiveDate) -> Result<UserSettings, UserServiceError> {
    let experience_level = ExperienceLevel::from_label(remote.experience_level.trim())
        .unwrap_or_else(|err| {
            tracing::warn!(error = %err, "using default experience level");
            ExperienceLevel::default()
        });
    let target_date = remote_target_date(&remote.target_date).unwrap_or_else(|| {
        tracing::warn!(raw = %remote.target_date, "unreadable target date; using today");
        today
    });
    let name = if remote.name.trim().is_empty() {
        remote.email.clone()
    } else {
        remote.name.clone()
    };
    let user = UserSettingsDraft {
        name,
        target_date: target_date.format("%Y-%m-%d").to_string(),
        experience_level,
    }
    .validate()?;
    Ok(user.with_email(remote.email.clone()))
}

/// Accepts `YYYY-MM-DD` alone or as the prefix of an ISO timestamp.
fn remote_target_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    parse_target_date(raw)
        .ok()
        .or_else(|| raw.get(..10).and_then(|prefix| parse_target_date(prefix).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote(name: &str, date: &str, level: &str) -> RemoteUser {
        RemoteUser {
            email: "ada@example.com".into(),
            name: name.into(),
            target_date: date.into(),
            experience_level: level.into(),
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn known_profile_is_taken_verbatim() {
        let user = user_from_remote(&remote("Ada", "2025-03-01", "Intern"), day(2024, 1, 1)).unwrap();
        assert_eq!(user.name(), "Ada");
        assert_eq!(user.target_date(), day(2025, 3, 1));
        assert_eq!(user.experience_level(), ExperienceLevel::Intern);
        assert_eq!(user.email(), Some("ada@example.com"));
    }

    #[test]
    fn free_form_fields_fall_back() {
        let today = day(2024, 1, 1);
        let user = user_from_remote(&remote("", "next spring", "Senior"), today).unwrap();
        assert_eq!(user.name(), "ada@example.com");
        assert_eq!(user.target_date(), today);
        assert_eq!(user.experience_level(), ExperienceLevel::NewGrad);
    }

    #[test]
    fn timestamp_dates_keep_their_day() {
        assert_eq!(remote_target_date("2025-03-01T00:00:00Z"), Some(day(2025, 3, 1)));
        assert_eq!(remote_target_date("03/01/2025"), None);
        assert_eq!(remote_target_date("é"), None);
    }
}
