use prep_core::model::{ExperienceLevel, UserSettingsDraft, UserSettingsError};
use services::{ApiError, RegistrationDraft, UserServiceError};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoginMode {
    #[default]
    SignIn,
    Register,
    Offline,
}

impl LoginMode {
    pub const ALL: [LoginMode; 3] = [Self::SignIn, Self::Register, Self::Offline];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::SignIn => "Sign in",
            Self::Register => "Create account",
            Self::Offline => "Offline",
        }
    }

    #[must_use]
    pub fn submit_label(self) -> &'static str {
        match self {
            Self::SignIn => "SIGN_IN",
            Self::Register => "REGISTER",
            Self::Offline => "INITIALIZE_SYSTEM",
        }
    }

    #[must_use]
    pub fn needs_credentials(self) -> bool {
        !matches!(self, Self::Offline)
    }

    #[must_use]
    pub fn needs_profile(self) -> bool {
        !matches!(self, Self::SignIn)
    }
}

#[must_use]
pub fn experience_option_label(level: ExperienceLevel) -> &'static str {
    match level {
        ExperienceLevel::Intern => "Intern (SDE Intern)",
        ExperienceLevel::NewGrad => "New Grad (SDE-1)",
        ExperienceLevel::Experienced => "Experienced (SDE-1/2)",
    }
}

/// Raw form values shared by all three modes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub name: String,
    pub target_date: String,
    pub experience_level: ExperienceLevel,
}

impl LoginForm {
    /// Every field the mode needs is filled in.
    #[must_use]
    pub fn can_submit(&self, mode: LoginMode) -> bool {
        let credentials = !self.email.trim().is_empty() && !self.password.is_empty();
        let profile = !self.name.trim().is_empty() && !self.target_date.trim().is_empty();
        (!mode.needs_credentials() || credentials) && (!mode.needs_profile() || profile)
    }

    #[must_use]
    pub fn profile(&self) -> UserSettingsDraft {
        UserSettingsDraft {
            name: self.name.clone(),
            target_date: self.target_date.clone(),
            experience_level: self.experience_level,
        }
    }

    #[must_use]
    pub fn registration(&self) -> RegistrationDraft {
        RegistrationDraft {
            email: self.email.clone(),
            password: self.password.clone(),
            profile: self.profile(),
        }
    }
}

/// User-facing text for a failed sign-in, registration or onboarding.
#[must_use]
pub fn auth_error_message(err: &UserServiceError) -> String {
    match err {
        UserServiceError::Api(ApiError::Rejected(detail)) => detail.clone(),
        UserServiceError::Api(_) => "Could not reach the server. Try offline mode.".to_string(),
        UserServiceError::Settings(UserSettingsError::EmptyName) => {
            "Please enter your name.".to_string()
        }
        UserServiceError::Settings(UserSettingsError::InvalidTargetDate(_)) => {
            "Pick a target date (YYYY-MM-DD).".to_string()
        }
        UserServiceError::Settings(_) => "The server sent an unknown profile.".to_string(),
        _ => "Your profile could not be saved.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> LoginForm {
        LoginForm {
            email: "ada@example.com".into(),
            password: "pw".into(),
            name: "Ada".into(),
            target_date: "2025-03-01".into(),
            experience_level: ExperienceLevel::Intern,
        }
    }

    #[test]
    fn submit_requires_fields_for_mode() {
        let mut form = filled();
        form.name.clear();
        assert!(form.can_submit(LoginMode::SignIn));
        assert!(!form.can_submit(LoginMode::Register));
        assert!(!form.can_submit(LoginMode::Offline));

        let mut form = filled();
        form.password.clear();
        assert!(!form.can_submit(LoginMode::SignIn));
        assert!(form.can_submit(LoginMode::Offline));
    }

    #[test]
    fn registration_carries_profile() {
        let draft = filled().registration();
        assert_eq!(draft.email, "ada@example.com");
        assert_eq!(draft.profile.experience_level, ExperienceLevel::Intern);
    }

    #[test]
    fn rejected_detail_is_shown_verbatim() {
        let err = UserServiceError::Api(ApiError::Rejected("Email already registered".into()));
        assert_eq!(auth_error_message(&err), "Email already registered");

        let err = UserServiceError::Settings(UserSettingsError::EmptyName);
        assert_eq!(auth_error_message(&err), "Please enter your name.");
    }
}
