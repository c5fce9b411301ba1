use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UserSettingsError {
    #[error("name cannot be empty")]
    EmptyName,

    #[error("target date must be formatted as YYYY-MM-DD: {0}")]
    InvalidTargetDate(String),

    #[error("unknown experience level: {0}")]
    UnknownExperienceLevel(String),
}

//
// ─── EXPERIENCE ────────────────────────────────────────────────────────────────
//

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceLevel {
    Intern,
    #[default]
    #[serde(rename = "New Grad")]
    NewGrad,
    Experienced,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 3] = [Self::Intern, Self::NewGrad, Self::Experienced];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Intern => "Intern",
            Self::NewGrad => "New Grad",
            Self::Experienced => "Experienced",
        }
    }

    /// Parses the display label back into a level.
    ///
    /// # Errors
    ///
    /// Returns `UserSettingsError::UnknownExperienceLevel` for any other text.
    pub fn from_label(label: &str) -> Result<Self, UserSettingsError> {
        Self::ALL
            .into_iter()
            .find(|level| level.label() == label)
            .ok_or_else(|| UserSettingsError::UnknownExperienceLevel(label.to_string()))
    }
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Profile captured during onboarding and returned by the auth endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    name: String,
    target_date: NaiveDate,
    experience_level: ExperienceLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
}

impl UserSettings {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn target_date(&self) -> NaiveDate {
        self.target_date
    }

    #[must_use]
    pub fn experience_level(&self) -> ExperienceLevel {
        self.experience_level
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Raw onboarding form input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserSettingsDraft {
    pub name: String,
    pub target_date: String,
    pub experience_level: ExperienceLevel,
}

impl UserSettingsDraft {
    /// Validates the form values.
    ///
    /// # Errors
    ///
    /// Returns `UserSettingsError` when the name is blank or the date is not
    /// `YYYY-MM-DD`.
    pub fn validate(self) -> Result<UserSettings, UserSettingsError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(UserSettingsError::EmptyName);
        }
        let target_date = parse_target_date(&self.target_date)?;
        Ok(UserSettings {
            name: name.to_string(),
            target_date,
            experience_level: self.experience_level,
            email: None,
        })
    }
}

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns `UserSettingsError::InvalidTargetDate` for any other format.
pub fn parse_target_date(raw: &str) -> Result<NaiveDate, UserSettingsError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| UserSettingsError::InvalidTargetDate(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_validates_and_trims_name() {
        let user = UserSettingsDraft {
            name: "  Ada ".into(),
            target_date: "2024-01-31".into(),
            experience_level: ExperienceLevel::Intern,
        }
        .validate()
        .unwrap();

        assert_eq!(user.name(), "Ada");
        assert_eq!(user.target_date(), NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        assert_eq!(user.experience_level(), ExperienceLevel::Intern);
    }

    #[test]
    fn draft_rejects_blank_name_and_bad_date() {
        let blank = UserSettingsDraft {
            name: "   ".into(),
            target_date: "2024-01-31".into(),
            ..UserSettingsDraft::default()
        };
        assert_eq!(blank.validate(), Err(UserSettingsError::EmptyName));

        let bad_date = UserSettingsDraft {
            name: "Ada".into(),
            target_date: "31/01/2024".into(),
            ..UserSettingsDraft::default()
        };
        assert!(matches!(
            bad_date.validate(),
            Err(UserSettingsError::InvalidTargetDate(_))
        ));
    }

    #[test]
    fn persisted_shape_uses_camel_case_and_labels() {
        let user = UserSettingsDraft {
            name: "Ada".into(),
            target_date: "2024-01-31".into(),
            experience_level: ExperienceLevel::NewGrad,
        }
        .validate()
        .unwrap();

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["targetDate"], "2024-01-31");
        assert_eq!(json["experienceLevel"], "New Grad");
        assert!(json.get("email").is_none());
    }

    #[test]
    fn experience_level_from_label() {
        assert_eq!(
            ExperienceLevel::from_label("Experienced"),
            Ok(ExperienceLevel::Experienced)
        );
        assert!(ExperienceLevel::from_label("Senior").is_err());
    }
}
