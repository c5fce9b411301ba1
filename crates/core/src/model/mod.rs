mod curriculum;
mod guide;
mod ids;
mod progress;
mod topic;
mod user;

pub use ids::{ChatSessionId, ParseIdError, PhaseId, TopicId};

pub use curriculum::{overall_percent, Curriculum, CurriculumPhase, PhaseProgress};
pub use guide::{Guide, GuidePage, GuideStep, Resource, StepPlayer};
pub use progress::{percent, BookmarkMap, ProgressMap, SkippedEntry, TopicMap};
pub use topic::{
    Difficulty, Priority, Problem, ProblemDifficulty, SubTopic, Topic, TopicPhase, VisualKind,
};
pub use user::{
    parse_target_date, ExperienceLevel, UserSettings, UserSettingsDraft, UserSettingsError,
};
