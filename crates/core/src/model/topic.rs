use serde::{Deserialize, Serialize};

use crate::model::TopicId;

/// Track a topic belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TopicPhase {
    #[serde(rename = "DSA")]
    Dsa,
    #[serde(rename = "LLD")]
    Lld,
    #[serde(rename = "CS_Fund")]
    CsFund,
    #[serde(rename = "Behavioral")]
    Behavioral,
}

impl TopicPhase {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Dsa => "DSA",
            Self::Lld => "LLD",
            Self::CsFund => "CS Fundamentals",
            Self::Behavioral => "Behavioral",
        }
    }

    /// CSS modifier used for the phase badge.
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Dsa => "badge--dsa",
            Self::Lld => "badge--lld",
            Self::CsFund => "badge--cs",
            Self::Behavioral => "badge--behavioral",
        }
    }
}

/// Difficulty label shared by topics and sub-topics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Core,
    Easy,
    Medium,
    Hard,
    Design,
    #[serde(rename = "Easy/Med")]
    EasyMedium,
    #[serde(rename = "Medium/Hard")]
    MediumHard,
    Theory,
    Critical,
    Mandatory,
    High,
}

impl Difficulty {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Core => "Core",
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::Design => "Design",
            Self::EasyMedium => "Easy/Med",
            Self::MediumHard => "Medium/Hard",
            Self::Theory => "Theory",
            Self::Critical => "Critical",
            Self::Mandatory => "Mandatory",
            Self::High => "High",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
    Mandatory,
}

impl Priority {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::Mandatory => "Mandatory",
        }
    }

    /// One-line hint shown next to the frequency card.
    #[must_use]
    pub fn interview_note(self) -> &'static str {
        match self {
            Self::Critical => "Failure here usually means immediate rejection.",
            _ => "Commonly asked in Rounds 1 & 2.",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProblemDifficulty {
    Easy,
    Medium,
    Hard,
}

impl ProblemDifficulty {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

/// Illustration attached to a topic page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisualKind {
    Window,
    Graph,
    LldParking,
    StarMethod,
    Heap,
    Db,
    Network,
    Os,
    #[default]
    None,
}

/// A practice problem linked from a topic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    title: String,
    difficulty: ProblemDifficulty,
    url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    section: Option<String>,
}

impl Problem {
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn difficulty(&self) -> ProblemDifficulty {
        self.difficulty
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn section(&self) -> Option<&str> {
        self.section.as_deref()
    }
}

/// A sub-topic inside a subject-style topic (OS, DBMS, ...).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubTopic {
    id: TopicId,
    title: String,
    difficulty: Difficulty,
    priority: Priority,
    desc: String,
}

impl SubTopic {
    #[must_use]
    pub fn id(&self) -> &TopicId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn priority(&self) -> Priority {
        self.priority
    }

    #[must_use]
    pub fn desc(&self) -> &str {
        &self.desc
    }
}

/// A curriculum topic. Immutable once loaded from the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    id: TopicId,
    title: String,
    phase: TopicPhase,
    difficulty: Difficulty,
    priority: Priority,
    frequency: String,
    desc: String,
    explanation: String,
    #[serde(default)]
    visual_type: VisualKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    code_snippet: Option<String>,
    prompt: String,
    #[serde(default)]
    problems: Vec<Problem>,
    #[serde(default)]
    sub_topics: Vec<SubTopic>,
}

impl Topic {
    #[must_use]
    pub fn id(&self) -> &TopicId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn phase(&self) -> TopicPhase {
        self.phase
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn priority(&self) -> Priority {
        self.priority
    }

    #[must_use]
    pub fn frequency(&self) -> &str {
        &self.frequency
    }

    #[must_use]
    pub fn desc(&self) -> &str {
        &self.desc
    }

    /// Markdown explanation.
    #[must_use]
    pub fn explanation(&self) -> &str {
        self.explanation.trim()
    }

    #[must_use]
    pub fn visual(&self) -> VisualKind {
        self.visual_type
    }

    #[must_use]
    pub fn code_snippet(&self) -> Option<&str> {
        self.code_snippet.as_deref()
    }

    /// Prompt the user can paste into an AI tutor.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    #[must_use]
    pub fn sub_topics(&self) -> &[SubTopic] {
        &self.sub_topics
    }

    /// Subject-style topics render as a list of sub-topics instead of the
    /// standard detail page.
    #[must_use]
    pub fn is_subject(&self) -> bool {
        !self.sub_topics.is_empty()
    }
}
