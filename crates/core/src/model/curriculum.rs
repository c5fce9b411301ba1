use serde::{Deserialize, Serialize};

use crate::model::progress::{percent, ProgressMap};
use crate::model::{PhaseId, Topic, TopicId};

/// An ordered group of topics (e.g. "Phase 1: DSA Grind").
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurriculumPhase {
    id: PhaseId,
    title: String,
    description: String,
    topics: Vec<Topic>,
}

impl CurriculumPhase {
    #[must_use]
    pub fn id(&self) -> &PhaseId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    /// Completion summary for this phase.
    #[must_use]
    pub fn progress(&self, progress: &ProgressMap) -> PhaseProgress {
        let total = self.topics.len();
        let done = progress.completed_among(self.topics.iter().map(Topic::id));
        PhaseProgress {
            phase: self.id.clone(),
            title: self.title.clone(),
            done,
            total,
            percent: percent(done, total),
        }
    }
}

/// Ordered list of phases.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Curriculum {
    phases: Vec<CurriculumPhase>,
}

impl Curriculum {
    #[must_use]
    pub fn new(phases: Vec<CurriculumPhase>) -> Self {
        Self { phases }
    }

    #[must_use]
    pub fn phases(&self) -> &[CurriculumPhase] {
        &self.phases
    }

    pub fn topics(&self) -> impl Iterator<Item = &Topic> {
        self.phases.iter().flat_map(|phase| phase.topics.iter())
    }

    #[must_use]
    pub fn total_topics(&self) -> usize {
        self.phases.iter().map(|phase| phase.topics.len()).sum()
    }

    #[must_use]
    pub fn topic(&self, id: &TopicId) -> Option<&Topic> {
        self.topics().find(|topic| topic.id() == id)
    }

    #[must_use]
    pub fn phase_of(&self, id: &TopicId) -> Option<&CurriculumPhase> {
        self.phases
            .iter()
            .find(|phase| phase.topics.iter().any(|topic| topic.id() == id))
    }

    /// Overall completion against every topic in the curriculum.
    ///
    /// Progress entries for topics outside the curriculum (sub-topics, stale
    /// ids) are counted, mirroring the dashboard headline figure.
    #[must_use]
    pub fn overall_percent(&self, progress: &ProgressMap) -> u32 {
        overall_percent(progress, self.total_topics())
    }

    #[must_use]
    pub fn phase_progress(&self, progress: &ProgressMap) -> Vec<PhaseProgress> {
        self.phases
            .iter()
            .map(|phase| phase.progress(progress))
            .collect()
    }
}

/// `round(100 * completed / total)`, `0` when there is nothing to complete.
#[must_use]
pub fn overall_percent(progress: &ProgressMap, total: usize) -> u32 {
    percent(progress.completed_count(), total)
}

/// Done/total summary for one phase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhaseProgress {
    pub phase: PhaseId,
    pub title: String,
    pub done: usize,
    pub total: usize,
    pub percent: u32,
}
