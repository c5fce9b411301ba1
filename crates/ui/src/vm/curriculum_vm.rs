use prep_core::Catalog;
use prep_core::model::{Difficulty, Priority, ProgressMap, Topic};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopicCardVm {
    pub id: String,
    pub title: String,
    pub desc: String,
    pub priority: &'static str,
    pub hot: bool,
    pub completed: bool,
}

impl TopicCardVm {
    fn from_topic(topic: &Topic, progress: &ProgressMap) -> Self {
        Self {
            id: topic.id().to_string(),
            title: topic.title().to_string(),
            desc: topic.desc().to_string(),
            priority: topic.priority().label(),
            hot: topic.difficulty() == Difficulty::Hard || topic.priority() == Priority::Critical,
            completed: progress.is_complete(topic.id()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhaseColumnVm {
    pub id: String,
    pub title: String,
    pub description: String,
    pub topics: Vec<TopicCardVm>,
}

#[must_use]
pub fn map_curriculum(catalog: &Catalog, progress: &ProgressMap) -> Vec<PhaseColumnVm> {
    catalog
        .phases()
        .iter()
        .map(|phase| PhaseColumnVm {
            id: phase.id().to_string(),
            title: phase.title().to_string(),
            description: phase.description().to_string(),
            topics: phase
                .topics()
                .iter()
                .map(|topic| TopicCardVm::from_topic(topic, progress))
                .collect(),
        })
        .collect()
}
