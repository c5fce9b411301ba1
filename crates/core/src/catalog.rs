//! Curriculum, guides and reading list compiled into the binary.

use std::collections::HashSet;

use thiserror::Error;
use url::Url;

use crate::model::{Curriculum, CurriculumPhase, Guide, Resource, Topic, TopicId};

const CURRICULUM_JSON: &str = include_str!("../data/curriculum.json");
const GUIDES_JSON: &str = include_str!("../data/guides.json");
const RESOURCES_JSON: &str = include_str!("../data/resources.json");

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog json is malformed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("topic id used more than once: {0}")]
    DuplicateTopic(TopicId),

    #[error("guide references unknown topic: {0}")]
    UnknownGuideTopic(TopicId),

    #[error("guide for {0} has no pages")]
    EmptyGuide(TopicId),

    #[error("more than one guide for topic: {0}")]
    DuplicateGuide(TopicId),

    #[error("topic {topic} links an invalid url: {url}")]
    InvalidProblemUrl { topic: TopicId, url: String },
}

/// Read-only content shared by every view.
#[derive(Debug, Clone)]
pub struct Catalog {
    curriculum: Curriculum,
    guides: Vec<Guide>,
    resources: Vec<Resource>,
}

impl Catalog {
    /// Loads the content bundled at build time.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the bundled JSON fails validation.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(CURRICULUM_JSON, GUIDES_JSON, RESOURCES_JSON)
    }

    /// Parses and validates catalog documents.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` for malformed JSON, duplicate ids, guides that
    /// point at missing topics or have no pages, and unparseable problem urls.
    pub fn from_json(
        curriculum: &str,
        guides: &str,
        resources: &str,
    ) -> Result<Self, CatalogError> {
        let phases: Vec<CurriculumPhase> = serde_json::from_str(curriculum)?;
        let guides: Vec<Guide> = serde_json::from_str(guides)?;
        let resources: Vec<Resource> = serde_json::from_str(resources)?;
        Self::new(Curriculum::new(phases), guides, resources)
    }

    /// Validates already-parsed content.
    ///
    /// # Errors
    ///
    /// See [`Catalog::from_json`].
    pub fn new(
        curriculum: Curriculum,
        guides: Vec<Guide>,
        resources: Vec<Resource>,
    ) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for topic in curriculum.topics() {
            let sub_ids = topic.sub_topics().iter().map(|sub| sub.id());
            for id in std::iter::once(topic.id()).chain(sub_ids) {
                if !seen.insert(id.clone()) {
                    return Err(CatalogError::DuplicateTopic(id.clone()));
                }
            }
            validate_problem_urls(topic)?;
        }

        let mut guided = HashSet::new();
        for guide in &guides {
            if curriculum.topic(guide.topic()).is_none() {
                return Err(CatalogError::UnknownGuideTopic(guide.topic().clone()));
            }
            if guide.page_count() == 0 {
                return Err(CatalogError::EmptyGuide(guide.topic().clone()));
            }
            if !guided.insert(guide.topic().clone()) {
                return Err(CatalogError::DuplicateGuide(guide.topic().clone()));
            }
        }

        Ok(Self {
            curriculum,
            guides,
            resources,
        })
    }

    #[must_use]
    pub fn curriculum(&self) -> &Curriculum {
        &self.curriculum
    }

    #[must_use]
    pub fn phases(&self) -> &[CurriculumPhase] {
        self.curriculum.phases()
    }

    #[must_use]
    pub fn topic(&self, id: &TopicId) -> Option<&Topic> {
        self.curriculum.topic(id)
    }

    #[must_use]
    pub fn phase_of(&self, id: &TopicId) -> Option<&CurriculumPhase> {
        self.curriculum.phase_of(id)
    }

    #[must_use]
    pub fn guide_for(&self, id: &TopicId) -> Option<&Guide> {
        self.guides.iter().find(|guide| guide.topic() == id)
    }

    #[must_use]
    pub fn guides(&self) -> &[Guide] {
        &self.guides
    }

    #[must_use]
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    #[must_use]
    pub fn total_topics(&self) -> usize {
        self.curriculum.total_topics()
    }
}

fn validate_problem_urls(topic: &Topic) -> Result<(), CatalogError> {
    for problem in topic.problems() {
        if Url::parse(problem.url()).is_err() {
            return Err(CatalogError::InvalidProblemUrl {
                topic: topic.id().clone(),
                url: problem.url().to_string(),
            });
        }
    }
    Ok(())
}
