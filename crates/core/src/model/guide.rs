use serde::{Deserialize, Serialize};

use crate::model::TopicId;

/// One frame of a page's walkthrough animation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideStep {
    caption: String,
    frame: String,
}

impl GuideStep {
    #[must_use]
    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// Monospace text drawn for this frame.
    #[must_use]
    pub fn frame(&self) -> &str {
        &self.frame
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidePage {
    title: String,
    body: String,
    #[serde(default)]
    steps: Vec<GuideStep>,
}

impl GuidePage {
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Markdown body.
    #[must_use]
    pub fn body(&self) -> &str {
        self.body.trim()
    }

    #[must_use]
    pub fn steps(&self) -> &[GuideStep] {
        &self.steps
    }
}

/// A multi-page explainer attached to a single topic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guide {
    topic: TopicId,
    title: String,
    pages: Vec<GuidePage>,
}

impl Guide {
    #[must_use]
    pub fn topic(&self) -> &TopicId {
        &self.topic
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn pages(&self) -> &[GuidePage] {
        &self.pages
    }

    #[must_use]
    pub fn page(&self, index: usize) -> Option<&GuidePage> {
        self.pages.get(index)
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Reading-list entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    title: String,
    url: String,
    description: String,
}

impl Resource {
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

//
// ─── STEP PLAYER ───────────────────────────────────────────────────────────────
//

/// Cursor over the micro-steps of a single guide page.
///
/// Independent of the page bookmark; the guide view resets it on every page
/// change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepPlayer {
    index: usize,
    len: usize,
}

impl StepPlayer {
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.len
    }

    /// Advances one step; stays put on the last one.
    pub fn next(&mut self) {
        if !self.is_last() {
            self.index += 1;
        }
    }

    pub fn prev(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    /// Rewinds to the first step, optionally switching to a new step count.
    pub fn reset(&mut self, len: usize) {
        self.index = 0;
        self.len = len;
    }

    #[must_use]
    pub fn label(&self) -> String {
        format!("Step {}/{}", self.index + 1, self.len.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_player_stops_at_both_ends() {
        let mut player = StepPlayer::new(3);
        assert!(player.is_first());
        player.prev();
        assert_eq!(player.index(), 0);

        player.next();
        player.next();
        assert!(player.is_last());
        assert_eq!(player.label(), "Step 3/3");

        player.next();
        assert_eq!(player.index(), 2);
    }

    #[test]
    fn reset_rewinds_and_resizes() {
        let mut player = StepPlayer::new(2);
        player.next();
        player.reset(5);
        assert_eq!(player.index(), 0);
        assert_eq!(player.len(), 5);
        assert_eq!(player.label(), "Step 1/5");
    }

    #[test]
    fn empty_player_is_first_and_last() {
        let mut player = StepPlayer::new(0);
        player.next();
        assert!(player.is_first());
        assert!(player.is_last());
        assert!(player.is_empty());
    }

    #[test]
    fn guide_page_steps_default_to_empty() {
        let guide: Guide = serde_json::from_str(
            r#"{"topic":"dsa-window","title":"Sliding Window","pages":[{"title":"Concept","body":"  text  "}]}"#,
        )
        .unwrap();
        assert_eq!(guide.page_count(), 1);
        assert_eq!(guide.page(0).unwrap().body(), "text");
        assert!(guide.page(0).unwrap().steps().is_empty());
    }
}
