use prep_core::model::TopicId;

use super::test_harness::{Fixture, ViewKind, setup_view_harness, test_user};

fn topic(id: &str) -> TopicId {
    TopicId::new(id).expect("topic id")
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_renders_schedule() {
    let mut harness = setup_view_harness(ViewKind::Dashboard);
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Mission Control"), "missing header in {html}");
    assert!(html.contains("Date: 2023-12-14"), "missing target date in {html}");
    assert!(html.contains("30"), "missing days left in {html}");
    assert!(html.contains("0/11"), "missing phase progress in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_counts_completed_topics() {
    let fixture = Fixture::new();
    fixture
        .progress
        .set_completed(&topic("dsa-window"), true)
        .await
        .expect("complete");
    let mut harness = fixture.harness(ViewKind::Dashboard, Some(test_user()));
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("1/11"), "missing phase progress in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn curriculum_view_lists_phases_and_topics() {
    let mut harness = setup_view_harness(ViewKind::Curriculum);
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Quest Board"));
    assert!(html.contains("Phase 1: DSA Mastery"));
    assert!(html.contains("Sliding Window (Day 2-3)"));
    assert!(html.contains("Computer Networks"));
}

#[tokio::test(flavor = "current_thread")]
async fn guide_topic_opens_on_first_page() {
    let mut harness = setup_view_harness(ViewKind::Topic("dsa-window".into()));
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Page 1 of 4"), "missing page label in {html}");
    assert!(html.contains("MARK COMPLETE"));
    assert!(html.contains("Previous"));
    assert!(html.contains("Ask AI Tutor"));
}

#[tokio::test(flavor = "current_thread")]
async fn guide_topic_resumes_from_bookmark() {
    let fixture = Fixture::new();
    fixture
        .progress
        .update_bookmark(&topic("dsa-window"), 2)
        .await
        .expect("bookmark");
    let mut harness = fixture.harness(ViewKind::Topic("dsa-window".into()), Some(test_user()));
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Page 3 of 4"), "missing resumed page in {html}");
    assert!(html.contains("Monotonic Queue"));
}

#[tokio::test(flavor = "current_thread")]
async fn finished_guide_bookmark_resumes_on_last_page() {
    let fixture = Fixture::new();
    fixture
        .progress
        .update_bookmark(&topic("dsa-window"), 4)
        .await
        .expect("bookmark");
    let mut harness = fixture.harness(ViewKind::Topic("dsa-window".into()), Some(test_user()));
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Page 4 of 4"), "missing last page in {html}");
    assert!(html.contains("Finish"));
}

#[tokio::test(flavor = "current_thread")]
async fn completed_topic_shows_completed_button() {
    let fixture = Fixture::new();
    fixture
        .progress
        .set_completed(&topic("dsa-arrays"), true)
        .await
        .expect("complete");
    let mut harness = fixture.harness(ViewKind::Topic("dsa-arrays".into()), Some(test_user()));
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("COMPLETED"), "missing completed state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn subject_topic_lists_sub_topics() {
    let mut harness = setup_view_harness(ViewKind::Topic("cs-os".into()));
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Process vs Thread"), "missing sub-topic in {html}");
    assert!(html.contains("Deadlocks"));
    assert!(html.contains("Page 1 of 3"), "missing subject guide in {html}");
    assert!(html.contains("The Engine Room"));
}

#[tokio::test(flavor = "current_thread")]
async fn heaps_topic_has_a_paged_guide() {
    let mut harness = setup_view_harness(ViewKind::Topic("dsa-heaps".into()));
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Page 1 of 5"), "missing page label in {html}");
    assert!(html.contains("The Heap Property"));
    assert!(html.contains("Max Heap"), "missing heap visual in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn graph_topic_renders_stepped_visual() {
    let mut harness = setup_view_harness(ViewKind::Topic("dsa-graphs-advanced".into()));
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Dependency Graph (DAG)"), "missing visual in {html}");
    assert!(html.contains("Step 1/4"));
    assert!(html.contains("visual-next"));
}

#[tokio::test(flavor = "current_thread")]
async fn behavioral_topic_renders_star_visual() {
    let mut harness = setup_view_harness(ViewKind::Topic("lp-group1".into()));
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("STAR Method"), "missing visual in {html}");
    assert!(html.contains("Situation"));
}

#[tokio::test(flavor = "current_thread")]
async fn topic_without_visual_skips_the_panel() {
    let mut harness = setup_view_harness(ViewKind::Topic("dsa-arrays".into()));
    harness.rebuild();
    let html = harness.render();

    assert!(!html.contains("panel visual"), "unexpected visual in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn design_topic_without_guide_has_no_problems() {
    let mut harness = setup_view_harness(ViewKind::Topic("lp-group1".into()));
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("AI PROMPT"));
    assert!(html.contains("No Code Problems"), "missing empty lab in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn unknown_topic_renders_not_found() {
    let mut harness = setup_view_harness(ViewKind::Topic("dsa-unknown".into()));
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Topic not found"), "missing error in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn resources_view_shows_warning_and_links() {
    let mut harness = setup_view_harness(ViewKind::Resources);
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Intel Database"));
    assert!(html.contains("Worst Case"));
    assert!(html.contains("https://neetcode.io/roadmap"));
}

#[tokio::test(flavor = "current_thread")]
async fn login_view_defaults_to_sign_in() {
    let fixture = Fixture::new();
    let mut harness = fixture.harness(ViewKind::Login, None);
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("SDE-1 MASTERY"));
    assert!(html.contains("SIGN_IN"));
    assert!(html.contains("Offline"));
    assert!(!html.contains("TARGET_INTERVIEW_DATE"));
}
