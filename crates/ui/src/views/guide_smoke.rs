use prep_core::model::TopicId;

use super::guide::GuideIntent;
use super::test_harness::{Fixture, ViewKind, test_user};

fn window() -> TopicId {
    TopicId::new("dsa-window").expect("topic id")
}

#[tokio::test(flavor = "current_thread")]
async fn guide_next_and_prev_move_the_bookmark() {
    let fixture = Fixture::new();
    let mut harness = fixture.harness(ViewKind::GuidePager("dsa-window".into()), Some(test_user()));
    harness.rebuild();
    let dispatch = fixture.guide.pager().dispatch;

    dispatch.call(GuideIntent::Next);
    harness.drive();
    assert_eq!(fixture.progress.bookmark(&window()), 1);
    assert!(harness.render().contains("Page 2 of 4"));

    dispatch.call(GuideIntent::Next);
    harness.drive();
    assert_eq!(fixture.progress.bookmark(&window()), 2);

    dispatch.call(GuideIntent::Prev);
    harness.drive();
    assert_eq!(fixture.progress.bookmark(&window()), 1);
    let html = harness.render();
    assert!(html.contains("Page 2 of 4"), "missing page label in {html}");
    assert!(!fixture.progress.is_complete(&window()));
}

#[tokio::test(flavor = "current_thread")]
async fn finishing_the_guide_bookmarks_page_count_and_completes() {
    let fixture = Fixture::new();
    let mut harness = fixture.harness(ViewKind::GuidePager("dsa-window".into()), Some(test_user()));
    harness.rebuild();
    let dispatch = fixture.guide.pager().dispatch;

    for expected in 1..=3 {
        dispatch.call(GuideIntent::Next);
        harness.drive();
        assert_eq!(fixture.progress.bookmark(&window()), expected);
    }
    assert!(!fixture.progress.is_complete(&window()));

    // Finish on the last page.
    dispatch.call(GuideIntent::Next);
    harness.drive();

    assert_eq!(fixture.progress.bookmark(&window()), 4);
    assert!(fixture.progress.is_complete(&window()));
    let html = harness.render();
    assert!(html.contains("Page 4 of 4"), "missing page label in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn step_intents_stay_on_the_page() {
    let fixture = Fixture::new();
    let mut harness = fixture.harness(ViewKind::GuidePager("dsa-window".into()), Some(test_user()));
    harness.rebuild();
    let pager = fixture.guide.pager();
    let steps = pager.steps.peek().len();
    assert!(steps > 1, "first window page should have steps");

    pager.dispatch.call(GuideIntent::StepNext);
    harness.drive();
    assert!(harness.render().contains(&format!("2/{steps}")));

    pager.dispatch.call(GuideIntent::StepPrev);
    pager.dispatch.call(GuideIntent::StepPrev);
    harness.drive();
    assert!(harness.render().contains(&format!("1/{steps}")));
    assert_eq!(fixture.progress.bookmark(&window()), 0);
}
