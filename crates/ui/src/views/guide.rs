use dioxus::prelude::*;
use prep_core::model::{Guide, StepPlayer, TopicId};
use prep_core::{PageController, PageEvent, ResumePoint};

use crate::context::AppContext;
use crate::shell::ShellState;
use crate::vm::markdown_to_html;

fn step_count(guide: &Guide, page: usize) -> usize {
    guide.page(page).map_or(0, |page| page.steps().len())
}

/// Navigation request for a paged guide.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuideIntent {
    Next,
    Prev,
    StepNext,
    StepPrev,
}

/// Page and step cursors for one guide plus the dispatcher that moves them.
#[derive(Clone, Copy)]
pub struct GuidePager {
    pub controller: Signal<Option<PageController>>,
    pub steps: Signal<StepPlayer>,
    pub dispatch: Callback<GuideIntent>,
}

/// Page moves are reported through `on_page_change` (finishing reports the
/// page count) and the final page additionally fires `on_complete`.
///
/// The stored bookmark is authoritative: when it changes underneath the
/// pager the controller re-initialises from it.
pub fn use_guide_pager(
    guide: &Guide,
    on_page_change: EventHandler<usize>,
    on_complete: EventHandler<()>,
) -> GuidePager {
    let shell = use_context::<ShellState>();
    let topic = guide.topic().clone();
    let page_count = guide.page_count();
    let bookmark = shell.bookmarks.peek().get(&topic);

    let mut controller = use_signal(|| PageController::with_bookmark(page_count, bookmark).ok());
    let mut steps = {
        let guide = guide.clone();
        use_signal(move || {
            let page = ResumePoint::from_raw(bookmark, page_count).page();
            StepPlayer::new(step_count(&guide, page))
        })
    };

    {
        let guide = guide.clone();
        use_effect(move || {
            let value = shell.bookmarks.read().get(&topic);
            let mut guard = controller.write();
            let Some(active) = guard.as_mut() else {
                return;
            };
            if active.resume(value) {
                steps.write().reset(step_count(&guide, active.current_page()));
            }
        });
    }

    let guide = guide.clone();
    let dispatch = use_callback(move |intent: GuideIntent| {
        let events = match intent {
            GuideIntent::StepNext => {
                steps.write().next();
                return;
            }
            GuideIntent::StepPrev => {
                steps.write().prev();
                return;
            }
            GuideIntent::Next => controller
                .write()
                .as_mut()
                .map(PageController::go_next)
                .unwrap_or_default(),
            GuideIntent::Prev => controller
                .write()
                .as_mut()
                .map(PageController::go_prev)
                .unwrap_or_default(),
        };
        for event in events {
            match event {
                PageEvent::PageChanged(page) => {
                    steps.write().reset(step_count(&guide, page));
                    on_page_change.call(page);
                }
                PageEvent::Completed => on_complete.call(()),
            }
        }
    });

    GuidePager {
        controller,
        steps,
        dispatch,
    }
}

/// Paged walkthrough for one topic.
#[component]
pub fn GuideView(
    topic: TopicId,
    on_page_change: EventHandler<usize>,
    on_complete: EventHandler<()>,
) -> Element {
    let ctx = use_context::<AppContext>();
    let catalog = ctx.catalog();
    let Some(guide) = catalog.guide_for(&topic).cloned() else {
        return rsx! {};
    };
    let GuidePager {
        controller,
        steps,
        dispatch,
    } = use_guide_pager(&guide, on_page_change, on_complete);

    let guard = controller.read();
    let Some(state) = guard.as_ref() else {
        return rsx! {
            div { class: "guide", p { "This guide has no pages yet." } }
        };
    };
    let current = state.current_page();
    let Some(page) = guide.page(current) else {
        return rsx! {};
    };
    let body_html = markdown_to_html(page.body());
    let page_label = state.page_label();
    let percent = state.progress_percent();
    let is_first = state.is_first_page();
    let next_label = if state.is_last_page() { "Finish" } else { "Next" };
    let dots: Vec<(usize, &'static str)> = (0..state.page_count())
        .map(|index| {
            let class = if index == current {
                "guide__dot guide__dot--current"
            } else if state.is_completed(index) {
                "guide__dot guide__dot--done"
            } else {
                "guide__dot"
            };
            (index, class)
        })
        .collect();
    let player = *steps.read();
    let step = page.steps().get(player.index()).cloned();

    rsx! {
        div { class: "guide",
            header { class: "guide__header",
                h3 { "{guide.title()}" }
                span { class: "guide__label", "{page_label}" }
            }
            div { class: "bar",
                div { class: "bar__fill bar--orange", style: "width: {percent}%" }
            }
            div { class: "guide__dots",
                for (index, class) in dots {
                    span { key: "{index}", class: "{class}" }
                }
            }
            article { class: "guide__page",
                h4 { "{page.title()}" }
                div { class: "markdown", dangerous_inner_html: "{body_html}" }
            }
            if let Some(step) = step {
                div { class: "guide__steps",
                    p { class: "guide__step-caption", "{step.caption()}" }
                    pre { class: "guide__frame", "{step.frame()}" }
                    div { class: "guide__step-nav",
                        button {
                            class: "btn btn-ghost",
                            r#type: "button",
                            disabled: player.is_first(),
                            onclick: move |_| dispatch.call(GuideIntent::StepPrev),
                            "◀"
                        }
                        span { "{player.label()}" }
                        button {
                            class: "btn btn-ghost",
                            r#type: "button",
                            disabled: player.is_last(),
                            onclick: move |_| dispatch.call(GuideIntent::StepNext),
                            "▶"
                        }
                    }
                }
            }
            footer { class: "guide__nav",
                button {
                    class: "btn btn-secondary",
                    id: "guide-prev",
                    r#type: "button",
                    disabled: is_first,
                    onclick: move |_| dispatch.call(GuideIntent::Prev),
                    "Previous"
                }
                button {
                    class: "btn btn-primary",
                    id: "guide-next",
                    r#type: "button",
                    onclick: move |_| dispatch.call(GuideIntent::Next),
                    "{next_label}"
                }
            }
        }
    }
}
