use std::time::Duration;

use dioxus::prelude::*;
use dioxus_router::use_navigator;
use prep_core::model::{Problem, StepPlayer, SubTopic, Topic, TopicId, VisualKind};

use crate::context::AppContext;
use crate::routes::Route;
use crate::shell::ShellState;
use crate::views::chat::ChatPanel;
use crate::views::guide::GuideView;
use crate::views::state::ViewError;
use crate::vm::{TopicVisualVm, markdown_to_html};

const RETURN_DELAY: Duration = Duration::from_secs(1);

#[component]
pub fn TopicView(id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let catalog = ctx.catalog();

    let topic = TopicId::new(id.as_str())
        .ok()
        .and_then(|topic_id| catalog.topic(&topic_id).cloned());
    let Some(topic) = topic else {
        return rsx! {
            div { class: "page",
                p { class: "error", "{ViewError::TopicNotFound.message()}" }
            }
        };
    };

    rsx! {
        TopicDetail { key: "{id}", topic }
    }
}

/// Handlers that persist a guide's progress for one topic.
#[derive(Clone, Copy)]
pub struct GuideProgress {
    pub on_page_change: Callback<usize>,
    pub on_complete: Callback<()>,
}

/// Page moves become bookmarks; finishing marks the topic complete (never
/// toggling it back off) and returns to the board after a short delay.
pub fn use_guide_progress(topic_id: TopicId) -> GuideProgress {
    let ctx = use_context::<AppContext>();
    let shell = use_context::<ShellState>();
    let navigator = use_navigator();

    let on_page_change = {
        let ctx = ctx.clone();
        let topic_id = topic_id.clone();
        use_callback(move |page: usize| shell.update_bookmark(&ctx, topic_id.clone(), page))
    };
    let on_complete = use_callback(move |()| {
        if !shell.progress.peek().is_complete(&topic_id) {
            shell.mark_complete(&ctx, topic_id.clone());
        }
        spawn(async move {
            tokio::time::sleep(RETURN_DELAY).await;
            navigator.push(Route::Curriculum {});
        });
    });

    GuideProgress {
        on_page_change,
        on_complete,
    }
}

#[component]
fn TopicDetail(topic: Topic) -> Element {
    let ctx = use_context::<AppContext>();
    let shell = use_context::<ShellState>();
    let navigator = use_navigator();
    let catalog = ctx.catalog();

    let topic_id = topic.id().clone();
    let completed = shell.progress.read().is_complete(&topic_id);
    let has_guide = catalog.guide_for(&topic_id).is_some();
    let phase = topic.phase();
    let explanation = markdown_to_html(topic.explanation());
    let complete_class = if completed { "btn btn-done" } else { "btn btn-primary" };
    let complete_label = if completed { "COMPLETED" } else { "MARK COMPLETE" };

    let on_toggle = {
        let ctx = ctx.clone();
        let topic_id = topic_id.clone();
        move |_: MouseEvent| shell.toggle_complete(&ctx, topic_id.clone())
    };
    let GuideProgress {
        on_page_change,
        on_complete,
    } = use_guide_progress(topic_id.clone());

    rsx! {
        div { class: "page topic",
            header { class: "topic__header",
                div { class: "topic__heading",
                    button {
                        class: "btn btn-ghost",
                        r#type: "button",
                        title: "Back to Board",
                        onclick: move |_| {
                            navigator.push(Route::Curriculum {});
                        },
                        "‹ Back to Board"
                    }
                    div {
                        div { class: "topic__meta",
                            span { class: "badge {phase.css_class()}", "{phase.label()}" }
                            span { class: "muted", "• {topic.difficulty().label()}" }
                        }
                        h2 {
                            "{topic.title()}"
                            if completed {
                                span { class: "topic__check", " ✓" }
                            }
                        }
                    }
                }
                button {
                    class: complete_class,
                    id: "topic-complete",
                    r#type: "button",
                    onclick: on_toggle,
                    "{complete_label}"
                }
            }

            div { class: "topic__body",
                div { class: "topic__main",
                    TopicVisual { kind: topic.visual() }
                    if has_guide {
                        GuideView {
                            topic: topic_id.clone(),
                            on_page_change,
                            on_complete,
                        }
                    } else {
                        section { class: "panel",
                            h3 { "Concept" }
                            div { class: "markdown", dangerous_inner_html: "{explanation}" }
                            if let Some(snippet) = topic.code_snippet() {
                                pre { class: "code", code { "{snippet}" } }
                            }
                        }
                    }
                }

                aside { class: "topic__side",
                    section { class: "panel panel--prompt",
                        h4 { class: "caption", "AI PROMPT" }
                        p { class: "mono", "{topic.prompt()}" }
                    }
                    section { class: "panel",
                        h4 { class: "caption", "Amazon Frequency" }
                        p { class: "topic__frequency", "{topic.frequency()}" }
                        p { class: "muted", "{topic.priority().interview_note()}" }
                    }
                    if topic.is_subject() {
                        SubTopicList { items: topic.sub_topics().to_vec() }
                    } else {
                        PracticeLab { problems: topic.problems().to_vec() }
                    }
                }
            }

            ChatPanel {}
        }
    }
}

/// Stepped illustration for the topic's visual kind; renders nothing for
/// topics without one.
#[component]
fn TopicVisual(kind: VisualKind) -> Element {
    let visual = TopicVisualVm::for_kind(kind);
    let frame_count = visual.map_or(0, |visual| visual.frames.len());
    let mut player = use_signal(|| StepPlayer::new(frame_count));

    let Some(visual) = visual else {
        return rsx! {};
    };
    let cursor = *player.read();
    let Some(frame) = visual.frames.get(cursor.index()) else {
        return rsx! {};
    };

    rsx! {
        section { class: "panel visual",
            h4 { class: "caption", "{visual.title}" }
            p { class: "guide__step-caption", "{frame.caption}" }
            pre { class: "guide__frame", "{frame.art}" }
            if frame_count > 1 {
                div { class: "guide__step-nav",
                    button {
                        class: "btn btn-ghost",
                        id: "visual-prev",
                        r#type: "button",
                        disabled: cursor.is_first(),
                        onclick: move |_| player.write().prev(),
                        "◀"
                    }
                    span { "{cursor.label()}" }
                    button {
                        class: "btn btn-ghost",
                        id: "visual-next",
                        r#type: "button",
                        disabled: cursor.is_last(),
                        onclick: move |_| player.write().next(),
                        "▶"
                    }
                }
            }
        }
    }
}

#[component]
fn SubTopicList(items: Vec<SubTopic>) -> Element {
    rsx! {
        section { class: "panel",
            h4 { class: "caption", "Modules" }
            ul { class: "subtopics",
                for item in items {
                    li { key: "{item.id()}", class: "subtopic",
                        div { class: "subtopic__top",
                            span { class: "subtopic__title", "{item.title()}" }
                            span { class: "tag", "{item.priority().label()}" }
                        }
                        p { class: "muted", "{item.desc()}" }
                        span { class: "caption", "{item.difficulty().label()}" }
                    }
                }
            }
        }
    }
}

#[component]
fn PracticeLab(problems: Vec<Problem>) -> Element {
    rsx! {
        section { class: "panel",
            h4 { class: "caption", "Practice Lab" }
            if problems.is_empty() {
                p { class: "muted", "No Code Problems. This is a Design/Behavioral topic." }
            } else {
                ul { class: "problems",
                    for problem in problems {
                        li { key: "{problem.url()}", class: "problem",
                            if let Some(section) = problem.section() {
                                span { class: "caption", "{section}" }
                            }
                            a {
                                href: "{problem.url()}",
                                target: "_blank",
                                rel: "noreferrer",
                                "{problem.title()}"
                            }
                            span { class: "tag", "{problem.difficulty().label()}" }
                        }
                    }
                }
            }
        }
    }
}
