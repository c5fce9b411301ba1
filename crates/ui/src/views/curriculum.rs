use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::shell::ShellState;
use crate::vm::{PhaseColumnVm, TopicCardVm, map_curriculum};

#[component]
pub fn CurriculumView() -> Element {
    let ctx = use_context::<AppContext>();
    let shell = use_context::<ShellState>();
    let catalog = ctx.catalog();
    let phases = map_curriculum(&catalog, &shell.progress.read());

    rsx! {
        div { class: "page curriculum",
            header {
                h2 { "Quest Board" }
                p { class: "muted", "Select a module to enter the Simulation." }
            }
            for phase in phases {
                PhaseColumn { key: "{phase.id}", phase }
            }
        }
    }
}

#[component]
fn PhaseColumn(phase: PhaseColumnVm) -> Element {
    rsx! {
        section { class: "phase",
            h3 { class: "phase__title", "{phase.title}" }
            p { class: "phase__desc muted", "{phase.description}" }
            div { class: "topic-grid",
                for card in phase.topics {
                    TopicCard { key: "{card.id}", card }
                }
            }
        }
    }
}

#[component]
fn TopicCard(card: TopicCardVm) -> Element {
    let status_class = if card.completed {
        "topic-card topic-card--done"
    } else {
        "topic-card"
    };
    let priority_class = if card.hot { "tag tag--hot" } else { "tag" };

    rsx! {
        Link { class: status_class, to: Route::Topic { id: card.id.clone() },
            div { class: "topic-card__top",
                if card.completed {
                    span { class: "topic-card__check", "✓" }
                } else {
                    span { class: "topic-card__dot" }
                }
                span { class: priority_class, "{card.priority}" }
            }
            h4 { "{card.title}" }
            p { class: "muted", "{card.desc}" }
        }
    }
}
