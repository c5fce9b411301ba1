use dioxus::prelude::*;

use crate::context::AppContext;
use crate::shell::ShellState;
use crate::vm::{PhaseBarVm, map_dashboard};

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let shell = use_context::<ShellState>();
    let catalog = ctx.catalog();

    let user = shell.user.read().clone();
    let Some(user) = user else {
        return rsx! {
            div { class: "page", p { "Sign in to see your schedule." } }
        };
    };
    let vm = map_dashboard(&user, &catalog, &shell.progress.read(), ctx.today());
    let phases = vm.phases.clone();

    rsx! {
        div { class: "page dashboard",
            header { class: "dashboard__header",
                div {
                    h2 { "Mission Control" }
                    p { class: "muted", "Target: Amazon SDE-1 • Date: {vm.target_date}" }
                }
                div { class: "dashboard__status",
                    p { class: "caption", "Schedule Status" }
                    p { class: "pace {vm.status_class()}", "{vm.pace_status.label()}" }
                }
            }

            div { class: "stat-grid",
                StatCard { title: "Days Left", value: vm.days_left.to_string(), accent: "accent--cyan" }
                StatCard {
                    title: "Pace",
                    value: vm.pace_label.clone(),
                    sub_value: "/day",
                    accent: vm.status_class(),
                }
                StatCard { title: "Gap", value: "High".to_string(), desc: "Hard Graphs", accent: "accent--red" }
                StatCard { title: "Mastery", value: vm.mastered.to_string(), accent: "accent--green" }
            }

            section { class: "panel",
                h3 { "Phase Progress" }
                for phase in phases {
                    PhaseBar { key: "{phase.title}", phase }
                }
            }
        }
    }
}

#[component]
fn StatCard(
    title: &'static str,
    value: String,
    accent: &'static str,
    #[props(default)] sub_value: Option<&'static str>,
    #[props(default)] desc: Option<&'static str>,
) -> Element {
    rsx! {
        div { class: "stat-card {accent}",
            p { class: "caption", "{title}" }
            h3 { class: "stat-card__value",
                "{value}"
                if let Some(sub) = sub_value {
                    span { class: "stat-card__sub", "{sub}" }
                }
            }
            if let Some(desc) = desc {
                p { class: "stat-card__desc", "{desc}" }
            }
        }
    }
}

#[component]
fn PhaseBar(phase: PhaseBarVm) -> Element {
    rsx! {
        div { class: "phase-bar",
            div { class: "phase-bar__labels",
                span { "{phase.title}" }
                span { class: "muted", "{phase.done}/{phase.total}" }
            }
            div { class: "bar",
                div { class: "bar__fill {phase.accent}", style: "width: {phase.percent}%" }
            }
        }
    }
}
