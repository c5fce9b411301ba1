use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_route};

use crate::context::AppContext;
use crate::shell::ShellState;
use crate::views::{
    CurriculumView, DashboardView, LoginView, ResourcesView, TopicView, ViewError, ViewState,
    view_state_from_resource,
};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", DashboardView)] Dashboard {},
        #[route("/curriculum", CurriculumView)] Curriculum {},
        #[route("/topic/:id", TopicView)] Topic { id: String },
        #[route("/resources", ResourcesView)] Resources {},
}

/// Loads the stored profile once, then shows either onboarding or the app.
#[component]
fn Layout() -> Element {
    let ctx = use_context::<AppContext>();
    let shell = use_context::<ShellState>();
    let users = ctx.users();

    let resource = use_resource(move || {
        let users = users.clone();
        let mut user = shell.user;
        async move {
            let loaded = users.load_user().await.map_err(|err| {
                tracing::warn!(error = %err, "stored profile unavailable");
                ViewError::Storage
            })?;
            if let Some(loaded) = loaded {
                user.set(Some(loaded));
            }
            Ok::<_, ViewError>(())
        }
    });
    let state = view_state_from_resource(&resource);
    let signed_in = shell.user.read().is_some();

    rsx! {
        match state {
            ViewState::Idle | ViewState::Loading => rsx! {
                div { class: "splash", p { "Loading..." } }
            },
            ViewState::Error(err) => rsx! {
                div { class: "splash",
                    p { "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                }
            },
            ViewState::Ready(()) => rsx! {
                if signed_in {
                    div { class: "app",
                        Sidebar {}
                        main { class: "content",
                            Outlet::<Route> {}
                        }
                    }
                } else {
                    LoginView {}
                }
            },
        }
    }
}

#[component]
fn Sidebar() -> Element {
    let ctx = use_context::<AppContext>();
    let shell = use_context::<ShellState>();
    let route = use_route::<Route>();
    let catalog = ctx.catalog();

    let name = shell
        .user
        .read()
        .as_ref()
        .map(|user| user.name().to_string())
        .unwrap_or_default();
    let initial = name.chars().next().map(String::from).unwrap_or_default();
    let percent = catalog.curriculum().overall_percent(&shell.progress.read());
    let active = |target: &Route| {
        let same = match (&route, target) {
            (Route::Topic { .. }, Route::Curriculum {}) => true,
            (current, target) => current == target,
        };
        if same { "nav-link nav-link--active" } else { "nav-link" }
    };

    rsx! {
        nav { class: "sidebar",
            div { class: "sidebar__brand",
                h1 { "SDE:PREP" }
                div { class: "sidebar__operative",
                    span { class: "sidebar__avatar", "{initial}" }
                    div {
                        p { class: "sidebar__caption", "Operative" }
                        p { class: "sidebar__name", "{name}" }
                    }
                }
            }
            ul { class: "sidebar__nav",
                li { Link { class: active(&Route::Dashboard {}), to: Route::Dashboard {}, "Command Center" } }
                li { Link { class: active(&Route::Curriculum {}), to: Route::Curriculum {}, "Quest Board" } }
                li { Link { class: active(&Route::Resources {}), to: Route::Resources {}, "Intel Database" } }
            }
            div { class: "sidebar__footer",
                div { class: "sidebar__ready",
                    span { "SYS.READY" }
                    span { class: "sidebar__percent", "{percent}%" }
                }
                div { class: "bar",
                    div { class: "bar__fill bar--orange", style: "width: {percent}%" }
                }
                button {
                    class: "btn btn-ghost sidebar__signout",
                    r#type: "button",
                    onclick: move |_| shell.sign_out(&ctx),
                    "Sign out"
                }
            }
        }
    }
}
