use dioxus::prelude::*;
use prep_core::model::ExperienceLevel;

use crate::context::AppContext;
use crate::shell::ShellState;
use crate::vm::{LoginForm, LoginMode, auth_error_message, experience_option_label};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SubmitState {
    Idle,
    Submitting,
}

/// Onboarding gate: account sign-in, registration or a local-only profile.
#[component]
pub fn LoginView() -> Element {
    let ctx = use_context::<AppContext>();
    let shell = use_context::<ShellState>();

    let mut mode = use_signal(LoginMode::default);
    let mut form = use_signal(LoginForm::default);
    let mut error = use_signal(|| None::<String>);
    let mut submit_state = use_signal(|| SubmitState::Idle);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let current = mode();
        let values = form.read().clone();
        if submit_state() == SubmitState::Submitting || !values.can_submit(current) {
            return;
        }
        submit_state.set(SubmitState::Submitting);
        error.set(None);
        let ctx = ctx.clone();
        spawn(async move {
            let users = ctx.users();
            let result = match current {
                LoginMode::SignIn => users.login(values.email.trim(), &values.password).await,
                LoginMode::Register => users.register(values.registration()).await,
                LoginMode::Offline => users.save_local_user(values.profile()).await,
            };
            submit_state.set(SubmitState::Idle);
            match result {
                Ok(user) => shell.sign_in(&ctx, user),
                Err(err) => {
                    tracing::warn!(error = %err, "sign-in failed");
                    error.set(Some(auth_error_message(&err)));
                }
            }
        });
    };

    let current = mode();
    let values = form.read().clone();
    let busy = submit_state() == SubmitState::Submitting;
    let can_submit = values.can_submit(current) && !busy;
    let submit_label = if busy { "CONNECTING..." } else { current.submit_label() };

    rsx! {
        div { class: "login",
            div { class: "login__card",
                header { class: "login__header",
                    h1 { "SDE-1 MASTERY" }
                    p { class: "muted", "Amazon interview preparation protocol" }
                }

                div { class: "login__tabs", role: "tablist",
                    for option in LoginMode::ALL {
                        button {
                            key: "{option.label()}",
                            class: if option == current { "tab tab--active" } else { "tab" },
                            r#type: "button",
                            onclick: move |_| {
                                mode.set(option);
                                error.set(None);
                            },
                            "{option.label()}"
                        }
                    }
                }

                form { class: "login__form", onsubmit: on_submit,
                    if current.needs_credentials() {
                        label { class: "field",
                            span { class: "caption", "EMAIL" }
                            input {
                                r#type: "email",
                                value: "{values.email}",
                                placeholder: "you@example.com",
                                oninput: move |evt| form.write().email = evt.value(),
                            }
                        }
                        label { class: "field",
                            span { class: "caption", "PASSWORD" }
                            input {
                                r#type: "password",
                                value: "{values.password}",
                                oninput: move |evt| form.write().password = evt.value(),
                            }
                        }
                    }
                    if current.needs_profile() {
                        label { class: "field",
                            span { class: "caption", "CANDIDATE_ID" }
                            input {
                                r#type: "text",
                                value: "{values.name}",
                                placeholder: "Enter your name",
                                oninput: move |evt| form.write().name = evt.value(),
                            }
                        }
                        label { class: "field",
                            span { class: "caption", "EXPERIENCE_LEVEL" }
                            select {
                                value: "{values.experience_level.label()}",
                                onchange: move |evt| {
                                    if let Ok(level) = ExperienceLevel::from_label(&evt.value()) {
                                        form.write().experience_level = level;
                                    }
                                },
                                for level in ExperienceLevel::ALL {
                                    option {
                                        key: "{level.label()}",
                                        value: "{level.label()}",
                                        selected: level == values.experience_level,
                                        "{experience_option_label(level)}"
                                    }
                                }
                            }
                        }
                        label { class: "field",
                            span { class: "caption", "TARGET_INTERVIEW_DATE" }
                            input {
                                r#type: "date",
                                value: "{values.target_date}",
                                oninput: move |evt| form.write().target_date = evt.value(),
                            }
                        }
                    }

                    if let Some(message) = error() {
                        p { class: "login__error", role: "alert", "{message}" }
                    }

                    button {
                        class: "btn btn-primary login__submit",
                        r#type: "submit",
                        disabled: !can_submit,
                        "{submit_label}"
                    }
                }
            }
        }
    }
}
