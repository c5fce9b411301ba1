use dioxus::prelude::*;
use prep_core::model::ChatSessionId;
use services::chat::{ChatEvent, ChatRole, ChatSender, ChatTranscript, SUGGESTED_PROMPTS};

use crate::context::AppContext;
use crate::vm::{ChatBlock, split_chat_content};

/// Floating tutor chat. The socket opens with the panel and closes with it;
/// each panel instance keeps one session id.
#[component]
pub fn ChatPanel() -> Element {
    let ctx = use_context::<AppContext>();

    let session = use_hook(ChatSessionId::generate);
    let mut open = use_signal(|| false);
    let mut expanded = use_signal(|| false);
    let mut input = use_signal(String::new);
    let mut transcript = use_signal(ChatTranscript::new);
    let mut sender = use_signal(|| None::<ChatSender>);
    let mut reader = use_signal(|| None::<Task>);

    let mut connect = move || {
        let client = ctx.chat();
        let session = session.clone();
        let task = spawn(async move {
            let connection = match client.connect(&session).await {
                Ok(connection) => connection,
                Err(err) => {
                    tracing::warn!(error = %err, "tutor chat unavailable");
                    return;
                }
            };
            let (tx, mut events) = connection.into_parts();
            sender.set(Some(tx));
            while let Some(event) = events.next().await {
                let closed = matches!(event, ChatEvent::Closed | ChatEvent::Error(_));
                transcript.write().apply(event);
                if closed {
                    break;
                }
            }
            sender.set(None);
        });
        reader.set(Some(task));
    };

    let mut close = move || {
        if let Some(task) = reader.write().take() {
            task.cancel();
        }
        sender.set(None);
        open.set(false);
    };

    let mut send = move |text: String| {
        if !transcript.write().push_user(&text) {
            return;
        }
        input.set(String::new());
        let delivered = sender
            .read()
            .as_ref()
            .is_some_and(|active| active.send(&text).is_ok());
        if !delivered {
            tracing::debug!("tutor chat not connected");
            transcript.write().connection_lost();
        }
    };

    if !open() {
        return rsx! {
            button {
                class: "chat-launcher",
                id: "chat-open",
                r#type: "button",
                onclick: move |_| {
                    open.set(true);
                    connect();
                },
                "✦ Ask AI Tutor"
            }
        };
    }

    let messages = transcript.read().messages().to_vec();
    let loading = transcript.read().is_loading();
    let show_prompts = messages.len() <= 1;

    rsx! {
        div { class: if expanded() { "chat chat--expanded" } else { "chat" },
            header { class: "chat__header",
                div {
                    h3 { "Amazon SDE Tutor" }
                    p { class: "caption", "Online" }
                }
                div { class: "chat__actions",
                    button {
                        class: "btn btn-ghost",
                        r#type: "button",
                        title: if expanded() { "Minimize width" } else { "Expand width" },
                        onclick: move |_| expanded.toggle(),
                        if expanded() { "⇲" } else { "⇱" }
                    }
                    button {
                        class: "btn btn-ghost",
                        id: "chat-close",
                        r#type: "button",
                        onclick: move |_| close(),
                        "▾"
                    }
                }
            }

            div { class: "chat__messages",
                for message in messages {
                    div {
                        key: "{message.id()}",
                        class: bubble_class(message.role()),
                        for (index, block) in split_chat_content(message.content()).into_iter().enumerate() {
                            ChatBlockView { key: "{index}", block }
                        }
                    }
                }
                if loading {
                    div { class: "chat__typing", "Thinking..." }
                }
            }

            if show_prompts {
                div { class: "chat__prompts",
                    for prompt in SUGGESTED_PROMPTS {
                        button {
                            key: "{prompt}",
                            class: "chip",
                            r#type: "button",
                            onclick: move |_| send(prompt.to_string()),
                            "{prompt}"
                        }
                    }
                }
            }

            div { class: "chat__input",
                textarea {
                    rows: "1",
                    placeholder: "Ask about complexity, edge cases...",
                    value: "{input}",
                    oninput: move |evt| input.set(evt.value()),
                    onkeydown: move |evt| {
                        if evt.data.key() == Key::Enter && !evt.data.modifiers().contains(Modifiers::SHIFT) {
                            evt.prevent_default();
                            send(input());
                        }
                    },
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: input.read().trim().is_empty() || loading,
                    onclick: move |_| send(input()),
                    "Send"
                }
            }
        }
    }
}

fn bubble_class(role: ChatRole) -> &'static str {
    match role {
        ChatRole::User => "chat__bubble chat__bubble--user",
        ChatRole::Assistant => "chat__bubble chat__bubble--assistant",
    }
}

#[component]
fn ChatBlockView(block: ChatBlock) -> Element {
    match block {
        ChatBlock::Code { lang, code } => rsx! {
            div { class: "chat__code",
                div { class: "chat__code-header", "{ChatBlock::code_label(&lang)}" }
                pre { code { "{code}" } }
            }
        },
        ChatBlock::Text(spans) => rsx! {
            span { class: "chat__text",
                for (index, span) in spans.into_iter().enumerate() {
                    if span.bold {
                        strong { key: "{index}", "{span.text}" }
                    } else {
                        span { key: "{index}", "{span.text}" }
                    }
                }
            }
        },
    }
}
