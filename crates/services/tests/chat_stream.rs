use futures_util::{SinkExt, StreamExt};
use prep_core::model::ChatSessionId;
use services::ApiConfig;
use services::chat::{ChatClient, ChatEvent, ChatTranscript};
use tokio::net::TcpListener;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

/// Replies to each user message with two chunks and a done frame, echoing
/// the received payload so the test can check the outgoing encoding.
async fn spawn_tutor() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (tcp, _) = listener.accept().await.unwrap();
        let mut socket = accept_async(tcp).await.unwrap();
        while let Some(Ok(frame)) = socket.next().await {
            let Message::Text(text) = frame else {
                continue;
            };
            let request: serde_json::Value = serde_json::from_str(text.as_str()).unwrap();
            let message = request["message"].as_str().unwrap().to_string();
            let frames = [
                serde_json::json!({"type": "chunk", "content": "You said: "}),
                serde_json::json!({"type": "typing"}),
                serde_json::json!({"type": "chunk", "content": message}),
                serde_json::json!({"type": "done"}),
            ];
            for frame in frames {
                socket
                    .send(Message::Text(frame.to_string().into()))
                    .await
                    .unwrap();
            }
            if message == "bye" {
                socket.close(None).await.unwrap();
                break;
            }
        }
    });

    format!("ws://{addr}/chat/ws")
}

fn client_for(chat_url: &str) -> ChatClient {
    let config = ApiConfig::new("http://127.0.0.1:1/api/v1", chat_url).unwrap();
    ChatClient::new(config)
}

#[tokio::test]
async fn streamed_reply_assembles_in_transcript() {
    let chat_url = spawn_tutor().await;
    let client = client_for(&chat_url);
    let connection = client.connect(&ChatSessionId::generate()).await.unwrap();
    let (sender, mut events) = connection.into_parts();

    let mut transcript = ChatTranscript::new();
    assert!(transcript.push_user("heaps?"));
    sender.send("heaps?").unwrap();

    loop {
        let event = events.next().await.expect("stream ended early");
        let done = event == ChatEvent::Done;
        transcript.apply(event);
        if done {
            break;
        }
    }

    let reply = transcript.messages().last().unwrap();
    assert_eq!(reply.content(), "You said: heaps?");
    assert!(!reply.is_streaming());
    assert!(!transcript.is_loading());
}

#[tokio::test]
async fn server_close_is_reported() {
    let chat_url = spawn_tutor().await;
    let client = client_for(&chat_url);
    let (sender, mut events) = client
        .connect(&ChatSessionId::generate())
        .await
        .unwrap()
        .into_parts();

    sender.send("bye").unwrap();

    let mut received = Vec::new();
    while let Some(event) = events.next().await {
        let closed = event == ChatEvent::Closed;
        received.push(event);
        if closed {
            break;
        }
    }

    assert_eq!(
        received,
        vec![
            ChatEvent::Chunk("You said: ".into()),
            ChatEvent::Chunk("bye".into()),
            ChatEvent::Done,
            ChatEvent::Closed,
        ]
    );
}

#[tokio::test]
async fn unreachable_server_fails_to_connect() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(&format!("ws://{addr}/chat/ws"));
    assert!(client.connect(&ChatSessionId::generate()).await.is_err());
}
