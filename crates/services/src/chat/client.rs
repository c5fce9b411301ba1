use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use url::Url;

use prep_core::model::ChatSessionId;

use super::protocol::{ChatEvent, ClientFrame, parse_server_frame};
use crate::config::ApiConfig;
use crate::error::ChatError;

/// Opens chat sockets against the configured backend.
#[derive(Clone, Debug)]
pub struct ChatClient {
    config: ApiConfig,
}

impl ChatClient {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    /// Socket address for a session.
    ///
    /// # Errors
    ///
    /// Returns `ChatError::InvalidUrl` if the configured base cannot be joined.
    pub fn session_url(&self, session: &ChatSessionId) -> Result<Url, ChatError> {
        Ok(Url::parse(&self.config.chat_session_url(session.as_str()))?)
    }

    /// Connects and starts the reader and writer tasks.
    ///
    /// # Errors
    ///
    /// Returns `ChatError` if the url is invalid or the handshake fails.
    pub async fn connect(&self, session: &ChatSessionId) -> Result<ChatConnection, ChatError> {
        let url = self.session_url(session)?;
        let (stream, _response) = connect_async(url.as_str()).await?;
        tracing::info!(session = %session, "chat connected");
        let (mut sink, mut source) = stream.split();

        let (outgoing_tx, mut outgoing_rx) = mpsc::unbounded_channel::<String>();
        let (events_tx, events_rx) = mpsc::unbounded_channel::<ChatEvent>();

        tokio::spawn(async move {
            while let Some(payload) = outgoing_rx.recv().await {
                if let Err(err) = sink.send(Message::Text(payload.into())).await {
                    tracing::warn!(error = %err, "chat send failed");
                    return;
                }
            }
            // every sender is gone: the panel was closed
            let _ = sink.close().await;
        });

        let reader = tokio::spawn(async move {
            while let Some(frame) = source.next().await {
                let event = match frame {
                    Ok(Message::Text(text)) => parse_server_frame(text.as_str()),
                    Ok(Message::Close(_)) => break,
                    Ok(_) => None,
                    Err(err) => {
                        tracing::warn!(error = %err, "chat socket error");
                        let _ = events_tx.send(ChatEvent::Error(err.to_string()));
                        return;
                    }
                };
                if let Some(event) = event {
                    if events_tx.send(event).is_err() {
                        return;
                    }
                }
            }
            tracing::info!("chat disconnected");
            let _ = events_tx.send(ChatEvent::Closed);
        });

        Ok(ChatConnection {
            sender: ChatSender { outgoing: outgoing_tx },
            events: ChatEvents {
                events: events_rx,
                reader,
            },
        })
    }
}

/// A live chat socket, split into its sending and receiving halves.
pub struct ChatConnection {
    sender: ChatSender,
    events: ChatEvents,
}

impl ChatConnection {
    #[must_use]
    pub fn into_parts(self) -> (ChatSender, ChatEvents) {
        (self.sender, self.events)
    }
}

/// Queues user messages for the writer task.
#[derive(Clone, Debug)]
pub struct ChatSender {
    outgoing: mpsc::UnboundedSender<String>,
}

impl ChatSender {
    /// # Errors
    ///
    /// Returns `ChatError::Closed` once the socket writer has stopped.
    pub fn send(&self, message: &str) -> Result<(), ChatError> {
        let payload = serde_json::to_string(&ClientFrame { message })?;
        self.outgoing.send(payload).map_err(|_| ChatError::Closed)
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.outgoing.is_closed()
    }
}

/// Server notifications in receipt order. Dropping it tears the socket down.
pub struct ChatEvents {
    events: mpsc::UnboundedReceiver<ChatEvent>,
    reader: JoinHandle<()>,
}

impl ChatEvents {
    /// Next event, or `None` after the reader stopped and drained.
    pub async fn next(&mut self) -> Option<ChatEvent> {
        self.events.recv().await
    }
}

impl Drop for ChatEvents {
    fn drop(&mut self) {
        // the writer exits on its own once every sender is dropped
        self.reader.abort();
    }
}
