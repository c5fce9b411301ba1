use serde::{Deserialize, Serialize};

/// Frame sent by the client for every user message.
#[derive(Debug, Serialize)]
pub struct ClientFrame<'a> {
    pub message: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ServerFrame {
    Chunk { content: String },
    Done,
}

/// Decoded server notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// Next piece of the assistant reply.
    Chunk(String),
    /// The current reply is complete.
    Done,
    /// The server closed the socket.
    Closed,
    /// Transport failure; the connection is unusable afterwards.
    Error(String),
}

/// Parses a text frame. Unknown or malformed frames yield `None`.
#[must_use]
pub fn parse_server_frame(text: &str) -> Option<ChatEvent> {
    match serde_json::from_str::<ServerFrame>(text) {
        Ok(ServerFrame::Chunk { content }) => Some(ChatEvent::Chunk(content)),
        Ok(ServerFrame::Done) => Some(ChatEvent::Done),
        Err(err) => {
            tracing::debug!(error = %err, frame = text, "ignoring chat frame");
            None
        }
    }
}
