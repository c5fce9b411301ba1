//! Streaming tutor chat over a WebSocket.

mod client;
mod protocol;
mod transcript;

pub use client::{ChatClient, ChatConnection, ChatEvents, ChatSender};
pub use protocol::{ChatEvent, ClientFrame, parse_server_frame};
pub use transcript::{
    CONNECTION_LOST, ChatMessage, ChatRole, ChatTranscript, GREETING, SUGGESTED_PROMPTS,
};
