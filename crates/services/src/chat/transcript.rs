use super::protocol::ChatEvent;

pub const GREETING: &str = "Hi! I'm your Senior DSA Tutor. I can help you break down this problem, analyze complexity, or review your code. What's on your mind?";
pub const CONNECTION_LOST: &str = "Connection lost. Please close and reopen the chat.";

pub const SUGGESTED_PROMPTS: [&str; 4] = [
    "Explain the time complexity",
    "Give me a hint for this problem",
    "Optimize my solution",
    "What is the edge case here?",
];

const STREAMING_ID: &str = "streaming";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    id: String,
    role: ChatRole,
    content: String,
}

impl ChatMessage {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn role(&self) -> ChatRole {
        self.role
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Still receiving chunks.
    #[must_use]
    pub fn is_streaming(&self) -> bool {
        self.id == STREAMING_ID
    }
}

/// Ordered message list for one chat panel.
///
/// Pure state; the socket task feeds it events and the view renders it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTranscript {
    messages: Vec<ChatMessage>,
    loading: bool,
    next_id: u64,
}

impl Default for ChatTranscript {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatTranscript {
    #[must_use]
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage {
                id: "1".into(),
                role: ChatRole::Assistant,
                content: GREETING.into(),
            }],
            loading: false,
            next_id: 2,
        }
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Waiting for the first chunk of a reply.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    fn allocate_id(&mut self) -> String {
        let id = self.next_id;
        self.next_id += 1;
        id.to_string()
    }

    /// Appends a user message. Blank input is ignored and returns `false`.
    pub fn push_user(&mut self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        let id = self.allocate_id();
        self.messages.push(ChatMessage {
            id,
            role: ChatRole::User,
            content: text.to_string(),
        });
        self.loading = true;
        true
    }

    pub fn apply(&mut self, event: ChatEvent) {
        match event {
            ChatEvent::Chunk(content) => self.push_chunk(&content),
            ChatEvent::Done => self.finish_stream(),
            ChatEvent::Closed => self.loading = false,
            ChatEvent::Error(_) => self.connection_lost(),
        }
    }

    fn push_chunk(&mut self, content: &str) {
        match self.messages.last_mut() {
            Some(last) if last.role == ChatRole::Assistant && last.is_streaming() => {
                last.content.push_str(content);
            }
            _ => self.messages.push(ChatMessage {
                id: STREAMING_ID.into(),
                role: ChatRole::Assistant,
                content: content.to_string(),
            }),
        }
        self.loading = false;
    }

    fn finish_stream(&mut self) {
        let id = self.allocate_id();
        if let Some(last) = self.messages.last_mut().filter(|last| last.is_streaming()) {
            last.id = id;
        }
        self.loading = false;
    }

    /// Stops waiting and tells the user the socket is gone.
    pub fn connection_lost(&mut self) {
        self.finish_stream();
        let id = self.allocate_id();
        self.messages.push(ChatMessage {
            id,
            role: ChatRole::Assistant,
            content: CONNECTION_LOST.into(),
        });
    }
}
