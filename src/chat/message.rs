use crate::content::{segment, Segment};
use uuid::Uuid;

pub const WELCOME_TEXT: &str =
    "Hi! I am Gemini. Ask me anything. I can help you with math and physics!";

/// Opaque identity of a record. Never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordId(Uuid);

impl RecordId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Who produced a record. Decides styling only, never parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
    Error,
}

impl Sender {
    pub fn avatar(self) -> &'static str {
        match self {
            Sender::User => "🧑",
            Sender::Bot => "🤖",
            Sender::Error => "⚠️",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Bot => "Gemini",
            Sender::Error => "Error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Text(String),
    /// Stands in for a reply that has not arrived yet.
    Pending,
}

/// Represents one entry in the chat transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRecord {
    pub id: RecordId,
    pub sender: Sender,
    pub body: Body,
}

impl ChatRecord {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: RecordId::new(),
            sender,
            body: Body::Text(text.into()),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Sender::Bot, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(Sender::Error, text)
    }

    pub fn welcome() -> Self {
        Self::bot(WELCOME_TEXT)
    }

    /// Placeholder shown while a reply is awaited
    pub fn pending() -> Self {
        Self {
            id: RecordId::new(),
            sender: Sender::Bot,
            body: Body::Pending,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.body == Body::Pending
    }

    pub fn text(&self) -> Option<&str> {
        match &self.body {
            Body::Text(text) => Some(text),
            Body::Pending => None,
        }
    }

    /// Segments of this record's text, recomputed on every call.
    pub fn segments(&self) -> Vec<Segment<'_>> {
        self.text().map(segment).unwrap_or_default()
    }
}
