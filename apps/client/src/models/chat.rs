use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

/// One transcript entry. `sent_at` orders the transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
            sent_at: Utc::now(),
        }
    }

    pub fn ai(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Ai,
            text: text.into(),
            sent_at: Utc::now(),
        }
    }
}

/// Interaction mode sent with every chat request.
/// Only `MultiCandidate` is served by the backend today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChatMode {
    #[default]
    MultiCandidate,
    SingleCandidate,
    CareerPath,
}

impl ChatMode {
    pub fn wire_name(&self) -> &'static str {
        match self {
            ChatMode::MultiCandidate => "multi-candidate",
            ChatMode::SingleCandidate => "single-candidate",
            ChatMode::CareerPath => "career-path",
        }
    }

    pub fn is_implemented(&self) -> bool {
        matches!(self, ChatMode::MultiCandidate)
    }

    /// Accepts the wire name or its first word (`multi`, `single`, `career`).
    pub fn parse(raw: &str) -> Option<ChatMode> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "multi-candidate" | "multi" => Some(ChatMode::MultiCandidate),
            "single-candidate" | "single" => Some(ChatMode::SingleCandidate),
            "career-path" | "career" => Some(ChatMode::CareerPath),
            _ => None,
        }
    }
}

/// `POST /api/chat`
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub session_id: &'a str,
    pub question: &'a str,
    pub mode: &'static str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatAnswer {
    pub answer: String,
}
