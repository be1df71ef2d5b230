//! AI Assistant chat. The transcript is append-only and gets exactly one
//! assistant entry per user entry, whether or not the backend answered.

use tracing::{debug, error};

use crate::api_client::ApiClient;
use crate::models::chat::{ChatMessage, ChatMode, Sender};
use crate::models::session::SessionId;
use crate::views::Outcome;

pub const CHAT_ERROR_REPLY: &str = "Sorry, I encountered an error.";

#[derive(Debug, Default)]
pub struct Chat {
    pub input: String,
    mode: ChatMode,
    transcript: Vec<ChatMessage>,
    loading: bool,
}

impl Chat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_mode(&mut self, mode: ChatMode) {
        self.mode = mode;
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn can_send(&self, session: Option<&SessionId>) -> bool {
        !self.loading
            && !self.input.trim().is_empty()
            && session.is_some()
            && self.mode.is_implemented()
    }

    /// Sends the current input. Failures become an inline assistant reply
    /// instead of propagating.
    pub async fn send(&mut self, client: &ApiClient, session: Option<&SessionId>) -> Outcome {
        if !self.can_send(session) {
            return Outcome::Skipped;
        }
        let Some(session) = session else {
            return Outcome::Skipped;
        };

        let question = std::mem::take(&mut self.input);
        self.transcript.push(ChatMessage::user(question.clone()));
        self.loading = true;

        let result = client.chat(session, &question, self.mode).await;
        self.loading = false;

        match result {
            Ok(reply) => {
                debug!("Chat answered ({} chars)", reply.answer.len());
                self.transcript.push(ChatMessage::ai(reply.answer));
                Outcome::Done
            }
            Err(e) => {
                error!("Chat error: {e}");
                self.transcript.push(ChatMessage::ai(CHAT_ERROR_REPLY));
                Outcome::Failed
            }
        }
    }

    pub fn render(&self) -> String {
        let mut lines = vec!["== AI Assistant ==".to_string()];
        lines.push(format!("Mode: {}  (chatmode <multi|single|career>)", self.mode.wire_name()));
        if !self.mode.is_implemented() {
            lines.push("This mode is coming soon.".to_string());
        }
        for message in &self.transcript {
            let who = match message.sender {
                Sender::User => "you",
                Sender::Ai => "ai ",
            };
            lines.push(format!("[{}] {who}: {}", message.sent_at.format("%H:%M:%S"), message.text));
        }
        if self.is_loading() {
            lines.push("AI is thinking...".to_string());
        }
        lines.push(String::new());
        lines.push("Ask about candidates, JDs, or career paths... (type and press Enter)".to_string());
        lines.join("\n")
    }
}
