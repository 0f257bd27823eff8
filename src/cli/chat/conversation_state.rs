use chrono::{DateTime, Local};

use crate::gemini_client::{Role, Turn};

pub const GREETING: &str = "Hello! I'm Lumina, your AI consultant. How can I help you today?";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Local>,
}

impl Message {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self::at(role, text, Local::now())
    }

    pub fn at(role: Role, text: impl Into<String>, timestamp: DateTime<Local>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp,
        }
    }

    pub fn as_turn(&self) -> Turn {
        Turn::new(self.role, self.text.clone())
    }
}

/// Append-only record of the session's conversation.
pub struct ConversationState {
    messages: Vec<Message>,
}

impl ConversationState {
    /// Starts with the assistant's greeting.
    pub fn new() -> Self {
        Self::with_greeting(Message::new(Role::Model, GREETING))
    }

    pub fn with_greeting(greeting: Message) -> Self {
        Self {
            messages: vec![greeting],
        }
    }

    pub fn add_user_message(&mut self, message: &str) {
        self.push(Message::new(Role::User, message));
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn get_messages(&self) -> &[Message] {
        &self.messages
    }

    /// Most recent message. The greeting guarantees there is one.
    pub fn newest(&self) -> &Message {
        &self.messages[self.messages.len() - 1]
    }

    /// The transcript in provider wire shape, oldest first.
    pub fn turns(&self) -> Vec<Turn> {
        self.messages.iter().map(Message::as_turn).collect()
    }
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}
