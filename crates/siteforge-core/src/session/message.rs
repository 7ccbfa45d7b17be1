//! Conversation message types.

use serde::{Deserialize, Serialize};

/// Represents the role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message typed by the user.
    User,
    /// Message produced by the AI assistant. Older stored conversations
    /// used the `ai` tag, so it is still accepted on read.
    #[serde(alias = "ai")]
    Assistant,
}

/// A single message in a conversation history.
///
/// The conversation is an ordered, append-only sequence owned by the
/// active session. The full sequence is what gets sent to the AI service
/// and what Workspace sessions persist as chat history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    /// The role of the message sender.
    pub role: MessageRole,
    /// The content of the message.
    pub content: String,
}

impl ConversationMessage {
    /// Creates a user-authored message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// Creates an assistant-authored message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Returns the first user-authored message in the sequence, if any.
pub fn first_user_message(messages: &[ConversationMessage]) -> Option<&ConversationMessage> {
    messages.iter().find(|m| m.role == MessageRole::User)
}

/// Returns the most recent user-authored message in the sequence, if any.
pub fn latest_user_message(messages: &[ConversationMessage]) -> Option<&ConversationMessage> {
    messages.iter().rev().find(|m| m.role == MessageRole::User)
}
