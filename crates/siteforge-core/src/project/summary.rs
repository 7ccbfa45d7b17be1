//! Lossy project summary derivation.
//!
//! Project sessions have no chat-history field, so a denormalized title
//! and description are derived from the conversation and the latest
//! generation result. These summaries are best-effort and never treated
//! as authoritative.

use crate::session::{ConversationMessage, first_user_message, latest_user_message};

const TITLE_MAX_CHARS: usize = 50;
const LATEST_MAX_CHARS: usize = 100;
const FALLBACK_TITLE: &str = "Untitled Project";
const FALLBACK_DESCRIPTION: &str = "AI-generated project created from user prompt";

/// Derives a project title: the AI-provided title when present,
/// otherwise the first user message truncated to 50 characters.
pub fn derive_title(
    messages: &[ConversationMessage],
    generated_title: Option<&str>,
) -> String {
    if let Some(title) = generated_title {
        let trimmed = title.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    match first_user_message(messages) {
        Some(message) => truncate_with_ellipsis(&message.content, TITLE_MAX_CHARS),
        None => FALLBACK_TITLE.to_string(),
    }
}

/// Derives a project description: the AI-provided explanation when
/// present, otherwise a fixed fallback.
pub fn derive_description(explanation: Option<&str>) -> String {
    match explanation {
        Some(text) if !text.trim().is_empty() => text.trim().to_string(),
        _ => FALLBACK_DESCRIPTION.to_string(),
    }
}

/// Folds the latest user message into an existing description,
/// append-style and truncated. This is the intentionally lossy
/// chat-history substitute for Project sessions.
pub fn fold_description(existing: &str, messages: &[ConversationMessage]) -> String {
    match latest_user_message(messages) {
        Some(message) => format!(
            "{} | Latest: {}",
            existing,
            truncate_with_ellipsis(&message.content, LATEST_MAX_CHARS)
        ),
        None => existing.to_string(),
    }
}

fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_chars).collect();
    format!("{truncated}...")
}
