//! Workspace document model.

use crate::session::ConversationMessage;
use serde_json::{Map, Value};

/// The document a Workspace backend stores per session: the chat history
/// plus the raw file mapping.
///
/// `file_data` stays raw JSON here; the routing layer normalizes it into
/// a `FileSet` before handing it to any other component.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceSnapshot {
    /// Stored conversation, verbatim.
    pub messages: Vec<ConversationMessage>,
    /// Stored file mapping, as-is from the backend.
    pub file_data: Map<String, Value>,
}
