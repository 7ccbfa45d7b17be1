//! Wire DTOs for collaborator payloads.
//!
//! These structs pin down the exact JSON shapes exchanged with the AI
//! service and the Workspace backend, keeping field-name quirks
//! (`fileData`, `enhancedPrompt`, `projectTitle`) out of the domain
//! models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use siteforge_core::fileset::FileSet;
use siteforge_core::generation::CodeGeneration;
use siteforge_core::session::ConversationMessage;
use siteforge_core::workspace::WorkspaceSnapshot;

/// Stored workspace document as the Workspace backend returns it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkspaceDoc {
    #[serde(default)]
    pub messages: Vec<ConversationMessage>,
    #[serde(default, rename = "fileData")]
    pub file_data: Map<String, Value>,
}

impl From<WorkspaceDoc> for WorkspaceSnapshot {
    fn from(doc: WorkspaceDoc) -> Self {
        Self {
            messages: doc.messages,
            file_data: doc.file_data,
        }
    }
}

/// Body for the Workspace backend's messages field update.
#[derive(Debug, Serialize)]
pub struct UpdateMessagesBody<'a> {
    pub messages: &'a [ConversationMessage],
}

/// Body for the Workspace backend's files field update.
#[derive(Debug, Serialize)]
pub struct UpdateFilesBody<'a> {
    pub files: &'a FileSet,
}

/// Request body shared by all three AI endpoints.
#[derive(Debug, Serialize)]
pub struct PromptBody<'a> {
    pub prompt: &'a str,
}

/// Response of the chat endpoint.
#[derive(Debug, Deserialize)]
pub struct ChatReply {
    pub result: String,
}

/// Response of the prompt-enhancement endpoint.
#[derive(Debug, Deserialize)]
pub struct EnhanceReply {
    #[serde(rename = "enhancedPrompt")]
    pub enhanced_prompt: String,
}

/// Response of the code-generation endpoint.
///
/// The service reports its own parse failures as a 200 with an `error`
/// field, so that case is modeled here and mapped to a malformed-response
/// error by the client.
#[derive(Debug, Deserialize)]
pub struct CodeGenReply {
    #[serde(default)]
    pub files: Option<Map<String, Value>>,
    #[serde(default, rename = "projectTitle")]
    pub project_title: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl From<CodeGenReply> for CodeGeneration {
    fn from(reply: CodeGenReply) -> Self {
        Self {
            files: reply.files.unwrap_or_default(),
            project_title: reply.project_title,
            explanation: reply.explanation,
        }
    }
}
