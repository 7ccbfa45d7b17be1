//! AI service trait.

use super::model::CodeGeneration;
use crate::error::Result;
use async_trait::async_trait;

/// The AI collaborator the orchestrator drives.
///
/// Requests carry the serialized conversation history plus a fixed
/// task-specific instruction suffix. Any non-success status or payload
/// missing its expected fields is a hard failure for that call; the
/// engine never retries automatically.
#[async_trait]
pub trait AiService: Send + Sync {
    /// Produces a single chat reply for the given prompt.
    async fn chat(&self, prompt: &str) -> Result<String>;

    /// Rewrites a user prompt into a more specific one.
    async fn enhance_prompt(&self, prompt: &str) -> Result<String>;

    /// Generates a multi-file source tree for the given prompt.
    async fn generate_code(&self, prompt: &str) -> Result<CodeGeneration>;
}
