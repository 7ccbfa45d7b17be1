//! Code generation result model.

use serde_json::{Map, Value};

/// A structured code-generation result from the AI service.
///
/// `files` is the raw path-to-content mapping exactly as the service
/// returned it; the orchestrator normalizes it before merging. Title and
/// explanation are optional metadata used to derive project summaries.
#[derive(Debug, Clone, Default)]
pub struct CodeGeneration {
    /// Raw generated file mapping.
    pub files: Map<String, Value>,
    /// Optional AI-suggested project title.
    pub project_title: Option<String>,
    /// Optional explanation of the generated project.
    pub explanation: Option<String>,
}
