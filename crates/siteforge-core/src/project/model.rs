//! Project domain model.
//!
//! Projects are the durable storage resource: they carry richer metadata
//! than workspaces (title, description, originating prompt) but have no
//! first-class chat-history field.

use crate::fileset::FileSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A project resource as returned by the Project backend.
///
/// `files` is kept as raw JSON here; it is normalized into a [`FileSet`]
/// at the routing layer before any other component sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Backend-assigned identifier.
    pub id: String,
    /// Human-readable project title.
    pub title: String,
    /// Free-text description; also doubles as the lossy chat-history
    /// substitute for Project sessions.
    pub description: String,
    /// The user prompt the project was originally created from.
    pub prompt: String,
    /// Raw stored file mapping, if any.
    #[serde(default)]
    pub files: Option<Value>,
    /// Optional preview thumbnail reference.
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// Creation timestamp, if the backend reported one.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last-update timestamp, if the backend reported one.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for creating a new project. All fields are required by the
/// Project backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub prompt: String,
    pub files: FileSet,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

/// Partial update payload. Omitted fields are preserved server-side, so
/// `None` fields are skipped during serialization rather than sent as
/// nulls.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<FileSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl ProjectPatch {
    /// A patch that only replaces the stored files.
    pub fn files(files: FileSet) -> Self {
        Self {
            files: Some(files),
            ..Self::default()
        }
    }

    /// A patch that only replaces the description.
    pub fn description(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Self::default()
        }
    }
}
