//! Backend routing.
//!
//! A `BackendRouter` is constructed once per session from the resolved
//! `SessionId` and dispatches every read and write to exactly one of the
//! two stores. One session never touches both backends.

use siteforge_core::error::{Result, SiteforgeError};
use siteforge_core::fileset::{FileSet, default_scaffold};
use siteforge_core::project::{
    NewProject, ProjectPatch, ProjectStore, fold_description,
};
use siteforge_core::session::{ConversationMessage, SessionId};
use siteforge_core::workspace::WorkspaceStore;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Metadata captured when a project row has to be created on first save:
/// the originating user prompt and a derived title/description.
#[derive(Debug, Clone, Default)]
pub struct ProjectSeed {
    pub title: String,
    pub description: String,
    pub prompt: String,
}

/// Routes all session reads and writes to the backend that owns the
/// session.
///
/// Stores are injected explicitly so tests can substitute in-memory
/// implementations. For Project sessions the router tracks the bound
/// project id: if a save finds no row under the bound id, it creates one
/// and the newly assigned id stays bound for every later save in the
/// session.
pub struct BackendRouter {
    session: SessionId,
    workspaces: Arc<dyn WorkspaceStore>,
    projects: Arc<dyn ProjectStore>,
    bound_project: Mutex<Option<String>>,
}

impl BackendRouter {
    /// Creates a router for the given resolved session.
    pub fn new(
        session: SessionId,
        workspaces: Arc<dyn WorkspaceStore>,
        projects: Arc<dyn ProjectStore>,
    ) -> Self {
        let bound_project = match &session {
            SessionId::Project { storage_id } => Some(storage_id.clone()),
            SessionId::Workspace { .. } => None,
        };
        Self {
            session,
            workspaces,
            projects,
            bound_project: Mutex::new(bound_project),
        }
    }

    /// The session this router serves.
    pub fn session(&self) -> &SessionId {
        &self.session
    }

    /// Loads the conversation history.
    ///
    /// The Project backend has no chat-history field, so Project sessions
    /// get a synthesized two-message seed conversation built from the
    /// stored prompt, title, and description.
    pub async fn load_conversation(&self) -> Result<Vec<ConversationMessage>> {
        match &self.session {
            SessionId::Workspace { storage_id } => {
                let snapshot = self.workspaces.fetch(storage_id).await?;
                Ok(snapshot.map(|s| s.messages).unwrap_or_default())
            }
            SessionId::Project { storage_id } => {
                let record = self.projects.get(storage_id).await?;
                if record.prompt.is_empty() {
                    return Ok(Vec::new());
                }
                Ok(vec![
                    ConversationMessage::user(record.prompt.clone()),
                    ConversationMessage::assistant(format!(
                        "I've loaded your project: \"{}\". {}",
                        record.title, record.description
                    )),
                ])
            }
        }
    }

    /// Loads the file tree, normalized and merged over the default
    /// scaffold so callers always get a runnable file set even when
    /// storage is empty or partially corrupt.
    pub async fn load_files(&self) -> Result<FileSet> {
        let raw = match &self.session {
            SessionId::Workspace { storage_id } => self
                .workspaces
                .fetch(storage_id)
                .await?
                .map(|s| s.file_data)
                .unwrap_or_default(),
            SessionId::Project { storage_id } => {
                let record = self.projects.get(storage_id).await?;
                match record.files {
                    Some(serde_json::Value::Object(map)) => map,
                    _ => serde_json::Map::new(),
                }
            }
        };
        let stored = FileSet::normalize(&raw);
        Ok(default_scaffold().merge(&stored))
    }

    /// Persists the conversation.
    ///
    /// Workspace sessions store the sequence verbatim. Project sessions
    /// fold the latest user message into the project description instead;
    /// an intentionally lossy substitute, since the Project backend has no
    /// first-class chat history.
    pub async fn save_conversation(&self, messages: &[ConversationMessage]) -> Result<()> {
        match &self.session {
            SessionId::Workspace { storage_id } => {
                self.workspaces.update_messages(storage_id, messages).await
            }
            SessionId::Project { .. } => {
                let bound = self.bound_project.lock().await;
                let id = bound
                    .as_deref()
                    .ok_or_else(|| SiteforgeError::internal("project session has no bound id"))?;
                let record = self.projects.get(id).await?;
                let description = fold_description(&record.description, messages);
                self.projects
                    .update(id, &ProjectPatch::description(description))
                    .await?;
                Ok(())
            }
        }
    }

    /// Persists the full file tree.
    ///
    /// For Project sessions this is an upsert: if no row exists under the
    /// bound id, one is created from `seed` and the new id becomes sticky,
    /// so the next save updates instead of creating a second project.
    pub async fn save_files(&self, files: &FileSet, seed: &ProjectSeed) -> Result<()> {
        match &self.session {
            SessionId::Workspace { storage_id } => {
                self.workspaces.update_files(storage_id, files).await
            }
            SessionId::Project { .. } => {
                let mut bound = self.bound_project.lock().await;
                if let Some(id) = bound.clone() {
                    match self
                        .projects
                        .update(&id, &ProjectPatch::files(files.clone()))
                        .await
                    {
                        Ok(_) => return Ok(()),
                        Err(err) if err.is_not_found() => {
                            tracing::debug!(id = %id, "bound project missing; creating a new one");
                        }
                        Err(err) => return Err(err),
                    }
                }
                let created = self
                    .projects
                    .create(&NewProject {
                        title: seed.title.clone(),
                        description: seed.description.clone(),
                        prompt: seed.prompt.clone(),
                        files: files.clone(),
                        thumbnail: None,
                    })
                    .await?;
                tracing::debug!(id = %created.id, "created project on first save");
                *bound = Some(created.id);
                Ok(())
            }
        }
    }
}
