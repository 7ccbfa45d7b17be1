//! Workspace store trait.

use super::model::WorkspaceSnapshot;
use crate::error::Result;
use crate::fileset::FileSet;
use crate::session::ConversationMessage;
use async_trait::async_trait;

/// An abstract store for the ephemeral Workspace backend.
///
/// The backend is keyed by storage id and supports a get-by-id plus two
/// independent field updates; it has no support for arbitrary queries.
#[async_trait]
pub trait WorkspaceStore: Send + Sync {
    /// Fetches the stored document.
    ///
    /// Returns `Ok(None)` when the workspace does not exist; callers fall
    /// back to the default scaffold.
    async fn fetch(&self, storage_id: &str) -> Result<Option<WorkspaceSnapshot>>;

    /// Replaces the stored conversation.
    async fn update_messages(
        &self,
        storage_id: &str,
        messages: &[ConversationMessage],
    ) -> Result<()>;

    /// Replaces the stored file mapping.
    async fn update_files(&self, storage_id: &str, files: &FileSet) -> Result<()>;
}
