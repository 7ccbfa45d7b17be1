//! HTTP implementation of the Workspace store.

use crate::dto::{UpdateFilesBody, UpdateMessagesBody, WorkspaceDoc};
use crate::http::ensure_success;
use async_trait::async_trait;
use reqwest::Client;
use siteforge_core::error::Result;
use siteforge_core::fileset::FileSet;
use siteforge_core::session::ConversationMessage;
use siteforge_core::workspace::{WorkspaceSnapshot, WorkspaceStore};

/// Workspace backend client.
///
/// The backend exposes a get-by-id plus two independent field updates,
/// keyed by storage id.
#[derive(Clone)]
pub struct HttpWorkspaceStore {
    client: Client,
    base_url: String,
}

impl HttpWorkspaceStore {
    /// Creates a client against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn workspace_url(&self, storage_id: &str) -> String {
        format!("{}/api/workspaces/{storage_id}", self.base_url)
    }
}

#[async_trait]
impl WorkspaceStore for HttpWorkspaceStore {
    async fn fetch(&self, storage_id: &str) -> Result<Option<WorkspaceSnapshot>> {
        let response = self
            .client
            .get(self.workspace_url(storage_id))
            .send()
            .await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = ensure_success(response, "workspace", storage_id).await?;
        let doc: WorkspaceDoc = response.json().await?;
        Ok(Some(doc.into()))
    }

    async fn update_messages(
        &self,
        storage_id: &str,
        messages: &[ConversationMessage],
    ) -> Result<()> {
        tracing::debug!(storage_id, count = messages.len(), "updating workspace messages");
        let response = self
            .client
            .put(format!("{}/messages", self.workspace_url(storage_id)))
            .json(&UpdateMessagesBody { messages })
            .send()
            .await?;
        ensure_success(response, "workspace", storage_id).await?;
        Ok(())
    }

    async fn update_files(&self, storage_id: &str, files: &FileSet) -> Result<()> {
        tracing::debug!(storage_id, count = files.len(), "updating workspace files");
        let response = self
            .client
            .put(format!("{}/files", self.workspace_url(storage_id)))
            .json(&UpdateFilesBody { files })
            .send()
            .await?;
        ensure_success(response, "workspace", storage_id).await?;
        Ok(())
    }
}
