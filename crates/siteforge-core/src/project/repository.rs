//! Project store trait.

use super::model::{NewProject, ProjectPatch, ProjectRecord};
use crate::error::Result;
use async_trait::async_trait;

/// An abstract store for the durable Project backend.
///
/// This trait decouples the engine from the backend's REST transport so
/// tests can substitute an in-memory implementation. The engine treats
/// every call as best-effort: failures are surfaced to the caller, never
/// retried automatically.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Fetches a project by id.
    ///
    /// Returns `SiteforgeError::NotFound` if no such project exists; the
    /// router relies on this to upgrade an update into a create.
    async fn get(&self, id: &str) -> Result<ProjectRecord>;

    /// Lists all stored projects.
    async fn list(&self) -> Result<Vec<ProjectRecord>>;

    /// Creates a new project and returns the stored record, including the
    /// backend-assigned identifier.
    async fn create(&self, draft: &NewProject) -> Result<ProjectRecord>;

    /// Applies a partial update. Omitted fields are preserved server-side.
    async fn update(&self, id: &str, patch: &ProjectPatch) -> Result<ProjectRecord>;

    /// Deletes a project. Deleting a missing project is not an error.
    async fn delete(&self, id: &str) -> Result<()>;
}
