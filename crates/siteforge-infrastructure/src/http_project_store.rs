//! HTTP implementation of the Project store.
//!
//! REST-style CRUD over `/api/projects[/:id]`. Create requires the full
//! draft; update is a partial patch where omitted fields are preserved
//! server-side.

use crate::http::ensure_success;
use async_trait::async_trait;
use reqwest::Client;
use siteforge_core::error::Result;
use siteforge_core::project::{NewProject, ProjectPatch, ProjectRecord, ProjectStore};

/// Project backend client.
#[derive(Clone)]
pub struct HttpProjectStore {
    client: Client,
    base_url: String,
}

impl HttpProjectStore {
    /// Creates a client against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/api/projects", self.base_url)
    }

    fn resource_url(&self, id: &str) -> String {
        format!("{}/api/projects/{id}", self.base_url)
    }
}

#[async_trait]
impl ProjectStore for HttpProjectStore {
    async fn get(&self, id: &str) -> Result<ProjectRecord> {
        let response = self.client.get(self.resource_url(id)).send().await?;
        let response = ensure_success(response, "project", id).await?;
        Ok(response.json().await?)
    }

    async fn list(&self) -> Result<Vec<ProjectRecord>> {
        let response = self.client.get(self.collection_url()).send().await?;
        let response = ensure_success(response, "project", "*").await?;
        Ok(response.json().await?)
    }

    async fn create(&self, draft: &NewProject) -> Result<ProjectRecord> {
        tracing::debug!(title = %draft.title, "creating project");
        let response = self
            .client
            .post(self.collection_url())
            .json(draft)
            .send()
            .await?;
        let response = ensure_success(response, "project", "new").await?;
        Ok(response.json().await?)
    }

    async fn update(&self, id: &str, patch: &ProjectPatch) -> Result<ProjectRecord> {
        tracing::debug!(id, "updating project");
        let response = self
            .client
            .put(self.resource_url(id))
            .json(patch)
            .send()
            .await?;
        let response = ensure_success(response, "project", id).await?;
        Ok(response.json().await?)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let response = self.client.delete(self.resource_url(id)).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(());
        }
        ensure_success(response, "project", id).await?;
        Ok(())
    }
}
