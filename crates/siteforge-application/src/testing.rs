//! In-memory store and AI service mocks shared by the crate's tests.

use async_trait::async_trait;
use siteforge_core::error::{Result, SiteforgeError};
use siteforge_core::fileset::FileSet;
use siteforge_core::generation::{AiService, CodeGeneration};
use siteforge_core::project::{NewProject, ProjectPatch, ProjectRecord, ProjectStore};
use siteforge_core::session::ConversationMessage;
use siteforge_core::workspace::{WorkspaceSnapshot, WorkspaceStore};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

/// Builds a stored project record with the given metadata and no files.
pub(crate) fn project_record(id: &str, title: &str, description: &str, prompt: &str) -> ProjectRecord {
    ProjectRecord {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        prompt: prompt.to_string(),
        files: None,
        thumbnail: None,
        created_at: None,
        updated_at: None,
    }
}

#[derive(Default)]
pub(crate) struct MockWorkspaceStore {
    docs: Mutex<HashMap<String, WorkspaceSnapshot>>,
    seen_ids: Mutex<Vec<String>>,
    fetch_calls: AtomicUsize,
    update_messages_calls: AtomicUsize,
    update_files_calls: AtomicUsize,
}

impl MockWorkspaceStore {
    pub fn put_files(&self, id: &str, file_data: serde_json::Map<String, serde_json::Value>) {
        let mut docs = self.docs.lock().unwrap();
        docs.entry(id.to_string()).or_default().file_data = file_data;
    }

    pub fn messages_for(&self, id: &str) -> Vec<ConversationMessage> {
        let docs = self.docs.lock().unwrap();
        docs.get(id).map(|d| d.messages.clone()).unwrap_or_default()
    }

    pub fn files_for(&self, id: &str) -> serde_json::Map<String, serde_json::Value> {
        let docs = self.docs.lock().unwrap();
        docs.get(id).map(|d| d.file_data.clone()).unwrap_or_default()
    }

    pub fn update_files_calls(&self) -> usize {
        self.update_files_calls.load(Ordering::SeqCst)
    }

    pub fn update_messages_calls(&self) -> usize {
        self.update_messages_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
            + self.update_messages_calls.load(Ordering::SeqCst)
            + self.update_files_calls.load(Ordering::SeqCst)
    }

    pub fn seen_ids(&self) -> Vec<String> {
        self.seen_ids.lock().unwrap().clone()
    }

    fn record_id(&self, id: &str) {
        self.seen_ids.lock().unwrap().push(id.to_string());
    }
}

#[async_trait]
impl WorkspaceStore for MockWorkspaceStore {
    async fn fetch(&self, storage_id: &str) -> Result<Option<WorkspaceSnapshot>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.record_id(storage_id);
        let docs = self.docs.lock().unwrap();
        Ok(docs.get(storage_id).cloned())
    }

    async fn update_messages(
        &self,
        storage_id: &str,
        messages: &[ConversationMessage],
    ) -> Result<()> {
        self.update_messages_calls.fetch_add(1, Ordering::SeqCst);
        self.record_id(storage_id);
        let mut docs = self.docs.lock().unwrap();
        docs.entry(storage_id.to_string()).or_default().messages = messages.to_vec();
        Ok(())
    }

    async fn update_files(&self, storage_id: &str, files: &FileSet) -> Result<()> {
        self.update_files_calls.fetch_add(1, Ordering::SeqCst);
        self.record_id(storage_id);
        let raw = serde_json::to_value(files)?
            .as_object()
            .cloned()
            .unwrap_or_default();
        let mut docs = self.docs.lock().unwrap();
        docs.entry(storage_id.to_string()).or_default().file_data = raw;
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct MockProjectStore {
    records: Mutex<HashMap<String, ProjectRecord>>,
    seen_ids: Mutex<Vec<String>>,
    next_id: AtomicUsize,
    get_calls: AtomicUsize,
    create_calls: AtomicUsize,
    update_calls: AtomicUsize,
    delete_calls: AtomicUsize,
}

impl MockProjectStore {
    pub fn put(&self, record: ProjectRecord) {
        let mut records = self.records.lock().unwrap();
        records.insert(record.id.clone(), record);
    }

    pub fn get_sync(&self, id: &str) -> Option<ProjectRecord> {
        self.records.lock().unwrap().get(id).cloned()
    }

    pub fn all(&self) -> Vec<ProjectRecord> {
        self.records.lock().unwrap().values().cloned().collect()
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
            + self.create_calls.load(Ordering::SeqCst)
            + self.update_calls.load(Ordering::SeqCst)
            + self.delete_calls.load(Ordering::SeqCst)
    }

    pub fn seen_ids(&self) -> Vec<String> {
        self.seen_ids.lock().unwrap().clone()
    }

    fn record_id(&self, id: &str) {
        self.seen_ids.lock().unwrap().push(id.to_string());
    }
}

#[async_trait]
impl ProjectStore for MockProjectStore {
    async fn get(&self, id: &str) -> Result<ProjectRecord> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.record_id(id);
        let records = self.records.lock().unwrap();
        records
            .get(id)
            .cloned()
            .ok_or_else(|| SiteforgeError::not_found("project", id))
    }

    async fn list(&self) -> Result<Vec<ProjectRecord>> {
        Ok(self.all())
    }

    async fn create(&self, draft: &NewProject) -> Result<ProjectRecord> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        let id = (self.next_id.fetch_add(1, Ordering::SeqCst) + 1).to_string();
        let record = ProjectRecord {
            id: id.clone(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            prompt: draft.prompt.clone(),
            files: Some(serde_json::to_value(&draft.files)?),
            thumbnail: draft.thumbnail.clone(),
            created_at: None,
            updated_at: None,
        };
        self.records.lock().unwrap().insert(id, record.clone());
        Ok(record)
    }

    async fn update(&self, id: &str, patch: &ProjectPatch) -> Result<ProjectRecord> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.record_id(id);
        let mut records = self.records.lock().unwrap();
        let record = records
            .get_mut(id)
            .ok_or_else(|| SiteforgeError::not_found("project", id))?;
        if let Some(title) = &patch.title {
            record.title = title.clone();
        }
        if let Some(description) = &patch.description {
            record.description = description.clone();
        }
        if let Some(prompt) = &patch.prompt {
            record.prompt = prompt.clone();
        }
        if let Some(files) = &patch.files {
            record.files = Some(serde_json::to_value(files)?);
        }
        if let Some(thumbnail) = &patch.thumbnail {
            record.thumbnail = Some(thumbnail.clone());
        }
        Ok(record.clone())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.record_id(id);
        self.records.lock().unwrap().remove(id);
        Ok(())
    }
}

/// Programmable AI service: queued replies, optional failure injection,
/// and an optional gate so tests can hold a completion open while the
/// conversation moves on.
pub(crate) struct MockAiService {
    chat_replies: Mutex<VecDeque<Result<String>>>,
    code_replies: Mutex<VecDeque<Result<CodeGeneration>>>,
    gate: Option<Arc<Semaphore>>,
}

impl Default for MockAiService {
    fn default() -> Self {
        Self {
            chat_replies: Mutex::new(VecDeque::new()),
            code_replies: Mutex::new(VecDeque::new()),
            gate: None,
        }
    }
}

impl MockAiService {
    pub fn push_chat(&self, reply: Result<String>) {
        self.chat_replies.lock().unwrap().push_back(reply);
    }

    pub fn push_code(&self, reply: Result<CodeGeneration>) {
        self.code_replies.lock().unwrap().push_back(reply);
    }

    /// Creates a code generation result from a raw files mapping.
    pub fn code_result(
        files: serde_json::Value,
        title: Option<&str>,
        explanation: Option<&str>,
    ) -> CodeGeneration {
        CodeGeneration {
            files: files.as_object().cloned().unwrap_or_default(),
            project_title: title.map(|t| t.to_string()),
            explanation: explanation.map(|e| e.to_string()),
        }
    }

    /// Gates every AI call behind a semaphore permit so the test controls
    /// exactly when a completion lands.
    pub fn gated(gate: Arc<Semaphore>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    async fn wait_for_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.acquire().await.expect("gate closed").forget();
        }
    }
}

#[async_trait]
impl AiService for MockAiService {
    async fn chat(&self, _prompt: &str) -> Result<String> {
        self.wait_for_gate().await;
        self.chat_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("Sure, working on it.".to_string()))
    }

    async fn enhance_prompt(&self, prompt: &str) -> Result<String> {
        Ok(format!("enhanced: {prompt}"))
    }

    async fn generate_code(&self, _prompt: &str) -> Result<CodeGeneration> {
        self.wait_for_gate().await;
        self.code_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(CodeGeneration::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn project_store_lists_and_deletes_idempotently() {
        let store = MockProjectStore::default();
        store.put(project_record("1", "T", "D", "P"));
        store.put(project_record("2", "T2", "D2", "P2"));

        assert_eq!(store.list().await.unwrap().len(), 2);

        store.delete("1").await.unwrap();
        assert_eq!(store.list().await.unwrap().len(), 1);
        assert!(store.get_sync("1").is_none());
        assert!(store.get("1").await.unwrap_err().is_not_found());

        // Deleting a missing project is not an error.
        store.delete("1").await.unwrap();
        assert_eq!(store.list().await.unwrap().len(), 1);
    }
}
