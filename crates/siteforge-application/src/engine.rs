//! Session engine facade.
//!
//! One `SessionEngine` owns everything a single editing session needs:
//! the resolved session identity, the backend router, the generation
//! orchestrator, and the debounced persister. All mutable session state
//! lives behind one lock and is only touched from the session's logical
//! thread; network calls are the only suspension points.

use crate::orchestrator::{GenerationOrchestrator, GenerationOutcome, SessionState};
use crate::persister::DebouncedPersister;
use crate::router::{BackendRouter, ProjectSeed};
use siteforge_core::error::Result;
use siteforge_core::fileset::{FileSet, default_scaffold};
use siteforge_core::generation::AiService;
use siteforge_core::project::{ProjectStore, derive_description, derive_title};
use siteforge_core::session::{
    ConversationMessage, SessionId, first_user_message,
};
use siteforge_core::workspace::WorkspaceStore;
use siteforge_infrastructure::{
    EngineConfig, HttpAiService, HttpProjectStore, HttpWorkspaceStore,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

const LOAD_ERROR_MESSAGE: &str =
    "Sorry, I could not load this workspace or project. Please try again.";

/// The synchronization engine for one editing session.
pub struct SessionEngine {
    state: Arc<Mutex<SessionState>>,
    router: Arc<BackendRouter>,
    ai: Arc<dyn AiService>,
    orchestrator: GenerationOrchestrator,
    persister: DebouncedPersister,
}

impl SessionEngine {
    /// Creates an engine with explicitly injected collaborators.
    pub fn new(
        raw_id: &str,
        workspaces: Arc<dyn WorkspaceStore>,
        projects: Arc<dyn ProjectStore>,
        ai: Arc<dyn AiService>,
        save_quiet_period: Duration,
    ) -> Self {
        let session = SessionId::resolve(raw_id);
        let router = Arc::new(BackendRouter::new(session, workspaces, projects));
        let state = Arc::new(Mutex::new(SessionState::default()));
        let orchestrator =
            GenerationOrchestrator::new(state.clone(), ai.clone(), router.clone());
        let persister = DebouncedPersister::new(router.clone(), save_quiet_period);
        Self {
            state,
            router,
            ai,
            orchestrator,
            persister,
        }
    }

    /// Creates an engine wired to the HTTP collaborators named in the
    /// configuration.
    pub fn from_config(raw_id: &str, config: &EngineConfig) -> Self {
        Self::new(
            raw_id,
            Arc::new(HttpWorkspaceStore::new(config.workspace_base_url.clone())),
            Arc::new(HttpProjectStore::new(config.project_base_url.clone())),
            Arc::new(HttpAiService::new(config.ai_base_url.clone())),
            config.save_quiet_period(),
        )
    }

    /// The resolved identity of this session.
    pub fn session(&self) -> &SessionId {
        self.router.session()
    }

    /// Loads the initial conversation and file tree from the owning
    /// backend.
    ///
    /// Load failures are non-fatal: the conversation falls back to a
    /// synthetic assistant message and the files to the default scaffold.
    /// If the loaded conversation ends in an unanswered user message,
    /// generation is triggered immediately.
    pub async fn open(&self) -> Result<()> {
        let conversation = match self.router.load_conversation().await {
            Ok(conversation) => conversation,
            Err(err) => {
                tracing::warn!(error = %err, "failed to load conversation");
                vec![ConversationMessage::assistant(LOAD_ERROR_MESSAGE)]
            }
        };
        let files = match self.router.load_files().await {
            Ok(files) => files,
            Err(err) => {
                tracing::warn!(error = %err, "failed to load files");
                default_scaffold()
            }
        };

        {
            let mut state = self.state.lock().await;
            state.conversation = conversation;
            state.files = files.clone();
        }
        // The loaded tree is the persistence baseline, not a change.
        self.persister.mark_persisted(&files);

        self.handle_user_turn().await
    }

    /// Appends a user message and runs both generation paths.
    pub async fn submit_user_message(&self, content: impl Into<String>) -> Result<()> {
        {
            let mut state = self.state.lock().await;
            state.conversation.push(ConversationMessage::user(content));
        }
        self.handle_user_turn().await
    }

    /// Applies a direct editor mutation of the file tree. Persistence is
    /// deferred to the debounced persister.
    pub async fn apply_editor_change(&self, files: FileSet) {
        let seed = {
            let mut state = self.state.lock().await;
            state.files = files.clone();
            seed_from_conversation(&state.conversation)
        };
        self.persister.observe(&files, &seed);
    }

    /// Passes a prompt through the AI service's enhancement endpoint.
    pub async fn enhance_prompt(&self, prompt: &str) -> Result<String> {
        self.ai.enhance_prompt(prompt).await
    }

    /// Current conversation snapshot.
    pub async fn conversation(&self) -> Vec<ConversationMessage> {
        self.state.lock().await.conversation.clone()
    }

    /// Current file tree snapshot.
    pub async fn files(&self) -> FileSet {
        self.state.lock().await.files.clone()
    }

    /// Flattened `(path, content)` entries for downstream packaging.
    pub async fn export_entries(&self) -> Vec<(String, String)> {
        self.state.lock().await.files.export_entries()
    }

    /// True while an auto-save is armed or in flight.
    pub fn is_saving(&self) -> bool {
        self.persister.is_saving()
    }

    /// Tears the session down. A pending debounce is dropped, not
    /// flushed.
    pub fn close(&self) {
        self.persister.shutdown();
    }

    async fn handle_user_turn(&self) -> Result<()> {
        // Both paths trigger off the same user message. The code path
        // runs first because it never mutates the conversation; the chat
        // path appends its reply, which would otherwise hide the trigger
        // from the code path.
        let code = self.orchestrator.generate_code().await?;
        if code == GenerationOutcome::Applied {
            let files = self.state.lock().await.files.clone();
            self.persister.mark_persisted(&files);
        }
        self.orchestrator.respond_to_chat().await?;
        Ok(())
    }
}

fn seed_from_conversation(conversation: &[ConversationMessage]) -> ProjectSeed {
    ProjectSeed {
        title: derive_title(conversation, None),
        description: derive_description(None),
        prompt: first_user_message(conversation)
            .map(|m| m.content.clone())
            .unwrap_or_default(),
    }
}
