//! Generation orchestration.
//!
//! Two orchestration paths drive the AI service whenever the tail of the
//! conversation is an unanswered user message: a chat path producing a
//! single assistant reply, and a code path producing a file tree plus
//! optional title/explanation metadata.
//!
//! Both paths snapshot the conversation when the request is issued and
//! re-check it when the completion lands: if a newer user message has
//! arrived in between, the completion is stale and is discarded instead
//! of overwriting newer state. Failures are injected into the
//! conversation as synthetic assistant messages and are never retried
//! automatically.

use crate::router::{BackendRouter, ProjectSeed};
use siteforge_core::error::Result;
use siteforge_core::fileset::{FileSet, default_scaffold};
use siteforge_core::generation::AiService;
use siteforge_core::project::{derive_description, derive_title};
use siteforge_core::session::{
    ConversationMessage, MessageRole, first_user_message,
};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Fixed instruction suffix for the chat path.
pub const CHAT_INSTRUCTION: &str = "\
You are an AI Assistant experienced in React development. \
Tell the user what you are building, respond in a few lines, \
and skip code examples and commentary.";

/// Fixed instruction suffix for the code-generation path.
pub const CODE_INSTRUCTION: &str = "\
Generate a fully structured React project using Vite. \
Use Tailwind CSS for styling and organize components modularly. \
Do not create an App.jsx file; rewrite the existing App.js instead, \
and do not create a src folder. \
Return the response as JSON with the schema \
{\"projectTitle\": \"\", \"explanation\": \"\", \
\"files\": {\"/App.js\": {\"content\": \"\"}}} \
where files contains every created file.";

const GENERATION_ERROR_MESSAGE: &str =
    "Sorry, I encountered an error. Please try again.";

/// Mutable state owned by the active session: the conversation and the
/// file tree. Only ever mutated behind the session's single lock.
#[derive(Debug, Default)]
pub struct SessionState {
    pub conversation: Vec<ConversationMessage>,
    pub files: FileSet,
}

/// Result of one orchestration pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// The completion was applied and persisted.
    Applied,
    /// The conversation tail was not an unanswered user message.
    Skipped,
    /// A newer user message superseded the request; the completion was
    /// discarded. Not an error.
    Stale,
    /// The AI call failed; a synthetic assistant error message was
    /// injected locally.
    Failed,
}

/// Drives the request/response cycle to the AI service and merges
/// results into the session state.
#[derive(Clone)]
pub struct GenerationOrchestrator {
    state: Arc<Mutex<SessionState>>,
    ai: Arc<dyn AiService>,
    router: Arc<BackendRouter>,
}

impl GenerationOrchestrator {
    pub fn new(
        state: Arc<Mutex<SessionState>>,
        ai: Arc<dyn AiService>,
        router: Arc<BackendRouter>,
    ) -> Self {
        Self { state, ai, router }
    }

    /// Produces an assistant reply for the pending user message and
    /// persists the conversation.
    pub async fn respond_to_chat(&self) -> Result<GenerationOutcome> {
        let (prompt, issued_turns) = {
            let state = self.state.lock().await;
            if !awaiting_reply(&state.conversation) {
                return Ok(GenerationOutcome::Skipped);
            }
            (
                build_prompt(&state.conversation, CHAT_INSTRUCTION)?,
                user_turns(&state.conversation),
            )
        };

        let reply = match self.ai.chat(&prompt).await {
            Ok(reply) => reply,
            Err(err) => {
                tracing::error!(error = %err, "chat generation failed");
                let mut state = self.state.lock().await;
                state
                    .conversation
                    .push(ConversationMessage::assistant(GENERATION_ERROR_MESSAGE));
                return Ok(GenerationOutcome::Failed);
            }
        };

        let conversation = {
            let mut state = self.state.lock().await;
            if user_turns(&state.conversation) != issued_turns {
                tracing::debug!("discarding stale chat completion");
                return Ok(GenerationOutcome::Stale);
            }
            state.conversation.push(ConversationMessage::assistant(reply));
            state.conversation.clone()
        };

        if let Err(err) = self.router.save_conversation(&conversation).await {
            tracing::warn!(error = %err, "failed to persist conversation");
        }
        Ok(GenerationOutcome::Applied)
    }

    /// Generates a file tree for the pending user message, merges it over
    /// the scaffold and the current tree, and persists the result.
    pub async fn generate_code(&self) -> Result<GenerationOutcome> {
        let (prompt, issued_turns) = {
            let state = self.state.lock().await;
            if !awaiting_reply(&state.conversation) {
                return Ok(GenerationOutcome::Skipped);
            }
            (
                build_prompt(&state.conversation, CODE_INSTRUCTION)?,
                user_turns(&state.conversation),
            )
        };

        let generation = match self.ai.generate_code(&prompt).await {
            Ok(generation) => generation,
            Err(err) => {
                tracing::error!(error = %err, "code generation failed");
                let mut state = self.state.lock().await;
                state
                    .conversation
                    .push(ConversationMessage::assistant(GENERATION_ERROR_MESSAGE));
                return Ok(GenerationOutcome::Failed);
            }
        };

        let generated = FileSet::normalize(&generation.files);
        let (merged, seed) = {
            let mut state = self.state.lock().await;
            if user_turns(&state.conversation) != issued_turns {
                tracing::debug!("discarding stale code generation");
                return Ok(GenerationOutcome::Stale);
            }
            // Scaffold first, then the current tree, then the AI files on
            // top: files the AI did not touch survive.
            let merged = default_scaffold().merge(&state.files).merge(&generated);
            state.files = merged.clone();
            let seed = ProjectSeed {
                title: derive_title(
                    &state.conversation,
                    generation.project_title.as_deref(),
                ),
                description: derive_description(generation.explanation.as_deref()),
                prompt: first_user_message(&state.conversation)
                    .map(|m| m.content.clone())
                    .unwrap_or_default(),
            };
            (merged, seed)
        };

        if let Err(err) = self.router.save_files(&merged, &seed).await {
            // Background persistence is best-effort; editing continues on
            // the in-memory tree.
            tracing::warn!(error = %err, "failed to persist generated files");
        }
        Ok(GenerationOutcome::Applied)
    }
}

/// True when the tail of the conversation is a user message awaiting a
/// response. Covers both a freshly typed message and a freshly loaded
/// conversation whose tail happens to be unanswered.
pub fn awaiting_reply(conversation: &[ConversationMessage]) -> bool {
    conversation
        .last()
        .map(|m| m.role == MessageRole::User)
        .unwrap_or(false)
}

/// Number of user messages in the conversation. Used as the staleness
/// marker: assistant appends do not advance it, a newer user message
/// does.
fn user_turns(conversation: &[ConversationMessage]) -> usize {
    conversation
        .iter()
        .filter(|m| m.role == MessageRole::User)
        .count()
}

fn build_prompt(conversation: &[ConversationMessage], instruction: &str) -> Result<String> {
    Ok(format!(
        "{} {}",
        serde_json::to_string(conversation)?,
        instruction
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockAiService, MockProjectStore, MockWorkspaceStore};
    use siteforge_core::error::SiteforgeError;
    use siteforge_core::session::SessionId;
    use tokio::sync::Semaphore;

    fn setup(
        raw_id: &str,
        ai: MockAiService,
        conversation: Vec<ConversationMessage>,
    ) -> (
        GenerationOrchestrator,
        Arc<Mutex<SessionState>>,
        Arc<MockWorkspaceStore>,
        Arc<MockProjectStore>,
    ) {
        let workspaces = Arc::new(MockWorkspaceStore::default());
        let projects = Arc::new(MockProjectStore::default());
        let router = Arc::new(BackendRouter::new(
            SessionId::resolve(raw_id),
            workspaces.clone(),
            projects.clone(),
        ));
        let state = Arc::new(Mutex::new(SessionState {
            conversation,
            files: default_scaffold(),
        }));
        let orchestrator = GenerationOrchestrator::new(state.clone(), Arc::new(ai), router);
        (orchestrator, state, workspaces, projects)
    }

    #[tokio::test]
    async fn chat_reply_is_appended_and_persisted() {
        let ai = MockAiService::default();
        ai.push_chat(Ok("Building a todo app now.".to_string()));
        let (orchestrator, state, workspaces, _) =
            setup("ws-1", ai, vec![ConversationMessage::user("build a todo app")]);

        let outcome = orchestrator.respond_to_chat().await.unwrap();

        assert_eq!(outcome, GenerationOutcome::Applied);
        let conversation = state.lock().await.conversation.clone();
        assert_eq!(conversation.len(), 2);
        assert_eq!(conversation[1].role, MessageRole::Assistant);
        assert_eq!(workspaces.update_messages_calls(), 1);
        assert_eq!(workspaces.messages_for("ws-1").len(), 2);
    }

    #[tokio::test]
    async fn nothing_happens_without_a_pending_user_message() {
        let (orchestrator, state, workspaces, _) = setup(
            "ws-1",
            MockAiService::default(),
            vec![
                ConversationMessage::user("hi"),
                ConversationMessage::assistant("hello"),
            ],
        );

        assert_eq!(
            orchestrator.respond_to_chat().await.unwrap(),
            GenerationOutcome::Skipped
        );
        assert_eq!(
            orchestrator.generate_code().await.unwrap(),
            GenerationOutcome::Skipped
        );
        assert_eq!(state.lock().await.conversation.len(), 2);
        assert_eq!(workspaces.total_calls(), 0);
    }

    #[tokio::test]
    async fn stale_chat_completion_is_discarded() {
        let gate = Arc::new(Semaphore::new(0));
        let ai = MockAiService::gated(gate.clone());
        ai.push_chat(Ok("answer to the first question".to_string()));
        let (orchestrator, state, workspaces, _) =
            setup("ws-1", ai, vec![ConversationMessage::user("U1")]);

        let pending = tokio::spawn({
            let orchestrator = orchestrator.clone();
            async move { orchestrator.respond_to_chat().await }
        });
        tokio::task::yield_now().await;

        // The conversation moves on before the completion lands.
        {
            let mut state = state.lock().await;
            state.conversation.push(ConversationMessage::assistant("A1"));
            state.conversation.push(ConversationMessage::user("U2"));
        }
        gate.add_permits(1);

        let outcome = pending.await.unwrap().unwrap();
        assert_eq!(outcome, GenerationOutcome::Stale);
        let conversation = state.lock().await.conversation.clone();
        assert_eq!(conversation.len(), 3);
        assert_eq!(conversation[2].content, "U2");
        // Nothing was persisted for the discarded completion.
        assert_eq!(workspaces.update_messages_calls(), 0);
    }

    #[tokio::test]
    async fn stale_code_completion_is_discarded() {
        let gate = Arc::new(Semaphore::new(0));
        let ai = MockAiService::gated(gate.clone());
        ai.push_code(Ok(MockAiService::code_result(
            serde_json::json!({"/App.js": "answer to the first request"}),
            None,
            None,
        )));
        let (orchestrator, state, workspaces, _) =
            setup("ws-1", ai, vec![ConversationMessage::user("U1")]);

        let pending = tokio::spawn({
            let orchestrator = orchestrator.clone();
            async move { orchestrator.generate_code().await }
        });
        tokio::task::yield_now().await;

        // A newer user message arrives before the completion lands.
        {
            let mut state = state.lock().await;
            state.conversation.push(ConversationMessage::assistant("A1"));
            state.conversation.push(ConversationMessage::user("U2"));
        }
        gate.add_permits(1);

        let outcome = pending.await.unwrap().unwrap();
        assert_eq!(outcome, GenerationOutcome::Stale);
        // The discarded completion left the tree untouched and unsaved.
        let files = state.lock().await.files.clone();
        assert_eq!(files, default_scaffold());
        assert_eq!(workspaces.update_files_calls(), 0);
    }

    #[tokio::test]
    async fn assistant_appends_do_not_make_a_code_completion_stale() {
        let gate = Arc::new(Semaphore::new(0));
        let ai = MockAiService::gated(gate.clone());
        ai.push_code(Ok(MockAiService::code_result(
            serde_json::json!({"/App.js": "generated"}),
            None,
            None,
        )));
        let (orchestrator, state, workspaces, _) =
            setup("ws-1", ai, vec![ConversationMessage::user("build it")]);

        let pending = tokio::spawn({
            let orchestrator = orchestrator.clone();
            async move { orchestrator.generate_code().await }
        });
        tokio::task::yield_now().await;

        // The chat path answered in the meantime; same user turn though.
        state
            .lock()
            .await
            .conversation
            .push(ConversationMessage::assistant("working on it"));
        gate.add_permits(1);

        let outcome = pending.await.unwrap().unwrap();
        assert_eq!(outcome, GenerationOutcome::Applied);
        assert_eq!(workspaces.update_files_calls(), 1);
        let files = state.lock().await.files.clone();
        assert_eq!(files.get("/App.js").unwrap().content, "generated");
    }

    #[tokio::test]
    async fn generated_files_merge_over_scaffold_and_current_tree() {
        let ai = MockAiService::default();
        ai.push_code(Ok(MockAiService::code_result(
            serde_json::json!({"/App.js": {"content": "ai app"}}),
            Some("Todo App"),
            Some("A simple todo list"),
        )));
        let (orchestrator, state, _, _) =
            setup("ws-1", ai, vec![ConversationMessage::user("build a todo app")]);
        // A user edit the AI does not touch must survive the merge.
        state.lock().await.files.insert("/notes.md", "keep me");

        let outcome = orchestrator.generate_code().await.unwrap();

        assert_eq!(outcome, GenerationOutcome::Applied);
        let files = state.lock().await.files.clone();
        assert_eq!(files.get("/App.js").unwrap().content, "ai app");
        assert_eq!(files.get("/notes.md").unwrap().content, "keep me");
        assert!(files.contains("/index.js"));
    }

    #[tokio::test]
    async fn project_generation_creates_then_updates_one_project() {
        let ai = MockAiService::default();
        ai.push_code(Ok(MockAiService::code_result(
            serde_json::json!({"/App.js": "v1"}),
            Some("Todo App"),
            Some("explanation"),
        )));
        ai.push_code(Ok(MockAiService::code_result(
            serde_json::json!({"/App.js": "v2"}),
            Some("Todo App"),
            Some("explanation"),
        )));
        // Prefixed session whose row does not exist yet: the first
        // generation creates it, the second updates it.
        let (orchestrator, state, _, projects) =
            setup("project-99", ai, vec![ConversationMessage::user("build a todo app")]);

        assert_eq!(
            orchestrator.generate_code().await.unwrap(),
            GenerationOutcome::Applied
        );
        state
            .lock()
            .await
            .conversation
            .push(ConversationMessage::user("now add filters"));
        assert_eq!(
            orchestrator.generate_code().await.unwrap(),
            GenerationOutcome::Applied
        );

        assert_eq!(projects.create_calls(), 1);
        let stored = projects.all();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].title, "Todo App");
        assert_eq!(stored[0].prompt, "build a todo app");
        assert_eq!(
            stored[0].files.as_ref().unwrap()["/App.js"]["content"],
            "v2"
        );
    }

    #[tokio::test]
    async fn ai_failure_injects_a_synthetic_error_message() {
        let ai = MockAiService::default();
        ai.push_chat(Err(SiteforgeError::network("connection refused")));
        let (orchestrator, state, workspaces, _) =
            setup("ws-1", ai, vec![ConversationMessage::user("hello")]);

        let outcome = orchestrator.respond_to_chat().await.unwrap();

        assert_eq!(outcome, GenerationOutcome::Failed);
        let conversation = state.lock().await.conversation.clone();
        assert_eq!(conversation.len(), 2);
        assert_eq!(conversation[1].role, MessageRole::Assistant);
        assert!(conversation[1].content.contains("error"));
        // Failures are local; nothing is persisted and nothing is retried.
        assert_eq!(workspaces.total_calls(), 0);
    }
}
