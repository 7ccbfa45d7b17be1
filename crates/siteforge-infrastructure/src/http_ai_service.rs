//! HTTP implementation of the AI service.
//!
//! All three endpoints take a single `{prompt}` body. The code-generation
//! endpoint reports its own downstream parse failures inside a successful
//! response, so that case is mapped to a malformed-response error here
//! rather than leaking into the orchestrator.

use crate::dto::{ChatReply, CodeGenReply, EnhanceReply, PromptBody};
use crate::http::ensure_success;
use async_trait::async_trait;
use reqwest::Client;
use siteforge_core::error::{Result, SiteforgeError};
use siteforge_core::generation::{AiService, CodeGeneration};

/// AI generation service client.
#[derive(Clone)]
pub struct HttpAiService {
    client: Client,
    base_url: String,
}

impl HttpAiService {
    /// Creates a client against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn post_prompt(&self, endpoint: &str, prompt: &str) -> Result<reqwest::Response> {
        let response = self
            .client
            .post(format!("{}{endpoint}", self.base_url))
            .json(&PromptBody { prompt })
            .send()
            .await?;
        ensure_success(response, "ai", endpoint).await
    }
}

#[async_trait]
impl AiService for HttpAiService {
    async fn chat(&self, prompt: &str) -> Result<String> {
        let reply: ChatReply = self.post_prompt("/api/ai-chat", prompt).await?.json().await?;
        Ok(reply.result)
    }

    async fn enhance_prompt(&self, prompt: &str) -> Result<String> {
        let reply: EnhanceReply = self
            .post_prompt("/api/enhance-prompt", prompt)
            .await?
            .json()
            .await?;
        Ok(reply.enhanced_prompt)
    }

    async fn generate_code(&self, prompt: &str) -> Result<CodeGeneration> {
        let reply: CodeGenReply = self
            .post_prompt("/api/gen-ai-code", prompt)
            .await?
            .json()
            .await?;

        if let Some(error) = reply.error {
            return Err(SiteforgeError::malformed(format!(
                "code generation failed upstream: {error}"
            )));
        }
        if reply.files.is_none() {
            return Err(SiteforgeError::malformed(
                "code generation response is missing the files mapping",
            ));
        }
        Ok(reply.into())
    }
}
