use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_ANTHROPIC_MODEL;
use crate::error::{Error, Result};
use crate::llm::parser::parse_narrative_response;
use crate::llm::prompts::{NarrativeRequest, SYSTEM_PROMPT};
use crate::llm::provider::NarrativeProvider;
use crate::models::AiInsight;

const DEFAULT_API_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1024;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Narrative provider backed by the Anthropic Messages API.
pub struct ClaudeProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [Message; 1],
}

#[derive(Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl MessagesResponse {
    /// Concatenated text blocks of the reply.
    fn into_text(self) -> Result<String> {
        if let Some(error) = self.error {
            return Err(Error::LLMApi(error.message));
        }
        let text: String = self
            .content
            .into_iter()
            .filter(|block| block.block_type == "text")
            .filter_map(|block| block.text)
            .collect();
        if text.trim().is_empty() {
            return Err(Error::LLMApi("Empty response from Claude".to_string()));
        }
        Ok(text)
    }
}

impl ClaudeProvider {
    pub fn new(api_key: String, model: Option<String>) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_ANTHROPIC_MODEL.to_string()),
            base_url: DEFAULT_API_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl NarrativeProvider for ClaudeProvider {
    async fn summarize(&self, request: &NarrativeRequest) -> Result<AiInsight> {
        tracing::debug!("Requesting narrative for {} from {}", request.login, self.model);

        let body = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            system: SYSTEM_PROMPT,
            messages: [Message {
                role: "user",
                content: request.to_prompt(),
            }],
        };

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::LLMApi(format!("Failed to reach Claude: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(Error::LLMApi(format!("Claude returned {}: {}", status, detail)));
        }

        let reply: MessagesResponse = response
            .json()
            .await
            .map_err(|e| Error::LLMApi(format!("Unreadable Claude response: {}", e)))?;

        parse_narrative_response(&reply.into_text()?)
    }

    fn name(&self) -> &str {
        "Claude"
    }
}
