// OpenAI-compatible chat-completions analyzer.
//
// Sends one abstract per request in JSON mode and parses the reply into
// PaperInfo. Any transport failure, non-2xx status, empty reply or reply
// that does not match the schema comes back as an AnalysisError.
//
// API docs: https://platform.openai.com/docs/api-reference/chat/create

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::AnalysisError;
use super::paper::{user_prompt, PaperInfo, SYSTEM_PROMPT};
use super::rate_limiter::RateLimiter;
use super::traits::PaperAnalyzer;

/// Default API base URL.
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1";

/// Default chat model.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

pub struct OpenAiAnalyzer {
    client: Client,
    api_url: String,
    api_key: String,
    model: String,
    rate_limiter: RateLimiter,
}

impl OpenAiAnalyzer {
    pub fn new(
        api_url: &str,
        api_key: String,
        model: String,
        requests_per_second: f64,
    ) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("litsynth/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key,
            model,
            rate_limiter: RateLimiter::new(requests_per_second),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl PaperAnalyzer for OpenAiAnalyzer {
    async fn analyze(&self, abstract_text: &str) -> Result<PaperInfo, AnalysisError> {
        self.rate_limiter.acquire().await;

        let url = format!("{}/chat/completions", self.api_url);
        let request = build_request(&self.model, abstract_text);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::Status { status, body });
        }

        let completion: ChatResponse = response.json().await?;
        let info = parse_completion(completion)?;

        debug!(
            model = %self.model,
            technologies = info.technology_used.len(),
            "Analyzed abstract"
        );

        Ok(info)
    }
}

/// Build the chat request for one abstract.
pub fn build_request(model: &str, abstract_text: &str) -> ChatRequest {
    ChatRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage {
                role: "system".to_string(),
                content: SYSTEM_PROMPT.to_string(),
            },
            ChatMessage {
                role: "user".to_string(),
                content: user_prompt(abstract_text),
            },
        ],
        response_format: ResponseFormat {
            kind: "json_object".to_string(),
        },
    }
}

/// Pull PaperInfo out of the first choice's message content.
pub fn parse_completion(completion: ChatResponse) -> Result<PaperInfo, AnalysisError> {
    let content = completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|c| !c.trim().is_empty())
        .ok_or(AnalysisError::EmptyResponse)?;

    Ok(serde_json::from_str(strip_code_fence(&content))?)
}

/// Some models wrap JSON-mode replies in a markdown code fence anyway.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed)
}

// --- Chat-completions request/response types ---

#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}
