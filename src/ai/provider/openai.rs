//! OpenAI API Provider
//!
//! Keyword provider using OpenAI's Chat Completions API. Keyword and
//! competitor requests run in JSON mode.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::prompts::{self, ReplyFormat};
use super::{
    ConnectionStatus, KeywordProvider, http_client, status_error, swallow, transport_error,
    validate_endpoint,
};
use crate::config::AiProviderConfig;
use crate::types::{Competitor, Intent, KeyweaveError, Result};

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o";
const NAME: &str = "openai";

/// OpenAI API Provider with secure API key handling
pub struct OpenAiProvider {
    /// API key stored securely - never exposed in logs or debug output
    api_key: SecretString,
    api_base: String,
    model: String,
    temperature: f32,
    client: reqwest::Client,
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("api_key", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl OpenAiProvider {
    pub fn new(config: &AiProviderConfig) -> Result<Self> {
        let api_key = config.api_key().ok_or_else(|| {
            KeyweaveError::Config(
                "OpenAI API key not found. Set OPENAI_API_KEY env var or provide in config"
                    .to_string(),
            )
        })?;

        let api_base = match config.api_base.as_deref() {
            Some(base) => validate_endpoint(NAME, base)?,
            None => DEFAULT_API_BASE.to_string(),
        };

        Ok(Self {
            api_key: SecretString::from(api_key.to_string()),
            api_base,
            model: config
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: config.temperature,
            client: http_client(NAME, config.timeout_secs)?,
        })
    }

    fn build_request(
        &self,
        system: &str,
        prompt: String,
        max_tokens: u32,
        json_mode: bool,
    ) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt,
                },
            ],
            temperature: self.temperature,
            max_tokens,
            response_format: json_mode.then(|| ResponseFormat {
                format_type: "json_object".to_string(),
            }),
        }
    }

    /// Send one chat completion and return the first choice's text
    async fn complete(&self, request: &ChatCompletionRequest) -> Result<String> {
        let url = format!("{}/chat/completions", self.api_base);
        debug!(model = %self.model, "Sending request to OpenAI API");

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .json(request)
            .send()
            .await
            .map_err(|e| transport_error(NAME, e))?;

        if !response.status().is_success() {
            return Err(status_error(NAME, response).await);
        }

        let body: ChatCompletionResponse = response.json().await.map_err(|e| {
            KeyweaveError::ProviderApi(format!("Failed to parse OpenAI response: {}", e))
        })?;

        body.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| KeyweaveError::ProviderApi("No content in OpenAI response".to_string()))
    }
}

#[async_trait]
impl KeywordProvider for OpenAiProvider {
    fn name(&self) -> &str {
        NAME
    }

    async fn classify_intent(&self, keyword: &str) -> Option<Intent> {
        let request = self.build_request(
            prompts::INTENT_SYSTEM,
            prompts::intent_prompt(keyword),
            50,
            false,
        );
        let reply = swallow(NAME, "intent", self.complete(&request).await.map(Some))?;
        Intent::from_reply(&reply)
    }

    async fn generate_title(
        &self,
        keyword: &str,
        intent: Intent,
        instruction: Option<&str>,
    ) -> Option<String> {
        let request = self.build_request(
            prompts::TITLE_SYSTEM,
            prompts::title_prompt(keyword, intent, instruction),
            100,
            false,
        );
        let reply = swallow(NAME, "title", self.complete(&request).await.map(Some))?;
        prompts::clean_title(&reply)
    }

    async fn related_keywords(&self, keyword: &str, intent: Intent) -> Vec<String> {
        let request = self.build_request(
            prompts::KEYWORDS_SYSTEM,
            prompts::keywords_prompt(keyword, intent, ReplyFormat::Json),
            500,
            true,
        );
        let reply = swallow(NAME, "keywords", self.complete(&request).await);
        prompts::parse_keywords(&reply, ReplyFormat::Json)
    }

    async fn competitors(&self, keyword: &str) -> Vec<Competitor> {
        let request = self.build_request(
            prompts::COMPETITORS_SYSTEM,
            prompts::competitors_prompt(keyword, ReplyFormat::Json),
            500,
            true,
        );
        let reply = swallow(NAME, "competitors", self.complete(&request).await);
        prompts::parse_competitors(&reply, ReplyFormat::Json)
    }

    async fn test_connection(&self) -> ConnectionStatus {
        let request = self.build_request(
            "You are a test assistant.",
            "This is a test message to check connection.".to_string(),
            10,
            false,
        );
        match self.complete(&request).await {
            Ok(_) => ConnectionStatus::ok("Successfully connected to OpenAI API"),
            Err(e) => ConnectionStatus::from_error("OpenAI", NAME, &e),
        }
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}
