//! Google Gemini Provider
//!
//! Keyword provider using the Gemini `generateContent` endpoint. Replies are
//! plain text: keywords come back as a comma list, competitors as labelled lines.

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

const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const NAME: &str = "gemini";

pub struct GeminiProvider {
    api_key: SecretString,
    api_base: String,
    model: String,
    temperature: f32,
    client: reqwest::Client,
}

impl std::fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("api_key", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl GeminiProvider {
    pub fn new(config: &AiProviderConfig) -> Result<Self> {
        let api_key = config.api_key().ok_or_else(|| {
            KeyweaveError::Config(
                "Gemini API key not found. Set GEMINI_API_KEY env var or provide in config"
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

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }

    fn build_request(&self, prompt: String, max_tokens: u32) -> GenerateRequest {
        GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: max_tokens,
            },
        }
    }

    /// Run one generation and return the first text part
    async fn complete(&self, prompt: String, max_tokens: u32) -> Result<String> {
        debug!(model = %self.model, "Sending request to Gemini API");

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.expose_secret())])
            .json(&self.build_request(prompt, max_tokens))
            .send()
            .await
            .map_err(|e| transport_error(NAME, e))?;

        if !response.status().is_success() {
            return Err(status_error(NAME, response).await);
        }

        let body: GenerateResponse = response.json().await.map_err(|e| {
            KeyweaveError::ProviderApi(format!("Failed to parse Gemini response: {}", e))
        })?;

        body.first_text()
            .ok_or_else(|| KeyweaveError::ProviderApi("No content in Gemini response".to_string()))
    }
}

#[async_trait]
impl KeywordProvider for GeminiProvider {
    fn name(&self) -> &str {
        NAME
    }

    async fn classify_intent(&self, keyword: &str) -> Option<Intent> {
        let reply = swallow(
            NAME,
            "intent",
            self.complete(prompts::intent_prompt(keyword), 50).await.map(Some),
        )?;
        Intent::from_reply(&reply)
    }

    async fn generate_title(
        &self,
        keyword: &str,
        intent: Intent,
        instruction: Option<&str>,
    ) -> Option<String> {
        let prompt = prompts::title_prompt(keyword, intent, instruction);
        let reply = swallow(NAME, "title", self.complete(prompt, 100).await.map(Some))?;
        prompts::clean_title(&reply)
    }

    async fn related_keywords(&self, keyword: &str, intent: Intent) -> Vec<String> {
        let prompt = prompts::keywords_prompt(keyword, intent, ReplyFormat::PlainText);
        let reply = swallow(NAME, "keywords", self.complete(prompt, 500).await);
        prompts::parse_keywords(&reply, ReplyFormat::PlainText)
    }

    async fn competitors(&self, keyword: &str) -> Vec<Competitor> {
        let prompt = prompts::competitors_prompt(keyword, ReplyFormat::PlainText);
        let reply = swallow(NAME, "competitors", self.complete(prompt, 500).await);
        prompts::parse_competitors(&reply, ReplyFormat::PlainText)
    }

    async fn test_connection(&self) -> ConnectionStatus {
        match self
            .complete("Test connection to Gemini API".to_string(), 10)
            .await
        {
            Ok(_) => ConnectionStatus::ok("Successfully connected to Gemini API"),
            Err(e) => ConnectionStatus::from_error("Gemini", NAME, &e),
        }
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateResponse {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .map(|p| p.text)
            .find(|t| !t.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> GeminiProvider {
        GeminiProvider::new(&AiProviderConfig {
            api_key: Some("gm-secret".to_string()),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_uses_model() {
        let p = provider();
        assert_eq!(
            p.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
        assert!(!format!("{:?}", p).contains("gm-secret"));
    }

    #[test]
    fn test_request_shape() {
        let body = serde_json::to_value(provider().build_request("hello".to_string(), 50)).unwrap();
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 50);
    }

    #[test]
    fn test_first_text() {
        let response: GenerateResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "  "}, {"text": "Informational"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(response.first_text().as_deref(), Some("Informational"));

        let empty: GenerateResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert_eq!(empty.first_text(), None);

        let blocked: GenerateResponse =
            serde_json::from_str(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#).unwrap();
        assert_eq!(blocked.first_text(), None);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_degrades_to_empty() {
        let p = GeminiProvider::new(&AiProviderConfig {
            api_key: Some("gm-test".to_string()),
            api_base: Some("http://127.0.0.1:9".to_string()),
            timeout_secs: 2,
            ..Default::default()
        })
        .unwrap();

        assert!(p.competitors("seo").await.is_empty());
        assert_eq!(p.generate_title("seo", Intent::Commercial, None).await, None);
        assert!(!p.test_connection().await.success);
    }
}
