//! Keyword Provider Abstraction
//!
//! Defines the `KeywordProvider` trait shared by every optional enrichment
//! source. All capabilities are infallible from the caller's point of view:
//! a provider that cannot answer returns `None` or an empty list and the
//! fallback cascade moves on.
//!
//! ## Modules
//!
//! - `chain`: Fallback resolver with cascading attempts ending at the rule engine
//! - `prompts`: Prompt builders and response parsers shared by the AI adapters

mod chain;
mod gemini;
mod google_search;
mod openai;
mod prompts;

pub use chain::{FallbackResolver, Resolved, ResolverBuilder, Source};
pub use gemini::GeminiProvider;
pub use google_search::GoogleSearchProvider;
pub use openai::OpenAiProvider;
pub use prompts::ReplyFormat;

#[cfg(test)]
pub(crate) use chain::tests::MockProvider;

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::ProvidersConfig;
use crate::constants::provider::ERROR_PREVIEW_CHARS;
use crate::types::{Competitor, ErrorCategory, ErrorClassifier, Intent, KeyweaveError, Result};

/// Shared provider type used by the resolver
pub type SharedProvider = Arc<dyn KeywordProvider>;

// =============================================================================
// Connection Status
// =============================================================================

/// Outcome of a connectivity check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionStatus {
    pub success: bool,
    pub message: String,
}

impl ConnectionStatus {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }

    /// Status reported when no credential is configured
    pub fn missing_key(label: &str) -> Self {
        Self::failed(format!("No {} API key provided", label))
    }

    /// Turn a failed check into a status.
    ///
    /// Rate-limit and quota failures count as success: the provider accepted
    /// the credential before refusing the request.
    pub fn from_error(label: &str, provider: &str, err: &KeyweaveError) -> Self {
        let text = err.to_string();
        let by_message = ErrorClassifier::classify(&text, provider).category;
        let category = if by_message.credential_accepted() {
            by_message
        } else {
            ErrorClassifier::classify_error(err, provider).category
        };

        let preview: String = text.chars().take(ERROR_PREVIEW_CHARS).collect();
        match category {
            ErrorCategory::RateLimit => Self::ok(format!(
                "Connected to {} API, but rate limit or quota reached. \
                 Your API key is valid but you may need to wait before making more requests.",
                label
            )),
            ErrorCategory::Auth => Self::failed(format!("Authentication error: {}...", preview)),
            _ => Self::failed(format!("Failed to connect to {} API: {}...", label, preview)),
        }
    }
}

// =============================================================================
// Keyword Provider Trait
// =============================================================================

/// Optional enrichment source for keyword nodes.
///
/// Capabilities a provider does not offer keep their default (empty) body.
#[async_trait]
pub trait KeywordProvider: Send + Sync {
    /// Provider name for logging and build statistics
    fn name(&self) -> &str;

    /// Search intent, or `None` when the reply names no known category
    async fn classify_intent(&self, _keyword: &str) -> Option<Intent> {
        None
    }

    /// Article title for the keyword
    async fn generate_title(
        &self,
        _keyword: &str,
        _intent: Intent,
        _instruction: Option<&str>,
    ) -> Option<String> {
        None
    }

    /// Up to ten related keywords flavoured by the intent
    async fn related_keywords(&self, _keyword: &str, _intent: Intent) -> Vec<String> {
        Vec::new()
    }

    /// Up to three ranking pages for the keyword
    async fn competitors(&self, _keyword: &str) -> Vec<Competitor> {
        Vec::new()
    }

    /// Minimal live request proving the credential works
    async fn test_connection(&self) -> ConnectionStatus {
        ConnectionStatus::failed(format!("{} does not support connectivity checks", self.name()))
    }
}

/// Build every provider that has credentials, in resolver priority order:
/// web search, then OpenAI, then Gemini.
pub fn create_providers(config: &ProvidersConfig) -> Vec<SharedProvider> {
    let mut providers: Vec<SharedProvider> = Vec::new();

    push_configured(
        &mut providers,
        "google_search",
        config.google_search.is_configured(),
        || GoogleSearchProvider::new(&config.google_search).map(|p| Arc::new(p) as SharedProvider),
    );
    push_configured(&mut providers, "openai", config.openai.is_configured(), || {
        OpenAiProvider::new(&config.openai).map(|p| Arc::new(p) as SharedProvider)
    });
    push_configured(&mut providers, "gemini", config.gemini.is_configured(), || {
        GeminiProvider::new(&config.gemini).map(|p| Arc::new(p) as SharedProvider)
    });

    info!(
        providers = providers.len(),
        names = ?providers.iter().map(|p| p.name().to_string()).collect::<Vec<_>>(),
        "Enrichment providers ready"
    );
    providers
}

fn push_configured(
    providers: &mut Vec<SharedProvider>,
    name: &str,
    configured: bool,
    build: impl FnOnce() -> Result<SharedProvider>,
) {
    if !configured {
        return;
    }
    match build() {
        Ok(provider) => providers.push(provider),
        Err(e) => warn!(provider = name, error = %e, "Provider disabled"),
    }
}

// =============================================================================
// Adapter helpers
// =============================================================================

/// Log a failed capability call and degrade it to the empty value
pub(crate) fn swallow<T: Default>(provider: &str, capability: &str, result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!(provider, capability, error = %e, "Provider call failed");
            T::default()
        }
    }
}

/// Map a transport-level reqwest failure onto a classified provider error.
/// The URL is dropped since it may carry a query-string key.
pub(crate) fn transport_error(provider: &str, err: reqwest::Error) -> KeyweaveError {
    let err = err.without_url();
    let message = format!("{} request failed: {}", provider, err);
    if err.is_timeout() || err.is_connect() {
        crate::types::ProviderError::with_provider(ErrorCategory::Network, message, provider).into()
    } else {
        ErrorClassifier::classify(&message, provider).into()
    }
}

/// Turn a non-success HTTP reply into a classified provider error
pub(crate) async fn status_error(provider: &str, response: reqwest::Response) -> KeyweaveError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    ErrorClassifier::classify_http_status(
        status.as_u16(),
        &format!("HTTP {} - {}", status.as_u16(), body),
        provider,
    )
    .into()
}

/// Validate and normalise a configured API base URL
pub(crate) fn validate_endpoint(provider: &str, endpoint: &str) -> Result<String> {
    let url = url::Url::parse(endpoint).map_err(|e| {
        KeyweaveError::Config(format!("Invalid {} endpoint URL '{}': {}", provider, endpoint, e))
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(KeyweaveError::Config(format!(
            "{} endpoint must use http or https scheme, got: {}",
            provider,
            url.scheme()
        )));
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}

pub(crate) fn http_client(provider: &str, timeout_secs: u64) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| {
            KeyweaveError::ProviderApi(format!("Failed to create {} HTTP client: {}", provider, e))
        })
}
