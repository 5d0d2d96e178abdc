//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Provider credentials live here rather than in process-wide state; a
//! provider without a credential is simply left out of the fallback cascade.

use serde::{Deserialize, Serialize};

use crate::constants::{network, tree};
use crate::export::ExportFormat;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Optional enrichment providers
    pub providers: ProvidersConfig,

    /// Tree generation settings
    pub generation: GenerationConfig,

    /// Output settings
    pub export: ExportConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            providers: ProvidersConfig::default(),
            generation: GenerationConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `KeyweaveError::Config` on validation failure.
    pub fn validate(&self) -> crate::types::Result<()> {
        for (name, ai) in [
            ("openai", &self.providers.openai),
            ("gemini", &self.providers.gemini),
        ] {
            if !(0.0..=2.0).contains(&ai.temperature) {
                return Err(crate::types::KeyweaveError::Config(format!(
                    "{} temperature must be between 0.0 and 2.0, got {}",
                    name, ai.temperature
                )));
            }
            if ai.timeout_secs == 0 {
                return Err(crate::types::KeyweaveError::Config(format!(
                    "{} timeout_secs must be greater than 0",
                    name
                )));
            }
        }

        if self.providers.google_search.timeout_secs == 0 {
            return Err(crate::types::KeyweaveError::Config(
                "google_search timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// Provider Configuration
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    /// AI provider A
    pub openai: AiProviderConfig,

    /// AI provider B
    pub gemini: AiProviderConfig,

    /// Web search provider (competitor listings only)
    pub google_search: SearchProviderConfig,
}

impl ProvidersConfig {
    /// Fill credentials still unset from the conventional environment variables
    /// (`OPENAI_API_KEY`, `GEMINI_API_KEY`, `GOOGLE_SEARCH_API_KEY`, `GOOGLE_SEARCH_CX`).
    pub fn fill_from_env(&mut self) {
        fill_from_var(&mut self.openai.api_key, "OPENAI_API_KEY");
        fill_from_var(&mut self.gemini.api_key, "GEMINI_API_KEY");
        fill_from_var(&mut self.google_search.api_key, "GOOGLE_SEARCH_API_KEY");
        fill_from_var(&mut self.google_search.engine_id, "GOOGLE_SEARCH_CX");
    }
}

fn fill_from_var(slot: &mut Option<String>, var: &str) {
    if slot.as_deref().is_none_or(|s| s.trim().is_empty())
        && let Ok(value) = std::env::var(var)
        && !value.trim().is_empty()
    {
        *slot = Some(value);
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Settings for an AI text-generation provider
///
/// Note: API keys are never serialized to output and are redacted in debug
/// output. Providers convert the key to SecretString internally.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiProviderConfig {
    /// API key; the provider is disabled without one
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Model name (provider default when unset)
    pub model: Option<String>,

    /// API base URL (for custom endpoints)
    pub api_base: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Sampling temperature
    pub temperature: f32,
}

impl AiProviderConfig {
    /// Trimmed API key, if one is configured
    pub fn api_key(&self) -> Option<&str> {
        non_empty(&self.api_key)
    }

    pub fn is_configured(&self) -> bool {
        self.api_key().is_some()
    }
}

impl Default for AiProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: None,
            api_base: None,
            timeout_secs: network::DEFAULT_TIMEOUT_SECS,
            temperature: 1.0,
        }
    }
}

impl std::fmt::Debug for AiProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiProviderConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("timeout_secs", &self.timeout_secs)
            .field("temperature", &self.temperature)
            .finish()
    }
}

/// Settings for the web search provider
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchProviderConfig {
    /// API key
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Programmable search engine identifier (`cx`)
    pub engine_id: Option<String>,

    /// API base URL (for custom endpoints)
    pub api_base: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl SearchProviderConfig {
    pub fn api_key(&self) -> Option<&str> {
        non_empty(&self.api_key)
    }

    pub fn engine_id(&self) -> Option<&str> {
        non_empty(&self.engine_id)
    }

    /// Search needs both the key and the engine id
    pub fn is_configured(&self) -> bool {
        self.api_key().is_some() && self.engine_id().is_some()
    }
}

impl Default for SearchProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            engine_id: None,
            api_base: None,
            timeout_secs: network::DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl std::fmt::Debug for SearchProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchProviderConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("engine_id", &self.engine_id)
            .field("api_base", &self.api_base)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

// =============================================================================
// Generation Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Expansion depth below the seed (clamped to 1-3)
    pub depth: u8,

    /// Extra instruction for title generation
    pub custom_instruction: Option<String>,

    /// Seed for the rule engine RNG; unset means a fresh seed per run
    pub rule_seed: Option<u64>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            depth: tree::DEFAULT_DEPTH,
            custom_instruction: None,
            rule_seed: None,
        }
    }
}

// =============================================================================
// Export Configuration
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Default output format
    pub format: ExportFormat,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.generation.depth, 2);
        assert!(!config.providers.openai.is_configured());
        assert!(!config.providers.google_search.is_configured());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_key_is_not_configured() {
        let ai = AiProviderConfig {
            api_key: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(!ai.is_configured());
    }

    #[test]
    fn test_search_needs_engine_id() {
        let mut search = SearchProviderConfig {
            api_key: Some("key".to_string()),
            ..Default::default()
        };
        assert!(!search.is_configured());
        search.engine_id = Some("cx".to_string());
        assert!(search.is_configured());
    }

    #[test]
    fn test_api_key_redacted_and_not_serialized() {
        let ai = AiProviderConfig {
            api_key: Some("sk-secret".to_string()),
            ..Default::default()
        };
        assert!(!format!("{:?}", ai).contains("sk-secret"));
        assert!(!serde_json::to_string(&ai).unwrap().contains("sk-secret"));
    }

    #[test]
    fn test_validate_rejects_bad_temperature() {
        let mut config = Config::default();
        config.providers.gemini.temperature = 3.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.providers.google_search.timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
