//! Provider Connectivity Checks
//!
//! Diagnostics only: nothing here affects tree generation, which degrades to
//! the rule engine whenever a provider is unavailable.
//!
//! ## Checks
//!
//! - One minimal live request per AI provider (OpenAI, Gemini)
//! - Web search configuration (no live request)

use std::time::Instant;
use tracing::{info, warn};

use crate::ai::provider::{ConnectionStatus, GeminiProvider, KeywordProvider, OpenAiProvider};
use crate::config::{AiProviderConfig, ProvidersConfig};
use crate::types::Result;

/// Connectivity check results
#[derive(Debug, Clone)]
pub struct PreflightResult {
    /// Every check passed
    pub passed: bool,
    /// Individual check results
    pub checks: Vec<CheckResult>,
    /// Non-blocking notes
    pub warnings: Vec<String>,
    /// Suggested fixes
    pub recommendations: Vec<String>,
}

impl PreflightResult {
    pub fn new() -> Self {
        Self {
            passed: true,
            checks: Vec::new(),
            warnings: Vec::new(),
            recommendations: Vec::new(),
        }
    }

    fn add_check(&mut self, check: CheckResult) {
        if !check.status.success {
            self.passed = false;
        }
        self.checks.push(check);
    }

    /// Check result for a provider label
    pub fn check(&self, provider: &str) -> Option<&CheckResult> {
        self.checks.iter().find(|c| c.provider == provider)
    }
}

impl Default for PreflightResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Individual check result
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Display label ("OpenAI", "Gemini")
    pub provider: String,
    pub status: ConnectionStatus,
    pub duration_ms: u64,
}

/// Run connectivity checks for every AI provider
pub async fn check_providers(config: &ProvidersConfig) -> PreflightResult {
    let mut result = PreflightResult::new();
    info!("Running provider connectivity checks...");

    let openai = check_ai("OpenAI", &config.openai, OpenAiProvider::new).await;
    if !openai.status.success {
        result.recommendations.push(
            "Set OPENAI_API_KEY or [providers.openai].api_key to enable OpenAI".to_string(),
        );
    }
    result.add_check(openai);

    let gemini = check_ai("Gemini", &config.gemini, GeminiProvider::new).await;
    if !gemini.status.success {
        result.recommendations.push(
            "Set GEMINI_API_KEY or [providers.gemini].api_key to enable Gemini".to_string(),
        );
    }
    result.add_check(gemini);

    if !config.google_search.is_configured() {
        result.warnings.push(
            "Google Search is not configured (GOOGLE_SEARCH_API_KEY and GOOGLE_SEARCH_CX); \
             competitor listings will come from AI providers or templates"
                .to_string(),
        );
    }

    if result.passed {
        info!("Connectivity checks passed ({} checks)", result.checks.len());
    } else {
        warn!(
            failed = result.checks.iter().filter(|c| !c.status.success).count(),
            "Some connectivity checks failed"
        );
    }

    result
}

async fn check_ai<P: KeywordProvider>(
    label: &str,
    config: &AiProviderConfig,
    build: impl FnOnce(&AiProviderConfig) -> Result<P>,
) -> CheckResult {
    let start = Instant::now();

    let status = if !config.is_configured() {
        ConnectionStatus::missing_key(label)
    } else {
        match build(config) {
            Ok(provider) => provider.test_connection().await,
            Err(e) => ConnectionStatus::failed(format!("Failed to create {} client: {}", label, e)),
        }
    };

    CheckResult {
        provider: label.to_string(),
        status,
        duration_ms: start.elapsed().as_millis() as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_keys_reported() {
        let result = check_providers(&ProvidersConfig::default()).await;

        assert!(!result.passed);
        assert_eq!(result.checks.len(), 2);
        assert_eq!(
            result.check("OpenAI").unwrap().status.message,
            "No OpenAI API key provided"
        );
        assert_eq!(
            result.check("Gemini").unwrap().status.message,
            "No Gemini API key provided"
        );
        assert_eq!(result.recommendations.len(), 2);
        assert_eq!(result.warnings.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_endpoint_reported() {
        let mut config = ProvidersConfig::default();
        config.openai.api_key = Some("sk-test".to_string());
        config.openai.api_base = Some("file:///tmp".to_string());

        let result = check_providers(&config).await;
        let openai = result.check("OpenAI").unwrap();
        assert!(!openai.status.success);
        assert!(openai.status.message.starts_with("Failed to create OpenAI client"));
    }

    #[test]
    fn test_result_fails_on_any_failed_check() {
        let mut result = PreflightResult::new();
        result.add_check(CheckResult {
            provider: "A".to_string(),
            status: ConnectionStatus::ok("fine"),
            duration_ms: 1,
        });
        assert!(result.passed);

        result.add_check(CheckResult {
            provider: "B".to_string(),
            status: ConnectionStatus::failed("down"),
            duration_ms: 1,
        });
        assert!(!result.passed);
    }
}
