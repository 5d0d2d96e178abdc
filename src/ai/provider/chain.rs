//! Fallback Resolver
//!
//! Cascading provider attempts that always end at the rule engine.
//!
//! ## Strategy
//!
//! 1. Ask each configured provider in priority order
//!    (web search, OpenAI, Gemini)
//! 2. Accept the first non-empty answer
//! 3. Otherwise fall through to the rule engine, which never comes back empty
//!
//! Provider failures are already swallowed by the adapters, so the resolver
//! itself cannot fail. Every answer carries the source that produced it.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::{KeywordProvider, SharedProvider, create_providers};
use crate::config::Config;
use crate::rules::RuleEngine;
use crate::types::{Competitor, Intent};

/// Where a resolved value came from
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Source {
    Provider(String),
    Rules,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Provider(name) => f.write_str(name),
            Source::Rules => f.write_str("rules"),
        }
    }
}

/// A value together with its source
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    pub value: T,
    pub source: Source,
}

impl<T> Resolved<T> {
    fn provider(value: T, provider: &dyn KeywordProvider) -> Self {
        Self {
            value,
            source: Source::Provider(provider.name().to_string()),
        }
    }

    fn rules(value: T) -> Self {
        Self {
            value,
            source: Source::Rules,
        }
    }
}

/// Ordered providers backed by the rule engine
pub struct FallbackResolver {
    providers: Vec<SharedProvider>,
    rules: RuleEngine,
}

impl fmt::Debug for FallbackResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FallbackResolver")
            .field("providers", &self.provider_names())
            .finish_non_exhaustive()
    }
}

impl FallbackResolver {
    pub fn new(providers: Vec<SharedProvider>, rules: RuleEngine) -> Self {
        Self { providers, rules }
    }

    /// Rule engine only; no network access
    pub fn rules_only(rules: RuleEngine) -> Self {
        Self::new(Vec::new(), rules)
    }

    /// Providers for every configured credential plus a rule engine seeded
    /// from `generation.rule_seed`
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            create_providers(&config.providers),
            RuleEngine::from_seed(config.generation.rule_seed),
        )
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub fn rules(&self) -> &RuleEngine {
        &self.rules
    }

    /// Recognized intent from the first provider that names one, else the
    /// indicator tables
    pub async fn classify_intent(&self, keyword: &str) -> Resolved<Intent> {
        for provider in &self.providers {
            if let Some(intent) = provider.classify_intent(keyword).await {
                debug!(keyword, %intent, provider = provider.name(), "Intent resolved");
                return Resolved::provider(intent, provider.as_ref());
            }
        }

        let intent = self.rules.classify_intent(keyword);
        debug!(keyword, %intent, provider = "rules", "Intent resolved");
        Resolved::rules(intent)
    }

    pub async fn generate_title(
        &self,
        keyword: &str,
        intent: Intent,
        instruction: Option<&str>,
    ) -> Resolved<String> {
        for provider in &self.providers {
            if let Some(title) = provider.generate_title(keyword, intent, instruction).await
                && !title.trim().is_empty()
            {
                debug!(keyword, provider = provider.name(), "Title resolved");
                return Resolved::provider(title, provider.as_ref());
            }
        }

        debug!(keyword, provider = "rules", "Title resolved");
        Resolved::rules(self.rules.generate_title(keyword, intent, instruction))
    }

    /// Related keywords. Without an intent the keyword is first classified
    /// through this resolver's own intent cascade.
    pub async fn related_keywords(
        &self,
        keyword: &str,
        intent: Option<Intent>,
    ) -> Resolved<Vec<String>> {
        let intent = match intent {
            Some(intent) => intent,
            None => self.classify_intent(keyword).await.value,
        };

        for provider in &self.providers {
            let keywords: Vec<String> = provider
                .related_keywords(keyword, intent)
                .await
                .into_iter()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .collect();
            if !keywords.is_empty() {
                debug!(
                    keyword,
                    count = keywords.len(),
                    provider = provider.name(),
                    "Keywords resolved"
                );
                return Resolved::provider(keywords, provider.as_ref());
            }
        }

        let keywords = self.rules.generate_related_keywords(keyword, Some(intent));
        debug!(keyword, count = keywords.len(), provider = "rules", "Keywords resolved");
        Resolved::rules(keywords)
    }

    pub async fn competitors(&self, keyword: &str) -> Resolved<Vec<Competitor>> {
        for provider in &self.providers {
            let competitors = provider.competitors(keyword).await;
            if !competitors.is_empty() {
                debug!(keyword, provider = provider.name(), "Competitors resolved");
                return Resolved::provider(competitors, provider.as_ref());
            }
        }

        debug!(keyword, provider = "rules", "Competitors resolved");
        Resolved::rules(self.rules.generate_competitors(keyword))
    }

    /// Word counts always come from the rule engine
    pub fn recommend_word_count(&self, intent: Intent) -> u32 {
        self.rules.recommend_word_count(intent)
    }

    /// Uniformly random intent for the seed keyword
    pub fn random_intent(&self) -> Intent {
        self.rules.random_intent()
    }
}

/// Builder for creating resolvers
pub struct ResolverBuilder {
    providers: Vec<SharedProvider>,
    rules: Option<RuleEngine>,
}

impl ResolverBuilder {
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
            rules: None,
        }
    }

    /// Append a provider; earlier providers win
    pub fn add_provider(mut self, provider: impl KeywordProvider + 'static) -> Self {
        self.providers.push(Arc::new(provider));
        self
    }

    pub fn add_shared(mut self, provider: SharedProvider) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn with_rules(mut self, rules: RuleEngine) -> Self {
        self.rules = Some(rules);
        self
    }

    pub fn build(self) -> FallbackResolver {
        FallbackResolver::new(self.providers, self.rules.unwrap_or_default())
    }
}

impl Default for ResolverBuilder {
    fn default() -> Self {
        Self::new()
    }
}
