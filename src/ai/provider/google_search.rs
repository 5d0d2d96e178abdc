//! Google Custom Search Provider
//!
//! Supplies real ranking pages as competitors. Offers no other capability.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;

use super::{
    KeywordProvider, http_client, status_error, swallow, transport_error, validate_endpoint,
};
use crate::config::SearchProviderConfig;
use crate::constants::provider::{MAX_COMPETITORS, SEARCH_RESULTS};
use crate::types::{Competitor, KeyweaveError, Result};

const DEFAULT_API_BASE: &str = "https://www.googleapis.com/customsearch/v1";
const NAME: &str = "google_search";

pub struct GoogleSearchProvider {
    api_key: SecretString,
    engine_id: String,
    api_base: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for GoogleSearchProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleSearchProvider")
            .field("api_key", &"[REDACTED]")
            .field("engine_id", &self.engine_id)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl GoogleSearchProvider {
    pub fn new(config: &SearchProviderConfig) -> Result<Self> {
        let (Some(api_key), Some(engine_id)) = (config.api_key(), config.engine_id()) else {
            return Err(KeyweaveError::Config(
                "Google search needs both GOOGLE_SEARCH_API_KEY and GOOGLE_SEARCH_CX".to_string(),
            ));
        };

        let api_base = match config.api_base.as_deref() {
            Some(base) => validate_endpoint(NAME, base)?,
            None => DEFAULT_API_BASE.to_string(),
        };

        Ok(Self {
            api_key: SecretString::from(api_key.to_string()),
            engine_id: engine_id.to_string(),
            api_base,
            client: http_client(NAME, config.timeout_secs)?,
        })
    }

    async fn search(&self, keyword: &str) -> Result<Vec<Competitor>> {
        debug!(keyword, "Querying custom search");
        let num = SEARCH_RESULTS.to_string();

        let response = self
            .client
            .get(&self.api_base)
            .query(&[
                ("key", self.api_key.expose_secret()),
                ("cx", self.engine_id.as_str()),
                ("q", keyword),
                ("num", num.as_str()),
            ])
            .send()
            .await
            .map_err(|e| transport_error(NAME, e))?;

        if !response.status().is_success() {
            return Err(status_error(NAME, response).await);
        }

        let body: SearchResponse = response.json().await.map_err(|e| {
            KeyweaveError::ProviderApi(format!("Failed to parse search response: {}", e))
        })?;

        Ok(body.into_competitors())
    }
}

#[async_trait]
impl KeywordProvider for GoogleSearchProvider {
    fn name(&self) -> &str {
        NAME
    }

    async fn competitors(&self, keyword: &str) -> Vec<Competitor> {
        swallow(NAME, "competitors", self.search(keyword).await)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
}

impl SearchResponse {
    fn into_competitors(self) -> Vec<Competitor> {
        self.items
            .into_iter()
            .take(MAX_COMPETITORS)
            .map(|item| Competitor::new(item.title, item.link))
            .collect()
    }
}
