//! SerpAPI aggregator backend (bing engine).
//!
//! SerpAPI's protocol puts the credential in the query string, so every
//! reqwest error is stripped of its URL before it reaches a message.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::config::Config;
use crate::error::{Result, SearchError};
use crate::models::{NormalizedResult, ProviderKind, ResultItem};

use super::{REQUEST_TIMEOUT, SearchOptions, SearchProvider};

const SERPAPI_ENDPOINT: &str = "https://serpapi.com/search.json";

#[derive(Debug, Deserialize)]
struct SerpApiResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    snippet: Option<String>,
}

pub struct SerpApiProvider {
    client: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
}

impl SerpApiProvider {
    pub fn new(config: &Config) -> SerpApiProvider {
        SerpApiProvider {
            client: reqwest::Client::new(),
            api_key: config.serpapi_api_key.clone(),
            endpoint: SERPAPI_ENDPOINT.to_string(),
        }
    }

    /// Points the provider at a different endpoint, for contract tests.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> SerpApiProvider {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl SearchProvider for SerpApiProvider {
    async fn search(&self, query: &str, options: &SearchOptions) -> Result<NormalizedResult> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(SearchError::Configuration(
                "SERPAPI_API_KEY is not set".into(),
            ));
        };

        tracing::debug!(query, count = options.count, "querying serpapi bing engine");

        // SerpAPI only knows a binary safe-search switch.
        let safe = if options.safe_search.eq_ignore_ascii_case("off") {
            "off"
        } else {
            "on"
        };
        let params = [
            ("engine", "bing".to_string()),
            ("q", query.to_string()),
            ("hl", options.market.clone()),
            ("safe", safe.to_string()),
            ("api_key", api_key.to_string()),
            ("num", options.count.to_string()),
        ];

        let data: Value = self
            .client
            .get(&self.endpoint)
            .timeout(REQUEST_TIMEOUT)
            .query(&params)
            .send()
            .await
            .map_err(|e| SearchError::upstream(self.kind(), e.without_url()))?
            .error_for_status()
            .map_err(|e| SearchError::upstream(self.kind(), e.without_url()))?
            .json()
            .await
            .map_err(|e| SearchError::upstream(self.kind(), e.without_url()))?;

        let raw = options.include_raw.then(|| data.clone());
        let parsed: SerpApiResponse = serde_json::from_value(data)
            .map_err(|e| SearchError::upstream(self.kind(), e))?;

        // Truncate to the requested count before assigning ranks, so ranks
        // stay contiguous over what is actually returned.
        let mut items = Vec::new();
        for (i, result) in parsed
            .organic_results
            .into_iter()
            .take(options.count as usize)
            .enumerate()
        {
            items.push(ResultItem::new(
                result.title,
                result.link,
                result.snippet.unwrap_or_default(),
                i + 1,
                self.kind(),
            )?);
        }

        Ok(NormalizedResult::new(self.kind(), items, raw))
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::SerpapiBing
    }
}
