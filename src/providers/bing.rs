//! Native Bing v7 backend.
//!
//! The credential travels in the `Ocp-Apim-Subscription-Key` header, never
//! in the URL, so it cannot leak through logged or echoed request URLs.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::config::Config;
use crate::error::{Result, SearchError};
use crate::models::{NormalizedResult, ProviderKind, ResultItem};

use super::{REQUEST_TIMEOUT, SearchOptions, SearchProvider};

const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

#[derive(Debug, Deserialize)]
struct BingResponse {
    #[serde(rename = "webPages")]
    web_pages: Option<WebPages>,
    // Other answer collections (images, news, ...) are ignored.
}

#[derive(Debug, Deserialize)]
struct WebPages {
    #[serde(default)]
    value: Vec<WebPage>,
}

#[derive(Debug, Deserialize)]
struct WebPage {
    #[serde(default)]
    name: String,
    #[serde(default)]
    url: String,
    snippet: Option<String>,
    about: Option<String>,
}

pub struct BingProvider {
    client: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
}

impl BingProvider {
    pub fn new(config: &Config) -> BingProvider {
        BingProvider {
            client: reqwest::Client::new(),
            api_key: config.bing_api_key.clone(),
            endpoint: config.bing_endpoint.clone(),
        }
    }
}

#[async_trait]
impl SearchProvider for BingProvider {
    async fn search(&self, query: &str, options: &SearchOptions) -> Result<NormalizedResult> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(SearchError::Configuration(
                "BING_SEARCH_API_KEY is not set".into(),
            ));
        };

        tracing::debug!(query, count = options.count, "querying bing v7");

        let params = [
            ("q", query.to_string()),
            ("count", options.count.to_string()),
            ("mkt", options.market.clone()),
            ("safeSearch", options.safe_search.clone()),
        ];

        // A retired or unreachable tenant shows up here as 401/403/404/410.
        let data: Value = self
            .client
            .get(&self.endpoint)
            .timeout(REQUEST_TIMEOUT)
            .header(SUBSCRIPTION_KEY_HEADER, api_key)
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
        let parsed: BingResponse = serde_json::from_value(data)
            .map_err(|e| SearchError::upstream(self.kind(), e))?;

        let pages = parsed.web_pages.map(|w| w.value).unwrap_or_default();
        let mut items = Vec::with_capacity(pages.len());
        for (i, page) in pages.into_iter().enumerate() {
            let snippet = page
                .snippet
                .filter(|s| !s.is_empty())
                .or_else(|| page.about.filter(|s| !s.is_empty()))
                .unwrap_or_default();
            items.push(ResultItem::new(page.name, page.url, snippet, i + 1, self.kind())?);
        }

        Ok(NormalizedResult::new(self.kind(), items, raw))
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::BingV7
    }
}
