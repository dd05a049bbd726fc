//! Normalized result shapes shared by every backend.
//!
//! Both models are built once per request from upstream response data and
//! never mutated afterwards; they are pure transfer objects.

use std::fmt;
use std::str::FromStr;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SearchError;

/// The two search backends this gateway can answer from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderKind {
    /// Proprietary Bing v7 endpoint, credential sent as a request header.
    #[serde(rename = "bing-v7")]
    BingV7,
    /// SerpAPI's bing engine, credential sent as a query parameter.
    #[serde(rename = "serpapi-bing")]
    SerpapiBing,
}

impl ProviderKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::BingV7 => "bing-v7",
            Self::SerpapiBing => "serpapi-bing",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProviderKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bing-v7" => Ok(Self::BingV7),
            "serpapi-bing" => Ok(Self::SerpapiBing),
            other => Err(SearchError::Validation(format!(
                "unknown provider: {other} (expected bing-v7 or serpapi-bing)"
            ))),
        }
    }
}

/// One search result after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultItem {
    pub title: String,
    pub url: String,
    pub snippet: String,
    /// 1-based position within the response, in upstream order.
    pub rank: usize,
    pub source: ProviderKind,
}

impl ResultItem {
    /// Builds an item, rejecting URLs that do not parse as absolute URLs.
    /// A single bad URL fails the whole response rather than being dropped.
    pub fn new(
        title: String,
        url: String,
        snippet: String,
        rank: usize,
        source: ProviderKind,
    ) -> Result<ResultItem, SearchError> {
        Url::parse(&url)
            .map_err(|e| SearchError::Validation(format!("malformed result url {url:?}: {e}")))?;
        Ok(ResultItem {
            title,
            url,
            snippet,
            rank,
            source,
        })
    }
}

/// What a provider hands back: identity, ordered items, optional raw body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedResult {
    pub provider: ProviderKind,
    /// Always `items.len()`; derived at construction, never set directly.
    pub count: usize,
    pub items: Vec<ResultItem>,
    pub raw: Option<Value>,
}

impl NormalizedResult {
    pub fn new(provider: ProviderKind, items: Vec<ResultItem>, raw: Option<Value>) -> Self {
        NormalizedResult {
            provider,
            count: items.len(),
            items,
            raw,
        }
    }
}

/// The `/search` response body: the normalized result plus the verbatim query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub provider: ProviderKind,
    pub count: usize,
    pub items: Vec<ResultItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<Value>,
}

impl SearchResponse {
    pub fn from_result(query: impl Into<String>, result: NormalizedResult) -> Self {
        SearchResponse {
            query: query.into(),
            provider: result.provider,
            count: result.count,
            items: result.items,
            raw: result.raw,
        }
    }
}
