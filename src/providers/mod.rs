//! Pluggable search backends behind one capability contract.
//!
//! Each backend maps its own wire format into [`NormalizedResult`]; callers
//! never see provider-specific payload shapes except through the optional
//! `raw` passthrough.

use std::time::Duration;

use async_trait::async_trait;

use crate::config::Config;
use crate::error::{Result, SearchError};
use crate::models::{NormalizedResult, ProviderKind};

pub mod bing;
pub mod serpapi;

pub use bing::BingProvider;
pub use serpapi::SerpApiProvider;

/// Outbound request timeout shared by both backends. Exceeding it is an
/// `Upstream` error, never a hang.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Per-request knobs forwarded to whichever backend answers.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Number of results to request, validated to 1..=50 at the boundary.
    pub count: u32,
    /// Market/language tag, forwarded upstream as-is.
    pub market: String,
    /// Off | Moderate | Strict; only the Off check is case-insensitive.
    pub safe_search: String,
    /// Pass the unmodified upstream body through in the response.
    pub include_raw: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            count: 10,
            market: "zh-CN".to_string(),
            safe_search: "Moderate".to_string(),
            include_raw: false,
        }
    }
}

/// One external search service integration.
///
/// Implementations check their credential before any network call, make a
/// single attempt (no retries), and return an empty item list as success
/// when upstream finds nothing.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, options: &SearchOptions) -> Result<NormalizedResult>;

    fn kind(&self) -> ProviderKind;
}

/// Picks the backend for a request.
///
/// An explicit override wins unconditionally; the chosen provider does its
/// own credential check and fails accordingly. Otherwise Bing is preferred
/// over SerpAPI, a fixed policy.
pub fn choose_provider(
    config: &Config,
    requested: Option<ProviderKind>,
) -> Result<ProviderKind> {
    if let Some(kind) = requested {
        return Ok(kind);
    }
    if config.bing_api_key.is_some() {
        Ok(ProviderKind::BingV7)
    } else if config.serpapi_api_key.is_some() {
        Ok(ProviderKind::SerpapiBing)
    } else {
        Err(SearchError::Configuration(
            "no search backend configured (set BING_SEARCH_API_KEY or SERPAPI_API_KEY)".into(),
        ))
    }
}

pub fn build_provider(kind: ProviderKind, config: &Config) -> Box<dyn SearchProvider> {
    match kind {
        ProviderKind::BingV7 => Box::new(BingProvider::new(config)),
        ProviderKind::SerpapiBing => Box::new(SerpApiProvider::new(config)),
    }
}
