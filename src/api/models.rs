use serde::{Deserialize, Serialize};

/// Query-string parameters accepted by `GET /search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default = "default_count")]
    pub count: u32,
    #[serde(default = "default_market")]
    pub mkt: String,
    #[serde(default = "default_safe_search")]
    pub safe_search: String,
    #[serde(default)]
    pub include_raw: bool,
    /// Forces a backend (bing-v7 or serpapi-bing); absent means auto-select.
    pub provider: Option<String>,
}

fn default_count() -> u32 {
    10
}

fn default_market() -> String {
    "zh-CN".to_string()
}

fn default_safe_search() -> String {
    "Moderate".to_string()
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
