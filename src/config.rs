use std::env;

pub const DEFAULT_BING_ENDPOINT: &str = "http://bing.ydcloud.org:4399/api/v1/v7.0/search";

/// Process-wide configuration, read once at startup and passed by value.
/// A missing credential is a normal state, not a startup failure; the
/// provider that needs it reports the gap when invoked.
#[derive(Debug, Clone)]
pub struct Config {
    pub bing_api_key: Option<String>,
    pub bing_endpoint: String,
    pub serpapi_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Config {
        dotenvy::dotenv().ok(); // Load .env file if present
        Config {
            bing_api_key: get_env_optional("BING_SEARCH_API_KEY"),
            bing_endpoint: get_env_or_default("BING_SEARCH_ENDPOINT", DEFAULT_BING_ENDPOINT),
            serpapi_api_key: get_env_optional("SERPAPI_API_KEY"),
        }
    }
}

fn get_env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
