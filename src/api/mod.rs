use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::models::ProviderKind;
use crate::providers::{BingProvider, SearchProvider, SerpApiProvider};

pub mod handlers;
pub mod models;

/// Read-only per-process state: the configuration plus one client per
/// backend, built once and shared across requests.
pub struct AppState {
    pub config: Config,
    bing: BingProvider,
    serpapi: SerpApiProvider,
}

impl AppState {
    pub fn new(config: Config) -> AppState {
        let bing = BingProvider::new(&config);
        let serpapi = SerpApiProvider::new(&config);
        AppState {
            config,
            bing,
            serpapi,
        }
    }

    pub fn provider(&self, kind: ProviderKind) -> &dyn SearchProvider {
        match kind {
            ProviderKind::BingV7 => &self.bing,
            ProviderKind::SerpapiBing => &self.serpapi,
        }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/search", get(handlers::search_handler))
        .with_state(state)
        .layer(cors)
}
