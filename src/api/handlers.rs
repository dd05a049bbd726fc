use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use std::str::FromStr;
use std::sync::Arc;

use crate::error::SearchError;
use crate::models::{ProviderKind, SearchResponse};
use crate::providers::{SearchOptions, choose_provider};

use super::AppState;
use super::models::{HealthResponse, SearchParams};

/// Always reports healthy; backend reachability is deliberately unchecked.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn search_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    // Boundary validation, before any provider is involved.
    if params.q.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "query cannot be empty".to_string()));
    }
    if !(1..=50).contains(&params.count) {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("count must be between 1 and 50, got {}", params.count),
        ));
    }

    let requested = params
        .provider
        .as_deref()
        .map(ProviderKind::from_str)
        .transpose()
        .map_err(error_response)?;
    let kind = choose_provider(&state.config, requested).map_err(error_response)?;

    tracing::info!(provider = %kind, query = %params.q, count = params.count, "dispatching search");

    let options = SearchOptions {
        count: params.count,
        market: params.mkt.clone(),
        safe_search: params.safe_search.clone(),
        include_raw: params.include_raw,
    };

    let result = state
        .provider(kind)
        .search(&params.q, &options)
        .await
        .map_err(|e| {
            tracing::warn!(provider = %kind, error = %e, "search failed");
            error_response(e)
        })?;

    Ok(Json(SearchResponse::from_result(params.q, result)))
}

fn error_response(err: SearchError) -> (StatusCode, String) {
    let status = match &err {
        SearchError::Configuration(_) | SearchError::Validation(_) => StatusCode::BAD_REQUEST,
        SearchError::Upstream { .. } => StatusCode::BAD_GATEWAY,
    };
    (status, err.to_string())
}
