//! End-to-end tests driving the HTTP surface of the gateway.
//!
//! Each test spawns the router on an ephemeral port and talks to it with a
//! plain HTTP client; the Bing upstream is a wiremock server wired in
//! through the configuration.

use std::sync::Arc;

use prism::api::{AppState, create_router};
use prism::config::Config;
use serde_json::{Value, json};
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod test_helpers {
    use super::*;

    pub fn no_backend_config() -> Config {
        Config {
            bing_api_key: None,
            bing_endpoint: "http://127.0.0.1:1/unused".to_string(),
            serpapi_api_key: None,
        }
    }

    pub fn bing_only_config(endpoint: &str) -> Config {
        Config {
            bing_api_key: Some("test-bing-key".to_string()),
            bing_endpoint: endpoint.to_string(),
            serpapi_api_key: None,
        }
    }

    pub async fn spawn_app(config: Config) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        let router = create_router(Arc::new(AppState::new(config)));
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("server");
        });
        format!("http://{addr}")
    }
}

use test_helpers::*;

#[tokio::test]
async fn health_is_always_ok() {
    let base = spawn_app(no_backend_config()).await;

    let response = reqwest::get(format!("{base}/health")).await.expect("request");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("json body");
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn missing_query_parameter_is_rejected() {
    let base = spawn_app(no_backend_config()).await;

    let response = reqwest::get(format!("{base}/search")).await.expect("request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn blank_query_is_rejected() {
    let base = spawn_app(no_backend_config()).await;

    let response = reqwest::Client::new()
        .get(format!("{base}/search"))
        .query(&[("q", "   ")])
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), 400);
    assert!(response.text().await.unwrap().contains("query cannot be empty"));
}

#[tokio::test]
async fn out_of_range_count_is_rejected_before_any_upstream_call() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&upstream)
        .await;

    let base = spawn_app(bing_only_config(&upstream.uri())).await;
    let client = reqwest::Client::new();

    for bad_count in ["0", "51"] {
        let response = client
            .get(format!("{base}/search"))
            .query(&[("q", "test"), ("count", bad_count)])
            .send()
            .await
            .expect("request");
        assert_eq!(response.status(), 400, "count={bad_count} should be rejected");
        assert!(response.text().await.unwrap().contains("count must be between 1 and 50"));
    }
}

#[tokio::test]
async fn no_configured_backend_yields_400() {
    let base = spawn_app(no_backend_config()).await;

    let response = reqwest::Client::new()
        .get(format!("{base}/search"))
        .query(&[("q", "test")])
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), 400);
    assert!(response.text().await.unwrap().contains("no search backend configured"));
}

#[tokio::test]
async fn explicit_override_bypasses_preference_but_not_credentials() {
    // Only Bing is configured, yet the caller forces SerpAPI: the
    // aggregator's own missing-credential failure must surface.
    let base = spawn_app(bing_only_config("http://127.0.0.1:1/unused")).await;

    let response = reqwest::Client::new()
        .get(format!("{base}/search"))
        .query(&[("q", "test"), ("provider", "serpapi-bing")])
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), 400);
    assert!(response.text().await.unwrap().contains("SERPAPI_API_KEY"));
}

#[tokio::test]
async fn unknown_provider_name_is_rejected() {
    let base = spawn_app(no_backend_config()).await;

    let response = reqwest::Client::new()
        .get(format!("{base}/search"))
        .query(&[("q", "test"), ("provider", "duckduckgo")])
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), 400);
    assert!(response.text().await.unwrap().contains("unknown provider"));
}

#[tokio::test]
async fn search_normalizes_a_bing_response() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("q", "rust web"))
        .and(query_param("count", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "webPages": { "value": [
                { "name": "First", "url": "https://example.com/1", "snippet": "one" },
                { "name": "Second", "url": "https://example.com/2", "snippet": "two" }
            ]}
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    let base = spawn_app(bing_only_config(&upstream.uri())).await;

    let response = reqwest::Client::new()
        .get(format!("{base}/search"))
        .query(&[("q", "rust web"), ("count", "2")])
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("json body");
    assert_eq!(body["query"], "rust web");
    assert_eq!(body["provider"], "bing-v7");
    assert_eq!(body["count"], 2);

    let items = body["items"].as_array().expect("items array");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["rank"], 1);
    assert_eq!(items[1]["rank"], 2);
    assert_eq!(items[0]["title"], "First");
    assert_eq!(items[1]["url"], "https://example.com/2");
    assert_eq!(items[0]["source"], "bing-v7");

    // raw was not requested, so the field is absent entirely.
    assert!(body.get("raw").is_none());
}

#[tokio::test]
async fn include_raw_passes_the_upstream_body_through() {
    let upstream_body = json!({ "webPages": { "value": [] }, "queryContext": { "q": "x" } });
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream_body.clone()))
        .mount(&upstream)
        .await;

    let base = spawn_app(bing_only_config(&upstream.uri())).await;

    let body: Value = reqwest::Client::new()
        .get(format!("{base}/search"))
        .query(&[("q", "x"), ("include_raw", "true")])
        .send()
        .await
        .expect("request")
        .json()
        .await
        .expect("json body");

    assert_eq!(body["raw"], upstream_body);
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn upstream_failure_is_a_502_naming_the_provider() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&upstream)
        .await;

    let base = spawn_app(bing_only_config(&upstream.uri())).await;

    let response = reqwest::Client::new()
        .get(format!("{base}/search"))
        .query(&[("q", "test")])
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), 502);
    let detail = response.text().await.unwrap();
    assert!(detail.contains("bing-v7 request failed"));
}
