//! Shared helpers: a router over a throwaway data directory.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use docgraph_core::AppConfig;
use docgraph_llm::LLMConfig;
use docgraph_server::{build_router, AppState};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
    pub dir: TempDir,
}

/// App with the seed ontology loaded and no LLM keys, regardless of the host environment.
pub fn test_app() -> TestApp {
    let dir = TempDir::new().expect("temp dir");
    let config = AppConfig::from_lookup(dir.path(), |_| None).expect("config");
    let llm_config = LLMConfig::load_with(&config.data_paths.llm_config_file, |_| None);
    let state = Arc::new(AppState::with_llm_config(config, llm_config).expect("state"));
    TestApp {
        router: build_router(state.clone()),
        state,
        dir,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .uri(uri)
                .method("GET")
                .body(Body::empty())
                .expect("request"),
        )
        .await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(json_request("POST", uri, body.to_string())).await
    }

    pub async fn put_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(json_request("PUT", uri, body.to_string())).await
    }
}

pub fn json_request(method: &str, uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .expect("request")
}
