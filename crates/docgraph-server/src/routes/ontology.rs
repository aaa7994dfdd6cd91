//! Ontology graph routes: list nodes and links, reset.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use docgraph_store::{Edge, Node};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ontology/nodes", get(list_nodes))
        .route("/ontology/links", get(list_links))
        .route("/ontology/reset", post(reset))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ResetRequest {
    load_seed: bool,
}

/// GET /api/ontology/nodes
async fn list_nodes(State(state): State<Arc<AppState>>) -> Json<Vec<Node>> {
    Json(state.store.list_nodes())
}

/// GET /api/ontology/links
async fn list_links(State(state): State<Arc<AppState>>) -> Json<Vec<Edge>> {
    Json(state.store.list_links())
}

impl ResetRequest {
    /// An empty body means the defaults.
    fn from_body(body: &[u8]) -> ApiResult<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
            .map_err(|e| ApiError::bad_request(format!("Invalid reset body: {}", e)))
    }
}

/// POST /api/ontology/reset: clear the graph, optionally reloading the seed.
async fn reset(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<Json<serde_json::Value>> {
    let req = ResetRequest::from_body(&body)?;
    let stats = state.store.reset(req.load_seed);
    Ok(Json(serde_json::json!({
        "success": true,
        "nodeCount": stats.node_count,
        "linkCount": stats.link_count,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_body_defaults() {
        assert!(!ResetRequest::from_body(b"").unwrap().load_seed);
        assert!(!ResetRequest::from_body(b"{}").unwrap().load_seed);
        assert!(ResetRequest::from_body(br#"{"loadSeed": true}"#).unwrap().load_seed);
        let err = ResetRequest::from_body(b"{not json").unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
    }
}
