//! Keyword search over the graph.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use docgraph_store::SearchResult;
use serde::Deserialize;
use tracing::debug;

use crate::error::AppJson;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/search", post(search))
}

#[derive(Debug, Deserialize)]
struct SearchRequest {
    #[serde(default)]
    query: String,
}

/// POST /api/search
async fn search(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<SearchRequest>,
) -> Json<SearchResult> {
    let result = state.store.search(&req.query);
    debug!("Search {:?} matched {} nodes", req.query, result.total);
    Json(result)
}
