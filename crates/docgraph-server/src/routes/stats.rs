//! Health and graph statistics routes.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use docgraph_store::GraphStats;

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .route("/ontology/stats", get(get_stats))
}

/// GET /api/health: liveness plus a few capability flags.
async fn health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let stats = state.store.stats();
    let llm_provider = state
        .llm_config
        .read()
        .resolve_provider()
        .map(|r| r.provider.to_string());

    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "nodeCount": stats.node_count,
        "linkCount": stats.link_count,
        "llmAvailable": llm_provider.is_some(),
        "llmProvider": llm_provider,
        "pdfExtraction": docgraph_ingest::source::pdf_support_enabled(),
    }))
}

/// GET /api/ontology/stats: counts by node and link type.
async fn get_stats(State(state): State<Arc<AppState>>) -> Json<GraphStats> {
    Json(state.store.stats())
}
