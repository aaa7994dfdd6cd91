//! Review queue routes.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use docgraph_store::{ReviewDecision, ReviewItem};
use serde::Deserialize;

use crate::error::{ApiResult, AppJson};
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/review/pending", get(list_pending))
        .route("/review/{id}/decision", post(decide))
}

#[derive(Debug, Deserialize)]
struct DecisionRequest {
    decision: ReviewDecision,
    #[serde(default)]
    comment: Option<String>,
}

/// GET /api/review/pending
async fn list_pending(State(state): State<Arc<AppState>>) -> Json<Vec<ReviewItem>> {
    Json(state.review_queue.pending())
}

/// POST /api/review/{id}/decision
async fn decide(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    AppJson(req): AppJson<DecisionRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let item = state.review_queue.decide(&id, req.decision, req.comment)?;
    Ok(Json(serde_json::json!({
        "success": true,
        "item": item,
    })))
}
