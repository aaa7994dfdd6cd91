//! HTTP route handlers, all nested under `/api`.

pub mod documents;
pub mod llm;
pub mod ontology;
pub mod review;
pub mod search;
pub mod stats;

use std::sync::Arc;

use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the main Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(stats::routes())
        .merge(ontology::routes())
        .merge(documents::routes())
        .merge(search::routes())
        .merge(review::routes())
        .merge(llm::routes())
}
