//! LLM provider configuration routes. API keys are never echoed back.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use docgraph_core::Error;
use docgraph_llm::{LLMConfigResponse, LLMConfigUpdate};

use crate::error::{ApiError, ApiResult, AppJson};
use crate::state::AppState;

const PROVIDER_CHOICES: &[&str] = &["auto", "openai", "anthropic", "groq"];

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/llm/config", get(get_config).put(update_config))
}

/// GET /api/llm/config
async fn get_config(State(state): State<Arc<AppState>>) -> Json<LLMConfigResponse> {
    Json(state.llm_config.read().to_response())
}

/// PUT /api/llm/config: merge the update and persist it.
async fn update_config(
    State(state): State<Arc<AppState>>,
    AppJson(update): AppJson<LLMConfigUpdate>,
) -> ApiResult<Json<LLMConfigResponse>> {
    if let Some(provider) = &update.preferred_provider {
        if !PROVIDER_CHOICES.contains(&provider.as_str()) {
            return Err(ApiError::bad_request(format!(
                "preferredProvider must be one of {}",
                PROVIDER_CHOICES.join(", ")
            )));
        }
    }

    let mut config = state.llm_config.write();
    config.apply_update(&update);
    config.save().map_err(Error::from)?;
    Ok(Json(config.to_response()))
}
