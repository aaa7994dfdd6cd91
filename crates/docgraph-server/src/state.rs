//! Shared application state.

use std::sync::Arc;
use std::time::Duration;

use docgraph_core::{AppConfig, Error, Result};
use docgraph_ingest::DocumentPipeline;
use docgraph_llm::{ChatCompletion, LLMConfig, ProviderClient};
use docgraph_store::{GraphStore, ReviewQueue};
use parking_lot::RwLock;
use tracing::info;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: AppConfig,
    pub store: GraphStore,
    pub review_queue: ReviewQueue,
    pub llm_config: RwLock<LLMConfig>,
    /// Reused by every LLM request; carries the configured timeout.
    pub http_client: reqwest::Client,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        let llm_config = LLMConfig::load(&config.data_paths.llm_config_file);
        Self::with_llm_config(config, llm_config)
    }

    /// Build state around an already-loaded LLM configuration.
    pub fn with_llm_config(config: AppConfig, llm_config: LLMConfig) -> Result<Self> {
        let http_client =
            ProviderClient::http_client(Duration::from_secs(config.llm_timeout_secs))
                .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;

        let store = if config.seed_on_start {
            GraphStore::with_seed()
        } else {
            GraphStore::new()
        };

        match llm_config.resolve_provider() {
            Some(resolved) => info!("LLM provider: {} ({})", resolved.provider, resolved.model),
            None => info!("No LLM provider configured; AI processing will use heuristics"),
        }

        Ok(Self {
            config,
            store,
            review_queue: ReviewQueue::with_defaults(),
            llm_config: RwLock::new(llm_config),
            http_client,
        })
    }

    /// Chat backend for the currently configured provider, if any.
    pub fn llm_backend(&self) -> Option<Arc<dyn ChatCompletion>> {
        let resolved = self.llm_config.read().resolve_provider()?;
        let backend: Arc<dyn ChatCompletion> =
            Arc::new(ProviderClient::new(self.http_client.clone(), resolved));
        Some(backend)
    }

    /// Pipeline bound to the current LLM configuration.
    pub fn pipeline(&self) -> DocumentPipeline {
        DocumentPipeline::new(self.llm_backend(), self.config.context_chars)
    }
}
