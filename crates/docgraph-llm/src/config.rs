//! LLM configuration persistence and provider selection.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::types::{LLMConfigResponse, LLMConfigUpdate, LLMProvider, ResolvedProvider};

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-5-haiku-20241022";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";

/// Values shipped in sample `.env` files that must never reach a provider.
const PLACEHOLDER_MARKERS: &[&str] = &[
    "your-api-key",
    "your_api_key",
    "your-openai",
    "your_openai",
    "sk-your",
    "placeholder",
    "changeme",
    "xxx",
];

/// Stored LLM configuration (persisted to llm-config.json).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMConfig {
    #[serde(default = "default_preferred")]
    pub preferred_provider: String,
    #[serde(default)]
    pub openai_api_key: Option<String>,
    #[serde(default)]
    pub anthropic_api_key: Option<String>,
    #[serde(default)]
    pub groq_api_key: Option<String>,
    #[serde(default = "default_openai_model")]
    pub openai_model: String,
    #[serde(default = "default_anthropic_model")]
    pub anthropic_model: String,
    #[serde(default = "default_groq_model")]
    pub groq_model: String,
    /// Path to config file for saving.
    #[serde(skip)]
    pub config_path: PathBuf,
}

fn default_preferred() -> String {
    "auto".into()
}
fn default_openai_model() -> String {
    DEFAULT_OPENAI_MODEL.into()
}
fn default_anthropic_model() -> String {
    DEFAULT_ANTHROPIC_MODEL.into()
}
fn default_groq_model() -> String {
    DEFAULT_GROQ_MODEL.into()
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            preferred_provider: "auto".into(),
            openai_api_key: None,
            anthropic_api_key: None,
            groq_api_key: None,
            openai_model: DEFAULT_OPENAI_MODEL.into(),
            anthropic_model: DEFAULT_ANTHROPIC_MODEL.into(),
            groq_model: DEFAULT_GROQ_MODEL.into(),
            config_path: PathBuf::new(),
        }
    }
}

/// True when `key` looks like a real credential rather than an empty or sample value.
pub fn is_usable_key(key: &str) -> bool {
    let trimmed = key.trim();
    if trimmed.len() < 8 {
        return false;
    }
    let lower = trimmed.to_lowercase();
    !PLACEHOLDER_MARKERS.iter().any(|marker| lower.contains(marker))
}

fn usable(key: &Option<String>) -> Option<&String> {
    key.as_ref().filter(|k| is_usable_key(k))
}

impl LLMConfig {
    /// Load config from file, falling back to env vars and defaults.
    pub fn load(config_path: &Path) -> Self {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// Load config from file, filling missing keys from `lookup`.
    pub fn load_with<F>(config_path: &Path, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: LLMConfig = std::fs::read_to_string(config_path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default();

        config.config_path = config_path.to_path_buf();

        if config.openai_api_key.is_none() {
            config.openai_api_key = lookup("OPENAI_API_KEY");
        }
        if config.anthropic_api_key.is_none() {
            config.anthropic_api_key = lookup("ANTHROPIC_API_KEY");
        }
        if config.groq_api_key.is_none() {
            config.groq_api_key = lookup("GROQ_API_KEY");
        }

        config
    }

    /// Save config to disk.
    pub fn save(&self) -> Result<(), std::io::Error> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(&self.config_path, json)?;
        info!("Saved LLM config to {}", self.config_path.display());
        Ok(())
    }

    /// Apply an update, merging with existing config.
    pub fn apply_update(&mut self, update: &LLMConfigUpdate) {
        if let Some(p) = &update.preferred_provider {
            self.preferred_provider = p.clone();
        }
        if let Some(k) = &update.openai_api_key {
            self.openai_api_key = Some(k.clone());
        }
        if let Some(k) = &update.anthropic_api_key {
            self.anthropic_api_key = Some(k.clone());
        }
        if let Some(k) = &update.groq_api_key {
            self.groq_api_key = Some(k.clone());
        }
        if let Some(m) = &update.openai_model {
            self.openai_model = m.clone();
        }
        if let Some(m) = &update.anthropic_model {
            self.anthropic_model = m.clone();
        }
        if let Some(m) = &update.groq_model {
            self.groq_model = m.clone();
        }
    }

    /// Resolve which provider and model to use. Placeholder keys count as absent.
    pub fn resolve_provider(&self) -> Option<ResolvedProvider> {
        let pick = |provider: LLMProvider, model: &String, key: &String| ResolvedProvider {
            provider,
            model: model.clone(),
            api_key: key.clone(),
        };

        if self.preferred_provider != "auto" {
            return match self.preferred_provider.as_str() {
                "openai" => usable(&self.openai_api_key)
                    .map(|k| pick(LLMProvider::OpenAI, &self.openai_model, k)),
                "anthropic" => usable(&self.anthropic_api_key)
                    .map(|k| pick(LLMProvider::Anthropic, &self.anthropic_model, k)),
                "groq" => usable(&self.groq_api_key)
                    .map(|k| pick(LLMProvider::Groq, &self.groq_model, k)),
                _ => None,
            };
        }

        // Auto mode: OpenAI > Anthropic > Groq
        if let Some(k) = usable(&self.openai_api_key) {
            return Some(pick(LLMProvider::OpenAI, &self.openai_model, k));
        }
        if let Some(k) = usable(&self.anthropic_api_key) {
            return Some(pick(LLMProvider::Anthropic, &self.anthropic_model, k));
        }
        if let Some(k) = usable(&self.groq_api_key) {
            return Some(pick(LLMProvider::Groq, &self.groq_model, k));
        }

        None
    }

    /// Build the public config response (no API keys exposed).
    pub fn to_response(&self) -> LLMConfigResponse {
        LLMConfigResponse {
            preferred_provider: self.preferred_provider.clone(),
            openai_configured: usable(&self.openai_api_key).is_some(),
            anthropic_configured: usable(&self.anthropic_api_key).is_some(),
            groq_configured: usable(&self.groq_api_key).is_some(),
            openai_model: self.openai_model.clone(),
            anthropic_model: self.anthropic_model.clone(),
            groq_model: self.groq_model.clone(),
            active_provider: self.resolve_provider().map(|r| r.provider.to_string()),
        }
    }
}
