//! External LLM chat-completion clients.
//!
//! OpenAI and Groq share the chat-completions format. Anthropic uses the
//! Messages API with the system prompt as a top-level field.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tracing::debug;

use crate::error::LlmError;
use crate::types::{ChatMessage, LLMProvider, ResolvedProvider};

const OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
const GROQ_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const ANTHROPIC_URL: &str = "https://api.anthropic.com/v1/messages";

#[derive(Debug, Clone, Copy)]
pub struct CompletionOptions {
    pub temperature: f64,
    pub max_tokens: usize,
    /// Ask the provider for a JSON object where the API supports it.
    pub json_mode: bool,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            max_tokens: 1500,
            json_mode: true,
        }
    }
}

/// Anything that turns a conversation into a single assistant reply.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Human-readable backend name for logs and responses.
    fn name(&self) -> String;

    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<String, LlmError>;
}

/// HTTP client bound to one resolved provider.
pub struct ProviderClient {
    client: Client,
    resolved: ResolvedProvider,
}

impl ProviderClient {
    pub fn new(client: Client, resolved: ResolvedProvider) -> Self {
        Self { client, resolved }
    }

    /// Build a reqwest client with the request timeout applied.
    pub fn http_client(timeout: Duration) -> Result<Client, LlmError> {
        Client::builder().timeout(timeout).build().map_err(LlmError::from)
    }

    async fn complete_openai_compat(
        &self,
        url: &str,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<String, LlmError> {
        let msgs: Vec<Value> = messages
            .iter()
            .map(|m| json!({"role": m.role, "content": m.content}))
            .collect();

        let mut body = json!({
            "model": self.resolved.model,
            "messages": msgs,
            "temperature": options.temperature,
            "max_tokens": options.max_tokens,
        });
        if options.json_mode {
            body["response_format"] = json!({"type": "json_object"});
        }

        debug!("Requesting completion from {} with model {}", url, self.resolved.model);

        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", self.resolved.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let parsed = read_json(response).await?;
        openai_content(&parsed)
    }

    async fn complete_anthropic(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<String, LlmError> {
        let system_msg: Option<String> = messages
            .iter()
            .find(|m| m.role == "system")
            .map(|m| m.content.clone());

        let conv_msgs: Vec<Value> = messages
            .iter()
            .filter(|m| m.role != "system")
            .map(|m| json!({"role": m.role, "content": m.content}))
            .collect();

        let mut body = json!({
            "model": self.resolved.model,
            "messages": conv_msgs,
            "temperature": options.temperature,
            "max_tokens": options.max_tokens,
        });
        if let Some(sys) = system_msg {
            body["system"] = json!(sys);
        }

        debug!("Requesting completion from Anthropic with model {}", self.resolved.model);

        let response = self
            .client
            .post(ANTHROPIC_URL)
            .header("x-api-key", &self.resolved.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let parsed = read_json(response).await?;
        anthropic_text(&parsed)
    }
}

async fn read_json(response: reqwest::Response) -> Result<Value, LlmError> {
    let status = response.status();
    let body = response.text().await?;
    parse_body(status, &body)
}

/// Non-2xx replies become [`LlmError::Api`] carrying the raw body.
fn parse_body(status: StatusCode, body: &str) -> Result<Value, LlmError> {
    if !status.is_success() {
        return Err(LlmError::Api {
            status: status.as_u16(),
            body: body.to_string(),
        });
    }
    serde_json::from_str(body).map_err(|e| LlmError::InvalidResponse(e.to_string()))
}

/// `choices[0].message.content` of an OpenAI-style completion.
fn openai_content(reply: &Value) -> Result<String, LlmError> {
    reply["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| LlmError::InvalidResponse("missing choices[0].message.content".into()))
}

/// Concatenated `text` blocks of an Anthropic Messages reply.
fn anthropic_text(reply: &Value) -> Result<String, LlmError> {
    let text: String = reply["content"]
        .as_array()
        .map(|blocks| {
            blocks
                .iter()
                .filter(|b| b["type"] == "text")
                .filter_map(|b| b["text"].as_str())
                .collect()
        })
        .unwrap_or_default();

    if text.is_empty() {
        return Err(LlmError::InvalidResponse("no text content blocks".into()));
    }
    Ok(text)
}

#[async_trait]
impl ChatCompletion for ProviderClient {
    fn name(&self) -> String {
        format!("{}:{}", self.resolved.provider, self.resolved.model)
    }

    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<String, LlmError> {
        match self.resolved.provider {
            LLMProvider::OpenAI => self.complete_openai_compat(OPENAI_URL, messages, options).await,
            LLMProvider::Groq => self.complete_openai_compat(GROQ_URL, messages, options).await,
            LLMProvider::Anthropic => self.complete_anthropic(messages, options).await,
        }
    }
}
