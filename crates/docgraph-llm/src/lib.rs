//! LLM access for page analysis.
//!
//! Calls go to external chat-completion APIs; no local model required.
//! Provider selection and keys live in [`LLMConfig`].

pub mod config;
pub mod error;
pub mod providers;
pub mod types;

pub use config::LLMConfig;
pub use error::LlmError;
pub use providers::{ChatCompletion, CompletionOptions, ProviderClient};
pub use types::*;
