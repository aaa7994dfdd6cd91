//! Per-page semantic analysis.
//!
//! Pages go to a chat-completion backend when one is configured. Any
//! failure on that path (no usable key, transport error, unparseable
//! reply) degrades to the keyword heuristics in [`fallback`], and the
//! outcome records which path produced the result.

pub mod fallback;
pub mod llm;
pub mod vocabulary;

use std::sync::Arc;

use docgraph_llm::{ChatCompletion, CompletionOptions};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// One page handed to the analyzer.
#[derive(Debug, Clone)]
pub struct PageInput {
    pub text: String,
    /// 1-based.
    pub page_number: u32,
    pub document_title: String,
    /// Leading slice of the whole document, shared by every page.
    pub document_context: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageType {
    Cover,
    Toc,
    Summary,
    Content,
}

impl PageType {
    /// Lenient parse of model output; unknown values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "cover" | "title" => Some(Self::Cover),
            "toc" | "contents" | "table_of_contents" | "agenda" => Some(Self::Toc),
            "summary" | "executive_summary" => Some(Self::Summary),
            "content" | "body" => Some(Self::Content),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageIntent {
    Inform,
    Persuade,
    Decide,
}

impl PageIntent {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "inform" => Some(Self::Inform),
            "persuade" => Some(Self::Persuade),
            "decide" | "decision" => Some(Self::Decide),
            _ => None,
        }
    }
}

/// Structured description of one page. Both analysis paths produce this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageAnalysis {
    pub title: String,
    pub subtitle: String,
    pub page_type: PageType,
    pub intent: PageIntent,
    pub summary: String,
    pub key_messages: Vec<String>,
    pub keywords: Vec<String>,
    pub ai_keywords: Vec<String>,
    pub consulting_insights: Vec<String>,
    pub confidence: f64,
}

/// Why the heuristic path ran instead of the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// The upload asked for standard processing.
    Disabled,
    /// No provider has a usable API key.
    NoProvider,
    RequestFailed(String),
    InvalidResponse(String),
}

impl FallbackReason {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::NoProvider => "no_provider",
            Self::RequestFailed(_) => "request_failed",
            Self::InvalidResponse(_) => "invalid_response",
        }
    }
}

impl std::fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RequestFailed(detail) | Self::InvalidResponse(detail) => {
                write!(f, "{}: {}", self.code(), detail)
            }
            _ => f.write_str(self.code()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    Llm(PageAnalysis),
    Fallback {
        analysis: PageAnalysis,
        reason: FallbackReason,
    },
}

impl AnalysisOutcome {
    pub fn analysis(&self) -> &PageAnalysis {
        match self {
            Self::Llm(analysis) | Self::Fallback { analysis, .. } => analysis,
        }
    }

    pub fn is_llm(&self) -> bool {
        matches!(self, Self::Llm(_))
    }

    /// Value stored in page metadata as `analysisSource`.
    pub fn source(&self) -> &'static str {
        if self.is_llm() {
            "llm"
        } else {
            "fallback"
        }
    }
}

enum Backend {
    Disabled,
    Missing,
    Ready(Arc<dyn ChatCompletion>),
}

pub struct PageAnalyzer {
    backend: Backend,
    options: CompletionOptions,
}

impl PageAnalyzer {
    /// Analyzer that tries `backend` first. `None` means no provider is configured.
    pub fn new(backend: Option<Arc<dyn ChatCompletion>>) -> Self {
        let backend = match backend {
            Some(b) => Backend::Ready(b),
            None => Backend::Missing,
        };
        Self {
            backend,
            options: CompletionOptions::default(),
        }
    }

    /// Heuristics only, never contacting a provider.
    pub fn heuristic() -> Self {
        Self {
            backend: Backend::Disabled,
            options: CompletionOptions::default(),
        }
    }

    pub fn backend_name(&self) -> Option<String> {
        match &self.backend {
            Backend::Ready(b) => Some(b.name()),
            _ => None,
        }
    }

    pub async fn analyze(&self, input: &PageInput) -> AnalysisOutcome {
        let backend = match &self.backend {
            Backend::Disabled => return self.fall_back(input, FallbackReason::Disabled),
            Backend::Missing => return self.fall_back(input, FallbackReason::NoProvider),
            Backend::Ready(b) => b,
        };

        let messages = llm::build_messages(input);
        let reply = match backend.complete(&messages, &self.options).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(
                    "LLM analysis of page {} failed via {}: {}",
                    input.page_number,
                    backend.name(),
                    e
                );
                return self.fall_back(input, FallbackReason::RequestFailed(e.to_string()));
            }
        };

        match llm::parse_response(&reply) {
            Ok(analysis) => {
                debug!("Page {} analyzed by {}", input.page_number, backend.name());
                AnalysisOutcome::Llm(analysis)
            }
            Err(detail) => {
                warn!(
                    "Unusable LLM reply for page {}: {}",
                    input.page_number, detail
                );
                self.fall_back(input, FallbackReason::InvalidResponse(detail))
            }
        }
    }

    fn fall_back(&self, input: &PageInput, reason: FallbackReason) -> AnalysisOutcome {
        debug!("Page {} analyzed heuristically ({})", input.page_number, reason);
        AnalysisOutcome::Fallback {
            analysis: fallback::analyze(input),
            reason,
        }
    }
}
