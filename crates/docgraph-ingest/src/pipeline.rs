//! Upload pipeline: estimate, split, analyze, synthesize, lay out, connect.
//!
//! The pipeline builds the complete node and edge batch for one upload
//! without touching the store. The caller appends the batch in one step.

use std::sync::Arc;
use std::time::Instant;

use docgraph_core::{Error, Result};
use docgraph_llm::ChatCompletion;
use docgraph_store::layout::{layout_group, LayoutGroup};
use docgraph_store::{Edge, Node, NodeType};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};

use crate::analyze::{AnalysisOutcome, PageAnalyzer, PageInput};
use crate::entities::{self, DocumentIds, EntityContext};
use crate::estimator::estimate_pages;
use crate::profile::{self, ProfileId};
use crate::relations::build_relationships;
use crate::source::{DocumentContent, PageSource, SourceOrigin};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingMode {
    /// Heuristic analysis only.
    #[default]
    Standard,
    /// Try the configured LLM for every page.
    Ai,
}

impl ProcessingMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "standard" | "" => Some(Self::Standard),
            "ai" | "llm" => Some(Self::Ai),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    pub file_name: String,
    /// Size reported by the client; falls back to the content length.
    pub file_size: Option<u64>,
    pub content: DocumentContent,
    pub mode: ProcessingMode,
}

impl UploadRequest {
    fn effective_size(&self) -> Option<u64> {
        self.file_size.or(match &self.content {
            DocumentContent::None => None,
            DocumentContent::Text(text) => Some(text.len() as u64),
            DocumentContent::Pdf(bytes) => Some(bytes.len() as u64),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTimings {
    pub estimate_ms: u64,
    pub analysis_ms: u64,
    pub graph_ms: u64,
    pub total_ms: u64,
}

/// Per-upload summary returned to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedDocument {
    pub document_id: String,
    pub file_name: String,
    pub file_size: Option<u64>,
    pub title: String,
    pub profile: ProfileId,
    pub page_count: usize,
    pub page_source: SourceOrigin,
    pub ai_keyword_count: usize,
    pub consulting_insight_count: usize,
    pub node_count: usize,
    pub link_count: usize,
    pub llm_pages: usize,
    pub fallback_pages: usize,
    pub processing_mode: ProcessingMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm_provider: Option<String>,
    pub processed_at: String,
    pub timings: StageTimings,
}

impl ProcessedDocument {
    pub fn summary_message(&self) -> String {
        format!(
            "Processed {} into {} pages with {} AI concepts and {} consulting insights",
            self.file_name, self.page_count, self.ai_keyword_count, self.consulting_insight_count
        )
    }
}

/// Everything one upload contributes to the graph.
#[derive(Debug, Clone)]
pub struct IngestionOutput {
    pub document: ProcessedDocument,
    pub nodes: Vec<Node>,
    pub links: Vec<Edge>,
}

fn elapsed_ms(since: Instant) -> u64 {
    since.elapsed().as_millis() as u64
}

fn node_ids(nodes: &[Node]) -> Vec<String> {
    nodes.iter().map(|n| n.id.clone()).collect()
}

fn leading_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

pub struct DocumentPipeline {
    backend: Option<Arc<dyn ChatCompletion>>,
    context_chars: usize,
}

impl DocumentPipeline {
    /// `backend` is used only for uploads in [`ProcessingMode::Ai`].
    pub fn new(backend: Option<Arc<dyn ChatCompletion>>, context_chars: usize) -> Self {
        Self {
            backend,
            context_chars,
        }
    }

    /// Build the graph batch for one upload. `sequence` namespaces the node IDs.
    pub async fn ingest(&self, request: UploadRequest, sequence: u64) -> Result<IngestionOutput> {
        let file_name = request.file_name.trim().to_string();
        if file_name.is_empty() {
            return Err(Error::InvalidRequest("fileName is required".into()));
        }

        let started = Instant::now();
        let profile = profile::resolve(&file_name);
        let title = profile.document_title(&file_name);
        let estimated = estimate_pages(&file_name, request.effective_size());
        let source = PageSource::resolve(request.content, profile, estimated, &title).await;
        let estimate_ms = elapsed_ms(started);
        debug!(
            "{}: profile {:?}, estimated {} pages, {} from {:?}",
            file_name,
            profile.id,
            estimated,
            source.pages.len(),
            source.origin
        );

        let analysis_started = Instant::now();
        let analyzer = match request.mode {
            ProcessingMode::Standard => PageAnalyzer::heuristic(),
            ProcessingMode::Ai => PageAnalyzer::new(self.backend.clone()),
        };
        let context = leading_chars(&source.full_text(), self.context_chars);
        let mut outcomes: Vec<AnalysisOutcome> = Vec::with_capacity(source.pages.len());
        for (i, text) in source.pages.iter().enumerate() {
            let input = PageInput {
                text: text.clone(),
                page_number: (i + 1) as u32,
                document_title: title.clone(),
                document_context: context.clone(),
            };
            outcomes.push(analyzer.analyze(&input).await);
        }
        let llm_pages = outcomes.iter().filter(|o| o.is_llm()).count();
        let analysis_ms = elapsed_ms(analysis_started);

        let graph_started = Instant::now();
        let document_id = uuid::Uuid::new_v4().to_string();
        let ids = DocumentIds::new(sequence);

        let mut pages: Vec<Node> = outcomes
            .iter()
            .zip(source.pages.iter())
            .enumerate()
            .map(|(i, (outcome, text))| {
                let analysis = outcome.analysis();
                Node::new(ids.page(i + 1), analysis.title.clone(), NodeType::PageImage)
                    .with_confidence(analysis.confidence)
                    .with_metadata(json!({
                        "pageNumber": i + 1,
                        "title": analysis.title,
                        "subtitle": analysis.subtitle,
                        "summary": analysis.summary,
                        "extractedText": text,
                        "keywords": analysis.keywords,
                        "aiKeywords": analysis.ai_keywords,
                        "consultingInsights": analysis.consulting_insights,
                        "keyMessages": analysis.key_messages,
                        "pageType": analysis.page_type,
                        "intent": analysis.intent,
                        "analysisSource": outcome.source(),
                        "documentId": document_id,
                        "fileName": file_name,
                    }))
            })
            .collect();
        layout_group(&mut pages, LayoutGroup::Pages);

        let page_titles: Vec<String> = pages.iter().map(|p| p.label.clone()).collect();
        let ctx = EntityContext {
            ids,
            document_id: &document_id,
            file_name: &file_name,
            page_titles: &page_titles,
        };
        let ai_nodes = entities::ai_keyword_nodes(profile, &ctx);
        let insight_nodes = entities::insight_nodes(profile, &ctx);

        let links = build_relationships(
            &node_ids(&pages),
            &node_ids(&ai_nodes),
            &node_ids(&insight_nodes),
        );

        let page_count = pages.len();
        let ai_keyword_count = ai_nodes.len();
        let consulting_insight_count = insight_nodes.len();
        let mut nodes = pages;
        nodes.extend(ai_nodes);
        nodes.extend(insight_nodes);
        let graph_ms = elapsed_ms(graph_started);

        let document = ProcessedDocument {
            document_id,
            file_size: request.file_size,
            title,
            profile: profile.id,
            page_count,
            page_source: source.origin,
            ai_keyword_count,
            consulting_insight_count,
            node_count: nodes.len(),
            link_count: links.len(),
            llm_pages,
            fallback_pages: page_count - llm_pages,
            processing_mode: request.mode,
            llm_provider: match request.mode {
                ProcessingMode::Ai => analyzer.backend_name(),
                ProcessingMode::Standard => None,
            },
            processed_at: chrono::Utc::now().to_rfc3339(),
            timings: StageTimings {
                estimate_ms,
                analysis_ms,
                graph_ms,
                total_ms: elapsed_ms(started),
            },
            file_name,
        };

        info!(
            "Ingested {} ({:?}): {} pages ({} via LLM), {} nodes, {} links in {}ms",
            document.file_name,
            document.profile,
            document.page_count,
            document.llm_pages,
            document.node_count,
            document.link_count,
            document.timings.total_ms
        );

        Ok(IngestionOutput {
            document,
            nodes,
            links,
        })
    }
}
