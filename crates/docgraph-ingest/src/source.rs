//! Per-page text for an upload.
//!
//! Uploaded text is split into pages, PDF bytes go through `pdf-extract`
//! when the `pdf` feature is compiled in, and anything else falls back to
//! text synthesized from the document profile.

use docgraph_core::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::profile::DocumentProfile;

const FORM_FEED: char = '\u{0C}';

/// Raw document body as received by the upload endpoint.
#[derive(Debug, Clone, Default)]
pub enum DocumentContent {
    #[default]
    None,
    Text(String),
    Pdf(Vec<u8>),
}

/// Where the page text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceOrigin {
    Text,
    Pdf,
    Synthesized,
}

#[derive(Debug, Clone)]
pub struct PageSource {
    pub pages: Vec<String>,
    pub origin: SourceOrigin,
}

impl PageSource {
    /// Produce page texts for an upload.
    ///
    /// `estimated_pages` is used when the content carries no page breaks or
    /// when the profile pins the page count. PDF extraction runs on the
    /// blocking pool.
    pub async fn resolve(
        content: DocumentContent,
        profile: &DocumentProfile,
        estimated_pages: u32,
        document_title: &str,
    ) -> Self {
        let pinned = profile.pinned_pages.is_some();
        let count = estimated_pages.max(1) as usize;

        let extracted = match content {
            DocumentContent::None => None,
            DocumentContent::Text(text) => Some((text, SourceOrigin::Text)),
            DocumentContent::Pdf(bytes) => {
                match run_blocking(move || extract_pdf_text(&bytes)).await {
                    Ok(text) => Some((text, SourceOrigin::Pdf)),
                    Err(e) => {
                        warn!("PDF text extraction unavailable, synthesizing pages: {}", e);
                        None
                    }
                }
            }
        };

        match extracted {
            Some((text, origin)) if !text.trim().is_empty() => {
                let pages = paginate(&text, pinned, count);
                debug!("Split {:?} content into {} pages", origin, pages.len());
                Self { pages, origin }
            }
            _ => Self {
                pages: synthesize(profile, count, document_title),
                origin: SourceOrigin::Synthesized,
            },
        }
    }

    /// Full document text, pages joined by blank lines.
    pub fn full_text(&self) -> String {
        self.pages.join("\n\n")
    }
}

/// Split text into pages.
///
/// Form feeds mark page breaks unless the page count is pinned. Without
/// usable breaks, non-empty lines are spread evenly over exactly
/// `fallback_count` pages.
pub fn paginate(text: &str, pinned: bool, fallback_count: usize) -> Vec<String> {
    if !pinned {
        let pages: Vec<String> = text
            .split(FORM_FEED)
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();
        if pages.len() > 1 {
            return pages;
        }
    }

    let count = fallback_count.max(1);
    let lines: Vec<&str> = text
        .lines()
        .map(|l| l.trim_matches(|c: char| c.is_whitespace() || c == FORM_FEED))
        .filter(|l| !l.is_empty())
        .collect();

    (0..count)
        .map(|i| {
            let start = i * lines.len() / count;
            let end = (i + 1) * lines.len() / count;
            lines[start..end].join("\n")
        })
        .collect()
}

/// Run CPU-bound extraction off the async runtime. A panic in `task` is
/// reported as an extraction error.
pub async fn run_blocking<F>(task: F) -> Result<String>
where
    F: FnOnce() -> Result<String> + Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| Error::Pdf(format!("extraction task failed: {}", e)))?
}

pub fn pdf_support_enabled() -> bool {
    cfg!(feature = "pdf")
}

#[cfg(feature = "pdf")]
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| Error::Pdf(e.to_string()))
}

#[cfg(not(feature = "pdf"))]
pub fn extract_pdf_text(_bytes: &[u8]) -> Result<String> {
    Err(Error::Pdf(
        "built without the `pdf` feature; rebuild with --features pdf".into(),
    ))
}

/// Page text generated from the profile outline and candidate entities.
pub fn synthesize(profile: &DocumentProfile, count: usize, document_title: &str) -> Vec<String> {
    let count = count.max(1);
    (0..count)
        .map(|i| {
            let mut lines = vec![
                profile.section_for(i, count).to_string(),
                format!("{} | Page {} of {}", document_title, i + 1, count),
            ];
            if !profile.ai_keywords.is_empty() {
                let ai = &profile.ai_keywords[i % profile.ai_keywords.len()];
                lines.push(format!("Key focus: {} ({})", ai.label, ai.category));
            }
            if !profile.consulting_insights.is_empty() {
                let insight = &profile.consulting_insights[i % profile.consulting_insights.len()];
                lines.push(format!(
                    "Consulting insight: {} ({})",
                    insight.label, insight.category
                ));
            }
            lines.push(format!(
                "This page supports the {} AI transformation strategy and roadmap.",
                profile.organization
            ));
            lines.join("\n")
        })
        .collect()
}
