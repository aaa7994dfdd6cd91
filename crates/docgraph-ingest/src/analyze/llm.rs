//! Prompt construction and reply parsing for model-backed analysis.

use docgraph_llm::ChatMessage;
use serde::Deserialize;

use super::{PageAnalysis, PageInput, PageIntent, PageType};

/// Used when the reply omits a confidence value.
pub const DEFAULT_LLM_CONFIDENCE: f64 = 0.85;

const SYSTEM_PROMPT: &str = "You are a senior management consultant who analyzes \
slides from strategy reports. Respond with a single JSON object and nothing else.";

const RESPONSE_SCHEMA: &str = r#"{
  "title": "page title",
  "subtitle": "secondary heading or empty string",
  "pageType": "cover | toc | summary | content",
  "intent": "inform | persuade | decide",
  "summary": "one or two sentence summary",
  "keyMessages": ["up to three key messages"],
  "keywords": ["salient terms"],
  "aiKeywords": ["AI or data technology concepts"],
  "consultingInsights": ["consulting or management insights"],
  "confidence": 0.0
}"#;

pub fn build_messages(input: &PageInput) -> Vec<ChatMessage> {
    let context = if input.document_context.is_empty() {
        "(not available)"
    } else {
        input.document_context.as_str()
    };
    let page_text = if input.text.trim().is_empty() {
        "(no extractable text on this page)"
    } else {
        input.text.as_str()
    };

    let user = format!(
        "Document: {title}\nPage: {page}\n\n\
         Document context:\n{context}\n\n\
         Page text:\n{page_text}\n\n\
         Analyze this page and answer with JSON matching this schema:\n{schema}\n\
         Keep Korean phrases in Korean. Confidence is between 0 and 1.",
        title = input.document_title,
        page = input.page_number,
        context = context,
        page_text = page_text,
        schema = RESPONSE_SCHEMA,
    );

    vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(user)]
}

/// Model reply as written; every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawAnalysis {
    title: Option<String>,
    subtitle: Option<String>,
    page_type: Option<String>,
    intent: Option<String>,
    summary: Option<String>,
    key_messages: Vec<String>,
    keywords: Vec<String>,
    ai_keywords: Vec<String>,
    consulting_insights: Vec<String>,
    confidence: Option<f64>,
}

/// Cut the JSON object out of a reply that may be wrapped in markdown fences or prose.
fn json_slice(reply: &str) -> Option<&str> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    (end > start).then(|| &reply[start..=end])
}

fn non_empty(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

/// Parse a model reply into a page analysis. The error is a short
/// description of what was wrong with the reply.
pub fn parse_response(reply: &str) -> Result<PageAnalysis, String> {
    let slice = json_slice(reply).ok_or_else(|| "reply contains no JSON object".to_string())?;
    let raw: RawAnalysis =
        serde_json::from_str(slice).map_err(|e| format!("malformed JSON: {}", e))?;

    let title = raw
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| "reply has no title".to_string())?;

    let summary = raw.summary.unwrap_or_default().trim().to_string();
    let mut key_messages = non_empty(raw.key_messages);
    if key_messages.is_empty() {
        key_messages.push(if summary.is_empty() { title.clone() } else { summary.clone() });
    }

    let confidence = raw
        .confidence
        .filter(|c| c.is_finite())
        .map(|c| c.clamp(0.0, 1.0))
        .unwrap_or(DEFAULT_LLM_CONFIDENCE);

    Ok(PageAnalysis {
        subtitle: raw.subtitle.unwrap_or_default().trim().to_string(),
        page_type: raw
            .page_type
            .as_deref()
            .and_then(PageType::parse)
            .unwrap_or(PageType::Content),
        intent: raw
            .intent
            .as_deref()
            .and_then(PageIntent::parse)
            .unwrap_or(PageIntent::Inform),
        summary,
        key_messages,
        keywords: non_empty(raw.keywords),
        ai_keywords: non_empty(raw.ai_keywords),
        consulting_insights: non_empty(raw.consulting_insights),
        confidence,
        title,
    })
}
