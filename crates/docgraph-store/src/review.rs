//! Mock approval workflow over a static list of suggested entities.

use docgraph_core::{Error, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewDecision {
    Approve,
    Reject,
}

/// A suggested entity waiting for a reviewer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewItem {
    pub id: String,
    pub entity_label: String,
    pub entity_type: String,
    pub source_document: String,
    pub confidence: f64,
    pub reason: String,
    pub status: ReviewStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decided_at: Option<String>,
}

const DEFAULT_ITEMS: &[(&str, &str, &str, &str, f64, &str)] = &[
    (
        "review-001",
        "생성형 AI 기반 품질 예측",
        "ai_keyword",
        "롯데케미칼_AIDT.pdf",
        0.72,
        "Low-confidence AI concept extracted from a single page",
    ),
    (
        "review-002",
        "Digital Twin for Cracking Furnace",
        "ai_keyword",
        "롯데케미칼_AIDT.pdf",
        0.68,
        "Term not present in the controlled vocabulary",
    ),
    (
        "review-003",
        "Data Governance Operating Model",
        "consulting_insight",
        "Samsung_DX_Strategy.pdf",
        0.81,
        "Overlaps with an existing capability node",
    ),
    (
        "review-004",
        "공급망 리스크 조기경보",
        "consulting_insight",
        "Samsung_DX_Strategy.pdf",
        0.64,
        "Insight derived from a summary page only",
    ),
];

pub struct ReviewQueue {
    items: RwLock<Vec<ReviewItem>>,
}

impl ReviewQueue {
    pub fn new(items: Vec<ReviewItem>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }

    /// Queue pre-filled with the built-in suggestions.
    pub fn with_defaults() -> Self {
        let items = DEFAULT_ITEMS
            .iter()
            .map(|(id, label, entity_type, source, confidence, reason)| ReviewItem {
                id: id.to_string(),
                entity_label: label.to_string(),
                entity_type: entity_type.to_string(),
                source_document: source.to_string(),
                confidence: *confidence,
                reason: reason.to_string(),
                status: ReviewStatus::Pending,
                comment: None,
                decided_at: None,
            })
            .collect();
        Self::new(items)
    }

    pub fn pending(&self) -> Vec<ReviewItem> {
        self.items
            .read()
            .iter()
            .filter(|item| item.status == ReviewStatus::Pending)
            .cloned()
            .collect()
    }

    /// Record a decision. Each item can be decided once.
    pub fn decide(
        &self,
        id: &str,
        decision: ReviewDecision,
        comment: Option<String>,
    ) -> Result<ReviewItem> {
        let mut items = self.items.write();
        let item = items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| Error::NotFound(format!("review item {}", id)))?;

        if item.status != ReviewStatus::Pending {
            return Err(Error::Conflict(format!(
                "review item {} already {:?}",
                id, item.status
            )));
        }

        item.status = match decision {
            ReviewDecision::Approve => ReviewStatus::Approved,
            ReviewDecision::Reject => ReviewStatus::Rejected,
        };
        item.comment = comment;
        item.decided_at = Some(chrono::Utc::now().to_rfc3339());
        info!("Review item {} marked {:?}", id, item.status);
        Ok(item.clone())
    }
}

impl Default for ReviewQueue {
    fn default() -> Self {
        Self::with_defaults()
    }
}
