//! DocGraph Ingest: turns an uploaded report into page, AI-concept and
//! consulting-insight nodes plus the edges between them.

pub mod analyze;
pub mod entities;
pub mod estimator;
pub mod pipeline;
pub mod profile;
pub mod relations;
pub mod source;

pub use analyze::{AnalysisOutcome, FallbackReason, PageAnalysis, PageAnalyzer, PageInput};
pub use estimator::estimate_pages;
pub use pipeline::{
    DocumentPipeline, IngestionOutput, ProcessedDocument, ProcessingMode, UploadRequest,
};
pub use profile::{DocumentProfile, ProfileId};
pub use source::{DocumentContent, PageSource, SourceOrigin};
