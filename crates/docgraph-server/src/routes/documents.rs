//! Document upload route. Accepts JSON metadata or a multipart file.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::routing::post;
use axum::{Json, Router};
use docgraph_ingest::{DocumentContent, ProcessingMode, UploadRequest};
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{ApiError, ApiResult, AppJson};
use crate::state::AppState;

/// Multipart bodies may carry a whole report.
const MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/documents/upload",
        post(upload).layer(axum::extract::DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
    )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonUpload {
    file_name: String,
    #[serde(default)]
    file_size: Option<u64>,
    #[serde(default)]
    file_content: Option<String>,
    #[serde(default)]
    processing_mode: Option<String>,
}

fn parse_mode(value: Option<&str>) -> ApiResult<ProcessingMode> {
    match value {
        None => Ok(ProcessingMode::Standard),
        Some(raw) => ProcessingMode::parse(raw).ok_or_else(|| {
            ApiError::bad_request(format!(
                "processingMode must be \"standard\" or \"ai\", got \"{}\"",
                raw
            ))
        }),
    }
}

/// POST /api/documents/upload
async fn upload(
    State(state): State<Arc<AppState>>,
    req: Request,
) -> ApiResult<Json<serde_json::Value>> {
    let is_multipart = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("multipart/form-data"))
        .unwrap_or(false);

    let request = if is_multipart {
        let multipart = Multipart::from_request(req, &state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;
        read_multipart(&state, multipart).await?
    } else {
        let AppJson(body) = AppJson::<JsonUpload>::from_request(req, &state).await?;
        UploadRequest {
            file_name: body.file_name,
            file_size: body.file_size,
            content: body
                .file_content
                .filter(|c| !c.is_empty())
                .map(DocumentContent::Text)
                .unwrap_or_default(),
            mode: parse_mode(body.processing_mode.as_deref())?,
        }
    };

    let sequence = state.store.next_sequence();
    let output = state.pipeline().ingest(request, sequence).await?;

    let stats = state.store.append_all(output.nodes, output.links);
    info!(
        "Graph now holds {} nodes and {} links",
        stats.node_count, stats.link_count
    );

    Ok(Json(serde_json::json!({
        "success": true,
        "message": output.document.summary_message(),
        "processedDocument": output.document,
        "totalNodes": stats.node_count,
        "totalLinks": stats.link_count,
    })))
}

async fn read_multipart(state: &AppState, mut multipart: Multipart) -> ApiResult<UploadRequest> {
    let mut upload_name: Option<String> = None;
    let mut explicit_name: Option<String> = None;
    let mut bytes: Option<Bytes> = None;
    let mut mode: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                upload_name = Some(field.file_name().unwrap_or("upload.pdf").to_string());
                bytes = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::bad_request(e.body_text()))?,
                );
            }
            "fileName" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(e.body_text()))?;
                if !value.trim().is_empty() {
                    explicit_name = Some(value);
                }
            }
            "processingMode" => {
                mode = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::bad_request(e.body_text()))?,
                );
            }
            _ => {}
        }
    }

    // An explicit fileName wins regardless of field order.
    let file_name = explicit_name
        .or(upload_name)
        .ok_or_else(|| ApiError::bad_request("multipart upload needs a `file` field"))?;

    let mut request = UploadRequest {
        mode: parse_mode(mode.as_deref())?,
        ..UploadRequest::default()
    };
    if let Some(bytes) = bytes {
        request.file_size = Some(bytes.len() as u64);
        store_upload(state, &file_name, &bytes);
        request.content = classify_bytes(&file_name, bytes.to_vec());
    }
    request.file_name = file_name;
    Ok(request)
}

fn classify_bytes(file_name: &str, bytes: Vec<u8>) -> DocumentContent {
    if bytes.is_empty() {
        return DocumentContent::None;
    }
    if bytes.starts_with(b"%PDF") || file_name.to_lowercase().ends_with(".pdf") {
        return DocumentContent::Pdf(bytes);
    }
    match String::from_utf8(bytes) {
        Ok(text) => DocumentContent::Text(text),
        Err(_) => DocumentContent::None,
    }
}

/// Keep a copy of the uploaded bytes. Failure is logged, not fatal.
fn store_upload(state: &AppState, file_name: &str, bytes: &[u8]) {
    let path = state
        .config
        .data_paths
        .uploads
        .join(sanitize_filename(file_name));
    if let Err(e) = std::fs::write(&path, bytes) {
        warn!("Failed to store upload {}: {}", path.display(), e);
    }
}

fn sanitize_filename(name: &str) -> String {
    let name = name.replace(['/', '\\'], "").replace("..", "");
    std::path::Path::new(&name)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .unwrap_or("unnamed")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "etcpasswd");
        assert_eq!(sanitize_filename("롯데케미칼_AIDT.pdf"), "롯데케미칼_AIDT.pdf");
        assert_eq!(sanitize_filename(".."), "unnamed");
    }

    #[test]
    fn test_classify_bytes() {
        assert!(matches!(
            classify_bytes("x.bin", b"%PDF-1.7".to_vec()),
            DocumentContent::Pdf(_)
        ));
        assert!(matches!(
            classify_bytes("notes.txt", b"hello".to_vec()),
            DocumentContent::Text(_)
        ));
        assert!(matches!(
            classify_bytes("blob.bin", vec![0xff, 0xfe, 0x00]),
            DocumentContent::None
        ));
        assert!(matches!(classify_bytes("a.pdf", Vec::new()), DocumentContent::None));
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(parse_mode(None).unwrap(), ProcessingMode::Standard);
        assert_eq!(parse_mode(Some("ai")).unwrap(), ProcessingMode::Ai);
        let err = parse_mode(Some("fast")).unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
    }
}
