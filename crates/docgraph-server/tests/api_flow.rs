//! End-to-end flows through the HTTP API.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{json_request, test_app};
use serde_json::{json, Value};

fn ids(list: &Value) -> Vec<String> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_seeded_on_start_and_reset() {
    let app = test_app();
    let (_, nodes) = app.get("/api/ontology/nodes").await;
    assert_eq!(nodes.as_array().unwrap().len(), 8);

    let (status, body) = app
        .post_json("/api/ontology/reset", json!({"loadSeed": false}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nodeCount"], 0);
    let (_, nodes) = app.get("/api/ontology/nodes").await;
    assert_eq!(nodes, json!([]));
    let (_, links) = app.get("/api/ontology/links").await;
    assert_eq!(links, json!([]));

    let (_, body) = app
        .post_json("/api/ontology/reset", json!({"loadSeed": true}))
        .await;
    assert_eq!(body["success"], true);
    assert_eq!(body["nodeCount"], 8);
    assert_eq!(body["linkCount"], 10);
}

#[tokio::test]
async fn test_lotte_upload() {
    let app = test_app();
    let (status, body) = app
        .post_json(
            "/api/documents/upload",
            json!({"fileName": "롯데케미칼_AIDT.pdf", "fileSize": 12_345_678}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let doc = &body["processedDocument"];
    assert_eq!(doc["profile"], "lotte_chemical");
    assert_eq!(doc["pageCount"], 28);
    assert_eq!(doc["aiKeywordCount"], 14);
    assert_eq!(doc["consultingInsightCount"], 14);
    assert_eq!(body["totalNodes"], 8 + 28 + 14 + 14);
    assert_eq!(body["totalLinks"], 10 + 27 + 14 + 14);

    let (_, links) = app.get("/api/ontology/links").await;
    let next_page = links
        .as_array()
        .unwrap()
        .iter()
        .filter(|l| l["type"] == "next_page")
        .count();
    assert_eq!(next_page, 27);
}

#[tokio::test]
async fn test_repeated_uploads_get_distinct_ids() {
    let app = test_app();
    app.post_json("/api/ontology/reset", json!({"loadSeed": false}))
        .await;
    for _ in 0..2 {
        let (status, _) = app
            .post_json("/api/documents/upload", json!({"fileName": "samsung_dx.pdf"}))
            .await;
        assert_eq!(status, StatusCode::OK);
    }
    let (_, nodes) = app.get("/api/ontology/nodes").await;
    let all = ids(&nodes);
    assert_eq!(all.len(), 2 * (32 + 12 + 10));
    let mut unique = all.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), all.len());
}

#[tokio::test]
async fn test_ai_mode_without_provider_falls_back() {
    let app = test_app();
    let (status, body) = app
        .post_json(
            "/api/documents/upload",
            json!({"fileName": "deck.pdf", "fileSize": 10_000, "processingMode": "ai"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let doc = &body["processedDocument"];
    assert_eq!(doc["processingMode"], "ai");
    assert_eq!(doc["pageCount"], 5);
    assert_eq!(doc["llmPages"], 0);
    assert_eq!(doc["fallbackPages"], 5);
}

#[tokio::test]
async fn test_upload_with_text_content() {
    let app = test_app();
    let (_, body) = app
        .post_json(
            "/api/documents/upload",
            json!({
                "fileName": "notes.txt",
                "fileContent": "Cover\u{0C}Agenda\u{0C}Generative AI roadmap for the plant",
            }),
        )
        .await;
    let doc = &body["processedDocument"];
    assert_eq!(doc["pageCount"], 3);
    assert_eq!(doc["pageSource"], "text");
    assert_eq!(doc["title"], "notes");
}

#[tokio::test]
async fn test_upload_rejects_bad_input() {
    let app = test_app();
    let (status, body) = app
        .send(json_request("POST", "/api/documents/upload", "{not json".into()))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());

    let (status, _) = app
        .post_json("/api/documents/upload", json!({"fileName": "   "}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .post_json(
            "/api/documents/upload",
            json!({"fileName": "a.pdf", "processingMode": "turbo"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_multipart_upload() {
    let app = test_app();
    let boundary = "docgraph-boundary";
    let body = format!(
        "--{b}\r\n\
         Content-Disposition: form-data; name=\"processingMode\"\r\n\r\n\
         standard\r\n\
         --{b}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"brief.txt\"\r\n\
         Content-Type: text/plain\r\n\r\n\
         Cover\u{0C}Machine learning roadmap\r\n\
         --{b}--\r\n",
        b = boundary
    );
    let request = Request::builder()
        .uri("/api/documents/upload")
        .method("POST")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap();
    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    let doc = &body["processedDocument"];
    assert_eq!(doc["fileName"], "brief.txt");
    assert_eq!(doc["pageCount"], 2);
    assert!(app.dir.path().join("uploads").join("brief.txt").exists());
}

#[tokio::test]
async fn test_multipart_file_name_after_file_field() {
    let app = test_app();
    let boundary = "docgraph-boundary";
    let body = format!(
        "--{b}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"blob.bin\"\r\n\
         Content-Type: application/octet-stream\r\n\r\n\
         draft deck\r\n\
         --{b}\r\n\
         Content-Disposition: form-data; name=\"fileName\"\r\n\r\n\
         롯데케미칼_AIDT.pdf\r\n\
         --{b}--\r\n",
        b = boundary
    );
    let request = Request::builder()
        .uri("/api/documents/upload")
        .method("POST")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap();
    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["processedDocument"]["fileName"], "롯데케미칼_AIDT.pdf");
    assert_eq!(body["processedDocument"]["pageCount"], 28);

    let uploads = app.dir.path().join("uploads");
    assert!(uploads.join("롯데케미칼_AIDT.pdf").exists());
    assert!(!uploads.join("blob.bin").exists());
}

#[tokio::test]
async fn test_reset_without_body_clears_graph() {
    let app = test_app();
    let request = Request::builder()
        .uri("/api/ontology/reset")
        .method("POST")
        .body(Body::empty())
        .unwrap();
    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["nodeCount"], 0);
    assert_eq!(body["linkCount"], 0);
}

#[tokio::test]
async fn test_search_is_case_insensitive() {
    let app = test_app();
    app.post_json("/api/documents/upload", json!({"fileName": "롯데케미칼_AIDT.pdf"}))
        .await;
    let (_, upper) = app.post_json("/api/search", json!({"query": "AI"})).await;
    let (_, lower) = app.post_json("/api/search", json!({"query": "ai"})).await;
    assert!(upper["total"].as_u64().unwrap() > 0);
    assert_eq!(upper["path"], lower["path"]);

    let (_, empty) = app.post_json("/api/search", json!({"query": "   "})).await;
    assert_eq!(empty["total"], 0);
}

#[tokio::test]
async fn test_review_workflow() {
    let app = test_app();
    let (_, pending) = app.get("/api/review/pending").await;
    assert_eq!(pending.as_array().unwrap().len(), 4);

    let (status, body) = app
        .post_json(
            "/api/review/review-001/decision",
            json!({"decision": "approve", "comment": "looks right"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["item"]["status"], "approved");

    let (status, body) = app
        .post_json("/api/review/review-001/decision", json!({"decision": "reject"}))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);

    let (status, _) = app
        .post_json("/api/review/nope/decision", json!({"decision": "reject"}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .post_json("/api/review/review-002/decision", json!({"decision": "maybe"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, pending) = app.get("/api/review/pending").await;
    assert_eq!(pending.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_llm_config_update_persists() {
    let app = test_app();
    let (_, body) = app.get("/api/llm/config").await;
    assert_eq!(body["activeProvider"], Value::Null);

    let (status, _) = app
        .put_json("/api/llm/config", json!({"preferredProvider": "bogus"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .put_json(
            "/api/llm/config",
            json!({"preferredProvider": "groq", "groqApiKey": "gsk_1234567890abcdef"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["groqConfigured"], true);
    assert_eq!(body["activeProvider"], "groq");
    assert!(body.get("groqApiKey").is_none());
    assert!(app.dir.path().join("llm-config.json").exists());
    assert!(app.state.llm_backend().is_some());
}

#[tokio::test]
async fn test_health() {
    let app = test_app();
    let (status, body) = app.get("/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["llmAvailable"], false);
}
