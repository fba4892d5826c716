mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::{
    multipart::{MultipartForm, Part},
    TestServer,
};
use chrono::Utc;
use codent_vault::{
    adapters::{router::create_router, state::AppState},
    application::services::{FileVault, SnippetService},
    domain::config::{
        local::{LocalConfig, Provider},
        secrets::Secrets,
    },
};
use common::{MemorySnippetRepository, MemoryStorage};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;

const PASSWORD: &str = "open-sesame";
const PASSWORD_HEADER: &str = "X-Access-Password";

fn test_server(access_password: Option<&str>) -> TestServer {
    let app_state = AppState {
        secrets: Arc::new(Secrets {
            database_url: "postgres://unused".to_string(),
            access_password: access_password.map(str::to_string),
            supabase_secrets: None,
            github_secrets: None,
        }),
        local_config: Arc::new(LocalConfig {
            provider: Provider::Supabase,
            default_folder: "uploads".to_string(),
            port: 0,
            cors_allowed_origins: None,
        }),
        vault: FileVault::new(Arc::new(MemoryStorage::new()), "uploads"),
        snippets: SnippetService::new(Arc::new(MemorySnippetRepository::new())),
        started_at: Utc::now(),
    };

    TestServer::new(create_router(app_state, CorsLayer::permissive()))
        .expect("Failed to create test server")
}

fn text_upload(name: &str, text: &str) -> MultipartForm {
    MultipartForm::new().add_part(
        "file",
        Part::bytes(text.as_bytes().to_vec())
            .file_name(name)
            .mime_type("text/plain"),
    )
}

#[tokio::test]
async fn health_is_open_and_reports_the_provider() {
    let server = test_server(Some(PASSWORD));

    let response = server.get("/api/v1/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["provider"], "supabase");
    assert_eq!(body["defaultFolder"], "uploads");
    assert_eq!(body["passwordProtected"], true);
}

#[tokio::test]
async fn protected_routes_require_the_password() {
    let server = test_server(Some(PASSWORD));

    let missing = server.get("/api/v1/files").await;
    assert_eq!(missing.status_code(), StatusCode::UNAUTHORIZED);

    let wrong = server
        .get("/api/v1/snippets")
        .add_header(PASSWORD_HEADER, "guess")
        .await;
    assert_eq!(wrong.status_code(), StatusCode::UNAUTHORIZED);

    let right = server
        .get("/api/v1/files")
        .add_header(PASSWORD_HEADER, PASSWORD)
        .await;
    assert_eq!(right.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn without_a_password_everything_is_open() {
    let server = test_server(None);

    let response = server.get("/api/v1/files").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!([]));
}

#[tokio::test]
async fn upload_preview_download_and_delete() {
    let server = test_server(Some(PASSWORD));

    let uploaded = server
        .post("/api/v1/files")
        .add_header(PASSWORD_HEADER, PASSWORD)
        .multipart(text_upload("notes.txt", "remember the milk"))
        .await;
    assert_eq!(uploaded.status_code(), StatusCode::CREATED);
    let record: Value = uploaded.json();
    assert_eq!(record["name"], "notes.txt");
    assert_eq!(record["isText"], true);
    let id = record["id"].as_str().unwrap().to_string();

    let listed: Value = server
        .get("/api/v1/files")
        .add_header(PASSWORD_HEADER, PASSWORD)
        .await
        .json();
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let preview: Value = server
        .get(&format!("/api/v1/files/{}/preview", id))
        .add_header(PASSWORD_HEADER, PASSWORD)
        .await
        .json();
    assert_eq!(preview["previewable"], true);
    assert_eq!(preview["content"], "remember the milk");

    let download = server
        .get(&format!("/api/v1/files/{}/content", id))
        .add_header(PASSWORD_HEADER, PASSWORD)
        .await;
    assert_eq!(download.status_code(), StatusCode::OK);
    assert_eq!(download.text(), "remember the milk");
    assert_eq!(
        download.header("content-disposition"),
        "attachment; filename=\"notes.txt\""
    );

    let deleted = server
        .delete(&format!("/api/v1/files/{}", id))
        .add_header(PASSWORD_HEADER, PASSWORD)
        .await;
    assert_eq!(deleted.status_code(), StatusCode::NO_CONTENT);

    let missing = server
        .get(&format!("/api/v1/files/{}", id))
        .add_header(PASSWORD_HEADER, PASSWORD)
        .await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn upload_without_file_is_a_bad_request() {
    let server = test_server(None);

    let response = server
        .post("/api/v1/files")
        .multipart(MultipartForm::new().add_text("folder", "docs"))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn folder_scoped_upload_and_delete_all() {
    let server = test_server(None);

    for name in ["a.txt", "b.txt"] {
        let response = server
            .post("/api/v1/files")
            .multipart(text_upload(name, "x").add_text("folder", "docs"))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
    }

    let default_folder: Value = server.get("/api/v1/files").await.json();
    assert_eq!(default_folder, json!([]));

    let report: Value = server.delete("/api/v1/files?folder=docs").await.json();
    assert_eq!(report["deletedCount"], 2);
    assert_eq!(report["failedCount"], 0);

    let docs: Value = server.get("/api/v1/files?folder=docs").await.json();
    assert_eq!(docs, json!([]));
}

#[tokio::test]
async fn snippet_crud() {
    let server = test_server(None);

    let created = server
        .post("/api/v1/snippets")
        .json(&json!({
            "title": "Hello",
            "category": "Demos",
            "content": "fn main() {\n    println!(\"hi\");\n}"
        }))
        .await;
    assert_eq!(created.status_code(), StatusCode::CREATED);
    let snippet: Value = created.json();
    assert_eq!(snippet["language"], "rust");
    assert_eq!(snippet["languageName"], "Rust");
    let id = snippet["id"].as_str().unwrap().to_string();

    let listed: Value = server.get("/api/v1/snippets?category=Demos").await.json();
    assert_eq!(listed.as_array().unwrap().len(), 1);
    let other: Value = server.get("/api/v1/snippets?category=Work").await.json();
    assert_eq!(other, json!([]));

    let updated = server
        .put(&format!("/api/v1/snippets/{}", id))
        .json(&json!({
            "title": "Query",
            "language": "sql",
            "content": "SELECT 1"
        }))
        .await;
    assert_eq!(updated.status_code(), StatusCode::OK);
    let updated: Value = updated.json();
    assert_eq!(updated["title"], "Query");
    assert_eq!(updated["category"], "Uncategorized");
    assert_eq!(updated["createdAt"], snippet["createdAt"]);

    let fetched: Value = server.get(&format!("/api/v1/snippets/{}", id)).await.json();
    assert_eq!(fetched["content"], "SELECT 1");

    let deleted = server.delete(&format!("/api/v1/snippets/{}", id)).await;
    assert_eq!(deleted.status_code(), StatusCode::NO_CONTENT);

    let gone = server.get(&format!("/api/v1/snippets/{}", id)).await;
    assert_eq!(gone.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_snippet_id_is_a_bad_request() {
    let server = test_server(None);

    let response = server.get("/api/v1/snippets/not-a-uuid").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn detect_language_endpoint() {
    let server = test_server(None);

    let response: Value = server
        .post("/api/v1/languages/detect")
        .json(&json!({ "content": "#include <stdio.h>\nint main(void) { return 0; }" }))
        .await
        .json();

    assert_eq!(response, json!({ "language": "c", "displayName": "C" }));
}

#[tokio::test]
async fn unknown_language_tags_are_capitalized_for_display() {
    let server = test_server(None);

    let snippet: Value = server
        .post("/api/v1/snippets")
        .json(&json!({
            "title": "Payroll",
            "language": "cobol",
            "content": "IDENTIFICATION DIVISION."
        }))
        .await
        .json();

    assert_eq!(snippet["language"], "cobol");
    assert_eq!(snippet["languageName"], "Cobol");
}
