use super::*;
use std::{
    sync::{Arc, Mutex},
    time::{SystemTime, UNIX_EPOCH},
};

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use shared::{domain::RequestState, error::ErrorCode};
use tokio::net::TcpListener;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ReceivedUpload {
    field: String,
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

#[derive(Clone, Default)]
struct ServerState {
    questions: Arc<Mutex<Vec<Value>>>,
    uploads: Arc<Mutex<Vec<ReceivedUpload>>>,
}

async fn handle_hybrid_rag(
    State(state): State<ServerState>,
    Json(payload): Json<Value>,
) -> Json<Value> {
    let question = payload["question"].as_str().unwrap_or_default().to_string();
    state.questions.lock().expect("questions lock").push(payload);
    let answer = if question == "What was Q2 revenue?" {
        "Q2 revenue was $4.2M"
    } else {
        ""
    };
    Json(json!({ "question": question, "answer": answer }))
}

async fn handle_insights(Json(payload): Json<Value>) -> Json<Value> {
    Json(json!({ "question": payload["question"], "insights": "grew 5%" }))
}

async fn handle_upload(State(state): State<ServerState>, mut multipart: Multipart) -> Json<Value> {
    while let Some(field) = multipart.next_field().await.expect("multipart field") {
        let received = ReceivedUpload {
            field: field.name().unwrap_or_default().to_string(),
            file_name: field.file_name().map(str::to_string),
            content_type: field.content_type().map(str::to_string),
            bytes: field.bytes().await.expect("field bytes").to_vec(),
        };
        state.uploads.lock().expect("uploads lock").push(received);
    }
    Json(json!({ "message": "Indexed 12 pages", "file_path": "./uploads/report.pdf" }))
}

async fn handle_table_qa(Json(payload): Json<Value>) -> Json<Value> {
    Json(json!({
        "file_path": payload["file_path"],
        "question": payload["question"],
        "answer": "Total is 1,204",
    }))
}

async fn handle_root() -> Json<Value> {
    Json(json!({ "message": "Financial QA & Insights API is running" }))
}

async fn spawn_api_server(state: ServerState) -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let app = Router::new()
        .route("/", get(handle_root))
        .route("/hybrid_rag", post(handle_hybrid_rag))
        .route("/insights", post(handle_insights))
        .route("/upload", post(handle_upload))
        .route("/table_qa", post(handle_table_qa))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

async fn spawn_broken_server() -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let app = Router::new()
        .route(
            "/insights",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "pipeline crashed") }),
        )
        .route("/hybrid_rag", post(|| async { "this is not json" }));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

/// An origin nothing is listening on.
async fn unreachable_origin() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}

fn client_for(base_url: String) -> FinanceApiClient {
    FinanceApiClient::new(&ClientSettings {
        api_base_url: base_url,
        request_timeout_secs: Some(10),
    })
    .expect("client")
}

fn temp_document(name: &str, contents: &[u8]) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("finqa_upload_test_{suffix}"));
    std::fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write document");
    path
}

#[tokio::test]
async fn chat_question_round_trip_displays_answer() {
    let state = ServerState::default();
    let base_url = spawn_api_server(state.clone()).await;
    let client = client_for(base_url);

    let mut chat = QueryController::new();
    chat.set_input("What was Q2 revenue?".to_string());
    let settled = drive_submission(&mut chat, &client).await;

    assert_eq!(settled, Some(RequestState::Succeeded));
    assert_eq!(chat.result_text(), "Q2 revenue was $4.2M");
    assert!(!chat.is_pending());

    let questions = state.questions.lock().expect("questions lock").clone();
    assert_eq!(questions, vec![json!({ "question": "What was Q2 revenue?" })]);
}

#[tokio::test]
async fn empty_answer_from_backend_shows_fallback() {
    let base_url = spawn_api_server(ServerState::default()).await;
    let client = client_for(base_url);

    let mut chat = QueryController::new();
    chat.set_input("Something the index cannot answer".to_string());
    drive_submission(&mut chat, &client).await;
    assert_eq!(chat.result_text(), "No answer");
}

#[tokio::test]
async fn insights_are_read_from_insights_field() {
    let base_url = spawn_api_server(ServerState::default()).await;
    let client = client_for(base_url);

    let response = client
        .insights(QuestionRequest::new("How did revenue trend?"))
        .await
        .expect("insights");
    assert_eq!(response.insights.as_deref(), Some("grew 5%"));
    assert_eq!(response.question.as_deref(), Some("How did revenue trend?"));
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_failure() {
    let client = client_for(unreachable_origin().await);

    let err = client
        .insights(QuestionRequest::new("margins?"))
        .await
        .expect_err("must fail");
    assert!(matches!(err, RequestFailure::Transport { endpoint: "/insights", .. }));
    assert_eq!(err.code(), ErrorCode::Unreachable);

    let mut insights = InsightController::new();
    insights.set_input("margins?".to_string());
    drive_submission(&mut insights, &client).await;
    assert_eq!(insights.result_text(), "Error connecting to API.");
    assert_eq!(insights.state(), RequestState::Failed);
}

#[tokio::test]
async fn error_status_is_reported_with_code() {
    let client = client_for(spawn_broken_server().await);

    let err = client
        .insights(QuestionRequest::new("anything"))
        .await
        .expect_err("must fail");
    assert_eq!(
        err,
        RequestFailure::Status {
            endpoint: "/insights",
            status: 500
        }
    );
    let api_error = err.to_api_error();
    assert_eq!(api_error.code, ErrorCode::UpstreamStatus);
    assert_eq!(api_error.status, Some(500));
}

#[tokio::test]
async fn non_json_body_is_malformed() {
    let client = client_for(spawn_broken_server().await);

    let err = client
        .ask(QuestionRequest::new("anything"))
        .await
        .expect_err("must fail");
    assert!(
        matches!(err, RequestFailure::MalformedBody { endpoint: "/hybrid_rag", .. }),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn upload_sends_file_under_file_field_and_clears_selection() {
    let state = ServerState::default();
    let base_url = spawn_api_server(state.clone()).await;
    let client = client_for(base_url);
    let path = temp_document("report.pdf", b"%PDF-1.7 quarterly report");

    let mut upload = UploadController::new();
    upload.set_input(Some(path.clone()));
    let settled = drive_submission(&mut upload, &client).await;

    assert_eq!(settled, Some(RequestState::Idle));
    assert_eq!(upload.result_text(), "Indexed 12 pages");
    assert!(upload.input().is_none());

    let uploads = state.uploads.lock().expect("uploads lock").clone();
    assert_eq!(
        uploads,
        vec![ReceivedUpload {
            field: "file".to_string(),
            file_name: Some("report.pdf".to_string()),
            content_type: Some("application/pdf".to_string()),
            bytes: b"%PDF-1.7 quarterly report".to_vec(),
        }]
    );

    if let Some(dir) = path.parent() {
        std::fs::remove_dir_all(dir).expect("cleanup");
    }
}

#[tokio::test]
async fn upload_of_missing_file_fails_locally() {
    let client = client_for(unreachable_origin().await);
    let err = client
        .upload(UploadRequest {
            path: PathBuf::from("/definitely/not/here/report.pdf"),
        })
        .await
        .expect_err("must fail");
    assert!(matches!(err, RequestFailure::LocalFile { .. }));
    assert_eq!(err.code(), ErrorCode::LocalFile);

    let mut upload = UploadController::new();
    upload.set_input(Some(PathBuf::from("/definitely/not/here/report.pdf")));
    drive_submission(&mut upload, &client).await;
    assert_eq!(upload.result_text(), "Error uploading file.");
    assert!(upload.input().is_none());
}

#[tokio::test]
async fn table_qa_posts_file_path_and_question() {
    let base_url = spawn_api_server(ServerState::default()).await;
    let client = client_for(base_url);

    let response = client
        .table_qa(TableQaRequest {
            file_path: "./uploads/balance.csv".to_string(),
            question: "What is the total?".to_string(),
        })
        .await
        .expect("table qa");
    assert_eq!(response.answer.as_deref(), Some("Total is 1,204"));
    assert_eq!(response.file_path.as_deref(), Some("./uploads/balance.csv"));
}

#[tokio::test]
async fn health_reads_root_message() {
    let base_url = spawn_api_server(ServerState::default()).await;
    let client = client_for(format!("{base_url}/"));
    assert_eq!(client.base_url(), base_url);

    let health = client.health().await.expect("health");
    assert_eq!(
        health.message.as_deref(),
        Some("Financial QA & Insights API is running")
    );
}
