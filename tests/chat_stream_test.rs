//! End-to-end streaming chat tests using wiremock.
//!
//! These tests stand up a mock GufoRAG server whose chat endpoint
//! returns a canned SSE body, then verify what the client streamed to
//! its sink and captured as the session result.

use gufo::client::GufoClient;
use gufo::error::GufoError;
use gufo::models::ChatRequest;
use gufo::reader::Termination;
use gufo::sink::MemorySink;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sse_body(lines: &[&str]) -> String {
    let mut body = String::new();
    for line in lines {
        body.push_str(line);
        body.push('\n');
    }
    body
}

async fn mock_chat(server: &MockServer, body: String) {
    Mock::given(method("POST"))
        .and(path("/api/chat/chatbot"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "text/event-stream")
                .set_body_raw(body, "text/event-stream"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_chat_streams_messages_and_captures_room() {
    let server = MockServer::start().await;
    mock_chat(
        &server,
        sse_body(&[
            r#"data: {"chunk_type":"message","content":"Artificial "}"#,
            "",
            r#"data: {"chunk_type":"message","content":"intelligence."}"#,
            "",
            r#"data: {"chunk_type":"chat_room","data":{"id":7,"latest_chat_log_id":42,"title":"AI basics","role":"assistant","model_name":"gufo-1"}}"#,
            "",
            r#"data: {"chunk_type":"end"}"#,
        ]),
    )
    .await;

    let client = GufoClient::with_base_url(server.uri());
    let request = ChatRequest::new("What is AI?", "default");
    let mut sink = MemorySink::new();

    let outcome = client.chat(&request, &mut sink).await.unwrap();

    assert_eq!(outcome.transcript, "Artificial intelligence.");
    assert_eq!(outcome.transcript_len(), 24);
    assert_eq!(outcome.chat_room_id(), Some(7));
    assert_eq!(outcome.latest_chat_log_id(), Some(42));
    assert_eq!(outcome.termination, Termination::End);
    assert!(sink.contents().starts_with("Artificial intelligence."));
    assert!(sink.contents().contains("[chat room] id: 7"));
    assert!(sink.contents().contains("[conversation ended]"));
}

#[tokio::test]
async fn test_chat_request_body_shape() {
    let server = MockServer::start().await;
    // The body must carry explicit nulls for the ids.
    Mock::given(method("POST"))
        .and(path("/api/chat/chatbot"))
        .and(body_json(serde_json::json!({
            "chat_room_id": null,
            "chat_log_id": null,
            "human_content": "What is AI?",
            "config_name": "support",
            "user_id": "alice"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            sse_body(&[r#"data: {"chunk_type":"end"}"#]),
            "text/event-stream",
        ))
        .mount(&server)
        .await;

    let client = GufoClient::with_base_url(server.uri());
    let request =
        ChatRequest::new("What is AI?", "support").with_user(Some("alice".to_string()));
    let mut sink = MemorySink::new();

    let outcome = client.chat(&request, &mut sink).await.unwrap();
    assert_eq!(outcome.termination, Termination::End);
}

#[tokio::test]
async fn test_chat_stops_at_end_even_with_trailing_data() {
    let server = MockServer::start().await;
    mock_chat(
        &server,
        sse_body(&[
            r#"data: {"chunk_type":"message","content":"A"}"#,
            r#"data: {"chunk_type":"message","content":"B"}"#,
            r#"data: {"chunk_type":"end"}"#,
            r#"data: {"chunk_type":"message","content":"after end"}"#,
        ]),
    )
    .await;

    let client = GufoClient::with_base_url(server.uri());
    let mut sink = MemorySink::new();
    let outcome = client
        .chat(&ChatRequest::new("q", "default"), &mut sink)
        .await
        .unwrap();

    assert_eq!(outcome.transcript, "AB");
    assert_eq!(outcome.termination, Termination::End);
    assert!(!sink.contents().contains("after end"));
}

#[tokio::test]
async fn test_chat_tolerates_keepalives_and_malformed_lines() {
    let server = MockServer::start().await;
    mock_chat(
        &server,
        sse_body(&[
            ": keep-alive",
            "",
            "data: not-json",
            r#"data: {"chunk_type":"message","content":"ok"}"#,
            r#"data: {"chunk_type":"suggest_questions","data":["a"]}"#,
        ]),
    )
    .await;

    let client = GufoClient::with_base_url(server.uri());
    let mut sink = MemorySink::new();
    let outcome = client
        .chat(&ChatRequest::new("q", "default"), &mut sink)
        .await
        .unwrap();

    // EOF without an end chunk is a normal termination.
    assert_eq!(outcome.transcript, "ok");
    assert_eq!(outcome.termination, Termination::Eof);
    assert!(outcome.chat_room.is_none());
}

#[tokio::test]
async fn test_chat_error_chunk_reported_but_not_terminal() {
    let server = MockServer::start().await;
    mock_chat(
        &server,
        sse_body(&[
            r#"data: {"chunk_type":"error","data":{"error":"retriever unavailable"}}"#,
            r#"data: {"chunk_type":"message","content":"degraded answer"}"#,
            r#"data: {"chunk_type":"end"}"#,
        ]),
    )
    .await;

    let client = GufoClient::with_base_url(server.uri());
    let mut sink = MemorySink::new();
    let outcome = client
        .chat(&ChatRequest::new("q", "default"), &mut sink)
        .await
        .unwrap();

    assert!(sink.contents().contains("[error] retriever unavailable"));
    assert_eq!(outcome.transcript, "degraded answer");
}

#[tokio::test]
async fn test_chat_non_success_status_uses_error_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat/chatbot"))
        .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
            "json_data": null,
            "error": true,
            "message": "config not found",
            "code": 4040,
            "http_status": 422
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GufoClient::with_base_url(server.uri());
    let mut sink = MemorySink::new();
    let result = client
        .chat(&ChatRequest::new("q", "missing"), &mut sink)
        .await;

    match result {
        Err(GufoError::Api {
            status,
            code,
            message,
        }) => {
            assert_eq!(status, 422);
            assert_eq!(code, 4040);
            assert_eq!(message, "config not found");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
    // The reader never ran.
    assert_eq!(sink.contents(), "");
}

#[tokio::test]
async fn test_chat_non_success_status_falls_back_to_raw_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat/chatbot"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let client = GufoClient::with_base_url(server.uri());
    let mut sink = MemorySink::new();
    let result = client
        .chat(&ChatRequest::new("q", "default"), &mut sink)
        .await;

    assert!(matches!(result, Err(GufoError::Status(502))));
    assert_eq!(sink.contents(), "");
}
