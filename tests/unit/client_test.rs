//! Tests for the HTTP client against a local mock server
//!
//! Covers request shapes (paths, methods, the `{"Task": ...}` body) and how
//! every failure is normalized into one message.

use serde_json::json;
use tasklist::api::{
    CREATE_PATH, ClientError, HttpTaskClient, LIST_PATH, RequestError, TaskApi,
};
use tasklist::models::Task;
use tasklist::view::TaskView;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpTaskClient {
    HttpTaskClient::new(server.uri())
}

// =============================================================================
// List
// =============================================================================

#[tokio::test]
async fn list_parses_tasks_in_server_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 2, "Task": "second"},
            {"id": 1, "Task": "first"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let tasks = client_for(&server).list_tasks().await.unwrap();
    assert_eq!(tasks, vec![Task::new(2, "second"), Task::new(1, "first")]);
}

#[tokio::test]
async fn list_failure_uses_status_message_even_with_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"message": "database down"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).list_tasks().await.unwrap_err();
    assert_eq!(err, RequestError::http(500, "Failed to load tasks: 500"));
}

#[tokio::test]
async fn trailing_slash_in_base_url_is_ignored() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpTaskClient::new(format!("{}/", server.uri()));
    assert_eq!(client.base_url(), server.uri());
    assert!(client.list_tasks().await.unwrap().is_empty());
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn create_sends_task_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CREATE_PATH))
        .and(body_json(json!({"Task": "buy milk"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 9, "Task": "buy milk"})))
        .expect(1)
        .mount(&server)
        .await;

    let task = client_for(&server).create_task("buy milk").await.unwrap();
    assert_eq!(task, Task::new(9, "buy milk"));
}

#[tokio::test]
async fn create_failure_prefers_first_detail_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CREATE_PATH))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [{"msg": "Task required"}, {"msg": "ignored"}],
            "message": "also ignored"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).create_task("").await.unwrap_err();
    assert_eq!(err, RequestError::http(422, "Task required"));
}

#[tokio::test]
async fn create_failure_falls_back_to_message_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CREATE_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"message": "Duplicate task"})))
        .mount(&server)
        .await;

    let err = client_for(&server).create_task("x").await.unwrap_err();
    assert_eq!(err.message, "Duplicate task");
}

#[tokio::test]
async fn create_failure_without_json_uses_status_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CREATE_PATH))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).create_task("x").await.unwrap_err();
    assert_eq!(err, RequestError::http(502, "Failed to create task: 502"));
}

#[tokio::test]
async fn string_detail_is_treated_as_absent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CREATE_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not Found"})))
        .mount(&server)
        .await;

    let err = client_for(&server).create_task("x").await.unwrap_err();
    assert_eq!(err.message, "Failed to create task: 404");
}

#[tokio::test]
async fn malformed_later_detail_entry_keeps_first_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CREATE_PATH))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [{"msg": "Task required"}, "extra"]
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).create_task("").await.unwrap_err();
    assert_eq!(err, RequestError::http(422, "Task required"));
}

#[tokio::test]
async fn non_string_message_does_not_hide_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CREATE_PATH))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [{"msg": "Task required"}],
            "message": 42
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).create_task("").await.unwrap_err();
    assert_eq!(err, RequestError::http(422, "Task required"));
}

#[tokio::test]
async fn malformed_detail_falls_through_to_message() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "detail": [{"msg": 7}],
            "message": "Task is locked"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).delete_task(1).await.unwrap_err();
    assert_eq!(err, RequestError::http(409, "Task is locked"));
}

// =============================================================================
// Update / Delete
// =============================================================================

#[tokio::test]
async fn update_puts_to_id_path() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/tasks/update_task_by_id/7"))
        .and(body_json(json!({"Task": "walk the cat"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 7, "Task": "walk the cat"})))
        .expect(1)
        .mount(&server)
        .await;

    let task = client_for(&server).update_task(7, "walk the cat").await.unwrap();
    assert_eq!(task.text, "walk the cat");
}

#[tokio::test]
async fn update_failure_uses_operation_in_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server).update_task(1, "x").await.unwrap_err();
    assert_eq!(err.message, "Failed to update task: 500");
}

#[tokio::test]
async fn delete_hits_id_path() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/tasks/delete_task_by_id/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 3, "Task": "gone"})))
        .expect(1)
        .mount(&server)
        .await;

    let removed = client_for(&server).delete_task(3).await.unwrap();
    assert_eq!(removed.id, 3);
}

#[tokio::test]
async fn delete_failure_reads_detail() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"detail": [{"msg": "Task not found"}]})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).delete_task(3).await.unwrap_err();
    assert_eq!(err, RequestError::http(404, "Task not found"));
}

// =============================================================================
// Transport
// =============================================================================

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    // Nothing listens on the discard port of localhost
    let client = HttpTaskClient::new("http://127.0.0.1:9");
    let err = client.list_tasks().await.unwrap_err();
    assert!(err.is_network());
    assert!(err.message.starts_with("Network error: "), "{}", err.message);
}

#[tokio::test]
async fn probe_reports_every_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let probes = client_for(&server).probe_endpoints().await;
    assert_eq!(probes.len(), 4);
    assert_eq!(probes[0].status, Some(200));
    // Unmatched routes still answer (404), so they count as reachable
    assert!(probes.iter().all(|p| p.reachable()));
}

// =============================================================================
// View over HTTP
// =============================================================================

#[tokio::test]
async fn view_shows_server_validation_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CREATE_PATH))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"detail": [{"msg": "Task required"}]})),
        )
        .mount(&server)
        .await;

    let view = TaskView::new(client_for(&server));
    let err = view.submit("x").await.unwrap_err();

    assert!(matches!(err, ClientError::Request(_)));
    assert_eq!(view.snapshot().error.as_deref(), Some("Task required"));
    // No follow-up list after a failed create
    let requests = server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn view_add_refetches_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CREATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "Task": "a"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "Task": "a"}])))
        .expect(1)
        .mount(&server)
        .await;

    let view = TaskView::new(client_for(&server));
    view.submit("a").await.unwrap();
    assert_eq!(view.snapshot().tasks, vec![Task::new(1, "a")]);
}
