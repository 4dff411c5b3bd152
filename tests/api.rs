use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::StatusCode;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use kql_copilot::api::{build_router, AppState};
use kql_copilot::config::Settings;
use kql_copilot::errors::CopilotError;
use kql_copilot::llm::{ChatClient, ChatCompletion, ChatMessage, ChatOptions, TokenUsage};

/// Upstream stand-in: records the last forwarded request and returns a canned
/// completion (or a canned failure).
struct MockChatClient {
    reply: Result<ChatCompletion, String>,
    last_request: Arc<Mutex<Option<(Vec<ChatMessage>, ChatOptions)>>>,
}

impl MockChatClient {
    fn replying(content: &str, usage: Option<TokenUsage>) -> Self {
        Self {
            reply: Ok(ChatCompletion { content: content.to_string(), usage }),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            last_request: Arc::new(Mutex::new(None)),
        }
    }
}

#[async_trait]
impl ChatClient for MockChatClient {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        options: &ChatOptions,
    ) -> Result<ChatCompletion, CopilotError> {
        *self.last_request.lock().unwrap() = Some((messages.to_vec(), *options));
        match &self.reply {
            Ok(completion) => Ok(completion.clone()),
            Err(message) => Err(CopilotError::Upstream(message.clone())),
        }
    }

    fn deployment_name(&self) -> &str {
        "mock-deployment"
    }
}

fn unconfigured_state() -> AppState {
    AppState {
        settings: Arc::new(Settings::default()),
        chat_client: None,
    }
}

fn state_with_client(client: Arc<MockChatClient>) -> AppState {
    AppState {
        settings: Arc::new(Settings::default()),
        chat_client: Some(client),
    }
}

fn app(state: &AppState) -> axum::Router {
    build_router(state.clone())
}

fn make_request(method: &str, uri: &str, body: Option<Value>) -> axum::http::Request<Body> {
    let builder = axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");

    match body {
        Some(b) => builder.body(Body::from(serde_json::to_string(&b).unwrap())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn response_json(response: axum::http::Response<Body>) -> Value {
    let (parts, body) = response.into_parts();
    let bytes = body.collect().await.unwrap().to_bytes();
    if bytes.is_empty() {
        panic!("Empty response body. Status: {}, Headers: {:?}", parts.status, parts.headers);
    }
    serde_json::from_slice(&bytes)
        .unwrap_or_else(|e| panic!("JSON parse error: {}. Body: {:?}", e, String::from_utf8_lossy(&bytes)))
}

#[tokio::test]
async fn test_health_endpoint() {
    let state = unconfigured_state();
    let req = make_request("GET", "/health", None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "kql-copilot");
    assert_eq!(body["openai_configured"], false);
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_root_endpoint() {
    let state = unconfigured_state();
    let req = make_request("GET", "/", None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_config_endpoint() {
    let state = unconfigured_state();
    let req = make_request("GET", "/api/config", None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["environment"], "AzureUSGovernment");
    assert_eq!(body["status"], "operational");
    assert_eq!(body["deployment"], "gpt-4o-mini");
    assert_eq!(body["openai_configured"], false);
}

#[tokio::test]
async fn test_chat_unconfigured_returns_503() {
    let state = unconfigured_state();
    let req = make_request("POST", "/api/chat", Some(json!({
        "messages": [{"role": "user", "content": "Hi"}]
    })));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = response_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("not configured"));
}

#[tokio::test]
async fn test_chat_forwards_and_reshapes_reply() {
    let client = Arc::new(MockChatClient::replying(
        "Hello",
        Some(TokenUsage { prompt_tokens: 5, completion_tokens: 3, total_tokens: 8 }),
    ));
    let state = state_with_client(client.clone());

    let req = make_request("POST", "/api/chat", Some(json!({
        "messages": [{"role": "user", "content": "Hi"}]
    })));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["message"], "Hello");
    assert_eq!(body["usage"]["prompt_tokens"], 5);
    assert_eq!(body["usage"]["completion_tokens"], 3);
    assert_eq!(body["usage"]["total_tokens"], 8);

    // Defaults applied when sampling parameters are omitted
    let captured = client.last_request.lock().unwrap();
    let (messages, options) = captured.as_ref().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].role, "user");
    assert_eq!(messages[0].content, "Hi");
    assert_eq!(options.temperature, 0.7);
    assert_eq!(options.max_tokens, 1000);
}

#[tokio::test]
async fn test_chat_preserves_message_order_and_parameters() {
    let client = Arc::new(MockChatClient::replying("ok", None));
    let state = state_with_client(client.clone());

    let req = make_request("POST", "/api/chat", Some(json!({
        "messages": [
            {"role": "system", "content": "You are a KQL expert"},
            {"role": "user", "content": "first"},
            {"role": "assistant", "content": "second"},
            {"role": "user", "content": "third"}
        ],
        "temperature": 0.2,
        "max_tokens": 64
    })));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["message"], "ok");
    assert!(body.get("usage").is_none());

    let captured = client.last_request.lock().unwrap();
    let (messages, options) = captured.as_ref().unwrap();
    let roles: Vec<&str> = messages.iter().map(|m| m.role.as_str()).collect();
    assert_eq!(roles, ["system", "user", "assistant", "user"]);
    assert_eq!(messages[1].content, "first");
    assert_eq!(messages[3].content, "third");
    assert_eq!(options.temperature, 0.2);
    assert_eq!(options.max_tokens, 64);
}

#[tokio::test]
async fn test_chat_upstream_failure_returns_500_with_detail() {
    let client = Arc::new(MockChatClient::failing("deployment quota exhausted"));
    let state = state_with_client(client);

    let req = make_request("POST", "/api/chat", Some(json!({
        "messages": [{"role": "user", "content": "Hi"}]
    })));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = response_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("deployment quota exhausted"));
}

#[tokio::test]
async fn test_chat_rejects_malformed_body() {
    let state = unconfigured_state();
    let req = make_request("POST", "/api/chat", Some(json!({"messages": "not-a-list"})));
    let response = app(&state).oneshot(req).await.unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_validate_query_valid() {
    let state = unconfigured_state();
    let req = make_request("POST", "/api/query/validate", Some(json!({
        "query": "Heartbeat | take 1"
    })));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["valid"], true);
    assert_eq!(body["message"], "Query syntax appears valid");
    assert!(body["errors"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_validate_query_unmatched_parentheses() {
    let state = unconfigured_state();
    let req = make_request("POST", "/api/query/validate", Some(json!({
        "query": "Heartbeat | where (Computer == 'x'"
    })));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["valid"], false);
    assert_eq!(body["errors"], json!(["Unmatched parentheses"]));
}

#[tokio::test]
async fn test_validate_query_empty() {
    let state = unconfigured_state();
    let req = make_request("POST", "/api/query/validate", Some(json!({"query": ""})));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["valid"], false);
    assert_eq!(body["errors"], json!(["Query is empty"]));
}

#[tokio::test]
async fn test_execute_query_not_implemented() {
    let state = unconfigured_state();
    let req = make_request("POST", "/api/query/execute", Some(json!({
        "workspace_id": "workspace-guid",
        "query": "Heartbeat | take 1"
    })));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);

    let body = response_json(response).await;
    assert_eq!(body["status"], "not_implemented");
    assert_eq!(body["capability"], "execute-query");
    assert_eq!(body["sample"]["rowCount"], 10);
}

#[tokio::test]
async fn test_discover_workspaces_not_implemented() {
    let state = unconfigured_state();
    let req = make_request("POST", "/api/workspaces/discover", None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);

    let body = response_json(response).await;
    assert_eq!(body["status"], "not_implemented");
    assert_eq!(body["capability"], "discover-workspaces");
    assert!(body["sample"]["workspaces"].is_array());
}

#[tokio::test]
async fn test_agent_endpoint_not_implemented() {
    let state = unconfigured_state();
    let req = make_request("POST", "/api/agent", Some(json!({"message": "Hello"})));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);

    let body = response_json(response).await;
    assert_eq!(body["status"], "not_implemented");
    let capabilities = body["capabilities"].as_array().unwrap();
    assert_eq!(capabilities.len(), 4);
    assert!(capabilities.iter().any(|c| c["name"] == "validate-syntax"));
}
