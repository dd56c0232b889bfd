use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::extract::State;
use axum::http::{self, HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use nook_core::backend::{ChatBackend, ChatRequest, LoginRequest, RegisterRequest};
use nook_core::config::ClientConfig;
use nook_core::session::Message;
use nook_interaction::HttpChatBackend;
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// One scripted response of the test server.
struct Canned {
    status: u16,
    body: String,
    set_cookie: Option<&'static str>,
}

impl Canned {
    fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: body.to_string(),
            set_cookie: None,
        }
    }

    fn raw(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            set_cookie: None,
        }
    }
}

/// A request as seen by the test server.
#[derive(Debug)]
struct Recorded {
    method: String,
    path: String,
    cookie: Option<String>,
    body: String,
}

#[derive(Default)]
struct ServerState {
    responses: Mutex<VecDeque<Canned>>,
    recorded: Mutex<Vec<Recorded>>,
}

/// Handle on a running test server.
struct TestServer {
    state: Arc<ServerState>,
}

impl TestServer {
    /// Returns what the server received, asserting every canned response was used.
    fn finish(&self) -> Vec<Recorded> {
        let unused = self.state.responses.lock().unwrap().len();
        assert_eq!(unused, 0, "{} canned responses were never requested", unused);
        std::mem::take(&mut *self.state.recorded.lock().unwrap())
    }
}

/// Answers every request with the next canned response, in order.
async fn respond(
    State(state): State<Arc<ServerState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    state.recorded.lock().unwrap().push(Recorded {
        method: method.to_string(),
        path: uri.path().to_string(),
        cookie: headers
            .get(header::COOKIE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
        body,
    });

    let next = state.responses.lock().unwrap().pop_front();
    let Some(canned) = next else {
        return (StatusCode::INTERNAL_SERVER_ERROR, "unscripted request").into_response();
    };

    let mut response = http::Response::builder()
        .status(canned.status)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = canned.set_cookie {
        response = response.header(header::SET_COOKIE, cookie);
    }
    response.body(Body::from(canned.body)).unwrap()
}

async fn serve(responses: Vec<Canned>) -> (ClientConfig, TestServer) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let state = Arc::new(ServerState {
        responses: Mutex::new(responses.into()),
        ..ServerState::default()
    });
    let app = Router::new().fallback(respond).with_state(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = ClientConfig {
        base_url: format!("http://{}", addr),
        ..ClientConfig::default()
    };
    (config, TestServer { state })
}

fn chat_request(content: &str) -> ChatRequest {
    ChatRequest {
        user_id: "7".to_string(),
        content: content.to_string(),
    }
}

#[tokio::test]
async fn test_send_message_posts_user_id_and_content() {
    let (config, server) = serve(vec![Canned::json(200, json!({"content": "hello"}))]).await;
    let backend = HttpChatBackend::new(config).unwrap();

    let reply = backend.send_message(&chat_request("hi there")).await.unwrap();
    assert_eq!(reply, json!({"content": "hello"}));

    let recorded = server.finish();
    assert_eq!(recorded[0].method, "POST");
    assert_eq!(recorded[0].path, "/chat/");
    let body: Value = serde_json::from_str(&recorded[0].body).unwrap();
    assert_eq!(body, json!({"userId": "7", "content": "hi there"}));
}

#[tokio::test]
async fn test_send_message_returns_encoded_string_uninterpreted() {
    let (config, server) = serve(vec![Canned::raw(200, r#""{\"content\":\"hi\"}""#)]).await;
    let backend = HttpChatBackend::new(config).unwrap();

    let reply = backend.send_message(&chat_request("hello")).await.unwrap();
    assert_eq!(reply, Value::String(r#"{"content":"hi"}"#.to_string()));
    server.finish();
}

#[tokio::test]
async fn test_send_message_non_json_body_is_malformed() {
    let (config, server) = serve(vec![Canned::raw(200, "plain text")]).await;
    let backend = HttpChatBackend::new(config).unwrap();

    let err = backend.send_message(&chat_request("hello")).await.unwrap_err();
    assert!(err.is_malformed_reply());
    server.finish();
}

#[tokio::test]
async fn test_send_message_failure_carries_detail() {
    let (config, server) = serve(vec![Canned::json(429, json!({"detail": "rate limited"}))]).await;
    let backend = HttpChatBackend::new(config).unwrap();

    let err = backend.send_message(&chat_request("hello")).await.unwrap_err();
    assert_eq!(err.status(), Some(429));
    assert_eq!(err.detail(), Some("rate limited"));
    server.finish();
}

#[tokio::test]
async fn test_send_message_failure_keeps_message_out_of_detail() {
    let (config, server) =
        serve(vec![Canned::json(500, json!({"message": "internal stack trace"}))]).await;
    let backend = HttpChatBackend::new(config).unwrap();

    let err = backend.send_message(&chat_request("hello")).await.unwrap_err();
    assert_eq!(err.detail(), None);
    assert_eq!(err.message(), Some("internal stack trace"));
    server.finish();
}

#[tokio::test]
async fn test_fetch_history_maps_sender_types() {
    let (config, server) = serve(vec![Canned::json(
        200,
        json!({"history": [
            {"messageId": "a", "userId": "7", "senderType": "user", "content": "hello"},
            {"messageId": "b", "userId": "7", "senderType": "ai", "content": "hi, how are you?"}
        ]}),
    )])
    .await;
    let backend = HttpChatBackend::new(config).unwrap();

    let history = backend.fetch_history().await.unwrap();
    assert_eq!(
        history,
        vec![Message::user("hello"), Message::bot("hi, how are you?")]
    );

    let recorded = server.finish();
    assert_eq!(recorded[0].method, "GET");
    assert_eq!(recorded[0].path, "/history");
}

#[tokio::test]
async fn test_fetch_history_unauthorized() {
    let (config, server) = serve(vec![Canned::json(401, json!({"detail": "Not authenticated"}))]).await;
    let backend = HttpChatBackend::new(config).unwrap();

    let err = backend.fetch_history().await.unwrap_err();
    assert!(err.is_auth_required());
    server.finish();
}

#[tokio::test]
async fn test_clear_history_uses_delete() {
    let (config, server) = serve(vec![Canned::raw(204, "")]).await;
    let backend = HttpChatBackend::new(config).unwrap();

    backend.clear_history().await.unwrap();

    let recorded = server.finish();
    assert_eq!(recorded[0].method, "DELETE");
    assert_eq!(recorded[0].path, "/history");
}

#[tokio::test]
async fn test_login_cookie_is_sent_on_identity_query() {
    let (config, server) = serve(vec![
        Canned {
            status: 200,
            body: json!({"message": "welcome back"}).to_string(),
            set_cookie: Some("session_id=abc123; Path=/"),
        },
        Canned::json(200, json!({"id": 1, "username": "user1"})),
    ])
    .await;
    let backend = HttpChatBackend::new(config).unwrap();

    let message = backend
        .login(&LoginRequest {
            username: "user1".to_string(),
            password: "pass1111".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(message.as_deref(), Some("welcome back"));

    let identity = backend.fetch_identity().await.unwrap();
    assert_eq!(identity.user_id, "1");
    assert_eq!(identity.username, "user1");

    let recorded = server.finish();
    assert_eq!(recorded[0].path, "/login");
    assert_eq!(recorded[1].path, "/me");
    assert_eq!(recorded[1].cookie.as_deref(), Some("session_id=abc123"));
}

#[tokio::test]
async fn test_register_field_error() {
    let (config, server) = serve(vec![Canned::json(
        400,
        json!({"field": "username", "message": "Username already exists"}),
    )])
    .await;
    let backend = HttpChatBackend::new(config).unwrap();

    let err = backend
        .register(&RegisterRequest {
            username: "user1".to_string(),
            email: "user1@example.com".to_string(),
            password: "pass1111".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.field(), Some("username"));
    assert_eq!(err.message(), Some("Username already exists"));
    assert_eq!(err.detail(), None);
    server.finish();
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let backend = HttpChatBackend::new(ClientConfig {
        base_url: format!("http://{}", addr),
        ..ClientConfig::default()
    })
    .unwrap();

    let err = backend.logout().await.unwrap_err();
    assert!(err.is_network());
}
