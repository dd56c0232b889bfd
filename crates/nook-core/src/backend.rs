//! Backend collaborator interface.
//!
//! Defines the contract the chat client uses to reach the remote chat, identity,
//! history, and auth endpoints, decoupling the client's state machine from the
//! HTTP implementation.

use crate::error::Result;
use crate::session::Message;
use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

/// Request body for the chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub content: String,
}

/// Identity returned by the identity endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Identity {
    /// Backend user id. Numeric ids are kept as their decimal text.
    #[serde(rename = "id", deserialize_with = "deserialize_user_id")]
    pub user_id: String,
    pub username: String,
}

/// Request body for the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for the register endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

fn deserialize_user_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}

/// The remote chat/auth service.
///
/// Every method performs exactly one request. Implementations classify
/// failures into [`NookError`](crate::NookError) variants:
///
/// - `Network` when no response arrived
/// - `AuthRequired` for 401/403
/// - `Server` for any other non-2xx, carrying the body's `detail`/`field`
/// - `MalformedReply` for a 2xx body that is not the expected shape
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Sends one chat message and returns the raw reply payload.
    ///
    /// The payload is returned uninterpreted because its shape varies; see
    /// [`interpret_reply`](crate::reply::interpret_reply).
    async fn send_message(&self, request: &ChatRequest) -> Result<serde_json::Value>;

    /// Queries the identity of the caller.
    async fn fetch_identity(&self) -> Result<Identity>;

    /// Fetches the stored chat history, oldest first.
    async fn fetch_history(&self) -> Result<Vec<Message>>;

    /// Deletes the stored chat history.
    async fn clear_history(&self) -> Result<()>;

    /// Ends the backend session.
    async fn logout(&self) -> Result<()>;

    /// Logs in. Returns the server's `message` text, if any.
    async fn login(&self, request: &LoginRequest) -> Result<Option<String>>;

    /// Creates a new account.
    async fn register(&self, request: &RegisterRequest) -> Result<()>;
}
