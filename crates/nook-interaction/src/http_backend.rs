//! HttpChatBackend - REST implementation of [`ChatBackend`] over reqwest.
//!
//! Talks to the chat, identity, history, and auth endpoints configured in
//! [`ClientConfig`]. A cookie store is kept on the client so the session
//! cookie issued by the login endpoint rides along on later calls.

use async_trait::async_trait;
use nook_core::NookError;
use nook_core::backend::{ChatBackend, ChatRequest, Identity, LoginRequest, RegisterRequest};
use nook_core::config::ClientConfig;
use nook_core::error::Result;
use nook_core::session::Message;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::Value;

/// Backend implementation that talks to the chatbot server over HTTP.
#[derive(Clone)]
pub struct HttpChatBackend {
    client: Client,
    config: ClientConfig,
}

#[derive(Debug, Deserialize)]
struct HistoryResponse {
    #[serde(default)]
    history: Vec<Message>,
}

#[derive(Debug, Default, Deserialize)]
struct MessageBody {
    #[serde(default)]
    message: Option<String>,
}

/// Failure body. `detail` is a string for handled errors but a list for
/// request validation errors, so it is kept loose here.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<Value>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    field: Option<String>,
}

impl HttpChatBackend {
    /// Creates a backend for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns a config error if the base URL is unusable, or an internal
    /// error if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| NookError::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Returns the configuration this backend was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Sends a request and turns every non-2xx status into a classified error.
    async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| NookError::network(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let error = classify_failure(status.as_u16(), &body);
        tracing::warn!("Backend responded with {}: {}", status, error);
        Err(error)
    }

    async fn read_body(response: Response) -> Result<String> {
        response
            .text()
            .await
            .map_err(|e| NookError::network(format!("Failed to read response body: {}", e)))
    }
}

/// Builds the error for a non-2xx response from its status and raw body.
fn classify_failure(status: u16, body: &str) -> NookError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let detail = parsed.detail.and_then(|value| match value {
        Value::String(text) => Some(text),
        _ => None,
    });

    if status == 401 || status == 403 {
        return NookError::auth_required(status, detail);
    }

    NookError::Server {
        status,
        detail,
        message: parsed.message,
        field: parsed.field,
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn send_message(&self, request: &ChatRequest) -> Result<Value> {
        let url = self.config.url(&self.config.endpoints.chat);
        tracing::debug!("POST {} (user_id={})", url, request.user_id);

        let response = self.execute(self.client.post(&url).json(request)).await?;
        let body = Self::read_body(response).await?;

        serde_json::from_str(&body)
            .map_err(|e| NookError::malformed_reply(format!("Chat reply is not JSON: {}", e)))
    }

    async fn fetch_identity(&self) -> Result<Identity> {
        let url = self.config.url(&self.config.endpoints.identity);
        tracing::debug!("GET {}", url);

        let response = self.execute(self.client.get(&url)).await?;
        let body = Self::read_body(response).await?;

        serde_json::from_str(&body)
            .map_err(|e| NookError::malformed_reply(format!("Failed to parse identity: {}", e)))
    }

    async fn fetch_history(&self) -> Result<Vec<Message>> {
        let url = self.config.url(&self.config.endpoints.history);
        tracing::debug!("GET {}", url);

        let response = self.execute(self.client.get(&url)).await?;
        let body = Self::read_body(response).await?;

        let history: HistoryResponse = serde_json::from_str(&body)
            .map_err(|e| NookError::malformed_reply(format!("Failed to parse history: {}", e)))?;
        Ok(history.history)
    }

    async fn clear_history(&self) -> Result<()> {
        let url = self.config.url(&self.config.endpoints.history);
        tracing::debug!("DELETE {}", url);

        self.execute(self.client.delete(&url)).await?;
        Ok(())
    }

    async fn logout(&self) -> Result<()> {
        let url = self.config.url(&self.config.endpoints.logout);
        tracing::debug!("POST {}", url);

        self.execute(self.client.post(&url)).await?;
        Ok(())
    }

    async fn login(&self, request: &LoginRequest) -> Result<Option<String>> {
        let url = self.config.url(&self.config.endpoints.login);
        tracing::debug!("POST {} (username={})", url, request.username);

        let response = self.execute(self.client.post(&url).json(request)).await?;
        let body = Self::read_body(response).await?;

        // The body is informational only
        let parsed: MessageBody = serde_json::from_str(&body).unwrap_or_default();
        Ok(parsed.message)
    }

    async fn register(&self, request: &RegisterRequest) -> Result<()> {
        let url = self.config.url(&self.config.endpoints.register);
        tracing::debug!("POST {} (username={})", url, request.username);

        self.execute(self.client.post(&url).json(request)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_detail() {
        let err = classify_failure(429, r#"{"detail": "rate limited"}"#);
        assert_eq!(err, NookError::server(429, Some("rate limited".to_string())));
    }

    #[test]
    fn test_classify_auth_statuses() {
        assert!(classify_failure(401, "").is_auth_required());
        let forbidden = classify_failure(403, r#"{"detail": "forbidden"}"#);
        assert!(forbidden.is_auth_required());
        assert_eq!(forbidden.detail(), Some("forbidden"));
    }

    #[test]
    fn test_classify_validation_list_detail_is_ignored() {
        let err = classify_failure(
            422,
            r#"{"detail": [{"loc": ["body", "content"], "msg": "field required"}]}"#,
        );
        assert_eq!(err.detail(), None);
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn test_classify_keeps_message_apart_from_detail() {
        let err = classify_failure(
            400,
            r#"{"field": "username", "message": "already taken", "detail": "bad request"}"#,
        );
        assert_eq!(err.field(), Some("username"));
        assert_eq!(err.message(), Some("already taken"));
        assert_eq!(err.detail(), Some("bad request"));
    }

    #[test]
    fn test_classify_message_only_body_has_no_detail() {
        let err = classify_failure(500, r#"{"message": "internal stack trace"}"#);
        assert_eq!(err.detail(), None);
        assert_eq!(err.message(), Some("internal stack trace"));
    }

    #[test]
    fn test_classify_non_json_body() {
        let err = classify_failure(502, "<html>Bad Gateway</html>");
        assert_eq!(err, NookError::server(502, None));
    }

    #[test]
    fn test_new_rejects_bad_base_url() {
        let config = ClientConfig {
            base_url: "localhost:8000".to_string(),
            ..ClientConfig::default()
        };
        assert!(HttpChatBackend::new(config).err().unwrap().is_config());
    }
}
