//! Client configuration model.
//!
//! Loaded from `config.toml` by the infrastructure crate. Every field has a
//! default so a partial (or missing) file is valid.

use crate::error::{NookError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Root configuration for the chat client.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    /// Scheme, host, and port of the backend.
    pub base_url: String,
    /// Longest message `submit` will send, in characters. `None` = unlimited.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_message_chars: Option<usize>,
    pub endpoints: Endpoints,
    pub text: ClientText,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_message_chars: None,
            endpoints: Endpoints::default(),
            text: ClientText::default(),
        }
    }
}

impl ClientConfig {
    /// Joins the base URL and an endpoint path.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Rejects configurations the HTTP backend cannot use.
    pub fn validate(&self) -> Result<()> {
        let base = self.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(NookError::config(format!(
                "base_url must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        if self.max_message_chars == Some(0) {
            return Err(NookError::config("max_message_chars must be at least 1"));
        }
        Ok(())
    }
}

/// Endpoint paths, relative to `base_url`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Endpoints {
    pub chat: String,
    pub identity: String,
    pub history: String,
    pub logout: String,
    pub login: String,
    pub register: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            chat: "/chat/".to_string(),
            identity: "/me".to_string(),
            history: "/history".to_string(),
            logout: "/logout".to_string(),
            login: "/login".to_string(),
            register: "/register".to_string(),
        }
    }
}

/// Fixed user-visible strings.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ClientText {
    pub greeting: String,
    /// Bot message used when a reply carries no usable `content`.
    pub fallback_reply: String,
    /// Bot message used when a chat request fails without a `detail`.
    pub reply_failed: String,
    pub login_required: String,
    pub message_too_long: String,
    pub no_history: String,
    pub history_failed: String,
    pub history_cleared: String,
    pub clear_failed: String,
    pub logged_out: String,
    pub logout_failed: String,
    pub login_succeeded: String,
    pub login_failed: String,
    pub credentials_required: String,
    pub registered: String,
    pub register_failed: String,
    pub register_field_failed: String,
    pub network_failed: String,
}

impl Default for ClientText {
    fn default() -> Self {
        Self {
            greeting: "Hello! I'm your cozy-corner healing chatbot. How are you feeling today?"
                .to_string(),
            fallback_reply: "Sorry, I couldn't understand the chatbot's reply.".to_string(),
            reply_failed: "Sorry, I couldn't get a response from the chatbot.".to_string(),
            login_required: "Please log in to start chatting.".to_string(),
            message_too_long: "Your message is too long. Please shorten it and try again."
                .to_string(),
            no_history: "There is no saved conversation yet.".to_string(),
            history_failed: "Failed to load the conversation history.".to_string(),
            history_cleared: "Conversation history cleared.".to_string(),
            clear_failed: "Failed to clear the conversation history.".to_string(),
            logged_out: "You have been logged out.".to_string(),
            logout_failed: "Failed to log out. Please try again.".to_string(),
            login_succeeded: "Logged in successfully!".to_string(),
            login_failed: "Login failed. Please check your username or password.".to_string(),
            credentials_required: "Please enter both username and password.".to_string(),
            registered: "Registration completed successfully!".to_string(),
            register_failed: "An error occurred during registration. Please try again."
                .to_string(),
            register_field_failed: "Registration failed. Please check your input.".to_string(),
            network_failed: "A network error occurred. Please try again.".to_string(),
        }
    }
}
