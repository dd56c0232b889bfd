//! Error types for the Nook chat client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Nook client.
///
/// Backend failures are classified into the variants the chat client knows
/// how to recover from; configuration loading uses the remaining ones.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NookError {
    /// The request never reached the server or no response arrived
    #[error("Network error: {message}")]
    Network { message: String },

    /// Non-2xx response, with whatever the body told us
    #[error("Server error ({status}): {}", .detail.as_deref().unwrap_or("no detail"))]
    Server {
        status: u16,
        detail: Option<String>,
        /// Body `message`; only registration failures show it
        message: Option<String>,
        field: Option<String>,
    },

    /// 401 or 403 from the backend
    #[error("Authentication required ({status})")]
    AuthRequired { status: u16, detail: Option<String> },

    /// A success response whose payload cannot be interpreted
    #[error("Malformed reply: {0}")]
    MalformedReply(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl NookError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates a Server error without a field reference
    pub fn server(status: u16, detail: Option<String>) -> Self {
        Self::Server {
            status,
            detail,
            message: None,
            field: None,
        }
    }

    /// Creates an AuthRequired error
    pub fn auth_required(status: u16, detail: Option<String>) -> Self {
        Self::AuthRequired { status, detail }
    }

    /// Creates a MalformedReply error
    pub fn malformed_reply(message: impl Into<String>) -> Self {
        Self::MalformedReply(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a Network error
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// Check if the backend rejected the caller as unauthenticated or forbidden
    pub fn is_auth_required(&self) -> bool {
        matches!(self, Self::AuthRequired { .. })
    }

    /// Check if this is a MalformedReply error
    pub fn is_malformed_reply(&self) -> bool {
        matches!(self, Self::MalformedReply(_))
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns the server-provided `detail` text, if the failure carried one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Server { detail, .. } | Self::AuthRequired { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Returns the server-provided `message` text, if the failure carried one.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Returns the form field the server blamed, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Server { field, .. } => field.as_deref(),
            _ => None,
        }
    }

    /// Returns the HTTP status for failures that got a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } | Self::AuthRequired { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for NookError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for NookError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for NookError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for NookError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, NookError>`.
pub type Result<T> = std::result::Result<T, NookError>;
