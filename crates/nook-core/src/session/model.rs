//! Active user identity.

use serde::{Deserialize, Serialize};

/// User id used for the unauthenticated session.
pub const GUEST_USER_ID: &str = "guest";

/// Identity of the active user.
///
/// A `Session` is only ever replaced as a whole: login, logout, and the
/// identity query each build a new value instead of editing fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Backend user id, or [`GUEST_USER_ID`].
    pub user_id: String,
    /// Display name of the user.
    pub username: String,
    /// Whether the backend recognised the user.
    pub is_authenticated: bool,
}

impl Session {
    /// Creates an authenticated session for the given identity.
    pub fn authenticated(user_id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
            is_authenticated: true,
        }
    }

    /// Creates the unauthenticated default session.
    pub fn guest() -> Self {
        Self {
            user_id: GUEST_USER_ID.to_string(),
            username: GUEST_USER_ID.to_string(),
            is_authenticated: false,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::guest()
    }
}
