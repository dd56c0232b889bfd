//! Login, registration, and logout.

use nook_core::backend::{LoginRequest, RegisterRequest};
use nook_core::notice::Notice;
use nook_core::registration::{RegistrationField, RegistrationForm};
use nook_core::session::Session;
use std::str::FromStr;

use super::outcome::RegistrationOutcome;
use super::session_client::ChatSessionClient;

impl ChatSessionClient {
    /// Logs in and refreshes the session from the identity endpoint.
    ///
    /// The session is replaced only by the identity query that follows a
    /// successful login, so a failed login leaves it untouched.
    ///
    /// # Returns
    ///
    /// `true` if the client ends up authenticated.
    pub async fn login(&self, username: &str, password: &str) -> bool {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            self.host
                .show_notice(&Notice::error(self.text.credentials_required.clone()));
            return false;
        }

        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        match self.backend.login(&request).await {
            Ok(message) => {
                tracing::info!("Login accepted for {}", username);
                let text = message.unwrap_or_else(|| self.text.login_succeeded.clone());
                self.host.show_notice(&Notice::success(text));
                self.initialize().await;
                self.session().await.is_authenticated
            }
            Err(e) if e.is_network() => {
                tracing::warn!("Login request failed: {}", e);
                self.host
                    .show_notice(&Notice::error(self.text.network_failed.clone()));
                false
            }
            Err(e) => {
                tracing::warn!("Login rejected: {}", e);
                self.show_failure(&e, &self.text.login_failed);
                false
            }
        }
    }

    /// Validates the form locally, then creates the account.
    ///
    /// Field errors from the previous attempt are cleared first. Nothing is
    /// sent while any field fails validation.
    pub async fn register(&self, form: &RegistrationForm) -> RegistrationOutcome {
        for field in RegistrationField::ALL {
            self.host.show_field_error(field, None);
        }

        let errors = form.validate();
        if !errors.is_empty() {
            for error in &errors {
                self.host.show_field_error(error.field, Some(&error.message));
            }
            return RegistrationOutcome::Invalid(errors);
        }

        let request = RegisterRequest {
            username: form.username().to_string(),
            email: form.email().to_string(),
            password: form.password.clone(),
        };

        match self.backend.register(&request).await {
            Ok(()) => {
                tracing::info!("Registered {}", request.username);
                self.host
                    .show_notice(&Notice::success(self.text.registered.clone()));
                RegistrationOutcome::Registered
            }
            Err(e) if e.is_network() => {
                tracing::warn!("Registration request failed: {}", e);
                self.host
                    .show_notice(&Notice::error(self.text.network_failed.clone()));
                RegistrationOutcome::Failed
            }
            Err(e) => {
                tracing::warn!("Registration rejected: {}", e);
                match e.field().and_then(|name| RegistrationField::from_str(name).ok()) {
                    Some(field) => {
                        let message = e
                            .message()
                            .or(e.detail())
                            .unwrap_or(self.text.register_failed.as_str());
                        self.host.show_field_error(field, Some(message));
                        self.host.show_notice(&Notice::error(
                            self.text.register_field_failed.clone(),
                        ));
                    }
                    None => {
                        let text = e
                            .detail()
                            .or(e.message())
                            .unwrap_or(self.text.register_failed.as_str());
                        self.host.show_notice(&Notice::error(text));
                    }
                }
                RegistrationOutcome::Failed
            }
        }
    }

    /// Ends the backend session.
    ///
    /// On success the session resets to guest, the log is cleared, and the
    /// login prompt is shown. On failure the session is left unchanged.
    ///
    /// # Returns
    ///
    /// `true` on success.
    pub async fn logout(&self) -> bool {
        match self.backend.logout().await {
            Ok(()) => {
                let mut state = self.state.write().await;
                tracing::info!("Logged out {}", state.session.username);
                state.session = Session::guest();
                state.log.clear();
                self.host.clear_messages();
                self.prompt_login();
                self.host
                    .show_notice(&Notice::success(self.text.logged_out.clone()));
                true
            }
            Err(e) => {
                tracing::warn!("Logout failed: {}", e);
                self.show_failure(&e, &self.text.logout_failed);
                false
            }
        }
    }
}
