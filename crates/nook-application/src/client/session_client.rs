use nook_core::backend::{ChatBackend, ChatRequest};
use nook_core::config::{ClientConfig, ClientText};
use nook_core::host::ChatHost;
use nook_core::notice::Notice;
use nook_core::reply::interpret_reply;
use nook_core::session::{Message, Session, UiState};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::outcome::SubmitOutcome;

/// Everything the client owns between operations.
#[derive(Debug, Default)]
pub(super) struct ClientState {
    pub(super) session: Session,
    pub(super) ui: UiState,
    /// Visible log. A cache of the backend's history, never the record.
    pub(super) log: Vec<Message>,
}

/// Drives chat exchanges between a host UI and the chatbot backend.
///
/// `ChatSessionClient` is responsible for:
/// - Resolving the user's identity at start-up
/// - Sending one message at a time and showing the reply
/// - Loading and clearing stored history
/// - Login, registration, and logout
///
/// Every backend failure is recovered here and turned into exactly one
/// notice or log entry for the host; no operation returns an error.
///
/// State lives behind an async `RwLock` so operations take `&self` and the
/// client can be shared with the host's input loop. The lock is never held
/// across a backend call.
pub struct ChatSessionClient {
    pub(super) backend: Arc<dyn ChatBackend>,
    pub(super) host: Arc<dyn ChatHost>,
    pub(super) text: ClientText,
    max_message_chars: Option<usize>,
    pub(super) state: RwLock<ClientState>,
}

impl ChatSessionClient {
    /// Creates a client with a guest session, idle UI, and an empty log.
    ///
    /// # Arguments
    ///
    /// * `backend` - The remote chat/auth service
    /// * `host` - The UI surface to keep in sync
    /// * `config` - Supplies the fixed texts and the message length limit
    pub fn new(
        backend: Arc<dyn ChatBackend>,
        host: Arc<dyn ChatHost>,
        config: &ClientConfig,
    ) -> Self {
        Self {
            backend,
            host,
            text: config.text.clone(),
            max_message_chars: config.max_message_chars,
            state: RwLock::new(ClientState::default()),
        }
    }

    /// Returns a snapshot of the current session.
    pub async fn session(&self) -> Session {
        self.state.read().await.session.clone()
    }

    /// Returns the current loading/input flags.
    pub async fn ui_state(&self) -> UiState {
        self.state.read().await.ui
    }

    /// Returns a snapshot of the visible log.
    pub async fn messages(&self) -> Vec<Message> {
        self.state.read().await.log.clone()
    }

    /// Resolves the user's identity with the backend.
    ///
    /// On success the session becomes authenticated and, if the log is
    /// empty, a greeting is appended. On any failure the session falls back
    /// to guest and the login prompt is shown.
    pub async fn initialize(&self) {
        let result = self.backend.fetch_identity().await;
        let mut state = self.state.write().await;

        match result {
            Ok(identity) if !identity.user_id.trim().is_empty() => {
                tracing::info!(
                    "Authenticated as {} (user_id={})",
                    identity.username,
                    identity.user_id
                );
                state.session = Session::authenticated(identity.user_id, identity.username);
                self.host.set_login_prompt(false);

                if state.log.is_empty() {
                    let greeting = Message::bot(self.text.greeting.clone());
                    self.append(&mut state, greeting);
                }
            }
            Ok(_) => {
                tracing::warn!("Identity endpoint returned an empty user id");
                self.become_guest(&mut state);
            }
            Err(e) => {
                tracing::warn!("Identity query failed: {}", e);
                self.become_guest(&mut state);
            }
        }
    }

    /// Sends one chat message.
    ///
    /// Blank input, or input arriving while an exchange is in flight, is
    /// ignored. Whatever happens after the request is issued, the loading
    /// flag is cleared and input re-enabled before this returns.
    pub async fn submit(&self, raw_text: &str) -> SubmitOutcome {
        let content = raw_text.trim();
        if content.is_empty() {
            return SubmitOutcome::Ignored;
        }

        let request = {
            let mut state = self.state.write().await;

            if state.ui.is_loading() {
                tracing::debug!("Ignoring submit while an exchange is in flight");
                return SubmitOutcome::Ignored;
            }

            if !state.session.is_authenticated {
                self.host.clear_input();
                self.prompt_login();
                return SubmitOutcome::LoginRequired;
            }

            if self
                .max_message_chars
                .is_some_and(|max| content.chars().count() > max)
            {
                self.host
                    .show_notice(&Notice::error(self.text.message_too_long.clone()));
                return SubmitOutcome::Rejected;
            }

            self.host.clear_input();
            self.append(&mut state, Message::user(content));
            state.ui.begin_exchange();
            self.sync_ui(&state.ui);

            ChatRequest {
                user_id: state.session.user_id.clone(),
                content: content.to_string(),
            }
        };

        let result = self.backend.send_message(&request).await;

        let mut state = self.state.write().await;
        state.ui.finish_exchange();
        self.sync_ui(&state.ui);

        match result {
            Ok(payload) => match interpret_reply(&payload) {
                Some(reply) => {
                    self.append(&mut state, Message::bot(reply));
                    SubmitOutcome::Replied
                }
                None => {
                    tracing::warn!("Chat reply had no usable content: {}", payload);
                    let fallback = Message::bot(self.text.fallback_reply.clone());
                    self.append(&mut state, fallback);
                    SubmitOutcome::Fallback
                }
            },
            Err(e) if e.is_malformed_reply() => {
                tracing::warn!("{}", e);
                let fallback = Message::bot(self.text.fallback_reply.clone());
                self.append(&mut state, fallback);
                SubmitOutcome::Fallback
            }
            Err(e) if e.is_auth_required() && !state.session.is_authenticated => {
                tracing::warn!("Chat request rejected for guest session: {}", e);
                self.prompt_login();
                SubmitOutcome::LoginRequired
            }
            Err(e) => {
                tracing::warn!("Chat request failed: {}", e);
                let text = e.detail().unwrap_or(self.text.reply_failed.as_str()).to_string();
                self.append(&mut state, Message::bot(text));
                SubmitOutcome::Failed
            }
        }
    }

    /// Loads stored history into the visible log.
    ///
    /// With `replace_current` the log is cleared first; otherwise the
    /// history is appended after what is already shown. Order is preserved
    /// as returned by the backend.
    ///
    /// # Returns
    ///
    /// `true` if the backend returned any history.
    pub async fn load_history(&self, replace_current: bool) -> bool {
        match self.backend.fetch_history().await {
            Ok(history) if history.is_empty() => {
                self.host
                    .show_notice(&Notice::info(self.text.no_history.clone()));
                false
            }
            Ok(history) => {
                tracing::debug!("Loaded {} history messages", history.len());
                let mut state = self.state.write().await;
                if replace_current {
                    state.log.clear();
                    self.host.clear_messages();
                }
                for message in history {
                    self.append(&mut state, message);
                }
                true
            }
            Err(e) if e.is_auth_required() => {
                tracing::warn!("History requires login: {}", e);
                self.prompt_login();
                false
            }
            Err(e) => {
                tracing::warn!("Failed to load history: {}", e);
                self.host
                    .show_notice(&Notice::error(self.text.history_failed.clone()));
                false
            }
        }
    }

    /// Deletes the stored history and restarts the visible log with a greeting.
    ///
    /// # Returns
    ///
    /// `true` on success. Clearing an empty history succeeds.
    pub async fn clear_history(&self) -> bool {
        match self.backend.clear_history().await {
            Ok(()) => {
                let mut state = self.state.write().await;
                state.log.clear();
                self.host.clear_messages();
                let greeting = Message::bot(self.text.greeting.clone());
                self.append(&mut state, greeting);
                self.host
                    .show_notice(&Notice::success(self.text.history_cleared.clone()));
                true
            }
            Err(e) => {
                tracing::warn!("Failed to clear history: {}", e);
                self.show_failure(&e, &self.text.clear_failed);
                false
            }
        }
    }

    // ============================================================================
    // Helpers shared with the account operations
    // ============================================================================

    /// Appends to the log and mirrors it on the host.
    pub(super) fn append(&self, state: &mut ClientState, message: Message) {
        self.host.append_message(&message);
        state.log.push(message);
    }

    pub(super) fn prompt_login(&self) {
        self.host.set_login_prompt(true);
    }

    pub(super) fn become_guest(&self, state: &mut ClientState) {
        state.session = Session::guest();
        self.prompt_login();
        self.host
            .show_notice(&Notice::info(self.text.login_required.clone()));
    }

    /// Shows the server's `detail`, or `fallback` when there is none.
    pub(super) fn show_failure(&self, error: &nook_core::NookError, fallback: &str) {
        let text = error.detail().unwrap_or(fallback);
        self.host.show_notice(&Notice::error(text));
    }

    fn sync_ui(&self, ui: &UiState) {
        self.host.set_loading(ui.is_loading());
        self.host.set_input_enabled(ui.input_enabled());
    }
}
