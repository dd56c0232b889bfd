//! Mock host and backend for client tests.

use async_trait::async_trait;
use nook_core::NookError;
use nook_core::backend::{ChatBackend, ChatRequest, Identity, LoginRequest, RegisterRequest};
use nook_core::config::ClientConfig;
use nook_core::error::Result;
use nook_core::host::ChatHost;
use nook_core::notice::Notice;
use nook_core::registration::RegistrationField;
use nook_core::session::Message;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use super::ChatSessionClient;

/// Everything the client asked the host to do, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum HostEvent {
    Append(Message),
    ClearMessages,
    Loading(bool),
    InputEnabled(bool),
    ClearInput,
    LoginPrompt(bool),
    Notice(Notice),
    FieldError(RegistrationField, Option<String>),
}

#[derive(Default)]
pub(crate) struct RecordingHost {
    events: Mutex<Vec<HostEvent>>,
}

impl RecordingHost {
    pub(crate) fn events(&self) -> Vec<HostEvent> {
        self.events.lock().unwrap().clone()
    }

    pub(crate) fn notices(&self) -> Vec<Notice> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                HostEvent::Notice(notice) => Some(notice),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn login_prompts_shown(&self) -> usize {
        self.events()
            .iter()
            .filter(|event| **event == HostEvent::LoginPrompt(true))
            .count()
    }

    pub(crate) fn field_errors(&self) -> Vec<(RegistrationField, String)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                HostEvent::FieldError(field, Some(message)) => Some((field, message)),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn reset(&self) {
        self.events.lock().unwrap().clear();
    }

    fn record(&self, event: HostEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl ChatHost for RecordingHost {
    fn append_message(&self, message: &Message) {
        self.record(HostEvent::Append(message.clone()));
    }

    fn clear_messages(&self) {
        self.record(HostEvent::ClearMessages);
    }

    fn set_loading(&self, visible: bool) {
        self.record(HostEvent::Loading(visible));
    }

    fn set_input_enabled(&self, enabled: bool) {
        self.record(HostEvent::InputEnabled(enabled));
    }

    fn clear_input(&self) {
        self.record(HostEvent::ClearInput);
    }

    fn set_login_prompt(&self, visible: bool) {
        self.record(HostEvent::LoginPrompt(visible));
    }

    fn show_notice(&self, notice: &Notice) {
        self.record(HostEvent::Notice(notice.clone()));
    }

    fn show_field_error(&self, field: RegistrationField, message: Option<&str>) {
        self.record(HostEvent::FieldError(field, message.map(str::to_string)));
    }
}

/// Backend answering from per-endpoint queues.
///
/// An unscripted call fails with an internal error so tests notice it.
#[derive(Default)]
pub(crate) struct ScriptedBackend {
    identities: Mutex<VecDeque<Result<Identity>>>,
    replies: Mutex<VecDeque<Result<Value>>>,
    histories: Mutex<VecDeque<Result<Vec<Message>>>>,
    clears: Mutex<VecDeque<Result<()>>>,
    logouts: Mutex<VecDeque<Result<()>>>,
    logins: Mutex<VecDeque<Result<Option<String>>>>,
    registrations: Mutex<VecDeque<Result<()>>>,
    chat_requests: Mutex<Vec<ChatRequest>>,
    register_requests: Mutex<Vec<RegisterRequest>>,
    /// When set, `send_message` waits for a notification before answering.
    reply_gate: Option<Arc<Notify>>,
}

fn next<T>(queue: &Mutex<VecDeque<Result<T>>>, endpoint: &str) -> Result<T> {
    queue
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| Err(NookError::internal(format!("unscripted {} call", endpoint))))
}

impl ScriptedBackend {
    pub(crate) fn identity(self, result: Result<Identity>) -> Self {
        self.identities.lock().unwrap().push_back(result);
        self
    }

    pub(crate) fn reply(self, result: Result<Value>) -> Self {
        self.replies.lock().unwrap().push_back(result);
        self
    }

    pub(crate) fn history(self, result: Result<Vec<Message>>) -> Self {
        self.histories.lock().unwrap().push_back(result);
        self
    }

    pub(crate) fn clear(self, result: Result<()>) -> Self {
        self.clears.lock().unwrap().push_back(result);
        self
    }

    pub(crate) fn logout_result(self, result: Result<()>) -> Self {
        self.logouts.lock().unwrap().push_back(result);
        self
    }

    pub(crate) fn login_result(self, result: Result<Option<String>>) -> Self {
        self.logins.lock().unwrap().push_back(result);
        self
    }

    pub(crate) fn register_result(self, result: Result<()>) -> Self {
        self.registrations.lock().unwrap().push_back(result);
        self
    }

    pub(crate) fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.reply_gate = Some(gate);
        self
    }

    pub(crate) fn chat_requests(&self) -> Vec<ChatRequest> {
        self.chat_requests.lock().unwrap().clone()
    }

    pub(crate) fn register_requests(&self) -> Vec<RegisterRequest> {
        self.register_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    async fn send_message(&self, request: &ChatRequest) -> Result<Value> {
        self.chat_requests.lock().unwrap().push(request.clone());
        if let Some(gate) = &self.reply_gate {
            gate.notified().await;
        }
        next(&self.replies, "chat")
    }

    async fn fetch_identity(&self) -> Result<Identity> {
        next(&self.identities, "identity")
    }

    async fn fetch_history(&self) -> Result<Vec<Message>> {
        next(&self.histories, "history")
    }

    async fn clear_history(&self) -> Result<()> {
        next(&self.clears, "clear history")
    }

    async fn logout(&self) -> Result<()> {
        next(&self.logouts, "logout")
    }

    async fn login(&self, _request: &LoginRequest) -> Result<Option<String>> {
        next(&self.logins, "login")
    }

    async fn register(&self, request: &RegisterRequest) -> Result<()> {
        self.register_requests.lock().unwrap().push(request.clone());
        next(&self.registrations, "register")
    }
}

pub(crate) fn identity(user_id: &str, username: &str) -> Identity {
    Identity {
        user_id: user_id.to_string(),
        username: username.to_string(),
    }
}

pub(crate) fn client_with(
    backend: ScriptedBackend,
) -> (ChatSessionClient, Arc<ScriptedBackend>, Arc<RecordingHost>) {
    client_with_config(backend, &ClientConfig::default())
}

pub(crate) fn client_with_config(
    backend: ScriptedBackend,
    config: &ClientConfig,
) -> (ChatSessionClient, Arc<ScriptedBackend>, Arc<RecordingHost>) {
    let backend = Arc::new(backend);
    let host = Arc::new(RecordingHost::default());
    let client = ChatSessionClient::new(backend.clone(), host.clone(), config);
    (client, backend, host)
}

/// A client whose session is already authenticated as user 7.
pub(crate) async fn signed_in_client(
    backend: ScriptedBackend,
) -> (ChatSessionClient, Arc<ScriptedBackend>, Arc<RecordingHost>) {
    let (client, backend, host) = client_with(backend.identity(Ok(identity("7", "user1"))));
    client.initialize().await;
    host.reset();
    (client, backend, host)
}
