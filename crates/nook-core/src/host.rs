//! UI capabilities the chat client drives.
//!
//! The client never touches a document or terminal directly; a host
//! implements this trait and is injected at construction.

use crate::notice::Notice;
use crate::registration::RegistrationField;
use crate::session::Message;

/// The UI surface hosting a chat client.
///
/// Methods are synchronous and infallible: they only update what the user
/// sees.
pub trait ChatHost: Send + Sync {
    /// Appends a message to the visible log.
    fn append_message(&self, message: &Message);

    /// Removes every message from the visible log.
    fn clear_messages(&self);

    /// Shows or hides the loading indicator.
    fn set_loading(&self, visible: bool);

    /// Enables or disables the message input.
    fn set_input_enabled(&self, enabled: bool);

    /// Discards whatever is pending in the message input.
    fn clear_input(&self);

    /// Shows or hides the login prompt.
    fn set_login_prompt(&self, visible: bool);

    /// Shows a transient notice.
    fn show_notice(&self, notice: &Notice);

    /// Shows an error under a registration field, or clears it with `None`.
    fn show_field_error(&self, field: RegistrationField, message: Option<&str>);
}
