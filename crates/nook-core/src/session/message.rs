//! Chat message types.
//!
//! This module contains types for representing the turns of a chat
//! conversation as shown to the user.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Who produced a chat turn.
///
/// Stored history labels chatbot turns `ai`; the widget labels them `bot`.
/// Both spellings deserialize to [`Sender::Bot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Sender {
    /// Message typed by the user.
    User,
    /// Reply from the chatbot.
    #[serde(alias = "ai")]
    #[strum(to_string = "bot", serialize = "ai")]
    Bot,
}

/// A single turn in the visible chat log.
///
/// Messages are never mutated after creation. Their position in the log is
/// their timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// The sender of the message.
    #[serde(rename = "senderType")]
    pub sender: Sender,
    /// Opaque message text.
    pub content: String,
}

impl Message {
    /// Creates a message typed by the user.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            content: content.into(),
        }
    }

    /// Creates a chatbot message.
    pub fn bot(content: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            content: content.into(),
        }
    }
}
