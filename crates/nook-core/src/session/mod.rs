//! Session domain module.
//!
//! This module contains the identity of the active user, the chat message
//! types, and the transient UI flags driven by a chat exchange.
//!
//! # Module Structure
//!
//! - `model`: Active user identity (`Session`)
//! - `message`: Chat turn types (`Sender`, `Message`)
//! - `ui_state`: Loading/input flags (`UiState`)

mod message;
mod model;
mod ui_state;

// Re-export public API
pub use message::{Message, Sender};
pub use model::{GUEST_USER_ID, Session};
pub use ui_state::UiState;
