//! Chat session client.
//!
//! # Module Structure
//!
//! - `session_client`: `ChatSessionClient`, the chat exchange state machine
//! - `account`: login, registration, and logout operations
//! - `outcome`: results reported back to hosts

mod account;
mod outcome;
mod session_client;

#[cfg(test)]
mod test_support;

pub use outcome::{RegistrationOutcome, SubmitOutcome};
pub use session_client::ChatSessionClient;
