//! Transient UI flags for the send/receive cycle.

use serde::{Deserialize, Serialize};

/// Loading and input flags.
///
/// Only the two exchange transitions mutate these flags, so `is_loading`
/// always implies `!input_enabled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
    is_loading: bool,
    input_enabled: bool,
}

impl UiState {
    /// Idle state: not loading, input enabled.
    pub fn idle() -> Self {
        Self {
            is_loading: false,
            input_enabled: true,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    /// Enters the Sending state.
    pub fn begin_exchange(&mut self) {
        self.is_loading = true;
        self.input_enabled = false;
    }

    /// Returns to Idle. Called on every exit path of an exchange.
    pub fn finish_exchange(&mut self) {
        *self = Self::idle();
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::idle()
    }
}
