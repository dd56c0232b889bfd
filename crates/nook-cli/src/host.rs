//! Terminal rendering of the chat client's host callbacks.

use std::io::Write;
use std::sync::Mutex;

use colored::Colorize;
use nook_core::host::ChatHost;
use nook_core::notice::{Notice, NoticeLevel};
use nook_core::registration::RegistrationField;
use nook_core::session::{Message, Sender};

const LOGIN_HINT: &str = "Log in with /login, or create an account with /register.";

/// Prints the conversation and notices, to stdout unless told otherwise.
///
/// The input line belongs to rustyline, so `clear_input` and
/// `set_input_enabled` have nothing to draw.
pub struct TerminalHost {
    out: Mutex<Box<dyn Write + Send>>,
}

impl Default for TerminalHost {
    fn default() -> Self {
        Self::with_writer(std::io::stdout())
    }
}

impl TerminalHost {
    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            out: Mutex::new(Box::new(writer)),
        }
    }

    fn print(&self, line: impl std::fmt::Display) {
        if let Ok(mut out) = self.out.lock() {
            let _ = writeln!(out, "{}", line);
            let _ = out.flush();
        }
    }
}

impl ChatHost for TerminalHost {
    fn append_message(&self, message: &Message) {
        self.print(render_message(message));
    }

    fn clear_messages(&self) {
        self.print("--- conversation cleared ---".bright_black());
    }

    fn set_loading(&self, visible: bool) {
        if visible {
            self.print("...".bright_black());
        }
    }

    fn set_input_enabled(&self, _enabled: bool) {}

    fn clear_input(&self) {}

    /// Prints the hint on every request to show the prompt.
    fn set_login_prompt(&self, visible: bool) {
        if visible {
            self.print(LOGIN_HINT.yellow());
        }
    }

    fn show_notice(&self, notice: &Notice) {
        self.print(render_notice(notice));
    }

    fn show_field_error(&self, field: RegistrationField, message: Option<&str>) {
        if let Some(message) = message {
            self.print(format!("  {}: {}", field, message).red());
        }
    }
}

fn render_message(message: &Message) -> String {
    match message.sender {
        Sender::User => format!("> {}", message.content).green().to_string(),
        Sender::Bot => message
            .content
            .lines()
            .map(|line| line.bright_blue().to_string())
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn render_notice(notice: &Notice) -> String {
    let text = format!("[{}] {}", notice.level, notice.text);
    match notice.level {
        NoticeLevel::Success => text.bright_green().to_string(),
        NoticeLevel::Error => text.red().to_string(),
        NoticeLevel::Info => text.yellow().to_string(),
    }
}
