use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

/// Commands understood by the chat REPL in addition to plain messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlashCommand {
    Login,
    Register,
    History,
    Clear,
    Logout,
    Help,
}

impl SlashCommand {
    pub const ALL: [SlashCommand; 6] = [
        SlashCommand::Login,
        SlashCommand::Register,
        SlashCommand::History,
        SlashCommand::Clear,
        SlashCommand::Logout,
        SlashCommand::Help,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SlashCommand::Login => "/login",
            SlashCommand::Register => "/register",
            SlashCommand::History => "/history",
            SlashCommand::Clear => "/clear",
            SlashCommand::Logout => "/logout",
            SlashCommand::Help => "/help",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SlashCommand::Login => "log in to start chatting",
            SlashCommand::Register => "create an account",
            SlashCommand::History => "reload the stored conversation",
            SlashCommand::Clear => "delete the stored conversation",
            SlashCommand::Logout => "end the session",
            SlashCommand::Help => "show this list",
        }
    }

    /// Parses a trimmed input line. Anything else is a chat message.
    pub fn parse(line: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.name() == line)
    }
}

/// CLI helper for rustyline that completes, highlights, and hints slash commands.
#[derive(Clone)]
pub struct CliHelper {
    commands: Vec<&'static str>,
}

impl CliHelper {
    pub fn new() -> Self {
        Self {
            commands: SlashCommand::ALL.iter().map(|c| c.name()).collect(),
        }
    }

    fn matching<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'static str> + 'a {
        self.commands
            .iter()
            .copied()
            .filter(move |cmd| cmd.starts_with(prefix))
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if !line.starts_with('/') {
            return Ok((0, vec![]));
        }

        let candidates = self
            .matching(line)
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if SlashCommand::parse(line.trim()).is_some() {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.matching(line)
                .find(|cmd| cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

/// Helper for password prompts that draws every character as `*`.
#[derive(Clone, Copy, Default)]
pub struct PasswordHelper;

impl Helper for PasswordHelper {}

impl Completer for PasswordHelper {
    type Candidate = Pair;
}

impl Highlighter for PasswordHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Owned("*".repeat(line.chars().count()))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for PasswordHelper {
    type Hint = String;
}

impl Validator for PasswordHelper {}
