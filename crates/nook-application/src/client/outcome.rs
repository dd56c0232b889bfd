use nook_core::registration::FieldError;

/// Which path a [`submit`](super::ChatSessionClient::submit) call took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input, or an exchange was already in flight. Nothing changed.
    Ignored,
    /// The session is unauthenticated; the login prompt was shown.
    LoginRequired,
    /// The message exceeded the configured length limit and was not sent.
    Rejected,
    /// The chatbot's reply was appended.
    Replied,
    /// A reply arrived without usable content; the fallback text was appended.
    Fallback,
    /// The request failed; an error message was appended.
    Failed,
}

/// Result of a registration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// Local validation failed; nothing was sent.
    Invalid(Vec<FieldError>),
    Registered,
    Failed,
}
