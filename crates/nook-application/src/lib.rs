pub mod client;

pub use client::{ChatSessionClient, RegistrationOutcome, SubmitOutcome};
