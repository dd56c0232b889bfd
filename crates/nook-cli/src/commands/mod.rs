pub mod chat;
pub mod config;
pub mod history;
pub mod prompts;
pub mod register;
