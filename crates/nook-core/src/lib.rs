pub mod backend;
pub mod config;
pub mod error;
pub mod host;
pub mod notice;
pub mod registration;
pub mod reply;
pub mod session;

// Re-export common error type
pub use error::NookError;
