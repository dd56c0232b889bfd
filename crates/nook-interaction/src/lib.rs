//! HTTP implementation of the chat backend.

mod http_backend;

pub use http_backend::HttpChatBackend;
