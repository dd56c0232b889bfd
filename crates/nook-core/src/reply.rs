//! Interpretation of chat endpoint replies.
//!
//! Depending on the backend revision, the chat endpoint answers either with a
//! JSON object `{ "content": ... }` or with a JSON string that itself encodes
//! that object. Both shapes are accepted here.

use serde_json::Value;

/// How many layers of string encoding are unwrapped before giving up.
const MAX_ENCODING_DEPTH: usize = 2;

/// Extracts the reply text from a chat endpoint payload.
///
/// Returns `None` when no non-blank string `content` can be found; callers
/// substitute a fixed fallback text in that case.
///
/// # Examples
///
/// ```
/// use nook_core::reply::interpret_reply;
/// use serde_json::json;
///
/// assert_eq!(interpret_reply(&json!({"content": "hello"})).as_deref(), Some("hello"));
/// assert_eq!(interpret_reply(&json!(r#"{"content":"hi"}"#)).as_deref(), Some("hi"));
/// assert_eq!(interpret_reply(&json!({"answer": "hi"})), None);
/// ```
pub fn interpret_reply(payload: &Value) -> Option<String> {
    interpret_at_depth(payload, 0)
}

fn interpret_at_depth(payload: &Value, depth: usize) -> Option<String> {
    match payload {
        Value::Object(map) => match map.get("content") {
            Some(Value::String(content)) if !content.trim().is_empty() => Some(content.clone()),
            _ => None,
        },
        Value::String(encoded) if depth < MAX_ENCODING_DEPTH => {
            let decoded: Value = serde_json::from_str(encoded).ok()?;
            interpret_at_depth(&decoded, depth + 1)
        }
        _ => None,
    }
}
