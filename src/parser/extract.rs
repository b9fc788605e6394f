//! Generic content extraction over loosely shaped JSON objects.

use serde_json::{Map, Value};

/// Keys probed for textual content, highest priority first.
pub const CONTENT_KEYS: [&str; 6] = ["content", "result", "message", "response", "text", "output"];

/// Extract textual content from an arbitrary response object.
///
/// Strings are trimmed; arrays contribute their non-blank string members
/// joined by newlines. Falls through to a nested `data` object when none of
/// the top-level keys match. Returns an empty string when nothing is found.
#[must_use]
pub fn extract_content(payload: &Map<String, Value>) -> String {
    for key in CONTENT_KEYS {
        match payload.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => return s.trim().to_string(),
            Some(Value::Array(items)) => {
                let joined: Vec<&str> = items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .collect();
                if !joined.is_empty() {
                    return joined.join("\n");
                }
            }
            _ => {}
        }
    }

    match payload.get("data") {
        Some(Value::Object(data)) => extract_content(data),
        _ => String::new(),
    }
}

/// Render a JSON value the way it reads in a message: strings without quotes,
/// everything else as compact JSON.
#[must_use]
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
