//! Best-effort recovery of JSON error payloads from failed CLI output.
//!
//! CLIs tend to print a human prologue followed by a JSON error object, mixed
//! into stdout or stderr. Everything here returns `Option`: finding nothing is
//! the common case, not an error.

use serde_json::{Map, Value};

use crate::parser::display_value;

/// Header line of every recovered error message.
pub const RECOVERY_HEADER: &str = "OpenCode CLI reported an error";

/// Error object found inside failed CLI output.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorPayload {
    /// Error code, if any.
    pub code: Option<Value>,
    /// Error type, if any.
    pub kind: Option<Value>,
    /// Human-readable detail, coerced to a string.
    pub message: Option<String>,
}

/// A JSON error found in mixed text.
#[derive(Debug, Clone, PartialEq)]
pub struct RecoveredError {
    /// Text preceding the JSON, trimmed.
    pub prologue: String,
    /// The full decoded JSON document.
    pub payload: Value,
    /// The error object within it.
    pub error: ErrorPayload,
}

impl ErrorPayload {
    /// Pick the error object out of a decoded payload.
    ///
    /// Prefers a nested `error` object; otherwise the payload itself counts
    /// when it has a `message` or `error` key.
    #[must_use]
    pub fn from_payload(payload: &Value) -> Option<Self> {
        let block = match payload.get("error") {
            Some(nested @ Value::Object(_)) => nested,
            _ if payload.get("message").is_some() || payload.get("error").is_some() => payload,
            _ => return None,
        };

        let map = block.as_object()?;

        Some(Self {
            code: map.get("code").cloned(),
            kind: map.get("type").cloned(),
            message: map
                .get("message")
                .filter(|m| is_truthy(m))
                .map(display_value),
        })
    }

    /// Header naming the code, or else the type, when either is set.
    #[must_use]
    pub fn header(&self) -> String {
        let qualifier = [&self.code, &self.kind]
            .into_iter()
            .flatten()
            .find(|v| is_truthy(v));
        let header = match qualifier {
            Some(value) => format!("{RECOVERY_HEADER} ({})", display_value(value)),
            None => RECOVERY_HEADER.to_string(),
        };
        format!("{}.", header.trim_end_matches('.'))
    }

    /// Compose the full user-facing message.
    ///
    /// The prologue is dropped when empty or already part of the detail message.
    #[must_use]
    pub fn compose_message(&self, prologue: &str) -> String {
        let mut lines = vec![self.header()];
        let repeated = self
            .message
            .as_deref()
            .is_some_and(|m| m.contains(prologue));
        if !prologue.is_empty() && !repeated {
            lines.push(prologue.to_string());
        }
        if let Some(message) = &self.message {
            lines.push(message.clone());
        }
        lines.join("\n").trim().to_string()
    }
}

impl RecoveredError {
    /// Find and decode the JSON error in combined CLI output.
    ///
    /// Decodes from the first `{` to the end of the text; trailing garbage or a
    /// truncated object means no recovery.
    #[must_use]
    pub fn scan(text: &str) -> Option<Self> {
        let brace = text.find('{')?;
        let payload: Value = match serde_json::from_str(&text[brace..]) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!(error = %e, "Embedded JSON in CLI output did not decode");
                return None;
            }
        };
        let error = ErrorPayload::from_payload(&payload)?;

        Some(Self {
            prologue: text[..brace].trim().to_string(),
            payload,
            error,
        })
    }

    /// Message for the synthesized response.
    #[must_use]
    pub fn message(&self) -> String {
        self.error.compose_message(&self.prologue)
    }

    /// Metadata describing the recovered error.
    #[must_use]
    pub fn metadata(&self) -> Map<String, Value> {
        let mut metadata = Map::new();
        metadata.insert("cli_error_recovered".to_string(), Value::Bool(true));
        metadata.insert(
            "cli_error_code".to_string(),
            self.error.code.clone().unwrap_or(Value::Null),
        );
        metadata.insert(
            "cli_error_type".to_string(),
            self.error.kind.clone().unwrap_or(Value::Null),
        );
        metadata.insert("cli_error_payload".to_string(), self.payload.clone());
        metadata
    }
}

/// Join stderr and stdout, skipping empty streams.
#[must_use]
pub fn combine_streams(stderr: &str, stdout: &str) -> String {
    [stderr, stdout]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Loose truthiness: null, false, zero and empty values do not count.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.abs() > 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
