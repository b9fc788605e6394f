//! Parser for OpenCode CLI JSON output.

use serde_json::{Map, Value};

use super::events::{OpenCodeEvent, StepFinish};
use super::extract::{display_value, extract_content};
use super::{CliParser, ParsedCliResponse, ParserError};

/// Marker that starts the trailing summary block in OpenCode text events.
pub const SUMMARY_MARKER: &str = "<SUMMARY>";

/// Content returned when no text was found but stderr explains what happened.
pub const NO_TEXT_PLACEHOLDER: &str =
    "OpenCode CLI returned no textual result. Raw stderr was preserved for troubleshooting.";

/// Parses stdout produced by `opencode run --format json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenCodeJsonParser;

impl OpenCodeJsonParser {
    /// Registry name of this parser.
    pub const NAME: &'static str = "opencode_json";

    /// Create a new parser.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CliParser for OpenCodeJsonParser {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parse(&self, stdout: &str, stderr: &str) -> Result<ParsedCliResponse, ParserError> {
        if stdout.trim().is_empty() {
            return Err(ParserError::EmptyOutput);
        }

        let stderr_text = stderr.trim();
        let events = match decode_events(stdout) {
            Ok(events) => events,
            Err(e) if !stderr_text.is_empty() => {
                tracing::debug!(error = %e, "Stdout is not JSON, relying on stderr");
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        let typed: Vec<OpenCodeEvent> = events.iter().map(OpenCodeEvent::from_value).collect();
        tracing::debug!(events = events.len(), "Decoded OpenCode events");

        let content = select_content(&events, &typed);

        let mut metadata = Map::new();
        if let Some(OpenCodeEvent::StepFinish(step)) = typed.iter().find(|e| e.is_step_finish()) {
            step_metadata(step, &mut metadata);
        }
        metadata.insert("events".to_string(), Value::Array(events));

        if !stderr_text.is_empty() {
            metadata.insert("stderr".to_string(), Value::String(stderr_text.to_string()));
        }

        if !content.is_empty() {
            return Ok(ParsedCliResponse { content, metadata });
        }

        if !stderr_text.is_empty() {
            tracing::warn!("OpenCode output had no textual result, falling back to stderr");
            return Ok(ParsedCliResponse {
                content: NO_TEXT_PLACEHOLDER.to_string(),
                metadata,
            });
        }

        Err(ParserError::NoTextualResult)
    }
}

/// Decode JSONL events from stdout, falling back to a single JSON document.
///
/// Every returned value is a JSON object.
fn decode_events(stdout: &str) -> Result<Vec<Value>, ParserError> {
    let events: Vec<Value> = stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| match serde_json::from_str::<Value>(line) {
            Ok(value) if value.is_object() => Some(value),
            Ok(_) => {
                tracing::trace!(line, "Skipping non-object JSON line");
                None
            }
            Err(e) => {
                tracing::trace!(line, error = %e, "Skipping non-JSON line");
                None
            }
        })
        .collect();

    if !events.is_empty() {
        return Ok(events);
    }

    tracing::debug!("No JSONL events found, decoding stdout as a single document");
    match serde_json::from_str::<Value>(stdout) {
        Ok(Value::Object(map)) => Ok(vec![Value::Object(map)]),
        Ok(Value::Array(items)) => Ok(items.into_iter().filter(Value::is_object).collect()),
        Ok(_) => Ok(Vec::new()),
        Err(e) => Err(ParserError::Decode(e.to_string())),
    }
}

/// Pick the response text.
///
/// The first `text` event with non-empty text wins outright. Until one is
/// seen, the first non-empty generic extraction from any other event is held
/// as the fallback.
fn select_content(events: &[Value], typed: &[OpenCodeEvent]) -> String {
    let mut fallback = String::new();

    for (raw, event) in events.iter().zip(typed) {
        match event {
            OpenCodeEvent::Text { .. } => {
                if let Some(text) = event.text() {
                    return strip_summary(text).to_string();
                }
            }
            _ if fallback.is_empty() => {
                if let Some(map) = raw.as_object() {
                    fallback = extract_content(map);
                }
            }
            _ => {}
        }
    }

    fallback
}

/// Cut text at the first summary marker.
fn strip_summary(text: &str) -> &str {
    match text.split_once(SUMMARY_MARKER) {
        Some((head, _)) => head.trim(),
        None => text,
    }
}

/// Copy run metadata from a `step_finish` event.
fn step_metadata(step: &StepFinish, metadata: &mut Map<String, Value>) {
    if let Some(model) = &step.model {
        metadata.insert("model_used".to_string(), model.clone());
    }
    if let Some(usage) = step.usage.as_ref().filter(|u| u.is_object()) {
        metadata.insert("usage".to_string(), usage.clone());
    }
    if let Some(thinking) = &step.thinking {
        metadata.insert("thinking".to_string(), thinking.clone());
    }
    if let Some(error) = &step.error {
        metadata.insert("is_error".to_string(), Value::Bool(true));
        let message = match error {
            Value::Object(map) => map
                .get("message")
                .cloned()
                .unwrap_or_else(|| Value::String(error.to_string())),
            other => Value::String(display_value(other)),
        };
        metadata.insert("error_message".to_string(), message);
    }
    if let Some(duration) = &step.duration {
        metadata.insert("duration_ms".to_string(), duration.clone());
    }
    if let Some(session_id) = &step.session_id {
        metadata.insert("session_id".to_string(), session_id.clone());
    }
}
