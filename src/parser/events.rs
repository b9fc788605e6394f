//! Event types from OpenCode `--format json` output.
//!
//! OpenCode emits one JSON object per line. Only a couple of event types carry
//! anything the parser cares about; everything else decodes to `Unknown` and is
//! kept around in raw form for the generic content extractor.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Payload of a `text` event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextPart {
    /// The assistant text, possibly followed by a `<SUMMARY>` block.
    #[serde(default)]
    pub text: Option<String>,
}

/// Terminal `step_finish` event data.
///
/// Every field is optional and loosely typed; OpenCode versions disagree on
/// their shapes. A key that is present with a `null` value decodes to
/// `Some(Value::Null)`, only a missing key is `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepFinish {
    /// Model that produced the step.
    #[serde(default, deserialize_with = "present")]
    pub model: Option<Value>,
    /// Token usage block.
    #[serde(default, deserialize_with = "present")]
    pub usage: Option<Value>,
    /// Reasoning output, if the model exposed any.
    #[serde(default, deserialize_with = "present")]
    pub thinking: Option<Value>,
    /// Error reported for this step.
    #[serde(default, deserialize_with = "present")]
    pub error: Option<Value>,
    /// Step duration in milliseconds.
    #[serde(default, deserialize_with = "present")]
    pub duration: Option<Value>,
    /// Session identifier.
    #[serde(default, deserialize_with = "present")]
    pub session_id: Option<Value>,
}

/// Keep explicit nulls: the key was there.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Events emitted by OpenCode in JSON output mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OpenCodeEvent {
    /// Assistant text.
    Text {
        /// Text payload.
        #[serde(default)]
        part: TextPart,
    },
    /// End of a model step, carries run metadata.
    StepFinish(StepFinish),
    /// Catch-all for other or malformed event types.
    #[serde(other)]
    Unknown,
}

impl OpenCodeEvent {
    /// Decode the typed view of a raw event object.
    ///
    /// Anything that does not fit a known variant (missing `type`, wrong field
    /// shapes) is treated as `Unknown`.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        Self::deserialize(value).unwrap_or(Self::Unknown)
    }

    /// Returns the text of a `text` event, if it is non-empty.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text { part } => part.text.as_deref().filter(|t| !t.is_empty()),
            _ => None,
        }
    }

    /// Returns true if this is a `step_finish` event.
    #[must_use]
    pub fn is_step_finish(&self) -> bool {
        matches!(self, Self::StepFinish(_))
    }
}
