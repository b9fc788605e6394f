//! Parsers that turn captured CLI output into a uniform response.

mod error;
mod events;
mod extract;
mod opencode;

pub use error::*;
pub use events::*;
pub use extract::{display_value, extract_content, CONTENT_KEYS};
pub use opencode::*;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Normalized result of parsing one CLI run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedCliResponse {
    /// Primary textual payload. Never empty on a successful parse.
    pub content: String,
    /// Structured metadata gathered from the output stream.
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

/// A parser for one CLI tool's output format.
pub trait CliParser: std::fmt::Debug + Send + Sync {
    /// Stable registry name, recorded in every agent output.
    fn name(&self) -> &'static str;

    /// Parse captured stdout and stderr.
    ///
    /// # Errors
    ///
    /// Returns `ParserError` if no usable textual result can be found.
    fn parse(&self, stdout: &str, stderr: &str) -> Result<ParsedCliResponse, ParserError>;
}

/// Names of all registered parsers.
pub const PARSER_NAMES: [&str; 1] = [OpenCodeJsonParser::NAME];

/// Look up a parser by its registry name.
#[must_use]
pub fn parser_for(name: &str) -> Option<Box<dyn CliParser>> {
    match name {
        OpenCodeJsonParser::NAME => Some(Box::new(OpenCodeJsonParser::new())),
        _ => None,
    }
}
