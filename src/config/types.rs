//! Configuration types.

use serde::{Deserialize, Serialize};

use crate::parser::OpenCodeJsonParser;

/// Top-level configuration file contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClinkConfig {
    /// The CLI client whose output is normalized.
    pub client: ClientConfig,
}

/// A resolved CLI client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Client name, used in logs and error messages.
    pub name: String,
    /// Registry name of the output parser.
    pub parser: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            name: "opencode".to_string(),
            parser: OpenCodeJsonParser::NAME.to_string(),
        }
    }
}
