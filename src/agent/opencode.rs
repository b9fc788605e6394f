//! OpenCode-specific agent behaviour.

use crate::config::ClientConfig;
use crate::parser::{parser_for, CliParser, OpenCodeJsonParser, ParsedCliResponse};

use super::recovery::{combine_streams, RecoveredError};
use super::{AgentError, AgentOutput, CliAgent, ProcessOutcome};

/// Agent for the OpenCode CLI.
#[derive(Debug)]
pub struct OpenCodeAgent {
    name: String,
    parser: Box<dyn CliParser>,
}

impl OpenCodeAgent {
    /// Create an agent for a configured client.
    ///
    /// # Errors
    ///
    /// Returns `AgentError::UnknownParser` if the configured parser is not registered.
    pub fn new(client: &ClientConfig) -> Result<Self, AgentError> {
        let parser = parser_for(&client.parser)
            .ok_or_else(|| AgentError::UnknownParser(client.parser.clone()))?;
        Ok(Self {
            name: client.name.clone(),
            parser,
        })
    }
}

impl Default for OpenCodeAgent {
    fn default() -> Self {
        Self {
            name: "opencode".to_string(),
            parser: Box::new(OpenCodeJsonParser::new()),
        }
    }
}

impl CliAgent for OpenCodeAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn parser(&self) -> &dyn CliParser {
        self.parser.as_ref()
    }

    fn recover_from_error(&self, outcome: &ProcessOutcome) -> Option<AgentOutput> {
        let combined = combine_streams(&outcome.stderr, &outcome.stdout);
        if combined.is_empty() {
            return None;
        }

        let recovered = RecoveredError::scan(&combined)?;
        tracing::debug!(
            cli = %self.name,
            code = ?recovered.error.code,
            kind = ?recovered.error.kind,
            "Recovered structured CLI error"
        );

        let parsed = ParsedCliResponse {
            content: recovered.message(),
            metadata: recovered.metadata(),
        };
        Some(AgentOutput::new(parsed, outcome.clone(), self.parser.name()))
    }
}
