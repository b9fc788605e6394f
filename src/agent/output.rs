//! Process facts in, normalized agent output out.

use serde::{Deserialize, Serialize};

use crate::parser::ParsedCliResponse;

/// Facts about a finished CLI run, as collected by the process runner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessOutcome {
    /// Exit code of the CLI process.
    pub returncode: i32,
    /// Captured stdout.
    pub stdout: String,
    /// Captured stderr.
    pub stderr: String,
    /// Command line with secrets removed, for display only.
    pub sanitized_command: Vec<String>,
    /// Wall-clock duration of the run.
    pub duration_seconds: f64,
    /// Contents of the CLI's output file, if it wrote one.
    pub output_file_content: Option<String>,
}

/// Final normalized result of one CLI invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentOutput {
    /// Parsed (or synthesized) response.
    pub parsed: ParsedCliResponse,
    /// Command line with secrets removed.
    pub sanitized_command: Vec<String>,
    /// Exit code of the CLI process.
    pub returncode: i32,
    /// Raw stdout.
    pub stdout: String,
    /// Raw stderr.
    pub stderr: String,
    /// Wall-clock duration of the run.
    pub duration_seconds: f64,
    /// Name of the parser that produced `parsed`.
    pub parser_name: String,
    /// Contents of the CLI's output file, if any.
    pub output_file_content: Option<String>,
}

impl AgentOutput {
    /// Bundle a parsed response with the facts of the run that produced it.
    #[must_use]
    pub fn new(
        parsed: ParsedCliResponse,
        outcome: ProcessOutcome,
        parser_name: impl Into<String>,
    ) -> Self {
        Self {
            parsed,
            sanitized_command: outcome.sanitized_command,
            returncode: outcome.returncode,
            stdout: outcome.stdout,
            stderr: outcome.stderr,
            duration_seconds: outcome.duration_seconds,
            parser_name: parser_name.into(),
            output_file_content: outcome.output_file_content,
        }
    }

    /// The response text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.parsed.content
    }
}
