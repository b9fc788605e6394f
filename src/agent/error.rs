//! Agent error types.

use crate::parser::ParserError;

/// Errors that can occur while finalizing a CLI run.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AgentError {
    /// Output of a successful run could not be parsed.
    #[error("Failed to parse CLI output: {0}")]
    Parse(#[from] ParserError),

    /// The CLI failed and no structured error could be recovered.
    #[error("CLI '{cli}' exited with code {returncode}: {stderr}")]
    CliFailed {
        cli: String,
        returncode: i32,
        stderr: String,
    },

    /// Configured parser name is not registered.
    #[error("Unknown parser: {0}")]
    UnknownParser(String),
}
