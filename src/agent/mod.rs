//! CLI agents: turn a finished process run into an `AgentOutput`.

mod error;
mod opencode;
mod output;
mod recovery;

pub use error::*;
pub use opencode::*;
pub use output::*;
pub use recovery::{combine_streams, ErrorPayload, RecoveredError, RECOVERY_HEADER};

use crate::parser::CliParser;

/// Per-CLI hooks around a shared finalize flow.
pub trait CliAgent {
    /// Client name used in logs and errors.
    fn name(&self) -> &str;

    /// Parser for successful runs.
    fn parser(&self) -> &dyn CliParser;

    /// Try to explain a failed run. `None` means the failure stands as-is.
    fn recover_from_error(&self, _outcome: &ProcessOutcome) -> Option<AgentOutput> {
        None
    }

    /// Normalize a finished run.
    ///
    /// Successful runs are parsed; failed runs go through `recover_from_error`.
    ///
    /// # Errors
    ///
    /// Returns `AgentError::Parse` if a successful run has no usable output, or
    /// `AgentError::CliFailed` if a failed run could not be recovered.
    fn finalize(&self, outcome: ProcessOutcome) -> Result<AgentOutput, AgentError> {
        if outcome.returncode != 0 {
            if let Some(recovered) = self.recover_from_error(&outcome) {
                tracing::info!(
                    cli = self.name(),
                    returncode = outcome.returncode,
                    "Recovered error output from failed CLI run"
                );
                return Ok(recovered);
            }
            tracing::warn!(
                cli = self.name(),
                returncode = outcome.returncode,
                "CLI run failed without a recoverable error payload"
            );
            return Err(AgentError::CliFailed {
                cli: self.name().to_string(),
                returncode: outcome.returncode,
                stderr: outcome.stderr.trim().to_string(),
            });
        }

        let parser = self.parser();
        let parsed = parser.parse(&outcome.stdout, &outcome.stderr)?;
        tracing::debug!(
            cli = self.name(),
            parser = parser.name(),
            content_len = parsed.content.len(),
            "Parsed CLI output"
        );
        Ok(AgentOutput::new(parsed, outcome, parser.name()))
    }
}
