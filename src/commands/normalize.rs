//! `parse` and `finalize` commands.
//!
//! Both read streams that some other runner already captured to files and
//! print the normalized result as JSON.

use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::agent::{AgentError, AgentOutput, CliAgent, OpenCodeAgent, ProcessOutcome};
use crate::config::{ClinkConfig, ConfigError};
use crate::parser::ParsedCliResponse;

/// Path argument that means "read standard input".
pub const STDIN_PATH: &str = "-";

/// Errors that can occur while running a command.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Failed to read a captured stream.
    #[error("Failed to read {path}: {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// More than one input asked for standard input.
    #[error("Only one input can be read from stdin")]
    StdinTwice,

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Agent failed to normalize the run.
    #[error(transparent)]
    Agent(#[from] AgentError),

    /// Failed to render the result.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Locations of captured CLI streams.
#[derive(Debug, Clone, Default)]
pub struct CapturedRun {
    /// Captured stdout, or `-` for stdin.
    pub stdout: PathBuf,
    /// Captured stderr, if any.
    pub stderr: Option<PathBuf>,
    /// File the CLI wrote its final answer to, if any.
    pub output_file: Option<PathBuf>,
}

impl CapturedRun {
    fn check_stdin(&self) -> Result<(), CommandError> {
        let stdin_inputs = std::iter::once(&self.stdout)
            .chain(self.stderr.iter())
            .chain(self.output_file.iter())
            .filter(|p| is_stdin(p))
            .count();
        if stdin_inputs > 1 {
            return Err(CommandError::StdinTwice);
        }
        Ok(())
    }

    fn read_stdout(&self) -> Result<String, CommandError> {
        read_input(&self.stdout)
    }

    fn read_stderr(&self) -> Result<String, CommandError> {
        self.stderr
            .as_deref()
            .map_or_else(|| Ok(String::new()), read_input)
    }

    fn read_output_file(&self) -> Result<Option<String>, CommandError> {
        self.output_file.as_deref().map(read_input).transpose()
    }
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == STDIN_PATH
}

/// Read a captured stream from a file, or from stdin for `-`.
///
/// # Errors
///
/// Returns `CommandError::ReadInput` if the stream cannot be read.
pub fn read_input(path: &Path) -> Result<String, CommandError> {
    let read_error = |source| CommandError::ReadInput {
        path: path.to_path_buf(),
        source,
    };

    if is_stdin(path) {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(read_error)?;
        return Ok(buffer);
    }
    std::fs::read_to_string(path).map_err(read_error)
}

/// Parse a successful run's captured output.
///
/// # Errors
///
/// Returns an error if inputs cannot be read, the parser is unknown, or the
/// output has no textual result.
pub fn parse_capture(
    config: &ClinkConfig,
    run: &CapturedRun,
) -> Result<ParsedCliResponse, CommandError> {
    run.check_stdin()?;
    let agent = OpenCodeAgent::new(&config.client)?;
    let stdout = run.read_stdout()?;
    let stderr = run.read_stderr()?;
    let parsed = agent
        .parser()
        .parse(&stdout, &stderr)
        .map_err(AgentError::from)?;
    Ok(parsed)
}

/// Process facts supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct RunFacts {
    /// Exit code of the CLI.
    pub returncode: i32,
    /// Wall-clock duration in seconds.
    pub duration_seconds: f64,
    /// Sanitized command line.
    pub command: Vec<String>,
}

/// Finalize a run: parse on success, recover on failure.
///
/// # Errors
///
/// Returns an error if inputs cannot be read or the agent cannot produce an
/// output for the run.
pub fn finalize_capture(
    config: &ClinkConfig,
    run: &CapturedRun,
    facts: RunFacts,
) -> Result<AgentOutput, CommandError> {
    run.check_stdin()?;
    let agent = OpenCodeAgent::new(&config.client)?;
    let outcome = ProcessOutcome {
        returncode: facts.returncode,
        stdout: run.read_stdout()?,
        stderr: run.read_stderr()?,
        sanitized_command: facts.command,
        duration_seconds: facts.duration_seconds,
        output_file_content: run.read_output_file()?,
    };
    Ok(agent.finalize(outcome)?)
}

/// Render a result as pretty JSON.
///
/// # Errors
///
/// Returns `CommandError::Serialize` if the value cannot be serialized.
pub fn render_json<T: Serialize>(value: &T) -> Result<String, CommandError> {
    Ok(serde_json::to_string_pretty(value)?)
}
