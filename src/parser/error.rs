//! Parser error types.

/// Errors that can occur while parsing CLI output.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParserError {
    /// Stdout was empty or whitespace only.
    #[error("OpenCode CLI returned empty stdout while JSON output was expected")]
    EmptyOutput,

    /// Neither line-by-line nor whole-buffer decoding produced JSON.
    #[error("Failed to decode OpenCode CLI JSON output: {0}")]
    Decode(String),

    /// Events were decoded but none carried text, and stderr was empty.
    #[error("OpenCode CLI response did not contain a textual result")]
    NoTextualResult,
}
