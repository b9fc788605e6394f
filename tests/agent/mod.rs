//! Agent module tests.

mod finalize_test;
mod recovery_test;

use clink_opencode::agent::ProcessOutcome;

/// Outcome of an `opencode run` invocation with the given streams.
pub fn outcome(returncode: i32, stdout: &str, stderr: &str) -> ProcessOutcome {
    ProcessOutcome {
        returncode,
        stdout: stdout.to_string(),
        stderr: stderr.to_string(),
        sanitized_command: vec![
            "opencode".to_string(),
            "run".to_string(),
            "--format".to_string(),
            "json".to_string(),
        ],
        duration_seconds: 3.5,
        output_file_content: None,
    }
}
