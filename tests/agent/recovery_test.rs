//! Tests for OpenCode error recovery.

use clink_opencode::agent::{CliAgent, OpenCodeAgent};
use serde_json::json;

use super::outcome;

#[test]
fn recovers_nested_error_with_code() {
    let failed = outcome(
        1,
        "",
        r#"prefix text {"error":{"code":42,"message":"boom"}}"#,
    );
    let output = OpenCodeAgent::default().recover_from_error(&failed).unwrap();

    assert!(output.content().contains("OpenCode CLI reported an error (42)."));
    assert!(output.content().contains("boom"));
    assert_eq!(
        output.content(),
        "OpenCode CLI reported an error (42).\nprefix text\nboom"
    );
    assert_eq!(output.parsed.metadata["cli_error_code"], json!(42));
    assert_eq!(output.parsed.metadata["cli_error_recovered"], json!(true));
    assert_eq!(output.parsed.metadata["cli_error_type"], json!(null));
    assert_eq!(
        output.parsed.metadata["cli_error_payload"],
        json!({"error": {"code": 42, "message": "boom"}})
    );
}

#[test]
fn preserves_process_facts() {
    let failed = outcome(7, r#"{"message":"denied"}"#, "");
    let output = OpenCodeAgent::default().recover_from_error(&failed).unwrap();

    assert_eq!(output.returncode, 7);
    assert_eq!(output.stdout, failed.stdout);
    assert_eq!(output.stderr, "");
    assert_eq!(output.sanitized_command, failed.sanitized_command);
    assert!((output.duration_seconds - 3.5).abs() < f64::EPSILON);
    assert_eq!(output.parser_name, "opencode_json");
    assert!(output.output_file_content.is_none());
}

#[test]
fn no_brace_means_no_recovery() {
    let failed = outcome(1, "segmentation fault", "core dumped");
    assert!(OpenCodeAgent::default().recover_from_error(&failed).is_none());
}

#[test]
fn undecodable_json_means_no_recovery() {
    let failed = outcome(1, "", "error: {not really json}");
    assert!(OpenCodeAgent::default().recover_from_error(&failed).is_none());
}

#[test]
fn json_without_error_shape_means_no_recovery() {
    let failed = outcome(1, r#"{"type":"step_start"}"#, "");
    assert!(OpenCodeAgent::default().recover_from_error(&failed).is_none());
}

#[test]
fn type_used_when_code_missing() {
    let failed = outcome(
        1,
        "",
        r#"{"error":{"type":"invalid_request_error","message":"max_tokens too large"}}"#,
    );
    let output = OpenCodeAgent::default().recover_from_error(&failed).unwrap();
    assert_eq!(
        output.content(),
        "OpenCode CLI reported an error (invalid_request_error).\nmax_tokens too large"
    );
}

#[test]
fn prologue_contained_in_message_is_not_repeated() {
    let failed = outcome(
        1,
        "",
        r#"quota exceeded {"error":{"message":"quota exceeded for project"}}"#,
    );
    let output = OpenCodeAgent::default().recover_from_error(&failed).unwrap();
    assert_eq!(
        output.content(),
        "OpenCode CLI reported an error.\nquota exceeded for project"
    );
}
