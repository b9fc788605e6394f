//! Tests for the finalize flow.

use clink_opencode::agent::{AgentError, CliAgent, OpenCodeAgent};
use clink_opencode::config::ClientConfig;
use clink_opencode::parser::ParserError;

use super::outcome;

#[test]
fn successful_run_is_parsed() {
    let stdout = r#"{"type":"text","part":{"text":"done"}}"#;
    let output = OpenCodeAgent::default()
        .finalize(outcome(0, stdout, ""))
        .unwrap();

    assert_eq!(output.content(), "done");
    assert_eq!(output.returncode, 0);
    assert_eq!(output.parser_name, "opencode_json");
    assert!(!output.parsed.metadata.contains_key("cli_error_recovered"));
}

#[test]
fn successful_run_without_text_is_parse_error() {
    let err = OpenCodeAgent::default()
        .finalize(outcome(0, "", ""))
        .unwrap_err();
    assert_eq!(err, AgentError::Parse(ParserError::EmptyOutput));
}

#[test]
fn failed_run_with_payload_is_recovered() {
    let stderr = r#"Error: {"error":{"code":"rate_limit","message":"slow down"}}"#;
    let output = OpenCodeAgent::default()
        .finalize(outcome(1, "", stderr))
        .unwrap();

    assert_eq!(output.returncode, 1);
    assert!(output
        .content()
        .starts_with("OpenCode CLI reported an error (rate_limit)."));
}

#[test]
fn failed_run_without_payload_keeps_original_failure() {
    let err = OpenCodeAgent::default()
        .finalize(outcome(2, "", "killed\n"))
        .unwrap_err();
    assert_eq!(
        err,
        AgentError::CliFailed {
            cli: "opencode".to_string(),
            returncode: 2,
            stderr: "killed".to_string(),
        }
    );
}

#[test]
fn configured_client_name_is_reported() {
    let client = ClientConfig {
        name: "opencode-nightly".to_string(),
        ..ClientConfig::default()
    };
    let agent = OpenCodeAgent::new(&client).unwrap();
    assert_eq!(agent.name(), "opencode-nightly");

    let err = agent.finalize(outcome(1, "", "")).unwrap_err();
    assert!(err.to_string().contains("opencode-nightly"));
}
