//! Parser module tests.


/// Verify the public parser types are exported from the library.
#[test]
fn test_all_parser_types_exported() {
    use clink_opencode::parser::{
        parser_for, CliParser, OpenCodeEvent, OpenCodeJsonParser, ParsedCliResponse, ParserError,
        StepFinish, TextPart, NO_TEXT_PLACEHOLDER, SUMMARY_MARKER,
    };

    let parser: &dyn CliParser = &OpenCodeJsonParser::new();
    assert_eq!(parser.name(), "opencode_json");
    assert!(parser_for(parser.name()).is_some());

    let _ = OpenCodeEvent::Text {
        part: TextPart::default(),
    };
    let _ = OpenCodeEvent::StepFinish(StepFinish::default());
    let _ = ParsedCliResponse::default();
    let _: fn() -> ParserError = || ParserError::NoTextualResult;
    assert_eq!(SUMMARY_MARKER, "<SUMMARY>");
    assert!(NO_TEXT_PLACEHOLDER.starts_with("OpenCode CLI returned no textual result"));
}
