//! Integration tests for fatal errors, warnings, resource limits and release.

use quill_css::tokenizer::CSSToken;
use quill_css::{
    ComponentValue, ErrorKind, ParseError, ParserOptions, Position, Release, Rule, SelectorList,
    Severity, Stylesheet, normalize_selector_list, normalize_stylesheet, parse_selector_list_with,
    parse_stylesheet, parse_stylesheet_with,
};
use std::thread;

#[test]
fn test_empty_input_is_invalid() {
    let error = parse_stylesheet(b"").unwrap_err();
    assert_eq!(error.kind, ErrorKind::InvalidInput);
    assert_eq!(error.position(), Position::ZERO);
    assert_eq!(error.message(), "An input is required!");
    assert_eq!(error.to_string(), "InvalidInput at 0:0: An input is required!");

    assert_eq!(
        normalize_stylesheet(b"").unwrap_err().kind,
        ErrorKind::InvalidInput
    );
    // An empty selector list is a syntax error, not missing input.
    assert_eq!(
        normalize_selector_list(b"").unwrap_err().kind,
        ErrorKind::SyntaxError
    );
}

#[test]
fn test_invalid_utf8_is_a_lex_error() {
    let error = parse_stylesheet(b"a {\n  color: r\xFFed }").unwrap_err();
    assert_eq!(error.kind, ErrorKind::LexError);
    assert_eq!(error.position(), Position::new(2, 11));
    assert_eq!(error.diagnostic.severity, Severity::Error);
}

#[test]
fn test_lossy_decoding_replaces_and_warns() {
    let options = ParserOptions::new().with_lossy_decoding(true);
    let parsed = parse_stylesheet_with(b"a {\n  color: r\xFFed }", &options).unwrap();
    assert_eq!(parsed.warnings().len(), 1);
    assert_eq!(parsed.warnings()[0].message, "invalid UTF-8 replaced with U+FFFD");
    assert_eq!(parsed.warnings()[0].position, Position::new(2, 11));
    assert_eq!(parsed.warnings()[0].severity, Severity::Warning);

    let rule = parsed.value().rules().next().and_then(Rule::as_style).unwrap();
    assert_eq!(
        rule.declarations[0].value,
        vec![ComponentValue::Token(CSSToken::ident("r\u{FFFD}ed"))]
    );
}

#[test]
fn test_lexer_and_parser_warnings_are_merged_in_order() {
    let parsed = parse_stylesheet(b"!x {}\na { content: 'open }").unwrap();
    let warnings: Vec<(u32, &str)> = parsed
        .warnings()
        .iter()
        .map(|diagnostic| (diagnostic.position.line, diagnostic.message.as_str()))
        .collect();
    assert_eq!(warnings[0], (1, "skipped invalid input up to the next rule"));
    assert!(warnings[1..].iter().all(|&(line, _)| line == 2));
    assert!(warnings.iter().any(|&(_, message)| message == "unterminated string"));
}

// Resource limits

#[test]
fn test_nesting_limit() {
    let options = ParserOptions::new().with_max_depth(5);
    let error = parse_stylesheet_with(b"a { x: ((((((((((1)))))))))) }", &options).unwrap_err();
    assert_eq!(error.kind, ErrorKind::ResourceLimitExceeded);
    assert_eq!(error.position().line, 1);

    assert!(parse_stylesheet_with(b"a { x: ((1)) }", &options).is_ok());
}

#[test]
fn test_default_nesting_limit_stops_runaway_input() {
    let source = format!("a {{ x: {} }}", "(".repeat(ParserOptions::DEFAULT_MAX_DEPTH + 10));
    let error = parse_stylesheet(source.as_bytes()).unwrap_err();
    assert_eq!(error.kind, ErrorKind::ResourceLimitExceeded);
}

#[test]
fn test_nested_at_rules_count_towards_depth() {
    let options = ParserOptions::new().with_max_depth(3);
    let source = "@media a { @media b { @media c { @media d { } } } }";
    let error = parse_stylesheet_with(source.as_bytes(), &options).unwrap_err();
    assert_eq!(error.kind, ErrorKind::ResourceLimitExceeded);
}

#[test]
fn test_selector_nesting_limit() {
    let options = ParserOptions::new().with_max_depth(2);
    let error = parse_selector_list_with(b":not(:not(:not(a)))", &options).unwrap_err();
    assert_eq!(error.kind, ErrorKind::ResourceLimitExceeded);
    assert!(parse_selector_list_with(b":not(a)", &options).is_ok());
}

#[test]
fn test_node_limit() {
    let options = ParserOptions::new().with_max_nodes(10);
    let source = b"a { color: red; margin: 0; padding: 0; x: y; z: w }";
    let error = parse_stylesheet_with(source, &options).unwrap_err();
    assert_eq!(error.kind, ErrorKind::ResourceLimitExceeded);
    assert!(error.message().contains("10"));

    assert!(parse_stylesheet_with(b"a{}", &options).is_ok());
}

// Release

#[test]
fn test_release_is_idempotent() {
    let mut parsed = parse_stylesheet(b"@media x { a { color: red } }").unwrap();
    assert!(!parsed.is_released());
    assert!(parsed.release());
    assert!(parsed.is_released());
    assert!(parsed.value().is_empty());
    assert!(parsed.value().arena().is_empty());
    assert!(parsed.warnings().is_empty());
    assert!(!parsed.release());
}

#[test]
fn test_released_selector_list() {
    let mut parsed = parse_selector_list_with(b"a, b", &ParserOptions::default()).unwrap();
    assert!(parsed.value_mut().release());
    assert!(parsed.value().is_empty());
    assert!(!parsed.value_mut().release());
}

#[test]
fn test_normalized_text_release() {
    let mut parsed = normalize_stylesheet(b"a{}").unwrap();
    assert!(parsed.release());
    assert!(!parsed.release());

    // Comment-only input normalizes to empty text, which is still released once.
    let mut parsed = normalize_stylesheet(b"/* nothing */").unwrap();
    assert!(parsed.value().is_empty());
    assert!(!parsed.is_released());
    assert!(parsed.release());
    assert!(parsed.is_released());
    assert!(!parsed.release());
}

// Reporting

#[test]
fn test_diagnostic_display() {
    let parsed = parse_stylesheet(b"a { color red }").unwrap();
    assert_eq!(
        parsed.warnings()[0].to_string(),
        "warning 1:5: expected ':' after 'color'; declaration skipped"
    );
}

#[test]
fn test_trees_and_diagnostics_serialize_to_json() -> anyhow::Result<()> {
    let parsed = parse_stylesheet(b"a { color: red } !")?;
    let json = serde_json::to_value(&parsed)?;
    assert_eq!(json["warnings"][0]["severity"], "Warning");
    assert_eq!(json["warnings"][0]["position"]["line"], 1);
    assert_eq!(json["value"]["rules"].as_array().map(Vec::len), Some(1));

    let error = parse_stylesheet(b"").unwrap_err();
    let json = serde_json::to_value(&error)?;
    assert_eq!(json["kind"], "InvalidInput");
    assert_eq!(json["diagnostic"]["message"], "An input is required!");
    Ok(())
}

fn selector_text(source: &[u8]) -> anyhow::Result<String> {
    Ok(normalize_selector_list(source)?.into_value())
}

#[test]
fn test_errors_work_with_question_mark() -> anyhow::Result<()> {
    let text = normalize_stylesheet(b"a{color:red}")?.into_value();
    assert_eq!(text, "a { color: red; }");

    let error = selector_text(b"a >").unwrap_err();
    assert!(error.to_string().starts_with("SyntaxError at 1:"));
    Ok(())
}

#[test]
fn test_logged_warnings_are_still_returned() {
    let options = ParserOptions::new().with_warning_log(true);
    let parsed = parse_stylesheet_with(b"logged { color }", &options).unwrap();
    assert_eq!(parsed.warnings().len(), 1);
    // Already printed once by the parse above.
    assert!(!quill_common::warning::warn_once(
        "CSS",
        &parsed.warnings()[0].to_string()
    ));
}

// Threads

const fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_results_can_cross_threads() {
    assert_send_sync::<Stylesheet>();
    assert_send_sync::<SelectorList>();
    assert_send_sync::<ParseError>();
    assert_send_sync::<quill_css::Parsed<Stylesheet>>();
}

#[test]
fn test_parses_run_independently_on_threads() {
    let handles: Vec<_> = (0..8)
        .map(|index| {
            thread::spawn(move || {
                let source = format!(".c{index} {{ width: {index}px }} broken {{ x }}");
                let options = ParserOptions::new().with_warning_log(index % 2 == 0);
                let parsed = parse_stylesheet_with(source.as_bytes(), &options).unwrap();
                let text = normalize_stylesheet(source.as_bytes()).unwrap();
                (index, parsed, text.into_value())
            })
        })
        .collect();

    for handle in handles {
        let (index, parsed, text) = handle.join().unwrap();
        assert_eq!(parsed.value().rules().count(), 2);
        assert_eq!(parsed.warnings().len(), 1);
        assert_eq!(text, format!(".c{index} {{ width: {index}px; }}\nbroken {{ }}"));
    }
}
