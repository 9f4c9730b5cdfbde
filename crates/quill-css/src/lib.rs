//! CSS tokenizer, rule parser, selector parser and serializer.
//!
//! # Scope
//!
//! This crate implements:
//! - **CSS Tokenizer** ([§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization))
//!   - Byte decoding and preprocessing ([§ 3.3](https://www.w3.org/TR/css-syntax-3/#input-preprocessing))
//!   - All token types, comments included, with source positions
//!   - Escape sequences and recorded warnings for malformed input
//!
//! - **CSS Parser** ([§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing))
//!   - Stylesheet parsing with error recovery
//!   - Style rules, at-rules (rule, declaration and raw blocks), keyframes
//!   - Declarations with `!important`
//!   - Rule tree stored in a per-stylesheet arena
//!
//! - **CSS Selectors** ([Selectors Level 4](https://www.w3.org/TR/selectors-4/))
//!   - Type, universal, class, ID and attribute selectors
//!   - Pseudo-classes (functional ones and An+B included) and pseudo-elements
//!   - Combinators (descendant, child, next-sibling, subsequent-sibling)
//!   - Specificity calculation
//!
//! - **Serializer** ([CSSOM § 2.1](https://drafts.csswg.org/cssom/#common-serializing-idioms))
//!   - Canonical text whose re-serialization is identical
//!
//! # Not Implemented
//!
//! - Selector matching against a document
//! - Namespaced selectors and CSS nesting (`&`)
//! - HTML parsing
//!
//! # Example
//!
//! ```
//! let parsed = quill_css::parse_stylesheet(b"a>b{COLOR:red!important}").unwrap();
//! let text = quill_css::serialize_stylesheet(parsed.value()).unwrap();
//! assert_eq!(text, "a > b { color: red !important; }");
//! ```

/// Diagnostics, fatal errors and parse results.
pub mod diagnostics;
/// Per-call parser configuration.
pub mod options;
/// CSS parser per [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing).
pub mod parser;
/// CSS selector model and parsing per [Selectors Level 4](https://www.w3.org/TR/selectors-4/).
pub mod selector;
/// Canonical CSS serialization.
pub mod serializer;
/// CSS tokenizer per [§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization).
pub mod tokenizer;

pub use diagnostics::{
    Diagnostic, ErrorKind, ParseError, ParseResult, Parsed, Release, Severity,
};
pub use options::ParserOptions;
pub use parser::{
    AtRule, AtRuleBlock, CSSParser, ComponentValue, Declaration, KeyframeRule, KeyframeSelector,
    Rule, RuleArena, RuleId, StyleRule, Stylesheet,
};
pub use quill_common::Position;
pub use selector::{Selector, SelectorComponent, SelectorList, Specificity};
pub use serializer::ToCss;
pub use tokenizer::{CSSToken, CSSTokenizer, Token};

/// Parse a stylesheet with default options.
///
/// # Errors
///
/// See [`parse_stylesheet_with`].
pub fn parse_stylesheet(source: &[u8]) -> ParseResult<Stylesheet> {
    parse_stylesheet_with(source, &ParserOptions::default())
}

/// Parse a stylesheet.
///
/// Malformed rules and declarations are dropped and reported as warnings on
/// the returned [`Parsed`].
///
/// # Errors
///
/// - `InvalidInput` if `source` is empty.
/// - `LexError` if `source` cannot be decoded.
/// - `ResourceLimitExceeded` if the depth or node limits are exceeded.
pub fn parse_stylesheet_with(source: &[u8], options: &ParserOptions) -> ParseResult<Stylesheet> {
    if source.is_empty() {
        return Err(ParseError::invalid_input());
    }

    let mut tokenizer = CSSTokenizer::from_bytes(source, options)?;
    let mut parser = CSSParser::with_options(tokenizer.by_ref(), *options);
    let stylesheet = parser.parse_stylesheet()?;
    let warnings = parser.take_warnings();

    let warnings = merge_warnings(tokenizer.take_diagnostics(), warnings, options);
    Ok(Parsed::new(stylesheet, warnings))
}

/// Parse a standalone selector list with default options.
///
/// # Errors
///
/// See [`parse_selector_list_with`].
pub fn parse_selector_list(source: &[u8]) -> ParseResult<SelectorList> {
    parse_selector_list_with(source, &ParserOptions::default())
}

/// Parse a standalone selector list such as `a, .b > c:hover`.
///
/// # Errors
///
/// - `SyntaxError` if `source` is empty, holds only whitespace, or any
///   selector in the list is invalid.
/// - `LexError` if `source` cannot be decoded.
/// - `ResourceLimitExceeded` if the depth or node limits are exceeded.
pub fn parse_selector_list_with(
    source: &[u8],
    options: &ParserOptions,
) -> ParseResult<SelectorList> {
    if source.is_empty() {
        return Err(ParseError::syntax(Position::START, "expected a selector"));
    }

    let mut tokenizer = CSSTokenizer::from_bytes(source, options)?;
    let mut parser = CSSParser::with_options(tokenizer.by_ref(), *options);
    let selectors = parser.parse_selector_list()?;
    let warnings = parser.take_warnings();

    let warnings = merge_warnings(tokenizer.take_diagnostics(), warnings, options);
    Ok(Parsed::new(selectors, warnings))
}

/// Parse a stylesheet and return its canonical serialization.
///
/// # Errors
///
/// See [`parse_stylesheet`] and [`serialize_stylesheet`].
pub fn normalize_stylesheet(source: &[u8]) -> ParseResult<String> {
    let (stylesheet, warnings) = parse_stylesheet(source)?.into_parts();
    Ok(Parsed::new(serialize_stylesheet(&stylesheet)?, warnings))
}

/// Parse a selector list and return its canonical serialization.
///
/// # Errors
///
/// See [`parse_selector_list`] and [`serialize_selector_list`].
pub fn normalize_selector_list(source: &[u8]) -> ParseResult<String> {
    let (selectors, warnings) = parse_selector_list(source)?.into_parts();
    Ok(Parsed::new(serialize_selector_list(&selectors)?, warnings))
}

/// Write a stylesheet as canonical CSS text.
///
/// # Errors
///
/// Returns `SerializeError` if the stylesheet was released or its tree is
/// inconsistent.
pub fn serialize_stylesheet(stylesheet: &Stylesheet) -> Result<String, ParseError> {
    stylesheet.to_css_string()
}

/// Write a selector list as canonical CSS text.
///
/// # Errors
///
/// Returns `SerializeError` if the list was released or holds a token the
/// parser never produces.
pub fn serialize_selector_list(selectors: &SelectorList) -> Result<String, ParseError> {
    selectors.to_css_string()
}

/// Combine lexer and parser warnings in source order, logging them when
/// [`ParserOptions::log_warnings`] is set.
fn merge_warnings(
    mut warnings: Vec<Diagnostic>,
    parser_warnings: Vec<Diagnostic>,
    options: &ParserOptions,
) -> Vec<Diagnostic> {
    warnings.extend(parser_warnings);
    warnings.sort_by_key(|diagnostic| diagnostic.position);

    if options.log_warnings {
        for diagnostic in &warnings {
            let _ = quill_common::warning::warn_once("CSS", &diagnostic.to_string());
        }
    }
    warnings
}
