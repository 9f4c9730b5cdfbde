//! Diagnostics and parse results.
//!
//! Every fallible operation returns a [`ParseResult`]: either a [`Parsed`]
//! value together with the non-fatal warnings collected while recovering
//! from malformed input, or a single [`ParseError`] describing the first
//! fatal problem. A failed parse never hands back a partially built value.

use core::fmt;

use quill_common::Position;
use serde::Serialize;
use strum_macros::{Display, EnumIter};
use thiserror::Error;

/// How serious a [`Diagnostic`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    /// Recoverable: parsing continued past the problem.
    Warning,
    /// Fatal: the operation was aborted.
    Error,
}

/// A position-tagged message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Where the problem was detected.
    pub position: Position,
    /// Human readable description.
    pub message: String,
    /// Whether parsing recovered.
    pub severity: Severity,
}

impl Diagnostic {
    /// Create a recoverable diagnostic.
    #[must_use]
    pub fn warning(position: Position, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
            severity: Severity::Warning,
        }
    }

    /// Create a fatal diagnostic.
    #[must_use]
    pub fn error(position: Position, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
            severity: Severity::Error,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.severity, self.position, self.message)
    }
}

/// The kinds of failure that abort a whole operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter)]
pub enum ErrorKind {
    /// The source was empty.
    InvalidInput,
    /// The bytes could not be decoded as CSS text.
    LexError,
    /// A standalone selector list could not be parsed.
    SyntaxError,
    /// A tree violated an internal invariant while being serialized.
    SerializeError,
    /// The configured depth or node budget was exhausted.
    ResourceLimitExceeded,
}

/// A fatal error: its kind plus the diagnostic that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{kind} at {}: {}", .diagnostic.position, .diagnostic.message)]
pub struct ParseError {
    /// What went wrong.
    pub kind: ErrorKind,
    /// Where and why.
    pub diagnostic: Diagnostic,
}

impl ParseError {
    /// Create an error of the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind, position: Position, message: impl Into<String>) -> Self {
        Self {
            kind,
            diagnostic: Diagnostic::error(position, message),
        }
    }

    /// The error returned for an empty source.
    #[must_use]
    pub fn invalid_input() -> Self {
        Self::new(ErrorKind::InvalidInput, Position::ZERO, "An input is required!")
    }

    /// A selector-list syntax error.
    #[must_use]
    pub fn syntax(position: Position, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SyntaxError, position, message)
    }

    /// A decoding error.
    #[must_use]
    pub fn lex(position: Position, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::LexError, position, message)
    }

    /// An internal invariant violation found while serializing.
    #[must_use]
    pub fn serialize(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SerializeError, Position::ZERO, message)
    }

    /// A depth or node budget violation.
    #[must_use]
    pub fn resource_limit(position: Position, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ResourceLimitExceeded, position, message)
    }

    /// Where the error was detected.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.diagnostic.position
    }

    /// The error message without kind or position.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.diagnostic.message
    }
}

impl From<fmt::Error> for ParseError {
    fn from(_: fmt::Error) -> Self {
        Self::serialize("the output sink rejected a write")
    }
}

/// Values that own parse nodes and can give them up in one step.
///
/// Releasing is idempotent: the first call frees everything and returns
/// true, later calls are no-ops that return false. A bare `String` has no
/// flag of its own and counts as released once empty; wrap it in [`Parsed`]
/// to track the release explicitly. Dropping a value releases it as well.
pub trait Release {
    /// Free every node owned by this value.
    fn release(&mut self) -> bool;

    /// Returns true once [`Release::release`] has run.
    fn is_released(&self) -> bool;
}

impl Release for String {
    /// Strings have no released state of their own: releasing clears the
    /// text, so a second call reports false because nothing is left.
    fn release(&mut self) -> bool {
        !core::mem::take(self).is_empty()
    }

    fn is_released(&self) -> bool {
        self.is_empty()
    }
}

/// A successfully parsed value with the warnings collected on the way.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parsed<T> {
    value: T,
    warnings: Vec<Diagnostic>,
    #[serde(skip)]
    released: bool,
}

impl<T> Parsed<T> {
    /// Wrap a value and its warnings.
    #[must_use]
    pub const fn new(value: T, warnings: Vec<Diagnostic>) -> Self {
        Self {
            value,
            warnings,
            released: false,
        }
    }

    /// The parsed value.
    #[must_use]
    pub const fn value(&self) -> &T {
        &self.value
    }

    /// Mutable access to the parsed value.
    pub const fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    /// Non-fatal problems recorded during recovery, sorted by position.
    #[must_use]
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// Take the value, discarding the warnings.
    #[must_use]
    pub fn into_value(self) -> T {
        self.value
    }

    /// Split into value and warnings.
    #[must_use]
    pub fn into_parts(self) -> (T, Vec<Diagnostic>) {
        (self.value, self.warnings)
    }

    /// Replace the value, keeping the warnings.
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Parsed<U> {
        Parsed {
            value: f(self.value),
            warnings: self.warnings,
            released: self.released,
        }
    }
}

impl<T: Release> Release for Parsed<T> {
    fn release(&mut self) -> bool {
        if self.released {
            return false;
        }
        self.released = true;
        self.warnings = Vec::new();
        let _ = self.value.release();
        true
    }

    fn is_released(&self) -> bool {
        self.released
    }
}

/// Either a parsed value or the fatal error that stopped the parse.
pub type ParseResult<T> = Result<Parsed<T>, ParseError>;

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn error_display_names_kind_and_position() {
        let error = ParseError::syntax(Position::new(2, 4), "expected a selector");
        assert_eq!(error.to_string(), "SyntaxError at 2:4: expected a selector");
        assert_eq!(
            ParseError::invalid_input().to_string(),
            "InvalidInput at 0:0: An input is required!"
        );
    }

    #[test]
    fn error_kinds_have_distinct_names() {
        let names: Vec<String> = ErrorKind::iter().map(|kind| kind.to_string()).collect();
        for (i, name) in names.iter().enumerate() {
            assert!(!names[i + 1..].contains(name), "duplicate kind name {name}");
        }
        assert_eq!(names.len(), 5);
    }

    #[test]
    fn releasing_parsed_strings_is_idempotent() {
        let mut parsed = Parsed::new(String::from("a { }"), vec![]);
        assert!(parsed.release());
        assert!(parsed.is_released());
        assert!(!parsed.release());

        let mut empty = Parsed::new(String::new(), vec![]);
        assert!(!empty.is_released());
        assert!(empty.release());
        assert!(!empty.release());
    }

    #[test]
    fn severity_is_lowercase() {
        let diagnostic = Diagnostic::warning(Position::new(1, 2), "unterminated string");
        assert_eq!(diagnostic.to_string(), "warning 1:2: unterminated string");
    }
}
