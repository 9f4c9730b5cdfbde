//! Source positions.

use core::fmt;

use serde::Serialize;

/// A location in CSS source text.
///
/// Lines and columns are 1-based and columns count code points, not bytes.
/// [`Position::ZERO`] marks errors that concern the input as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Position {
    /// Line number, starting at 1.
    pub line: u32,
    /// Column number in code points, starting at 1.
    pub column: u32,
}

impl Position {
    /// Position used for errors without a source location.
    pub const ZERO: Self = Self { line: 0, column: 0 };

    /// The first code point of any input.
    pub const START: Self = Self { line: 1, column: 1 };

    /// Create a position from a line and column.
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Returns true if this is [`Position::ZERO`].
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.line == 0 && self.column == 0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
