//! [§ 9 Serialization](https://www.w3.org/TR/css-syntax-3/#serialization)
//!
//! "The tokenizer described in this specification does not produce tokens
//! for comments, or otherwise preserve them in any way. Implementations may
//! preserve the contents of comments and their location in the token stream.
//! If they do, this preserved information must have no effect on the parsing
//! step."
//!
//! "This specification does not define how to serialize CSS in general,
//! leaving that task to the CSSOM and individual feature specifications. In
//! particular, the serialization of comments and whitespace is not defined.
//!
//! The only requirement for serialization is that it must "round-trip" with
//! parsing, that is, parsing the stylesheet must produce the same data
//! structures as parsing, serializing, and parsing again, except for
//! consecutive <whitespace-token>s, which may be collapsed into a single
//! token."

use core::fmt::Write;

use super::escape::{
    serialize_identifier, serialize_name, serialize_number, serialize_string, serialize_unit,
    serialize_url,
};
use crate::diagnostics::ParseError;
use crate::parser::ComponentValue;
use crate::tokenizer::CSSToken;

/// How the start or end of a written token can glue onto its neighbour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Ident,
    Function,
    AtKeyword,
    Hash,
    Url,
    Number,
    Percentage,
    Dimension,
    Delim(char),
    Cdc,
    OpenParen,
    /// `\` followed by the newline that keeps it a delim.
    BackslashNewline,
    Whitespace,
    Other,
}

/// "When serializing a list of tokens, ... for each pair of adjacent tokens
/// in the following table, if the first token is in the left column and the
/// second token is in the top row, an empty comment (`/**/`) must be
/// inserted between them."
fn needs_comment(first: Edge, second: Edge) -> bool {
    use Edge::{
        AtKeyword, Cdc, Delim, Dimension, Function, Hash, Ident, Number, OpenParen, Percentage, Url,
    };

    let ident_like = matches!(
        second,
        Ident | Function | Url | Delim('-') | Number | Percentage | Dimension
    );
    match first {
        Ident => ident_like || matches!(second, Cdc | OpenParen),
        AtKeyword | Hash | Dimension => ident_like || second == Cdc,
        Delim('#' | '-') => ident_like,
        Number => matches!(
            second,
            Ident | Function | Url | Number | Percentage | Dimension | Delim('%')
        ),
        Delim('@') => matches!(second, Ident | Function | Url | Delim('-')),
        Delim('.' | '+') => matches!(second, Number | Percentage | Dimension),
        Delim('/') => second == Delim('*'),
        _ => false,
    }
}

/// The edges a token presents to the token before and after it.
const fn edges(token: &CSSToken) -> (Edge, Edge) {
    match token {
        CSSToken::Ident(_) => (Edge::Ident, Edge::Ident),
        CSSToken::Function(_) => (Edge::Function, Edge::Other),
        CSSToken::AtKeyword(_) => (Edge::Other, Edge::AtKeyword),
        CSSToken::Hash { .. } => (Edge::Other, Edge::Hash),
        CSSToken::Url(_) => (Edge::Url, Edge::Other),
        CSSToken::Delim('\\') => (Edge::Delim('\\'), Edge::BackslashNewline),
        CSSToken::Delim(c) => (Edge::Delim(*c), Edge::Delim(*c)),
        CSSToken::Number { .. } => (Edge::Number, Edge::Number),
        CSSToken::Percentage { .. } => (Edge::Percentage, Edge::Other),
        CSSToken::Dimension { .. } => (Edge::Dimension, Edge::Dimension),
        CSSToken::CDC => (Edge::Cdc, Edge::Other),
        CSSToken::LeftParen => (Edge::OpenParen, Edge::Other),
        _ => (Edge::Other, Edge::Other),
    }
}

/// Writes component values as text, collapsing whitespace runs, dropping
/// leading and trailing whitespace, and separating tokens that would
/// otherwise tokenize differently.
pub(crate) struct TokenWriter<'w, W: Write> {
    dest: &'w mut W,
    last: Option<Edge>,
    pending_space: bool,
}

impl<'w, W: Write> TokenWriter<'w, W> {
    pub(crate) const fn new(dest: &'w mut W) -> Self {
        Self {
            dest,
            last: None,
            pending_space: false,
        }
    }

    pub(crate) fn write_values(&mut self, values: &[ComponentValue]) -> Result<(), ParseError> {
        values.iter().try_for_each(|value| self.write_value(value))
    }

    pub(crate) fn write_value(&mut self, value: &ComponentValue) -> Result<(), ParseError> {
        match value {
            ComponentValue::Token(token) => self.write_token(token),
            ComponentValue::Function { name, value } => {
                self.separate(Edge::Function)?;
                serialize_identifier(name, self.dest)?;
                self.dest.write_char('(')?;
                self.open();
                self.write_values(value)?;
                self.close(')')
            }
            ComponentValue::Block { token, value } => {
                let (open, close) = match token {
                    '{' => (CSSToken::LeftBrace, '}'),
                    '[' => (CSSToken::LeftBracket, ']'),
                    _ => (CSSToken::LeftParen, ')'),
                };
                self.write_token(&open)?;
                self.open();
                self.write_values(value)?;
                self.close(close)
            }
        }
    }

    /// Whitespace right after an opening token is dropped.
    const fn open(&mut self) {
        self.last = None;
        self.pending_space = false;
    }

    fn close(&mut self, c: char) -> Result<(), ParseError> {
        self.pending_space = false;
        self.dest.write_char(c)?;
        self.last = Some(Edge::Other);
        Ok(())
    }

    /// Write one token. Comments are dropped; tokens that the parser never
    /// keeps in a tree are an error.
    pub(crate) fn write_token(&mut self, token: &CSSToken) -> Result<(), ParseError> {
        match token {
            CSSToken::Whitespace => {
                self.pending_space = true;
                return Ok(());
            }
            CSSToken::Comment(_) => return Ok(()),
            CSSToken::BadString | CSSToken::BadUrl | CSSToken::EOF => {
                return Err(ParseError::serialize(format!("{token} cannot be serialized")));
            }
            _ => {}
        }

        let (start, end) = edges(token);
        self.separate(start)?;

        match token {
            CSSToken::Ident(value) => serialize_identifier(value, self.dest)?,
            CSSToken::Function(name) => {
                serialize_identifier(name, self.dest)?;
                self.dest.write_char('(')?;
            }
            CSSToken::AtKeyword(name) => {
                self.dest.write_char('@')?;
                serialize_identifier(name, self.dest)?;
            }
            CSSToken::Hash { value, .. } => {
                self.dest.write_char('#')?;
                serialize_name(value, self.dest)?;
            }
            CSSToken::String(value) => serialize_string(value, self.dest)?,
            CSSToken::Url(value) => {
                self.dest.write_str("url(")?;
                serialize_url(value, self.dest)?;
                self.dest.write_char(')')?;
            }
            // "\" followed by a newline is not a valid escape, so it stays a delim.
            CSSToken::Delim('\\') => self.dest.write_str("\\\n")?,
            CSSToken::Delim(c) => self.dest.write_char(*c)?,
            CSSToken::Number {
                value,
                int_value,
                numeric_type,
                ..
            } => serialize_number(*value, *int_value, *numeric_type, self.dest)?,
            CSSToken::Percentage {
                value,
                int_value,
                numeric_type,
            } => {
                serialize_number(*value, *int_value, *numeric_type, self.dest)?;
                self.dest.write_char('%')?;
            }
            CSSToken::Dimension {
                value,
                int_value,
                numeric_type,
                unit,
            } => {
                serialize_number(*value, *int_value, *numeric_type, self.dest)?;
                serialize_unit(unit, self.dest)?;
            }
            CSSToken::CDO => self.dest.write_str("<!--")?,
            CSSToken::CDC => self.dest.write_str("-->")?,
            CSSToken::Colon => self.dest.write_char(':')?,
            CSSToken::Semicolon => self.dest.write_char(';')?,
            CSSToken::Comma => self.dest.write_char(',')?,
            CSSToken::LeftBracket => self.dest.write_char('[')?,
            CSSToken::RightBracket => self.dest.write_char(']')?,
            CSSToken::LeftParen => self.dest.write_char('(')?,
            CSSToken::RightParen => self.dest.write_char(')')?,
            CSSToken::LeftBrace => self.dest.write_char('{')?,
            CSSToken::RightBrace => self.dest.write_char('}')?,
            CSSToken::Whitespace
            | CSSToken::Comment(_)
            | CSSToken::BadString
            | CSSToken::BadUrl
            | CSSToken::EOF => {}
        }

        self.last = Some(end);
        Ok(())
    }

    /// Emit a pending space, or an empty comment when the previous token
    /// would merge with one starting at `next`.
    fn separate(&mut self, next: Edge) -> Result<(), ParseError> {
        if self.pending_space {
            self.pending_space = false;
            if self.last.is_some_and(|last| last != Edge::BackslashNewline) {
                self.dest.write_char(' ')?;
                self.last = Some(Edge::Whitespace);
            }
        }
        if let Some(last) = self.last
            && needs_comment(last, next)
        {
            self.dest.write_str("/**/")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::CSSTokenizer;

    fn rewrite(input: &str) -> String {
        let values: Vec<ComponentValue> = CSSTokenizer::new(input)
            .map(|token| token.value)
            .filter(|token| !token.is_eof())
            .map(ComponentValue::Token)
            .collect();
        let mut out = String::new();
        TokenWriter::new(&mut out).write_values(&values).unwrap();
        out
    }

    #[test]
    fn whitespace_collapses_and_trims() {
        assert_eq!(rewrite("  a \n\t b  "), "a b");
    }

    #[test]
    fn whitespace_inside_functions_is_trimmed() {
        let value = ComponentValue::Function {
            name: "rgb".to_owned(),
            value: vec![
                ComponentValue::Token(CSSToken::Whitespace),
                ComponentValue::Token(CSSToken::ident("a")),
                ComponentValue::Token(CSSToken::Whitespace),
            ],
        };
        let mut out = String::new();
        TokenWriter::new(&mut out).write_value(&value).unwrap();
        assert_eq!(out, "rgb(a)");
    }

    #[test]
    fn comments_keep_tokens_apart() {
        assert_eq!(rewrite("a/**/b"), "a/**/b");
        assert_eq!(rewrite("1/**/2"), "1/**/2");
        assert_eq!(rewrite("a/* x */(b)"), "a/**/(b)");
        assert_eq!(rewrite("#/**/x"), "#/**/x");
        assert_eq!(rewrite("a, b"), "a, b");
    }

    #[test]
    fn backslash_delim_survives() {
        assert_eq!(rewrite("a \\\nb"), "a \\\nb");
        assert_eq!(rewrite("a \\\n b"), "a \\\nb");
    }

    #[test]
    fn bad_tokens_are_rejected() {
        let mut out = String::new();
        let error = TokenWriter::new(&mut out)
            .write_token(&CSSToken::BadUrl)
            .unwrap_err();
        assert_eq!(error.kind, crate::diagnostics::ErrorKind::SerializeError);
    }
}
