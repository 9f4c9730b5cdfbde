//! Byte decoding and input preprocessing.
//!
//! [§ 3.2 The input byte stream](https://www.w3.org/TR/css-syntax-3/#input-byte-stream)
//! and [§ 3.3 Preprocessing the input stream](https://www.w3.org/TR/css-syntax-3/#input-preprocessing).
//!
//! Only UTF-8 (and its ASCII subset) is accepted. The decoded text is
//! preprocessed once, and a [`SourceText`] keeps the code points together
//! with the byte offsets and line starts needed to attach positions and
//! spans to tokens.

use quill_common::Position;

use crate::diagnostics::{Diagnostic, ParseError};
use crate::options::ParserOptions;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const UTF16_BE_BOM: &[u8] = b"\xFE\xFF";
const UTF16_LE_BOM: &[u8] = b"\xFF\xFE";

/// Labels that denote an encoding whose ASCII-only content we can read.
const UTF8_LABELS: &[&str] = &[
    "utf-8",
    "utf8",
    "unicode-1-1-utf-8",
    "unicode11utf8",
    "unicode20utf8",
    "x-unicode20utf8",
];

/// Decoded, preprocessed input.
#[derive(Debug, Clone)]
pub(crate) struct SourceText {
    chars: Vec<char>,
    /// `byte_offsets[i]` is the UTF-8 offset of `chars[i]`; one extra entry
    /// holds the total length.
    byte_offsets: Vec<usize>,
    /// Char index of the first code point of every line.
    line_starts: Vec<usize>,
}

impl SourceText {
    /// Preprocess already-decoded text.
    pub(crate) fn new(text: &str) -> Self {
        let mut chars = Vec::with_capacity(text.len());
        let mut iter = text.chars().peekable();
        // "Replace any U+000D CARRIAGE RETURN (CR) code points, U+000C FORM FEED (FF)
        // code points, or pairs of U+000D CARRIAGE RETURN (CR) followed by U+000A
        // LINE FEED (LF) in input by a single U+000A LINE FEED (LF) code point."
        // "Replace any U+0000 NULL or surrogate code points in input with U+FFFD
        // REPLACEMENT CHARACTER."
        while let Some(c) = iter.next() {
            match c {
                '\r' => {
                    if iter.peek() == Some(&'\n') {
                        let _ = iter.next();
                    }
                    chars.push('\n');
                }
                '\x0C' => chars.push('\n'),
                '\0' => chars.push('\u{FFFD}'),
                c => chars.push(c),
            }
        }

        let mut byte_offsets = Vec::with_capacity(chars.len() + 1);
        let mut line_starts = vec![0];
        let mut offset = 0;
        for (index, &c) in chars.iter().enumerate() {
            byte_offsets.push(offset);
            offset += c.len_utf8();
            if c == '\n' {
                line_starts.push(index + 1);
            }
        }
        byte_offsets.push(offset);

        Self {
            chars,
            byte_offsets,
            line_starts,
        }
    }

    pub(crate) fn chars(&self) -> &[char] {
        &self.chars
    }

    pub(crate) fn len(&self) -> usize {
        self.chars.len()
    }

    /// Byte offset of the code point at `index`; `len()` maps to the end.
    pub(crate) fn byte_offset(&self, index: usize) -> usize {
        let last = self.byte_offsets.len() - 1;
        self.byte_offsets[index.min(last)]
    }

    /// Line and column of the code point at `index`.
    pub(crate) fn position(&self, index: usize) -> Position {
        let line = self.line_starts.partition_point(|&start| start <= index);
        let line_start = self.line_starts[line.saturating_sub(1)];
        Position::new(to_u32(line), to_u32(index - line_start + 1))
    }
}

/// Decode a byte stream into preprocessed text.
///
/// Returns the text plus any warnings produced by lossy decoding.
pub(crate) fn decode(
    bytes: &[u8],
    options: &ParserOptions,
) -> Result<(SourceText, Vec<Diagnostic>), ParseError> {
    if bytes.starts_with(UTF16_BE_BOM) || bytes.starts_with(UTF16_LE_BOM) {
        return Err(ParseError::lex(
            Position::START,
            "UTF-16 input is not supported",
        ));
    }
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    if let Some(label) = charset_label(bytes) {
        let label = label.to_ascii_lowercase();
        let is_utf8 = UTF8_LABELS.contains(&label.as_str());
        if !is_utf8 && !bytes.is_ascii() {
            return Err(ParseError::lex(
                Position::START,
                format!("declared charset \"{label}\" does not match the UTF-8 input"),
            ));
        }
    }

    let mut warnings = Vec::new();
    let text = match core::str::from_utf8(bytes) {
        Ok(text) => SourceText::new(text),
        Err(error) if !options.lossy_decoding => {
            let valid = &bytes[..error.valid_up_to()];
            let valid = core::str::from_utf8(valid).unwrap_or_default();
            return Err(ParseError::lex(
                end_position(valid),
                "input is not valid UTF-8",
            ));
        }
        Err(_) => {
            let mut text = String::with_capacity(bytes.len());
            for chunk in bytes.utf8_chunks() {
                text.push_str(chunk.valid());
                if !chunk.invalid().is_empty() {
                    warnings.push(Diagnostic::warning(
                        end_position(&text),
                        "invalid UTF-8 replaced with U+FFFD",
                    ));
                    text.push('\u{FFFD}');
                }
            }
            SourceText::new(&text)
        }
    };
    Ok((text, warnings))
}

/// [§ 3.2 Determine the fallback encoding](https://www.w3.org/TR/css-syntax-3/#determine-the-fallback-encoding)
///
/// "If the first 1024 bytes of the stream begin with the hex sequence
/// 40 63 68 61 72 73 65 74 20 22 XX* 22 3B ... then get an encoding for
/// the sequence of XX bytes."
fn charset_label(bytes: &[u8]) -> Option<String> {
    const PREFIX: &[u8] = b"@charset \"";
    let head = &bytes[..bytes.len().min(1024)];
    let rest = head.strip_prefix(PREFIX)?;
    let end = rest.windows(2).position(|pair| pair == b"\";")?;
    Some(String::from_utf8_lossy(&rest[..end]).trim().to_owned())
}

/// Position just past the end of `text`, counted the way [`SourceText`]
/// counts after preprocessing.
fn end_position(text: &str) -> Position {
    let source = SourceText::new(text);
    source.position(source.len())
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::ErrorKind;

    #[test]
    fn preprocessing_normalizes_newlines_and_nul() {
        let source = SourceText::new("a\r\nb\rc\x0Cd\0");
        let text: String = source.chars().iter().collect();
        assert_eq!(text, "a\nb\nc\nd\u{FFFD}");
    }

    #[test]
    fn positions_count_lines_and_code_points() {
        let source = SourceText::new("ab\n\u{e9}c");
        assert_eq!(source.position(0), Position::new(1, 1));
        assert_eq!(source.position(2), Position::new(1, 3));
        assert_eq!(source.position(3), Position::new(2, 1));
        assert_eq!(source.position(4), Position::new(2, 2));
        assert_eq!(source.position(5), Position::new(2, 3));
        assert_eq!(source.byte_offset(4), 5);
        assert_eq!(source.byte_offset(5), 6);
    }

    #[test]
    fn utf8_bom_is_stripped() {
        let (source, warnings) = decode(b"\xEF\xBB\xBFa{}", &ParserOptions::new()).unwrap();
        assert_eq!(source.chars()[0], 'a');
        assert!(warnings.is_empty());
    }

    #[test]
    fn utf16_bom_is_rejected() {
        let error = decode(b"\xFF\xFEa\0", &ParserOptions::new()).unwrap_err();
        assert_eq!(error.kind, ErrorKind::LexError);
    }

    #[test]
    fn invalid_utf8_reports_line_and_column() {
        let error = decode(b"a{}\nb{c:\xFF}", &ParserOptions::new()).unwrap_err();
        assert_eq!(error.kind, ErrorKind::LexError);
        assert_eq!(error.position(), Position::new(2, 5));
    }

    #[test]
    fn lossy_decoding_warns_instead() {
        let options = ParserOptions::new().with_lossy_decoding(true);
        let (source, warnings) = decode(b"a\xFFb", &options).unwrap();
        assert_eq!(source.chars(), &['a', '\u{FFFD}', 'b']);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].position, Position::new(1, 2));
    }

    #[test]
    fn conflicting_charset_is_rejected() {
        let input = "@charset \"iso-8859-1\"; a::after { content: \"\u{e9}\" }";
        let error = decode(input.as_bytes(), &ParserOptions::new()).unwrap_err();
        assert_eq!(error.kind, ErrorKind::LexError);

        let ascii = b"@charset \"iso-8859-1\"; a { color: red }";
        assert!(decode(ascii, &ParserOptions::new()).is_ok());

        let utf8 = "@charset \"UTF-8\"; a { content: \"\u{e9}\" }";
        assert!(decode(utf8.as_bytes(), &ParserOptions::new()).is_ok());
    }
}
