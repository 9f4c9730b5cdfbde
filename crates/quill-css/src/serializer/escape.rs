//! [CSSOM § 2.1 Common Serializing Idioms](https://drafts.csswg.org/cssom/#common-serializing-idioms)

use core::fmt::{self, Write};
use core::num::FpCategory;

use crate::tokenizer::NumericType;

/// "To escape a character means to create a string of "\" (U+005C),
/// followed by the character."
fn escape_char<W: Write>(c: char, dest: &mut W) -> fmt::Result {
    dest.write_char('\\')?;
    dest.write_char(c)
}

/// "To escape a character as code point means to create a string of "\"
/// (U+005C), followed by the Unicode code point as the smallest possible
/// number of hexadecimal digits in the range 0-9 a-f (U+0030 to U+0039 and
/// U+0061 to U+0066) to represent the code point in base 16, followed by a
/// single SPACE (U+0020)."
fn escape_code_point<W: Write>(c: char, dest: &mut W) -> fmt::Result {
    write!(dest, "\\{:x} ", u32::from(c))
}

const fn is_control(c: char) -> bool {
    matches!(c, '\u{1}'..='\u{1f}' | '\u{7f}')
}

/// "To serialize an identifier means to create a string represented by the
/// concatenation of, for each character of the identifier:"
pub fn serialize_identifier<W: Write>(ident: &str, dest: &mut W) -> fmt::Result {
    let first = ident.chars().next();
    let length = ident.chars().count();

    for (index, c) in ident.chars().enumerate() {
        match c {
            // "If the character is NULL (U+0000), then the REPLACEMENT CHARACTER (U+FFFD)."
            '\0' => dest.write_char('\u{FFFD}')?,
            // "If the character is in the range [\1-\1f] (U+0001 to U+001F) or is
            // U+007F, then the character escaped as code point."
            c if is_control(c) => escape_code_point(c, dest)?,
            // "If the character is the first character and is in the range [0-9]
            // (U+0030 to U+0039), then the character escaped as code point."
            c if index == 0 && c.is_ascii_digit() => escape_code_point(c, dest)?,
            // "If the character is the second character and is in the range [0-9]
            // (U+0030 to U+0039) and the first character is a "-" (U+002D), then
            // the character escaped as code point."
            c if index == 1 && c.is_ascii_digit() && first == Some('-') => {
                escape_code_point(c, dest)?;
            }
            // "If the character is the first character and is a "-" (U+002D), and
            // there is no second character, then the escaped character."
            '-' if index == 0 && length == 1 => escape_char('-', dest)?,
            // "If the character is not handled by one of the above rules and is
            // greater than or equal to U+0080, is "-" (U+002D) or "_" (U+005F), or
            // is in one of the ranges [0-9] (U+0030 to U+0039), [A-Z] (U+0041 to
            // U+005A), or [a-z] (U+0061 to U+007A), then the character itself."
            c if !c.is_ascii() || c == '-' || c == '_' || c.is_ascii_alphanumeric() => {
                dest.write_char(c)?;
            }
            // "Otherwise, the escaped character."
            c => escape_char(c, dest)?,
        }
    }
    Ok(())
}

/// The identifier rules without the leading-digit cases, for the value of
/// a hash token.
pub fn serialize_name<W: Write>(name: &str, dest: &mut W) -> fmt::Result {
    for c in name.chars() {
        match c {
            '\0' => dest.write_char('\u{FFFD}')?,
            c if is_control(c) => escape_code_point(c, dest)?,
            c if !c.is_ascii() || c == '-' || c == '_' || c.is_ascii_alphanumeric() => {
                dest.write_char(c)?;
            }
            c => escape_char(c, dest)?,
        }
    }
    Ok(())
}

/// "To serialize a string means to create a string represented by '"'
/// (U+0022), followed by the result of applying the rules below to each
/// character of the given string, followed by '"' (U+0022):"
pub fn serialize_string<W: Write>(value: &str, dest: &mut W) -> fmt::Result {
    dest.write_char('"')?;
    for c in value.chars() {
        match c {
            '\0' => dest.write_char('\u{FFFD}')?,
            c if is_control(c) => escape_code_point(c, dest)?,
            '"' | '\\' => escape_char(c, dest)?,
            c => dest.write_char(c)?,
        }
    }
    dest.write_char('"')
}

/// The contents of an unquoted `url(...)` token.
///
/// "[§ 4.3.6 Consume a url token] ... U+0022 QUOTATION MARK ("), U+0027
/// APOSTROPHE ('), U+0028 LEFT PARENTHESIS (() or non-printable code point:
/// This is a parse error." Those, whitespace, `)` and `\` are escaped.
pub fn serialize_url<W: Write>(url: &str, dest: &mut W) -> fmt::Result {
    for c in url.chars() {
        match c {
            '\0' => dest.write_char('\u{FFFD}')?,
            c if is_control(c) || c == ' ' || c == '\u{b}' => escape_code_point(c, dest)?,
            '(' | ')' | '"' | '\'' | '\\' => escape_char(c, dest)?,
            c => dest.write_char(c)?,
        }
    }
    Ok(())
}

/// Write a numeric value so that it tokenizes back to the same value.
pub fn serialize_number<W: Write>(
    value: f64,
    int_value: Option<i64>,
    numeric_type: NumericType,
    dest: &mut W,
) -> fmt::Result {
    match (numeric_type, int_value) {
        (NumericType::Integer, Some(int)) => write!(dest, "{int}"),
        // Also turns -0 into 0.
        _ if value.classify() == FpCategory::Zero => dest.write_char('0'),
        _ => write!(dest, "{value}"),
    }
}

/// The unit of a dimension. A unit that starts like an exponent (`e3`,
/// `e-3`) gets its first letter escaped so `1\65 3` stays a dimension.
pub fn serialize_unit<W: Write>(unit: &str, dest: &mut W) -> fmt::Result {
    let mut chars = unit.chars();
    match (chars.next(), chars.next()) {
        (Some(e @ ('e' | 'E')), Some(next))
            if next.is_ascii_digit() || next == '-' || next == '+' =>
        {
            escape_code_point(e, dest)?;
            serialize_identifier(&unit[1..], dest)
        }
        _ => serialize_identifier(unit, dest),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(input: &str) -> String {
        let mut out = String::new();
        serialize_identifier(input, &mut out).unwrap();
        out
    }

    fn string(input: &str) -> String {
        let mut out = String::new();
        serialize_string(input, &mut out).unwrap();
        out
    }

    #[test]
    fn identifiers() {
        assert_eq!(ident("red"), "red");
        assert_eq!(ident("-"), "\\-");
        assert_eq!(ident("--x"), "--x");
        assert_eq!(ident("1a"), "\\31 a");
        assert_eq!(ident("-1a"), "-\\31 a");
        assert_eq!(ident("a.b"), "a\\.b");
        assert_eq!(ident("a\u{7f}"), "a\\7f ");
        assert_eq!(ident("\u{e9}t\u{e9}"), "\u{e9}t\u{e9}");
        assert_eq!(ident("a\0"), "a\u{FFFD}");
    }

    #[test]
    fn strings() {
        assert_eq!(string("x"), "\"x\"");
        assert_eq!(string("a\"b\\c"), "\"a\\\"b\\\\c\"");
        assert_eq!(string("line\nbreak"), "\"line\\a break\"");
        assert_eq!(string("it's"), "\"it's\"");
    }

    #[test]
    fn urls() {
        let mut out = String::new();
        serialize_url("a b(c)'", &mut out).unwrap();
        assert_eq!(out, "a\\20 b\\(c\\)\\'");
    }

    #[test]
    fn numbers() {
        let mut out = String::new();
        serialize_number(-0.0, None, NumericType::Number, &mut out).unwrap();
        serialize_number(1.5, None, NumericType::Number, &mut out).unwrap();
        serialize_number(7.0, Some(7), NumericType::Integer, &mut out).unwrap();
        assert_eq!(out, "01.57");
    }

    #[test]
    fn exponent_like_units() {
        let mut out = String::new();
        serialize_unit("e3", &mut out).unwrap();
        assert_eq!(out, "\\65 3");
        out.clear();
        serialize_unit("em", &mut out).unwrap();
        assert_eq!(out, "em");
    }
}
