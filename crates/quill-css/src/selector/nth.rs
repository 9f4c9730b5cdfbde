//! [§ 6.2 The An+B microsyntax](https://www.w3.org/TR/css-syntax-3/#anb-microsyntax)
//!
//! The An+B notation is tokenized by the regular tokenizer, so `2n+1` arrives
//! as a dimension with unit `n` followed by the number `+1`, and `-n-3` as a
//! single ident. This module reassembles the `(a, b)` pair from those tokens.

use crate::parser::ComponentValue;
use crate::tokenizer::{CSSToken, NumericType};

/// Parse An+B at the start of `values`, which must not begin with whitespace.
///
/// Returns `(a, b)` and the number of values consumed. Trailing values (such
/// as an `of S` clause) are left for the caller.
pub(crate) fn parse_an_plus_b(values: &[ComponentValue]) -> Result<((i32, i32), usize), String> {
    match token_at(values, 0) {
        // "odd" "even"
        Some(CSSToken::Ident(ident)) if ident.eq_ignore_ascii_case("odd") => Ok(((2, 1), 1)),
        Some(CSSToken::Ident(ident)) if ident.eq_ignore_ascii_case("even") => Ok(((2, 0), 1)),

        // "<integer>"
        Some(CSSToken::Number {
            int_value: Some(b),
            numeric_type: NumericType::Integer,
            ..
        }) => Ok(((0, to_i32(*b)?), 1)),

        // "<n-dimension>", "<ndash-dimension>", "<ndashdigit-dimension>"
        Some(CSSToken::Dimension {
            int_value: Some(a),
            numeric_type: NumericType::Integer,
            unit,
            ..
        }) => parse_after_n(values, 1, to_i32(*a)?, unit),

        // "-n", "-n-", "-n-<digits>"
        Some(CSSToken::Ident(ident)) if starts_with_ignore_case(ident, "-n") => {
            parse_after_n(values, 1, -1, &ident[1..])
        }

        // "n", "n-", "n-<digits>"
        Some(CSSToken::Ident(ident)) if starts_with_ignore_case(ident, "n") => {
            parse_after_n(values, 1, 1, ident)
        }

        // "+n" "+n-" "+n-<digits>": the '+' must touch the ident.
        Some(CSSToken::Delim('+')) => match token_at(values, 1) {
            Some(CSSToken::Ident(ident)) if starts_with_ignore_case(ident, "n") => {
                parse_after_n(values, 2, 1, ident)
            }
            _ => Err("expected 'n' after '+' in An+B".to_owned()),
        },

        _ => Err("expected An+B notation".to_owned()),
    }
}

/// Handle the part of an ident or unit that starts with `n`, then the B part.
fn parse_after_n(
    values: &[ComponentValue],
    next: usize,
    a: i32,
    rest: &str,
) -> Result<((i32, i32), usize), String> {
    let rest = rest.to_ascii_lowercase();
    match rest.as_str() {
        "n" => parse_b(values, next, a),
        // "n-" followed by a signless integer
        "n-" => {
            let index = skip_whitespace(values, next);
            let b = signless_integer(values, index)?;
            Ok(((a, negate(b)?), index + 1))
        }
        _ => {
            let digits = rest
                .strip_prefix("n-")
                .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
                .ok_or_else(|| format!("unexpected '{rest}' in An+B"))?;
            let b: i32 = digits.parse().map_err(|_| "An+B offset out of range".to_owned())?;
            Ok(((a, negate(b)?), next))
        }
    }
}

/// The optional `["+" | "-"] B` or signed integer after `An`.
fn parse_b(values: &[ComponentValue], next: usize, a: i32) -> Result<((i32, i32), usize), String> {
    let index = skip_whitespace(values, next);
    match token_at(values, index) {
        // "<signed-integer>"
        Some(CSSToken::Number {
            int_value: Some(b),
            numeric_type: NumericType::Integer,
            signed: true,
            ..
        }) => Ok(((a, to_i32(*b)?), index + 1)),
        Some(CSSToken::Number { .. }) => {
            Err("expected '+' or '-' before the An+B offset".to_owned())
        }
        Some(CSSToken::Delim(sign @ ('+' | '-'))) => {
            let index = skip_whitespace(values, index + 1);
            let b = signless_integer(values, index)?;
            let b = if *sign == '-' { negate(b)? } else { b };
            Ok(((a, b), index + 1))
        }
        _ => Ok(((a, 0), next)),
    }
}

/// "<signless-integer>"
fn signless_integer(values: &[ComponentValue], index: usize) -> Result<i32, String> {
    match token_at(values, index) {
        Some(CSSToken::Number {
            int_value: Some(value),
            numeric_type: NumericType::Integer,
            signed: false,
            ..
        }) => to_i32(*value),
        _ => Err("expected an integer in An+B".to_owned()),
    }
}

fn token_at(values: &[ComponentValue], index: usize) -> Option<&CSSToken> {
    values.get(index).and_then(ComponentValue::as_token)
}

fn skip_whitespace(values: &[ComponentValue], mut index: usize) -> usize {
    while values.get(index).is_some_and(ComponentValue::is_whitespace) {
        index += 1;
    }
    index
}

fn starts_with_ignore_case(ident: &str, prefix: &str) -> bool {
    ident
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn to_i32(value: i64) -> Result<i32, String> {
    i32::try_from(value).map_err(|_| "An+B value out of range".to_owned())
}

fn negate(value: i32) -> Result<i32, String> {
    value
        .checked_neg()
        .ok_or_else(|| "An+B value out of range".to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::CSSTokenizer;

    fn an_plus_b(input: &str) -> Result<(i32, i32), String> {
        let values: Vec<ComponentValue> = CSSTokenizer::new(input)
            .map(|token| token.value)
            .filter(|token| !token.is_eof())
            .map(ComponentValue::Token)
            .collect();
        let ((a, b), consumed) = parse_an_plus_b(&values)?;
        assert_eq!(consumed, values.len(), "trailing tokens in {input:?}");
        Ok((a, b))
    }

    #[test]
    fn keywords() {
        assert_eq!(an_plus_b("odd"), Ok((2, 1)));
        assert_eq!(an_plus_b("EVEN"), Ok((2, 0)));
    }

    #[test]
    fn plain_forms() {
        assert_eq!(an_plus_b("3"), Ok((0, 3)));
        assert_eq!(an_plus_b("-3"), Ok((0, -3)));
        assert_eq!(an_plus_b("n"), Ok((1, 0)));
        assert_eq!(an_plus_b("-n"), Ok((-1, 0)));
        assert_eq!(an_plus_b("+n"), Ok((1, 0)));
        assert_eq!(an_plus_b("2n"), Ok((2, 0)));
    }

    #[test]
    fn offsets() {
        assert_eq!(an_plus_b("2n+1"), Ok((2, 1)));
        assert_eq!(an_plus_b("2n-1"), Ok((2, -1)));
        assert_eq!(an_plus_b("2n - 1"), Ok((2, -1)));
        assert_eq!(an_plus_b("2n + 1"), Ok((2, 1)));
        assert_eq!(an_plus_b("-n+3"), Ok((-1, 3)));
        assert_eq!(an_plus_b("-n-3"), Ok((-1, -3)));
        assert_eq!(an_plus_b("n- 4"), Ok((1, -4)));
        assert_eq!(an_plus_b("+n+2"), Ok((1, 2)));
    }

    #[test]
    fn malformed() {
        assert!(an_plus_b("2.5n").is_err());
        assert!(an_plus_b("+ n").is_err());
        assert!(an_plus_b("2n + -1").is_err());
        assert!(an_plus_b("foo").is_err());
        assert!(an_plus_b("n-x").is_err());
    }

    #[test]
    fn offset_sign_rules() {
        // A bare offset after whitespace needs its own sign.
        assert!(an_plus_b("2n 1").is_err());
        assert!(an_plus_b("n 5").is_err());
        assert_eq!(an_plus_b("2n +1"), Ok((2, 1)));
        // After a '+' or '-' the integer itself must be unsigned.
        assert!(an_plus_b("2n + +1").is_err());
        assert!(an_plus_b("2n- +1").is_err());
        assert!(an_plus_b("2n- -1").is_err());
    }
}
