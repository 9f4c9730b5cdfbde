//! CSS serializer.
//!
//! Writes parsed trees back out as canonical CSS text. Serializing the
//! result of parsing a serialization gives the same text again.

/// [CSSOM § 2.1](https://drafts.csswg.org/cssom/#common-serializing-idioms) escaping.
pub(crate) mod escape;
/// Token lists with whitespace collapsing and token separation.
pub(crate) mod tokens;

use core::fmt::Write;

use escape::{serialize_identifier, serialize_number, serialize_string};
use tokens::TokenWriter;

use crate::diagnostics::{ParseError, Release};
use crate::parser::{
    AtRuleBlock, ComponentValue, Declaration, KeyframeSelector, Rule, RuleId, Stylesheet,
};
use crate::selector::{
    AttributeSelector, CaseSensitivity, NthSelector, PseudoArgument, PseudoClass,
    PseudoElement, Selector, SelectorComponent, SelectorList,
};
use crate::tokenizer::NumericType;

/// Types that can be written as CSS text.
pub trait ToCss {
    /// Append the CSS text of `self` to `dest`.
    ///
    /// # Errors
    ///
    /// Returns `SerializeError` if the tree holds something the parser never
    /// produces (a bad-string, bad-url or EOF token, or a dangling rule id),
    /// if the root was released, or if `dest` fails.
    fn to_css<W: Write>(&self, dest: &mut W) -> Result<(), ParseError>;

    /// Serialize into a new string.
    ///
    /// # Errors
    ///
    /// See [`ToCss::to_css`].
    fn to_css_string(&self) -> Result<String, ParseError> {
        let mut buf = String::new();
        self.to_css(&mut buf)?;
        Ok(buf)
    }
}

impl ToCss for Stylesheet {
    fn to_css<W: Write>(&self, dest: &mut W) -> Result<(), ParseError> {
        if self.is_released() {
            return Err(ParseError::serialize("stylesheet was already released"));
        }
        for (index, &id) in self.rule_ids().iter().enumerate() {
            if index > 0 {
                dest.write_char('\n')?;
            }
            write_rule(self, id, dest)?;
        }
        Ok(())
    }
}

/// Rules refer to their children through the stylesheet's arena, so they
/// are written through the stylesheet rather than on their own.
fn write_rule<W: Write>(sheet: &Stylesheet, id: RuleId, dest: &mut W) -> Result<(), ParseError> {
    let rule = sheet
        .get(id)
        .ok_or_else(|| ParseError::serialize(format!("rule #{} is not in the arena", id.index())))?;

    match rule {
        Rule::Style(rule) => {
            rule.selectors.to_css(dest)?;
            dest.write_char(' ')?;
            write_declaration_block(&rule.declarations, dest)
        }
        Rule::Keyframe(rule) => {
            for (index, selector) in rule.selectors.iter().enumerate() {
                if index > 0 {
                    dest.write_str(", ")?;
                }
                match selector {
                    KeyframeSelector::From => dest.write_str("from")?,
                    KeyframeSelector::To => dest.write_str("to")?,
                    KeyframeSelector::Percentage(value) => {
                        serialize_number(*value, None, NumericType::Number, dest)?;
                        dest.write_char('%')?;
                    }
                }
            }
            dest.write_char(' ')?;
            write_declaration_block(&rule.declarations, dest)
        }
        Rule::At(rule) => {
            dest.write_char('@')?;
            serialize_identifier(&rule.name, dest)?;
            if !rule.prelude.is_empty() {
                dest.write_char(' ')?;
                TokenWriter::new(dest).write_values(&rule.prelude)?;
            }
            match &rule.block {
                None => dest.write_char(';')?,
                Some(AtRuleBlock::Rules(children)) => {
                    dest.write_str(" {")?;
                    for &child in children {
                        dest.write_char(' ')?;
                        write_rule(sheet, child, dest)?;
                    }
                    dest.write_str(" }")?;
                }
                Some(AtRuleBlock::Declarations(declarations)) => {
                    dest.write_char(' ')?;
                    write_declaration_block(declarations, dest)?;
                }
                Some(AtRuleBlock::Values(values)) => {
                    dest.write_str(" {")?;
                    if !values.is_empty() {
                        dest.write_char(' ')?;
                        TokenWriter::new(dest).write_values(values)?;
                    }
                    dest.write_str(" }")?;
                }
            }
            Ok(())
        }
    }
}

/// `{ name: value; name: value; }`
fn write_declaration_block<W: Write>(
    declarations: &[Declaration],
    dest: &mut W,
) -> Result<(), ParseError> {
    dest.write_char('{')?;
    for declaration in declarations {
        dest.write_char(' ')?;
        declaration.to_css(dest)?;
        dest.write_char(';')?;
    }
    dest.write_str(" }")?;
    Ok(())
}

impl ToCss for Declaration {
    fn to_css<W: Write>(&self, dest: &mut W) -> Result<(), ParseError> {
        serialize_identifier(&self.name, dest)?;
        dest.write_str(": ")?;
        TokenWriter::new(dest).write_values(&self.value)?;
        if self.important {
            dest.write_str(" !important")?;
        }
        Ok(())
    }
}

impl ToCss for ComponentValue {
    fn to_css<W: Write>(&self, dest: &mut W) -> Result<(), ParseError> {
        TokenWriter::new(dest).write_value(self)
    }
}

impl ToCss for SelectorList {
    fn to_css<W: Write>(&self, dest: &mut W) -> Result<(), ParseError> {
        if self.is_released() {
            return Err(ParseError::serialize("selector list was already released"));
        }
        for (index, selector) in self.iter().enumerate() {
            if index > 0 {
                dest.write_str(", ")?;
            }
            selector.to_css(dest)?;
        }
        Ok(())
    }
}

impl ToCss for Selector {
    fn to_css<W: Write>(&self, dest: &mut W) -> Result<(), ParseError> {
        for (index, component) in self.components.iter().enumerate() {
            match component {
                SelectorComponent::Combinator(combinator) => {
                    match (index, combinator.delim()) {
                        (0, None) => {}
                        // A relative selector inside :has() starts with its combinator.
                        (0, Some(delim)) => {
                            dest.write_char(delim)?;
                            dest.write_char(' ')?;
                        }
                        (_, None) => dest.write_char(' ')?,
                        (_, Some(delim)) => write!(dest, " {delim} ")?,
                    }
                }
                component => component.to_css(dest)?,
            }
        }
        Ok(())
    }
}

impl ToCss for SelectorComponent {
    fn to_css<W: Write>(&self, dest: &mut W) -> Result<(), ParseError> {
        match self {
            Self::Type(name) => serialize_identifier(name, dest)?,
            Self::Universal => dest.write_char('*')?,
            Self::Class(name) => {
                dest.write_char('.')?;
                serialize_identifier(name, dest)?;
            }
            Self::Id(name) => {
                dest.write_char('#')?;
                serialize_identifier(name, dest)?;
            }
            Self::Attribute(attribute) => write_attribute(attribute, dest)?,
            Self::PseudoClass(pseudo) => write_pseudo_class(pseudo, dest)?,
            Self::PseudoElement(pseudo) => write_pseudo_element(pseudo, dest)?,
            Self::Combinator(combinator) => match combinator.delim() {
                None => dest.write_char(' ')?,
                Some(delim) => write!(dest, " {delim} ")?,
            },
        }
        Ok(())
    }
}

/// `[name]`, `[name="value"]`, `[name="value" i]`
fn write_attribute<W: Write>(
    attribute: &AttributeSelector,
    dest: &mut W,
) -> Result<(), ParseError> {
    dest.write_char('[')?;
    serialize_identifier(&attribute.name, dest)?;
    if let Some((operator, value)) = &attribute.matcher {
        dest.write_str(operator.as_str())?;
        serialize_string(value, dest)?;
    }
    match attribute.case {
        Some(CaseSensitivity::AsciiInsensitive) => dest.write_str(" i")?,
        Some(CaseSensitivity::Sensitive) => dest.write_str(" s")?,
        None => {}
    }
    dest.write_char(']')?;
    Ok(())
}

fn write_pseudo_class<W: Write>(pseudo: &PseudoClass, dest: &mut W) -> Result<(), ParseError> {
    dest.write_char(':')?;
    serialize_identifier(&pseudo.name, dest)?;
    let Some(argument) = &pseudo.argument else {
        return Ok(());
    };
    dest.write_char('(')?;
    match argument {
        PseudoArgument::Selectors(list) | PseudoArgument::Relative(list) => list.to_css(dest)?,
        PseudoArgument::Nth(nth) => write_nth(nth, dest)?,
        PseudoArgument::Raw(values) => TokenWriter::new(dest).write_values(values)?,
    }
    dest.write_char(')')?;
    Ok(())
}

fn write_pseudo_element<W: Write>(pseudo: &PseudoElement, dest: &mut W) -> Result<(), ParseError> {
    dest.write_str("::")?;
    serialize_identifier(&pseudo.name, dest)?;
    if let Some(values) = &pseudo.argument {
        dest.write_char('(')?;
        TokenWriter::new(dest).write_values(values)?;
        dest.write_char(')')?;
    }
    Ok(())
}

/// [CSS Syntax § 6.3 Serializing <an+b>](https://www.w3.org/TR/css-syntax-3/#serializing-anb)
fn write_nth<W: Write>(nth: &NthSelector, dest: &mut W) -> Result<(), ParseError> {
    let NthSelector { a, b, of } = nth;
    // "If A is zero, return the serialization of B."
    if *a == 0 {
        write!(dest, "{b}")?;
    } else {
        // "If A is 1, append "n" to result."
        // "If A is -1, append "-n" to result."
        // "Otherwise, append the serialization of A followed by "n" to result."
        match a {
            1 => dest.write_char('n')?,
            -1 => dest.write_str("-n")?,
            a => write!(dest, "{a}n")?,
        }
        // "If B is greater than zero, append "+" to result, followed by the
        // serialization of B."
        // "If B is less than zero, append the serialization of B to result."
        match b.signum() {
            1 => write!(dest, "+{b}")?,
            -1 => write!(dest, "{b}")?,
            _ => {}
        }
    }
    if let Some(list) = of {
        dest.write_str(" of ")?;
        list.to_css(dest)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nth(a: i32, b: i32) -> String {
        let mut out = String::new();
        write_nth(&NthSelector { a, b, of: None }, &mut out).unwrap();
        out
    }

    #[test]
    fn nth_canonical_form() {
        assert_eq!(nth(2, 1), "2n+1");
        assert_eq!(nth(2, 0), "2n");
        assert_eq!(nth(1, 0), "n");
        assert_eq!(nth(-1, 3), "-n+3");
        assert_eq!(nth(3, -2), "3n-2");
        assert_eq!(nth(0, 5), "5");
        assert_eq!(nth(0, -5), "-5");
    }

    #[test]
    fn attribute_values_are_quoted() {
        let attribute = SelectorComponent::Attribute(AttributeSelector {
            name: "type".to_owned(),
            matcher: Some((crate::selector::AttributeOperator::Equals, "text".to_owned())),
            case: Some(CaseSensitivity::AsciiInsensitive),
        });
        assert_eq!(attribute.to_css_string().unwrap(), "[type=\"text\" i]");
    }

    #[test]
    fn released_roots_are_rejected() {
        let mut list = SelectorList::new(vec![Selector {
            components: vec![SelectorComponent::Universal],
        }]);
        assert_eq!(list.to_css_string().unwrap(), "*");
        assert!(list.release());
        assert!(list.to_css_string().is_err());
    }

    #[test]
    fn dangling_rule_ids_are_rejected() {
        let sheet = Stylesheet::new(crate::parser::RuleArena::new(), vec![RuleId(3)]);
        let error = sheet.to_css_string().unwrap_err();
        assert_eq!(error.kind, crate::diagnostics::ErrorKind::SerializeError);
    }
}
