//! Selector grammar per [Selectors Level 4 § 18](https://www.w3.org/TR/selectors-4/#grammar).
//!
//! Selectors are parsed from component values rather than raw tokens, so
//! functional pseudo-classes and attribute selectors arrive already grouped
//! into functions and `[ ]` blocks.

use quill_common::Position;

use super::nth;
use super::{
    AttributeOperator, AttributeSelector, CaseSensitivity, Combinator, LEGACY_PSEUDO_ELEMENTS,
    NthSelector, PseudoArgument, PseudoClass, PseudoElement, Selector, SelectorComponent,
    SelectorList,
};
use crate::diagnostics::ParseError;
use crate::options::ResourceBudget;
use crate::parser::{ComponentValue, trim_whitespace};
use crate::tokenizer::{CSSToken, HashType};

/// A read position over a slice of component values.
///
/// Top-level preludes carry the position of every value; inside functions
/// and blocks only the position of the enclosing value is known.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Cursor<'v> {
    values: &'v [ComponentValue],
    positions: &'v [Position],
    fallback: Position,
    index: usize,
}

impl<'v> Cursor<'v> {
    pub(crate) const fn new(
        values: &'v [ComponentValue],
        positions: &'v [Position],
        fallback: Position,
    ) -> Self {
        Self {
            values,
            positions,
            fallback,
            index: 0,
        }
    }

    const fn nested(values: &'v [ComponentValue], fallback: Position) -> Self {
        Self::new(values, &[], fallback)
    }

    fn peek(&self) -> Option<&'v ComponentValue> {
        self.values.get(self.index)
    }

    fn peek_token(&self) -> Option<&'v CSSToken> {
        self.peek().and_then(ComponentValue::as_token)
    }

    fn peek_token_at(&self, offset: usize) -> Option<&'v CSSToken> {
        self.values
            .get(self.index + offset)
            .and_then(ComponentValue::as_token)
    }

    fn next(&mut self) -> Option<&'v ComponentValue> {
        let value = self.peek()?;
        self.index += 1;
        Some(value)
    }

    const fn advance(&mut self, count: usize) {
        self.index += count;
    }

    fn at_end(&self) -> bool {
        self.index >= self.values.len()
    }

    fn position(&self) -> Position {
        self.positions
            .get(self.index)
            .or_else(|| self.positions.last())
            .copied()
            .unwrap_or(self.fallback)
    }

    /// Skip whitespace, returning true if any was skipped.
    fn skip_whitespace(&mut self) -> bool {
        let start = self.index;
        while self.peek().is_some_and(ComponentValue::is_whitespace) {
            self.index += 1;
        }
        self.index > start
    }

    fn combinator(&self) -> Option<Combinator> {
        match self.peek_token()? {
            CSSToken::Delim('>') => Some(Combinator::Child),
            CSSToken::Delim('+') => Some(Combinator::NextSibling),
            CSSToken::Delim('~') => Some(Combinator::SubsequentSibling),
            _ => None,
        }
    }

    /// The unread values as a cursor of their own.
    fn rest(&self) -> Self {
        let positions = self.positions.get(self.index..).unwrap_or(&[]);
        let fallback = self.position();
        Self::new(&self.values[self.index.min(self.values.len())..], positions, fallback)
    }

    /// Split the unread values at top-level commas.
    fn split_commas(&self) -> Vec<Self> {
        let rest = self.rest();
        let mut segments = Vec::new();
        let mut start = 0;
        for (index, value) in rest.values.iter().enumerate() {
            if matches!(value, ComponentValue::Token(CSSToken::Comma)) {
                segments.push(rest.slice(start, index));
                start = index + 1;
            }
        }
        segments.push(rest.slice(start, rest.values.len()));
        segments
    }

    fn slice(&self, start: usize, end: usize) -> Self {
        let positions = self.positions.get(start..end).unwrap_or(&[]);
        let fallback = self
            .positions
            .get(start)
            .or_else(|| self.positions.get(start.saturating_sub(1)))
            .copied()
            .unwrap_or(self.fallback);
        Self::new(&self.values[start..end], positions, fallback)
    }
}

/// Parses selector lists, charging every component to a [`ResourceBudget`].
pub(crate) struct SelectorParser<'b> {
    budget: &'b mut ResourceBudget,
}

impl<'b> SelectorParser<'b> {
    pub(crate) const fn new(budget: &'b mut ResourceBudget) -> Self {
        Self { budget }
    }

    /// [§ 4.1 Selector lists](https://www.w3.org/TR/selectors-4/#grouping)
    ///
    /// "A selector list is a comma-separated list of selectors."
    /// Any invalid selector makes the whole list invalid.
    pub(crate) fn parse_list(&mut self, cursor: Cursor<'_>) -> Result<SelectorList, ParseError> {
        self.parse_list_with(cursor, false)
    }

    fn parse_list_with(
        &mut self,
        cursor: Cursor<'_>,
        relative: bool,
    ) -> Result<SelectorList, ParseError> {
        let mut selectors = Vec::new();
        for segment in cursor.split_commas() {
            selectors.push(self.parse_complex(segment, relative)?);
        }
        Ok(SelectorList::new(selectors))
    }

    /// [§ 4.3 Complex selectors](https://www.w3.org/TR/selectors-4/#complex)
    ///
    /// With `relative` set this parses a
    /// [relative selector](https://www.w3.org/TR/selectors-4/#relative), which
    /// may begin with a combinator.
    fn parse_complex(
        &mut self,
        mut cursor: Cursor<'_>,
        relative: bool,
    ) -> Result<Selector, ParseError> {
        let mut components = Vec::new();
        let _ = cursor.skip_whitespace();
        if cursor.at_end() {
            return Err(ParseError::syntax(cursor.position(), "expected a selector"));
        }

        if relative && let Some(combinator) = cursor.combinator() {
            let position = cursor.position();
            self.push(&mut components, SelectorComponent::Combinator(combinator), position)?;
            cursor.advance(1);
            let _ = cursor.skip_whitespace();
        }

        loop {
            let start = cursor.position();
            let first = components.len();
            self.parse_compound(&mut cursor, &mut components)?;
            if components.len() == first {
                let message = cursor.peek().map_or_else(
                    || "expected a selector".to_owned(),
                    |value| format!("unexpected {} in selector", describe(value)),
                );
                return Err(ParseError::syntax(start, message));
            }

            let had_whitespace = cursor.skip_whitespace();
            if cursor.at_end() {
                break;
            }

            let position = cursor.position();
            let combinator = if let Some(combinator) = cursor.combinator() {
                cursor.advance(1);
                let _ = cursor.skip_whitespace();
                combinator
            } else if had_whitespace {
                Combinator::Descendant
            } else {
                let message = cursor.peek().map_or_else(String::new, describe);
                return Err(ParseError::syntax(
                    position,
                    format!("unexpected {message} in selector"),
                ));
            };

            if components[first..]
                .iter()
                .any(|component| matches!(component, SelectorComponent::PseudoElement(_)))
            {
                return Err(ParseError::syntax(
                    position,
                    "a combinator cannot follow a pseudo-element",
                ));
            }
            if cursor.at_end() {
                return Err(ParseError::syntax(position, "selector ends with a combinator"));
            }
            self.push(&mut components, SelectorComponent::Combinator(combinator), position)?;
        }

        Ok(Selector { components })
    }

    /// [§ 4.2 Compound selectors](https://www.w3.org/TR/selectors-4/#compound)
    ///
    /// "A compound selector is a sequence of simple selectors that are not
    /// separated by a combinator... If it contains a type selector or
    /// universal selector, that selector must come first in the sequence."
    fn parse_compound(
        &mut self,
        cursor: &mut Cursor<'_>,
        out: &mut Vec<SelectorComponent>,
    ) -> Result<(), ParseError> {
        // STEP 1: Optional type or universal selector.
        let position = cursor.position();
        match cursor.peek_token() {
            Some(CSSToken::Ident(name)) => {
                cursor.advance(1);
                self.push(out, SelectorComponent::Type(name.clone()), position)?;
            }
            Some(CSSToken::Delim('*')) => {
                cursor.advance(1);
                self.push(out, SelectorComponent::Universal, position)?;
            }
            _ => {}
        }
        if cursor.peek_token().is_some_and(|token| token.is_delim('|')) {
            return Err(ParseError::syntax(
                cursor.position(),
                "namespace prefixes are not supported",
            ));
        }

        // STEP 2: Subclass selectors, pseudo-elements and the pseudo-classes
        // that may follow them.
        let mut after_pseudo_element = false;
        loop {
            let position = cursor.position();
            let component = match cursor.peek() {
                Some(ComponentValue::Token(CSSToken::Hash { value, hash_type })) => {
                    if *hash_type != HashType::Id {
                        return Err(ParseError::syntax(
                            position,
                            format!("'#{value}' is not a valid ID selector"),
                        ));
                    }
                    cursor.advance(1);
                    SelectorComponent::Id(value.clone())
                }
                Some(ComponentValue::Token(CSSToken::Delim('.'))) => {
                    cursor.advance(1);
                    match cursor.next() {
                        Some(ComponentValue::Token(CSSToken::Ident(name))) => {
                            SelectorComponent::Class(name.clone())
                        }
                        _ => {
                            return Err(ParseError::syntax(
                                position,
                                "expected a class name after '.'",
                            ));
                        }
                    }
                }
                Some(ComponentValue::Block { token: '[', value }) => {
                    cursor.advance(1);
                    SelectorComponent::Attribute(parse_attribute(value, position)?)
                }
                Some(ComponentValue::Token(CSSToken::Colon)) => {
                    cursor.advance(1);
                    if cursor.peek_token() == Some(&CSSToken::Colon) {
                        cursor.advance(1);
                        SelectorComponent::PseudoElement(parse_pseudo_element(cursor, position)?)
                    } else {
                        self.parse_pseudo_class(cursor, position)?
                    }
                }
                Some(ComponentValue::Token(CSSToken::Ident(_) | CSSToken::Delim('*'))) => {
                    return Err(ParseError::syntax(
                        position,
                        "a type selector must come first in a compound selector",
                    ));
                }
                Some(ComponentValue::Token(CSSToken::Delim('&'))) => {
                    return Err(ParseError::syntax(
                        position,
                        "the nesting selector is not supported",
                    ));
                }
                _ => return Ok(()),
            };

            match &component {
                SelectorComponent::PseudoElement(_) => after_pseudo_element = true,
                SelectorComponent::PseudoClass(_) => {}
                _ if after_pseudo_element => {
                    return Err(ParseError::syntax(
                        position,
                        "only pseudo-classes may follow a pseudo-element",
                    ));
                }
                _ => {}
            }
            self.push(out, component, position)?;
        }
    }

    /// [§ 3.5 Pseudo-classes](https://www.w3.org/TR/selectors-4/#pseudo-classes)
    ///
    /// Called after a single `:`. The CSS 2 pseudo-elements written with one
    /// colon come back as [`SelectorComponent::PseudoElement`].
    fn parse_pseudo_class(
        &mut self,
        cursor: &mut Cursor<'_>,
        position: Position,
    ) -> Result<SelectorComponent, ParseError> {
        match cursor.next() {
            Some(ComponentValue::Token(CSSToken::Ident(name))) => {
                let name = name.to_ascii_lowercase();
                if LEGACY_PSEUDO_ELEMENTS.contains(&name.as_str()) {
                    Ok(SelectorComponent::PseudoElement(PseudoElement {
                        name,
                        argument: None,
                    }))
                } else {
                    Ok(SelectorComponent::PseudoClass(PseudoClass {
                        name,
                        argument: None,
                    }))
                }
            }
            Some(ComponentValue::Function { name, value }) => {
                let name = name.to_ascii_lowercase();
                self.budget.enter(position)?;
                let argument = self.parse_pseudo_argument(&name, value, position);
                self.budget.leave();
                Ok(SelectorComponent::PseudoClass(PseudoClass {
                    name,
                    argument: Some(argument?),
                }))
            }
            _ => Err(ParseError::syntax(
                position,
                "expected a pseudo-class name after ':'",
            )),
        }
    }

    fn parse_pseudo_argument(
        &mut self,
        name: &str,
        value: &[ComponentValue],
        position: Position,
    ) -> Result<PseudoArgument, ParseError> {
        let cursor = Cursor::nested(value, position);
        match name {
            // [§ 4.2 :is()](https://www.w3.org/TR/selectors-4/#matches)
            // [§ 4.3 :not()](https://www.w3.org/TR/selectors-4/#negation)
            // [§ 4.4 :where()](https://www.w3.org/TR/selectors-4/#zero-matches)
            "not" | "is" | "where" | "matches" | "any" | "-webkit-any" | "-moz-any" => {
                Ok(PseudoArgument::Selectors(self.parse_list_with(cursor, false)?))
            }
            // [§ 4.5 :has()](https://www.w3.org/TR/selectors-4/#relational)
            "has" => Ok(PseudoArgument::Relative(self.parse_list_with(cursor, true)?)),
            // [§ 14.4 :nth-child()](https://www.w3.org/TR/selectors-4/#the-nth-child-pseudo)
            "nth-child" | "nth-last-child" => {
                Ok(PseudoArgument::Nth(self.parse_nth(cursor, true)?))
            }
            "nth-of-type" | "nth-last-of-type" | "nth-col" | "nth-last-col" => {
                Ok(PseudoArgument::Nth(self.parse_nth(cursor, false)?))
            }
            _ => Ok(PseudoArgument::Raw(trim_whitespace(value.to_vec()))),
        }
    }

    /// "The :nth-child(An+B [of S]?) pseudo-class notation..."
    fn parse_nth(
        &mut self,
        mut cursor: Cursor<'_>,
        allow_of: bool,
    ) -> Result<NthSelector, ParseError> {
        let _ = cursor.skip_whitespace();
        let position = cursor.position();
        let ((a, b), consumed) = nth::parse_an_plus_b(&cursor.values[cursor.index..])
            .map_err(|message| ParseError::syntax(position, message))?;
        cursor.advance(consumed);
        let _ = cursor.skip_whitespace();
        if cursor.at_end() {
            return Ok(NthSelector { a, b, of: None });
        }

        match cursor.peek_token() {
            Some(CSSToken::Ident(of)) if allow_of && of.eq_ignore_ascii_case("of") => {
                cursor.advance(1);
                let of = self.parse_list_with(cursor.rest(), false)?;
                Ok(NthSelector { a, b, of: Some(of) })
            }
            _ => Err(ParseError::syntax(
                cursor.position(),
                "unexpected tokens after An+B",
            )),
        }
    }

    fn push(
        &mut self,
        out: &mut Vec<SelectorComponent>,
        component: SelectorComponent,
        position: Position,
    ) -> Result<(), ParseError> {
        self.budget.count(position)?;
        out.push(component);
        Ok(())
    }
}

/// [§ 3.6 Pseudo-elements](https://www.w3.org/TR/selectors-4/#pseudo-elements)
///
/// Called after `::`.
fn parse_pseudo_element(
    cursor: &mut Cursor<'_>,
    position: Position,
) -> Result<PseudoElement, ParseError> {
    match cursor.next() {
        Some(ComponentValue::Token(CSSToken::Ident(name))) => Ok(PseudoElement {
            name: name.to_ascii_lowercase(),
            argument: None,
        }),
        Some(ComponentValue::Function { name, value }) => Ok(PseudoElement {
            name: name.to_ascii_lowercase(),
            argument: Some(trim_whitespace(value.clone())),
        }),
        _ => Err(ParseError::syntax(
            position,
            "expected a pseudo-element name after '::'",
        )),
    }
}

/// [§ 6.4 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
///
/// Parses the contents of a `[ ]` block:
/// `name [operator (ident | string) [i | s]?]?`
fn parse_attribute(
    values: &[ComponentValue],
    position: Position,
) -> Result<AttributeSelector, ParseError> {
    let mut cursor = Cursor::nested(values, position);
    let _ = cursor.skip_whitespace();

    // STEP 1: The attribute name.
    let name = match cursor.next() {
        Some(ComponentValue::Token(CSSToken::Ident(name))) => name.clone(),
        _ => return Err(ParseError::syntax(position, "expected an attribute name")),
    };
    // `[ns|attr]` but not `[attr|=value]`
    if cursor.peek_token().is_some_and(|token| token.is_delim('|'))
        && !cursor.peek_token_at(1).is_some_and(|token| token.is_delim('='))
    {
        return Err(ParseError::syntax(
            position,
            "namespace prefixes are not supported",
        ));
    }
    let _ = cursor.skip_whitespace();
    if cursor.at_end() {
        return Ok(AttributeSelector {
            name,
            matcher: None,
            case: None,
        });
    }

    // STEP 2: The operator. Two-character operators arrive as two delims.
    let operator = match cursor.next().and_then(ComponentValue::as_token) {
        Some(CSSToken::Delim('=')) => AttributeOperator::Equals,
        Some(CSSToken::Delim(c @ ('~' | '|' | '^' | '$' | '*')))
            if cursor.peek_token().is_some_and(|token| token.is_delim('=')) =>
        {
            cursor.advance(1);
            match c {
                '~' => AttributeOperator::Includes,
                '|' => AttributeOperator::DashMatch,
                '^' => AttributeOperator::Prefix,
                '$' => AttributeOperator::Suffix,
                _ => AttributeOperator::Substring,
            }
        }
        _ => return Err(ParseError::syntax(position, "expected an attribute operator")),
    };
    let _ = cursor.skip_whitespace();

    // STEP 3: The value.
    let value = match cursor.next().and_then(ComponentValue::as_token) {
        Some(CSSToken::Ident(value) | CSSToken::String(value)) => value.clone(),
        _ => return Err(ParseError::syntax(position, "expected an attribute value")),
    };
    let _ = cursor.skip_whitespace();

    // STEP 4: The optional case-sensitivity flag.
    let case = match cursor.next().and_then(ComponentValue::as_token) {
        None => None,
        Some(CSSToken::Ident(flag)) if flag.eq_ignore_ascii_case("i") => {
            Some(CaseSensitivity::AsciiInsensitive)
        }
        Some(CSSToken::Ident(flag)) if flag.eq_ignore_ascii_case("s") => {
            Some(CaseSensitivity::Sensitive)
        }
        Some(_) => return Err(ParseError::syntax(position, "invalid attribute selector")),
    };
    let _ = cursor.skip_whitespace();
    if !cursor.at_end() {
        return Err(ParseError::syntax(position, "invalid attribute selector"));
    }

    Ok(AttributeSelector {
        name,
        matcher: Some((operator, value)),
        case,
    })
}

fn describe(value: &ComponentValue) -> String {
    match value {
        ComponentValue::Token(token) => token.to_string(),
        ComponentValue::Function { name, .. } => format!("function {name}()"),
        ComponentValue::Block { token, .. } => format!("'{token}' block"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ParserOptions;
    use crate::parser::CSSParser;
    use crate::tokenizer::CSSTokenizer;

    fn parse(input: &str) -> Result<SelectorList, ParseError> {
        let mut parser = CSSParser::new(CSSTokenizer::new(input));
        parser.parse_selector_list()
    }

    #[test]
    fn compound_with_every_subclass() {
        let list = parse("a.b#c[d]:hover::before").unwrap();
        let selector = &list.selectors()[0];
        assert_eq!(selector.components.len(), 6);
        assert!(selector.has_pseudo_element());
    }

    #[test]
    fn relative_selectors_only_inside_has() {
        assert!(parse("> a").is_err());
        let list = parse("a:has(> b, + c)").unwrap();
        match &list.selectors()[0].components[1] {
            SelectorComponent::PseudoClass(PseudoClass {
                argument: Some(PseudoArgument::Relative(inner)),
                ..
            }) => {
                assert_eq!(inner.len(), 2);
                assert!(inner.selectors()[0].is_relative());
            }
            other => panic!("Expected :has(), got {other:?}"),
        }
    }

    #[test]
    fn combinator_after_pseudo_element_is_rejected() {
        assert!(parse("a::before > b").is_err());
        assert!(parse("a::before:hover").is_ok());
        assert!(parse("a::before.b").is_err());
    }

    #[test]
    fn nested_depth_is_budgeted() {
        let input = format!("{}a{}", ":not(".repeat(8), ")".repeat(8));
        let options = ParserOptions::new().with_max_depth(4);
        let mut parser = CSSParser::with_options(CSSTokenizer::new(&input), options);
        let error = parser.parse_selector_list().unwrap_err();
        assert_eq!(error.kind, crate::diagnostics::ErrorKind::ResourceLimitExceeded);
    }
}
