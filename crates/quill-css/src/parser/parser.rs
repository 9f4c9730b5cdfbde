//! CSS Parser per [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing).
//!
//! "The input to the parsing stage is a stream of tokens from the tokenization stage."
//!
//! The parser pulls tokens lazily from any iterator of [`Token`]s, skips
//! comments, and never gives up on malformed rules: it records a warning,
//! skips to the next rule boundary and keeps going. Only resource limits
//! abort a stylesheet parse.

use core::iter::Peekable;

use quill_common::Position;
use strum_macros::{Display, EnumIter};

use super::arena::{RuleArena, RuleId};
use super::types::{
    AtRule, AtRuleBlock, ComponentValue, Declaration, KeyframeRule, KeyframeSelector, Rule,
    StyleRule, Stylesheet, trim_whitespace,
};
use crate::diagnostics::{Diagnostic, ErrorKind, ParseError};
use crate::options::{ParserOptions, ResourceBudget};
use crate::selector::SelectorList;
use crate::selector::parser::{Cursor, SelectorParser};
use crate::tokenizer::{CSSToken, Token};

/// Where the parser is in the rule grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum ParserState {
    /// Between rules.
    Start,
    /// Collecting a rule prelude.
    ReadingPrelude,
    /// Inside a rule block.
    ReadingBlock,
    /// Skipping malformed input up to the next rule boundary.
    Recovering,
    /// Input exhausted.
    End,
}

/// Which kind of rule list is being consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleContext {
    /// The stylesheet itself.
    TopLevel,
    /// The block of a conditional group rule such as `@media`.
    Nested,
    /// The block of `@keyframes`.
    Keyframes,
}

/// How an at-rule's block is parsed, chosen by its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AtRuleKind {
    Rules,
    Keyframes,
    Declarations,
    Values,
}

impl AtRuleKind {
    fn of(name: &str) -> Self {
        match strip_vendor_prefix(name) {
            "media" | "supports" | "document" | "layer" | "container" | "scope"
            | "starting-style" => Self::Rules,
            "keyframes" => Self::Keyframes,
            "font-face" | "page" | "counter-style" | "property" | "font-palette-values"
            | "viewport" => Self::Declarations,
            _ => Self::Values,
        }
    }
}

/// `-webkit-keyframes` → `keyframes`
fn strip_vendor_prefix(name: &str) -> &str {
    name.strip_prefix('-')
        .and_then(|rest| rest.split_once('-'))
        .map_or(name, |(_, base)| base)
}

/// CSS parser
pub struct CSSParser<I: Iterator<Item = Token>> {
    tokens: Peekable<I>,
    budget: ResourceBudget,
    arena: RuleArena,
    warnings: Vec<Diagnostic>,
    state: ParserState,
    /// Position of the last consumed token, used when the input ends
    /// without an EOF token.
    last_position: Position,
}

impl<I: Iterator<Item = Token>> CSSParser<I> {
    /// Create a new parser with default options.
    pub fn new(tokens: I) -> Self {
        Self::with_options(tokens, ParserOptions::default())
    }

    /// Create a new parser with the given options.
    pub fn with_options(tokens: I, options: ParserOptions) -> Self {
        Self {
            tokens: tokens.peekable(),
            budget: ResourceBudget::new(&options),
            arena: RuleArena::new(),
            warnings: Vec::new(),
            state: ParserState::Start,
            last_position: Position::START,
        }
    }

    /// The current grammar state.
    #[must_use]
    pub const fn state(&self) -> ParserState {
        self.state
    }

    /// Warnings recorded so far.
    #[must_use]
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// Move the recorded warnings out of the parser.
    pub fn take_warnings(&mut self) -> Vec<Diagnostic> {
        core::mem::take(&mut self.warnings)
    }

    /// [§ 5.3.3 Parse a stylesheet](https://www.w3.org/TR/css-syntax-3/#parse-stylesheet)
    ///
    /// "To parse a stylesheet from input..."
    ///
    /// # Errors
    ///
    /// Returns `ResourceLimitExceeded` when nesting or the node count passes
    /// the configured limits. Malformed rules only produce warnings.
    pub fn parse_stylesheet(&mut self) -> Result<Stylesheet, ParseError> {
        // "Consume a list of rules from input, with the top-level flag set."
        let rules = self.consume_list_of_rules(RuleContext::TopLevel)?;
        self.state = ParserState::End;
        Ok(Stylesheet::new(core::mem::take(&mut self.arena), rules))
    }

    /// [§ 4.1 Selector lists](https://www.w3.org/TR/selectors-4/#grouping)
    ///
    /// Parse the whole input as one selector list.
    ///
    /// # Errors
    ///
    /// Returns `SyntaxError` if the input is empty, holds only whitespace,
    /// or any selector in the list is invalid, and `ResourceLimitExceeded`
    /// when the configured limits are passed.
    pub fn parse_selector_list(&mut self) -> Result<SelectorList, ParseError> {
        self.state = ParserState::ReadingPrelude;
        let start = self.peek_position();
        let mut values = Vec::new();
        let mut positions = Vec::new();
        while self.peek().is_some() {
            positions.push(self.peek_position());
            if let Some(value) = self.consume_component_value()? {
                values.push(value);
            }
        }
        self.state = ParserState::End;

        if values.iter().all(ComponentValue::is_whitespace) {
            return Err(ParseError::syntax(start, "expected a selector"));
        }
        if values.iter().any(ComponentValue::contains_bad_token) {
            return Err(ParseError::syntax(start, "malformed string or url in selector"));
        }
        SelectorParser::new(&mut self.budget).parse_list(Cursor::new(&values, &positions, start))
    }

    /// [§ 5.4.1 Consume a list of rules](https://www.w3.org/TR/css-syntax-3/#consume-list-of-rules)
    ///
    /// Nested lists end at the `}` closing their block, which is consumed.
    fn consume_list_of_rules(&mut self, context: RuleContext) -> Result<Vec<RuleId>, ParseError> {
        // "Create an initially empty list of rules."
        let mut rules = Vec::new();

        loop {
            self.state = ParserState::Start;
            match self.peek() {
                // "<whitespace-token>"
                // "Do nothing."
                Some(CSSToken::Whitespace) => {
                    let _ = self.consume();
                }

                // "<EOF-token>"
                // "Return the list of rules."
                None => {
                    if context != RuleContext::TopLevel {
                        let position = self.peek_position();
                        self.warn(position, "unexpected end of input in at-rule block");
                    }
                    return Ok(rules);
                }

                Some(CSSToken::RightBrace) if context != RuleContext::TopLevel => {
                    let _ = self.consume();
                    return Ok(rules);
                }

                // "<CDO-token>" or "<CDC-token>"
                // "If the top-level flag is set, do nothing."
                Some(CSSToken::CDO | CSSToken::CDC) if context == RuleContext::TopLevel => {
                    let _ = self.consume();
                }

                // "<at-keyword-token>"
                // "Reconsume the current input token. Consume an at-rule, and append
                // the returned value to the list of rules."
                Some(CSSToken::AtKeyword(_)) => {
                    if let Some(id) = self.consume_at_rule(context)? {
                        rules.push(id);
                    }
                }

                // "anything else"
                // "Reconsume the current input token. Consume a qualified rule. If
                // anything is returned, append it to the list of rules."
                Some(token) if can_start_rule(context, token) => {
                    if let Some(id) = self.consume_qualified_rule(context)? {
                        rules.push(id);
                    }
                }

                Some(_) => self.recover(context)?,
            }
        }
    }

    /// Skip input that cannot begin a rule.
    ///
    /// Tokens are dropped (blocks and functions as a whole) until whitespace,
    /// a `;` or a closed `{}` block is followed by something that can start a
    /// rule. An at-keyword always ends recovery. One warning covers the whole
    /// skipped segment.
    fn recover(&mut self, context: RuleContext) -> Result<(), ParseError> {
        self.state = ParserState::Recovering;
        let start = self.peek_position();
        let mut at_boundary = false;

        loop {
            match self.peek() {
                None | Some(CSSToken::AtKeyword(_)) => break,
                Some(CSSToken::RightBrace) if context != RuleContext::TopLevel => break,
                Some(token) if at_boundary && can_start_rule(context, token) => break,
                Some(CSSToken::Whitespace | CSSToken::Semicolon | CSSToken::RightBrace) => {
                    let _ = self.consume();
                    at_boundary = true;
                }
                Some(CSSToken::LeftBrace) => {
                    let _ = self.consume_component_value()?;
                    at_boundary = true;
                }
                Some(_) => {
                    let _ = self.consume_component_value()?;
                    at_boundary = false;
                }
            }
        }

        self.warn(start, "skipped invalid input up to the next rule");
        self.state = ParserState::Start;
        Ok(())
    }

    /// [§ 5.4.2 Consume an at-rule](https://www.w3.org/TR/css-syntax-3/#consume-at-rule)
    fn consume_at_rule(&mut self, context: RuleContext) -> Result<Option<RuleId>, ParseError> {
        self.state = ParserState::ReadingPrelude;
        let position = self.peek_position();

        // "Consume the next input token."
        let Some(Token {
            value: CSSToken::AtKeyword(name),
            ..
        }) = self.consume()
        else {
            return Ok(None);
        };
        let name = name.to_ascii_lowercase();
        // Nested rules are allocated before their parent.
        let first_child = self.arena.len();

        // "Create a new at-rule with its name set to the value of the current input
        // token, its prelude initially set to an empty list, and its value initially
        // set to nothing."
        let mut prelude = Vec::new();
        let block = loop {
            match self.peek() {
                // "<semicolon-token>"
                // "Return the at-rule."
                Some(CSSToken::Semicolon) => {
                    let _ = self.consume();
                    break None;
                }

                // "<EOF-token>"
                // "This is a parse error. Return the at-rule."
                None => {
                    self.warn(position, format!("unexpected end of input in @{name}"));
                    break None;
                }

                Some(CSSToken::RightBrace) if context != RuleContext::TopLevel => {
                    self.warn(position, format!("unterminated @{name}"));
                    break None;
                }

                // "<{-token>"
                // "Consume a simple block and assign it to the at-rule's block.
                // Return the at-rule."
                Some(CSSToken::LeftBrace) => break Some(self.consume_at_rule_block(&name)?),

                // "anything else"
                // "Reconsume the current input token. Consume a component value.
                // Append the returned value to the at-rule's prelude."
                Some(_) => {
                    if let Some(value) = self.consume_component_value()? {
                        prelude.push(value);
                    }
                }
            }
        };

        self.budget.count(position)?;
        let malformed = prelude.iter().any(ComponentValue::contains_bad_token)
            || matches!(&block, Some(AtRuleBlock::Values(values))
                if values.iter().any(ComponentValue::contains_bad_token));
        if malformed {
            self.warn(position, format!("malformed string or url in @{name}; rule dropped"));
            self.arena.truncate(first_child);
            return Ok(None);
        }

        let rule = Rule::At(AtRule {
            name,
            prelude: trim_whitespace(prelude),
            block,
            position,
        });
        Ok(Some(self.arena.alloc(rule)))
    }

    /// Consume the `{ ... }` of an at-rule using the grammar its name implies.
    fn consume_at_rule_block(&mut self, name: &str) -> Result<AtRuleBlock, ParseError> {
        self.state = ParserState::ReadingBlock;
        let position = self.peek_position();
        let _ = self.consume(); // {
        self.budget.enter(position)?;

        let block = match AtRuleKind::of(name) {
            AtRuleKind::Rules => {
                AtRuleBlock::Rules(self.consume_list_of_rules(RuleContext::Nested)?)
            }
            AtRuleKind::Keyframes => {
                AtRuleBlock::Rules(self.consume_list_of_rules(RuleContext::Keyframes)?)
            }
            AtRuleKind::Declarations => {
                AtRuleBlock::Declarations(self.consume_declaration_block()?)
            }
            AtRuleKind::Values => {
                let value = self.consume_block_contents(&CSSToken::RightBrace)?;
                AtRuleBlock::Values(trim_whitespace(value))
            }
        };

        self.budget.leave();
        Ok(block)
    }

    /// [§ 5.4.3 Consume a qualified rule](https://www.w3.org/TR/css-syntax-3/#consume-qualified-rule)
    fn consume_qualified_rule(
        &mut self,
        context: RuleContext,
    ) -> Result<Option<RuleId>, ParseError> {
        self.state = ParserState::ReadingPrelude;
        let position = self.peek_position();

        // "Create a new qualified rule with its prelude initially set to an empty list,
        // and its value initially set to nothing."
        let mut prelude = Vec::new();
        let mut positions = Vec::new();

        loop {
            match self.peek() {
                // "<EOF-token>"
                // "This is a parse error. Return nothing."
                None => {
                    self.warn(position, "unexpected end of input before '{'; rule dropped");
                    return Ok(None);
                }

                // "<{-token>"
                // "Consume a simple block and assign it to the qualified rule's block.
                // Return the qualified rule."
                Some(CSSToken::LeftBrace) => break,

                Some(CSSToken::RightBrace) if context != RuleContext::TopLevel => {
                    self.warn(position, "unexpected '}' in rule prelude; rule dropped");
                    return Ok(None);
                }

                // "anything else"
                // "Reconsume the current input token. Consume a component value.
                // Append the returned value to the qualified rule's prelude."
                Some(_) => {
                    positions.push(self.peek_position());
                    if let Some(value) = self.consume_component_value()? {
                        prelude.push(value);
                    }
                }
            }
        }

        self.state = ParserState::ReadingBlock;
        let block_position = self.peek_position();
        let _ = self.consume(); // {
        self.budget.enter(block_position)?;
        let declarations = self.consume_declaration_block()?;
        self.budget.leave();
        self.budget.count(position)?;

        let rule = if context == RuleContext::Keyframes {
            let Some(selectors) = parse_keyframe_selectors(&prelude) else {
                self.warn(position, "invalid keyframe selector; rule dropped");
                return Ok(None);
            };
            Rule::Keyframe(KeyframeRule {
                selectors,
                declarations,
                position,
            })
        } else {
            if prelude.iter().any(ComponentValue::contains_bad_token) {
                self.warn(position, "malformed string or url in selector; rule dropped");
                return Ok(None);
            }
            let cursor = Cursor::new(&prelude, &positions, position);
            match SelectorParser::new(&mut self.budget).parse_list(cursor) {
                Ok(selectors) => Rule::Style(StyleRule {
                    selectors,
                    declarations,
                    position,
                }),
                Err(error) if error.kind == ErrorKind::SyntaxError => {
                    let message = format!("{}; rule dropped", error.message());
                    self.warn(error.position(), message);
                    return Ok(None);
                }
                Err(error) => return Err(error),
            }
        };

        Ok(Some(self.arena.alloc(rule)))
    }

    /// [§ 5.4.5 Consume a list of declarations](https://www.w3.org/TR/css-syntax-3/#consume-list-of-declarations)
    ///
    /// Called after the opening `{`; consumes up to and including the closing `}`.
    fn consume_declaration_block(&mut self) -> Result<Vec<Declaration>, ParseError> {
        let mut declarations = Vec::new();

        loop {
            match self.peek() {
                // "<whitespace-token>" or "<semicolon-token>"
                // "Do nothing."
                Some(CSSToken::Whitespace | CSSToken::Semicolon) => {
                    let _ = self.consume();
                }

                // "<EOF-token>"
                // "Return the list of declarations."
                None => {
                    let position = self.peek_position();
                    self.warn(position, "unexpected end of input in declaration block");
                    return Ok(declarations);
                }

                Some(CSSToken::RightBrace) => {
                    let _ = self.consume();
                    return Ok(declarations);
                }

                // "<at-keyword-token>"
                // "Reconsume the current input token. Consume an at-rule. Append the
                // returned rule to the list of declarations."
                Some(CSSToken::AtKeyword(_)) => {
                    let position = self.peek_position();
                    self.skip_at_rule()?;
                    self.warn(position, "at-rule inside a declaration block skipped");
                }

                // "<ident-token>"
                // "Consume a declaration. If anything was returned, append it to
                // the list of declarations."
                Some(CSSToken::Ident(_)) => {
                    if let Some(declaration) = self.consume_declaration()? {
                        declarations.push(declaration);
                    }
                }

                // "anything else"
                // "This is a parse error. Reconsume the current input token. As long as
                // the next input token is anything other than a <semicolon-token> or
                // <EOF-token>, consume a component value and throw away the returned value."
                Some(_) => {
                    let position = self.peek_position();
                    let _ = self.consume_until_semicolon()?;
                    self.warn(position, "invalid declaration skipped");
                }
            }
        }
    }

    /// Drop an at-rule found where only declarations are allowed.
    fn skip_at_rule(&mut self) -> Result<(), ParseError> {
        let _ = self.consume(); // at-keyword
        loop {
            match self.peek() {
                None | Some(CSSToken::RightBrace) => return Ok(()),
                Some(CSSToken::Semicolon) => {
                    let _ = self.consume();
                    return Ok(());
                }
                Some(CSSToken::LeftBrace) => {
                    let _ = self.consume_component_value()?;
                    return Ok(());
                }
                Some(_) => {
                    let _ = self.consume_component_value()?;
                }
            }
        }
    }

    /// [§ 5.4.6 Consume a declaration](https://www.w3.org/TR/css-syntax-3/#consume-declaration)
    fn consume_declaration(&mut self) -> Result<Option<Declaration>, ParseError> {
        let position = self.peek_position();
        let values = self.consume_until_semicolon()?;
        self.budget.count(position)?;

        let mut values = values.into_iter();
        let Some(ComponentValue::Token(CSSToken::Ident(name))) = values.next() else {
            return Ok(None);
        };
        let mut rest: Vec<ComponentValue> = values.collect();

        // "While the next input token is a <whitespace-token>, consume the next input token."
        // "If the next input token is anything other than a <colon-token>, this is a parse error.
        // Return nothing."
        let colon = rest.iter().position(|value| !value.is_whitespace());
        let Some(colon) = colon.filter(|&index| {
            matches!(rest.get(index), Some(ComponentValue::Token(CSSToken::Colon)))
        }) else {
            self.warn(position, format!("expected ':' after '{name}'; declaration skipped"));
            return Ok(None);
        };
        let value = rest.split_off(colon + 1);

        let name = if name.starts_with("--") {
            name
        } else {
            name.to_ascii_lowercase()
        };

        // Check for !important
        let important = check_important(&value);
        let value = if important { trim_important(value) } else { value };
        let value = trim_whitespace(value);

        if value.is_empty() && !name.starts_with("--") {
            self.warn(position, format!("empty value for '{name}'; declaration skipped"));
            return Ok(None);
        }
        if value.iter().any(ComponentValue::contains_bad_token) {
            self.warn(position, format!("malformed value for '{name}'; declaration skipped"));
            return Ok(None);
        }

        Ok(Some(Declaration {
            name,
            value,
            important,
            position,
        }))
    }

    /// Consume component values up to, but not including, the next `;`,
    /// the `}` closing the current block, or EOF.
    fn consume_until_semicolon(&mut self) -> Result<Vec<ComponentValue>, ParseError> {
        let mut values = Vec::new();
        while !matches!(
            self.peek(),
            None | Some(CSSToken::Semicolon | CSSToken::RightBrace)
        ) {
            if let Some(value) = self.consume_component_value()? {
                values.push(value);
            }
        }
        Ok(values)
    }

    /// [§ 5.4.8 Consume a component value](https://www.w3.org/TR/css-syntax-3/#consume-component-value)
    fn consume_component_value(&mut self) -> Result<Option<ComponentValue>, ParseError> {
        let position = self.peek_position();
        let Some(token) = self.consume() else {
            return Ok(None);
        };
        self.budget.count(position)?;

        let value = match token.value {
            // "<{-token>", "<[-token>", "<(-token>"
            // "Consume a simple block and return it."
            CSSToken::LeftBrace => self.consume_simple_block('{', &CSSToken::RightBrace, position)?,
            CSSToken::LeftBracket => {
                self.consume_simple_block('[', &CSSToken::RightBracket, position)?
            }
            CSSToken::LeftParen => self.consume_simple_block('(', &CSSToken::RightParen, position)?,

            // "<function-token>"
            // "Consume a function and return it."
            CSSToken::Function(name) => {
                self.budget.enter(position)?;
                let value = self.consume_block_contents(&CSSToken::RightParen)?;
                self.budget.leave();
                ComponentValue::Function { name, value }
            }

            // "anything else"
            // "Return the current input token."
            other => ComponentValue::Token(other),
        };
        Ok(Some(value))
    }

    /// [§ 5.4.9 Consume a simple block](https://www.w3.org/TR/css-syntax-3/#consume-simple-block)
    fn consume_simple_block(
        &mut self,
        opening: char,
        ending: &CSSToken,
        position: Position,
    ) -> Result<ComponentValue, ParseError> {
        self.budget.enter(position)?;
        let value = self.consume_block_contents(ending)?;
        self.budget.leave();
        Ok(ComponentValue::Block {
            token: opening,
            value,
        })
    }

    /// The contents of a simple block or function.
    ///
    /// Called after the opening token; consumes the matching `ending` token.
    fn consume_block_contents(
        &mut self,
        ending: &CSSToken,
    ) -> Result<Vec<ComponentValue>, ParseError> {
        let mut value = Vec::new();

        loop {
            let next = self.peek().map(|token| token == ending);
            match next {
                // "ending token"
                // "Return the block."
                Some(true) => {
                    let _ = self.consume();
                    return Ok(value);
                }
                // "<EOF-token>"
                // "This is a parse error. Return the block."
                None => {
                    let position = self.peek_position();
                    self.warn(position, "unexpected end of input in block");
                    return Ok(value);
                }
                // "anything else"
                Some(false) => {
                    if let Some(v) = self.consume_component_value()? {
                        value.push(v);
                    }
                }
            }
        }
    }

    fn warn(&mut self, position: Position, message: impl Into<String>) {
        self.warnings.push(Diagnostic::warning(position, message));
    }

    /// Skip comments and return the next token, or `None` at EOF.
    fn peek(&mut self) -> Option<&CSSToken> {
        while self.tokens.peek().is_some_and(|token| token.value.is_comment()) {
            let _ = self.tokens.next();
        }
        self.tokens
            .peek()
            .filter(|token| !token.is_eof())
            .map(|token| &token.value)
    }

    /// Position of the next token, or of the end of input.
    fn peek_position(&mut self) -> Position {
        let _ = self.peek();
        self.tokens
            .peek()
            .map_or(self.last_position, |token| token.position)
    }

    /// Consume the next token. The EOF token is never consumed.
    fn consume(&mut self) -> Option<Token> {
        let _ = self.peek()?;
        let token = self.tokens.next()?;
        self.last_position = token.position;
        Some(token)
    }
}

/// Tokens that can begin a rule in the given context.
fn can_start_rule(context: RuleContext, token: &CSSToken) -> bool {
    match context {
        RuleContext::Keyframes => {
            matches!(token, CSSToken::Ident(_) | CSSToken::Percentage { .. })
        }
        RuleContext::TopLevel | RuleContext::Nested => matches!(
            token,
            CSSToken::Ident(_)
                | CSSToken::Hash { .. }
                | CSSToken::Colon
                | CSSToken::LeftBracket
                | CSSToken::Delim('.' | '*' | '&' | '|')
        ),
    }
}

/// [CSS Animations § 3 Keyframes](https://www.w3.org/TR/css-animations-1/#keyframes)
///
/// `<keyframe-selector> = from | to | <percentage [0,100]>`
fn parse_keyframe_selectors(prelude: &[ComponentValue]) -> Option<Vec<KeyframeSelector>> {
    let mut selectors = Vec::new();
    for segment in prelude.split(|value| matches!(value, ComponentValue::Token(CSSToken::Comma))) {
        let mut values = segment.iter().filter(|value| !value.is_whitespace());
        let selector = match values.next()?.as_token()? {
            CSSToken::Ident(ident) if ident.eq_ignore_ascii_case("from") => KeyframeSelector::From,
            CSSToken::Ident(ident) if ident.eq_ignore_ascii_case("to") => KeyframeSelector::To,
            CSSToken::Percentage { value, .. } if (0.0..=100.0).contains(value) => {
                KeyframeSelector::Percentage(*value)
            }
            _ => return None,
        };
        if values.next().is_some() {
            return None;
        }
        selectors.push(selector);
    }
    Some(selectors)
}

/// Check if the value ends with !important.
///
/// [§ 6.4.2 Important declarations](https://www.w3.org/TR/css-cascade-4/#importance)
///
/// "A declaration is important if it has a !important annotation, i.e.
/// if the last two (non-whitespace, non-comment) tokens in its value are
/// a <delim-token> with the value "!" followed by an <ident-token> with
/// a value that is an ASCII case-insensitive match for "important"."
///
/// STEP 1: Skip trailing whitespace in the value.
/// STEP 2: Check for <ident-token> "important".
/// STEP 3: Skip any whitespace between "!" and "important".
/// STEP 4: Check for <delim-token> "!".
fn check_important(value: &[ComponentValue]) -> bool {
    let mut iter = value.iter().rev().peekable();

    // STEP 1: Skip trailing whitespace
    while iter.next_if(|value| value.is_whitespace()).is_some() {}

    // STEP 2: Check for ident "important"
    match iter.next() {
        Some(ComponentValue::Token(CSSToken::Ident(s))) if s.eq_ignore_ascii_case("important") => {}
        _ => return false,
    }

    // STEP 3: Skip whitespace between ! and important
    while iter.next_if(|value| value.is_whitespace()).is_some() {}

    // STEP 4: Check for !
    matches!(iter.next(), Some(ComponentValue::Token(CSSToken::Delim('!'))))
}

/// Remove the `!important` annotation from a value that
/// [`check_important`] accepted.
///
/// STEP 1: Remove trailing whitespace.
/// STEP 2: Remove "important" ident token.
/// STEP 3: Remove whitespace between ! and important.
/// STEP 4: Remove "!" delim token.
fn trim_important(mut value: Vec<ComponentValue>) -> Vec<ComponentValue> {
    // STEP 1
    while value.last().is_some_and(ComponentValue::is_whitespace) {
        let _ = value.pop();
    }
    // STEP 2
    let _ = value.pop();
    // STEP 3
    while value.last().is_some_and(ComponentValue::is_whitespace) {
        let _ = value.pop();
    }
    // STEP 4
    let _ = value.pop();
    value
}
