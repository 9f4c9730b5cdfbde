//! The rule tree produced by [`CSSParser`](super::CSSParser).

use quill_common::Position;
use serde::Serialize;

use super::arena::{RuleArena, RuleId};
use crate::diagnostics::Release;
use crate::selector::SelectorList;
use crate::tokenizer::CSSToken;

/// [§ 5.4.6 Consume a declaration](https://www.w3.org/TR/css-syntax-3/#consume-declaration)
///
/// A CSS declaration (e.g., `color: red`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Declaration {
    /// The property name. ASCII-lowercased unless it is a custom property.
    pub name: String,
    /// The property value as component values, trimmed and without the
    /// `!important` annotation.
    pub value: Vec<ComponentValue>,
    /// Whether the declaration has `!important`.
    pub important: bool,
    /// Position of the property name.
    pub position: Position,
}

impl Declaration {
    /// Returns true for `--*` custom properties.
    #[must_use]
    pub fn is_custom_property(&self) -> bool {
        self.name.starts_with("--")
    }
}

/// [§ 5.4.8 Consume a component value](https://www.w3.org/TR/css-syntax-3/#consume-component-value)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ComponentValue {
    /// A preserved token.
    Token(CSSToken),
    /// A function with its contents.
    Function {
        /// The function name.
        name: String,
        /// The function arguments.
        value: Vec<ComponentValue>,
    },
    /// A simple block.
    Block {
        /// The opening token character: `{`, `[` or `(`.
        token: char,
        /// The block contents.
        value: Vec<ComponentValue>,
    },
}

impl ComponentValue {
    /// Returns true if this is a whitespace token.
    #[must_use]
    pub const fn is_whitespace(&self) -> bool {
        matches!(self, Self::Token(CSSToken::Whitespace))
    }

    /// The preserved token, if this is one.
    #[must_use]
    pub const fn as_token(&self) -> Option<&CSSToken> {
        match self {
            Self::Token(token) => Some(token),
            _ => None,
        }
    }

    /// Returns true if this value, or anything nested in it, is a
    /// bad-string or bad-url token.
    #[must_use]
    pub fn contains_bad_token(&self) -> bool {
        match self {
            Self::Token(token) => token.is_bad(),
            Self::Function { value, .. } | Self::Block { value, .. } => {
                value.iter().any(Self::contains_bad_token)
            }
        }
    }
}

/// Strip leading and trailing whitespace tokens from a list of values.
pub(crate) fn trim_whitespace(mut values: Vec<ComponentValue>) -> Vec<ComponentValue> {
    while values.last().is_some_and(ComponentValue::is_whitespace) {
        let _ = values.pop();
    }
    let leading = values
        .iter()
        .take_while(|value| value.is_whitespace())
        .count();
    let _ = values.drain(..leading);
    values
}

/// [§ 5.4.3 Consume a qualified rule](https://www.w3.org/TR/css-syntax-3/#consume-qualified-rule)
///
/// A CSS style rule (selector + declarations).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleRule {
    /// The selectors of this rule.
    pub selectors: SelectorList,
    /// The declarations in this rule block.
    pub declarations: Vec<Declaration>,
    /// Position of the first prelude token.
    pub position: Position,
}

/// [§ 5.4.2 Consume an at-rule](https://www.w3.org/TR/css-syntax-3/#consume-at-rule)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtRule {
    /// The at-keyword name, without the `@` and ASCII-lowercased.
    pub name: String,
    /// The prelude component values, trimmed.
    pub prelude: Vec<ComponentValue>,
    /// The block, or `None` for statement at-rules ending in `;`.
    pub block: Option<AtRuleBlock>,
    /// Position of the at-keyword.
    pub position: Position,
}

/// The contents of an at-rule block, chosen by the at-rule's name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AtRuleBlock {
    /// Nested rules (`@media`, `@supports`, `@keyframes`, ...).
    Rules(Vec<RuleId>),
    /// Declarations (`@font-face`, `@page`, ...).
    Declarations(Vec<Declaration>),
    /// Unknown at-rules keep their raw contents.
    Values(Vec<ComponentValue>),
}

/// [CSS Animations § 3 Keyframes](https://www.w3.org/TR/css-animations-1/#keyframes)
///
/// "The keyframe selector for a keyframe style rule consists of a
/// comma-separated list of percentage values or the keywords from or to."
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum KeyframeSelector {
    /// `from`, the same as `0%`.
    From,
    /// `to`, the same as `100%`.
    To,
    /// An explicit percentage.
    Percentage(f64),
}

/// One keyframe block inside `@keyframes`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyframeRule {
    /// The keyframe selectors.
    pub selectors: Vec<KeyframeSelector>,
    /// The declarations for this keyframe.
    pub declarations: Vec<Declaration>,
    /// Position of the first selector.
    pub position: Position,
}

/// [§ 5.4.1 Consume a list of rules](https://www.w3.org/TR/css-syntax-3/#consume-list-of-rules)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Rule {
    /// A style rule (qualified rule).
    Style(StyleRule),
    /// An at-rule.
    At(AtRule),
    /// A keyframe inside `@keyframes`.
    Keyframe(KeyframeRule),
}

impl Rule {
    /// Where the rule starts.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Style(rule) => rule.position,
            Self::At(rule) => rule.position,
            Self::Keyframe(rule) => rule.position,
        }
    }

    /// The style rule, if this is one.
    #[must_use]
    pub const fn as_style(&self) -> Option<&StyleRule> {
        match self {
            Self::Style(rule) => Some(rule),
            _ => None,
        }
    }

    /// The at-rule, if this is one.
    #[must_use]
    pub const fn as_at_rule(&self) -> Option<&AtRule> {
        match self {
            Self::At(rule) => Some(rule),
            _ => None,
        }
    }
}

/// [§ 5.3.3 Parse a stylesheet](https://www.w3.org/TR/css-syntax-3/#parse-stylesheet)
///
/// A parsed CSS stylesheet. Owns every rule node through its arena.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Stylesheet {
    arena: RuleArena,
    rules: Vec<RuleId>,
    #[serde(skip)]
    released: bool,
}

impl Stylesheet {
    pub(crate) const fn new(arena: RuleArena, rules: Vec<RuleId>) -> Self {
        Self {
            arena,
            rules,
            released: false,
        }
    }

    /// Ids of the top-level rules, in source order.
    #[must_use]
    pub fn rule_ids(&self) -> &[RuleId] {
        &self.rules
    }

    /// The top-level rules, in source order.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter_map(|&id| self.arena.get(id))
    }

    /// Look up any rule of this stylesheet, nested ones included.
    #[must_use]
    pub fn get(&self, id: RuleId) -> Option<&Rule> {
        self.arena.get(id)
    }

    /// The nested rules of an at-rule with a rule block.
    pub fn children<'a>(&'a self, rule: &'a Rule) -> impl Iterator<Item = &'a Rule> {
        let ids: &[RuleId] = match rule {
            Rule::At(AtRule {
                block: Some(AtRuleBlock::Rules(ids)),
                ..
            }) => ids,
            _ => &[],
        };
        ids.iter().filter_map(|&id| self.arena.get(id))
    }

    /// The arena holding every rule node.
    #[must_use]
    pub const fn arena(&self) -> &RuleArena {
        &self.arena
    }

    /// Number of top-level rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if there are no top-level rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Release for Stylesheet {
    fn release(&mut self) -> bool {
        if self.released {
            return false;
        }
        let _ = self.arena.clear();
        self.rules = Vec::new();
        self.released = true;
        true
    }

    fn is_released(&self) -> bool {
        self.released
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::SelectorList;

    fn empty_rule() -> Rule {
        Rule::Style(StyleRule {
            selectors: SelectorList::new(vec![]),
            declarations: vec![],
            position: Position::START,
        })
    }

    #[test]
    fn release_frees_the_arena_once() {
        let mut arena = RuleArena::new();
        let id = arena.alloc(empty_rule());
        let mut sheet = Stylesheet::new(arena, vec![id]);
        assert_eq!(sheet.rules().count(), 1);

        assert!(sheet.release());
        assert!(sheet.is_released());
        assert!(sheet.arena().is_empty());
        assert!(sheet.get(id).is_none());
        assert!(!sheet.release());
    }

    #[test]
    fn trim_whitespace_strips_both_ends() {
        let ws = ComponentValue::Token(CSSToken::Whitespace);
        let red = ComponentValue::Token(CSSToken::ident("red"));
        let trimmed = trim_whitespace(vec![ws.clone(), red.clone(), ws.clone(), ws]);
        assert_eq!(trimmed, vec![red]);
    }
}
