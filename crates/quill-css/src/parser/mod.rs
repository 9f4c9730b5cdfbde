//! CSS parser module.

/// Arena storage for rule nodes.
pub mod arena;
/// CSS parser implementation per [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing).
#[allow(clippy::module_inception)]
pub mod parser;
/// The rule tree.
pub mod types;

pub use arena::{RuleArena, RuleId};
pub use parser::{CSSParser, ParserState};
pub(crate) use types::trim_whitespace;
pub use types::{
    AtRule, AtRuleBlock, ComponentValue, Declaration, KeyframeRule, KeyframeSelector, Rule,
    StyleRule, Stylesheet,
};
