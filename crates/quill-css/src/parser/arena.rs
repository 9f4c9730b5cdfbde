//! Arena storage for rule nodes.
//!
//! Every rule of a stylesheet, nested ones included, lives in one
//! [`RuleArena`] owned by the [`Stylesheet`](super::Stylesheet). Parents refer
//! to children through [`RuleId`] indices, so the whole tree is freed in one
//! step by clearing the arena.

use serde::Serialize;

use super::types::Rule;

/// Index of a rule in its [`RuleArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RuleId(pub usize);

impl RuleId {
    /// Returns the raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Flat storage for the rules of one stylesheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RuleArena {
    nodes: Vec<Rule>,
}

impl RuleArena {
    /// Create an empty arena.
    #[must_use]
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Store a rule and return its id.
    pub fn alloc(&mut self, rule: Rule) -> RuleId {
        let id = RuleId(self.nodes.len());
        self.nodes.push(rule);
        id
    }

    /// Look up a rule. Returns `None` for an id from another arena or a
    /// cleared one.
    #[must_use]
    pub fn get(&self, id: RuleId) -> Option<&Rule> {
        self.nodes.get(id.0)
    }

    /// Number of rules stored, nested ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if no rules are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over every stored rule with its id, in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (RuleId, &Rule)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, rule)| (RuleId(index), rule))
    }

    /// Drop every rule allocated at or after index `len`.
    pub fn truncate(&mut self, len: usize) {
        self.nodes.truncate(len);
    }

    /// Drop every rule, returning how many were freed.
    pub fn clear(&mut self) -> usize {
        let freed = self.nodes.len();
        self.nodes = Vec::new();
        freed
    }
}
