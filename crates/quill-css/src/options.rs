//! Per-call parser configuration.

use quill_common::Position;

use crate::diagnostics::ParseError;

/// Options accepted by every parse entry point.
///
/// # Example
/// ```
/// use quill_css::ParserOptions;
///
/// let options = ParserOptions::new().with_max_depth(32).with_lossy_decoding(true);
/// assert_eq!(options.max_depth, 32);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Deepest allowed nesting of blocks, functions, nested at-rules and
    /// selector arguments.
    pub max_depth: usize,
    /// Largest allowed number of rules, declarations, component values and
    /// selector components in one tree.
    pub max_nodes: usize,
    /// Replace invalid UTF-8 with U+FFFD instead of failing.
    pub lossy_decoding: bool,
    /// Also print every warning to stderr.
    pub log_warnings: bool,
}

impl ParserOptions {
    /// Default nesting limit.
    pub const DEFAULT_MAX_DEPTH: usize = 256;
    /// Default node limit.
    pub const DEFAULT_MAX_NODES: usize = 1_000_000;

    /// Options with the default limits and strict decoding.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            max_nodes: Self::DEFAULT_MAX_NODES,
            lossy_decoding: false,
            log_warnings: false,
        }
    }

    /// Set the nesting limit.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the node limit.
    #[must_use]
    pub const fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// Enable or disable lossy UTF-8 decoding.
    #[must_use]
    pub const fn with_lossy_decoding(mut self, lossy: bool) -> Self {
        self.lossy_decoding = lossy;
        self
    }

    /// Enable or disable printing warnings to stderr.
    #[must_use]
    pub const fn with_warning_log(mut self, log: bool) -> Self {
        self.log_warnings = log;
        self
    }
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Running depth and node counts checked against [`ParserOptions`].
#[derive(Debug, Clone)]
pub(crate) struct ResourceBudget {
    max_depth: usize,
    max_nodes: usize,
    depth: usize,
    nodes: usize,
}

impl ResourceBudget {
    pub(crate) const fn new(options: &ParserOptions) -> Self {
        Self {
            max_depth: options.max_depth,
            max_nodes: options.max_nodes,
            depth: 0,
            nodes: 0,
        }
    }

    /// Enter one nesting level.
    pub(crate) fn enter(&mut self, position: Position) -> Result<(), ParseError> {
        if self.depth >= self.max_depth {
            return Err(ParseError::resource_limit(
                position,
                format!("nesting deeper than {} levels", self.max_depth),
            ));
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) const fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Count one tree node.
    pub(crate) fn count(&mut self, position: Position) -> Result<(), ParseError> {
        self.nodes += 1;
        if self.nodes > self.max_nodes {
            return Err(ParseError::resource_limit(
                position,
                format!("more than {} nodes", self.max_nodes),
            ));
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) const fn depth(&self) -> usize {
        self.depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::ErrorKind;

    #[test]
    fn builders_override_defaults() {
        let options = ParserOptions::default()
            .with_max_nodes(10)
            .with_warning_log(true);
        assert_eq!(options.max_depth, ParserOptions::DEFAULT_MAX_DEPTH);
        assert_eq!(options.max_nodes, 10);
        assert!(options.log_warnings);
        assert!(!options.lossy_decoding);
    }

    #[test]
    fn budget_rejects_excess_depth() {
        let mut budget = ResourceBudget::new(&ParserOptions::new().with_max_depth(2));
        assert!(budget.enter(Position::START).is_ok());
        assert!(budget.enter(Position::START).is_ok());
        let error = budget.enter(Position::new(1, 3)).unwrap_err();
        assert_eq!(error.kind, ErrorKind::ResourceLimitExceeded);
        assert_eq!(error.position(), Position::new(1, 3));
        budget.leave();
        assert_eq!(budget.depth(), 1);
    }

    #[test]
    fn budget_rejects_excess_nodes() {
        let mut budget = ResourceBudget::new(&ParserOptions::new().with_max_nodes(1));
        assert!(budget.count(Position::START).is_ok());
        assert!(budget.count(Position::START).is_err());
    }
}
