//! CSS Selector model and parsing
//!
//! This module implements selector parsing per
//! [Selectors Level 4](https://www.w3.org/TR/selectors-4/).
//!
//! A [`Selector`] is stored flat, left to right, the way it is written:
//! simple selectors of one compound follow each other and
//! [`SelectorComponent::Combinator`] entries separate compounds. Matching
//! against a document is not provided.

/// An+B microsyntax for `:nth-*()` pseudo-classes.
pub(crate) mod nth;
/// Selector grammar over component values.
pub(crate) mod parser;

use serde::Serialize;

use crate::diagnostics::Release;
use crate::parser::ComponentValue;

/// [§ 5 Elemental selectors](https://www.w3.org/TR/selectors-4/#elemental-selectors)
/// [§ 6 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
/// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
///
/// One entry of a [`Selector`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SelectorComponent {
    /// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
    /// "A type selector is the name of a document language element type,
    /// and represents an instance of that element type in the document tree."
    ///
    /// Examples: `div`, `p`, `span`, `body`, `h1`
    Type(String),

    /// [§ 5.2 Universal selector](https://www.w3.org/TR/selectors-4/#universal-selector)
    /// "The universal selector is a single asterisk (*) and represents the
    /// qualified name of any element type."
    Universal,

    /// [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
    /// "The class selector is given as a full stop (. U+002E) immediately
    /// followed by an identifier."
    ///
    /// Examples: `.highlight`, `.btn`, `.nav-item`
    Class(String),

    /// [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
    /// "An ID selector is a hash (#, U+0023) immediately followed by the
    /// ID value, which is an identifier."
    Id(String),

    /// [§ 6.4 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
    ///
    /// Examples: `[href]`, `[type=text]`, `[lang|=en i]`
    Attribute(AttributeSelector),

    /// [§ 3.5 Pseudo-classes](https://www.w3.org/TR/selectors-4/#pseudo-classes)
    PseudoClass(PseudoClass),

    /// [§ 3.6 Pseudo-elements](https://www.w3.org/TR/selectors-4/#pseudo-elements)
    PseudoElement(PseudoElement),

    /// A combinator between two compounds.
    Combinator(Combinator),
}

/// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
///
/// "A combinator is punctuation that represents a particular kind of
/// relationship between the selectors on either side."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Combinator {
    /// [§ 16.1 Descendant combinator](https://www.w3.org/TR/selectors-4/#descendant-combinators)
    /// "A descendant combinator is whitespace that separates two compound selectors."
    Descendant,

    /// [§ 16.2 Child combinator](https://www.w3.org/TR/selectors-4/#child-combinators)
    /// "A child combinator is a greater-than sign (>) that separates two compound
    /// selectors."
    Child,

    /// [§ 16.3 Next-sibling combinator](https://www.w3.org/TR/selectors-4/#adjacent-sibling-combinators)
    /// "A next-sibling combinator is a plus sign (+) that separates two compound
    /// selectors."
    NextSibling,

    /// [§ 16.4 Subsequent-sibling combinator](https://www.w3.org/TR/selectors-4/#general-sibling-combinators)
    /// "A subsequent-sibling combinator is a tilde (~) that separates two compound
    /// selectors."
    SubsequentSibling,
}

impl Combinator {
    /// The delim that writes this combinator, or `None` for whitespace.
    #[must_use]
    pub const fn delim(self) -> Option<char> {
        match self {
            Self::Descendant => None,
            Self::Child => Some('>'),
            Self::NextSibling => Some('+'),
            Self::SubsequentSibling => Some('~'),
        }
    }
}

/// [§ 6.4 Attribute presence and value selectors](https://www.w3.org/TR/selectors-4/#attribute-representation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AttributeOperator {
    /// `[att=val]` "whose value is exactly 'val'"
    Equals,
    /// `[att~=val]` "a whitespace-separated list of words, one of which is exactly 'val'"
    Includes,
    /// `[att|=val]` "either being exactly 'val' or beginning with 'val'
    /// immediately followed by '-'"
    DashMatch,
    /// `[att^=val]` "begins with the prefix 'val'"
    Prefix,
    /// `[att$=val]` "ends with the suffix 'val'"
    Suffix,
    /// `[att*=val]` "contains at least one instance of the substring 'val'"
    Substring,
}

impl AttributeOperator {
    /// The operator as written in CSS.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equals => "=",
            Self::Includes => "~=",
            Self::DashMatch => "|=",
            Self::Prefix => "^=",
            Self::Suffix => "$=",
            Self::Substring => "*=",
        }
    }
}

/// [§ 6.3 Case-sensitivity](https://www.w3.org/TR/selectors-4/#attribute-case)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CaseSensitivity {
    /// The `i` flag.
    AsciiInsensitive,
    /// The `s` flag.
    Sensitive,
}

/// An attribute selector such as `[lang|="en" i]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeSelector {
    /// The attribute name.
    pub name: String,
    /// Operator and value; `None` for a presence test like `[href]`.
    pub matcher: Option<(AttributeOperator, String)>,
    /// The `i`/`s` flag, if given.
    pub case: Option<CaseSensitivity>,
}

/// A pseudo-class, possibly functional.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PseudoClass {
    /// ASCII-lowercased name.
    pub name: String,
    /// The parsed argument of a functional pseudo-class.
    pub argument: Option<PseudoArgument>,
}

/// The argument of a functional pseudo-class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PseudoArgument {
    /// `:not()`, `:is()`, `:where()` and `:matches()`.
    Selectors(SelectorList),
    /// `:has()`; selectors may start with a combinator.
    Relative(SelectorList),
    /// `:nth-child()` and its relatives.
    Nth(NthSelector),
    /// Any other functional pseudo-class, e.g. `:lang(en)`.
    Raw(Vec<ComponentValue>),
}

/// [§ 14.1 The An+B notation](https://www.w3.org/TR/selectors-4/#anb)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NthSelector {
    /// The step.
    pub a: i32,
    /// The offset.
    pub b: i32,
    /// The `of S` filter of `:nth-child()` and `:nth-last-child()`.
    pub of: Option<SelectorList>,
}

/// A pseudo-element such as `::before` or `::part(label)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PseudoElement {
    /// ASCII-lowercased name.
    pub name: String,
    /// Raw argument of a functional pseudo-element.
    pub argument: Option<Vec<ComponentValue>>,
}

/// Single-colon spellings that CSS 2 defined as pseudo-elements.
pub(crate) const LEGACY_PSEUDO_ELEMENTS: &[&str] =
    &["before", "after", "first-line", "first-letter"];

/// [§ 17 Calculating Specificity](https://www.w3.org/TR/selectors-4/#specificity-rules)
/// "A selector's specificity is calculated for a given element as follows:
///  - count the number of ID selectors in the selector (= A)
///  - count the number of class selectors, attributes selectors, and pseudo-classes in the selector (= B)
///  - count the number of type selectors and pseudo-elements in the selector (= C)
///
/// Specificities are compared by comparing the three components in order."
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
pub struct Specificity(pub u32, pub u32, pub u32);

impl Specificity {
    /// Create a new specificity with (A, B, C) components.
    #[must_use]
    pub const fn new(a: u32, b: u32, c: u32) -> Self {
        Self(a, b, c)
    }

    const fn add(self, other: Self) -> Self {
        Self(
            self.0.saturating_add(other.0),
            self.1.saturating_add(other.1),
            self.2.saturating_add(other.2),
        )
    }
}

/// [§ 4.3 Complex selectors](https://www.w3.org/TR/selectors-4/#complex)
///
/// "A complex selector is a chain of one or more compound selectors separated
/// by combinators."
///
/// Example: `div.container > ul.nav li` is stored as
/// ```text
/// [Type(div), Class(container), Combinator(Child), Type(ul), Class(nav),
///  Combinator(Descendant), Type(li)]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selector {
    /// Simple selectors and combinators, left to right.
    pub components: Vec<SelectorComponent>,
}

impl Selector {
    /// [§ 17 Calculating Specificity](https://www.w3.org/TR/selectors-4/#specificity-rules)
    #[must_use]
    pub fn specificity(&self) -> Specificity {
        self.components
            .iter()
            .fold(Specificity::default(), |spec, component| {
                spec.add(component.specificity())
            })
    }

    /// Returns true if the selector starts with a combinator, as inside `:has()`.
    #[must_use]
    pub fn is_relative(&self) -> bool {
        matches!(self.components.first(), Some(SelectorComponent::Combinator(_)))
    }

    /// Returns true if any compound carries a pseudo-element.
    #[must_use]
    pub fn has_pseudo_element(&self) -> bool {
        self.components
            .iter()
            .any(|component| matches!(component, SelectorComponent::PseudoElement(_)))
    }
}

impl SelectorComponent {
    /// Specificity contributed by this component alone.
    #[must_use]
    pub fn specificity(&self) -> Specificity {
        match self {
            // "count the number of ID selectors in the selector (= A)"
            Self::Id(_) => Specificity(1, 0, 0),

            // "count the number of class selectors, attributes selectors,
            // and pseudo-classes in the selector (= B)"
            Self::Class(_) | Self::Attribute(_) => Specificity(0, 1, 0),
            Self::PseudoClass(pseudo) => pseudo.specificity(),

            // "count the number of type selectors and pseudo-elements
            // in the selector (= C)"
            Self::Type(_) | Self::PseudoElement(_) => Specificity(0, 0, 1),

            // "ignore the universal selector"
            Self::Universal | Self::Combinator(_) => Specificity::default(),
        }
    }
}

impl PseudoClass {
    /// [§ 17 Calculating Specificity](https://www.w3.org/TR/selectors-4/#specificity-rules)
    ///
    /// "The specificity of an :is(), :not(), or :has() pseudo-class is replaced
    /// by the specificity of the most specific complex selector in its selector
    /// list argument."
    /// "The specificity of an :nth-child() or :nth-last-child() selector is the
    /// specificity of the pseudo class itself (counting as one pseudo-class
    /// selector) plus the specificity of the most specific complex selector in
    /// its selector list argument (if any)."
    /// "The specificity of a :where() pseudo-class is replaced by zero."
    #[must_use]
    pub fn specificity(&self) -> Specificity {
        match &self.argument {
            Some(PseudoArgument::Selectors(_)) if self.name == "where" => Specificity::default(),
            Some(PseudoArgument::Selectors(list) | PseudoArgument::Relative(list)) => {
                list.max_specificity()
            }
            Some(PseudoArgument::Nth(NthSelector { of: Some(list), .. })) => {
                Specificity(0, 1, 0).add(list.max_specificity())
            }
            _ => Specificity(0, 1, 0),
        }
    }
}

/// [§ 4.1 Selector lists](https://www.w3.org/TR/selectors-4/#grouping)
///
/// "A selector list is a comma-separated list of selectors."
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelectorList {
    selectors: Vec<Selector>,
    #[serde(skip)]
    released: bool,
}

impl SelectorList {
    /// Wrap a list of selectors.
    #[must_use]
    pub const fn new(selectors: Vec<Selector>) -> Self {
        Self {
            selectors,
            released: false,
        }
    }

    /// The selectors, in source order.
    #[must_use]
    pub fn selectors(&self) -> &[Selector] {
        &self.selectors
    }

    /// Iterate over the selectors.
    pub fn iter(&self) -> core::slice::Iter<'_, Selector> {
        self.selectors.iter()
    }

    /// Number of selectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    /// Returns true if the list holds no selectors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    /// Specificity of the most specific selector; zero for an empty list.
    #[must_use]
    pub fn max_specificity(&self) -> Specificity {
        self.selectors
            .iter()
            .map(Selector::specificity)
            .max()
            .unwrap_or_default()
    }
}

impl<'a> IntoIterator for &'a SelectorList {
    type Item = &'a Selector;
    type IntoIter = core::slice::Iter<'a, Selector>;

    fn into_iter(self) -> Self::IntoIter {
        self.selectors.iter()
    }
}

impl Release for SelectorList {
    fn release(&mut self) -> bool {
        if self.released {
            return false;
        }
        self.selectors = Vec::new();
        self.released = true;
        true
    }

    fn is_released(&self) -> bool {
        self.released
    }
}
