//! Integration tests for CSS selector parsing.

use quill_css::selector::{
    AttributeOperator, AttributeSelector, CaseSensitivity, Combinator, NthSelector,
    PseudoArgument, PseudoClass, PseudoElement, Selector, SelectorComponent, SelectorList,
    Specificity,
};
use quill_css::{ErrorKind, ParseError, Position, parse_selector_list};

fn parse(input: &str) -> Result<SelectorList, ParseError> {
    parse_selector_list(input.as_bytes()).map(quill_css::Parsed::into_value)
}

fn parse_one(input: &str) -> Selector {
    let list = parse(input).unwrap();
    assert_eq!(list.len(), 1, "{input}");
    list.selectors()[0].clone()
}

fn type_selector(name: &str) -> SelectorComponent {
    SelectorComponent::Type(name.to_owned())
}

#[test]
fn test_parse_type_selector() {
    let selector = parse_one("body");
    assert_eq!(selector.specificity(), Specificity(0, 0, 1));
    assert_eq!(selector.components, vec![type_selector("body")]);
}

#[test]
fn test_parse_class_selector() {
    let selector = parse_one(".highlight");
    assert_eq!(selector.specificity(), Specificity(0, 1, 0));
    assert_eq!(
        selector.components,
        vec![SelectorComponent::Class("highlight".to_owned())]
    );
}

#[test]
fn test_parse_id_selector() {
    let selector = parse_one("#main-content");
    assert_eq!(selector.specificity(), Specificity(1, 0, 0));
    assert_eq!(
        selector.components,
        vec![SelectorComponent::Id("main-content".to_owned())]
    );
}

#[test]
fn test_parse_universal_selector() {
    let selector = parse_one("*");
    assert_eq!(selector.specificity(), Specificity(0, 0, 0));
    assert_eq!(selector.components, vec![SelectorComponent::Universal]);
}

#[test]
fn test_parse_compound_selector() {
    let selector = parse_one("div.highlight#main");
    assert_eq!(selector.specificity(), Specificity(1, 1, 1));
    assert_eq!(selector.components.len(), 3);
}

// Combinator Parsing Tests
// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)

#[test]
fn test_parse_combinators() {
    let cases = [
        ("div p", Combinator::Descendant),
        ("ul > li", Combinator::Child),
        ("h1 + p", Combinator::NextSibling),
        ("h1 ~ p", Combinator::SubsequentSibling),
        ("ul>li", Combinator::Child),
        ("h1+p", Combinator::NextSibling),
    ];
    for (input, combinator) in cases {
        let selector = parse_one(input);
        assert_eq!(selector.components.len(), 3, "{input}");
        assert_eq!(
            selector.components[1],
            SelectorComponent::Combinator(combinator),
            "{input}"
        );
    }
}

#[test]
fn test_parse_multiple_combinators() {
    // div.container > ul.nav li
    let selector = parse_one("div.container > ul.nav li");
    assert_eq!(
        selector.components,
        vec![
            type_selector("div"),
            SelectorComponent::Class("container".to_owned()),
            SelectorComponent::Combinator(Combinator::Child),
            type_selector("ul"),
            SelectorComponent::Class("nav".to_owned()),
            SelectorComponent::Combinator(Combinator::Descendant),
            type_selector("li"),
        ]
    );
    assert_eq!(selector.specificity(), Specificity(0, 2, 3));
}

#[test]
fn test_selector_list() {
    let list = parse("h1, h2 ,h3").unwrap();
    assert_eq!(list.len(), 3);
    assert_eq!(list.selectors()[2].components, vec![type_selector("h3")]);
}

#[test]
fn test_invalid_selectors() {
    for input in [
        "> a",
        "a >",
        "a, ",
        ", a",
        "a..b",
        "a > > b",
        "#123",
        "div*",
    ] {
        match parse(input) {
            Err(error) => assert_eq!(error.kind, ErrorKind::SyntaxError, "{input}"),
            Ok(list) => panic!("{input:?} should be invalid, got {list:?}"),
        }
    }
}

#[test]
fn test_one_invalid_selector_invalidates_the_list() {
    let error = parse("a, b..c, d").unwrap_err();
    assert_eq!(error.kind, ErrorKind::SyntaxError);
}

#[test]
fn test_empty_input_is_a_syntax_error() {
    assert_eq!(parse("").unwrap_err().kind, ErrorKind::SyntaxError);
    assert_eq!(parse("   \n ").unwrap_err().kind, ErrorKind::SyntaxError);
    assert_eq!(parse("/* only */").unwrap_err().kind, ErrorKind::SyntaxError);
}

#[test]
fn test_error_position_points_at_the_problem() {
    let error = parse("a,\n  b > > c").unwrap_err();
    assert_eq!(error.position().line, 2);
    assert_eq!(error.position(), Position::new(2, 7));
}

#[test]
fn test_unsupported_syntax_is_rejected() {
    assert!(parse("svg|rect").is_err());
    assert!(parse("& a").is_err());
    assert!(parse("[ns|attr]").is_err());
}

// Pseudo-classes and pseudo-elements
// [§ 3.5 Pseudo-classes](https://www.w3.org/TR/selectors-4/#pseudo-classes)

#[test]
fn test_parse_hover_pseudo_class() {
    let selector = parse_one("a:HOVER");
    assert_eq!(
        selector.components[1],
        SelectorComponent::PseudoClass(PseudoClass {
            name: "hover".to_owned(),
            argument: None,
        })
    );
    assert_eq!(selector.specificity(), Specificity(0, 1, 1));
}

#[test]
fn test_parse_pseudo_elements() {
    let selector = parse_one("p::first-line");
    assert_eq!(
        selector.components[1],
        SelectorComponent::PseudoElement(PseudoElement {
            name: "first-line".to_owned(),
            argument: None,
        })
    );
    assert_eq!(selector.specificity(), Specificity(0, 0, 2));
}

#[test]
fn test_parse_legacy_pseudo_element() {
    // [§ 3.6.1](https://www.w3.org/TR/selectors-4/#pseudo-element-syntax)
    // "For compatibility with existing style sheets, user agents must also
    // accept the previous one-colon notation for pseudo-elements introduced
    // in CSS levels 1 and 2 (namely, :first-line, :first-letter, :before and
    // :after)."
    for name in ["before", "after", "first-line", "first-letter"] {
        let selector = parse_one(&format!("p:{name}"));
        assert!(selector.has_pseudo_element(), "{name}");
    }
}

#[test]
fn test_functional_pseudo_element() {
    let selector = parse_one("::part( label )");
    match &selector.components[0] {
        SelectorComponent::PseudoElement(PseudoElement {
            name,
            argument: Some(argument),
        }) => {
            assert_eq!(name, "part");
            assert_eq!(argument.len(), 1);
        }
        other => panic!("Expected ::part(), got {other:?}"),
    }
}

#[test]
fn test_parse_not_pseudo_class() {
    let selector = parse_one("p:not(.a, #b)");
    match &selector.components[1] {
        SelectorComponent::PseudoClass(PseudoClass {
            name,
            argument: Some(PseudoArgument::Selectors(list)),
        }) => {
            assert_eq!(name, "not");
            assert_eq!(list.len(), 2);
        }
        other => panic!("Expected :not(), got {other:?}"),
    }
    // "The specificity of an :is(), :not(), or :has() pseudo-class is replaced
    // by the specificity of the most specific complex selector in its selector
    // list argument."
    assert_eq!(selector.specificity(), Specificity(1, 0, 1));
}

#[test]
fn test_where_has_zero_specificity() {
    assert_eq!(parse_one("p:where(#a)").specificity(), Specificity(0, 0, 1));
    assert_eq!(parse_one("p:is(#a, .b)").specificity(), Specificity(1, 0, 1));
    assert_eq!(parse_one("p:has(> #a)").specificity(), Specificity(1, 0, 1));
}

#[test]
fn test_invalid_selector_inside_not() {
    assert!(parse("p:not(..a)").is_err());
    assert!(parse("p:not()").is_err());
}

#[test]
fn test_raw_functional_pseudo_class() {
    let selector = parse_one("p:lang(en)");
    assert!(matches!(
        &selector.components[1],
        SelectorComponent::PseudoClass(PseudoClass {
            argument: Some(PseudoArgument::Raw(values)),
            ..
        }) if values.len() == 1
    ));
}

// An+B
// [§ 14.1 The An+B notation](https://www.w3.org/TR/selectors-4/#anb)

fn nth_of(selector: &Selector, index: usize) -> &NthSelector {
    match &selector.components[index] {
        SelectorComponent::PseudoClass(PseudoClass {
            argument: Some(PseudoArgument::Nth(nth)),
            ..
        }) => nth,
        other => panic!("Expected An+B pseudo-class, got {other:?}"),
    }
}

#[test]
fn test_nth_child_forms() {
    let cases = [
        ("li:nth-child(odd)", (2, 1)),
        ("li:nth-child(even)", (2, 0)),
        ("li:nth-child(3)", (0, 3)),
        ("li:nth-child(2n+1)", (2, 1)),
        ("li:nth-child( -n + 3 )", (-1, 3)),
        ("li:nth-last-of-type(n)", (1, 0)),
        ("li:nth-of-type(+5n-2)", (5, -2)),
    ];
    for (input, (a, b)) in cases {
        let selector = parse_one(input);
        let nth = nth_of(&selector, 1);
        assert_eq!((nth.a, nth.b), (a, b), "{input}");
    }
}

#[test]
fn test_nth_child_of_selector() {
    let selector = parse_one("li:nth-child(2n of .important)");
    let nth = nth_of(&selector, 1);
    assert_eq!(nth.of.as_ref().map(SelectorList::len), Some(1));
    // One pseudo-class plus the most specific selector of the list.
    assert_eq!(selector.specificity(), Specificity(0, 2, 1));
}

#[test]
fn test_nth_errors() {
    assert!(parse("li:nth-child()").is_err());
    assert!(parse("li:nth-child(2n+)").is_err());
    assert!(parse("li:nth-of-type(2n of .a)").is_err());
    assert!(parse("li:nth-child(1.5)").is_err());
    assert!(parse("li:nth-child(2n 1)").is_err());
    assert!(parse("li:nth-child(n 5)").is_err());
    assert!(parse("li:nth-child(2n + +1)").is_err());
    assert!(parse("li:nth-child(2n- +1)").is_err());
}

// Attribute selectors
// [§ 6 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)

fn attribute_of(input: &str) -> AttributeSelector {
    match parse_one(input).components.into_iter().last() {
        Some(SelectorComponent::Attribute(attribute)) => attribute,
        other => panic!("Expected attribute selector, got {other:?}"),
    }
}

#[test]
fn test_parse_attribute_exists() {
    let attribute = attribute_of("[href]");
    assert_eq!(attribute.name, "href");
    assert!(attribute.matcher.is_none());
}

#[test]
fn test_parse_attribute_operators() {
    let cases = [
        ("[type=text]", AttributeOperator::Equals),
        ("[class~=item]", AttributeOperator::Includes),
        ("[lang|=en]", AttributeOperator::DashMatch),
        ("[href^=\"https\"]", AttributeOperator::Prefix),
        ("[href$='.pdf']", AttributeOperator::Suffix),
        ("[title*=hello]", AttributeOperator::Substring),
    ];
    for (input, operator) in cases {
        let attribute = attribute_of(input);
        assert_eq!(attribute.matcher.map(|(op, _)| op), Some(operator), "{input}");
    }
}

#[test]
fn test_parse_attribute_with_whitespace_and_flag() {
    let attribute = attribute_of("a[ type = 'Text' i ]");
    assert_eq!(
        attribute,
        AttributeSelector {
            name: "type".to_owned(),
            matcher: Some((AttributeOperator::Equals, "Text".to_owned())),
            case: Some(CaseSensitivity::AsciiInsensitive),
        }
    );
}

#[test]
fn test_invalid_attribute_selectors() {
    for input in ["[]", "[=a]", "[a=]", "[a==b]", "[a=b c]", "[a=b i s]", "[1=b]"] {
        assert!(parse(input).is_err(), "{input}");
    }
}

#[test]
fn test_specificity_ordering() {
    let low = parse_one("p").specificity();
    let mid = parse_one(".a").specificity();
    let high = parse_one("#a").specificity();
    assert!(low < mid && mid < high);
    assert!(Specificity(0, 2, 0) > Specificity(0, 1, 9));

    let list = parse("p, #a .b, .c").unwrap();
    assert_eq!(list.max_specificity(), Specificity(1, 1, 0));
}

#[test]
fn test_mixed_simple_selector_list() {
    let list = parse("div, .cls, #id").unwrap();
    let components: Vec<&[SelectorComponent]> = list
        .iter()
        .map(|selector| selector.components.as_slice())
        .collect();
    assert_eq!(
        components,
        [
            &[type_selector("div")][..],
            &[SelectorComponent::Class("cls".to_owned())][..],
            &[SelectorComponent::Id("id".to_owned())][..],
        ]
    );
}
