//! Integration tests for canonical CSS serialization.

use quill_css::{
    ErrorKind, Release, ToCss, normalize_selector_list, normalize_stylesheet, parse_stylesheet,
    serialize_stylesheet,
};

fn normalize(input: &str) -> String {
    normalize_stylesheet(input.as_bytes()).unwrap().into_value()
}

fn normalize_selectors(input: &str) -> String {
    normalize_selector_list(input.as_bytes()).unwrap().into_value()
}

#[test]
fn test_style_rules() {
    assert_eq!(
        normalize("a>b{COLOR:red!important}"),
        "a > b { color: red !important; }"
    );
    assert_eq!(normalize("a{}"), "a { }");
    assert_eq!(
        normalize("h1,h2 { margin:0;padding : 1px 2px }\n\n\np{}"),
        "h1, h2 { margin: 0; padding: 1px 2px; }\np { }"
    );
}

#[test]
fn test_whitespace_and_comments_in_values() {
    assert_eq!(
        normalize("a { font: 12px   /* size */\n  serif }"),
        "a { font: 12px serif; }"
    );
    // Dropping a comment must not merge the tokens around it.
    assert_eq!(normalize("a { x: a/**/b }"), "a { x: a/**/b; }");
    assert_eq!(normalize("a { x: 1/**/2 }"), "a { x: 1/**/2; }");
}

#[test]
fn test_functions_and_blocks() {
    assert_eq!(
        normalize("a { color: rgb( 0 ,0, 0 ) }"),
        "a { color: rgb(0 ,0, 0); }"
    );
    assert_eq!(
        normalize("a { grid-template-areas: [ a ] ; }"),
        "a { grid-template-areas: [a]; }"
    );
}

#[test]
fn test_strings_and_urls() {
    assert_eq!(
        normalize("a { content: 'it\\'s \"x\"' }"),
        "a { content: \"it's \\\"x\\\"\"; }"
    );
    assert_eq!(
        normalize("a { background: url( a.png ) }"),
        "a { background: url(a.png); }"
    );
    assert_eq!(
        normalize("a { background: url('b c.png') }"),
        "a { background: url(\"b c.png\"); }"
    );
}

#[test]
fn test_numbers() {
    assert_eq!(
        normalize("a { width: +1.50px; height: 1e3px; z-index: -0; opacity: .5 }"),
        "a { width: 1.5px; height: 1000px; z-index: 0; opacity: 0.5; }"
    );
    assert_eq!(normalize("a { width: 50% }"), "a { width: 50%; }");
}

#[test]
fn test_custom_properties_keep_case() {
    assert_eq!(normalize("a{--Main:Blue}"), "a { --Main: Blue; }");
}

#[test]
fn test_at_rules() {
    assert_eq!(normalize("@import url(a.css) screen;"), "@import url(a.css) screen;");
    assert_eq!(normalize("@charset \"utf-8\";"), "@charset \"utf-8\";");
    assert_eq!(
        normalize("@media screen and (min-width:10px){a{color:red}b{}}"),
        "@media screen and (min-width:10px) { a { color: red; } b { } }"
    );
    assert_eq!(
        normalize("@font-face{font-family:Foo}"),
        "@font-face { font-family: Foo; }"
    );
    assert_eq!(normalize("@page :first { margin: 1in }"), "@page :first { margin: 1in; }");
    assert_eq!(normalize("@unknown foo{bar   baz}"), "@unknown foo { bar baz }");
    assert_eq!(normalize("@unknown{}"), "@unknown { }");
}

#[test]
fn test_keyframes() {
    assert_eq!(
        normalize("@keyframes spin{FROM{opacity:0}50%,75%{opacity:.5}to{opacity:1}}"),
        "@keyframes spin { from { opacity: 0; } 50%, 75% { opacity: 0.5; } to { opacity: 1; } }"
    );
}

#[test]
fn test_dropped_rules_do_not_appear() {
    let parsed = normalize_stylesheet(b"a{color:red} !!!bad!!! b{color:blue}").unwrap();
    assert_eq!(parsed.value(), "a { color: red; }\nb { color: blue; }");
    assert_eq!(parsed.warnings().len(), 1);
}

#[test]
fn test_selectors() {
    assert_eq!(normalize_selectors("a>b,c  d"), "a > b, c d");
    assert_eq!(normalize_selectors("h1+p~span"), "h1 + p ~ span");
    assert_eq!(normalize_selectors("*.a#b"), "*.a#b");
    assert_eq!(normalize_selectors("A:HOVER"), "A:hover");
    assert_eq!(normalize_selectors("p:before"), "p::before");
    assert_eq!(normalize_selectors("a:not( .b , .c )"), "a:not(.b, .c)");
    assert_eq!(normalize_selectors("a:has(>b)"), "a:has(> b)");
    assert_eq!(normalize_selectors(":lang( en )"), ":lang(en)");
}

#[test]
fn test_attribute_selectors() {
    assert_eq!(normalize_selectors("[href]"), "[href]");
    assert_eq!(normalize_selectors("[href='x']"), "[href=\"x\"]");
    assert_eq!(normalize_selectors("[ type = text I ]"), "[type=\"text\" i]");
    assert_eq!(normalize_selectors("[lang|=en]"), "[lang|=\"en\"]");
    assert_eq!(normalize_selectors("[class~=a s]"), "[class~=\"a\" s]");
}

#[test]
fn test_nth_selectors() {
    let cases = [
        ("li:nth-child(odd)", "li:nth-child(2n+1)"),
        ("li:nth-child(EVEN)", "li:nth-child(2n)"),
        ("li:nth-child( 2n + 1 )", "li:nth-child(2n+1)"),
        ("li:nth-child(-n+3)", "li:nth-child(-n+3)"),
        ("li:nth-child(+5)", "li:nth-child(5)"),
        ("li:nth-child(1n-0)", "li:nth-child(n)"),
        ("li:nth-last-of-type(3n - 2)", "li:nth-last-of-type(3n-2)"),
        ("li:nth-child(2n of .a, .b)", "li:nth-child(2n of .a, .b)"),
    ];
    for (input, expected) in cases {
        assert_eq!(normalize_selectors(input), expected, "{input}");
    }
}

#[test]
fn test_identifiers_are_escaped() {
    assert_eq!(normalize_selectors(".\\31 a"), ".\\31 a");
    assert_eq!(normalize_selectors("#a\\.b"), "#a\\.b");
    assert_eq!(normalize("a { x: \\-; }"), "a { x: \\-; }");
}

#[test]
fn test_released_stylesheet_cannot_be_serialized() {
    let mut parsed = parse_stylesheet(b"a { color: red }").unwrap();
    assert!(parsed.release());
    let error = serialize_stylesheet(parsed.value()).unwrap_err();
    assert_eq!(error.kind, ErrorKind::SerializeError);
}

#[test]
fn test_to_css_writes_into_any_writer() {
    let parsed = parse_stylesheet(b"a{color:red}").unwrap();
    let mut out = String::from("/* generated */\n");
    parsed.value().to_css(&mut out).unwrap();
    assert_eq!(out, "/* generated */\na { color: red; }");
}

#[test]
fn test_serialization_is_idempotent() {
    let inputs = [
        "a>b{COLOR:red!important}",
        "@media (x:1){a{b:c}}@import 'x';",
        "a{x:a/**/b;y:#fff -1.5e3em 10%}",
        "a{x: \\\n y}",
        "@keyframes k{0%{a:b}100%{a:c}}",
        ":is(a,b)>c:nth-child(2n+1 of .x)::part(y){}",
    ];
    for input in inputs {
        let once = normalize(input);
        let twice = normalize(&once);
        assert_eq!(once, twice, "{input}");
    }
}
