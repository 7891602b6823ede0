//! Building literal and assignment nodes from source

use fscript::fscript::ast::{AstExplorer, AttributeValue, Node, ROOT_TYPE};
use fscript::fscript::config::CompilerOptions;
use fscript::fscript::cursor::TokenCursor;
use fscript::fscript::error::Error;
use fscript::fscript::lexing::tokenize;
use fscript::fscript::parsing::literals::{
    BooleanLiteralBuilder, NullishLiteralBuilder, NumberLiteralBuilder, StringLiteralBuilder,
};
use fscript::fscript::parsing::{AstBuilder, LiteralNodeBuilder};
use fscript::parse_source;
use rstest::{fixture, rstest};

const LITERALS: &str = include_str!("fixtures/literals.fs");

#[fixture]
fn literals() -> Vec<Node> {
    let tokens = tokenize(LITERALS, &CompilerOptions::default()).expect("fixture to lex");
    let builder = AstBuilder::with_builders(vec![Box::new(LiteralNodeBuilder::new())]).unwrap();
    let mut explorer = AstExplorer::new(Node::root());
    builder
        .build(&mut TokenCursor::new(tokens), &mut explorer)
        .expect("fixture to build")
}

fn text(value: &str) -> Option<AttributeValue> {
    Some(AttributeValue::from(value))
}

#[rstest]
fn test_parses_every_literal(literals: Vec<Node>) {
    assert_eq!(literals.len(), 13);
}

#[rstest]
fn test_parses_numbers(literals: Vec<Node>) {
    let numbers = &literals[0..3];
    assert!(numbers.iter().all(|n| n.node_type == NumberLiteralBuilder::NAME));

    assert_eq!(numbers[0].attribute("value"), Some(&AttributeValue::Integer(10)));
    assert_eq!(numbers[1].attribute("value"), Some(&AttributeValue::Float(10.56)));
    assert_eq!(numbers[2].attribute("value"), Some(&AttributeValue::Float(0.46)));

    assert_eq!(numbers[0].attribute("kind").cloned(), text("integer"));
    assert_eq!(numbers[1].attribute("kind").cloned(), text("float"));
    assert_eq!(numbers[2].attribute("kind").cloned(), text("float"));
}

#[rstest]
fn test_parses_booleans(literals: Vec<Node>) {
    let booleans = &literals[3..7];
    assert!(booleans.iter().all(|n| n.node_type == BooleanLiteralBuilder::NAME));

    let values: Vec<_> = booleans.iter().map(|n| n.attribute("value").cloned()).collect();
    assert_eq!(
        values,
        vec![
            Some(AttributeValue::Boolean(true)),
            Some(AttributeValue::Boolean(false)),
            Some(AttributeValue::Boolean(true)),
            Some(AttributeValue::Boolean(false)),
        ]
    );
}

#[rstest]
fn test_parses_strings(literals: Vec<Node>) {
    assert_eq!(literals[7].node_type, StringLiteralBuilder::NAME);
    assert_eq!(literals[8].node_type, StringLiteralBuilder::NAME);
    assert_eq!(literals[7].attribute("value").cloned(), text("Hello World"));
    assert_eq!(literals[8].attribute("value").cloned(), text(" Hello World 2 "));
}

#[rstest]
fn test_parses_nullish_keywords(literals: Vec<Node>) {
    let nullish = &literals[9..13];
    assert!(nullish.iter().all(|n| n.node_type == NullishLiteralBuilder::NAME));

    let keywords: Vec<_> = nullish.iter().map(|n| n.attribute("keyword").cloned()).collect();
    assert_eq!(
        keywords,
        vec![text("undefined"), text("void"), text("null"), text("nothing")]
    );
}

#[rstest]
fn test_literals_have_no_children(literals: Vec<Node>) {
    assert!(literals.iter().all(|n| n.children.is_empty()));
}

#[test]
fn test_default_grammar_builds_assignments() {
    let source = "def answer = 42\nlet name : String = 'fscript'\n\nconst ready = yes\nnull\n";
    let root = parse_source(source, &CompilerOptions::default()).unwrap();
    assert_eq!(root.node_type, ROOT_TYPE);

    let types: Vec<_> = root.children.iter().map(|n| n.node_type.as_str()).collect();
    assert_eq!(
        types,
        vec!["ASSIGNMENT", "ASSIGNMENT", "ASSIGNMENT", NullishLiteralBuilder::NAME]
    );

    let name = &root.children[1];
    assert_eq!(name.attribute("keyword").cloned(), text("let"));
    assert_eq!(name.attribute("identifier").cloned(), text("name"));
    assert_eq!(name.attribute("type").cloned(), text("String"));
    assert_eq!(name.children.len(), 1);
    assert_eq!(name.children[0].attribute("value").cloned(), text("fscript"));

    let ready = &root.children[2];
    assert_eq!(ready.attribute("type"), None);
    assert_eq!(
        ready.children[0].attribute("value"),
        Some(&AttributeValue::Boolean(true))
    );
}

#[test]
fn test_ast_serializes_with_flattened_attributes() {
    let root = parse_source("def answer = 42", &CompilerOptions::default()).unwrap();
    let json = serde_json::to_value(&root).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "type": "ROOT",
            "children": [{
                "type": "ASSIGNMENT",
                "keyword": "def",
                "identifier": "answer",
                "children": [{
                    "type": "LITERAL_NUMBER",
                    "value": 42,
                    "kind": "integer",
                    "children": []
                }]
            }]
        })
    );
}

#[rstest(
    source,
    line,
    case("def = 1", 1),
    case("def x 1", 1),
    case("\nvar y : = 2", 2),
    case("let z =\n3", 1)
)]
fn test_broken_assignments_are_syntax_errors(source: &str, line: usize) {
    match parse_source(source, &CompilerOptions::default()) {
        Err(Error::Syntax(err)) => assert_eq!(err.position.line, line),
        other => panic!("expected a syntax error for {source:?}, got {other:?}"),
    }
}
