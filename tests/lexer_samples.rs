//! Lexer behavior on small samples
//!
//! Kind dispatch, word boundaries, positions and indentation across the
//! default recognizers, plus a snapshot of a full token stream.

use fscript::fscript::config::{CompilerOptions, IndentKind};
use fscript::fscript::lexing::{tokenize, Lexer};
use fscript::fscript::token::{TokenKind, TokenSequence, TokenValue};
use rstest::rstest;

fn lex(source: &str) -> TokenSequence {
    tokenize(source, &CompilerOptions::default()).expect("source to lex")
}

fn render(tokens: &TokenSequence) -> String {
    tokens
        .iter()
        .map(|t| {
            format!(
                "{} {:?} {}:{}-{}",
                t.kind, t.raw, t.position.line, t.position.start, t.position.end
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[rstest(
    source,
    kind,
    case("def", TokenKind::Keyword),
    case("interface", TokenKind::Keyword),
    case("and", TokenKind::Keyword),
    case("index", TokenKind::Identifier),
    case("my_var-2", TokenKind::Identifier),
    case("42", TokenKind::Literal),
    case("10.56", TokenKind::Literal),
    case(".46", TokenKind::Literal),
    case("'single'", TokenKind::Literal),
    case("\"double\"", TokenKind::Literal),
    case("`tick`", TokenKind::Literal),
    case("nothing", TokenKind::Literal),
    case("yes", TokenKind::Literal),
    case("===", TokenKind::Operator),
    case("->", TokenKind::Operator),
    case("gte", TokenKind::Operator),
    case("not", TokenKind::Operator),
    case(",", TokenKind::Separator),
    case("(", TokenKind::GroupStart),
    case(")", TokenKind::GroupEnd),
    case("[", TokenKind::ArrayStart),
    case("]", TokenKind::ArrayEnd),
    case("{", TokenKind::BlockStart),
    case("}", TokenKind::BlockEnd)
)]
fn test_single_token_kind(source: &str, kind: TokenKind) {
    let tokens = lex(source);
    assert_eq!(tokens.len(), 1, "{source:?} should be a single token");
    assert_eq!(tokens.get(0).unwrap().kind, kind);
    assert_eq!(tokens.get(0).unwrap().raw, source);
}

#[rstest(
    source,
    expected,
    case("a.b", vec!["a", ".", "b"]),
    case("x...rest", vec!["x", "...", "rest"]),
    case("a!==b", vec!["a", "!==", "b"]),
    case("f(x,y)", vec!["f", "(", "x", ",", "y", ")"]),
    case("yesterday", vec!["yesterday"]),
    case("def-x = 1", vec!["def-x", " ", "=", " ", "1"]),
    case("10.", vec!["10", "."])
)]
fn test_splits(source: &str, expected: Vec<&str>) {
    let raws: Vec<String> = lex(source).iter().map(|t| t.raw.clone()).collect();
    assert_eq!(raws, expected);
}

#[test]
fn test_token_stream_snapshot() {
    let tokens = lex("def ratio : Number = .5\n  yes");
    insta::assert_snapshot!(render(&tokens), @r###"
    KEYWORD "def" 1:0-2
    SPACE " " 1:3-3
    IDENTIFIER "ratio" 1:4-8
    SPACE " " 1:9-9
    OPERATOR ":" 1:10-10
    SPACE " " 1:11-11
    IDENTIFIER "Number" 1:12-17
    SPACE " " 1:18-18
    OPERATOR "=" 1:19-19
    SPACE " " 1:20-20
    LITERAL ".5" 1:21-22
    NEWLINE "\n" 1:23-23
    INDENT "  " 2:0-1
    LITERAL "yes" 2:2-4
    "###);
}

#[test]
fn test_newline_collapses_trailing_whitespace() {
    let tokens = lex("a   \r\nb \t");
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier,
            TokenKind::Newline,
            TokenKind::Identifier,
            TokenKind::Newline
        ]
    );
    assert!(tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Newline)
        .all(|t| t.raw == "\n" && t.position.start == t.position.end));
    assert_eq!(tokens.get(2).unwrap().position.line, 2);
}

#[test]
fn test_nested_indentation_yields_one_token_per_unit() {
    let tokens = lex("a\n     b");
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier,
            TokenKind::Newline,
            TokenKind::Indent,
            TokenKind::Indent,
            TokenKind::Space,
            TokenKind::Identifier
        ]
    );
    assert_eq!(tokens.get(2).unwrap().value, TokenValue::Number(2.0));
}

#[test]
fn test_indentation_in_the_middle_of_a_line_is_space() {
    let tokens = lex("a  b");
    assert_eq!(tokens.get(1).unwrap().kind, TokenKind::Space);
}

#[test]
fn test_tab_indentation() {
    let options = CompilerOptions {
        indent_kind: IndentKind::Tab,
        ..CompilerOptions::default()
    };
    let tokens = Lexer::with_defaults(&options).tokenize("\t\tx\n  y").unwrap();
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Indent,
            TokenKind::Indent,
            TokenKind::Identifier,
            TokenKind::Newline,
            TokenKind::Space,
            TokenKind::Identifier
        ]
    );
}

#[test]
fn test_four_space_indentation() {
    let options = CompilerOptions {
        indent_size: 4,
        ..CompilerOptions::default()
    };
    let tokens = Lexer::with_defaults(&options).tokenize("    x").unwrap();
    let indent = tokens.get(0).unwrap();
    assert_eq!(indent.kind, TokenKind::Indent);
    assert_eq!(indent.value, TokenValue::Number(4.0));
    assert_eq!(indent.position.end, 3);
}

#[rstest(source, line, column, case("@", 1, 0), case("a = 1\n  b ? c", 2, 4), case("x\u{e9}", 1, 1))]
fn test_unrecognized_input_is_a_lex_error(source: &str, line: usize, column: usize) {
    let err = tokenize(source, &CompilerOptions::default()).unwrap_err();
    assert_eq!(err.position.line, line);
    assert_eq!(err.position.start, column);
}

#[test]
fn test_whitespace_only_input() {
    let tokens = lex("  \n\n\t  \n    ");
    assert!(!tokens.is_empty());
    assert!(tokens.iter().all(|t| t.kind.is_blank()));
}

#[test]
fn test_tokens_serialize_to_json() {
    let json = serde_json::to_value(lex("x")).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{
            "kind": "IDENTIFIER",
            "value": "x",
            "raw": "x",
            "position": {"line": 1, "start": 0, "end": 0}
        }])
    );
}
