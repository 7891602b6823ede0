//! Token cursor navigation over real lexer output

use fscript::fscript::config::CompilerOptions;
use fscript::fscript::cursor::TokenCursor;
use fscript::fscript::lexing::tokenize;
use fscript::fscript::token::TokenKind;
use rstest::{fixture, rstest};
use std::rc::Rc;

const CODE: &str = "def add : Number -> Number -> Number = x y => x + y";
const INDENT_CODE: &str = "\n    console.log \"test\"\n\nconsole.log \"foo\"\n  ";
const EMPTY_CODE: &str = "\n  \n  \n  \n          \n  \n  \n  \n";

fn cursor_for(source: &str) -> TokenCursor {
    TokenCursor::new(tokenize(source, &CompilerOptions::default()).expect("source to lex"))
}

#[fixture]
fn cursor() -> TokenCursor {
    cursor_for(CODE)
}

#[fixture]
fn indent_cursor() -> TokenCursor {
    cursor_for(INDENT_CODE)
}

#[rstest]
fn test_starts_on_the_first_token(cursor: TokenCursor) {
    let position = cursor.position();
    assert_eq!((position.line, position.start), (1, 0));
    assert!(cursor.is(TokenKind::Keyword));
}

#[rstest]
fn test_steps_forward_and_backward(mut cursor: TokenCursor) {
    assert_eq!(cursor.next(&[]).unwrap().kind, TokenKind::Space);
    assert_eq!(cursor.position().start, 3);

    assert_eq!(cursor.next(&[]).unwrap().kind, TokenKind::Identifier);
    assert_eq!(cursor.position().start, 4);

    assert_eq!(cursor.previous(&[]).unwrap().kind, TokenKind::Space);
    assert_eq!(cursor.position().start, 3);

    assert_eq!(cursor.previous(&[]).unwrap().kind, TokenKind::Keyword);
    assert_eq!(cursor.position().start, 0);
}

#[rstest]
fn test_moves_to_the_next_token_of_a_kind(mut cursor: TokenCursor) {
    let operator = cursor.next(&[TokenKind::Operator]).unwrap();
    assert_eq!(operator.raw, ":");
    assert_eq!(operator.position.start, 8);

    let keyword = cursor.previous(&[TokenKind::Keyword]).unwrap();
    assert_eq!(keyword.raw, "def");
}

#[rstest]
fn test_existence_of_neighbours(mut cursor: TokenCursor) {
    assert!(!cursor.has_previous(&[]));
    assert!(cursor.has_next(&[]));

    cursor.next(&[TokenKind::Operator]).unwrap();
    assert!(cursor.has_next(&[]));
    assert!(cursor.has_previous(&[]));

    cursor.previous(&[TokenKind::Keyword]).unwrap();
    assert!(!cursor.has_previous(&[]));
    assert!(cursor.has_next(&[]));
    assert!(!cursor.has_next(&[TokenKind::ArrayStart]));

    cursor.next(&[TokenKind::Operator]).unwrap();
    assert!(!cursor.has_previous(&[TokenKind::GroupStart]));
    assert!(cursor.has_previous(&[TokenKind::Space]));
}

#[rstest]
fn test_detects_neighbour_kinds(mut cursor: TokenCursor) {
    assert!(cursor.is_next(TokenKind::Space, &[]));
    assert!(!cursor.is_next(TokenKind::Identifier, &[]));
    assert!(cursor.is_next(TokenKind::Identifier, &[TokenKind::Space]));

    cursor.next(&[TokenKind::Operator]).unwrap();
    assert!(cursor.is_previous(TokenKind::Space, &[]));
    assert!(!cursor.is_previous(TokenKind::Identifier, &[]));
    assert!(cursor.is_previous(TokenKind::Identifier, &[TokenKind::Space]));
    assert!(cursor.is(TokenKind::Operator));
}

#[rstest]
fn test_detects_blank_only_input(cursor: TokenCursor) {
    assert!(cursor_for(EMPTY_CODE).is_empty());
    assert!(!cursor.is_empty());
}

#[rstest]
fn test_tracks_indent_depth(mut indent_cursor: TokenCursor) {
    assert_eq!(indent_cursor.indent_depth(), 0);

    indent_cursor.next(&[TokenKind::Identifier]).unwrap();
    assert_eq!(indent_cursor.indent_depth(), 2);

    indent_cursor.next(&[TokenKind::Identifier]).unwrap();
    indent_cursor.next(&[TokenKind::Identifier]).unwrap();
    assert_eq!(indent_cursor.indent_depth(), 0);
}

#[rstest]
fn test_save_load_and_reset(mut indent_cursor: TokenCursor) {
    indent_cursor.next(&[TokenKind::Identifier]).unwrap();
    indent_cursor.next(&[TokenKind::Identifier]).unwrap();

    indent_cursor.save("a");
    assert_eq!(indent_cursor.current().unwrap().raw, "log");
    assert_eq!(indent_cursor.indent_depth(), 2);

    indent_cursor.next(&[TokenKind::Identifier]).unwrap();

    indent_cursor.save("b");
    assert_eq!(indent_cursor.current().unwrap().raw, "console");
    assert_eq!(indent_cursor.indent_depth(), 0);

    indent_cursor.load("a").unwrap();
    assert_eq!(indent_cursor.current().unwrap().raw, "log");
    assert_eq!(indent_cursor.indent_depth(), 2);

    indent_cursor.load("b").unwrap();
    assert_eq!(indent_cursor.current().unwrap().raw, "console");
    assert_eq!(indent_cursor.indent_depth(), 0);

    indent_cursor.reset();
    assert_eq!(indent_cursor.current().unwrap().raw, "log");
    assert_eq!(indent_cursor.indent_depth(), 2);
    assert!(indent_cursor.load("a").is_err());
}

#[rstest]
fn test_save_overwrites_in_place(mut cursor: TokenCursor) {
    cursor.save("first");
    cursor.next(&[]).unwrap();
    cursor.save("second");
    cursor.next(&[]).unwrap();
    cursor.save("first");

    cursor.reset();
    assert_eq!(cursor.index(), 2);
}

#[test]
fn test_cursors_share_one_sequence() {
    let tokens = Rc::new(tokenize(CODE, &CompilerOptions::default()).unwrap());
    let mut left = TokenCursor::new(Rc::clone(&tokens));
    let right = TokenCursor::new(Rc::clone(&tokens));

    left.next(&[TokenKind::Operator]).unwrap();
    assert_eq!(right.index(), 0);
    assert_eq!(Rc::strong_count(&tokens), 3);
}
