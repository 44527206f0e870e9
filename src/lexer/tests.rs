//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords, built-ins and identifiers
//! - Natural literals and extensions
//! - Operators and punctuation
//! - Comments
//! - Error cases

use super::{lexer::tokenize, tokens::TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source.to_string(), Some("test.st".to_string()))
        .unwrap()
        .iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_keywords() {
    let source = "language core extend with fn return if then else let letrec in match as";

    assert_eq!(
        kinds(source),
        vec![
            TokenKind::Language,
            TokenKind::Core,
            TokenKind::Extend,
            TokenKind::With,
            TokenKind::Fn,
            TokenKind::Return,
            TokenKind::If,
            TokenKind::Then,
            TokenKind::Else,
            TokenKind::Let,
            TokenKind::Letrec,
            TokenKind::In,
            TokenKind::Match,
            TokenKind::As,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_builtins() {
    let source = "Nat::pred Nat::iszero Nat::rec List::head List::tail List::isempty succ cons fix";

    assert_eq!(
        kinds(source),
        vec![
            TokenKind::NatPred,
            TokenKind::NatIsZero,
            TokenKind::NatRec,
            TokenKind::ListHead,
            TokenKind::ListTail,
            TokenKind::ListIsEmpty,
            TokenKind::Succ,
            TokenKind::Cons,
            TokenKind::Fix,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_type_names_are_case_sensitive() {
    assert_eq!(
        kinds("Unit unit Bool Nat Top Bot"),
        vec![
            TokenKind::TypeUnit,
            TokenKind::Unit,
            TokenKind::TypeBool,
            TokenKind::TypeNat,
            TokenKind::TypeTop,
            TokenKind::TypeBottom,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_identifiers() {
    let source = "foo bar baz_123 _ CamelCase".to_string();
    let tokens = tokenize(source, Some("test.st".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[2].value, "baz_123");
    assert_eq!(tokens[3].kind, TokenKind::Identifier);
    assert_eq!(tokens[3].value, "_");
    assert_eq!(tokens[4].value, "CamelCase");
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_numbers_and_extensions() {
    let source = "42 0 #natural-literals #unit-type".to_string();
    let tokens = tokenize(source, Some("test.st".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].value, "0");
    assert_eq!(tokens[2].kind, TokenKind::Extension);
    assert_eq!(tokens[2].value, "#natural-literals");
    assert_eq!(tokens[3].value, "#unit-type");
}

#[test]
fn test_tokenize_variant_brackets() {
    assert_eq!(
        kinds("<| a = x |> | <= < |"),
        vec![
            TokenKind::OpenVariant,
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::Identifier,
            TokenKind::CloseVariant,
            TokenKind::Pipe,
            TokenKind::LessEquals,
            TokenKind::Less,
            TokenKind::Pipe,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_operators() {
    assert_eq!(
        kinds("+ - * / == != < > <= >= = := -> => & panic!"),
        vec![
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::LessEquals,
            TokenKind::GreaterEquals,
            TokenKind::Assignment,
            TokenKind::ColonEquals,
            TokenKind::Arrow,
            TokenKind::FatArrow,
            TokenKind::Ampersand,
            TokenKind::PanicBang,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_punctuation() {
    assert_eq!(
        kinds("( ) { } [ ] . , ; :"),
        vec![
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::OpenBracket,
            TokenKind::CloseBracket,
            TokenKind::Dot,
            TokenKind::Comma,
            TokenKind::Semicolon,
            TokenKind::Colon,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_comments() {
    let source = "// line comment\nfoo /* block\n comment */ bar";

    assert_eq!(
        kinds(source),
        vec![TokenKind::Identifier, TokenKind::Identifier, TokenKind::EOF]
    );
}

#[test]
fn test_token_spans_are_byte_offsets() {
    let tokens = tokenize("fn  main".to_string(), Some("test.st".to_string())).unwrap();

    assert_eq!(tokens[0].span.start.0, 0);
    assert_eq!(tokens[0].span.end.0, 2);
    assert_eq!(tokens[1].span.start.0, 4);
    assert_eq!(tokens[1].span.end.0, 8);
    assert_eq!(tokens[2].span.start.0, 8);
}

#[test]
fn test_tokenize_unrecognised_character() {
    let error = tokenize("fn main @".to_string(), Some("test.st".to_string())).unwrap_err();

    assert_eq!(error.get_error_name(), "ERROR_UNRECOGNISED_TOKEN");
    assert_eq!(error.get_position().0, 8);
}
