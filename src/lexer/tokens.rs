use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("language", TokenKind::Language);
        map.insert("core", TokenKind::Core);
        map.insert("extend", TokenKind::Extend);
        map.insert("with", TokenKind::With);
        map.insert("fn", TokenKind::Fn);
        map.insert("return", TokenKind::Return);
        map.insert("generic", TokenKind::Generic);
        map.insert("inline", TokenKind::Inline);
        map.insert("type", TokenKind::Type);
        map.insert("exception", TokenKind::Exception);
        map.insert("variant", TokenKind::Variant);
        map.insert("if", TokenKind::If);
        map.insert("then", TokenKind::Then);
        map.insert("else", TokenKind::Else);
        map.insert("let", TokenKind::Let);
        map.insert("letrec", TokenKind::Letrec);
        map.insert("in", TokenKind::In);
        map.insert("match", TokenKind::Match);
        map.insert("as", TokenKind::As);
        map.insert("cast", TokenKind::Cast);
        map.insert("inl", TokenKind::Inl);
        map.insert("inr", TokenKind::Inr);
        map.insert("cons", TokenKind::Cons);
        map.insert("succ", TokenKind::Succ);
        map.insert("fix", TokenKind::Fix);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("unit", TokenKind::Unit);
        map.insert("and", TokenKind::And);
        map.insert("or", TokenKind::Or);
        map.insert("not", TokenKind::Not);
        map.insert("new", TokenKind::New);
        map.insert("throw", TokenKind::Throw);
        map.insert("try", TokenKind::Try);
        map.insert("catch", TokenKind::Catch);
        map.insert("Nat::pred", TokenKind::NatPred);
        map.insert("Nat::iszero", TokenKind::NatIsZero);
        map.insert("Nat::rec", TokenKind::NatRec);
        map.insert("List::head", TokenKind::ListHead);
        map.insert("List::tail", TokenKind::ListTail);
        map.insert("List::isempty", TokenKind::ListIsEmpty);
        map.insert("Bool", TokenKind::TypeBool);
        map.insert("Nat", TokenKind::TypeNat);
        map.insert("Unit", TokenKind::TypeUnit);
        map.insert("Top", TokenKind::TypeTop);
        map.insert("Bot", TokenKind::TypeBottom);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    Identifier,
    Extension, // #name

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,
    OpenVariant,  // <|
    CloseVariant, // |>

    Assignment,  // =
    ColonEquals, // :=
    Equals,      // ==
    NotEquals,   // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Dot,
    Semicolon,
    Colon,
    Comma,
    Pipe,
    Arrow,    // ->
    FatArrow, // =>
    Ampersand,

    Plus,
    Dash,
    Slash,
    Star,

    PanicBang, // panic!

    // Reserved
    Language,
    Core,
    Extend,
    With,
    Fn,
    Return,
    Generic,
    Inline,
    Type,
    Exception,
    Variant,
    If,
    Then,
    Else,
    Let,
    Letrec,
    In,
    Match,
    As,
    Cast,
    Inl,
    Inr,
    Cons,
    Succ,
    Fix,
    True,
    False,
    Unit,
    And,
    Or,
    Not,
    New,
    Throw,
    Try,
    Catch,
    NatPred,
    NatIsZero,
    NatRec,
    ListHead,
    ListTail,
    ListIsEmpty,
    TypeBool,
    TypeNat,
    TypeUnit,
    TypeTop,
    TypeBottom,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    pub fn is_one_of_many(&self, tokens: &[TokenKind]) -> bool {
        tokens.contains(&self.kind)
    }
}
