use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

impl RegexPattern {
    fn new(pattern: &str, handler: RegexHandler) -> Self {
        RegexPattern {
            regex: Regex::new(pattern).unwrap(),
            handler,
        }
    }
}

lazy_static! {
    // Tried in order; every pattern is anchored, longer operators come first.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern::new(r"^\s+", skip_handler),
        RegexPattern::new(r"^//[^\n]*", skip_handler),
        RegexPattern::new(r"(?s)^/\*.*?\*/", skip_handler),
        RegexPattern::new(r"^panic!", MK_DEFAULT_HANDLER!(TokenKind::PanicBang, "panic!")),
        RegexPattern::new(r"^[a-zA-Z_][a-zA-Z0-9_]*(::[a-zA-Z_][a-zA-Z0-9_]*)?", symbol_handler),
        RegexPattern::new(r"^[0-9]+", number_handler),
        RegexPattern::new(r"^#[a-zA-Z0-9_\-]+", extension_handler),
        RegexPattern::new(r"^<\|", MK_DEFAULT_HANDLER!(TokenKind::OpenVariant, "<|")),
        RegexPattern::new(r"^\|>", MK_DEFAULT_HANDLER!(TokenKind::CloseVariant, "|>")),
        RegexPattern::new(r"^\|", MK_DEFAULT_HANDLER!(TokenKind::Pipe, "|")),
        RegexPattern::new(r"^\[", MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[")),
        RegexPattern::new(r"^\]", MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]")),
        RegexPattern::new(r"^\{", MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{")),
        RegexPattern::new(r"^\}", MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}")),
        RegexPattern::new(r"^\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(")),
        RegexPattern::new(r"^\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")")),
        RegexPattern::new(r"^==", MK_DEFAULT_HANDLER!(TokenKind::Equals, "==")),
        RegexPattern::new(r"^=>", MK_DEFAULT_HANDLER!(TokenKind::FatArrow, "=>")),
        RegexPattern::new(r"^=", MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=")),
        RegexPattern::new(r"^!=", MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=")),
        RegexPattern::new(r"^:=", MK_DEFAULT_HANDLER!(TokenKind::ColonEquals, ":=")),
        RegexPattern::new(r"^:", MK_DEFAULT_HANDLER!(TokenKind::Colon, ":")),
        RegexPattern::new(r"^<=", MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=")),
        RegexPattern::new(r"^<", MK_DEFAULT_HANDLER!(TokenKind::Less, "<")),
        RegexPattern::new(r"^>=", MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=")),
        RegexPattern::new(r"^>", MK_DEFAULT_HANDLER!(TokenKind::Greater, ">")),
        RegexPattern::new(r"^->", MK_DEFAULT_HANDLER!(TokenKind::Arrow, "->")),
        RegexPattern::new(r"^-", MK_DEFAULT_HANDLER!(TokenKind::Dash, "-")),
        RegexPattern::new(r"^\.", MK_DEFAULT_HANDLER!(TokenKind::Dot, ".")),
        RegexPattern::new(r"^;", MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";")),
        RegexPattern::new(r"^,", MK_DEFAULT_HANDLER!(TokenKind::Comma, ",")),
        RegexPattern::new(r"^\+", MK_DEFAULT_HANDLER!(TokenKind::Plus, "+")),
        RegexPattern::new(r"^/", MK_DEFAULT_HANDLER!(TokenKind::Slash, "/")),
        RegexPattern::new(r"^\*", MK_DEFAULT_HANDLER!(TokenKind::Star, "*")),
        RegexPattern::new(r"^&", MK_DEFAULT_HANDLER!(TokenKind::Ampersand, "&")),
    ];
}

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            pos: 0,
            tokens: vec![],
            source,
            file: file_name,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Span of the next `len` bytes.
    pub fn span_of(&self, len: usize) -> Span {
        Span {
            start: Position(self.pos as u32, Rc::clone(&self.file)),
            end: Position((self.pos + len) as u32, Rc::clone(&self.file)),
        }
    }

    /// Text matched by `regex` at the current position.
    fn matched(&self, regex: &Regex) -> String {
        regex
            .find(self.remainder())
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    }
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);
    lexer.advance_n(matched.len());
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);
    let span = lexer.span_of(matched.len());

    lexer.advance_n(matched.len());
    lexer.push(MK_TOKEN!(TokenKind::Number, matched, span));
}

fn extension_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);
    let span = lexer.span_of(matched.len());

    lexer.advance_n(matched.len());
    lexer.push(MK_TOKEN!(TokenKind::Extension, matched, span));
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) {
    let value = lexer.matched(regex);
    let span = lexer.span_of(value.len());
    let kind = RESERVED_LOOKUP
        .get(value.as_str())
        .copied()
        .unwrap_or(TokenKind::Identifier);

    lexer.advance_n(value.len());
    lexer.push(MK_TOKEN!(kind, value, span));
}

pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);

    while !lex.at_eof() {
        let pattern = PATTERNS
            .iter()
            .find(|pattern| pattern.regex.is_match(lex.remainder()));

        match pattern {
            Some(pattern) => (pattern.handler)(&mut lex, &pattern.regex),
            None => {
                let token = lex.remainder().chars().next().unwrap_or_default().to_string();
                let span = lex.span_of(token.len());
                return Err(Error::new(ErrorImpl::UnrecognisedToken { token }, span));
            }
        }
    }

    let span = lex.span_of(0);
    lex.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), span));

    log::trace!("tokenized {} into {} tokens", lex.file, lex.tokens.len());
    Ok(lex.tokens)
}
