use crate::{
    ast::ast::{Decl, DeclKind, FunDecl, Program},
    errors::errors::Error,
    lexer::tokens::{Token, TokenKind},
};

use super::{
    expr::{parse_comma_separated, parse_expr, parse_param_decl},
    lookups::BindingPower,
    parser::Parser,
    types::parse_type,
};

/// `language core; extend with #a, #b; <decls>`
pub fn parse_program(parser: &mut Parser) -> Result<Program, Error> {
    let start = parser.current_token().span.clone();

    parser.expect(TokenKind::Language)?;
    let language = parser.expect(TokenKind::Core)?.value;
    parser.expect(TokenKind::Semicolon)?;

    let mut extensions = vec![];
    while parser.eat(TokenKind::Extend) {
        parser.expect(TokenKind::With)?;
        loop {
            extensions.push(parser.expect(TokenKind::Extension)?.value);
            if !parser.eat(TokenKind::Comma) {
                break;
            }
        }
        parser.expect(TokenKind::Semicolon)?;
    }

    let mut decls = vec![];
    while parser.has_tokens() {
        decls.push(parse_decl(parser)?);
    }

    Ok(Program {
        language,
        extensions,
        decls,
        span: parser.span_from(&start),
    })
}

pub fn parse_decl(parser: &mut Parser) -> Result<Decl, Error> {
    let token_kind = parser.current_token_kind();
    let handler = match parser.get_decl_lookup().get(&token_kind) {
        Some(handler) => *handler,
        None => return Err(parser.unexpected("expected a declaration")),
    };

    handler(parser)
}

fn is_decl_start(parser: &Parser) -> bool {
    parser.get_decl_lookup().contains_key(&parser.current_token_kind())
}

/// Everything after the function name: parameters, return type, nested
/// declarations and the `return` body.
fn parse_fun_rest(
    parser: &mut Parser,
    start: &Token,
    name: String,
    is_inline: bool,
) -> Result<Decl, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let params = parse_comma_separated(parser, TokenKind::CloseParen, parse_param_decl)?;

    let return_type = if parser.eat(TokenKind::Arrow) {
        Some(parse_type(parser, BindingPower::Default)?)
    } else {
        None
    };

    parser.expect(TokenKind::OpenCurly)?;
    let mut nested_decls = vec![];
    while is_decl_start(parser) {
        nested_decls.push(parse_decl(parser)?);
    }
    parser.expect(TokenKind::Return)?;
    let body = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseCurly)?;

    Ok(Decl {
        kind: DeclKind::Fun(FunDecl {
            name,
            is_inline,
            params,
            return_type,
            nested_decls,
            body: Box::new(body),
        }),
        span: parser.span_from(&start.span),
    })
}

pub fn parse_fun_decl(parser: &mut Parser) -> Result<Decl, Error> {
    let start = parser.current_token().clone();
    let is_inline = parser.eat(TokenKind::Inline);
    parser.expect(TokenKind::Fn)?;
    let name = parser.expect(TokenKind::Identifier)?.value;

    parse_fun_rest(parser, &start, name, is_inline)
}

/// `generic fn name[X, Y](...)`, parsed in full and kept as unsupported
pub fn parse_generic_fun_decl(parser: &mut Parser) -> Result<Decl, Error> {
    let start = parser.expect(TokenKind::Generic)?;
    parser.expect(TokenKind::Fn)?;
    let name = parser.expect(TokenKind::Identifier)?.value;

    parser.expect(TokenKind::OpenBracket)?;
    parse_comma_separated(parser, TokenKind::CloseBracket, |parser| {
        parser.expect(TokenKind::Identifier)
    })?;

    let decl = parse_fun_rest(parser, &start, name, false)?;
    Ok(Decl {
        kind: DeclKind::Unsupported {
            construct: String::from("generic function"),
        },
        span: decl.span,
    })
}

/// `type Name = T`
pub fn parse_type_alias_decl(parser: &mut Parser) -> Result<Decl, Error> {
    let start = parser.expect(TokenKind::Type)?;
    parser.expect(TokenKind::Identifier)?;
    parser.expect(TokenKind::Assignment)?;
    parse_type(parser, BindingPower::Default)?;

    Ok(Decl {
        kind: DeclKind::Unsupported {
            construct: String::from("type alias"),
        },
        span: parser.span_from(&start.span),
    })
}

/// `exception type = T` or `exception variant label : T`
pub fn parse_exception_decl(parser: &mut Parser) -> Result<Decl, Error> {
    let start = parser.expect(TokenKind::Exception)?;

    match parser.current_token_kind() {
        TokenKind::Type => {
            parser.advance();
            parser.expect(TokenKind::Assignment)?;
        }
        TokenKind::Variant => {
            parser.advance();
            parser.expect(TokenKind::Identifier)?;
            parser.expect(TokenKind::Colon)?;
        }
        _ => return Err(parser.unexpected("expected `type` or `variant`")),
    }
    parse_type(parser, BindingPower::Default)?;

    Ok(Decl {
        kind: DeclKind::Unsupported {
            construct: String::from("exception declaration"),
        },
        span: parser.span_from(&start.span),
    })
}
