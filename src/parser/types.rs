//! Type parsing implementation.
//!
//! This module handles parsing of type expressions. It supports:
//!
//! - Primitive types (`Bool`, `Nat`, `Unit`, `Top`, `Bot`)
//! - Function types `fn(A, B) -> C`
//! - Tuple types `{A, B}` and record types `{a : A}`
//! - List types `[T]`, variant types `<| a : A, b |>` and references `&T`
//! - Sum types `A + B`
//! - Named types, kept for the checker to reject
//!
//! Similar to expression parsing, it uses NUD/LED handlers with
//! binding powers for parsing compound type expressions.

use std::collections::HashMap;

use crate::{
    ast::types::{RecordFieldType, TypeExpr, TypeExprKind, VariantFieldType},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{expr::parse_comma_separated, lookups::BindingPower, parser::Parser};

/// Type alias for type null denotation handler functions.
pub type TypeNUDHandler = fn(&mut Parser) -> Result<TypeExpr, Error>;

/// Type alias for type left denotation handler functions.
pub type TypeLEDHandler = fn(&mut Parser, TypeExpr, BindingPower) -> Result<TypeExpr, Error>;

/// Type alias for type NUD lookup table.
pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;

/// Type alias for type LED lookup table.
pub type TypeLEDLookup = HashMap<TokenKind, TypeLEDHandler>;

/// Type alias for type binding power lookup table.
pub type TypeBPLookup = HashMap<TokenKind, BindingPower>;

/// Initializes the type parsing lookup tables.
///
/// Registers NUD and LED handlers for parsing type expressions.
///
/// # Arguments
///
/// * `parser` - Mutable reference to the parser to initialize
pub fn create_token_type_lookups(parser: &mut Parser) {
    parser.type_nud(TokenKind::TypeBool, parse_primitive_type);
    parser.type_nud(TokenKind::TypeNat, parse_primitive_type);
    parser.type_nud(TokenKind::TypeUnit, parse_primitive_type);
    parser.type_nud(TokenKind::TypeTop, parse_primitive_type);
    parser.type_nud(TokenKind::TypeBottom, parse_primitive_type);
    parser.type_nud(TokenKind::Identifier, parse_named_type);
    parser.type_nud(TokenKind::Fn, parse_fun_type);
    parser.type_nud(TokenKind::OpenCurly, parse_tuple_or_record_type);
    parser.type_nud(TokenKind::OpenBracket, parse_list_type);
    parser.type_nud(TokenKind::OpenVariant, parse_variant_type);
    parser.type_nud(TokenKind::Ampersand, parse_ref_type);
    parser.type_nud(TokenKind::OpenParen, parse_grouping_type);

    parser.type_led(TokenKind::Plus, BindingPower::Additive, parse_sum_type);
}

/// Parses a type expression.
///
/// Works the same way as `parse_expr`: one NUD handler for the leading
/// token, then LED handlers while the next token binds tighter than `bp`.
pub fn parse_type(parser: &mut Parser, bp: BindingPower) -> Result<TypeExpr, Error> {
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_type_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => return Err(parser.unexpected("expected a type")),
    };

    let mut left = nud(parser)?;

    loop {
        let token_kind = parser.current_token_kind();
        let token_bp = *parser
            .get_type_bp_lookup()
            .get(&token_kind)
            .unwrap_or(&BindingPower::Default);
        if token_bp <= bp {
            break;
        }

        let led = match parser.get_type_led_lookup().get(&token_kind) {
            Some(led) => *led,
            None => return Err(parser.unexpected("expected a type operator")),
        };
        left = led(parser, left, token_bp)?;
    }

    Ok(left)
}

pub fn parse_primitive_type(parser: &mut Parser) -> Result<TypeExpr, Error> {
    let token = parser.advance().clone();
    let kind = match token.kind {
        TokenKind::TypeBool => TypeExprKind::Bool,
        TokenKind::TypeNat => TypeExprKind::Nat,
        TokenKind::TypeUnit => TypeExprKind::Unit,
        TokenKind::TypeTop => TypeExprKind::Top,
        TokenKind::TypeBottom => TypeExprKind::Bottom,
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken { token: token.value },
                token.span,
            ))
        }
    };

    Ok(TypeExpr::new(kind, token.span))
}

pub fn parse_named_type(parser: &mut Parser) -> Result<TypeExpr, Error> {
    let token = parser.expect(TokenKind::Identifier)?;
    Ok(TypeExpr::new(TypeExprKind::Named(token.value), token.span))
}

pub fn parse_fun_type(parser: &mut Parser) -> Result<TypeExpr, Error> {
    let keyword = parser.expect(TokenKind::Fn)?;
    parser.expect(TokenKind::OpenParen)?;
    let params = parse_comma_separated(parser, TokenKind::CloseParen, |parser| {
        parse_type(parser, BindingPower::Default)
    })?;
    parser.expect(TokenKind::Arrow)?;
    let ret = parse_type(parser, BindingPower::Default)?;

    Ok(TypeExpr::new(
        TypeExprKind::Fun {
            params,
            ret: Box::new(ret),
        },
        parser.span_from(&keyword.span),
    ))
}

pub fn parse_tuple_or_record_type(parser: &mut Parser) -> Result<TypeExpr, Error> {
    let open = parser.expect(TokenKind::OpenCurly)?;

    let is_record = parser.current_token_kind() == TokenKind::Identifier
        && parser.peek_kind(1) == TokenKind::Colon;

    let kind = if is_record {
        TypeExprKind::Record(parse_comma_separated(
            parser,
            TokenKind::CloseCurly,
            |parser| {
                let label = parser.expect(TokenKind::Identifier)?;
                parser.expect(TokenKind::Colon)?;
                let field_type = parse_type(parser, BindingPower::Default)?;
                Ok(RecordFieldType {
                    span: label.span.to(&field_type.span),
                    label: label.value,
                    field_type,
                })
            },
        )?)
    } else {
        TypeExprKind::Tuple(parse_comma_separated(
            parser,
            TokenKind::CloseCurly,
            |parser| parse_type(parser, BindingPower::Default),
        )?)
    };

    Ok(TypeExpr::new(kind, parser.span_from(&open.span)))
}

pub fn parse_list_type(parser: &mut Parser) -> Result<TypeExpr, Error> {
    let open = parser.expect(TokenKind::OpenBracket)?;
    let item = parse_type(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseBracket)?;

    Ok(TypeExpr::new(
        TypeExprKind::List(Box::new(item)),
        parser.span_from(&open.span),
    ))
}

pub fn parse_variant_type(parser: &mut Parser) -> Result<TypeExpr, Error> {
    let open = parser.expect(TokenKind::OpenVariant)?;
    let fields = parse_comma_separated(parser, TokenKind::CloseVariant, |parser| {
        let label = parser.expect(TokenKind::Identifier)?;
        let payload = if parser.eat(TokenKind::Colon) {
            Some(parse_type(parser, BindingPower::Default)?)
        } else {
            None
        };

        Ok(VariantFieldType {
            span: parser.span_from(&label.span),
            label: label.value,
            payload,
        })
    })?;

    Ok(TypeExpr::new(
        TypeExprKind::Variant(fields),
        parser.span_from(&open.span),
    ))
}

pub fn parse_ref_type(parser: &mut Parser) -> Result<TypeExpr, Error> {
    let ampersand = parser.expect(TokenKind::Ampersand)?;
    let referenced = parse_type(parser, BindingPower::Call)?;
    let span = ampersand.span.to(&referenced.span);

    Ok(TypeExpr::new(TypeExprKind::Ref(Box::new(referenced)), span))
}

pub fn parse_grouping_type(parser: &mut Parser) -> Result<TypeExpr, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let inner = parse_type(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(inner)
}

pub fn parse_sum_type(
    parser: &mut Parser,
    left: TypeExpr,
    bp: BindingPower,
) -> Result<TypeExpr, Error> {
    parser.expect(TokenKind::Plus)?;
    let right = parse_type(parser, bp)?;
    let span = left.span.to(&right.span);

    Ok(TypeExpr::new(
        TypeExprKind::Sum(Box::new(left), Box::new(right)),
        span,
    ))
}
