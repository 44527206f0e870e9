//! Pattern parsing for `let`, `letrec` and `match`.
//!
//! Patterns have no operators besides the postfix `as T` ascription, so they
//! are parsed by plain recursive descent rather than through lookup tables.

use crate::{
    ast::patterns::{LabelledPattern, Pattern, PatternKind},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{expr::parse_comma_separated, lookups::BindingPower, parser::Parser, types::parse_type};

pub fn parse_pattern(parser: &mut Parser) -> Result<Pattern, Error> {
    let mut pattern = parse_primary_pattern(parser)?;

    while parser.eat(TokenKind::As) {
        let ascribed = parse_type(parser, BindingPower::Default)?;
        let span = pattern.span.to(&ascribed.span);
        pattern = Pattern::new(
            PatternKind::Ascription {
                pattern: Box::new(pattern),
                ascribed,
            },
            span,
        );
    }

    Ok(pattern)
}

/// `keyword(p)` as used by `succ`, `inl` and `inr`
fn parse_wrapped_pattern(parser: &mut Parser) -> Result<Box<Pattern>, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let inner = parse_pattern(parser)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(Box::new(inner))
}

fn parse_primary_pattern(parser: &mut Parser) -> Result<Pattern, Error> {
    let token = parser.advance().clone();

    let kind = match token.kind {
        TokenKind::Identifier => PatternKind::Var(token.value),
        TokenKind::True => PatternKind::True,
        TokenKind::False => PatternKind::False,
        TokenKind::Unit => PatternKind::Unit,
        TokenKind::Number => match token.value.parse() {
            Ok(value) => PatternKind::Int(value),
            Err(_) => {
                return Err(Error::new(
                    ErrorImpl::NumberParseError { token: token.value },
                    token.span,
                ))
            }
        },
        TokenKind::Succ => PatternKind::Succ(parse_wrapped_pattern(parser)?),
        TokenKind::Inl => PatternKind::Inl(parse_wrapped_pattern(parser)?),
        TokenKind::Inr => PatternKind::Inr(parse_wrapped_pattern(parser)?),
        TokenKind::Cons => {
            parser.expect(TokenKind::OpenParen)?;
            let head = parse_pattern(parser)?;
            parser.expect(TokenKind::Comma)?;
            let tail = parse_pattern(parser)?;
            parser.expect(TokenKind::CloseParen)?;

            PatternKind::Cons {
                head: Box::new(head),
                tail: Box::new(tail),
            }
        }
        TokenKind::OpenVariant => {
            let label = parser.expect(TokenKind::Identifier)?.value;
            let payload = if parser.eat(TokenKind::Assignment) {
                Some(Box::new(parse_pattern(parser)?))
            } else {
                None
            };
            parser.expect(TokenKind::CloseVariant)?;

            PatternKind::Variant { label, payload }
        }
        TokenKind::OpenCurly => {
            let is_record = parser.current_token_kind() == TokenKind::Identifier
                && parser.peek_kind(1) == TokenKind::Assignment;

            if is_record {
                PatternKind::Record(parse_comma_separated(
                    parser,
                    TokenKind::CloseCurly,
                    |parser| {
                        let label = parser.expect(TokenKind::Identifier)?;
                        parser.expect(TokenKind::Assignment)?;
                        let pattern = parse_pattern(parser)?;
                        Ok(LabelledPattern {
                            span: label.span.to(&pattern.span),
                            label: label.value,
                            pattern,
                        })
                    },
                )?)
            } else {
                PatternKind::Tuple(parse_comma_separated(
                    parser,
                    TokenKind::CloseCurly,
                    parse_pattern,
                )?)
            }
        }
        TokenKind::OpenBracket => PatternKind::List(parse_comma_separated(
            parser,
            TokenKind::CloseBracket,
            parse_pattern,
        )?),
        TokenKind::OpenParen => {
            let inner = parse_pattern(parser)?;
            parser.expect(TokenKind::CloseParen)?;
            PatternKind::Parenthesized(Box::new(inner))
        }
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: token.value,
                    message: String::from("expected a pattern"),
                },
                token.span,
            ))
        }
    };

    Ok(Pattern::new(kind, parser.span_from(&token.span)))
}
