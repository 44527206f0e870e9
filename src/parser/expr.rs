use crate::{
    ast::{
        ast::ParamDecl,
        expressions::{BinaryOperator, Binding, Expr, ExprKind, MatchCase, PatternBinding},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{
    lookups::BindingPower, parser::Parser, patterns::parse_pattern, types::parse_type,
};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: parser.current_token().value.clone(),
                },
                parser.current_token().span.clone(),
            ))
        }
    };

    let mut left = nud(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    loop {
        let token_kind = parser.current_token_kind();
        let token_bp = *parser
            .get_bp_lookup()
            .get(&token_kind)
            .unwrap_or(&BindingPower::Default);
        if token_bp <= bp {
            break;
        }

        let led = match parser.get_led_lookup().get(&token_kind) {
            Some(led) => *led,
            None => return Err(parser.unexpected("expected an operator")),
        };
        left = led(parser, left, token_bp)?;
    }

    Ok(left)
}

/// Parses `item (, item)*` up to and including `close`. The list may be empty.
pub fn parse_comma_separated<T>(
    parser: &mut Parser,
    close: TokenKind,
    mut item: impl FnMut(&mut Parser) -> Result<T, Error>,
) -> Result<Vec<T>, Error> {
    let mut items = vec![];

    while parser.current_token_kind() != close {
        items.push(item(parser)?);
        if !parser.eat(TokenKind::Comma) {
            break;
        }
    }

    parser.expect(close)?;
    Ok(items)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance().clone();

    let kind = match token.kind {
        TokenKind::Number => match token.value.parse() {
            Ok(value) => ExprKind::ConstInt(value),
            Err(_) => {
                return Err(Error::new(
                    ErrorImpl::NumberParseError { token: token.value },
                    token.span,
                ))
            }
        },
        TokenKind::Identifier => ExprKind::Var(token.value),
        TokenKind::True => ExprKind::ConstTrue,
        TokenKind::False => ExprKind::ConstFalse,
        TokenKind::Unit => ExprKind::ConstUnit,
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken { token: token.value },
                token.span,
            ))
        }
    };

    Ok(Expr::new(kind, token.span))
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let operator = match operator_token.kind {
        TokenKind::Plus => BinaryOperator::Add,
        TokenKind::Dash => BinaryOperator::Subtract,
        TokenKind::Star => BinaryOperator::Multiply,
        TokenKind::Slash => BinaryOperator::Divide,
        TokenKind::Less => BinaryOperator::LessThan,
        TokenKind::LessEquals => BinaryOperator::LessThanOrEqual,
        TokenKind::Greater => BinaryOperator::GreaterThan,
        TokenKind::GreaterEquals => BinaryOperator::GreaterThanOrEqual,
        TokenKind::Equals => BinaryOperator::Equal,
        TokenKind::NotEquals => BinaryOperator::NotEqual,
        TokenKind::And => BinaryOperator::And,
        TokenKind::Or => BinaryOperator::Or,
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: operator_token.value,
                },
                operator_token.span,
            ))
        }
    };

    let right = parse_expr(parser, bp)?;
    let span = left.span.to(&right.span);

    Ok(Expr::new(
        ExprKind::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    ))
}

/// `a; b`. A semicolon directly before a closing token terminates `a`.
pub fn parse_sequence_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();

    if parser.current_token().is_one_of_many(&[
        TokenKind::CloseCurly,
        TokenKind::CloseParen,
        TokenKind::EOF,
    ]) {
        return Ok(left);
    }

    let right = parse_expr(parser, bp)?;
    Ok(Expr::new(
        ExprKind::Unsupported {
            construct: String::from("sequencing"),
        },
        left.span.to(&right.span),
    ))
}

pub fn parse_assignment_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();
    let rhs = parse_expr(parser, bp)?;

    Ok(Expr::new(
        ExprKind::Unsupported {
            construct: String::from("assignment"),
        },
        left.span.to(&rhs.span),
    ))
}

pub fn parse_ascription_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.expect(TokenKind::As)?;
    let ascribed = parse_type(parser, BindingPower::Default)?;
    let span = left.span.to(&ascribed.span);

    Ok(Expr::new(
        ExprKind::TypeAscription {
            expr: Box::new(left),
            ascribed,
        },
        span,
    ))
}

pub fn parse_cast_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.expect(TokenKind::Cast)?;
    parser.expect(TokenKind::As)?;
    let target = parse_type(parser, BindingPower::Default)?;

    Ok(Expr::new(
        ExprKind::Unsupported {
            construct: String::from("type cast"),
        },
        left.span.to(&target.span),
    ))
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let arguments = parse_comma_separated(parser, TokenKind::CloseParen, |parser| {
        parse_expr(parser, BindingPower::Default)
    })?;

    let span = parser.span_from(&left.span);
    Ok(Expr::new(
        ExprKind::Application {
            function: Box::new(left),
            arguments,
        },
        span,
    ))
}

/// `e.1` projects a tuple component, `e.label` a record field.
pub fn parse_dot_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.expect(TokenKind::Dot)?;
    let member = parser.advance().clone();
    let span = left.span.to(&member.span);

    let kind = match member.kind {
        TokenKind::Number => match member.value.parse() {
            Ok(index) => ExprKind::DotTuple {
                expr: Box::new(left),
                index,
            },
            Err(_) => {
                return Err(Error::new(
                    ErrorImpl::NumberParseError {
                        token: member.value,
                    },
                    member.span,
                ))
            }
        },
        TokenKind::Identifier => ExprKind::DotRecord {
            expr: Box::new(left),
            label: member.value,
        },
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: member.value,
                    message: String::from("expected a field label or a tuple index"),
                },
                member.span,
            ))
        }
    };

    Ok(Expr::new(kind, span))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

/// Built-in forms taking one parenthesised argument, e.g. `succ(n)`.
pub fn parse_unary_builtin_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let keyword = parser.advance().clone();
    parser.expect(TokenKind::OpenParen)?;
    let argument = Box::new(parse_expr(parser, BindingPower::Default)?);
    parser.expect(TokenKind::CloseParen)?;

    let kind = match keyword.kind {
        TokenKind::Succ => ExprKind::Succ(argument),
        TokenKind::NatPred => ExprKind::Pred(argument),
        TokenKind::NatIsZero => ExprKind::IsZero(argument),
        TokenKind::Not => ExprKind::Not(argument),
        TokenKind::Fix => ExprKind::Fix(argument),
        TokenKind::Inl => ExprKind::Inl(argument),
        TokenKind::Inr => ExprKind::Inr(argument),
        TokenKind::ListHead => ExprKind::ListHead(argument),
        TokenKind::ListTail => ExprKind::ListTail(argument),
        TokenKind::ListIsEmpty => ExprKind::ListIsEmpty(argument),
        TokenKind::New => ExprKind::Unsupported {
            construct: String::from("reference allocation"),
        },
        TokenKind::Throw => ExprKind::Unsupported {
            construct: String::from("throw"),
        },
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: keyword.value,
                },
                keyword.span,
            ))
        }
    };

    Ok(Expr::new(kind, parser.span_from(&keyword.span)))
}

pub fn parse_nat_rec_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let keyword = parser.expect(TokenKind::NatRec)?;
    parser.expect(TokenKind::OpenParen)?;
    let n = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Comma)?;
    let initial = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Comma)?;
    let step = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::new(
        ExprKind::NatRec {
            n: Box::new(n),
            initial: Box::new(initial),
            step: Box::new(step),
        },
        parser.span_from(&keyword.span),
    ))
}

pub fn parse_cons_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let keyword = parser.expect(TokenKind::Cons)?;
    parser.expect(TokenKind::OpenParen)?;
    let head = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Comma)?;
    let tail = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::new(
        ExprKind::ConsList {
            head: Box::new(head),
            tail: Box::new(tail),
        },
        parser.span_from(&keyword.span),
    ))
}

/// `{a = 1, b = true}` is a record, `{1, true}` a tuple.
pub fn parse_tuple_or_record_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let open = parser.expect(TokenKind::OpenCurly)?;

    let is_record = parser.current_token_kind() == TokenKind::Identifier
        && parser.peek_kind(1) == TokenKind::Assignment;

    let kind = if is_record {
        ExprKind::Record(parse_comma_separated(parser, TokenKind::CloseCurly, |parser| {
            let label = parser.expect(TokenKind::Identifier)?;
            parser.expect(TokenKind::Assignment)?;
            let value = parse_expr(parser, BindingPower::Default)?;
            Ok(Binding {
                span: label.span.to(&value.span),
                label: label.value,
                value,
            })
        })?)
    } else {
        ExprKind::Tuple(parse_comma_separated(parser, TokenKind::CloseCurly, |parser| {
            parse_expr(parser, BindingPower::Default)
        })?)
    };

    Ok(Expr::new(kind, parser.span_from(&open.span)))
}

pub fn parse_list_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let open = parser.expect(TokenKind::OpenBracket)?;
    let items = parse_comma_separated(parser, TokenKind::CloseBracket, |parser| {
        parse_expr(parser, BindingPower::Default)
    })?;

    Ok(Expr::new(ExprKind::List(items), parser.span_from(&open.span)))
}

/// `<| label = payload |>` or the nullary `<| label |>`
pub fn parse_variant_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let open = parser.expect(TokenKind::OpenVariant)?;
    let label = parser.expect(TokenKind::Identifier)?.value;

    let payload = if parser.eat(TokenKind::Assignment) {
        Some(Box::new(parse_expr(parser, BindingPower::Default)?))
    } else {
        None
    };
    parser.expect(TokenKind::CloseVariant)?;

    Ok(Expr::new(
        ExprKind::Variant { label, payload },
        parser.span_from(&open.span),
    ))
}

pub fn parse_param_decl(parser: &mut Parser) -> Result<ParamDecl, Error> {
    let name = parser.expect(TokenKind::Identifier)?;
    parser.expect(TokenKind::Colon)?;
    let param_type = parse_type(parser, BindingPower::Default)?;

    Ok(ParamDecl {
        span: name.span.to(&param_type.span),
        name: name.value,
        param_type,
    })
}

/// `fn (x : T, ...) { return body }`
pub fn parse_abstraction_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let keyword = parser.expect(TokenKind::Fn)?;
    parser.expect(TokenKind::OpenParen)?;
    let params = parse_comma_separated(parser, TokenKind::CloseParen, parse_param_decl)?;

    parser.expect(TokenKind::OpenCurly)?;
    parser.expect(TokenKind::Return)?;
    let body = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseCurly)?;

    Ok(Expr::new(
        ExprKind::Abstraction {
            params,
            body: Box::new(body),
        },
        parser.span_from(&keyword.span),
    ))
}

pub fn parse_if_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let keyword = parser.expect(TokenKind::If)?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Then)?;
    let then_expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Else)?;
    let else_expr = parse_expr(parser, BindingPower::Sequence)?;

    Ok(Expr::new(
        ExprKind::If {
            condition: Box::new(condition),
            then_expr: Box::new(then_expr),
            else_expr: Box::new(else_expr),
        },
        parser.span_from(&keyword.span),
    ))
}

/// `let p = e, ... in body` and `letrec p = e, ... in body`
pub fn parse_let_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let keyword = parser.advance().clone();

    let mut bindings = vec![];
    loop {
        let pattern = parse_pattern(parser)?;
        parser.expect(TokenKind::Assignment)?;
        let rhs = parse_expr(parser, BindingPower::Default)?;
        bindings.push(PatternBinding {
            span: pattern.span.to(&rhs.span),
            pattern,
            rhs,
        });

        if !parser.eat(TokenKind::Comma) {
            break;
        }
    }

    parser.expect(TokenKind::In)?;
    let body = Box::new(parse_expr(parser, BindingPower::Sequence)?);
    let span = parser.span_from(&keyword.span);

    let kind = if keyword.kind == TokenKind::Letrec {
        ExprKind::LetRec { bindings, body }
    } else {
        ExprKind::Let { bindings, body }
    };

    Ok(Expr::new(kind, span))
}

fn parse_match_case(parser: &mut Parser) -> Result<MatchCase, Error> {
    let pattern = parse_pattern(parser)?;
    parser.expect(TokenKind::FatArrow)?;
    let body = parse_expr(parser, BindingPower::Default)?;

    Ok(MatchCase {
        span: pattern.span.to(&body.span),
        pattern,
        body,
    })
}

/// `match e { p1 => e1 | p2 => e2 }`, a leading `|` is allowed
pub fn parse_match_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let keyword = parser.expect(TokenKind::Match)?;
    let scrutinee = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::OpenCurly)?;

    let mut cases = vec![];
    if parser.current_token_kind() != TokenKind::CloseCurly {
        parser.eat(TokenKind::Pipe);
        cases.push(parse_match_case(parser)?);

        while parser.eat(TokenKind::Pipe) {
            cases.push(parse_match_case(parser)?);
        }
    }
    parser.expect(TokenKind::CloseCurly)?;

    Ok(Expr::new(
        ExprKind::Match {
            scrutinee: Box::new(scrutinee),
            cases,
        },
        parser.span_from(&keyword.span),
    ))
}

pub fn parse_deref_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let star = parser.expect(TokenKind::Star)?;
    let operand = parse_expr(parser, BindingPower::Call)?;

    Ok(Expr::new(
        ExprKind::Unsupported {
            construct: String::from("dereference"),
        },
        star.span.to(&operand.span),
    ))
}

pub fn parse_panic_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.expect(TokenKind::PanicBang)?;

    Ok(Expr::new(
        ExprKind::Unsupported {
            construct: String::from("panic"),
        },
        token.span,
    ))
}

/// `try { e } with { e }` or `try { e } catch { p => e }`
pub fn parse_try_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let keyword = parser.expect(TokenKind::Try)?;
    parser.expect(TokenKind::OpenCurly)?;
    parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseCurly)?;

    match parser.current_token_kind() {
        TokenKind::With => {
            parser.advance();
            parser.expect(TokenKind::OpenCurly)?;
            parse_expr(parser, BindingPower::Default)?;
        }
        TokenKind::Catch => {
            parser.advance();
            parser.expect(TokenKind::OpenCurly)?;
            parse_match_case(parser)?;
        }
        _ => return Err(parser.unexpected("expected `with` or `catch`")),
    }
    parser.expect(TokenKind::CloseCurly)?;

    Ok(Expr::new(
        ExprKind::Unsupported {
            construct: String::from("exception handling"),
        },
        parser.span_from(&keyword.span),
    ))
}
