use std::collections::HashMap;

use crate::{
    ast::{ast::Decl, expressions::Expr},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{decl::*, expr::*, parser::Parser};

#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Sequence,
    Assignment,
    Relational,
    Additive,
    Multiplicative,
    Ascription,
    Call,
    Member,
    Primary,
}

pub type DeclHandler = fn(&mut Parser) -> Result<Decl, Error>;
pub type NUDHandler = fn(&mut Parser) -> Result<Expr, Error>;
pub type LEDHandler = fn(&mut Parser, Expr, BindingPower) -> Result<Expr, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    parser.led(TokenKind::Semicolon, BindingPower::Sequence, parse_sequence_expr);
    parser.led(TokenKind::ColonEquals, BindingPower::Assignment, parse_assignment_expr);

    // Relational
    parser.led(TokenKind::Less, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::LessEquals, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::Greater, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::GreaterEquals, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::Equals, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::NotEquals, BindingPower::Relational, parse_binary_expr);

    // Additive and multiplicative
    parser.led(TokenKind::Plus, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Dash, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Or, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Star, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Slash, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::And, BindingPower::Multiplicative, parse_binary_expr);

    parser.led(TokenKind::As, BindingPower::Ascription, parse_ascription_expr);
    parser.led(TokenKind::Cast, BindingPower::Ascription, parse_cast_expr);

    parser.led(TokenKind::OpenParen, BindingPower::Call, parse_call_expr);

    // Member
    parser.led(TokenKind::Dot, BindingPower::Member, parse_dot_expr);

    // Literals and symbols
    parser.nud(TokenKind::Number, parse_primary_expr);
    parser.nud(TokenKind::Identifier, parse_primary_expr);
    parser.nud(TokenKind::True, parse_primary_expr);
    parser.nud(TokenKind::False, parse_primary_expr);
    parser.nud(TokenKind::Unit, parse_primary_expr);

    // Built-ins applied to one argument
    parser.nud(TokenKind::Succ, parse_unary_builtin_expr);
    parser.nud(TokenKind::NatPred, parse_unary_builtin_expr);
    parser.nud(TokenKind::NatIsZero, parse_unary_builtin_expr);
    parser.nud(TokenKind::Not, parse_unary_builtin_expr);
    parser.nud(TokenKind::Fix, parse_unary_builtin_expr);
    parser.nud(TokenKind::Inl, parse_unary_builtin_expr);
    parser.nud(TokenKind::Inr, parse_unary_builtin_expr);
    parser.nud(TokenKind::ListHead, parse_unary_builtin_expr);
    parser.nud(TokenKind::ListTail, parse_unary_builtin_expr);
    parser.nud(TokenKind::ListIsEmpty, parse_unary_builtin_expr);
    parser.nud(TokenKind::New, parse_unary_builtin_expr);
    parser.nud(TokenKind::Throw, parse_unary_builtin_expr);
    parser.nud(TokenKind::NatRec, parse_nat_rec_expr);
    parser.nud(TokenKind::Cons, parse_cons_expr);

    // Compound expressions
    parser.nud(TokenKind::OpenParen, parse_grouping_expr);
    parser.nud(TokenKind::OpenCurly, parse_tuple_or_record_expr);
    parser.nud(TokenKind::OpenBracket, parse_list_expr);
    parser.nud(TokenKind::OpenVariant, parse_variant_expr);
    parser.nud(TokenKind::Fn, parse_abstraction_expr);
    parser.nud(TokenKind::If, parse_if_expr);
    parser.nud(TokenKind::Let, parse_let_expr);
    parser.nud(TokenKind::Letrec, parse_let_expr);
    parser.nud(TokenKind::Match, parse_match_expr);
    parser.nud(TokenKind::Star, parse_deref_expr);
    parser.nud(TokenKind::PanicBang, parse_panic_expr);
    parser.nud(TokenKind::Try, parse_try_expr);

    // Declarations
    parser.decl(TokenKind::Fn, parse_fun_decl);
    parser.decl(TokenKind::Inline, parse_fun_decl);
    parser.decl(TokenKind::Generic, parse_generic_fun_decl);
    parser.decl(TokenKind::Type, parse_type_alias_decl);
    parser.decl(TokenKind::Exception, parse_exception_decl);
}

// Lookup tables inside parser struct, so it's easier
pub type DeclLookup = HashMap<TokenKind, DeclHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
