//! Checking patterns against the type of the value they destructure.
//!
//! A pattern never synthesizes a type on its own: `let` and `match` hand it
//! the type of the matched value, and `letrec` takes it from the pattern's
//! ascription. Variables bind into the scope passed in.

use std::collections::HashSet;

use crate::{
    ast::patterns::{Pattern, PatternKind},
    errors::errors::{Error, ErrorImpl},
};

use super::{environment::Environment, type_checker::resolve_type, types::Type};

fn unexpected_pattern(pattern: &Pattern, expected: &Type) -> Error {
    Error::new(
        ErrorImpl::UnexpectedPatternForType {
            expected: expected.clone(),
        },
        pattern.span.clone(),
    )
}

/// Type a `letrec` pattern declares through its ascription.
pub fn ascribed_pattern_type(pattern: &Pattern) -> Result<Type, Error> {
    match &pattern.strip_parens().kind {
        PatternKind::Ascription { ascribed, .. } => resolve_type(ascribed),
        _ => Err(Error::new(
            ErrorImpl::AmbiguousPatternType,
            pattern.span.clone(),
        )),
    }
}

pub fn check_pattern(env: &mut Environment, pattern: &Pattern, expected: &Type) -> Result<(), Error> {
    match (&pattern.kind, expected) {
        (PatternKind::Var(name), _) => {
            env.declare_variable(name, expected.clone());
            Ok(())
        }
        (PatternKind::Parenthesized(inner), _) => check_pattern(env, inner, expected),
        (PatternKind::Ascription { pattern: inner, ascribed }, _) => {
            if resolve_type(ascribed)? != *expected {
                return Err(unexpected_pattern(pattern, expected));
            }
            check_pattern(env, inner, expected)
        }

        (PatternKind::True | PatternKind::False, Type::Bool)
        | (PatternKind::Unit, Type::Unit)
        | (PatternKind::Int(_), Type::Nat) => Ok(()),
        (PatternKind::Succ(inner), Type::Nat) => check_pattern(env, inner, &Type::Nat),

        (PatternKind::Inl(inner), Type::Sum(left, _)) => check_pattern(env, inner, left),
        (PatternKind::Inr(inner), Type::Sum(_, right)) => check_pattern(env, inner, right),
        (PatternKind::Variant { label, payload }, Type::Variant(_)) => {
            match (payload, expected.variant_label(label, &pattern.span)?) {
                (Some(payload), Some(payload_type)) => check_pattern(env, payload, payload_type),
                (None, None) => Ok(()),
                (None, Some(_)) => Err(Error::new(
                    ErrorImpl::UnexpectedNullaryVariantPattern {
                        label: label.clone(),
                    },
                    pattern.span.clone(),
                )),
                (Some(_), None) => Err(Error::new(
                    ErrorImpl::UnexpectedNonNullaryVariantPattern {
                        label: label.clone(),
                    },
                    pattern.span.clone(),
                )),
            }
        }

        (PatternKind::Tuple(items), Type::Tuple(item_types)) => {
            if items.len() != item_types.len() {
                return Err(unexpected_pattern(pattern, expected));
            }
            for (item, item_type) in items.iter().zip(item_types) {
                check_pattern(env, item, item_type)?;
            }
            Ok(())
        }
        // A record pattern may name any subset of the fields.
        (PatternKind::Record(fields), Type::Record(_)) => {
            let mut seen = HashSet::new();
            for field in fields {
                if !seen.insert(field.label.as_str()) {
                    return Err(Error::new(
                        ErrorImpl::DuplicateRecordPatternFields {
                            label: field.label.clone(),
                        },
                        field.span.clone(),
                    ));
                }

                let field_type = expected.record_field(&field.label).ok_or_else(|| {
                    Error::new(
                        ErrorImpl::UnexpectedRecordFields {
                            label: field.label.clone(),
                            expected: expected.clone(),
                        },
                        field.span.clone(),
                    )
                })?;
                check_pattern(env, &field.pattern, field_type)?;
            }
            Ok(())
        }

        (PatternKind::List(items), Type::List(item_type)) => {
            for item in items {
                check_pattern(env, item, item_type)?;
            }
            Ok(())
        }
        (PatternKind::Cons { head, tail }, Type::List(item_type)) => {
            check_pattern(env, head, item_type)?;
            check_pattern(env, tail, expected)
        }

        _ => Err(unexpected_pattern(pattern, expected)),
    }
}
