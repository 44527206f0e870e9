//! Semantic types of Stella.
//!
//! These are the values the checker computes and compares. They are separate
//! from `ast::types::TypeExpr`, which is the syntax a programmer writes.
//!
//! Equality is structural. Records and variants remember the order their
//! labels were declared in (used when printing), but compare as label sets.

use std::fmt::Display;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Span,
};

#[derive(Debug, Clone)]
pub enum Type {
    Bool,
    Nat,
    Unit,
    Fun(Vec<Type>, Box<Type>),
    Tuple(Vec<Type>),
    /// Fields in declaration order.
    Record(Vec<(String, Type)>),
    List(Box<Type>),
    Sum(Box<Type>, Box<Type>),
    /// Labels in declaration order; `None` marks a nullary label.
    Variant(Vec<(String, Option<Type>)>),
    Ref(Box<Type>),
    Top,
    Bottom,
}

impl Type {
    pub fn fun(params: Vec<Type>, ret: Type) -> Type {
        Type::Fun(params, Box::new(ret))
    }

    pub fn list(elem: Type) -> Type {
        Type::List(Box::new(elem))
    }

    pub fn sum(left: Type, right: Type) -> Type {
        Type::Sum(Box::new(left), Box::new(right))
    }

    /// Looks up the type of a record field.
    pub fn record_field(&self, label: &str) -> Option<&Type> {
        match self {
            Type::Record(fields) => fields
                .iter()
                .find(|(name, _)| name == label)
                .map(|(_, ty)| ty),
            _ => None,
        }
    }

    /// Item types of a tuple of exactly `length` items.
    ///
    /// A tuple of any other length is reported as `ERROR_UNEXPECTED_TUPLE_LENGTH`
    /// rather than as a plain type mismatch.
    pub fn tuple_items(&self, length: usize, span: &Span) -> Result<&[Type], Error> {
        match self {
            Type::Tuple(items) if items.len() == length => Ok(items),
            Type::Tuple(items) => Err(Error::new(
                ErrorImpl::UnexpectedTupleLength {
                    expected_length: items.len(),
                    actual_length: length,
                    expected: self.clone(),
                },
                span.clone(),
            )),
            _ => Err(Error::new(
                ErrorImpl::UnexpectedTuple {
                    expected: self.clone(),
                },
                span.clone(),
            )),
        }
    }

    /// Payload type of a variant label, `None` for a nullary label.
    ///
    /// A label the variant does not declare is `ERROR_UNEXPECTED_VARIANT_LABEL`.
    pub fn variant_label(&self, label: &str, span: &Span) -> Result<Option<&Type>, Error> {
        let unexpected_label = || {
            Error::new(
                ErrorImpl::UnexpectedVariantLabel {
                    label: label.to_string(),
                    expected: self.clone(),
                },
                span.clone(),
            )
        };

        match self {
            Type::Variant(labels) => labels
                .iter()
                .find(|(name, _)| name == label)
                .map(|(_, payload)| payload.as_ref())
                .ok_or_else(unexpected_label),
            _ => Err(unexpected_label()),
        }
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Type::Bool, Type::Bool)
            | (Type::Nat, Type::Nat)
            | (Type::Unit, Type::Unit)
            | (Type::Top, Type::Top)
            | (Type::Bottom, Type::Bottom) => true,
            (Type::Fun(params, ret), Type::Fun(other_params, other_ret)) => {
                params == other_params && ret == other_ret
            }
            (Type::Tuple(items), Type::Tuple(other_items)) => items == other_items,
            (Type::Record(fields), Type::Record(other_fields)) => {
                fields.len() == other_fields.len()
                    && fields.iter().all(|(label, ty)| {
                        other_fields
                            .iter()
                            .any(|(other_label, other_ty)| label == other_label && ty == other_ty)
                    })
            }
            (Type::List(elem), Type::List(other_elem)) => elem == other_elem,
            (Type::Sum(left, right), Type::Sum(other_left, other_right)) => {
                left == other_left && right == other_right
            }
            (Type::Variant(labels), Type::Variant(other_labels)) => {
                labels.len() == other_labels.len()
                    && labels.iter().all(|(label, payload)| {
                        other_labels.iter().any(|(other_label, other_payload)| {
                            label == other_label && payload == other_payload
                        })
                    })
            }
            (Type::Ref(inner), Type::Ref(other_inner)) => inner == other_inner,
            _ => false,
        }
    }
}

impl Eq for Type {}

fn write_list<T: Display>(f: &mut std::fmt::Formatter<'_>, items: &[T]) -> std::fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Bool => write!(f, "Bool"),
            Type::Nat => write!(f, "Nat"),
            Type::Unit => write!(f, "Unit"),
            Type::Top => write!(f, "Top"),
            Type::Bottom => write!(f, "Bot"),
            Type::Fun(params, ret) => {
                write!(f, "fn(")?;
                write_list(f, params)?;
                write!(f, ") -> {}", ret)
            }
            Type::Tuple(items) => {
                write!(f, "{{")?;
                write_list(f, items)?;
                write!(f, "}}")
            }
            Type::Record(fields) => {
                let fields: Vec<String> = fields
                    .iter()
                    .map(|(label, ty)| format!("{} : {}", label, ty))
                    .collect();
                write!(f, "{{")?;
                write_list(f, &fields)?;
                write!(f, "}}")
            }
            Type::List(elem) => write!(f, "[{}]", elem),
            Type::Sum(left, right) => write!(f, "({} + {})", left, right),
            Type::Variant(labels) => {
                let labels: Vec<String> = labels
                    .iter()
                    .map(|(label, payload)| match payload {
                        Some(ty) => format!("{} : {}", label, ty),
                        None => label.clone(),
                    })
                    .collect();
                write!(f, "<| ")?;
                write_list(f, &labels)?;
                write!(f, " |>")
            }
            Type::Ref(inner) => write!(f, "&{}", inner),
        }
    }
}
