//! Type expressions as they appear in the source.
//!
//! This module defines the syntax of types, including:
//!
//! - Primitive types (`Bool`, `Nat`, `Unit`, `Top`, `Bot`)
//! - Composite types (functions, tuples, records, lists, sums, variants, references)
//! - Named types, which only type aliases and generics would give meaning to
//!
//! Type expressions are resolved by the type checker into semantic
//! `type_checker::types::Type` values.

use crate::Span;

#[derive(Debug, Clone)]
pub struct TypeExpr {
    pub kind: TypeExprKind,
    pub span: Span,
}

impl TypeExpr {
    pub fn new(kind: TypeExprKind, span: Span) -> Self {
        TypeExpr { kind, span }
    }
}

#[derive(Debug, Clone)]
pub enum TypeExprKind {
    Bool,
    Nat,
    Unit,
    Top,
    Bottom,
    Fun {
        params: Vec<TypeExpr>,
        ret: Box<TypeExpr>,
    },
    Tuple(Vec<TypeExpr>),
    Record(Vec<RecordFieldType>),
    List(Box<TypeExpr>),
    Sum(Box<TypeExpr>, Box<TypeExpr>),
    Variant(Vec<VariantFieldType>),
    Ref(Box<TypeExpr>),
    /// A type variable or alias name. Never resolvable without generics or
    /// type aliases, so the checker rejects it.
    Named(String),
}

/// `label : T` inside a record type
#[derive(Debug, Clone)]
pub struct RecordFieldType {
    pub label: String,
    pub field_type: TypeExpr,
    pub span: Span,
}

/// `label : T` or a bare `label` inside a variant type
#[derive(Debug, Clone)]
pub struct VariantFieldType {
    pub label: String,
    pub payload: Option<TypeExpr>,
    pub span: Span,
}
