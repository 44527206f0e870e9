use crate::Span;

use super::types::TypeExpr;

/// Pattern
#[derive(Debug, Clone)]
pub struct Pattern {
    pub kind: PatternKind,
    pub span: Span,
}

impl Pattern {
    pub fn new(kind: PatternKind, span: Span) -> Self {
        Pattern { kind, span }
    }

    /// Strips any number of enclosing parentheses.
    pub fn strip_parens(&self) -> &Pattern {
        let mut pattern = self;
        while let PatternKind::Parenthesized(inner) = &pattern.kind {
            pattern = inner.as_ref();
        }
        pattern
    }
}

#[derive(Debug, Clone)]
pub enum PatternKind {
    /// Binds the matched value; `_` is an ordinary variable name.
    Var(String),
    True,
    False,
    Unit,
    Int(u64),
    Succ(Box<Pattern>),
    Inl(Box<Pattern>),
    Inr(Box<Pattern>),
    Variant {
        label: String,
        payload: Option<Box<Pattern>>,
    },
    Tuple(Vec<Pattern>),
    Record(Vec<LabelledPattern>),
    List(Vec<Pattern>),
    Cons {
        head: Box<Pattern>,
        tail: Box<Pattern>,
    },
    Ascription {
        pattern: Box<Pattern>,
        ascribed: TypeExpr,
    },
    Parenthesized(Box<Pattern>),
}

/// `label = pattern` inside a record pattern
#[derive(Debug, Clone)]
pub struct LabelledPattern {
    pub label: String,
    pub pattern: Pattern,
    pub span: Span,
}
