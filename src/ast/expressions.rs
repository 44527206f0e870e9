use crate::Span;

use super::{ast::ParamDecl, patterns::Pattern, types::TypeExpr};

/// Expression
///
/// An expression node together with the span of source text it covers.
#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

/// Expression Kinds
///
/// One variant per production of the expression grammar. Constructs that
/// belong to unchecked language extensions (references, exceptions,
/// sequencing, casts) are kept as `Unsupported` with a short description.
#[derive(Debug, Clone)]
pub enum ExprKind {
    // LITERALS
    ConstTrue,
    ConstFalse,
    ConstUnit,
    ConstInt(u64),
    Var(String),

    // NATURALS AND BOOLEANS
    Succ(Box<Expr>),
    Pred(Box<Expr>),
    IsZero(Box<Expr>),
    NatRec {
        n: Box<Expr>,
        initial: Box<Expr>,
        step: Box<Expr>,
    },
    Not(Box<Expr>),
    Binary {
        operator: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    If {
        condition: Box<Expr>,
        then_expr: Box<Expr>,
        else_expr: Box<Expr>,
    },

    // FUNCTIONS
    Abstraction {
        params: Vec<ParamDecl>,
        body: Box<Expr>,
    },
    Application {
        function: Box<Expr>,
        arguments: Vec<Expr>,
    },
    Fix(Box<Expr>),

    // PRODUCTS
    Tuple(Vec<Expr>),
    /// `expr.index`, indices start at 1
    DotTuple {
        expr: Box<Expr>,
        index: usize,
    },
    Record(Vec<Binding>),
    DotRecord {
        expr: Box<Expr>,
        label: String,
    },

    // SUMS AND VARIANTS
    Inl(Box<Expr>),
    Inr(Box<Expr>),
    Variant {
        label: String,
        payload: Option<Box<Expr>>,
    },

    // LISTS
    List(Vec<Expr>),
    ConsList {
        head: Box<Expr>,
        tail: Box<Expr>,
    },
    ListHead(Box<Expr>),
    ListTail(Box<Expr>),
    ListIsEmpty(Box<Expr>),

    // BINDINGS
    Let {
        bindings: Vec<PatternBinding>,
        body: Box<Expr>,
    },
    LetRec {
        bindings: Vec<PatternBinding>,
        body: Box<Expr>,
    },
    TypeAscription {
        expr: Box<Expr>,
        ascribed: TypeExpr,
    },
    Match {
        scrutinee: Box<Expr>,
        cases: Vec<MatchCase>,
    },

    Unsupported {
        construct: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    Equal,
    NotEqual,
    And,
    Or,
}

/// Record field binding `label = value`
#[derive(Debug, Clone)]
pub struct Binding {
    pub label: String,
    pub value: Expr,
    pub span: Span,
}

/// `pattern = rhs` inside `let` and `letrec`
#[derive(Debug, Clone)]
pub struct PatternBinding {
    pub pattern: Pattern,
    pub rhs: Expr,
    pub span: Span,
}

/// `pattern => body` inside `match`
#[derive(Debug, Clone)]
pub struct MatchCase {
    pub pattern: Pattern,
    pub body: Expr,
    pub span: Span,
}
