use crate::Span;

use super::{expressions::Expr, types::TypeExpr};

/// Program
///
/// The root of the tree: the `language core;` header, the extensions the
/// program opts into and its top-level declarations in source order.
#[derive(Debug, Clone)]
pub struct Program {
    pub language: String,
    pub extensions: Vec<String>,
    pub decls: Vec<Decl>,
    pub span: Span,
}

/// Declaration
#[derive(Debug, Clone)]
pub struct Decl {
    pub kind: DeclKind,
    pub span: Span,
}

/// Declaration Kinds
///
/// Only plain function declarations are checked. Every other declaration form
/// is parsed so that the program can be read, and kept as `Unsupported`.
#[derive(Debug, Clone)]
pub enum DeclKind {
    Fun(FunDecl),
    Unsupported { construct: String },
}

/// Function Declaration
///
/// `fn name(p : T, ...) -> R { <nested decls> return body }`
#[derive(Debug, Clone)]
pub struct FunDecl {
    pub name: String,
    pub is_inline: bool,
    pub params: Vec<ParamDecl>,
    pub return_type: Option<TypeExpr>,
    pub nested_decls: Vec<Decl>,
    pub body: Box<Expr>,
}

/// Parameter Declaration
///
/// Shared by function declarations and anonymous functions.
#[derive(Debug, Clone)]
pub struct ParamDecl {
    pub name: String,
    pub param_type: TypeExpr,
    pub span: Span,
}
