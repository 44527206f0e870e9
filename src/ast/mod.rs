/// AST (Abstract Syntax Tree) module
/// Contains the syntax tree the parser builds and the checker walks
///
/// Submodules:
/// - ast: Programs and declarations
/// - expressions: Expression nodes
/// - patterns: Pattern nodes used by `let`, `letrec` and `match`
/// - types: Type expressions as written in the source
pub mod ast;
pub mod expressions;
pub mod patterns;
pub mod types;
