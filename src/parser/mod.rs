//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into a Stella program. It uses a Pratt parser for expressions and types
//! with proper operator precedence and handles:
//!
//! - Declaration parsing (the language header, extensions, functions)
//! - Expression parsing (operators, applications, literals, binders)
//! - Type parsing for annotations and ascriptions
//! - Pattern parsing for `let`, `letrec` and `match`
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod decl;
pub mod expr;
pub mod lookups;
pub mod parser;
pub mod patterns;
pub mod types;

#[cfg(test)]
mod tests;
