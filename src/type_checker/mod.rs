//! Type checking module.
//!
//! This module checks a parsed Stella program for well-typedness. It
//! contains:
//!
//! - The semantic type model and its structural equality
//! - Lexical scopes mapping variables to types
//! - The bidirectional checker, which infers a type when no expectation is
//!   given and checks against the expectation otherwise
//! - Pattern checking for `let`, `letrec` and `match`
//! - Exhaustiveness of `match` cases
//!
//! Checking stops at the first violation, which is returned as an `Error`
//! carrying its Stella error tag.

pub mod environment;
pub mod exhaustiveness;
pub mod patterns;
pub mod type_checker;
pub mod types;

#[cfg(test)]
mod tests;
