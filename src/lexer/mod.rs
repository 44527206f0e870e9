//! Lexical analysis of Stella source text.
//!
//! This module contains the lexer (tokenizer) that converts source code
//! into a stream of tokens for parsing. It handles:
//!
//! - Tokenization using an ordered table of anchored regex patterns
//! - Recognition of keywords, qualified built-ins (`Nat::rec`), identifiers and naturals
//! - Extension names (`#natural-literals`)
//! - Byte-offset spans for diagnostics
//! - Line and block comments, whitespace

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
