#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorTip},
    lexer::lexer::tokenize,
    parser::parser::parse,
    type_checker::type_checker::type_check,
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod type_checker;

extern crate regex;

#[derive(Debug, Clone)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    /// Span covering `self` through the end of `other`.
    pub fn to(&self, other: &Span) -> Span {
        Span {
            start: self.start.clone(),
            end: other.end.clone(),
        }
    }

    pub fn null() -> Self {
        Span {
            start: Position::null(),
            end: Position::null(),
        }
    }
}

/// Runs the whole pipeline over a Stella source text: tokenize, parse, type check.
///
/// Succeeds with the parsed program when it is well-typed; otherwise returns the
/// first diagnostic found.
pub fn check_source(source: &str, file: Option<String>) -> Result<Program, Error> {
    let file_name = Rc::new(file.unwrap_or_else(|| String::from("<stdin>")));

    let tokens = tokenize(source.to_string(), Some(file_name.to_string()))?;
    log::debug!("tokenized {} tokens", tokens.len());

    let program = parse(tokens, Rc::clone(&file_name))?;
    log::debug!("parsed {} declarations", program.decls.len());

    type_check(&program)?;
    Ok(program)
}

/// Finds the line containing the byte offset `position`.
///
/// Returns the 1-based line number, the line text and the offset within the line.
pub fn get_line_at_position(content: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    let mut start = 0;
    let mut line_number = 1;

    for line in content.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = pos - start;
            return Some((line_number, line.to_string(), line_pos));
        }

        start = end;
        line_number += 1;
    }

    None
}


pub fn display_error(error: &Error, source: &str, file: &str) -> String {
    /*
        Type Error Tag: [ERROR_...]
        message
        -> main.st
           |
         4 | return 0
           | -------^
    */

    let mut output = error.render(source);
    output.push('\n');

    if let ErrorTip::Suggestion(tip) = error.get_tip() {
        output.push_str(&format!("({})\n", tip));
    }

    output.push_str(&format!("-> {}\n", file));

    let Some((line, line_text, line_pos)) = get_line_at_position(source, error.get_position().0)
    else {
        return output;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    output.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    output.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    output.push_str(&format!("{:>padding$} {:->arrows$}", "|", "^"));
    output
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
