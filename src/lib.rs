//! # pseudokod
//!
//! pseudokod is an interpreter for the bilingual (Polish/English) pseudocode
//! used to teach algorithms. Programs declare typed variables, use
//! tab-indented blocks, and may write keywords in either language:
//!
//! ```
//! let source = "liczba suma <- 0\ndla i = 1, 2, ..., 4\n\tsuma <- suma + i\nwypisz(suma)";
//! let mut output = Vec::new();
//! pseudokod::run(source, &mut output, "".as_bytes()).unwrap();
//!
//! assert_eq!(output, b"10\n");
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::{BufRead, Write};

use crate::{
    ast::Program,
    error::Error,
    interpreter::{
        evaluator::core::Interpreter,
        lexer::{self, Token},
        parser::core::parse_program,
        value::core::Value,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Statement` and `Expr` enums and related types
/// that represent the syntactic structure of a program as a tree. The tree is
/// built by the parser, rendered back to source by its `Display`
/// implementations, and executed by the evaluator.
///
/// # Responsibilities
/// - Defines statement and expression types for all language constructs.
/// - Attaches line numbers to nodes for error reporting.
pub mod ast;
/// Provides unified error types for lexing, parsing and evaluation.
///
/// This module defines all errors that can be raised while running a
/// program. Every error carries the line it was raised on and a readable
/// message.
///
/// # Responsibilities
/// - Defines one error enum per phase (lexer, parser, evaluator).
/// - Wraps them in a single `Error` returned by the library entry points.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, scopes, evaluation and value
/// representations to provide a complete runtime for pseudocode programs.
pub mod interpreter;
/// General utilities for safe numeric conversion.
///
/// Helpers used throughout the evaluator to move between the language's
/// `f64` numbers and integers without silent data loss.
pub mod util;

/// Splits source text into tokens paired with their line numbers.
///
/// # Example
/// ```
/// use pseudokod::{interpreter::lexer::Token, tokenize};
///
/// let tokens = tokenize("x <- 1").unwrap();
/// assert_eq!(tokens[1].0, Token::Assignment);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, Error> {
    Ok(lexer::tokenize(source)?)
}

/// Parses source text into a program.
///
/// # Example
/// ```
/// use pseudokod::parse;
///
/// let program = parse("jeżeli x > 1\n\twypisz(x)").unwrap();
/// assert_eq!(program.to_string(), "if x > 1\n\tprint(x)\n");
/// ```
pub fn parse(source: &str) -> Result<Program, Error> {
    let tokens = lexer::tokenize(source)?;
    Ok(parse_program(&tokens)?)
}

/// Runs a program against the given output sink and input source.
///
/// Every run starts from a fresh environment. Returns the value of the last
/// statement executed.
///
/// # Errors
/// The first lexing, parsing or runtime error. Output printed before a
/// runtime error stays in `output`.
pub fn run<W: Write, R: BufRead>(source: &str, output: W, input: R) -> Result<Value, Error> {
    let program = parse(source)?;
    let mut interpreter = Interpreter::new(output, input);
    Ok(interpreter.run(&program)?)
}

/// Runs a program on standard output and standard input.
///
/// # Examples
/// ```
/// use pseudokod::parse_and_run;
///
/// // A program that only computes: its value is the last statement.
/// let value = parse_and_run("liczba x <- 2\nx * 21").unwrap();
/// assert_eq!(value.to_string(), "42");
///
/// // An intentional error (unknown variable).
/// assert!(parse_and_run("y + 1").is_err());
/// ```
pub fn parse_and_run(source: &str) -> Result<Value, Error> {
    let program = parse(source)?;
    Ok(Interpreter::stdio().run(&program)?)
}
