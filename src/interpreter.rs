/// Lexically scoped variable storage.
///
/// Scopes live in an arena and refer to their parent by index. Blocks and
/// calls push a scope and release it on exit, unless a function declared in
/// it still needs it.
pub mod environment;
/// The evaluator module executes statements and expressions.
///
/// The evaluator walks the syntax tree, evaluates expressions, runs
/// statements, manages variable state through the environment, and reports
/// runtime errors such as division by zero or type mismatches. It is the core
/// execution engine of the interpreter.
///
/// # Responsibilities
/// - Evaluates every expression and statement form of the language.
/// - Calls user functions and native functions.
/// - Writes `print` output to, and reads `get` input from, the configured
///   streams.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens, each
/// corresponding to a meaningful language element such as a number,
/// identifier, operator, keyword, tab or line break. Keywords are accepted in
/// English and in Polish. This is the first stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with their line number.
/// - Handles numeric, character and string literals, identifiers and
///   operators.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The parser module builds the syntax tree from tokens.
///
/// The parser processes the token stream produced by the lexer and constructs
/// the statements and expressions of a program. Blocks are delimited by
/// leading tabs.
///
/// # Responsibilities
/// - Converts tokens into structured nodes (statements, expressions).
/// - Validates grammar and indentation, reporting errors with the line.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares all values a program can compute: numbers, booleans,
/// characters, strings, lists, sets, ranges, stacks, queues and functions. It
/// also provides the conversions to declared types and the rendering used by
/// `print`.
pub mod value;
