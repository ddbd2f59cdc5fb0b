/// Parser for binary operators.
///
/// Handles parsing of infix expressions (`a + b`, `a AND b`, `x ∈ (0, 10]`)
/// with correct precedence and associativity, down to the additive and
/// multiplicative levels.
pub mod binary;
/// Parser for indented blocks.
///
/// Reads the runs of equally indented lines that form program, loop, branch
/// and function bodies.
pub mod block;
/// Core parser logic.
///
/// Contains the main entry points for parsing programs and expressions, and
/// the token-level helpers shared by the other parser modules.
pub mod core;
/// Parser for statements.
///
/// Handles parsing of top-level and block statements: declarations, control
/// flow, function declarations and the built-in I/O forms.
pub mod statement;
/// Parser for unary, postfix and primary expressions.
///
/// Handles negation, indexing, calls, literals, grouping, ranges and list
/// and set literals.
pub mod unary;
/// Utility functions for the parser.
///
/// Helper routines for comma-separated lists, identifiers and set literals.
pub mod utils;
