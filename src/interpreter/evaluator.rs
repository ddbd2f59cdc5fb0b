/// Binary operator evaluation logic.
///
/// Handles arithmetic, comparisons, membership, short-circuit logic and
/// bitwise operators.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements arithmetic negation and logical NOT.
pub mod unary;

/// Core evaluation logic and interpreter state.
///
/// Contains the `Interpreter`, statement and expression dispatch, block
/// scoping and the `Flow` signal that carries `return` out of nested blocks.
pub mod core;

/// Evaluation of `for` loops.
///
/// Expands ellipsis sequences and collections into iteration values and runs
/// the body once per value in a fresh scope.
pub mod for_loop;

/// Utility functions for evaluation.
///
/// Assignment, indexing, range checks and argument-count checks shared by the
/// other evaluator modules.
pub mod utils;

/// Function evaluation.
///
/// Handles calls to user-defined and native functions, argument checking and
/// return value coercion.
pub mod function;

/// Native functions provided by the host.
///
/// The always-available container operations and the importable modules.
pub mod native;

/// Statement execution.
///
/// Declarations, conditionals, `while` loops, function declarations and the
/// built-in `print`, `get` and `import` forms.
pub mod statement;
