use std::io::{BufRead, Write};

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        environment::ScopeId,
        evaluator::core::{EvalResult, Interpreter},
        value::{core::Value, range::RangeValue},
    },
    util::num::f64_to_index,
};

/// Ensures that a native function receives the expected number of arguments.
///
/// # Errors
/// [`RuntimeError::ArgumentsAmount`] when `args.len() != expected`.
///
/// # Example
/// ```
/// use pseudokod::interpreter::{evaluator::utils::check_arity, value::core::Value};
///
/// assert!(check_arity(&[Value::Number(1.0)], 1, 1).is_ok());
/// assert!(check_arity(&[], 1, 1).is_err());
/// ```
pub const fn check_arity(args: &[Value], expected: usize, line: usize) -> EvalResult<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(RuntimeError::ArgumentsAmount { expected,
                                            found: args.len(),
                                            line })
    }
}

/// Views the arguments of a native function as an array of exactly `N`.
///
/// # Errors
/// [`RuntimeError::ArgumentsAmount`] when `args.len() != N`.
///
/// # Example
/// ```
/// use pseudokod::interpreter::{evaluator::utils::arguments, value::core::Value};
///
/// let [x] = arguments(&[Value::Number(1.0)], 1).unwrap();
/// assert_eq!(*x, Value::Number(1.0));
/// assert!(arguments::<2>(&[Value::Null], 1).is_err());
/// ```
pub fn arguments<const N: usize>(args: &[Value], line: usize) -> EvalResult<&[Value; N]> {
    args.try_into().map_err(|_| RuntimeError::ArgumentsAmount { expected: N,
                                                                found: args.len(),
                                                                line })
}

/// Checks a number against the range its variable was declared with.
///
/// Values other than numbers, and variables declared without a range, always
/// pass.
///
/// # Errors
/// [`RuntimeError::NumberOutOfRange`] for a number outside `range`.
pub fn ensure_in_range(value: &Value, range: Option<&RangeValue>, line: usize) -> EvalResult<()> {
    match (value, range) {
        (Value::Number(n), Some(range)) if !range.contains(*n) => {
            Err(RuntimeError::NumberOutOfRange { value: *n,
                                                 range: range.to_string(),
                                                 line })
        },
        _ => Ok(()),
    }
}

/// Converts an evaluated index into a position.
///
/// # Errors
/// [`RuntimeError::IllegalIndexType`] unless `index` is a non-negative whole
/// number.
pub fn to_index(index: &Value, line: usize) -> EvalResult<usize> {
    match index {
        Value::Number(n) => f64_to_index(*n, line),
        _ => Err(RuntimeError::IllegalIndexType { line }),
    }
}

impl<W: Write, R: BufRead> Interpreter<W, R> {
    /// Evaluates `array[index]`.
    ///
    /// Lists yield their element and strings their character; positions start
    /// at 0.
    ///
    /// # Errors
    /// - [`RuntimeError::IllegalIndexType`] for an index that is not a
    ///   non-negative whole number.
    /// - [`RuntimeError::IndexOutOfRange`] past the end.
    /// - [`RuntimeError::IllegalDataType`] for anything but a list or string.
    pub(crate) fn eval_index(&mut self,
                             array: &Expr,
                             index: &Expr,
                             scope: ScopeId,
                             line: usize)
                             -> EvalResult<Value> {
        let container = self.evaluate(array, scope)?;
        let index = to_index(&self.evaluate(index, scope)?, line)?;

        let (element, length) = match &container {
            Value::List(items) => {
                let items = items.borrow();
                (items.get(index).cloned(), items.len())
            },
            Value::String(s) => (s.chars().nth(index).map(Value::Char), s.chars().count()),
            other => {
                return Err(RuntimeError::IllegalDataType { found:   other.value_type(),
                                                           details: "with indexing".to_string(),
                                                           line });
            },
        };

        element.ok_or(RuntimeError::IndexOutOfRange { index,
                                                      length,
                                                      line })
    }

    /// Evaluates `target <- value` and yields the stored value.
    ///
    /// The right side is evaluated first. A variable target receives the
    /// value converted to its declared type; an indexed target overwrites a
    /// list element in place.
    pub(crate) fn eval_assignment(&mut self,
                                  target: &Expr,
                                  value: &Expr,
                                  scope: ScopeId,
                                  line: usize)
                                  -> EvalResult<Value> {
        let value = self.evaluate(value, scope)?;

        match target {
            Expr::Identifier { name, .. } => {
                let variable = self.env.lookup(scope, name, line)?;
                if variable.constant {
                    return Err(RuntimeError::ConstantAssignment { name: name.clone(),
                                                                  line });
                }
                let range = variable.range;
                let value = value.coerce(variable.value_type, line)?;
                ensure_in_range(&value, range.as_ref(), line)?;
                self.env.assign(scope, name, value.clone(), line)?;
                Ok(value)
            },
            Expr::Index { array, index, .. } => {
                if !matches!(**index, Expr::Identifier { .. } | Expr::Number { .. }) {
                    return Err(RuntimeError::IllegalIndexType { line });
                }
                let container = self.evaluate(array, scope)?;
                let position = to_index(&self.evaluate(index, scope)?, line)?;

                let Value::List(items) = &container else {
                    return Err(RuntimeError::IllegalDataType { found:   container.value_type(),
                                                               details: "as an assignment target".to_string(),
                                                               line });
                };
                if value.holds(&container) {
                    return Err(RuntimeError::IllegalDataType { found:   value.value_type(),
                                                               details: "inside itself".to_string(),
                                                               line });
                }
                let mut items = items.borrow_mut();
                let length = items.len();
                let slot = items.get_mut(position)
                                .ok_or(RuntimeError::IndexOutOfRange { index: position,
                                                                       length,
                                                                       line })?;
                *slot = value.clone();
                Ok(value)
            },
            other => Err(RuntimeError::NodeNotSupported { node: other.to_string(),
                                                          line }),
        }
    }
}
