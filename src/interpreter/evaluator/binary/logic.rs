use std::io::{BufRead, Write};

use crate::{
    ast::{BitwiseOperator, Expr, LogicalOperator, ValueType},
    error::RuntimeError,
    interpreter::{
        environment::ScopeId,
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
    util::num::{f64_to_i64_checked, i64_to_f64_checked},
};

impl<W: Write, R: BufRead> Interpreter<W, R> {
    /// Evaluates `AND` / `OR` with short-circuiting.
    ///
    /// The right operand is evaluated only when the left one does not decide
    /// the result. `null` counts as false.
    ///
    /// # Errors
    /// [`RuntimeError::IncompatibleDataTypes`] when an evaluated operand is
    /// not a boolean.
    pub(crate) fn eval_logical(&mut self,
                               left: &Expr,
                               operator: LogicalOperator,
                               right: &Expr,
                               scope: ScopeId,
                               line: usize)
                               -> EvalResult<Value> {
        let incompatible = |left: ValueType, right: ValueType| {
            RuntimeError::IncompatibleDataTypes { operator: operator.to_string(),
                                                  left,
                                                  right,
                                                  line }
        };

        let lhs = self.evaluate(left, scope)?;
        let Some(lhs) = lhs.as_condition() else {
            return Err(incompatible(lhs.value_type(), ValueType::Boolean));
        };

        match (operator, lhs) {
            (LogicalOperator::And, false) => return Ok(Value::Boolean(false)),
            (LogicalOperator::Or, true) => return Ok(Value::Boolean(true)),
            _ => {},
        }

        let rhs = self.evaluate(right, scope)?;
        rhs.as_condition()
           .map(Value::Boolean)
           .ok_or_else(|| incompatible(ValueType::Boolean, rhs.value_type()))
    }
}

/// Evaluates a bitwise operation of the form `Value <Operator> Value`.
///
/// Numbers must be whole and are combined as 64-bit integers. Booleans
/// support `&`, `|` and `xor`. Shift amounts must lie in `[0, 63]`.
///
/// # Errors
/// - [`RuntimeError::IncompatibleDataTypes`] for operands of different types.
/// - [`RuntimeError::IllegalDataType`] for fractional numbers, shifts of
///   booleans, or operands that are neither numbers nor booleans.
/// - [`RuntimeError::NumberOutOfRange`] for a shift amount outside `[0, 63]`
///   or a result beyond the exactly representable integers.
///
/// # Example
/// ```
/// use pseudokod::{
///     ast::BitwiseOperator,
///     interpreter::{evaluator::binary::logic::eval_bitwise, value::core::Value},
/// };
///
/// let v = eval_bitwise(BitwiseOperator::ShiftLeft, &Value::Number(1.0), &Value::Number(4.0), 1);
/// assert_eq!(v.unwrap(), Value::Number(16.0));
/// ```
pub fn eval_bitwise(operator: BitwiseOperator,
                    left: &Value,
                    right: &Value,
                    line: usize)
                    -> EvalResult<Value> {
    use BitwiseOperator::{And, Or, ShiftLeft, ShiftRight, Xor};

    match (left, right) {
        (Value::Boolean(a), Value::Boolean(b)) => match operator {
            And => Ok(Value::Boolean(a & b)),
            Or => Ok(Value::Boolean(a | b)),
            Xor => Ok(Value::Boolean(a ^ b)),
            ShiftLeft | ShiftRight => {
                Err(RuntimeError::IllegalDataType { found:   ValueType::Boolean,
                                                    details: format!("with '{operator}'"),
                                                    line })
            },
        },
        (Value::Number(x), Value::Number(y)) => {
            let a = f64_to_i64_checked(*x, "in a bitwise operation", line)?;
            let b = f64_to_i64_checked(*y, "in a bitwise operation", line)?;
            let result = match operator {
                And => a & b,
                Or => a | b,
                Xor => a ^ b,
                ShiftLeft | ShiftRight => {
                    let amount = u32::try_from(b).ok()
                                                 .filter(|amount| *amount <= 63)
                                                 .ok_or(RuntimeError::NumberOutOfRange { value: *y,
                                                                                         range: "[0, 63]".to_string(),
                                                                                         line })?;
                    if operator == ShiftLeft {
                        a.wrapping_shl(amount)
                    } else {
                        a >> amount
                    }
                },
            };
            Ok(Value::Number(i64_to_f64_checked(result, line)?))
        },
        (l, r) if l.value_type() != r.value_type() => {
            Err(RuntimeError::IncompatibleDataTypes { operator: operator.to_string(),
                                                      left: l.value_type(),
                                                      right: r.value_type(),
                                                      line })
        },
        (l, _) => Err(RuntimeError::IllegalDataType { found: l.value_type(),
                                                      details: format!("with '{operator}'"),
                                                      line }),
    }
}
