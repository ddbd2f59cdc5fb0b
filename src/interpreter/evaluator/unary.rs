use crate::{
    ast::UnaryOperator,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Evaluates a unary operation on an evaluated operand.
///
/// - `-` negates a number.
/// - `NOT` inverts a boolean; `null` counts as false.
///
/// # Errors
/// [`RuntimeError::IllegalDataType`] for any other operand.
///
/// # Example
/// ```
/// use pseudokod::{
///     ast::UnaryOperator,
///     interpreter::{evaluator::unary::eval_unary, value::core::Value},
/// };
///
/// let v = eval_unary(UnaryOperator::Negate, &Value::Number(2.0), 1).unwrap();
/// assert_eq!(v, Value::Number(-2.0));
/// ```
pub fn eval_unary(operator: UnaryOperator, operand: &Value, line: usize) -> EvalResult<Value> {
    let truth = match operator {
        UnaryOperator::Not => operand.as_condition(),
        UnaryOperator::Negate => None,
    };
    match (operator, operand, truth) {
        (UnaryOperator::Negate, Value::Number(n), _) => Ok(Value::Number(-n)),
        (UnaryOperator::Not, _, Some(b)) => Ok(Value::Boolean(!b)),
        (operator, value, _) => Err(RuntimeError::IllegalDataType { found: value.value_type(),
                                                                    details: format!("with unary '{operator}'"),
                                                                    line }),
    }
}
