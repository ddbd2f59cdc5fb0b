use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Evaluates an arithmetic operation of the form `Value <Operator> Value`.
///
/// Both operands must be numbers. `div` is the floor of the quotient and
/// `mod` the remainder of truncated division, so its sign follows the
/// dividend.
///
/// # Errors
/// - [`RuntimeError::DivisionByZero`] for `/`, `div` or `mod` by zero.
/// - [`RuntimeError::IncompatibleDataTypes`] for operands of different types.
/// - [`RuntimeError::IllegalDataType`] for two non-numbers of the same type.
///
/// # Example
/// ```
/// use pseudokod::{
///     ast::BinaryOperator,
///     interpreter::{evaluator::binary::arithmetic::eval_arithmetic, value::core::Value},
/// };
///
/// let q = eval_arithmetic(BinaryOperator::IntDiv, &Value::Number(7.0), &Value::Number(2.0), 1);
/// assert_eq!(q.unwrap(), Value::Number(3.0));
/// ```
pub fn eval_arithmetic(operator: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       line: usize)
                       -> EvalResult<Value> {
    let (a, b) = match (left, right) {
        (Value::Number(a), Value::Number(b)) => (*a, *b),
        (l, r) if l.value_type() != r.value_type() => {
            return Err(RuntimeError::IncompatibleDataTypes { operator: operator.to_string(),
                                                             left: l.value_type(),
                                                             right: r.value_type(),
                                                             line });
        },
        (l, _) => {
            return Err(RuntimeError::IllegalDataType { found: l.value_type(),
                                                       details: format!("with '{operator}'"),
                                                       line });
        },
    };

    let result = match operator {
        BinaryOperator::Add => a + b,
        BinaryOperator::Sub => a - b,
        BinaryOperator::Mul => a * b,
        BinaryOperator::Div | BinaryOperator::IntDiv | BinaryOperator::Mod if b == 0.0 => {
            return Err(RuntimeError::DivisionByZero { line });
        },
        BinaryOperator::Div => a / b,
        BinaryOperator::IntDiv => (a / b).floor(),
        BinaryOperator::Mod => a % b,
    };

    Ok(Value::Number(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ValueType;

    fn num(op: BinaryOperator, a: f64, b: f64) -> EvalResult<Value> {
        eval_arithmetic(op, &Value::Number(a), &Value::Number(b), 1)
    }

    #[test]
    fn basic_operations() {
        assert_eq!(num(BinaryOperator::Add, 3.0, 8.0).unwrap(), Value::Number(11.0));
        assert_eq!(num(BinaryOperator::Sub, 3.0, 8.0).unwrap(), Value::Number(-5.0));
        assert_eq!(num(BinaryOperator::Mul, 3.0, 8.0).unwrap(), Value::Number(24.0));
        assert_eq!(num(BinaryOperator::Div, 7.0, 2.0).unwrap(), Value::Number(3.5));
    }

    #[test]
    fn div_floors_and_mod_follows_dividend() {
        assert_eq!(num(BinaryOperator::IntDiv, 7.0, 2.0).unwrap(), Value::Number(3.0));
        assert_eq!(num(BinaryOperator::IntDiv, -7.0, 2.0).unwrap(), Value::Number(-4.0));
        assert_eq!(num(BinaryOperator::Mod, 7.0, 3.0).unwrap(), Value::Number(1.0));
        assert_eq!(num(BinaryOperator::Mod, -7.0, 3.0).unwrap(), Value::Number(-1.0));
    }

    #[test]
    fn division_by_zero() {
        for op in [BinaryOperator::Div, BinaryOperator::IntDiv, BinaryOperator::Mod] {
            assert_eq!(num(op, 5.0, 0.0).unwrap_err(), RuntimeError::DivisionByZero { line: 1 });
        }
    }

    #[test]
    fn mixed_types_are_incompatible() {
        let err = eval_arithmetic(BinaryOperator::Add, &Value::Number(1.0), &Value::from("a"), 2);
        assert_eq!(err.unwrap_err(),
                   RuntimeError::IncompatibleDataTypes { operator: "+".to_string(),
                                                         left:     ValueType::Number,
                                                         right:    ValueType::String,
                                                         line:     2, });
    }

    #[test]
    fn same_non_numeric_types_are_illegal() {
        let err = eval_arithmetic(BinaryOperator::Add, &Value::from("a"), &Value::from("b"), 3);
        assert!(matches!(err,
                         Err(RuntimeError::IllegalDataType { found: ValueType::String,
                                                             line: 3,
                                                             .. })));
    }
}
