use crate::{
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::{core::EvalResult, utils::arguments},
        value::core::Value,
    },
};

fn number(value: &Value, function: &str, line: usize) -> EvalResult<f64> {
    value.as_number(&format!("as an argument of '{function}'"), line)
}

/// Square root of a non-negative number.
///
/// # Errors
/// [`RuntimeError::NumberOutOfRange`] for a negative argument.
///
/// # Example
/// ```
/// use pseudokod::interpreter::{
///     environment::Environment, evaluator::native::math::sqrt, value::core::Value,
/// };
///
/// let r = sqrt(&[Value::Number(16.0)], &Environment::new(), 1).unwrap();
/// assert_eq!(r, Value::Number(4.0));
/// ```
pub fn sqrt(args: &[Value], _: &Environment, line: usize) -> EvalResult<Value> {
    let [x] = arguments(args, line)?;
    let x = number(x, "sqrt", line)?;
    if x < 0.0 {
        return Err(RuntimeError::NumberOutOfRange { value: x,
                                                    range: "[0, inf)".to_string(),
                                                    line });
    }
    Ok(Value::Number(x.sqrt()))
}

/// Applies `abs`, `floor`, `ceil` or `round` to a number.
pub fn unary(function: &str, args: &[Value], line: usize) -> EvalResult<Value> {
    let [x] = arguments(args, line)?;
    let x = number(x, function, line)?;
    let result = match function {
        "abs" => x.abs(),
        "floor" => x.floor(),
        "ceil" => x.ceil(),
        _ => x.round(),
    };
    Ok(Value::Number(result))
}

/// `min`/`max` of two numbers, or of the numbers in one list.
///
/// # Errors
/// - [`RuntimeError::EmptyContainer`] for an empty list.
/// - [`RuntimeError::IllegalDataType`] for anything that is not a number.
pub fn min_max(function: &str, args: &[Value], line: usize) -> EvalResult<Value> {
    let numbers = match args {
        [Value::List(items)] => items.borrow()
                                     .iter()
                                     .map(|item| number(item, function, line))
                                     .collect::<EvalResult<Vec<_>>>()?,
        _ => args.iter()
                 .map(|arg| number(arg, function, line))
                 .collect::<EvalResult<Vec<_>>>()?,
    };

    let pick = if function == "min" { f64::min } else { f64::max };
    numbers.into_iter()
           .reduce(pick)
           .map(Value::Number)
           .ok_or_else(|| RuntimeError::EmptyContainer { operation: function.to_string(),
                                                         line })
}

/// `base` raised to `exponent`.
pub fn pow(args: &[Value], _: &Environment, line: usize) -> EvalResult<Value> {
    let [base, exponent] = arguments(args, line)?;
    let base = number(base, "pow", line)?;
    let exponent = number(exponent, "pow", line)?;
    Ok(Value::Number(base.powf(exponent)))
}
