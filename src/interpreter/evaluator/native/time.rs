use std::{thread, time::Duration};

use crate::{
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::{core::EvalResult, utils::arguments},
        value::core::Value,
    },
};

/// Blocks the program for the given number of milliseconds.
///
/// # Errors
/// - [`RuntimeError::IllegalDataType`] for a non-number.
/// - [`RuntimeError::NumberOutOfRange`] for a negative or non-finite delay.
pub fn wait(args: &[Value], _: &Environment, line: usize) -> EvalResult<Value> {
    let [millis] = arguments(args, line)?;
    let millis = millis.as_number("as an argument of 'wait'", line)?;
    let delay = Duration::try_from_secs_f64(millis / 1000.0).map_err(|_| {
                                                                RuntimeError::NumberOutOfRange { value: millis,
                                                                                                 range: "[0, inf)".to_string(),
                                                                                                 line }
                                                            })?;
    thread::sleep(delay);
    Ok(Value::Null)
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[test]
    fn waits_at_least_the_delay() {
        let start = Instant::now();
        wait(&[Value::Number(20.0)], &Environment::new(), 1).unwrap();
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn negative_delay_is_rejected() {
        assert!(matches!(wait(&[Value::Number(-1.0)], &Environment::new(), 2),
                         Err(RuntimeError::NumberOutOfRange { line: 2, .. })));
    }
}
