use crate::{ast::ValueType, error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Largest integer magnitude exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_INT: f64 = 9_007_199_254_740_991.0;

/// Safely converts an `f64` to `i64` if the value is finite, within the
/// exactly representable range, and not fractional.
///
/// # Errors
/// [`RuntimeError::IllegalDataType`] naming `details` for any other value.
///
/// # Example
/// ```
/// use pseudokod::util::num::f64_to_i64_checked;
///
/// assert_eq!(f64_to_i64_checked(1000.0, "as a test", 1).unwrap(), 1000);
/// assert!(f64_to_i64_checked(1.5, "as a test", 1).is_err());
/// assert!(f64_to_i64_checked(1e20, "as a test", 1).is_err());
/// ```
#[allow(clippy::cast_possible_truncation)]
pub fn f64_to_i64_checked(value: f64, details: &str, line: usize) -> EvalResult<i64> {
    if !value.is_finite() || value.abs() > MAX_SAFE_INT || value.fract() != 0.0 {
        return Err(RuntimeError::IllegalDataType { found: ValueType::Number,
                                                   details: format!("{details} unless it is a whole number"),
                                                   line });
    }
    Ok(value as i64)
}

/// Converts an integer result back to a number.
///
/// # Errors
/// [`RuntimeError::NumberOutOfRange`] when the integer has no exact `f64`
/// representation.
#[allow(clippy::cast_precision_loss)]
pub fn i64_to_f64_checked(value: i64, line: usize) -> EvalResult<f64> {
    let converted = value as f64;
    if converted.abs() > MAX_SAFE_INT {
        return Err(RuntimeError::NumberOutOfRange { value: converted,
                                                    range: format!("[-{MAX_SAFE_INT}, {MAX_SAFE_INT}]"),
                                                    line });
    }
    Ok(converted)
}

/// Converts a number into a container position.
///
/// # Errors
/// [`RuntimeError::IllegalIndexType`] unless the value is a finite,
/// non-negative whole number.
///
/// # Example
/// ```
/// use pseudokod::util::num::f64_to_index;
///
/// assert_eq!(f64_to_index(3.0, 1).unwrap(), 3);
/// assert!(f64_to_index(-1.0, 1).is_err());
/// assert!(f64_to_index(0.5, 1).is_err());
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
pub fn f64_to_index(value: f64, line: usize) -> EvalResult<usize> {
    if !value.is_finite() || value < 0.0 || value > MAX_SAFE_INT || value.fract() != 0.0 {
        return Err(RuntimeError::IllegalIndexType { line });
    }
    Ok(value as usize)
}

/// Converts a container length into a number.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn usize_to_f64(value: usize) -> f64 {
    value as f64
}
