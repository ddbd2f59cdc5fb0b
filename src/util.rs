/// Numeric conversion helpers.
///
/// This module provides safe functions for converting between the language's
/// `f64` numbers and the integers used for bitwise operations and container
/// positions, without silent truncation.
///
/// All fallible functions return a `Result`, which is `Ok` if the conversion
/// is lossless and valid, or a runtime error if the value is out of range or
/// not a whole number.
pub mod num;
