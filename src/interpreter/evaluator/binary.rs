/// Arithmetic on numbers: `+ - * / mod div`.
pub mod arithmetic;
/// Equality, ordering and membership tests.
///
/// Equality compares canonical renderings, so values of different types are
/// never equal; ordering is defined for numbers, characters, strings and
/// booleans.
pub mod comparison;
/// Short-circuit `AND`/`OR` and the bitwise operators.
pub mod logic;
