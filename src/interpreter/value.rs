/// The runtime value type.
///
/// Defines `Value`, the data every expression evaluates to, together with
/// type checks, declared-type coercion, canonical rendering for equality and
/// the `Display` form used by `print`.
pub mod core;
/// Function values.
///
/// Defines user function closures and native host functions, both of which
/// are first-class values bound in scopes.
pub mod function;
/// Numeric interval values such as `(0, 10]`.
pub mod range;
/// Set value representation.
///
/// Defines the `SetValue` type, which is used for the elements of a
/// `Value::Set`. Elements are totally ordered so sets keep a stable, sorted
/// iteration order and reject duplicates.
pub mod set_value;
