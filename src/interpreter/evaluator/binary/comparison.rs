use std::cmp::Ordering;

use crate::{
    ast::{ComparisonOperator, ValueType},
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Maps an ordering to the result of a relational operator.
#[must_use]
pub const fn ordering_op_result(operator: ComparisonOperator, ordering: Ordering) -> bool {
    match operator {
        ComparisonOperator::Equal => ordering.is_eq(),
        ComparisonOperator::NotEqual => ordering.is_ne(),
        ComparisonOperator::Less => ordering.is_lt(),
        ComparisonOperator::LessEqual => ordering.is_le(),
        ComparisonOperator::Greater => ordering.is_gt(),
        ComparisonOperator::GreaterEqual => ordering.is_ge(),
    }
}

/// Evaluates a comparison of the form `Value <Operator> Value`.
///
/// The operands must share a type, or one of them must be `null`. Equality
/// compares canonical renderings. Ordering is defined for numbers,
/// characters, strings and booleans; any ordering against `null` is false.
///
/// # Errors
/// - [`RuntimeError::IncompatibleDataTypes`] for operands of different
///   non-null types.
/// - [`RuntimeError::IllegalDataType`] when ordering unordered types such as
///   lists.
///
/// # Example
/// ```
/// use pseudokod::{
///     ast::ComparisonOperator,
///     interpreter::{evaluator::binary::comparison::eval_comparison, value::core::Value},
/// };
///
/// let result = eval_comparison(ComparisonOperator::Less,
///                              &Value::Number(3.0),
///                              &Value::Number(5.0),
///                              1);
///
/// assert_eq!(result.unwrap(), Value::Boolean(true));
/// ```
pub fn eval_comparison(operator: ComparisonOperator,
                       left: &Value,
                       right: &Value,
                       line: usize)
                       -> EvalResult<Value> {
    let (left_type, right_type) = (left.value_type(), right.value_type());
    if left_type != right_type && left_type != ValueType::Null && right_type != ValueType::Null {
        return Err(RuntimeError::IncompatibleDataTypes { operator: operator.to_string(),
                                                         left: left_type,
                                                         right: right_type,
                                                         line });
    }

    let result = match operator {
        ComparisonOperator::Equal => left == right,
        ComparisonOperator::NotEqual => left != right,
        _ if left_type == ValueType::Null || right_type == ValueType::Null => false,
        _ => {
            let ordering = match (left, right) {
                (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
                (Value::Char(a), Value::Char(b)) => Some(a.cmp(b)),
                (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
                (Value::Boolean(a), Value::Boolean(b)) => Some(a.cmp(b)),
                _ => {
                    return Err(RuntimeError::IllegalDataType { found: left_type,
                                                               details: format!("with '{operator}'"),
                                                               line });
                },
            };
            ordering.is_some_and(|ordering| ordering_op_result(operator, ordering))
        },
    };

    Ok(Value::Boolean(result))
}

/// Evaluates `element ∈ collection`.
///
/// - Against a range: the element must be a number; both ends honor their
///   inclusivity.
/// - Against a list or a set: true when some member equals the element.
///
/// # Errors
/// [`RuntimeError::IllegalDataType`] for a non-number tested against a range,
/// or a right side that is not a range, list or set.
pub fn eval_membership(element: &Value, collection: &Value, line: usize) -> EvalResult<Value> {
    let found = match collection {
        Value::Range(range) => range.contains(element.as_number("as a range element", line)?),
        Value::List(items) => items.borrow().iter().any(|item| item == element),
        Value::Set(set) => element.to_set_element(line)
                                  .is_ok_and(|element| set.borrow().contains(&element)),
        other => {
            return Err(RuntimeError::IllegalDataType { found:   other.value_type(),
                                                       details: "on the right of '∈'".to_string(),
                                                       line });
        },
    };
    Ok(Value::Boolean(found))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::value::range::RangeValue;

    fn cmp(op: ComparisonOperator, a: &Value, b: &Value) -> EvalResult<Value> {
        eval_comparison(op, a, b, 1)
    }

    #[test]
    fn equality_across_types_is_rejected_but_null_is_allowed() {
        assert!(matches!(cmp(ComparisonOperator::Equal, &Value::Number(1.0), &Value::from("1")),
                         Err(RuntimeError::IncompatibleDataTypes { .. })));
        assert_eq!(cmp(ComparisonOperator::Equal, &Value::Number(1.0), &Value::Null).unwrap(),
                   Value::Boolean(false));
        assert_eq!(cmp(ComparisonOperator::NotEqual, &Value::Null, &Value::from("a")).unwrap(),
                   Value::Boolean(true));
        assert_eq!(cmp(ComparisonOperator::Equal, &Value::Null, &Value::Null).unwrap(),
                   Value::Boolean(true));
    }

    #[test]
    fn ordering_against_null_is_false() {
        for op in [ComparisonOperator::Less, ComparisonOperator::GreaterEqual] {
            assert_eq!(cmp(op, &Value::Number(1.0), &Value::Null).unwrap(),
                       Value::Boolean(false));
        }
    }

    #[test]
    fn strings_and_chars_order_lexicographically() {
        assert_eq!(cmp(ComparisonOperator::Less, &Value::from("abc"), &Value::from("abd")).unwrap(),
                   Value::Boolean(true));
        assert_eq!(cmp(ComparisonOperator::Greater, &Value::Char('b'), &Value::Char('a')).unwrap(),
                   Value::Boolean(true));
    }

    #[test]
    fn lists_compare_by_content_but_have_no_order() {
        let a = Value::from(vec![Value::Number(1.0)]);
        let b = Value::from(vec![Value::Number(1.0)]);
        assert_eq!(cmp(ComparisonOperator::Equal, &a, &b).unwrap(), Value::Boolean(true));
        assert!(matches!(cmp(ComparisonOperator::Less, &a, &b),
                         Err(RuntimeError::IllegalDataType { found: ValueType::List,
                                                             .. })));
    }

    #[test]
    fn membership_in_half_open_range() {
        let range = Value::Range(RangeValue { lower:          0.0,
                                              upper:          10.0,
                                              left_included:  false,
                                              right_included: true, });
        let test = |n: f64| eval_membership(&Value::Number(n), &range, 1).unwrap();
        assert_eq!(test(10.0), Value::Boolean(true));
        assert_eq!(test(0.0), Value::Boolean(false));
        assert_eq!(test(5.5), Value::Boolean(true));
    }

    #[test]
    fn membership_in_list_and_set() {
        let list = Value::from(vec![Value::from("a"), Value::Number(2.0)]);
        assert_eq!(eval_membership(&Value::Number(2.0), &list, 1).unwrap(),
                   Value::Boolean(true));
        assert_eq!(eval_membership(&Value::from("2"), &list, 1).unwrap(),
                   Value::Boolean(false));

        let set = list.coerce(ValueType::Set, 1).unwrap();
        assert_eq!(eval_membership(&Value::from("a"), &set, 1).unwrap(),
                   Value::Boolean(true));
    }

    #[test]
    fn membership_needs_a_collection() {
        assert!(matches!(eval_membership(&Value::Number(1.0), &Value::Number(1.0), 5),
                         Err(RuntimeError::IllegalDataType { line: 5, .. })));
    }
}
