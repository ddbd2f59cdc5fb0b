use crate::{
    error::RuntimeError,
    interpreter::{environment::Environment,
                  evaluator::{core::EvalResult, utils::arguments},
                  value::core::Value},
    util::num::usize_to_f64,
};

fn illegal(operation: &str, value: &Value, line: usize) -> RuntimeError {
    RuntimeError::IllegalDataType { found: value.value_type(),
                                    details: format!("with '{operation}'"),
                                    line }
}

fn empty_container(operation: &str, line: usize) -> RuntimeError {
    RuntimeError::EmptyContainer { operation: operation.to_string(),
                                   line }
}

/// Adds a value to a container and returns `null`.
///
/// Stacks receive it on top, queues at the back, lists at the end; sets
/// insert it unless already present.
///
/// # Example
/// ```
/// use pseudokod::interpreter::{
///     environment::Environment,
///     evaluator::native::containers::{push, size},
///     value::core::Value,
/// };
///
/// let env = Environment::new();
/// let list = Value::from(Vec::<Value>::new());
/// push(&[list.clone(), Value::Number(1.0)], &env, 1).unwrap();
///
/// assert_eq!(size(&[list], &env, 1).unwrap(), Value::Number(1.0));
/// ```
pub fn push(args: &[Value], _: &Environment, line: usize) -> EvalResult<Value> {
    let [target, value] = arguments(args, line)?;
    if !matches!(target, Value::Set(_)) && value.holds(target) {
        return Err(RuntimeError::IllegalDataType { found: value.value_type(),
                                                   details: "inside itself".to_string(),
                                                   line });
    }

    match target {
        Value::Stack(items) | Value::List(items) => items.borrow_mut().push(value.clone()),
        Value::Queue(items) => items.borrow_mut().push_back(value.clone()),
        Value::Set(set) => {
            let element = value.to_set_element(line)?;
            set.borrow_mut().insert(element);
        },
        other => return Err(illegal("push", other, line)),
    }
    Ok(Value::Null)
}

/// Removes and returns the top of a stack, the front of a queue, or the last
/// element of a list.
pub fn pop(args: &[Value], _: &Environment, line: usize) -> EvalResult<Value> {
    let [target] = arguments(args, line)?;
    let removed = match target {
        Value::Stack(items) | Value::List(items) => items.borrow_mut().pop(),
        Value::Queue(items) => items.borrow_mut().pop_front(),
        other => return Err(illegal("pop", other, line)),
    };
    removed.ok_or_else(|| empty_container("pop", line))
}

/// Returns the top of a stack without removing it.
pub fn top(args: &[Value], _: &Environment, line: usize) -> EvalResult<Value> {
    let [target] = arguments(args, line)?;
    match target {
        Value::Stack(items) => items.borrow().last().cloned().ok_or_else(|| empty_container("top", line)),
        other => Err(illegal("top", other, line)),
    }
}

/// Returns the front of a queue without removing it.
pub fn front(args: &[Value], _: &Environment, line: usize) -> EvalResult<Value> {
    let [target] = arguments(args, line)?;
    match target {
        Value::Queue(items) => items.borrow().front().cloned().ok_or_else(|| empty_container("front", line)),
        other => Err(illegal("front", other, line)),
    }
}

fn length(value: &Value, operation: &str, line: usize) -> EvalResult<usize> {
    Ok(match value {
        Value::List(items) | Value::Stack(items) => items.borrow().len(),
        Value::Queue(items) => items.borrow().len(),
        Value::Set(set) => set.borrow().len(),
        Value::String(s) => s.chars().count(),
        other => return Err(illegal(operation, other, line)),
    })
}

/// Number of elements in a container, or characters in a string.
pub fn size(args: &[Value], _: &Environment, line: usize) -> EvalResult<Value> {
    let [target] = arguments(args, line)?;
    length(target, "size", line).map(|n| Value::Number(usize_to_f64(n)))
}

/// Whether a container or string has no elements.
pub fn empty(args: &[Value], _: &Environment, line: usize) -> EvalResult<Value> {
    let [target] = arguments(args, line)?;
    length(target, "empty", line).map(|n| Value::Boolean(n == 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ValueType;

    fn stack() -> Value {
        Value::from(vec![Value::Number(1.0), Value::Number(2.0)]).coerce(ValueType::Stack, 1)
                                                                   .unwrap()
    }

    fn queue() -> Value {
        Value::from(vec![Value::Number(1.0), Value::Number(2.0)]).coerce(ValueType::Queue, 1)
                                                                   .unwrap()
    }

    #[test]
    fn stack_is_last_in_first_out() {
        let env = Environment::new();
        let s = stack();
        push(&[s.clone(), Value::Number(3.0)], &env, 1).unwrap();

        assert_eq!(top(&[s.clone()], &env, 1).unwrap(), Value::Number(3.0));
        assert_eq!(pop(&[s.clone()], &env, 1).unwrap(), Value::Number(3.0));
        assert_eq!(pop(&[s.clone()], &env, 1).unwrap(), Value::Number(2.0));
        assert_eq!(size(&[s], &env, 1).unwrap(), Value::Number(1.0));
    }

    #[test]
    fn queue_is_first_in_first_out() {
        let env = Environment::new();
        let q = queue();
        push(&[q.clone(), Value::Number(3.0)], &env, 1).unwrap();

        assert_eq!(front(&[q.clone()], &env, 1).unwrap(), Value::Number(1.0));
        assert_eq!(pop(&[q.clone()], &env, 1).unwrap(), Value::Number(1.0));
        assert_eq!(q.to_string(), "queue[2, 3]");
    }

    #[test]
    fn empty_containers() {
        let env = Environment::new();
        let s = Value::from(Vec::<Value>::new()).coerce(ValueType::Stack, 1).unwrap();

        assert_eq!(empty(&[s.clone()], &env, 1).unwrap(), Value::Boolean(true));
        assert_eq!(pop(&[s.clone()], &env, 7).unwrap_err(),
                   RuntimeError::EmptyContainer { operation: "pop".to_string(),
                                                  line:      7, });
        assert!(matches!(top(&[s], &env, 1), Err(RuntimeError::EmptyContainer { .. })));
    }

    #[test]
    fn wrong_container_kind() {
        let env = Environment::new();
        assert!(matches!(top(&[queue()], &env, 2),
                         Err(RuntimeError::IllegalDataType { found: ValueType::Queue,
                                                             line: 2,
                                                             .. })));
        assert!(push(&[Value::Number(1.0), Value::Null], &env, 1).is_err());
    }

    #[test]
    fn size_of_strings_and_sets() {
        let env = Environment::new();
        let set = Value::from(vec![Value::Number(1.0), Value::Number(1.0)]).coerce(ValueType::Set, 1)
                                                                             .unwrap();
        assert_eq!(size(&[set], &env, 1).unwrap(), Value::Number(1.0));
        assert_eq!(size(&[Value::from("żółw")], &env, 1).unwrap(), Value::Number(4.0));
    }

    #[test]
    fn container_cannot_be_pushed_into_itself() {
        let env = Environment::new();
        let outer = Value::from(Vec::<Value>::new());
        let inner = Value::from(Vec::<Value>::new());
        push(&[outer.clone(), inner.clone()], &env, 1).unwrap();

        assert!(matches!(push(&[outer.clone(), outer.clone()], &env, 3),
                         Err(RuntimeError::IllegalDataType { found: ValueType::List,
                                                             line: 3,
                                                             .. })));
        assert!(push(&[inner, outer.clone()], &env, 4).is_err());
        assert_eq!(outer.to_string(), "[[]]");
    }

    #[test]
    fn set_pushed_into_itself_is_copied() {
        let env = Environment::new();
        let set = Value::from(vec![Value::Number(1.0)]).coerce(ValueType::Set, 1).unwrap();
        push(&[set.clone(), set.clone()], &env, 1).unwrap();

        assert_eq!(size(&[set], &env, 1).unwrap(), Value::Number(2.0));
    }

    #[test]
    fn wrong_argument_count_is_an_error() {
        let env = Environment::new();
        assert_eq!(push(&[], &env, 5).unwrap_err(),
                   RuntimeError::ArgumentsAmount { expected: 2,
                                                   found:    0,
                                                   line:     5, });
        assert!(matches!(size(&[], &env, 1), Err(RuntimeError::ArgumentsAmount { .. })));
    }
}
