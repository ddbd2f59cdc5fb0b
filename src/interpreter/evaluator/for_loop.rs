use std::{
    io::{BufRead, Write},
    vec,
};

use crate::{
    ast::{Expr, Statement},
    error::RuntimeError,
    interpreter::{
        environment::{ScopeId, Variable},
        evaluator::core::{EvalResult, Flow, Interpreter},
        value::core::Value,
    },
    util::num::MAX_SAFE_INT,
};

/// Tolerance for reaching the last value of a fractional stride.
const STEP_EPSILON: f64 = 1e-9;

/// An arithmetic sequence `first + k * stride` for `k < count`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stepped {
    first:  f64,
    stride: f64,
    count:  u64,
    next:   u64,
}

impl Stepped {
    /// The sequence from `first` towards `last` in steps of `stride`,
    /// including `last` when a step lands on it.
    ///
    /// # Errors
    /// [`RuntimeError::InvalidLoopExpression`] for a zero or non-finite
    /// stride, a non-finite bound, or a sequence too long to count.
    ///
    /// # Example
    /// ```
    /// use pseudokod::interpreter::evaluator::for_loop::Stepped;
    ///
    /// let odd: Vec<_> = Stepped::new(1.0, 2.0, 9.0, 1).unwrap().collect();
    /// assert_eq!(odd, vec![1.0, 3.0, 5.0, 7.0, 9.0]);
    /// ```
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn new(first: f64, stride: f64, last: f64, line: usize) -> EvalResult<Self> {
        let invalid = |details: &str| RuntimeError::InvalidLoopExpression { details: details.to_string(),
                                                                           line };
        if !first.is_finite() || !last.is_finite() {
            return Err(invalid("the sequence bounds must be finite"));
        }
        if stride == 0.0 || !stride.is_finite() {
            return Err(invalid("the step between values must be a non-zero number"));
        }

        let steps = ((last - first) / stride + STEP_EPSILON).floor();
        if steps > MAX_SAFE_INT {
            return Err(invalid("the sequence is too long"));
        }
        let count = if steps < 0.0 { 0 } else { steps as u64 + 1 };

        Ok(Self { first,
                  stride,
                  count,
                  next: 0 })
    }
}

impl Iterator for Stepped {
    type Item = f64;

    #[allow(clippy::cast_precision_loss)]
    fn next(&mut self) -> Option<f64> {
        (self.next < self.count).then(|| {
                                    let value = self.stride.mul_add(self.next as f64, self.first);
                                    self.next += 1;
                                    value
                                })
    }
}

/// Values a `for` loop binds its control variable to, in order.
#[derive(Debug)]
pub enum ForSequence {
    /// Explicitly listed values or the elements of a collection.
    Values(vec::IntoIter<Value>),
    /// An expanded `a, b, ..., z` sequence.
    Stepped(Stepped),
}

impl Iterator for ForSequence {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        match self {
            Self::Values(values) => values.next(),
            Self::Stepped(stepped) => stepped.next().map(Value::Number),
        }
    }
}

impl<W: Write, R: BufRead> Interpreter<W, R> {
    /// Runs a `for` loop.
    ///
    /// The control variable is declared fresh in a new child scope for every
    /// value, so closures and assignments never carry over between
    /// iterations. A `return` inside the body leaves the loop.
    pub(crate) fn execute_for(&mut self,
                              control_variable: &str,
                              values: &[Expr],
                              body: &[Statement],
                              scope: ScopeId,
                              line: usize)
                              -> EvalResult<Flow> {
        for value in self.for_sequence(values, scope, line)? {
            let iteration = self.env.push(scope);
            let result = self.env
                             .declare(iteration,
                                      Variable { value_type: value.value_type(),
                                                 name: control_variable.to_string(),
                                                 constant: false,
                                                 range: None,
                                                 value },
                                      line)
                             .and_then(|()| self.execute_statements(body, iteration));
            self.env.release(iteration);

            if let flow @ Flow::Return(_) = result? {
                return Ok(flow);
            }
        }
        Ok(Flow::Next(Value::Null))
    }

    /// Evaluates a `for` header into the sequence of values to visit.
    ///
    /// - `a, b, ..., z` counts from `a` to `z` in steps of `b - a`.
    /// - `a, ..., z` counts from `a` up to `z` in steps of one, and is empty
    ///   when `z < a`.
    /// - A single list or set visits its elements.
    /// - Anything else visits the listed values.
    ///
    /// # Errors
    /// [`RuntimeError::InvalidLoopExpression`] for a malformed or non-numeric
    /// ellipsis sequence.
    pub fn for_sequence(&mut self,
                        values: &[Expr],
                        scope: ScopeId,
                        line: usize)
                        -> EvalResult<ForSequence> {
        let invalid = |details: &str| RuntimeError::InvalidLoopExpression { details: details.to_string(),
                                                                           line };

        let Some(ellipsis) = values.iter().position(|v| matches!(v, Expr::Ellipsis { .. })) else {
            let evaluated = values.iter()
                                  .map(|value| self.evaluate(value, scope))
                                  .collect::<EvalResult<Vec<_>>>()?;
            let elements = match evaluated.as_slice() {
                [Value::List(items)] => Some(items.borrow().clone()),
                [Value::Set(set)] => Some(set.borrow().iter().cloned().map(Value::from).collect()),
                _ => None,
            };
            return Ok(ForSequence::Values(elements.unwrap_or(evaluated).into_iter()));
        };

        let (leading, trailing) = (&values[..ellipsis], &values[ellipsis + 1..]);
        let [last] = trailing else {
            return Err(invalid("'...' must be followed by exactly one value"));
        };

        let mut number = |expr: &Expr| -> EvalResult<f64> {
            match self.evaluate(expr, scope)? {
                Value::Number(n) => Ok(n),
                other => Err(invalid(&format!("a {} cannot be counted", other.value_type()))),
            }
        };

        let (first, stride) = match leading {
            [] => return Err(invalid("'...' must follow at least one value")),
            [first] => (number(first)?, None),
            [first, second, ..] => {
                let first = number(first)?;
                (first, Some(number(second)? - first))
            },
        };
        for value in leading.iter().skip(2) {
            number(value)?;
        }
        let last = number(last)?;
        let stride = stride.unwrap_or(1.0);

        Stepped::new(first, stride, last, line).map(ForSequence::Stepped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn output(source: &str) -> EvalResult<String> {
        let program = parse(source).unwrap();
        let mut interpreter = Interpreter::new(Vec::new(), "".as_bytes());
        interpreter.run(&program)?;
        Ok(String::from_utf8(interpreter.into_output()).unwrap())
    }

    #[test]
    fn ellipsis_counts_by_one() {
        assert_eq!(output("for i = 1, 2, ..., 5\n\tprint(i)").unwrap(), "1\n2\n3\n4\n5\n");
    }

    #[test]
    fn ellipsis_uses_the_first_step() {
        assert_eq!(output("for i = 1, 3, ..., 9\n\tprint(i)").unwrap(), "1\n3\n5\n7\n9\n");
    }

    #[test]
    fn single_leading_value_counts_up_by_one() {
        assert_eq!(output("for i = 1, ..., 3\n\tprint(i)").unwrap(), "1\n2\n3\n");
        assert_eq!(output("for i = 3, ..., 1\n\tprint(i)").unwrap(), "");
        assert_eq!(output("number n <- 0\nfor i = 1, ..., n\n\tprint(i)").unwrap(), "");
    }

    #[test]
    fn counting_down_needs_two_values() {
        assert_eq!(output("for i = 10, 8, ..., 5\n\tprint(i)").unwrap(), "10\n8\n6\n");
        assert_eq!(output("for i = 3, 2, ..., 1\n\tprint(i)").unwrap(), "3\n2\n1\n");
    }

    #[test]
    fn sequence_running_away_from_the_end_is_empty() {
        assert_eq!(output("for i = 1, 2, ..., 0\n\tprint(i)").unwrap(), "");
    }

    #[test]
    fn zero_stride_is_rejected() {
        assert!(matches!(output("for i = 1, 1, ..., 5\n\tprint(i)"),
                         Err(RuntimeError::InvalidLoopExpression { line: 1, .. })));
    }

    #[test]
    fn non_numeric_ellipsis_is_rejected() {
        assert!(matches!(output("for i = 'a', ..., 'z'\n\tprint(i)"),
                         Err(RuntimeError::InvalidLoopExpression { .. })));
    }

    #[test]
    fn explicit_values_of_any_type() {
        assert_eq!(output("for x = 1, \"a\", 'b'\n\tprint(x)").unwrap(), "1\na\nb\n");
    }

    #[test]
    fn iterating_a_list_and_a_set() {
        assert_eq!(output("list t <- [4, 5]\nfor x ∈ t\n\tprint(x)").unwrap(), "4\n5\n");
        assert_eq!(output("for x ∈ {3, 1, 2}\n\tprint(x)").unwrap(), "1\n2\n3\n");
    }

    #[test]
    fn control_variable_is_fresh_each_iteration() {
        let source = "for i = 1, 2, ..., 3\n\tnumber local <- i\n\tprint(local)\nprint(\"done\")";
        assert_eq!(output(source).unwrap(), "1\n2\n3\ndone\n");
        assert!(matches!(output("for i = 1, 2\n\tprint(i)\nprint(i)"),
                         Err(RuntimeError::VariableNotDeclared { line: 3, .. })));
    }

    #[test]
    fn huge_sequences_are_lazy() {
        let source = "function first(): number\n\tfor i = 1, ..., 1000000000000\n\t\treturn i\n\treturn 0\nprint(first())";
        assert_eq!(output(source).unwrap(), "1\n");
    }

    #[test]
    fn fractional_steps_reach_the_end() {
        let values: Vec<_> = Stepped::new(0.0, 0.1, 0.3, 1).unwrap().collect();
        assert_eq!(values.len(), 4);
    }
}
