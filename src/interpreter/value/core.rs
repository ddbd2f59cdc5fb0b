use std::{
    cell::RefCell,
    collections::{BTreeSet, VecDeque},
    fmt::{self, Display, Formatter},
    rc::Rc,
};

use crate::{
    ast::ValueType,
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{
            function::{FunctionValue, NativeFunction},
            range::RangeValue,
            set_value::SetValue,
        },
    },
};

/// Represents a runtime value in the interpreter.
///
/// Scalars and ranges are copied on assignment. Lists, sets, stacks, queues
/// and functions are shared: every variable holding one sees mutations made
/// through any other.
#[derive(Debug, Clone)]
pub enum Value {
    /// The absence of a value; also the initial value of undeclared-initializer
    /// variables.
    Null,
    /// A double precision number.
    Number(f64),
    /// `true` or `false`.
    Boolean(bool),
    /// A single character.
    Char(char),
    /// A string.
    String(String),
    /// A mutable, indexable sequence.
    List(Rc<RefCell<Vec<Self>>>),
    /// A sorted collection of unique elements.
    Set(Rc<RefCell<BTreeSet<SetValue>>>),
    /// A numeric interval.
    Range(RangeValue),
    /// A last-in first-out container; the top is the end of the vector.
    Stack(Rc<RefCell<Vec<Self>>>),
    /// A first-in first-out container; the front is the front of the deque.
    Queue(Rc<RefCell<VecDeque<Self>>>),
    /// A user-defined function.
    Function(Rc<FunctionValue>),
    /// A host function.
    Native(NativeFunction),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Self::Char(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::List(Rc::new(RefCell::new(v)))
    }
}

impl From<RangeValue> for Value {
    fn from(v: RangeValue) -> Self {
        Self::Range(v)
    }
}

/// Values are equal when their canonical renderings are.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Value {
    /// Gets the type tag of the value.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::Null => ValueType::Null,
            Self::Number(_) => ValueType::Number,
            Self::Boolean(_) => ValueType::Boolean,
            Self::Char(_) => ValueType::Char,
            Self::String(_) => ValueType::String,
            Self::List(_) => ValueType::List,
            Self::Set(_) => ValueType::Set,
            Self::Range(_) => ValueType::Range,
            Self::Stack(_) => ValueType::Stack,
            Self::Queue(_) => ValueType::Queue,
            Self::Function(_) | Self::Native(_) => ValueType::Function,
        }
    }

    /// Renders the value with its type tag.
    ///
    /// Two values are equal exactly when these strings are, so `1` and `"1"`
    /// differ while two lists with equal elements do not.
    ///
    /// # Example
    /// ```
    /// use pseudokod::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Number(5.0).canonical(), "number:5");
    /// assert_ne!(Value::Number(1.0).canonical(), Value::from("1").canonical());
    /// ```
    #[must_use]
    pub fn canonical(&self) -> String {
        format!("{}:{}", self.value_type(), Nested(self))
    }

    /// Gets the number inside the value.
    ///
    /// # Errors
    /// [`RuntimeError::IllegalDataType`] for any other type; `details` says
    /// what the number was needed for.
    pub fn as_number(&self, details: &str, line: usize) -> EvalResult<f64> {
        match self {
            Self::Number(n) => Ok(*n),
            other => Err(RuntimeError::IllegalDataType { found: other.value_type(),
                                                         details: details.to_string(),
                                                         line }),
        }
    }

    /// Converts the value into a set element.
    ///
    /// # Errors
    /// [`RuntimeError::IllegalDataType`] for stacks, queues and functions.
    pub fn to_set_element(&self, line: usize) -> EvalResult<SetValue> {
        SetValue::try_from(self).map_err(|found| RuntimeError::IllegalDataType { found,
                                                                                 details: "as a set element".to_string(),
                                                                                 line })
    }

    /// Converts the value to the declared type of its destination.
    ///
    /// Accepted conversions:
    /// - a value of exactly the declared type, unchanged;
    /// - `null`, to any type;
    /// - a list, to a stack (last element on top), a queue (first element in
    ///   front) or a set (duplicates dropped);
    /// - a list of two numbers, to the closed range between them;
    /// - a character, to a one-character string.
    ///
    /// # Errors
    /// [`RuntimeError::DataTypeMismatch`] for anything else, and
    /// [`RuntimeError::IllegalDataType`] for list elements that cannot enter
    /// a set.
    ///
    /// # Example
    /// ```
    /// use pseudokod::{ast::ValueType, interpreter::value::core::Value};
    ///
    /// let c = Value::Char('a').coerce(ValueType::String, 1).unwrap();
    /// assert_eq!(c, Value::from("a"));
    ///
    /// assert!(Value::Number(1.0).coerce(ValueType::String, 1).is_err());
    /// ```
    pub fn coerce(self, expected: ValueType, line: usize) -> EvalResult<Self> {
        let mismatch = |found: ValueType| RuntimeError::DataTypeMismatch { expected,
                                                                         found,
                                                                         line };
        match (self, expected) {
            (value, expected) if value.value_type() == expected => Ok(value),
            (Self::Null, _) => Ok(Self::Null),
            (Self::List(items), ValueType::Stack) => {
                Ok(Self::Stack(Rc::new(RefCell::new(items.borrow().clone()))))
            },
            (Self::List(items), ValueType::Queue) => {
                Ok(Self::Queue(Rc::new(RefCell::new(items.borrow().iter().cloned().collect()))))
            },
            (Self::List(items), ValueType::Set) => {
                let set = items.borrow()
                               .iter()
                               .map(|item| item.to_set_element(line))
                               .collect::<EvalResult<BTreeSet<_>>>()?;
                Ok(Self::Set(Rc::new(RefCell::new(set))))
            },
            (Self::List(items), ValueType::Range) => match items.borrow().as_slice() {
                [Self::Number(lower), Self::Number(upper)] => {
                    Ok(Self::Range(RangeValue::closed(*lower, *upper)))
                },
                _ => Err(mismatch(ValueType::List)),
            },
            (Self::Char(c), ValueType::String) => Ok(Self::String(c.to_string())),
            (value, _) => Err(mismatch(value.value_type())),
        }
    }

    /// The truth value of a condition operand; `null` counts as false.
    #[must_use]
    pub const fn as_condition(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            Self::Null => Some(false),
            _ => None,
        }
    }

    /// Whether the value is the shared container `target`, or holds it at
    /// any depth.
    #[must_use]
    pub fn holds(&self, target: &Self) -> bool {
        if self.is_same_container(target) {
            return true;
        }
        match self {
            Self::List(items) | Self::Stack(items) => items.borrow().iter().any(|item| item.holds(target)),
            Self::Queue(items) => items.borrow().iter().any(|item| item.holds(target)),
            _ => false,
        }
    }

    fn is_same_container(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::List(a) | Self::Stack(a), Self::List(b) | Self::Stack(b)) => Rc::ptr_eq(a, b),
            (Self::Queue(a), Self::Queue(b)) => Rc::ptr_eq(a, b),
            (Self::Set(a), Self::Set(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Renders a value as an element of a container: strings and characters
/// keep their quotes.
struct Nested<'a>(&'a Value);

impl Display for Nested<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            Value::Char(c) => write!(f, "'{c}'"),
            Value::String(s) => write!(f, "\"{s}\""),
            other => write!(f, "{other}"),
        }
    }
}

fn write_items<'a>(f: &mut Formatter<'_>,
                   open: &str,
                   items: impl Iterator<Item = &'a Value>,
                   close: &str)
                   -> fmt::Result {
    f.write_str(open)?;
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", Nested(item))?;
    }
    f.write_str(close)
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Char(c) => write!(f, "{c}"),
            Self::String(s) => f.write_str(s),
            Self::List(items) => write_items(f, "[", items.borrow().iter(), "]"),
            Self::Set(set) => {
                let elements = set.borrow().iter().cloned().map(Self::from).collect::<Vec<_>>();
                write_items(f, "{", elements.iter(), "}")
            },
            Self::Range(r) => write!(f, "{r}"),
            Self::Stack(items) => write_items(f, "stack[", items.borrow().iter(), "]"),
            Self::Queue(items) => write_items(f, "queue[", items.borrow().iter(), "]"),
            Self::Function(function) => write!(f, "<function {}>", function.declaration.symbol),
            Self::Native(native) => write!(f, "<function {}>", native.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(values: Vec<Value>) -> Value {
        Value::from(values)
    }

    #[test]
    fn integral_numbers_print_without_fraction() {
        assert_eq!(Value::Number(5.0).to_string(), "5");
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
        assert_eq!(Value::Number(-3.0).to_string(), "-3");
    }

    #[test]
    fn containers_quote_text_elements() {
        let v = list(vec![Value::Number(1.0), Value::from("a"), Value::Char('b')]);
        assert_eq!(v.to_string(), "[1, \"a\", 'b']");
        assert_eq!(Value::from("a").to_string(), "a");
    }

    #[test]
    fn equality_includes_the_type() {
        assert_eq!(Value::Number(1.0), Value::Number(1.0));
        assert_ne!(Value::Number(1.0), Value::from("1"));
        assert_ne!(Value::Char('a'), Value::from("a"));
        assert_eq!(list(vec![Value::Number(1.0)]), list(vec![Value::Number(1.0)]));
        assert_eq!(Value::Null, Value::Null);
    }

    #[test]
    fn null_coerces_to_anything() {
        for t in [ValueType::Number, ValueType::List, ValueType::Stack, ValueType::Range] {
            assert!(matches!(Value::Null.coerce(t, 1), Ok(Value::Null)));
        }
    }

    #[test]
    fn list_coerces_to_containers() {
        let items = || list(vec![Value::Number(1.0), Value::Number(2.0), Value::Number(2.0)]);

        let stack = items().coerce(ValueType::Stack, 1).unwrap();
        assert_eq!(stack.to_string(), "stack[1, 2, 2]");

        let queue = items().coerce(ValueType::Queue, 1).unwrap();
        assert_eq!(queue.to_string(), "queue[1, 2, 2]");

        let set = items().coerce(ValueType::Set, 1).unwrap();
        assert_eq!(set.to_string(), "{1, 2}");
    }

    #[test]
    fn two_number_list_coerces_to_closed_range() {
        let range = list(vec![Value::Number(1.0), Value::Number(5.0)]).coerce(ValueType::Range, 1)
                                                                      .unwrap();
        assert_eq!(range.to_string(), "[1, 5]");

        let err = list(vec![Value::Number(1.0)]).coerce(ValueType::Range, 3).unwrap_err();
        assert_eq!(err,
                   RuntimeError::DataTypeMismatch { expected: ValueType::Range,
                                                    found:    ValueType::List,
                                                    line:     3, });
    }

    #[test]
    fn mismatched_types_are_rejected() {
        let err = Value::Boolean(true).coerce(ValueType::Number, 7).unwrap_err();
        assert_eq!(err,
                   RuntimeError::DataTypeMismatch { expected: ValueType::Number,
                                                    found:    ValueType::Boolean,
                                                    line:     7, });
    }

    #[test]
    fn stack_in_list_cannot_become_a_set() {
        let stack = Value::Stack(Rc::new(RefCell::new(Vec::new())));
        assert!(matches!(list(vec![stack]).coerce(ValueType::Set, 1),
                         Err(RuntimeError::IllegalDataType { found: ValueType::Stack,
                                                             .. })));
    }

    #[test]
    fn nested_containers_are_found_by_identity() {
        let inner = list(vec![Value::Number(1.0)]);
        let outer = list(vec![Value::Null, inner.clone()]);

        assert!(outer.holds(&inner));
        assert!(inner.holds(&inner));
        assert!(!inner.holds(&outer));
        assert!(!outer.holds(&list(vec![Value::Number(1.0)])));
    }

    #[test]
    fn containers_are_shared_between_clones() {
        let a = list(vec![]);
        let b = a.clone();
        if let Value::List(items) = &b {
            items.borrow_mut().push(Value::Number(1.0));
        }
        assert_eq!(a.to_string(), "[1]");
    }
}
