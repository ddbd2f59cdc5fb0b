use std::{cell::RefCell, collections::BTreeSet, fmt::Display, rc::Rc};

use ordered_float::OrderedFloat;

use crate::{
    ast::ValueType,
    interpreter::value::{core::Value, range::RangeValue},
};

/// Enum representing values allowed in sets.
///
/// Elements are compared structurally. Containers become snapshots of their
/// contents when inserted, so later changes to the original list do not
/// reorder the set.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum SetValue {
    /// `null`
    Null,
    /// A number such as `3.5`.
    Number(OrderedFloat<f64>),
    /// A boolean such as `true`.
    Boolean(bool),
    /// A character such as `'a'`.
    Char(char),
    /// A string such as `"ala"`.
    String(String),
    /// A list such as `[1, 2, 2]`.
    List(Vec<SetValue>),
    /// A set such as `{1, 2, true}`.
    Set(BTreeSet<SetValue>),
    /// A range such as `(0, 1]`, as lower, upper and the inclusivity flags.
    Range(OrderedFloat<f64>, OrderedFloat<f64>, bool, bool),
}

impl TryFrom<&Value> for SetValue {
    /// The type of the value that cannot be a set element.
    type Error = ValueType;

    fn try_from(v: &Value) -> Result<Self, Self::Error> {
        Ok(match v {
            Value::Null => Self::Null,
            Value::Number(n) => Self::Number(OrderedFloat(*n)),
            Value::Boolean(b) => Self::Boolean(*b),
            Value::Char(c) => Self::Char(*c),
            Value::String(s) => Self::String(s.clone()),
            Value::List(items) => {
                Self::List(items.borrow().iter().map(Self::try_from).collect::<Result<_, _>>()?)
            },
            Value::Set(set) => Self::Set(set.borrow().clone()),
            Value::Range(r) => Self::Range(OrderedFloat(r.lower),
                                           OrderedFloat(r.upper),
                                           r.left_included,
                                           r.right_included),
            Value::Stack(_) | Value::Queue(_) | Value::Function(_) | Value::Native(_) => {
                return Err(v.value_type());
            },
        })
    }
}

impl From<SetValue> for Value {
    fn from(s: SetValue) -> Self {
        match s {
            SetValue::Null => Self::Null,
            SetValue::Number(n) => Self::Number(n.into_inner()),
            SetValue::Boolean(b) => Self::Boolean(b),
            SetValue::Char(c) => Self::Char(c),
            SetValue::String(s) => Self::String(s),
            SetValue::List(items) => {
                Self::List(Rc::new(RefCell::new(items.into_iter().map(Self::from).collect())))
            },
            SetValue::Set(set) => Self::Set(Rc::new(RefCell::new(set))),
            SetValue::Range(lower, upper, left_included, right_included) => {
                Self::Range(RangeValue { lower: lower.into_inner(),
                                         upper: upper.into_inner(),
                                         left_included,
                                         right_included })
            },
        }
    }
}

impl Display for SetValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value: Value = self.clone().into();
        write!(f, "{value}")
    }
}
