use std::fmt::{self, Display, Formatter};

/// A numeric interval with independently open or closed ends.
///
/// Ranges constrain declared numbers and answer `∈` tests. They are plain
/// values: copying a range never shares state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeValue {
    /// Lower bound.
    pub lower:          f64,
    /// Upper bound.
    pub upper:          f64,
    /// Whether `lower` itself belongs to the range.
    pub left_included:  bool,
    /// Whether `upper` itself belongs to the range.
    pub right_included: bool,
}

impl RangeValue {
    /// Creates the closed range `[lower, upper]`.
    #[must_use]
    pub const fn closed(lower: f64, upper: f64) -> Self {
        Self { lower,
               upper,
               left_included: true,
               right_included: true }
    }

    /// Tests whether `value` lies in the range, honoring both ends.
    ///
    /// # Example
    /// ```
    /// use pseudokod::interpreter::value::range::RangeValue;
    ///
    /// let r = RangeValue { lower:          0.0,
    ///                      upper:          10.0,
    ///                      left_included:  false,
    ///                      right_included: true, };
    ///
    /// assert!(r.contains(10.0));
    /// assert!(!r.contains(0.0));
    /// assert!(!r.contains(11.0));
    /// ```
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        let above = if self.left_included {
            value >= self.lower
        } else {
            value > self.lower
        };
        let below = if self.right_included {
            value <= self.upper
        } else {
            value < self.upper
        };
        above && below
    }
}

impl Display for RangeValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let open = if self.left_included { '[' } else { '(' };
        let close = if self.right_included { ']' } else { ')' };
        write!(f, "{open}{}, {}{close}", self.lower, self.upper)
    }
}
