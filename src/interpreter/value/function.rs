use std::{fmt, rc::Rc};

use crate::{
    ast::FunctionDeclaration,
    interpreter::{
        environment::{Environment, ScopeId},
        evaluator::core::EvalResult,
        value::core::Value,
    },
};

/// A user-defined function together with the scope it was declared in.
///
/// Calls resolve free names through `closure`, never through the caller.
#[derive(Debug)]
pub struct FunctionValue {
    /// The parsed declaration, shared with the syntax tree.
    pub declaration: Rc<FunctionDeclaration>,
    /// The scope the declaration was executed in.
    pub closure:     ScopeId,
}

/// Signature of a host-implemented function.
///
/// Receives the evaluated arguments, read access to the environment and the
/// line of the call.
pub type NativeFn = fn(&[Value], &Environment, usize) -> EvalResult<Value>;

/// Specifies the allowed number of arguments for a native function.
///
/// - `Exact(n)` means the function must receive exactly `n` arguments.
/// - `OneOf(slice)` means it accepts any arity listed in `slice`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many arguments.
    Exact(usize),
    /// Any of these argument counts.
    OneOf(&'static [usize]),
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    #[must_use]
    pub fn check(&self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == *m,
            Self::OneOf(arr) => arr.contains(&n),
        }
    }

    /// The smallest accepted argument count, reported in arity errors.
    #[must_use]
    pub fn expected(&self) -> usize {
        match self {
            Self::Exact(m) => *m,
            Self::OneOf(arr) => arr.iter().copied().min().unwrap_or_default(),
        }
    }
}

/// A function provided by the host, such as `push` or `sqrt`.
#[derive(Clone, Copy)]
pub struct NativeFunction {
    /// The name the function is bound under.
    pub name:  &'static str,
    /// Accepted argument counts.
    pub arity: Arity,
    /// The implementation.
    pub func:  NativeFn,
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
         .field("name", &self.name)
         .field("arity", &self.arity)
         .finish_non_exhaustive()
    }
}
