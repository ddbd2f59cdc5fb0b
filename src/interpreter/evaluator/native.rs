use crate::{
    ast::ValueType,
    interpreter::{
        environment::{Environment, ScopeId, Variable},
        value::{
            core::Value,
            function::{Arity, NativeFunction},
        },
    },
};

/// Container operations: `push`, `pop`, `top`, `front`, `size`, `empty`.
pub mod containers;

/// Numeric functions of the `math` module.
pub mod math;

/// The `time` module.
pub mod time;

/// Defines a static table of native functions.
///
/// Each entry maps a name to its arity and implementation. Polish and
/// English spellings of the same function are separate entries sharing one
/// implementation.
macro_rules! native_functions {
    (
        $table:ident {
            $(
                $name:literal => {
                    arity: $arity:expr,
                    func: $func:expr $(,)?
                }
            ),* $(,)?
        }
    ) => {
        static $table: &[NativeFunction] = &[
            $(
                NativeFunction { name: $name, arity: $arity, func: $func },
            )*
        ];
    };
}

native_functions! {
    PRELUDE {
        "push"     => { arity: Arity::Exact(2), func: containers::push },
        "wstaw"    => { arity: Arity::Exact(2), func: containers::push },
        "pop"      => { arity: Arity::Exact(1), func: containers::pop },
        "zdejmij"  => { arity: Arity::Exact(1), func: containers::pop },
        "top"      => { arity: Arity::Exact(1), func: containers::top },
        "szczyt"   => { arity: Arity::Exact(1), func: containers::top },
        "front"    => { arity: Arity::Exact(1), func: containers::front },
        "przod"    => { arity: Arity::Exact(1), func: containers::front },
        "przód"    => { arity: Arity::Exact(1), func: containers::front },
        "size"     => { arity: Arity::Exact(1), func: containers::size },
        "rozmiar"  => { arity: Arity::Exact(1), func: containers::size },
        "empty"    => { arity: Arity::Exact(1), func: containers::empty },
        "pusty"    => { arity: Arity::Exact(1), func: containers::empty },
    }
}

native_functions! {
    MATH {
        "sqrt"        => { arity: Arity::Exact(1), func: math::sqrt },
        "pierwiastek" => { arity: Arity::Exact(1), func: math::sqrt },
        "abs"         => { arity: Arity::Exact(1), func: |args, _, line| math::unary("abs", args, line) },
        "floor"       => { arity: Arity::Exact(1), func: |args, _, line| math::unary("floor", args, line) },
        "podloga"     => { arity: Arity::Exact(1), func: |args, _, line| math::unary("floor", args, line) },
        "ceil"        => { arity: Arity::Exact(1), func: |args, _, line| math::unary("ceil", args, line) },
        "sufit"       => { arity: Arity::Exact(1), func: |args, _, line| math::unary("ceil", args, line) },
        "round"       => { arity: Arity::Exact(1), func: |args, _, line| math::unary("round", args, line) },
        "zaokraglij"  => { arity: Arity::Exact(1), func: |args, _, line| math::unary("round", args, line) },
        "min"         => { arity: Arity::OneOf(&[1, 2]), func: |args, _, line| math::min_max("min", args, line) },
        "max"         => { arity: Arity::OneOf(&[1, 2]), func: |args, _, line| math::min_max("max", args, line) },
        "pow"         => { arity: Arity::Exact(2), func: math::pow },
        "potega"      => { arity: Arity::Exact(2), func: math::pow },
    }
}

native_functions! {
    TIME {
        "wait"   => { arity: Arity::Exact(1), func: time::wait },
        "czekaj" => { arity: Arity::Exact(1), func: time::wait },
    }
}

/// Wraps a native function in a constant variable of the same name.
#[must_use]
pub fn variable(function: NativeFunction) -> Variable {
    Variable { value_type: ValueType::Function,
               name:       function.name.to_string(),
               constant:   true,
               range:      None,
               value:      Value::Native(function), }
}

/// Binds the container operations into the prelude scope.
pub fn install_prelude(env: &mut Environment) {
    for function in PRELUDE {
        env.bind(ScopeId::PRELUDE, variable(*function));
    }
}

/// Looks up an importable module by its English or Polish name.
///
/// # Example
/// ```
/// use pseudokod::interpreter::evaluator::native::module;
///
/// assert!(module("matematyka").is_some_and(|m| m.iter().any(|f| f.name == "sqrt")));
/// assert!(module("graphics").is_none());
/// ```
#[must_use]
pub fn module(name: &str) -> Option<&'static [NativeFunction]> {
    match name {
        "math" | "matematyka" => Some(MATH),
        "time" | "czas" => Some(TIME),
        _ => None,
    }
}
