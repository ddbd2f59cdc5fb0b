use std::rc::Rc;

/// Renders the tree back to parseable source text.
pub mod display;

/// A type annotation as written in declarations and parameter lists.
///
/// `Null` and `Function` never appear in source; they tag runtime values in
/// diagnostics and on bindings created by function declarations.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// The type of `null`.
    Null,
    /// `number`, `liczba`
    Number,
    /// `boolean`, `logiczna`
    Boolean,
    /// `char`, `znak`
    Char,
    /// `string`, `napis`
    String,
    /// `list`, `lista`
    List,
    /// `set`, `zbior`
    Set,
    /// `range`, `przedzial`
    Range,
    /// `stack`, `stos`
    Stack,
    /// `queue`, `kolejka`
    Queue,
    /// User-defined or native function.
    Function,
}

/// The root of a parsed program.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// Top-level statements in source order.
    pub body: Vec<Statement>,
}

/// A statement; executed for its effect.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `data: number a, number b := 2`
    DataDeclaration {
        /// Declared variables in source order.
        variables: Vec<VariableDeclaration>,
        /// Line number in the source code.
        line:      usize,
    },
    /// `if` with an optional `else` block; `else if` nests another `If`.
    If {
        /// Condition, must evaluate to a boolean.
        condition:   Expr,
        /// Statements run when the condition holds.
        body:        Vec<Statement>,
        /// Statements run otherwise.
        else_branch: Option<Vec<Statement>>,
        /// Line number in the source code.
        line:        usize,
    },
    /// Pre-test `while` or post-test `do ... while` loop.
    While {
        /// Loop condition, must evaluate to a boolean.
        condition:   Expr,
        /// Loop body.
        body:        Vec<Statement>,
        /// `true` for `do ... while`.
        is_do_while: bool,
        /// Line number in the source code.
        line:        usize,
    },
    /// `for i = 1, 2, ..., n`
    For {
        /// Name bound fresh on each iteration.
        control_variable: String,
        /// Literal value sequence, possibly containing an [`Expr::Ellipsis`].
        values:           Vec<Expr>,
        /// Loop body.
        body:             Vec<Statement>,
        /// Line number in the source code.
        line:             usize,
    },
    /// A user-defined function.
    Function(Rc<FunctionDeclaration>),
    /// `print(a, b)`
    Print {
        /// Values to print, separated by a space.
        arguments: Vec<Expr>,
        /// Line number in the source code.
        line:      usize,
    },
    /// `get(x)` reads one line of input into `x`.
    Get {
        /// Variable receiving the value.
        identifier: String,
        /// Line number in the source code.
        line:       usize,
    },
    /// `return expr`
    Return {
        /// Returned expression; `null` when absent.
        value: Option<Expr>,
        /// Line number in the source code.
        line:  usize,
    },
    /// `import math`
    Import {
        /// Native module name.
        module: String,
        /// Line number in the source code.
        line:   usize,
    },
    /// An expression evaluated for its value or side effect.
    Expression {
        /// The expression to evaluate.
        expr: Expr,
        /// Line number in the source code.
        line: usize,
    },
}

/// One declared variable: `const number x ∈ (0, 10] := 5`.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    /// Declared type.
    pub value_type: ValueType,
    /// Variable name.
    pub symbol:     String,
    /// Whether later assignments are rejected.
    pub constant:   bool,
    /// Optional range every assigned number must belong to.
    pub range:      Option<Expr>,
    /// Optional initializer; `null` when absent.
    pub value:      Option<Expr>,
    /// Line number in the source code.
    pub line:       usize,
}

/// A typed function parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// Declared type, checked on every call.
    pub value_type: ValueType,
    /// Parameter name.
    pub name:       String,
}

/// A function definition with typed parameters, declared locals and an
/// optional return type.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    /// Function name.
    pub symbol:      String,
    /// Parameters in call order.
    pub parameters:  Vec<Parameter>,
    /// Locals declared by the leading `data` block of the body.
    pub locals:      Vec<VariableDeclaration>,
    /// Declared return type.
    pub return_type: Option<ValueType>,
    /// Body statements, without the leading `data` block.
    pub body:        Vec<Statement>,
    /// Line number in the source code.
    pub line:        usize,
}

/// An expression; evaluates to a runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal.
    Number {
        /// The constant value.
        value: f64,
        /// Line number in the source code.
        line:  usize,
    },
    /// Character literal.
    Char {
        /// The constant value.
        value: char,
        /// Line number in the source code.
        line:  usize,
    },
    /// String literal.
    String {
        /// The constant value.
        value: String,
        /// Line number in the source code.
        line:  usize,
    },
    /// `true` or `false`.
    Boolean {
        /// The constant value.
        value: bool,
        /// Line number in the source code.
        line:  usize,
    },
    /// `null`
    Null {
        /// Line number in the source code.
        line: usize,
    },
    /// Reference to a variable by name.
    Identifier {
        /// Name of the variable.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// Negation or logical NOT.
    Unary {
        /// The operator.
        operator: UnaryOperator,
        /// The operand expression.
        operand:  Box<Self>,
        /// Line number in the source code.
        line:     usize,
    },
    /// Arithmetic: `+ - * / mod div`.
    Binary {
        /// Left operand.
        left:     Box<Self>,
        /// The operator.
        operator: BinaryOperator,
        /// Right operand.
        right:    Box<Self>,
        /// Line number in the source code.
        line:     usize,
    },
    /// Comparison: `= ≠ < ≤ > ≥`.
    Comparison {
        /// Left operand.
        left:     Box<Self>,
        /// The operator.
        operator: ComparisonOperator,
        /// Right operand.
        right:    Box<Self>,
        /// Line number in the source code.
        line:     usize,
    },
    /// Short-circuit `AND` / `OR`.
    Logical {
        /// Left operand.
        left:     Box<Self>,
        /// The operator.
        operator: LogicalOperator,
        /// Right operand.
        right:    Box<Self>,
        /// Line number in the source code.
        line:     usize,
    },
    /// Bitwise: `& | xor << >>`.
    Bitwise {
        /// Left operand.
        left:     Box<Self>,
        /// The operator.
        operator: BitwiseOperator,
        /// Right operand.
        right:    Box<Self>,
        /// Line number in the source code.
        line:     usize,
    },
    /// `x ∈ (0, 10]`
    Membership {
        /// The tested value.
        element:    Box<Self>,
        /// A range, list or set.
        collection: Box<Self>,
        /// Line number in the source code.
        line:       usize,
    },
    /// Function call.
    Call {
        /// Expression resolving to the function.
        callee:    Box<Self>,
        /// Arguments in call order.
        arguments: Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// Indexing, e.g. `t[i]`.
    Index {
        /// The indexed container.
        array: Box<Self>,
        /// The index.
        index: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// Range literal, inclusivity taken from the brackets.
    Range {
        /// Lower bound.
        left:           Box<Self>,
        /// Upper bound.
        right:          Box<Self>,
        /// `[` rather than `(`.
        left_included:  bool,
        /// `]` rather than `)`.
        right_included: bool,
        /// Line number in the source code.
        line:           usize,
    },
    /// List literal, e.g. `[1, 2, 3]`.
    Array {
        /// Elements of the list.
        values: Vec<Self>,
        /// Line number in the source code.
        line:   usize,
    },
    /// Set literal, e.g. `{1, 2, 3}`.
    Set {
        /// Elements of the set.
        values: Vec<Self>,
        /// Line number in the source code.
        line:   usize,
    },
    /// `target <- value`
    Assignment {
        /// An `Identifier` or `Index`.
        target: Box<Self>,
        /// The assigned expression.
        value:  Box<Self>,
        /// Line number in the source code.
        line:   usize,
    },
    /// `...` inside a `for` header.
    Ellipsis {
        /// Line number in the source code.
        line: usize,
    },
}

impl Expr {
    /// Gets the line number from `self`.
    /// ## Example
    /// ```
    /// use pseudokod::ast::Expr;
    ///
    /// let expr = Expr::Identifier { name: "x".to_string(),
    ///                               line: 5, };
    ///
    /// assert_eq!(expr.line_number(), 5);
    /// ```
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Number { line, .. }
            | Self::Char { line, .. }
            | Self::String { line, .. }
            | Self::Boolean { line, .. }
            | Self::Null { line }
            | Self::Identifier { line, .. }
            | Self::Unary { line, .. }
            | Self::Binary { line, .. }
            | Self::Comparison { line, .. }
            | Self::Logical { line, .. }
            | Self::Bitwise { line, .. }
            | Self::Membership { line, .. }
            | Self::Call { line, .. }
            | Self::Index { line, .. }
            | Self::Range { line, .. }
            | Self::Array { line, .. }
            | Self::Set { line, .. }
            | Self::Assignment { line, .. }
            | Self::Ellipsis { line } => *line,
        }
    }
}

/// Arithmetic operators.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Remainder (`mod`)
    Mod,
    /// Floor division (`div`)
    IntDiv,
}

/// Comparison operators.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ComparisonOperator {
    /// Equal to (`=`)
    Equal,
    /// Not equal to (`≠`)
    NotEqual,
    /// Less than (`<`)
    Less,
    /// Less than or equal (`≤`)
    LessEqual,
    /// Greater than (`>`)
    Greater,
    /// Greater than or equal (`≥`)
    GreaterEqual,
}

/// Logical connectives.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LogicalOperator {
    /// `AND`
    And,
    /// `OR`
    Or,
}

/// Bitwise operators.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BitwiseOperator {
    /// `&`
    And,
    /// `|`
    Or,
    /// `xor`
    Xor,
    /// `<<`
    ShiftLeft,
    /// `>>`
    ShiftRight,
}

/// Unary operators.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
    /// Logical NOT (e.g. `NOT x`).
    Not,
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Null => "null",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Char => "char",
            Self::String => "string",
            Self::List => "list",
            Self::Set => "set",
            Self::Range => "range",
            Self::Stack => "stack",
            Self::Queue => "queue",
            Self::Function => "function",
        };
        write!(f, "{name}")
    }
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "mod",
            Self::IntDiv => "div",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Equal => "=",
            Self::NotEqual => "≠",
            Self::Less => "<",
            Self::LessEqual => "≤",
            Self::Greater => ">",
            Self::GreaterEqual => "≥",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::And => write!(f, "AND"),
            Self::Or => write!(f, "OR"),
        }
    }
}

impl std::fmt::Display for BitwiseOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::And => "&",
            Self::Or => "|",
            Self::Xor => "xor",
            Self::ShiftLeft => "<<",
            Self::ShiftRight => ">>",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Negate => write!(f, "-"),
            Self::Not => write!(f, "NOT"),
        }
    }
}
