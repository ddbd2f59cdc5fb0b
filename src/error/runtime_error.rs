use crate::ast::ValueType;

#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can occur during evaluation and runtime.
pub enum RuntimeError {
    /// Declared a name that already exists in the same scope.
    VariableAlreadyDeclared {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Used a name that no enclosing scope declares.
    VariableNotDeclared {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Assigned to a constant after its declaration.
    ConstantAssignment {
        /// The name of the constant.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A value does not fit the declared type of its destination.
    DataTypeMismatch {
        /// The declared type.
        expected: ValueType,
        /// The type of the offending value.
        found:    ValueType,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// An operator received operands of two incompatible types.
    IncompatibleDataTypes {
        /// The operator.
        operator: String,
        /// Type of the left operand.
        left:     ValueType,
        /// Type of the right operand.
        right:    ValueType,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A value of this type is not allowed here.
    IllegalDataType {
        /// The type of the offending value.
        found:   ValueType,
        /// What the value was used for.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// An index that is not a non-negative whole number, or an assignment
    /// index that is not a variable or a number literal.
    IllegalIndexType {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to access an element outside the container.
    IndexOutOfRange {
        /// The index that was requested.
        index:  usize,
        /// The length of the container.
        length: usize,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// A number assigned to a range-constrained variable lies outside it.
    NumberOutOfRange {
        /// The rejected number.
        value: f64,
        /// The range, as written in source.
        range: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Attempted division by zero.
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A loop condition or `for` sequence that cannot drive a loop.
    InvalidLoopExpression {
        /// Why the expression is rejected.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// The wrong number of arguments was supplied to a function.
    ArgumentsAmount {
        /// Number of declared parameters.
        expected: usize,
        /// Number of supplied arguments.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Called a value that is not a function.
    NotCallable {
        /// The type of the called value.
        found: ValueType,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A syntax node that cannot be evaluated where it appears.
    NodeNotSupported {
        /// The node, as written in source.
        node: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Read from an empty stack, queue or list.
    EmptyContainer {
        /// The native operation.
        operation: String,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// Imported a module the host does not provide.
    UnknownModule {
        /// The module name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Reading program input or writing program output failed.
    InputOutput {
        /// The underlying failure.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
}

impl RuntimeError {
    /// Gets the source line the error was raised on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::VariableAlreadyDeclared { line, .. }
            | Self::VariableNotDeclared { line, .. }
            | Self::ConstantAssignment { line, .. }
            | Self::DataTypeMismatch { line, .. }
            | Self::IncompatibleDataTypes { line, .. }
            | Self::IllegalDataType { line, .. }
            | Self::IllegalIndexType { line }
            | Self::IndexOutOfRange { line, .. }
            | Self::NumberOutOfRange { line, .. }
            | Self::DivisionByZero { line }
            | Self::InvalidLoopExpression { line, .. }
            | Self::ArgumentsAmount { line, .. }
            | Self::NotCallable { line, .. }
            | Self::NodeNotSupported { line, .. }
            | Self::EmptyContainer { line, .. }
            | Self::UnknownModule { line, .. }
            | Self::InputOutput { line, .. } => *line,
        }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VariableAlreadyDeclared { name, line } => write!(f,
                                                                   "Error on line {line}: Variable '{name}' is already declared in this scope."),
            Self::VariableNotDeclared { name, line } => {
                write!(f, "Error on line {line}: Variable '{name}' is not declared.")
            },
            Self::ConstantAssignment { name, line } => {
                write!(f, "Error on line {line}: Cannot assign to constant '{name}'.")
            },
            Self::DataTypeMismatch { expected,
                                     found,
                                     line, } => {
                write!(f, "Error on line {line}: Expected a {expected}, found a {found}.")
            },
            Self::IncompatibleDataTypes { operator,
                                          left,
                                          right,
                                          line, } => write!(f,
                                                            "Error on line {line}: Cannot use '{operator}' on a {left} and a {right}."),
            Self::IllegalDataType { found,
                                    details,
                                    line, } => {
                write!(f, "Error on line {line}: A {found} cannot be used {details}.")
            },
            Self::IllegalIndexType { line } => write!(f,
                                                      "Error on line {line}: Index must be a non-negative whole number given by a variable or a literal."),
            Self::IndexOutOfRange { index,
                                    length,
                                    line, } => write!(f,
                                                      "Error on line {line}: Index {index} is out of range for length {length}."),
            Self::NumberOutOfRange { value, range, line } => {
                write!(f, "Error on line {line}: Number {value} does not belong to {range}.")
            },
            Self::DivisionByZero { line } => write!(f, "Error on line {line}: Division by zero."),
            Self::InvalidLoopExpression { details, line } => {
                write!(f, "Error on line {line}: Invalid loop expression: {details}.")
            },
            Self::ArgumentsAmount { expected,
                                    found,
                                    line, } => write!(f,
                                                      "Error on line {line}: Expected {expected} arguments, found {found}."),
            Self::NotCallable { found, line } => {
                write!(f, "Error on line {line}: A {found} is not callable.")
            },
            Self::NodeNotSupported { node, line } => {
                write!(f, "Error on line {line}: '{node}' cannot be evaluated here.")
            },
            Self::EmptyContainer { operation, line } => write!(f,
                                                               "Error on line {line}: '{operation}' needs a non-empty container."),
            Self::UnknownModule { name, line } => {
                write!(f, "Error on line {line}: Unknown module '{name}'.")
            },
            Self::InputOutput { details, line } => {
                write!(f, "Error on line {line}: Input/output failure: {details}.")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
