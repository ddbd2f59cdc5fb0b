#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during parsing.
pub enum ParseError {
    /// A specific token was required but another one was found.
    MissingToken {
        /// The token that was required.
        expected: String,
        /// The token encountered instead.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Found an unexpected token while parsing.
    UnexpectedToken {
        /// The token encountered.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A token that cannot begin an expression.
    IllegalExpressionStart {
        /// The token encountered.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// The function declaration syntax was invalid.
    IncorrectFunctionDeclaration {
        /// What is wrong with the declaration.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A `{` that does not close as a comma-separated set literal.
    InvalidSetSyntax {
        /// The token encountered instead of `,` or `}`.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// The left side of an assignment is not a variable or an indexed element.
    MissingIdentifier {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A pre-test `while` whose condition is the literal `true`.
    IllegalWhileCondition {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingToken { expected,
                                 found,
                                 line, } => {
                write!(f, "Error on line {line}: Expected {expected}, found {found}.")
            },

            Self::UnexpectedToken { token, line } => {
                write!(f, "Error on line {line}: Unexpected token: {token}.")
            },

            Self::IllegalExpressionStart { token, line } => write!(f,
                                                                   "Error on line {line}: An expression cannot start with {token}."),

            Self::IncorrectFunctionDeclaration { details, line } => write!(f,
                                                                           "Error on line {line}: Incorrect function declaration: {details}. Example: function f(number x): number"),

            Self::InvalidSetSyntax { found, line } => write!(f,
                                                             "Error on line {line}: Invalid set literal, expected ',' or '}}' but found {found}."),

            Self::MissingIdentifier { line } => write!(f,
                                                       "Error on line {line}: Only a variable or an indexed element can be assigned to."),

            Self::IllegalWhileCondition { line } => write!(f,
                                                           "Error on line {line}: A while loop with the condition 'true' never ends."),
        }
    }
}

impl std::error::Error for ParseError {}
