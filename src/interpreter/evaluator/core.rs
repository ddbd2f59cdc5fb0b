use std::{
    cell::RefCell,
    collections::BTreeSet,
    io::{self, BufRead, Write},
    rc::Rc,
};

use crate::{
    ast::{Expr, Program, Statement},
    error::RuntimeError,
    interpreter::{
        environment::{Environment, ScopeId},
        evaluator::{
            binary::{arithmetic, comparison, logic},
            native, unary,
        },
        value::{core::Value, range::RangeValue},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// How execution continues after a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Continue with the next statement; carries the statement's value.
    Next(Value),
    /// A `return` was executed; unwinds to the enclosing call.
    Return(Value),
}

/// Executes parsed programs.
///
/// The interpreter owns the scope arena together with the program's output
/// sink and input source, so `print` and `get` can be redirected for
/// embedding and tests.
///
/// # Example
/// ```
/// use pseudokod::{interpreter::evaluator::core::Interpreter, parse};
///
/// let program = parse("print(1 + 2)").unwrap();
/// let mut interpreter = Interpreter::new(Vec::new(), "".as_bytes());
/// interpreter.run(&program).unwrap();
///
/// assert_eq!(interpreter.into_output(), b"3\n");
/// ```
pub struct Interpreter<W: Write, R: BufRead> {
    pub(crate) env:    Environment,
    pub(crate) output: W,
    pub(crate) input:  R,
}

impl Interpreter<io::Stdout, io::StdinLock<'static>> {
    /// Creates an interpreter printing to stdout and reading from stdin.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stdin().lock())
    }
}

impl<W: Write, R: BufRead> Interpreter<W, R> {
    /// Creates an interpreter with a fresh environment whose prelude holds the
    /// native container functions.
    pub fn new(output: W, input: R) -> Self {
        let mut env = Environment::new();
        native::install_prelude(&mut env);
        Self { env,
               output,
               input }
    }

    /// Read access to the scopes, for inspecting variables after a run.
    #[must_use]
    pub const fn environment(&self) -> &Environment {
        &self.env
    }

    /// Consumes the interpreter and hands back its output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs a program in the global scope.
    ///
    /// Returns the value of the last statement, or the value of a top-level
    /// `return`, which ends the program early.
    ///
    /// # Errors
    /// Stops at the first [`RuntimeError`]. Output already printed stays
    /// printed.
    pub fn run(&mut self, program: &Program) -> EvalResult<Value> {
        let result = match self.execute_statements(&program.body, ScopeId::GLOBAL)? {
            Flow::Next(value) | Flow::Return(value) => value,
        };
        self.output.flush().map_err(|e| RuntimeError::InputOutput { details: e.to_string(),
                                                                     line:    0, })?;
        Ok(result)
    }

    /// Executes one statement in `scope`.
    pub fn execute(&mut self, statement: &Statement, scope: ScopeId) -> EvalResult<Flow> {
        match statement {
            Statement::DataDeclaration { variables, .. } => {
                for declaration in variables {
                    self.declare_variable(declaration, scope)?;
                }
                Ok(Flow::Next(Value::Null))
            },
            Statement::If { condition,
                            body,
                            else_branch,
                            line, } => {
                self.execute_if(condition, body, else_branch.as_deref(), scope, *line)
            },
            Statement::While { condition,
                               body,
                               is_do_while,
                               line, } => {
                self.execute_while(condition, body, *is_do_while, scope, *line)
            },
            Statement::For { control_variable,
                             values,
                             body,
                             line, } => self.execute_for(control_variable, values, body, scope, *line),
            Statement::Function(declaration) => self.declare_function(declaration, scope),
            Statement::Print { arguments, line } => self.execute_print(arguments, scope, *line),
            Statement::Get { identifier, line } => self.execute_get(identifier, scope, *line),
            Statement::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.evaluate(expr, scope)?,
                    None => Value::Null,
                };
                Ok(Flow::Return(value))
            },
            Statement::Import { module, line } => self.execute_import(module, scope, *line),
            Statement::Expression { expr, .. } => Ok(Flow::Next(self.evaluate(expr, scope)?)),
        }
    }

    /// Evaluates an expression as seen from `scope`.
    ///
    /// This is the main entry point for expression evaluation. The evaluator
    /// dispatches on the expression variant; operands are evaluated left to
    /// right, except that `AND`/`OR` skip their right side when the left
    /// decides the result and assignments evaluate their value first.
    pub fn evaluate(&mut self, expr: &Expr, scope: ScopeId) -> EvalResult<Value> {
        match expr {
            Expr::Number { value, .. } => Ok(Value::Number(*value)),
            Expr::Char { value, .. } => Ok(Value::Char(*value)),
            Expr::String { value, .. } => Ok(Value::String(value.clone())),
            Expr::Boolean { value, .. } => Ok(Value::Boolean(*value)),
            Expr::Null { .. } => Ok(Value::Null),
            Expr::Identifier { name, line } => self.env.get(scope, name, *line),
            Expr::Unary { operator,
                          operand,
                          line, } => {
                let operand = self.evaluate(operand, scope)?;
                unary::eval_unary(*operator, &operand, *line)
            },
            Expr::Binary { left,
                           operator,
                           right,
                           line, } => {
                let left = self.evaluate(left, scope)?;
                let right = self.evaluate(right, scope)?;
                arithmetic::eval_arithmetic(*operator, &left, &right, *line)
            },
            Expr::Comparison { left,
                               operator,
                               right,
                               line, } => {
                let left = self.evaluate(left, scope)?;
                let right = self.evaluate(right, scope)?;
                comparison::eval_comparison(*operator, &left, &right, *line)
            },
            Expr::Logical { left,
                            operator,
                            right,
                            line, } => self.eval_logical(left, *operator, right, scope, *line),
            Expr::Bitwise { left,
                            operator,
                            right,
                            line, } => {
                let left = self.evaluate(left, scope)?;
                let right = self.evaluate(right, scope)?;
                logic::eval_bitwise(*operator, &left, &right, *line)
            },
            Expr::Membership { element,
                               collection,
                               line, } => {
                let element = self.evaluate(element, scope)?;
                let collection = self.evaluate(collection, scope)?;
                comparison::eval_membership(&element, &collection, *line)
            },
            Expr::Call { callee,
                         arguments,
                         line, } => self.eval_call(callee, arguments, scope, *line),
            Expr::Index { array, index, line } => self.eval_index(array, index, scope, *line),
            Expr::Range { left,
                          right,
                          left_included,
                          right_included,
                          line, } => {
                let lower = self.evaluate(left, scope)?.as_number("as a range bound", *line)?;
                let upper = self.evaluate(right, scope)?.as_number("as a range bound", *line)?;
                Ok(Value::Range(RangeValue { lower,
                                             upper,
                                             left_included: *left_included,
                                             right_included: *right_included }))
            },
            Expr::Array { values, .. } => {
                let values = values.iter()
                                   .map(|value| self.evaluate(value, scope))
                                   .collect::<EvalResult<Vec<_>>>()?;
                Ok(Value::from(values))
            },
            Expr::Set { values, line } => {
                let mut set = BTreeSet::new();
                for value in values {
                    set.insert(self.evaluate(value, scope)?.to_set_element(*line)?);
                }
                Ok(Value::Set(Rc::new(RefCell::new(set))))
            },
            Expr::Assignment { target, value, line } => {
                self.eval_assignment(target, value, scope, *line)
            },
            Expr::Ellipsis { line } => Err(RuntimeError::NodeNotSupported { node: expr.to_string(),
                                                                             line: *line, }),
        }
    }

    /// Runs `body` in a new child scope of `parent`.
    ///
    /// The scope is released afterwards, on success and on error alike.
    pub(crate) fn execute_block(&mut self, body: &[Statement], parent: ScopeId) -> EvalResult<Flow> {
        let scope = self.env.push(parent);
        let result = self.execute_statements(body, scope);
        self.env.release(scope);
        result
    }

    /// Runs statements in `scope` until they end or one returns.
    pub(crate) fn execute_statements(&mut self,
                                     body: &[Statement],
                                     scope: ScopeId)
                                     -> EvalResult<Flow> {
        let mut last = Value::Null;
        for statement in body {
            match self.execute(statement, scope)? {
                Flow::Next(value) => last = value,
                flow @ Flow::Return(_) => return Ok(flow),
            }
        }
        Ok(Flow::Next(last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn run(source: &str) -> EvalResult<Value> {
        let program = parse(source).unwrap();
        Interpreter::new(Vec::new(), "".as_bytes()).run(&program)
    }

    #[test]
    fn program_value_is_the_last_statement() {
        assert_eq!(run("1\n2 + 3").unwrap(), Value::Number(5.0));
        assert_eq!(run("").unwrap(), Value::Null);
    }

    #[test]
    fn top_level_return_ends_the_program() {
        assert_eq!(run("return 4\nprint(x)").unwrap(), Value::Number(4.0));
    }

    #[test]
    fn literals_evaluate_to_themselves() {
        assert_eq!(run("'a'").unwrap(), Value::Char('a'));
        assert_eq!(run("\"ala\"").unwrap(), Value::from("ala"));
        assert_eq!(run("fałsz").unwrap(), Value::Boolean(false));
        assert_eq!(run("nic").unwrap(), Value::Null);
    }

    #[test]
    fn collection_literals() {
        assert_eq!(run("[1, 2, 3]").unwrap().to_string(), "[1, 2, 3]");
        assert_eq!(run("{3, 1, 3}").unwrap().to_string(), "{1, 3}");
        assert_eq!(run("(0, 10]").unwrap().to_string(), "(0, 10]");
    }

    #[test]
    fn range_bounds_must_be_numbers() {
        assert!(matches!(run("(\"a\", 10]"),
                         Err(RuntimeError::IllegalDataType { line: 1, .. })));
    }

    #[test]
    fn undeclared_variable() {
        assert_eq!(run("\n\nx + 1").unwrap_err(),
                   RuntimeError::VariableNotDeclared { name: "x".to_string(),
                                                       line: 3, });
    }

    #[test]
    fn blocks_get_their_own_scope() {
        let source = "if true\n\tnumber t <- 1\nt";
        assert!(matches!(run(source), Err(RuntimeError::VariableNotDeclared { .. })));
    }
}
