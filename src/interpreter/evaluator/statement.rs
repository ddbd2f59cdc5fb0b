use std::{
    io::{BufRead, Write},
    rc::Rc,
};

use crate::{
    ast::{Expr, FunctionDeclaration, Statement, ValueType, VariableDeclaration},
    error::RuntimeError,
    interpreter::{
        environment::{ScopeId, Variable},
        evaluator::{
            core::{EvalResult, Flow, Interpreter},
            native,
            utils::ensure_in_range,
        },
        value::{core::Value, function::FunctionValue},
    },
};

impl<W: Write, R: BufRead> Interpreter<W, R> {
    /// Declares one variable of a `data` statement in `scope`.
    ///
    /// The range is evaluated before the initializer; a missing initializer
    /// stores `null`.
    ///
    /// # Errors
    /// - [`RuntimeError::DataTypeMismatch`] when the range is not a range or
    ///   the initializer does not convert to the declared type.
    /// - [`RuntimeError::NumberOutOfRange`] when the initial number lies
    ///   outside the range.
    /// - [`RuntimeError::VariableAlreadyDeclared`] when `scope` already binds
    ///   the name.
    pub(crate) fn declare_variable(&mut self,
                                   declaration: &VariableDeclaration,
                                   scope: ScopeId)
                                   -> EvalResult<()> {
        let line = declaration.line;
        let range = match &declaration.range {
            Some(expr) => match self.evaluate(expr, scope)?.coerce(ValueType::Range, line)? {
                Value::Range(range) => Some(range),
                other => {
                    return Err(RuntimeError::DataTypeMismatch { expected: ValueType::Range,
                                                                found: other.value_type(),
                                                                line });
                },
            },
            None => None,
        };

        let value = match &declaration.value {
            Some(expr) => self.evaluate(expr, scope)?,
            None => Value::Null,
        };
        let value = value.coerce(declaration.value_type, line)?;
        ensure_in_range(&value, range.as_ref(), line)?;

        self.env.declare(scope,
                         Variable { value_type: declaration.value_type,
                                    name: declaration.symbol.clone(),
                                    constant: declaration.constant,
                                    range,
                                    value },
                         line)
    }

    /// Runs an `if` statement.
    ///
    /// The condition must be a boolean; `null` is rejected here even though
    /// `NOT`, `AND` and `OR` read it as false, so `if NOT x` is the way to
    /// test an unset flag.
    ///
    /// # Errors
    /// [`RuntimeError::DataTypeMismatch`] when the condition is not a
    /// boolean.
    pub(crate) fn execute_if(&mut self,
                             condition: &Expr,
                             body: &[Statement],
                             else_branch: Option<&[Statement]>,
                             scope: ScopeId,
                             line: usize)
                             -> EvalResult<Flow> {
        let condition = self.evaluate(condition, scope)?;
        let Value::Boolean(holds) = condition else {
            return Err(RuntimeError::DataTypeMismatch { expected: ValueType::Boolean,
                                                        found: condition.value_type(),
                                                        line });
        };

        match (holds, else_branch) {
            (true, _) => self.execute_block(body, scope),
            (false, Some(else_body)) => self.execute_block(else_body, scope),
            (false, None) => Ok(Flow::Next(Value::Null)),
        }
    }

    /// Runs a `while` or `do ... while` loop.
    ///
    /// Each pass through the body gets a fresh scope. A `return` inside the
    /// body leaves the loop.
    ///
    /// # Errors
    /// [`RuntimeError::InvalidLoopExpression`] when the condition is not a
    /// boolean.
    pub(crate) fn execute_while(&mut self,
                                condition: &Expr,
                                body: &[Statement],
                                is_do_while: bool,
                                scope: ScopeId,
                                line: usize)
                                -> EvalResult<Flow> {
        let mut run_body = is_do_while;
        loop {
            if run_body && let flow @ Flow::Return(_) = self.execute_block(body, scope)? {
                return Ok(flow);
            }
            run_body = true;

            match self.evaluate(condition, scope)? {
                Value::Boolean(true) => {},
                Value::Boolean(false) => return Ok(Flow::Next(Value::Null)),
                other => {
                    return Err(RuntimeError::InvalidLoopExpression { details: format!("the condition is a {}, not a boolean",
                                                                                      other.value_type()),
                                                                     line });
                },
            }
        }
    }

    /// Binds a function value that captures `scope`.
    ///
    /// The scope is retained so the function can still resolve names
    /// through it after the enclosing block ends.
    pub(crate) fn declare_function(&mut self,
                                   declaration: &Rc<FunctionDeclaration>,
                                   scope: ScopeId)
                                   -> EvalResult<Flow> {
        self.env.retain(scope);
        let function = FunctionValue { declaration: Rc::clone(declaration),
                                       closure:     scope, };
        self.env.declare(scope,
                         Variable { value_type: ValueType::Function,
                                    name:       declaration.symbol.clone(),
                                    constant:   true,
                                    range:      None,
                                    value:      Value::Function(Rc::new(function)), },
                         declaration.line)?;
        Ok(Flow::Next(Value::Null))
    }

    /// Writes the arguments separated by a space and ends the line.
    ///
    /// # Errors
    /// [`RuntimeError::InputOutput`] when the output sink fails.
    pub(crate) fn execute_print(&mut self,
                                arguments: &[Expr],
                                scope: ScopeId,
                                line: usize)
                                -> EvalResult<Flow> {
        let rendered = arguments.iter()
                                .map(|argument| self.evaluate(argument, scope).map(|v| v.to_string()))
                                .collect::<EvalResult<Vec<_>>>()?;

        writeln!(self.output, "{}", rendered.join(" ")).map_err(|e| {
                                                            RuntimeError::InputOutput { details: e.to_string(),
                                                                                        line }
                                                        })?;
        Ok(Flow::Next(Value::Null))
    }

    /// Reads one line of input into a variable.
    ///
    /// The text is converted according to the variable's declared type:
    /// numbers are parsed, booleans accept `true`/`prawda` and
    /// `false`/`falsz`/`fałsz`, characters must be exactly one character, and
    /// strings are taken as read.
    ///
    /// # Errors
    /// - [`RuntimeError::IllegalDataType`] when the text does not convert, or
    ///   the variable has a container type.
    /// - [`RuntimeError::InputOutput`] when reading fails.
    pub(crate) fn execute_get(&mut self,
                              identifier: &str,
                              scope: ScopeId,
                              line: usize)
                              -> EvalResult<Flow> {
        let variable = self.env.lookup(scope, identifier, line)?;
        let (value_type, range) = (variable.value_type, variable.range);

        let mut text = String::new();
        self.input
            .read_line(&mut text)
            .map_err(|e| RuntimeError::InputOutput { details: e.to_string(),
                                                     line })?;
        let text = text.trim_end_matches(['\n', '\r']);

        let invalid = || RuntimeError::IllegalDataType { found: value_type,
                                                         details: format!("read from input as \"{text}\""),
                                                         line };
        let value = match value_type {
            ValueType::Number => text.trim().parse::<f64>().map(Value::Number).map_err(|_| invalid())?,
            ValueType::Boolean => match text.trim() {
                "true" | "prawda" => Value::Boolean(true),
                "false" | "falsz" | "fałsz" => Value::Boolean(false),
                _ => return Err(invalid()),
            },
            ValueType::Char => {
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Value::Char(c),
                    _ => return Err(invalid()),
                }
            },
            ValueType::String => Value::from(text),
            _ => return Err(invalid()),
        };

        ensure_in_range(&value, range.as_ref(), line)?;
        self.env.assign(scope, identifier, value, line)?;
        Ok(Flow::Next(Value::Null))
    }

    /// Binds the functions of a native module in `scope`.
    ///
    /// Importing a module a second time into the same scope has no effect.
    ///
    /// # Errors
    /// - [`RuntimeError::UnknownModule`] for an unknown module name.
    /// - [`RuntimeError::VariableAlreadyDeclared`] when a variable in `scope`
    ///   already uses one of the names.
    pub(crate) fn execute_import(&mut self,
                                 module: &str,
                                 scope: ScopeId,
                                 line: usize)
                                 -> EvalResult<Flow> {
        let functions = native::module(module).ok_or_else(|| RuntimeError::UnknownModule { name: module.to_string(),
                                                                                             line })?;
        for function in functions {
            if let Some(Variable { value: Value::Native(bound), .. }) = self.env.declared_in(scope, function.name)
               && bound.name == function.name
            {
                continue;
            }
            self.env.declare(scope, native::variable(*function), line)?;
        }
        Ok(Flow::Next(Value::Null))
    }
}
