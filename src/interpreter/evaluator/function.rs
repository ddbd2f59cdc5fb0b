use std::io::{BufRead, Write};

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        environment::{ScopeId, Variable},
        evaluator::{
            core::{EvalResult, Flow, Interpreter},
            utils::check_arity,
        },
        value::{core::Value, function::FunctionValue},
    },
};

impl<W: Write, R: BufRead> Interpreter<W, R> {
    /// Evaluates a function call.
    ///
    /// The callee is evaluated first, then the arguments from left to right.
    ///
    /// # Errors
    /// - [`RuntimeError::NotCallable`] when the callee is not a function.
    /// - [`RuntimeError::ArgumentsAmount`] for a wrong number of arguments.
    /// - Any error raised by the function itself.
    pub(crate) fn eval_call(&mut self,
                            callee: &Expr,
                            arguments: &[Expr],
                            scope: ScopeId,
                            line: usize)
                            -> EvalResult<Value> {
        let function = self.evaluate(callee, scope)?;
        let args = arguments.iter()
                            .map(|argument| self.evaluate(argument, scope))
                            .collect::<EvalResult<Vec<_>>>()?;

        match function {
            Value::Function(function) => self.call_function(&function, args, line),
            Value::Native(native) => {
                if !native.arity.check(args.len()) {
                    return Err(RuntimeError::ArgumentsAmount { expected: native.arity.expected(),
                                                               found: args.len(),
                                                               line });
                }
                (native.func)(&args, &self.env, line)
            },
            other => Err(RuntimeError::NotCallable { found: other.value_type(),
                                                     line }),
        }
    }

    /// Runs a user-defined function in a new frame below its closure.
    ///
    /// Parameters are bound first, then the declared locals, so a local
    /// initializer may refer to the parameters. The frame is released on
    /// return and on error.
    fn call_function(&mut self,
                     function: &FunctionValue,
                     args: Vec<Value>,
                     line: usize)
                     -> EvalResult<Value> {
        check_arity(&args, function.declaration.parameters.len(), line)?;

        let frame = self.env.push(function.closure);
        let result = self.run_frame(function, args, frame, line);
        self.env.release(frame);
        result
    }

    fn run_frame(&mut self,
                 function: &FunctionValue,
                 args: Vec<Value>,
                 frame: ScopeId,
                 line: usize)
                 -> EvalResult<Value> {
        let declaration = &function.declaration;

        for (parameter, value) in declaration.parameters.iter().zip(args) {
            let value = value.coerce(parameter.value_type, line)?;
            self.env.declare(frame,
                             Variable { value_type: parameter.value_type,
                                        name: parameter.name.clone(),
                                        constant: false,
                                        range: None,
                                        value },
                             line)?;
        }
        for local in &declaration.locals {
            self.declare_variable(local, frame)?;
        }

        let result = match self.execute_statements(&declaration.body, frame)? {
            Flow::Return(value) => value,
            Flow::Next(_) => Value::Null,
        };

        match declaration.return_type {
            Some(return_type) => result.coerce(return_type, line),
            None => Ok(result),
        }
    }
}
