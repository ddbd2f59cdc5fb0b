use std::fmt::{self, Display, Formatter, Write};

use crate::ast::{Expr, FunctionDeclaration, Program, Statement, VariableDeclaration};

/// Renders the program as indented source that parses back to the same tree.
///
/// Compound expressions are fully parenthesized so the output does not
/// depend on operator precedence.
///
/// # Example
/// ```
/// use pseudokod::parse;
///
/// let program = parse("x <- 1 + 2 * 3").unwrap();
/// assert_eq!(program.to_string(), "x <- (1 + (2 * 3))\n");
/// ```
impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_block(f, &self.body, 0)
    }
}

fn write_block(f: &mut Formatter<'_>, statements: &[Statement], depth: usize) -> fmt::Result {
    for statement in statements {
        write_statement(f, statement, depth)?;
    }
    Ok(())
}

fn indent(f: &mut Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_char('\t')?;
    }
    Ok(())
}

fn write_statement(f: &mut Formatter<'_>, statement: &Statement, depth: usize) -> fmt::Result {
    indent(f, depth)?;
    match statement {
        Statement::DataDeclaration { variables, .. } => {
            writeln!(f, "data: {}", join(variables))
        },
        Statement::If { condition,
                        body,
                        else_branch,
                        .. } => write_if(f, condition, body, else_branch.as_deref(), depth),
        Statement::While { condition,
                           body,
                           is_do_while: false,
                           .. } => {
            writeln!(f, "while {condition}")?;
            write_block(f, body, depth + 1)
        },
        Statement::While { condition,
                           body,
                           is_do_while: true,
                           .. } => {
            writeln!(f, "do")?;
            write_block(f, body, depth + 1)?;
            indent(f, depth)?;
            writeln!(f, "while {condition}")
        },
        Statement::For { control_variable,
                         values,
                         body,
                         .. } => {
            writeln!(f, "for {control_variable} = {}", join(values))?;
            write_block(f, body, depth + 1)
        },
        Statement::Function(declaration) => write_function(f, declaration, depth),
        Statement::Print { arguments, .. } => writeln!(f, "print({})", join(arguments)),
        Statement::Get { identifier, .. } => writeln!(f, "get({identifier})"),
        Statement::Return { value: Some(value),
                            .. } => writeln!(f, "return {value}"),
        Statement::Return { value: None, .. } => writeln!(f, "return"),
        Statement::Import { module, .. } => writeln!(f, "import {module}"),
        Statement::Expression { expr: Expr::Assignment { target, value, .. },
                                .. } => writeln!(f, "{target} <- {value}"),
        Statement::Expression { expr, .. } => writeln!(f, "{expr}"),
    }
}

fn write_if(f: &mut Formatter<'_>,
            condition: &Expr,
            body: &[Statement],
            else_branch: Option<&[Statement]>,
            depth: usize)
            -> fmt::Result {
    writeln!(f, "if {condition}")?;
    write_block(f, body, depth + 1)?;

    match else_branch {
        Some([Statement::If { condition,
                              body,
                              else_branch,
                              .. }]) => {
            indent(f, depth)?;
            f.write_str("else ")?;
            write_if(f, condition, body, else_branch.as_deref(), depth)
        },
        Some(statements) => {
            indent(f, depth)?;
            writeln!(f, "else")?;
            write_block(f, statements, depth + 1)
        },
        None => Ok(()),
    }
}

fn write_function(f: &mut Formatter<'_>,
                  declaration: &FunctionDeclaration,
                  depth: usize)
                  -> fmt::Result {
    let parameters = declaration.parameters
                                .iter()
                                .map(|p| format!("{} {}", p.value_type, p.name))
                                .collect::<Vec<_>>()
                                .join(", ");
    write!(f, "function {}({parameters})", declaration.symbol)?;
    if let Some(return_type) = declaration.return_type {
        write!(f, ": {return_type}")?;
    }
    writeln!(f)?;

    if !declaration.locals.is_empty() {
        indent(f, depth + 1)?;
        writeln!(f, "data: {}", join(&declaration.locals))?;
    }
    write_block(f, &declaration.body, depth + 1)
}

fn join<T: Display>(items: &[T]) -> String {
    items.iter()
         .map(ToString::to_string)
         .collect::<Vec<_>>()
         .join(", ")
}

impl Display for VariableDeclaration {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.constant {
            f.write_str("const ")?;
        }
        write!(f, "{} {}", self.value_type, self.symbol)?;
        if let Some(range) = &self.range {
            write!(f, " ∈ {}", RangeOperand(range))?;
        }
        if let Some(value) = &self.value {
            write!(f, " <- {}", RangeOperand(value))?;
        }
        Ok(())
    }
}

/// An expression written where the parser reads `[a, b]` as a range.
///
/// Anything that is not a range literal is wrapped in parentheses so a
/// two-element list stays a list.
struct RangeOperand<'a>(&'a Expr);

impl Display for RangeOperand<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            Expr::Range { .. } => write!(f, "{}", self.0),
            Expr::Array { .. } => write!(f, "({})", self.0),
            other => write!(f, "{other}"),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number { value, .. } => write!(f, "{value}"),
            Self::Char { value, .. } => write!(f, "'{value}'"),
            Self::String { value, .. } => write!(f, "\"{value}\""),
            Self::Boolean { value, .. } => write!(f, "{value}"),
            Self::Null { .. } => f.write_str("null"),
            Self::Identifier { name, .. } => f.write_str(name),
            Self::Unary { operator,
                          operand,
                          .. } => match operator {
                crate::ast::UnaryOperator::Negate => write!(f, "(-{operand})"),
                crate::ast::UnaryOperator::Not => write!(f, "(NOT {operand})"),
            },
            Self::Binary { left,
                           operator,
                           right,
                           .. } => write!(f, "({left} {operator} {right})"),
            Self::Comparison { left,
                               operator,
                               right,
                               .. } => write!(f, "({left} {operator} {right})"),
            Self::Logical { left,
                            operator,
                            right,
                            .. } => write!(f, "({left} {operator} {right})"),
            Self::Bitwise { left,
                            operator,
                            right,
                            .. } => write!(f, "({left} {operator} {right})"),
            Self::Membership { element,
                               collection,
                               .. } => {
                write!(f, "({element} ∈ {})", RangeOperand(collection))
            },
            Self::Call { callee,
                         arguments,
                         .. } => write!(f, "{callee}({})", join(arguments)),
            Self::Index { array, index, .. } => write!(f, "{array}[{index}]"),
            Self::Range { left,
                          right,
                          left_included,
                          right_included,
                          .. } => {
                let open = if *left_included { '[' } else { '(' };
                let close = if *right_included { ']' } else { ')' };
                write!(f, "{open}{left}, {right}{close}")
            },
            Self::Array { values, .. } => write!(f, "[{}]", join(values)),
            Self::Set { values, .. } => write!(f, "{{{}}}", join(values)),
            Self::Assignment { target, value, .. } => write!(f, "({target} <- {value})"),
            Self::Ellipsis { .. } => f.write_str("..."),
        }
    }
}
