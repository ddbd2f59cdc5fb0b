use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{Expr, FunctionDeclaration, Parameter, Statement, ValueType, VariableDeclaration},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            block::{consume_indent, line_indent, parse_body, skip_blank_lines},
            core::{
                ParseResult, at_line_end, expect, expect_line_end, next_token, parse_expression,
                peek_token, skip_optional,
            },
            unary::parse_range_operand,
            utils::{parse_comma_separated, parse_identifier},
        },
    },
};

/// Parses one statement at indentation `depth`, including its line end.
///
/// The leading tabs of the line have already been consumed. Compound
/// statements also consume their indented bodies.
///
/// # Errors
/// Propagates the first error of the statement or its body.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let statement = match peek_token(tokens) {
        (Token::Data, _) => return parse_data_declaration(tokens, depth),
        (Token::If, _) => return parse_if(tokens, depth),
        (Token::While, _) => return parse_while(tokens, depth),
        (Token::Do, _) => return parse_do_while(tokens, depth),
        (Token::For, _) => return parse_for(tokens, depth),
        (Token::Function, _) => return parse_function(tokens, depth),
        (Token::Type(_) | Token::Const, line) => {
            Statement::DataDeclaration { variables: vec![parse_variable_declaration(tokens)?],
                                         line }
        },
        (Token::Print, _) => parse_print(tokens)?,
        (Token::Get, _) => parse_get(tokens)?,
        (Token::Return, _) => parse_return(tokens)?,
        (Token::Import, _) => parse_import(tokens)?,
        (_, line) => Statement::Expression { expr: parse_expression(tokens)?,
                                             line },
    };

    expect_line_end(tokens)?;
    Ok(statement)
}

/// Parses `[const] type name [∈ range] [<- value]`.
///
/// A `range` variable's initializer is read in range context, so `[1, 5]`
/// there is the closed range rather than a two-element list.
///
/// # Errors
/// - [`ParseError::MissingToken`] when the type or name is missing, or a
///   constant has no initializer.
pub(in crate::interpreter::parser) fn parse_variable_declaration<'a, I>(
    tokens: &mut Peekable<I>)
    -> ParseResult<VariableDeclaration>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let constant = skip_optional(tokens, &Token::Const);

    let (value_type, line) = match next_token(tokens) {
        (Token::Type(value_type), line) => (*value_type, line),
        (tok, line) => {
            return Err(ParseError::MissingToken { expected: "a type".to_string(),
                                                  found: tok.to_string(),
                                                  line });
        },
    };

    let symbol = parse_identifier(tokens)?;

    let range = if skip_optional(tokens, &Token::InRange) {
        Some(parse_range_operand(tokens)?)
    } else {
        None
    };

    let value = if skip_optional(tokens, &Token::Assignment) {
        Some(if value_type == ValueType::Range {
                 parse_range_operand(tokens)?
             } else {
                 parse_expression(tokens)?
             })
    } else {
        None
    };

    if constant && value.is_none() {
        let (found, line) = peek_token(tokens);
        return Err(ParseError::MissingToken { expected: "'<-' and a value for a constant".to_string(),
                                              found: found.to_string(),
                                              line });
    }

    Ok(VariableDeclaration { value_type,
                             symbol,
                             constant,
                             range,
                             value,
                             line })
}

/// Parses declarations separated by commas on a single line.
fn parse_declaration_list<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<VariableDeclaration>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut variables = vec![parse_variable_declaration(tokens)?];
    while skip_optional(tokens, &Token::Comma) {
        variables.push(parse_variable_declaration(tokens)?);
    }
    Ok(variables)
}

/// Parses a `data` block.
///
/// Syntax:
/// ```text
/// data: number a, const string b <- "x"
///     list t <- [1, 2]
/// ```
/// Declarations may follow the header on the same line, continue on lines
/// indented one level deeper, or both.
fn parse_data_declaration<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = next_token(tokens);
    skip_optional(tokens, &Token::Colon);

    let mut variables = Vec::new();
    if !at_line_end(tokens) {
        variables.extend(parse_declaration_list(tokens)?);
    }
    expect_line_end(tokens)?;

    loop {
        skip_blank_lines(tokens);
        let (indent, next, _) = line_indent(tokens);
        if indent != depth + 1 || !matches!(next, Token::Type(_) | Token::Const) {
            break;
        }

        consume_indent(tokens, indent);
        variables.extend(parse_declaration_list(tokens)?);
        expect_line_end(tokens)?;
    }

    if variables.is_empty() {
        let (found, _) = peek_token(tokens);
        return Err(ParseError::MissingToken { expected: "a variable declaration".to_string(),
                                              found: found.to_string(),
                                              line });
    }

    Ok(Statement::DataDeclaration { variables, line })
}

/// Parses an `if` statement with optional `else` and chained `else if`.
///
/// Syntax:
/// ```text
/// if <condition>
///     <body>
/// else if <condition>
///     <body>
/// else
///     <body>
/// ```
/// The `else` line sits at the same depth as its `if`. A chained `else if`
/// becomes an else branch holding a single nested `If`.
pub(in crate::interpreter::parser) fn parse_if<'a, I>(tokens: &mut Peekable<I>,
                                                      depth: usize)
                                                      -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = next_token(tokens);
    let condition = parse_expression(tokens)?;
    skip_optional(tokens, &Token::Colon);
    expect_line_end(tokens)?;
    let body = parse_body(tokens, depth, line)?;

    skip_blank_lines(tokens);
    let (indent, next, else_line) = line_indent(tokens);
    let else_branch = if indent == depth && matches!(next, Token::Else) {
        consume_indent(tokens, depth);
        tokens.next();

        if matches!(peek_token(tokens).0, Token::If) {
            Some(vec![parse_if(tokens, depth)?])
        } else {
            skip_optional(tokens, &Token::Colon);
            expect_line_end(tokens)?;
            Some(parse_body(tokens, depth, else_line)?)
        }
    } else {
        None
    };

    Ok(Statement::If { condition,
                       body,
                       else_branch,
                       line })
}

/// Parses a pre-test loop: `while <condition>` and its body.
///
/// # Errors
/// [`ParseError::IllegalWhileCondition`] when the condition is the literal
/// `true`.
fn parse_while<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = next_token(tokens);
    let condition = parse_expression(tokens)?;
    if let Expr::Boolean { value: true, .. } = condition {
        return Err(ParseError::IllegalWhileCondition { line });
    }
    skip_optional(tokens, &Token::Colon);
    expect_line_end(tokens)?;
    let body = parse_body(tokens, depth, line)?;

    Ok(Statement::While { condition,
                          body,
                          is_do_while: false,
                          line })
}

/// Parses a post-test loop.
///
/// Syntax:
/// ```text
/// do
///     <body>
/// while <condition>
/// ```
fn parse_do_while<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = next_token(tokens);
    skip_optional(tokens, &Token::Colon);
    expect_line_end(tokens)?;
    let body = parse_body(tokens, depth, line)?;

    skip_blank_lines(tokens);
    let (indent, next, while_line) = line_indent(tokens);
    if indent != depth || !matches!(next, Token::While) {
        return Err(ParseError::MissingToken { expected: "'while' closing the do block".to_string(),
                                              found: next.to_string(),
                                              line: while_line });
    }
    consume_indent(tokens, depth);
    tokens.next();

    let condition = parse_expression(tokens)?;
    expect_line_end(tokens)?;

    Ok(Statement::While { condition,
                          body,
                          is_do_while: true,
                          line })
}

/// Parses a counting loop.
///
/// Syntax:
/// ```text
/// for i = 1, 2, ..., n
/// for x ∈ collection
/// ```
/// An ellipsis needs at least one value before it and exactly one after.
fn parse_for<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = next_token(tokens);
    let control_variable = parse_identifier(tokens)?;

    match next_token(tokens) {
        (Token::Equal | Token::InRange | Token::Assignment, _) => {},
        (tok, line) => {
            return Err(ParseError::MissingToken { expected: "'='".to_string(),
                                                  found: tok.to_string(),
                                                  line });
        },
    }

    let values = parse_for_values(tokens, line)?;
    skip_optional(tokens, &Token::Colon);
    expect_line_end(tokens)?;
    let body = parse_body(tokens, depth, line)?;

    Ok(Statement::For { control_variable,
                        values,
                        body,
                        line })
}

fn parse_for_values<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Vec<Expr>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut values = Vec::new();

    loop {
        match peek_token(tokens) {
            (Token::Ellipsis, ellipsis_line) => {
                tokens.next();
                values.push(Expr::Ellipsis { line: ellipsis_line });
            },
            _ => values.push(parse_expression(tokens)?),
        }
        if !skip_optional(tokens, &Token::Comma) {
            break;
        }
    }

    let ellipses = values.iter()
                         .enumerate()
                         .filter(|(_, v)| matches!(v, Expr::Ellipsis { .. }))
                         .map(|(i, _)| i)
                         .collect::<Vec<_>>();
    match ellipses.as_slice() {
        [] => Ok(values),
        [position] if *position >= 1 && *position + 2 == values.len() => Ok(values),
        _ => Err(ParseError::UnexpectedToken { token: Token::Ellipsis.to_string(),
                                               line }),
    }
}

/// Parses a function declaration.
///
/// Syntax:
/// ```text
/// function name(type a, type b): type
///     data: ...
///     <body>
///     return <value>
/// ```
/// Leading `data` statements of the body become the function's locals. A
/// function with a declared return type must end with `return`.
///
/// # Errors
/// [`ParseError::IncorrectFunctionDeclaration`] for a missing name, a
/// malformed parameter list or a missing final `return`.
fn parse_function<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = next_token(tokens);
    let incorrect = |details: &str| ParseError::IncorrectFunctionDeclaration { details: details.to_string(),
                                                                               line };

    let symbol = parse_identifier(tokens).map_err(|_| incorrect("missing function name"))?;
    expect(tokens, &Token::LParen).map_err(|_| incorrect("expected '(' after the name"))?;
    let parameters = parse_comma_separated(tokens, parse_parameter, &Token::RParen)
        .map_err(|_| incorrect("malformed parameter list"))?;

    let mut return_type = None;
    if skip_optional(tokens, &Token::Colon)
       && let (Token::Type(value_type), _) = peek_token(tokens)
    {
        tokens.next();
        return_type = Some(*value_type);
        skip_optional(tokens, &Token::Colon);
    }
    expect_line_end(tokens)?;

    let mut body = parse_body(tokens, depth, line)?;

    let leading_data = body.iter()
                           .take_while(|s| matches!(s, Statement::DataDeclaration { .. }))
                           .count();
    let locals = body.drain(..leading_data)
                     .flat_map(|s| match s {
                         Statement::DataDeclaration { variables, .. } => variables,
                         _ => Vec::new(),
                     })
                     .collect::<Vec<_>>();

    if return_type.is_some() && !matches!(body.last(), Some(Statement::Return { .. })) {
        return Err(incorrect("a function with a return type must end with return"));
    }

    Ok(Statement::Function(Rc::new(FunctionDeclaration { symbol,
                                                         parameters,
                                                         locals,
                                                         return_type,
                                                         body,
                                                         line })))
}

fn parse_parameter<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Parameter>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match next_token(tokens) {
        (Token::Type(value_type), _) => Ok(Parameter { value_type: *value_type,
                                                       name:       parse_identifier(tokens)?, }),
        (tok, line) => Err(ParseError::MissingToken { expected: "a parameter type".to_string(),
                                                      found: tok.to_string(),
                                                      line }),
    }
}

/// `print(a, b, ...)`
fn parse_print<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = next_token(tokens);
    expect(tokens, &Token::LParen)?;
    let arguments = parse_comma_separated(tokens, parse_expression, &Token::RParen)?;

    Ok(Statement::Print { arguments, line })
}

/// `get(name)`
fn parse_get<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = next_token(tokens);
    expect(tokens, &Token::LParen)?;
    let identifier = parse_identifier(tokens)?;
    expect(tokens, &Token::RParen)?;

    Ok(Statement::Get { identifier, line })
}

/// `return [value]`
fn parse_return<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = next_token(tokens);
    let value = if at_line_end(tokens) {
        None
    } else {
        Some(parse_expression(tokens)?)
    };

    Ok(Statement::Return { value, line })
}

/// `import module`
fn parse_import<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = next_token(tokens);
    let module = parse_identifier(tokens)?;

    Ok(Statement::Import { module, line })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ast::{ComparisonOperator, Program},
        interpreter::{lexer::tokenize, parser::core::parse_program},
    };

    fn parse(source: &str) -> ParseResult<Program> {
        parse_program(&tokenize(source).unwrap())
    }

    fn single(source: &str) -> Statement {
        let mut program = parse(source).unwrap();
        assert_eq!(program.body.len(), 1, "expected one statement in {source:?}");
        program.body.remove(0)
    }

    #[test]
    fn data_block_with_continuation_lines() {
        let mut program = parse("data:\n\tnumber a\n\tconst boolean b <- true, char c\nprint(a)").unwrap();
        assert_eq!(program.body.len(), 2);
        let Statement::DataDeclaration { variables, .. } = program.body.remove(0) else {
            panic!("expected a data declaration");
        };
        let names = variables.iter().map(|v| v.symbol.as_str()).collect::<Vec<_>>();
        assert_eq!(names, ["a", "b", "c"]);
        assert!(variables[1].constant);
    }

    #[test]
    fn empty_data_block_is_rejected() {
        assert!(matches!(parse("data:\nx <- 1"),
                         Err(ParseError::MissingToken { line: 1, .. })));
    }

    #[test]
    fn constant_needs_a_value() {
        assert!(matches!(parse("const number x"),
                         Err(ParseError::MissingToken { line: 1, .. })));
    }

    #[test]
    fn bare_declaration_line() {
        let Statement::DataDeclaration { variables, .. } = single("number x ∈ (0, 10] := 5") else {
            panic!("expected a data declaration");
        };
        assert!(matches!(variables[0].range,
                         Some(Expr::Range { left_included: false,
                                            right_included: true,
                                            .. })));
        assert!(matches!(variables[0].value, Some(Expr::Number { value: 5.0, .. })));
    }

    #[test]
    fn range_initializer_reads_brackets_as_range() {
        let Statement::DataDeclaration { variables, .. } = single("range r <- [1, 5]") else {
            panic!("expected a data declaration");
        };
        assert!(matches!(variables[0].value,
                         Some(Expr::Range { left_included: true,
                                            right_included: true,
                                            .. })));
    }

    #[test]
    fn else_if_chain_nests() {
        let source = "if x = 1\n\tprint(1)\nelse if x = 2\n\tprint(2)\nelse\n\tprint(3)";
        let Statement::If { condition,
                            else_branch: Some(else_branch),
                            .. } = single(source)
        else {
            panic!("expected an if with an else branch");
        };
        assert!(matches!(condition,
                         Expr::Comparison { operator: ComparisonOperator::Equal,
                                            .. }));
        let [Statement::If { else_branch: Some(last),
                             line: 3,
                             .. }] = else_branch.as_slice()
        else {
            panic!("expected a nested if");
        };
        assert!(matches!(last.as_slice(), [Statement::Print { line: 6, .. }]));
    }

    #[test]
    fn if_without_else_leaves_following_line() {
        let program = parse("if a\n\tprint(1)\nprint(2)").unwrap();
        assert_eq!(program.body.len(), 2);
    }

    #[test]
    fn while_true_is_rejected() {
        assert_eq!(parse("while true\n\tprint(1)").unwrap_err(),
                   ParseError::IllegalWhileCondition { line: 1 });
    }

    #[test]
    fn do_while_reads_trailing_condition() {
        let Statement::While { is_do_while: true,
                               body,
                               .. } = single("do\n\tx <- x + 1\nwhile x < 10")
        else {
            panic!("expected a do-while loop");
        };
        assert_eq!(body.len(), 1);
    }

    #[test]
    fn do_without_while_is_rejected() {
        assert!(matches!(parse("do\n\tx <- 1\nprint(x)"),
                         Err(ParseError::MissingToken { line: 3, .. })));
    }

    #[test]
    fn for_with_ellipsis() {
        let Statement::For { control_variable,
                             values,
                             .. } = single("for i = 1, 3, ..., 9\n\tprint(i)")
        else {
            panic!("expected a for loop");
        };
        assert_eq!(control_variable, "i");
        assert_eq!(values.len(), 4);
        assert!(matches!(values[2], Expr::Ellipsis { .. }));
    }

    #[test]
    fn misplaced_ellipsis_is_rejected() {
        for source in ["for i = ..., 5\n\tprint(i)",
                       "for i = 1, ..., 5, 6\n\tprint(i)",
                       "for i = 1, ...\n\tprint(i)"]
        {
            assert!(matches!(parse(source), Err(ParseError::UnexpectedToken { .. })),
                    "{source:?} should be rejected");
        }
    }

    #[test]
    fn function_lifts_leading_data_into_locals() {
        let source = "function f(number a, list b): number\n\tdata: number m\n\tm <- a\n\treturn m";
        let Statement::Function(declaration) = single(source) else {
            panic!("expected a function");
        };
        assert_eq!(declaration.symbol, "f");
        assert_eq!(declaration.parameters.len(), 2);
        assert_eq!(declaration.parameters[1].value_type, ValueType::List);
        assert_eq!(declaration.locals.len(), 1);
        assert_eq!(declaration.body.len(), 2);
        assert_eq!(declaration.return_type, Some(ValueType::Number));
    }

    #[test]
    fn function_with_return_type_must_end_with_return() {
        assert!(matches!(parse("function f(number a): number\n\tprint(a)"),
                         Err(ParseError::IncorrectFunctionDeclaration { line: 1, .. })));
    }

    #[test]
    fn function_parameters_need_types() {
        assert!(matches!(parse("function f(a)\n\tprint(a)"),
                         Err(ParseError::IncorrectFunctionDeclaration { .. })));
        assert!(matches!(parse("function (number a)\n\tprint(a)"),
                         Err(ParseError::IncorrectFunctionDeclaration { .. })));
    }

    #[test]
    fn builtin_statement_forms() {
        assert!(matches!(single("print(1, \"a\")"),
                         Statement::Print { ref arguments, .. } if arguments.len() == 2));
        assert!(matches!(single("get(x)"), Statement::Get { ref identifier, .. } if identifier == "x"));
        assert!(matches!(single("return"), Statement::Return { value: None, .. }));
        assert!(matches!(single("import matematyka"),
                         Statement::Import { ref module, .. } if module == "matematyka"));
    }

    #[test]
    fn polish_keywords_parse_the_same() {
        assert_eq!(parse("jeżeli x = 1\n\twypisz(1)\nwpp\n\twypisz(2)").unwrap(),
                   parse("if x = 1\n\tprint(1)\nelse\n\tprint(2)").unwrap());
    }
}
