use std::iter::Peekable;

use crate::{
    ast::{Expr, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            binary::parse_bitwise_or,
            core::{ParseResult, expect, next_token, parse_expression, peek_token},
            utils::{parse_comma_separated, parse_set_literal},
        },
    },
};

/// Parses unary negation.
///
/// Negation applies to the postfix expression that follows it, so `-t[0]`
/// negates the element.
///
/// The rule is: `unary := "-" unary | postfix`
pub fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let (Token::Minus, line) = peek_token(tokens) {
        tokens.next();
        let operand = parse_unary(tokens)?;
        return Ok(Expr::Unary { operator: UnaryOperator::Negate,
                                operand: Box::new(operand),
                                line });
    }
    parse_postfix(tokens)
}

/// Parses indexing and calls following a primary expression.
///
/// The rule is: `postfix := primary ("[" expression "]" | "(" arguments ")")*`
pub fn parse_postfix<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut expr = parse_primary(tokens)?;
    loop {
        match peek_token(tokens) {
            (Token::LBracket, line) => {
                tokens.next();
                let index = parse_expression(tokens)?;
                expect(tokens, &Token::RBracket)?;
                expr = Expr::Index { array: Box::new(expr),
                                     index: Box::new(index),
                                     line };
            },
            (Token::LParen, line) => {
                tokens.next();
                let arguments = parse_comma_separated(tokens, parse_expression, &Token::RParen)?;
                expr = Expr::Call { callee: Box::new(expr),
                                    arguments,
                                    line };
            },
            _ => break,
        }
    }
    Ok(expr)
}

/// Parses a primary expression: a literal, a variable, a parenthesized
/// expression or range, a list or a set.
///
/// # Errors
/// [`ParseError::IllegalExpressionStart`] for a token that cannot begin an
/// expression.
pub fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match peek_token(tokens) {
        (Token::Number(value), line) => {
            tokens.next();
            Ok(Expr::Number { value: *value,
                              line })
        },
        (Token::Char(value), line) => {
            tokens.next();
            Ok(Expr::Char { value: *value,
                            line })
        },
        (Token::String(value), line) => {
            tokens.next();
            Ok(Expr::String { value: value.clone(),
                              line })
        },
        (Token::Boolean(value), line) => {
            tokens.next();
            Ok(Expr::Boolean { value: *value,
                               line })
        },
        (Token::Null, line) => {
            tokens.next();
            Ok(Expr::Null { line })
        },
        (Token::Identifier(name), line) => {
            tokens.next();
            Ok(Expr::Identifier { name: name.clone(),
                                  line })
        },
        (Token::LParen, _) => parse_parenthesized(tokens),
        (Token::LBracket, _) => parse_bracketed(tokens, false),
        (Token::LBrace, _) => parse_set_literal(tokens),
        (tok, line) => Err(ParseError::IllegalExpressionStart { token: tok.to_string(),
                                                                line }),
    }
}

/// Parses the operand of `∈` or a `range` declaration.
///
/// Here `[a, b]` is the closed range from `a` to `b` rather than a list.
pub fn parse_range_operand<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if matches!(peek_token(tokens).0, Token::LBracket) {
        return parse_bracketed(tokens, true);
    }
    parse_bitwise_or(tokens)
}

/// Parses `(expr)` or a range opened by `(`.
///
/// Syntax:
/// ```text
/// (a + b)     grouping
/// (a, b)      open range
/// (a, b]      left-open range
/// ```
fn parse_parenthesized<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = next_token(tokens);
    let left = parse_expression(tokens)?;

    match next_token(tokens) {
        (Token::RParen, _) => Ok(left),
        (Token::Comma, _) => {
            let right = parse_expression(tokens)?;
            let right_included = match next_token(tokens) {
                (Token::RParen, _) => false,
                (Token::RBracket, _) => true,
                (tok, line) => {
                    return Err(ParseError::MissingToken { expected: "')' or ']'".to_string(),
                                                          found: tok.to_string(),
                                                          line });
                },
            };
            Ok(Expr::Range { left: Box::new(left),
                             right: Box::new(right),
                             left_included: false,
                             right_included,
                             line })
        },
        (tok, line) => Err(ParseError::MissingToken { expected: "')' or ','".to_string(),
                                                      found: tok.to_string(),
                                                      line }),
    }
}

/// Parses a list literal or a range opened by `[`.
///
/// `[a, b)` is always a right-open range. `[a, b]` is a closed range when
/// `closed_range` is set and a two-element list otherwise.
fn parse_bracketed<'a, I>(tokens: &mut Peekable<I>, closed_range: bool) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = next_token(tokens);
    let mut values = Vec::new();

    if matches!(peek_token(tokens).0, Token::RBracket) {
        tokens.next();
        return Ok(Expr::Array { values, line });
    }

    let right_included = loop {
        values.push(parse_expression(tokens)?);
        match next_token(tokens) {
            (Token::Comma, _) => {},
            (Token::RBracket, _) => break true,
            (Token::RParen, _) if values.len() == 2 => break false,
            (tok, line) => {
                return Err(ParseError::MissingToken { expected: "',' or ']'".to_string(),
                                                      found: tok.to_string(),
                                                      line });
            },
        }
    };

    if values.len() == 2 && (closed_range || !right_included) {
        let right = values.pop().map(Box::new);
        let left = values.pop().map(Box::new);
        if let (Some(left), Some(right)) = (left, right) {
            return Ok(Expr::Range { left,
                                    right,
                                    left_included: true,
                                    right_included,
                                    line });
        }
    }

    Ok(Expr::Array { values, line })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::tokenize;

    fn expr(source: &str) -> ParseResult<Expr> {
        let tokens = tokenize(source).unwrap();
        parse_expression(&mut tokens.iter().peekable())
    }

    fn range_operand(source: &str) -> Expr {
        let tokens = tokenize(source).unwrap();
        parse_range_operand(&mut tokens.iter().peekable()).unwrap()
    }

    #[test]
    fn negation_applies_to_postfix() {
        assert_eq!(expr("-t[0]").unwrap().to_string(), "(-t[0])");
        assert_eq!(expr("--1").unwrap().to_string(), "(-(-1))");
    }

    #[test]
    fn calls_and_indexes_chain() {
        assert_eq!(expr("f(1, 2)[0]").unwrap().to_string(), "f(1, 2)[0]");
        assert_eq!(expr("t[1][2]").unwrap().to_string(), "t[1][2]");
        assert!(matches!(expr("f()").unwrap(), Expr::Call { ref arguments, .. } if arguments.is_empty()));
    }

    #[test]
    fn parentheses_group() {
        assert_eq!(expr("(1 + 2) * 3").unwrap().to_string(), "((1 + 2) * 3)");
    }

    #[test]
    fn half_open_ranges() {
        assert_eq!(expr("(0, 10]").unwrap().to_string(), "(0, 10]");
        assert_eq!(expr("[0, 10)").unwrap().to_string(), "[0, 10)");
        assert_eq!(expr("(0, 10)").unwrap().to_string(), "(0, 10)");
    }

    #[test]
    fn square_brackets_are_a_list_outside_range_context() {
        assert!(matches!(expr("[1, 5]").unwrap(), Expr::Array { ref values, .. } if values.len() == 2));
        assert!(matches!(range_operand("[1, 5]"), Expr::Range { left_included: true,
                                                                right_included: true,
                                                                .. }));
        assert!(matches!(expr("[]").unwrap(), Expr::Array { ref values, .. } if values.is_empty()));
    }

    #[test]
    fn non_bracket_range_operand_is_an_expression() {
        assert!(matches!(range_operand("r"), Expr::Identifier { .. }));
        assert!(matches!(range_operand("{1, 2}"), Expr::Set { .. }));
    }

    #[test]
    fn unclosed_range_is_rejected() {
        assert!(matches!(expr("(0, 10"), Err(ParseError::MissingToken { .. })));
        assert!(matches!(expr("[1, 2, 3)"), Err(ParseError::MissingToken { .. })));
    }

    #[test]
    fn illegal_expression_start() {
        assert_eq!(expr(")").unwrap_err(),
                   ParseError::IllegalExpressionStart { token: ")".to_string(),
                                                        line:  1, });
        assert!(matches!(expr("* 2"), Err(ParseError::IllegalExpressionStart { .. })));
    }

    #[test]
    fn literals() {
        assert!(matches!(expr("'a'").unwrap(), Expr::Char { value: 'a', .. }));
        assert!(matches!(expr("\"ala\"").unwrap(), Expr::String { ref value, .. } if value == "ala"));
        assert!(matches!(expr("prawda").unwrap(), Expr::Boolean { value: true, .. }));
        assert!(matches!(expr("nic").unwrap(), Expr::Null { .. }));
    }
}
