use std::iter::Peekable;

use crate::{
    ast::{
        BinaryOperator, BitwiseOperator, ComparisonOperator, Expr, LogicalOperator, UnaryOperator,
    },
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, peek_token},
            unary::{parse_range_operand, parse_unary},
        },
    },
};

/// Parses an assignment, the lowest-precedence expression.
///
/// Assignment is right-associative: `a <- b <- 1` assigns `1` to `b`, then
/// to `a`. The target must be a variable or an indexed element.
///
/// The rule is: `assignment := logical_or ("<-" assignment)?`
///
/// # Errors
/// [`ParseError::MissingIdentifier`] for any other target.
pub fn parse_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let target = parse_logical_or(tokens)?;

    if let (Token::Assignment, line) = peek_token(tokens) {
        tokens.next();
        if !matches!(target, Expr::Identifier { .. } | Expr::Index { .. }) {
            return Err(ParseError::MissingIdentifier { line });
        }
        let value = parse_assignment(tokens)?;
        return Ok(Expr::Assignment { target: Box::new(target),
                                     value: Box::new(value),
                                     line });
    }

    Ok(target)
}

/// Parses logical OR expressions.
///
/// The rule is: `logical_or := logical_and ("OR" logical_and)*`
pub fn parse_logical_or<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_logical_and(tokens)?;
    while let (Token::Or, line) = peek_token(tokens) {
        tokens.next();
        let right = parse_logical_and(tokens)?;
        left = Expr::Logical { left: Box::new(left),
                               operator: LogicalOperator::Or,
                               right: Box::new(right),
                               line };
    }
    Ok(left)
}

/// Parses logical AND expressions.
///
/// The rule is: `logical_and := logical_not ("AND" logical_not)*`
pub fn parse_logical_and<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_logical_not(tokens)?;
    while let (Token::And, line) = peek_token(tokens) {
        tokens.next();
        let right = parse_logical_not(tokens)?;
        left = Expr::Logical { left: Box::new(left),
                               operator: LogicalOperator::And,
                               right: Box::new(right),
                               line };
    }
    Ok(left)
}

/// Parses prefix logical negation.
///
/// `NOT` binds looser than comparisons, so `NOT a = b` negates `a = b`.
///
/// The rule is: `logical_not := "NOT" logical_not | comparison`
pub fn parse_logical_not<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let (Token::Not, line) = peek_token(tokens) {
        tokens.next();
        let operand = parse_logical_not(tokens)?;
        return Ok(Expr::Unary { operator: UnaryOperator::Not,
                                operand: Box::new(operand),
                                line });
    }
    parse_comparison(tokens)
}

/// Parses relational, equality and membership operators.
///
/// The right side of `∈` is read in range context, so `x ∈ [1, 5]` tests the
/// closed range.
///
/// The rule is:
/// `comparison := bitwise_or ((cmp_op bitwise_or) | ("∈" range_operand))*`
pub fn parse_comparison<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_bitwise_or(tokens)?;
    loop {
        match peek_token(tokens) {
            (Token::InRange, line) => {
                tokens.next();
                let collection = parse_range_operand(tokens)?;
                left = Expr::Membership { element: Box::new(left),
                                          collection: Box::new(collection),
                                          line };
            },
            (token, line) => {
                let Some(operator) = token_to_comparison_operator(token) else {
                    break;
                };
                tokens.next();
                let right = parse_bitwise_or(tokens)?;
                left = Expr::Comparison { left: Box::new(left),
                                          operator,
                                          right: Box::new(right),
                                          line };
            },
        }
    }
    Ok(left)
}

/// Parses `|` and `xor`.
///
/// The rule is: `bitwise_or := bitwise_and (("|" | "xor") bitwise_and)*`
pub fn parse_bitwise_or<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_bitwise_and(tokens)?;
    loop {
        let (operator, line) = match peek_token(tokens) {
            (Token::Pipe, line) => (BitwiseOperator::Or, line),
            (Token::Xor, line) => (BitwiseOperator::Xor, line),
            _ => break,
        };
        tokens.next();
        let right = parse_bitwise_and(tokens)?;
        left = Expr::Bitwise { left: Box::new(left),
                               operator,
                               right: Box::new(right),
                               line };
    }
    Ok(left)
}

/// Parses `&`.
///
/// The rule is: `bitwise_and := shift ("&" shift)*`
pub fn parse_bitwise_and<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_shift(tokens)?;
    while let (Token::Ampersand, line) = peek_token(tokens) {
        tokens.next();
        let right = parse_shift(tokens)?;
        left = Expr::Bitwise { left: Box::new(left),
                               operator: BitwiseOperator::And,
                               right: Box::new(right),
                               line };
    }
    Ok(left)
}

/// Parses `<<` and `>>`.
///
/// The rule is: `shift := additive (("<<" | ">>") additive)*`
pub fn parse_shift<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_additive(tokens)?;
    loop {
        let (operator, line) = match peek_token(tokens) {
            (Token::ShiftLeft, line) => (BitwiseOperator::ShiftLeft, line),
            (Token::ShiftRight, line) => (BitwiseOperator::ShiftRight, line),
            _ => break,
        };
        tokens.next();
        let right = parse_additive(tokens)?;
        left = Expr::Bitwise { left: Box::new(left),
                               operator,
                               right: Box::new(right),
                               line };
    }
    Ok(left)
}

/// Parses addition and subtraction expressions.
///
/// Handles left-associative binary operators: `+` and `-`.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_multiplicative(tokens)?;
    loop {
        let (token, line) = peek_token(tokens);
        if let Some(operator) = token_to_binary_operator(token)
           && matches!(operator, BinaryOperator::Add | BinaryOperator::Sub)
        {
            tokens.next();
            let right = parse_multiplicative(tokens)?;
            left = Expr::Binary { left: Box::new(left),
                                  operator,
                                  right: Box::new(right),
                                  line };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses multiplication-level expressions.
///
/// Handles left-associative operators: `*`, `/`, `mod` and `div`.
///
/// The rule is: `multiplicative := unary (("*" | "/" | "mod" | "div") unary)*`
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_unary(tokens)?;
    loop {
        let (token, line) = peek_token(tokens);
        if let Some(operator) = token_to_binary_operator(token)
           && matches!(operator,
                       BinaryOperator::Mul
                       | BinaryOperator::Div
                       | BinaryOperator::Mod
                       | BinaryOperator::IntDiv)
        {
            tokens.next();
            let right = parse_unary(tokens)?;
            left = Expr::Binary { left: Box::new(left),
                                  operator,
                                  right: Box::new(right),
                                  line };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Converts a token into its corresponding arithmetic operator.
///
/// # Returns
/// `Some(BinaryOperator)` if the token is an arithmetic operator, or `None`
/// otherwise.
pub(in crate::interpreter::parser) const fn token_to_binary_operator(token: &Token)
                                                                     -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Mod => Some(BinaryOperator::Mod),
        Token::Div => Some(BinaryOperator::IntDiv),
        _ => None,
    }
}

/// Converts a token into its corresponding comparison operator.
pub(in crate::interpreter::parser) const fn token_to_comparison_operator(
    token: &Token)
    -> Option<ComparisonOperator> {
    match token {
        Token::Equal => Some(ComparisonOperator::Equal),
        Token::NotEqual => Some(ComparisonOperator::NotEqual),
        Token::LessThan => Some(ComparisonOperator::Less),
        Token::LessOrEqual => Some(ComparisonOperator::LessEqual),
        Token::GreaterThan => Some(ComparisonOperator::Greater),
        Token::GreaterOrEqual => Some(ComparisonOperator::GreaterEqual),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::tokenize;

    fn expr(source: &str) -> Expr {
        let tokens = tokenize(source).unwrap();
        parse_assignment(&mut tokens.iter().peekable()).unwrap()
    }

    fn render(source: &str) -> String {
        expr(source).to_string()
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(render("3 + 4 * 2"), "(3 + (4 * 2))");
        assert_eq!(render("7 div 2 mod 3"), "((7 div 2) mod 3)");
    }

    #[test]
    fn subtraction_is_left_associative() {
        assert_eq!(render("10 - 4 - 3"), "((10 - 4) - 3)");
    }

    #[test]
    fn assignment_is_right_associative() {
        assert_eq!(render("a <- b <- 1"), "(a <- (b <- 1))");
        assert!(matches!(expr("a <- b <- 1"),
                         Expr::Assignment { ref value, .. }
                         if matches!(**value, Expr::Assignment { .. })));
    }

    #[test]
    fn assignment_target_must_be_assignable() {
        let tokens = tokenize("1 <- 2").unwrap();
        assert_eq!(parse_assignment(&mut tokens.iter().peekable()).unwrap_err(),
                   ParseError::MissingIdentifier { line: 1 });
    }

    #[test]
    fn indexed_assignment_target() {
        assert!(matches!(expr("t[0] := 5"), Expr::Assignment { ref target, .. }
                         if matches!(**target, Expr::Index { .. })));
    }

    #[test]
    fn logical_precedence() {
        assert_eq!(render("a OR b AND c"), "(a OR (b AND c))");
        assert_eq!(render("NOT a = b"), "(NOT (a = b))");
        assert_eq!(render("a ∧ ¬b ∨ c"), "((a AND (NOT b)) OR c)");
    }

    #[test]
    fn bitwise_precedence() {
        assert_eq!(render("1 | 2 & 3"), "(1 | (2 & 3))");
        assert_eq!(render("1 << 2 + 3"), "(1 << (2 + 3))");
        assert_eq!(render("a & b = c"), "((a & b) = c)");
        assert_eq!(render("1 xor 3 | 4"), "((1 xor 3) | 4)");
    }

    #[test]
    fn membership_reads_range_context() {
        assert_eq!(render("x ∈ [1, 5]"), "(x ∈ [1, 5])");
        assert!(matches!(expr("x ∈ [1, 5]"), Expr::Membership { ref collection, .. }
                         if matches!(**collection, Expr::Range { right_included: true, .. })));
        assert!(matches!(expr("x ∈ [1, 5, 7]"), Expr::Membership { ref collection, .. }
                         if matches!(**collection, Expr::Array { .. })));
    }

    #[test]
    fn comparison_operators() {
        assert_eq!(render("a ≤ b"), "(a ≤ b)");
        assert_eq!(render("a != b"), "(a ≠ b)");
        assert_eq!(render("a >= b + 1"), "(a ≥ (b + 1))");
    }
}
