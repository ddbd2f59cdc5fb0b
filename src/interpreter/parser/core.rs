use std::iter::Peekable;

use crate::{
    ast::{Expr, Program},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{binary::parse_assignment, block::parse_block},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Stand-in returned once the stream is exhausted.
static END: (Token, usize) = (Token::EndOfFile, 0);

/// Parses a whole program.
///
/// The token slice must be the output of
/// [`tokenize`](crate::interpreter::lexer::tokenize), so it ends with
/// [`Token::EndOfFile`]. Top-level statements sit at indentation depth zero.
///
/// # Errors
/// Returns the first [`ParseError`] encountered.
pub fn parse_program(tokens: &[(Token, usize)]) -> ParseResult<Program> {
    let mut tokens = tokens.iter().peekable();
    let body = parse_block(&mut tokens, 0)?;

    match peek_token(&mut tokens) {
        (Token::EndOfFile, _) => Ok(Program { body }),
        (tok, line) => Err(ParseError::UnexpectedToken { token: tok.to_string(),
                                                         line }),
    }
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing.
/// It begins at the lowest-precedence level, assignment, and recursively
/// descends through the precedence hierarchy.
///
/// Grammar: `expression := assignment`
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_assignment(tokens)
}

/// Looks at the next token without consuming it.
///
/// Past the end of the stream this keeps returning [`Token::EndOfFile`].
pub(in crate::interpreter::parser) fn peek_token<'a, I>(tokens: &mut Peekable<I>)
                                                        -> (&'a Token, usize)
    where I: Iterator<Item = &'a (Token, usize)>
{
    let (tok, line) = tokens.peek().copied().unwrap_or(&END);
    (tok, *line)
}

/// Consumes the next token.
pub(in crate::interpreter::parser) fn next_token<'a, I>(tokens: &mut Peekable<I>)
                                                        -> (&'a Token, usize)
    where I: Iterator<Item = &'a (Token, usize)>
{
    let (tok, line) = tokens.next().unwrap_or(&END);
    (tok, *line)
}

/// Consumes `expected` or fails with [`ParseError::MissingToken`].
///
/// Returns the line of the consumed token.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    expected: &Token)
                                                    -> ParseResult<usize>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match peek_token(tokens) {
        (tok, line) if tok == expected => {
            tokens.next();
            Ok(line)
        },
        (tok, line) => Err(ParseError::MissingToken { expected: format!("'{expected}'"),
                                                      found: tok.to_string(),
                                                      line }),
    }
}

/// Consumes `token` if it is next. Returns whether it did.
pub(in crate::interpreter::parser) fn skip_optional<'a, I>(tokens: &mut Peekable<I>,
                                                           token: &Token)
                                                           -> bool
    where I: Iterator<Item = &'a (Token, usize)>
{
    if peek_token(tokens).0 == token {
        tokens.next();
        return true;
    }
    false
}

/// Whether the next token closes the current line.
pub(in crate::interpreter::parser) fn at_line_end<'a, I>(tokens: &mut Peekable<I>) -> bool
    where I: Iterator<Item = &'a (Token, usize)>
{
    matches!(peek_token(tokens).0, Token::NewLine | Token::EndOfFile)
}

/// Consumes the newline that ends a statement.
///
/// The end of the input also ends a line, but is left in the stream.
pub(in crate::interpreter::parser) fn expect_line_end<'a, I>(tokens: &mut Peekable<I>)
                                                             -> ParseResult<()>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match peek_token(tokens) {
        (Token::NewLine, _) => {
            tokens.next();
            Ok(())
        },
        (Token::EndOfFile, _) => Ok(()),
        (tok, line) => Err(ParseError::MissingToken { expected: "end of line".to_string(),
                                                      found: tok.to_string(),
                                                      line }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ast::{BinaryOperator, Statement},
        interpreter::lexer::tokenize,
    };

    fn program(source: &str) -> Program {
        parse_program(&tokenize(source).unwrap()).unwrap()
    }

    #[test]
    fn empty_source_is_an_empty_program() {
        assert_eq!(program(""), Program::default());
        assert_eq!(program("\n\n"), Program::default());
    }

    #[test]
    fn statement_lines_are_tracked() {
        let parsed = program("x <- 1\n\ny <- 2");
        let lines = parsed.body
                          .iter()
                          .map(|s| match s {
                              Statement::Expression { line, .. } => *line,
                              other => panic!("unexpected statement {other:?}"),
                          })
                          .collect::<Vec<_>>();
        assert_eq!(lines, vec![1, 3]);
    }

    #[test]
    fn expression_entry_point_stops_at_line_end() {
        let tokens = tokenize("1 + 2\n3").unwrap();
        let mut iter = tokens.iter().peekable();
        let expr = parse_expression(&mut iter).unwrap();
        assert!(matches!(expr,
                         Expr::Binary { operator: BinaryOperator::Add,
                                        .. }));
        assert_eq!(peek_token(&mut iter).0, &Token::NewLine);
    }

    #[test]
    fn indented_top_level_is_rejected() {
        let err = parse_program(&tokenize("\tx <- 1").unwrap()).unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { line: 1, .. }));
    }

    #[test]
    fn two_statements_on_one_line_are_rejected() {
        let err = parse_program(&tokenize("x <- 1 y <- 2").unwrap()).unwrap_err();
        assert!(matches!(err, ParseError::MissingToken { line: 1, .. }));
    }
}
