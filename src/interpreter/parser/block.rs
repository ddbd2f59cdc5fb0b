use std::iter::Peekable;

use crate::{
    ast::Statement,
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, peek_token},
            statement::parse_statement,
        },
    },
};

/// Parses the statements of a block at indentation `depth`.
///
/// A line belongs to the block when it starts with exactly `depth` tabs.
/// Blank lines are skipped. The block ends before the first line with fewer
/// tabs, or at the end of the input; a line with more tabs is an error.
///
/// # Errors
/// - [`ParseError::UnexpectedToken`] for an over-indented line.
/// - Propagates errors from the statements themselves.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Vec<Statement>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut statements = Vec::new();

    loop {
        skip_blank_lines(tokens);
        let (indent, next, line) = line_indent(tokens);

        if matches!(next, Token::EndOfFile) || indent < depth {
            break;
        }
        if indent > depth {
            return Err(ParseError::UnexpectedToken { token: Token::Tab.to_string(),
                                                     line });
        }

        consume_indent(tokens, depth);
        statements.push(parse_statement(tokens, depth)?);
    }

    Ok(statements)
}

/// Parses the indented body that must follow a compound statement header.
///
/// The header's line end has already been consumed.
///
/// # Errors
/// [`ParseError::MissingToken`] when the body has no statements.
pub(in crate::interpreter::parser) fn parse_body<'a, I>(tokens: &mut Peekable<I>,
                                                        depth: usize,
                                                        line: usize)
                                                        -> ParseResult<Vec<Statement>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let body = parse_block(tokens, depth + 1)?;

    if body.is_empty() {
        let (found, _) = peek_token(tokens);
        return Err(ParseError::MissingToken { expected: "an indented block".to_string(),
                                              found: found.to_string(),
                                              line });
    }

    Ok(body)
}

/// Counts the tabs opening the next line without consuming anything.
///
/// Returns the count, the first token after the tabs and its line.
pub(in crate::interpreter::parser) fn line_indent<'a, I>(tokens: &Peekable<I>)
                                                         -> (usize, &'a Token, usize)
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut lookahead = tokens.clone();
    let mut indent = 0;

    loop {
        match peek_token(&mut lookahead) {
            (Token::Tab, _) => {
                lookahead.next();
                indent += 1;
            },
            (tok, line) => return (indent, tok, line),
        }
    }
}

/// Consumes the leading tabs of a line already measured by [`line_indent`].
pub(in crate::interpreter::parser) fn consume_indent<'a, I>(tokens: &mut Peekable<I>,
                                                            depth: usize)
    where I: Iterator<Item = &'a (Token, usize)>
{
    for _ in 0..depth {
        tokens.next();
    }
}

/// Skips lines that hold nothing but tabs.
pub(in crate::interpreter::parser) fn skip_blank_lines<'a, I>(tokens: &mut Peekable<I>)
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    loop {
        let (indent, next, _) = line_indent(tokens);
        if !matches!(next, Token::NewLine) {
            break;
        }
        consume_indent(tokens, indent + 1);
    }
}
