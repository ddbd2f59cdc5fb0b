use std::iter::Peekable;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, next_token, parse_expression, peek_token},
    },
};

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by call arguments, parameter lists and `print`.
/// It repeatedly calls `parse_item` to parse one element, expecting either:
///
/// - a comma, to continue the list, or
/// - the specified closing token, to end it.
///
/// An immediately encountered closing token produces an empty list.
///
/// Grammar (simplified): `list := item ("," item)*`
///
/// # Errors
/// Returns a `ParseError` if an item fails to parse or a token other than a
/// comma or `closing` follows an item.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token)
    -> Result<Vec<T>, ParseError>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut items = Vec::new();
    if peek_token(tokens).0 == closing {
        tokens.next();

        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        match next_token(tokens) {
            (Token::Comma, _) => {},
            (tok, _) if tok == closing => break,
            (tok, line) => {
                return Err(ParseError::MissingToken { expected: format!("',' or '{closing}'"),
                                                      found: tok.to_string(),
                                                      line });
            },
        }
    }
    Ok(items)
}

/// Parses a plain identifier and returns its name.
///
/// # Errors
/// [`ParseError::MissingToken`] if the next token is not an identifier.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>)
                                                              -> ParseResult<String>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match next_token(tokens) {
        (Token::Identifier(s), _) => Ok(s.clone()),
        (tok, line) => Err(ParseError::MissingToken { expected: "an identifier".to_string(),
                                                      found: tok.to_string(),
                                                      line }),
    }
}

/// Parses a set literal of the form `{ expr1, expr2, ..., exprN }`.
///
/// An empty set `{}` is accepted.
///
/// Grammar: `set := "{" (expression ("," expression)*)? "}"`.
///
/// # Errors
/// [`ParseError::InvalidSetSyntax`] when an element is followed by anything
/// but `,` or `}`.
pub(in crate::interpreter::parser) fn parse_set_literal<'a, I>(tokens: &mut Peekable<I>)
                                                               -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = next_token(tokens);
    let mut values = Vec::new();

    if matches!(peek_token(tokens).0, Token::RBrace) {
        tokens.next();
        return Ok(Expr::Set { values, line });
    }

    loop {
        values.push(parse_expression(tokens)?);
        match next_token(tokens) {
            (Token::Comma, _) => {},
            (Token::RBrace, _) => break,
            (tok, line) => {
                return Err(ParseError::InvalidSetSyntax { found: tok.to_string(),
                                                          line });
            },
        }
    }

    Ok(Expr::Set { values, line })
}
