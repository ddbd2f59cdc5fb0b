use std::fmt;

use logos::Logos;

use crate::{ast::ValueType, error::LexError};

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// Keywords are bilingual: every English keyword has at least one Polish
/// synonym, and both map to the same variant.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Numeric literal tokens, such as `42` or `2.5`.
    #[regex(r"[0-9]+(\.[0-9]+)?", parse_number)]
    Number(f64),
    /// Character literal tokens, such as `'a'`.
    #[regex(r"'[^'\n]'", parse_char)]
    Char(char),
    /// String literal tokens, such as `"Ala ma kota"`.
    #[regex(r#""[^"\n]*""#, parse_string)]
    String(String),
    /// Boolean literal tokens.
    #[token("true", |_| true)]
    #[token("prawda", |_| true)]
    #[token("false", |_| false)]
    #[token("falsz", |_| false)]
    #[token("fałsz", |_| false)]
    Boolean(bool),
    /// `null`
    #[token("null")]
    #[token("nic")]
    Null,
    /// Type keywords used in declarations and parameter lists.
    #[token("number", |_| ValueType::Number)]
    #[token("liczba", |_| ValueType::Number)]
    #[token("boolean", |_| ValueType::Boolean)]
    #[token("logiczna", |_| ValueType::Boolean)]
    #[token("char", |_| ValueType::Char)]
    #[token("znak", |_| ValueType::Char)]
    #[token("string", |_| ValueType::String)]
    #[token("napis", |_| ValueType::String)]
    #[token("list", |_| ValueType::List)]
    #[token("lista", |_| ValueType::List)]
    #[token("set", |_| ValueType::Set)]
    #[token("zbior", |_| ValueType::Set)]
    #[token("zbiór", |_| ValueType::Set)]
    #[token("range", |_| ValueType::Range)]
    #[token("przedzial", |_| ValueType::Range)]
    #[token("przedział", |_| ValueType::Range)]
    #[token("stack", |_| ValueType::Stack)]
    #[token("stos", |_| ValueType::Stack)]
    #[token("queue", |_| ValueType::Queue)]
    #[token("kolejka", |_| ValueType::Queue)]
    Type(ValueType),
    /// `data`
    #[token("data")]
    #[token("dane")]
    Data,
    /// `const`
    #[token("const")]
    #[token("stala")]
    #[token("stała")]
    Const,
    /// `in`, `∈`
    #[token("in")]
    #[token("belongs")]
    #[token("nalezy")]
    #[token("należy")]
    #[token("w", priority = 3)]
    #[token("∈")]
    InRange,
    /// `OR`, `∨`
    #[token("OR")]
    #[token("LUB")]
    #[token("∨")]
    Or,
    /// `AND`, `∧`
    #[token("AND")]
    #[token("I", priority = 3)]
    #[token("∧")]
    And,
    /// `NOT`, `¬`, `~`
    #[token("NOT")]
    #[token("NIE")]
    #[token("¬")]
    #[token("~")]
    Not,
    /// `mod`
    #[token("mod")]
    Mod,
    /// `div`
    #[token("div")]
    Div,
    /// `xor`
    #[token("xor")]
    Xor,
    /// `if`
    #[token("if")]
    #[token("jezeli")]
    #[token("jeżeli")]
    #[token("jesli")]
    #[token("jeśli")]
    If,
    /// `else`
    #[token("else")]
    #[token("inaczej")]
    #[token("wpp")]
    Else,
    /// `while`
    #[token("while")]
    #[token("dopoki")]
    #[token("dopóki")]
    While,
    /// `do`
    #[token("do")]
    #[token("wykonuj")]
    Do,
    /// `for`
    #[token("for")]
    #[token("dla")]
    For,
    /// `function`
    #[token("function")]
    #[token("funkcja")]
    Function,
    /// `return`
    #[token("return")]
    #[token("zwroc")]
    #[token("zwróć")]
    Return,
    /// `print`
    #[token("print")]
    #[token("wypisz")]
    Print,
    /// `get`
    #[token("get")]
    #[token("read")]
    #[token("wczytaj")]
    Get,
    /// `import`
    #[token("import")]
    #[token("importuj")]
    Import,
    /// Identifier tokens; variable or function names such as `suma`.
    #[regex(r"[\p{L}_]+", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `// Comments.`
    #[regex(r"//[^\n]*", logos::skip, allow_greedy = true)]
    Comment,
    /// `<-`, `←`, `:=`
    #[token("<-")]
    #[token("←")]
    #[token(":=")]
    Assignment,
    /// `:`
    #[token(":")]
    Colon,
    /// `=`
    #[token("=")]
    Equal,
    /// `!=`, `≠`
    #[token("!=")]
    #[token("≠")]
    NotEqual,
    /// `<`
    #[token("<")]
    LessThan,
    /// `<=`, `≤`
    #[token("<=")]
    #[token("≤")]
    LessOrEqual,
    /// `>`
    #[token(">")]
    GreaterThan,
    /// `>=`, `≥`
    #[token(">=")]
    #[token("≥")]
    GreaterOrEqual,
    /// `<<`
    #[token("<<")]
    ShiftLeft,
    /// `>>`
    #[token(">>")]
    ShiftRight,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `&`
    #[token("&")]
    Ampersand,
    /// `|`
    #[token("|")]
    Pipe,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `,`
    #[token(",")]
    Comma,
    /// `...`, `…`
    #[token("...")]
    #[token("…")]
    Ellipsis,
    /// Tabs mark indentation and are kept in the stream.
    #[token("\t")]
    Tab,
    /// Line breaks end statements and are kept in the stream.
    #[token("\n")]
    NewLine,
    /// Spaces, carriage returns and feeds.
    #[regex(r"[ \r\f]+", logos::skip)]
    Ignored,
    /// Synthetic token closing every token stream.
    EndOfFile,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// Turns source text into `(token, line)` pairs closed by
/// [`Token::EndOfFile`].
///
/// # Errors
/// - [`LexError::UnterminatedString`] when a quote is not closed on its line.
/// - [`LexError::UnrecognizedCharacter`] for any other character that starts
///   no token, including a `!` that is not followed by `=`.
///
/// # Example
/// ```
/// use pseudokod::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("x <- 1").unwrap();
/// assert_eq!(tokens[1].0, Token::Assignment);
/// assert_eq!(tokens.last().unwrap().0, Token::EndOfFile);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, LexError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });

    while let Some(token) = lexer.next() {
        let line = lexer.extras.line;
        match token {
            Ok(Token::NewLine) => {
                tokens.push((Token::NewLine, line));
                lexer.extras.line += 1;
            },
            Ok(tok) => tokens.push((tok, line)),
            Err(()) => {
                let slice = lexer.slice();
                return Err(if slice.starts_with('"') || slice.starts_with('\'') {
                               LexError::UnterminatedString { line }
                           } else {
                               LexError::UnrecognizedCharacter { character: slice.chars()
                                                                                 .next()
                                                                                 .unwrap_or_default(),
                                                                 line }
                           });
            },
        }
    }

    tokens.push((Token::EndOfFile, lexer.extras.line));
    Ok(tokens)
}

/// Parses a numeric literal from the current token slice.
fn parse_number(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Takes the single character between the quotes of a char literal.
fn parse_char(lex: &logos::Lexer<Token>) -> Option<char> {
    lex.slice().chars().nth(1)
}

/// Strips the surrounding quotes of a string literal.
fn parse_string(lex: &logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    slice[1..slice.len() - 1].to_string()
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Char(c) => write!(f, "'{c}'"),
            Self::String(s) => write!(f, "\"{s}\""),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Type(t) => write!(f, "{t}"),
            Self::Identifier(name) => write!(f, "{name}"),
            Self::Null => write!(f, "null"),
            Self::Data => write!(f, "data"),
            Self::Const => write!(f, "const"),
            Self::InRange => write!(f, "∈"),
            Self::Or => write!(f, "OR"),
            Self::And => write!(f, "AND"),
            Self::Not => write!(f, "NOT"),
            Self::Mod => write!(f, "mod"),
            Self::Div => write!(f, "div"),
            Self::Xor => write!(f, "xor"),
            Self::If => write!(f, "if"),
            Self::Else => write!(f, "else"),
            Self::While => write!(f, "while"),
            Self::Do => write!(f, "do"),
            Self::For => write!(f, "for"),
            Self::Function => write!(f, "function"),
            Self::Return => write!(f, "return"),
            Self::Print => write!(f, "print"),
            Self::Get => write!(f, "get"),
            Self::Import => write!(f, "import"),
            Self::Comment => write!(f, "comment"),
            Self::Assignment => write!(f, "<-"),
            Self::Colon => write!(f, ":"),
            Self::Equal => write!(f, "="),
            Self::NotEqual => write!(f, "≠"),
            Self::LessThan => write!(f, "<"),
            Self::LessOrEqual => write!(f, "≤"),
            Self::GreaterThan => write!(f, ">"),
            Self::GreaterOrEqual => write!(f, "≥"),
            Self::ShiftLeft => write!(f, "<<"),
            Self::ShiftRight => write!(f, ">>"),
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Star => write!(f, "*"),
            Self::Slash => write!(f, "/"),
            Self::Ampersand => write!(f, "&"),
            Self::Pipe => write!(f, "|"),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::LBracket => write!(f, "["),
            Self::RBracket => write!(f, "]"),
            Self::LBrace => write!(f, "{{"),
            Self::RBrace => write!(f, "}}"),
            Self::Comma => write!(f, ","),
            Self::Ellipsis => write!(f, "..."),
            Self::Tab => write!(f, "tab"),
            Self::NewLine => write!(f, "end of line"),
            Self::Ignored => write!(f, "whitespace"),
            Self::EndOfFile => write!(f, "end of file"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source).unwrap().into_iter().map(|(tok, _)| tok).collect()
    }

    #[test]
    fn spaces_are_discarded() {
        assert_eq!(kinds("a  +   b"), kinds("a+b"));
    }

    #[test]
    fn tabs_and_newlines_are_tokens() {
        assert_eq!(kinds("\tx\n"),
                   vec![Token::Tab,
                        Token::Identifier("x".into()),
                        Token::NewLine,
                        Token::EndOfFile]);
    }

    #[test]
    fn less_than_family_is_disambiguated() {
        assert_eq!(kinds("<-"), vec![Token::Assignment, Token::EndOfFile]);
        assert_eq!(kinds("<="), vec![Token::LessOrEqual, Token::EndOfFile]);
        assert_eq!(kinds("< 1"),
                   vec![Token::LessThan, Token::Number(1.0), Token::EndOfFile]);
        assert_eq!(kinds(":="), vec![Token::Assignment, Token::EndOfFile]);
        assert_eq!(kinds(":"), vec![Token::Colon, Token::EndOfFile]);
        assert_eq!(kinds(">="), vec![Token::GreaterOrEqual, Token::EndOfFile]);
    }

    #[test]
    fn unicode_operators() {
        assert_eq!(kinds("≠ ≤ ≥ ∨ ∧ ¬ ~ ∈"),
                   vec![Token::NotEqual,
                        Token::LessOrEqual,
                        Token::GreaterOrEqual,
                        Token::Or,
                        Token::And,
                        Token::Not,
                        Token::Not,
                        Token::InRange,
                        Token::EndOfFile]);
    }

    #[test]
    fn bilingual_keywords() {
        assert_eq!(kinds("dane data"), vec![Token::Data, Token::Data, Token::EndOfFile]);
        assert_eq!(kinds("liczba"), vec![Token::Type(ValueType::Number), Token::EndOfFile]);
        assert_eq!(kinds("in belongs nalezy w"),
                   vec![Token::InRange,
                        Token::InRange,
                        Token::InRange,
                        Token::InRange,
                        Token::EndOfFile]);
        assert_eq!(kinds("LUB I"), vec![Token::Or, Token::And, Token::EndOfFile]);
    }

    #[test]
    fn one_letter_keywords_only_match_alone() {
        assert_eq!(kinds("x w t I y"),
                   vec![Token::Identifier("x".into()),
                        Token::InRange,
                        Token::Identifier("t".into()),
                        Token::And,
                        Token::Identifier("y".into()),
                        Token::EndOfFile]);
        assert_eq!(kinds("wx"), vec![Token::Identifier("wx".into()), Token::EndOfFile]);
        assert_eq!(kinds("Ix"), vec![Token::Identifier("Ix".into()), Token::EndOfFile]);
    }

    #[test]
    fn keywords_are_case_sensitive() {
        assert_eq!(kinds("or"), vec![Token::Identifier("or".into()), Token::EndOfFile]);
    }

    #[test]
    fn lone_bang_is_rejected() {
        assert!(matches!(tokenize("a ! b"),
                         Err(LexError::UnrecognizedCharacter { character: '!', .. })));
        assert_eq!(kinds("a != b")[1], Token::NotEqual);
    }

    #[test]
    fn unrecognized_character_is_named() {
        assert!(matches!(tokenize("x <- 1 $"),
                         Err(LexError::UnrecognizedCharacter { character: '$', line: 1 })));
    }

    #[test]
    fn unterminated_string() {
        assert!(matches!(tokenize("print(\"abc\n)"),
                         Err(LexError::UnterminatedString { line: 1 })));
    }

    #[test]
    fn literals_and_lines() {
        let tokens = tokenize("x <- 'a'\ny <- \"tekst\" // comment\nz <- 2.5").unwrap();
        assert_eq!(tokens[2], (Token::Char('a'), 1));
        assert_eq!(tokens[6], (Token::String("tekst".into()), 2));
        assert_eq!(tokens[10], (Token::Number(2.5), 3));
    }

    #[test]
    fn ellipsis_after_number() {
        assert_eq!(kinds("1, 2, ..., n")[4], Token::Ellipsis);
        assert_eq!(kinds("1...5"),
                   vec![Token::Number(1.0), Token::Ellipsis, Token::Number(5.0), Token::EndOfFile]);
    }
}
