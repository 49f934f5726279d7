//! Built-in YANG statement parser

use std::iter::Peekable;
use std::path::Path;
use std::vec::IntoIter;

use super::lexer::{tokenize, Spanned, Token};
use super::{ParseError, Statement, StatementParser};

/// Lightweight YANG parser producing a statement tree
///
/// Handles comments, single and double quoted strings, `+` concatenation
/// and arbitrary extension statements. It performs no semantic checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct YangParser;

impl YangParser {
    /// Create a new parser
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parse YANG source text into its top-level statement
    ///
    /// # Errors
    /// Returns an error if the text is malformed or its top-level statement
    /// is not `module` or `submodule`.
    pub fn parse_str(&self, source: &str) -> Result<Statement, ParseError> {
        let mut tokens = tokenize(source)?.into_iter().peekable();
        let root = parse_statement(&mut tokens)?;

        if let Some(extra) = tokens.next() {
            return Err(ParseError::Unexpected {
                found: extra.token.to_string(),
                line: extra.line,
            });
        }
        if root.keyword != "module" && root.keyword != "submodule" {
            return Err(ParseError::NotAModule(root.keyword));
        }
        Ok(root)
    }
}

impl StatementParser for YangParser {
    fn parse_file(&self, path: &Path) -> Result<Statement, ParseError> {
        let source = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse_str(&source)
    }
}

type Tokens = Peekable<IntoIter<Spanned>>;

fn parse_statement(tokens: &mut Tokens) -> Result<Statement, ParseError> {
    let keyword = match tokens.next() {
        Some(Spanned {
            token: Token::Text(keyword),
            ..
        }) => keyword,
        Some(other) => return Err(unexpected(other)),
        None => return Err(ParseError::UnexpectedEof),
    };

    let argument = parse_argument(tokens)?;
    let mut statement = Statement {
        keyword,
        argument,
        substatements: Vec::new(),
    };

    match tokens.next() {
        Some(Spanned {
            token: Token::Semi, ..
        }) => Ok(statement),
        Some(Spanned {
            token: Token::Open, ..
        }) => {
            loop {
                match tokens.peek() {
                    Some(Spanned {
                        token: Token::Close,
                        ..
                    }) => {
                        tokens.next();
                        break;
                    }
                    Some(_) => statement.substatements.push(parse_statement(tokens)?),
                    None => return Err(ParseError::UnexpectedEof),
                }
            }
            Ok(statement)
        }
        Some(other) => Err(unexpected(other)),
        None => Err(ParseError::UnexpectedEof),
    }
}

/// Argument after a keyword, joining `"a" + "b"` concatenations
fn parse_argument(tokens: &mut Tokens) -> Result<Option<String>, ParseError> {
    let Some(Spanned {
        token: Token::Text(mut argument),
        ..
    }) = tokens.next_if(|s| matches!(s.token, Token::Text(_)))
    else {
        return Ok(None);
    };

    while tokens.next_if(|s| s.token == Token::Plus).is_some() {
        match tokens.next() {
            Some(Spanned {
                token: Token::Text(text),
                ..
            }) => argument.push_str(&text),
            Some(other) => return Err(unexpected(other)),
            None => return Err(ParseError::UnexpectedEof),
        }
    }

    Ok(Some(argument))
}

fn unexpected(spanned: Spanned) -> ParseError {
    ParseError::Unexpected {
        found: spanned.token.to_string(),
        line: spanned.line,
    }
}
