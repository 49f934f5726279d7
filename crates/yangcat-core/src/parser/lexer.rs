//! YANG tokenizer

use std::iter::Peekable;
use std::str::Chars;

use super::ParseError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Token {
    Open,
    Close,
    Semi,
    Plus,
    Text(String),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "`{{`"),
            Self::Close => write!(f, "`}}`"),
            Self::Semi => write!(f, "`;`"),
            Self::Plus => write!(f, "`+`"),
            Self::Text(text) => write!(f, "`{text}`"),
        }
    }
}

#[derive(Debug, Clone)]
pub(super) struct Spanned {
    pub token: Token,
    pub line: usize,
}

struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
}

/// Split YANG source into tokens, dropping whitespace and comments
pub(super) fn tokenize(source: &str) -> Result<Vec<Spanned>, ParseError> {
    let mut lexer = Lexer {
        chars: source.chars().peekable(),
        line: 1,
    };
    let mut tokens = Vec::new();

    while let Some(&c) = lexer.chars.peek() {
        let line = lexer.line;
        let token = match c {
            '\n' => {
                lexer.bump();
                continue;
            }
            c if c.is_whitespace() => {
                lexer.bump();
                continue;
            }
            '{' => {
                lexer.bump();
                Token::Open
            }
            '}' => {
                lexer.bump();
                Token::Close
            }
            ';' => {
                lexer.bump();
                Token::Semi
            }
            '"' | '\'' => {
                lexer.bump();
                Token::Text(lexer.quoted(c)?)
            }
            '/' if lexer.skip_comment()? => continue,
            '+' if lexer.plus_stands_alone() => {
                lexer.bump();
                Token::Plus
            }
            _ => Token::Text(lexer.unquoted()),
        };
        tokens.push(Spanned { token, line });
    }

    Ok(tokens)
}

impl Lexer<'_> {
    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next();
        if c == Some('\n') {
            self.line += 1;
        }
        c
    }

    /// Skip a `//` or `/* */` comment at the cursor. Returns false when the
    /// slash starts an unquoted string instead.
    fn skip_comment(&mut self) -> Result<bool, ParseError> {
        let mut lookahead = self.chars.clone();
        lookahead.next();
        match lookahead.peek() {
            Some('/') => {
                while let Some(&c) = self.chars.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.bump();
                }
                Ok(true)
            }
            Some('*') => {
                let line = self.line;
                self.bump();
                self.bump();
                let mut previous = '\0';
                loop {
                    match self.bump() {
                        Some('/') if previous == '*' => return Ok(true),
                        Some(c) => previous = c,
                        None => {
                            return Err(ParseError::Unterminated {
                                what: "block comment",
                                line,
                            })
                        }
                    }
                }
            }
            _ => Ok(false),
        }
    }

    fn plus_stands_alone(&self) -> bool {
        let mut lookahead = self.chars.clone();
        lookahead.next();
        match lookahead.peek() {
            None => true,
            Some(c) => c.is_whitespace() || matches!(c, '"' | '\''),
        }
    }

    fn quoted(&mut self, quote: char) -> Result<String, ParseError> {
        let line = self.line;
        let mut value = String::new();
        loop {
            match self.bump() {
                Some(c) if c == quote => return Ok(value),
                Some('\\') if quote == '"' => match self.bump() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some(other) => value.push(other),
                    None => break,
                },
                Some(c) => value.push(c),
                None => break,
            }
        }
        Err(ParseError::Unterminated {
            what: "quoted string",
            line,
        })
    }

    fn unquoted(&mut self) -> String {
        let mut value = String::new();
        while let Some(&c) = self.chars.peek() {
            if c.is_whitespace() || matches!(c, ';' | '{' | '}' | '"' | '\'') {
                break;
            }
            value.push(c);
            self.bump();
        }
        value
    }
}
