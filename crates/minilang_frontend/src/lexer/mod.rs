
use std::str::Chars;

use crate::pos::Pos;
use crate::token::{Keyword, Token, TokenKind};

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[error("{kind} at {pos}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub pos: Pos,
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum LexErrorKind {
    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),

    #[error("unterminated string literal")]
    UnterminatedString,
}

pub(crate) struct Lexer<'src> {
    all: &'src str,
    chars: Chars<'src>,

    token_start: usize,
    token_pos: Pos,

    pos: Pos,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            all: source,
            chars: source.chars(),

            token_start: 0,
            token_pos: Pos::start(),

            pos: Pos::start(),
        }
    }

    pub fn lex(mut self) -> Result<TokenStream, LexError> {
        let mut tokens = vec![];
        while let Some(token) = self.lex_token()? {
            tokens.push(token);
        }

        Ok(TokenStream {
            tokens: tokens.into_iter(),
            eof_pos: self.pos,
        })
    }

    fn lex_token(&mut self) -> Result<Option<Token>, LexError> {
        loop {
            self.token_start = self.byte_pos();
            self.token_pos = self.pos;

            let Some(ch) = self.bump() else {
                return Ok(None);
            };

            let kind = match ch {
                // comment
                '/' if self.peek() == Some('/') => {
                    while !matches!(self.bump(), Some('\n') | None) {}
                    continue;
                }

                ch if ch.is_ascii_whitespace() => continue,

                '{' => TokenKind::LBrace,
                '}' => TokenKind::RBrace,
                '(' => TokenKind::LParen,
                ')' => TokenKind::RParen,
                ';' => TokenKind::Semicolon,
                ',' => TokenKind::Comma,

                '+' => TokenKind::Add,
                '-' => TokenKind::Sub,
                '*' => TokenKind::Mul,
                '/' => TokenKind::Div,

                // two-character operators are tried before their
                // single-character prefixes
                '<' if self.eat('=') => TokenKind::LtEq,
                '>' if self.eat('=') => TokenKind::GtEq,
                '=' if self.eat('=') => TokenKind::EqEq,

                '<' => TokenKind::Lt,
                '>' => TokenKind::Gt,
                '=' => TokenKind::Assign,

                '"' => self.lex_string()?,

                '0'..='9' => self.lex_number(),

                ch if is_ident_start(ch) => self.lex_alpha(),

                ch => return Err(self.error(LexErrorKind::UnexpectedChar(ch))),
            };

            let token = Token {
                kind,
                lexeme: self.all[self.token_start..self.byte_pos()].to_owned(),
                pos: self.token_pos,
            };

            return Ok(Some(token));
        }
    }

    /// Scan the rest of a `digits(.digits)?` number. The dot only joins
    /// the number if a digit follows it, so `1.` lexes as `1` and a
    /// stray dot.
    fn lex_number(&mut self) -> TokenKind {
        while matches!(self.peek(), Some('0'..='9')) {
            self.bump();
        }

        if self.peek() == Some('.') && matches!(self.peek_second(), Some('0'..='9')) {
            self.bump();
            while matches!(self.peek(), Some('0'..='9')) {
                self.bump();
            }
        }

        TokenKind::Number
    }

    /// Scan the rest of a string literal. No escapes; the closing quote
    /// must appear on the same line.
    fn lex_string(&mut self) -> Result<TokenKind, LexError> {
        loop {
            match self.peek() {
                Some('"') => {
                    self.bump();
                    return Ok(TokenKind::Str);
                }
                Some('\n') | None => {
                    return Err(self.error(LexErrorKind::UnterminatedString));
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
    }

    /// Scan the rest of an identifier, then decide whether the whole word
    /// is a keyword. Binding on the full word means `ifx` stays a single
    /// identifier.
    fn lex_alpha(&mut self) -> TokenKind {
        while matches!(self.peek(), Some(ch) if is_ident(ch)) {
            self.bump();
        }

        let s = &self.all[self.token_start..self.byte_pos()];

        match s {
            "let" => TokenKind::Keyword(Keyword::Let),
            "print" => TokenKind::Keyword(Keyword::Print),
            "if" => TokenKind::Keyword(Keyword::If),
            "else" => TokenKind::Keyword(Keyword::Else),
            "while" => TokenKind::Keyword(Keyword::While),
            _ => TokenKind::Identifier,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.chars.next()?;

        if ch == '\n' {
            self.pos.line += 1;
            self.pos.column = 1;
        } else {
            self.pos.column += 1;
        }

        Some(ch)
    }

    fn eat(&mut self, ch: char) -> bool {
        if self.peek() == Some(ch) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.clone().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.chars.clone().nth(1)
    }

    fn byte_pos(&self) -> usize {
        self.all.len() - self.chars.as_str().len()
    }

    fn error(&self, kind: LexErrorKind) -> LexError {
        LexError {
            kind,
            pos: self.token_pos,
        }
    }
}

fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_ident(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// The fully materialized output of the lexer. Also remembers the
/// position just past the last character, so the parser can point at the
/// end of input.
#[derive(Debug)]
pub struct TokenStream {
    tokens: std::vec::IntoIter<Token>,
    eof_pos: Pos,
}

impl TokenStream {
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.as_slice().first()
    }

    pub fn at_end(&self) -> bool {
        self.peek().is_none()
    }

    pub fn eof_pos(&self) -> Pos {
        self.eof_pos
    }

    pub fn as_slice(&self) -> &[Token] {
        self.tokens.as_slice()
    }
}

impl Iterator for TokenStream {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.tokens.next()
    }
}
