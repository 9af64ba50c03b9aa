
mod expr;

use crate::ast::*;
use crate::lexer::TokenStream;
use crate::pos::Pos;
use crate::token::{Keyword, Token, TokenKind};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[error("expected {expected}, found {found} at {pos}")]
pub struct SyntaxError {
    pub expected: String,
    pub found: String,
    pub pos: Pos,
}

pub type ParseResult<T> = Result<T, SyntaxError>;

pub(crate) struct Parser {
    tokens: TokenStream,
}

impl Parser {
    pub fn new(tokens: TokenStream) -> Self {
        Self { tokens }
    }

    pub fn parse(mut self) -> ParseResult<Program> {
        let mut statements = vec![];

        while !self.tokens.at_end() {
            statements.push(self.parse_statement()?);
        }

        Ok(Program { statements })
    }

    // always advances at least one token, directly or via an error
    fn parse_statement(&mut self) -> ParseResult<Stmt> {
        match self.peek_kind() {
            Some(TokenKind::Keyword(Keyword::Let)) => self.parse_let(),
            Some(TokenKind::Identifier) => self.parse_assign(),
            Some(TokenKind::Keyword(Keyword::Print)) => self.parse_print(),
            Some(TokenKind::Keyword(Keyword::If)) => self.parse_if(),
            Some(TokenKind::Keyword(Keyword::While)) => self.parse_while(),

            _ => Err(self.error_expected_here("a statement")),
        }
    }

    fn parse_let(&mut self) -> ParseResult<Stmt> {
        self.tokens.next(); // `let`

        let name = self.parse_ident()?;
        self.expect(TokenKind::Assign)?;
        let value = self.parse_expr()?;
        self.expect(TokenKind::Semicolon)?;

        Ok(Stmt::Let { name, value })
    }

    fn parse_assign(&mut self) -> ParseResult<Stmt> {
        let name = self.parse_ident()?;
        self.expect(TokenKind::Assign)?;
        let value = self.parse_expr()?;
        self.expect(TokenKind::Semicolon)?;

        Ok(Stmt::Assign { name, value })
    }

    fn parse_print(&mut self) -> ParseResult<Stmt> {
        self.tokens.next(); // `print`

        let mut args = vec![self.parse_expr()?];
        while self.eat_kind(TokenKind::Comma) {
            args.push(self.parse_expr()?);
        }

        self.expect(TokenKind::Semicolon)?;

        Ok(Stmt::Print { args })
    }

    fn parse_if(&mut self) -> ParseResult<Stmt> {
        self.tokens.next(); // `if`

        self.expect(TokenKind::LParen)?;
        let cond = self.parse_comparison()?;
        self.expect(TokenKind::RParen)?;

        let then_block = self.parse_block()?;

        let else_block = if self.eat_kind(TokenKind::Keyword(Keyword::Else)) {
            Some(self.parse_block()?)
        } else {
            None
        };

        Ok(Stmt::If {
            cond,
            then_block,
            else_block,
        })
    }

    fn parse_while(&mut self) -> ParseResult<Stmt> {
        self.tokens.next(); // `while`

        self.expect(TokenKind::LParen)?;
        let cond = self.parse_comparison()?;
        self.expect(TokenKind::RParen)?;

        let body = self.parse_block()?;

        Ok(Stmt::While { cond, body })
    }

    fn parse_block(&mut self) -> ParseResult<Vec<Stmt>> {
        self.expect(TokenKind::LBrace)?;

        let mut statements = vec![];
        while !matches!(self.peek_kind(), Some(TokenKind::RBrace) | None) {
            statements.push(self.parse_statement()?);
        }

        self.expect(TokenKind::RBrace)?;

        Ok(statements)
    }

    fn parse_ident(&mut self) -> ParseResult<Ident> {
        match self.tokens.next() {
            Some(token) if token.kind == TokenKind::Identifier => Ok(Ident {
                name: token.lexeme,
                pos: token.pos,
            }),
            other => Err(self.error_expected("an identifier", other.as_ref())),
        }
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.tokens.peek().map(|t| t.kind)
    }

    fn expect(&mut self, kind: TokenKind) -> ParseResult<Token> {
        match self.tokens.next() {
            Some(token) if token.kind == kind => Ok(token),
            other => Err(self.error_expected(kind.token_name(), other.as_ref())),
        }
    }

    fn eat_kind(&mut self, kind: TokenKind) -> bool {
        if self.peek_kind() == Some(kind) {
            self.tokens.next();
            true
        } else {
            false
        }
    }

    fn error_expected_here(&self, expected: impl Into<String>) -> SyntaxError {
        self.error_expected(expected, self.tokens.peek())
    }

    fn error_expected(&self, expected: impl Into<String>, found: Option<&Token>) -> SyntaxError {
        match found {
            Some(token) => SyntaxError {
                expected: expected.into(),
                found: token.kind.token_name().to_owned(),
                pos: token.pos,
            },
            None => SyntaxError {
                expected: expected.into(),
                found: "end of input".to_owned(),
                pos: self.tokens.eof_pos(),
            },
        }
    }
}
