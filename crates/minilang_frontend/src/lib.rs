//! The MiniLang front end: tokenizing, parsing and the AST.
//!
//! Source text goes in, a [`Program`](ast::Program) comes out (or the
//! first lexical/syntax error). Semantic analysis lives in
//! `minilang_middle` and consumes the AST produced here.

#[macro_use]
extern crate macro_rules_attribute;

mod lexer;
mod parser;

pub mod ast;
pub mod pos;
pub mod token;

pub use lexer::{LexError, LexErrorKind, TokenStream};
pub use parser::SyntaxError;

use ast::Program;
use lexer::Lexer;
use parser::Parser;

derive_alias! {
    #[derive(Node!)] = #[derive(Debug, Clone, PartialEq, serde::Serialize)];
    #[derive(NodeCopy!)] = #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)];
}

/// A fatal error from either front end stage.
#[derive(thiserror::Error, Debug)]
pub enum FrontendError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

/// Tokenize a source string, stopping at the first unrecognized input.
pub fn tokenize(source: &str) -> Result<TokenStream, LexError> {
    Lexer::new(source).lex()
}

/// Parse a token stream into a program, stopping at the first syntax error.
pub fn parse(tokens: TokenStream) -> Result<Program, SyntaxError> {
    Parser::new(tokens).parse()
}

/// Tokenize and parse in one step.
pub fn parse_source(source: &str) -> Result<Program, FrontendError> {
    let tokens = tokenize(source)?;
    let program = parse(tokens)?;
    Ok(program)
}
