use crate::pos::Pos;
use crate::{Node, NodeCopy};

/// A single lexical unit: its kind, the exact matched text and the
/// position of its first character.
#[derive(Node!)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub pos: Pos,
}

#[derive(NodeCopy!)]
pub enum TokenKind {
    Keyword(Keyword),
    Identifier,
    Number,
    Str,

    Add,
    Sub,
    Mul,
    Div,

    Assign,
    EqEq,
    Lt,
    Gt,
    LtEq,
    GtEq,

    LParen,
    RParen,
    LBrace,
    RBrace,
    Semicolon,
    Comma,
}

#[derive(NodeCopy!)]
pub enum Keyword {
    Let,
    Print,
    If,
    Else,
    While,
}

impl TokenKind {
    pub fn token_name(&self) -> &'static str {
        match self {
            TokenKind::Keyword(kw) => match kw {
                Keyword::Let => "keyword `let`",
                Keyword::Print => "keyword `print`",
                Keyword::If => "keyword `if`",
                Keyword::Else => "keyword `else`",
                Keyword::While => "keyword `while`",
            },
            TokenKind::Identifier => "identifier",
            TokenKind::Number => "number",
            TokenKind::Str => "string",
            TokenKind::Add => "`+`",
            TokenKind::Sub => "`-`",
            TokenKind::Mul => "`*`",
            TokenKind::Div => "`/`",
            TokenKind::Assign => "`=`",
            TokenKind::EqEq => "`==`",
            TokenKind::Lt => "`<`",
            TokenKind::Gt => "`>`",
            TokenKind::LtEq => "`<=`",
            TokenKind::GtEq => "`>=`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Comma => "`,`",
        }
    }
}
