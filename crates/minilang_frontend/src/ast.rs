use std::fmt;

use crate::pos::Pos;
use crate::{Node, NodeCopy};

/// The root of a parsed source file.
#[derive(Node!)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

#[derive(Node!)]
pub enum Stmt {
    /// `let name = value;` — declares and initializes a variable.
    Let { name: Ident, value: Expr },

    /// `name = value;` — rebinds a variable.
    Assign { name: Ident, value: Expr },

    /// `print expr, expr, ...;` — always at least one argument.
    Print { args: Vec<Expr> },

    If {
        cond: Expr,
        then_block: Vec<Stmt>,
        else_block: Option<Vec<Stmt>>,
    },

    While { cond: Expr, body: Vec<Stmt> },
}

/// An expression and the position of its leftmost token.
#[derive(Node!)]
pub struct Expr {
    pub kind: ExprKind,
    pub pos: Pos,
}

impl Expr {
    pub fn new(kind: ExprKind, pos: Pos) -> Self {
        Self { kind, pos }
    }
}

#[derive(Node!)]
pub enum ExprKind {
    Number(f64),
    Str(String),

    Var(Ident),

    BinOp {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },

    /// Comparisons are their own node, not a `BinOp`: they always yield a
    /// boolean, are not chainable, and only appear as `if`/`while`
    /// conditions.
    Comparison {
        op: CmpOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

#[derive(Node!)]
pub struct Ident {
    pub name: String,
    pub pos: Pos,
}

#[derive(NodeCopy!)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
        })
    }
}

#[derive(NodeCopy!)]
pub enum CmpOp {
    Eq,
    Lt,
    Gt,
    LtEq,
    GtEq,
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CmpOp::Eq => "==",
            CmpOp::Lt => "<",
            CmpOp::Gt => ">",
            CmpOp::LtEq => "<=",
            CmpOp::GtEq => ">=",
        })
    }
}
