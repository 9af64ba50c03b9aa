use super::{ParseResult, Parser};
use crate::ast::*;
use crate::token::TokenKind;

impl Parser {
    /// Parse an `if`/`while` condition: an expression followed by at most
    /// one comparison operator. Comparisons are deliberately not
    /// chainable; `a < b < c` fails at the second operator.
    pub(super) fn parse_comparison(&mut self) -> ParseResult<Expr> {
        let lhs = self.parse_expr()?;

        let Some(op) = self.peek_cmp_op() else {
            return Ok(lhs);
        };
        self.tokens.next();

        let rhs = self.parse_expr()?;

        let pos = lhs.pos;
        Ok(Expr::new(
            ExprKind::Comparison {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
            pos,
        ))
    }

    pub(super) fn parse_expr(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_term()?;

        while let Some(op) = self.peek_add_op() {
            self.tokens.next();
            let rhs = self.parse_term()?;
            expr = fold_binop(op, expr, rhs);
        }

        Ok(expr)
    }

    fn parse_term(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_factor()?;

        while let Some(op) = self.peek_mul_op() {
            self.tokens.next();
            let rhs = self.parse_factor()?;
            expr = fold_binop(op, expr, rhs);
        }

        Ok(expr)
    }

    fn parse_factor(&mut self) -> ParseResult<Expr> {
        match self.tokens.next() {
            Some(token) if token.kind == TokenKind::Number => {
                let value: f64 = token
                    .lexeme
                    .parse()
                    .map_err(|_| self.error_expected("a number", Some(&token)))?;
                Ok(Expr::new(ExprKind::Number(value), token.pos))
            }

            Some(token) if token.kind == TokenKind::Str => {
                // the lexeme keeps its quotes; the literal value drops them
                let value = token.lexeme[1..token.lexeme.len() - 1].to_owned();
                Ok(Expr::new(ExprKind::Str(value), token.pos))
            }

            Some(token) if token.kind == TokenKind::Identifier => {
                let pos = token.pos;
                Ok(Expr::new(
                    ExprKind::Var(Ident {
                        name: token.lexeme,
                        pos,
                    }),
                    pos,
                ))
            }

            Some(token) if token.kind == TokenKind::LParen => {
                let expr = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(expr)
            }

            other => Err(self.error_expected("an expression", other.as_ref())),
        }
    }

    fn peek_add_op(&self) -> Option<BinOp> {
        match self.peek_kind()? {
            TokenKind::Add => Some(BinOp::Add),
            TokenKind::Sub => Some(BinOp::Sub),
            _ => None,
        }
    }

    fn peek_mul_op(&self) -> Option<BinOp> {
        match self.peek_kind()? {
            TokenKind::Mul => Some(BinOp::Mul),
            TokenKind::Div => Some(BinOp::Div),
            _ => None,
        }
    }

    fn peek_cmp_op(&self) -> Option<CmpOp> {
        match self.peek_kind()? {
            TokenKind::EqEq => Some(CmpOp::Eq),
            TokenKind::Lt => Some(CmpOp::Lt),
            TokenKind::Gt => Some(CmpOp::Gt),
            TokenKind::LtEq => Some(CmpOp::LtEq),
            TokenKind::GtEq => Some(CmpOp::GtEq),
            _ => None,
        }
    }
}

/// Left-associative fold: the new node takes its position from the
/// leftmost operand.
fn fold_binop(op: BinOp, lhs: Expr, rhs: Expr) -> Expr {
    let pos = lhs.pos;
    Expr::new(
        ExprKind::BinOp {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        },
        pos,
    )
}
