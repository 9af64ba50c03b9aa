use std::collections::HashMap;
use std::fmt;

use minilang_frontend::ast::*;
use minilang_frontend::pos::Pos;

/// The MiniLang type lattice, plus `Unknown` for error recovery.
/// `Unknown` is compatible with every expected type so that a single
/// undeclared variable does not multiply into spurious operator errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Type {
    Number,
    Str,
    Bool,
    Unknown,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Type::Number => "number",
            Type::Str => "string",
            Type::Bool => "boolean",
            Type::Unknown => "unknown",
        })
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, serde::Serialize)]
pub enum SemanticError {
    #[error("undeclared variable `{name}` at {pos}")]
    UndeclaredVariable { name: String, pos: Pos },

    #[error("operator `{op}` cannot be applied to {lhs} and {rhs} at {pos}")]
    TypeMismatch {
        op: String,
        lhs: Type,
        rhs: Type,
        pos: Pos,
    },

    #[error("`{construct}` condition has type {found}, expected boolean, at {pos}")]
    ConditionTypeError {
        construct: &'static str,
        found: Type,
        pos: Pos,
    },
}

/// The outcome of analyzing one program: the ordered list of diagnostics
/// found during a full traversal.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Analysis {
    pub errors: Vec<SemanticError>,
}

impl Analysis {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

pub(crate) struct TypeChecker {
    // one flat table for the whole program: MiniLang has no block scoping,
    // so a `let` inside an `if`/`while` body escapes it
    symbols: HashMap<String, Type>,
    errors: Vec<SemanticError>,
}

impl TypeChecker {
    pub fn new() -> Self {
        Self {
            symbols: HashMap::new(),
            errors: vec![],
        }
    }

    pub fn run(mut self, program: &Program) -> Analysis {
        for stmt in &program.statements {
            self.check_stmt(stmt);
        }

        Analysis {
            errors: self.errors,
        }
    }

    fn check_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            // redeclaration by `let` overwrites; `=` on a fresh name binds
            // it, matching the flat source language
            Stmt::Let { name, value } | Stmt::Assign { name, value } => {
                let ty = self.check_expr(value);
                self.symbols.insert(name.name.clone(), ty);
            }

            Stmt::Print { args } => {
                for arg in args {
                    self.check_expr(arg);
                }
            }

            Stmt::If {
                cond,
                then_block,
                else_block,
            } => {
                self.check_condition(cond, "if");

                for stmt in then_block {
                    self.check_stmt(stmt);
                }

                if let Some(else_block) = else_block {
                    for stmt in else_block {
                        self.check_stmt(stmt);
                    }
                }
            }

            Stmt::While { cond, body } => {
                self.check_condition(cond, "while");

                for stmt in body {
                    self.check_stmt(stmt);
                }
            }
        }
    }

    fn check_condition(&mut self, cond: &Expr, construct: &'static str) {
        let ty = self.check_expr(cond);

        if !matches!(ty, Type::Bool | Type::Unknown) {
            self.errors.push(SemanticError::ConditionTypeError {
                construct,
                found: ty,
                pos: cond.pos,
            });
        }
    }

    fn check_expr(&mut self, expr: &Expr) -> Type {
        match &expr.kind {
            ExprKind::Number(_) => Type::Number,
            ExprKind::Str(_) => Type::Str,

            ExprKind::Var(ident) => match self.symbols.get(&ident.name) {
                Some(ty) => *ty,
                None => {
                    self.errors.push(SemanticError::UndeclaredVariable {
                        name: ident.name.clone(),
                        pos: ident.pos,
                    });
                    Type::Unknown
                }
            },

            ExprKind::BinOp { op, lhs, rhs } => {
                let lhs_ty = self.check_expr(lhs);
                let rhs_ty = self.check_expr(rhs);

                if !is_numeric_operand(lhs_ty) || !is_numeric_operand(rhs_ty) {
                    self.errors.push(SemanticError::TypeMismatch {
                        op: op.to_string(),
                        lhs: lhs_ty,
                        rhs: rhs_ty,
                        pos: expr.pos,
                    });
                }

                // arithmetic is closed over numbers by grammar
                // construction, so the node's type holds even when an
                // operand was bad
                Type::Number
            }

            ExprKind::Comparison { op, lhs, rhs } => {
                let lhs_ty = self.check_expr(lhs);
                let rhs_ty = self.check_expr(rhs);

                if lhs_ty != rhs_ty && lhs_ty != Type::Unknown && rhs_ty != Type::Unknown {
                    self.errors.push(SemanticError::TypeMismatch {
                        op: op.to_string(),
                        lhs: lhs_ty,
                        rhs: rhs_ty,
                        pos: expr.pos,
                    });
                }

                Type::Bool
            }
        }
    }
}

fn is_numeric_operand(ty: Type) -> bool {
    matches!(ty, Type::Number | Type::Unknown)
}
