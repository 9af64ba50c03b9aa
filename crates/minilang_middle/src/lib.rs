//! Semantic analysis for MiniLang: flat-scope symbol resolution and
//! static type checking over the AST produced by `minilang_frontend`.

#[cfg(test)]
mod tests;

mod type_check;

pub use type_check::{Analysis, SemanticError, Type};

use minilang_frontend::ast::Program;
use type_check::TypeChecker;

/// Analyze a whole program, accumulating every diagnostic found during a
/// single traversal. Never fails: the verdict and the ordered diagnostic
/// list are returned as data.
pub fn analyze(program: &Program) -> Analysis {
    TypeChecker::new().run(program)
}
