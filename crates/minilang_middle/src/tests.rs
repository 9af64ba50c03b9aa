use minilang_frontend::ast::{ExprKind, Program, Stmt};
use minilang_frontend::parse_source;
use minilang_frontend::pos::Pos;

use crate::{analyze, SemanticError, Type};

fn check(source: &str) -> Vec<SemanticError> {
    let program = parse_source(source).expect("source should parse");
    analyze(&program).errors
}

#[test]
fn valid_declaration() {
    let errors = check("let x = 10;");
    assert!(errors.is_empty());
}

#[test]
fn valid_arithmetic_program() {
    let errors = check(
        "let x = 1 + 2 * 3;\n\
         let y = (x - 4) / 2;\n\
         print x, y;",
    );
    assert!(errors.is_empty());
}

#[test]
fn undeclared_variable_reports_once() {
    // `x` is unknown, and unknown operands never produce a second
    // arithmetic diagnostic
    let errors = check("print x + 1;");

    assert_eq!(
        errors,
        [SemanticError::UndeclaredVariable {
            name: "x".to_owned(),
            pos: Pos::new(1, 7),
        }]
    );
}

#[test]
fn non_boolean_if_condition() {
    let errors = check("if (1) { print 1; }");

    assert_eq!(
        errors,
        [SemanticError::ConditionTypeError {
            construct: "if",
            found: Type::Number,
            pos: Pos::new(1, 5),
        }]
    );
}

#[test]
fn non_boolean_while_condition() {
    let errors = check("let a = 1; while (a) { a = a - 1; }");

    assert_eq!(errors.len(), 1);
    assert!(matches!(
        &errors[0],
        SemanticError::ConditionTypeError {
            construct: "while",
            found: Type::Number,
            ..
        }
    ));
}

#[test]
fn comparison_condition_is_boolean() {
    let errors = check("let a = 1; while (a > 0) { a = a - 1; }");
    assert!(errors.is_empty());
}

#[test]
fn string_in_arithmetic() {
    let errors = check("let x = \"a\"; let y = x + 1;");

    assert_eq!(
        errors,
        [SemanticError::TypeMismatch {
            op: "+".to_owned(),
            lhs: Type::Str,
            rhs: Type::Number,
            pos: Pos::new(1, 22),
        }]
    );
}

#[test]
fn comparison_of_different_types() {
    let errors = check("let x = \"a\"; if (x == 1) { print x; }");

    assert_eq!(errors.len(), 1);
    assert!(matches!(
        &errors[0],
        SemanticError::TypeMismatch { op, lhs: Type::Str, rhs: Type::Number, .. } if op == "=="
    ));
}

#[test]
fn comparison_of_same_types() {
    let errors = check("let s = \"a\"; if (s == \"b\") { print s; }");
    assert!(errors.is_empty());
}

#[test]
fn unknown_condition_is_suppressed() {
    // one diagnostic for the undeclared variable, none for the condition
    let errors = check("if (y) { print 1; }");

    assert_eq!(errors.len(), 1);
    assert!(matches!(
        &errors[0],
        SemanticError::UndeclaredVariable { name, .. } if name == "y"
    ));
}

#[test]
fn unknown_comparison_is_suppressed() {
    let errors = check("if (y > 0) { print 1; }");

    assert_eq!(errors.len(), 1);
    assert!(matches!(
        &errors[0],
        SemanticError::UndeclaredVariable { name, .. } if name == "y"
    ));
}

#[test]
fn let_in_block_escapes() {
    // no block scoping: a `let` inside a nested block mutates the single
    // program-wide table and stays visible afterwards
    let errors = check(
        "let x = 1;\n\
         if (x > 0) { let y = 2; }\n\
         print y;",
    );
    assert!(errors.is_empty());
}

#[test]
fn rebinding_changes_the_type() {
    let errors = check("let x = 1; x = \"a\"; let y = x + 1;");

    assert_eq!(errors.len(), 1);
    assert!(matches!(
        &errors[0],
        SemanticError::TypeMismatch { lhs: Type::Str, rhs: Type::Number, .. }
    ));
}

#[test]
fn assignment_binds_fresh_names() {
    // assignment to an undeclared name binds it, as in the source language
    let errors = check("y = 5; print y + 1;");
    assert!(errors.is_empty());
}

#[test]
fn diagnostics_accumulate_in_traversal_order() {
    let errors = check("print a; print b; if (1) {}");

    assert_eq!(errors.len(), 3);
    assert!(matches!(&errors[0], SemanticError::UndeclaredVariable { name, .. } if name == "a"));
    assert!(matches!(&errors[1], SemanticError::UndeclaredVariable { name, .. } if name == "b"));
    assert!(matches!(&errors[2], SemanticError::ConditionTypeError { construct: "if", .. }));
}

#[test]
fn bad_operand_does_not_cascade() {
    // the first binary operation is bad, but its result is still a
    // number, so the second one is clean
    let errors = check("let x = \"a\" + 1; let y = x + 1;");
    assert_eq!(errors.len(), 1);
}

#[test]
fn arithmetic_soundness_on_clean_programs() {
    let source = "let x = 1 + 2 * 3;\n\
                  let y = x - 4;\n\
                  while (y < 10) { y = y + x; }";

    let program = parse_source(source).expect("source should parse");
    let analysis = analyze(&program);

    assert!(analysis.is_valid());
    assert_all_binop_operands_numeric(&program);
}

// after a clean analysis every arithmetic operand must be a number; this
// walks the AST and re-derives operand types from literals and bindings
fn assert_all_binop_operands_numeric(program: &Program) {
    fn walk(stmts: &[Stmt]) {
        for stmt in stmts {
            match stmt {
                Stmt::Let { value, .. } | Stmt::Assign { value, .. } => walk_expr(value),
                Stmt::Print { args } => args.iter().for_each(walk_expr),
                Stmt::If {
                    cond,
                    then_block,
                    else_block,
                } => {
                    walk_expr(cond);
                    walk(then_block);
                    if let Some(block) = else_block {
                        walk(block);
                    }
                }
                Stmt::While { cond, body } => {
                    walk_expr(cond);
                    walk(body);
                }
            }
        }
    }

    fn walk_expr(expr: &minilang_frontend::ast::Expr) {
        match &expr.kind {
            ExprKind::BinOp { lhs, rhs, .. } => {
                for operand in [lhs, rhs] {
                    assert!(
                        !matches!(operand.kind, ExprKind::Str(_)),
                        "string operand survived a clean analysis"
                    );
                    walk_expr(operand);
                }
            }
            ExprKind::Comparison { lhs, rhs, .. } => {
                walk_expr(lhs);
                walk_expr(rhs);
            }
            ExprKind::Number(_) | ExprKind::Str(_) | ExprKind::Var(_) => {}
        }
    }

    walk(&program.statements);
}
