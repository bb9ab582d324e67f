//! Automatic semicolon insertion tests.
//!
//! Verifies where line breaks end statements, where they do not, and the
//! restricted productions that forbid a line break at a given position.

use bumpalo::Bump;
use esfront_ast::*;
use esfront_diagnostics::ErrorCode;
use esfront_parser::{parse, ParserOptions};

/// Helper: parse a script and return its top-level statements.
fn statements<'a>(arena: &'a Bump, source: &'a str) -> &'a [Statement<'a>] {
    match parse(arena, source, ParserOptions::default()) {
        Ok(program) => program.body,
        Err(err) => panic!("failed to parse {source:?}: {err:?}"),
    }
}

fn assert_statement_count(source: &str, expected: usize) {
    let arena = Bump::new();
    assert_eq!(statements(&arena, source).len(), expected, "source: {source:?}");
}

fn assert_error(source: &str, code: ErrorCode) {
    let arena = Bump::new();
    match parse(&arena, source, ParserOptions::default()) {
        Ok(_) => panic!("expected {code:?} for {source:?}"),
        Err(err) => assert_eq!(err.code, code, "source: {source:?}, error: {err:?}"),
    }
}

/// Helper: the body of the only function declaration in `source`.
fn function_body<'a>(arena: &'a Bump, source: &'a str) -> &'a [Statement<'a>] {
    match statements(arena, source) {
        [Statement::Function(decl)] => match decl.func.body {
            Some(body) => body.body,
            None => panic!("function has no body"),
        },
        other => panic!("expected one function, got {other:?}"),
    }
}

// ============================================================================
// Statement Ends
// ============================================================================

#[test]
fn test_line_break_ends_statement() {
    assert_statement_count("let x = 1\nlet y = 2", 2);
    assert_statement_count("a\nb\nc", 3);
    assert_statement_count("{ 1\n2 } 3", 2);
}

#[test]
fn test_no_insertion_without_line_break() {
    assert_error("var a = 1 var b", ErrorCode::UnexpectedToken);
    assert_error("a b", ErrorCode::UnexpectedToken);
}

#[test]
fn test_insertion_before_closing_brace_and_eof() {
    assert_statement_count("function f() { return 1 }", 1);
    assert_statement_count("x = 1", 1);
}

#[test]
fn test_do_while_semicolon_is_optional() {
    assert_statement_count("do x(); while (y) z()", 2);
}

#[test]
fn test_else_after_line_break() {
    let arena = Bump::new();
    let body = statements(&arena, "if (a) b\nelse c");
    assert_eq!(body.len(), 1);
    assert!(matches!(body[0], Statement::If(stmt) if stmt.alt.is_some()));
}

// ============================================================================
// Continuation Across Line Breaks
// ============================================================================

#[test]
fn test_call_continues_across_line_break() {
    let arena = Bump::new();
    let body = statements(&arena, "a = b\n(c)");
    assert_eq!(body.len(), 1);
    let Statement::Expr(stmt) = body[0] else {
        panic!("expected an expression statement");
    };
    let Expression::Assign(assign) = stmt.expr else {
        panic!("expected an assignment");
    };
    assert!(matches!(assign.right, Expression::Call(_)));
}

#[test]
fn test_member_and_template_continue() {
    assert_statement_count("a\n[b]", 1);
    assert_statement_count("a\n.b", 1);
    assert_statement_count("tag\n`t`", 1);
}

#[test]
fn test_let_declaration_across_line_break() {
    let arena = Bump::new();
    let body = statements(&arena, "let\nx = 1");
    assert_eq!(body.len(), 1);
    assert!(matches!(body[0], Statement::Var(decl) if decl.kind == VarKind::Let));
}

// ============================================================================
// Restricted Productions
// ============================================================================

#[test]
fn test_return_with_line_break() {
    let arena = Bump::new();
    let body = function_body(&arena, "function f() { return\na }");
    assert_eq!(body.len(), 2);
    assert!(matches!(body[0], Statement::Return(ret) if ret.arg.is_none()));
}

#[test]
fn test_postfix_update_after_line_break() {
    let arena = Bump::new();
    let body = statements(&arena, "a\n++b");
    assert_eq!(body.len(), 2);
    let Statement::Expr(second) = body[1] else {
        panic!("expected an expression statement");
    };
    assert!(matches!(second.expr, Expression::Update(update) if update.prefix));

    let body = statements(&arena, "i\n++\nj");
    assert_eq!(body.len(), 2);
    assert!(matches!(body[0], Statement::Expr(s) if matches!(s.expr, Expression::Ident(_))));
}

#[test]
fn test_throw_with_line_break() {
    let arena = Bump::new();
    let err = match parse(&arena, "throw\nerr", ParserOptions::default()) {
        Ok(_) => panic!("expected an error"),
        Err(err) => err,
    };
    assert_eq!(err.code, ErrorCode::RestrictedProductionViolation);
    assert_eq!((err.range.lo, err.range.hi), (0, 5));
    assert!(err.message.contains("throw"));
}

#[test]
fn test_arrow_with_line_break() {
    assert_error("x\n=> 1", ErrorCode::RestrictedProductionViolation);
    assert_error("(a)\n=> 1", ErrorCode::RestrictedProductionViolation);
    assert_statement_count("(a) =>\n1", 1);
}

#[test]
fn test_break_label_after_line_break() {
    let arena = Bump::new();
    let body = statements(&arena, "outer: for (;;) { break\nouter }");
    let Statement::Labeled(labeled) = body[0] else {
        panic!("expected a labeled statement");
    };
    let Statement::For(for_stmt) = labeled.body else {
        panic!("expected a for statement");
    };
    let Statement::Block(block) = for_stmt.body else {
        panic!("expected a block");
    };
    assert_eq!(block.body.len(), 2);
    assert!(matches!(block.body[0], Statement::Break(b) if b.label.is_none()));
}

#[test]
fn test_continue_label_after_line_break() {
    assert_statement_count("for (;;) { continue\nfoo }", 1);
}

#[test]
fn test_yield_with_line_break() {
    let arena = Bump::new();
    let body = function_body(&arena, "function* g() { yield\n1 }");
    assert_eq!(body.len(), 2);
    let Statement::Expr(first) = body[0] else {
        panic!("expected an expression statement");
    };
    assert!(matches!(first.expr, Expression::Yield(y) if y.arg.is_none()));
}

#[test]
fn test_async_with_line_break() {
    let arena = Bump::new();
    let body = statements(&arena, "async\nfunction f() {}");
    assert_eq!(body.len(), 2);
    assert!(matches!(body[0], Statement::Expr(s) if matches!(s.expr, Expression::Ident(id) if id.name == "async")));
    assert!(matches!(body[1], Statement::Function(f) if !f.func.is_async));
}
